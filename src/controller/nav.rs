use super::*;

impl PageController {
    pub(super) fn toggle_menu(&mut self, host: &mut Host<'_>) -> Result<()> {
        let (Some(menu), Some(toggle)) = (self.nav_menu, self.nav_toggle) else {
            return Ok(());
        };
        let open = host.dom.class_toggle(menu, "active")?;
        host.dom.class_toggle(toggle, "active")?;
        self.set_scroll_lock(host, open)?;
        tracing::debug!(open, "mobile menu toggled");
        Ok(())
    }

    /// Idempotent: closing a closed menu changes nothing.
    pub(super) fn close_menu(&mut self, host: &mut Host<'_>) -> Result<()> {
        if let Some(menu) = self.nav_menu {
            host.dom.class_remove(menu, "active")?;
        }
        if let Some(toggle) = self.nav_toggle {
            host.dom.class_remove(toggle, "active")?;
        }
        self.set_scroll_lock(host, false)
    }

    fn set_scroll_lock(&self, host: &mut Host<'_>, locked: bool) -> Result<()> {
        let Some(body) = host.dom.body() else {
            return Ok(());
        };
        host.dom
            .style_set(body, "overflow", if locked { "hidden" } else { "" })
    }

    pub(super) fn close_menu_on_outside_click(
        &mut self,
        host: &mut Host<'_>,
        event: &EventState,
    ) -> Result<()> {
        let (Some(menu), Some(toggle)) = (self.nav_menu, self.nav_toggle) else {
            return Ok(());
        };
        if host.dom.contains(menu, event.target) || host.dom.contains(toggle, event.target) {
            return Ok(());
        }
        self.close_menu(host)
    }

    pub(super) fn bind_dropdowns(&mut self, host: &mut Host<'_>) -> Result<()> {
        let narrow_at_bind =
            decisions::is_narrow_viewport(host.window.inner_width, self.config.mobile_breakpoint);
        let gate_open = match self.config.dropdown_gate {
            DropdownGate::AtBind => narrow_at_bind,
            DropdownGate::PerClick => true,
        };

        for dropdown in self.dropdowns.clone() {
            let link = host.dom.query_selector_from(dropdown, ".nav-link")?;
            let menu = host.dom.query_selector_from(dropdown, ".dropdown-menu")?;
            let (Some(link), Some(_)) = (link, menu) else {
                continue;
            };
            if gate_open {
                self.listeners
                    .add(link, EventKind::Click, Handler::ToggleDropdown { dropdown });
                self.dropdown_toggle_bound = true;
            }
        }
        Ok(())
    }

    pub(super) fn toggle_dropdown(
        &mut self,
        host: &mut Host<'_>,
        dropdown: NodeId,
        event: &mut EventState,
    ) -> Result<()> {
        if self.config.dropdown_gate == DropdownGate::PerClick
            && !decisions::is_narrow_viewport(host.window.inner_width, self.config.mobile_breakpoint)
        {
            return Ok(());
        }
        event.prevent_default();
        let open = host.dom.class_toggle(dropdown, "active")?;
        tracing::debug!(dropdown = dropdown.0, open, "dropdown toggled");
        Ok(())
    }

    pub(super) fn close_dropdowns_outside(
        &mut self,
        host: &mut Host<'_>,
        event: &EventState,
    ) -> Result<()> {
        for dropdown in &self.dropdowns {
            if !host.dom.contains(*dropdown, event.target) {
                host.dom.class_remove(*dropdown, "active")?;
            }
        }
        Ok(())
    }

    pub(super) fn smooth_scroll_anchor(
        &mut self,
        host: &mut Host<'_>,
        event: &mut EventState,
    ) -> Result<()> {
        let Some(href) = host.dom.attr(event.current_target, "href") else {
            return Ok(());
        };
        if !decisions::smooth_scroll_href(&href) {
            return Ok(());
        }

        // An href that is not a usable selector leaves the click alone.
        let target = match host.dom.query_selector(&href) {
            Ok(Some(target)) => target,
            Ok(None) | Err(_) => return Ok(()),
        };

        event.prevent_default();
        let scroll_y = host.window.scroll_y;
        let rect = host.layout.bounding_client_rect(target, scroll_y);
        let top = decisions::anchor_scroll_top(rect.top(), scroll_y, self.config.anchor_header_offset);
        tracing::debug!(%href, top, "smooth scrolling to anchor");
        self.scroll_window(host, top, ScrollBehavior::Smooth)
    }

    pub(super) fn mark_active_nav_link(&mut self, host: &mut Host<'_>) -> Result<()> {
        let page = decisions::current_page(&host.window.pathname);
        for link in &self.nav_links {
            let current = host
                .dom
                .attr(*link, "href")
                .is_some_and(|href| decisions::nav_link_is_current(&href, &page));
            host.dom.class_set(*link, "active", current)?;
        }
        Ok(())
    }
}
