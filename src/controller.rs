use super::*;

mod forms;
mod nav;
mod reveal;

use forms::BoundForm;

/// Mutable view of the page state a handler may touch.
pub(crate) struct Host<'a> {
    pub(crate) dom: &'a mut Dom,
    pub(crate) window: &'a mut WindowState,
    pub(crate) layout: &'a LayoutState,
    pub(crate) scheduler: &'a mut SchedulerState,
    pub(crate) trace: &'a mut TraceState,
}

/// The page behaviors, bound once against a loaded document.
///
/// Element lookups happen in [`PageController::bind`]; anything missing at that
/// point silently disables the feature that needs it.
#[derive(Debug)]
pub struct PageController {
    config: InteractionConfig,
    header: Option<NodeId>,
    nav_toggle: Option<NodeId>,
    nav_menu: Option<NodeId>,
    nav_links: Vec<NodeId>,
    scroll_to_top: Option<NodeId>,
    dropdowns: Vec<NodeId>,
    dropdown_toggle_bound: bool,
    anchors: Vec<NodeId>,
    forms: Vec<BoundForm>,
    observer: RevealObserver,
    listeners: ListenerStore,
    resize_timer: Option<i64>,
}

impl PageController {
    /// Queries the document once and attaches every listener, in the order the
    /// behaviors rely on.
    pub(crate) fn bind(host: &mut Host<'_>, config: InteractionConfig) -> Result<Self> {
        let dom = &*host.dom;
        let root = dom.root;

        let mut controller = Self {
            header: dom.by_id("header"),
            nav_toggle: dom.by_id("navToggle"),
            nav_menu: dom.by_id("navMenu"),
            nav_links: dom.query_selector_all(".nav-link")?,
            scroll_to_top: dom.by_id("scrollToTop"),
            dropdowns: dom.query_selector_all(".nav-dropdown")?,
            dropdown_toggle_bound: false,
            anchors: dom.query_selector_all(r##"a[href^="#"]"##)?,
            forms: Vec::new(),
            observer: RevealObserver::new(config.reveal_threshold, config.reveal_bottom_margin),
            listeners: ListenerStore::default(),
            resize_timer: None,
            config,
        };

        if let Some(toggle) = controller.nav_toggle {
            controller
                .listeners
                .add(toggle, EventKind::Click, Handler::ToggleMenu);
        }
        for link in controller.nav_links.clone() {
            controller
                .listeners
                .add(link, EventKind::Click, Handler::CloseMenuFromNavLink);
        }
        controller
            .listeners
            .add(root, EventKind::Click, Handler::CloseMenuOnOutsideClick);

        controller.bind_dropdowns(host)?;
        controller
            .listeners
            .add(root, EventKind::Click, Handler::CloseDropdownsOnOutsideClick);

        for anchor in controller.anchors.clone() {
            controller
                .listeners
                .add(anchor, EventKind::Click, Handler::SmoothScrollAnchor);
        }
        if let Some(button) = controller.scroll_to_top {
            controller
                .listeners
                .add(button, EventKind::Click, Handler::ScrollToTop);
        }

        controller.bind_forms(host)?;

        tracing::debug!(
            listeners = controller.listeners.len(),
            forms = controller.forms.len(),
            dropdown_toggle_bound = controller.dropdown_toggle_bound,
            "page controller bound"
        );
        Ok(controller)
    }

    pub fn config(&self) -> &InteractionConfig {
        &self.config
    }

    /// Whether any dropdown trigger got a click toggle while binding.
    pub fn dropdown_toggle_bound(&self) -> bool {
        self.dropdown_toggle_bound
    }

    pub fn bound_form_ids(&self) -> Vec<&str> {
        self.forms
            .iter()
            .map(|form| form.profile.form_id.as_str())
            .collect()
    }

    pub fn observed_count(&self) -> usize {
        self.observer.len()
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    pub(crate) fn form_state(&self, form_id: &str) -> Option<FormState> {
        self.bound_form(form_id).map(|form| form.state)
    }

    pub(crate) fn form_failures(&self, form_id: &str) -> Option<&[FieldFailure]> {
        self.bound_form(form_id)
            .map(|form| form.last_failures.as_slice())
    }

    fn bound_form(&self, form_id: &str) -> Option<&BoundForm> {
        self.forms
            .iter()
            .find(|form| form.profile.form_id == form_id)
    }

    /// Runs the listeners along `path` (target first), as bubbling dispatch does.
    pub(crate) fn dispatch(
        &mut self,
        host: &mut Host<'_>,
        event: &mut EventState,
        path: &[NodeId],
    ) -> Result<()> {
        for node in path {
            event.current_target = *node;
            for handler in self.listeners.get(*node, event.kind) {
                host.trace.event_line(format!(
                    "[event] {} handler={handler:?} current={}",
                    event.kind.as_str(),
                    node.0
                ));
                self.run_handler(host, handler, event)?;
            }
        }
        Ok(())
    }

    fn run_handler(
        &mut self,
        host: &mut Host<'_>,
        handler: Handler,
        event: &mut EventState,
    ) -> Result<()> {
        match handler {
            Handler::ToggleMenu => self.toggle_menu(host),
            Handler::CloseMenuFromNavLink => {
                if decisions::is_narrow_viewport(host.window.inner_width, self.config.mobile_breakpoint)
                {
                    self.close_menu(host)?;
                }
                Ok(())
            }
            Handler::CloseMenuOnOutsideClick => self.close_menu_on_outside_click(host, event),
            Handler::ToggleDropdown { dropdown } => self.toggle_dropdown(host, dropdown, event),
            Handler::CloseDropdownsOnOutsideClick => self.close_dropdowns_outside(host, event),
            Handler::SmoothScrollAnchor => self.smooth_scroll_anchor(host, event),
            Handler::ScrollToTop => {
                event.prevent_default();
                self.scroll_window(host, 0.0, ScrollBehavior::Smooth)
            }
            Handler::SubmitForm { form } => self.submit_form(host, form, event),
            Handler::LiveValidate { form } => self.live_validate(host, form, event.current_target),
            Handler::ClearErrorOnInput { form } => {
                self.clear_error_on_input(host, form, event.current_target)
            }
        }
    }

    pub(crate) fn on_scroll(&mut self, host: &mut Host<'_>) -> Result<()> {
        let scroll_y = host.window.scroll_y;
        if let Some(header) = self.header {
            let scrolled =
                decisions::header_is_scrolled(scroll_y, self.config.header_scroll_threshold);
            host.dom.class_set(header, "scrolled", scrolled)?;
        }
        if let Some(button) = self.scroll_to_top {
            let visible =
                decisions::scroll_top_is_visible(scroll_y, self.config.scroll_top_threshold);
            host.dom.class_set(button, "visible", visible)?;
        }
        self.reveal(host)
    }

    /// Re-polls the observer after a box moved without a scroll.
    pub(crate) fn reveal_after_layout(&mut self, host: &mut Host<'_>) -> Result<()> {
        self.reveal(host)
    }

    /// Restarts the settle timer; the menu check runs once resizing goes quiet.
    pub(crate) fn on_resize(&mut self, host: &mut Host<'_>) -> Result<()> {
        if let Some(timer) = self.resize_timer.take() {
            host.scheduler.clear(timer);
        }
        let id = host
            .scheduler
            .schedule(TimerTask::ResizeSettle, self.config.resize_debounce_ms);
        self.resize_timer = Some(id);
        host.trace.timer_line(format!(
            "[timer] resize debounce id={id} delay_ms={}",
            self.config.resize_debounce_ms
        ));
        self.reveal(host)
    }

    pub(crate) fn on_timer(&mut self, host: &mut Host<'_>, task: TimerTask) -> Result<()> {
        match task {
            TimerTask::ResizeSettle => {
                self.resize_timer = None;
                let width = host.window.inner_width;
                if decisions::should_close_menu_after_resize(width, self.config.mobile_breakpoint) {
                    tracing::debug!(width, "resize settled above breakpoint, closing menu");
                    self.close_menu(host)?;
                }
                Ok(())
            }
            TimerTask::DismissBanner { banner } => {
                tracing::debug!(banner = banner.0, "dismissing success banner");
                host.dom.remove_node(banner)
            }
        }
    }

    /// DOMContentLoaded work: reveal targets, active nav link, scroll reset.
    pub(crate) fn document_ready(&mut self, host: &mut Host<'_>) -> Result<()> {
        self.observe_reveal_targets(host)?;
        tracing::info!("clinic website loaded successfully");
        host.trace.line("[console] website loaded successfully!".into());
        self.mark_active_nav_link(host)?;
        self.scroll_window(host, 0.0, ScrollBehavior::Instant)?;
        self.reveal(host)
    }

    /// `window.scrollTo`; a change of offset delivers a scroll event.
    fn scroll_window(&mut self, host: &mut Host<'_>, top: f64, behavior: ScrollBehavior) -> Result<()> {
        let before = host.window.scroll_y;
        host.window.scroll_to(top, behavior);
        tracing::debug!(top, ?behavior, "window scroll requested");
        if host.window.scroll_y != before {
            self.on_scroll(host)?;
        }
        Ok(())
    }
}
