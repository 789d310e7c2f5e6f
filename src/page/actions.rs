use super::*;

impl Page {
    /// Scrolls the window to `top` and delivers a scroll event.
    pub fn scroll_to(&mut self, top: f64) -> Result<()> {
        if !top.is_finite() {
            return Err(Error::Runtime(format!("scroll offset must be finite: {top}")));
        }
        self.window.scroll_y = top.max(0.0);
        self.with_controller(|controller, host| controller.on_scroll(host))?;
        Ok(())
    }

    /// Changes the viewport width and delivers a resize event.
    pub fn resize(&mut self, width: f64) -> Result<()> {
        let height = self.window.inner_height;
        self.resize_to(width, height)
    }

    pub fn resize_to(&mut self, width: f64, height: f64) -> Result<()> {
        if !(width.is_finite() && height.is_finite()) || width < 0.0 || height < 0.0 {
            return Err(Error::Runtime(format!(
                "viewport size must be finite and non-negative: {width}x{height}"
            )));
        }
        self.set_viewport_size(width, height);
        self.with_controller(|controller, host| controller.on_resize(host))?;
        Ok(())
    }

    pub fn click(&mut self, selector: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        if self.dom.disabled(target) {
            return Ok(());
        }

        let outcome = self.dispatch_event(target, EventKind::Click)?;
        if outcome.default_prevented {
            return Ok(());
        }

        if dom::is_submit_control(&self.dom, target) {
            if let Some(form) = self.resolve_form_for_submit(target) {
                self.submit_form_node(form)?;
            }
            return Ok(());
        }

        // Unprevented in-page link: the browser only updates the fragment.
        let href = self
            .dom
            .closest(target, "a[href]")?
            .and_then(|anchor| self.dom.attr(anchor, "href"));
        if let Some(fragment) = href.filter(|href| href.starts_with('#')) {
            self.window.hash = fragment;
        }
        Ok(())
    }

    fn type_mismatch(&self, selector: &str, target: NodeId, expected: &str) -> Error {
        Error::TypeMismatch {
            selector: selector.to_string(),
            expected: expected.to_string(),
            actual: self.dom.tag_name(target).unwrap_or("non-element").to_string(),
        }
    }

    /// Replaces the value of an input or textarea, then dispatches `input`.
    pub fn type_text(&mut self, selector: &str, text: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        if self.dom.disabled(target) {
            return Ok(());
        }

        if !(self.dom.has_tag(target, "input") || self.dom.has_tag(target, "textarea")) {
            return Err(self.type_mismatch(selector, target, "input or textarea"));
        }

        self.dom.set_value(target, text)?;
        self.dispatch_event(target, EventKind::Input)?;
        Ok(())
    }

    /// Picks the option whose value is `value`, then dispatches `input` and `change`.
    pub fn select_option(&mut self, selector: &str, value: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        if self.dom.disabled(target) {
            return Ok(());
        }
        if !dom::is_select_element(&self.dom, target) {
            return Err(self.type_mismatch(selector, target, "select"));
        }

        self.dom.set_select_value(target, value)?;
        self.dispatch_event(target, EventKind::Input)?;
        self.dispatch_event(target, EventKind::Change)?;
        Ok(())
    }

    pub fn focus(&mut self, selector: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        self.focus_node(target)
    }

    pub fn blur(&mut self, selector: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        self.blur_node(target)
    }

    /// Submits the matched form, or the form owning the matched control.
    pub fn submit(&mut self, selector: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        let form = if self.dom.has_tag(target, "form") {
            Some(target)
        } else {
            self.resolve_form_for_submit(target)
        };
        if let Some(form) = form {
            self.submit_form_node(form)?;
        }
        Ok(())
    }
}
