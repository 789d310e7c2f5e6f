use super::*;

mod actions;
mod assertions;
mod events;
mod timers;

/// A loaded clinic page: document, window, layout mock, virtual clock and the
/// bound [`PageController`].
#[derive(Debug)]
pub struct Page {
    pub(crate) dom: Dom,
    pub(crate) window: WindowState,
    pub(crate) layout: LayoutState,
    pub(crate) scheduler: SchedulerState,
    pub(crate) trace_state: TraceState,
    pub(crate) config: InteractionConfig,
    pub(crate) controller: Option<PageController>,
    pub(crate) native_submissions: usize,
}

impl Page {
    /// Parses `html` without binding any behavior; call [`Page::load`] once the
    /// viewport, location and layout are set up.
    pub fn parse(html: &str) -> Result<Self> {
        Self::parse_with_config(html, InteractionConfig::default())
    }

    fn parse_with_config(html: &str, config: InteractionConfig) -> Result<Self> {
        config.validate()?;
        let dom = html::parse_html(html)?;
        let scheduler = SchedulerState::with_step_limit(config.timer_step_limit);
        Ok(Self {
            dom,
            window: WindowState::default(),
            layout: LayoutState::default(),
            scheduler,
            trace_state: TraceState::default(),
            config,
            controller: None,
            native_submissions: 0,
        })
    }

    /// Parses and loads with the default configuration and a 1280x800 viewport.
    pub fn from_html(html: &str) -> Result<Self> {
        Self::with_config(html, InteractionConfig::default())
    }

    pub fn with_config(html: &str, config: InteractionConfig) -> Result<Self> {
        let mut page = Self::parse_with_config(html, config)?;
        page.load()?;
        Ok(page)
    }

    /// Replaces the configuration of a page that has not been loaded yet.
    pub fn set_config(&mut self, config: InteractionConfig) -> Result<()> {
        if self.controller.is_some() {
            return Err(Error::Runtime(
                "set_config must be called before load".into(),
            ));
        }
        config.validate()?;
        self.scheduler.timer_step_limit = config.timer_step_limit;
        self.config = config;
        Ok(())
    }

    /// Sets the viewport without firing a resize event.
    pub fn set_viewport_size(&mut self, width: f64, height: f64) {
        self.window.inner_width = width;
        self.window.inner_height = height;
    }

    /// Sets `location` (path, optional query and hash).
    pub fn set_location(&mut self, path: &str) {
        self.window.set_location(path);
    }

    /// Gives the element matched by `selector` a document-space box.
    pub fn set_layout(&mut self, selector: &str, rect: Rect) -> Result<()> {
        let node = self.select_one(selector)?;
        self.layout.set(node, rect);
        self.with_controller(|controller, host| controller.reveal_after_layout(host))?;
        Ok(())
    }

    /// Binds the controller and runs the document-ready sequence.
    pub fn load(&mut self) -> Result<()> {
        if self.controller.is_some() {
            return Err(Error::Runtime("page is already loaded".into()));
        }
        let mut host = Host {
            dom: &mut self.dom,
            window: &mut self.window,
            layout: &self.layout,
            scheduler: &mut self.scheduler,
            trace: &mut self.trace_state,
        };
        let mut controller = PageController::bind(&mut host, self.config.clone())?;
        controller.document_ready(&mut host)?;
        self.controller = Some(controller);
        Ok(())
    }

    pub fn is_loaded(&self) -> bool {
        self.controller.is_some()
    }

    pub fn controller(&self) -> Option<&PageController> {
        self.controller.as_ref()
    }

    pub fn config(&self) -> &InteractionConfig {
        &self.config
    }

    /// Runs `f` against the bound controller; `Ok(None)` before load.
    pub(crate) fn with_controller<T, F>(&mut self, f: F) -> Result<Option<T>>
    where
        F: FnOnce(&mut PageController, &mut Host<'_>) -> Result<T>,
    {
        let Some(controller) = self.controller.as_mut() else {
            return Ok(None);
        };
        let mut host = Host {
            dom: &mut self.dom,
            window: &mut self.window,
            layout: &self.layout,
            scheduler: &mut self.scheduler,
            trace: &mut self.trace_state,
        };
        f(controller, &mut host).map(Some)
    }

    pub(crate) fn select_one(&self, selector: &str) -> Result<NodeId> {
        self.dom
            .query_selector(selector)?
            .ok_or_else(|| Error::SelectorNotFound(selector.to_string()))
    }

    pub(crate) fn node_snippet(&self, node_id: NodeId) -> String {
        dom::truncate_chars(&self.dom.dump_node(node_id), 200)
    }

    pub fn scroll_y(&self) -> f64 {
        self.window.scroll_y
    }

    pub fn location_hash(&self) -> &str {
        &self.window.hash
    }

    pub fn scroll_requests(&self) -> &[ScrollRequest] {
        &self.window.scroll_requests
    }

    /// Inline `overflow` of `<body>`, empty when unset.
    pub fn body_overflow(&self) -> String {
        self.dom
            .body()
            .and_then(|body| self.dom.style_get(body, "overflow").ok())
            .unwrap_or_default()
    }

    pub fn form_state(&self, form_id: &str) -> Option<FormState> {
        self.controller.as_ref()?.form_state(form_id)
    }

    /// Failures of the form's most recent invalid submission.
    pub fn form_failures(&self, form_id: &str) -> Vec<FieldFailure> {
        self.controller
            .as_ref()
            .and_then(|controller| controller.form_failures(form_id))
            .map(<[FieldFailure]>::to_vec)
            .unwrap_or_default()
    }

    /// Submissions that reached the browser default because nothing prevented them.
    pub fn native_submission_count(&self) -> usize {
        self.native_submissions
    }

    pub fn enable_trace(&mut self, enabled: bool) {
        self.trace_state.enabled = enabled;
    }

    pub fn set_trace_events(&mut self, enabled: bool) {
        self.trace_state.events = enabled;
    }

    pub fn set_trace_timers(&mut self, enabled: bool) {
        self.trace_state.timers = enabled;
    }

    pub fn set_trace_stderr(&mut self, enabled: bool) {
        self.trace_state.to_stderr = enabled;
    }

    pub fn set_trace_log_limit(&mut self, max_entries: usize) -> Result<()> {
        self.trace_state.set_log_limit(max_entries)
    }

    pub fn take_trace_logs(&mut self) -> Vec<String> {
        self.trace_state.logs.drain(..).collect()
    }
}
