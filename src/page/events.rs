use super::*;

impl Page {
    /// Dispatches `kind` at `target`. Bubbling events walk target to document;
    /// focus and blur only reach the target.
    pub(crate) fn dispatch_event(&mut self, target: NodeId, kind: EventKind) -> Result<EventState> {
        let mut event = EventState::new(kind, target);

        let path: Vec<NodeId> = if kind.bubbles() {
            std::iter::once(target).chain(self.dom.ancestors(target)).collect()
        } else {
            vec![target]
        };

        self.with_controller(|controller, host| controller.dispatch(host, &mut event, &path))?;

        self.trace_state.event_line(format!(
            "[event] done {} target={} default_prevented={}",
            kind.as_str(),
            self.trace_node_label(target),
            event.default_prevented
        ));
        Ok(event)
    }

    pub(crate) fn focus_node(&mut self, node: NodeId) -> Result<()> {
        if self.dom.disabled(node) {
            return Ok(());
        }
        if self.dom.active_element() == Some(node) {
            return Ok(());
        }
        if let Some(current) = self.dom.active_element() {
            self.blur_node(current)?;
        }
        self.dom.set_active_element(Some(node));
        self.dispatch_event(node, EventKind::Focus)?;
        Ok(())
    }

    /// Blurs `node` only when it holds focus.
    pub(crate) fn blur_node(&mut self, node: NodeId) -> Result<()> {
        if self.dom.active_element() != Some(node) {
            return Ok(());
        }
        self.dispatch_event(node, EventKind::Blur)?;
        self.dom.set_active_element(None);
        Ok(())
    }

    /// Dispatches submit at `form`; an unprevented submit counts as a native submission.
    pub(crate) fn submit_form_node(&mut self, form: NodeId) -> Result<()> {
        let outcome = self.dispatch_event(form, EventKind::Submit)?;
        if !outcome.default_prevented {
            self.native_submissions += 1;
            tracing::debug!(form = form.0, "form submitted natively");
        }
        Ok(())
    }

    pub(crate) fn resolve_form_for_submit(&self, control: NodeId) -> Option<NodeId> {
        if let Some(form_id) = self.dom.attr(control, "form") {
            return self
                .dom
                .by_id(&form_id)
                .filter(|node| self.dom.has_tag(*node, "form"));
        }
        self.dom.find_ancestor_by_tag(control, "form")
    }

    fn trace_node_label(&self, node: NodeId) -> String {
        let Some(tag) = self.dom.tag_name(node) else {
            return "#document".into();
        };
        match self.dom.attr(node, "id") {
            Some(id) if !id.is_empty() => format!("{tag}#{id}"),
            _ => tag.to_string(),
        }
    }
}
