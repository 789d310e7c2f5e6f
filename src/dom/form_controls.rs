use super::*;

const CONTROL_TAGS: [&str; 4] = ["input", "select", "textarea", "button"];

pub(crate) fn is_select_element(dom: &Dom, node_id: NodeId) -> bool {
    dom.has_tag(node_id, "select")
}

/// Buttons submit unless typed otherwise; inputs only as `submit` or `image`.
pub(crate) fn is_submit_control(dom: &Dom, node_id: NodeId) -> bool {
    let kind = dom.attr(node_id, "type").map(|kind| kind.to_ascii_lowercase());
    if dom.has_tag(node_id, "button") {
        kind.is_none_or(|kind| kind == "submit")
    } else if dom.has_tag(node_id, "input") {
        matches!(kind.as_deref(), Some("submit" | "image"))
    } else {
        false
    }
}

fn value_target_error() -> Error {
    Error::Runtime("value target is not an element".into())
}

impl Dom {
    pub(crate) fn value(&self, node_id: NodeId) -> Result<String> {
        self.element(node_id)
            .map(|element| element.value.clone())
            .ok_or_else(value_target_error)
    }

    pub(crate) fn set_value(&mut self, node_id: NodeId, value: &str) -> Result<()> {
        if is_select_element(self, node_id) {
            return self.set_select_value(node_id, value);
        }
        let element = self.element_mut(node_id).ok_or_else(value_target_error)?;
        element.value = value.to_string();
        Ok(())
    }

    /// Lower-cased `type` of an input, `"text"` when absent; empty for non-inputs.
    pub(crate) fn input_type(&self, node_id: NodeId) -> String {
        if !self.has_tag(node_id, "input") {
            return String::new();
        }
        self.attr(node_id, "type")
            .map_or_else(|| "text".into(), |kind| kind.to_ascii_lowercase())
    }

    /// Seeds textarea values from their text and selects from their options.
    pub(crate) fn initialize_form_control_values(&mut self) -> Result<()> {
        for node in self.elements_under(self.root) {
            if self.has_tag(node, "textarea") {
                let text = self.text_content(node);
                self.set_value(node, &text)?;
            } else if is_select_element(self, node) {
                self.sync_select_value(node)?;
            }
        }
        Ok(())
    }

    fn options(&self, select: NodeId) -> Vec<NodeId> {
        self.elements_under(select)
            .into_iter()
            .filter(|node| self.has_tag(*node, "option"))
            .collect()
    }

    /// An option's `value` attribute, else its trimmed text.
    fn option_value(&self, option: NodeId) -> String {
        self.attr(option, "value")
            .unwrap_or_else(|| self.text_content(option).trim().to_string())
    }

    /// Selects the first option whose value equals `requested`; no match
    /// deselects everything and leaves the value empty.
    pub(crate) fn set_select_value(&mut self, select: NodeId, requested: &str) -> Result<()> {
        if !is_select_element(self, select) {
            return Err(Error::Runtime("set value target is not a select".into()));
        }
        let chosen = self
            .options(select)
            .into_iter()
            .find(|option| self.option_value(*option) == requested);
        for option in self.options(select) {
            if let Some(element) = self.element_mut(option) {
                element.selected = Some(option) == chosen;
            }
        }
        let value = chosen.map(|_| requested.to_string()).unwrap_or_default();
        let element = self.element_mut(select).ok_or_else(value_target_error)?;
        element.value = value;
        Ok(())
    }

    /// Recomputes a select's value: the first selected option, else the first option.
    pub(crate) fn sync_select_value(&mut self, select: NodeId) -> Result<()> {
        let options = self.options(select);
        let shown = options
            .iter()
            .copied()
            .find(|option| self.element(*option).is_some_and(|element| element.selected))
            .or_else(|| options.first().copied());
        let value = shown.map(|option| self.option_value(option)).unwrap_or_default();
        let element = self.element_mut(select).ok_or_else(value_target_error)?;
        element.value = value;
        Ok(())
    }

    pub(crate) fn form_controls(&self, form: NodeId) -> Vec<NodeId> {
        self.elements_under(form)
            .into_iter()
            .filter(|node| CONTROL_TAGS.iter().any(|tag| self.has_tag(*node, tag)))
            .collect()
    }

    /// `HTMLFormElement.reset()`: every control returns to its markup default.
    pub(crate) fn reset_form(&mut self, form: NodeId) -> Result<()> {
        if !self.has_tag(form, "form") {
            return Err(Error::Runtime("reset target is not a form".into()));
        }
        for control in self.form_controls(form) {
            if is_select_element(self, control) {
                for option in self.options(control) {
                    if let Some(element) = self.element_mut(option) {
                        element.selected = element.attrs.contains_key("selected");
                    }
                }
                self.sync_select_value(control)?;
            } else if self.has_tag(control, "textarea") {
                let default_value = self.text_content(control);
                self.set_value(control, &default_value)?;
            } else if self.has_tag(control, "input") {
                let default_value = self.attr(control, "value").unwrap_or_default();
                self.set_value(control, &default_value)?;
            }
        }
        Ok(())
    }
}
