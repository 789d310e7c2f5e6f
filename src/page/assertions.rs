use super::*;

impl Page {
    fn assertion_failed(
        &self,
        selector: &str,
        node: Option<NodeId>,
        expected: String,
        actual: String,
    ) -> Error {
        Error::AssertionFailed {
            selector: selector.to_string(),
            expected,
            actual,
            dom_snippet: node.map(|node| self.node_snippet(node)).unwrap_or_default(),
        }
    }

    fn assert_read(
        &self,
        selector: &str,
        expected: &str,
        read: impl FnOnce(&Dom, NodeId) -> Result<String>,
    ) -> Result<()> {
        let target = self.select_one(selector)?;
        let actual = read(&self.dom, target)?;
        if actual == expected {
            return Ok(());
        }
        Err(self.assertion_failed(selector, Some(target), expected.to_string(), actual))
    }

    /// Compares the full `textContent` of the first match.
    pub fn assert_text(&self, selector: &str, expected: &str) -> Result<()> {
        self.assert_read(selector, expected, |dom, node| Ok(dom.text_content(node)))
    }

    pub fn assert_value(&self, selector: &str, expected: &str) -> Result<()> {
        self.assert_read(selector, expected, Dom::value)
    }

    pub fn assert_exists(&self, selector: &str) -> Result<()> {
        self.select_one(selector).map(drop)
    }

    pub fn assert_missing(&self, selector: &str) -> Result<()> {
        match self.dom.query_selector(selector)? {
            None => Ok(()),
            Some(found) => Err(self.assertion_failed(
                selector,
                Some(found),
                "no match".into(),
                "element present".into(),
            )),
        }
    }

    pub fn assert_has_class(&self, selector: &str, class_name: &str) -> Result<()> {
        self.assert_class_state(selector, class_name, true)
    }

    pub fn assert_lacks_class(&self, selector: &str, class_name: &str) -> Result<()> {
        self.assert_class_state(selector, class_name, false)
    }

    fn assert_class_state(&self, selector: &str, class_name: &str, wanted: bool) -> Result<()> {
        let target = self.select_one(selector)?;
        let present = self.dom.class_contains(target, class_name)?;
        if present == wanted {
            return Ok(());
        }
        let describe = |on: bool| match on {
            true => format!("class {class_name}"),
            false => format!("no class {class_name}"),
        };
        Err(self.assertion_failed(selector, Some(target), describe(wanted), describe(present)))
    }

    pub fn assert_count(&self, selector: &str, expected: usize) -> Result<()> {
        let found = self.dom.query_selector_all(selector)?;
        if found.len() == expected {
            return Ok(());
        }
        Err(self.assertion_failed(
            selector,
            found.first().copied(),
            expected.to_string(),
            found.len().to_string(),
        ))
    }

    pub fn text(&self, selector: &str) -> Result<String> {
        Ok(self.dom.text_content(self.select_one(selector)?))
    }

    pub fn value(&self, selector: &str) -> Result<String> {
        self.dom.value(self.select_one(selector)?)
    }

    pub fn has_class(&self, selector: &str, class_name: &str) -> Result<bool> {
        self.dom.class_contains(self.select_one(selector)?, class_name)
    }

    pub fn attr(&self, selector: &str, name: &str) -> Result<Option<String>> {
        Ok(self.dom.attr(self.select_one(selector)?, name))
    }

    /// Outer HTML of the first match with attributes sorted by name.
    pub fn dump_dom(&self, selector: &str) -> Result<String> {
        Ok(self.dom.dump_node(self.select_one(selector)?))
    }
}
