use super::*;

impl Dom {
    fn class_target(&mut self, node_id: NodeId) -> Result<&mut Element> {
        self.element_mut(node_id)
            .ok_or_else(|| Error::Runtime("classList target is not an element".into()))
    }

    pub(crate) fn class_contains(&self, node_id: NodeId, class_name: &str) -> Result<bool> {
        self.element(node_id)
            .map(|element| element.has_class(class_name))
            .ok_or_else(|| Error::Runtime("classList target is not an element".into()))
    }

    pub(crate) fn class_add(&mut self, node_id: NodeId, class_name: &str) -> Result<()> {
        let element = self.class_target(node_id)?;
        if element.has_class(class_name) {
            return Ok(());
        }
        let mut classes: Vec<String> = element.classes().map(str::to_string).collect();
        classes.push(class_name.to_string());
        element.set_classes(&classes);
        Ok(())
    }

    pub(crate) fn class_remove(&mut self, node_id: NodeId, class_name: &str) -> Result<()> {
        let element = self.class_target(node_id)?;
        let kept: Vec<String> = element
            .classes()
            .filter(|class| *class != class_name)
            .map(str::to_string)
            .collect();
        element.set_classes(&kept);
        Ok(())
    }

    /// Flips `class_name` and returns whether it is now present.
    pub(crate) fn class_toggle(&mut self, node_id: NodeId, class_name: &str) -> Result<bool> {
        let on = !self.class_contains(node_id, class_name)?;
        self.class_set(node_id, class_name, on)?;
        Ok(on)
    }

    pub(crate) fn class_set(&mut self, node_id: NodeId, class_name: &str, on: bool) -> Result<()> {
        if on {
            self.class_add(node_id, class_name)
        } else {
            self.class_remove(node_id, class_name)
        }
    }

    pub(crate) fn query_selector(&self, selector: &str) -> Result<Option<NodeId>> {
        Ok(self.query_selector_all(selector)?.into_iter().next())
    }

    pub(crate) fn query_selector_all(&self, selector: &str) -> Result<Vec<NodeId>> {
        let list = SelectorList::parse(selector)?;
        if let Some(id) = list.as_id_lookup() {
            return Ok(self.by_id(id).into_iter().collect());
        }
        Ok(self.matching_under(self.root, &list))
    }

    pub(crate) fn query_selector_from(&self, scope: NodeId, selector: &str) -> Result<Option<NodeId>> {
        Ok(self.query_selector_all_from(scope, selector)?.into_iter().next())
    }

    /// Matches among the descendants of `scope`; ancestors outside it still count
    /// for combinators, as `Element.querySelectorAll` does.
    pub(crate) fn query_selector_all_from(
        &self,
        scope: NodeId,
        selector: &str,
    ) -> Result<Vec<NodeId>> {
        let list = SelectorList::parse(selector)?;
        Ok(self.matching_under(scope, &list))
    }

    fn matching_under(&self, scope: NodeId, list: &SelectorList) -> Vec<NodeId> {
        self.elements_under(scope)
            .into_iter()
            .filter(|node| list.matches(self, *node))
            .collect()
    }

    /// Nearest inclusive ancestor matching `selector`.
    pub(crate) fn closest(&self, node_id: NodeId, selector: &str) -> Result<Option<NodeId>> {
        if self.element(node_id).is_none() {
            return Ok(None);
        }
        let list = SelectorList::parse(selector)?;
        Ok(std::iter::once(node_id)
            .chain(self.ancestors(node_id))
            .find(|node| list.matches(self, *node)))
    }

    pub(crate) fn find_ancestor_by_tag(&self, node_id: NodeId, tag: &str) -> Option<NodeId> {
        self.ancestors(node_id).find(|node| self.has_tag(*node, tag))
    }
}
