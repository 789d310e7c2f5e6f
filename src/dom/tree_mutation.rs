use super::*;

impl Dom {
    pub(crate) fn attr(&self, node_id: NodeId, name: &str) -> Option<String> {
        self.element(node_id)
            .and_then(|element| element.attrs.get(&name.to_ascii_lowercase()).cloned())
    }

    pub(crate) fn disabled(&self, node_id: NodeId) -> bool {
        self.element(node_id).is_some_and(|element| element.disabled)
    }

    pub(crate) fn required(&self, node_id: NodeId) -> bool {
        self.element(node_id).is_some_and(|element| element.required)
    }

    pub(crate) fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        let end = self.children(parent).len();
        self.insert_child(parent, child, end)
    }

    pub(crate) fn prepend_child(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        self.insert_child(parent, child, 0)
    }

    /// Moves `child` under `parent` at `index` (clamped), detaching it first.
    fn insert_child(&mut self, parent: NodeId, child: NodeId, index: usize) -> Result<()> {
        if child.0 >= self.nodes.len() || child == self.root {
            return Err(Error::Runtime("cannot insert that node".into()));
        }
        if matches!(self.nodes[parent.0].node_type, NodeType::Text(_)) {
            return Err(Error::Runtime("text nodes cannot have children".into()));
        }
        if self.contains(child, parent) {
            return Err(Error::Runtime("insertion would create a cycle".into()));
        }

        self.detach(child);
        let children = &mut self.nodes[parent.0].children;
        children.insert(index.min(children.len()), child);
        self.nodes[child.0].parent = Some(parent);
        self.rebuild_id_index();
        Ok(())
    }

    fn detach(&mut self, child: NodeId) {
        if let Some(parent) = self.nodes[child.0].parent.take() {
            self.nodes[parent.0].children.retain(|id| *id != child);
        }
    }

    /// `Element.remove()`: detached nodes are left alone, and focus inside the
    /// removed subtree is dropped.
    pub(crate) fn remove_node(&mut self, node: NodeId) -> Result<()> {
        if node == self.root {
            return Err(Error::Runtime("cannot remove document root".into()));
        }
        if self.parent(node).is_none() {
            return Ok(());
        }
        self.detach(node);
        if self.active_element.is_some_and(|active| self.contains(node, active)) {
            self.active_element = None;
        }
        self.rebuild_id_index();
        Ok(())
    }
}
