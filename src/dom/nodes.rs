use super::*;

impl Dom {
    pub(crate) fn new() -> Self {
        Self {
            nodes: vec![Node {
                parent: None,
                children: Vec::new(),
                node_type: NodeType::Document,
            }],
            root: NodeId(0),
            id_index: HashMap::new(),
            active_element: None,
        }
    }

    fn push_node(&mut self, parent: Option<NodeId>, node_type: NodeType) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            parent,
            children: Vec::new(),
            node_type,
        });
        if let Some(parent) = parent {
            self.nodes[parent.0].children.push(id);
        }
        id
    }

    /// Appends a parsed element; the first element to claim an id keeps it.
    pub(crate) fn create_element(
        &mut self,
        parent: NodeId,
        tag_name: String,
        attrs: HashMap<String, String>,
    ) -> NodeId {
        let id_attr = attrs.get("id").filter(|id| !id.is_empty()).cloned();
        let node = self.push_node(Some(parent), NodeType::Element(Element::new(tag_name, attrs)));
        if let Some(id_attr) = id_attr {
            self.id_index.entry(id_attr).or_insert(node);
        }
        node
    }

    pub(crate) fn create_detached_element(&mut self, tag_name: &str) -> NodeId {
        let element = Element::new(tag_name.to_ascii_lowercase(), HashMap::new());
        self.push_node(None, NodeType::Element(element))
    }

    pub(crate) fn create_text(&mut self, parent: NodeId, text: String) -> NodeId {
        self.push_node(Some(parent), NodeType::Text(text))
    }

    pub(crate) fn element(&self, node_id: NodeId) -> Option<&Element> {
        let NodeType::Element(element) = &self.nodes[node_id.0].node_type else {
            return None;
        };
        Some(element)
    }

    pub(crate) fn element_mut(&mut self, node_id: NodeId) -> Option<&mut Element> {
        let NodeType::Element(element) = &mut self.nodes[node_id.0].node_type else {
            return None;
        };
        Some(element)
    }

    pub(crate) fn tag_name(&self, node_id: NodeId) -> Option<&str> {
        self.element(node_id).map(|element| element.tag_name.as_str())
    }

    pub(crate) fn has_tag(&self, node_id: NodeId, tag: &str) -> bool {
        self.tag_name(node_id)
            .is_some_and(|name| name.eq_ignore_ascii_case(tag))
    }

    pub(crate) fn parent(&self, node_id: NodeId) -> Option<NodeId> {
        self.nodes[node_id.0].parent
    }

    pub(crate) fn children(&self, node_id: NodeId) -> &[NodeId] {
        &self.nodes[node_id.0].children
    }

    pub(crate) fn first_child(&self, node_id: NodeId) -> Option<NodeId> {
        self.children(node_id).first().copied()
    }

    /// Proper ancestors, nearest first, ending at the document or a detached root.
    pub(crate) fn ancestors(&self, node_id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.parent(node_id), |node| self.parent(*node))
    }

    /// Inclusive containment, as `Node.contains`.
    pub(crate) fn contains(&self, ancestor: NodeId, node_id: NodeId) -> bool {
        ancestor == node_id || self.ancestors(node_id).any(|up| up == ancestor)
    }

    /// Elements strictly inside `scope`, in document order.
    pub(crate) fn elements_under(&self, scope: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(scope).iter().rev().copied().collect();
        while let Some(node) = stack.pop() {
            if self.element(node).is_some() {
                out.push(node);
            }
            stack.extend(self.children(node).iter().rev());
        }
        out
    }

    pub(crate) fn by_id(&self, id: &str) -> Option<NodeId> {
        self.id_index.get(id).copied()
    }

    pub(crate) fn rebuild_id_index(&mut self) {
        let mut index = HashMap::new();
        for node in self.elements_under(self.root) {
            if let Some(id) = self.attr(node, "id").filter(|id| !id.is_empty()) {
                index.entry(id).or_insert(node);
            }
        }
        self.id_index = index;
    }

    pub(crate) fn body(&self) -> Option<NodeId> {
        self.elements_under(self.root)
            .into_iter()
            .find(|node| self.has_tag(*node, "body"))
    }

    pub(crate) fn text_content(&self, node_id: NodeId) -> String {
        let mut out = String::new();
        self.push_text(node_id, &mut out);
        out
    }

    fn push_text(&self, node_id: NodeId, out: &mut String) {
        match &self.nodes[node_id.0].node_type {
            NodeType::Text(text) => out.push_str(text),
            NodeType::Document | NodeType::Element(_) => {
                for child in self.children(node_id) {
                    self.push_text(*child, out);
                }
            }
        }
    }

    /// Replaces every child with a single text node (none for `""`).
    pub(crate) fn set_text_content(&mut self, node_id: NodeId, value: &str) -> Result<()> {
        if self.element(node_id).is_none() {
            return Err(Error::Runtime("textContent target is not an element".into()));
        }
        for child in std::mem::take(&mut self.nodes[node_id.0].children) {
            self.nodes[child.0].parent = None;
        }
        if !value.is_empty() {
            self.create_text(node_id, value.to_string());
        }
        self.rebuild_id_index();
        Ok(())
    }

    pub(crate) fn active_element(&self) -> Option<NodeId> {
        self.active_element
    }

    pub(crate) fn set_active_element(&mut self, node: Option<NodeId>) {
        self.active_element = node;
    }
}
