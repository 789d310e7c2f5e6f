use super::*;

mod class_and_query;
mod form_controls;
mod nodes;
mod serialize;
mod style;
mod tree_mutation;

pub(crate) use form_controls::{is_select_element, is_submit_control};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub(crate) struct NodeId(pub(crate) usize);

#[derive(Debug, Clone)]
pub(crate) enum NodeType {
    Document,
    Element(Element),
    Text(String),
}

#[derive(Debug, Clone)]
pub(crate) struct Node {
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) node_type: NodeType,
}

/// An element and the live form state the site scripts read.
///
/// `value`, `selected` and `disabled` start from their attributes and then
/// diverge; the attributes remain the defaults a form reset restores.
#[derive(Debug, Clone)]
pub(crate) struct Element {
    pub(crate) tag_name: String,
    pub(crate) attrs: HashMap<String, String>,
    pub(crate) value: String,
    pub(crate) selected: bool,
    pub(crate) disabled: bool,
    pub(crate) required: bool,
}

impl Element {
    pub(crate) fn new(tag_name: String, attrs: HashMap<String, String>) -> Self {
        Self {
            value: attrs.get("value").cloned().unwrap_or_default(),
            selected: attrs.contains_key("selected"),
            disabled: attrs.contains_key("disabled"),
            required: attrs.contains_key("required"),
            tag_name,
            attrs,
        }
    }

    pub(crate) fn classes(&self) -> impl Iterator<Item = &str> {
        self.attrs
            .get("class")
            .into_iter()
            .flat_map(|list| list.split_whitespace())
    }

    pub(crate) fn has_class(&self, name: &str) -> bool {
        self.classes().any(|class| class == name)
    }

    /// Rewrites the `class` attribute, dropping it once the list is empty.
    pub(crate) fn set_classes(&mut self, classes: &[String]) {
        if classes.is_empty() {
            self.attrs.remove("class");
        } else {
            self.attrs.insert("class".into(), classes.join(" "));
        }
    }
}

/// Arena-backed document tree; node 0 is the document.
#[derive(Debug, Clone)]
pub(crate) struct Dom {
    pub(crate) nodes: Vec<Node>,
    pub(crate) root: NodeId,
    pub(crate) id_index: HashMap<String, NodeId>,
    pub(crate) active_element: Option<NodeId>,
}

/// Keeps the first `max_chars` characters, marking a cut with `...`.
pub(crate) fn truncate_chars(value: &str, max_chars: usize) -> String {
    match value.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &value[..cut]),
        None => value.to_string(),
    }
}
