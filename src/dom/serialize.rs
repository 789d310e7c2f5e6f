use super::*;

use std::fmt::Write as _;

impl Dom {
    /// Outer HTML of `node_id`; attributes are sorted so dumps are stable.
    pub(crate) fn dump_node(&self, node_id: NodeId) -> String {
        let mut out = String::new();
        self.write_node(node_id, &mut out);
        out
    }

    fn write_node(&self, node_id: NodeId, out: &mut String) {
        let element = match &self.nodes[node_id.0].node_type {
            NodeType::Text(text) => {
                out.push_str(&escape(text, false));
                return;
            }
            NodeType::Document => {
                for child in self.children(node_id) {
                    self.write_node(*child, out);
                }
                return;
            }
            NodeType::Element(element) => element,
        };

        let mut attrs: Vec<_> = element.attrs.iter().collect();
        attrs.sort();
        out.push('<');
        out.push_str(&element.tag_name);
        for (name, value) in attrs {
            let _ = write!(out, " {name}=\"{}\"", escape(value, true));
        }
        out.push('>');
        if crate::html::is_void_tag(&element.tag_name) {
            return;
        }

        let raw_text = crate::html::is_raw_text_tag(&element.tag_name);
        for child in self.children(node_id) {
            match &self.nodes[child.0].node_type {
                NodeType::Text(text) if raw_text => out.push_str(text),
                _ => self.write_node(*child, out),
            }
        }
        let _ = write!(out, "</{}>", element.tag_name);
    }
}

fn escape(value: &str, in_attribute: bool) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' if in_attribute => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}
