use super::*;

/// Inline declarations in source order, property names lower-cased.
type Declarations = Vec<(String, String)>;

fn style_target_error() -> Error {
    Error::Runtime("style target is not an element".into())
}

impl Dom {
    fn declarations(&self, node_id: NodeId) -> Result<Declarations> {
        let element = self.element(node_id).ok_or_else(style_target_error)?;
        Ok(parse_declarations(
            element.attrs.get("style").map_or("", String::as_str),
        ))
    }

    fn write_declarations(&mut self, node_id: NodeId, decls: &Declarations) -> Result<()> {
        let element = self.element_mut(node_id).ok_or_else(style_target_error)?;
        let text = decls
            .iter()
            .map(|(name, value)| format!("{name}: {value};"))
            .collect::<Vec<_>>()
            .join(" ");
        element.attrs.insert("style".into(), text);
        Ok(())
    }

    pub(crate) fn style_get(&self, node_id: NodeId, property: &str) -> Result<String> {
        let name = property.to_ascii_lowercase();
        Ok(self
            .declarations(node_id)?
            .into_iter()
            .find_map(|(prop, value)| (prop == name).then_some(value))
            .unwrap_or_default())
    }

    /// Empty `value` removes the declaration, as assigning `''` to a style property does.
    pub(crate) fn style_set(&mut self, node_id: NodeId, property: &str, value: &str) -> Result<()> {
        let name = property.to_ascii_lowercase();
        let mut decls = self.declarations(node_id)?;
        match decls.iter().position(|(prop, _)| *prop == name) {
            Some(pos) if value.is_empty() => {
                decls.remove(pos);
            }
            Some(pos) => decls[pos].1 = value.to_string(),
            None if value.is_empty() => {}
            None => decls.push((name, value.to_string())),
        }
        self.write_declarations(node_id, &decls)
    }

    /// `style.cssText = ...`
    pub(crate) fn set_style_text(&mut self, node_id: NodeId, css_text: &str) -> Result<()> {
        self.write_declarations(node_id, &parse_declarations(css_text))
    }
}

/// Splits on `;` outside quotes and parentheses; a repeated property keeps the
/// last value in the first position.
fn parse_declarations(text: &str) -> Declarations {
    let mut decls = Declarations::new();
    let mut depth = 0usize;
    let mut quote = None;
    let mut escaped = false;
    let mut start = 0;

    for (i, ch) in text.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match (quote, ch) {
            (Some(_), '\\') => escaped = true,
            (Some(q), ch) if ch == q => quote = None,
            (Some(_), _) => {}
            (None, '"' | '\'') => quote = Some(ch),
            (None, '(') => depth += 1,
            (None, ')') => depth = depth.saturating_sub(1),
            (None, ';') if depth == 0 => {
                push_declaration(&text[start..i], &mut decls);
                start = i + 1;
            }
            _ => {}
        }
    }
    push_declaration(&text[start..], &mut decls);
    decls
}

fn push_declaration(raw: &str, decls: &mut Declarations) {
    let Some((name, value)) = raw.split_once(':') else {
        return;
    };
    let name = name.trim().to_ascii_lowercase();
    if name.is_empty() {
        return;
    }
    let value = value.trim().to_string();
    match decls.iter_mut().find(|(existing, _)| *existing == name) {
        Some(slot) => slot.1 = value,
        None => decls.push((name, value)),
    }
}
