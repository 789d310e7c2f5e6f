use super::*;

const VOID_TAGS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

const RAW_TEXT_TAGS: &[&str] = &["script", "style", "textarea", "title"];

// Block starts that end an open paragraph.
const PARAGRAPH_CLOSERS: &[&str] = &[
    "address", "article", "aside", "blockquote", "div", "dl", "fieldset", "footer", "form", "h1",
    "h2", "h3", "h4", "h5", "h6", "header", "hr", "main", "nav", "ol", "p", "pre", "section",
    "table", "ul",
];

pub(crate) fn is_void_tag(tag: &str) -> bool {
    VOID_TAGS.contains(&tag)
}

pub(crate) fn is_raw_text_tag(tag: &str) -> bool {
    RAW_TEXT_TAGS.contains(&tag)
}

/// Parses a page into a fresh document, guaranteeing a `<body>` element.
///
/// This is the forgiving subset the site markup needs: optional end tags for
/// `li`, `option` and `p`, ignored stray end tags, raw-text elements and
/// character references. Truncated constructs are [`Error::HtmlParse`].
pub(crate) fn parse_html(html: &str) -> Result<Dom> {
    let mut builder = TreeBuilder::new();
    let mut scan = Scanner::new(html);

    while !scan.at_end() {
        if scan.eat("<!--") {
            scan.skip_past("-->")
                .ok_or_else(|| Error::HtmlParse("unclosed HTML comment".into()))?;
        } else if scan.eat("</") {
            let tag = scan.end_tag()?;
            builder.close(&tag);
        } else if scan.eat("<!") {
            scan.declaration()?;
        } else if scan.starts_tag() {
            let StartTag { tag, attrs, self_closing } = scan.start_tag()?;
            let node = builder.open(&tag, attrs);
            if is_raw_text_tag(&tag) && !self_closing {
                let body = scan.raw_text(&tag)?;
                let text = if matches!(tag.as_str(), "textarea" | "title") {
                    decode_character_references(body)
                } else {
                    body.to_string()
                };
                builder.text_into(node, text);
            } else if !self_closing && !is_void_tag(&tag) {
                builder.open_elements.push(node);
            }
        } else if scan.eat("<") {
            // A '<' that starts nothing is text.
            builder.text("<".into());
        } else {
            let text = scan.text();
            builder.text(decode_character_references(text));
        }
    }

    let mut dom = builder.dom;
    ensure_body(&mut dom)?;
    dom.initialize_form_control_values()?;
    dom.rebuild_id_index();
    Ok(dom)
}

struct StartTag {
    tag: String,
    attrs: HashMap<String, String>,
    self_closing: bool,
}

struct TreeBuilder {
    dom: Dom,
    // Always holds the document at index 0.
    open_elements: Vec<NodeId>,
}

impl TreeBuilder {
    fn new() -> Self {
        let dom = Dom::new();
        let root = dom.root;
        Self {
            dom,
            open_elements: vec![root],
        }
    }

    fn current(&self) -> NodeId {
        self.open_elements.last().copied().unwrap_or(self.dom.root)
    }

    fn open(&mut self, tag: &str, attrs: HashMap<String, String>) -> NodeId {
        self.apply_implied_end_tags(tag);
        let parent = self.current();
        self.dom.create_element(parent, tag.to_string(), attrs)
    }

    fn text(&mut self, text: String) {
        let parent = self.current();
        self.text_into(parent, text);
    }

    fn text_into(&mut self, parent: NodeId, text: String) {
        if !text.is_empty() {
            self.dom.create_text(parent, text);
        }
    }

    /// Pops back to the nearest open `tag`; unmatched end tags are ignored.
    fn close(&mut self, tag: &str) {
        if let Some(index) = self.find_open(tag, &[]) {
            self.open_elements.truncate(index);
        }
    }

    fn apply_implied_end_tags(&mut self, tag: &str) {
        let found = match tag {
            "li" => self.find_open("li", &["ol", "ul", "menu"]),
            "option" | "optgroup" => self.find_open("option", &["optgroup", "select", "datalist"]),
            _ if PARAGRAPH_CLOSERS.contains(&tag) => self.find_open("p", &[]),
            _ => None,
        };
        if let Some(index) = found {
            self.open_elements.truncate(index);
        }
    }

    /// Stack index of the innermost open `tag`, not looking past any `boundary`.
    fn find_open(&self, tag: &str, boundary: &[&str]) -> Option<usize> {
        for (index, node) in self.open_elements.iter().enumerate().skip(1).rev() {
            if self.dom.has_tag(*node, tag) {
                return Some(index);
            }
            if boundary.iter().any(|stop| self.dom.has_tag(*node, stop)) {
                return None;
            }
        }
        None
    }
}

/// Fragments without a `<body>` get one; everything outside `<head>` moves into it.
fn ensure_body(dom: &mut Dom) -> Result<()> {
    if dom.body().is_some() {
        return Ok(());
    }
    let container = dom
        .children(dom.root)
        .iter()
        .copied()
        .find(|node| dom.has_tag(*node, "html"))
        .unwrap_or(dom.root);
    let movable: Vec<_> = dom
        .children(container)
        .iter()
        .copied()
        .filter(|node| !dom.has_tag(*node, "head"))
        .collect();

    let body = dom.create_detached_element("body");
    dom.append_child(container, body)?;
    for node in movable {
        dom.append_child(body, node)?;
    }
    Ok(())
}

struct Scanner<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Scanner<'a> {
    fn new(src: &'a str) -> Self {
        Self { src, pos: 0 }
    }

    fn rest(&self) -> &'a str {
        &self.src[self.pos..]
    }

    fn at_end(&self) -> bool {
        self.pos >= self.src.len()
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn eat(&mut self, prefix: &str) -> bool {
        let matched = self.rest().starts_with(prefix);
        if matched {
            self.pos += prefix.len();
        }
        matched
    }

    fn take_while(&mut self, keep: impl Fn(char) -> bool) -> &'a str {
        let rest = self.rest();
        let len = rest.find(|ch| !keep(ch)).unwrap_or(rest.len());
        self.pos += len;
        &rest[..len]
    }

    fn skip_whitespace(&mut self) {
        self.take_while(|ch| ch.is_ascii_whitespace());
    }

    fn skip_past(&mut self, needle: &str) -> Option<()> {
        let offset = self.rest().find(needle)?;
        self.pos += offset + needle.len();
        Some(())
    }

    fn starts_tag(&self) -> bool {
        let mut chars = self.rest().chars();
        chars.next() == Some('<') && chars.next().is_some_and(|ch| ch.is_ascii_alphabetic())
    }

    fn text(&mut self) -> &'a str {
        self.take_while(|ch| ch != '<')
    }

    fn unclosed(&self, what: &str) -> Error {
        Error::HtmlParse(format!("unclosed {what}"))
    }

    /// `<!DOCTYPE ...>` and friends; quoted `>` does not end them.
    fn declaration(&mut self) -> Result<()> {
        let mut quote = None;
        for (offset, ch) in self.rest().char_indices() {
            match (quote, ch) {
                (Some(q), ch) if ch == q => quote = None,
                (Some(_), _) => {}
                (None, '"' | '\'') => quote = Some(ch),
                (None, '>') => {
                    self.pos += offset + 1;
                    return Ok(());
                }
                _ => {}
            }
        }
        Err(self.unclosed("declaration tag"))
    }

    /// Called after `</`; returns the lower-cased name.
    fn end_tag(&mut self) -> Result<String> {
        self.skip_whitespace();
        let tag = self.take_while(is_name_char).to_ascii_lowercase();
        self.skip_past(">").ok_or_else(|| self.unclosed("end tag"))?;
        Ok(tag)
    }

    fn start_tag(&mut self) -> Result<StartTag> {
        self.eat("<");
        let tag = self.take_while(is_name_char).to_ascii_lowercase();
        let mut attrs = HashMap::new();

        loop {
            self.skip_whitespace();
            if self.eat(">") {
                return Ok(StartTag { tag, attrs, self_closing: false });
            }
            if self.eat("/>") {
                return Ok(StartTag { tag, attrs, self_closing: true });
            }
            match self.peek() {
                None => return Err(self.unclosed(&format!("start tag <{tag}>"))),
                Some(ch) if is_attr_name_char(ch) => {
                    let name = self.take_while(is_attr_name_char).to_ascii_lowercase();
                    self.skip_whitespace();
                    let value = if self.eat("=") {
                        self.skip_whitespace();
                        self.attr_value()?
                    } else {
                        String::new()
                    };
                    // First occurrence wins, as in browsers.
                    attrs.entry(name).or_insert(value);
                }
                Some(_) => {
                    // Junk between attributes is dropped.
                    self.unquoted_run();
                }
            }
        }
    }

    fn unquoted_run(&mut self) -> &'a str {
        let rest = self.rest();
        let mut end = rest.len();
        for (offset, ch) in rest.char_indices() {
            if ch.is_ascii_whitespace() || ch == '>' || rest[offset..].starts_with("/>") {
                end = offset;
                break;
            }
        }
        self.pos += end;
        &rest[..end]
    }

    fn attr_value(&mut self) -> Result<String> {
        let raw = match self.peek() {
            None => return Err(Error::HtmlParse("missing attribute value".into())),
            Some(quote @ ('"' | '\'')) => {
                self.pos += 1;
                let value = self.take_while(|ch| ch != quote);
                if !self.eat(&quote.to_string()) {
                    return Err(self.unclosed("quoted attribute value"));
                }
                value
            }
            Some(_) => self.unquoted_run(),
        };
        Ok(decode_character_references(raw))
    }

    /// Body of a raw-text element up to its case-insensitive end tag, which is consumed.
    fn raw_text(&mut self, tag: &str) -> Result<&'a str> {
        let rest = self.rest();
        let mut search = 0;
        while let Some(found) = rest[search..].find("</") {
            let close = search + found;
            let after = rest[close + 2..].trim_start();
            let name_matches = after
                .get(..tag.len())
                .is_some_and(|name| name.eq_ignore_ascii_case(tag))
                && after[tag.len()..]
                    .chars()
                    .next()
                    .is_none_or(|ch| !ch.is_ascii_alphanumeric());
            if name_matches {
                self.pos += close + 2;
                self.end_tag()?;
                return Ok(&rest[..close]);
            }
            search = close + 2;
        }
        Err(self.unclosed(&format!("<{tag}>")))
    }
}

fn is_name_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '-' || ch == '_'
}

fn is_attr_name_char(ch: char) -> bool {
    is_name_char(ch) || matches!(ch, ':' | '@' | '.')
}

fn named_reference(name: &str) -> Option<char> {
    Some(match name {
        "amp" => '&',
        "lt" => '<',
        "gt" => '>',
        "quot" => '"',
        "apos" => '\'',
        "nbsp" => '\u{00A0}',
        "copy" => '©',
        "reg" => '®',
        "trade" => '™',
        "ndash" => '–',
        "mdash" => '—',
        "hellip" => '…',
        "middot" => '·',
        "laquo" => '«',
        "raquo" => '»',
        "rarr" => '→',
        "larr" => '←',
        "uarr" => '↑',
        "darr" => '↓',
        _ => return None,
    })
}

fn numeric_reference(digits: &str) -> Option<char> {
    let codepoint = match digits.strip_prefix(['x', 'X']) {
        Some(hex) => u32::from_str_radix(hex, 16).ok()?,
        None => digits.parse().ok()?,
    };
    char::from_u32(codepoint)
}

/// Decodes `&name;`, `&#N;` and `&#xN;`; anything unrecognized stays literal.
pub(crate) fn decode_character_references(src: &str) -> String {
    let mut out = String::with_capacity(src.len());
    let mut rest = src;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let tail = &rest[amp + 1..];
        let decoded = tail.find(';').and_then(|end| {
            let body = &tail[..end];
            let ch = match body.strip_prefix('#') {
                Some(digits) => numeric_reference(digits),
                None => named_reference(body),
            };
            ch.map(|ch| (ch, end + 1))
        });
        match decoded {
            Some((ch, consumed)) => {
                out.push(ch);
                rest = &tail[consumed..];
            }
            None => {
                out.push('&');
                rest = tail;
            }
        }
    }
    out.push_str(rest);
    out
}
