use super::*;

use crate::dom::Element;
use std::iter::Peekable;
use std::str::Chars;

/// A comma-separated list of complex selectors.
///
/// The supported surface is what the site scripts query with: type, `#id`,
/// `.class`, `*`, attribute tests (`[a]`, `=`, `^=`, `$=`, `*=`, `~=`) and the
/// descendant and child combinators. Anything else is
/// [`Error::UnsupportedSelector`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SelectorList(Vec<ComplexSelector>);

/// The subject compound plus the compounds it must sit under, nearest first.
#[derive(Debug, Clone, PartialEq, Eq)]
struct ComplexSelector {
    subject: Compound,
    ancestors: Vec<(Combinator, Compound)>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Compound {
    universal: bool,
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
    attrs: Vec<AttrTest>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Combinator {
    Descendant,
    Child,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct AttrTest {
    name: String,
    op: AttrOp,
    value: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AttrOp {
    Present,
    Equals,
    Prefix,
    Suffix,
    Substring,
    Word,
}

impl SelectorList {
    pub(crate) fn parse(source: &str) -> Result<Self> {
        let mut parser = Parser::new(source);
        let mut list = Vec::new();
        loop {
            list.push(parser.complex()?);
            match parser.chars.next() {
                None => return Ok(Self(list)),
                Some(',') => {}
                Some(_) => return Err(parser.unsupported()),
            }
        }
    }

    /// The id of a bare `#id` selector, which the id index answers directly.
    pub(crate) fn as_id_lookup(&self) -> Option<&str> {
        let [only] = self.0.as_slice() else {
            return None;
        };
        let subject = &only.subject;
        let bare = only.ancestors.is_empty()
            && !subject.universal
            && subject.tag.is_none()
            && subject.classes.is_empty()
            && subject.attrs.is_empty();
        if bare { subject.id.as_deref() } else { None }
    }

    pub(crate) fn matches(&self, dom: &Dom, node: NodeId) -> bool {
        self.0.iter().any(|complex| complex.matches(dom, node))
    }
}

impl ComplexSelector {
    // Each ancestor compound binds to the nearest qualifying node; there is
    // no backtracking.
    fn matches(&self, dom: &Dom, node: NodeId) -> bool {
        let fits = |candidate: NodeId, compound: &Compound| {
            dom.element(candidate).is_some_and(|element| compound.matches(element))
        };
        if !fits(node, &self.subject) {
            return false;
        }

        let mut current = node;
        for (combinator, compound) in &self.ancestors {
            let next = match combinator {
                Combinator::Child => dom.parent(current).filter(|parent| fits(*parent, compound)),
                Combinator::Descendant => dom.ancestors(current).find(|up| fits(*up, compound)),
            };
            match next {
                Some(next) => current = next,
                None => return false,
            }
        }
        true
    }
}

impl Compound {
    fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    fn matches(&self, element: &Element) -> bool {
        self.tag
            .as_ref()
            .is_none_or(|tag| element.tag_name.eq_ignore_ascii_case(tag))
            && self
                .id
                .as_ref()
                .is_none_or(|id| element.attrs.get("id") == Some(id))
            && self.classes.iter().all(|class| element.has_class(class))
            && self.attrs.iter().all(|test| test.matches(element))
    }
}

impl AttrTest {
    fn matches(&self, element: &Element) -> bool {
        let Some(actual) = element.attrs.get(&self.name) else {
            return false;
        };
        let wanted = self.value.as_str();
        match self.op {
            AttrOp::Present => true,
            AttrOp::Equals => actual == wanted,
            AttrOp::Prefix => actual.starts_with(wanted),
            AttrOp::Suffix => actual.ends_with(wanted),
            AttrOp::Substring => actual.contains(wanted),
            AttrOp::Word => actual.split_whitespace().any(|word| word == wanted),
        }
    }
}

struct Parser<'a> {
    source: &'a str,
    chars: Peekable<Chars<'a>>,
}

impl<'a> Parser<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            source,
            chars: source.chars().peekable(),
        }
    }

    fn unsupported(&self) -> Error {
        Error::UnsupportedSelector(self.source.to_string())
    }

    /// Returns whether any whitespace was consumed.
    fn skip_whitespace(&mut self) -> bool {
        let mut skipped = false;
        while self.chars.next_if(char::is_ascii_whitespace).is_some() {
            skipped = true;
        }
        skipped
    }

    fn complex(&mut self) -> Result<ComplexSelector> {
        self.skip_whitespace();
        let mut compounds = vec![self.compound()?];
        let mut combinators = Vec::new();
        loop {
            let spaced = self.skip_whitespace();
            let combinator = match self.chars.peek() {
                None | Some(',') => break,
                Some('>') => {
                    self.chars.next();
                    self.skip_whitespace();
                    Combinator::Child
                }
                Some(_) if spaced => Combinator::Descendant,
                Some(_) => return Err(self.unsupported()),
            };
            combinators.push(combinator);
            compounds.push(self.compound()?);
        }

        let Some(subject) = compounds.pop() else {
            return Err(self.unsupported());
        };
        let ancestors = combinators
            .into_iter()
            .rev()
            .zip(compounds.into_iter().rev())
            .collect();
        Ok(ComplexSelector { subject, ancestors })
    }

    fn compound(&mut self) -> Result<Compound> {
        let mut compound = Compound::default();
        while let Some(&ch) = self.chars.peek() {
            match ch {
                '*' if compound.is_empty() => {
                    self.chars.next();
                    compound.universal = true;
                }
                '#' if compound.id.is_none() => {
                    self.chars.next();
                    compound.id = Some(self.ident()?);
                }
                '.' => {
                    self.chars.next();
                    compound.classes.push(self.ident()?);
                }
                '[' => {
                    self.chars.next();
                    compound.attrs.push(self.attr_test()?);
                }
                ch if is_ident_char(ch) && compound.is_empty() => {
                    compound.tag = Some(self.ident()?.to_ascii_lowercase());
                }
                ch if ch.is_ascii_whitespace() || ch == ',' || ch == '>' => break,
                _ => return Err(self.unsupported()),
            }
        }
        if compound.is_empty() {
            return Err(self.unsupported());
        }
        Ok(compound)
    }

    fn ident(&mut self) -> Result<String> {
        let mut out = String::new();
        while let Some(ch) = self.chars.next_if(|ch| is_ident_char(*ch)) {
            out.push(ch);
        }
        if out.is_empty() {
            return Err(self.unsupported());
        }
        Ok(out)
    }

    fn attr_test(&mut self) -> Result<AttrTest> {
        self.skip_whitespace();
        let mut name = String::new();
        while let Some(ch) = self.chars.next_if(|ch| is_ident_char(*ch) || *ch == ':') {
            name.push(ch.to_ascii_lowercase());
        }
        if name.is_empty() {
            return Err(self.unsupported());
        }
        self.skip_whitespace();

        let op = match self.chars.next() {
            Some(']') => {
                return Ok(AttrTest {
                    name,
                    op: AttrOp::Present,
                    value: String::new(),
                });
            }
            Some('=') => AttrOp::Equals,
            Some(prefix @ ('^' | '$' | '*' | '~')) => {
                if self.chars.next() != Some('=') {
                    return Err(self.unsupported());
                }
                match prefix {
                    '^' => AttrOp::Prefix,
                    '$' => AttrOp::Suffix,
                    '*' => AttrOp::Substring,
                    _ => AttrOp::Word,
                }
            }
            _ => return Err(self.unsupported()),
        };

        self.skip_whitespace();
        let value = self.attr_value()?;
        self.skip_whitespace();
        if self.chars.next() != Some(']') {
            return Err(self.unsupported());
        }
        Ok(AttrTest { name, op, value })
    }

    fn attr_value(&mut self) -> Result<String> {
        let quote = self.chars.next_if(|ch| *ch == '"' || *ch == '\'');
        let mut value = String::new();
        loop {
            match (self.chars.peek().copied(), quote) {
                (None, Some(_)) => return Err(self.unsupported()),
                (None, None) => break,
                (Some(ch), Some(q)) if ch == q => {
                    self.chars.next();
                    break;
                }
                (Some(ch), None) if ch == ']' || ch.is_ascii_whitespace() => break,
                (Some('\\'), _) => {
                    self.chars.next();
                    if let Some(escaped) = self.chars.next() {
                        value.push(escaped);
                    }
                }
                (Some(ch), _) => {
                    self.chars.next();
                    value.push(ch);
                }
            }
        }
        if quote.is_none() && value.is_empty() {
            return Err(self.unsupported());
        }
        Ok(value)
    }
}

fn is_ident_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_' || ch == '-'
}
