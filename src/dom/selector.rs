//! Minimal CSS selector support.
//!
//! Supports compound selectors built from `tag`, `*`, `.class`, `#id`, `[attr]` and
//! `[attr="value"]`, joined by the descendant combinator (whitespace). That is the
//! whole vocabulary the dashboard markup contract uses.

use std::fmt;
use std::iter::Peekable;
use std::str::{
    Chars,
    FromStr,
};

use super::DomError;

/// A parsed selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    /// Trimmed input
    source: String,
    /// Compounds from the outermost ancestor to the subject.
    steps: Vec<Compound>,
}

/// One compound selector (`a.nav-link[data-page="home"]`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct Compound {
    /// Lowercase tag name; `None` matches any element
    pub(crate) tag: Option<String>,
    pub(crate) id: Option<String>,
    /// Every class must be present
    pub(crate) classes: Vec<String>,
    pub(crate) attributes: Vec<AttributeMatch>,
}

/// `[name]` or `[name="value"]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct AttributeMatch {
    /// Lowercase attribute name
    pub(crate) name: String,
    /// Exact value to compare; `None` only checks presence
    pub(crate) value: Option<String>,
}

impl Selector {
    /// Parses a selector string.
    ///
    /// # Errors
    /// Empty input, unsupported combinators or pseudo-classes, unterminated brackets
    pub fn parse(source: &str) -> Result<Self, DomError> {
        let mut chars = source.chars().peekable();
        let mut steps = Vec::new();

        loop {
            while chars.peek().is_some_and(|c| c.is_whitespace()) {
                chars.next();
            }
            if chars.peek().is_none() {
                break;
            }
            steps.push(parse_compound(&mut chars, source)?);
        }

        if steps.is_empty() {
            return Err(DomError::selector(source, "selector is empty"));
        }

        Ok(Self { source: source.trim().to_string(), steps })
    }

    /// `.name`
    #[must_use]
    pub fn class(name: &str) -> Self {
        Self::single(
            format!(".{name}"),
            Compound { classes: vec![name.to_string()], ..Compound::default() },
        )
    }

    /// `#name`
    #[must_use]
    pub fn id(name: &str) -> Self {
        Self::single(format!("#{name}"), Compound { id: Some(name.to_string()), ..Compound::default() })
    }

    /// `[name]`
    #[must_use]
    pub fn has_attribute(name: &str) -> Self {
        let attribute = AttributeMatch { name: name.to_ascii_lowercase(), value: None };
        Self::single(format!("[{name}]"), Compound { attributes: vec![attribute], ..Compound::default() })
    }

    /// `[name="value"]`
    #[must_use]
    pub fn attribute_equals(name: &str, value: &str) -> Self {
        let attribute =
            AttributeMatch { name: name.to_ascii_lowercase(), value: Some(value.to_string()) };
        Self::single(
            format!("[{name}=\"{value}\"]"),
            Compound { attributes: vec![attribute], ..Compound::default() },
        )
    }

    /// Wraps one compound without going through the parser.
    fn single(source: String, compound: Compound) -> Self {
        Self { source, steps: vec![compound] }
    }

    /// The selector as written.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// The compound matched against the candidate element itself.
    pub(crate) fn subject(&self) -> Option<&Compound> {
        self.steps.last()
    }

    /// Ancestor compounds, outermost first.
    pub(crate) fn ancestors(&self) -> &[Compound] {
        self.steps.split_last().map_or(&[], |(_, rest)| rest)
    }
}

impl FromStr for Selector {
    type Err = DomError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

impl Compound {
    /// Checks the compound against an element's tag and attributes.
    pub(crate) fn matches(&self, tag: &str, attributes: &[(String, String)]) -> bool {
        let attr = |name: &str| attributes.iter().find(|(k, _)| k == name).map(|(_, v)| v.as_str());

        if self.tag.as_deref().is_some_and(|t| t != tag) {
            return false;
        }
        if let Some(id) = &self.id
            && attr("id") != Some(id.as_str())
        {
            return false;
        }
        if !self.classes.is_empty() {
            let class_attr = attr("class").unwrap_or_default();
            if !self.classes.iter().all(|c| class_attr.split_whitespace().any(|have| have == c)) {
                return false;
            }
        }
        self.attributes.iter().all(|m| match (&m.value, attr(&m.name)) {
            (_, None) => false,
            (None, Some(_)) => true,
            (Some(expected), Some(actual)) => expected == actual,
        })
    }
}

/// Characters allowed in tag, class, id and attribute names.
const fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}

/// Consumes a run of identifier characters.
fn read_ident(chars: &mut Peekable<Chars<'_>>) -> String {
    let mut ident = String::new();
    while let Some(&c) = chars.peek() {
        if !is_ident_char(c) {
            break;
        }
        ident.push(c);
        chars.next();
    }
    ident
}

/// Reads one compound up to the next whitespace.
fn parse_compound(chars: &mut Peekable<Chars<'_>>, source: &str) -> Result<Compound, DomError> {
    let mut compound = Compound::default();
    let mut first = true;

    while let Some(&c) = chars.peek() {
        match c {
            c if c.is_whitespace() => break,
            '*' if first => {
                chars.next();
            }
            '.' | '#' => {
                chars.next();
                let ident = read_ident(chars);
                if ident.is_empty() {
                    return Err(DomError::selector(source, format!("expected a name after '{c}'")));
                }
                if c == '.' {
                    compound.classes.push(ident);
                } else {
                    compound.id = Some(ident);
                }
            }
            '[' => {
                chars.next();
                compound.attributes.push(parse_attribute(chars, source)?);
            }
            c if first && is_ident_char(c) => {
                compound.tag = Some(read_ident(chars).to_ascii_lowercase());
            }
            other => {
                return Err(DomError::selector(source, format!("unsupported character '{other}'")));
            }
        }
        first = false;
    }

    Ok(compound)
}

/// Reads the rest of `[...]` after the opening bracket.
fn parse_attribute(
    chars: &mut Peekable<Chars<'_>>,
    source: &str,
) -> Result<AttributeMatch, DomError> {
    let name = read_ident(chars).to_ascii_lowercase();
    if name.is_empty() {
        return Err(DomError::selector(source, "expected an attribute name after '['"));
    }

    let value = match chars.next() {
        Some(']') => return Ok(AttributeMatch { name, value: None }),
        Some('=') => match chars.peek().copied() {
            Some(quote @ ('"' | '\'')) => {
                chars.next();
                let mut value = String::new();
                loop {
                    match chars.next() {
                        Some(c) if c == quote => break,
                        Some(c) => value.push(c),
                        None => {
                            return Err(DomError::selector(source, "unterminated attribute value"));
                        }
                    }
                }
                value
            }
            _ => read_ident(chars),
        },
        _ => return Err(DomError::selector(source, "expected ']' or '=' in attribute selector")),
    };

    match chars.next() {
        Some(']') => Ok(AttributeMatch { name, value: Some(value) }),
        _ => Err(DomError::selector(source, "expected ']' to close attribute selector")),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use googletest::prelude::*;
    use rstest::rstest;

    use super::*;

    fn attrs(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs.iter().map(|(k, v)| ((*k).to_string(), (*v).to_string())).collect()
    }

    #[googletest::test]
    fn parses_compound_selector() {
        let selector = Selector::parse(r#"a.nav-link[data-page="home"]"#).unwrap();

        let subject = selector.subject().unwrap();
        expect_that!(subject.tag, some(eq("a")));
        expect_that!(subject.classes, elements_are![eq("nav-link")]);
        expect_that!(subject.attributes[0].name, eq("data-page"));
        expect_that!(subject.attributes[0].value, some(eq("home")));
        expect_that!(selector.ancestors().len(), eq(0));
    }

    #[googletest::test]
    fn parses_descendant_combinator() {
        let selector = Selector::parse(".page-header  .language-selector").unwrap();

        expect_that!(selector.ancestors().len(), eq(1));
        expect_that!(selector.ancestors()[0].classes, elements_are![eq("page-header")]);
        expect_that!(selector.subject().unwrap().classes, elements_are![eq("language-selector")]);
    }

    #[googletest::test]
    fn constructors_match_their_parsed_form() {
        expect_that!(Selector::class("nav-link"), eq(&Selector::parse(".nav-link").unwrap()));
        expect_that!(
            Selector::id("sidebarCollapseBtn"),
            eq(&Selector::parse("#sidebarCollapseBtn").unwrap())
        );
        expect_that!(
            Selector::has_attribute("data-translate"),
            eq(&Selector::parse("[data-translate]").unwrap())
        );
        expect_that!(
            Selector::attribute_equals("data-page", "home"),
            eq(&Selector::parse(r#"[data-page="home"]"#).unwrap())
        );
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case(".")]
    #[case("a > b")]
    #[case("a:hover")]
    #[case("[data-page")]
    #[case(r#"[data-page="home]"#)]
    #[case("div, span")]
    fn rejects_unsupported_syntax(#[case] input: &str) {
        assert_that!(Selector::parse(input), err(anything()));
    }

    #[rstest]
    #[case("[data-translate]", true)]
    #[case("#sidebarCollapseBtn", true)]
    #[case("button.sidebar-collapse-btn", true)]
    #[case(".collapsed", false)]
    #[case("a", false)]
    #[case(r#"[aria-label="Toggle"]"#, false)]
    fn compound_matching(#[case] input: &str, #[case] expected: bool) {
        let attributes = attrs(&[
            ("id", "sidebarCollapseBtn"),
            ("class", "sidebar-collapse-btn  primary"),
            ("data-translate", "nav.toggle"),
            ("aria-label", "Toggle sidebar"),
        ]);
        let selector = Selector::parse(input).unwrap();

        assert_that!(selector.subject().unwrap().matches("button", &attributes), eq(expected));
    }
}
