//! Lenient HTML reader on top of `quick-xml`.

use std::borrow::Cow;

use quick_xml::Reader;
use quick_xml::events::{
    BytesStart,
    Event,
};

use super::document::{
    RAW_TEXT_ELEMENTS,
    VOID_ELEMENTS,
};
use super::{
    Document,
    DomError,
    NodeId,
};

/// Named entities that show up in hand-written dashboard markup.
fn resolve_entity(entity: &str) -> Option<&'static str> {
    match entity {
        "nbsp" => Some("\u{a0}"),
        "times" => Some("\u{d7}"),
        "copy" => Some("\u{a9}"),
        "hellip" => Some("\u{2026}"),
        "mdash" => Some("\u{2014}"),
        "ndash" => Some("\u{2013}"),
        "laquo" => Some("\u{ab}"),
        "raquo" => Some("\u{bb}"),
        _ => None,
    }
}

/// Elements that never have children (`<br>`, `<img>`, ...).
fn is_void(tag: &str) -> bool {
    VOID_ELEMENTS.contains(&tag)
}

/// Lowercased tag name and unescaped attributes of a start tag.
fn read_start(start: &BytesStart<'_>) -> Result<(String, Vec<(String, String)>), DomError> {
    let tag = String::from_utf8_lossy(start.name().as_ref()).to_ascii_lowercase();
    let mut attributes = Vec::new();
    for attribute in start.html_attributes() {
        let attribute = attribute.map_err(|e| DomError::Markup(e.to_string()))?;
        let name = String::from_utf8_lossy(attribute.key.as_ref()).to_ascii_lowercase();
        let value = attribute.unescape_value().map_or_else(
            |_| String::from_utf8_lossy(&attribute.value).into_owned(),
            Cow::into_owned,
        );
        attributes.push((name, value));
    }
    Ok((tag, attributes))
}

/// Lenient reader over `markup`.
fn reader(markup: &str) -> Reader<&[u8]> {
    let mut reader = Reader::from_str(markup);
    let config = reader.config_mut();
    config.trim_text(false);
    config.check_end_names = false;
    config.allow_unmatched_ends = true;
    reader
}

fn is_raw_text(tag: &str) -> bool {
    RAW_TEXT_ELEMENTS.contains(&tag)
}

/// Splits the content of a raw-text element from the markup that follows its end
/// tag. An unclosed element takes the rest of the input.
fn split_raw_text<'a>(markup: &'a str, tag: &str) -> (&'a str, &'a str) {
    let closing = format!("</{tag}");
    let Some(start) = markup.to_ascii_lowercase().find(&closing) else {
        return (markup, "");
    };
    let end = markup
        .get(start..)
        .and_then(|tail| tail.find('>'))
        .map_or(markup.len(), |gt| start + gt + 1);
    (markup.get(..start).unwrap_or_default(), markup.get(end..).unwrap_or_default())
}

/// Parses `markup` and appends the resulting nodes under `parent`.
///
/// Void elements never take children, an end tag closes the nearest matching open
/// element, stray end tags are ignored. Comments, doctype and processing
/// instructions are dropped. `<script>` and `<style>` content is kept verbatim as a
/// single text node.
pub(crate) fn parse_into(
    document: &mut Document,
    parent: NodeId,
    markup: &str,
) -> Result<(), DomError> {
    let mut open = vec![parent];
    let mut rest = markup;

    // Raw-text elements restart the reader after their end tag.
    'input: loop {
        let mut reader = reader(rest);
        loop {
            let current = open.last().copied().unwrap_or(parent);
            match reader.read_event() {
                Ok(Event::Start(start)) => {
                    let (tag, attributes) = read_start(&start)?;
                    let id = document.append_element(current, &tag, attributes);
                    if is_raw_text(&tag) {
                        let offset =
                            usize::try_from(reader.buffer_position()).unwrap_or(rest.len());
                        let (text, remaining) =
                            split_raw_text(rest.get(offset..).unwrap_or_default(), &tag);
                        if !text.is_empty() {
                            document.append_text(id, text);
                        }
                        rest = remaining;
                        continue 'input;
                    }
                    if !is_void(&tag) {
                        open.push(id);
                    }
                }
                Ok(Event::Empty(start)) => {
                    let (tag, attributes) = read_start(&start)?;
                    document.append_element(current, &tag, attributes);
                }
                Ok(Event::End(end)) => {
                    let tag = String::from_utf8_lossy(end.name().as_ref()).to_ascii_lowercase();
                    if let Some(index) = open
                        .iter()
                        .skip(1)
                        .rposition(|id| document.tag_name(*id) == Some(tag.as_str()))
                    {
                        open.truncate(index + 1);
                    }
                }
                Ok(Event::Text(text)) => {
                    let content = text.unescape_with(resolve_entity).map_or_else(
                        |_| String::from_utf8_lossy(&text).into_owned(),
                        Cow::into_owned,
                    );
                    if !content.is_empty() {
                        document.append_text(current, content);
                    }
                }
                Ok(Event::CData(data)) => {
                    document.append_text(current, String::from_utf8_lossy(&data).into_owned());
                }
                Ok(Event::Eof) => break 'input,
                Ok(_) => {}
                Err(e) => {
                    let consumed = u64::try_from(markup.len() - rest.len()).unwrap_or(u64::MAX);
                    let position = consumed.saturating_add(reader.error_position());
                    return Err(DomError::Markup(format!("{e} at byte {position}")));
                }
            }
        }
    }

    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use googletest::prelude::*;

    use super::*;

    #[googletest::test]
    fn void_elements_do_not_swallow_siblings() {
        let doc = Document::parse(
            r#"<div class="user-profile"><img src="a.png" alt="Avatar"><div class="user-name">Admin</div></div>"#,
        )
        .unwrap();

        let profile = doc.query_selector(".user-profile").unwrap().unwrap();
        let name = doc.query_selector(".user-name").unwrap().unwrap();

        expect_that!(doc.parent(name), some(eq(profile)));
        expect_that!(doc.children(profile).len(), eq(2));
    }

    #[googletest::test]
    fn mismatched_end_tag_closes_nearest_open_element() {
        let doc = Document::parse("<ul><li><span>one</li><li>two</li></ul><p>after</p>").unwrap();

        let items = doc.query_selector_all("li").unwrap();
        let paragraph = doc.query_selector("p").unwrap().unwrap();

        expect_that!(items.len(), eq(2));
        expect_that!(doc.parent(paragraph), some(eq(doc.root())));
    }

    #[googletest::test]
    fn script_and_style_content_survive_a_round_trip() {
        const PAGE: &str = "<html><head><style>a > b { color: red; }</style></head><body><script>if (a < b && c) { x(); }</script><p>after</p></body></html>";

        let doc = Document::parse(PAGE).unwrap();

        let script = doc.query_selector("script").unwrap().unwrap();
        expect_that!(doc.text_content(script), eq("if (a < b && c) { x(); }"));
        expect_that!(doc.children(script).len(), eq(1));
        expect_that!(doc.query_selector("body p").unwrap(), some(anything()));
        expect_that!(doc.to_html(), eq(&format!("<!DOCTYPE html>\n{PAGE}")));
    }

    #[googletest::test]
    fn raw_text_end_tag_is_case_insensitive() {
        let doc = Document::parse("<div><SCRIPT>let t = '<b>';</SCRIPT><span>x</span></div>").unwrap();

        let script = doc.query_selector("script").unwrap().unwrap();
        let span = doc.query_selector("div span").unwrap().unwrap();

        expect_that!(doc.text_content(script), eq("let t = '<b>';"));
        expect_that!(doc.query_selector_all("b").unwrap().len(), eq(0));
        expect_that!(doc.text_content(span), eq("x"));
    }

    #[googletest::test]
    fn unclosed_script_takes_the_rest() {
        let doc = Document::parse("<script>a < b").unwrap();

        let script = doc.query_selector("script").unwrap().unwrap();

        expect_that!(doc.text_content(script), eq("a < b"));
    }

    #[googletest::test]
    fn stray_end_tag_is_ignored() {
        let doc = Document::parse("</div><p>ok</p>").unwrap();

        expect_that!(doc.to_html(), eq("<p>ok</p>"));
    }

    #[googletest::test]
    fn comments_and_doctype_are_dropped() {
        let doc =
            Document::parse("<!DOCTYPE html><html><!-- Collapse Button --><body></body></html>")
                .unwrap();

        expect_that!(doc.to_html(), eq("<!DOCTYPE html>\n<html><body></body></html>"));
    }

    #[googletest::test]
    fn entities_are_resolved() {
        let doc = Document::parse("<button>&times;</button><b>a&amp;b</b><i>&unknown;</i>").unwrap();

        let button = doc.query_selector("button").unwrap().unwrap();
        let bold = doc.query_selector("b").unwrap().unwrap();
        let italic = doc.query_selector("i").unwrap().unwrap();

        expect_that!(doc.text_content(button), eq("\u{d7}"));
        expect_that!(doc.text_content(bold), eq("a&b"));
        expect_that!(doc.text_content(italic), eq("&unknown;"));
    }

    #[googletest::test]
    fn valueless_attributes_are_kept() {
        let doc = Document::parse("<input type=checkbox checked>").unwrap();

        let input = doc.query_selector("input").unwrap().unwrap();

        expect_that!(doc.attribute(input, "type"), some(eq("checkbox")));
        expect_that!(doc.attribute(input, "checked"), some(eq("")));
    }

    #[googletest::test]
    fn uppercase_tags_are_normalised() {
        let doc = Document::parse("<DIV ID=\"x\"></DIV>").unwrap();

        let div = doc.get_element_by_id("x").unwrap();

        expect_that!(doc.tag_name(div), some(eq("div")));
    }
}
