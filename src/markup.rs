//! Shared helpers for reading and writing HTML fragments with `quick-xml`.
//!
//! Fragments served by the site are HTML, not XML: void elements are not
//! self-closed, end tags may be missing, attributes may lack values and a
//! lone `&` may appear unescaped in text.
//! The reader is configured to tolerate all of that.

use quick_xml::{
    Reader, Writer,
    events::{BytesEnd, BytesStart, BytesText, Event},
};
use std::io::Cursor;

pub type XmlWriter = Writer<Cursor<Vec<u8>>>;

/// Elements that never have content and therefore never get an end tag.
const VOID_ELEMENTS: &[&[u8]] = &[
    b"area", b"base", b"br", b"col", b"embed", b"hr", b"img", b"input", b"link", b"meta",
    b"source", b"track", b"wbr",
];

#[inline]
pub fn create_reader(content: &str) -> Reader<&[u8]> {
    let mut reader = Reader::from_str(content);
    reader.config_mut().trim_text(false);
    reader.config_mut().enable_all_checks(false);
    reader.config_mut().allow_unmatched_ends = true;
    // A lone `&` is literal text in HTML
    reader.config_mut().allow_dangling_amp = true;
    reader
}

#[inline]
pub fn create_writer() -> XmlWriter {
    Writer::new(Cursor::new(Vec::new()))
}

/// Finish a writer into a UTF-8 string.
pub fn into_string(writer: XmlWriter) -> String {
    String::from_utf8_lossy(&writer.into_inner().into_inner()).into_owned()
}

#[inline]
pub fn is_void(name: &[u8]) -> bool {
    VOID_ELEMENTS.iter().any(|v| v.eq_ignore_ascii_case(name))
}

/// Value of an attribute, if present. Attributes without a value read as empty.
pub fn attr_value(elem: &BytesStart<'_>, key: &[u8]) -> Option<String> {
    elem.html_attributes()
        .flatten()
        .find(|attr| attr.key.as_ref().eq_ignore_ascii_case(key))
        .map(|attr| String::from_utf8_lossy(&attr.value).into_owned())
}

/// Whether the element's `class` list contains `class`.
pub fn has_class(elem: &BytesStart<'_>, class: &str) -> bool {
    attr_value(elem, b"class").is_some_and(|v| v.split_whitespace().any(|c| c == class))
}

/// Resolve an entity reference name (without `&` and `;`) to its text.
///
/// Handles numeric references and the entities that occur in generated
/// index pages; unknown names resolve to `None`.
pub fn resolve_entity(name: &str) -> Option<String> {
    if let Some(num) = name.strip_prefix('#') {
        let code = match num.strip_prefix(['x', 'X']) {
            Some(hex) => u32::from_str_radix(hex, 16).ok()?,
            None => num.parse().ok()?,
        };
        return char::from_u32(code).map(String::from);
    }
    let text = match name {
        "amp" => "&",
        "lt" => "<",
        "gt" => ">",
        "quot" => "\"",
        "apos" => "'",
        "nbsp" => "\u{a0}",
        "middot" => "·",
        "larr" => "←",
        "rarr" => "→",
        _ => return None,
    };
    Some(text.to_owned())
}

/// Write a text element: `<tag class="...">text</tag>`.
pub fn write_text_element(
    writer: &mut XmlWriter,
    tag: &str,
    class: &str,
    text: &str,
) -> std::io::Result<()> {
    let mut elem = BytesStart::new(tag);
    elem.push_attribute(("class", class));
    writer.write_event(Event::Start(elem))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new(tag)))?;
    Ok(())
}

/// Text content of a fragment with tags stripped and whitespace collapsed.
pub fn plain_text(content: &str) -> String {
    let mut reader = create_reader(content);
    let mut out = String::new();
    loop {
        match reader.read_event() {
            Ok(Event::Text(text)) => out.push_str(&String::from_utf8_lossy(&text)),
            Ok(Event::GeneralRef(entity)) => {
                if let Some(text) = resolve_entity(&String::from_utf8_lossy(&entity)) {
                    out.push_str(&text);
                }
            }
            Ok(Event::Start(_) | Event::End(_) | Event::Empty(_)) => out.push(' '),
            Ok(Event::Eof) | Err(_) => break,
            Ok(_) => {}
        }
    }
    out.split_whitespace().collect::<Vec<_>>().join(" ")
}
