//! Plain-text extraction from one (X)HTML content document.
//!
//! Chapter detection here is a keyword scan over the raw markup, not over the
//! visible text. It therefore also fires on keywords that only appear in
//! attributes, class names or comments (`class="chapter-body"`,
//! `epub:type="chapter"`). That over-matching is accepted and kept stable so
//! output stays comparable across versions.
//!
//! Content documents are XHTML, but the tree is built by an HTML5 parser,
//! which ignores `/>` on elements like `script` or `title`. Well-formed
//! markup is therefore rewritten first so every non-void empty element gets
//! an explicit end tag.

use crate::error::{ConvertError, Result};
use once_cell::sync::Lazy;
use quick_xml::events::Event;
use quick_xml::{Reader, Writer};
use regex::Regex;
use scraper::{Html, Node, Selector};
use tracing::debug;

/// Sections whose normalized text is shorter than this are treated as
/// navigation or front-matter noise and dropped.
pub const MIN_SECTION_CHARS: usize = 100;

/// Headings at least this long are not used as chapter titles.
pub const MAX_TITLE_CHARS: usize = 100;

/// Elements whose text never reaches the output
const STRIPPED_ELEMENTS: &[&str] = &["script", "style"];

/// HTML elements that never have content and may stay self-closed
const VOID_ELEMENTS: &[&[u8]] = &[
    b"area", b"base", b"br", b"col", b"embed", b"hr", b"img", b"input", b"link", b"meta",
    b"param", b"source", b"track", b"wbr",
];

static CHAPTER_KEYWORD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)chapter|prologue|epilogue").expect("chapter keyword pattern is valid")
});
static WHITESPACE_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));
static PARAGRAPH_BREAK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n\s*\n").expect("paragraph break pattern is valid"));
static TITLE_HEADINGS: Lazy<Selector> =
    Lazy::new(|| Selector::parse("h1, h2, h3").expect("heading selector is valid"));

/// Text and chapter information pulled out of one content document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedSection {
    /// Whitespace-normalized visible text, at least `MIN_SECTION_CHARS` long
    pub text: String,
    pub is_chapter: bool,
    /// First short, non-empty h1-h3 heading. Only rendered for chapters.
    pub chapter_title: Option<String>,
}

/// Decode and extract one document. `Ok(None)` means the document was too
/// short to keep.
pub fn extract_section(href: &str, raw_content: &[u8]) -> Result<Option<ExtractedSection>> {
    let markup =
        String::from_utf8(raw_content.to_vec()).map_err(|source| ConvertError::Encoding {
            href: href.to_string(),
            source,
        })?;

    let is_chapter = looks_like_chapter(&markup);
    let document = parse_markup(href, &markup);
    let text = normalize_whitespace(&visible_text(&document));

    if text.trim().chars().count() < MIN_SECTION_CHARS {
        return Ok(None);
    }

    Ok(Some(ExtractedSection {
        text,
        is_chapter,
        chapter_title: find_title(&document),
    }))
}

/// Case-insensitive keyword scan over the raw markup
pub fn looks_like_chapter(markup: &str) -> bool {
    CHAPTER_KEYWORD.is_match(markup)
}

/// Collapse every whitespace run to one space and trim, then fold blank-line
/// sequences into a two-newline paragraph break.
///
/// The first pass leaves no newlines behind, so the second never matches.
/// Both run in this order to keep output identical to earlier releases.
pub fn normalize_whitespace(text: &str) -> String {
    let collapsed = WHITESPACE_RUN.replace_all(text, " ");
    PARAGRAPH_BREAK
        .replace_all(collapsed.trim(), "\n\n")
        .into_owned()
}

fn parse_markup(href: &str, markup: &str) -> Html {
    match expand_empty_elements(markup) {
        Some(expanded) => Html::parse_document(&expanded),
        None => {
            debug!(%href, "Markup is not well-formed XML, parsing as plain HTML");
            Html::parse_document(markup)
        }
    }
}

/// Re-serialize well-formed XHTML with `<x/>` written as `<x></x>` for every
/// non-void element. `None` when the markup does not read as XML.
fn expand_empty_elements(markup: &str) -> Option<String> {
    let mut reader = Reader::from_str(markup);
    reader.config_mut().trim_text(false);
    let mut writer = Writer::new(Vec::new());

    loop {
        match reader.read_event().ok()? {
            Event::Eof => break,
            Event::Empty(element) if !VOID_ELEMENTS.contains(&element.local_name().as_ref()) => {
                let end = element.to_end().into_owned();
                writer.write_event(Event::Start(element)).ok()?;
                writer.write_event(Event::End(end)).ok()?;
            }
            event => writer.write_event(event).ok()?,
        }
    }

    String::from_utf8(writer.into_inner()).ok()
}

/// Concatenate all text nodes in document order, skipping anything inside
/// script or style elements.
fn visible_text(document: &Html) -> String {
    let mut text = String::new();
    for node in document.tree.root().descendants() {
        let Node::Text(fragment) = node.value() else {
            continue;
        };
        let hidden = node.ancestors().any(|ancestor| match ancestor.value() {
            Node::Element(element) => STRIPPED_ELEMENTS.contains(&element.name()),
            _ => false,
        });
        if !hidden {
            text.push_str(fragment);
        }
    }
    text
}

fn find_title(document: &Html) -> Option<String> {
    document.select(&TITLE_HEADINGS).find_map(|heading| {
        let text = heading.text().collect::<String>();
        let text = text.trim();
        (!text.is_empty() && text.chars().count() < MAX_TITLE_CHARS).then(|| text.to_string())
    })
}
