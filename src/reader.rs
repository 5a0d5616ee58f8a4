use crate::error::Result;

/// Coarse content type of a packaged item
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
    /// An (X)HTML content document
    Document,
    Other,
}

/// One packaged content file, in package order
pub struct DocumentItem {
    /// Location inside the package, used in log and error messages
    pub href: String,
    pub kind: ItemKind,
    /// Undecoded file content. Empty for `Other` items, which are never read.
    pub raw_content: Vec<u8>,
}

impl DocumentItem {
    pub fn is_document(&self) -> bool {
        self.kind == ItemKind::Document
    }
}

/// Trait for container formats the extractor can pull items from
pub trait BookSource {
    /// Book title from the package metadata, if any
    fn title(&self) -> Option<String>;
    /// Every packaged item, in package order
    fn items(&self) -> Result<Vec<DocumentItem>>;
}

/// Classify a manifest media type. Only XHTML counts as a content
/// document; `text/html` entries are not valid EPUB content documents and
/// are skipped with the rest.
pub fn item_kind(media_type: &str) -> ItemKind {
    let media_type = media_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    match media_type.as_str() {
        "application/xhtml+xml" => ItemKind::Document,
        _ => ItemKind::Other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn xhtml_is_a_document() {
        assert_eq!(item_kind("application/xhtml+xml"), ItemKind::Document);
        assert_eq!(item_kind("Application/XHTML+XML; charset=utf-8"), ItemKind::Document);
    }

    #[test]
    fn other_media_types_are_skipped() {
        assert_eq!(item_kind("text/html"), ItemKind::Other);
        assert_eq!(item_kind("text/css"), ItemKind::Other);
        assert_eq!(item_kind("image/png"), ItemKind::Other);
        assert_eq!(item_kind("application/x-dtbncx+xml"), ItemKind::Other);
    }
}
