use crate::extract::ExtractedSection;
use tracing::debug;

/// Ordered text fragments of one output file. Fragments are joined with a
/// single newline when rendered.
#[derive(Debug)]
pub struct OutputDocument {
    fragments: Vec<String>,
    next_chapter: usize,
}

impl OutputDocument {
    /// Start a document with the book title line
    pub fn new(book_title: &str) -> Self {
        Self {
            fragments: vec![format!("# {}\n\n", book_title)],
            next_chapter: 1,
        }
    }

    /// Append a kept section. Chapter sections get a numbered header first.
    pub fn push_section(&mut self, section: &ExtractedSection) {
        if section.is_chapter {
            let header = match &section.chapter_title {
                Some(title) => format!("\n\n# Chapter {}: {}\n\n", self.next_chapter, title),
                None => format!("\n\n# Chapter {}\n\n", self.next_chapter),
            };
            debug!(
                chapter = self.next_chapter,
                title = section.chapter_title.as_deref().unwrap_or_default(),
                "Numbered chapter"
            );
            self.fragments.push(header);
            self.next_chapter += 1;
        }
        self.fragments.push(section.text.clone());
    }

    pub fn into_text(self) -> String {
        self.fragments.join("\n")
    }
}

/// Fold sections, in package order, into the final text
pub fn assemble<'a>(
    book_title: &str,
    sections: impl IntoIterator<Item = &'a ExtractedSection>,
) -> String {
    let mut document = OutputDocument::new(book_title);
    for section in sections {
        document.push_section(section);
    }
    document.into_text()
}
