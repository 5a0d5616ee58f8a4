use crate::assemble;
use crate::epub_reader::EpubData;
use crate::error::{ConvertError, Result};
use crate::extract::{self, ExtractedSection};
use crate::reader::BookSource;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Title used when the package carries no `dc:title`
pub const DEFAULT_TITLE: &str = "Untitled";

/// Summary of a finished run
#[derive(Debug)]
pub struct Conversion {
    pub title: String,
    pub output: PathBuf,
    /// Sections that passed the length filter
    pub sections: usize,
    pub chapters: usize,
}

/// Convert the EPUB at `input` into a text file at `output`
pub fn convert(input: &Path, output: &Path) -> Result<Conversion> {
    if !input.exists() {
        return Err(ConvertError::NotFound(input.to_path_buf()));
    }

    info!(path = %input.display(), "Opening EPUB");
    let epub = EpubData::open(input)?;
    convert_book(&epub, output)
}

/// Run extraction and assembly over any book source, then write the result.
/// Nothing is written unless every document extracted cleanly.
pub fn convert_book(book: &dyn BookSource, output: &Path) -> Result<Conversion> {
    let title = book.title().unwrap_or_else(|| {
        warn!("Book has no title metadata, using '{DEFAULT_TITLE}'");
        DEFAULT_TITLE.to_string()
    });

    let sections = extract_sections(book)?;
    let chapters = sections.iter().filter(|s| s.is_chapter).count();
    let text = assemble::assemble(&title, &sections);

    write_output(output, &text)?;

    info!(
        title = %title,
        sections = sections.len(),
        chapters,
        bytes = text.len(),
        output = %output.display(),
        "Finished conversion"
    );

    Ok(Conversion {
        title,
        output: output.to_path_buf(),
        sections: sections.len(),
        chapters,
    })
}

fn extract_sections(book: &dyn BookSource) -> Result<Vec<ExtractedSection>> {
    let mut sections = Vec::new();

    for item in book.items()?.iter().filter(|item| item.is_document()) {
        match extract::extract_section(&item.href, &item.raw_content)? {
            Some(section) => {
                debug!(
                    href = %item.href,
                    chars = section.text.chars().count(),
                    is_chapter = section.is_chapter,
                    "Kept section"
                );
                sections.push(section);
            }
            None => debug!(href = %item.href, "Skipped short section"),
        }
    }

    Ok(sections)
}

/// Write `text` to `path` as UTF-8, creating missing parent directories and
/// replacing any existing file.
pub fn write_output(path: &Path, text: &str) -> Result<()> {
    let io_error = |source: std::io::Error| ConvertError::Io {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(io_error)?;
        }
    }

    fs::write(path, text).map_err(io_error)
}
