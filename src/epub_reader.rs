use crate::error::{ConvertError, Result};
use crate::reader::{item_kind, BookSource, DocumentItem, ItemKind};
use rbook::prelude::*;
use rbook::Epub;
use std::path::{Path, PathBuf};
use tracing::debug;

pub struct EpubData {
    epub: Epub,
    path: PathBuf,
}

impl EpubData {
    pub fn open(path: &Path) -> Result<Self> {
        let epub = Epub::options()
            .strict(false)
            .open(path)
            .map_err(|e| ConvertError::ContainerFormat {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;
        Ok(Self {
            epub,
            path: path.to_path_buf(),
        })
    }
}

impl BookSource for EpubData {
    fn title(&self) -> Option<String> {
        self.epub
            .metadata()
            .title()
            .map(|t| t.value().to_string())
    }

    fn items(&self) -> Result<Vec<DocumentItem>> {
        let mut items = Vec::new();

        for entry in self.epub.manifest().entries() {
            let href = entry
                .resource()
                .key()
                .value()
                .unwrap_or("unknown")
                .to_string();
            let kind = item_kind(entry.media_type());

            let raw_content = match kind {
                ItemKind::Document => {
                    entry
                        .read_bytes()
                        .map_err(|e| ConvertError::ContainerFormat {
                            path: self.path.clone(),
                            message: format!("failed to read {href}: {e}"),
                        })?
                }
                ItemKind::Other => Vec::new(),
            };

            debug!(%href, ?kind, bytes = raw_content.len(), "Read manifest item");
            items.push(DocumentItem {
                href,
                kind,
                raw_content,
            });
        }

        Ok(items)
    }
}
