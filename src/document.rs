use anyhow::{Context, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

const OFFICE_EXTENSIONS: [&str; 6] = ["doc", "docx", "xls", "xlsx", "ppt", "pptx"];
const OFFICE_EMBED_URL: &str = "https://view.officeapps.live.com/op/embed.aspx?src=";

/// How the `url` field of a document is to be read
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    /// A link
    #[default]
    String,
    /// Base64-encoded PDF bytes
    Buffer,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub title: String,
    pub url: String,
    #[serde(default, rename = "type")]
    pub kind: DocumentKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentSource {
    Link(String),
    Inline(Vec<u8>),
    Missing,
}

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("document '{title}' is not valid base64: {reason}")]
    InvalidBuffer { title: String, reason: String },
}

pub fn resolve(document: &Document) -> Result<DocumentSource, DocumentError> {
    let url = document.url.trim();
    if url.is_empty() {
        return Ok(DocumentSource::Missing);
    }
    match document.kind {
        DocumentKind::String => {
            let extension = url.rsplit('.').next().unwrap_or_default().to_lowercase();
            if OFFICE_EXTENSIONS.contains(&extension.as_str()) {
                Ok(DocumentSource::Link(format!("{}{}", OFFICE_EMBED_URL, url)))
            } else {
                Ok(DocumentSource::Link(url.to_string()))
            }
        }
        DocumentKind::Buffer => {
            let compact: String = url.chars().filter(|c| !c.is_whitespace()).collect();
            STANDARD
                .decode(compact)
                .map(DocumentSource::Inline)
                .map_err(|e| DocumentError::InvalidBuffer {
                    title: document.title.clone(),
                    reason: e.to_string(),
                })
        }
    }
}

/// Write inline bytes to `dir` so an external viewer can open them
pub fn write_inline(dir: &Path, title: &str, bytes: &[u8]) -> Result<PathBuf> {
    fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    let stem: String = title
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect();
    let stem = if stem.is_empty() { "document".to_string() } else { stem };
    let path = dir.join(format!("{}.pdf", stem));
    fs::write(&path, bytes).with_context(|| format!("writing {}", path.display()))?;
    Ok(path)
}

/// Tabbed viewer over a primary document and any additional ones
#[derive(Debug, Clone)]
pub struct DocumentViewer {
    documents: Vec<Document>,
    open: bool,
    selected: usize,
    pub downloadable: bool,
}

impl DocumentViewer {
    pub fn new(documents: Vec<Document>) -> Self {
        Self {
            documents,
            open: false,
            selected: 0,
            downloadable: true,
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Opening an empty set does nothing
    pub fn open(&mut self) {
        if !self.documents.is_empty() {
            self.open = true;
            self.selected = 0;
        }
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn has_tabs(&self) -> bool {
        self.documents.len() > 1
    }

    pub fn next_tab(&mut self) {
        if !self.documents.is_empty() {
            self.selected = (self.selected + 1) % self.documents.len();
        }
    }

    pub fn prev_tab(&mut self) {
        if !self.documents.is_empty() {
            self.selected = (self.selected + self.documents.len() - 1) % self.documents.len();
        }
    }

    pub fn current(&self) -> Option<&Document> {
        self.documents.get(self.selected)
    }

    pub fn current_source(&self) -> Option<Result<DocumentSource, DocumentError>> {
        self.current().map(resolve)
    }
}
