//! Where a bibliography comes from.
//!
//! Hosts hand the renderer a single blob. [`SourceChain`] implements the usual lookup for hosts
//! that only hold plain values: inline texts first, in priority order (page, page content, site,
//! site content), then uploaded files in the same order. Only `.json` files are read.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

pub trait BibliographySource {
    /// The raw bibliography, or an empty string when nothing is configured.
    fn resolve(&self) -> String;
}

impl BibliographySource for str {
    fn resolve(&self) -> String {
        self.to_string()
    }
}

impl BibliographySource for String {
    fn resolve(&self) -> String {
        self.clone()
    }
}

/// Candidate inline texts and files, each list in priority order.
#[derive(Debug, Clone, Default)]
pub struct SourceChain {
    texts: Vec<String>,
    files: Vec<PathBuf>,
}

impl SourceChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.texts.push(text.into());
        self
    }

    pub fn file(mut self, path: impl Into<PathBuf>) -> Self {
        self.files.push(path.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.texts.is_empty() && self.files.is_empty()
    }
}

impl BibliographySource for SourceChain {
    fn resolve(&self) -> String {
        if let Some(text) = self.texts.iter().find(|t| !t.trim().is_empty()) {
            return text.clone();
        }
        for path in &self.files {
            if !is_json(path) {
                debug!(path = %path.display(), "skipping bibliography file without .json extension");
                continue;
            }
            match fs::read_to_string(path) {
                Ok(contents) => return contents,
                Err(err) => warn!(path = %path.display(), error = %err, "cannot read bibliography file"),
            }
        }
        String::new()
    }
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}
