//! Template metadata and the raw GitHub contents shape it is built from.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// File extension of tracked templates.
pub const TEMPLATE_EXTENSION: &str = ".md";

/// Kind of a discovered entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateKind {
    File,
    Directory,
}

/// One discovered steering template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateMetadata {
    /// Display name (file name without extension).
    pub name: String,
    /// File name including extension.
    pub filename: String,
    /// Full path within the repository.
    pub path: String,
    /// Git blob SHA, used for change detection.
    pub content_hash: String,
    /// Size in bytes.
    pub size_bytes: u64,
    /// Absolute URL of the raw content.
    pub download_url: String,
    pub kind: TemplateKind,
}

/// Type of entry in a GitHub contents response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryType {
    File,
    Dir,
    Symlink,
    Submodule,
}

/// A single entry as returned by the GitHub contents API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentEntry {
    pub name: String,
    #[serde(default)]
    pub path: String,
    #[serde(default)]
    pub sha: String,
    #[serde(default)]
    pub size: u64,
    #[serde(rename = "type")]
    pub entry_type: EntryType,
    #[serde(default)]
    pub download_url: Option<String>,
}

impl ContentEntry {
    /// Whether this entry names a markdown file.
    pub fn is_template_file(&self) -> bool {
        self.entry_type == EntryType::File && is_template_filename(&self.name)
    }

    /// Fill in a missing `path` with `fallback`, or the bare name.
    pub fn with_path_fallback(mut self, fallback: Option<&str>) -> Self {
        if self.path.is_empty() {
            self.path = fallback
                .map(|p| p.trim_matches('/'))
                .filter(|p| !p.is_empty())
                .map(String::from)
                .unwrap_or_else(|| self.name.clone());
        }
        self
    }

    /// Convert to template metadata.
    ///
    /// Returns `None` for anything that is not a markdown file with a
    /// download URL; GitHub omits the URL for files too large to serve.
    pub fn into_template(self) -> Option<TemplateMetadata> {
        if !self.is_template_file() {
            return None;
        }
        let download_url = self.download_url?;

        Some(TemplateMetadata {
            name: display_name(&self.name).to_string(),
            filename: self.name,
            path: self.path,
            content_hash: self.sha,
            size_bytes: self.size,
            download_url,
            kind: TemplateKind::File,
        })
    }
}

/// Whether `filename` carries the tracked extension.
pub fn is_template_filename(filename: &str) -> bool {
    filename.ends_with(TEMPLATE_EXTENSION)
}

/// Strip the tracked extension from a file name.
pub fn display_name(filename: &str) -> &str {
    filename
        .strip_suffix(TEMPLATE_EXTENSION)
        .unwrap_or(filename)
}

/// Keep markdown files with a download URL, normalized and sorted by name.
pub fn collect_templates(entries: Vec<ContentEntry>) -> Vec<TemplateMetadata> {
    let mut templates: Vec<_> = entries
        .into_iter()
        .filter_map(ContentEntry::into_template)
        .collect();
    sort_by_name(&mut templates);
    templates
}

/// Stable sort by display name, case-insensitive first.
///
/// Names that differ only in case fall back to byte order, so the result
/// is deterministic.
pub fn sort_by_name(templates: &mut [TemplateMetadata]) {
    templates.sort_by(|a, b| compare_names(&a.name, &b.name));
}

fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}
