//! File types accepted by the media uploader.

use std::collections::BTreeMap;
use std::path::Path;

pub const SVG_MIME: &str = "image/svg+xml";

const DEFAULT_TYPES: &[(&str, &str)] = &[
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("png", "image/png"),
    ("gif", "image/gif"),
    ("webp", "image/webp"),
    ("avif", "image/avif"),
    ("ico", "image/x-icon"),
    ("pdf", "application/pdf"),
];

/// Extension to MIME type allowlist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadPolicy {
    types: BTreeMap<String, String>,
}

impl Default for UploadPolicy {
    fn default() -> Self {
        Self {
            types: DEFAULT_TYPES
                .iter()
                .map(|(ext, mime)| (ext.to_string(), mime.to_string()))
                .collect(),
        }
    }
}

impl UploadPolicy {
    /// Also accepts SVG images (`.svg` and gzipped `.svgz`).
    pub fn with_svg(self) -> Self {
        self.allow("svg", SVG_MIME).allow("svgz", SVG_MIME)
    }

    pub fn allow(mut self, extension: &str, mime: &str) -> Self {
        let extension = extension.trim_start_matches('.').to_ascii_lowercase();
        if !extension.is_empty() {
            self.types.insert(extension, mime.to_string());
        }
        self
    }

    pub fn allows_svg(&self) -> bool {
        self.types.contains_key("svg")
    }

    /// MIME type for `filename`, or `None` when its extension is not allowed.
    pub fn mime_for(&self, filename: &str) -> Option<&str> {
        let ext = Path::new(filename).extension()?.to_str()?.to_ascii_lowercase();
        self.types.get(&ext).map(String::as_str)
    }

    pub fn extensions(&self) -> impl Iterator<Item = &str> {
        self.types.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn svg_rejected_by_default() {
        let policy = UploadPolicy::default();
        assert!(!policy.allows_svg());
        assert_eq!(policy.mime_for("logo.svg"), None);
        assert_eq!(policy.mime_for("photo.JPG"), Some("image/jpeg"));
    }

    #[test]
    fn svg_enabled() {
        let policy = UploadPolicy::default().with_svg();
        assert!(policy.allows_svg());
        assert_eq!(policy.mime_for("Logo.SVG"), Some(SVG_MIME));
        assert_eq!(policy.mime_for("icons.svgz"), Some(SVG_MIME));
    }

    #[test]
    fn files_without_extension_are_rejected() {
        let policy = UploadPolicy::default().with_svg();
        assert_eq!(policy.mime_for("README"), None);
        assert_eq!(policy.mime_for(".svg"), None);
    }

    #[test]
    fn extra_types_normalise_extension() {
        let policy = UploadPolicy::default().allow(".WOFF2", "font/woff2");
        assert_eq!(policy.mime_for("font.woff2"), Some("font/woff2"));
        assert!(policy.extensions().any(|e| e == "woff2"));
    }
}
