//! Stage 2: local images become base64 data URIs.

use std::io;
use std::path::{Path, PathBuf};

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use percent_encoding::percent_decode_str;
use rayon::prelude::*;

use crate::dom::{Document, NodeId};

/// MIME type used when the extension is not recognized.
const FALLBACK_MIME: &str = "image";

/// Windows `ERROR_INVALID_NAME` (bad filename, directory name or volume label
/// syntax).
#[cfg(windows)]
const ERROR_INVALID_NAME: i32 = 123;

/// Outcome counts for one embedding pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EmbedStats {
    /// Images rewritten to data URIs.
    pub embedded: usize,
    /// Remote, already-embedded or empty sources.
    pub skipped: usize,
    /// Local files that could not be read.
    pub failed: usize,
}

/// Replace the `src` of every local `<img>` with a `data:` URI.
///
/// Relative paths resolve against `base_dir`. An unreadable file leaves its
/// image untouched and is logged; it never fails the document. Files are read
/// in parallel and written back in document order.
pub fn embed_images(doc: &mut Document, base_dir: &Path) -> EmbedStats {
    let mut stats = EmbedStats::default();
    let mut jobs: Vec<(NodeId, String)> = Vec::new();

    for img in doc.elements_by_tag(doc.body(), "img") {
        match doc.get_attr(img, "src") {
            Some(src) if is_embeddable(src) => jobs.push((img, src.to_string())),
            _ => stats.skipped += 1,
        }
    }

    let loaded: Vec<(NodeId, Option<String>)> = jobs
        .par_iter()
        .map(|(img, src)| (*img, load_data_uri(src, base_dir)))
        .collect();

    for (img, data_uri) in loaded {
        match data_uri {
            Some(uri) => {
                doc.set_attr(img, "src", uri);
                stats.embedded += 1;
            }
            None => stats.failed += 1,
        }
    }

    tracing::debug!(
        embedded = stats.embedded,
        skipped = stats.skipped,
        failed = stats.failed,
        "Embedded images"
    );
    stats
}

/// Sources that point at a local file.
fn is_embeddable(src: &str) -> bool {
    let src = src.trim();
    !src.is_empty() && !is_remote(src) && !has_scheme_prefix(src, "data:")
}

fn is_remote(src: &str) -> bool {
    has_scheme_prefix(src, "http://") || has_scheme_prefix(src, "https://")
}

fn has_scheme_prefix(src: &str, scheme: &str) -> bool {
    src.get(..scheme.len())
        .is_some_and(|p| p.eq_ignore_ascii_case(scheme))
}

/// Resolve an image `src` to a filesystem path.
pub fn resolve_image_path(src: &str, base_dir: &Path) -> PathBuf {
    let decoded = percent_decode_str(src.trim()).decode_utf8_lossy();
    let path = Path::new(decoded.as_ref());
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base_dir.join(path)
    }
}

/// MIME type for a path by extension, `image` when unknown.
pub fn mime_type_for(path: &Path) -> &'static str {
    mime_guess::from_path(path)
        .first_raw()
        .unwrap_or(FALLBACK_MIME)
}

/// Read a file and encode it as a data URI.
pub fn encode_data_uri(path: &Path) -> io::Result<String> {
    let bytes = std::fs::read(path)?;
    Ok(format!(
        "data:{};base64,{}",
        mime_type_for(path),
        STANDARD.encode(bytes)
    ))
}

fn load_data_uri(src: &str, base_dir: &Path) -> Option<String> {
    let path = resolve_image_path(src, base_dir);
    match encode_data_uri(&path) {
        Ok(uri) => Some(uri),
        Err(e) if is_invalid_host_path(&e) => {
            tracing::debug!(path = %path.display(), "Skipping image with invalid host path");
            None
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "Failed to embed image");
            None
        }
    }
}

/// The host filesystem rejected the path syntax itself.
///
/// Only Windows' `ERROR_INVALID_NAME` is recognized; other platforms have no
/// equivalent and report such paths like any other read failure.
fn is_invalid_host_path(err: &io::Error) -> bool {
    #[cfg(windows)]
    {
        err.raw_os_error() == Some(ERROR_INVALID_NAME)
    }
    #[cfg(not(windows))]
    {
        let _ = err;
        false
    }
}
