use std::path::{Component, Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("path traversal is not allowed")]
    PathTraversal,
    #[error("asset not found")]
    NotFound,
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Map a request path onto a file under `root`.
///
/// Directories resolve to their `index.html`, and extensionless page paths
/// fall back to `<path>.html` (the layout of a statically exported site).
pub fn resolve_asset(root: &Path, request_path: &str) -> Result<PathBuf, AssetError> {
    let relative = request_path.trim_start_matches('/');
    if relative.contains('\0') || relative.contains('\\') {
        return Err(AssetError::PathTraversal);
    }
    let relative = Path::new(relative);
    if relative
        .components()
        .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir))
    {
        return Err(AssetError::PathTraversal);
    }

    let canonical_root = root.canonicalize()?;
    let mut candidates = vec![root.join(relative)];
    if relative.extension().is_none() && !relative.as_os_str().is_empty() {
        candidates.push(root.join(relative).with_extension("html"));
    }

    for candidate in candidates {
        let candidate = if candidate.is_dir() {
            candidate.join("index.html")
        } else {
            candidate
        };
        let Ok(canonical) = candidate.canonicalize() else {
            continue;
        };
        // Symlinks may still point outside the root.
        if !canonical.starts_with(&canonical_root) {
            return Err(AssetError::PathTraversal);
        }
        if canonical.is_file() {
            return Ok(canonical);
        }
    }
    Err(AssetError::NotFound)
}
