//! Path containment checks for file-writing operations.
//!
//! Resolution is purely lexical: the target does not have to exist yet, so
//! `.` and `..` are folded without touching the filesystem. A result is
//! accepted only when it is the root itself or lies beneath it.

use std::io;
use std::path::{Component, Path, PathBuf};

use thiserror::Error;

use crate::filesystem::FileSystem;

/// Errors from path resolution.
#[derive(Error, Debug)]
pub enum PathGuardError {
    #[error("path traversal blocked: '{path}' resolves outside {}", .root.display())]
    PathTraversal { path: String, root: PathBuf },

    #[error("invalid root directory {}: {source}", .root.display())]
    InvalidRoot { root: PathBuf, source: io::Error },
}

/// Resolve `target` against `root`, rejecting anything that escapes it.
///
/// Backslashes in `target` are treated as separators. An absolute `target`
/// replaces the root before the containment check, as [`Path::join`] does.
pub fn resolve_under_root(root: &Path, target: &str) -> Result<PathBuf, PathGuardError> {
    let root = absolute_root(root)?;
    let resolved = normalize(&root.join(target.replace('\\', "/")));

    if resolved.starts_with(&root) {
        Ok(resolved)
    } else {
        Err(PathGuardError::PathTraversal {
            path: target.to_string(),
            root,
        })
    }
}

/// Non-failing variant of [`resolve_under_root`].
pub fn is_path_inside_root(root: &Path, target: &str) -> bool {
    resolve_under_root(root, target).is_ok()
}

/// Create `dir` and any missing parents. Existing directories are fine.
pub async fn ensure_dir(fs: &dyn FileSystem, dir: &Path) -> io::Result<()> {
    fs.create_dir_all(dir).await
}

/// Make `root` absolute (relative roots hang off the working directory) and
/// fold its dot segments.
fn absolute_root(root: &Path) -> Result<PathBuf, PathGuardError> {
    std::path::absolute(root)
        .map(|p| normalize(&p))
        .map_err(|source| PathGuardError::InvalidRoot {
            root: root.to_path_buf(),
            source,
        })
}

/// Lexically fold `.` and `..` components. `..` at the filesystem root
/// stays at the root.
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => out.push(component.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            Component::Normal(part) => out.push(part),
        }
    }
    out
}
