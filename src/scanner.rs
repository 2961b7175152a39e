//! Deterministic directory tree scanner
//!
//! Walks a root directory depth-first and yields one [`DirListing`] per
//! directory. Entries are sorted lexicographically at every level so the
//! walk order - and therefore the generated plan - is stable across
//! platforms and file systems. A missing root yields an empty sequence:
//! callers treat absent optional roots (e.g. a repository without an `apps`
//! folder) as "nothing to deploy here". Unreadable directories are
//! propagated as errors, never swallowed.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::SnowplanResult;

/// One visited directory and the names of its plain files, sorted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirListing {
    /// Absolute (root-joined) path of the directory
    pub dir: PathBuf,
    /// File names within the directory, lexicographic order
    pub files: Vec<String>,
}

/// Scan a directory tree, depth-first, visiting every directory exactly once.
///
/// The returned iterator is lazy; calling `scan` again restarts the walk
/// from scratch. Hidden directories (leading `.`) and symlinked directories
/// are not descended into.
pub fn scan(root: &Path) -> Scan {
    let stack = if root.is_dir() {
        vec![root.to_path_buf()]
    } else {
        Vec::new()
    };
    Scan { stack }
}

/// Lazy depth-first walk over a directory tree. Created by [`scan`].
pub struct Scan {
    stack: Vec<PathBuf>,
}

impl Iterator for Scan {
    type Item = SnowplanResult<DirListing>;

    fn next(&mut self) -> Option<Self::Item> {
        let dir = self.stack.pop()?;
        match read_listing(&dir) {
            Ok((subdirs, files)) => {
                // Reverse push so the lexicographically first child pops next
                for sub in subdirs.into_iter().rev() {
                    self.stack.push(sub);
                }
                Some(Ok(DirListing { dir, files }))
            }
            Err(e) => Some(Err(e)),
        }
    }
}

fn read_listing(dir: &Path) -> SnowplanResult<(Vec<PathBuf>, Vec<String>)> {
    let mut subdirs = Vec::new();
    let mut files = Vec::new();

    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let name = match entry.file_name().into_string() {
            Ok(name) => name,
            // Non-UTF-8 names cannot become platform identifiers; skip them
            Err(_) => continue,
        };

        // DirEntry::file_type does not follow symlinks
        let file_type = entry.file_type()?;
        if file_type.is_dir() {
            if !name.starts_with('.') {
                subdirs.push(entry.path());
            }
        } else if file_type.is_file() {
            files.push(name);
        }
    }

    subdirs.sort();
    files.sort();
    Ok((subdirs, files))
}
