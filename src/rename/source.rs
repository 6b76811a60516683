//! Selecting the paths a batch operates on

use std::io::BufRead;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use super::error::RenameError;

/// Where input paths come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSource {
    /// Explicit arguments; `-` reads one path per line from stdin
    Files(Vec<String>),
    /// Paths matching a glob expression
    Glob(String),
    /// Every entry below a directory
    Walk(PathBuf),
}

impl PathSource {
    /// Explicit files win over a glob, which wins over walking `walk_root`
    pub fn select(files: Vec<String>, glob: Option<String>, walk_root: PathBuf) -> Self {
        if !files.is_empty() {
            PathSource::Files(files)
        } else if let Some(expr) = glob {
            PathSource::Glob(expr)
        } else {
            PathSource::Walk(walk_root)
        }
    }

    /// Produce the ordered list of paths. `stdin` is read only for `-`.
    pub fn collect_paths<R: BufRead>(&self, mut stdin: R) -> Result<Vec<PathBuf>, RenameError> {
        match self {
            PathSource::Files(files) => {
                let mut paths = Vec::new();
                for file in files {
                    if file == "-" {
                        for line in stdin.by_ref().lines() {
                            let line = line?;
                            let line = line.trim();
                            if !line.is_empty() {
                                paths.push(PathBuf::from(line));
                            }
                        }
                    } else {
                        paths.push(PathBuf::from(file));
                    }
                }
                Ok(paths)
            }
            PathSource::Glob(expr) => {
                let mut paths = Vec::new();
                for entry in glob::glob(expr)? {
                    paths.push(entry.map_err(|e| RenameError::Io(e.into_error()))?);
                }
                Ok(paths)
            }
            PathSource::Walk(root) => walk_tree(root),
        }
    }
}

/// Entries below `root`, children before their directory so a renamed
/// directory never invalidates a path still waiting to be processed
fn walk_tree(root: &Path) -> Result<Vec<PathBuf>, RenameError> {
    let mut paths = Vec::new();
    for entry in WalkDir::new(root)
        .min_depth(1)
        .contents_first(true)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|source| RenameError::Walk {
            path: source
                .path()
                .map(|p| p.to_path_buf())
                .unwrap_or_else(|| root.to_path_buf()),
            source,
        })?;
        paths.push(entry.into_path());
    }
    Ok(paths)
}
