//! Filesystem-backed map pool

use std::ffi::OsStr;
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

use super::{EventList, MapPool};
use crate::error::AnalysisError;

/// A song folder on disk together with the event lists of its maps
#[derive(Debug, Clone)]
pub struct SongFolder {
    root: PathBuf,
    event_lists: Vec<EventList>,
}

impl SongFolder {
    /// Create a pool rooted at `root`
    pub fn new(root: impl Into<PathBuf>, event_lists: Vec<EventList>) -> Self {
        Self {
            root: root.into(),
            event_lists,
        }
    }

    /// Folder the assets are resolved against
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl MapPool for SongFolder {
    /// Resolve `file_name` inside the song folder
    ///
    /// An exact match wins. Otherwise the containing directory is searched
    /// case-insensitively: by full name when `file_name` has an extension, by
    /// stem when it does not. Candidates are sorted so the result does not
    /// depend on directory iteration order. Absolute names and names with a
    /// `..` component are rejected.
    fn resolve(&self, file_name: &str) -> Result<PathBuf, AnalysisError> {
        let relative = Path::new(file_name);
        if leaves_folder(relative) {
            log::warn!("Refusing to resolve {} outside the song folder", file_name);
            return Err(AnalysisError::NotFound(format!(
                "{} leaves the song folder",
                file_name
            )));
        }

        let direct = self.root.join(relative);
        if direct.is_file() {
            return Ok(direct);
        }

        let dir = match relative.parent() {
            Some(parent) => self.root.join(parent),
            None => self.root.clone(),
        };
        let wanted = relative
            .file_name()
            .and_then(OsStr::to_str)
            .unwrap_or(file_name);
        let by_stem = relative.extension().is_none();

        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(AnalysisError::NotFound(format!(
                    "{} does not exist",
                    dir.display()
                )))
            }
            Err(e) => return Err(e.into()),
        };

        let mut candidates: Vec<PathBuf> = entries
            .filter_map(Result::ok)
            .map(|entry| entry.path())
            .filter(|path| path.is_file())
            .filter(|path| {
                let part = if by_stem {
                    path.file_stem()
                } else {
                    path.file_name()
                };
                part.and_then(OsStr::to_str)
                    .is_some_and(|name| name.eq_ignore_ascii_case(wanted))
            })
            .collect();
        candidates.sort();

        log::debug!(
            "Resolved {} to {} candidate(s) in {}",
            file_name,
            candidates.len(),
            dir.display()
        );

        candidates.into_iter().next().ok_or_else(|| {
            AnalysisError::NotFound(format!(
                "{} is missing from {}",
                file_name,
                self.root.display()
            ))
        })
    }

    fn event_lists(&self) -> &[EventList] {
        &self.event_lists
    }
}

fn leaves_folder(relative: &Path) -> bool {
    relative.components().any(|c| {
        matches!(
            c,
            Component::RootDir | Component::Prefix(_) | Component::ParentDir
        )
    })
}
