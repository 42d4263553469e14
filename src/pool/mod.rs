//! The map pool: event lists that share one folder of audio assets
//!
//! Parsing map files is not part of this crate; callers build
//! [`EventList`]s and hand them to a [`MapPool`] implementation such as
//! [`SongFolder`].

pub mod event_list;
pub mod song_folder;

use std::path::{Path, PathBuf};

pub use event_list::{EventList, GameMode, TriggerEvent};
pub use song_folder::SongFolder;

use crate::error::AnalysisError;

/// A set of maps sharing one audio pool
pub trait MapPool {
    /// Locate an audio asset by file name, tolerating a missing extension
    ///
    /// # Errors
    ///
    /// `AnalysisError::NotFound` if no matching file exists
    fn resolve(&self, file_name: &str) -> Result<PathBuf, AnalysisError>;

    /// The event lists of every map in the pool, in a fixed order
    fn event_lists(&self) -> &[EventList];

    /// Every effect file referenced by any event list, in first-seen order
    ///
    /// Names with different extensions stay distinct. An extensionless name
    /// is replaced in place by the first matching name that has one, so
    /// `clap` followed by `clap.wav` and `clap.ogg` yields both files.
    fn referenced_effect_files(&self) -> Vec<String> {
        let mut files: Vec<String> = Vec::new();
        for event in self.event_lists().iter().flat_map(|list| list.events()) {
            for file in &event.files {
                match files.iter().position(|f| same_file_name(f, file)) {
                    Some(pos) if has_extension(file) && !has_extension(&files[pos]) => {
                        files[pos] = file.clone();
                    }
                    Some(_) => {}
                    None => files.push(file.clone()),
                }
            }
        }
        files
    }
}

/// Whether two effect file identifiers name the same file
///
/// Comparison is case-insensitive. If either side lacks an extension only
/// the stems are compared.
pub fn same_file_name(a: &str, b: &str) -> bool {
    if a.eq_ignore_ascii_case(b) {
        return true;
    }

    let (a, b) = (Path::new(a), Path::new(b));
    if a.extension().is_some() && b.extension().is_some() {
        return false;
    }

    let stem = |p: &Path| p.with_extension("").to_string_lossy().to_ascii_lowercase();
    stem(a) == stem(b)
}

fn has_extension(name: &str) -> bool {
    Path::new(name).extension().is_some()
}
