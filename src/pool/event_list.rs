//! Event lists: the timed hit sound triggers of one map

use serde::{Deserialize, Serialize};

use super::same_file_name;
use crate::error::AnalysisError;

/// Game mode of a map
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum GameMode {
    /// Standard mode
    #[default]
    Standard,
    /// Drum mode
    Taiko,
    /// Catch mode
    Catch,
    /// Key mode; several objects may share one moment in time
    Mania,
}

impl GameMode {
    /// Whether several objects routinely trigger at the same moment
    ///
    /// Usage in such modes is weighted by half so chords do not count as
    /// independent uses.
    pub fn allows_simultaneous_objects(&self) -> bool {
        matches!(self, GameMode::Mania)
    }

    /// Score added to the frequency score for one use
    pub fn use_weight(&self) -> f64 {
        if self.allows_simultaneous_objects() {
            0.5
        } else {
            1.0
        }
    }
}

/// One moment in a map that triggers zero or more effect files
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriggerEvent {
    /// Time in milliseconds
    pub time_ms: f64,
    /// Effect files played at this moment
    pub files: Vec<String>,
}

impl TriggerEvent {
    /// Create an event at `time_ms` playing `files`
    pub fn new<I, S>(time_ms: f64, files: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            time_ms,
            files: files.into_iter().map(Into::into).collect(),
        }
    }

    /// Whether this event plays the given effect file
    pub fn references(&self, file_name: &str) -> bool {
        self.files.iter().any(|f| same_file_name(f, file_name))
    }
}

/// The ordered trigger events of one map sharing the pool
///
/// Deserialization goes through [`EventList::new`], so a list read from JSON
/// is validated the same way as one built in code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawEventList")]
pub struct EventList {
    name: String,
    mode: GameMode,
    active_duration_ms: f64,
    events: Vec<TriggerEvent>,
}

/// Unvalidated form of [`EventList`] as it appears on the wire
#[derive(Deserialize)]
struct RawEventList {
    name: String,
    #[serde(default)]
    mode: GameMode,
    active_duration_ms: f64,
    #[serde(default)]
    events: Vec<TriggerEvent>,
}

impl TryFrom<RawEventList> for EventList {
    type Error = AnalysisError;

    fn try_from(raw: RawEventList) -> Result<Self, Self::Error> {
        EventList::new(raw.name, raw.mode, raw.active_duration_ms, raw.events)
    }
}

impl EventList {
    /// Create an event list
    ///
    /// # Arguments
    ///
    /// * `name` - Label used in reports, e.g. the difficulty name
    /// * `mode` - Game mode of the map
    /// * `active_duration_ms` - Drain time of the map
    /// * `events` - Trigger events in playback order
    ///
    /// # Errors
    ///
    /// Returns `AnalysisError::InvalidInput` if event times decrease, the
    /// duration is negative, or any time is not a finite number
    pub fn new(
        name: impl Into<String>,
        mode: GameMode,
        active_duration_ms: f64,
        events: Vec<TriggerEvent>,
    ) -> Result<Self, AnalysisError> {
        let name = name.into();

        if !(active_duration_ms.is_finite() && active_duration_ms >= 0.0) {
            return Err(AnalysisError::InvalidInput(format!(
                "{}: active duration must be finite and non-negative, got {}",
                name, active_duration_ms
            )));
        }

        if let Some(event) = events.iter().find(|e| !e.time_ms.is_finite()) {
            return Err(AnalysisError::InvalidInput(format!(
                "{}: event time {} is not finite",
                name, event.time_ms
            )));
        }

        if let Some(w) = events.windows(2).find(|w| w[1].time_ms < w[0].time_ms) {
            return Err(AnalysisError::InvalidInput(format!(
                "{}: event at {} ms follows event at {} ms",
                name, w[1].time_ms, w[0].time_ms
            )));
        }

        Ok(Self {
            name,
            mode,
            active_duration_ms,
            events,
        })
    }

    /// Label of the list
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Game mode of the list
    pub fn mode(&self) -> GameMode {
        self.mode
    }

    /// Drain time in milliseconds
    pub fn active_duration_ms(&self) -> f64 {
        self.active_duration_ms
    }

    /// Trigger events in playback order
    pub fn events(&self) -> &[TriggerEvent] {
        &self.events
    }
}
