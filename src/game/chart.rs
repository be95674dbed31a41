use crate::game::gate::Gate;
use crate::game::note::{NUM_LANES, NUM_LAYERS, Note, Resolution, Swipe};
use log::info;
use rustc_hash::FxHashSet;
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("failed to read chart file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse chart: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("note {id}: lane {lane} out of range (max {})", NUM_LANES - 1)]
    LaneOutOfRange { id: u32, lane: u8 },
    #[error("note {id}: layer {layer} out of range (max {})", NUM_LAYERS - 1)]
    LayerOutOfRange { id: u32, layer: u8 },
    #[error("note {id}: time is not finite")]
    BadTime { id: u32 },
    #[error("note {id}: swipe direction has no usable length")]
    BadSwipe { id: u32 },
    #[error("duplicate note id {id}")]
    DuplicateId { id: u32 },
    #[error("notes are not sorted by time (index {index})")]
    UnsortedNotes { index: usize },
    #[error("gate {index}: time is not finite")]
    BadGateTime { index: usize },
    #[error("gates are not sorted by time (index {index})")]
    UnsortedGates { index: usize },
}

/// A session's full note and gate sequences, each sorted ascending by time.
/// Immutable after generation except for per-note resolution state, which
/// only the judgement engine moves and `reset` clears.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct Chart {
    pub notes: Vec<Note>,
    #[serde(default)]
    pub gates: Vec<Gate>,
}

impl Chart {
    /// Builds a chart from externally generated sequences, validating the
    /// contract the gameplay core relies on and normalizing swipe
    /// directions to unit length.
    pub fn from_parts(notes: Vec<Note>, gates: Vec<Gate>) -> Result<Self, ChartError> {
        let mut chart = Chart { notes, gates };
        chart.validate_and_normalize()?;
        Ok(chart)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ChartError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let chart = Self::from_json(&content)?;
        info!(
            "CHART LOADED: {} ({} notes, {} gates)",
            path.as_ref().display(),
            chart.notes.len(),
            chart.gates.len()
        );
        Ok(chart)
    }

    pub fn from_json(content: &str) -> Result<Self, ChartError> {
        let mut chart: Chart = serde_json::from_str(content)?;
        chart.validate_and_normalize()?;
        Ok(chart)
    }

    fn validate_and_normalize(&mut self) -> Result<(), ChartError> {
        let mut seen = FxHashSet::default();
        let mut prev_time = f32::NEG_INFINITY;
        for (index, note) in self.notes.iter_mut().enumerate() {
            if !note.time.is_finite() {
                return Err(ChartError::BadTime { id: note.id });
            }
            if usize::from(note.lane) >= NUM_LANES {
                return Err(ChartError::LaneOutOfRange { id: note.id, lane: note.lane });
            }
            if usize::from(note.layer) >= NUM_LAYERS {
                return Err(ChartError::LayerOutOfRange { id: note.id, layer: note.layer });
            }
            if !seen.insert(note.id) {
                return Err(ChartError::DuplicateId { id: note.id });
            }
            if let Swipe::Toward(dir) = note.swipe {
                let unit = dir.try_normalize().ok_or(ChartError::BadSwipe { id: note.id })?;
                note.swipe = Swipe::Toward(unit);
            }
            if note.time < prev_time {
                return Err(ChartError::UnsortedNotes { index });
            }
            prev_time = note.time;
        }
        for (index, gate) in self.gates.iter().enumerate() {
            if !gate.time.is_finite() {
                return Err(ChartError::BadGateTime { index });
            }
            if index > 0 && gate.time < self.gates[index - 1].time {
                return Err(ChartError::UnsortedGates { index });
            }
        }
        Ok(())
    }

    /// Returns every note to `Pending` for a fresh run over the same chart.
    /// Notes and gates themselves are not rebuilt.
    pub fn reset(&mut self) {
        for note in &mut self.notes {
            note.resolution = Resolution::Pending;
        }
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }
}
