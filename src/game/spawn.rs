use crate::game::note::Note;
use log::debug;
use smallvec::SmallVec;

/// Indices into the chart's note list that are currently live. Insertion
/// order is ascending spawn time, which is also the judgement scan order.
pub type ActiveSet = SmallVec<[usize; 16]>;

/// Monotonic read cursor over the time-sorted chart. Each note index is
/// promoted to the active set at most once; the cursor never moves
/// backward, so a paused-then-resumed `now` re-promotes nothing.
#[derive(Clone, Debug, Default)]
pub struct SpawnScheduler {
    cursor: usize,
}

impl SpawnScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        self.cursor = 0;
    }

    #[inline(always)]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Promotes every not-yet-visited note whose arrival falls inside the
    /// lookahead window, i.e. `note.time - lookahead <= now`.
    pub fn update(&mut self, notes: &[Note], now: f32, lookahead: f32, active: &mut ActiveSet) {
        while self.cursor < notes.len() {
            let note = &notes[self.cursor];
            if note.time - lookahead > now {
                break;
            }
            debug!(
                "SPAWN: id={} t={:.3}s lane={} layer={} (now={now:.3}s)",
                note.id, note.time, note.lane, note.layer
            );
            active.push(self.cursor);
            self.cursor += 1;
        }
    }
}
