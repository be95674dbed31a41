use crate::config::Tuning;
use serde::Deserialize;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default, Deserialize)]
pub enum Polarity {
    Positive,
    Negative,
    #[default]
    Neutral,
}

/// A narrative marker on the timeline. Purely presentational: no resolution
/// state, no interaction with hands.
#[derive(Clone, Debug, Deserialize)]
pub struct Gate {
    pub time: f32,
    pub title: String,
    #[serde(default)]
    pub detail: String,
    #[serde(default)]
    pub polarity: Polarity,
}

#[inline(always)]
pub fn gate_is_visible(gate: &Gate, now: f32, tuning: &Tuning) -> bool {
    now >= gate.time - tuning.gate_ahead && now <= gate.time + tuning.gate_behind
}

/// Pure window filter over the gate list. No state is kept anywhere; the
/// visible set is recomputed from `now` alone every tick.
pub fn visible_gates<'a>(
    gates: &'a [Gate],
    now: f32,
    tuning: &'a Tuning,
) -> impl Iterator<Item = &'a Gate> {
    gates
        .iter()
        .filter(move |gate| gate_is_visible(gate, now, tuning))
}
