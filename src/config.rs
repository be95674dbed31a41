use log::info;
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

// --- Reference tuning ---
// Distances are meters in camera space, times are seconds on the song
// timeline. These are the shipped defaults; hosts may override any of them
// through a tuning file.

pub const SPAWN_DISTANCE_M: f32 = 6.0;
pub const TRAVEL_SPEED_MPS: f32 = 2.0;
pub const INTERACTION_PLANE_Z: f32 = 0.0;

// Hit window straddles the interaction plane, asymmetric on purpose: early
// reach-through is more forgiving than a late catch.
pub const HIT_WINDOW_BEFORE_M: f32 = 0.45;
pub const HIT_WINDOW_AFTER_M: f32 = 0.30;
pub const MISS_BEYOND_M: f32 = 0.60;

pub const HIT_RADIUS_M: f32 = 0.28;
pub const MIN_HIT_SPEED_MPS: f32 = 1.5;
pub const MIN_SWIPE_ALIGNMENT: f32 = 0.65;
pub const MAX_SAMPLE_AGE_S: f32 = 0.25;

pub const GOOD_QUALITY_BONUS: f32 = 0.5;
pub const COMBO_MULTIPLIER_TIERS: [(u32, u32); 4] = [(0, 1), (11, 2), (21, 4), (31, 8)];

pub const HEALTH_MAX: f32 = 100.0;
pub const HEALTH_START: f32 = 100.0;
pub const HEALTH_HIT_GAIN: f32 = 2.0;
pub const HEALTH_MISS_LOSS: f32 = 10.0;

pub const GATE_AHEAD_S: f32 = 2.5;
pub const GATE_BEHIND_S: f32 = 1.0;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read tuning file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse tuning file: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("travel_speed must be positive, got {0}")]
    NonPositiveTravelSpeed(f32),
    #[error("spawn_distance must be positive, got {0}")]
    NonPositiveSpawnDistance(f32),
}

/// Gameplay tuning. Everything the spawn, judgement, scoring and gate paths
/// branch on numerically lives here; structural facts (lane/layer counts and
/// their coordinates) stay as constants in `game::note`.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Travel-axis distance from the spawn plane to the interaction plane.
    pub spawn_distance: f32,
    /// Speed at which notes approach the player along the travel axis.
    pub travel_speed: f32,
    /// Travel-axis coordinate of the interaction plane.
    pub interaction_plane: f32,

    /// Hittable interval before the plane (toward spawn).
    pub hit_window_before: f32,
    /// Hittable interval past the plane (toward the player).
    pub hit_window_after: f32,
    /// A note this far past the plane expires to a miss.
    pub miss_beyond: f32,

    /// Hand-to-target distance within which a note can resolve.
    pub hit_radius: f32,
    /// Minimum hand speed for a Good-quality hit.
    pub min_hit_speed: f32,
    /// Minimum dot product between normalized hand velocity and a required
    /// swipe direction for a Good-quality hit.
    pub min_swipe_alignment: f32,
    /// Hand snapshots older than this are treated as no detection.
    pub max_sample_age: f32,

    /// Base score per note, indexed by tier (Standard, Accent, Finale).
    pub base_points: [u32; 3],
    /// Score factor added on top of base for Good-quality hits.
    pub good_quality_bonus: f32,
    /// (combo threshold, multiplier) steps, ascending by threshold.
    pub combo_multiplier_tiers: [(u32, u32); 4],

    pub health_max: f32,
    pub health_start: f32,
    pub health_hit_gain: f32,
    pub health_miss_loss: f32,

    /// A gate becomes visible this long before its timestamp.
    pub gate_ahead: f32,
    /// A gate stays visible this long after its timestamp.
    pub gate_behind: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Tuning {
            spawn_distance: SPAWN_DISTANCE_M,
            travel_speed: TRAVEL_SPEED_MPS,
            interaction_plane: INTERACTION_PLANE_Z,
            hit_window_before: HIT_WINDOW_BEFORE_M,
            hit_window_after: HIT_WINDOW_AFTER_M,
            miss_beyond: MISS_BEYOND_M,
            hit_radius: HIT_RADIUS_M,
            min_hit_speed: MIN_HIT_SPEED_MPS,
            min_swipe_alignment: MIN_SWIPE_ALIGNMENT,
            max_sample_age: MAX_SAMPLE_AGE_S,
            base_points: [100, 150, 250],
            good_quality_bonus: GOOD_QUALITY_BONUS,
            combo_multiplier_tiers: COMBO_MULTIPLIER_TIERS,
            health_max: HEALTH_MAX,
            health_start: HEALTH_START,
            health_hit_gain: HEALTH_HIT_GAIN,
            health_miss_loss: HEALTH_MISS_LOSS,
            gate_ahead: GATE_AHEAD_S,
            gate_behind: GATE_BEHIND_S,
        }
    }
}

impl Tuning {
    /// Seconds before its arrival instant at which a note spawns: the time
    /// it needs to cover the spawn distance at travel speed.
    #[inline(always)]
    pub fn lookahead(&self) -> f32 {
        self.spawn_distance / self.travel_speed
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let tuning: Tuning = serde_json::from_str(&content)?;
        tuning.validate()?;
        info!(
            "TUNING LOADED: {} (lookahead={:.3}s)",
            path.as_ref().display(),
            tuning.lookahead()
        );
        Ok(tuning)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.travel_speed > 0.0) {
            return Err(ConfigError::NonPositiveTravelSpeed(self.travel_speed));
        }
        if !(self.spawn_distance > 0.0) {
            return Err(ConfigError::NonPositiveSpawnDistance(self.spawn_distance));
        }
        Ok(())
    }
}
