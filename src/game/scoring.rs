use crate::config::Tuning;
use crate::game::judgment::Quality;
use crate::game::note::Tier;
use log::info;
use rustc_hash::FxHashMap;

/// How a session concluded. Set exactly once.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    Cleared,
    Failed,
}

/// Reactive score/combo/health state. Transitions are driven purely by
/// judgement events and the track-end signal; it keeps no clock of its own.
#[derive(Clone, Debug)]
pub struct ScoreState {
    pub score: u64,
    pub combo: u32,
    pub max_combo: u32,
    pub multiplier: u32,
    pub health: f32,
    pub outcome: Option<Outcome>,
    pub quality_counts: FxHashMap<Quality, u32>,
    pub misses: u32,
}

impl ScoreState {
    pub fn new(tuning: &Tuning) -> Self {
        ScoreState {
            score: 0,
            combo: 0,
            max_combo: 0,
            multiplier: multiplier_for_combo(0, tuning),
            health: tuning.health_start.min(tuning.health_max),
            outcome: None,
            quality_counts: FxHashMap::from_iter([(Quality::Good, 0), (Quality::Weak, 0)]),
            misses: 0,
        }
    }

    pub fn apply_hit(&mut self, tier: Tier, quality: Quality, tuning: &Tuning) {
        if self.outcome.is_some() {
            return;
        }
        self.combo += 1;
        self.max_combo = self.max_combo.max(self.combo);
        self.multiplier = multiplier_for_combo(self.combo, tuning);

        let base = tuning.base_points[tier.index()] as f32;
        let bonus = match quality {
            Quality::Good => tuning.good_quality_bonus,
            Quality::Weak => 0.0,
        };
        let points = (base * (1.0 + bonus) * self.multiplier as f32).round() as u64;
        self.score += points;
        *self.quality_counts.entry(quality).or_insert(0) += 1;

        self.health = (self.health + tuning.health_hit_gain).min(tuning.health_max);
    }

    pub fn apply_miss(&mut self, tuning: &Tuning) {
        if self.outcome.is_some() {
            return;
        }
        self.combo = 0;
        self.multiplier = multiplier_for_combo(0, tuning);
        self.misses += 1;

        self.health = (self.health - tuning.health_miss_loss).max(0.0);
        if self.health <= 0.0 {
            self.outcome = Some(Outcome::Failed);
            info!("SESSION FAILED: score={} max_combo={}", self.score, self.max_combo);
        }
    }

    /// Track end from the timeline clock. A session that already failed
    /// stays failed; otherwise surviving to the end is a clear.
    pub fn on_track_end(&mut self) {
        if self.outcome.is_none() {
            self.outcome = Some(Outcome::Cleared);
            info!(
                "SESSION CLEARED: score={} max_combo={} misses={}",
                self.score, self.max_combo, self.misses
            );
        }
    }

    #[inline(always)]
    pub fn count(&self, quality: Quality) -> u32 {
        self.quality_counts.get(&quality).copied().unwrap_or(0)
    }
}

/// Step function over the configured (threshold, multiplier) tiers: the
/// highest tier whose threshold the combo has reached.
#[inline(always)]
fn multiplier_for_combo(combo: u32, tuning: &Tuning) -> u32 {
    let mut multiplier = 1;
    for &(threshold, value) in &tuning.combo_multiplier_tiers {
        if combo >= threshold {
            multiplier = value;
        }
    }
    multiplier
}
