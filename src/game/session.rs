use crate::config::Tuning;
use crate::core::clock::Transport;
use crate::core::hands::HandSnapshot;
use crate::game::chart::Chart;
use crate::game::gate::{Gate, visible_gates};
use crate::game::judgment::{JudgeEvent, Quality, judge_tick, target_point, travel_position};
use crate::game::note::Note;
use crate::game::scoring::{Outcome, ScoreState};
use crate::game::spawn::{ActiveSet, SpawnScheduler};
use glam::Vec3;
use log::info;

/// A live note plus its computed position, for the presentation layer.
#[derive(Copy, Clone, Debug)]
pub struct LiveNote<'a> {
    pub note: &'a Note,
    pub position: Vec3,
}

/// A visible gate plus its computed travel position. Gates ride the same
/// travel axis as notes but have no lane/layer of their own.
#[derive(Copy, Clone, Debug)]
pub struct VisibleGate<'a> {
    pub gate: &'a Gate,
    pub position: Vec3,
}

/// Post-session report. The chart itself also survives the session for
/// per-note inspection; this is the condensed version.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionSummary {
    pub score: u64,
    pub max_combo: u32,
    pub good: u32,
    pub weak: u32,
    pub misses: u32,
    pub total_notes: usize,
    pub outcome: Option<Outcome>,
}

/// One play-through of one chart: owns the chart, the spawn cursor, the
/// active set and the score state, and advances them all from a single
/// `tick` per rendered frame. All decisions key off the transport's `now`,
/// never off wall-clock or frame count, so a frozen transport is a pause.
pub struct Session {
    chart: Chart,
    tuning: Tuning,
    scheduler: SpawnScheduler,
    active: ActiveSet,
    score: ScoreState,
    events: Vec<JudgeEvent>,
    now: Option<f32>,
}

impl Session {
    pub fn new(chart: Chart, tuning: Tuning) -> Self {
        info!(
            "SESSION START: {} notes, {} gates, lookahead={:.3}s",
            chart.notes.len(),
            chart.gates.len(),
            tuning.lookahead()
        );
        let score = ScoreState::new(&tuning);
        Session {
            chart,
            tuning,
            scheduler: SpawnScheduler::new(),
            active: ActiveSet::new(),
            score,
            events: Vec::new(),
            now: None,
        }
    }

    /// Runs one gameplay tick: spawn promotion, judgement, then scoring.
    /// Returns the judgement events emitted this tick. No-ops before the
    /// transport has started and after the session has an outcome.
    pub fn tick(&mut self, transport: &Transport, snapshot: &HandSnapshot) -> &[JudgeEvent] {
        self.events.clear();
        if self.score.outcome.is_some() {
            return &self.events;
        }
        let Some(now) = transport.now() else {
            return &self.events;
        };
        self.now = Some(now);

        self.scheduler
            .update(&self.chart.notes, now, self.tuning.lookahead(), &mut self.active);
        judge_tick(
            &mut self.chart.notes,
            &mut self.active,
            now,
            snapshot,
            &self.tuning,
            &mut self.events,
        );
        for event in &self.events {
            match *event {
                JudgeEvent::Hit { note, quality, .. } => {
                    self.score
                        .apply_hit(self.chart.notes[note].tier, quality, &self.tuning);
                }
                JudgeEvent::Miss { .. } => self.score.apply_miss(&self.tuning),
            }
        }

        if transport.ended() {
            self.score.on_track_end();
        }
        // An ended session keeps its chart for reporting but judges nothing
        // further; dropping the active set enforces that.
        if self.score.outcome.is_some() {
            self.active.clear();
        }
        &self.events
    }

    /// Resets the same chart for a fresh run: all notes back to pending,
    /// cursor and score rewound. The note/gate sequences are not rebuilt.
    pub fn restart(&mut self) {
        info!("SESSION RESTART");
        self.chart.reset();
        self.scheduler.reset();
        self.active.clear();
        self.score = ScoreState::new(&self.tuning);
        self.events.clear();
        self.now = None;
    }

    // --- Read-only view for the presentation layer ---

    #[inline(always)]
    pub fn score(&self) -> &ScoreState {
        &self.score
    }

    #[inline(always)]
    pub fn chart(&self) -> &Chart {
        &self.chart
    }

    #[inline(always)]
    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    /// Timeline instant of the most recent tick, if any tick has run.
    #[inline(always)]
    pub fn now(&self) -> Option<f32> {
        self.now
    }

    /// Every live note with its position at the last tick's `now`.
    pub fn live_notes(&self) -> impl Iterator<Item = LiveNote<'_>> {
        let now = self.now;
        self.active.iter().filter_map(move |&index| {
            let now = now?;
            let note = &self.chart.notes[index];
            Some(LiveNote { note, position: target_point(note, now, &self.tuning) })
        })
    }

    /// Every gate inside its visibility window at the last tick's `now`,
    /// with its travel position.
    pub fn visible_gates(&self) -> impl Iterator<Item = VisibleGate<'_>> {
        self.now
            .map(|now| {
                visible_gates(&self.chart.gates, now, &self.tuning).map(move |gate| VisibleGate {
                    gate,
                    position: Vec3::new(0.0, 0.0, travel_position(gate.time, now, &self.tuning)),
                })
            })
            .into_iter()
            .flatten()
    }

    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            score: self.score.score,
            max_combo: self.score.max_combo,
            good: self.score.count(Quality::Good),
            weak: self.score.count(Quality::Weak),
            misses: self.score.misses,
            total_notes: self.chart.notes.len(),
            outcome: self.score.outcome,
        }
    }
}
