// Gameplay core for a camera-tracked hand rhythm game: the timeline clock
// view, the hand tracker boundary, spawn scheduling, hit judgement and
// scoring. Rendering, capture/inference and audio playback live in the host.

pub mod config;
pub mod core;
pub mod game;

pub use crate::config::Tuning;
pub use crate::core::clock::Transport;
pub use crate::core::hands::{Hand, HandSample, HandSnapshot, HandTracker};
pub use crate::game::chart::{Chart, ChartError};
pub use crate::game::gate::{Gate, Polarity};
pub use crate::game::judgment::{JudgeEvent, Quality};
pub use crate::game::note::{Axis, Note, Resolution, Swipe, Tier};
pub use crate::game::scoring::{Outcome, ScoreState};
pub use crate::game::session::{Session, SessionSummary};
