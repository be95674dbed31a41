use crate::game::judgment::Quality;
use glam::Vec3;
use serde::Deserialize;

pub const NUM_LANES: usize = 4;
pub const NUM_LAYERS: usize = 3;

// Fixed stage geometry in camera space, meters. Lane maps to x, layer to y;
// the travel axis is z. Tier and axis never feed into these.
pub const LANE_X: [f32; NUM_LANES] = [-0.45, -0.15, 0.15, 0.45];
pub const LAYER_Y: [f32; NUM_LAYERS] = [-0.25, 0.0, 0.25];

pub use crate::core::hands::Hand;

/// Swipe requirement for a note: any sufficiently fast contact, or motion
/// aligned with a specific unit direction.
#[derive(Copy, Clone, Debug, PartialEq, Default, Deserialize)]
pub enum Swipe {
    #[default]
    Any,
    Toward(Vec3),
}

/// Importance class. Weights scoring and visual flair; the judgement
/// geometry is identical across tiers.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Deserialize)]
pub enum Tier {
    #[default]
    Standard,
    Accent,
    Finale,
}

impl Tier {
    #[inline(always)]
    pub fn index(&self) -> usize {
        match self {
            Tier::Standard => 0,
            Tier::Accent => 1,
            Tier::Finale => 2,
        }
    }
}

/// Cosmetic category carried through to presentation. Gameplay never
/// branches on it.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default, Deserialize)]
pub enum Axis {
    #[default]
    Horizontal,
    Vertical,
    Diagonal,
    Radial,
}

/// Tagged resolution state. One-way: a note leaves `Pending` exactly once
/// and never comes back.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
pub enum Resolution {
    #[default]
    Pending,
    Hit { time: f32, quality: Quality },
    Missed,
}

impl Resolution {
    #[inline(always)]
    pub fn is_pending(&self) -> bool {
        matches!(self, Resolution::Pending)
    }
}

/// One falling target. Identity fields are fixed at chart generation; only
/// `resolution` mutates, and only inside the judgement engine.
#[derive(Clone, Debug, Deserialize)]
pub struct Note {
    pub id: u32,
    /// Scheduled arrival instant at the interaction plane, timeline seconds.
    pub time: f32,
    pub lane: u8,
    pub layer: u8,
    pub hand: Hand,
    #[serde(default)]
    pub swipe: Swipe,
    #[serde(default)]
    pub tier: Tier,
    #[serde(default)]
    pub axis: Axis,
    #[serde(skip)]
    pub resolution: Resolution,
}

impl Note {
    /// The two travel-orthogonal coordinates, from the static lane/layer
    /// tables. Callers must have validated lane/layer bounds at load time.
    #[inline(always)]
    pub fn target_xy(&self) -> (f32, f32) {
        (LANE_X[self.lane as usize], LAYER_Y[self.layer as usize])
    }
}
