use glam::Vec3;
use serde::Deserialize;

/// Which physical hand a sample or note refers to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Deserialize)]
pub enum Hand {
    Left,
    Right,
}

/// One hand for one camera frame: where it is (if detected at all) and how
/// fast it is moving. Velocity is a finite difference over consecutive
/// detections; the first frame of a detection carries zero velocity.
#[derive(Copy, Clone, Debug, Default)]
pub struct HandSample {
    pub position: Option<Vec3>,
    pub velocity: Vec3,
}

impl HandSample {
    #[inline(always)]
    pub fn speed(&self) -> f32 {
        self.velocity.length()
    }
}

/// Both hands as of the most recent camera frame, stamped with the timeline
/// instant the frame was captured at so consumers can detect staleness
/// instead of trusting every tick's sample as fresh.
#[derive(Copy, Clone, Debug, Default)]
pub struct HandSnapshot {
    pub left: HandSample,
    pub right: HandSample,
    pub captured_at: f32,
}

impl HandSnapshot {
    #[inline(always)]
    pub fn sample(&self, hand: Hand) -> &HandSample {
        match hand {
            Hand::Left => &self.left,
            Hand::Right => &self.right,
        }
    }

    /// Seconds since this snapshot's frame was captured, never negative.
    #[inline(always)]
    pub fn age(&self, now: f32) -> f32 {
        (now - self.captured_at).max(0.0)
    }
}

/// Adapter over the external landmark-inference pipeline. The sensing side
/// pushes raw per-frame positions at its own cadence; the tick thread reads
/// the latest snapshot. Velocity derivation lives here, not in judgement.
#[derive(Clone, Debug, Default)]
pub struct HandTracker {
    latest: HandSnapshot,
}

impl HandTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ingest one camera frame. `captured_at` is the timeline instant the
    /// frame corresponds to; frames arriving out of order are dropped.
    pub fn push_frame(&mut self, left: Option<Vec3>, right: Option<Vec3>, captured_at: f32) {
        if !captured_at.is_finite() {
            return;
        }
        let dt = captured_at - self.latest.captured_at;
        if dt < 0.0 {
            return;
        }
        self.latest = HandSnapshot {
            left: advance_sample(&self.latest.left, left, dt),
            right: advance_sample(&self.latest.right, right, dt),
            captured_at,
        };
    }

    #[inline(always)]
    pub fn latest(&self) -> HandSnapshot {
        self.latest
    }

    pub fn reset(&mut self) {
        self.latest = HandSnapshot::default();
    }
}

#[inline(always)]
fn advance_sample(prev: &HandSample, position: Option<Vec3>, dt: f32) -> HandSample {
    let velocity = match (prev.position, position) {
        (Some(a), Some(b)) if dt > f32::EPSILON => (b - a) / dt,
        _ => Vec3::ZERO,
    };
    HandSample { position, velocity }
}

#[cfg(test)]
mod tests {
    use super::{Hand, HandTracker};
    use glam::Vec3;

    #[test]
    fn first_detection_has_zero_velocity() {
        let mut tracker = HandTracker::new();
        tracker.push_frame(Some(Vec3::new(0.1, 0.2, 0.0)), None, 1.0);
        let snap = tracker.latest();
        assert_eq!(snap.left.velocity, Vec3::ZERO);
        assert_eq!(snap.right.position, None);
    }

    #[test]
    fn velocity_is_finite_difference() {
        let mut tracker = HandTracker::new();
        tracker.push_frame(Some(Vec3::ZERO), None, 1.0);
        tracker.push_frame(Some(Vec3::new(0.2, 0.0, 0.0)), None, 1.1);
        let v = tracker.latest().left.velocity;
        assert!(
            (v.x - 2.0).abs() < 1e-4 && v.y.abs() < 1e-6,
            "0.2m over 0.1s should read as 2 m/s, got {v:?}"
        );
    }

    #[test]
    fn losing_a_hand_zeroes_velocity() {
        let mut tracker = HandTracker::new();
        tracker.push_frame(Some(Vec3::ZERO), None, 1.0);
        tracker.push_frame(Some(Vec3::ONE), None, 1.1);
        tracker.push_frame(None, None, 1.2);
        let snap = tracker.latest();
        assert_eq!(snap.left.position, None);
        assert_eq!(snap.left.velocity, Vec3::ZERO);
    }

    #[test]
    fn out_of_order_frames_are_dropped() {
        let mut tracker = HandTracker::new();
        tracker.push_frame(Some(Vec3::ONE), None, 2.0);
        tracker.push_frame(Some(Vec3::ZERO), None, 1.5);
        assert_eq!(tracker.latest().captured_at, 2.0);
        assert_eq!(tracker.latest().left.position, Some(Vec3::ONE));
    }

    #[test]
    fn snapshot_age_tracks_now() {
        let mut tracker = HandTracker::new();
        tracker.push_frame(Some(Vec3::ZERO), Some(Vec3::ZERO), 3.0);
        let snap = tracker.latest();
        assert!((snap.age(3.25) - 0.25).abs() < 1e-6);
        assert_eq!(snap.age(2.0), 0.0, "age is clamped at zero");
        assert!(snap.sample(Hand::Right).position.is_some());
    }
}
