use crate::config::Tuning;
use crate::core::hands::HandSnapshot;
use crate::game::note::{Note, Resolution, Swipe};
use crate::game::spawn::ActiveSet;
use glam::Vec3;
use log::info;

/// Hit classification. Both qualities count as a hit; quality only scales
/// score. Distance failure or an absent hand is what keeps a note pending.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Quality {
    Weak,
    Good,
}

/// Discrete judgement output of one tick, consumed by scoring and the
/// presentation layer. `note` indexes the session chart's note list.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum JudgeEvent {
    Hit { note: usize, quality: Quality, error_ms: f32 },
    Miss { note: usize },
}

/// Travel-axis position of a note at `now`. Pure: reproducible from the
/// scheduled time, `now` and static tuning alone.
#[inline(always)]
pub fn travel_position(note_time: f32, now: f32, tuning: &Tuning) -> f32 {
    tuning.interaction_plane - (note_time - now) * tuning.travel_speed
}

/// The note's full 3D target point at `now`: static lane/layer coordinates
/// plus the computed travel position.
#[inline(always)]
pub fn target_point(note: &Note, now: f32, tuning: &Tuning) -> Vec3 {
    let (x, y) = note.target_xy();
    Vec3::new(x, y, travel_position(note.time, now, tuning))
}

#[inline(always)]
fn classify_quality(velocity: Vec3, swipe: Swipe, tuning: &Tuning) -> Quality {
    let speed = velocity.length();
    if speed < tuning.min_hit_speed {
        return Quality::Weak;
    }
    match swipe {
        Swipe::Any => Quality::Good,
        Swipe::Toward(dir) => {
            if (velocity / speed).dot(dir) >= tuning.min_swipe_alignment {
                Quality::Good
            } else {
                Quality::Weak
            }
        }
    }
}

/// Resolves every live pending note for this tick. Scan order is the active
/// set's insertion order (ascending spawn time); when several notes qualify
/// for the same hand in one frame, each resolves independently in that
/// order. Per note, in priority order: expiry past the miss threshold,
/// hit-window gate around the plane, spatial test against the assigned
/// hand, then quality classification.
pub fn judge_tick(
    notes: &mut [Note],
    active: &mut ActiveSet,
    now: f32,
    snapshot: &HandSnapshot,
    tuning: &Tuning,
    events: &mut Vec<JudgeEvent>,
) {
    // A snapshot older than the configured budget means the sensing pipeline
    // stalled; its positions are no longer where the hands are.
    let fresh = snapshot.age(now) <= tuning.max_sample_age;

    active.retain(|index: &mut usize| {
        let idx = *index;
        let note = &mut notes[idx];
        if !note.resolution.is_pending() {
            return false;
        }

        let pos = travel_position(note.time, now, tuning);
        let past_plane = pos - tuning.interaction_plane;

        // 1. Expiry wins over any coincident hand contact this tick.
        if past_plane > tuning.miss_beyond {
            note.resolution = Resolution::Missed;
            events.push(JudgeEvent::Miss { note: idx });
            info!(
                "MISS (expired): id={} t={:.3}s lane={} layer={} now={now:.3}s",
                note.id, note.time, note.lane, note.layer
            );
            return false;
        }

        // 2. Outside the hit window: leave pending for a later tick.
        if past_plane < -tuning.hit_window_before || past_plane > tuning.hit_window_after {
            return true;
        }

        // 3. Spatial test against the assigned hand.
        let sample = snapshot.sample(note.hand);
        let Some(hand_pos) = sample.position.filter(|_| fresh) else {
            return true;
        };
        let (x, y) = note.target_xy();
        let target = Vec3::new(x, y, pos);
        if hand_pos.distance(target) > tuning.hit_radius {
            return true;
        }

        // 4. Quality never gates the hit itself.
        let quality = classify_quality(sample.velocity, note.swipe, tuning);
        let error_ms = (now - note.time) * 1000.0;
        note.resolution = Resolution::Hit { time: now, quality };
        events.push(JudgeEvent::Hit { note: idx, quality, error_ms });
        info!(
            "HIT: id={} quality={quality:?} err_ms={error_ms:.1} lane={} layer={} hand={:?}",
            note.id, note.lane, note.layer, note.hand
        );
        false
    });
}
