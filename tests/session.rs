use glam::Vec3;
use handsync::game::gate::Gate;
use handsync::game::note::{LANE_X, LAYER_Y};
use handsync::{
    Chart, Hand, HandTracker, JudgeEvent, Note, Outcome, Polarity, Quality, Resolution, Session,
    Swipe, Tier, Transport, Tuning,
};

fn note(id: u32, time: f32, lane: u8, layer: u8, hand: Hand, swipe: Swipe) -> Note {
    Note {
        id,
        time,
        lane,
        layer,
        hand,
        swipe,
        tier: Tier::Standard,
        axis: Default::default(),
        resolution: Resolution::Pending,
    }
}

fn scripted_chart() -> Chart {
    let notes = vec![
        note(1, 2.0, 0, 0, Hand::Left, Swipe::Any),
        note(2, 4.0, 1, 0, Hand::Right, Swipe::Any),
        note(3, 6.0, 2, 1, Hand::Left, Swipe::Toward(Vec3::new(0.0, 1.0, 0.0))),
    ];
    let gates = vec![Gate {
        time: 3.0,
        title: "verse".into(),
        detail: "first verse".into(),
        polarity: Polarity::Positive,
    }];
    Chart::from_parts(notes, gates).unwrap()
}

/// Sweeps the given hand through a note's target point so that the final
/// frame lands on it at `arrival` with the requested approach velocity.
fn sweep_hand(tracker: &mut HandTracker, hand: Hand, target: Vec3, velocity: Vec3, arrival: f32) {
    let before = target - velocity * 0.1;
    let frame = |pos: Vec3| -> (Option<Vec3>, Option<Vec3>) {
        match hand {
            Hand::Left => (Some(pos), None),
            Hand::Right => (None, Some(pos)),
        }
    };
    let (l, r) = frame(before);
    tracker.push_frame(l, r, arrival - 0.1);
    let (l, r) = frame(target);
    tracker.push_frame(l, r, arrival);
}

#[test]
fn scripted_session_plays_through_to_a_clear() {
    let mut session = Session::new(scripted_chart(), Tuning::default());
    let mut transport = Transport::new();
    let mut tracker = HandTracker::new();

    // Before the clock starts nothing spawns or resolves.
    assert!(session.tick(&transport, &tracker.latest()).is_empty());
    assert_eq!(session.live_notes().count(), 0);

    // Note 1 arrives at t=2.0; the left hand sweeps through it fast.
    transport.set_time(0.5);
    session.tick(&transport, &tracker.latest());
    assert_eq!(session.live_notes().count(), 1, "lookahead is 3s, only note 1 is live");

    let target = Vec3::new(LANE_X[0], LAYER_Y[0], 0.0);
    sweep_hand(&mut tracker, Hand::Left, target, Vec3::new(2.0, 0.0, 0.0), 2.0);
    transport.set_time(2.0);
    let events = session.tick(&transport, &tracker.latest());
    assert_eq!(events, [JudgeEvent::Hit { note: 0, quality: Quality::Good, error_ms: 0.0 }]);
    assert_eq!(session.score().combo, 1);

    // The gate at t=3.0 is visible from t=0.5 through t=4.0.
    assert_eq!(session.visible_gates().count(), 1);

    // Nobody reaches for note 2; it expires past the plane.
    transport.set_time(4.5);
    let events = session.tick(&transport, &tracker.latest());
    assert_eq!(events, [JudgeEvent::Miss { note: 1 }]);
    assert_eq!(session.score().combo, 0);
    assert_eq!(session.chart().notes[1].resolution, Resolution::Missed);

    // Note 3 wants an upward swipe; sweep the left hand up through it.
    let target = Vec3::new(LANE_X[2], LAYER_Y[1], 0.0);
    sweep_hand(&mut tracker, Hand::Left, target, Vec3::new(0.0, 2.0, 0.0), 6.0);
    transport.set_time(6.0);
    let events = session.tick(&transport, &tracker.latest());
    assert_eq!(events, [JudgeEvent::Hit { note: 2, quality: Quality::Good, error_ms: 0.0 }]);

    transport.set_time(7.0);
    transport.mark_ended();
    session.tick(&transport, &tracker.latest());

    let summary = session.summary();
    assert_eq!(summary.outcome, Some(Outcome::Cleared));
    assert_eq!(summary.good, 2);
    assert_eq!(summary.weak, 0);
    assert_eq!(summary.misses, 1);
    assert_eq!(summary.max_combo, 1);
    // 150 (good, 1x) + 0 (miss) + 150 (good, 1x)
    assert_eq!(summary.score, 300);
    assert_eq!(session.live_notes().count(), 0, "an ended session has no live notes");
}

#[test]
fn pausing_produces_no_new_spawns_or_judgements() {
    let mut session = Session::new(scripted_chart(), Tuning::default());
    let mut transport = Transport::new();
    let tracker = HandTracker::new();

    transport.set_time(1.5);
    session.tick(&transport, &tracker.latest());
    let live_before = session.live_notes().count();
    let cursor_score = (session.score().combo, session.score().score);

    // The host pauses: `now` stops advancing. Ticks keep coming.
    for _ in 0..10 {
        assert!(session.tick(&transport, &tracker.latest()).is_empty());
    }
    assert_eq!(session.live_notes().count(), live_before);
    assert_eq!((session.score().combo, session.score().score), cursor_score);
}

#[test]
fn empty_chart_runs_to_a_victory() {
    let mut session = Session::new(Chart::default(), Tuning::default());
    let mut transport = Transport::new();
    let tracker = HandTracker::new();

    transport.set_time(1.0);
    assert!(session.tick(&transport, &tracker.latest()).is_empty());
    transport.mark_ended();
    session.tick(&transport, &tracker.latest());

    let summary = session.summary();
    assert_eq!(summary.outcome, Some(Outcome::Cleared));
    assert_eq!(summary.total_notes, 0);
    assert_eq!(summary.good + summary.weak + summary.misses, 0);
}

#[test]
fn a_session_can_fail_and_stays_failed() {
    // Ten unreached notes at default tuning drain 100 health exactly.
    let notes = (0..12)
        .map(|i| note(i, 1.0 + i as f32, 0, 0, Hand::Left, Swipe::Any))
        .collect();
    let chart = Chart::from_parts(notes, vec![]).unwrap();
    let mut session = Session::new(chart, Tuning::default());
    let mut transport = Transport::new();
    let tracker = HandTracker::new();

    let mut t = 0.0;
    while session.score().outcome.is_none() && t < 30.0 {
        t += 0.1;
        transport.set_time(t);
        session.tick(&transport, &tracker.latest());
    }
    assert_eq!(session.score().outcome, Some(Outcome::Failed));
    assert_eq!(session.score().misses, 10, "failure lands exactly on the tenth miss");
    assert_eq!(session.score().health, 0.0);

    // Later ticks and even track end never change the outcome.
    transport.set_time(40.0);
    transport.mark_ended();
    session.tick(&transport, &tracker.latest());
    assert_eq!(session.score().outcome, Some(Outcome::Failed));
}

#[test]
fn restart_rewinds_chart_cursor_and_score() {
    let mut session = Session::new(scripted_chart(), Tuning::default());
    let mut transport = Transport::new();
    let tracker = HandTracker::new();

    transport.set_time(10.0);
    transport.mark_ended();
    session.tick(&transport, &tracker.latest());
    assert!(session.summary().outcome.is_some());

    session.restart();
    assert_eq!(session.summary().outcome, None);
    assert_eq!(session.score().score, 0);
    assert!(session.chart().notes.iter().all(|n| n.resolution.is_pending()));

    // A fresh transport drives the same chart again from the top.
    let mut transport = Transport::new();
    transport.set_time(0.5);
    session.tick(&transport, &tracker.latest());
    assert_eq!(session.live_notes().count(), 1);
}
