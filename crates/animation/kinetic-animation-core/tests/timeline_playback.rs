use kinetic_animation_core::{
    Config, CoreEvent, Easing, PropertyStore, Timeline, Tween, TweenId,
};
use serde_json::json;

fn init_tracing() {
    let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "kinetic_animation_core=debug".to_string());
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}

fn approx(a: f32, b: f32, eps: f32) {
    assert!((a - b).abs() <= eps, "left={a} right={b} eps={eps}");
}

fn lin(path: &str, end: f32, duration: f32) -> Tween {
    Tween::to(path, end, duration, Easing::Linear).unwrap()
}

/// `a.x` 0 -> 10 over [0, 1) and `b.x` 0 -> 5 over [0.5, 1.5).
fn two_tracks() -> (PropertyStore, Timeline) {
    let store = PropertyStore::from_json(json!({ "a": { "x": 0.0 }, "b": { "x": 0.0 } })).unwrap();
    let mut tl = Timeline::new();
    tl.add(lin("a.x", 10.0, 1.0), 0.0).unwrap();
    tl.add(lin("b.x", 5.0, 1.0), 0.5).unwrap();
    (store, tl)
}

fn completions_of(events: &[CoreEvent], id: TweenId) -> usize {
    events
        .iter()
        .filter(|e| matches!(e, CoreEvent::TweenCompleted { id: eid } if *eid == id))
        .count()
}

#[test]
fn non_looping_playback_completes_once() {
    init_tracing();
    let (mut store, mut tl) = two_tracks();
    tl.play();
    assert!(!tl.update(0.5, &mut store).timeline_completed());
    let out = tl.update(1.0, &mut store);
    assert!(out.timeline_completed());
    assert_eq!(out.completed().count(), 2);
    assert!(!tl.is_playing());
    assert_eq!(tl.current_time(), 1.5);
    assert_eq!(store.get_f32("a.x"), Some(10.0));
    assert_eq!(store.get_f32("b.x"), Some(5.0));

    assert!(tl.update(1.0, &mut store).is_empty());
}

#[test]
fn looping_past_the_end_matches_playing_from_start() {
    let (mut looped_store, mut looped) = two_tracks();
    looped.set_loop(true);
    looped.play();
    let out = looped.update(1.5 + 0.25, &mut looped_store);
    assert!(out
        .events
        .contains(&CoreEvent::TimelineLooped { iteration: 1 }));
    assert!(!out.timeline_completed());
    assert!(looped.is_playing());
    assert_eq!(looped.iteration(), 1);

    let (mut fresh_store, mut fresh) = two_tracks();
    fresh.set_loop(true);
    fresh.play_from_start(&mut fresh_store);
    fresh.update(0.25, &mut fresh_store);

    approx(looped.current_time(), fresh.current_time(), 1e-5);
    for path in ["a.x", "b.x"] {
        approx(
            looped_store.get_f32(path).unwrap(),
            fresh_store.get_f32(path).unwrap(),
            1e-4,
        );
    }
    approx(looped_store.get_f32("a.x").unwrap(), 2.5, 1e-4);
    assert_eq!(looped_store.get_f32("b.x"), Some(0.0));
}

#[test]
fn every_loop_cycle_completes_each_entry_once() {
    let mut store = PropertyStore::from_json(json!({ "t": { "p": 0.0, "q": 0.0 } })).unwrap();
    let mut tl = Timeline::new();
    let tiny = tl.add(lin("t.p", 1.0, 1e-3), 0.0).unwrap();
    let long = tl.add(lin("t.q", 1.0, 1.0), 0.0).unwrap();
    tl.set_loop(true);
    tl.play();

    let mut tiny_total = 0;
    let mut long_total = 0;
    for _ in 0..12 {
        let out = tl.update(0.25, &mut store);
        let tiny_now = completions_of(&out.events, tiny);
        assert!(tiny_now <= 1, "tiny entry completed {tiny_now} times in one tick");
        tiny_total += tiny_now;
        long_total += completions_of(&out.events, long);
    }
    assert_eq!(tl.iteration(), 3);
    assert_eq!(long_total, 3);
    assert_eq!(tiny_total, 3);
}

#[test]
fn time_scale_speeds_up_and_reverses_playback() {
    let (mut store, mut tl) = two_tracks();
    tl.set_time_scale(2.0);
    tl.play();
    tl.update(0.25, &mut store);
    assert_eq!(tl.current_time(), 0.5);
    assert_eq!(store.get_f32("a.x"), Some(5.0));

    tl.update(0.25, &mut store);
    assert_eq!(tl.current_time(), 1.0);
    assert_eq!(store.get_f32("b.x"), Some(2.5));

    tl.set_time_scale(-1.0);
    tl.update(0.75, &mut store);
    assert_eq!(tl.current_time(), 0.25);
    assert_eq!(store.get_f32("a.x"), Some(2.5));
    assert_eq!(store.get_f32("b.x"), Some(0.0));

    let out = tl.update(1.0, &mut store);
    assert!(!out.timeline_completed());
    assert!(!tl.is_playing());
    assert_eq!(tl.current_time(), 0.0);
    assert_eq!(store.get_f32("a.x"), Some(0.0));

    tl.set_time_scale(f32::NAN);
    assert_eq!(tl.time_scale(), -1.0);
}

#[test]
fn play_from_start_resets_everything() {
    let (mut store, mut tl) = two_tracks();
    tl.play();
    tl.update(5.0, &mut store);
    assert!(!tl.is_playing());

    let out = tl.play_from_start(&mut store);
    let resets = out
        .events
        .iter()
        .filter(|e| matches!(e, CoreEvent::TweenReset { .. }))
        .count();
    assert_eq!(resets, 2);
    assert!(tl.is_playing());
    assert_eq!(tl.current_time(), 0.0);
    assert_eq!(store.get_f32("a.x"), Some(0.0));
    assert_eq!(store.get_f32("b.x"), Some(0.0));

    assert_eq!(tl.update(5.0, &mut store).completed().count(), 2);
}

#[test]
fn config_drives_initial_transport() -> anyhow::Result<()> {
    let cfg: Config = serde_json::from_value(json!({
        "looping": true,
        "time_scale": 0.5,
        "emit_progress_events": false
    }))?;
    let mut store = PropertyStore::from_json(json!({ "a": { "x": 0.0 } }))?;
    let mut tl = Timeline::with_config(cfg);
    assert!(tl.is_looping());
    assert_eq!(tl.time_scale(), 0.5);
    tl.add(lin("a.x", 10.0, 1.0), 0.0)?;
    tl.play();
    let out = tl.update(1.0, &mut store);
    assert!(!out
        .events
        .iter()
        .any(|e| matches!(e, CoreEvent::TweenProgress { .. })));
    assert_eq!(tl.current_time(), 0.5);
    assert_eq!(tl.progress(), 0.5);
    assert_eq!(store.get_f32("a.x"), Some(5.0));
    Ok(())
}
