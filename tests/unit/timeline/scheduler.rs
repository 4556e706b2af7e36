use std::cell::Cell;
use std::rc::Rc;

use super::*;
use crate::compile::spec::StepSpec;
use crate::scene::memory::{MemoryScene, SceneNode};
use crate::timeline::clock::ManualTicker;

fn scene() -> MemoryScene {
    let mut s = MemoryScene::new();
    for id in ["a", "b"] {
        s.insert(
            SceneNode::new("rect", id)
                .class("box")
                .attr("width", "10")
                .attr("height", "10")
                .attr("opacity", "0"),
        );
    }
    s
}

fn timeline(config: TimelineConfig) -> (Timeline<MemoryScene>, ManualTicker) {
    let ticker = ManualTicker::new();
    let mut tl = Timeline::new(scene(), config, TimelineHooks::new(), ticker.clone()).unwrap();
    tl.add(&AnimationSpec::new(".box").prop("opacity", [StepSpec::to(1.0).duration(100.0)]))
        .unwrap();
    (tl, ticker)
}

fn no_defer() -> TimelineConfig {
    TimelineConfig {
        start_defer_ms: 0.0,
        ..TimelineConfig::default()
    }
}

fn opacity(tl: &Timeline<MemoryScene>) -> Option<String> {
    tl.scene().attr(&ElementId::new("a"), "opacity")
}

#[test]
fn rejects_invalid_config() {
    let config = TimelineConfig {
        speed: 0.0,
        ..TimelineConfig::default()
    };
    assert!(Timeline::new(scene(), config, TimelineHooks::new(), ManualTicker::new()).is_err());
}

#[test]
fn duration_comes_from_records_or_override() {
    let (tl, _) = timeline(no_defer());
    assert_eq!(tl.duration(), 100.0);
    assert_eq!(tl.records().len(), 2);

    let (tl, _) = timeline(TimelineConfig {
        duration: Some(40.0),
        ..no_defer()
    });
    assert_eq!(tl.duration(), 40.0);
}

#[test]
fn play_waits_out_the_start_deferral() {
    let (mut tl, ticker) = timeline(TimelineConfig::default());
    tl.play(Direction::Forward, false, false);
    assert!(ticker.take());
    assert!(tl.tick(0.0));
    assert_eq!(tl.phase(), Phase::Deferred { since: Some(0.0) });
    assert!(tl.tick(60.0));
    assert!(!tl.is_playing());
    assert!(tl.tick(100.0));
    assert_eq!(tl.phase(), Phase::Running { origin: 100.0 });
    assert!(tl.is_playing());
    assert!(ticker.is_pending());
}

#[test]
fn running_ticks_advance_and_complete() {
    let (mut tl, ticker) = timeline(no_defer());
    tl.play(Direction::Forward, false, false);
    tl.tick(1000.0);
    tl.tick(1050.0);
    assert_eq!(tl.elapsed(), 50.0);
    assert_eq!(opacity(&tl).as_deref(), Some("0.5"));

    assert!(!tl.tick(1200.0));
    assert_eq!(tl.elapsed(), 100.0);
    assert_eq!(tl.progress(), 100.0);
    assert!(tl.is_completed());
    assert!(!tl.is_playing());
    assert_eq!(tl.phase(), Phase::Idle);
    assert!(!ticker.is_pending());
    assert!(!tl.tick(1300.0));
}

#[test]
fn speed_scales_wall_time() {
    let (mut tl, _) = timeline(TimelineConfig {
        speed: 2.0,
        ..no_defer()
    });
    tl.play(Direction::Forward, false, false);
    tl.tick(0.0);
    tl.tick(25.0);
    assert_eq!(tl.elapsed(), 50.0);
}

#[test]
fn looping_wraps_by_remainder() {
    let (mut tl, _) = timeline(TimelineConfig {
        loop_playback: true,
        ..no_defer()
    });
    tl.play(Direction::Forward, false, false);
    tl.tick(0.0);
    assert!(tl.tick(250.0));
    assert_eq!(tl.elapsed(), 50.0);
    tl.tick(260.0);
    assert_eq!(tl.elapsed(), 60.0);
    assert!(!tl.is_completed());
}

#[test]
fn play_after_completion_starts_over() {
    let (mut tl, _) = timeline(no_defer());
    tl.seek(100.0);
    tl.play(Direction::Forward, false, false);
    tl.tick(0.0);
    assert_eq!(tl.elapsed(), 0.0);
    assert_eq!(opacity(&tl).as_deref(), Some("0"));
}

#[test]
fn reverse_runs_back_to_zero_and_resets() {
    let calls = Rc::new(Cell::new(0));
    let counter = calls.clone();
    let ticker = ManualTicker::new();
    let hooks = TimelineHooks::new().on_complete(move || counter.set(counter.get() + 1));
    let mut tl = Timeline::new(scene(), no_defer(), hooks, ticker).unwrap();
    tl.add(&AnimationSpec::new(".box").prop("opacity", [StepSpec::to(1.0).duration(100.0)]))
        .unwrap();

    tl.play(Direction::Forward, false, false);
    tl.tick(0.0);
    tl.tick(100.0);
    assert_eq!(calls.get(), 1);

    tl.reverse();
    tl.tick(200.0);
    assert_eq!(tl.elapsed(), 100.0);
    tl.tick(240.0);
    assert_eq!(tl.elapsed(), 60.0);
    assert!(!tl.tick(400.0));
    assert_eq!(calls.get(), 2);
    assert_eq!(tl.elapsed(), 0.0);
    assert!(!tl.is_completed());
    assert_eq!(opacity(&tl).as_deref(), Some("0"));
}

#[test]
fn seek_and_time_clamp() {
    let (mut tl, _) = timeline(no_defer());
    tl.seek(150.0);
    assert_eq!(tl.elapsed(), 100.0);
    tl.seek(f64::NAN);
    assert_eq!(tl.elapsed(), 0.0);
    tl.time(25.0);
    assert_eq!(tl.progress(), 25.0);
    assert_eq!(opacity(&tl).as_deref(), Some("0.25"));
}

#[test]
fn time_without_duration_seeks_to_zero() {
    let mut tl = Timeline::new(scene(), no_defer(), TimelineHooks::new(), ManualTicker::new())
        .unwrap();
    tl.time(500.0);
    assert_eq!(tl.elapsed(), 0.0);
    assert_eq!(tl.progress(), 0.0);
}

#[test]
fn update_hook_sees_every_frame() {
    let frames = Rc::new(Cell::new(0));
    let counter = frames.clone();
    let hooks = TimelineHooks::new().on_update(move |_| counter.set(counter.get() + 1));
    let mut tl = Timeline::new(scene(), no_defer(), hooks, ManualTicker::new()).unwrap();
    tl.add(&AnimationSpec::new("#a").prop("opacity", [StepSpec::to(1.0).duration(100.0)]))
        .unwrap();
    tl.seek(10.0);
    tl.seek(20.0);
    assert_eq!(frames.get(), 2);
}

#[test]
fn pause_stops_the_clock() {
    let (mut tl, ticker) = timeline(no_defer());
    tl.play(Direction::Forward, false, false);
    tl.tick(0.0);
    tl.tick(30.0);
    tl.pause();
    assert!(!ticker.is_pending());
    assert!(!tl.tick(90.0));
    assert_eq!(tl.elapsed(), 30.0);

    tl.play(Direction::Forward, false, false);
    tl.tick(500.0);
    tl.tick(510.0);
    assert_eq!(tl.elapsed(), 40.0);
}

#[test]
fn autoplay_starts_on_add() {
    let ticker = ManualTicker::new();
    let config = TimelineConfig {
        autoplay: true,
        ..no_defer()
    };
    let mut tl = Timeline::new(scene(), config, TimelineHooks::new(), ticker.clone()).unwrap();
    tl.add(&AnimationSpec::new("#a").prop("opacity", [StepSpec::to(1.0).duration(100.0)]))
        .unwrap();
    assert!(ticker.is_pending());
    assert_eq!(tl.phase(), Phase::Deferred { since: None });
}

#[test]
fn readding_a_target_keeps_its_snapshot() {
    let (mut tl, _) = timeline(no_defer());
    tl.seek(100.0);
    tl.add(&AnimationSpec::new("#a").prop("width", [StepSpec::to(20.0).duration(50.0)]))
        .unwrap();
    assert!(tl.ghosts[&ElementId::new("a")].resizes);
    assert_eq!(tl.targets.len(), 2);

    tl.remove("#a");
    assert_eq!(opacity(&tl).as_deref(), Some("0"));
    assert_eq!(tl.records().len(), 1);
    assert_eq!(
        tl.scene().attr(&ElementId::new("b"), "opacity").as_deref(),
        Some("1")
    );
}
