// Host-side tests for frame clocks, the animation loop and liveness tokens.

use card_core::*;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

fn cake() -> CakeScene {
    CakeScene::new(
        &CakeSceneConfig::festive(),
        "Ana",
        &mut SmallRng::seed_from_u64(11),
    )
}

/// Records what each rendered frame contained.
#[derive(Default)]
struct Recorder {
    node_counts: Vec<usize>,
    clouds: Vec<usize>,
}

impl FrameSink for Recorder {
    fn render(&mut self, frame: &RenderFrame<'_>) {
        self.node_counts
            .push(frame.node_sets.iter().map(|s| s.nodes.len()).sum());
        self.clouds.push(frame.clouds.len());
    }
}

#[test]
fn loop_renders_once_per_tick() {
    let mut lp = AnimationLoop::new(cake(), NullSink::default());
    for n in 1..=5 {
        lp.tick(Duration::from_millis(16 * n));
    }
    assert_eq!(lp.frames(), 5);
    assert_eq!(lp.sink().frames, 5);
}

#[test]
fn festive_frames_carry_sparkles_and_confetti() {
    let mut lp = AnimationLoop::new(cake(), Recorder::default());
    lp.tick(Duration::ZERO);
    let nodes = lp.scene().description().nodes.len();
    assert_eq!(lp.sink().node_counts, vec![nodes]);
    assert_eq!(lp.sink().clouds, vec![2]);
}

#[test]
fn classic_frames_have_no_confetti() {
    let mut scene = CakeScene::new(
        &CakeSceneConfig::classic(),
        "x",
        &mut SmallRng::seed_from_u64(1),
    );
    let mut sink = Recorder::default();
    scene.tick(Duration::ZERO, &mut sink);
    assert!(scene.confetti().is_none());
    assert_eq!(sink.clouds, vec![1]);
}

#[test]
fn flames_flicker_but_stay_on_their_wick() {
    let mut scene = cake();
    assert_eq!(scene.flame_count(), 5);
    let flames: Vec<NodeId> = scene.description().tagged(NodeTag::Flame).collect();
    let base: Vec<_> = flames
        .iter()
        .map(|&i| scene.description().nodes[i].transform)
        .collect();

    scene.advance(Duration::from_millis(700));
    let mut moved = false;
    for (&i, b) in flames.iter().zip(base.iter()) {
        let t = scene.nodes()[i].transform;
        assert_eq!(t.translation.x, b.translation.x);
        assert_eq!(t.translation.z, b.translation.z);
        assert!((t.translation.y - b.translation.y).abs() < 0.05);
        moved |= t.scale != b.scale;
    }
    assert!(moved);
    // the description itself never changes
    assert_eq!(scene.description().nodes[flames[0]].transform, base[0]);
}

#[test]
fn lights_follow_the_scene_rotation() {
    let mut scene = cake();
    scene.pointer_down(glam::Vec2::ZERO);
    scene.pointer_move(glam::Vec2::new(314.0, 0.0));
    scene.advance(Duration::ZERO);
    let frame = scene.frame();
    let src = &scene.description().lights;
    let moved = frame.lights.iter().zip(src.iter()).any(|(a, b)| a.kind != b.kind);
    assert!(moved);
    assert_eq!(frame.lights.len(), src.len());
}

#[test]
fn stepped_clock_stops_after_cancel() {
    let mut clock = SteppedClock::display_rate();
    let calls = Rc::new(RefCell::new(Vec::new()));
    let c = calls.clone();
    let handle = clock.start(Box::new(move |now| c.borrow_mut().push(now)));

    assert_eq!(clock.advance(3), 3);
    handle.cancel();
    assert_eq!(clock.advance(3), 0);
    assert_eq!(calls.borrow().len(), 3);
    assert_eq!(clock.active(), 0);
    let times = calls.borrow();
    assert!(times.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn stepped_clock_time_never_goes_back() {
    let mut clock = SteppedClock::display_rate();
    clock.tick_at(Duration::from_secs(2));
    clock.tick_at(Duration::from_secs(1));
    assert_eq!(clock.now(), Duration::from_secs(2));
}

#[test]
fn prune_releases_cancelled_ticks() {
    let mut clock = SteppedClock::display_rate();
    let shared = Rc::new(RefCell::new(AnimationLoop::new(cake(), NullSink::default())));
    let handle = start_shared(&shared, &mut clock);
    assert_eq!(Rc::strong_count(&shared), 2);

    clock.advance(2);
    assert_eq!(shared.borrow().frames(), 2);

    handle.cancel();
    clock.prune();
    assert_eq!(Rc::strong_count(&shared), 1);
    let Ok(cell) = Rc::try_unwrap(shared) else {
        panic!("loop still shared");
    };
    let (_, sink) = cell.into_inner().into_parts();
    assert_eq!(sink.frames, 2);
}

#[test]
fn handlers_can_mutate_between_frames() {
    let mut clock = SteppedClock::display_rate();
    let shared = Rc::new(RefCell::new(AnimationLoop::new(cake(), NullSink::default())));
    let _handle = start_shared(&shared, &mut clock);
    shared.borrow_mut().scene_mut().wheel(-100_000.0);
    clock.advance(1);
    let eye = shared.borrow().scene().camera().eye;
    assert_eq!(eye.z, card_core::constants::CAMERA_DISTANCE_MIN);
}

#[test]
fn tokens_die_with_their_lifetime() {
    let lifetime = SceneLifetime::new();
    let token = lifetime.token();
    assert_eq!(token.run(|| 5), Some(5));
    drop(lifetime);
    assert!(!token.is_alive());
    assert_eq!(token.run(|| 5), None);
}

#[test]
fn renew_only_kills_older_tokens() {
    let mut lifetime = SceneLifetime::new();
    let old = lifetime.token();
    lifetime.renew();
    let new = lifetime.token();
    assert!(!old.is_alive());
    assert!(new.is_alive());
    assert!(lifetime.is_alive());
}
