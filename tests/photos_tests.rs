// Host-side tests for photo frame placement and late pane attachment.

use card_core::constants::*;
use card_core::*;
use rand::rngs::SmallRng;
use rand::SeedableRng;

/// Replays fixed candidates, then repeats the last one.
struct Scripted {
    draws: Vec<PhotoCandidate>,
    next: usize,
}

impl Scripted {
    fn new(points: &[(f32, f32)]) -> Self {
        Self {
            draws: points
                .iter()
                .map(|&(x, z)| PhotoCandidate {
                    x,
                    z,
                    yaw: 0.5,
                    roll: 0.05,
                })
                .collect(),
            next: 0,
        }
    }
}

impl Scatter for Scripted {
    fn candidate(&mut self) -> PhotoCandidate {
        let c = self.draws[self.next.min(self.draws.len() - 1)];
        self.next += 1;
        c
    }
}

fn sources(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("data:image/png;base64,{}", i)).collect()
}

#[test]
fn random_placement_respects_the_exclusion_radius() {
    let mut scatter = TableScatter::new(SmallRng::seed_from_u64(7));
    for n in 0..=8 {
        let mut layer = PhotoLayer::new();
        let requests = layer.place(&sources(n), &mut scatter);
        assert!(layer.len() <= n.min(MAX_PHOTO_FRAMES));
        assert_eq!(requests.len(), layer.len());
        for r in layer.records() {
            let d = (r.x * r.x + r.z * r.z).sqrt();
            assert!(d >= PHOTO_EXCLUSION_RADIUS, "frame at distance {}", d);
            assert!(r.x.abs() <= PHOTO_SCATTER_HALF_EXTENT);
            assert!(r.z.abs() <= PHOTO_SCATTER_HALF_EXTENT);
            assert!(r.roll.abs() <= PHOTO_MAX_ROLL);
        }
    }
}

#[test]
fn three_images_outside_the_cake_give_three_frames() {
    let mut layer = PhotoLayer::new();
    let mut scatter = Scripted::new(&[(2.8, 0.0), (-2.9, 1.0), (0.5, -2.9)]);
    let requests = layer.place(&sources(3), &mut scatter);
    assert_eq!(layer.len(), 3);
    assert_eq!(requests.len(), 3);
    // three nodes per frame before any pane arrives
    assert_eq!(layer.nodes().len(), 9);
    let frames = layer.nodes().iter().filter(|n| n.tag == NodeTag::PhotoFrame);
    assert_eq!(frames.count(), 3);
    assert!(layer.records().iter().all(|r| r.pane == PaneState::Loading));
}

#[test]
fn central_candidates_drop_their_source_without_redraw() {
    let mut layer = PhotoLayer::new();
    let mut scatter = Scripted::new(&[(2.8, 0.0), (1.0, 1.0), (-2.9, 1.0)]);
    let requests = layer.place(&sources(3), &mut scatter);
    assert_eq!(scatter.next, 3, "one draw per source");
    assert_eq!(layer.len(), 2);
    let used: Vec<usize> = layer.records().iter().map(|r| r.source_index).collect();
    assert_eq!(used, vec![0, 2]);
    // slots are dense even when a source was dropped
    let slots: Vec<TextureKey> = requests.iter().map(|r| r.key).collect();
    let generation = layer.generation();
    assert_eq!(
        slots,
        vec![
            TextureKey::Photo { generation, slot: 0 },
            TextureKey::Photo { generation, slot: 1 },
        ]
    );
    assert_eq!(requests[1].source, sources(3)[2]);
}

#[test]
fn sources_beyond_the_frame_limit_are_ignored() {
    let mut layer = PhotoLayer::new();
    let mut scatter = Scripted::new(&[(3.0, 3.0)]);
    let requests = layer.place(&sources(10), &mut scatter);
    assert_eq!(layer.len(), MAX_PHOTO_FRAMES);
    assert_eq!(requests.len(), MAX_PHOTO_FRAMES);
    assert_eq!(scatter.next, MAX_PHOTO_FRAMES);
}

#[test]
fn empty_source_list_clears_previous_frames() {
    let mut layer = PhotoLayer::new();
    let mut scatter = Scripted::new(&[(3.0, 0.0)]);
    layer.place(&sources(2), &mut scatter);
    assert_eq!(layer.len(), 2);
    let requests = layer.place(&[], &mut scatter);
    assert!(requests.is_empty());
    assert!(layer.is_empty());
    assert!(layer.nodes().is_empty());
}

#[test]
fn pane_attaches_under_its_frame() {
    let mut layer = PhotoLayer::new();
    let mut scatter = Scripted::new(&[(3.0, 0.0)]);
    let requests = layer.place(&sources(1), &mut scatter);
    assert!(layer.attach_pane(requests[0].key));
    assert_eq!(layer.records()[0].pane, PaneState::Loaded);

    let pane = layer.nodes().last().unwrap();
    assert_eq!(pane.tag, NodeTag::PhotoPane);
    assert_eq!(pane.material.texture, Some(requests[0].key));
    let parent = pane.parent.expect("pane has a parent");
    assert_eq!(layer.nodes()[parent].tag, NodeTag::PhotoFrame);

    // a second completion for the same slot is ignored
    assert!(!layer.attach_pane(requests[0].key));
    assert_eq!(layer.nodes().len(), 4);
}

#[test]
fn replacing_photos_refuses_stale_completions() {
    let mut layer = PhotoLayer::new();
    let mut scatter = Scripted::new(&[(3.0, 0.0)]);
    let old = layer.place(&sources(2), &mut scatter);
    assert!(old.iter().all(|r| r.token.is_alive()));

    let new = layer.place(&sources(1), &mut scatter);
    assert!(old.iter().all(|r| !r.token.is_alive()));
    assert!(new[0].token.is_alive());
    assert!(!layer.attach_pane(old[0].key));
    assert!(!layer.attach_pane(TextureKey::Plaque));
    assert_eq!(layer.nodes().len(), 3);
    assert!(layer.attach_pane(new[0].key));
}

#[test]
fn failed_frames_stay_empty() {
    let mut layer = PhotoLayer::new();
    let mut scatter = Scripted::new(&[(3.0, 0.0)]);
    let requests = layer.place(&sources(1), &mut scatter);
    layer.mark_failed(requests[0].key);
    assert_eq!(layer.records()[0].pane, PaneState::Failed);
    assert!(!layer.attach_pane(requests[0].key));
    assert_eq!(layer.nodes().len(), 3);
}

#[test]
fn clear_retires_outstanding_requests() {
    let mut layer = PhotoLayer::new();
    let mut scatter = Scripted::new(&[(3.0, 0.0)]);
    let requests = layer.place(&sources(1), &mut scatter);
    let generation = layer.generation();
    layer.clear();
    assert!(layer.generation() > generation);
    assert!(!requests[0].token.is_alive());
    assert_eq!(requests[0].token.run(|| 1), None);
}

#[test]
fn cake_scene_draws_photos_in_their_own_node_set() {
    let mut rng = SmallRng::seed_from_u64(3);
    let mut cake = CakeScene::new(&CakeSceneConfig::classic(), "x", &mut rng);
    let mut scatter = Scripted::new(&[(3.0, 0.0)]);
    let requests = cake.set_photos(&sources(2), &mut scatter);
    assert!(cake.attach_photo(requests[0].key));
    cake.photo_failed(requests[1].key);

    cake.advance(std::time::Duration::from_millis(16));
    let frame = cake.frame();
    assert_eq!(frame.node_sets.len(), 2);
    assert_eq!(frame.node_sets[1].nodes.len(), 2 * 3 + 1);
    assert_eq!(frame.node_sets[0].nodes.len(), cake.description().nodes.len());
}
