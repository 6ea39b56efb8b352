//! Integration tests for the public session and engine API.

use std::time::{Duration, Instant};

use sidestep::{
    Engine, Session,
    config::{AppConfig, EngineConfig},
    geometry::{Bounds, Insets, Point, Size},
    metrics::{LayoutHost, Metrics},
    placement::{PlacementMode, min_jump_distance},
    scene::Scene,
    trigger::TriggerKind,
};

fn valentine() -> Scene {
    Scene::new(
        Size::new(800.0, 600.0),
        Size::new(60.0, 36.0),
        Bounds::from_edges(300.0, 50.0, 380.0, 90.0),
    )
}

/// A host that measures nothing until its first layout pass.
struct LazyHost {
    laid_out: bool,
}

impl LayoutHost for LazyHost {
    fn container_size(&self) -> Option<Size> {
        self.laid_out.then(|| Size::new(800.0, 600.0))
    }

    fn control_size(&self) -> Option<Size> {
        self.laid_out.then(|| Size::new(60.0, 36.0))
    }

    fn protected_regions(&self) -> Vec<Bounds> {
        vec![Bounds::from_edges(300.0, 50.0, 380.0, 90.0)]
    }
}

#[test]
fn test_deferred_placement_succeeds_after_layout() {
    let mut host = LazyHost { laid_out: false };
    let mut engine = Engine::seeded(EngineConfig::default(), 1);

    assert_eq!(engine.reposition(&host, PlacementMode::Initial, 0), None);
    assert!(!engine.is_ready());

    host.laid_out = true;
    assert_eq!(
        engine.reposition(&host, PlacementMode::Initial, 0),
        Some(Point::new(392.0, 50.0))
    );
    assert!(engine.is_ready());
}

#[test]
fn test_long_chase_stays_legal_and_clear() {
    let mut session = Session::seeded(&AppConfig::default(), valentine(), 2024);
    session.mount();

    let legal = Bounds::from_edges(12.0, 12.0, 728.0, 552.0);
    let accept = valentine().accept().add_padding(Insets::uniform(8.0));
    let start = Instant::now();
    let mut previous = session.position();

    for i in 0..100u64 {
        let position = session
            .trigger_at(TriggerKind::PointerEnter, start + Duration::from_millis(i * 250))
            .expect("every trigger is outside the debounce window");
        assert!(legal.contains_point(position), "{position:?}");
        assert!(
            !position.to_bounds(Size::new(60.0, 36.0)).intersects(accept),
            "{position:?}"
        );
        assert_ne!(position, previous);
        previous = position;
    }
    assert_eq!(session.dodge_count(), 100);
}

#[test]
fn test_jumps_cover_min_distance() {
    let config = AppConfig::default();
    let mut session = Session::seeded(&config, valentine(), 77);
    session.mount();

    let metrics = Metrics::gather(&valentine(), config.engine().edge_padding())
        .expect("scene is measurable");
    let start = Instant::now();
    for i in 0..30u64 {
        let before = session.position();
        let after = session
            .trigger_at(TriggerKind::Focus, start + Duration::from_secs(i))
            .expect("trigger accepted");
        let needed = min_jump_distance(metrics.legal(), config.engine().jump(), session.dodge_count());
        // Either a random jump of at least `needed`, or a corner fallback.
        let is_corner = metrics.legal().corners().contains(&after);
        assert!(after.distance(before) >= needed || is_corner);
    }
}

#[test]
fn test_double_fire_tap_counts_once() {
    let mut session = Session::seeded(&AppConfig::default(), valentine(), 8);
    session.mount();
    let tap = Instant::now();

    let first = session.trigger_at(TriggerKind::PointerDown, tap);
    let second = session.trigger_at(TriggerKind::TouchStart, tap + Duration::from_millis(12));

    assert!(first.is_some());
    assert!(second.is_none());
    assert_eq!(session.dodge_count(), 1);
    // One Initial step, one Random step.
    assert_eq!(session.steps().len(), 2);
}
