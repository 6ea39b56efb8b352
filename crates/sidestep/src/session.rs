//! Hosting-layer session around the engine.
//!
//! A [`Session`] plays the part of the greeting-card page: it mounts the
//! controls, forwards resizes, runs triggers through the
//! [`TriggerCoordinator`], cycles the control's label, reveals the easter-egg
//! region once the user has been persistent enough, and stops everything when
//! the card is accepted.

use std::time::{Duration, Instant};

use log::{debug, info};
use rand::{Rng, SeedableRng, rngs::StdRng};

use sidestep_core::geometry::{Bounds, Point, Size};

use crate::{
    Engine,
    config::{AppConfig, SessionConfig},
    metrics::LayoutHost,
    placement::PlacementMode,
    scene::{Scene, SceneEvent},
    trigger::{TriggerCoordinator, TriggerKind},
};

/// A placement the session applied, in order.
#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    mode: PlacementMode,
    position: Point,
    container: Size,
    dodge_count: u32,
    label: String,
}

impl Step {
    pub fn mode(&self) -> PlacementMode {
        self.mode
    }

    pub fn position(&self) -> Point {
        self.position
    }

    /// Container size at the time of the placement.
    pub fn container(&self) -> Size {
        self.container
    }

    pub fn dodge_count(&self) -> u32 {
        self.dodge_count
    }

    /// Label shown on the control after the placement.
    pub fn label(&self) -> &str {
        &self.label
    }
}

/// Live page state as the engine measures it.
#[derive(Debug)]
struct Stage {
    scene: Scene,
    container: Size,
    mounted: bool,
    easter_egg_visible: bool,
}

impl LayoutHost for Stage {
    fn container_size(&self) -> Option<Size> {
        self.mounted.then_some(self.container)
    }

    fn control_size(&self) -> Option<Size> {
        self.mounted.then(|| self.scene.control())
    }

    fn protected_regions(&self) -> Vec<Bounds> {
        let mut regions = vec![self.scene.accept()];
        if self.easter_egg_visible {
            regions.extend(self.scene.easter_egg());
        }
        regions
    }
}

/// The evading control's page, from mount to acceptance.
///
/// # Examples
///
/// ```
/// use std::time::{Duration, Instant};
///
/// use sidestep::{Session, config::AppConfig, scene::Scene, trigger::TriggerKind};
/// use sidestep::geometry::{Bounds, Size};
///
/// let scene = Scene::new(
///     Size::new(800.0, 600.0),
///     Size::new(60.0, 36.0),
///     Bounds::from_edges(300.0, 50.0, 380.0, 90.0),
/// );
/// let mut session = Session::seeded(&AppConfig::default(), scene, 7);
/// session.mount();
///
/// let tap = Instant::now();
/// assert!(session.trigger_at(TriggerKind::PointerDown, tap).is_some());
/// // The touch-start of the same tap is coalesced.
/// assert!(session.trigger_at(TriggerKind::TouchStart, tap + Duration::from_millis(20)).is_none());
/// assert_eq!(session.dodge_count(), 1);
/// assert_eq!(session.label(), "Nope.");
/// ```
#[derive(Debug)]
pub struct Session<R = StdRng> {
    config: SessionConfig,
    stage: Stage,
    engine: Engine<R>,
    triggers: TriggerCoordinator,
    animated: bool,
    accepted: bool,
    steps: Vec<Step>,
}

impl Session<StdRng> {
    /// Creates a session with an OS-seeded engine.
    pub fn new(config: &AppConfig, scene: Scene) -> Self {
        Self::with_rng(config, scene, StdRng::from_os_rng())
    }

    /// Creates a session whose dodges are reproducible.
    pub fn seeded(config: &AppConfig, scene: Scene, seed: u64) -> Self {
        Self::with_rng(config, scene, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> Session<R> {
    /// Creates a session drawing random placements from `rng`.
    ///
    /// Every section of `config` applies, including the engine section.
    pub fn with_rng(config: &AppConfig, scene: Scene, rng: R) -> Self {
        let stage = Stage {
            container: scene.container(),
            scene,
            mounted: false,
            easter_egg_visible: false,
        };
        Self {
            config: config.session().clone(),
            stage,
            engine: Engine::with_rng(config.engine().clone(), rng),
            triggers: TriggerCoordinator::new(config.trigger()),
            animated: false,
            accepted: false,
            steps: Vec::new(),
        }
    }

    /// Mounts the controls and performs the initial placement.
    pub fn mount(&mut self) -> Option<Point> {
        if self.accepted {
            return None;
        }
        info!(
            width = self.stage.container.width(),
            height = self.stage.container.height();
            "Mounting controls"
        );
        self.stage.mounted = true;
        self.place(PlacementMode::Initial)
    }

    /// Resizes the container and keeps the control legal.
    pub fn resize(&mut self, container: Size) -> Option<Point> {
        self.stage.container = container;
        if self.accepted {
            return None;
        }
        debug!(width = container.width(), height = container.height(); "Container resized");
        self.place(PlacementMode::Clamp)
    }

    /// Handles a trigger happening now.
    pub fn trigger(&mut self, kind: TriggerKind) -> Option<Point> {
        self.trigger_at(kind, Instant::now())
    }

    /// Handles a trigger observed at `now`.
    ///
    /// Returns the new position, or `None` when the trigger was coalesced,
    /// the card was already accepted, or the page is not measurable yet.
    pub fn trigger_at(&mut self, kind: TriggerKind, now: Instant) -> Option<Point> {
        if self.accepted {
            debug!(kind:?; "Ignoring trigger after acceptance");
            return None;
        }
        let dodge_count = self.triggers.handle_at(kind, now)?;
        self.animated = true;

        if !self.stage.easter_egg_visible
            && dodge_count >= self.config.easter_egg_after()
            && self.stage.scene.easter_egg().is_some()
        {
            info!(dodge_count; "Revealing easter egg");
            self.stage.easter_egg_visible = true;
        }

        self.place(PlacementMode::Random)
    }

    /// Accepts the card. The controls unmount and later events are ignored.
    pub fn accept(&mut self) {
        if self.accepted {
            return;
        }
        info!(dodge_count = self.dodge_count(); "Accepted");
        self.accepted = true;
        self.stage.mounted = false;
    }

    /// Applies one scripted event, with trigger times relative to `origin`.
    pub fn apply_event(&mut self, event: &SceneEvent, origin: Instant) -> Option<Point> {
        match *event {
            SceneEvent::Mount => self.mount(),
            SceneEvent::Resize { width, height } => self.resize(Size::new(width, height)),
            SceneEvent::Trigger { trigger, at_ms } => {
                self.trigger_at(trigger, origin + Duration::from_millis(at_ms))
            }
            SceneEvent::Accept => {
                self.accept();
                None
            }
        }
    }

    /// Replays the scene's own event script and returns the applied steps.
    pub fn replay(&mut self, origin: Instant) -> &[Step] {
        let events = self.stage.scene.events().to_vec();
        for event in &events {
            self.apply_event(event, origin);
        }
        &self.steps
    }

    pub fn scene(&self) -> &Scene {
        &self.stage.scene
    }

    /// The control's current top-left position.
    pub fn position(&self) -> Point {
        self.engine.position()
    }

    /// False until the control has a valid position.
    pub fn is_ready(&self) -> bool {
        self.engine.is_ready()
    }

    /// True once the control has dodged at least once.
    pub fn is_animated(&self) -> bool {
        self.animated
    }

    pub fn is_accepted(&self) -> bool {
        self.accepted
    }

    pub fn is_easter_egg_visible(&self) -> bool {
        self.stage.easter_egg_visible
    }

    pub fn dodge_count(&self) -> u32 {
        self.triggers.dodge_count()
    }

    /// Current label of the evading control.
    pub fn label(&self) -> &str {
        self.config.label_for(self.dodge_count())
    }

    /// Every placement applied so far.
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    fn place(&mut self, mode: PlacementMode) -> Option<Point> {
        let dodge_count = self.dodge_count();
        let position = self.engine.reposition(&self.stage, mode, dodge_count)?;
        self.steps.push(Step {
            mode,
            position,
            container: self.stage.container,
            dodge_count,
            label: self.label().to_string(),
        });
        Some(position)
    }
}
