//! Stateful placement engine.
//!
//! [`Engine`] owns the current position of the evading control, the readiness
//! flag and the random number generator. Each call to
//! [`reposition`](Engine::reposition) reads fresh metrics from the host,
//! computes the next position and stores it.

use log::debug;
use rand::{Rng, SeedableRng, rngs::StdRng};

use sidestep_core::geometry::Point;

use crate::{
    config::EngineConfig,
    metrics::{LayoutHost, Metrics},
    placement::{self, PlacementMode},
};

/// Evasive placement engine for a single movable control.
///
/// # Examples
///
/// ```
/// use sidestep::{Engine, config::EngineConfig, scene::Scene, placement::PlacementMode};
/// use sidestep::geometry::{Bounds, Size};
///
/// let scene = Scene::new(
///     Size::new(800.0, 600.0),
///     Size::new(60.0, 36.0),
///     Bounds::from_edges(300.0, 50.0, 380.0, 90.0),
/// );
/// let mut engine = Engine::seeded(EngineConfig::default(), 42);
/// assert!(!engine.is_ready());
///
/// let position = engine.reposition(&scene, PlacementMode::Initial, 0);
/// assert_eq!(position.map(|p| (p.x(), p.y())), Some((392.0, 50.0)));
/// assert!(engine.is_ready());
/// ```
#[derive(Debug)]
pub struct Engine<R = StdRng> {
    config: EngineConfig,
    position: Point,
    ready: bool,
    rng: R,
}

impl Engine<StdRng> {
    /// Creates an engine seeded from the operating system.
    pub fn new(config: EngineConfig) -> Self {
        Self::with_rng(config, StdRng::from_os_rng())
    }

    /// Creates an engine whose random placements are reproducible.
    pub fn seeded(config: EngineConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> Engine<R> {
    /// Creates an engine drawing random placements from `rng`.
    pub fn with_rng(config: EngineConfig, rng: R) -> Self {
        Self {
            config,
            position: Point::default(),
            ready: false,
            rng,
        }
    }

    /// Returns the engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The control's current top-left position.
    pub fn position(&self) -> Point {
        self.position
    }

    /// False until the first successful placement.
    ///
    /// Hosts keep the control invisible while this is false.
    pub fn is_ready(&self) -> bool {
        self.ready
    }

    /// Reads fresh metrics from `host` and moves the control.
    ///
    /// Returns the new position, or `None` when the host could not be
    /// measured. In that case nothing changes and the host is expected to
    /// trigger again after its next layout pass.
    pub fn reposition<H: LayoutHost + ?Sized>(
        &mut self,
        host: &H,
        mode: PlacementMode,
        dodge_count: u32,
    ) -> Option<Point> {
        let Some(metrics) = Metrics::gather(host, self.config.edge_padding()) else {
            debug!(mode:?; "Metrics unavailable, skipping placement");
            return None;
        };
        Some(self.apply(&metrics, mode, dodge_count))
    }

    /// Moves the control using an already gathered snapshot.
    pub fn apply(&mut self, metrics: &Metrics, mode: PlacementMode, dodge_count: u32) -> Point {
        let next = placement::place(
            metrics,
            mode,
            self.position,
            dodge_count,
            &self.config,
            &mut self.rng,
        );

        debug!(
            mode:?,
            dodge_count,
            from_x = self.position.x(),
            from_y = self.position.y(),
            x = next.x(),
            y = next.y();
            "Placed control"
        );

        self.position = next;
        self.ready = true;
        next
    }
}
