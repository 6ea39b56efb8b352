//! Sidestep - an evasive placement engine.
//!
//! Sidestep decides where to move a control that runs away from the pointer:
//! a "No" button that keeps dodging until the user clicks "Yes". Every
//! placement stays inside the padded container, avoids the protected regions
//! (the accept control and anything else the host marks), and jumps far
//! enough to feel evasive, while terminating in bounded time.
//!
//! # Pieces
//!
//! - [`metrics`] - the [`LayoutHost`](metrics::LayoutHost) seam and per-call snapshots
//! - [`placement`] - the Initial, Clamp and Random placement modes
//! - [`trigger`] - coalescing of duplicate pointer/touch/focus triggers
//! - [`Engine`] - current position, readiness and randomness
//! - [`Session`] - the hosting page: labels, easter egg, acceptance
//! - [`export`] - SVG rendering of a dodge trail
//!
//! # Example
//!
//! ```
//! use sidestep::{Engine, config::EngineConfig, placement::PlacementMode, scene::Scene};
//! use sidestep::geometry::{Bounds, Size};
//!
//! let scene = Scene::new(
//!     Size::new(800.0, 600.0),
//!     Size::new(60.0, 36.0),
//!     Bounds::from_edges(300.0, 50.0, 380.0, 90.0),
//! );
//! let mut engine = Engine::seeded(EngineConfig::default(), 3);
//! engine.reposition(&scene, PlacementMode::Initial, 0);
//! let dodged = engine.reposition(&scene, PlacementMode::Random, 1).expect("scene is measurable");
//! assert!(dodged.x() >= 12.0 && dodged.x() <= 728.0);
//! ```

pub mod config;
pub mod export;
pub mod metrics;
pub mod placement;
pub mod scene;
pub mod session;
pub mod trigger;

mod engine;
mod error;

pub use sidestep_core::geometry;

pub use engine::Engine;
pub use error::SidestepError;
pub use session::{Session, Step};
