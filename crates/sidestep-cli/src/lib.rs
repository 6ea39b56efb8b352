//! CLI logic for the Sidestep placement engine.
//!
//! The CLI replays a scene file through a [`Session`] and reports where the
//! control ended up. Scenes without an event script get a synthetic chase:
//! a mount followed by a run of pointer-enter triggers.

pub mod error_adapter;

mod args;
mod config;
mod error;

pub use args::Args;
pub use error::CliError;

use std::{fmt, time::Instant};

use log::{debug, info};
use rand::Rng;

use sidestep::{
    Session,
    export::TrailSvg,
    geometry::Point,
    scene::SceneEvent,
    trigger::TriggerKind,
};

/// Time between synthetic triggers, well outside the default debounce window.
const CHASE_INTERVAL_MS: u64 = 400;

/// Outcome of a replayed scene.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    steps: usize,
    dodges: u32,
    position: Point,
    label: String,
    easter_egg_visible: bool,
    accepted: bool,
}

impl Summary {
    fn from_session<R: Rng>(session: &Session<R>) -> Self {
        Self {
            steps: session.steps().len(),
            dodges: session.dodge_count(),
            position: session.position(),
            label: session.label().to_string(),
            easter_egg_visible: session.is_easter_egg_visible(),
            accepted: session.is_accepted(),
        }
    }

    /// Number of placements applied.
    pub fn steps(&self) -> usize {
        self.steps
    }

    pub fn dodges(&self) -> u32 {
        self.dodges
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn easter_egg_visible(&self) -> bool {
        self.easter_egg_visible
    }

    pub fn accepted(&self) -> bool {
        self.accepted
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} placements, {} dodges, control at ({:.1}, {:.1}) labelled {:?}",
            self.steps,
            self.dodges,
            self.position.x(),
            self.position.y(),
            self.label
        )?;
        if self.easter_egg_visible {
            write!(f, ", easter egg revealed")?;
        }
        if self.accepted {
            write!(f, ", accepted")?;
        }
        Ok(())
    }
}

/// Run the Sidestep CLI application
///
/// Loads the configuration and scene, replays the scene's events and
/// optionally writes the dodge trail as SVG.
///
/// # Arguments
///
/// * `args` - Command-line arguments
///
/// # Errors
///
/// Returns [`CliError`] for:
/// - Missing or unreadable files
/// - Malformed TOML
/// - Invalid configuration or scene values
/// - SVG export errors
pub fn run(args: &Args) -> Result<Summary, CliError> {
    info!(scene_path = args.scene; "Replaying scene");

    let app_config = config::load_config(args.config.as_ref())?;
    let mut scene = config::load_scene(&args.scene)?;

    if scene.events().is_empty() {
        info!(dodges = args.dodges; "Scene has no event script, simulating a chase");
        scene = scene.with_events(chase_script(args.dodges));
    }

    let summary = match args.seed {
        Some(seed) => {
            debug!(seed; "Using seeded randomness");
            replay(Session::seeded(&app_config, scene, seed), args)?
        }
        None => replay(Session::new(&app_config, scene), args)?,
    };

    info!(summary:%; "Scene replayed");
    Ok(summary)
}

fn replay<R: Rng>(mut session: Session<R>, args: &Args) -> Result<Summary, CliError> {
    session.replay(Instant::now());

    if let Some(output) = &args.output {
        TrailSvg::new(session.scene(), session.steps()).write(output)?;
        info!(output_file = output; "SVG trail exported successfully");
    }

    Ok(Summary::from_session(&session))
}

/// A mount followed by `dodges` pointer-enter triggers.
fn chase_script(dodges: u32) -> Vec<SceneEvent> {
    std::iter::once(SceneEvent::Mount)
        .chain((1..=u64::from(dodges)).map(|i| SceneEvent::Trigger {
            trigger: TriggerKind::PointerEnter,
            at_ms: i * CHASE_INTERVAL_MS,
        }))
        .collect()
}
