//! Declarative scene descriptions.
//!
//! A [`Scene`] describes the hosting page in geometric terms: the container,
//! the evading control, the accept control and an optional easter-egg block,
//! plus a script of [`SceneEvent`]s to replay. Scenes deserialize from any
//! serde format; the CLI reads them from TOML:
//!
//! ```toml
//! container = { width = 800.0, height = 600.0 }
//! control = { width = 60.0, height = 36.0 }
//! accept = { left = 300.0, top = 50.0, right = 380.0, bottom = 90.0 }
//!
//! [[events]]
//! kind = "mount"
//!
//! [[events]]
//! kind = "trigger"
//! trigger = "pointer_down"
//! at_ms = 400
//! ```

use serde::Deserialize;

use sidestep_core::geometry::{Bounds, Size};

use crate::{error::SidestepError, metrics::LayoutHost, trigger::TriggerKind};

/// One step of a scene script.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SceneEvent {
    /// The page finished its first layout pass.
    Mount,
    /// The container changed size.
    Resize { width: f32, height: f32 },
    /// A pointer, touch or focus event reached the control.
    Trigger {
        trigger: TriggerKind,
        /// Milliseconds since the start of the script.
        #[serde(default)]
        at_ms: u64,
    },
    /// The accept control was activated.
    Accept,
}

/// Geometry of a hosting page and the events to replay against it.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Scene {
    container: Size,
    control: Size,
    accept: Bounds,
    #[serde(default)]
    easter_egg: Option<Bounds>,
    #[serde(default)]
    events: Vec<SceneEvent>,
}

impl Scene {
    /// Creates a scene without an easter egg or events.
    pub fn new(container: Size, control: Size, accept: Bounds) -> Self {
        Self {
            container,
            control,
            accept,
            easter_egg: None,
            events: Vec::new(),
        }
    }

    /// Adds an easter-egg region (builder style).
    pub fn with_easter_egg(mut self, bounds: Bounds) -> Self {
        self.easter_egg = Some(bounds);
        self
    }

    /// Replaces the event script (builder style).
    pub fn with_events(mut self, events: Vec<SceneEvent>) -> Self {
        self.events = events;
        self
    }

    pub fn container(&self) -> Size {
        self.container
    }

    pub fn control(&self) -> Size {
        self.control
    }

    pub fn accept(&self) -> Bounds {
        self.accept
    }

    pub fn easter_egg(&self) -> Option<Bounds> {
        self.easter_egg
    }

    pub fn events(&self) -> &[SceneEvent] {
        &self.events
    }

    /// Rejects negative sizes and inverted rectangles.
    ///
    /// # Errors
    ///
    /// Returns [`SidestepError::Scene`] describing the first invalid value.
    pub fn validate(&self) -> Result<(), SidestepError> {
        check_size("container", self.container)?;
        check_size("control", self.control)?;
        check_bounds("accept", self.accept)?;
        if let Some(egg) = self.easter_egg {
            check_bounds("easter_egg", egg)?;
        }
        for (index, event) in self.events.iter().enumerate() {
            if let SceneEvent::Resize { width, height } = *event {
                check_size(&format!("events[{index}]"), Size::new(width, height))?;
            }
        }
        Ok(())
    }
}

/// A scene on its own is a fully mounted page with the easter egg hidden.
impl LayoutHost for Scene {
    fn container_size(&self) -> Option<Size> {
        Some(self.container)
    }

    fn control_size(&self) -> Option<Size> {
        Some(self.control)
    }

    fn protected_regions(&self) -> Vec<Bounds> {
        vec![self.accept]
    }
}

fn check_size(name: &str, size: Size) -> Result<(), SidestepError> {
    if size.is_valid() && size.width().is_finite() && size.height().is_finite() {
        Ok(())
    } else {
        Err(SidestepError::Scene(format!(
            "`{name}` must have finite, non-negative width and height, got {}x{}",
            size.width(),
            size.height()
        )))
    }
}

fn check_bounds(name: &str, bounds: Bounds) -> Result<(), SidestepError> {
    if bounds.is_well_formed() {
        Ok(())
    } else {
        Err(SidestepError::Scene(format!(
            "`{name}` has right/bottom edges before its left/top edges"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valentine() -> Scene {
        Scene::new(
            Size::new(800.0, 600.0),
            Size::new(60.0, 36.0),
            Bounds::from_edges(300.0, 50.0, 380.0, 90.0),
        )
    }

    #[test]
    fn test_valid_scene() {
        let scene = valentine()
            .with_easter_egg(Bounds::from_edges(200.0, 300.0, 600.0, 330.0))
            .with_events(vec![
                SceneEvent::Mount,
                SceneEvent::Resize {
                    width: 400.0,
                    height: 300.0,
                },
            ]);
        assert!(scene.validate().is_ok());
    }

    #[test]
    fn test_negative_container_rejected() {
        let scene = Scene::new(
            Size::new(-1.0, 600.0),
            Size::new(60.0, 36.0),
            Bounds::from_edges(300.0, 50.0, 380.0, 90.0),
        );
        let err = scene.validate().expect_err("negative width");
        assert!(err.to_string().contains("container"), "{err}");
    }

    #[test]
    fn test_inverted_easter_egg_rejected() {
        let scene = valentine().with_easter_egg(Bounds::from_edges(600.0, 300.0, 200.0, 330.0));
        let err = scene.validate().expect_err("inverted bounds");
        assert!(err.to_string().contains("easter_egg"), "{err}");
    }

    #[test]
    fn test_invalid_resize_event_rejected() {
        let scene = valentine().with_events(vec![
            SceneEvent::Mount,
            SceneEvent::Resize {
                width: 10.0,
                height: f32::INFINITY,
            },
        ]);
        let err = scene.validate().expect_err("infinite height");
        assert!(err.to_string().contains("events[1]"), "{err}");
    }

    #[test]
    fn test_scene_as_static_host() {
        let scene = valentine();
        assert_eq!(scene.container_size(), Some(Size::new(800.0, 600.0)));
        assert_eq!(scene.control_size(), Some(Size::new(60.0, 36.0)));
        assert_eq!(scene.protected_regions(), vec![scene.accept()]);
    }
}
