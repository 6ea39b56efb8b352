//! SVG rendering of a session's dodge trail.
//!
//! The document shows the initial container, the protected regions, every
//! placed control as a numbered box, and a polyline joining the placements in
//! order. Useful for eyeballing how jumpy a configuration feels.

use std::{fs::File, io::Write, path::Path};

use log::{debug, error, info};
use svg::{
    Document,
    node::element::{Group, Polyline, Rectangle, Text},
};

use sidestep_core::geometry::{Bounds, Point};

use crate::{error::SidestepError, scene::Scene, session::Step};

const MARGIN: f32 = 20.0;
const FONT_FAMILY: &str = "Arial";

/// Renders a dodge trail over its scene.
#[derive(Debug)]
pub struct TrailSvg<'a> {
    scene: &'a Scene,
    steps: &'a [Step],
}

impl<'a> TrailSvg<'a> {
    pub fn new(scene: &'a Scene, steps: &'a [Step]) -> Self {
        Self { scene, steps }
    }

    /// Builds the SVG document.
    pub fn render(&self) -> Document {
        let content = self.content_bounds();
        let width = content.width() + MARGIN * 2.0;
        let height = content.height() + MARGIN * 2.0;

        let mut main_group = Group::new().set(
            "transform",
            format!(
                "translate({}, {})",
                MARGIN - content.min_x(),
                MARGIN - content.min_y()
            ),
        );

        main_group = main_group.add(
            rect(Bounds::new_from_top_left(
                Point::default(),
                self.scene.container(),
            ))
            .set("fill", "#fff7f9")
            .set("stroke", "#d4a5b0"),
        );

        main_group = main_group.add(
            rect(self.scene.accept())
                .set("fill", "#e8466a")
                .set("rx", 6.0),
        );
        if let Some(egg) = self.scene.easter_egg() {
            main_group = main_group.add(
                rect(egg)
                    .set("fill", "none")
                    .set("stroke", "#e8466a")
                    .set("stroke-dasharray", "4 3"),
            );
        }

        let points = self
            .steps
            .iter()
            .map(|step| {
                let center = step.position().to_bounds(self.scene.control());
                format!(
                    "{},{}",
                    (center.min_x() + center.max_x()) / 2.0,
                    (center.min_y() + center.max_y()) / 2.0
                )
            })
            .collect::<Vec<_>>()
            .join(" ");
        main_group = main_group.add(
            Polyline::new()
                .set("points", points)
                .set("fill", "none")
                .set("stroke", "#8a8a8a")
                .set("stroke-dasharray", "2 2"),
        );

        for (index, step) in self.steps.iter().enumerate() {
            main_group = main_group.add(self.render_step(index, step));
        }

        debug!(steps = self.steps.len(), width, height; "Trail rendered");

        Document::new()
            .set("viewBox", format!("0 0 {width} {height}"))
            .set("width", width)
            .set("height", height)
            .add(main_group)
    }

    /// Writes the rendered document to `path`.
    ///
    /// # Errors
    ///
    /// Returns [`SidestepError::Export`] if no placement was recorded, and
    /// [`SidestepError::Io`] if the file cannot be created or written.
    pub fn write(&self, path: impl AsRef<Path>) -> Result<(), SidestepError> {
        if self.steps.is_empty() {
            return Err(SidestepError::Export(
                "trail has no placements to draw".to_string(),
            ));
        }

        let path = path.as_ref();
        let file_name = path.display().to_string();
        info!(file_name, steps = self.steps.len(); "Creating SVG file");

        let doc = self.render();
        let mut file = File::create(path).map_err(|err| {
            error!(file_name, err:err; "Failed to create SVG file");
            err
        })?;
        write!(file, "{doc}").map_err(|err| {
            error!(file_name, err:err; "Failed to write SVG content");
            err
        })?;
        Ok(())
    }

    fn render_step(&self, index: usize, step: &Step) -> Group {
        let bounds = step.position().to_bounds(self.scene.control());
        // Later steps are drawn more opaque.
        let opacity = (index + 1) as f32 / self.steps.len().max(1) as f32;
        let label = Text::new((index + 1).to_string())
            .set("x", (bounds.min_x() + bounds.max_x()) / 2.0)
            .set("y", (bounds.min_y() + bounds.max_y()) / 2.0)
            .set("text-anchor", "middle")
            .set("dominant-baseline", "middle")
            .set("font-family", FONT_FAMILY)
            .set("font-size", 12);

        Group::new()
            .set("data-mode", format!("{:?}", step.mode()).to_lowercase())
            .add(
                rect(bounds)
                    .set("fill", "#ffffff")
                    .set("fill-opacity", opacity)
                    .set("stroke", "#333333")
                    .set("rx", 4.0),
            )
            .add(label)
    }

    fn content_bounds(&self) -> Bounds {
        let origin = Point::default();
        let container = Bounds::new_from_top_left(origin, self.scene.container());
        self.steps
            .iter()
            .map(|step| step.position().to_bounds(self.scene.control()))
            .chain(
                self.steps
                    .iter()
                    .map(|step| Bounds::new_from_top_left(origin, step.container())),
            )
            .chain(std::iter::once(self.scene.accept()))
            .chain(self.scene.easter_egg())
            .fold(container, Bounds::merge)
    }
}

fn rect(bounds: Bounds) -> Rectangle {
    Rectangle::new()
        .set("x", bounds.min_x())
        .set("y", bounds.min_y())
        .set("width", bounds.width())
        .set("height", bounds.height())
}
