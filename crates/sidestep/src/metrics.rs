//! Metrics gathering from the hosting layer.
//!
//! The engine never caches layout state. Before every placement it asks the
//! host for a fresh [`Metrics`] snapshot, because the container can resize and
//! protected regions can appear between two events.

use log::trace;

use sidestep_core::geometry::{Bounds, Insets, Point, Size};

/// The hosting layer as seen by the engine.
///
/// A host reports sizes and bounding boxes after its own layout pass. Returning
/// `None` from either size method means the elements are not measurable yet;
/// the engine then skips placement and waits for the next trigger.
pub trait LayoutHost {
    /// Size of the area the control moves within.
    fn container_size(&self) -> Option<Size>;

    /// Post-layout size of the movable control.
    fn control_size(&self) -> Option<Size>;

    /// Rectangles the control must not cover, in host coordinates.
    ///
    /// The first rectangle is the reference for initial placement.
    fn protected_regions(&self) -> Vec<Bounds>;
}

/// A snapshot of everything placement depends on.
#[derive(Debug, Clone, PartialEq)]
pub struct Metrics {
    legal: Bounds,
    control: Size,
    protected: Vec<Bounds>,
}

impl Metrics {
    /// Creates a snapshot from an explicit legal rectangle.
    ///
    /// Maximum edges below their minimum are raised to the minimum, so the
    /// legal rectangle is always well formed.
    pub fn new(legal: Bounds, control: Size, protected: Vec<Bounds>) -> Self {
        let legal = Bounds::from_edges(
            legal.min_x(),
            legal.min_y(),
            legal.max_x().max(legal.min_x()),
            legal.max_y().max(legal.min_y()),
        );
        Self {
            legal,
            control,
            protected,
        }
    }

    /// Derives the legal rectangle for the control's top-left corner from the
    /// container size, the control size and the edge padding.
    ///
    /// # Examples
    ///
    /// ```
    /// # use sidestep::metrics::Metrics;
    /// # use sidestep::geometry::Size;
    /// // Container too narrow for the control: max_x collapses onto min_x.
    /// let metrics = Metrics::from_container(Size::new(79.0, 600.0), Size::new(60.0, 36.0), 12.0, Vec::new());
    /// assert_eq!(metrics.legal().min_x(), 12.0);
    /// assert_eq!(metrics.legal().max_x(), 12.0);
    /// ```
    pub fn from_container(
        container: Size,
        control: Size,
        edge_padding: f32,
        protected: Vec<Bounds>,
    ) -> Self {
        let inset = Insets::uniform(edge_padding);
        let legal = Bounds::from_edges(
            inset.left(),
            inset.top(),
            container.width() - control.width() - inset.right(),
            container.height() - control.height() - inset.bottom(),
        );
        Self::new(legal, control, protected)
    }

    /// Reads a fresh snapshot from the host.
    ///
    /// Returns `None` when the host has not measured the container or the
    /// control yet.
    pub fn gather<H: LayoutHost + ?Sized>(host: &H, edge_padding: f32) -> Option<Self> {
        let Some(container) = host.container_size() else {
            trace!("Container not measured yet");
            return None;
        };
        let Some(control) = host.control_size() else {
            trace!("Control not mounted yet");
            return None;
        };
        Some(Self::from_container(
            container,
            control,
            edge_padding,
            host.protected_regions(),
        ))
    }

    /// The rectangle the control's top-left corner may occupy.
    pub fn legal(&self) -> Bounds {
        self.legal
    }

    /// Size of the movable control.
    pub fn control(&self) -> Size {
        self.control
    }

    /// All protected rectangles, in host order.
    pub fn protected(&self) -> &[Bounds] {
        &self.protected
    }

    /// The primary reference rectangle used by initial placement.
    pub fn reference(&self) -> Option<Bounds> {
        self.protected.first().copied()
    }

    /// Returns true if the control placed at `position` would overlap any
    /// protected rectangle inflated by `overlap_padding`.
    pub fn overlaps_protected(&self, position: Point, overlap_padding: f32) -> bool {
        let control = position.to_bounds(self.control);
        let padding = Insets::uniform(overlap_padding);
        self.protected
            .iter()
            .any(|region| control.intersects(region.add_padding(padding)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct StaticHost {
        container: Option<Size>,
        control: Option<Size>,
        protected: Vec<Bounds>,
    }

    impl LayoutHost for StaticHost {
        fn container_size(&self) -> Option<Size> {
            self.container
        }

        fn control_size(&self) -> Option<Size> {
            self.control
        }

        fn protected_regions(&self) -> Vec<Bounds> {
            self.protected.clone()
        }
    }

    #[test]
    fn test_legal_rectangle_from_container() {
        let metrics = Metrics::from_container(
            Size::new(800.0, 600.0),
            Size::new(60.0, 36.0),
            12.0,
            Vec::new(),
        );
        assert_eq!(
            metrics.legal(),
            Bounds::from_edges(12.0, 12.0, 728.0, 552.0)
        );
    }

    #[test]
    fn test_zero_size_control_spans_padded_container() {
        let metrics =
            Metrics::from_container(Size::new(800.0, 600.0), Size::default(), 12.0, Vec::new());
        assert_eq!(
            metrics.legal(),
            Bounds::from_edges(12.0, 12.0, 788.0, 588.0)
        );
    }

    #[test]
    fn test_shrunk_container_clamps_to_min() {
        // Computed max_x is 79 - 60 - 12 = 7, five below min_x.
        let metrics = Metrics::from_container(
            Size::new(79.0, 40.0),
            Size::new(60.0, 36.0),
            12.0,
            Vec::new(),
        );
        assert_eq!(metrics.legal().max_x(), 12.0);
        assert_eq!(metrics.legal().max_y(), 12.0);
        assert!(metrics.legal().is_well_formed());
    }

    #[test]
    fn test_new_normalizes_inverted_edges() {
        let metrics = Metrics::new(
            Bounds::from_edges(12.0, 12.0, 7.0, 300.0),
            Size::default(),
            Vec::new(),
        );
        assert_eq!(
            metrics.legal(),
            Bounds::from_edges(12.0, 12.0, 12.0, 300.0)
        );
    }

    #[test]
    fn test_gather_unavailable_without_control() {
        let host = StaticHost {
            container: Some(Size::new(800.0, 600.0)),
            control: None,
            protected: Vec::new(),
        };
        assert!(Metrics::gather(&host, 12.0).is_none());
    }

    #[test]
    fn test_gather_unavailable_without_container() {
        let host = StaticHost {
            container: None,
            control: Some(Size::new(60.0, 36.0)),
            protected: Vec::new(),
        };
        assert!(Metrics::gather(&host, 12.0).is_none());
    }

    #[test]
    fn test_gather_reads_protected_in_order() {
        let accept = Bounds::from_edges(300.0, 50.0, 380.0, 90.0);
        let egg = Bounds::from_edges(20.0, 400.0, 300.0, 430.0);
        let host = StaticHost {
            container: Some(Size::new(800.0, 600.0)),
            control: Some(Size::new(60.0, 36.0)),
            protected: vec![accept, egg],
        };
        let metrics = Metrics::gather(&host, 12.0).expect("host is measured");
        assert_eq!(metrics.protected(), &[accept, egg]);
        assert_eq!(metrics.reference(), Some(accept));
        assert_eq!(metrics.control(), Size::new(60.0, 36.0));
    }

    #[test]
    fn test_overlaps_protected_uses_padding() {
        let metrics = Metrics::new(
            Bounds::from_edges(12.0, 12.0, 788.0, 588.0),
            Size::default(),
            vec![Bounds::from_edges(100.0, 100.0, 200.0, 140.0)],
        );
        // Inside the padded band but outside the raw rectangle.
        assert!(metrics.overlaps_protected(Point::new(95.0, 120.0), 8.0));
        assert!(!metrics.overlaps_protected(Point::new(95.0, 120.0), 0.0));
        // Well clear of the padded rectangle.
        assert!(!metrics.overlaps_protected(Point::new(300.0, 300.0), 8.0));
    }

    #[test]
    fn test_overlaps_protected_accounts_for_control_size() {
        let metrics = Metrics::new(
            Bounds::from_edges(12.0, 12.0, 728.0, 552.0),
            Size::new(60.0, 36.0),
            vec![Bounds::from_edges(300.0, 50.0, 380.0, 90.0)],
        );
        // Control's right edge reaches x = 295, inside the padded left edge at 292.
        assert!(metrics.overlaps_protected(Point::new(235.0, 60.0), 8.0));
        // Control's right edge at 290 stays left of 292.
        assert!(!metrics.overlaps_protected(Point::new(230.0, 60.0), 8.0));
    }
}
