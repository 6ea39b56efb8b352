//! Placement algorithm for the evading control.
//!
//! Given a [`Metrics`] snapshot, a [`PlacementMode`] and the control's current
//! position, compute the next top-left position. Every mode returns a point
//! inside the legal rectangle. Only [`PlacementMode::Random`] draws from the
//! random number generator; the other modes are fully deterministic.
//!
//! Random placement terminates after a bounded number of attempts and then
//! falls back to the legal rectangle's corners, so it always relocates the
//! control in bounded time.

use log::{debug, trace};
use rand::Rng;

use sidestep_core::geometry::{Bounds, Point};

use crate::{
    config::{EngineConfig, JumpConfig},
    metrics::Metrics,
};

/// Why a placement is requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementMode {
    /// First placement after mount, next to the reference rectangle.
    Initial,
    /// Keep an existing position legal after the container resized.
    Clamp,
    /// Evade: jump far away from the current position.
    Random,
}

/// Computes the next position for the given mode.
pub fn place<R: Rng + ?Sized>(
    metrics: &Metrics,
    mode: PlacementMode,
    current: Point,
    dodge_count: u32,
    config: &EngineConfig,
    rng: &mut R,
) -> Point {
    match mode {
        PlacementMode::Initial => initial_position(metrics, config.initial_gap()),
        PlacementMode::Clamp => clamped_position(metrics, current, config.overlap_padding()),
        PlacementMode::Random => random_position(metrics, current, dodge_count, config, rng),
    }
}

/// Places the control right of the reference rectangle, or left of it when
/// the right side does not fit, aligned with the reference's top edge.
///
/// Without a reference rectangle the control starts at the legal top-left corner.
///
/// # Examples
///
/// ```
/// # use sidestep::metrics::Metrics;
/// # use sidestep::placement::initial_position;
/// # use sidestep::geometry::{Bounds, Point, Size};
/// let metrics = Metrics::new(
///     Bounds::from_edges(12.0, 12.0, 788.0, 588.0),
///     Size::new(60.0, 36.0),
///     vec![Bounds::from_edges(300.0, 50.0, 380.0, 90.0)],
/// );
/// assert_eq!(initial_position(&metrics, 12.0), Point::new(392.0, 50.0));
/// ```
pub fn initial_position(metrics: &Metrics, gap: f32) -> Point {
    let legal = metrics.legal();
    let Some(reference) = metrics.reference() else {
        return legal.min_point();
    };

    let right_of = reference.max_x() + gap;
    let x = if right_of <= legal.max_x() {
        right_of
    } else {
        reference.min_x() - metrics.control().width() - gap
    };

    legal.clamp_point(Point::new(x, reference.min_y()))
}

/// Clamps `current` into the legal rectangle.
///
/// If the clamped position overlaps a protected rectangle, the control snaps
/// to the top-right legal corner instead.
pub fn clamped_position(metrics: &Metrics, current: Point, overlap_padding: f32) -> Point {
    let legal = metrics.legal();
    let clamped = legal.clamp_point(current);
    if !metrics.overlaps_protected(clamped, overlap_padding) {
        return clamped;
    }

    debug!(x = clamped.x(), y = clamped.y(); "Clamped position overlaps a protected region");
    Point::new(legal.max_x(), legal.min_y())
}

/// The smallest distance a random jump must cover for the given dodge count.
pub fn min_jump_distance(legal: Bounds, jump: &JumpConfig, dodge_count: u32) -> f32 {
    legal.diagonal() * jump.fraction_for(dodge_count)
}

/// Draws random candidates until one is far enough from `current` and clear
/// of every protected rectangle, then falls back to the farthest usable corner.
pub fn random_position<R: Rng + ?Sized>(
    metrics: &Metrics,
    current: Point,
    dodge_count: u32,
    config: &EngineConfig,
    rng: &mut R,
) -> Point {
    let legal = metrics.legal();
    let padding = config.overlap_padding();
    let min_jump = min_jump_distance(legal, config.jump(), dodge_count);

    for attempt in 0..config.retry_budget() {
        // Float sampling may round past the inclusive upper edge.
        let candidate = legal.clamp_point(Point::new(
            sample_axis(rng, legal.min_x(), legal.max_x()),
            sample_axis(rng, legal.min_y(), legal.max_y()),
        ));
        let distance = candidate.distance(current);
        if distance > 0.0
            && distance >= min_jump
            && !metrics.overlaps_protected(candidate, padding)
        {
            trace!(attempt, distance, min_jump; "Accepted random candidate");
            return candidate;
        }
        trace!(attempt, distance, min_jump; "Rejected random candidate");
    }

    debug!(retry_budget = config.retry_budget(), min_jump; "Retry budget exhausted, using corner fallback");
    farthest_corner(metrics, current, padding)
}

/// Picks the corner farthest from `current`, preferring corners that are clear
/// of protected rectangles and differ from `current`.
fn farthest_corner(metrics: &Metrics, current: Point, overlap_padding: f32) -> Point {
    let corners = metrics.legal().corners();
    let clear: Vec<Point> = corners
        .iter()
        .copied()
        .filter(|&corner| {
            corner != current && !metrics.overlaps_protected(corner, overlap_padding)
        })
        .collect();
    let candidates: &[Point] = if clear.is_empty() { &corners } else { &clear };

    let mut farthest = candidates[0];
    for &corner in &candidates[1..] {
        if corner.distance(current) > farthest.distance(current) {
            farthest = corner;
        }
    }
    farthest
}

fn sample_axis<R: Rng + ?Sized>(rng: &mut R, min: f32, max: f32) -> f32 {
    if max > min && (max - min).is_finite() {
        rng.random_range(min..=max)
    } else {
        min
    }
}


#[cfg(test)]
mod proptest_tests {
    use proptest::prelude::*;
    use rand::{SeedableRng, rngs::StdRng};

    use sidestep_core::geometry::Size;

    use super::*;

    // ===================
    // Strategies
    // ===================

    fn container_strategy() -> impl Strategy<Value = Size> {
        (0.0f32..2000.0, 0.0f32..2000.0).prop_map(|(w, h)| Size::new(w, h))
    }

    fn control_strategy() -> impl Strategy<Value = Size> {
        (0.0f32..200.0, 0.0f32..100.0).prop_map(|(w, h)| Size::new(w, h))
    }

    fn protected_strategy() -> impl Strategy<Value = Vec<Bounds>> {
        prop::collection::vec(
            (0.0f32..1500.0, 0.0f32..1500.0, 1.0f32..300.0, 1.0f32..200.0)
                .prop_map(|(x, y, w, h)| Bounds::from_edges(x, y, x + w, y + h)),
            0..3,
        )
    }

    fn metrics_strategy() -> impl Strategy<Value = Metrics> {
        (container_strategy(), control_strategy(), protected_strategy()).prop_map(
            |(container, control, protected)| {
                Metrics::from_container(container, control, 12.0, protected)
            },
        )
    }

    fn point_strategy() -> impl Strategy<Value = Point> {
        (-500.0f32..2500.0, -500.0f32..2500.0).prop_map(|(x, y)| Point::new(x, y))
    }

    fn mode_strategy() -> impl Strategy<Value = PlacementMode> {
        prop_oneof![
            Just(PlacementMode::Initial),
            Just(PlacementMode::Clamp),
            Just(PlacementMode::Random),
        ]
    }

    // ===================
    // Property Test Functions
    // ===================

    /// Every mode returns a point inside the legal rectangle.
    fn check_containment(
        metrics: &Metrics,
        mode: PlacementMode,
        current: Point,
        dodge_count: u32,
        seed: u64,
    ) -> Result<(), TestCaseError> {
        let mut rng = StdRng::seed_from_u64(seed);
        let next = place(
            metrics,
            mode,
            current,
            dodge_count,
            &EngineConfig::default(),
            &mut rng,
        );
        prop_assert!(
            metrics.legal().contains_point(next),
            "{:?} escaped {:?}",
            next,
            metrics.legal()
        );
        Ok(())
    }

    /// Random mode always moves when the legal rectangle has extent.
    fn check_progress(
        metrics: &Metrics,
        current: Point,
        dodge_count: u32,
        seed: u64,
    ) -> Result<(), TestCaseError> {
        prop_assume!(metrics.legal().has_area_or_span());
        let current = metrics.legal().clamp_point(current);
        let mut rng = StdRng::seed_from_u64(seed);
        let next = random_position(
            metrics,
            current,
            dodge_count,
            &EngineConfig::default(),
            &mut rng,
        );
        prop_assert_ne!(next, current);
        Ok(())
    }

    /// Initial and Clamp give identical answers for identical inputs.
    fn check_deterministic_modes(metrics: &Metrics, current: Point) -> Result<(), TestCaseError> {
        let config = EngineConfig::default();
        prop_assert_eq!(
            initial_position(metrics, config.initial_gap()),
            initial_position(metrics, config.initial_gap())
        );
        prop_assert_eq!(
            clamped_position(metrics, current, config.overlap_padding()),
            clamped_position(metrics, current, config.overlap_padding())
        );
        Ok(())
    }

    /// Escalated tiers demand a strictly longer jump when the rectangle has extent.
    fn check_escalation(metrics: &Metrics, early: u32, late: u32) -> Result<(), TestCaseError> {
        prop_assume!(metrics.legal().diagonal() > 0.0);
        let jump = JumpConfig::default();
        prop_assert!(
            min_jump_distance(metrics.legal(), &jump, late)
                > min_jump_distance(metrics.legal(), &jump, early)
        );
        Ok(())
    }

    // ===================
    // Proptest Wrappers
    // ===================

    proptest! {
        #[test]
        fn containment(metrics in metrics_strategy(), mode in mode_strategy(), current in point_strategy(), dodge_count in 0u32..20, seed in any::<u64>()) {
            check_containment(&metrics, mode, current, dodge_count, seed)?;
        }

        #[test]
        fn progress(metrics in metrics_strategy(), current in point_strategy(), dodge_count in 0u32..20, seed in any::<u64>()) {
            check_progress(&metrics, current, dodge_count, seed)?;
        }

        #[test]
        fn deterministic_modes(metrics in metrics_strategy(), current in point_strategy()) {
            check_deterministic_modes(&metrics, current)?;
        }

        #[test]
        fn escalation(metrics in metrics_strategy(), early in 0u32..3, late in 3u32..50) {
            check_escalation(&metrics, early, late)?;
        }
    }
}
