//! Direction-driven placement of one rectangle next to another.
//!
//! [`calculate_position`] is a pure function. It looks at the current
//! rectangle and footprint of both ends of an edge and returns the top-left
//! corner the newly placed end should move to.
//!
//! Each axis is handled on its own, by the step the travel direction takes
//! along it:
//!
//! ```text
//!   step  0   centered:  anchor.min + anchor.extent / 2 - placed.extent / 2
//!   step +1   after:     anchor.max + spacing + margins
//!   step -1   before:    anchor.min - spacing - margins - placed.extent
//! ```
//!
//! Cardinal directions center on one axis and step on the other; diagonal
//! directions step on both, which puts the placed corner diagonally across
//! from the anchor's opposite corner.
//!
//! The margins are the amount a footprint sticks out past its own rectangle
//! on the side facing the gap: the anchor's footprint on the side being
//! moved into, and the placed node's footprint on the side facing the
//! anchor. Without them a rectangle placed against a bare edge would land on
//! top of siblings already merged into that footprint.

use compass_core::{
    direction::Direction,
    geometry::{Bounds, Point},
};

/// Which end of an edge is being positioned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementMode {
    /// The child is already placed; position the parent against it using
    /// the inverted direction.
    ParentRelativeToChild,
    /// The parent is already placed; position the child against it using the
    /// stored direction.
    ChildRelativeToParent,
}

/// Current geometry of one end of an edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeGeometry {
    bounds: Bounds,
    footprint: Bounds,
}

impl NodeGeometry {
    /// Creates the geometry of a node from its rectangle and footprint.
    ///
    /// The footprint is widened to include `bounds` if it does not already.
    pub fn new(bounds: Bounds, footprint: Bounds) -> Self {
        Self {
            bounds,
            footprint: footprint.merge(&bounds),
        }
    }

    /// Geometry of a node whose footprint is just its own rectangle.
    pub fn single(bounds: Bounds) -> Self {
        Self {
            bounds,
            footprint: bounds,
        }
    }

    /// Returns the node's own rectangle.
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Returns the node's footprint.
    pub fn footprint(&self) -> Bounds {
        self.footprint
    }
}

/// One axis of a rectangle and its footprint.
#[derive(Debug, Clone, Copy)]
struct Span {
    min: f32,
    max: f32,
    footprint_min: f32,
    footprint_max: f32,
}

impl Span {
    fn horizontal(geometry: &NodeGeometry) -> Self {
        Self {
            min: geometry.bounds.min_x(),
            max: geometry.bounds.max_x(),
            footprint_min: geometry.footprint.min_x(),
            footprint_max: geometry.footprint.max_x(),
        }
    }

    fn vertical(geometry: &NodeGeometry) -> Self {
        Self {
            min: geometry.bounds.min_y(),
            max: geometry.bounds.max_y(),
            footprint_min: geometry.footprint.min_y(),
            footprint_max: geometry.footprint.max_y(),
        }
    }

    fn extent(self) -> f32 {
        self.max - self.min
    }

    fn footprint_extent(self) -> f32 {
        self.footprint_max - self.footprint_min
    }

    /// How far the footprint reaches past the rectangle, counted only when
    /// it sticks out on the given side.
    fn margin(self, sticks_out: bool) -> f32 {
        if sticks_out {
            self.footprint_extent() - self.extent()
        } else {
            0.0
        }
    }

    fn sticks_out_before(self) -> bool {
        self.footprint_min < self.min
    }

    fn sticks_out_after(self) -> bool {
        self.footprint_max > self.max
    }
}

/// Returns the new start coordinate of `placed` along one axis.
fn place_on_axis(step: i8, anchor: Span, placed: Span, min_spacing: f32) -> f32 {
    match step.signum() {
        0 => anchor.min + anchor.extent() / 2.0 - placed.extent() / 2.0,
        1 => {
            anchor.max
                + min_spacing
                + anchor.margin(anchor.sticks_out_after())
                + placed.margin(placed.sticks_out_before())
        }
        _ => {
            anchor.min
                - min_spacing
                - anchor.margin(anchor.sticks_out_before())
                - placed.margin(placed.sticks_out_after())
                - placed.extent()
        }
    }
}

/// Places `placed` next to `anchor`, travelling from the anchor in `direction`.
fn place(anchor: &NodeGeometry, placed: &NodeGeometry, direction: Direction, min_spacing: f32) -> Point {
    let x = place_on_axis(
        direction.step_x(),
        Span::horizontal(anchor),
        Span::horizontal(placed),
        min_spacing,
    );
    let y = place_on_axis(
        direction.step_y(),
        Span::vertical(anchor),
        Span::vertical(placed),
        min_spacing,
    );
    Point::new(x, y)
}

/// Computes the new top-left corner for one end of a parent-to-child edge.
///
/// `direction` is the edge direction as stored on the parent. With
/// [`PlacementMode::ChildRelativeToParent`] the result is the child's new
/// position; with [`PlacementMode::ParentRelativeToChild`] it is the
/// parent's, computed with the inverted direction.
///
/// # Examples
///
/// ```
/// use compass::position::{NodeGeometry, PlacementMode, calculate_position};
/// use compass_core::{direction::Direction, geometry::{Point, Size}};
///
/// let parent = NodeGeometry::single(Point::new(0.0, 0.0).to_bounds(Size::new(12.0, 4.0)));
/// let child = NodeGeometry::single(Point::new(0.0, 0.0).to_bounds(Size::new(4.0, 4.0)));
///
/// let position = calculate_position(
///     parent,
///     child,
///     Direction::S,
///     10.0,
///     PlacementMode::ChildRelativeToParent,
/// );
/// assert_eq!(position, Point::new(4.0, 14.0));
/// ```
pub fn calculate_position(
    parent: NodeGeometry,
    child: NodeGeometry,
    direction: Direction,
    min_spacing: f32,
    mode: PlacementMode,
) -> Point {
    match mode {
        PlacementMode::ParentRelativeToChild => {
            place(&child, &parent, direction.opposite(), min_spacing)
        }
        PlacementMode::ChildRelativeToParent => place(&parent, &child, direction, min_spacing),
    }
}


#[cfg(test)]
mod proptest_tests {
    use float_cmp::approx_eq;
    use proptest::prelude::*;

    use compass_core::geometry::Size;

    use super::*;

    fn rect_strategy() -> impl Strategy<Value = Bounds> {
        (
            -500.0f32..500.0,
            -500.0f32..500.0,
            1.0f32..200.0,
            1.0f32..200.0,
        )
            .prop_map(|(x, y, w, h)| Point::new(x, y).to_bounds(Size::new(w, h)))
    }

    fn direction_strategy() -> impl Strategy<Value = Direction> {
        prop::sample::select(Direction::ALL.to_vec())
    }

    fn cardinal_strategy() -> impl Strategy<Value = Direction> {
        prop::sample::select(Direction::CARDINAL.to_vec())
    }

    /// The perpendicular coordinate of a cardinal child is the parent's
    /// plus half the extent difference.
    fn check_centering_law(
        parent: Bounds,
        child: Bounds,
        direction: Direction,
        spacing: f32,
    ) -> Result<(), TestCaseError> {
        let position = calculate_position(
            NodeGeometry::single(parent),
            NodeGeometry::single(child),
            direction,
            spacing,
            PlacementMode::ChildRelativeToParent,
        );

        if direction.step_x() == 0 {
            let expected = parent.min_x() + (parent.width() - child.width()) / 2.0;
            prop_assert!(approx_eq!(f32, position.x(), expected, epsilon = 0.01));
        } else {
            let expected = parent.min_y() + (parent.height() - child.height()) / 2.0;
            prop_assert!(approx_eq!(f32, position.y(), expected, epsilon = 0.01));
        }
        Ok(())
    }

    /// Placing the parent against the child with `d` equals placing a child
    /// against a parent with `d.opposite()` once the roles are swapped.
    fn check_inversion_law(
        first: Bounds,
        second: Bounds,
        direction: Direction,
        spacing: f32,
    ) -> Result<(), TestCaseError> {
        let first = NodeGeometry::single(first);
        let second = NodeGeometry::single(second);

        let as_parent = calculate_position(
            first,
            second,
            direction,
            spacing,
            PlacementMode::ParentRelativeToChild,
        );
        let as_child = calculate_position(
            second,
            first,
            direction.opposite(),
            spacing,
            PlacementMode::ChildRelativeToParent,
        );

        prop_assert!(approx_eq!(f32, as_parent.x(), as_child.x(), epsilon = 0.01));
        prop_assert!(approx_eq!(f32, as_parent.y(), as_child.y(), epsilon = 0.01));
        Ok(())
    }

    /// With positive spacing the placed rectangle never overlaps the anchor's
    /// footprint.
    fn check_clears_anchor_footprint(
        anchor: Bounds,
        extra: Bounds,
        placed: Bounds,
        direction: Direction,
        spacing: f32,
    ) -> Result<(), TestCaseError> {
        let anchor_geometry = NodeGeometry::new(anchor, anchor.merge(&extra));
        let position = calculate_position(
            anchor_geometry,
            NodeGeometry::single(placed),
            direction,
            spacing,
            PlacementMode::ChildRelativeToParent,
        );

        let placed_at = position.to_bounds(placed.to_size());
        prop_assert!(!placed_at.intersects(&anchor));
        prop_assert!(!placed_at.intersects(&anchor_geometry.footprint()));
        Ok(())
    }

    proptest! {
        #[test]
        fn centering_law(
            parent in rect_strategy(),
            child in rect_strategy(),
            direction in cardinal_strategy(),
            spacing in 0.0f32..100.0,
        ) {
            check_centering_law(parent, child, direction, spacing)?;
        }

        #[test]
        fn inversion_law(
            first in rect_strategy(),
            second in rect_strategy(),
            direction in direction_strategy(),
            spacing in 0.0f32..100.0,
        ) {
            check_inversion_law(first, second, direction, spacing)?;
        }

        #[test]
        fn clears_anchor_footprint(
            anchor in rect_strategy(),
            extra in rect_strategy(),
            placed in rect_strategy(),
            direction in direction_strategy(),
            spacing in 1.0f32..100.0,
        ) {
            check_clears_anchor_footprint(anchor, extra, placed, direction, spacing)?;
        }
    }
}
