//! The geometry capability set consumed by the layout core.
//!
//! The layout algorithm never touches a concrete rendering type. Anything
//! that can report sizes, move rectangles, keep footprint groups and answer
//! collision queries can be laid out; [`Canvas`](crate::canvas::Canvas) is
//! the in-memory implementation used by the pipeline and the tests.

use crate::{
    geometry::{Bounds, Point, Size},
    identifier::{GroupId, ShapeId},
};

/// Geometry and grouping operations over a set of rectangles.
///
/// Positions are top-left corners. Sizes are fixed for the duration of a
/// layout run.
pub trait GeometryProvider {
    /// Returns the current top-left position of a shape.
    fn position(&self, shape: ShapeId) -> Point;

    /// Moves a shape so its top-left corner is at `position`.
    fn set_position(&mut self, shape: ShapeId, position: Point);

    /// Returns the size of a shape.
    fn size(&self, shape: ShapeId) -> Size;

    /// Returns the current rectangle of a shape.
    fn bounds(&self, shape: ShapeId) -> Bounds {
        self.position(shape).to_bounds(self.size(shape))
    }

    /// Creates a new, empty footprint group.
    fn create_group(&mut self) -> GroupId;

    /// Adds a shape to a group.
    ///
    /// Membership is a set: returns `false` if the shape was already a member.
    fn add_to_group(&mut self, group: GroupId, shape: ShapeId) -> bool;

    /// Returns the members of a group in insertion order.
    fn group_members(&self, group: GroupId) -> Vec<ShapeId>;

    /// Returns the union of the rectangles of every member of a group.
    ///
    /// An empty or unknown group yields default (zero) bounds.
    fn group_bounds(&self, group: GroupId) -> Bounds {
        self.group_members(group)
            .into_iter()
            .map(|shape| self.bounds(shape))
            .reduce(|acc, bounds| acc.merge(&bounds))
            .unwrap_or_default()
    }

    /// Dissolves a group, returning its former members.
    ///
    /// Member positions are left untouched.
    fn dissolve_group(&mut self, group: GroupId) -> Vec<ShapeId>;

    /// Returns every other shape whose rectangle overlaps `shape`.
    ///
    /// The result may include shapes that are not part of a layout; callers
    /// restrict it to the shapes they placed.
    fn colliding(&self, shape: ShapeId) -> Vec<ShapeId>;
}
