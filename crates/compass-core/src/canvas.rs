//! In-memory [`GeometryProvider`] implementation.

use indexmap::IndexSet;
use log::trace;

use crate::{
    geometry::{Point, Size},
    identifier::{GroupId, ShapeId},
    provider::GeometryProvider,
};

#[derive(Debug, Clone)]
struct ShapeEntry {
    position: Point,
    size: Size,
}

/// A flat collection of rectangles with footprint groups.
///
/// Shapes are stored in insertion order and never removed, so the n-th call
/// to [`Canvas::add_shape`] returns `ShapeId::new(n)`. Dissolved groups leave
/// a tombstone and their ids are never reused.
///
/// # Examples
///
/// ```
/// use compass_core::{
///     canvas::Canvas,
///     geometry::{Point, Size},
///     provider::GeometryProvider,
/// };
///
/// let mut canvas = Canvas::new();
/// let a = canvas.add_shape(Size::new(10.0, 10.0));
/// let b = canvas.add_shape(Size::new(10.0, 10.0));
///
/// // Both shapes start at the origin and overlap.
/// assert_eq!(canvas.colliding(a), vec![b]);
///
/// canvas.set_position(b, Point::new(20.0, 0.0));
/// assert!(canvas.colliding(a).is_empty());
/// ```
#[derive(Debug, Clone, Default)]
pub struct Canvas {
    shapes: Vec<ShapeEntry>,
    groups: Vec<Option<IndexSet<ShapeId>>>,
}

impl Canvas {
    /// Creates an empty canvas.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a shape of the given size at the origin.
    pub fn add_shape(&mut self, size: Size) -> ShapeId {
        let id = ShapeId::new(self.shapes.len());
        self.shapes.push(ShapeEntry {
            position: Point::default(),
            size,
        });
        id
    }

    /// Returns the number of shapes on the canvas.
    pub fn shape_count(&self) -> usize {
        self.shapes.len()
    }

    /// Returns the number of groups that have not been dissolved.
    pub fn live_group_count(&self) -> usize {
        self.groups.iter().filter(|group| group.is_some()).count()
    }

    /// Iterates over every shape id in insertion order.
    pub fn shapes(&self) -> impl Iterator<Item = ShapeId> + '_ {
        (0..self.shapes.len()).map(ShapeId::new)
    }

    fn entry(&self, shape: ShapeId) -> Option<&ShapeEntry> {
        self.shapes.get(shape.index())
    }

    fn group(&self, group: GroupId) -> Option<&IndexSet<ShapeId>> {
        self.groups.get(group.index()).and_then(Option::as_ref)
    }
}

impl GeometryProvider for Canvas {
    fn position(&self, shape: ShapeId) -> Point {
        self.entry(shape)
            .map(|entry| entry.position)
            .unwrap_or_default()
    }

    fn set_position(&mut self, shape: ShapeId, position: Point) {
        if let Some(entry) = self.shapes.get_mut(shape.index()) {
            entry.position = position;
        }
    }

    fn size(&self, shape: ShapeId) -> Size {
        self.entry(shape).map(|entry| entry.size).unwrap_or_default()
    }

    fn create_group(&mut self) -> GroupId {
        let id = GroupId::new(self.groups.len());
        self.groups.push(Some(IndexSet::new()));
        trace!(group:% = id; "Created group");
        id
    }

    fn add_to_group(&mut self, group: GroupId, shape: ShapeId) -> bool {
        match self.groups.get_mut(group.index()) {
            Some(Some(members)) => members.insert(shape),
            _ => false,
        }
    }

    fn group_members(&self, group: GroupId) -> Vec<ShapeId> {
        self.group(group)
            .map(|members| members.iter().copied().collect())
            .unwrap_or_default()
    }

    fn dissolve_group(&mut self, group: GroupId) -> Vec<ShapeId> {
        self.groups
            .get_mut(group.index())
            .and_then(Option::take)
            .map(|members| members.into_iter().collect())
            .unwrap_or_default()
    }

    fn colliding(&self, shape: ShapeId) -> Vec<ShapeId> {
        if self.entry(shape).is_none() {
            return Vec::new();
        }
        let bounds = self.bounds(shape);
        self.shapes()
            .filter(|other| *other != shape && bounds.intersects(&self.bounds(*other)))
            .collect()
    }
}
