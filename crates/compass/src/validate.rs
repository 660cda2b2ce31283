//! Overlap check over a finished layout.

use indexmap::IndexSet;
use log::{debug, trace, warn};
use serde::Serialize;

use compass_core::{identifier::ShapeId, provider::GeometryProvider};

/// Two shapes whose rectangles overlap.
///
/// `first` is always the smaller id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Collision {
    pub first: ShapeId,
    pub second: ShapeId,
}

impl Collision {
    fn ordered(a: ShapeId, b: ShapeId) -> Self {
        if a <= b {
            Self {
                first: a,
                second: b,
            }
        } else {
            Self {
                first: b,
                second: a,
            }
        }
    }
}

/// Result of [`validate`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollisionReport {
    collisions: Vec<Collision>,
}

impl CollisionReport {
    /// Returns true if no two shapes overlap.
    pub fn is_clear(&self) -> bool {
        self.collisions.is_empty()
    }

    /// Returns the overlapping pairs in discovery order.
    pub fn collisions(&self) -> &[Collision] {
        &self.collisions
    }

    /// Returns the number of overlapping pairs.
    pub fn len(&self) -> usize {
        self.collisions.len()
    }

    /// Returns true if there are no overlapping pairs.
    pub fn is_empty(&self) -> bool {
        self.collisions.is_empty()
    }

    /// Consumes the report, returning the overlapping pairs.
    pub fn into_collisions(self) -> Vec<Collision> {
        self.collisions
    }
}

/// Checks every shape in `shapes` against the others and reports
/// overlapping pairs.
///
/// Only pairs where both shapes are in `shapes` count; anything else the
/// provider holds is ignored. Rectangles that only touch along an edge do
/// not collide. Each unordered pair is reported once and logged as a
/// warning. The provider is not modified.
pub fn validate<P: GeometryProvider>(provider: &P, shapes: &[ShapeId]) -> CollisionReport {
    let placed: IndexSet<ShapeId> = shapes.iter().copied().collect();
    let mut found: IndexSet<Collision> = IndexSet::new();
    for &shape in &placed {
        for other in provider.colliding(shape) {
            if !placed.contains(&other) {
                trace!(shape:% = shape, other:% = other; "Ignoring overlap with unplaced shape");
                continue;
            }
            let collision = Collision::ordered(shape, other);
            if found.insert(collision) {
                warn!(first:% = collision.first, second:% = collision.second; "Shapes overlap");
            }
        }
    }
    debug!(shapes = shapes.len(), collisions = found.len(); "Validated layout");
    CollisionReport {
        collisions: found.into_iter().collect(),
    }
}
