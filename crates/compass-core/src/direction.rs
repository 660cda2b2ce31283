//! Compass directions used to label parent-to-child edges.
//!
//! A [`Direction`] always describes where a child sits relative to its
//! parent. The inversion table ([`Direction::opposite`]) and the connector
//! anchor table ([`Direction::parent_anchor`]) are `const` lookups with no
//! shared state.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::geometry::Anchor;

/// One of the eight compass directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    N,
    S,
    E,
    W,
    Ne,
    Nw,
    Se,
    Sw,
}

impl Direction {
    /// All eight directions.
    pub const ALL: [Direction; 8] = [
        Direction::N,
        Direction::S,
        Direction::E,
        Direction::W,
        Direction::Ne,
        Direction::Nw,
        Direction::Se,
        Direction::Sw,
    ];

    /// The four cardinal directions.
    pub const CARDINAL: [Direction; 4] = [Direction::N, Direction::S, Direction::E, Direction::W];

    /// Returns the direction pointing the other way.
    ///
    /// # Examples
    ///
    /// ```
    /// use compass_core::direction::Direction;
    ///
    /// assert_eq!(Direction::N.opposite(), Direction::S);
    /// assert_eq!(Direction::Ne.opposite(), Direction::Sw);
    /// assert_eq!(Direction::Nw.opposite(), Direction::Se);
    /// ```
    pub const fn opposite(self) -> Self {
        match self {
            Direction::N => Direction::S,
            Direction::S => Direction::N,
            Direction::E => Direction::W,
            Direction::W => Direction::E,
            Direction::Ne => Direction::Sw,
            Direction::Sw => Direction::Ne,
            Direction::Nw => Direction::Se,
            Direction::Se => Direction::Nw,
        }
    }

    /// Unit step along the x axis when travelling in this direction.
    pub const fn step_x(self) -> i8 {
        match self {
            Direction::E | Direction::Ne | Direction::Se => 1,
            Direction::W | Direction::Nw | Direction::Sw => -1,
            Direction::N | Direction::S => 0,
        }
    }

    /// Unit step along the y axis when travelling in this direction.
    ///
    /// North is negative because y grows downward.
    pub const fn step_y(self) -> i8 {
        match self {
            Direction::S | Direction::Se | Direction::Sw => 1,
            Direction::N | Direction::Ne | Direction::Nw => -1,
            Direction::E | Direction::W => 0,
        }
    }

    /// Returns true for n, s, e and w.
    pub const fn is_cardinal(self) -> bool {
        matches!(
            self,
            Direction::N | Direction::S | Direction::E | Direction::W
        )
    }

    /// The lowercase label of this direction.
    pub const fn label(self) -> &'static str {
        match self {
            Direction::N => "n",
            Direction::S => "s",
            Direction::E => "e",
            Direction::W => "w",
            Direction::Ne => "ne",
            Direction::Nw => "nw",
            Direction::Se => "se",
            Direction::Sw => "sw",
        }
    }

    /// Where a connector leaves the parent rectangle.
    pub const fn parent_anchor(self) -> Anchor {
        match self {
            Direction::N => Anchor::TopMid,
            Direction::S => Anchor::BottomMid,
            Direction::E => Anchor::RightMid,
            Direction::W => Anchor::LeftMid,
            Direction::Ne => Anchor::TopRight,
            Direction::Nw => Anchor::TopLeft,
            Direction::Se => Anchor::BottomRight,
            Direction::Sw => Anchor::BottomLeft,
        }
    }

    /// Where a connector enters the child rectangle.
    pub const fn child_anchor(self) -> Anchor {
        self.opposite().parent_anchor()
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Error returned when a label is not one of the eight compass directions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown direction `{0}`, expected one of n, s, e, w, ne, nw, se, sw")]
pub struct ParseDirectionError(pub String);

impl FromStr for Direction {
    type Err = ParseDirectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "n" => Ok(Direction::N),
            "s" => Ok(Direction::S),
            "e" => Ok(Direction::E),
            "w" => Ok(Direction::W),
            "ne" => Ok(Direction::Ne),
            "nw" => Ok(Direction::Nw),
            "se" => Ok(Direction::Se),
            "sw" => Ok(Direction::Sw),
            _ => Err(ParseDirectionError(s.to_string())),
        }
    }
}

/// The set of directions a layout run accepts.
///
/// `Cardinal` is the four-direction restriction of the same algorithm: it
/// never reaches the diagonal placement rule because diagonal edges are
/// rejected when the tree is built.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DirectionProfile {
    #[default]
    Compass,
    Cardinal,
}

impl DirectionProfile {
    /// Returns true if `direction` may be used under this profile.
    pub const fn allows(self, direction: Direction) -> bool {
        match self {
            DirectionProfile::Compass => true,
            DirectionProfile::Cardinal => direction.is_cardinal(),
        }
    }
}

impl fmt::Display for DirectionProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DirectionProfile::Compass => f.write_str("compass"),
            DirectionProfile::Cardinal => f.write_str("cardinal"),
        }
    }
}
