//! Compass Core Types and Definitions
//!
//! This crate provides the foundational types shared by the Compass layout
//! engine and anything that hosts it. It includes:
//!
//! - **Identifiers**: Dense index handles ([`identifier::NodeId`], [`identifier::ShapeId`])
//! - **Geometry**: Points, sizes, rectangles and anchors ([`geometry`] module)
//! - **Directions**: The compass direction table ([`direction::Direction`])
//! - **Provider**: The geometry capability trait ([`provider::GeometryProvider`])
//! - **Canvas**: An in-memory provider ([`canvas::Canvas`])

pub mod canvas;
pub mod direction;
pub mod geometry;
pub mod identifier;
pub mod provider;
