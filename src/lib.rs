//! Geometry caches and draw helpers for an interactive road-network editor.
//!
//! [`geometry::SegmentedGeometry`] keeps a shape together with the rotation
//! and length of each of its pieces, [`geometry::DottedContourBuilder`] turns
//! shapes into dashed outlines and [`geometry::ConnectorGeometryCache`] holds
//! lane-to-lane connector curves. The draw entry points in
//! [`geometry::drawing`] issue primitives through a [`draw::DrawingBackend`].

pub mod color;
pub mod draw;
pub mod geom;
pub mod geometry;
pub mod perf_stats;
pub mod settings;
