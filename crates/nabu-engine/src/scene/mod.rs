//! Retained 3D scene graph.
//!
//! A [`Scene`] is an ordered membership list of [`NodeHandle`]s. Only members
//! (and their visible descendants) are drawn. Nodes are shared, single-threaded
//! handles: the same node can be held by a shape wrapper and the scene at once,
//! and mutations through either are seen by the renderer on the next frame.
//!
//! Geometry lives on the CPU; renderers flatten it into GPU buffers each frame.

mod geometry;
mod graph;
mod material;
mod node;

pub mod primitives;

pub use geometry::{dash_segments, LineGeometry, LineTopology, MeshGeometry, PointGeometry, TextLabel, TextSizing};
pub use graph::{Lighting, Scene};
pub use material::{Material, MaterialKind};
pub use node::{Node, NodeHandle, NodeId, NodeKind, Transform};
