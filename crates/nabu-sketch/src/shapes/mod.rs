//! Chainable wrappers returned by the context's shape factories.
//!
//! Every wrapper owns one [`NodeHandle`]; composite shapes own a group node
//! whose children are their parts. What a wrapper can do is expressed through
//! capability traits rather than a type hierarchy:
//!
//! - [`Positionable`]: transform and visibility, for every shape
//! - [`Colorable`]: color and opacity
//! - [`Materializable`]: shading model and wireframe, for meshes
//!
//! ```rust,ignore
//! ctx.sphere().radius(20.0).position([0.0, 40.0, 0.0]).color(Color::from_hex(0xff8800));
//! ```

mod arrow;
mod graph;
mod grid;
mod height_field;
mod line;
mod points;
mod solid;
mod text;

use nabu_engine::coords::{EulerRot, Quat, Vec3};
use nabu_engine::paint::Color;
use nabu_engine::scene::{Material, MaterialKind, MeshGeometry, Node, NodeHandle, NodeKind};

use crate::error::SketchError;

pub use arrow::{Arrow, ARROW_HEAD_PX};
pub use graph::{sample_count, Graph, Graph3d, GraphSample, GRID_LIFT_PX, MAX_GRAPH_SAMPLES, MAX_SURFACE_SAMPLES, SAMPLE_SPACING_PX};
pub use grid::{Grid, GRID_SPACING_PX};
pub use height_field::HeightField;
pub use line::{Line, LineStrip, DASH_PX};
pub use points::Points;
pub use solid::{Circle, Cone, Cuboid, Cylinder, Plane, Sphere, Torus};
pub use text::{Text, TEXT_SIZE_PX};

/// Anything backed by a scene node.
pub trait Shape {
    fn node(&self) -> &NodeHandle;
}

pub trait Positionable: Shape + Sized {
    fn position(self, p: impl Into<Vec3>) -> Self {
        self.node().borrow_mut().transform.position = p.into();
        self
    }

    /// Euler angles in radians, applied X then Y then Z.
    fn rotation(self, euler: impl Into<Vec3>) -> Self {
        let e = euler.into();
        self.node().borrow_mut().transform.rotation = Quat::from_euler(EulerRot::XYZ, e.x, e.y, e.z);
        self
    }

    fn scale(self, s: impl Into<Vec3>) -> Self {
        self.node().borrow_mut().transform.scale = s.into();
        self
    }

    fn visible(self, v: bool) -> Self {
        self.node().borrow_mut().visible = v;
        self
    }
}

impl<T: Shape> Positionable for T {}

/// Color setters. Composites apply them to every part.
pub trait Colorable: Shape + Sized {
    fn color(self, c: impl Into<Color>) -> Self {
        let c = c.into();
        self.node().for_each_mut(&mut |n| n.material.color = c);
        self
    }

    fn opacity(self, o: f32) -> Self {
        let o = o.clamp(0.0, 1.0);
        self.node().for_each_mut(&mut |n| n.material.opacity = o);
        self
    }
}

pub trait Materializable: Shape + Sized {
    fn material(self, kind: MaterialKind) -> Self {
        self.node().for_each_mut(&mut |n| n.material.kind = kind);
        self
    }

    fn wireframe(self, on: bool) -> Self {
        self.node().for_each_mut(&mut |n| n.material.wireframe = on);
        self
    }
}

macro_rules! impl_shape {
    ($($ty:ty),* $(,)?) => {
        $(
            impl $crate::shapes::Shape for $ty {
                #[inline]
                fn node(&self) -> &NodeHandle {
                    &self.node
                }
            }
        )*
    };
}
pub(crate) use impl_shape;

fn node_of(kind: NodeKind, material: Material) -> NodeHandle {
    NodeHandle::new(Node::new(kind, material))
}

fn set_mesh(node: &NodeHandle, mesh: MeshGeometry) {
    node.borrow_mut().kind = NodeKind::Mesh(mesh);
}

/// Rejects the first point with a non-finite coordinate.
fn check_finite_points(points: &[Vec3]) -> Result<(), SketchError> {
    for p in points {
        if let Some(value) = p.to_array().into_iter().find(|v| !v.is_finite()) {
            return Err(SketchError::NonFinite { x: p.x, value });
        }
    }
    Ok(())
}
