//! Cameras and camera controllers.
//!
//! Exactly one [`Camera`] is active per surface. Zoom is expressed as the
//! camera's scale (`zoom = 1 / scale`), so enlarging the scene is the same as
//! shrinking the camera. [`OrbitControls`] turns pointer drags and wheel input
//! into camera motion with optional damping.

mod camera;
mod orbit;

pub use camera::{Camera, Projection, CAMERA_DEPTH, CAMERA_DISTANCE};
pub use orbit::{OrbitConfig, OrbitControls};
