pub mod camera;
pub mod instance;
pub mod lines;
pub mod points;

pub use camera::{CameraUniform, PerspectiveCamera};
pub use instance::{InstanceBuffer, MeshInstance};
pub use lines::{LineBuffer, LineVertex};
pub use points::PointBuffer;
