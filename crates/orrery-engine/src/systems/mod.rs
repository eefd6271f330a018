pub mod lighting;
pub mod picking;
pub mod render;
#[cfg(feature = "vectors")]
pub mod vector;
