pub mod camera;
pub mod gpu;

pub use camera::{Camera, CameraMode};
pub use gpu::{GpuState, generate_axes_vertices, mesh_fits_gpu};
