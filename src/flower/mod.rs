pub mod generator;
pub mod io;
pub mod mesh;
pub mod obj;
pub mod params;
pub mod presets;
pub mod randomize;

pub use generator::generate;
pub use mesh::FlowerMesh;
pub use params::{FlowerParams, ParamError, Rgb};
pub use presets::PRESETS;
pub use randomize::{RandomizeLocks, SLIDER_RANGES, randomize};
