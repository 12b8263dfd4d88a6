pub mod camera;
pub mod canvas;
pub mod frame;
pub mod gpu;
pub mod mesh;
pub mod pipeline;
