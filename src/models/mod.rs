pub mod analysis;
pub mod common;
pub mod image;
pub mod pokemon;
pub mod wire;

pub use analysis::*;
pub use common::*;
pub use image::*;
pub use pokemon::*;
pub use wire::*;
