//! Force-directed rendering of a [`GraphData`] payload on a 2d canvas.

mod camera;
mod component;
mod instance;
mod render;
mod sprite;
mod state;
mod types;

pub use component::ForceGraphCanvas;
pub use types::GraphData;
