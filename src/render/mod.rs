//! Terminal colorization of serialized records

pub mod color;
pub mod renderer;

pub use color::{Color, ColorTable, Style};
pub use renderer::{ColorRenderer, RenderMode};
