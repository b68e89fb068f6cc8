//! Colors handed to the rendering API.

pub mod color;

pub use color::Color;
