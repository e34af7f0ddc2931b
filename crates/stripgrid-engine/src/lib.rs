//! Stripgrid engine crate.
//!
//! Window + GPU runtime, input and frame timing, and the grid renderer with
//! its switchable draw strategies.

pub mod core;
pub mod device;
pub mod input;
pub mod logging;
pub mod render;
pub mod time;
pub mod window;

pub use stripgrid_mesh as mesh;
