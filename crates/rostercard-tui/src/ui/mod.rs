//! Terminal UI module using ratatui.
//!
//! - `render`: Main frame rendering, layout and overlays
//! - `input`: Keyboard event handling
//! - `styles`: Color scheme and text styling
//! - `roster`: Section headers and expandable roster cards

pub mod input;
pub mod render;
pub mod roster;
pub mod styles;
