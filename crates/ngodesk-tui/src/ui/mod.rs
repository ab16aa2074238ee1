//! Terminal UI module using ratatui.
//!
//! - `render`: Main frame rendering and layout
//! - `input`: Keyboard event handling
//! - `styles`: Color schemes and text styling
//! - `table`: List and grid rendering shared by every screen
//! - `rows`: Per-record columns and cards

pub mod input;
pub mod render;
pub mod rows;
pub mod styles;
pub mod table;
