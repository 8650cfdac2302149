//! UI modules for QR Tool
//!
//! Rendering code organized by tab.

mod components;
mod generator_tab;
mod settings_tab;
pub mod theme;

pub use components::{render_about_dialog, render_tab};
pub use generator_tab::render_generator_tab;
pub use settings_tab::render_settings_tab;
