//! UI-related application state

use eframe::egui;

use crate::ui::theme::Theme;

/// Application tabs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    /// Text input, generate/clear controls, preview and download
    #[default]
    Generator,
    /// Theme, language and save options
    Settings,
}

/// UI-related state
pub struct UiState {
    /// Current theme
    pub current_theme: Theme,
    /// Currently selected tab
    pub active_tab: Tab,
    /// Whether theme needs to be applied
    pub theme_dirty: bool,
    /// Whether to show the About dialog
    pub show_about_dialog: bool,
    /// Status bar text
    pub status_message: String,
    /// Preview texture, tagged with the generator generation it was built from
    pub preview: Option<(u64, egui::TextureHandle)>,
    /// File name being edited in settings, committed on focus loss
    pub file_name_input: String,
}

impl UiState {
    /// Create a new UiState with the given theme
    pub fn new(theme: Theme, status_message: impl Into<String>, file_name: &str) -> Self {
        Self {
            current_theme: theme,
            active_tab: Tab::default(),
            theme_dirty: true, // Apply theme on first frame
            show_about_dialog: false,
            status_message: status_message.into(),
            preview: None,
            file_name_input: file_name.to_string(),
        }
    }
}
