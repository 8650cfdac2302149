use std::sync::Arc;

use eframe::egui;

use crate::config::Config;
use crate::download;
use crate::encoder::{QrCodeEncoder, QrEncoder};
use crate::i18n::Strings;
use crate::state::{GenerateError, GeneratorState, StateEvent, Tab, UiState};
use crate::ui::{render_about_dialog, render_generator_tab, render_settings_tab, render_tab};

/// Main application state
pub struct QrToolApp {
    /// Application configuration
    pub config: Config,
    /// Generator input, task and result
    pub generator: GeneratorState,
    /// UI state
    pub ui: UiState,
    /// Encoder used for every generation
    encoder: Arc<dyn QrEncoder>,
}

impl QrToolApp {
    /// Create a new application instance
    pub fn new(_cc: &eframe::CreationContext<'_>, initial_text: Option<String>) -> Self {
        let config = Config::load().unwrap_or_else(|e| {
            tracing::warn!("Failed to load configuration, using defaults: {}", e);
            Config::default()
        });

        let theme = config.ui.theme.theme();
        let status = config.ui.locale.strings().status_ready;

        let file_name = config.download.file_name.clone();

        let mut generator = GeneratorState::default();
        if let Some(text) = initial_text {
            generator.update_text(&text);
        }

        Self {
            config,
            generator,
            ui: UiState::new(theme, status, &file_name),
            encoder: Arc::new(QrCodeEncoder),
        }
    }

    /// Strings for the configured language
    pub fn strings(&self) -> &'static Strings {
        self.config.ui.locale.strings()
    }

    /// Save configuration to disk
    pub fn save_config(&self) {
        if let Err(e) = self.config.save() {
            tracing::error!("Failed to save config: {}", e);
        }
    }

    /// Start encoding the current text
    pub fn generate(&mut self) {
        match self.generator.generate(self.encoder.clone()) {
            Ok(event) => self.handle_event(event),
            Err(GenerateError::Busy) => {}
            // Validation errors render inline from generator state
            Err(e) => tracing::debug!("Generate rejected: {}", e),
        }
    }

    /// Ask for a destination and save the current image there
    pub fn download(&mut self) {
        let start_dir = self.config.download.start_directory().map(|dir| dir.to_path_buf());
        let file_name = self.config.download.file_name.clone();

        let result = self.generator.download(&file_name, |name, extension| {
            download::pick_save_path(name, extension, start_dir.as_deref())
        });

        match result {
            Ok(Some(path)) => {
                if self.config.download.remember(&path) {
                    self.save_config();
                }
                self.handle_event(StateEvent::Saved(path));
            }
            Ok(None) => {}
            Err(e) => {
                tracing::error!("Failed to save QR code: {}", e);
                self.handle_event(StateEvent::SaveFailed(e.to_string()));
            }
        }
    }

    /// Turn a state event into a status bar message
    fn handle_event(&mut self, event: StateEvent) {
        let strings = self.strings();
        self.ui.status_message = match event {
            StateEvent::Generating { chars } => format!("{} ({} chars)", strings.status_generating, chars),
            StateEvent::Generated { modules, bytes } => {
                format!("{} ({}x{} modules, {} bytes)", strings.status_generated, modules, modules, bytes)
            }
            StateEvent::GenerationFailed => strings.status_failed.to_string(),
            StateEvent::Saved(path) => format!("{} {}", strings.status_saved, path.display()),
            StateEvent::SaveFailed(msg) => format!("{}: {}", strings.status_save_failed, msg),
        };
    }
}

impl eframe::App for QrToolApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if let Some(event) = self.generator.poll(ctx) {
            self.handle_event(event);
        }

        if self.ui.theme_dirty {
            self.ui.current_theme.apply(ctx);
            self.ui.theme_dirty = false;
        }

        let strings = self.strings();

        egui::TopBottomPanel::top("tab_bar").show(ctx, |ui| {
            ui.add_space(4.0);
            ui.horizontal(|ui| {
                render_tab(self, ui, Tab::Generator, strings.tab_generator);
                render_tab(self, ui, Tab::Settings, strings.tab_settings);
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button(strings.about).clicked() {
                        self.ui.show_about_dialog = true;
                    }
                });
            });
        });

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(
                    egui::RichText::new(&self.ui.status_message)
                        .size(11.0)
                        .color(self.ui.current_theme.text_muted),
                );
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| match self.ui.active_tab {
            Tab::Generator => render_generator_tab(self, ui),
            Tab::Settings => render_settings_tab(self, ui),
        });

        render_about_dialog(self, ctx);
    }
}
