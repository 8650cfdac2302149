//! Settings tab UI rendering

use eframe::egui::{self, RichText, Vec2};

use crate::app::QrToolApp;
use crate::i18n::Locale;
use crate::ui::components::card;
use crate::ui::theme::ThemePreset;

/// Render the settings tab
pub fn render_settings_tab(app: &mut QrToolApp, ui: &mut egui::Ui) {
    let theme = app.ui.current_theme.clone();
    let strings = app.strings();

    egui::ScrollArea::vertical()
        .id_salt("settings_scroll")
        .show(ui, |ui| {
            ui.label(
                RichText::new(strings.settings_title)
                    .color(theme.text_primary)
                    .size(20.0)
                    .strong(),
            );
            ui.add_space(16.0);

            card(&theme, ui, |ui| {
                ui.label(RichText::new(strings.appearance).color(theme.accent).size(13.0).strong());
                ui.add_space(12.0);

                ui.horizontal(|ui| {
                    ui.label(RichText::new(strings.theme).color(theme.text_muted));
                    egui::ComboBox::from_id_salt("theme_select")
                        .selected_text(app.config.ui.theme.name())
                        .show_ui(ui, |ui| {
                            for preset in ThemePreset::all() {
                                if ui
                                    .selectable_label(app.config.ui.theme == *preset, preset.name())
                                    .clicked()
                                {
                                    app.config.ui.theme = *preset;
                                    app.ui.current_theme = preset.theme();
                                    app.ui.theme_dirty = true;
                                    app.save_config();
                                }
                            }
                        });
                });

                ui.add_space(12.0);
                ui.horizontal(|ui| {
                    ui.label(RichText::new(strings.preview).color(theme.text_muted));
                    ui.add_space(8.0);

                    let swatch_size = Vec2::new(24.0, 24.0);
                    for color in [theme.bg_dark, theme.accent, theme.success, theme.error] {
                        let (rect, _) = ui.allocate_exact_size(swatch_size, egui::Sense::hover());
                        ui.painter().rect_filled(rect, 4.0, color);
                        ui.add_space(4.0);
                    }
                });

                ui.add_space(12.0);
                ui.horizontal(|ui| {
                    ui.label(RichText::new(strings.language).color(theme.text_muted));
                    egui::ComboBox::from_id_salt("locale_select")
                        .selected_text(app.config.ui.locale.name())
                        .show_ui(ui, |ui| {
                            for locale in Locale::all() {
                                if ui
                                    .selectable_label(app.config.ui.locale == *locale, locale.name())
                                    .clicked()
                                {
                                    app.config.ui.locale = *locale;
                                    app.save_config();
                                }
                            }
                        });
                });
            });

            ui.add_space(12.0);

            card(&theme, ui, |ui| {
                ui.label(RichText::new(strings.saving).color(theme.accent).size(13.0).strong());
                ui.add_space(12.0);

                ui.horizontal(|ui| {
                    ui.label(RichText::new(strings.file_name).color(theme.text_muted));
                    let response = ui.text_edit_singleline(&mut app.ui.file_name_input);
                    if response.lost_focus() {
                        match app.config.download.set_file_name(&app.ui.file_name_input) {
                            Ok(()) => app.save_config(),
                            Err(e) => tracing::debug!("Keeping previous file name: {}", e),
                        }
                        app.ui.file_name_input = app.config.download.file_name.clone();
                    }
                });

                ui.add_space(8.0);
                if ui
                    .checkbox(&mut app.config.download.remember_directory, strings.remember_directory)
                    .changed()
                {
                    app.save_config();
                }

                ui.horizontal(|ui| {
                    ui.label(RichText::new(strings.last_directory).color(theme.text_muted));
                    let dir = app
                        .config
                        .download
                        .last_directory
                        .as_ref()
                        .map(|dir| dir.display().to_string());
                    ui.label(
                        RichText::new(dir.as_deref().unwrap_or(strings.none))
                            .color(theme.text_primary),
                    );
                    if dir.is_some() && ui.small_button(strings.forget_directory).clicked() {
                        app.config.download.last_directory = None;
                        app.save_config();
                    }
                });
            });
        });
}
