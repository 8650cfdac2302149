//! Generator tab UI rendering

use eframe::egui::{self, RichText, Vec2};

use crate::app::QrToolApp;
use crate::encoder::DEFAULT_WIDTH;
use crate::state::MAX_INPUT_CHARS;
use crate::ui::components::{card, to_color_image};

/// Render the generator tab
pub fn render_generator_tab(app: &mut QrToolApp, ui: &mut egui::Ui) {
    let theme = app.ui.current_theme.clone();
    let strings = app.strings();

    egui::ScrollArea::vertical()
        .id_salt("generator_scroll")
        .show(ui, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(8.0);
                ui.label(
                    RichText::new(strings.app_title)
                        .size(24.0)
                        .strong()
                        .color(theme.text_primary),
                );
                ui.label(RichText::new(strings.subtitle).color(theme.text_muted));
            });
            ui.add_space(16.0);

            card(&theme, ui, |ui| {
                render_input(app, ui);
                ui.add_space(12.0);

                if let Some(error) = app.generator.error() {
                    egui::Frame::new()
                        .fill(theme.error_bg)
                        .corner_radius(6.0)
                        .inner_margin(10.0)
                        .stroke(egui::Stroke::new(1.0, theme.error))
                        .show(ui, |ui| {
                            ui.set_width(ui.available_width());
                            ui.label(RichText::new(strings.error_message(error)).color(theme.error));
                        });
                    ui.add_space(12.0);
                }

                render_actions(app, ui);
                render_preview(app, ui);
            });

            ui.add_space(16.0);
            render_features(app, ui);
        });
}

/// Text field with character counter. Enter generates when allowed.
fn render_input(app: &mut QrToolApp, ui: &mut egui::Ui) {
    let theme = &app.ui.current_theme;
    let strings = app.strings();

    ui.label(RichText::new(strings.input_label).color(theme.text_secondary));
    ui.add_space(4.0);

    let mut buffer = app.generator.text().to_string();
    let response = ui.add(
        egui::TextEdit::singleline(&mut buffer)
            .char_limit(MAX_INPUT_CHARS)
            .hint_text(strings.input_hint)
            .desired_width(f32::INFINITY),
    );

    if response.changed() {
        app.generator.update_text(&buffer);
    }

    let enter = response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
    if enter && app.generator.can_generate() {
        app.generate();
    }

    ui.label(
        RichText::new(format!("{}/{}", app.generator.char_count(), MAX_INPUT_CHARS))
            .size(11.0)
            .color(app.ui.current_theme.text_muted),
    );
}

fn render_actions(app: &mut QrToolApp, ui: &mut egui::Ui) {
    let strings = app.strings();

    ui.horizontal(|ui| {
        let clear_width = 90.0;
        let generate_width = (ui.available_width() - clear_width - 40.0).max(120.0);
        let busy = app.generator.is_busy();

        let label = if busy { strings.generating } else { strings.generate };
        let button = egui::Button::new(RichText::new(label).strong())
            .min_size(Vec2::new(generate_width, 36.0));
        if ui.add_enabled(app.generator.can_generate(), button).clicked() {
            app.generate();
        }

        if busy {
            ui.spinner();
        }

        if ui
            .add(egui::Button::new(strings.clear).min_size(Vec2::new(clear_width, 36.0)))
            .clicked()
        {
            app.generator.clear();
        }
    });
}

/// Rendered image, caption and download button
fn render_preview(app: &mut QrToolApp, ui: &mut egui::Ui) {
    let Some(image) = app.generator.image() else {
        app.ui.preview = None;
        return;
    };

    let generation = app.generator.generation();
    let cached = app
        .ui
        .preview
        .as_ref()
        .filter(|(built_from, _)| *built_from == generation)
        .map(|(_, texture)| texture.clone());

    let texture = match cached {
        Some(texture) => texture,
        None => {
            let texture = ui.ctx().load_texture(
                "qr_preview",
                to_color_image(image),
                egui::TextureOptions::NEAREST,
            );
            app.ui.preview = Some((generation, texture.clone()));
            texture
        }
    };

    let theme = app.ui.current_theme.clone();
    let strings = app.strings();
    let alt = format!("{}: {}", strings.preview_alt, app.generator.text());

    ui.add_space(16.0);
    egui::Frame::new()
        .fill(theme.bg_light)
        .corner_radius(8.0)
        .inner_margin(16.0)
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.vertical_centered(|ui| {
                let size = Vec2::splat(DEFAULT_WIDTH as f32);
                ui.add(egui::Image::new(egui::load::SizedTexture::new(texture.id(), size)))
                    .on_hover_text(alt);

                ui.add_space(8.0);
                ui.label(RichText::new(strings.result_caption).color(theme.text_muted));
                ui.add_space(4.0);

                if ui.button(strings.download).clicked() {
                    app.download();
                }
            });
        });
}

fn render_features(app: &QrToolApp, ui: &mut egui::Ui) {
    let theme = &app.ui.current_theme;
    let strings = app.strings();
    let features = [
        (strings.feature_fast_title, strings.feature_fast_body),
        (strings.feature_quality_title, strings.feature_quality_body),
        (strings.feature_download_title, strings.feature_download_body),
    ];

    ui.columns(features.len(), |columns| {
        for (column, (title, body)) in columns.iter_mut().zip(features) {
            card(theme, column, |ui| {
                ui.vertical_centered(|ui| {
                    ui.label(RichText::new(title).strong().color(theme.accent));
                    ui.add_space(4.0);
                    ui.label(RichText::new(body).size(11.0).color(theme.text_muted));
                });
            });
        }
    });
}
