//! Shared UI components

use eframe::egui::{self, Color32, CornerRadius, RichText, Vec2};

use crate::app::QrToolApp;
use crate::encoder::EncodedImage;
use crate::state::Tab;
use crate::ui::theme::Theme;

/// Reference page about the QR code format
const QR_INFO_URL: &str = "https://www.qrcode.com/en/about/";

/// Render a tab button
pub fn render_tab(app: &mut QrToolApp, ui: &mut egui::Ui, tab: Tab, label: &str) {
    let theme = &app.ui.current_theme;
    let is_active = app.ui.active_tab == tab;

    let (bg, text_color) = if is_active {
        (theme.bg_medium, theme.accent)
    } else {
        (Color32::TRANSPARENT, theme.text_secondary)
    };

    let button = egui::Button::new(RichText::new(label).color(text_color))
        .fill(bg)
        .corner_radius(CornerRadius {
            nw: 6,
            ne: 6,
            sw: 0,
            se: 0,
        })
        .min_size(Vec2::new(80.0, 32.0));

    if ui.add(button).clicked() {
        app.ui.active_tab = tab;
    }
}

/// Rounded card used to group controls
pub fn card<R>(
    theme: &Theme,
    ui: &mut egui::Ui,
    add_contents: impl FnOnce(&mut egui::Ui) -> R,
) -> egui::InnerResponse<R> {
    egui::Frame::new()
        .fill(theme.bg_medium)
        .corner_radius(8.0)
        .inner_margin(16.0)
        .stroke(egui::Stroke::new(1.0, theme.border))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            add_contents(ui)
        })
}

/// Convert an encoded image to an egui texture source
pub fn to_color_image(image: &EncodedImage) -> egui::ColorImage {
    let pixels = image.pixels();
    let size = [pixels.width() as usize, pixels.height() as usize];
    egui::ColorImage::from_rgba_unmultiplied(size, pixels.as_raw())
}

/// Render the About dialog
pub fn render_about_dialog(app: &mut QrToolApp, ctx: &egui::Context) {
    if !app.ui.show_about_dialog {
        return;
    }

    let theme = app.ui.current_theme.clone();
    let strings = app.strings();
    let mut open = true;

    egui::Window::new(strings.about)
        .collapsible(false)
        .resizable(false)
        .open(&mut open)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .fixed_size([280.0, 200.0])
        .show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(8.0);
                ui.label(
                    RichText::new(strings.app_title)
                        .size(22.0)
                        .strong()
                        .color(theme.accent),
                );

                ui.add_space(8.0);
                ui.label(
                    RichText::new(format!("Version {}", env!("CARGO_PKG_VERSION")))
                        .color(theme.text_muted),
                );

                ui.add_space(12.0);
                if ui.link("About QR codes").clicked() {
                    if let Err(e) = open::that(QR_INFO_URL) {
                        tracing::warn!("Failed to open browser: {}", e);
                    }
                }

                ui.add_space(12.0);
                ui.label(
                    RichText::new("Built with Rust + egui")
                        .size(11.0)
                        .color(theme.text_muted),
                );

                ui.add_space(12.0);
                if ui.button(strings.close).clicked() {
                    app.ui.show_about_dialog = false;
                }
                ui.add_space(8.0);
            });
        });

    if !open {
        app.ui.show_about_dialog = false;
    }
}
