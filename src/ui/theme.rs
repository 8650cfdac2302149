use std::str::FromStr;

use eframe::egui::{self, Color32, Stroke, Visuals};
use serde::{Deserialize, Serialize};

/// Available theme presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ThemePreset {
    #[default]
    Indigo,
    Paper,
    Catppuccin,
}

impl ThemePreset {
    /// Get all available presets
    pub fn all() -> &'static [ThemePreset] {
        &[ThemePreset::Indigo, ThemePreset::Paper, ThemePreset::Catppuccin]
    }

    /// Key used in the config file
    pub fn key(&self) -> &'static str {
        match self {
            ThemePreset::Indigo => "indigo",
            ThemePreset::Paper => "paper",
            ThemePreset::Catppuccin => "catppuccin",
        }
    }

    /// Get display name for the preset
    pub fn name(&self) -> &'static str {
        match self {
            ThemePreset::Indigo => "Indigo",
            ThemePreset::Paper => "Paper",
            ThemePreset::Catppuccin => "Catppuccin Mocha",
        }
    }

    /// Get the theme colors for this preset
    pub fn theme(&self) -> Theme {
        match self {
            ThemePreset::Indigo => Theme::indigo(),
            ThemePreset::Paper => Theme::paper(),
            ThemePreset::Catppuccin => Theme::catppuccin(),
        }
    }
}

impl FromStr for ThemePreset {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ThemePreset::all()
            .iter()
            .copied()
            .find(|preset| preset.key().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                let keys: Vec<_> = ThemePreset::all().iter().map(|p| p.key()).collect();
                anyhow::anyhow!("Unknown theme: {} (expected one of {})", s, keys.join(", "))
            })
    }
}

/// Theme color definitions
#[derive(Debug, Clone)]
pub struct Theme {
    /// Start from egui's dark or light visuals
    pub dark: bool,

    // Base colors
    pub bg_darkest: Color32,
    pub bg_dark: Color32,
    pub bg_medium: Color32,
    pub bg_light: Color32,

    // Text colors
    pub text_primary: Color32,
    pub text_secondary: Color32,
    pub text_muted: Color32,

    // Accent colors
    pub accent: Color32,
    pub accent_hover: Color32,
    pub accent_muted: Color32,

    // Semantic colors
    pub success: Color32,
    pub error: Color32,
    pub error_bg: Color32,

    // UI element colors
    pub border: Color32,
    pub selection: Color32,
}

impl Theme {
    /// Indigo theme - deep blue night
    pub fn indigo() -> Self {
        Self {
            dark: true,

            bg_darkest: Color32::from_rgb(15, 16, 36),
            bg_dark: Color32::from_rgb(22, 24, 50),
            bg_medium: Color32::from_rgb(32, 35, 68),
            bg_light: Color32::from_rgb(46, 50, 92),

            text_primary: Color32::from_rgb(238, 240, 255),
            text_secondary: Color32::from_rgb(199, 204, 235),
            text_muted: Color32::from_rgb(140, 146, 190),

            accent: Color32::from_rgb(99, 102, 241),        // Indigo-500
            accent_hover: Color32::from_rgb(129, 140, 248), // Indigo-400
            accent_muted: Color32::from_rgb(67, 56, 202),   // Indigo-700

            success: Color32::from_rgb(74, 222, 128),
            error: Color32::from_rgb(248, 113, 113),
            error_bg: Color32::from_rgb(69, 26, 38),

            border: Color32::from_rgb(60, 64, 110),
            selection: Color32::from_rgb(99, 102, 241).gamma_multiply(0.35),
        }
    }

    /// Paper theme - light, print-like
    pub fn paper() -> Self {
        Self {
            dark: false,

            bg_darkest: Color32::from_rgb(255, 255, 255),
            bg_dark: Color32::from_rgb(243, 244, 250),
            bg_medium: Color32::from_rgb(255, 255, 255),
            bg_light: Color32::from_rgb(229, 231, 240),

            text_primary: Color32::from_rgb(17, 24, 39),   // Gray-900
            text_secondary: Color32::from_rgb(55, 65, 81), // Gray-700
            text_muted: Color32::from_rgb(107, 114, 128),  // Gray-500

            accent: Color32::from_rgb(37, 99, 235),        // Blue-600
            accent_hover: Color32::from_rgb(29, 78, 216),  // Blue-700
            accent_muted: Color32::from_rgb(191, 219, 254), // Blue-200

            success: Color32::from_rgb(22, 163, 74),
            error: Color32::from_rgb(220, 38, 38),  // Red-600
            error_bg: Color32::from_rgb(254, 242, 242), // Red-50

            border: Color32::from_rgb(209, 213, 219),
            selection: Color32::from_rgb(37, 99, 235).gamma_multiply(0.25),
        }
    }

    /// Catppuccin Mocha theme
    pub fn catppuccin() -> Self {
        Self {
            dark: true,

            bg_darkest: Color32::from_rgb(17, 17, 27), // Crust
            bg_dark: Color32::from_rgb(24, 24, 37),    // Mantle
            bg_medium: Color32::from_rgb(30, 30, 46),  // Base
            bg_light: Color32::from_rgb(49, 50, 68),   // Surface0

            text_primary: Color32::from_rgb(205, 214, 244),
            text_secondary: Color32::from_rgb(186, 194, 222),
            text_muted: Color32::from_rgb(147, 153, 178),

            accent: Color32::from_rgb(137, 180, 250),       // Blue
            accent_hover: Color32::from_rgb(180, 190, 254), // Lavender
            accent_muted: Color32::from_rgb(116, 148, 204),

            success: Color32::from_rgb(166, 227, 161),
            error: Color32::from_rgb(243, 139, 168),
            error_bg: Color32::from_rgb(61, 36, 52),

            border: Color32::from_rgb(69, 71, 90), // Surface1
            selection: Color32::from_rgb(137, 180, 250).gamma_multiply(0.3),
        }
    }

    /// Apply this theme to egui's visuals
    pub fn apply(&self, ctx: &egui::Context) {
        let mut visuals = if self.dark { Visuals::dark() } else { Visuals::light() };

        visuals.window_fill = self.bg_dark;
        visuals.panel_fill = self.bg_dark;
        visuals.faint_bg_color = self.bg_medium;
        visuals.extreme_bg_color = self.bg_darkest;

        let widgets = &mut visuals.widgets;
        widgets.noninteractive.bg_fill = self.bg_medium;
        widgets.noninteractive.bg_stroke = Stroke::new(1.0, self.border);
        widgets.noninteractive.fg_stroke = Stroke::new(1.0, self.text_secondary);

        for state in [&mut widgets.inactive, &mut widgets.hovered, &mut widgets.open] {
            state.bg_fill = self.bg_light;
            state.weak_bg_fill = self.bg_light;
            state.fg_stroke = Stroke::new(1.0, self.text_primary);
        }
        widgets.inactive.bg_stroke = Stroke::new(1.0, self.border);
        widgets.hovered.bg_stroke = Stroke::new(1.0, self.accent);
        widgets.open.bg_stroke = Stroke::new(1.0, self.accent);

        widgets.active.bg_fill = self.accent_muted;
        widgets.active.weak_bg_fill = self.accent_muted;
        widgets.active.bg_stroke = Stroke::new(1.0, self.accent_hover);
        widgets.active.fg_stroke = Stroke::new(1.0, self.text_primary);

        visuals.selection.bg_fill = self.selection;
        visuals.selection.stroke = Stroke::new(1.0, self.accent);
        visuals.hyperlink_color = self.accent;
        visuals.error_fg_color = self.error;

        visuals.window_stroke = Stroke::new(1.0, self.border);
        visuals.window_shadow = egui::epaint::Shadow::NONE;
        visuals.popup_shadow = egui::epaint::Shadow::NONE;

        ctx.set_visuals(visuals);
    }
}
