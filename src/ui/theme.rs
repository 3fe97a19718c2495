//! Theme and styling for the UI

use egui::{Color32, FontFamily, FontId, Rounding, Stroke, TextStyle, Visuals};

use crate::core::settings::Theme as ThemeSetting;

/// Application color palette
pub struct Theme;

impl Theme {
    // Accent
    pub const PRIMARY: Color32 = Color32::from_rgb(99, 102, 241); // Indigo-500
    pub const PRIMARY_LIGHT: Color32 = Color32::from_rgb(165, 180, 252); // Indigo-300
    pub const PRIMARY_DARK: Color32 = Color32::from_rgb(67, 56, 202); // Indigo-700

    // Status
    pub const SUCCESS: Color32 = Color32::from_rgb(16, 185, 129); // Emerald-500
    pub const WARNING: Color32 = Color32::from_rgb(245, 158, 11); // Amber-500
    pub const WARNING_LIGHT: Color32 = Color32::from_rgb(251, 191, 36); // Amber-400

    // Dark surfaces
    pub const BG_PRIMARY: Color32 = Color32::from_rgb(17, 17, 27);
    pub const BG_SECONDARY: Color32 = Color32::from_rgb(24, 24, 37);
    pub const BG_TERTIARY: Color32 = Color32::from_rgb(35, 35, 52);
    pub const BG_HOVER: Color32 = Color32::from_rgb(45, 45, 65);
    pub const BG_ELEVATED: Color32 = Color32::from_rgb(30, 30, 45);

    // Text
    pub const TEXT_PRIMARY: Color32 = Color32::from_rgb(250, 250, 255);
    pub const TEXT_SECONDARY: Color32 = Color32::from_rgb(161, 161, 180);
    pub const TEXT_MUTED: Color32 = Color32::from_rgb(113, 113, 132);

    // Borders
    pub const BORDER: Color32 = Color32::from_rgb(50, 50, 70);
    pub const BORDER_LIGHT: Color32 = Color32::from_rgb(38, 38, 55);

    /// Apply the configured theme to egui
    pub fn apply(ctx: &egui::Context, setting: ThemeSetting) {
        let palette = match setting {
            ThemeSetting::Light => Palette::light(),
            // Default to dark for now
            ThemeSetting::Dark | ThemeSetting::System => Palette::dark(),
        };
        palette.install(ctx);
    }

    /// Switch track color for a server row
    pub fn switch_color(running: bool, pending: bool) -> Color32 {
        match (running, pending) {
            (true, false) => Self::SUCCESS,
            (true, true) => Self::WARNING,
            (false, true) => Self::WARNING_LIGHT,
            (false, false) => Self::TEXT_MUTED,
        }
    }

    /// Row background for a server entry
    pub fn row_fill(selected: bool, hovered: bool) -> Color32 {
        if selected {
            Self::PRIMARY.linear_multiply(0.15)
        } else if hovered {
            Self::BG_HOVER.linear_multiply(0.6)
        } else {
            Color32::TRANSPARENT
        }
    }
}

/// Surface and text colors for one theme variant
struct Palette {
    base: Visuals,
    panel: Color32,
    window: Color32,
    surface: Color32,
    raised: Color32,
    hover: Color32,
    text: Color32,
    text_dim: Color32,
    border: Color32,
    shadow_alpha: u8,
}

impl Palette {
    fn dark() -> Self {
        Self {
            base: Visuals::dark(),
            panel: Theme::BG_PRIMARY,
            window: Theme::BG_ELEVATED,
            surface: Theme::BG_SECONDARY,
            raised: Theme::BG_TERTIARY,
            hover: Theme::BG_HOVER,
            text: Theme::TEXT_PRIMARY,
            text_dim: Theme::TEXT_SECONDARY,
            border: Theme::BORDER,
            shadow_alpha: 120,
        }
    }

    fn light() -> Self {
        Self {
            base: Visuals::light(),
            panel: Color32::from_rgb(249, 250, 251),
            window: Color32::WHITE,
            surface: Color32::from_rgb(243, 244, 246),
            raised: Color32::from_rgb(229, 231, 235),
            hover: Color32::from_rgb(209, 213, 219),
            text: Color32::from_rgb(17, 24, 39),
            text_dim: Color32::from_rgb(75, 85, 99),
            border: Color32::from_rgb(209, 213, 219),
            shadow_alpha: 20,
        }
    }

    fn install(self, ctx: &egui::Context) {
        let mut style = (*ctx.style()).clone();
        let mut visuals = self.base;
        let rounding = Rounding::same(6.0);

        visuals.panel_fill = self.panel;
        visuals.window_fill = self.window;
        visuals.extreme_bg_color = self.panel;
        visuals.faint_bg_color = self.raised;

        let widgets = &mut visuals.widgets;
        widgets.noninteractive.bg_fill = self.surface;
        widgets.noninteractive.fg_stroke = Stroke::new(1.0, self.text);
        widgets.noninteractive.bg_stroke = Stroke::new(0.5, self.border);
        widgets.inactive.bg_fill = self.raised;
        widgets.inactive.fg_stroke = Stroke::new(1.0, self.text_dim);
        widgets.inactive.bg_stroke = Stroke::new(0.5, self.border);
        widgets.hovered.bg_fill = self.hover;
        widgets.hovered.fg_stroke = Stroke::new(1.0, self.text);
        widgets.hovered.bg_stroke = Stroke::new(1.0, Theme::PRIMARY.linear_multiply(0.6));
        widgets.hovered.expansion = 1.0;
        widgets.active.bg_fill = Theme::PRIMARY;
        widgets.active.fg_stroke = Stroke::new(1.0, Color32::WHITE);
        widgets.active.bg_stroke = Stroke::new(1.0, Theme::PRIMARY_DARK);
        for state in [
            &mut widgets.noninteractive,
            &mut widgets.inactive,
            &mut widgets.hovered,
            &mut widgets.active,
            &mut widgets.open,
        ] {
            state.rounding = rounding;
        }

        visuals.selection.bg_fill = Theme::PRIMARY.linear_multiply(0.25);
        visuals.selection.stroke = Stroke::new(1.0, Theme::PRIMARY);
        visuals.window_rounding = Rounding::same(10.0);
        visuals.window_stroke = Stroke::new(0.5, self.border);
        visuals.window_shadow = egui::Shadow {
            offset: egui::vec2(0.0, 8.0),
            blur: 24.0,
            spread: 4.0,
            color: Color32::from_black_alpha(self.shadow_alpha),
        };
        style.visuals = visuals;

        style.text_styles = [
            (TextStyle::Small, FontId::new(12.0, FontFamily::Proportional)),
            (TextStyle::Body, FontId::new(14.0, FontFamily::Proportional)),
            (TextStyle::Button, FontId::new(14.0, FontFamily::Proportional)),
            (TextStyle::Heading, FontId::new(20.0, FontFamily::Proportional)),
            (TextStyle::Monospace, FontId::new(13.0, FontFamily::Monospace)),
        ]
        .into();

        style.spacing.item_spacing = egui::vec2(8.0, 6.0);
        style.spacing.button_padding = egui::vec2(14.0, 8.0);
        style.interaction.tooltip_delay = 0.3;

        ctx.set_style(style);
    }
}
