use egui::{Color32, FontFamily, FontId, Rounding, Stroke, Style, TextStyle, Visuals};

// Dark greenhouse palette: near-black with a leaf tint, petal pink for the
// active accent.
pub const BG_DEEP: Color32 = Color32::from_rgb(4, 7, 5);
pub const BG_PANEL: Color32 = Color32::from_rgb(9, 13, 10);
pub const BG_WIDGET: Color32 = Color32::from_rgb(18, 24, 20);
pub const BG_WIDGET_HOVER: Color32 = Color32::from_rgb(28, 37, 31);
pub const BG_WIDGET_ACTIVE: Color32 = Color32::from_rgb(38, 50, 42);

pub const TEXT_PRIMARY: Color32 = Color32::from_rgb(186, 192, 185);
pub const TEXT_MUTED: Color32 = Color32::from_rgb(116, 124, 117);
pub const TEXT_BRIGHT: Color32 = Color32::from_rgb(228, 233, 227);

pub const ACCENT_PETAL: Color32 = Color32::from_rgb(204, 49, 104);
pub const ACCENT_LEAF: Color32 = Color32::from_rgb(94, 168, 82);
pub const ACCENT_SKY: Color32 = Color32::from_rgb(106, 156, 214);
pub const ACCENT_AMBER: Color32 = Color32::from_rgb(214, 156, 60);
pub const ACCENT_ERROR: Color32 = Color32::from_rgb(198, 64, 54);

pub const BORDER_SUBTLE: Color32 = Color32::from_rgba_premultiplied(62, 82, 68, 80);
pub const BORDER_ACCENT: Color32 = ACCENT_PETAL;

pub fn apply_theme(ctx: &egui::Context) {
    let mut style = Style::default();

    style.visuals = Visuals {
        dark_mode: true,
        override_text_color: Some(TEXT_PRIMARY),

        widgets: egui::style::Widgets {
            noninteractive: egui::style::WidgetVisuals {
                bg_fill: BG_WIDGET,
                weak_bg_fill: BG_PANEL,
                bg_stroke: Stroke::new(1.0, BORDER_SUBTLE),
                rounding: Rounding::same(3.0),
                fg_stroke: Stroke::new(1.0, TEXT_MUTED),
                expansion: 0.0,
            },
            inactive: egui::style::WidgetVisuals {
                bg_fill: BG_WIDGET,
                weak_bg_fill: BG_WIDGET,
                bg_stroke: Stroke::new(1.0, BORDER_SUBTLE),
                rounding: Rounding::same(3.0),
                fg_stroke: Stroke::new(1.0, TEXT_PRIMARY),
                expansion: 0.0,
            },
            hovered: egui::style::WidgetVisuals {
                bg_fill: BG_WIDGET_HOVER,
                weak_bg_fill: BG_WIDGET_HOVER,
                bg_stroke: Stroke::new(1.0, BORDER_ACCENT),
                rounding: Rounding::same(3.0),
                fg_stroke: Stroke::new(1.0, TEXT_BRIGHT),
                expansion: 1.0,
            },
            active: egui::style::WidgetVisuals {
                bg_fill: BG_WIDGET_ACTIVE,
                weak_bg_fill: BG_WIDGET_ACTIVE,
                bg_stroke: Stroke::new(2.0, ACCENT_PETAL),
                rounding: Rounding::same(3.0),
                fg_stroke: Stroke::new(1.0, TEXT_BRIGHT),
                expansion: 1.0,
            },
            open: egui::style::WidgetVisuals {
                bg_fill: BG_WIDGET_ACTIVE,
                weak_bg_fill: BG_WIDGET_ACTIVE,
                bg_stroke: Stroke::new(1.0, BORDER_SUBTLE),
                rounding: Rounding::same(3.0),
                fg_stroke: Stroke::new(1.0, TEXT_BRIGHT),
                expansion: 0.0,
            },
        },

        selection: egui::style::Selection {
            bg_fill: ACCENT_PETAL.gamma_multiply(0.35),
            stroke: Stroke::new(1.0, ACCENT_PETAL),
        },

        hyperlink_color: ACCENT_SKY,
        faint_bg_color: BG_PANEL,
        extreme_bg_color: BG_DEEP,
        code_bg_color: BG_DEEP,
        warn_fg_color: ACCENT_AMBER,
        error_fg_color: ACCENT_ERROR,

        window_rounding: Rounding::same(8.0),
        window_shadow: egui::epaint::Shadow {
            offset: egui::vec2(0.0, 3.0),
            blur: 12.0,
            spread: 0.0,
            color: Color32::from_black_alpha(140),
        },
        window_fill: BG_PANEL,
        window_stroke: Stroke::new(1.0, BORDER_SUBTLE),

        panel_fill: BG_PANEL,

        popup_shadow: egui::epaint::Shadow {
            offset: egui::vec2(0.0, 2.0),
            blur: 6.0,
            spread: 0.0,
            color: Color32::from_black_alpha(110),
        },

        resize_corner_size: 10.0,
        text_cursor: egui::style::TextCursorStyle {
            stroke: Stroke::new(2.0, ACCENT_PETAL),
            ..Default::default()
        },
        clip_rect_margin: 3.0,
        button_frame: true,
        collapsing_header_frame: false,
        indent_has_left_vline: false,
        striped: false,
        slider_trailing_fill: true,
        handle_shape: egui::style::HandleShape::Circle,
        interact_cursor: None,
        image_loading_spinners: true,
        numeric_color_space: egui::style::NumericColorSpace::GammaByte,
        menu_rounding: Rounding::same(3.0),
        window_highlight_topmost: true,
    };

    // The panel is mostly slider rows; tighter vertical rhythm and a wider
    // slider track than the egui defaults.
    style.spacing.item_spacing = egui::vec2(8.0, 5.0);
    style.spacing.window_margin = egui::Margin::same(14.0);
    style.spacing.button_padding = egui::vec2(10.0, 5.0);
    style.spacing.indent = 16.0;
    style.spacing.slider_width = 220.0;

    style.text_styles = [
        (
            TextStyle::Small,
            FontId::new(10.5, FontFamily::Proportional),
        ),
        (TextStyle::Body, FontId::new(13.0, FontFamily::Proportional)),
        (
            TextStyle::Button,
            FontId::new(13.0, FontFamily::Proportional),
        ),
        (
            TextStyle::Heading,
            FontId::new(17.0, FontFamily::Proportional),
        ),
        (
            TextStyle::Monospace,
            FontId::new(12.0, FontFamily::Monospace),
        ),
    ]
    .into();

    ctx.set_style(style);
}
