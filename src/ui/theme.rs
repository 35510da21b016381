use egui::{Color32, FontFamily, FontId, Rounding, Stroke, Style, TextStyle, Visuals};

pub const ACCENT: Color32 = Color32::from_rgb(19, 152, 244);

/// Font family for filled Phosphor icons
pub fn phosphor_fill_family() -> FontFamily {
    FontFamily::Name("phosphor-fill".into())
}

pub fn setup_fonts(ctx: &egui::Context) {
    let mut fonts = egui::FontDefinitions::default();

    // Phosphor Regular icons as fallback in Proportional family
    egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);

    // Phosphor Fill as a separate family, used for category markers
    fonts.font_data.insert(
        "phosphor-fill".into(),
        egui_phosphor::Variant::Fill.font_data(),
    );
    fonts.families.insert(
        phosphor_fill_family(),
        vec!["phosphor-fill".into()],
    );

    ctx.set_fonts(fonts);
}

pub const CAPTION_SIZE: f32 = 11.0;
pub const BODY_SIZE: f32 = 14.0;
/// Day headers in both views
pub const DAY_HEADER_SIZE: f32 = 17.0;
pub const SESSION_ROUNDING: f32 = 6.0;

pub fn setup_theme(ctx: &egui::Context) {
    let (line, label) = grid_colors();
    let (overlay_bg, overlay_border, secondary) = overlay_colors();

    let mut visuals = Visuals::dark();
    visuals.panel_fill = Color32::BLACK;
    visuals.extreme_bg_color = Color32::BLACK;
    visuals.faint_bg_color = line;

    // The detail overlay is the only window-like surface
    visuals.window_fill = overlay_bg;
    visuals.window_stroke = Stroke::new(1.0, overlay_border);
    visuals.window_rounding = Rounding::same(8.0);
    visuals.window_shadow = egui::Shadow::NONE;
    visuals.popup_shadow = egui::Shadow::NONE;

    visuals.widgets.noninteractive.fg_stroke = Stroke::new(1.0, secondary);
    visuals.widgets.noninteractive.bg_stroke = Stroke::new(1.0, line);
    visuals.widgets.inactive.fg_stroke = Stroke::new(1.0, label);
    visuals.widgets.hovered.fg_stroke = Stroke::new(1.0, Color32::WHITE);
    visuals.widgets.active.bg_fill = ACCENT;

    // Keyboard focus on a session block
    visuals.selection.bg_fill = ACCENT.linear_multiply(0.4);
    visuals.selection.stroke = Stroke::new(1.5, ACCENT);

    for widget in [
        &mut visuals.widgets.noninteractive,
        &mut visuals.widgets.inactive,
        &mut visuals.widgets.hovered,
        &mut visuals.widgets.active,
    ] {
        widget.rounding = Rounding::same(SESSION_ROUNDING);
    }

    let mut style = Style { visuals, ..Style::default() };
    style.text_styles = [
        (TextStyle::Small, FontId::proportional(CAPTION_SIZE)),
        (TextStyle::Body, FontId::proportional(BODY_SIZE)),
        (TextStyle::Button, FontId::proportional(BODY_SIZE)),
        (TextStyle::Heading, FontId::proportional(DAY_HEADER_SIZE)),
        (TextStyle::Monospace, FontId::monospace(BODY_SIZE)),
    ]
    .into();

    // Sessions sit close together in the list
    style.spacing.item_spacing = egui::vec2(8.0, 6.0);
    style.spacing.scroll = egui::style::ScrollStyle::thin();

    ctx.set_style(style);
}

/// Returns (fill, border, icon) for a session block, keyed by its category tag
pub fn category_colors(category: &str) -> (Color32, Color32, &'static str) {
    match category.to_ascii_lowercase().as_str() {
        "keynote" => (
            Color32::from_rgb(0x3a, 0x1f, 0x5c),
            Color32::from_rgb(0x90, 0x4e, 0xe2),
            egui_phosphor::fill::MICROPHONE_STAGE,
        ),
        "talk" | "presentations" => (
            Color32::from_rgb(0x10, 0x33, 0x4d),
            ACCENT,
            egui_phosphor::fill::PRESENTATION,
        ),
        "panel" => (
            Color32::from_rgb(0x1e, 0x3d, 0x1a),
            Color32::from_rgb(0x65, 0xba, 0x43),
            egui_phosphor::fill::USERS_THREE,
        ),
        "workshop" => (
            Color32::from_rgb(0x4d, 0x2e, 0x0a),
            Color32::from_rgb(0xfe, 0x61, 0x00),
            egui_phosphor::fill::WRENCH,
        ),
        "break" => (
            Color32::from_rgb(0x26, 0x26, 0x24),
            Color32::from_rgb(0x70, 0x70, 0x68),
            egui_phosphor::fill::COFFEE,
        ),
        _ => (
            Color32::from_rgb(0x1e, 0x1e, 0x1c),
            Color32::from_rgb(0x50, 0x50, 0x4a),
            egui_phosphor::fill::CALENDAR_BLANK,
        ),
    }
}

/// Returns (bg, border, secondary_text) for the detail overlay
pub fn overlay_colors() -> (Color32, Color32, Color32) {
    (
        Color32::from_rgb(0x1e, 0x1e, 0x1c),
        Color32::from_rgb(80, 80, 74),
        Color32::from_rgb(176, 176, 168),
    )
}

/// Returns (grid_line, label_text) for the schedule grid
pub fn grid_colors() -> (Color32, Color32) {
    (
        Color32::from_rgb(0x40, 0x40, 0x3c),
        Color32::from_rgb(0x70, 0x70, 0x68),
    )
}
