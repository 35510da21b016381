use std::sync::Arc;

use egui::{pos2, vec2, Color32, FontId, Galley, Pos2, Rect, RichText, Sense, Stroke, Ui, Vec2};

use crate::config::Config;
use crate::layout::{
    Element, GridArea, Indicator, OverlayPlacement, Projection, RenderMode, SessionElement, SessionId,
};
use super::theme::{
    category_colors, grid_colors, overlay_colors, phosphor_fill_family, ACCENT, BODY_SIZE, CAPTION_SIZE,
    SESSION_ROUNDING,
};

const TIME_COLUMN_WIDTH: f32 = 64.0;
const HEADER_HEIGHT: f32 = 36.0;
const MIN_DAY_COLUMN_WIDTH: f32 = 140.0;
const OVERLAY_PADDING: f32 = 14.0;
const INDICATOR_SIZE: f32 = 8.0;

/// A clickable session as laid out this frame
#[derive(Debug, Clone)]
pub struct Anchor {
    pub session: SessionId,
    pub rect: Rect,
    pub widget: egui::Id,
}

/// Result from schedule view interactions
#[derive(Debug, Default)]
pub struct ViewResult {
    pub anchors: Vec<Anchor>,
    /// Session clicked, tapped or activated with Enter/Space this frame
    pub activated: Option<SessionId>,
}

impl ViewResult {
    pub fn anchor(&self, id: SessionId) -> Option<&Anchor> {
        self.anchors.iter().find(|a| a.session == id)
    }

    pub fn hits_anchor(&self, pos: Pos2) -> bool {
        self.anchors.iter().any(|a| a.rect.contains(pos))
    }
}

/// Maps 1-based grid lines to screen coordinates.
/// Column 1 is the time column, row 1 the day header row.
#[derive(Debug, Clone, Copy)]
pub struct GridGeometry {
    pub origin: Pos2,
    pub day_column_width: f32,
    pub row_height: f32,
}

impl GridGeometry {
    fn line_x(&self, line: u32) -> f32 {
        match line {
            0 | 1 => self.origin.x,
            n => self.origin.x + TIME_COLUMN_WIDTH + (n - 2) as f32 * self.day_column_width,
        }
    }

    fn line_y(&self, line: u32) -> f32 {
        match line {
            0 | 1 => self.origin.y,
            n => self.origin.y + HEADER_HEIGHT + (n - 2) as f32 * self.row_height,
        }
    }

    pub fn rect(&self, area: GridArea) -> Rect {
        Rect::from_min_max(
            pos2(self.line_x(area.column), self.line_y(area.row)),
            pos2(
                self.line_x(area.column.saturating_add(area.column_span)),
                self.line_y(area.row.saturating_add(area.row_span)),
            ),
        )
    }

    /// Size of a grid with `columns` × `rows` cells
    pub fn size(&self, columns: u32, rows: u32) -> Vec2 {
        vec2(
            self.line_x(columns.saturating_add(1)) - self.origin.x,
            self.line_y(rows.saturating_add(1)) - self.origin.y,
        )
    }
}

pub fn render_view(ui: &mut Ui, projection: &Projection, active: Option<SessionId>, config: &Config) -> ViewResult {
    match projection.mode {
        RenderMode::Grid => render_grid_view(ui, projection, active, config),
        RenderMode::List => render_list_view(ui, projection, active, config),
    }
}

pub fn render_grid_view(ui: &mut Ui, projection: &Projection, active: Option<SessionId>, config: &Config) -> ViewResult {
    let mut result = ViewResult::default();
    let (columns, rows) = projection.extent;
    let day_columns = columns.saturating_sub(1).max(1);
    let (line_color, label_color) = grid_colors();

    egui::ScrollArea::both().auto_shrink([false, false]).show(ui, |ui| {
        let day_column_width = ((ui.available_width() - TIME_COLUMN_WIDTH) / day_columns as f32)
            .max(MIN_DAY_COLUMN_WIDTH);
        let mut geometry = GridGeometry {
            origin: ui.cursor().min,
            day_column_width,
            row_height: config.row_height,
        };
        let (grid_rect, _) = ui.allocate_exact_size(geometry.size(columns.max(2), rows), Sense::hover());
        geometry.origin = grid_rect.min;

        let painter = ui.painter().clone();

        // Horizontal line at every time point
        for row in 2..=rows {
            let y = geometry.line_y(row);
            painter.line_segment(
                [pos2(grid_rect.min.x + TIME_COLUMN_WIDTH, y), pos2(grid_rect.max.x, y)],
                Stroke::new(1.0, line_color),
            );
        }

        for element in &projection.elements {
            match element {
                Element::DayLabel { title, area, .. } => {
                    let rect = geometry.rect(*area);
                    painter.text(
                        rect.center(),
                        egui::Align2::CENTER_CENTER,
                        title,
                        egui::TextStyle::Heading.resolve(ui.style()),
                        Color32::from_rgb(0xd0, 0xd0, 0xc8),
                    );
                    // Day separator
                    painter.line_segment(
                        [pos2(rect.min.x, rect.min.y + 4.0), pos2(rect.min.x, grid_rect.max.y)],
                        Stroke::new(1.0, line_color),
                    );
                }
                Element::TimeLabel { time, area } => {
                    let rect = geometry.rect(*area);
                    painter.text(
                        pos2(rect.max.x - 8.0, rect.min.y + 2.0),
                        egui::Align2::RIGHT_TOP,
                        time.as_str(),
                        FontId::proportional(CAPTION_SIZE),
                        label_color,
                    );
                }
                Element::Session(session) => {
                    let Some(area) = session.area else { continue };
                    let rect = geometry.rect(area).shrink(2.0);
                    let (anchor, clicked) = render_session_block(ui, session, rect, active == Some(session.id));
                    if clicked {
                        result.activated = Some(session.id);
                    }
                    result.anchors.push(anchor);
                }
                Element::DayHeader { .. } => {}
            }
        }
    });

    result
}

pub fn render_list_view(ui: &mut Ui, projection: &Projection, active: Option<SessionId>, config: &Config) -> ViewResult {
    let mut result = ViewResult::default();

    egui::ScrollArea::vertical().auto_shrink([false, false]).show(ui, |ui| {
        for element in &projection.elements {
            match element {
                Element::DayHeader { title, .. } => {
                    ui.add_space(8.0);
                    ui.label(RichText::new(title).heading().strong().color(Color32::WHITE));
                }
                Element::Session(session) => {
                    let (rect, _) = ui.allocate_exact_size(
                        vec2(ui.available_width(), config.row_height),
                        Sense::hover(),
                    );
                    let (anchor, clicked) = render_session_block(ui, session, rect, active == Some(session.id));
                    if clicked {
                        result.activated = Some(session.id);
                    }
                    result.anchors.push(anchor);
                }
                Element::DayLabel { .. } | Element::TimeLabel { .. } => {}
            }
        }
        ui.add_space(12.0);
    });

    result
}

/// Paint one session and register it for clicks and keyboard focus.
/// Returns the anchor and whether it was activated.
fn render_session_block(ui: &mut Ui, session: &SessionElement, rect: Rect, is_active: bool) -> (Anchor, bool) {
    let widget = ui.id().with(("session", session.id.0));
    let sense = if session.is_activatable() { Sense::click() } else { Sense::hover() };
    let response = ui.interact(rect, widget, sense);

    let (fill, border, icon) = category_colors(&session.category);
    let stroke = if is_active {
        Stroke::new(2.0, ACCENT)
    } else if response.has_focus() {
        ui.visuals().selection.stroke
    } else if response.hovered() && session.is_activatable() {
        Stroke::new(1.0, Color32::from_rgb(0xd0, 0xd0, 0xc8))
    } else {
        Stroke::new(1.0, border)
    };

    let painter = ui.painter().with_clip_rect(rect.intersect(ui.clip_rect()));
    painter.rect_filled(rect, SESSION_ROUNDING, fill);
    painter.rect_stroke(rect, SESSION_ROUNDING, stroke);

    let text_left = rect.min.x + 10.0;
    painter.text(
        pos2(text_left, rect.min.y + 8.0),
        egui::Align2::LEFT_TOP,
        icon,
        FontId::new(13.0, phosphor_fill_family()),
        border,
    );

    let title = painter.layout(
        session.title.clone(),
        FontId::proportional(BODY_SIZE),
        Color32::WHITE,
        (rect.width() - 38.0).max(20.0),
    );
    let title_height = title.size().y;
    painter.galley(pos2(text_left + 20.0, rect.min.y + 6.0), title, Color32::WHITE);
    painter.text(
        pos2(text_left + 20.0, rect.min.y + 10.0 + title_height),
        egui::Align2::LEFT_TOP,
        &session.time_range,
        FontId::proportional(CAPTION_SIZE),
        Color32::from_rgb(0xb0, 0xb0, 0xa8),
    );

    if response.hovered() && session.is_activatable() {
        ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
    }

    let anchor = Anchor { session: session.id, rect, widget };
    (anchor, response.clicked())
}

/// Overlay text laid out at a fixed width, so its natural size is known before placement
pub struct OverlayContent {
    title: Arc<Galley>,
    caption: Arc<Galley>,
    details: Arc<Galley>,
}

impl OverlayContent {
    pub fn layout(ctx: &egui::Context, session: &SessionElement, width: f32) -> Self {
        let (_, _, secondary) = overlay_colors();
        let wrap = (width - 2.0 * OVERLAY_PADDING).max(40.0);
        ctx.fonts(|fonts| Self {
            title: fonts.layout(session.title.clone(), FontId::proportional(16.0), Color32::WHITE, wrap),
            caption: fonts.layout(
                format!("{} {}", egui_phosphor::regular::CLOCK, session.time_range),
                FontId::proportional(12.0),
                secondary,
                wrap,
            ),
            details: fonts.layout(session.details.clone(), FontId::proportional(BODY_SIZE), Color32::WHITE, wrap),
        })
    }

    fn body_size(&self) -> Vec2 {
        let width = self.title.size().x.max(self.caption.size().x).max(self.details.size().x);
        let height = self.title.size().y + 4.0 + self.caption.size().y + 10.0 + self.details.size().y;
        vec2(width, height)
    }

    /// Size of the whole overlay, padding included, without any height limit
    pub fn natural_size(&self, width: f32) -> Vec2 {
        vec2(width, self.body_size().y + 2.0 * OVERLAY_PADDING)
    }
}

/// Draw the overlay where the placement engine put it. Returns the area actually covered.
pub fn render_overlay(ctx: &egui::Context, content: &OverlayContent, placement: &OverlayPlacement) -> Rect {
    let (bg, border, _) = overlay_colors();
    let rect = placement.rect;
    let inner_width = (rect.width() - 2.0 * OVERLAY_PADDING).max(0.0);
    let inner_height = (rect.height() - 2.0 * OVERLAY_PADDING).max(0.0);

    let shown = egui::Area::new(egui::Id::new("session_overlay"))
        .order(egui::Order::Foreground)
        .fixed_pos(rect.min)
        .show(ctx, |ui| {
            egui::Frame::none()
                .fill(bg)
                .stroke(Stroke::new(1.0, border))
                .rounding(egui::Rounding::same(8.0))
                .inner_margin(egui::Margin::same(OVERLAY_PADDING))
                .show(ui, |ui| {
                    ui.set_width(inner_width);
                    egui::ScrollArea::vertical()
                        .max_height(inner_height)
                        .auto_shrink([false, true])
                        .show(ui, |ui| {
                            let (body, _) = ui.allocate_exact_size(
                                vec2(inner_width, content.body_size().y),
                                Sense::hover(),
                            );
                            let painter = ui.painter();
                            let mut y = body.min.y;
                            painter.galley(pos2(body.min.x, y), content.title.clone(), Color32::WHITE);
                            y += content.title.size().y + 4.0;
                            painter.galley(pos2(body.min.x, y), content.caption.clone(), Color32::WHITE);
                            y += content.caption.size().y + 10.0;
                            painter.galley(pos2(body.min.x, y), content.details.clone(), Color32::WHITE);
                        });
                });
        });

    if let (Some(indicator), Some(x)) = (placement.indicator, placement.indicator_x) {
        let painter = ctx.layer_painter(egui::LayerId::new(
            egui::Order::Foreground,
            egui::Id::new("session_overlay_indicator"),
        ));
        let (edge, tip) = match indicator {
            Indicator::PointsUp => (rect.min.y, rect.min.y - INDICATOR_SIZE),
            Indicator::PointsDown => (rect.max.y, rect.max.y + INDICATOR_SIZE),
        };
        painter.add(egui::Shape::convex_polygon(
            vec![pos2(x - INDICATOR_SIZE, edge), pos2(x, tip), pos2(x + INDICATOR_SIZE, edge)],
            bg,
            Stroke::new(1.0, border),
        ));
    }

    shown.response.rect
}

/// Centered message shown instead of the schedule while loading or after a failure
pub fn render_message(ui: &mut Ui, message: &str, is_error: bool) {
    ui.vertical_centered(|ui| {
        ui.add_space(ui.available_height() / 3.0);
        if is_error {
            ui.label(
                RichText::new(format!("{} {}", egui_phosphor::regular::WARNING_CIRCLE, message))
                    .size(16.0)
                    .color(Color32::from_rgb(224, 108, 117)),
            );
        } else {
            ui.spinner();
            ui.label(RichText::new(message).size(16.0).color(Color32::from_rgb(176, 176, 168)));
        }
    });
}
