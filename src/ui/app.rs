use anyhow::Context as _;
use eframe::egui;
use egui::{Color32, Pos2, Rect, RichText};
use std::sync::mpsc::{channel, Receiver, Sender};

use crate::api::{ScheduleClient, ScheduleData, ScheduleSource};
use crate::config::{Config, Overrides};
use crate::layout::{self, Effect, PlacementParams, RenderMode, RenderState, Schedule, Trigger, ViewSelector};
use super::views::{self, OverlayContent, ViewResult};

pub struct ScheduleApp {
    config: Config,
    source: ScheduleSource,
    selector: ViewSelector,
    params: PlacementParams,
    state: AppState,

    // Screen area covered by the overlay last frame, for outside-click tests
    overlay_rect: Option<Rect>,
    diagnostics_dismissed: bool,

    // Async communication
    runtime: tokio::runtime::Runtime,
    result_rx: Receiver<AsyncResult>,
    result_tx: Sender<AsyncResult>,
}

enum AppState {
    Loading,
    Failed(String),
    Ready(RenderState),
}

enum AsyncResult {
    ScheduleLoaded(ScheduleData),
    Error(String),
}

impl ScheduleApp {
    pub fn new(cc: &eframe::CreationContext<'_>, config: Config, overrides: Overrides) -> anyhow::Result<Self> {
        super::setup_fonts(&cc.egui_ctx);
        super::setup_theme(&cc.egui_ctx);

        let runtime = tokio::runtime::Runtime::new().context("Failed to create tokio runtime")?;
        let (result_tx, result_rx) = channel();

        let mut app = Self {
            source: overrides.source(&config),
            selector: overrides.view_selector(&config),
            params: config.placement_params(),
            config,
            state: AppState::Loading,
            overlay_rect: None,
            diagnostics_dismissed: false,
            runtime,
            result_rx,
            result_tx,
        };
        app.load_schedule(&cc.egui_ctx);

        Ok(app)
    }

    fn load_schedule(&mut self, ctx: &egui::Context) {
        self.state = AppState::Loading;
        log::info!("Loading schedule from {}", self.source);

        let source = self.source.clone();
        let tx = self.result_tx.clone();
        let ctx = ctx.clone();

        self.runtime.spawn(async move {
            let result = async {
                let client = ScheduleClient::new(source.clone())?;
                client.fetch().await
            }
            .await
            .with_context(|| format!("Could not load schedule from {}", source));

            let message = match result {
                Ok(data) => AsyncResult::ScheduleLoaded(data),
                Err(e) => {
                    log::error!("{:#}", e);
                    AsyncResult::Error(format!("{:#}", e))
                }
            };
            let _ = tx.send(message);
            ctx.request_repaint();
        });
    }

    fn check_async_results(&mut self) {
        while let Ok(result) = self.result_rx.try_recv() {
            match result {
                AsyncResult::ScheduleLoaded(data) => {
                    let schedule = Schedule::from_data(data);
                    self.state = AppState::Ready(RenderState::new(schedule, self.selector));
                    self.overlay_rect = None;
                    self.diagnostics_dismissed = false;
                }
                AsyncResult::Error(msg) => {
                    self.state = AppState::Failed(msg);
                }
            }
        }
    }

    fn apply_zoom(&mut self, ctx: &egui::Context) {
        // Pinch-to-zoom (trackpad pinch or Ctrl+scroll)
        let zoom_delta = ctx.input(|i| i.zoom_delta());
        if zoom_delta != 1.0 {
            self.config.font_scale = (self.config.font_scale * zoom_delta).clamp(0.75, 2.5);
            if (zoom_delta - 1.0).abs() > 0.01 {
                if let Err(e) = self.config.save() {
                    log::error!("Failed to save config: {:#}", e);
                }
            }
        }
        ctx.set_pixels_per_point(self.config.font_scale);
    }
}

impl eframe::App for ScheduleApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.apply_zoom(ctx);
        self.check_async_results();

        let screen = ctx.screen_rect();
        let mut view_result = None;

        egui::CentralPanel::default().frame(
            egui::Frame::none().inner_margin(egui::Margin::symmetric(12.0, 8.0))
        ).show(ctx, |ui| {
            match &mut self.state {
                AppState::Loading => views::render_message(ui, "Loading schedule…", false),
                AppState::Failed(msg) => views::render_message(ui, msg, true),
                AppState::Ready(render) => {
                    render.on_resize(screen.width());

                    let Some(projection) = render.projection() else { return };
                    if !self.diagnostics_dismissed && !projection.diagnostics.is_empty() {
                        self.diagnostics_dismissed = render_status_line(ui, projection.diagnostics.len());
                    }
                    view_result = Some(views::render_view(ui, projection, render.active(), &self.config));
                }
            }
        });

        if let (AppState::Ready(render), Some(view_result)) = (&mut self.state, view_result) {
            self.overlay_rect = drive_overlay(
                ctx,
                render,
                &view_result,
                self.overlay_rect,
                &self.config,
                &self.params,
            );
        } else {
            self.overlay_rect = None;
        }
    }
}

/// Selectable status text with a close button. Returns true once dismissed.
fn render_status_line(ui: &mut egui::Ui, skipped: usize) -> bool {
    let mut dismissed = false;
    let color = Color32::from_rgb(229, 192, 123);
    let dim_color = Color32::from_rgb(120, 120, 130);

    ui.horizontal(|ui| {
        ui.add(egui::Label::new(
            RichText::new(format!("{} {}", egui_phosphor::regular::WARNING, skipped_message(skipped))).color(color)
        ));

        ui.add_space(8.0);

        let close_btn = ui.add(egui::Label::new(
            RichText::new(egui_phosphor::regular::X).size(14.0).color(dim_color)
        ).sense(egui::Sense::click()));
        if close_btn.hovered() {
            ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
        }
        if close_btn.clicked() {
            dismissed = true;
        }
    });
    ui.add_space(8.0);

    dismissed
}

fn skipped_message(skipped: usize) -> String {
    format!("{} session(s) could not be placed", skipped)
}

/// Translate this frame's raw input into at most one overlay trigger.
/// Activation wins over dismissal; an outside click must miss both the
/// overlay and every session.
fn pointer_trigger(
    view: &ViewResult,
    escape: bool,
    click: Option<Pos2>,
    overlay_rect: Option<Rect>,
) -> Option<Trigger> {
    if let Some(id) = view.activated {
        return Some(Trigger::Activate(id));
    }
    if escape {
        return Some(Trigger::Escape);
    }
    let pos = click?;
    let in_overlay = overlay_rect.is_some_and(|r| r.contains(pos));
    if in_overlay || view.hits_anchor(pos) {
        None
    } else {
        Some(Trigger::ClickOutside)
    }
}

/// Natural overlay width: fixed in the grid, near full width when docked
fn overlay_width(mode: RenderMode, config: &Config, params: &PlacementParams, screen_width: f32) -> f32 {
    let available = (screen_width - 2.0 * params.margin).max(0.0);
    match mode {
        RenderMode::Grid => config.overlay_width.min(available),
        RenderMode::List => available,
    }
}

/// Feed input to the overlay state machine, then draw the open overlay.
/// Returns the screen area the overlay covers this frame.
fn drive_overlay(
    ctx: &egui::Context,
    render: &mut RenderState,
    view: &ViewResult,
    overlay_rect: Option<Rect>,
    config: &Config,
    params: &PlacementParams,
) -> Option<Rect> {
    let (escape, click) = ctx.input(|i| {
        let click = if i.pointer.any_click() { i.pointer.interact_pos() } else { None };
        (i.key_pressed(egui::Key::Escape), click)
    });

    if let Some(trigger) = pointer_trigger(view, escape, click, overlay_rect) {
        match render.handle(trigger) {
            Effect::Closed { restore_focus: Some(id) } => {
                if let Some(anchor) = view.anchor(id) {
                    ctx.memory_mut(|m| m.request_focus(anchor.widget));
                }
            }
            Effect::None => {}
            _ => ctx.request_repaint(),
        }
    }

    let active = render.active()?;
    let projection = render.projection()?;
    let session = projection.session(active)?;
    let anchor = view.anchor(active)?;

    let viewport = ctx.screen_rect();
    let width = overlay_width(projection.mode, config, params, viewport.width());
    let content = OverlayContent::layout(ctx, session, width);
    let placement = layout::place(projection.mode, anchor.rect, content.natural_size(width), viewport, params);

    Some(views::render_overlay(ctx, &content, &placement))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::SessionId;
    use egui::{pos2, vec2};
    use views::Anchor;

    fn view(activated: Option<SessionId>) -> ViewResult {
        ViewResult {
            anchors: vec![Anchor {
                session: SessionId(1),
                rect: Rect::from_min_size(pos2(100.0, 100.0), vec2(150.0, 60.0)),
                widget: egui::Id::new("session-1"),
            }],
            activated,
        }
    }

    fn overlay() -> Option<Rect> {
        Some(Rect::from_min_size(pos2(100.0, 170.0), vec2(300.0, 200.0)))
    }

    #[test]
    fn activation_beats_dismissal() {
        let trigger = pointer_trigger(&view(Some(SessionId(1))), true, Some(pos2(120.0, 120.0)), overlay());
        assert_eq!(trigger, Some(Trigger::Activate(SessionId(1))));
    }

    #[test]
    fn escape_without_activation() {
        assert_eq!(pointer_trigger(&view(None), true, None, None), Some(Trigger::Escape));
    }

    #[test]
    fn clicks_inside_overlay_or_on_sessions_are_not_outside() {
        assert_eq!(pointer_trigger(&view(None), false, Some(pos2(200.0, 250.0)), overlay()), None);
        assert_eq!(pointer_trigger(&view(None), false, Some(pos2(120.0, 120.0)), overlay()), None);
    }

    #[test]
    fn click_on_empty_space_is_outside() {
        assert_eq!(
            pointer_trigger(&view(None), false, Some(pos2(600.0, 50.0)), overlay()),
            Some(Trigger::ClickOutside)
        );
        assert_eq!(pointer_trigger(&view(None), false, None, overlay()), None);
    }

    #[test]
    fn overlay_width_per_mode() {
        let config = Config::default();
        let params = config.placement_params();
        assert_eq!(overlay_width(RenderMode::Grid, &config, &params, 1200.0), 340.0);
        assert_eq!(overlay_width(RenderMode::Grid, &config, &params, 300.0), 276.0);
        assert_eq!(overlay_width(RenderMode::List, &config, &params, 500.0), 476.0);
        assert_eq!(overlay_width(RenderMode::List, &config, &params, 10.0), 0.0);
    }

    #[test]
    fn skipped_message_counts_sessions() {
        assert_eq!(skipped_message(2), "2 session(s) could not be placed");
    }
}
