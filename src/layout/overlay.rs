//! Positioning of the session detail overlay
//!
//! All coordinates are in the same space as the viewport rectangle. The
//! returned rectangle always lies inside the viewport; when the overlay's
//! natural height doesn't fit, its height is capped and the content scrolls.

use egui::{pos2, vec2, Rect, Vec2};

use super::view::RenderMode;

/// Smallest height worth showing when the anchor leaves no room on either side
const MIN_VISIBLE_HEIGHT: f32 = 40.0;
/// Keeps the indicator clear of the overlay's rounded corners
const INDICATOR_INSET: f32 = 16.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacementParams {
    /// Horizontal inset from the viewport edges
    pub margin: f32,
    /// Distance between anchor and overlay
    pub gap: f32,
    /// Height limit of the docked overlay as a fraction of viewport height
    pub docked_height_fraction: f32,
}

impl Default for PlacementParams {
    fn default() -> Self {
        Self {
            margin: 12.0,
            gap: 10.0,
            docked_height_fraction: 0.6,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Below,
    Above,
    /// Pinned to the bottom of the viewport, not attached to the anchor
    Docked,
}

/// Arrow drawn on the overlay edge facing the anchor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Indicator {
    PointsUp,
    PointsDown,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayPlacement {
    pub rect: Rect,
    pub side: Side,
    /// Set when the natural height had to be cut down
    pub max_height: Option<f32>,
    pub indicator: Option<Indicator>,
    /// Horizontal position of the indicator tip
    pub indicator_x: Option<f32>,
}

pub fn place(mode: RenderMode, anchor: Rect, natural: Vec2, viewport: Rect, params: &PlacementParams) -> OverlayPlacement {
    match mode {
        RenderMode::Grid => place_anchored(anchor, natural, viewport, params),
        RenderMode::List => place_docked(natural, viewport, params),
    }
}

/// Center the overlay under (or over) the anchor, flipping and shrinking as space requires
pub fn place_anchored(anchor: Rect, natural: Vec2, viewport: Rect, params: &PlacementParams) -> OverlayPlacement {
    let natural = natural.max(Vec2::ZERO);
    let (width, margin) = fit_width(natural.x, viewport, params.margin);
    let left = (anchor.center().x - width / 2.0)
        .max(viewport.min.x + margin)
        .min(viewport.max.x - margin - width);

    let room_below = (viewport.max.y - anchor.max.y - params.gap).clamp(0.0, viewport.height());
    let room_above = (anchor.min.y - viewport.min.y - params.gap).clamp(0.0, viewport.height());

    let side = if natural.y <= room_below || room_above <= room_below {
        Side::Below
    } else {
        Side::Above
    };
    let room = match side {
        Side::Above => room_above,
        _ => room_below,
    };

    // The height stays within the chosen side's room. Only when the anchor
    // leaves less than MIN_VISIBLE_HEIGHT on both sides does the overlay
    // keep that minimum and get pushed over the anchor.
    let height = if room >= MIN_VISIBLE_HEIGHT {
        natural.y.min(room)
    } else {
        natural.y.min(MIN_VISIBLE_HEIGHT).min(viewport.height())
    };
    let top = match side {
        Side::Above => anchor.min.y - params.gap - height,
        _ => anchor.max.y + params.gap,
    };
    let top = top.max(viewport.min.y).min(viewport.max.y - height);

    let indicator = match side {
        Side::Above => Indicator::PointsDown,
        _ => Indicator::PointsUp,
    };
    let inset = INDICATOR_INSET.min(width / 2.0);
    let indicator_x = anchor.center().x.max(left + inset).min(left + width - inset);

    OverlayPlacement {
        rect: Rect::from_min_size(pos2(left, top), vec2(width, height)),
        side,
        max_height: (height < natural.y).then_some(height),
        indicator: Some(indicator),
        indicator_x: Some(indicator_x),
    }
}

/// Full-width sheet along the bottom of the viewport
pub fn place_docked(natural: Vec2, viewport: Rect, params: &PlacementParams) -> OverlayPlacement {
    let natural = natural.max(Vec2::ZERO);
    let (width, margin) = fit_width(viewport.width(), viewport, params.margin);
    let limit = (viewport.height() * params.docked_height_fraction.clamp(0.1, 1.0))
        .min(viewport.height() - margin)
        .max(0.0);
    let height = natural.y.min(limit.max(MIN_VISIBLE_HEIGHT)).min(viewport.height());
    let top = (viewport.max.y - margin - height).max(viewport.min.y);

    OverlayPlacement {
        rect: Rect::from_min_size(pos2(viewport.min.x + margin, top), vec2(width, height)),
        side: Side::Docked,
        max_height: (height < natural.y).then_some(height),
        indicator: None,
        indicator_x: None,
    }
}

/// Width the overlay can have inside the viewport and the margin actually applied.
/// Viewports narrower than two margins get no margin at all.
fn fit_width(wanted: f32, viewport: Rect, margin: f32) -> (f32, f32) {
    let margin = margin.max(0.0);
    let available = viewport.width() - 2.0 * margin;
    if available <= 0.0 {
        (wanted.min(viewport.width()).max(0.0), 0.0)
    } else {
        (wanted.min(available), margin)
    }
}
