//! Viewport transform: world (diagram) ↔ screen (device) coordinates.
//!
//! `screen = world * scale + offset`. Pan mutates the offset, zoom mutates
//! the scale; both keep the transform invertible by clamping scale to a
//! positive range. No other state — the paint pass and hit testing read
//! the same two scalars before every use.

use kurbo::{Point, Size, Vec2};
use wv_core::Bounds;

/// Zoom bounds. Matching limits are common across the pack's viewers.
pub const MIN_ZOOM: f64 = 0.1;
pub const MAX_ZOOM: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Pan offset in screen pixels.
    pub offset: Vec2,
    /// Zoom factor (1.0 = 100%). Always within `[MIN_ZOOM, MAX_ZOOM]`.
    scale: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            offset: Vec2::ZERO,
            scale: 1.0,
        }
    }
}

impl Viewport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Set the zoom factor, clamped so the transform stays invertible.
    pub fn set_scale(&mut self, scale: f64) {
        self.scale = scale.clamp(MIN_ZOOM, MAX_ZOOM);
    }

    /// Map a screen point into world coordinates.
    pub fn screen_to_world(&self, p: Point) -> Point {
        Point::new(
            (p.x - self.offset.x) / self.scale,
            (p.y - self.offset.y) / self.scale,
        )
    }

    /// Map a world point onto the screen.
    pub fn world_to_screen(&self, p: Point) -> Point {
        Point::new(
            p.x * self.scale + self.offset.x,
            p.y * self.scale + self.offset.y,
        )
    }

    /// Shift the view by a screen-space delta.
    pub fn pan_by(&mut self, delta: Vec2) {
        self.offset += delta;
    }

    /// Multiply the zoom by `factor`, keeping the world point under
    /// `anchor` (a screen position, typically the cursor) fixed.
    pub fn zoom_by(&mut self, factor: f64, anchor: Point) {
        let world_anchor = self.screen_to_world(anchor);
        self.set_scale(self.scale * factor);
        // Re-derive the offset so world_anchor maps back to anchor.
        self.offset = Vec2::new(
            anchor.x - world_anchor.x * self.scale,
            anchor.y - world_anchor.y * self.scale,
        );
    }

    /// Reset pan/zoom so `content` fills `screen` with a margin.
    pub fn zoom_to_fit(&mut self, content: Bounds, screen: Size, margin: f64) {
        if content.width <= 0.0 || content.height <= 0.0 {
            self.offset = Vec2::ZERO;
            self.scale = 1.0;
            return;
        }
        let avail_w = (screen.width - 2.0 * margin).max(1.0);
        let avail_h = (screen.height - 2.0 * margin).max(1.0);
        let fit = (avail_w / content.width as f64).min(avail_h / content.height as f64);
        self.set_scale(fit);

        let center = content.center();
        self.center_on(Point::new(center.x as f64, center.y as f64), screen);
    }

    /// Pan so the given world point sits at the middle of the screen.
    pub fn center_on(&mut self, world: Point, screen: Size) {
        self.offset = Vec2::new(
            screen.width / 2.0 - world.x * self.scale,
            screen.height / 2.0 - world.y * self.scale,
        );
    }
}
