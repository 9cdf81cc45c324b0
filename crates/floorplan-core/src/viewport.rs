//! Viewport module for pan/zoom transforms over the floor canvas.

use crate::table::Table;
use crate::venue::bounding_box;
use kurbo::{Affine, Point, Size, Vec2};
use serde::{Deserialize, Serialize};

/// Smallest allowed scale.
pub const MIN_SCALE: f64 = 0.5;
/// Largest allowed scale.
pub const MAX_SCALE: f64 = 3.0;

/// Viewport manages the view transform for the floor canvas.
///
/// The transform is a translation by `offset` (screen pixels) applied after a
/// uniform `scale`, so a canvas point `c` lands on screen at
/// `offset + c * scale`.
///
/// The fields are public for serialisation and inspection. Outside tests,
/// change them only through [`pan_by`](Self::pan_by),
/// [`zoom_by`](Self::zoom_by) and [`fit_to_tables`](Self::fit_to_tables),
/// which keep `scale` within `[min_scale, max_scale]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// Current translation offset (pan), in screen pixels.
    pub offset: Vec2,
    /// Current scale factor.
    pub scale: f64,
    /// Minimum allowed scale.
    pub min_scale: f64,
    /// Maximum allowed scale.
    pub max_scale: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            offset: Vec2::ZERO,
            scale: 1.0,
            min_scale: MIN_SCALE,
            max_scale: MAX_SCALE,
        }
    }
}

impl Viewport {
    /// Create a new viewport with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a viewport with custom scale bounds.
    ///
    /// Bounds can only narrow `[MIN_SCALE, MAX_SCALE]`. NaN or non-positive
    /// bounds fall back to the default limit, and bounds given backwards are
    /// reordered.
    pub fn with_scale_bounds(min_scale: f64, max_scale: f64) -> Self {
        let min_scale = sanitize_bound(min_scale, MIN_SCALE);
        let max_scale = sanitize_bound(max_scale, MAX_SCALE);
        let (min_scale, max_scale) = if min_scale <= max_scale {
            (min_scale, max_scale)
        } else {
            (max_scale, min_scale)
        };
        Self {
            scale: 1.0_f64.clamp(min_scale, max_scale),
            min_scale,
            max_scale,
            ..Self::default()
        }
    }

    /// Get the affine transform for rendering (canvas to screen).
    pub fn transform(&self) -> Affine {
        Affine::translate(self.offset) * Affine::scale(self.scale)
    }

    /// Get the inverse transform for input handling (screen to canvas).
    pub fn inverse_transform(&self) -> Affine {
        Affine::scale(1.0 / self.scale) * Affine::translate(-self.offset)
    }

    /// Convert a screen point to canvas coordinates.
    pub fn screen_to_canvas(&self, screen_point: Point) -> Point {
        self.inverse_transform() * screen_point
    }

    /// Convert a canvas point to screen coordinates.
    pub fn canvas_to_screen(&self, canvas_point: Point) -> Point {
        self.transform() * canvas_point
    }

    /// Convert a screen-space delta into a canvas-space delta.
    pub fn screen_delta_to_canvas(&self, delta: Vec2) -> Vec2 {
        delta / self.scale
    }

    /// Pan the viewport by a delta in screen coordinates.
    pub fn pan_by(&mut self, delta: Vec2) {
        self.offset += delta;
    }

    /// Multiply the scale by `factor`, clamped to the allowed range.
    ///
    /// With an anchor, the canvas point under `around` stays under it.
    /// Without one the offset is left alone.
    pub fn zoom_by(&mut self, factor: f64, around: Option<Point>) {
        if !factor.is_finite() || factor <= 0.0 {
            return;
        }
        let new_scale = (self.scale * factor).clamp(self.min_scale, self.max_scale);
        if (new_scale - self.scale).abs() < f64::EPSILON {
            return;
        }

        match around {
            Some(screen_point) => {
                let canvas_point = self.screen_to_canvas(screen_point);
                self.scale = new_scale;
                let new_screen = self.canvas_to_screen(canvas_point);
                self.offset += screen_point - new_screen;
            }
            None => self.scale = new_scale,
        }
    }

    /// Reset to identity: scale 1, no offset.
    pub fn reset(&mut self) {
        self.offset = Vec2::ZERO;
        self.scale = 1.0_f64.clamp(self.min_scale, self.max_scale);
    }

    /// Fit the viewport so every table's footprint is visible in `container`.
    ///
    /// The footprint bounding box is grown by `padding` on each side, scaled
    /// to the largest factor not above 1.0 that fits, and centred. An empty
    /// table list resets the viewport.
    pub fn fit_to_tables<'a, I>(&mut self, tables: I, container: Size, padding: f64)
    where
        I: IntoIterator<Item = &'a Table>,
    {
        let Some(bounds) = bounding_box(tables) else {
            self.reset();
            return;
        };

        let padded = bounds.inflate(padding.max(0.0), padding.max(0.0));
        let fit = if padded.width() > 0.0 && padded.height() > 0.0 {
            (container.width / padded.width()).min(container.height / padded.height())
        } else {
            1.0
        };
        self.scale = fit.min(1.0).clamp(self.min_scale, self.max_scale);

        let padded_center = padded.center();
        let container_center = Point::new(container.width / 2.0, container.height / 2.0);

        self.offset = Vec2::new(
            container_center.x - padded_center.x * self.scale,
            container_center.y - padded_center.y * self.scale,
        );
    }
}

/// Clamp a configured scale bound into the global range.
fn sanitize_bound(bound: f64, fallback: f64) -> f64 {
    if bound.is_finite() && bound > 0.0 {
        bound.clamp(MIN_SCALE, MAX_SCALE)
    } else {
        log::warn!("Ignoring invalid scale bound {bound}, using {fallback}");
        fallback
    }
}
