//! Visible world window and the held-key pan/zoom controls that move it.

use crate::config::*;
use crate::input::Control;
use crate::types::Point;

/// Window size in screen pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenSize {
    pub width: f64,
    pub height: f64,
}

impl ScreenSize {
    pub const fn new(width: f64, height: f64) -> Self {
        ScreenSize { width, height }
    }
}

impl Default for ScreenSize {
    fn default() -> Self {
        ScreenSize::new(WINDOW_WIDTH as f64, WINDOW_HEIGHT as f64)
    }
}

/// Pan and zoom flags. Set on key press, cleared on release, applied every tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CameraControls {
    pub pan_left: bool,
    pub pan_right: bool,
    pub pan_up: bool,
    pub pan_down: bool,
    pub zoom_in: bool,
    pub zoom_out: bool,
}

impl CameraControls {
    /// Record a camera key transition. Returns false for non-camera controls.
    pub fn set(&mut self, control: Control, held: bool) -> bool {
        let flag = match control {
            Control::PanLeft => &mut self.pan_left,
            Control::PanRight => &mut self.pan_right,
            Control::PanUp => &mut self.pan_up,
            Control::PanDown => &mut self.pan_down,
            Control::ZoomIn => &mut self.zoom_in,
            Control::ZoomOut => &mut self.zoom_out,
            Control::Quit => return false,
        };
        *flag = held;
        true
    }

    pub fn any(&self) -> bool {
        self.pan_left || self.pan_right || self.pan_up || self.pan_down || self.zoom_in || self.zoom_out
    }
}

// The visible rectangle of the world
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Viewport {
            left: WORLD_LEFT,
            right: WORLD_RIGHT,
            top: WORLD_TOP,
            bottom: WORLD_BOTTOM,
        }
    }
}

impl Viewport {
    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    /// Apply one tick of every held control. Returns whether the view moved.
    pub fn apply(&mut self, controls: &CameraControls) -> bool {
        let before = *self;
        if controls.pan_left && self.left >= WORLD_LEFT + PAN_STEP {
            self.left -= PAN_STEP;
            self.right -= PAN_STEP;
        }
        if controls.pan_right && self.right <= WORLD_RIGHT - PAN_STEP {
            self.left += PAN_STEP;
            self.right += PAN_STEP;
        }
        if controls.pan_up && self.top >= WORLD_TOP + PAN_STEP {
            self.top -= PAN_STEP;
            self.bottom -= PAN_STEP;
        }
        if controls.pan_down && self.bottom <= WORLD_BOTTOM - PAN_STEP {
            self.top += PAN_STEP;
            self.bottom += PAN_STEP;
        }
        if controls.zoom_in {
            self.zoom_in();
        }
        if controls.zoom_out {
            self.zoom_out();
        }
        *self != before
    }

    /// Shrink all bounds toward the world origin, stopping at `MIN_VIEW_WIDTH`.
    pub fn zoom_in(&mut self) {
        let width = self.width();
        if width <= MIN_VIEW_WIDTH {
            return;
        }
        let factor = (width / MIN_VIEW_WIDTH).min(ZOOM_FACTOR);
        self.left /= factor;
        self.right /= factor;
        self.top /= factor;
        self.bottom /= factor;
    }

    /// Grow each bound away from the world origin unless it would leave the world.
    pub fn zoom_out(&mut self) {
        if self.width() >= MAX_VIEW_WIDTH {
            return;
        }
        if self.left >= WORLD_LEFT / ZOOM_FACTOR {
            self.left *= ZOOM_FACTOR;
        }
        if self.right <= WORLD_RIGHT / ZOOM_FACTOR {
            self.right *= ZOOM_FACTOR;
        }
        if self.top >= WORLD_TOP / ZOOM_FACTOR {
            self.top *= ZOOM_FACTOR;
        }
        if self.bottom <= WORLD_BOTTOM / ZOOM_FACTOR {
            self.bottom *= ZOOM_FACTOR;
        }
    }

    /// Linear map from window pixels to world coordinates.
    pub fn screen_to_world(&self, screen: Point, size: ScreenSize) -> Point {
        Point {
            x: self.left + self.width() / size.width * screen.x,
            y: self.top + self.height() / size.height * screen.y,
        }
    }
}
