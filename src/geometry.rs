//! Geometry policy: where windows go by default and how far they may move.
//!
//! Everything here is a pure function of the window identity, its size and
//! the current [`ScreenSize`]. Coordinates are logical pixels with the origin
//! in the top-left corner of the viewport.

use crate::constants::{
    MIN_WINDOW_HEIGHT, MIN_WINDOW_WIDTH, MINIMIZED_HEIGHT, MINIMIZED_MARGIN, MINIMIZED_TOP_OFFSET,
    MINIMIZED_WIDTH, NARROW_BREAKPOINT, NARROW_SIDE_PADDING, NARROW_STACK_STEP, NAV_HEIGHT,
    SCREEN_MARGIN, VERTICAL_OFFSET,
};
use crate::window::WindowId;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn scale(self, factor: f64) -> Self {
        Self {
            width: self.width * factor,
            height: self.height * factor,
        }
    }
}

/// Floor applied to every committed window size.
pub const MIN_WINDOW_SIZE: Size = Size::new(MIN_WINDOW_WIDTH, MIN_WINDOW_HEIGHT);

/// Size of a window parked in the minimized strip.
pub const MINIMIZED_SIZE: Size = Size::new(MINIMIZED_WIDTH, MINIMIZED_HEIGHT);

/// Axis-aligned rectangle in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PixelRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl PixelRect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn from_parts(origin: Point, size: Size) -> Self {
        Self::new(origin.x, origin.y, size.width, size.height)
    }

    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }
}

/// Viewport size shared read-only by the policy and the gesture controller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenSize {
    pub width: f64,
    pub height: f64,
}

impl ScreenSize {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Height left for windows once the dock is reserved.
    pub fn available_height(&self) -> f64 {
        self.height - NAV_HEIGHT
    }

    pub fn center(&self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }

    pub fn is_narrow(&self) -> bool {
        self.width < NARROW_BREAKPOINT
    }
}

impl Default for ScreenSize {
    fn default() -> Self {
        Self::new(1200.0, 800.0)
    }
}

/// Default placement for a window in its normal (unminimized) state.
///
/// Narrow screens stack windows vertically, one step per id. Wider screens
/// use a hand-tuned anchor per id and clamp the result so the whole window
/// stays inside the margins above the dock. A window larger than that area
/// is shrunk to fit.
pub fn initial_position(id: WindowId, size: Size, screen: ScreenSize) -> PixelRect {
    let available_height = screen.available_height();

    if screen.is_narrow() {
        let width = size
            .width
            .min(screen.width - NARROW_SIDE_PADDING)
            .max(0.0);
        let step = f64::from(id.0.saturating_sub(1));
        let stacked = SCREEN_MARGIN + step * NARROW_STACK_STEP + VERTICAL_OFFSET;
        let y = stacked
            .min(available_height - size.height - SCREEN_MARGIN)
            .max(0.0);
        return PixelRect::new((screen.width - width) / 2.0, y, width, size.height);
    }

    let width = size
        .width
        .min(screen.width - 2.0 * SCREEN_MARGIN)
        .max(0.0);
    let height = size
        .height
        .min(available_height - 2.0 * SCREEN_MARGIN)
        .max(0.0);
    let anchor = anchor_for(id, screen);
    let x = (anchor.x - width / 2.0)
        .min(screen.width - width - SCREEN_MARGIN)
        .max(SCREEN_MARGIN);
    let y = (anchor.y - height / 2.0)
        .min(available_height - height - SCREEN_MARGIN)
        .max(SCREEN_MARGIN);
    PixelRect::new(x, y, width, height)
}

fn anchor_for(id: WindowId, screen: ScreenSize) -> Point {
    let w = screen.width;
    let available = screen.available_height();
    let m = SCREEN_MARGIN;
    match id.0 {
        1 => Point::new(w / 2.0, available / 2.0 + VERTICAL_OFFSET),
        2 => Point::new(m + 250.0, m + 175.0 + VERTICAL_OFFSET),
        3 => Point::new(w - m - 250.0, m + 175.0 + VERTICAL_OFFSET),
        4 => Point::new(m + 300.0, available - 310.0 - m + VERTICAL_OFFSET),
        5 => Point::new(w - m - 200.0, available - 230.0 - m + VERTICAL_OFFSET),
        _ => Point::default(),
    }
}

/// Placement of the window holding dock slot `slot` in the minimized strip.
pub fn minimized_position(slot: usize) -> PixelRect {
    let pitch = MINIMIZED_HEIGHT + MINIMIZED_MARGIN;
    PixelRect::from_parts(
        Point::new(
            MINIMIZED_MARGIN,
            NAV_HEIGHT + MINIMIZED_TOP_OFFSET + MINIMIZED_MARGIN + slot as f64 * pitch,
        ),
        MINIMIZED_SIZE,
    )
}

/// Keeps a dragged window inside the screen, above the dock.
///
/// When the window is larger than the area the low bound wins and the
/// window sticks to the top-left corner.
pub fn clamp_origin(origin: Point, size: Size, screen: ScreenSize) -> Point {
    let max_x = screen.width - size.width;
    let max_y = screen.available_height() - size.height;
    Point::new(origin.x.min(max_x).max(0.0), origin.y.min(max_y).max(0.0))
}

/// Size produced by a bottom-right resize anchored at `origin`.
///
/// The size is floored at `min` and then capped so the far edges stay on
/// screen and above the dock. The cap wins over the floor.
pub fn clamp_size(size: Size, origin: Point, min: Size, screen: ScreenSize) -> Size {
    let max_width = (screen.width - origin.x).max(0.0);
    let max_height = (screen.available_height() - origin.y).max(0.0);
    Size::new(
        size.width.max(min.width).min(max_width),
        size.height.max(min.height).min(max_height),
    )
}

/// Floors `size` at `min` and caps it at the area above the dock.
pub fn fit_size(size: Size, min: Size, screen: ScreenSize) -> Size {
    Size::new(
        size.width.max(min.width).min(screen.width.max(0.0)),
        size.height
            .max(min.height)
            .min(screen.available_height().max(0.0)),
    )
}

/// Outline shown while a minimized window is dragged toward the center.
pub fn expand_hint_rect(size: Size, screen: ScreenSize) -> PixelRect {
    let center = screen.center();
    PixelRect::new(
        center.x - size.width / 2.0,
        center.y - size.height / 2.0,
        size.width,
        size.height,
    )
}

pub fn distance(a: Point, b: Point) -> f64 {
    (a.x - b.x).hypot(a.y - b.y)
}
