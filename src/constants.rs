//! Shared crate-wide constants.
//!
//! All lengths are logical pixels. The host maps terminal cells onto this
//! coordinate space through [`crate::viewport::CellMetrics`].

/// Height reserved at the bottom of the screen for the navigation dock.
pub const NAV_HEIGHT: f64 = 80.0;

/// Viewports narrower than this use the stacked mobile placement.
pub const NARROW_BREAKPOINT: f64 = 768.0;

/// Gap kept between a default-placed window and the screen edges.
pub const SCREEN_MARGIN: f64 = 20.0;

/// Horizontal room left free around a window on narrow viewports.
pub const NARROW_SIDE_PADDING: f64 = 40.0;

/// Downward shift applied to every default placement.
pub const VERTICAL_OFFSET: f64 = 120.0;

/// Vertical step between consecutive windows on narrow viewports.
pub const NARROW_STACK_STEP: f64 = 80.0;

/// Size of a window while it sits in the minimized strip.
pub const MINIMIZED_WIDTH: f64 = 200.0;
pub const MINIMIZED_HEIGHT: f64 = 60.0;

/// Spacing around and between minimized windows.
pub const MINIMIZED_MARGIN: f64 = 10.0;

/// Extra offset above the first minimized slot.
pub const MINIMIZED_TOP_OFFSET: f64 = 60.0;

/// Smallest size a resize gesture may produce.
pub const MIN_WINDOW_WIDTH: f64 = 300.0;
pub const MIN_WINDOW_HEIGHT: f64 = 200.0;

/// Center distance under which the "release to expand" hint is shown while a
/// minimized window is dragged.
///
/// The hint is advisory only. Restoring requires the tighter
/// [`RESTORE_COMMIT_RADIUS`] at release time.
pub const RESTORE_HINT_RADIUS: f64 = 800.0;

/// Center distance under which releasing a minimized window restores it.
pub const RESTORE_COMMIT_RADIUS: f64 = 400.0;

/// Factor applied to the manifest size when a window is restored from the
/// dock by a drag gesture.
pub const RESTORE_SCALE: f64 = 1.5;
