//! The authoritative window collection.
//!
//! A [`Registry`] is an immutable snapshot: every operation borrows the
//! current snapshot and returns the next one, so a consumer holding a
//! snapshot never observes a half-applied change. The host replaces its
//! snapshot wholesale after each successful operation.

use crate::constants::RESTORE_SCALE;
use crate::error::{WmError, WmResult};
use crate::geometry::{
    MIN_WINDOW_SIZE, MINIMIZED_SIZE, PixelRect, Point, ScreenSize, Size, clamp_origin, fit_size,
    initial_position, minimized_position,
};

use super::{Manifest, WindowId};

/// Whether windows are shown at their normal geometry or parked in the
/// minimized strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DockMode {
    #[default]
    Expanded,
    Minimized,
}

impl DockMode {
    pub fn toggled(self) -> Self {
        match self {
            Self::Expanded => Self::Minimized,
            Self::Minimized => Self::Expanded,
        }
    }

    pub fn is_minimized(self) -> bool {
        self == Self::Minimized
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WindowRecord {
    id: WindowId,
    title: String,
    visible: bool,
    minimized: bool,
    z_index: u32,
    size: Size,
    default_size: Size,
    origin: Option<Point>,
    dock_slot: Option<usize>,
}

impl WindowRecord {
    pub fn id(&self) -> WindowId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn visible(&self) -> bool {
        self.visible
    }

    pub fn is_minimized(&self) -> bool {
        self.minimized
    }

    pub fn z_index(&self) -> u32 {
        self.z_index
    }

    pub fn size(&self) -> Size {
        self.size
    }

    /// Size from the manifest, before any resize or restore.
    pub fn default_size(&self) -> Size {
        self.default_size
    }

    /// Top-left set by a committed drag, if any.
    pub fn origin(&self) -> Option<Point> {
        self.origin
    }

    pub fn dock_slot(&self) -> Option<usize> {
        self.dock_slot
    }

    /// Where the window is drawn for `screen`.
    ///
    /// Minimized windows sit in their dock slot unless they were dragged
    /// elsewhere; normal windows use the default placement unless dragged.
    pub fn placement(&self, screen: ScreenSize) -> PixelRect {
        match (self.minimized, self.origin) {
            (true, None) => minimized_position(self.dock_slot.unwrap_or(0)),
            (true, Some(origin)) => PixelRect::from_parts(
                clamp_origin(origin, MINIMIZED_SIZE, screen),
                MINIMIZED_SIZE,
            ),
            (false, None) => initial_position(self.id, self.size, screen),
            (false, Some(origin)) => {
                let size = fit_size(self.size, MIN_WINDOW_SIZE, screen);
                PixelRect::from_parts(clamp_origin(origin, size, screen), size)
            }
        }
    }
}

/// Partial geometry update committed at the end of a gesture.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GeometryPatch {
    pub origin: Option<Point>,
    pub size: Option<Size>,
}

impl GeometryPatch {
    pub fn moved(origin: Point) -> Self {
        Self {
            origin: Some(origin),
            size: None,
        }
    }

    pub fn resized(origin: Point, size: Size) -> Self {
        Self {
            origin: Some(origin),
            size: Some(size),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Registry {
    windows: Vec<WindowRecord>,
    max_z: u32,
    dock_mode: DockMode,
}

impl Registry {
    pub fn from_manifest(manifest: &Manifest) -> Self {
        let windows: Vec<WindowRecord> = manifest
            .specs()
            .iter()
            .map(|spec| {
                let size = Size::new(
                    spec.size.width.max(MIN_WINDOW_SIZE.width),
                    spec.size.height.max(MIN_WINDOW_SIZE.height),
                );
                WindowRecord {
                    id: spec.id,
                    title: spec.title.clone(),
                    visible: spec.visible,
                    minimized: false,
                    z_index: spec.z_index,
                    size,
                    default_size: spec.size,
                    origin: None,
                    dock_slot: None,
                }
            })
            .collect();
        let max_z = windows.iter().map(|w| w.z_index).max().unwrap_or(0);
        Self {
            windows,
            max_z,
            dock_mode: DockMode::Expanded,
        }
    }

    /// Records in manifest order.
    pub fn records(&self) -> &[WindowRecord] {
        &self.windows
    }

    pub fn get(&self, id: WindowId) -> Option<&WindowRecord> {
        self.windows.iter().find(|w| w.id == id)
    }

    pub fn max_z(&self) -> u32 {
        self.max_z
    }

    pub fn dock_mode(&self) -> DockMode {
        self.dock_mode
    }

    /// Visible windows, bottom-most first.
    pub fn draw_order(&self) -> Vec<WindowId> {
        let mut visible: Vec<&WindowRecord> = self.windows.iter().filter(|w| w.visible).collect();
        visible.sort_by_key(|w| w.z_index);
        visible.into_iter().map(|w| w.id).collect()
    }

    pub fn topmost(&self) -> Option<WindowId> {
        self.windows
            .iter()
            .filter(|w| w.visible)
            .max_by_key(|w| w.z_index)
            .map(|w| w.id)
    }

    pub fn placement(&self, id: WindowId, screen: ScreenSize) -> Option<PixelRect> {
        self.get(id).map(|record| record.placement(screen))
    }

    /// Shows a hidden window on top, or hides a visible one.
    ///
    /// Minimized state is left alone: a window shown while the dock mode is
    /// active appears in the minimized strip.
    pub fn toggle_visibility(&self, id: WindowId) -> WmResult<Self> {
        let idx = self.index_of(id)?;
        let mut next = self.clone();
        if next.windows[idx].visible {
            let record = &mut next.windows[idx];
            record.visible = false;
            record.dock_slot = None;
        } else {
            next.windows[idx].visible = true;
            next.raise(idx);
            if next.windows[idx].minimized && next.windows[idx].dock_slot.is_none() {
                next.windows[idx].dock_slot = Some(next.next_free_slot());
            }
        }
        Ok(next)
    }

    /// Closes a window.
    ///
    /// While the dock mode is active an unminimized window is sent back to
    /// the minimized strip instead of being hidden.
    pub fn close(&self, id: WindowId) -> WmResult<Self> {
        let idx = self.index_of(id)?;
        let mut next = self.clone();
        if self.dock_mode.is_minimized() && !self.windows[idx].minimized {
            let slot = next.next_free_slot();
            let record = &mut next.windows[idx];
            record.minimized = true;
            record.origin = None;
            record.dock_slot = Some(slot);
        } else {
            let record = &mut next.windows[idx];
            record.visible = false;
            record.dock_slot = None;
        }
        Ok(next)
    }

    /// Raises the window above every other one.
    pub fn focus(&self, id: WindowId) -> WmResult<Self> {
        let idx = self.index_of(id)?;
        let mut next = self.clone();
        next.raise(idx);
        Ok(next)
    }

    /// Flips the dock mode and applies it to every window at once.
    ///
    /// Visible windows receive dock slots in manifest order. Dragged
    /// positions are dropped because they belong to the previous mode.
    pub fn toggle_minimize_all(&self) -> Self {
        let mut next = self.clone();
        next.dock_mode = self.dock_mode.toggled();
        let minimized = next.dock_mode.is_minimized();
        let mut slot = 0;
        for record in &mut next.windows {
            record.minimized = minimized;
            record.origin = None;
            record.dock_slot = if minimized && record.visible {
                slot += 1;
                Some(slot - 1)
            } else {
                None
            };
        }
        next
    }

    /// Commits a gesture's geometry, re-clamped against `screen`.
    pub fn resize_or_move(
        &self,
        id: WindowId,
        patch: GeometryPatch,
        screen: ScreenSize,
    ) -> WmResult<Self> {
        let idx = self.index_of(id)?;
        let mut next = self.clone();
        let record = &mut next.windows[idx];
        if let Some(size) = patch.size {
            record.size = fit_size(size, MIN_WINDOW_SIZE, screen);
        }
        if let Some(origin) = patch.origin {
            let extent = record.placement(screen).size();
            record.origin = Some(clamp_origin(origin, extent, screen));
        }
        Ok(next)
    }

    /// Brings a minimized window back at 1.5x its manifest size.
    pub fn restore_from_dock(&self, id: WindowId, screen: ScreenSize) -> WmResult<Self> {
        let idx = self.index_of(id)?;
        let mut next = self.clone();
        let record = &mut next.windows[idx];
        record.minimized = false;
        record.size = fit_size(
            record.default_size.scale(RESTORE_SCALE),
            MIN_WINDOW_SIZE,
            screen,
        );
        record.origin = None;
        record.dock_slot = None;
        Ok(next)
    }

    /// Re-clamps every window after the viewport changed.
    pub fn fit_to_screen(&self, screen: ScreenSize) -> Self {
        let mut next = self.clone();
        for record in &mut next.windows {
            record.size = fit_size(record.size, MIN_WINDOW_SIZE, screen);
            if let Some(origin) = record.origin {
                let extent = record.placement(screen).size();
                record.origin = Some(clamp_origin(origin, extent, screen));
            }
        }
        next
    }

    fn index_of(&self, id: WindowId) -> WmResult<usize> {
        self.windows
            .iter()
            .position(|w| w.id == id)
            .ok_or(WmError::UnknownWindow(id))
    }

    fn raise(&mut self, idx: usize) {
        self.max_z = self.max_z.saturating_add(1);
        self.windows[idx].z_index = self.max_z;
    }

    fn next_free_slot(&self) -> usize {
        let taken: Vec<usize> = self
            .windows
            .iter()
            .filter(|w| w.visible && w.minimized)
            .filter_map(|w| w.dock_slot)
            .collect();
        (0..).find(|slot| !taken.contains(slot)).unwrap_or(0)
    }
}
