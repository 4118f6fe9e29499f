//! Pointer gestures on windows: title-bar drags and corner resizes.
//!
//! The controller owns the only live gesture in the system. Registry
//! snapshots are only produced on press (focus) and release (commit), so
//! intermediate pointer moves never touch the registry.

use std::mem;

use crate::constants::{RESTORE_COMMIT_RADIUS, RESTORE_HINT_RADIUS};
use crate::error::{WmError, WmResult};
use crate::geometry::{
    MIN_WINDOW_SIZE, PixelRect, Point, ScreenSize, Size, clamp_origin, clamp_size, distance,
    expand_hint_rect,
};

use super::{GeometryPatch, Registry, WindowId};

/// Outline previewing where a minimized window would land if released.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExpandHint {
    pub id: WindowId,
    pub rect: PixelRect,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragState {
    pub id: WindowId,
    /// Pointer position relative to the window's top-left at press time.
    pub offset: Point,
    pub live: PixelRect,
    pub hint: Option<ExpandHint>,
    minimized: bool,
    default_size: Size,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResizeState {
    pub id: WindowId,
    pub pointer_start: Point,
    pub start_size: Size,
    pub origin: Point,
    pub live: Size,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Interaction {
    #[default]
    Idle,
    Dragging(DragState),
    Resizing(ResizeState),
}

impl Interaction {
    /// Window the gesture is acting on.
    pub fn window(&self) -> Option<WindowId> {
        match self {
            Self::Idle => None,
            Self::Dragging(drag) => Some(drag.id),
            Self::Resizing(resize) => Some(resize.id),
        }
    }
}

#[derive(Debug, Default)]
pub struct InteractionController {
    state: Interaction,
}

impl InteractionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &Interaction {
        &self.state
    }

    pub fn is_active(&self) -> bool {
        !matches!(self.state, Interaction::Idle)
    }

    /// Window under gesture and its in-flight rectangle.
    pub fn live_rect(&self) -> Option<(WindowId, PixelRect)> {
        match &self.state {
            Interaction::Idle => None,
            Interaction::Dragging(drag) => Some((drag.id, drag.live)),
            Interaction::Resizing(resize) => Some((
                resize.id,
                PixelRect::from_parts(resize.origin, resize.live),
            )),
        }
    }

    pub fn hint(&self) -> Option<ExpandHint> {
        match &self.state {
            Interaction::Dragging(drag) => drag.hint,
            _ => None,
        }
    }

    /// Press on a title bar. Focuses the window and starts tracking.
    pub fn begin_drag(
        &mut self,
        registry: &Registry,
        id: WindowId,
        pointer: Point,
        screen: ScreenSize,
    ) -> WmResult<Registry> {
        self.cancel_stale();
        let record = registry.get(id).ok_or(WmError::UnknownWindow(id))?;
        if !record.visible() {
            return Err(WmError::WindowHidden(id));
        }
        let live = record.placement(screen);
        let focused = registry.focus(id)?;
        tracing::debug!(window_id = ?id, x = pointer.x, y = pointer.y, "drag started");
        self.state = Interaction::Dragging(DragState {
            id,
            offset: Point::new(pointer.x - live.x, pointer.y - live.y),
            live,
            hint: None,
            minimized: record.is_minimized() && registry.dock_mode().is_minimized(),
            default_size: record.default_size(),
        });
        Ok(focused)
    }

    /// Press on the resize grip. Minimized windows only get focused.
    pub fn begin_resize(
        &mut self,
        registry: &Registry,
        id: WindowId,
        pointer: Point,
        screen: ScreenSize,
    ) -> WmResult<Registry> {
        self.cancel_stale();
        let record = registry.get(id).ok_or(WmError::UnknownWindow(id))?;
        if !record.visible() {
            return Err(WmError::WindowHidden(id));
        }
        let focused = registry.focus(id)?;
        if record.is_minimized() {
            return Ok(focused);
        }
        let rect = record.placement(screen);
        tracing::debug!(
            window_id = ?id,
            width = rect.width,
            height = rect.height,
            "resize started"
        );
        self.state = Interaction::Resizing(ResizeState {
            id,
            pointer_start: pointer,
            start_size: rect.size(),
            origin: rect.origin(),
            live: rect.size(),
        });
        Ok(focused)
    }

    pub fn pointer_move(&mut self, pointer: Point, screen: ScreenSize) {
        match &mut self.state {
            Interaction::Idle => {}
            Interaction::Dragging(drag) => {
                let wanted = Point::new(pointer.x - drag.offset.x, pointer.y - drag.offset.y);
                let origin = clamp_origin(wanted, drag.live.size(), screen);
                drag.live = PixelRect::from_parts(origin, drag.live.size());
                drag.hint = if drag.minimized
                    && distance(drag.live.center(), screen.center()) < RESTORE_HINT_RADIUS
                {
                    Some(ExpandHint {
                        id: drag.id,
                        rect: expand_hint_rect(drag.default_size, screen),
                    })
                } else {
                    None
                };
            }
            Interaction::Resizing(resize) => {
                let wanted = Size::new(
                    resize.start_size.width + pointer.x - resize.pointer_start.x,
                    resize.start_size.height + pointer.y - resize.pointer_start.y,
                );
                resize.live = clamp_size(wanted, resize.origin, MIN_WINDOW_SIZE, screen);
            }
        }
    }

    /// Ends the gesture at `pointer` and returns the committed snapshot.
    ///
    /// A minimized window released close enough to the viewport center while
    /// the hint is showing is restored from the dock.
    pub fn release(
        &mut self,
        registry: &Registry,
        pointer: Point,
        screen: ScreenSize,
    ) -> WmResult<Registry> {
        let hint_before = self.hint();
        self.pointer_move(pointer, screen);
        let state = mem::replace(&mut self.state, Interaction::Idle);
        if let Some(id) = state.window() {
            let record = registry.get(id).ok_or(WmError::UnknownWindow(id))?;
            if !record.visible() {
                tracing::debug!(window_id = ?id, "gesture target hidden; nothing committed");
                return Err(WmError::WindowHidden(id));
            }
        }
        match state {
            Interaction::Idle => Ok(registry.clone()),
            Interaction::Dragging(drag) => {
                let moved = registry.resize_or_move(
                    drag.id,
                    GeometryPatch::moved(drag.live.origin()),
                    screen,
                )?;
                let showing = hint_before.is_some() || drag.hint.is_some();
                let gap = distance(drag.live.center(), screen.center());
                if registry.dock_mode().is_minimized() && showing && gap < RESTORE_COMMIT_RADIUS {
                    tracing::debug!(window_id = ?drag.id, gap, "restored from dock");
                    moved.restore_from_dock(drag.id, screen)
                } else {
                    tracing::debug!(
                        window_id = ?drag.id,
                        x = drag.live.x,
                        y = drag.live.y,
                        "drag committed"
                    );
                    Ok(moved)
                }
            }
            Interaction::Resizing(resize) => {
                tracing::debug!(
                    window_id = ?resize.id,
                    width = resize.live.width,
                    height = resize.live.height,
                    "resize committed"
                );
                registry.resize_or_move(
                    resize.id,
                    GeometryPatch::resized(resize.origin, resize.live),
                    screen,
                )
            }
        }
    }

    /// Drops the live gesture without committing anything.
    pub fn cancel(&mut self) {
        if let Some((id, _)) = self.live_rect() {
            tracing::debug!(window_id = ?id, "gesture cancelled");
        }
        self.state = Interaction::Idle;
    }

    fn cancel_stale(&mut self) {
        if self.is_active() {
            tracing::warn!("press during a live gesture, dropping the stale one");
            self.cancel();
        }
    }
}
