//! The desktop: registry, gesture controller, dock and content composed
//! behind a single event/render surface.
//!
//! `Desktop` owns the current [`Registry`] snapshot and swaps it after every
//! successful operation. Failed operations are logged and the previous
//! snapshot stays in place.

use std::collections::BTreeMap;

use crossterm::event::{Event, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::Frame;
use ratatui::layout::{Position, Rect};
use ratatui::style::Style;
use ratatui::widgets::{Block, Paragraph};

use crate::content::{ContentSlots, LinkOpener, SectionBody, browser_opener};
use crate::dock::{self, DockHit};
use crate::error::WmResult;
use crate::geometry::{PixelRect, ScreenSize};
use crate::keybindings::{Action, KeyBindings};
use crate::theme;
use crate::ui::UiFrame;
use crate::viewport::Viewport;
use crate::window::decorator::{Chrome, FolioDecorator, WindowDecorator};
use crate::window::{InteractionController, Manifest, Registry, WindowId};

const WHEEL_STEP: usize = 3;

/// Result of feeding one event to the desktop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Ignored,
    Handled,
    Quit,
}

/// Part of a window under the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowHit {
    Close,
    TitleBar,
    ResizeGrip,
    /// Content cell, relative to the content area.
    Body { column: u16, row: u16 },
}

pub struct Desktop {
    manifest: Manifest,
    registry: Registry,
    controller: InteractionController,
    viewport: Viewport,
    decorator: Box<dyn WindowDecorator>,
    bodies: BTreeMap<WindowId, SectionBody>,
    scroll: BTreeMap<WindowId, usize>,
    keys: KeyBindings,
    dock_cursor: usize,
    opener: LinkOpener,
}

impl Desktop {
    pub fn new(manifest: Manifest, slots: &ContentSlots, viewport: Viewport) -> Self {
        let registry = Registry::from_manifest(&manifest).fit_to_screen(viewport.screen());
        let bodies = manifest.ids().map(|id| (id, slots.body(id))).collect();
        Self {
            manifest,
            registry,
            controller: InteractionController::new(),
            viewport,
            decorator: Box::new(FolioDecorator),
            bodies,
            scroll: BTreeMap::new(),
            keys: KeyBindings::standard(),
            dock_cursor: 0,
            opener: browser_opener(),
        }
    }

    /// The portfolio manifest with its bundled sections.
    pub fn portfolio(viewport: Viewport) -> Self {
        Self::new(Manifest::portfolio(), &ContentSlots::portfolio(), viewport)
    }

    pub fn with_opener(mut self, opener: LinkOpener) -> Self {
        self.opener = opener;
        self
    }

    pub fn with_keybindings(mut self, keys: KeyBindings) -> Self {
        self.keys = keys;
        self
    }

    pub fn with_decorator(mut self, decorator: Box<dyn WindowDecorator>) -> Self {
        self.decorator = decorator;
        self
    }

    /// Starts with every window parked in the minimized strip.
    pub fn start_minimized(mut self) -> Self {
        self.registry = self.registry.toggle_minimize_all();
        self
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn controller(&self) -> &InteractionController {
        &self.controller
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn screen(&self) -> ScreenSize {
        self.viewport.screen()
    }

    pub fn dock_cursor(&self) -> usize {
        self.dock_cursor
    }

    pub fn scroll_offset(&self, id: WindowId) -> usize {
        self.scroll.get(&id).copied().unwrap_or(0)
    }

    /// Where a window is drawn right now, including any live gesture.
    pub fn pixel_rect(&self, id: WindowId) -> Option<PixelRect> {
        match self.controller.live_rect() {
            Some((live_id, rect)) if live_id == id => Some(rect),
            _ => self.registry.placement(id, self.screen()),
        }
    }

    pub fn cell_rect(&self, id: WindowId) -> Option<Rect> {
        self.pixel_rect(id).map(|rect| self.viewport.to_cells(rect))
    }

    /// Topmost visible window covering the cell, and which part was hit.
    pub fn window_at(&self, column: u16, row: u16) -> Option<(WindowId, WindowHit)> {
        let pos = Position::new(column, row);
        let mut order = self.paint_order();
        order.reverse();
        order.into_iter().find_map(|id| {
            let rect = self.cell_rect(id)?;
            if !rect.contains(pos) {
                return None;
            }
            let chrome = self.chrome(id)?;
            let deco = self.decorator.as_ref();
            let hit = if deco.close_button(rect).contains(pos) {
                WindowHit::Close
            } else if deco
                .resize_grip(rect, &chrome)
                .is_some_and(|grip| grip.contains(pos))
            {
                WindowHit::ResizeGrip
            } else if deco.title_bar(rect).contains(pos) {
                WindowHit::TitleBar
            } else {
                let content = deco.content_area(rect);
                WindowHit::Body {
                    column: column.saturating_sub(content.x),
                    row: row.saturating_sub(content.y),
                }
            };
            Some((id, hit))
        })
    }

    pub fn handle_event(&mut self, event: &Event) -> Outcome {
        match event {
            Event::Key(key) => self.handle_key(key),
            Event::Mouse(mouse) => self.handle_mouse(mouse),
            Event::Resize(columns, rows) => {
                self.viewport.resize(*columns, *rows);
                self.registry = self.registry.fit_to_screen(self.screen());
                tracing::debug!(columns, rows, "viewport resized");
                Outcome::Handled
            }
            _ => Outcome::Ignored,
        }
    }

    pub fn handle_key(&mut self, key: &KeyEvent) -> Outcome {
        match self.keys.action_for_key(key) {
            Some(action) => self.apply_action(action),
            None => Outcome::Ignored,
        }
    }

    pub fn apply_action(&mut self, action: Action) -> Outcome {
        let count = self.manifest.len().max(1);
        match action {
            Action::Quit => return Outcome::Quit,
            Action::ToggleMinimizeAll => self.toggle_minimize_all(),
            Action::DockPrev => {
                self.dock_cursor = (self.dock_cursor + count - 1) % count;
            }
            Action::DockNext => {
                self.dock_cursor = (self.dock_cursor + 1) % count;
            }
            Action::DockActivate => {
                let Some(id) = self.dock_id(self.dock_cursor) else {
                    return Outcome::Ignored;
                };
                self.toggle_window(id);
            }
            Action::ToggleWindow(idx) => {
                let Some(id) = self.dock_id(usize::from(idx)) else {
                    return Outcome::Ignored;
                };
                self.dock_cursor = usize::from(idx);
                self.toggle_window(id);
            }
            Action::FocusNext => self.focus_next(),
            Action::CloseTopmost => {
                let Some(id) = self.registry.topmost() else {
                    return Outcome::Ignored;
                };
                self.drop_gesture_on(id);
                self.commit(self.registry.close(id));
            }
            Action::CancelGesture => {
                if !self.controller.is_active() {
                    return Outcome::Ignored;
                }
                self.controller.cancel();
            }
            Action::ScrollUp => return self.scroll_topmost(|_, off| off.saturating_sub(1)),
            Action::ScrollDown => return self.scroll_topmost(|_, off| off.saturating_add(1)),
            Action::ScrollPageUp => {
                return self.scroll_topmost(|page, off| off.saturating_sub(page));
            }
            Action::ScrollPageDown => {
                return self.scroll_topmost(|page, off| off.saturating_add(page));
            }
            Action::ScrollHome => return self.scroll_topmost(|_, _| 0),
            Action::ScrollEnd => return self.scroll_topmost(|_, _| usize::MAX),
        }
        Outcome::Handled
    }

    pub fn handle_mouse(&mut self, mouse: &MouseEvent) -> Outcome {
        let pointer = self.viewport.pointer(mouse.column, mouse.row);
        let screen = self.screen();
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => self.press(mouse.column, mouse.row),
            MouseEventKind::Drag(MouseButton::Left) | MouseEventKind::Moved => {
                if !self.controller.is_active() {
                    return Outcome::Ignored;
                }
                self.controller.pointer_move(pointer, screen);
                Outcome::Handled
            }
            MouseEventKind::Up(MouseButton::Left) => {
                if !self.controller.is_active() {
                    return Outcome::Ignored;
                }
                let result = self.controller.release(&self.registry, pointer, screen);
                self.commit(result);
                Outcome::Handled
            }
            MouseEventKind::ScrollUp | MouseEventKind::ScrollDown => {
                let Some((id, _)) = self.window_at(mouse.column, mouse.row) else {
                    return Outcome::Ignored;
                };
                let up = matches!(mouse.kind, MouseEventKind::ScrollUp);
                self.scroll_by(id, |_, off| {
                    if up {
                        off.saturating_sub(WHEEL_STEP)
                    } else {
                        off.saturating_add(WHEEL_STEP)
                    }
                })
            }
            _ => Outcome::Ignored,
        }
    }

    /// Drops any live gesture. Called before the terminal is restored.
    pub fn teardown(&mut self) {
        self.controller.cancel();
    }

    pub fn render(&self, frame: &mut Frame<'_>) {
        let mut ui = UiFrame::new(frame);
        self.render_into(&mut ui);
    }

    pub fn render_into(&self, ui: &mut UiFrame<'_>) {
        let area = ui.area();
        ui.render_widget(
            Block::default().style(Style::default().bg(theme::desktop_bg())),
            area,
        );

        let dragged = self.controller.live_rect().map(|(id, _)| id);
        for id in self.paint_order() {
            if Some(id) == dragged {
                continue;
            }
            self.render_window(ui, id);
        }
        if let Some(hint) = self.controller.hint() {
            let rect = self.viewport.to_cells(hint.rect);
            ui.dashed_outline(rect, Style::default().fg(theme::hint_border()));
            let label = "Relâcher pour agrandir";
            let width = label.chars().count() as u16;
            if rect.width > width {
                ui.set_string(
                    rect.x + (rect.width - width) / 2,
                    rect.y + rect.height / 2,
                    label,
                    Style::default().fg(theme::hint_border()),
                );
            }
        }
        if let Some(id) = dragged {
            self.render_window(ui, id);
        }

        let hint = self.keys.hint_line();
        dock::render(
            ui,
            self.viewport.dock_area(),
            &self.registry,
            Some(self.dock_cursor),
            &hint,
        );
    }

    fn render_window(&self, ui: &mut UiFrame<'_>, id: WindowId) {
        let (Some(rect), Some(chrome)) = (self.cell_rect(id), self.chrome(id)) else {
            return;
        };
        self.decorator.render_window(ui, rect, &chrome);
        if chrome.minimized {
            return;
        }
        let content = self.decorator.content_area(rect);
        if content.width == 0 || content.height == 0 {
            return;
        }
        if let Some(body) = self.bodies.get(&id) {
            let wrapped = body.wrap(content.width);
            let text = wrapped.visible_text(self.scroll_offset(id), usize::from(content.height));
            ui.render_widget(Paragraph::new(text), content);
        }
    }

    fn chrome(&self, id: WindowId) -> Option<Chrome<'_>> {
        let record = self.registry.get(id)?;
        Some(Chrome {
            title: record.title(),
            focused: self.registry.topmost() == Some(id),
            minimized: record.is_minimized(),
        })
    }

    /// Visible windows bottom to top, with the gesture window last.
    fn paint_order(&self) -> Vec<WindowId> {
        let mut order = self.registry.draw_order();
        if let Some((id, _)) = self.controller.live_rect()
            && let Some(pos) = order.iter().position(|w| *w == id)
        {
            let live = order.remove(pos);
            order.push(live);
        }
        order
    }

    fn press(&mut self, column: u16, row: u16) -> Outcome {
        let pointer = self.viewport.pointer(column, row);
        let screen = self.screen();
        if let Some(hit) = dock::hit_test(self.viewport.dock_area(), &self.registry, column, row) {
            match hit {
                DockHit::Toggle => self.toggle_minimize_all(),
                DockHit::Window(id) => {
                    if let Some(idx) = self.manifest.ids().position(|w| w == id) {
                        self.dock_cursor = idx;
                    }
                    self.toggle_window(id);
                }
            }
            return Outcome::Handled;
        }

        let Some((id, hit)) = self.window_at(column, row) else {
            return Outcome::Ignored;
        };
        match hit {
            WindowHit::Close => {
                self.controller.cancel();
                self.commit(self.registry.close(id));
            }
            WindowHit::TitleBar => {
                let result = self.controller.begin_drag(&self.registry, id, pointer, screen);
                self.commit(result);
            }
            WindowHit::ResizeGrip => {
                let result = self
                    .controller
                    .begin_resize(&self.registry, id, pointer, screen);
                self.commit(result);
            }
            WindowHit::Body { column, row } => {
                self.controller.cancel();
                self.commit(self.registry.focus(id));
                self.activate_link(id, column, row);
            }
        }
        Outcome::Handled
    }

    fn activate_link(&self, id: WindowId, column: u16, row: u16) {
        let Some(record) = self.registry.get(id) else {
            return;
        };
        if record.is_minimized() {
            return;
        }
        let (Some(rect), Some(body)) = (self.cell_rect(id), self.bodies.get(&id)) else {
            return;
        };
        let content = self.decorator.content_area(rect);
        let wrapped = body.wrap(content.width);
        let line = self.scroll_offset(id) + usize::from(row);
        if let Some(url) = wrapped.link_at(line, usize::from(column)) {
            let opened = (self.opener)(url);
            tracing::info!(window_id = ?id, url, opened, "link activated");
        }
    }

    fn toggle_minimize_all(&mut self) {
        self.controller.cancel();
        self.registry = self.registry.toggle_minimize_all();
        tracing::info!(mode = ?self.registry.dock_mode(), "dock mode toggled");
    }

    fn toggle_window(&mut self, id: WindowId) {
        self.drop_gesture_on(id);
        self.commit(self.registry.toggle_visibility(id));
    }

    /// Abandons a drag or resize acting on `id`.
    fn drop_gesture_on(&mut self, id: WindowId) {
        if self.controller.state().window() == Some(id) {
            tracing::debug!(window_id = ?id, "gesture cancelled by visibility change");
            self.controller.cancel();
        }
    }

    fn focus_next(&mut self) {
        let visible: Vec<WindowId> = self
            .registry
            .records()
            .iter()
            .filter(|w| w.visible())
            .map(|w| w.id())
            .collect();
        let Some(top) = self.registry.topmost() else {
            return;
        };
        let next = visible
            .iter()
            .position(|id| *id == top)
            .map(|pos| visible[(pos + 1) % visible.len()]);
        if let Some(id) = next
            && id != top
        {
            self.commit(self.registry.focus(id));
        }
    }

    fn dock_id(&self, idx: usize) -> Option<WindowId> {
        self.manifest.specs().get(idx).map(|spec| spec.id)
    }

    fn scroll_topmost<F>(&mut self, step: F) -> Outcome
    where
        F: Fn(usize, usize) -> usize,
    {
        match self.registry.topmost() {
            Some(id) => self.scroll_by(id, step),
            None => Outcome::Ignored,
        }
    }

    /// Applies `step(page, offset)` to a window's scroll offset, clamped to
    /// the wrapped content.
    fn scroll_by<F>(&mut self, id: WindowId, step: F) -> Outcome
    where
        F: Fn(usize, usize) -> usize,
    {
        let minimized = self.registry.get(id).is_none_or(|w| w.is_minimized());
        if minimized {
            return Outcome::Ignored;
        }
        let (Some(rect), Some(body)) = (self.cell_rect(id), self.bodies.get(&id)) else {
            return Outcome::Ignored;
        };
        let content = self.decorator.content_area(rect);
        let page = usize::from(content.height).max(1);
        let max = body.wrap(content.width).len().saturating_sub(page);
        let offset = step(page, self.scroll_offset(id)).min(max);
        self.scroll.insert(id, offset);
        Outcome::Handled
    }

    fn commit(&mut self, result: WmResult<Registry>) {
        match result {
            Ok(next) => self.registry = next,
            Err(err) => tracing::warn!(error = %err, "window operation rejected"),
        }
    }
}
