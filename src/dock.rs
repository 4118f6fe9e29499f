//! The navigation dock: one control per manifest window plus the
//! minimize-all toggle.
//!
//! The dock keeps no state of its own. Layout, rendering and hit-testing are
//! all derived from the current [`Registry`] snapshot and the area the host
//! reserves at the bottom of the screen.

use ratatui::layout::{Position, Rect};
use ratatui::style::Style;

use crate::theme;
use crate::ui::UiFrame;
use crate::window::{DockMode, Registry, WindowId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DockHit {
    Toggle,
    Window(WindowId),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DockControl {
    pub id: WindowId,
    pub rect: Rect,
    pub label: String,
    pub pressed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DockLayout {
    pub toggle: Rect,
    pub controls: Vec<DockControl>,
    pub hint_row: Option<Rect>,
}

fn toggle_label(mode: DockMode) -> &'static str {
    match mode {
        DockMode::Expanded => " [-] ",
        DockMode::Minimized => " [+] ",
    }
}

/// Places the controls inside `area`.
///
/// Labels carry the dock position and title; when the row is too narrow
/// they shrink to the position number alone.
pub fn layout(area: Rect, registry: &Registry) -> DockLayout {
    if area.width == 0 || area.height == 0 {
        return DockLayout::default();
    }
    let control_row = area.y + area.height / 2;
    let hint_row = (area.height >= 3)
        .then(|| Rect::new(area.x, area.y + area.height - 1, area.width, 1));

    let toggle_text = toggle_label(registry.dock_mode());
    let toggle_width = (toggle_text.chars().count() as u16).min(area.width);
    let toggle = Rect::new(area.x, control_row, toggle_width, 1);

    let records = registry.records();
    let full: Vec<String> = records
        .iter()
        .enumerate()
        .map(|(idx, record)| format!(" {} {} ", idx + 1, record.title()))
        .collect();
    let room = area.width.saturating_sub(toggle_width) as usize;
    let needed: usize = full.iter().map(|label| label.chars().count() + 1).sum();
    let labels: Vec<String> = if needed <= room {
        full
    } else {
        (1..=records.len()).map(|n| format!(" {n} ")).collect()
    };

    let right = area.x.saturating_add(area.width);
    let mut x = toggle.x + toggle.width + 1;
    let mut controls = Vec::with_capacity(records.len());
    for (record, label) in records.iter().zip(labels) {
        if x >= right {
            break;
        }
        let width = (label.chars().count() as u16).min(right - x);
        controls.push(DockControl {
            id: record.id(),
            rect: Rect::new(x, control_row, width, 1),
            label,
            pressed: record.visible(),
        });
        x = x.saturating_add(width + 1);
    }

    DockLayout {
        toggle,
        controls,
        hint_row,
    }
}

pub fn render(
    frame: &mut UiFrame<'_>,
    area: Rect,
    registry: &Registry,
    cursor: Option<usize>,
    hint: &str,
) {
    let base = Style::default().bg(theme::dock_bg()).fg(theme::dock_fg());
    for y in area.y..area.y.saturating_add(area.height) {
        frame.set_string(area.x, y, &" ".repeat(area.width as usize), base);
    }

    let dock = layout(area, registry);
    frame.set_string(
        dock.toggle.x,
        dock.toggle.y,
        toggle_label(registry.dock_mode()),
        theme::dock_style(registry.dock_mode().is_minimized(), false),
    );
    for (idx, control) in dock.controls.iter().enumerate() {
        let style = theme::dock_style(control.pressed, cursor == Some(idx));
        frame.set_string(control.rect.x, control.rect.y, &control.label, style);
    }
    if let Some(row) = dock.hint_row {
        frame.set_string(row.x + 1, row.y, hint, base.fg(theme::dock_hint_fg()));
    }
}

pub fn hit_test(area: Rect, registry: &Registry, column: u16, row: u16) -> Option<DockHit> {
    let pos = Position::new(column, row);
    if !area.contains(pos) {
        return None;
    }
    let dock = layout(area, registry);
    if dock.toggle.contains(pos) {
        return Some(DockHit::Toggle);
    }
    dock.controls
        .iter()
        .find(|control| control.rect.contains(pos))
        .map(|control| DockHit::Window(control.id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::window::Manifest;
    use ratatui::buffer::Buffer;

    fn registry() -> Registry {
        Registry::from_manifest(&Manifest::portfolio())
    }

    #[test]
    fn wide_dock_shows_titles() {
        let dock = layout(Rect::new(0, 20, 120, 5), &registry());
        assert_eq!(dock.toggle, Rect::new(0, 22, 5, 1));
        assert_eq!(dock.controls.len(), 5);
        assert_eq!(dock.controls[0].label, " 1 A PROPOS DE MOI ");
        assert_eq!(dock.controls[0].rect.x, 6);
        assert!(dock.controls[0].pressed);
        assert!(!dock.controls[1].pressed);
        assert_eq!(dock.hint_row, Some(Rect::new(0, 24, 120, 1)));
    }

    #[test]
    fn narrow_dock_falls_back_to_numbers() {
        let dock = layout(Rect::new(0, 0, 40, 1), &registry());
        assert_eq!(dock.controls[2].label, " 3 ");
        assert_eq!(dock.hint_row, None);
    }

    #[test]
    fn hit_test_finds_controls() {
        let area = Rect::new(0, 20, 120, 5);
        let reg = registry();
        assert_eq!(hit_test(area, &reg, 1, 22), Some(DockHit::Toggle));
        assert_eq!(hit_test(area, &reg, 8, 22), Some(DockHit::Window(WindowId(1))));
        assert_eq!(hit_test(area, &reg, 8, 21), None);
        assert_eq!(hit_test(area, &reg, 8, 2), None);
    }

    #[test]
    fn pressed_state_follows_visibility() {
        let area = Rect::new(0, 0, 120, 3);
        let reg = registry().toggle_visibility(WindowId(2)).unwrap();
        let dock = layout(area, &reg);
        assert!(dock.controls[1].pressed);

        let mut buf = Buffer::empty(area);
        let mut frame = UiFrame::from_parts(area, &mut buf);
        render(&mut frame, area, &reg, Some(1), "q quit");
        let control = &dock.controls[1];
        let cell = buf.cell((control.rect.x + 1, control.rect.y)).unwrap();
        assert_eq!(cell.symbol(), "2");
        assert_eq!(cell.bg, theme::dock_pressed_bg());
    }
}
