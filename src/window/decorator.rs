use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::Clear;

use crate::theme;
use crate::ui::UiFrame;

/// What the decorator needs to know about a window besides its rectangle.
#[derive(Debug, Clone, Copy)]
pub struct Chrome<'a> {
    pub title: &'a str,
    pub focused: bool,
    pub minimized: bool,
}

/// Draws window frames and reports where their controls are.
///
/// Hit regions are derived from the same rectangle the frame is drawn in, so
/// a click always lands on what the user sees.
pub trait WindowDecorator: std::fmt::Debug {
    fn render_window(&self, frame: &mut UiFrame<'_>, rect: Rect, chrome: &Chrome<'_>);

    /// Header row minus the close button: the drag handle.
    fn title_bar(&self, rect: Rect) -> Rect;

    fn close_button(&self, rect: Rect) -> Rect;

    /// Bottom-right grip. `None` for windows that cannot be resized.
    fn resize_grip(&self, rect: Rect, chrome: &Chrome<'_>) -> Option<Rect>;

    fn content_area(&self, rect: Rect) -> Rect;
}

const CLOSE_LABEL: &str = "[x]";
const GRIP: &str = "◢";

#[derive(Debug, Default)]
pub struct FolioDecorator;

impl WindowDecorator for FolioDecorator {
    fn render_window(&self, frame: &mut UiFrame<'_>, rect: Rect, chrome: &Chrome<'_>) {
        if rect.width < 2 || rect.height < 2 {
            return;
        }
        frame.render_widget(Clear, rect);

        let header_style = theme::header_style(chrome.focused);
        let border_style = Style::default()
            .fg(theme::decorator_border())
            .bg(theme::window_body_bg());

        let left = rect.x;
        let top = rect.y;
        let right = rect.x.saturating_add(rect.width).saturating_sub(1);
        let bottom = rect.y.saturating_add(rect.height).saturating_sub(1);

        // Header
        let header = Rect::new(left, top, rect.width, 1);
        let fill = " ".repeat(header.width as usize);
        frame.set_string(left, top, &fill, header_style);

        let close = self.close_button(rect);
        let title_room = close.x.saturating_sub(left).saturating_sub(1);
        let title_len = chrome.title.chars().count() as u16;
        let start = if title_len <= title_room {
            left + 1 + (title_room - title_len) / 2
        } else {
            left + 1
        };
        let title = crate::ui::truncate_to_width(chrome.title, title_room as usize);
        frame.set_string(start, top, &title, header_style);
        if close.width > 0 {
            frame.set_string(close.x, close.y, CLOSE_LABEL, header_style);
        }

        // Borders
        let buffer_area = frame.area();
        let in_bounds =
            |x: u16, y: u16| buffer_area.contains(ratatui::layout::Position::new(x, y));
        for y in top.saturating_add(1)..=bottom {
            for x in [left, right] {
                if !in_bounds(x, y) {
                    continue;
                }
                let symbol = match (x == left, y == bottom) {
                    (true, true) => "└",
                    (false, true) => "┘",
                    _ => "│",
                };
                if let Some(cell) = frame.buffer_mut().cell_mut((x, y)) {
                    cell.set_symbol(symbol);
                    cell.set_style(border_style);
                }
            }
        }
        for x in left.saturating_add(1)..right {
            if in_bounds(x, bottom)
                && let Some(cell) = frame.buffer_mut().cell_mut((x, bottom))
            {
                cell.set_symbol("─");
                cell.set_style(border_style);
            }
        }

        if let Some(grip) = self.resize_grip(rect, chrome)
            && in_bounds(grip.x, grip.y)
            && let Some(cell) = frame.buffer_mut().cell_mut((grip.x, grip.y))
        {
            cell.set_symbol(GRIP);
            cell.set_style(border_style.fg(theme::accent()));
        }
    }

    fn title_bar(&self, rect: Rect) -> Rect {
        let close = self.close_button(rect);
        let width = if close.width > 0 {
            close.x.saturating_sub(rect.x)
        } else {
            rect.width
        };
        Rect::new(rect.x, rect.y, width, rect.height.min(1))
    }

    fn close_button(&self, rect: Rect) -> Rect {
        let label = CLOSE_LABEL.len() as u16;
        if rect.width < label + 3 || rect.height == 0 {
            return Rect::new(rect.x, rect.y, 0, 0);
        }
        let right = rect.x + rect.width - 1;
        Rect::new(right - label, rect.y, label, 1)
    }

    fn resize_grip(&self, rect: Rect, chrome: &Chrome<'_>) -> Option<Rect> {
        if chrome.minimized || rect.width < 2 || rect.height < 3 {
            return None;
        }
        Some(Rect::new(
            rect.x + rect.width - 1,
            rect.y + rect.height - 1,
            1,
            1,
        ))
    }

    fn content_area(&self, rect: Rect) -> Rect {
        Rect::new(
            rect.x.saturating_add(1),
            rect.y.saturating_add(1),
            rect.width.saturating_sub(2),
            rect.height.saturating_sub(2),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::buffer::Buffer;

    fn chrome(minimized: bool) -> Chrome<'static> {
        Chrome {
            title: "PROJETS",
            focused: true,
            minimized,
        }
    }

    #[test]
    fn hit_regions_partition_the_header() {
        let deco = FolioDecorator;
        let rect = Rect::new(2, 1, 20, 6);
        let close = deco.close_button(rect);
        assert_eq!(close, Rect::new(18, 1, 3, 1));
        let title = deco.title_bar(rect);
        assert_eq!(title, Rect::new(2, 1, 16, 1));
        assert_eq!(deco.content_area(rect), Rect::new(3, 2, 18, 4));
        assert_eq!(
            deco.resize_grip(rect, &chrome(false)),
            Some(Rect::new(21, 6, 1, 1))
        );
        assert_eq!(deco.resize_grip(rect, &chrome(true)), None);
    }

    #[test]
    fn renders_title_close_and_grip() {
        let area = Rect::new(0, 0, 24, 8);
        let mut buf = Buffer::empty(area);
        let mut frame = UiFrame::from_parts(area, &mut buf);
        let rect = Rect::new(2, 1, 20, 6);
        FolioDecorator.render_window(&mut frame, rect, &chrome(false));

        let row: String = (2..22)
            .filter_map(|x| buf.cell((x, 1)).map(|c| c.symbol().to_string()))
            .collect();
        assert!(row.contains("PROJETS"));
        assert!(row.ends_with("[x] "));
        assert_eq!(buf.cell((21, 6)).map(|c| c.symbol()), Some(GRIP));
        assert_eq!(buf.cell((2, 6)).map(|c| c.symbol()), Some("└"));
        assert_eq!(buf.cell((2, 3)).map(|c| c.symbol()), Some("│"));
    }

    #[test]
    fn tiny_windows_have_no_close_button() {
        let deco = FolioDecorator;
        let rect = Rect::new(0, 0, 4, 3);
        assert_eq!(deco.close_button(rect).width, 0);
        assert_eq!(deco.title_bar(rect).width, 4);
    }
}
