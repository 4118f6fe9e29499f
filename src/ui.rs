//! UiFrame: a thin wrapper around `ratatui::Frame` that clamps drawing to the
//! visible area.
//!
//! Window rectangles come from pixel geometry and can land partially outside
//! the terminal buffer while a window is dragged against an edge. Every draw
//! call made through `UiFrame` is intersected with the visible area first, so
//! callers never index outside the buffer.
use ratatui::Frame;
use ratatui::buffer::Buffer;
use ratatui::layout::{Position, Rect};
use ratatui::style::Style;
use ratatui::widgets::Widget;

/// Wrapper around `ratatui::Frame` that clamps drawing to the visible area.
pub struct UiFrame<'a> {
    area: Rect,
    buffer: &'a mut Buffer,
}

impl<'a> UiFrame<'a> {
    pub fn new(frame: &'a mut Frame<'_>) -> Self {
        let area = frame.area();
        let buffer = frame.buffer_mut();
        Self { area, buffer }
    }

    /// Construct a `UiFrame` directly from an area and buffer.
    pub fn from_parts(area: Rect, buffer: &'a mut Buffer) -> Self {
        Self { area, buffer }
    }

    pub fn area(&self) -> Rect {
        self.area
    }

    pub fn buffer_mut(&mut self) -> &mut Buffer {
        self.buffer
    }

    fn clip_rect(&self, rect: Rect) -> Option<Rect> {
        let clipped = rect.intersection(self.area);
        if clipped.width == 0 || clipped.height == 0 {
            None
        } else {
            Some(clipped)
        }
    }

    pub fn render_widget<W>(&mut self, widget: W, area: Rect)
    where
        W: Widget,
    {
        if let Some(clipped) = self.clip_rect(area) {
            widget.render(clipped, self.buffer);
        }
    }

    /// Writes `text` on one row, truncated at the right edge of the area.
    pub fn set_string(&mut self, x: u16, y: u16, text: &str, style: Style) {
        if !self.area.contains(Position::new(x, y)) {
            return;
        }
        let room = self.area.right() - x;
        self.buffer
            .set_string(x, y, truncate_to_width(text, usize::from(room)), style);
    }

    /// Draws a dashed outline along the edge of `rect`.
    pub fn dashed_outline(&mut self, rect: Rect, style: Style) {
        let Some(clipped) = self.clip_rect(rect) else {
            return;
        };
        let right = rect.x.saturating_add(rect.width).saturating_sub(1);
        let bottom = rect.y.saturating_add(rect.height).saturating_sub(1);
        for y in clipped.y..clipped.y.saturating_add(clipped.height) {
            for x in clipped.x..clipped.x.saturating_add(clipped.width) {
                let horizontal = y == rect.y || y == bottom;
                let vertical = x == rect.x || x == right;
                let symbol = match (horizontal, vertical) {
                    (true, true) => "+",
                    (true, false) if (x - rect.x) % 2 == 0 => "-",
                    (false, true) if (y - rect.y) % 2 == 0 => "¦",
                    _ => continue,
                };
                if let Some(cell) = self.buffer.cell_mut((x, y)) {
                    cell.set_symbol(symbol);
                    cell.set_style(style);
                }
            }
        }
    }
}

pub(crate) fn truncate_to_width(value: &str, width: usize) -> String {
    if value.chars().count() <= width {
        return value.to_string();
    }
    value.chars().take(width).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_to_width_short_and_long() {
        assert_eq!(truncate_to_width("abc", 5), "abc");
        assert_eq!(truncate_to_width("abcdef", 3), "abc");
        assert_eq!(truncate_to_width("àéî", 2), "àé");
    }

    #[test]
    fn set_string_is_cut_at_the_edge() {
        let bounds = Rect::new(0, 0, 10, 2);
        let mut buf = Buffer::empty(bounds);
        let mut ui = UiFrame::from_parts(bounds, &mut buf);
        ui.set_string(1, 0, "hello", Style::default());
        ui.set_string(100, 0, "x", Style::default());
        ui.set_string(8, 1, "overflow", Style::default());
        assert_eq!(buf.cell((1, 0)).map(|c| c.symbol()), Some("h"));
        assert_eq!(buf.cell((9, 1)).map(|c| c.symbol()), Some("v"));
    }

    #[test]
    fn render_widget_clips_to_frame_area() {
        let area = Rect::new(0, 0, 5, 3);
        let mut buf = Buffer::empty(area);
        let mut ui = UiFrame::from_parts(area, &mut buf);

        struct FillWidget;
        impl Widget for FillWidget {
            fn render(self, area: Rect, buf: &mut Buffer) {
                for y in area.y..area.y.saturating_add(area.height) {
                    for x in area.x..area.x.saturating_add(area.width) {
                        if let Some(cell) = buf.cell_mut((x, y)) {
                            cell.set_symbol("A");
                        }
                    }
                }
            }
        }

        // partially outside the right edge
        ui.render_widget(FillWidget, Rect::new(3, 1, 5, 2));

        assert_eq!(buf.cell((3, 1)).map(|c| c.symbol()), Some("A"));
        assert_eq!(buf.cell((4, 2)).map(|c| c.symbol()), Some("A"));
        assert_eq!(buf.cell((2, 1)).map(|c| c.symbol()), Some(" "));
    }

    #[test]
    fn dashed_outline_marks_corners_and_skips_interior() {
        let area = Rect::new(0, 0, 8, 6);
        let mut buf = Buffer::empty(area);
        let mut ui = UiFrame::from_parts(area, &mut buf);
        ui.dashed_outline(Rect::new(1, 1, 5, 4), Style::default());

        assert_eq!(buf.cell((1, 1)).map(|c| c.symbol()), Some("+"));
        assert_eq!(buf.cell((5, 4)).map(|c| c.symbol()), Some("+"));
        assert_eq!(buf.cell((3, 1)).map(|c| c.symbol()), Some("-"));
        assert_eq!(buf.cell((3, 2)).map(|c| c.symbol()), Some(" "));
    }
}
