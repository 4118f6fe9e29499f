//! Mapping between terminal cells and the logical pixels the window manager
//! works in.

use crossterm::terminal;
use ratatui::layout::Rect;

use crate::constants::NAV_HEIGHT;
use crate::geometry::{PixelRect, Point, ScreenSize};

pub const DEFAULT_CELL_WIDTH: f64 = 8.0;
pub const DEFAULT_CELL_HEIGHT: f64 = 16.0;

/// Size of one terminal cell in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellMetrics {
    pub width: f64,
    pub height: f64,
}

impl Default for CellMetrics {
    fn default() -> Self {
        Self {
            width: DEFAULT_CELL_WIDTH,
            height: DEFAULT_CELL_HEIGHT,
        }
    }
}

impl CellMetrics {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Metrics derived from the terminal's reported pixel size, if any.
    ///
    /// Many terminals report zero pixels; those fall back to `None`.
    pub fn from_pixels(columns: u16, rows: u16, width: u16, height: u16) -> Option<Self> {
        if columns == 0 || rows == 0 || width == 0 || height == 0 {
            return None;
        }
        Some(Self::new(
            f64::from(width) / f64::from(columns),
            f64::from(height) / f64::from(rows),
        ))
    }
}

/// The terminal area seen as a pixel screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    area: Rect,
    metrics: CellMetrics,
}

impl Viewport {
    pub fn new(area: Rect, metrics: CellMetrics) -> Self {
        Self { area, metrics }
    }

    /// Queries the terminal for its size. `fallback` is used when the
    /// terminal does not report pixels.
    pub fn from_terminal(fallback: CellMetrics) -> std::io::Result<Self> {
        let size = terminal::window_size()?;
        let metrics = CellMetrics::from_pixels(size.columns, size.rows, size.width, size.height)
            .unwrap_or(fallback);
        Ok(Self::new(Rect::new(0, 0, size.columns, size.rows), metrics))
    }

    pub fn area(&self) -> Rect {
        self.area
    }

    pub fn metrics(&self) -> CellMetrics {
        self.metrics
    }

    pub fn resize(&mut self, columns: u16, rows: u16) {
        self.area.width = columns;
        self.area.height = rows;
    }

    pub fn screen(&self) -> ScreenSize {
        ScreenSize::new(
            f64::from(self.area.width) * self.metrics.width,
            f64::from(self.area.height) * self.metrics.height,
        )
    }

    /// Rows reserved for the dock at the bottom of the terminal.
    pub fn dock_rows(&self) -> u16 {
        let rows = (NAV_HEIGHT / self.metrics.height).ceil();
        (rows as u16).clamp(1, self.area.height.max(1))
    }

    pub fn dock_area(&self) -> Rect {
        let rows = self.dock_rows().min(self.area.height);
        Rect::new(
            self.area.x,
            self.area.y + self.area.height - rows,
            self.area.width,
            rows,
        )
    }

    /// Cell rectangle covering `rect`, clipped to the terminal.
    pub fn to_cells(&self, rect: PixelRect) -> Rect {
        let left = self.col_at(rect.x);
        let top = self.row_at(rect.y);
        let right = self.col_at(rect.right()).max(left);
        let bottom = self.row_at(rect.bottom()).max(top);
        Rect::new(
            self.area.x + left,
            self.area.y + top,
            right - left,
            bottom - top,
        )
        .intersection(self.area)
    }

    /// Pixel position of the center of a terminal cell.
    pub fn pointer(&self, column: u16, row: u16) -> Point {
        Point::new(
            (f64::from(column.saturating_sub(self.area.x)) + 0.5) * self.metrics.width,
            (f64::from(row.saturating_sub(self.area.y)) + 0.5) * self.metrics.height,
        )
    }

    fn col_at(&self, x: f64) -> u16 {
        (x / self.metrics.width).round().clamp(0.0, f64::from(self.area.width)) as u16
    }

    fn row_at(&self, y: f64) -> u16 {
        (y / self.metrics.height)
            .round()
            .clamp(0.0, f64::from(self.area.height)) as u16
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewport() -> Viewport {
        // 1920x1088 px at the default metrics
        Viewport::new(Rect::new(0, 0, 240, 68), CellMetrics::default())
    }

    #[test]
    fn screen_is_cells_times_metrics() {
        assert_eq!(viewport().screen(), ScreenSize::new(1920.0, 1088.0));
    }

    #[test]
    fn dock_reserves_nav_height() {
        let vp = viewport();
        assert_eq!(vp.dock_rows(), 5);
        assert_eq!(vp.dock_area(), Rect::new(0, 63, 240, 5));
    }

    #[test]
    fn pixel_rects_round_to_cells() {
        let vp = viewport();
        let cells = vp.to_cells(PixelRect::new(10.0, 150.0, 200.0, 60.0));
        assert_eq!(cells, Rect::new(1, 9, 25, 4));
    }

    #[test]
    fn rects_past_the_edge_are_clipped() {
        let vp = Viewport::new(Rect::new(0, 0, 10, 10), CellMetrics::default());
        let cells = vp.to_cells(PixelRect::new(40.0, 80.0, 400.0, 400.0));
        assert_eq!(cells, Rect::new(5, 5, 5, 5));
    }

    #[test]
    fn pointer_is_cell_center() {
        assert_eq!(viewport().pointer(2, 9), Point::new(20.0, 152.0));
    }

    #[test]
    fn pixel_metrics_need_nonzero_report() {
        assert_eq!(CellMetrics::from_pixels(100, 50, 0, 0), None);
        assert_eq!(
            CellMetrics::from_pixels(100, 50, 1000, 1000),
            Some(CellMetrics::new(10.0, 20.0))
        );
    }
}
