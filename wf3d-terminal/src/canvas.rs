/// Character-grid drawing surface for the terminal
use crossterm::{
    cursor,
    style::{Color, Print, ResetColor, SetForegroundColor},
    QueueableCommand,
};
use std::io::Write;
use wf3d_core::DrawSurface;

/// Terminal cells are roughly twice as tall as they are wide
const CELL_ASPECT: f64 = 2.0;

/// A character grid that strokes engine-space lines.
///
/// The engine viewport is fitted into the grid so that it looks square on
/// screen (letterboxed, centered). Segments are clipped to the grid and
/// segments with non-finite endpoints are dropped.
pub struct CharCanvas {
    cols: usize,
    rows: usize,
    viewport: (f64, f64),
    cells: Vec<char>,
}

impl CharCanvas {
    pub fn new(cols: usize, rows: usize, viewport_width: f64, viewport_height: f64) -> Self {
        Self {
            cols,
            rows,
            viewport: (viewport_width, viewport_height),
            cells: vec![' '; cols * rows],
        }
    }

    pub fn resize(&mut self, cols: usize, rows: usize) {
        self.cols = cols;
        self.rows = rows;
        self.cells = vec![' '; cols * rows];
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cell(&self, col: usize, row: usize) -> Option<char> {
        if col < self.cols && row < self.rows {
            Some(self.cells[row * self.cols + col])
        } else {
            None
        }
    }

    /// Number of non-blank cells
    pub fn ink(&self) -> usize {
        self.cells.iter().filter(|&&c| c != ' ').count()
    }

    /// Engine-space point to fractional cell coordinates
    fn to_cell(&self, x: f64, y: f64) -> (f64, f64) {
        let (width, height) = self.viewport;
        let scale_x = (self.cols as f64 / width).min(CELL_ASPECT * self.rows as f64 / height);
        let scale_y = scale_x / CELL_ASPECT;
        let offset_x = (self.cols as f64 - width * scale_x) / 2.0;
        let offset_y = (self.rows as f64 - height * scale_y) / 2.0;
        (offset_x + x * scale_x, offset_y + y * scale_y)
    }

    fn plot(&mut self, col: i64, row: i64, glyph: char) {
        if col >= 0 && row >= 0 && (col as usize) < self.cols && (row as usize) < self.rows {
            self.cells[row as usize * self.cols + col as usize] = glyph;
        }
    }

    /// Bresenham between two cells
    fn stroke(&mut self, from: (i64, i64), to: (i64, i64), glyph: char) {
        let (mut x, mut y) = from;
        let dx = (to.0 - x).abs();
        let dy = -(to.1 - y).abs();
        let sx = if x < to.0 { 1 } else { -1 };
        let sy = if y < to.1 { 1 } else { -1 };
        let mut err = dx + dy;

        loop {
            self.plot(x, y, glyph);
            if x == to.0 && y == to.1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    pub fn draw<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        writer.queue(SetForegroundColor(Color::Grey))?;
        for (row, line) in self.cells.chunks(self.cols.max(1)).enumerate() {
            let text: String = line.iter().collect();
            writer.queue(cursor::MoveTo(0, row as u16))?;
            writer.queue(Print(text))?;
        }
        writer.queue(ResetColor)?;
        Ok(())
    }
}

impl DrawSurface for CharCanvas {
    fn clear(&mut self) {
        self.cells.fill(' ');
    }

    fn draw_line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64) {
        if ![x1, y1, x2, y2].iter().all(|v| v.is_finite()) {
            return;
        }

        let from = self.to_cell(x1, y1);
        let to = self.to_cell(x2, y2);
        let max = (self.cols as f64 - 0.5, self.rows as f64 - 0.5);
        let Some((from, to)) = clip_segment(from, to, (-0.5, -0.5), max) else {
            return;
        };

        let glyph = glyph_for(to.0 - from.0, to.1 - from.1);
        self.stroke(
            (from.0.round() as i64, from.1.round() as i64),
            (to.0.round() as i64, to.1.round() as i64),
            glyph,
        );
    }
}

/// Pick a stroke character from the on-screen slope of a segment
fn glyph_for(dx: f64, dy: f64) -> char {
    let rise = dy * CELL_ASPECT;
    if rise.abs() <= 0.5 * dx.abs() {
        '-'
    } else if dx.abs() <= 0.5 * rise.abs() {
        '|'
    } else if dx * dy < 0.0 {
        '/'
    } else {
        '\\'
    }
}

/// Liang-Barsky clip of a segment against an axis-aligned box
fn clip_segment(
    p0: (f64, f64),
    p1: (f64, f64),
    min: (f64, f64),
    max: (f64, f64),
) -> Option<((f64, f64), (f64, f64))> {
    let (dx, dy) = (p1.0 - p0.0, p1.1 - p0.1);
    let (mut t0, mut t1) = (0.0f64, 1.0f64);

    let bounds = [
        (-dx, p0.0 - min.0),
        (dx, max.0 - p0.0),
        (-dy, p0.1 - min.1),
        (dy, max.1 - p0.1),
    ];
    for (p, q) in bounds {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            if r > t1 {
                return None;
            }
            t0 = t0.max(r);
        } else {
            if r < t0 {
                return None;
            }
            t1 = t1.min(r);
        }
    }

    Some((
        (p0.0 + t0 * dx, p0.1 + t0 * dy),
        (p0.0 + t1 * dx, p0.1 + t1 * dy),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    // 40x20 cells show a 40x40 viewport one-to-one horizontally
    fn canvas() -> CharCanvas {
        CharCanvas::new(40, 20, 40.0, 40.0)
    }

    #[test]
    fn test_horizontal_line() {
        let mut canvas = canvas();
        canvas.draw_line(0.0, 20.0, 39.0, 20.0);
        assert_eq!(canvas.ink(), 40);
        assert_eq!(canvas.cell(0, 10), Some('-'));
        assert_eq!(canvas.cell(39, 10), Some('-'));
    }

    #[test]
    fn test_vertical_line() {
        let mut canvas = canvas();
        canvas.draw_line(10.0, 0.0, 10.0, 38.0);
        assert_eq!(canvas.cell(10, 0), Some('|'));
        assert_eq!(canvas.cell(10, 19), Some('|'));
        assert_eq!(canvas.ink(), 20);
    }

    #[test]
    fn test_diagonal_glyphs_follow_screen_slope() {
        assert_eq!(glyph_for(1.0, -0.5), '/');
        assert_eq!(glyph_for(1.0, 0.5), '\\');
        assert_eq!(glyph_for(-1.0, 0.5), '/');
    }

    #[test]
    fn test_non_finite_lines_are_skipped() {
        let mut canvas = canvas();
        canvas.draw_line(f64::INFINITY, 0.0, 10.0, 10.0);
        canvas.draw_line(f64::NAN, 0.0, 10.0, 10.0);
        assert_eq!(canvas.ink(), 0);
    }

    #[test]
    fn test_far_away_lines_are_clipped() {
        let mut canvas = canvas();
        canvas.draw_line(-1e12, 20.0, 1e12, 20.0);
        assert_eq!(canvas.ink(), 40);

        canvas.clear();
        canvas.draw_line(-500.0, -500.0, -400.0, -300.0);
        assert_eq!(canvas.ink(), 0);
    }

    #[test]
    fn test_viewport_is_letterboxed() {
        // twice as many columns as needed: the picture is centered
        let mut canvas = CharCanvas::new(80, 20, 40.0, 40.0);
        canvas.draw_line(0.0, 0.0, 0.0, 0.0);
        assert_eq!(canvas.cell(20, 0), Some('-'));
    }

    #[test]
    fn test_clear_and_resize() {
        let mut canvas = canvas();
        canvas.draw_line(0.0, 0.0, 39.0, 39.0);
        assert!(canvas.ink() > 0);
        canvas.clear();
        assert_eq!(canvas.ink(), 0);

        canvas.resize(10, 5);
        assert_eq!((canvas.cols(), canvas.rows()), (10, 5));
        assert_eq!(canvas.cell(9, 4), Some(' '));
        assert_eq!(canvas.cell(10, 4), None);
    }

    #[test]
    fn test_draw_writes_every_row() {
        let mut canvas = canvas();
        canvas.draw_line(0.0, 20.0, 39.0, 20.0);
        let mut out = Vec::new();
        canvas.draw(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains(&"-".repeat(40)));
    }
}
