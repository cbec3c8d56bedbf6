use sorting_sticks_core::{Canvas, Rgba, Vec2, Viewport};

/// Character-cell canvas: every stick becomes a column of `#` scaled down to
/// the terminal grid.
#[derive(Debug)]
pub struct AsciiCanvas {
    size: Vec2,
    columns: usize,
    rows: usize,
    cells: Vec<char>,
}

impl AsciiCanvas {
    pub fn new(size: Vec2, columns: usize, rows: usize) -> Self {
        let columns = columns.max(1);
        let rows = rows.max(1);
        Self {
            size,
            columns,
            rows,
            cells: vec![' '; columns * rows],
        }
    }

    pub fn to_text(&self) -> String {
        self.cells
            .chunks(self.columns)
            .map(|row| row.iter().collect::<String>().trim_end().to_string())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn glyph(color: Rgba) -> char {
        match (color.r, color.g, color.b) {
            (r, g, b) if r > 200 && g > 200 && b > 200 => '#',
            (r, g, _) if r > 150 && g > 150 => '~',
            (_, g, _) if g > 150 => '=',
            (r, _, _) if r > 150 => '*',
            _ => '+',
        }
    }
}

impl Viewport for AsciiCanvas {
    fn size(&self) -> Vec2 {
        self.size
    }
}

impl Canvas for AsciiCanvas {
    fn clear(&mut self) {
        self.cells.fill(' ');
    }

    fn fill_rect(&mut self, position: Vec2, size: Vec2, color: Rgba) {
        let scale_x = self.columns as f32 / self.size.x;
        let scale_y = self.rows as f32 / self.size.y;
        let left = (position.x * scale_x).floor().max(0.0) as usize;
        let right = ((position.x + size.x) * scale_x).ceil() as usize;
        let top = (position.y * scale_y).floor().max(0.0) as usize;
        let bottom = ((position.y + size.y) * scale_y).ceil() as usize;
        let glyph = Self::glyph(color);

        for row in top..bottom.min(self.rows) {
            for column in left..right.min(self.columns) {
                self.cells[row * self.columns + column] = glyph;
            }
        }
    }
}
