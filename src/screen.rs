use crate::font::Charset;
use crate::machine::{self, Machine};
use crate::palette::pair_id;
use std::ops::Range;

/// text area of the machine, in characters
pub const TEXT_COLUMNS: usize = 40;
pub const TEXT_ROWS: usize = 25;

/// how much border is shown around the text area, in cells
pub const BORDER_COLUMNS: usize = 5;
pub const BORDER_ROWS: usize = 3;

pub const GRID_COLUMNS: usize = TEXT_COLUMNS + 2 * BORDER_COLUMNS;
pub const GRID_ROWS: usize = TEXT_ROWS + 2 * BORDER_ROWS;

/// one character cell as it should appear on the terminal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayCell {
    /// None draws a blank
    pub glyph: Option<&'static str>,
    /// 1..=256, see `palette::pair_id`
    pub color_pair: u16,
    pub reverse: bool,
}

impl Default for DisplayCell {
    fn default() -> Self {
        DisplayCell {
            glyph: None,
            color_pair: 1,
            reverse: false,
        }
    }
}

/// a fixed-size grid of cells, row major
#[derive(Debug, Clone, PartialEq)]
pub struct CellGrid {
    width: usize,
    height: usize,
    cells: Vec<DisplayCell>,
}

impl CellGrid {
    pub fn new(width: usize, height: usize) -> CellGrid {
        CellGrid {
            width,
            height,
            cells: vec![DisplayCell::default(); width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn get(&self, x: usize, y: usize) -> Option<&DisplayCell> {
        if x < self.width && y < self.height {
            self.cells.get(y * self.width + x)
        } else {
            None
        }
    }

    /// out-of-range writes are dropped
    pub fn set(&mut self, x: usize, y: usize, cell: DisplayCell) {
        if x < self.width && y < self.height {
            self.cells[y * self.width + x] = cell;
        }
    }

    /// every cell with its coordinates, row by row
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, &DisplayCell)> + '_ {
        let w = self.width;
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, c)| (i % w, i / w, c))
    }
}

impl Default for CellGrid {
    fn default() -> Self {
        CellGrid::new(GRID_COLUMNS, GRID_ROWS)
    }
}

/// address of the visible screen in video chip address space, as selected by
/// the upper nibble of the memory pointer register
pub fn screen_base(m: &impl Machine) -> u16 {
    ((m.vic_register(machine::VIC_MEMORY_POINTERS) >> 4) as u16) * 0x400
}

/// blank cell in the current border colour
fn border_cell(m: &impl Machine) -> DisplayCell {
    let border = m.vic_register(machine::VIC_BORDER_COLOUR) & 0xf;
    DisplayCell {
        glyph: None,
        color_pair: pair_id(border, border),
        reverse: false,
    }
}

/// repaint whole grid rows (top or bottom border) in the border colour
pub fn compose_border_rows(m: &impl Machine, grid: &mut CellGrid, rows: Range<usize>) {
    let cell = border_cell(m);
    for y in rows {
        for x in 0..grid.width() {
            grid.set(x, y, cell);
        }
    }
}

/// rebuild text row `row` (0..25), with its left and right border
pub fn compose_text_row(m: &impl Machine, grid: &mut CellGrid, row: usize, charset: Charset) {
    let y = BORDER_ROWS + row;
    let border = border_cell(m);
    for x in (0..BORDER_COLUMNS).chain(BORDER_COLUMNS + TEXT_COLUMNS..grid.width()) {
        grid.set(x, y, border);
    }

    let bg = m.vic_register(machine::VIC_BACKGROUND_COLOUR) & 0xf;
    let base = screen_base(m);
    for col in 0..TEXT_COLUMNS {
        let offset = (row * TEXT_COLUMNS + col) as u16;
        let fg = m.color_ram(offset) & 0xf;
        let code = m.vic_read(base.wrapping_add(offset));
        grid.set(
            BORDER_COLUMNS + col,
            y,
            DisplayCell {
                glyph: Some(charset.glyph(code)),
                color_pair: pair_id(fg, bg),
                reverse: code & 0x80 != 0,
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::machine::MemoryMachine;

    #[test]
    fn test_grid_geometry() {
        let g = CellGrid::default();
        assert_eq!(g.width(), 50);
        assert_eq!(g.height(), 31);
        assert_eq!(g.cells().count(), 50 * 31);
    }

    #[test]
    fn test_out_of_range_set_is_dropped() {
        let mut g = CellGrid::new(2, 2);
        let cell = DisplayCell {
            glyph: Some("x"),
            color_pair: 5,
            reverse: true,
        };
        g.set(2, 0, cell);
        g.set(0, 2, cell);
        assert!(g.cells().all(|(_, _, c)| *c == DisplayCell::default()));
        assert_eq!(g.get(2, 0), None);
    }

    #[test]
    fn test_screen_base_follows_register() {
        let mut m = MemoryMachine::new();
        assert_eq!(screen_base(&m), 0x0400);
        m.set_vic_register(machine::VIC_MEMORY_POINTERS, 0x35);
        assert_eq!(screen_base(&m), 0x0c00);
    }

    #[test]
    fn test_text_row() {
        let mut m = MemoryMachine::new();
        // "A" in white, reversed space in cyan, on row 2
        m.write(0x0400 + 80, 0x01);
        m.set_color_ram(80, 0xf1);
        m.write(0x0400 + 81, 0xa0);
        m.set_color_ram(81, 3);
        let mut g = CellGrid::default();
        compose_text_row(&m, &mut g, 2, Charset::Upper);

        let a = g.get(BORDER_COLUMNS, BORDER_ROWS + 2).unwrap();
        assert_eq!(a.glyph, Some("A"));
        assert_eq!(a.color_pair, pair_id(1, 6));
        assert!(!a.reverse);

        let space = g.get(BORDER_COLUMNS + 1, BORDER_ROWS + 2).unwrap();
        assert_eq!(space.glyph, Some(" "));
        assert_eq!(space.color_pair, pair_id(3, 6));
        assert!(space.reverse);

        let left = g.get(0, BORDER_ROWS + 2).unwrap();
        let right = g.get(GRID_COLUMNS - 1, BORDER_ROWS + 2).unwrap();
        assert_eq!(left.glyph, None);
        assert_eq!(left.color_pair, pair_id(14, 14));
        assert_eq!(left, right);

        // neighbouring rows untouched
        assert_eq!(g.get(BORDER_COLUMNS, BORDER_ROWS + 1), Some(&DisplayCell::default()));
    }

    #[test]
    fn test_text_row_reads_selected_screen() {
        let mut m = MemoryMachine::new();
        m.set_vic_register(machine::VIC_MEMORY_POINTERS, 0x25);
        m.write(0x0800, 0x02);
        m.write(0x0400, 0x03);
        let mut g = CellGrid::default();
        compose_text_row(&m, &mut g, 0, Charset::Lower);
        assert_eq!(g.get(BORDER_COLUMNS, BORDER_ROWS).unwrap().glyph, Some("b"));
    }

    #[test]
    fn test_border_rows() {
        let mut m = MemoryMachine::new();
        m.set_vic_register(machine::VIC_BORDER_COLOUR, 0xf2);
        let mut g = CellGrid::default();
        compose_border_rows(&m, &mut g, 0..2);
        assert!((0..GRID_COLUMNS).all(|x| g.get(x, 1).unwrap().color_pair == pair_id(2, 2)));
        assert_eq!(g.get(0, 2), Some(&DisplayCell::default()));
    }
}
