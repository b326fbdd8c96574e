use crate::palette::ColorPairs;
use crate::screen::{CellGrid, DisplayCell};
use crossterm::cursor::{Hide, Show};
use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen};
use std::io;
use tui::backend::{Backend, CrosstermBackend};
use tui::buffer::Cell;
use tui::style::{Modifier, Style};

/// Keeps the terminal in step with the composited grid, drawing only the
/// cells that changed since the last flush. `previous` is always what the
/// terminal is showing.
pub struct DiffRenderer {
    previous: CellGrid,
    pairs: ColorPairs,
    full_redraw: bool,
    wide: bool,
}

impl DiffRenderer {
    /// `wide` draws every cell two terminal columns wide, which gets closer to
    /// the machine's pixel aspect ratio
    pub fn new(width: usize, height: usize, wide: bool) -> DiffRenderer {
        DiffRenderer {
            previous: CellGrid::new(width, height),
            pairs: ColorPairs::new(),
            full_redraw: true,
            wide,
        }
    }

    /// draw every cell next time, e.g. after the terminal was resized
    pub fn force_redraw(&mut self) {
        self.full_redraw = true;
    }

    pub fn needs_full_redraw(&self) -> bool {
        self.full_redraw
    }

    /// what the terminal is showing
    pub fn previous(&self) -> &CellGrid {
        &self.previous
    }

    /// draw the cells of `current` that differ from what is on screen; returns
    /// how many grid cells were drawn. does not flush. if drawing fails the
    /// screen is in an unknown state, so the next call redraws everything
    pub fn render<B: Backend>(&mut self, current: &CellGrid, backend: &mut B) -> io::Result<usize> {
        if current.width() != self.previous.width() || current.height() != self.previous.height() {
            self.previous = CellGrid::new(current.width(), current.height());
            self.full_redraw = true;
        }

        let changed: Vec<(usize, usize, DisplayCell)> = current
            .cells()
            .filter(|(x, y, cell)| self.full_redraw || self.previous.get(*x, *y) != Some(*cell))
            .map(|(x, y, cell)| (x, y, *cell))
            .collect();

        let mut content = Vec::with_capacity(changed.len() * 2);
        for (x, y, cell) in changed.iter() {
            let term = self.term_cell(cell);
            if self.wide {
                let mut pad = term.clone();
                pad.set_symbol(" ");
                content.push(((*x * 2) as u16, *y as u16, term));
                content.push(((*x * 2 + 1) as u16, *y as u16, pad));
            } else {
                content.push((*x as u16, *y as u16, term));
            }
        }

        if let Err(e) = backend.draw(content.iter().map(|(x, y, c)| (*x, *y, c))) {
            self.full_redraw = true;
            return Err(e);
        }

        for (x, y, cell) in changed.iter() {
            self.previous.set(*x, *y, *cell);
        }
        self.full_redraw = false;
        Ok(changed.len())
    }

    fn term_cell(&self, cell: &DisplayCell) -> Cell {
        let (fg, bg) = self.pairs.get(cell.color_pair);
        let mut modifier = Modifier::BOLD;
        if cell.reverse {
            modifier |= Modifier::REVERSED;
        }
        let mut term = Cell::default();
        term.set_symbol(cell.glyph.unwrap_or(" "));
        term.set_style(Style::default().fg(fg).bg(bg).add_modifier(modifier));
        term
    }
}

/// the real terminal: alternate screen, hidden cursor. put back on drop
pub struct TermDisplay {
    backend: CrosstermBackend<io::Stdout>,
}

impl TermDisplay {
    pub fn new() -> Result<TermDisplay, io::Error> {
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, Hide)?;
        let mut backend = CrosstermBackend::new(stdout);
        backend.clear()?;
        backend.hide_cursor()?;
        log::debug!("terminal is {:?}", backend.size()?);
        Ok(TermDisplay { backend })
    }

    pub fn backend_mut(&mut self) -> &mut CrosstermBackend<io::Stdout> {
        &mut self.backend
    }
}

impl Drop for TermDisplay {
    fn drop(&mut self) {
        let _ = self.backend.flush();
        let _ = execute!(io::stdout(), Show, LeaveAlternateScreen);
    }
}
