//! # scanline
//!
//! One PAL frame is 312 raster lines. The front end runs the machine a few
//! lines at a time and rebuilds the part of the cell grid those lines
//! produced as soon as they have been emulated:
//!
//!    lines   0.. 51  top border     8-line chunks -> grid rows 0..3
//!    lines  51..251  text window    one character row (8 lines) at a time
//!    lines 251..312  bottom border  8-line chunks -> grid rows 28..31
//!
//! Border chunks map onto grid rows proportionally. A grid row is repainted
//! once the chunk that completes its share of lines has run, so successive
//! chunks cover the border rows without gaps or overlap.

use crate::font::Charset;
use crate::machine::Machine;
use crate::screen::{self, CellGrid, BORDER_ROWS, TEXT_ROWS};
use crate::timing;
use std::ops::Range;

/// raster lines per character row
pub const LINES_PER_ROW: u16 = 8;

/// raster lines run at once in the border areas
pub const BORDER_CHUNK_LINES: u16 = 8;

/// first raster line of the 25-row text window
pub const FIRST_TEXT_LINE: u16 = 51;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionKind {
    TopBorder,
    Visible,
    BottomBorder,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanlineRegion {
    pub start_line: u16,
    pub end_line: u16,
    pub kind: RegionKind,
}

impl ScanlineRegion {
    pub fn lines(&self) -> u16 {
        self.end_line - self.start_line
    }
}

const LAST_TEXT_LINE: u16 = FIRST_TEXT_LINE + TEXT_ROWS as u16 * LINES_PER_ROW;

/// the three regions of a frame, in raster order
pub const REGIONS: [ScanlineRegion; 3] = [
    ScanlineRegion {
        start_line: 0,
        end_line: FIRST_TEXT_LINE,
        kind: RegionKind::TopBorder,
    },
    ScanlineRegion {
        start_line: FIRST_TEXT_LINE,
        end_line: LAST_TEXT_LINE,
        kind: RegionKind::Visible,
    },
    ScanlineRegion {
        start_line: LAST_TEXT_LINE,
        end_line: timing::SCANLINES_PER_FRAME,
        kind: RegionKind::BottomBorder,
    },
];

/// what to rebuild once a sub-range has been emulated
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Refresh {
    /// whole grid rows in the border colour; may be empty
    BorderRows(Range<usize>),
    /// one text row, 0..25
    TextRow(usize),
}

/// a contiguous run of raster lines, executed in one go
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubRange {
    pub first_line: u16,
    pub lines: u16,
    pub refresh: Refresh,
}

impl SubRange {
    pub fn ticks(&self) -> u64 {
        timing::scanline_ticks(self.lines)
    }

    /// emulated time for the whole sub-range, from its exact tick count
    pub fn micros(&self) -> f64 {
        timing::ticks_to_micros(self.ticks())
    }
}

/// grid rows fully covered once lines `region.start_line..end` have run,
/// given the grid rows the region is shown on. clamped to those rows
pub fn completed_border_rows(region: &ScanlineRegion, end: u16, rows: &Range<usize>) -> usize {
    let done = end.saturating_sub(region.start_line).min(region.lines()) as usize;
    let covered = done * rows.len() / region.lines() as usize;
    (rows.start + covered).min(rows.end)
}

/// Runs the machine one frame at a time, split along the video chip's
/// border and text window geometry, refreshing the grid after every split.
pub struct ScanlineExecutor {
    plan: Vec<SubRange>,
}

impl ScanlineExecutor {
    pub fn new() -> ScanlineExecutor {
        let mut plan = Vec::new();
        for region in REGIONS.iter() {
            match region.kind {
                RegionKind::Visible => {
                    for row in 0..(region.lines() / LINES_PER_ROW) {
                        plan.push(SubRange {
                            first_line: region.start_line + row * LINES_PER_ROW,
                            lines: LINES_PER_ROW,
                            refresh: Refresh::TextRow(row as usize),
                        });
                    }
                }
                RegionKind::TopBorder | RegionKind::BottomBorder => {
                    let rows = border_grid_rows(region.kind);
                    let mut line = region.start_line;
                    while line < region.end_line {
                        let end = (line + BORDER_CHUNK_LINES).min(region.end_line);
                        let from = completed_border_rows(region, line, &rows);
                        let to = completed_border_rows(region, end, &rows);
                        plan.push(SubRange {
                            first_line: line,
                            lines: end - line,
                            refresh: Refresh::BorderRows(from..to),
                        });
                        line = end;
                    }
                }
            }
        }
        ScanlineExecutor { plan }
    }

    pub fn plan(&self) -> &[SubRange] {
        &self.plan
    }

    /// emulate one frame. each sub-range is composited after its exec
    /// returns and before the next one starts
    pub fn run_frame<M: Machine>(&self, m: &mut M, grid: &mut CellGrid, charset: Charset) {
        for sub in self.plan.iter() {
            m.exec(sub.micros());
            match &sub.refresh {
                Refresh::BorderRows(rows) => screen::compose_border_rows(&*m, grid, rows.clone()),
                Refresh::TextRow(row) => screen::compose_text_row(&*m, grid, *row, charset),
            }
        }
    }
}

impl Default for ScanlineExecutor {
    fn default() -> Self {
        ScanlineExecutor::new()
    }
}

fn border_grid_rows(kind: RegionKind) -> Range<usize> {
    match kind {
        RegionKind::TopBorder => 0..BORDER_ROWS,
        _ => BORDER_ROWS + TEXT_ROWS..2 * BORDER_ROWS + TEXT_ROWS,
    }
}
