//! Line completion and compaction
//!
//! Rows completed by a lock are collected in [`CompletedLines`] (at most four,
//! one piece can't span more). After the blink animation the engine calls
//! [`compact`], which drops those rows and shifts everything above them down.

use arrayvec::ArrayVec;

use crate::board::Board;
use crate::types::{MAX_COMPLETED_LINES, PLAYFIELD_ROWS};

/// Playfield rows completed by the last lock
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompletedLines {
    rows: ArrayVec<usize, MAX_COMPLETED_LINES>,
}

impl CompletedLines {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a completed row; a row already present is ignored
    ///
    /// Panics if more than four distinct rows are recorded.
    pub fn push(&mut self, row: usize) {
        if self.contains(row) {
            return;
        }
        self.rows.push(row);
    }

    pub fn contains(&self, row: usize) -> bool {
        self.rows.contains(&row)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn clear(&mut self) {
        self.rows.clear();
    }

    pub fn rows(&self) -> &[usize] {
        &self.rows
    }

    /// Order rows bottom-most first
    pub fn sort_descending(&mut self) {
        self.rows.sort_unstable_by(|a, b| b.cmp(a));
    }
}

/// Remove completed rows from the playfield and shift the rows above down
///
/// Walks a destination and a source cursor up from the bottom row, skipping
/// source rows that are in `lines`. Rows left over at the top once the source
/// runs out are reset to empty tiles. Returns the number of rows removed.
pub fn compact(board: &mut Board, lines: &mut CompletedLines) -> usize {
    if lines.is_empty() {
        return 0;
    }
    lines.sort_descending();

    let mut src = PLAYFIELD_ROWS as i32 - 1;
    let mut dst = PLAYFIELD_ROWS as i32 - 1;

    while dst >= 0 {
        while src >= 0 && lines.contains(src as usize) {
            src -= 1;
        }
        if src < 0 {
            break;
        }
        board.copy_row(src as usize, dst as usize);
        src -= 1;
        dst -= 1;
    }

    // Everything from dst up was vacated by the shift.
    for row in 0..=dst {
        board.clear_row(row as usize);
    }

    lines.len()
}
