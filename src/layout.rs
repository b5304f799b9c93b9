//! Word-wrapped, diff-colored placement of a session onto a grid.
//!
//! Pure and backend independent: the renderer maps each [`Category`] to a
//! style and the controller uses [`Layout::active_row`] to scroll.

use crate::session::Session;

/// How a rendered cell should be presented
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum_macros::Display)]
pub enum Category {
    /// Target character not typed yet
    Ghost,
    Correct,
    Incorrect,
    /// Target character skipped by moving on to the next word
    Missed,
    /// Typed past the end of the target word
    Extra,
    Cursor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderCell {
    pub glyph: char,
    pub category: Category,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacedCell {
    pub row: usize,
    pub col: usize,
    pub cell: RenderCell,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Layout {
    pub cells: Vec<PlacedCell>,
    /// Row holding the word under the cursor
    pub active_row: usize,
    /// Number of rows used
    pub rows: usize,
}

impl Layout {
    pub fn row(&self, row: usize) -> impl Iterator<Item = &PlacedCell> {
        self.cells.iter().filter(move |c| c.row == row)
    }
}

/// Lays out every word of `session` into rows no wider than `width`.
///
/// A word never breaks across rows. Each word takes `max(target, typed) + 1`
/// columns, the last being a trailing slot that can hold the cursor. A word
/// wider than the viewport starts its own row and is clipped.
pub fn layout(session: &Session, width: usize) -> Layout {
    let cursor = session.cursor();
    let mut out = Layout::default();
    let (mut row, mut col) = (0usize, 0usize);

    for (i, target) in session.targets().iter().enumerate() {
        let typed = session.typed(i);
        let max_len = target.len().max(typed.len());

        if col > 0 && col + max_len >= width {
            row += 1;
            col = 0;
        }

        if i == cursor.word {
            out.active_row = row;
        }

        for j in 0..=max_len {
            if col + j >= width {
                break;
            }

            let expected = target.get(j);
            let mut cell = match (typed.get(j), expected) {
                (Some(&got), None) => RenderCell {
                    glyph: got,
                    category: Category::Extra,
                },
                (Some(&got), Some(want)) => RenderCell {
                    glyph: got,
                    category: if got == want {
                        Category::Correct
                    } else {
                        Category::Incorrect
                    },
                },
                (None, Some(want)) => RenderCell {
                    glyph: want,
                    category: if i < cursor.word {
                        Category::Missed
                    } else {
                        Category::Ghost
                    },
                },
                (None, None) => RenderCell {
                    glyph: ' ',
                    category: Category::Ghost,
                },
            };

            if i == cursor.word && j == cursor.offset {
                cell.category = Category::Cursor;
            }

            out.cells.push(PlacedCell { row, col: col + j, cell });
        }

        col += max_len + 1;
    }

    out.rows = row + 1;
    out
}
