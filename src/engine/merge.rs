use super::board::{Board, Line};
use super::error::Result;
use super::shift::Edge;

pub(crate) type Score = u32;

/// Merged summarizes one merge pass over a line.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct Merged {
    pub(crate) merges: usize,
    pub(crate) score: Score,
}

/// Merge each adjacent pair of equal occupied cells of `line` once, writing the sum into the cell
/// nearer the target index `to` and emptying the other.
///
/// Pairs are visited starting at the target edge. An emptied cell can't take part in the next
/// pair, so a run of equal tiles merges pairwise and never cascades within one pass. Each merge
/// scores the merged value.
pub(crate) fn merge<L: Line + ?Sized>(line: &mut L, to: usize) -> Result<Merged> {
    let len = line.len();
    let edge = Edge::from_target(to, len)?;
    let mut merged = Merged::default();

    for (near, far) in edge.pairs(len) {
        let (near_cell, far_cell) = (line.cell(near), line.cell(far));
        if !(near_cell.occupied() && far_cell.occupied()) {
            continue;
        }
        if near_cell.value() != far_cell.value() {
            continue;
        }
        let value = near_cell.value() + far_cell.value();
        line.cell_mut(near).set(value);
        line.cell_mut(far).clear();
        merged.merges += 1;
        merged.score += value;
    }
    Ok(merged)
}

/// Whether any two row- or column-adjacent occupied cells hold the same value.
pub(crate) fn has_possible_merge(board: &Board) -> bool {
    board
        .adjacent_pairs()
        .any(|(a, b)| a.occupied() && b.occupied() && a.value() == b.value())
}
