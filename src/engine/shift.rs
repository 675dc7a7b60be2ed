use super::board::Line;
use super::error::{EngineError, Result};

/// Edge is the end of a line that tiles are compacted toward.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Edge {
    Start,
    End,
}

impl Edge {
    /// Resolve a target index to an edge. Only `0` and `len - 1` are valid targets, and a line
    /// needs at least two cells for anything to move.
    pub(crate) fn from_target(to: usize, len: usize) -> Result<Edge> {
        if len < 2 {
            return Err(EngineError::LineTooShort(len));
        }
        match to {
            0 => Ok(Edge::Start),
            t if t == len - 1 => Ok(Edge::End),
            _ => Err(EngineError::InvalidEdge { to, len }),
        }
    }

    /// Line positions ordered from this edge outward.
    pub(crate) fn scan(&self, len: usize) -> Vec<usize> {
        match self {
            Edge::Start => (0..len).collect(),
            Edge::End => (0..len).rev().collect(),
        }
    }

    /// Adjacent `(near, far)` pairs, starting with the pair touching this edge.
    pub(crate) fn pairs(&self, len: usize) -> Vec<(usize, usize)> {
        match self {
            Edge::Start => (0..len.saturating_sub(1)).map(|i| (i, i + 1)).collect(),
            Edge::End => (1..len).rev().map(|i| (i, i - 1)).collect(),
        }
    }

    fn closer(&self, a: usize, b: usize) -> bool {
        match self {
            Edge::Start => a < b,
            Edge::End => a > b,
        }
    }
}

/// Find the first empty slot scanning from `edge` toward the other end.
pub(crate) fn first_empty_from(empties: &[bool], edge: Edge) -> Option<usize> {
    edge.scan(empties.len()).into_iter().find(|i| empties[*i])
}

/// Compact the occupied cells of `line` toward the target index `to`, keeping their order.
/// Returns how many cells changed position.
pub(crate) fn shift<L: Line + ?Sized>(line: &mut L, to: usize) -> Result<usize> {
    let len = line.len();
    let edge = Edge::from_target(to, len)?;
    let mut empties = vec![false; len];
    let mut moves = 0usize;

    for pos in edge.scan(len) {
        if !line.cell(pos).occupied() {
            empties[pos] = true;
            continue;
        }
        match first_empty_from(&empties, edge) {
            Some(slot) if edge.closer(slot, pos) => {
                line.swap_state(pos, slot);
                empties[slot] = false;
                empties[pos] = true;
                moves += 1;
            }
            _ => (),
        }
    }
    Ok(moves)
}
