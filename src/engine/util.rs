use rand::seq::SliceRandom;
use rand::Rng;

use super::board::Board;
use super::cell::{Card, Idx};
use super::error::{EngineError, Result};
use super::merge::has_possible_merge;

/// Pick an unoccupied cell uniformly at random. Only the returned position is meaningful to the
/// caller.
pub(crate) fn random_empty_cell<R: Rng + ?Sized>(board: &Board, rng: &mut R) -> Result<Idx> {
    if board.rows() == 0 {
        return Err(EngineError::NoGrid);
    }
    let empties: Vec<Idx> = board
        .iter()
        .filter(|c| !c.occupied())
        .map(|c| c.idx())
        .collect();
    empties.choose(rng).copied().ok_or(EngineError::BoardFull)
}

pub(crate) fn has_empty_cell(board: &Board) -> bool {
    board.iter().any(|c| !c.occupied())
}

pub(crate) fn is_game_over(board: &Board) -> bool {
    !has_empty_cell(board) && !has_possible_merge(board)
}

pub(crate) fn is_game_won(board: &Board, target: Card) -> bool {
    board.iter().any(|c| c.occupied() && c.value() >= target)
}

#[cfg(test)]
mod test {
    use std::collections::HashMap;

    use rand::rngs::SmallRng;
    use rand::SeedableRng;
    use rstest::*;

    use super::*;

    fn rng() -> SmallRng {
        SmallRng::seed_from_u64(42)
    }

    fn board(values: [[Card; 4]; 4]) -> Board {
        let rows: Vec<Vec<Card>> = values.iter().map(|r| r.to_vec()).collect();
        Board::from_values(&rows)
    }

    #[test]
    fn random_empty_cell_only_picks_empty_cells() {
        let b = board([[2, 0, 4, 8], [16, 32, 0, 64], [2, 4, 8, 16], [32, 64, 128, 0]]);
        let mut rng = rng();
        for _ in 0..200 {
            let idx = random_empty_cell(&b, &mut rng).expect("board has empty cells");
            assert!([Idx(0, 1), Idx(1, 2), Idx(3, 3)].contains(&idx), "picked {}", idx);
        }
    }

    #[test]
    fn random_empty_cell_is_uniform() {
        let b = Board::new(4);
        let mut rng = rng();
        let trials = 32_000;
        let mut counts: HashMap<Idx, usize> = HashMap::new();
        for _ in 0..trials {
            let idx = random_empty_cell(&b, &mut rng).expect("empty board");
            *counts.entry(idx).or_default() += 1;
        }
        assert_eq!(counts.len(), 16, "every cell must be reachable");
        let expected = trials / 16;
        for (idx, count) in counts {
            let deviation = (count as f64 - expected as f64).abs() / expected as f64;
            assert!(deviation < 0.15, "{} picked {} times", idx, count);
        }
    }

    #[test]
    fn random_empty_cell_on_full_board() {
        let b = board([[2, 4, 2, 4], [4, 2, 4, 2], [2, 4, 2, 4], [4, 2, 4, 2]]);
        assert_eq!(random_empty_cell(&b, &mut rng()), Err(EngineError::BoardFull));
    }

    #[test]
    fn random_empty_cell_without_grid() {
        let b = Board::new(0);
        assert_eq!(random_empty_cell(&b, &mut rng()), Err(EngineError::NoGrid));
    }

    #[rstest]
    #[case::empty(
        [[0, 0, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
        false,
    )]
    #[case::one_gap(
        [[2, 4, 2, 4], [4, 2, 4, 2], [2, 4, 0, 4], [4, 2, 4, 2]],
        false,
    )]
    #[case::full_locked(
        [[2, 4, 2, 4], [4, 2, 4, 2], [2, 4, 2, 4], [4, 2, 4, 2]],
        true,
    )]
    #[case::full_with_row_merge(
        [[2, 4, 2, 4], [4, 2, 4, 2], [2, 4, 4, 8], [4, 2, 8, 2]],
        false,
    )]
    #[case::full_with_column_merge(
        [[2, 4, 2, 4], [4, 2, 4, 2], [2, 4, 2, 16], [4, 2, 4, 16]],
        false,
    )]
    fn game_over(#[case] values: [[Card; 4]; 4], #[case] expected: bool) {
        assert_eq!(is_game_over(&board(values)), expected);
    }

    #[rstest]
    #[case::fresh([[2, 0, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]], false)]
    #[case::almost([[1024, 1024, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]], false)]
    #[case::reached([[2, 4, 0, 0], [0, 2048, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]], true)]
    #[case::reached_on_locked_board(
        [[2, 4, 2, 4], [4, 2, 4, 2], [2, 4, 2, 4], [4, 2, 4, 2048]],
        true,
    )]
    fn game_won(#[case] values: [[Card; 4]; 4], #[case] expected: bool) {
        assert_eq!(is_game_won(&board(values), 2048), expected);
    }
}
