use super::board::{Board, Line};
use super::error::{EngineError, Result};
use super::merge::{merge, Score};
use super::shift::shift;

/// Direction represents the direction indicated by the player.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) enum Direction {
    #[default]
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    fn is_horizontal(&self) -> bool {
        matches!(self, Self::Left | Self::Right)
    }

    /// Target index of a line of length `len` when moving in this direction.
    fn target(&self, len: usize) -> usize {
        match self {
            Self::Left | Self::Up => 0,
            Self::Right | Self::Down => len.saturating_sub(1),
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Left => "left",
            Self::Right => "right",
            Self::Up => "up",
            Self::Down => "down",
        };
        write!(f, "{}", s)
    }
}

/// Movement is the outcome of moving the whole board in one direction.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct Movement {
    pub(crate) moves: usize,
    pub(crate) score: Score,
}

impl Movement {
    pub(crate) fn changed(&self) -> bool {
        self.moves > 0
    }
}

impl std::ops::AddAssign for Movement {
    fn add_assign(&mut self, other: Self) {
        self.moves += other.moves;
        self.score += other.score;
    }
}

/// Shift, merge and re-shift one line toward `to`. The re-shift closes the gaps left behind by
/// merges, so `[2, 2, 2, 2]` toward 0 ends as `[4, 4, 0, 0]`.
pub(crate) fn move_line<L: Line + ?Sized>(line: &mut L, to: usize) -> Result<Movement> {
    let mut moves = shift(line, to)?;
    let merged = merge(line, to)?;
    if merged.merges > 0 {
        moves += merged.merges;
        moves += shift(line, to)?;
    }
    Ok(Movement {
        moves,
        score: merged.score,
    })
}

/// Move every line of the board in `direction`. A line that can't be moved contributes nothing
/// and the rest of the board is still moved.
pub(crate) fn move_board(board: &mut Board, direction: &Direction) -> Movement {
    let mut total = Movement::default();
    if direction.is_horizontal() {
        for row in 0..board.rows() {
            let Some(line) = board.row_mut(row) else {
                continue;
            };
            let to = direction.target(line.len());
            total += absorb(move_line(line, to), direction);
        }
    } else {
        for col in 0..board.cols() {
            let result = board.column_mut(col).and_then(|mut line| {
                let to = direction.target(line.len());
                move_line(&mut line, to)
            });
            total += absorb(result, direction);
        }
    }
    log::debug!(
        "moved {}: {} moves, {} points",
        direction,
        total.moves,
        total.score
    );
    log::trace!("board after moving {}:\n{}", direction, board);
    total
}

fn absorb(result: Result<Movement>, direction: &Direction) -> Movement {
    match result {
        Ok(m) => m,
        Err(e) if e.is_structural() => {
            log::error!("skipping line while moving {}: {}", direction, e);
            Movement::default()
        }
        Err(e @ EngineError::LineTooShort(_)) | Err(e @ EngineError::InvalidEdge { .. }) => {
            log::trace!("skipping line while moving {}: {}", direction, e);
            Movement::default()
        }
        Err(e) => {
            log::warn!("unexpected error while moving {}: {}", direction, e);
            Movement::default()
        }
    }
}

#[cfg(test)]
impl Direction {
    pub(crate) fn all() -> [Direction; 4] {
        [
            Direction::Up,
            Direction::Right,
            Direction::Down,
            Direction::Left,
        ]
    }
}

#[cfg(test)]
mod test {
    use rstest::*;

    use super::*;
    use crate::engine::cell::Card;

    fn board(values: &[[Card; 4]; 4]) -> Board {
        let rows: Vec<Vec<Card>> = values.iter().map(|r| r.to_vec()).collect();
        Board::from_values(&rows)
    }

    fn values(board: &Board) -> Vec<[Card; 4]> {
        board
            .values()
            .into_iter()
            .map(|r| [r[0], r[1], r[2], r[3]])
            .collect()
    }

    #[rstest]
    #[case::identity_left(Direction::Left,
           [[2, 0, 0, 0], [0, 2, 0, 0], [0, 0, 2, 0], [0, 0, 0, 2]],
           [[2, 0, 0, 0], [2, 0, 0, 0], [2, 0, 0, 0], [2, 0, 0, 0]],
    )]
    #[case::identity_right(Direction::Right,
           [[2, 0, 0, 0], [0, 2, 0, 0], [0, 0, 2, 0], [0, 0, 0, 2]],
           [[0, 0, 0, 2], [0, 0, 0, 2], [0, 0, 0, 2], [0, 0, 0, 2]],
    )]
    #[case::identity_up(Direction::Up,
           [[2, 0, 0, 0], [0, 2, 0, 0], [0, 0, 2, 0], [0, 0, 0, 2]],
           [[2, 2, 2, 2], [0, 0, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
    )]
    #[case::identity_down(Direction::Down,
           [[2, 0, 0, 0], [0, 2, 0, 0], [0, 0, 2, 0], [0, 0, 0, 2]],
           [[0, 0, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0], [2, 2, 2, 2]],
    )]
    #[case::merge_then_close_gap_left(Direction::Left,
           [[2, 2, 4, 0], [0, 0, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
           [[4, 4, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
    )]
    #[case::four_equal_left_pairwise(Direction::Left,
           [[2, 2, 2, 2], [0, 0, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
           [[4, 4, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
    )]
    #[case::four_equal_right_pairwise(Direction::Right,
           [[2, 2, 2, 2], [0, 0, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
           [[0, 0, 4, 4], [0, 0, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
    )]
    #[case::triple_right(Direction::Right,
           [[2, 2, 2, 0], [0, 0, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
           [[0, 0, 2, 4], [0, 0, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
    )]
    #[case::column_up(Direction::Up,
           [[2, 0, 0, 0], [0, 0, 0, 0], [2, 0, 0, 0], [4, 0, 0, 0]],
           [[4, 0, 0, 0], [4, 0, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
    )]
    #[case::column_down(Direction::Down,
           [[0, 8, 0, 0], [0, 8, 0, 0], [0, 8, 0, 0], [0, 8, 0, 0]],
           [[0, 0, 0, 0], [0, 0, 0, 0], [0, 16, 0, 0], [0, 16, 0, 0]],
    )]
    fn move_whole_board(
        #[case] direction: Direction,
        #[case] initial: [[Card; 4]; 4],
        #[case] expected: [[Card; 4]; 4],
    ) {
        let mut b = board(&initial);
        let movement = move_board(&mut b, &direction);
        assert_eq!(values(&b), expected.to_vec(), "moving {}", direction);
        assert!(movement.changed(), "moving {}", direction);
    }

    #[test]
    fn pair_merge_counts_as_movement() {
        let mut b = board(&[[2, 2, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]]);
        let movement = move_board(&mut b, &Direction::Left);
        assert_eq!(values(&b)[0], [4, 0, 0, 0]);
        assert!(movement.moves >= 1);
        assert_eq!(movement.score, 4);
    }

    #[test]
    fn locked_row_does_not_move() {
        let mut b = Board::from_values(&[vec![2, 4, 2, 4]]);
        let movement = move_board(&mut b, &Direction::Left);
        assert_eq!(b.values(), vec![vec![2, 4, 2, 4]]);
        assert_eq!(movement, Movement::default());
    }

    #[test]
    fn single_row_board_skips_columns() {
        // every column of a one-row board is too short to move
        let mut b = Board::from_values(&[vec![2, 0, 2, 0]]);
        let movement = move_board(&mut b, &Direction::Up);
        assert_eq!(movement, Movement::default());
        assert_eq!(b.values(), vec![vec![2, 0, 2, 0]]);
    }

    #[test]
    fn score_accumulates_across_lines() {
        let mut b = board(&[[2, 2, 0, 0], [4, 4, 0, 0], [8, 0, 8, 0], [0, 0, 0, 0]]);
        let movement = move_board(&mut b, &Direction::Left);
        assert_eq!(movement.score, 4 + 8 + 16);
        assert_eq!(
            values(&b),
            vec![[4, 0, 0, 0], [8, 0, 0, 0], [16, 0, 0, 0], [0, 0, 0, 0]]
        );
    }

    #[test]
    fn no_op_move_in_every_direction_on_empty_board() {
        for direction in Direction::all() {
            let mut b = Board::new(4);
            assert_eq!(move_board(&mut b, &direction), Movement::default());
        }
    }

    #[rstest]
    #[case::no_grid(EngineError::NoGrid)]
    #[case::column_out_of_bounds(EngineError::ColumnOutOfBounds { col: 4, width: 4 })]
    #[case::short_line(EngineError::LineTooShort(1))]
    #[case::bad_edge(EngineError::InvalidEdge { to: 2, len: 4 })]
    fn failed_lines_contribute_nothing(#[case] err: EngineError) {
        assert_eq!(absorb(Err(err), &Direction::Down), Movement::default());
    }

    #[test]
    fn successful_lines_pass_through() {
        let m = Movement { moves: 2, score: 8 };
        assert_eq!(absorb(Ok(m), &Direction::Left), m);
    }
}
