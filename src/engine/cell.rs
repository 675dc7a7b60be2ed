use super::animation::Animation;

/// A tile value. Zero marks an empty cell.
pub(crate) type Card = u32;

/// Idx is the fixed (row, col) position of a cell on the board.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub(crate) struct Idx(pub(crate) usize, pub(crate) usize);

impl std::fmt::Display for Idx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "idx({0},{1})", self.0, self.1)
    }
}

impl Idx {
    #[inline(always)]
    pub(crate) fn row(&self) -> usize {
        self.0
    }

    #[inline(always)]
    pub(crate) fn col(&self) -> usize {
        self.1
    }
}

/// Cell is one grid position. Its `Idx` never changes; shifting and merging move the value and
/// occupied state between cells instead.
///
/// `occupied` is tracked separately from `value` so that a cell can act as an empty placeholder
/// while a spawn animation bound to it is still running.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Cell {
    idx: Idx,
    value: Card,
    occupied: bool,
    animation: Option<Animation>,
}

impl Cell {
    pub(crate) fn new(idx: Idx) -> Self {
        Self {
            idx,
            value: 0,
            occupied: false,
            animation: None,
        }
    }

    pub(crate) fn idx(&self) -> Idx {
        self.idx
    }

    pub(crate) fn value(&self) -> Card {
        self.value
    }

    pub(crate) fn occupied(&self) -> bool {
        self.occupied
    }

    /// Place a tile with the given value; zero empties the cell.
    pub(crate) fn set(&mut self, value: Card) {
        self.value = value;
        self.occupied = value > 0;
    }

    pub(crate) fn clear(&mut self) {
        self.value = 0;
        self.occupied = false;
    }

    pub(crate) fn state(&self) -> (Card, bool) {
        (self.value, self.occupied)
    }

    pub(crate) fn set_state(&mut self, (value, occupied): (Card, bool)) {
        self.value = value;
        self.occupied = occupied;
    }

    pub(crate) fn animation(&self) -> Option<&Animation> {
        self.animation.as_ref()
    }

    pub(crate) fn animation_mut(&mut self) -> Option<&mut Animation> {
        self.animation.as_mut()
    }

    /// Empty the cell and bind a spawn animation to it. The cell stays unoccupied until the
    /// animation is committed.
    pub(crate) fn attach(&mut self, animation: Animation) {
        self.clear();
        self.animation = Some(animation);
    }

    pub(crate) fn detach(&mut self) -> Option<Animation> {
        self.animation.take()
    }

    /// Reset the cell to empty, dropping any animation bound to it.
    pub(crate) fn reset(&mut self) {
        self.clear();
        self.animation = None;
    }
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.occupied {
            write!(f, "{}", self.value)
        } else {
            write!(f, "_")
        }
    }
}
