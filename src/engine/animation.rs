use super::cell::{Card, Cell, Idx};
use super::error::{EngineError, Result};

/// Value of every tile placed by a spawn.
pub(crate) const SPAWN_VALUE: Card = 2;

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) enum AnimationStatus {
    #[default]
    Created,
    Running,
    Finished,
}

impl std::fmt::Display for AnimationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Created => "created",
            Self::Running => "running",
            Self::Finished => "finished",
        };
        write!(f, "{}", s)
    }
}

/// Animation kinds that can be bound to a cell. Each kind knows how to advance one tick and what
/// logical state to commit to its cell once finished.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Animation {
    Create(CreateAnimation),
}

impl Animation {
    /// A grow-in animation for a tile spawned at `idx`.
    pub(crate) fn create(idx: Idx, tile_size: u32, duration: u32) -> Self {
        Self::Create(CreateAnimation::new(idx, tile_size, duration))
    }

    pub(crate) fn status(&self) -> AnimationStatus {
        match self {
            Self::Create(a) => a.status,
        }
    }

    pub(crate) fn is_finished(&self) -> bool {
        self.status() == AnimationStatus::Finished
    }

    pub(crate) fn step(&mut self) -> Result<()> {
        match self {
            Self::Create(a) => a.step(),
        }
    }

    /// Fraction of the animation completed, in `0.0..=1.0`.
    pub(crate) fn progress(&self) -> f32 {
        match self {
            Self::Create(a) => a.progress(),
        }
    }

    /// Commit the logical state the animation stands for to its cell.
    pub(crate) fn on_finish(&self, cell: &mut Cell) {
        match self {
            Self::Create(_) => cell.set(SPAWN_VALUE),
        }
    }
}

/// CreateAnimation grows a new tile from half of its size to full size.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct CreateAnimation {
    idx: Idx,
    status: AnimationStatus,
    duration: u32,
    elapsed: u32,
    starting_size: u32,
    target_size: u32,
    current_size: u32,
    step: u32,
}

impl CreateAnimation {
    pub(crate) fn new(idx: Idx, tile_size: u32, duration: u32) -> Self {
        let starting_size = tile_size / 2;
        let target_size = tile_size;
        // rounding up keeps the animation within its duration; the floor of 1 keeps it moving
        // when the size difference is smaller than the duration
        let step = (target_size - starting_size)
            .div_ceil(duration.max(1))
            .max(1);
        Self {
            idx,
            status: AnimationStatus::Created,
            duration,
            elapsed: 0,
            starting_size,
            target_size,
            current_size: starting_size,
            step,
        }
    }

    pub(crate) fn step(&mut self) -> Result<()> {
        if self.status == AnimationStatus::Finished {
            return Err(EngineError::AnimationFinished(self.idx));
        }

        self.status = AnimationStatus::Running;
        self.elapsed += 1;
        self.current_size = (self.current_size + self.step).min(self.target_size);
        if self.current_size >= self.target_size {
            self.status = AnimationStatus::Finished;
        }
        log::trace!(
            "create animation at {} step {}/{} size {}",
            self.idx,
            self.elapsed,
            self.duration,
            self.current_size
        );
        Ok(())
    }

    pub(crate) fn current_size(&self) -> u32 {
        self.current_size
    }

    fn progress(&self) -> f32 {
        let span = self.target_size - self.starting_size;
        if span == 0 {
            return 1.0;
        }
        (self.current_size - self.starting_size) as f32 / span as f32
    }
}

#[cfg(test)]
impl CreateAnimation {
    pub(crate) fn target_size(&self) -> u32 {
        self.target_size
    }
}
