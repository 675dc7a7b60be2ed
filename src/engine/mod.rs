pub(crate) mod animation;
pub(crate) mod board;
pub(crate) mod cell;
pub(crate) mod error;
pub(crate) mod merge;
pub(crate) mod movement;
pub(crate) mod session;
pub(crate) mod shift;
pub(crate) mod util;
