//! CLI command implementations.

pub mod inspect;
pub mod play;
pub mod rounds;
