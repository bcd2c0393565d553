//! Battle reward collection and display naming

mod accumulator;

pub use accumulator::*;
