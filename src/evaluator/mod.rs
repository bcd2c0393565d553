//! Guest effect evaluation module

mod engine;
pub mod selection;
mod session;

#[cfg(test)]
mod property_tests;

pub use engine::*;
pub use selection::*;
pub use session::*;
