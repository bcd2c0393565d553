//! Guest effect code parsing module
//!
//! This module handles parsing effect codes like
//! "end_combat|get_item|1-3|50:10^50:20-22" into typed descriptors.

mod ast;
pub mod cache;
pub mod parser;

#[cfg(test)]
mod property_tests;

pub use ast::*;
pub use cache::*;
pub use parser::*;
