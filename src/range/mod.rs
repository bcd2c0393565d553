//! Weighted range sets
//!
//! This module handles range specs like "1-3,5,10-12": comma separated single
//! values and inclusive ranges, sampled uniformly over every integer they cover.

mod weighted_set;


pub use weighted_set::*;
