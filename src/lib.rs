//! Conway's game of life on a fixed-size torus.
//!
//! [`ToroidalGrid`] stores the cells and resolves any integer coordinate by
//! wrapping it around the edges. [`Sim`] keeps two of them, steps the current
//! one into the other under the B3/S23 rule and swaps, leaving the previous
//! generation readable so a front-end can repaint only what changed.

pub use utils::Pos;
mod utils;

pub use error::{Error, Result};
mod error;

pub use world::{wrap, ToroidalGrid, World};
pub mod world;

pub use sim::{count_neighbors, transition, Change, Sim};
pub mod sim;
