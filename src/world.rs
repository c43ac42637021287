use rand::Rng;

use crate::{error::Result, Pos};

/// A fixed-size field of alive/dead cells.
///
/// Every integer position addresses exactly one cell; implementations resolve
/// out-of-range coordinates themselves instead of failing.
pub trait World: Sized + Clone {
    fn new(width: usize, height: usize) -> Result<Self>;
    fn size(&self) -> (usize, usize);
    fn get(&self, pos: Pos) -> bool;
    fn set(&mut self, pos: Pos, alive: bool);
    fn clear(&mut self);

    /// Sets every cell alive or dead with equal probability.
    fn fill_random<R>(&mut self, rng: &mut R)
    where
        R: Rng + ?Sized;

    /// Positions of live cells, in raster order.
    fn actives(&self) -> Vec<Pos>;
}

pub use toroidal_grid::{wrap, ToroidalGrid};
mod toroidal_grid;
