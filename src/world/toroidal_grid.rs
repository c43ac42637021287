use rand::Rng;

use crate::{
    error::{Error, Result},
    pos, Pos, World,
};

/// A world whose opposite edges are glued together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToroidalGrid {
    width: usize,
    height: usize,
    cells: Vec<bool>,
}

impl ToroidalGrid {
    fn index(&self, Pos { x, y }: Pos) -> usize {
        wrap(y, self.height) * self.width + wrap(x, self.width)
    }
}

/// Resolves `n` into `[0, len)` in one step, negative values included.
///
/// `len` must be non-zero and fit in an `i32`, which `ToroidalGrid::new` checks.
pub fn wrap(n: i32, len: usize) -> usize {
    n.rem_euclid(len as i32) as usize
}

impl World for ToroidalGrid {
    fn new(width: usize, height: usize) -> Result<Self> {
        let fits = |len: usize| len > 0 && i32::try_from(len).is_ok();
        if !fits(width) || !fits(height) {
            return Err(Error::InvalidDimensions { width, height });
        }
        let cells = vec![false; width * height];
        Ok(Self {
            width,
            height,
            cells,
        })
    }

    fn size(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    fn get(&self, pos: Pos) -> bool {
        self.cells[self.index(pos)]
    }

    fn set(&mut self, pos: Pos, alive: bool) {
        let index = self.index(pos);
        self.cells[index] = alive;
    }

    fn clear(&mut self) {
        self.cells.fill(false);
    }

    fn fill_random<R>(&mut self, rng: &mut R)
    where
        R: Rng + ?Sized,
    {
        for cell in self.cells.iter_mut() {
            *cell = rng.gen_bool(0.5);
        }
    }

    fn actives(&self) -> Vec<Pos> {
        let width = self.width;
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, alive)| **alive)
            .map(|(i, _)| pos!((i % width) as i32, (i / width) as i32))
            .collect()
    }
}

#[test]
fn test_wrap() {
    assert_eq!(wrap(0, 10), 0);
    assert_eq!(wrap(9, 10), 9);
    assert_eq!(wrap(10, 10), 0);
    assert_eq!(wrap(-1, 10), 9);
    assert_eq!(wrap(-10, 10), 0);
    assert_eq!(wrap(-11, 10), 9);
    assert_eq!(wrap(i32::MIN, 10), 2);
    assert_eq!(wrap(i32::MAX, 10), 7);
}

#[test]
fn test_new_rejects_empty_dimensions() {
    assert_eq!(
        ToroidalGrid::new(0, 5),
        Err(Error::InvalidDimensions {
            width: 0,
            height: 5
        })
    );
    assert!(ToroidalGrid::new(5, 0).is_err());
    assert!(ToroidalGrid::new(1, 1).is_ok());
}

#[test]
fn test_new_is_all_dead() {
    let grid = ToroidalGrid::new(16, 9).unwrap();
    assert_eq!(grid.size(), (16, 9));
    assert!(grid.actives().is_empty());
}

#[test]
fn test_get_wraps_any_multiple() {
    let mut grid = ToroidalGrid::new(7, 5).unwrap();
    grid.set(pos!(3, 2), true);
    for k in [-1_000_000, -3, -1, 0, 1, 2, 1_000_000] {
        assert!(grid.get(pos!(3 + k * 7, 2)));
        assert!(grid.get(pos!(3, 2 + k * 5)));
        assert!(!grid.get(pos!(4 + k * 7, 2)));
    }
}

#[test]
fn test_set_wraps() {
    let mut grid = ToroidalGrid::new(4, 3).unwrap();
    grid.set(pos!(4, 0), true);
    grid.set(pos!(-1, -1), true);
    assert_eq!(grid.actives(), vec![pos!(0, 0), pos!(3, 2)]);
}

#[test]
fn test_clear() {
    let mut grid = ToroidalGrid::new(4, 4).unwrap();
    grid.set(pos!(1, 1), true);
    grid.set(pos!(2, 3), true);
    grid.clear();
    assert!(grid.actives().is_empty());
}

#[test]
fn test_fill_random_is_seeded() {
    use rand::{rngs::StdRng, SeedableRng};

    let mut a = ToroidalGrid::new(32, 32).unwrap();
    let mut b = ToroidalGrid::new(32, 32).unwrap();
    a.fill_random(&mut StdRng::seed_from_u64(7));
    b.fill_random(&mut StdRng::seed_from_u64(7));
    assert_eq!(a, b);

    // 1024 fair coin flips land far from both extremes
    let alive = a.actives().len();
    assert!(alive > 300 && alive < 724, "{alive}");
}
