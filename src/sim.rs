use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::{error::Result, pos, wrap, Pos, World};

/// Offsets of the 3x3 window around a cell. The centre sits at index 4 and
/// is skipped by index when counting, so a tiny torus where a neighbour wraps
/// onto the cell itself still counts that neighbour.
const WINDOW: [Pos; 9] = [
    pos!(-1, -1),
    pos!(0, -1),
    pos!(1, -1),
    pos!(-1, 0),
    pos!(0, 0),
    pos!(1, 0),
    pos!(-1, 1),
    pos!(0, 1),
    pos!(1, 1),
];
const CENTER: usize = 4;

/// The B3/S23 transition for a single cell.
pub fn transition(alive: bool, neighbor_count: usize) -> bool {
    matches!((alive, neighbor_count), (_, 3) | (true, 2))
}

/// Live cells among the eight wrapped neighbours of `pos` in `world`.
pub fn count_neighbors<W>(world: &W, pos: Pos) -> usize
where
    W: World,
{
    // resolve first so the offsets below cannot overflow
    let (width, height) = world.size();
    let center = pos!(wrap(pos.x, width) as i32, wrap(pos.y, height) as i32);
    WINDOW
        .iter()
        .enumerate()
        .filter(|(index, _)| *index != CENTER)
        .filter(|(_, offset)| world.get(center + **offset))
        .count()
}

/// A cell whose state differs between the previous and the current generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Change {
    pub pos: Pos,
    /// `true` if the cell was born, `false` if it died.
    pub alive: bool,
}

/// Game of life engine over a double-buffered pair of worlds.
///
/// `worlds[current]` is the authoritative generation, the other buffer holds
/// the generation before the last [`Sim::step`] until the next one overwrites
/// it. The engine holds no synchronisation: callers serialise steps and edits.
#[derive(Debug, Clone)]
pub struct Sim<W>
where
    W: World,
{
    worlds: [W; 2],
    current: usize,
    generation: u64,
}

impl<W> Sim<W>
where
    W: World,
{
    /// An engine where every cell is dead.
    pub fn empty(width: usize, height: usize) -> Result<Self> {
        let worlds = [W::new(width, height)?, W::new(width, height)?];
        Ok(Self {
            worlds,
            current: 0,
            generation: 0,
        })
    }

    /// An engine whose current generation is filled by `rng`.
    pub fn new<R>(width: usize, height: usize, rng: &mut R) -> Result<Self>
    where
        R: Rng + ?Sized,
    {
        let mut sim = Self::empty(width, height)?;
        sim.worlds[sim.current].fill_random(rng);
        Ok(sim)
    }

    pub fn with_seed(width: usize, height: usize, seed: u64) -> Result<Self> {
        Self::new(width, height, &mut StdRng::seed_from_u64(seed))
    }

    pub fn size(&self) -> (usize, usize) {
        self.current().size()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn current(&self) -> &W {
        &self.worlds[self.current]
    }

    pub fn previous(&self) -> &W {
        &self.worlds[1 - self.current]
    }

    pub fn is_alive(&self, pos: Pos) -> bool {
        self.current().get(pos)
    }

    pub fn was_alive(&self, pos: Pos) -> bool {
        self.previous().get(pos)
    }

    pub fn neighbor_count(&self, pos: Pos) -> usize {
        count_neighbors(self.current(), pos)
    }

    /// The state `pos` will have after the next step.
    pub fn next_state(&self, pos: Pos) -> bool {
        transition(self.is_alive(pos), self.neighbor_count(pos))
    }

    pub fn population(&self) -> usize {
        self.current().actives().len()
    }

    /// Advances one generation.
    ///
    /// Every cell of the scratch buffer is rewritten from the current
    /// generation before the two swap roles, so no cell reads a value computed
    /// earlier in the same pass.
    pub fn step(&mut self) {
        let (width, height) = self.size();
        let [first, second] = &mut self.worlds;
        let (current, next) = match self.current {
            0 => (&*first, second),
            _ => (&*second, first),
        };

        for y in 0..height as i32 {
            for x in 0..width as i32 {
                let pos = pos!(x, y);
                let alive = transition(current.get(pos), count_neighbors(current, pos));
                next.set(pos, alive);
            }
        }

        self.current = 1 - self.current;
        self.generation += 1;
        log::trace!(
            "generation {} population {}",
            self.generation,
            self.population()
        );
    }

    /// Cells whose state differs from the previous generation, in raster order.
    pub fn changes(&self) -> impl Iterator<Item = Change> + '_ {
        let (width, height) = self.size();
        (0..height as i32)
            .flat_map(move |y| (0..width as i32).map(move |x| pos!(x, y)))
            .filter_map(move |pos| {
                let alive = self.is_alive(pos);
                (alive != self.was_alive(pos)).then_some(Change { pos, alive })
            })
    }

    /// Writes straight into the current generation, bypassing the rule.
    pub fn set_cell(&mut self, pos: Pos, alive: bool) {
        self.worlds[self.current].set(pos, alive);
    }

    pub fn place(&mut self, cells: impl IntoIterator<Item = Pos>) {
        for pos in cells {
            self.set_cell(pos, true);
        }
    }

    /// Kills every cell, in the previous generation too so that no stale
    /// deaths are reported afterwards.
    pub fn clear_all(&mut self) {
        for world in self.worlds.iter_mut() {
            world.clear();
        }
    }
}
