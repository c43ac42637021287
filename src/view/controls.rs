use std::time::Duration;

use torlife::{pos, Change, Pos, Sim, World};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Brush {
    Add,
    Remove,
}

impl Brush {
    fn alive(self) -> bool {
        matches!(self, Brush::Add)
    }
}

/// Input already decoded from the terminal. Pointer positions are the
/// terminal's 1-based column and row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputCmd {
    Exit,
    TogglePause,
    Clear,
    Press(Brush, u16, u16),
    Drag(u16, u16),
    Release,
}

/// What the canvas has to repaint after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Redraw {
    All,
    Cell(Change),
}

/// Driver state owned by the view loop: pause, quit, the active brush and the
/// fixed-timestep accumulator.
#[derive(Debug)]
pub struct Controls {
    paused: bool,
    quit: bool,
    brush: Option<Brush>,
    interval: Duration,
    elapsed: Duration,
    cell_width: u16,
}

impl Controls {
    pub fn new(interval: Duration, cell_width: u16) -> Self {
        Self {
            paused: false,
            quit: false,
            brush: None,
            interval,
            elapsed: Duration::ZERO,
            cell_width: cell_width.max(1),
        }
    }

    pub fn quit(&self) -> bool {
        self.quit
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    /// Maps a terminal position onto the grid, `None` past its right or
    /// bottom edge.
    pub fn cell_at<W>(&self, sim: &Sim<W>, col: u16, row: u16) -> Option<Pos>
    where
        W: World,
    {
        let (width, height) = sim.size();
        let x = usize::from(col.saturating_sub(1) / self.cell_width);
        let y = usize::from(row.saturating_sub(1));
        (x < width && y < height).then(|| pos!(x as i32, y as i32))
    }

    pub fn apply<W>(&mut self, cmd: InputCmd, sim: &mut Sim<W>) -> Option<Redraw>
    where
        W: World,
    {
        match cmd {
            InputCmd::Exit => {
                self.quit = true;
                None
            }
            InputCmd::TogglePause => {
                self.paused = !self.paused;
                log::debug!("paused: {}", self.paused());
                None
            }
            InputCmd::Clear => {
                sim.clear_all();
                log::debug!("cleared at generation {}", sim.generation());
                Some(Redraw::All)
            }
            InputCmd::Press(brush, col, row) => {
                self.brush = Some(brush);
                self.paint(sim, col, row)
            }
            InputCmd::Drag(col, row) => self.paint(sim, col, row),
            InputCmd::Release => {
                self.brush = None;
                None
            }
        }
    }

    fn paint<W>(&self, sim: &mut Sim<W>, col: u16, row: u16) -> Option<Redraw>
    where
        W: World,
    {
        let alive = self.brush?.alive();
        let pos = self.cell_at(sim, col, row)?;
        sim.set_cell(pos, alive);
        Some(Redraw::Cell(Change { pos, alive }))
    }

    /// Accumulates `delta` unless paused, and tells whether a generation is due.
    ///
    /// At most one interval is carried over, so frames slower than the
    /// interval do not build up a backlog of steps.
    pub fn tick(&mut self, delta: Duration) -> bool {
        if self.paused {
            return false;
        }
        self.elapsed += delta;
        if self.elapsed > self.interval {
            self.elapsed = (self.elapsed - self.interval).min(self.interval);
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use torlife::ToroidalGrid;

    const MS: Duration = Duration::from_millis(1);

    fn setup() -> (Controls, Sim<ToroidalGrid>) {
        (Controls::new(100 * MS, 2), Sim::empty(10, 5).unwrap())
    }

    #[test]
    fn tick_steps_on_a_fixed_interval() {
        let (mut controls, _) = setup();
        assert!(!controls.tick(60 * MS));
        assert!(!controls.tick(40 * MS));
        assert!(controls.tick(30 * MS));
        // 30ms carried over
        assert!(!controls.tick(60 * MS));
        assert!(controls.tick(20 * MS));
    }

    #[test]
    fn pause_stops_the_clock() {
        let (mut controls, mut sim) = setup();
        controls.apply(InputCmd::TogglePause, &mut sim);
        assert!(controls.paused());
        assert!(!controls.tick(500 * MS));
        controls.apply(InputCmd::TogglePause, &mut sim);
        assert!(!controls.tick(50 * MS));
        assert!(controls.tick(60 * MS));
    }

    #[test]
    fn short_interval_stops_as_soon_as_paused() {
        let mut controls = Controls::new(MS, 2);
        let mut sim = Sim::<ToroidalGrid>::empty(4, 4).unwrap();
        for _ in 0..100 {
            assert!(controls.tick(10 * MS));
        }
        controls.apply(InputCmd::TogglePause, &mut sim);
        let steps = (0..1000).filter(|_| controls.tick(10 * MS)).count();
        assert_eq!(steps, 0);

        controls.apply(InputCmd::TogglePause, &mut sim);
        assert!(controls.tick(10 * MS));
    }

    #[test]
    fn pointer_maps_by_cell_width() {
        let (controls, sim) = setup();
        assert_eq!(controls.cell_at(&sim, 1, 1), Some(pos!(0, 0)));
        assert_eq!(controls.cell_at(&sim, 2, 1), Some(pos!(0, 0)));
        assert_eq!(controls.cell_at(&sim, 3, 2), Some(pos!(1, 1)));
        assert_eq!(controls.cell_at(&sim, 20, 5), Some(pos!(9, 4)));
        assert_eq!(controls.cell_at(&sim, 21, 5), None);
        assert_eq!(controls.cell_at(&sim, 1, 6), None);
    }

    #[test]
    fn brush_paints_until_released() {
        let (mut controls, mut sim) = setup();

        let redraw = controls.apply(InputCmd::Press(Brush::Add, 5, 3), &mut sim);
        assert_eq!(
            redraw,
            Some(Redraw::Cell(Change {
                pos: pos!(2, 2),
                alive: true
            }))
        );
        controls.apply(InputCmd::Drag(7, 3), &mut sim);
        assert!(sim.is_alive(pos!(2, 2)));
        assert!(sim.is_alive(pos!(3, 2)));

        controls.apply(InputCmd::Release, &mut sim);
        assert_eq!(controls.apply(InputCmd::Drag(9, 3), &mut sim), None);
        assert!(!sim.is_alive(pos!(4, 2)));

        controls.apply(InputCmd::Press(Brush::Remove, 5, 3), &mut sim);
        assert!(!sim.is_alive(pos!(2, 2)));
        assert_eq!(sim.population(), 1);
    }

    #[test]
    fn drag_outside_the_grid_is_ignored() {
        let (mut controls, mut sim) = setup();
        controls.apply(InputCmd::Press(Brush::Add, 40, 40), &mut sim);
        assert_eq!(sim.population(), 0);
    }

    #[test]
    fn clear_and_exit() {
        let (mut controls, mut sim) = setup();
        sim.set_cell(pos!(1, 1), true);
        assert_eq!(controls.apply(InputCmd::Clear, &mut sim), Some(Redraw::All));
        assert_eq!(sim.population(), 0);

        assert!(!controls.quit());
        controls.apply(InputCmd::Exit, &mut sim);
        assert!(controls.quit());
    }
}
