use std::io::{self, Write};

use rand::{rngs::StdRng, Rng, SeedableRng};
use termion::{clear, color, cursor};
use torlife::{Change, Pos, Sim, World};

const BACKGROUND: color::Rgb = color::Rgb(0xFF, 0xFF, 0xFF);

/// Paints cells onto a terminal-like writer, one cell being `cell_width`
/// columns by one row. Cells past the `cols`x`rows` viewport are skipped.
pub struct Canvas<Out>
where
    Out: Write,
{
    out: Out,
    cell_width: u16,
    cols: u16,
    rows: u16,
    rng: StdRng,
}

impl<Out> Canvas<Out>
where
    Out: Write,
{
    pub fn new(out: Out, cell_width: u16, (cols, rows): (u16, u16), seed: u64) -> Self {
        Self {
            out,
            cell_width: cell_width.max(1),
            cols,
            rows,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Top-left terminal position of a cell, if it fits on screen.
    fn origin(&self, Pos { x, y }: Pos) -> Option<(u16, u16)> {
        let col = u16::try_from(x).ok()?.checked_mul(self.cell_width)?;
        let row = u16::try_from(y).ok()?;
        let fits = col.checked_add(self.cell_width)? <= self.cols && row < self.rows;
        fits.then_some((col + 1, row + 1))
    }

    /// Newly born cells get a random colour, dead ones the background.
    pub fn paint(&mut self, Change { pos, alive }: Change) -> io::Result<()> {
        let Some((col, row)) = self.origin(pos) else {
            return Ok(());
        };
        let fill = if alive {
            color::Rgb(
                self.rng.gen_range(0..0xFF),
                self.rng.gen_range(0..0xFF),
                self.rng.gen_range(0..0xFF),
            )
        } else {
            BACKGROUND
        };
        let blank = " ".repeat(usize::from(self.cell_width));
        write!(
            self.out,
            "{}{}{blank}",
            cursor::Goto(col, row),
            color::Bg(fill)
        )
    }

    pub fn paint_changes<W>(&mut self, sim: &Sim<W>) -> io::Result<()>
    where
        W: World,
    {
        for change in sim.changes() {
            self.paint(change)?;
        }
        Ok(())
    }

    /// Wipes the screen to the background and paints every live cell.
    pub fn paint_all<W>(&mut self, sim: &Sim<W>) -> io::Result<()>
    where
        W: World,
    {
        write!(self.out, "{}{}", color::Bg(BACKGROUND), clear::All)?;
        for pos in sim.current().actives() {
            self.paint(Change { pos, alive: true })?;
        }
        Ok(())
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }

    pub fn into_inner(self) -> Out {
        self.out
    }
}
