use std::{path::PathBuf, time::Duration};

use clap::Parser;

/// conway's game of life on a torus, drawn in the terminal.
///
/// space pauses, c clears, esc or q quits. hold the left mouse button to
/// paint live cells and the right one to erase.
#[derive(Debug, Clone, Parser)]
#[command(version, about)]
pub struct Config {
    /// Grid width in cells.
    #[arg(long, default_value_t = 160)]
    pub width: usize,

    /// Grid height in cells.
    #[arg(long, default_value_t = 120)]
    pub height: usize,

    /// Terminal columns used to draw one cell.
    #[arg(long, default_value_t = 2, value_parser = clap::value_parser!(u16).range(1..))]
    pub cell_width: u16,

    /// Milliseconds between generations.
    #[arg(long, default_value_t = 100, value_parser = clap::value_parser!(u64).range(1..))]
    pub interval_ms: u64,

    /// Seed for the initial random population.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Size the grid to fill the terminal instead.
    #[arg(long, conflicts_with_all = ["width", "height"])]
    pub fit: bool,

    /// Append logs (filtered by RUST_LOG) to this file. Without it nothing
    /// is logged, since the terminal is taken by the grid.
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

impl Config {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    /// Grid dimensions, taking the terminal size in columns and rows when
    /// `--fit` is set and the size is known.
    pub fn grid_size(&self, terminal: Option<(u16, u16)>) -> (usize, usize) {
        match terminal {
            Some((cols, rows)) if self.fit => (
                usize::from(cols / self.cell_width),
                usize::from(rows),
            ),
            _ => (self.width, self.height),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn try_parse(args: &[&str]) -> Result<Config, clap::Error> {
        let argv = std::iter::once("torlife").chain(args.iter().copied());
        Config::try_parse_from(argv)
    }

    fn parse(args: &[&str]) -> Config {
        try_parse(args).unwrap()
    }

    #[test]
    fn defaults() {
        let config = parse(&[]);
        assert_eq!(config.grid_size(Some((80, 24))), (160, 120));
        assert_eq!(config.cell_width, 2);
        assert_eq!(config.interval(), Duration::from_millis(100));
        assert_eq!(config.seed, None);
        assert_eq!(config.log_file, None);
    }

    #[test]
    fn log_file_is_a_path() {
        let config = parse(&["--log-file", "/tmp/torlife.log"]);
        assert_eq!(config.log_file, Some(PathBuf::from("/tmp/torlife.log")));
    }

    #[test]
    fn fit_uses_terminal_size() {
        let config = parse(&["--fit", "--cell-width", "3"]);
        assert_eq!(config.grid_size(Some((80, 24))), (26, 24));
        assert_eq!(config.grid_size(None), (160, 120));
    }

    #[test]
    fn rejects_zero_cell_width_and_interval() {
        assert!(try_parse(&["--cell-width", "0"]).is_err());
        assert!(try_parse(&["--interval-ms", "0"]).is_err());
        assert!(try_parse(&["--fit", "--width", "10"]).is_err());
    }
}
