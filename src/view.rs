use std::{
    io::{stdin, stdout, Write},
    sync::mpsc,
    thread,
    time::{Duration, Instant},
};

use anyhow::Context;
use termion::{
    cursor,
    event::{Event, Key, MouseButton, MouseEvent},
    input::{MouseTerminal, TermRead},
    raw::IntoRawMode,
    screen::AlternateScreen,
    style,
};
use torlife::{Sim, World};

use crate::config::Config;

use canvas::Canvas;
mod canvas;

pub use controls::{Brush, Controls, InputCmd, Redraw};
mod controls;

const FRAME_INTERVAL: Duration = Duration::from_millis(10);

fn decode(event: Event) -> Option<InputCmd> {
    let command = match event {
        Event::Key(Key::Esc | Key::Char('q')) => InputCmd::Exit,
        Event::Key(Key::Char(' ')) => InputCmd::TogglePause,
        Event::Key(Key::Char('c')) => InputCmd::Clear,
        Event::Mouse(MouseEvent::Press(MouseButton::Left, col, row)) => {
            InputCmd::Press(Brush::Add, col, row)
        }
        Event::Mouse(MouseEvent::Press(MouseButton::Right, col, row)) => {
            InputCmd::Press(Brush::Remove, col, row)
        }
        Event::Mouse(MouseEvent::Hold(col, row)) => InputCmd::Drag(col, row),
        Event::Mouse(MouseEvent::Release(_, _)) => InputCmd::Release,
        _ => return None,
    };
    Some(command)
}

fn input_loop(sender: mpsc::Sender<InputCmd>) {
    for event in stdin().events() {
        let event = match event {
            Ok(event) => event,
            Err(error) => {
                log::error!("stopped reading input: {error}");
                break;
            }
        };
        if let Some(command) = decode(event) {
            if sender.send(command).is_err() {
                break;
            }
        }
    }
}

/// Runs the simulation in the terminal until the user quits.
///
/// Input is read on its own thread and forwarded here; the simulation is only
/// ever touched from this loop.
pub fn run<W>(mut sim: Sim<W>, config: &Config, seed: u64) -> anyhow::Result<()>
where
    W: World,
{
    let raw = stdout()
        .into_raw_mode()
        .context("could not switch the terminal to raw mode")?;
    let mut screen = AlternateScreen::from(MouseTerminal::from(raw));
    write!(screen, "{}", cursor::Hide)?;

    let viewport = termion::terminal_size().context("could not read the terminal size")?;
    let mut canvas = Canvas::new(screen, config.cell_width, viewport, seed.wrapping_add(1));
    let mut controls = Controls::new(config.interval(), config.cell_width);

    let (sender, receiver) = mpsc::channel();
    let _input_handle = thread::spawn(move || input_loop(sender));

    canvas.paint_all(&sim)?;
    canvas.flush()?;

    let mut last_frame = Instant::now();
    while !controls.quit() {
        for command in receiver.try_iter() {
            match controls.apply(command, &mut sim) {
                Some(Redraw::All) => canvas.paint_all(&sim)?,
                Some(Redraw::Cell(change)) => canvas.paint(change)?,
                None => (),
            }
        }

        let now = Instant::now();
        if controls.tick(now - last_frame) {
            sim.step();
            canvas.paint_changes(&sim)?;
        }
        last_frame = now;

        canvas.flush()?;
        thread::sleep(FRAME_INTERVAL);
    }

    log::info!("quitting at generation {}", sim.generation());
    let mut screen = canvas.into_inner();
    write!(screen, "{}{}", style::Reset, cursor::Show)?;
    screen.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_keys() {
        assert_eq!(decode(Event::Key(Key::Esc)), Some(InputCmd::Exit));
        assert_eq!(decode(Event::Key(Key::Char('q'))), Some(InputCmd::Exit));
        assert_eq!(
            decode(Event::Key(Key::Char(' '))),
            Some(InputCmd::TogglePause)
        );
        assert_eq!(decode(Event::Key(Key::Char('c'))), Some(InputCmd::Clear));
        assert_eq!(decode(Event::Key(Key::Char('x'))), None);
    }

    #[test]
    fn decodes_mouse() {
        assert_eq!(
            decode(Event::Mouse(MouseEvent::Press(MouseButton::Left, 3, 4))),
            Some(InputCmd::Press(Brush::Add, 3, 4))
        );
        assert_eq!(
            decode(Event::Mouse(MouseEvent::Press(MouseButton::Right, 1, 1))),
            Some(InputCmd::Press(Brush::Remove, 1, 1))
        );
        assert_eq!(
            decode(Event::Mouse(MouseEvent::Hold(8, 2))),
            Some(InputCmd::Drag(8, 2))
        );
        assert_eq!(
            decode(Event::Mouse(MouseEvent::Release(8, 2))),
            Some(InputCmd::Release)
        );
        assert_eq!(
            decode(Event::Mouse(MouseEvent::Press(MouseButton::WheelUp, 1, 1))),
            None
        );
    }
}
