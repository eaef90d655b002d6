//! Colour terminal rendering for the live viewer, via crossterm.

use std::io::{self, Write};
use std::thread;
use std::time::Duration;

use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    execute, queue,
    style::{Color as CtColor, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{self, ClearType},
};

use gridpath_core::{Cell, Coord, Grid, SearchTag};
use gridpath_search::{CancelToken, Visitor};

use crate::render::colour_of;

/// Terminal columns used per grid cell, so cells come out roughly square.
const CELL_WIDTH: u16 = 2;

fn to_ct_color(cell: Cell) -> CtColor {
    let (r, g, b) = colour_of(cell);
    CtColor::Rgb { r, g, b }
}

/// A key press, as the viewer understands it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Search,
    Regenerate,
    Save,
    Quit,
    Other,
}

fn to_command(code: KeyCode) -> Command {
    match code {
        KeyCode::Char(' ') | KeyCode::Enter => Command::Search,
        KeyCode::Char('c') => Command::Regenerate,
        KeyCode::Char('s') => Command::Save,
        KeyCode::Char('q') | KeyCode::Esc => Command::Quit,
        _ => Command::Other,
    }
}

/// Non-blocking: the next key press, if one is waiting.
pub fn poll_command(timeout: Duration) -> io::Result<Option<Command>> {
    while event::poll(timeout)? {
        if let Event::Key(KeyEvent {
            code,
            kind: KeyEventKind::Press,
            ..
        }) = event::read()?
        {
            return Ok(Some(to_command(code)));
        }
    }
    Ok(None)
}

/// Block until a key is pressed.
pub fn wait_command() -> io::Result<Command> {
    loop {
        if let Some(cmd) = poll_command(Duration::from_millis(250))? {
            return Ok(cmd);
        }
    }
}

/// Switch the terminal to raw mode on the alternate screen.
pub fn init(out: &mut impl Write) -> io::Result<()> {
    terminal::enable_raw_mode()?;
    execute!(
        out,
        terminal::EnterAlternateScreen,
        cursor::Hide,
        terminal::Clear(ClearType::All)
    )
}

/// Undo [`init`]. Errors are ignored: this runs on the way out.
pub fn close(out: &mut impl Write) {
    let _ = execute!(out, ResetColor, cursor::Show, terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();
}

/// Terminal position of cell `c`, or `None` if it falls outside the
/// addressable screen.
fn screen_pos(c: Coord) -> Option<(u16, u16)> {
    let x = u16::try_from(c.col).ok()?.checked_mul(CELL_WIDTH)?;
    let y = u16::try_from(c.row).ok()?;
    Some((x, y))
}

fn queue_cell(out: &mut impl Write, c: Coord, cell: Cell) -> io::Result<()> {
    let Some((x, y)) = screen_pos(c) else {
        return Ok(());
    };
    queue!(
        out,
        cursor::MoveTo(x, y),
        SetBackgroundColor(to_ct_color(cell)),
        Print("  ")
    )
}

/// Draw every cell of `grid`.
pub fn draw_grid(out: &mut impl Write, grid: &Grid) -> io::Result<()> {
    for (c, cell) in grid {
        queue_cell(out, c, cell)?;
    }
    queue!(out, ResetColor)?;
    out.flush()
}

/// Replace the status line below the grid.
pub fn draw_status(out: &mut impl Write, grid: &Grid, text: &str) -> io::Result<()> {
    queue!(
        out,
        cursor::MoveTo(0, u16::try_from(grid.rows()).unwrap_or(u16::MAX)),
        ResetColor,
        SetForegroundColor(CtColor::Grey),
        terminal::Clear(ClearType::CurrentLine),
        Print(text),
        ResetColor
    )?;
    out.flush()
}

/// A [`Visitor`] that paints each event as it happens.
///
/// Keeps its own copy of the grid so it knows each cell's role while the
/// engine holds the real one. Any key press cancels the search through the
/// token; `q` also asks the viewer to quit. Since a visitor cannot fail,
/// the first I/O error is stored and the search cancelled.
pub struct Painter<W: Write> {
    out: W,
    shadow: Grid,
    delay: Duration,
    token: CancelToken,
    quit: bool,
    error: Option<io::Error>,
}

impl<W: Write> Painter<W> {
    pub fn new(out: W, grid: &Grid, delay: Duration, token: CancelToken) -> Self {
        let mut shadow = grid.clone();
        shadow.reset_search();
        Self {
            out,
            shadow,
            delay,
            token,
            quit: false,
            error: None,
        }
    }

    /// Whether `q` was pressed during the run.
    pub fn quit_requested(&self) -> bool {
        self.quit
    }

    /// Consume the painter, returning the first I/O error it hit.
    pub fn finish(self) -> io::Result<()> {
        match self.error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    fn paint(&mut self, c: Coord, tag: SearchTag) -> io::Result<()> {
        self.shadow.set_tag(c, tag);
        if let Some(cell) = self.shadow.at(c) {
            queue_cell(&mut self.out, c, cell)?;
            queue!(self.out, ResetColor)?;
            self.out.flush()?;
        }
        if !self.delay.is_zero() {
            thread::sleep(self.delay);
        }
        if let Some(cmd) = poll_command(Duration::ZERO)? {
            self.quit |= cmd == Command::Quit;
            self.token.cancel();
        }
        Ok(())
    }
}

impl<W: Write> Visitor for Painter<W> {
    fn visit(&mut self, cell: Coord, tag: SearchTag) {
        if self.error.is_some() {
            return;
        }
        if let Err(e) = self.paint(cell, tag) {
            log::error!("rendering failed: {e}");
            self.error = Some(e);
            self.token.cancel();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_mapping() {
        assert_eq!(to_command(KeyCode::Char(' ')), Command::Search);
        assert_eq!(to_command(KeyCode::Char('c')), Command::Regenerate);
        assert_eq!(to_command(KeyCode::Esc), Command::Quit);
        assert_eq!(to_command(KeyCode::Char('x')), Command::Other);
    }

    #[test]
    fn colours_are_rgb() {
        let cell = Cell::new(gridpath_core::Role::Barrier);
        assert_eq!(to_ct_color(cell), CtColor::Rgb { r: 0, g: 0, b: 0 });
    }

    #[test]
    fn draw_grid_writes_escape_codes() {
        let grid = Grid::new(2, 2);
        let mut buf = Vec::new();
        draw_grid(&mut buf, &grid).unwrap();
        let s = String::from_utf8(buf).unwrap();
        assert_eq!(s.matches("  ").count(), 4);
        assert!(s.contains("\x1b["));
    }

    #[test]
    fn offscreen_cells_are_skipped() {
        assert_eq!(screen_pos(Coord::new(3, 4)), Some((8, 3)));
        assert_eq!(screen_pos(Coord::new(0, 32767)), Some((65534, 0)));
        assert_eq!(screen_pos(Coord::new(0, 32768)), None);
        assert_eq!(screen_pos(Coord::new(0, 70000)), None);
        assert_eq!(screen_pos(Coord::new(70000, 0)), None);
        assert_eq!(screen_pos(Coord::new(-1, 0)), None);

        // Columns past the screen edge draw nothing rather than wrapping
        // onto the left side.
        let grid = Grid::new(1, 32770);
        let mut buf = Vec::new();
        draw_grid(&mut buf, &grid).unwrap();
        let s = String::from_utf8(buf).unwrap();
        assert_eq!(s.matches("  ").count(), 32768);
        assert_eq!(s.matches("\x1b[1;1H").count(), 1);
    }
}
