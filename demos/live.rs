//! Live search viewer in the terminal.
//!
//! Run: cargo run --bin gridpath-live [-- layout-file]
//!
//! Space or Enter starts a search, any key cancels a running one, `c`
//! generates a new layout, `s` saves the current one, `q` quits. Without a
//! layout file a random layout is generated (see [`LiveConfig::from_env`]).

use std::error::Error;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use gridpath_demos::term::{self, Command, Painter};
use gridpath_demos::{LiveConfig, Session, init_logger, is_binary_path, load_layout, save_layout};

const HELP: &str = "space: search  c: new layout  s: save  q: quit";
const SAVE_FILE: &str = "gridpath-layout.txt";

fn main() {
    init_logger();
    let cfg = LiveConfig::from_env();

    let session = match std::env::args().nth(1).map(PathBuf::from) {
        Some(file) => match load_layout(&file, is_binary_path(&file)) {
            Ok(grid) => Session::from_grid(grid, cfg),
            Err(e) => {
                eprintln!("Error: {e}");
                std::process::exit(1);
            }
        },
        None => Session::new(cfg),
    };

    let mut stdout = io::stdout();
    let result = match term::init(&mut stdout) {
        Ok(()) => run(&mut stdout, session),
        Err(e) => Err(e.into()),
    };
    term::close(&mut stdout);

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run(out: &mut impl Write, mut session: Session) -> Result<(), Box<dyn Error>> {
    term::draw_grid(out, session.grid())?;
    term::draw_status(out, session.grid(), HELP)?;

    loop {
        match term::wait_command()? {
            Command::Search => {
                term::draw_grid(out, session.grid())?;
                let mut painter = Painter::new(
                    &mut *out,
                    session.grid(),
                    session.config().delay,
                    session.token(),
                );
                let report = session.solve(&mut painter);
                let quit = painter.quit_requested();
                painter.finish()?;
                if quit {
                    return Ok(());
                }
                let status = format!(
                    "{}  ({} expanded)  |  {HELP}",
                    report.outcome, report.stats.expanded
                );
                term::draw_grid(out, session.grid())?;
                term::draw_status(out, session.grid(), &status)?;
            }
            Command::Regenerate => {
                session.regenerate();
                term::draw_grid(out, session.grid())?;
                term::draw_status(out, session.grid(), HELP)?;
            }
            Command::Save => {
                let file = Path::new(SAVE_FILE);
                save_layout(file, session.grid(), is_binary_path(file))?;
                term::draw_status(out, session.grid(), &format!("saved {SAVE_FILE}  |  {HELP}"))?;
            }
            Command::Quit => return Ok(()),
            Command::Other => {}
        }
    }
}
