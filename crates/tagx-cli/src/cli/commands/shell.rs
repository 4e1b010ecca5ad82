//! `tagx shell` – interactive session.
//!
//! One command per line. Guidance and I/O failures are printed as status
//! messages and the session carries on with its previous state.

use anyhow::{Context, Result};
use std::io::{self, BufRead, IsTerminal, Write};
use std::path::Path;
use tagx_core::config::TagxConfig;
use tagx_core::session::{Session, SessionError};
use tagx_core::{write_tags, SortOrder};

use super::report_unmatchable;

const HELP: &str = "\
commands:
  open <file>          select the text file
  stop-words <file>    load a stop-word list
  extract              extract tags and show them
  show                 show the current tags again
  save <file>          save the current tags
  order alpha|count    listing order for show and save
  status               show what is loaded
  help                 this list
  quit                 leave the shell";

enum Flow {
    Continue,
    Quit,
}

struct Shell<'a, W: Write> {
    session: Session,
    order: SortOrder,
    cfg: &'a TagxConfig,
    out: W,
}

impl<'a, W: Write> Shell<'a, W> {
    fn new(cfg: &'a TagxConfig, out: W) -> Self {
        Self {
            session: Session::new(cfg.load_options()),
            order: cfg.output_order,
            cfg,
            out,
        }
    }

    fn handle(&mut self, line: &str) -> io::Result<Flow> {
        let line = line.trim();
        let (cmd, arg) = match line.split_once(char::is_whitespace) {
            Some((cmd, arg)) => (cmd, arg.trim()),
            None => (line, ""),
        };
        match (cmd, arg) {
            ("", _) => {}
            ("quit" | "exit", _) => return Ok(Flow::Quit),
            ("help", _) => writeln!(self.out, "{HELP}")?,
            ("open", "") => writeln!(self.out, "usage: open <file>")?,
            ("open", path) => {
                self.session.select_source(path);
                let name = Path::new(path)
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| path.to_string());
                writeln!(self.out, "File selected: {name}")?;
            }
            ("stop-words" | "stopwords", "") => writeln!(self.out, "usage: stop-words <file>")?,
            ("stop-words" | "stopwords", path) => self.load_stop_words(Path::new(path))?,
            ("extract", _) => self.extract()?,
            ("show", _) => self.show()?,
            ("save", "") => writeln!(self.out, "usage: save <file>")?,
            ("save", path) => self.save(Path::new(path))?,
            ("order", "alpha") => self.order = SortOrder::Alphabetical,
            ("order", "count") => self.order = SortOrder::Frequency,
            ("order", _) => writeln!(self.out, "usage: order alpha|count")?,
            ("status", _) => self.status()?,
            _ => writeln!(self.out, "unknown command {cmd:?}; try \"help\"")?,
        }
        Ok(Flow::Continue)
    }

    fn load_stop_words(&mut self, path: &Path) -> io::Result<()> {
        match self.session.load_stop_words(path) {
            Ok(set) => {
                writeln!(self.out, "Stop words loaded ({})", set.len())?;
                if self.cfg.warn_unmatchable_stop_words {
                    report_unmatchable(&mut self.out, set, path)?;
                }
                Ok(())
            }
            Err(e) => self.report(e),
        }
    }

    fn extract(&mut self) -> io::Result<()> {
        match self.session.extract() {
            Ok(_) => self.show(),
            Err(e) => self.report(e),
        }
    }

    fn show(&mut self) -> io::Result<()> {
        let Some(tags) = self.session.tags() else {
            return writeln!(self.out, "No tags yet. Please extract tags first.");
        };
        writeln!(self.out, "Tags and Frequencies:")?;
        write_tags(&mut self.out, tags, self.order)
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e))
    }

    fn save(&mut self, path: &Path) -> io::Result<()> {
        match self.session.save(path, self.order) {
            Ok(()) => writeln!(self.out, "Tags saved to: {}", path.display()),
            Err(e) => self.report(e),
        }
    }

    fn status(&mut self) -> io::Result<()> {
        writeln!(self.out, "state: {}", self.session.state())?;
        match self.session.source() {
            Some(p) => writeln!(self.out, "text: {}", p.display())?,
            None => writeln!(self.out, "text: none")?,
        }
        match self.session.stop_words() {
            Some(s) => writeln!(self.out, "stop words: {}", s.len())?,
            None => writeln!(self.out, "stop words: none")?,
        }
        match self.session.tags() {
            Some(t) => writeln!(self.out, "tags: {} distinct, {} total", t.len(), t.total()),
            None => writeln!(self.out, "tags: none"),
        }
    }

    fn report(&mut self, err: SessionError) -> io::Result<()> {
        match err {
            SessionError::Guidance(g) => writeln!(self.out, "{g}"),
            SessionError::Io(e) => {
                let msg = format!("{:#}", anyhow::Error::new(e));
                tracing::warn!("session operation failed: {msg}");
                writeln!(self.out, "Error: {msg}")
            }
        }
    }
}

pub fn run_shell(cfg: &TagxConfig) -> Result<()> {
    let stdin = io::stdin();
    let prompt = stdin.is_terminal();
    drive(cfg, stdin.lock(), io::stdout().lock(), prompt)
}

/// Run commands from `input` until it ends or `quit` is read.
/// Input bytes that are not UTF-8 are replaced, never fatal.
fn drive<R: BufRead, W: Write>(
    cfg: &TagxConfig,
    mut input: R,
    out: W,
    prompt: bool,
) -> Result<()> {
    let mut shell = Shell::new(cfg, out);
    tracing::info!("shell started");
    if prompt {
        writeln!(shell.out, "tagx shell; type \"help\" for commands")?;
    }
    let mut buf = Vec::new();
    loop {
        if prompt {
            write!(shell.out, "tagx> ")?;
            shell.out.flush()?;
        }
        buf.clear();
        if input.read_until(b'\n', &mut buf).context("read command")? == 0 {
            break;
        }
        let line = String::from_utf8_lossy(&buf);
        let line = line.trim_end_matches(['\n', '\r']);
        if let Flow::Quit = shell.handle(line)? {
            break;
        }
    }
    tracing::info!(state = %shell.session.state(), "shell finished");
    Ok(())
}
