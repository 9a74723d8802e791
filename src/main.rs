mod script;

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{bail, Result};

use lineview_clipboard::{ClipboardProvider, MemoryClipboard, SystemClipboard};
use lineview_config::Config;
use lineview_logger::LogLevel;
use lineview_session::{BoundaryEvent, BoundaryInput, LogNotifier, SessionHost, SessionOptions};

use script::Step;

fn main() -> Result<()> {
    // Load config first to get viewport and logging settings
    let config = Config::load().unwrap_or_default();
    init_logging(&config);

    let Some(path) = std::env::args_os().nth(1).map(PathBuf::from) else {
        eprintln!("Usage: lineview <file>");
        std::process::exit(2);
    };

    // Fall back to an in-process clipboard on headless systems
    let clipboard: Box<dyn ClipboardProvider> = match SystemClipboard::new() {
        Ok(clipboard) => Box::new(clipboard),
        Err(e) => {
            log::warn!("{:#}; using in-memory clipboard", e);
            Box::new(MemoryClipboard::new())
        }
    };
    let mut host = SessionHost::new(clipboard, LogNotifier, SessionOptions::from(&config));

    let first = if path.exists() {
        BoundaryInput::OpenDocument(path)
    } else {
        BoundaryInput::CreateDocument(path)
    };
    match host.handle(first) {
        Some(event) => print_event(&event)?,
        None => bail!("Could not open document, see log for details"),
    }

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line?;
        match script::parse(&line) {
            Ok(Step::Quit) => break,
            Ok(Step::Input(BoundaryInput::Save)) => {
                println!("{}", if host.save() { "saved" } else { "save failed" });
            }
            Ok(Step::Input(input)) => match host.handle(input) {
                Some(event) => print_event(&event)?,
                None => println!("(unchanged)"),
            },
            Err(e) => eprintln!("{:#}\n{}", e, script::HELP),
        }
    }

    Ok(())
}

fn init_logging(config: &Config) {
    let min_level = config
        .logging
        .min_level
        .parse()
        .unwrap_or(LogLevel::Info);
    let result = config
        .log_file_path()
        .and_then(|path| lineview_logger::init(path, config.logging.max_entries, min_level));
    if let Err(e) = result {
        eprintln!("Logging disabled: {:#}", e);
    }
}

fn print_event(event: &BoundaryEvent) -> Result<()> {
    let mut out = io::stdout().lock();
    match event {
        BoundaryEvent::DocumentCreated { path } => {
            writeln!(out, "created {}", path.display())?;
        }
        BoundaryEvent::DocumentOpened { path, content } => {
            writeln!(out, "opened {}", path.display())?;
            writeln!(out, "{}", content)?;
        }
        BoundaryEvent::ContentLoaded {
            content,
            caret_offset,
            ..
        } => {
            writeln!(out, "caret {}", caret_offset)?;
            writeln!(out, "{}", content)?;
        }
    }
    out.flush()?;
    Ok(())
}
