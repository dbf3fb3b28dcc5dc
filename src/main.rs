use std::{io, path::PathBuf, process::ExitCode};

use clap::Parser;
use crossterm::tty::IsTty;
use get_serious::{
    app,
    error::HarnessError,
    host::{self, TerminalGuard, DETACHED_ENV},
    logging,
    runtime::{CrosstermEventSource, Runner},
    session::Session,
    theme::Theme,
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::error;

/// uncancellable focus countdown for the terminal
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "Pick a duration, pick the sites you mean to stay away from, then lock a countdown that cannot be quit until it reaches zero."
)]
pub struct Cli {
    /// run in the current terminal instead of opening a new window
    #[clap(long)]
    no_detach: bool,

    /// write diagnostic logs to this file
    #[clap(long)]
    log_file: Option<PathBuf>,

    /// log filter used with --log-file, e.g. `debug`
    #[clap(long, default_value = logging::DEFAULT_LEVEL)]
    log_level: String,
}

impl Cli {
    fn should_detach(&self, env_value: Option<&str>) -> bool {
        !self.no_detach && !host::is_detached(env_value)
    }
}

fn run(cli: &Cli) -> Result<(), HarnessError> {
    let env_value = std::env::var(DETACHED_ENV).ok();
    if cli.should_detach(env_value.as_deref()) && host::relaunch_detached() {
        return Ok(());
    }

    // only the process that owns the UI writes the log
    if let Some(path) = &cli.log_file {
        logging::init_file_logging(path, &cli.log_level)?;
    }

    if !io::stdin().is_tty() {
        return Err(HarnessError::NotATty);
    }

    let _guard = TerminalGuard::enter()?;
    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
    let mut runner = Runner::new(CrosstermEventSource::new());
    let mut session = Session::new();

    app::run(&mut terminal, &mut session, &mut runner, &Theme::default())?;
    terminal.show_cursor()?;
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(%err, "harness failure");
            eprintln!("Error running get-serious: {err}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_default_values() {
        let cli = Cli::parse_from(["get-serious"]);

        assert!(!cli.no_detach);
        assert_eq!(cli.log_file, None);
        assert_eq!(cli.log_level, "info");
    }

    #[test]
    fn test_cli_flags() {
        let cli = Cli::parse_from([
            "get-serious",
            "--no-detach",
            "--log-file",
            "/tmp/gs.log",
            "--log-level",
            "debug",
        ]);

        assert!(cli.no_detach);
        assert_eq!(cli.log_file, Some(PathBuf::from("/tmp/gs.log")));
        assert_eq!(cli.log_level, "debug");
    }

    #[test]
    fn test_should_detach() {
        let cli = Cli::parse_from(["get-serious"]);
        assert!(cli.should_detach(None));
        assert!(!cli.should_detach(Some("1")));

        let cli = Cli::parse_from(["get-serious", "--no-detach"]);
        assert!(!cli.should_detach(None));
    }

    #[test]
    fn test_cli_rejects_unknown_flag() {
        assert!(Cli::try_parse_from(["get-serious", "--bogus"]).is_err());
    }
}
