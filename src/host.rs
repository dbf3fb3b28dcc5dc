//! Process and terminal glue: relaunching in a dedicated terminal window and
//! putting the controlling terminal into TUI mode.

use std::ffi::OsString;
use std::io::{self, Stdout};
use std::path::{Path, PathBuf};
use std::process::Command;

use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use tracing::{debug, info};
use which::which;

/// Set in the child so a relaunched process does not relaunch again
pub const DETACHED_ENV: &str = "GET_SERIOUS_DETACHED";

/// A terminal emulator that can host the app in a small window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminalEmulator {
    Alacritty,
    Xterm,
    GnomeTerminal,
    Konsole,
}

impl TerminalEmulator {
    /// Tried in this order
    pub const ALL: [TerminalEmulator; 4] = [
        TerminalEmulator::Alacritty,
        TerminalEmulator::Xterm,
        TerminalEmulator::GnomeTerminal,
        TerminalEmulator::Konsole,
    ];

    pub fn command(&self) -> &'static str {
        match self {
            TerminalEmulator::Alacritty => "alacritty",
            TerminalEmulator::Xterm => "xterm",
            TerminalEmulator::GnomeTerminal => "gnome-terminal",
            TerminalEmulator::Konsole => "konsole",
        }
    }

    /// Arguments that open an 80x24 window running `exe` with `forwarded`
    pub fn args(&self, exe: &Path, forwarded: &[OsString]) -> Vec<OsString> {
        let exe = exe.as_os_str().to_os_string();
        let fixed: &[&str] = match self {
            TerminalEmulator::Alacritty => &["--dimensions", "80", "24", "-e"],
            TerminalEmulator::Xterm => &["-geometry", "80x24", "-e"],
            TerminalEmulator::GnomeTerminal => &["--geometry=80x24", "--"],
            TerminalEmulator::Konsole => &["--dimensions", "80x24", "-e"],
        };
        fixed
            .iter()
            .map(OsString::from)
            .chain(std::iter::once(exe))
            .chain(forwarded.iter().cloned())
            .collect()
    }
}

/// True when this process was started by [`relaunch_detached`].
pub fn is_detached(env_value: Option<&str>) -> bool {
    env_value == Some("1")
}

fn spawn_in(
    emulator: TerminalEmulator,
    program: PathBuf,
    exe: &Path,
    forwarded: &[OsString],
) -> io::Result<()> {
    Command::new(program)
        .args(emulator.args(exe, forwarded))
        .env(DETACHED_ENV, "1")
        .spawn()
        .map(|_| ())
}

/// Try to reopen the current executable in its own terminal window.
///
/// The child gets this process's own arguments, so flags such as
/// `--log-file` reach the process that actually runs the UI.
/// Returns `true` when a child was started and the caller should exit.
/// Every failure falls through to running in the current terminal.
pub fn relaunch_detached() -> bool {
    let exe = match std::env::current_exe() {
        Ok(exe) => exe,
        Err(err) => {
            debug!(%err, "cannot resolve current executable");
            return false;
        }
    };
    let forwarded: Vec<OsString> = std::env::args_os().skip(1).collect();

    for emulator in TerminalEmulator::ALL {
        let Ok(program) = which(emulator.command()) else {
            continue;
        };
        match spawn_in(emulator, program, &exe, &forwarded) {
            Ok(()) => {
                info!(terminal = emulator.command(), "relaunched in new window");
                return true;
            }
            Err(err) => debug!(terminal = emulator.command(), %err, "spawn failed"),
        }
    }
    false
}

/// Raw mode, alternate screen and mouse capture for as long as it lives
pub struct TerminalGuard {
    stdout: Stdout,
}

impl TerminalGuard {
    pub fn enter() -> io::Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        if let Err(err) = execute!(stdout, EnterAlternateScreen, EnableMouseCapture) {
            let _ = disable_raw_mode();
            return Err(err);
        }
        Ok(Self { stdout })
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = execute!(self.stdout, DisableMouseCapture, LeaveAlternateScreen);
        let _ = disable_raw_mode();
    }
}
