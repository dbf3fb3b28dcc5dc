use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::{debug, info};

use crate::duration::{interpret_input, DurationParseError};
use crate::runtime::AppEvent;
use crate::sites::{Row, Site, SiteList};
use crate::text_input::TextInput;

/// Nominal spacing between ticks while the timer screen is up
pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

pub const DURATION_PLACEHOLDER: &str = "25m";
pub const DURATION_CHAR_LIMIT: usize = 10;
pub const CUSTOM_SITE_PLACEHOLDER: &str = "Enter custom site...";
pub const CUSTOM_SITE_CHAR_LIMIT: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum Stage {
    Setup,
    SiteSelection,
    Timer,
}

/// Work the host should perform after an event was handled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    Quit,
    /// deliver exactly one `AppEvent::Tick` after the delay
    ScheduleTick(Duration),
}

/// Read-only view of a session handed to the renderer
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub stage: Stage,
    pub configured: Duration,
    pub remaining: Duration,
    pub locked: bool,
    pub frame: u64,
    pub cursor: usize,
    pub sites: Vec<Site>,
    pub setup_input: TextInput,
    pub custom_input_active: bool,
    pub custom_input: TextInput,
    pub width: u16,
    pub height: u16,
    pub quitting: bool,
}

impl Snapshot {
    /// Elapsed share of the configured duration, in `[0, 1]`.
    pub fn progress(&self) -> f64 {
        if self.configured.is_zero() {
            return if self.locked { 1.0 } else { 0.0 };
        }
        let left = self.remaining.as_secs_f64() / self.configured.as_secs_f64();
        (1.0 - left).clamp(0.0, 1.0)
    }
}

/// The single mutable aggregate driving the three screens
#[derive(Debug, Clone)]
pub struct Session {
    stage: Stage,
    configured: Duration,
    remaining: Duration,
    /// `Some` exactly while the countdown is locked
    lock_started_at: Option<Instant>,
    frame: u64,
    sites: SiteList,
    setup_input: TextInput,
    custom_input: TextInput,
    custom_input_active: bool,
    width: u16,
    height: u16,
    quitting: bool,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self::with_sites(SiteList::default())
    }

    pub fn with_sites(sites: SiteList) -> Self {
        Self {
            stage: Stage::Setup,
            configured: Duration::ZERO,
            remaining: Duration::ZERO,
            lock_started_at: None,
            frame: 0,
            sites,
            setup_input: TextInput::new(DURATION_PLACEHOLDER, DURATION_CHAR_LIMIT),
            custom_input: TextInput::new(CUSTOM_SITE_PLACEHOLDER, CUSTOM_SITE_CHAR_LIMIT),
            custom_input_active: false,
            width: 0,
            height: 0,
            quitting: false,
        }
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn configured(&self) -> Duration {
        self.configured
    }

    pub fn remaining(&self) -> Duration {
        self.remaining
    }

    pub fn is_locked(&self) -> bool {
        self.lock_started_at.is_some()
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn sites(&self) -> &SiteList {
        &self.sites
    }

    pub fn setup_input(&self) -> &TextInput {
        &self.setup_input
    }

    pub fn custom_input(&self) -> &TextInput {
        &self.custom_input
    }

    pub fn custom_input_active(&self) -> bool {
        self.custom_input_active
    }

    pub fn viewport(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    pub fn is_quitting(&self) -> bool {
        self.quitting
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            stage: self.stage,
            configured: self.configured,
            remaining: self.remaining,
            locked: self.is_locked(),
            frame: self.frame,
            cursor: self.sites.cursor(),
            sites: self.sites.sites().to_vec(),
            setup_input: self.setup_input.clone(),
            custom_input_active: self.custom_input_active,
            custom_input: self.custom_input.clone(),
            width: self.width,
            height: self.height,
            quitting: self.quitting,
        }
    }

    /// Apply one event. `now` is the wall-clock reading used for lock
    /// bookkeeping and countdown recomputation.
    pub fn handle(&mut self, event: AppEvent, now: Instant) -> Option<Effect> {
        match event {
            AppEvent::Key(key) => self.on_key(key, now),
            AppEvent::Resize(width, height) => {
                self.width = width;
                self.height = height;
                None
            }
            AppEvent::Tick(_) => self.on_tick(now),
        }
    }

    fn quit(&mut self) -> Option<Effect> {
        info!(stage = %self.stage, "quit requested");
        self.quitting = true;
        Some(Effect::Quit)
    }

    fn on_key(&mut self, key: KeyEvent, now: Instant) -> Option<Effect> {
        let ctrl_c =
            key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c');

        match self.stage {
            Stage::Setup => match key.code {
                _ if ctrl_c => self.quit(),
                KeyCode::Esc => self.quit(),
                KeyCode::Enter => {
                    self.submit_duration();
                    None
                }
                _ => {
                    self.setup_input.handle_key(key);
                    None
                }
            },
            Stage::SiteSelection if self.custom_input_active => match key.code {
                _ if ctrl_c => self.quit(),
                KeyCode::Esc => {
                    self.close_custom_input();
                    None
                }
                KeyCode::Enter => {
                    let value = self.custom_input.value().to_string();
                    if self.sites.insert_custom(&value) {
                        info!(site = value.trim(), "custom site added");
                    }
                    self.close_custom_input();
                    None
                }
                _ => {
                    self.custom_input.handle_key(key);
                    None
                }
            },
            Stage::SiteSelection => match key.code {
                _ if ctrl_c => self.quit(),
                KeyCode::Esc => self.quit(),
                KeyCode::Up | KeyCode::Char('k') => {
                    self.sites.move_up();
                    None
                }
                KeyCode::Down | KeyCode::Char('j') => {
                    self.sites.move_down();
                    None
                }
                KeyCode::Char(' ') => {
                    self.sites.toggle();
                    None
                }
                KeyCode::Enter => self.activate_row(),
                _ => None,
            },
            Stage::Timer => match key.code {
                _ if ctrl_c && self.is_locked() => None,
                _ if ctrl_c => self.quit(),
                KeyCode::Char('q') | KeyCode::Esc if self.is_locked() => {
                    debug!("quit ignored while locked");
                    None
                }
                KeyCode::Char('q') | KeyCode::Esc => self.quit(),
                KeyCode::Enter | KeyCode::Char(' ') => {
                    if !self.is_locked() {
                        self.lock(now);
                    }
                    None
                }
                _ => None,
            },
        }
    }

    fn submit_duration(&mut self) {
        match interpret_input(self.setup_input.value()) {
            Ok(duration) => {
                info!(?duration, "duration configured");
                self.configured = duration;
                self.remaining = duration;
                self.stage = Stage::SiteSelection;
            }
            Err(DurationParseError::Empty) => {}
            Err(err) => {
                debug!(%err, "rejected duration input");
                self.setup_input.clear();
            }
        }
    }

    fn close_custom_input(&mut self) {
        self.custom_input_active = false;
        self.custom_input.clear();
    }

    fn activate_row(&mut self) -> Option<Effect> {
        match self.sites.current_row() {
            Row::AddCustom => {
                self.custom_input_active = true;
                None
            }
            Row::Site(_) | Row::Start => {
                info!(
                    selected = ?self.sites.selected_names(),
                    "entering timer"
                );
                self.stage = Stage::Timer;
                Some(Effect::ScheduleTick(TICK_INTERVAL))
            }
        }
    }

    fn lock(&mut self, now: Instant) {
        info!(duration = ?self.configured, "lock engaged");
        self.lock_started_at = Some(now);
        self.remaining = self.configured;
    }

    fn on_tick(&mut self, now: Instant) -> Option<Effect> {
        if self.stage != Stage::Timer {
            // stale tick from a finished countdown
            return None;
        }
        self.frame = self.frame.wrapping_add(1);

        if let Some(started) = self.lock_started_at {
            let elapsed = now.saturating_duration_since(started);
            self.remaining = self.configured.saturating_sub(elapsed);
            if self.remaining.is_zero() {
                self.expire();
                return None;
            }
        }
        Some(Effect::ScheduleTick(TICK_INTERVAL))
    }

    fn expire(&mut self) {
        info!("countdown finished, back to setup");
        self.remaining = Duration::ZERO;
        self.lock_started_at = None;
        self.stage = Stage::Setup;
        self.setup_input.clear();
        self.sites.reset_cursor();
        self.close_custom_input();
    }
}
