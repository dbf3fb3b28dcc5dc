use std::sync::mpsc;
use std::time::{Duration, Instant};

use assert_matches::assert_matches;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use get_serious::runtime::{AppEvent, Runner, TestEventSource};
use get_serious::session::{Effect, Session, Stage};
use get_serious::sites::ADD_CUSTOM_LABEL;

fn key(code: KeyCode) -> AppEvent {
    AppEvent::Key(KeyEvent::new(code, KeyModifiers::NONE))
}

fn send_text(tx: &mpsc::Sender<AppEvent>, text: &str) {
    for c in text.chars() {
        tx.send(key(KeyCode::Char(c))).unwrap();
    }
}

/// Feed events through the runner the way the binary's loop does, applying
/// scheduling effects, until `done` holds or the step budget runs out.
fn drive(
    runner: &mut Runner<TestEventSource>,
    session: &mut Session,
    max_steps: u32,
    done: impl Fn(&Session) -> bool,
) {
    for _ in 0..max_steps {
        let Some(event) = runner.step().unwrap() else {
            continue;
        };
        let now = Instant::now();
        match session.handle(event, now) {
            Some(Effect::Quit) => return,
            Some(Effect::ScheduleTick(_)) => {
                // keep the test fast: reschedule almost immediately
                runner.schedule_tick(now, Duration::from_millis(5));
            }
            None => {}
        }
        if done(session) {
            return;
        }
    }
}

// A sub-second countdown runs through the real runner, locks, and resets to
// setup by itself once wall-clock time has passed.
#[test]
fn headless_countdown_expires_and_resets() {
    let (tx, rx) = mpsc::channel();
    let mut runner = Runner::with_idle_poll(TestEventSource::new(rx), Duration::from_millis(5));
    let mut session = Session::new();

    send_text(&tx, "150ms");
    tx.send(key(KeyCode::Enter)).unwrap();
    tx.send(key(KeyCode::Enter)).unwrap();
    tx.send(key(KeyCode::Char(' '))).unwrap();

    drive(&mut runner, &mut session, 50, |s| s.is_locked());
    assert_eq!(session.stage(), Stage::Timer);
    assert!(session.is_locked());

    let started = Instant::now();
    drive(&mut runner, &mut session, 1_000, |s| s.stage() == Stage::Setup);

    assert_eq!(session.stage(), Stage::Setup);
    assert_eq!(session.remaining(), Duration::ZERO);
    assert!(!session.is_locked());
    assert!(session.setup_input().is_empty());
    assert!(session.frame() >= 1);
    assert!(started.elapsed() < Duration::from_secs(5));
}

// Quit requests are swallowed for the whole lock and accepted again after expiry.
#[test]
fn headless_lock_blocks_quit() {
    let (tx, rx) = mpsc::channel();
    let mut runner = Runner::with_idle_poll(TestEventSource::new(rx), Duration::from_millis(5));
    let mut session = Session::new();

    send_text(&tx, "300ms");
    tx.send(key(KeyCode::Enter)).unwrap();
    tx.send(key(KeyCode::Enter)).unwrap();
    tx.send(key(KeyCode::Enter)).unwrap();
    tx.send(key(KeyCode::Char('q'))).unwrap();
    tx.send(key(KeyCode::Esc)).unwrap();
    tx.send(AppEvent::Key(KeyEvent::new(
        KeyCode::Char('c'),
        KeyModifiers::CONTROL,
    )))
    .unwrap();

    drive(&mut runner, &mut session, 11, |_| false);
    assert!(!session.is_quitting());

    drive(&mut runner, &mut session, 1_000, |s| s.stage() == Stage::Setup);
    assert_eq!(session.stage(), Stage::Setup);

    tx.send(key(KeyCode::Esc)).unwrap();
    drive(&mut runner, &mut session, 10, |s| s.is_quitting());
    assert!(session.is_quitting());
}

#[test]
fn headless_custom_site_then_start() {
    let (tx, rx) = mpsc::channel();
    let mut runner = Runner::with_idle_poll(TestEventSource::new(rx), Duration::from_millis(5));
    let mut session = Session::new();

    send_text(&tx, "10");
    tx.send(key(KeyCode::Enter)).unwrap();
    drive(&mut runner, &mut session, 3, |s| s.stage() == Stage::SiteSelection);
    let len = session.sites().len();

    for _ in 0..len - 1 {
        tx.send(key(KeyCode::Down)).unwrap();
    }
    tx.send(key(KeyCode::Enter)).unwrap();
    send_text(&tx, "example.com");
    tx.send(key(KeyCode::Enter)).unwrap();
    drive(&mut runner, &mut session, 100, |s| s.sites().len() == len + 1);

    let sites = session.sites().sites();
    assert_eq!(sites[len - 1].name, "example.com");
    assert!(sites[len - 1].selected);
    assert_eq!(sites[len].name, ADD_CUSTOM_LABEL);

    tx.send(key(KeyCode::Enter)).unwrap();
    drive(&mut runner, &mut session, 10, |s| s.stage() == Stage::Timer);
    assert_eq!(session.stage(), Stage::Timer);
    assert_eq!(session.snapshot().sites[len - 1].name, "example.com");
}

#[test]
fn headless_resize_is_recorded() {
    let now = Instant::now();
    let mut session = Session::new();

    assert_matches!(session.handle(AppEvent::Resize(80, 24), now), None);
    assert_eq!(session.viewport(), (80, 24));
    assert_eq!(session.stage(), Stage::Setup);
}
