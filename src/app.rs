use std::time::Instant;

use ratatui::{backend::Backend, Terminal};
use tracing::info;

use crate::{
    error::HarnessError,
    runtime::{AppEvent, EventSource, Runner},
    session::{Effect, Session},
    theme::Theme,
    ui::SessionView,
};

fn draw<B: Backend>(
    terminal: &mut Terminal<B>,
    session: &Session,
    theme: &Theme,
) -> Result<(), HarnessError> {
    let snapshot = session.snapshot();
    terminal.draw(|f| f.render_widget(SessionView::new(&snapshot, theme), f.area()))?;
    Ok(())
}

/// Drive `session` from `runner` until it asks to quit, redrawing after every event.
pub fn run<B: Backend, E: EventSource>(
    terminal: &mut Terminal<B>,
    session: &mut Session,
    runner: &mut Runner<E>,
    theme: &Theme,
) -> Result<(), HarnessError> {
    let size = terminal.size()?;
    session.handle(AppEvent::Resize(size.width, size.height), Instant::now());
    info!(width = size.width, height = size.height, "session started");
    draw(terminal, session, theme)?;

    loop {
        let Some(event) = runner.step()? else {
            continue;
        };
        let now = Instant::now();
        match session.handle(event, now) {
            Some(Effect::Quit) => break,
            Some(Effect::ScheduleTick(delay)) => runner.schedule_tick(now, delay),
            None => {}
        }
        draw(terminal, session, theme)?;
    }

    Ok(())
}
