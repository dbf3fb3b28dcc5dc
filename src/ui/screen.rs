use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Paragraph, Widget, Wrap},
};

use super::{
    clock_box, input_line, pad_to, progress_bar, status_text, timer_instructions, title_lines,
};
use crate::{
    session::{Snapshot, Stage},
    theme::Theme,
};

const LIST_WIDTH: usize = 36;

/// A UI Screen boundary: renders one stage of the session
pub trait Screen {
    fn render(&self, snapshot: &Snapshot, theme: &Theme, area: Rect, buf: &mut Buffer);
}

fn render_centered(lines: Vec<Line<'_>>, area: Rect, buf: &mut Buffer) {
    Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: false })
        .render(area, buf);
}

/// Duration entry
pub struct SetupScreen;

impl Screen for SetupScreen {
    fn render(&self, snapshot: &Snapshot, theme: &Theme, area: Rect, buf: &mut Buffer) {
        let mut lines: Vec<Line> = title_lines(area.width, theme);
        lines.push(Line::default());
        lines.push(Line::styled("How long do you need to focus?", theme.status()));
        lines.push(Line::default());
        lines.push(input_line("> ", &snapshot.setup_input, theme));
        lines.push(Line::default());
        lines.push(Line::styled(
            "Plain numbers are minutes. Also: 45m, 1h30m, 90s",
            theme.instruction(),
        ));
        lines.push(Line::styled(
            "ENTER to continue • ESC to quit",
            theme.instruction(),
        ));
        render_centered(lines, area, buf);
    }
}

/// Checkbox list of sites plus the virtual start row
pub struct SiteSelectionScreen;

impl SiteSelectionScreen {
    fn row_line<'a>(snapshot: &Snapshot, idx: usize, theme: &Theme) -> Line<'a> {
        let site = &snapshot.sites[idx];
        let marker = if snapshot.cursor == idx { "> " } else { "  " };
        let label = if idx + 1 == snapshot.sites.len() {
            format!("{marker}  + {}", site.name)
        } else {
            let check = if site.selected { 'x' } else { ' ' };
            format!("{marker}[{check}] {}", site.name)
        };
        let style = if snapshot.cursor == idx {
            theme.highlight()
        } else {
            theme.title()
        };
        Line::from(Span::styled(pad_to(&label, LIST_WIDTH), style))
    }
}

impl Screen for SiteSelectionScreen {
    fn render(&self, snapshot: &Snapshot, theme: &Theme, area: Rect, buf: &mut Buffer) {
        let mut lines: Vec<Line> = title_lines(area.width, theme);
        lines.push(Line::default());
        lines.push(Line::styled("Pick the sites to block", theme.status()));
        lines.push(Line::default());

        for idx in 0..snapshot.sites.len() {
            lines.push(Self::row_line(snapshot, idx, theme));
        }

        lines.push(Line::default());
        let on_start = snapshot.cursor == snapshot.sites.len();
        let start = format!("{}[ Start Session ]", if on_start { "> " } else { "  " });
        lines.push(Line::styled(
            pad_to(&start, LIST_WIDTH),
            if on_start {
                theme.highlight()
            } else {
                theme.title()
            },
        ));
        lines.push(Line::default());

        if snapshot.custom_input_active {
            lines.push(input_line("Custom site: ", &snapshot.custom_input, theme));
            lines.push(Line::default());
            lines.push(Line::styled("ENTER add • ESC cancel", theme.instruction()));
        } else {
            lines.push(Line::styled(
                "↑/↓ move • SPACE toggle • ENTER select • ESC quit",
                theme.instruction(),
            ));
        }
        render_centered(lines, area, buf);
    }
}

/// Countdown display
pub struct TimerScreen;

impl Screen for TimerScreen {
    fn render(&self, snapshot: &Snapshot, theme: &Theme, area: Rect, buf: &mut Buffer) {
        let mut lines: Vec<Line> = title_lines(area.width, theme);
        lines.push(Line::default());
        lines.push(Line::styled(status_text(snapshot), theme.status()));

        let blocked: Vec<&str> = snapshot.sites[..snapshot.sites.len().saturating_sub(1)]
            .iter()
            .filter(|s| s.selected)
            .map(|s| s.name.as_str())
            .collect();
        if !blocked.is_empty() {
            lines.push(Line::styled(
                format!("Blocking: {}", blocked.join(", ")),
                theme.instruction(),
            ));
        }
        lines.push(Line::default());

        let clock_style = theme.clock(snapshot.locked);
        lines.extend(
            clock_box(snapshot)
                .into_iter()
                .map(|row| Line::styled(row, clock_style)),
        );
        lines.push(Line::default());

        if let Some(bar) = progress_bar(snapshot) {
            lines.push(Line::styled(bar, theme.progress()));
            lines.push(Line::default());
        }

        lines.push(Line::styled(timer_instructions(snapshot), theme.instruction()));
        render_centered(lines, area, buf);
    }
}

/// Helper to construct the appropriate screen for the current stage
pub fn current_screen(stage: Stage) -> Box<dyn Screen> {
    match stage {
        Stage::Setup => Box::new(SetupScreen),
        Stage::SiteSelection => Box::new(SiteSelectionScreen),
        Stage::Timer => Box::new(TimerScreen),
    }
}
