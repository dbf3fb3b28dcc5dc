pub mod screen;

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Widget,
};
use unicode_width::UnicodeWidthStr;

use crate::{duration::clock_digits, session::Snapshot, text_input::TextInput, theme::Theme};

const HORIZONTAL_MARGIN: u16 = 2;
const VERTICAL_MARGIN: u16 = 2;
const PROGRESS_WIDTH: usize = 50;
const CLOCK_PADDING: usize = 10;

const TITLE_ART: [&str; 5] = [
    " ██████  ███████ ████████     ███████ ███████ ██████  ██  ██████  ██    ██ ███████ ",
    "██       ██         ██        ██      ██      ██   ██ ██ ██    ██ ██    ██ ██      ",
    "██   ███ █████      ██        ███████ █████   ██████  ██ ██    ██ ██    ██ ███████ ",
    "██    ██ ██         ██             ██ ██      ██   ██ ██ ██    ██ ██    ██      ██ ",
    " ██████  ███████    ██        ███████ ███████ ██   ██ ██  ██████   ██████  ███████ ",
];
const TITLE_PLAIN: &str = "G E T   S E R I O U S";

/// Renders one frame of the session snapshot
pub struct SessionView<'a> {
    pub snapshot: &'a Snapshot,
    pub theme: &'a Theme,
}

impl<'a> SessionView<'a> {
    pub fn new(snapshot: &'a Snapshot, theme: &'a Theme) -> Self {
        Self { snapshot, theme }
    }
}

impl Widget for SessionView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, Style::default().bg(self.theme.background));
        if self.snapshot.quitting {
            return;
        }
        let inner = area.inner(ratatui::layout::Margin {
            horizontal: HORIZONTAL_MARGIN,
            vertical: VERTICAL_MARGIN,
        });
        screen::current_screen(self.snapshot.stage).render(self.snapshot, self.theme, inner, buf);
    }
}

/// Title block art, or a plain banner when the area is too narrow for it.
pub(crate) fn title_lines(width: u16, theme: &Theme) -> Vec<Line<'static>> {
    let art_width = TITLE_ART[0].width();
    if art_width <= width as usize {
        TITLE_ART
            .iter()
            .map(|row| Line::styled(*row, theme.title()))
            .collect()
    } else {
        vec![Line::styled(TITLE_PLAIN, theme.title())]
    }
}

/// Pad with trailing spaces to a display width so centered rows line up.
pub(crate) fn pad_to(text: &str, width: usize) -> String {
    let pad = width.saturating_sub(text.width());
    format!("{text}{}", " ".repeat(pad))
}

pub(crate) fn input_line<'a>(
    prompt: &'a str,
    input: &'a TextInput,
    theme: &Theme,
) -> Line<'a> {
    let mut spans = vec![Span::styled(prompt, theme.title())];
    let field_width = input.char_limit() + 1;

    if input.is_empty() {
        spans.push(Span::styled(" ", theme.caret()));
        spans.push(Span::styled(
            pad_to(input.placeholder(), field_width - 1),
            theme.placeholder(),
        ));
        return Line::from(spans);
    }

    let chars: Vec<char> = input.value().chars().collect();
    let caret = input.cursor().min(chars.len());
    let before: String = chars[..caret].iter().collect();
    let (under, after): (String, String) = match chars.get(caret) {
        Some(c) => (c.to_string(), chars[caret + 1..].iter().collect()),
        None => (" ".to_string(), String::new()),
    };
    let used = before.width() + under.width() + after.width();

    spans.push(Span::styled(before, theme.title()));
    spans.push(Span::styled(under, theme.caret()));
    spans.push(Span::styled(after, theme.title()));
    spans.push(Span::raw(" ".repeat(field_width.saturating_sub(used))));
    Line::from(spans)
}

pub(crate) fn status_text(snapshot: &Snapshot) -> &'static str {
    if snapshot.locked {
        // blink on frame parity
        if snapshot.frame % 2 == 0 {
            "🔒 LOCKED - NO ESCAPE 🔒"
        } else {
            "▓▓ LOCKED - NO ESCAPE ▓▓"
        }
    } else {
        "⚡ READY TO LOCK ⚡"
    }
}

pub(crate) fn clock_box(snapshot: &Snapshot) -> Vec<String> {
    let digits = clock_digits(snapshot.remaining);
    let inner = digits.width() + CLOCK_PADDING * 2;
    let blank = format!("║{}║", " ".repeat(inner));
    vec![
        format!("╔{}╗", "═".repeat(inner)),
        blank.clone(),
        format!("║{pad}{digits}{pad}║", pad = " ".repeat(CLOCK_PADDING)),
        blank,
        format!("╚{}╝", "═".repeat(inner)),
    ]
}

pub(crate) fn progress_bar(snapshot: &Snapshot) -> Option<String> {
    if !snapshot.locked {
        return None;
    }
    let progress = snapshot.progress();
    let filled = ((progress * PROGRESS_WIDTH as f64) as usize).min(PROGRESS_WIDTH);
    Some(format!(
        "[{}{}] {}%",
        "█".repeat(filled),
        "░".repeat(PROGRESS_WIDTH - filled),
        (progress * 100.0) as u32
    ))
}

pub(crate) fn timer_instructions(snapshot: &Snapshot) -> &'static str {
    if snapshot.locked {
        "Lock is active. Timer must reach 00:00:00 to unlock."
    } else {
        "Press ENTER or SPACE to start lock • Press Q to quit"
    }
}
