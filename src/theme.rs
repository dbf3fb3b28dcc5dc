use ratatui::style::{Color, Modifier, Style};

/// Palette handed to the renderer; bold terminal aesthetic by default
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub primary: Color,
    pub accent: Color,
    pub dim: Color,
    pub warning: Color,
    pub background: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            primary: Color::Rgb(0x00, 0xff, 0x00),
            accent: Color::Rgb(0xff, 0x00, 0x00),
            dim: Color::Rgb(0x66, 0x66, 0x66),
            warning: Color::Rgb(0xff, 0xff, 0x00),
            background: Color::Rgb(0x00, 0x00, 0x00),
        }
    }
}

impl Theme {
    fn bold(fg: Color) -> Style {
        Style::default().fg(fg).add_modifier(Modifier::BOLD)
    }

    pub fn title(&self) -> Style {
        Self::bold(self.primary)
    }

    pub fn clock(&self, locked: bool) -> Style {
        Self::bold(if locked { self.accent } else { self.primary })
    }

    pub fn instruction(&self) -> Style {
        Style::default().fg(self.dim)
    }

    pub fn status(&self) -> Style {
        Self::bold(self.warning)
    }

    pub fn progress(&self) -> Style {
        Style::default().fg(self.accent)
    }

    pub fn highlight(&self) -> Style {
        Self::bold(self.warning)
    }

    pub fn placeholder(&self) -> Style {
        Style::default().fg(self.dim).add_modifier(Modifier::ITALIC)
    }

    pub fn caret(&self) -> Style {
        Style::default()
            .fg(self.primary)
            .add_modifier(Modifier::REVERSED)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locked_clock_uses_accent() {
        let theme = Theme::default();
        assert_eq!(theme.clock(true).fg, Some(theme.accent));
        assert_eq!(theme.clock(false).fg, Some(theme.primary));
        assert!(theme.clock(true).add_modifier.contains(Modifier::BOLD));
    }
}
