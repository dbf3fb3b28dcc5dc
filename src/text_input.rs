use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Single-line editable buffer with a caret and a character limit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextInput {
    value: String,
    /// caret position, counted in chars
    cursor: usize,
    char_limit: usize,
    placeholder: String,
}

impl TextInput {
    pub fn new(placeholder: impl Into<String>, char_limit: usize) -> Self {
        Self {
            value: String::new(),
            cursor: 0,
            char_limit,
            placeholder: placeholder.into(),
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    pub fn char_limit(&self) -> usize {
        self.char_limit
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    fn len(&self) -> usize {
        self.value.chars().count()
    }

    fn byte_offset(&self, char_idx: usize) -> usize {
        self.value
            .char_indices()
            .nth(char_idx)
            .map_or(self.value.len(), |(i, _)| i)
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    /// Insert at the caret. Control characters and input past the limit are dropped.
    pub fn insert(&mut self, c: char) -> bool {
        if c.is_control() || self.len() >= self.char_limit {
            return false;
        }
        let at = self.byte_offset(self.cursor);
        self.value.insert(at, c);
        self.cursor += 1;
        true
    }

    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            let at = self.byte_offset(self.cursor - 1);
            self.value.remove(at);
            self.move_left();
        }
    }

    pub fn delete(&mut self) {
        if self.cursor < self.len() {
            let at = self.byte_offset(self.cursor);
            self.value.remove(at);
        }
    }

    pub fn move_left(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
        }
    }

    pub fn move_right(&mut self) {
        if self.cursor < self.len() {
            self.cursor += 1;
        }
    }

    /// Apply an editing key. Returns true if the key was consumed.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('u') if ctrl => self.clear(),
            KeyCode::Char('a') if ctrl => self.cursor = 0,
            KeyCode::Char('e') if ctrl => self.cursor = self.len(),
            KeyCode::Char(_) if ctrl => return false,
            KeyCode::Char(c) => return self.insert(c),
            KeyCode::Backspace => self.backspace(),
            KeyCode::Delete => self.delete(),
            KeyCode::Left => self.move_left(),
            KeyCode::Right => self.move_right(),
            KeyCode::Home => self.cursor = 0,
            KeyCode::End => self.cursor = self.len(),
            _ => return false,
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn typed(input: &mut TextInput, text: &str) {
        for c in text.chars() {
            input.handle_key(key(KeyCode::Char(c)));
        }
    }

    #[test]
    fn test_new_is_empty() {
        let input = TextInput::new("25m", 10);
        assert!(input.is_empty());
        assert_eq!(input.cursor(), 0);
        assert_eq!(input.placeholder(), "25m");
        assert_eq!(input.char_limit(), 10);
    }

    #[test]
    fn test_typing_appends() {
        let mut input = TextInput::new("", 10);
        typed(&mut input, "1h30m");
        assert_eq!(input.value(), "1h30m");
        assert_eq!(input.cursor(), 5);
    }

    #[test]
    fn test_char_limit() {
        let mut input = TextInput::new("", 3);
        typed(&mut input, "12345");
        assert_eq!(input.value(), "123");
        assert!(!input.insert('9'));
    }

    #[test]
    fn test_insert_in_middle() {
        let mut input = TextInput::new("", 10);
        typed(&mut input, "1m");
        input.handle_key(key(KeyCode::Left));
        typed(&mut input, "0");
        assert_eq!(input.value(), "10m");
        assert_eq!(input.cursor(), 2);
    }

    #[test]
    fn test_backspace_and_delete() {
        let mut input = TextInput::new("", 10);
        typed(&mut input, "abc");
        input.handle_key(key(KeyCode::Backspace));
        assert_eq!(input.value(), "ab");
        input.handle_key(key(KeyCode::Home));
        input.handle_key(key(KeyCode::Delete));
        assert_eq!(input.value(), "b");
        assert_eq!(input.cursor(), 0);
        input.handle_key(key(KeyCode::Backspace));
        assert_eq!(input.value(), "b");
    }

    #[test]
    fn test_multibyte_editing() {
        let mut input = TextInput::new("", 10);
        typed(&mut input, "µsé");
        input.handle_key(key(KeyCode::Left));
        input.handle_key(key(KeyCode::Backspace));
        assert_eq!(input.value(), "µé");
        assert_eq!(input.cursor(), 1);
    }

    #[test]
    fn test_ctrl_u_clears() {
        let mut input = TextInput::new("", 10);
        typed(&mut input, "hello");
        assert!(input.handle_key(KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL)));
        assert!(input.is_empty());
        assert_eq!(input.cursor(), 0);
    }

    #[test]
    fn test_other_ctrl_chars_are_not_consumed() {
        let mut input = TextInput::new("", 10);
        assert!(!input.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)));
        assert!(input.is_empty());
    }
}
