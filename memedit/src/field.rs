/// Two-character hex input used while a byte is being edited.
///
/// On focus the whole buffer is selected, so the first typed digit replaces it. Further digits
/// overwrite at the cursor. The owner commits once the cursor moves past the second digit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HexField {
    text: String,
    cursor: usize,
    select_all: bool,
}

impl HexField {
    /// Load the current value of the byte and select it
    pub fn reset(&mut self, text: String) {
        self.text = text;
        self.cursor = 0;
        self.select_all = true;
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Cursor position, or `None` while everything is selected
    pub const fn cursor(&self) -> Option<usize> {
        if self.select_all {
            None
        } else {
            Some(self.cursor)
        }
    }

    /// Type one char. Non-hex chars are filtered out; returns whether the char was taken.
    pub fn type_char(&mut self, ch: char) -> bool {
        if !ch.is_ascii_hexdigit() || self.cursor >= 2 {
            return false;
        }

        let ch = ch.to_ascii_uppercase();
        if self.select_all {
            self.text = ch.to_string();
            self.cursor = 1;
            self.select_all = false;
            return true;
        }

        let mut chars: Vec<char> = self.text.chars().collect();
        if self.cursor < chars.len() {
            chars[self.cursor] = ch;
        } else {
            chars.push(ch);
        }
        self.text = chars.into_iter().collect();
        self.cursor += 1;
        true
    }

    pub fn backspace(&mut self) {
        if self.select_all {
            self.text.clear();
            self.select_all = false;
            self.cursor = 0;
            return;
        }
        if self.cursor > 0 {
            self.cursor -= 1;
            self.text.truncate(self.cursor);
        }
    }

    /// Both digits have been typed
    pub const fn is_complete(&self) -> bool {
        !self.select_all && self.cursor >= 2
    }
}
