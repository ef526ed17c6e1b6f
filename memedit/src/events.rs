use egui::Key;

/// Arrow-key navigation while a byte is being edited
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavKey {
    Left,
    Right,
    Up,
    Down,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct EventState {
    /// Hex chars typed this frame, in order
    pub(crate) hex_chars: Vec<char>,
    /// First arrow key pressed this frame (key repeat included)
    pub(crate) nav: Option<NavKey>,
    pub(crate) enter_pressed: bool,
    pub(crate) backspace_pressed: bool,
    pub(crate) pointer_pressed: bool,
    pub(crate) pointer_pos: Option<egui::Pos2>,
}

#[allow(clippy::enum_glob_use)]
/// Helper for mapping keys to hex chars
const fn key_to_hex_char(key: Key) -> Option<char> {
    use egui::Key::*;
    Some(match key {
        Num0 => '0',
        Num1 => '1',
        Num2 => '2',
        Num3 => '3',
        Num4 => '4',
        Num5 => '5',
        Num6 => '6',
        Num7 => '7',
        Num8 => '8',
        Num9 => '9',
        A => 'A',
        B => 'B',
        C => 'C',
        D => 'D',
        E => 'E',
        F => 'F',
        _ => return None,
    })
}

const fn key_to_nav(key: Key) -> Option<NavKey> {
    match key {
        Key::ArrowLeft => Some(NavKey::Left),
        Key::ArrowRight => Some(NavKey::Right),
        Key::ArrowUp => Some(NavKey::Up),
        Key::ArrowDown => Some(NavKey::Down),
        _ => None,
    }
}

/// Collect events once per frame and return an aggregated state
pub fn collect_ui_events(ui: &egui::Ui) -> EventState {
    ui.input(|i| {
        let mut state = EventState {
            pointer_pressed: i.pointer.any_pressed(),
            pointer_pos: i.pointer.interact_pos(),
            ..Default::default()
        };

        for event in &i.events {
            if let egui::Event::Key {
                key,
                pressed: true,
                modifiers,
                ..
            } = event
            {
                if *key == Key::Enter {
                    state.enter_pressed = true;
                }

                if *key == Key::Backspace {
                    state.backspace_pressed = true;
                }

                if state.nav.is_none() {
                    state.nav = key_to_nav(*key);
                }

                // Leave shortcuts (Ctrl+C etc.) to the host
                if !modifiers.command
                    && !modifiers.alt
                    && let Some(ch) = key_to_hex_char(*key)
                {
                    state.hex_chars.push(ch);
                }
            }
        }

        state
    })
}
