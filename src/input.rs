use crossterm::event::{poll, read, Event, KeyCode, KeyEvent, KeyModifiers};
use crossterm::terminal;
use std::collections::VecDeque;
use std::io;
use std::time::Duration;

// key codes of the emulated keyboard; printable keys use their ASCII code
pub const KEY_DEL: u8 = 0x01;
pub const KEY_CLR: u8 = 0x02;
pub const KEY_STOP: u8 = 0x03;
pub const KEY_ARROW_LEFT: u8 = 0x04;
pub const KEY_RUN: u8 = 0x07;
pub const KEY_CSRLEFT: u8 = 0x08;
pub const KEY_CSRRIGHT: u8 = 0x09;
pub const KEY_CSRDOWN: u8 = 0x0a;
pub const KEY_CSRUP: u8 = 0x0b;
pub const KEY_HOME: u8 = 0x0c;
pub const KEY_RETURN: u8 = 0x0d;
pub const KEY_INST: u8 = 0x10;
pub const KEY_F1: u8 = 0xf1;

/// terminal keys with a fixed counterpart on the emulated keyboard
const SPECIAL_KEYMAP: [(KeyCode, u8); 11] = [
    (KeyCode::Enter, KEY_RETURN),
    (KeyCode::Backspace, KEY_DEL),
    (KeyCode::Esc, KEY_STOP),
    (KeyCode::Left, KEY_CSRLEFT),
    (KeyCode::Right, KEY_CSRRIGHT),
    (KeyCode::Up, KEY_CSRUP),
    (KeyCode::Down, KEY_CSRDOWN),
    (KeyCode::Insert, KEY_INST),
    (KeyCode::Home, KEY_HOME),
    (KeyCode::Delete, KEY_CLR),
    (KeyCode::Tab, KEY_RUN),
];

/// what one terminal event asks the front end to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// press and release this emulated key
    Key(u8),
    /// quickload the program file
    Load,
    /// save the BASIC program to the program file
    Save,
    /// switch between the upper case and lower case glyphs
    ToggleCharset,
    /// the terminal changed; draw everything again
    Redraw,
    Quit,
}

/// map one terminal event; None for anything the machine can't take
pub fn map_event(event: &Event) -> Option<Command> {
    match event {
        Event::Key(key) => map_key(key),
        Event::Resize(_, _) => Some(Command::Redraw),
        _ => None,
    }
}

pub fn map_key(key: &KeyEvent) -> Option<Command> {
    let chord = key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT);
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Some(Command::Quit),
        KeyCode::Char(_) if chord => None,
        KeyCode::Char('|') => Some(Command::Key(KEY_ARROW_LEFT)),
        KeyCode::Char(c) => fold_printable(c).map(Command::Key),
        KeyCode::F(n @ 1..=8) => Some(Command::Key(KEY_F1 + n - 1)),
        KeyCode::End => Some(Command::ToggleCharset),
        KeyCode::PageDown => Some(Command::Load),
        KeyCode::PageUp => Some(Command::Save),
        code => SPECIAL_KEYMAP
            .iter()
            .find(|(k, _)| *k == code)
            .map(|(_, mapped)| Command::Key(*mapped)),
    }
}

/// key code for a typed character. the machine's keyboard has upper and lower
/// case the other way round from the terminal, so letters swap case; anything
/// outside a byte can't be typed
pub fn fold_printable(c: char) -> Option<u8> {
    let code = u8::try_from(u32::from(c)).ok()?;
    if code > 0x20 && code.is_ascii_alphabetic() {
        Some(code ^ 0x20)
    } else {
        Some(code)
    }
}

/// reads terminal events
pub trait Input {
    /// next pending event, without blocking
    fn poll_event(&mut self) -> Result<Option<Event>, io::Error>;
}

/// simple implementation of Input, using the controlling terminal in raw mode
pub struct StdinInput;

impl StdinInput {
    pub fn new() -> Result<Self, io::Error> {
        terminal::enable_raw_mode()?;
        Ok(StdinInput)
    }
}

impl Drop for StdinInput {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
    }
}

impl Input for StdinInput {
    fn poll_event(&mut self) -> Result<Option<Event>, io::Error> {
        if poll(Duration::from_millis(0))? {
            Ok(Some(read()?))
        } else {
            Ok(None)
        }
    }
}

/// dummy Input implementation for testing
pub struct DummyInput {
    events: VecDeque<Event>,
}

impl DummyInput {
    pub fn new(events: &[Event]) -> Self {
        DummyInput {
            events: events.iter().cloned().collect(),
        }
    }

    pub fn push(&mut self, event: Event) {
        self.events.push_back(event);
    }

    pub fn pending(&self) -> usize {
        self.events.len()
    }
}

impl Input for DummyInput {
    fn poll_event(&mut self) -> Result<Option<Event>, io::Error> {
        Ok(self.events.pop_front())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_special_keys() {
        assert_eq!(map_key(&key(KeyCode::Enter)), Some(Command::Key(KEY_RETURN)));
        assert_eq!(map_key(&key(KeyCode::Backspace)), Some(Command::Key(KEY_DEL)));
        assert_eq!(map_key(&key(KeyCode::Esc)), Some(Command::Key(KEY_STOP)));
        assert_eq!(map_key(&key(KeyCode::Up)), Some(Command::Key(KEY_CSRUP)));
        assert_eq!(map_key(&key(KeyCode::Delete)), Some(Command::Key(KEY_CLR)));
        assert_eq!(map_key(&key(KeyCode::Tab)), Some(Command::Key(KEY_RUN)));
        assert_eq!(map_key(&key(KeyCode::F(1))), Some(Command::Key(0xf1)));
        assert_eq!(map_key(&key(KeyCode::F(8))), Some(Command::Key(0xf8)));
        assert_eq!(map_key(&key(KeyCode::F(9))), None);
        assert_eq!(map_key(&key(KeyCode::Char('|'))), Some(Command::Key(KEY_ARROW_LEFT)));
    }

    #[test]
    fn test_shortcuts() {
        assert_eq!(map_key(&key(KeyCode::PageDown)), Some(Command::Load));
        assert_eq!(map_key(&key(KeyCode::PageUp)), Some(Command::Save));
        assert_eq!(map_key(&key(KeyCode::End)), Some(Command::ToggleCharset));
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(map_key(&ctrl_c), Some(Command::Quit));
        let ctrl_x = KeyEvent::new(KeyCode::Char('x'), KeyModifiers::CONTROL);
        assert_eq!(map_key(&ctrl_x), None);
        assert_eq!(map_event(&Event::Resize(80, 40)), Some(Command::Redraw));
    }

    #[test]
    fn test_shifted_letter() {
        let shifted = KeyEvent::new(KeyCode::Char('Q'), KeyModifiers::SHIFT);
        assert_eq!(map_key(&shifted), Some(Command::Key(b'q')));
    }

    #[test]
    fn test_unmappable_dropped() {
        assert_eq!(fold_printable('€'), None);
        assert_eq!(map_key(&key(KeyCode::Char('ü'))), Some(Command::Key(0xfc)));
        assert_eq!(map_key(&key(KeyCode::Null)), None);
        assert_eq!(map_key(&key(KeyCode::BackTab)), None);
    }

    #[test]
    fn test_non_letters_pass_through() {
        for c in " 0123456789!\"#$%&'()*+,-./:;<=>?@[]^_".chars() {
            assert_eq!(fold_printable(c), Some(c as u8));
        }
    }

    proptest! {
        #[test]
        fn test_case_is_inverted(c in proptest::char::range('a', 'z')) {
            let upper = c.to_ascii_uppercase();
            prop_assert_eq!(map_key(&key(KeyCode::Char(c))), Some(Command::Key(upper as u8)));
            prop_assert_eq!(map_key(&key(KeyCode::Char(upper))), Some(Command::Key(c as u8)));
        }
    }

    #[test]
    fn test_dummy_input() -> Result<(), io::Error> {
        let mut input = DummyInput::new(&[Event::Key(key(KeyCode::Enter))]);
        assert_eq!(input.pending(), 1);
        assert!(input.poll_event()?.is_some());
        assert!(input.poll_event()?.is_none());
        Ok(())
    }
}
