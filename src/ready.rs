use crate::machine::{Machine, BASIC_START, KEYBUF_COUNT, TXTTAB};
use crate::screen::{self, TEXT_COLUMNS, TEXT_ROWS};

/// "READY." in screen codes
pub const READY_PROMPT: [u8; 6] = [0x12, 0x05, 0x01, 0x04, 0x19, 0x2e];

/// true when BASIC is sitting at its prompt with nothing typed ahead, so text
/// can be injected safely: the keyboard buffer is empty, BASIC programs start
/// at the usual place, and some screen row begins with `READY.`
///
/// only reads the machine
pub fn is_ready(m: &impl Machine) -> bool {
    m.cpu_read(KEYBUF_COUNT) == 0 && m.cpu_read16(TXTTAB) == BASIC_START && prompt_row(m).is_some()
}

/// first screen row starting with the prompt
pub fn prompt_row(m: &impl Machine) -> Option<usize> {
    let base = screen::screen_base(m);
    (0..TEXT_ROWS).find(|row| {
        let start = base.wrapping_add((row * TEXT_COLUMNS) as u16);
        READY_PROMPT
            .iter()
            .enumerate()
            .all(|(i, code)| m.vic_read(start.wrapping_add(i as u16)) == *code)
    })
}
