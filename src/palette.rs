use tui::style::Color;

/// the machine's 16 colours as xterm-256color indices
#[rustfmt::skip]
pub const PALETTE: [u8; 16] = [
    16,  // black
    231, // white
    88,  // red
    73,  // cyan
    54,  // purple
    71,  // green
    18,  // blue
    185, // yellow
    136, // orange
    58,  // brown
    131, // light red
    59,  // dark grey
    102, // grey
    150, // light green
    62,  // light blue
    145, // light grey
];

/// number of colour pairs; one per foreground/background combination
pub const PAIR_COUNT: usize = 256;

/// colour pair id, 1..=256, for a foreground and background colour. only the
/// low nibble of each is used
pub fn pair_id(fg: u8, bg: u8) -> u16 {
    ((fg & 0xf) as u16) * 16 + (bg & 0xf) as u16 + 1
}

/// every foreground/background combination, registered once at startup
pub struct ColorPairs {
    pairs: [(Color, Color); PAIR_COUNT],
}

impl ColorPairs {
    pub fn new() -> ColorPairs {
        let mut pairs = [(Color::Reset, Color::Reset); PAIR_COUNT];
        for fg in 0..16u8 {
            for bg in 0..16u8 {
                pairs[pair_id(fg, bg) as usize - 1] = (
                    Color::Indexed(PALETTE[fg as usize]),
                    Color::Indexed(PALETTE[bg as usize]),
                );
            }
        }
        ColorPairs { pairs }
    }

    /// (foreground, background) for a pair id; unknown ids get the terminal
    /// defaults
    pub fn get(&self, id: u16) -> (Color, Color) {
        match id {
            1..=256 => self.pairs[id as usize - 1],
            _ => (Color::Reset, Color::Reset),
        }
    }
}

impl Default for ColorPairs {
    fn default() -> Self {
        ColorPairs::new()
    }
}
