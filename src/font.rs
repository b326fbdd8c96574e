/// which of the two character sets is on screen. toggled by the user, never
/// by the machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Charset {
    /// upper case and graphics (power-on)
    #[default]
    Upper,
    /// lower and upper case
    Lower,
}

impl Charset {
    pub fn toggled(self) -> Charset {
        match self {
            Charset::Upper => Charset::Lower,
            Charset::Lower => Charset::Upper,
        }
    }

    /// glyph for a screen code; bit 7 (reverse) is ignored
    pub fn glyph(self, code: u8) -> &'static str {
        let table = match self {
            Charset::Upper => &GLYPHS_UPPER,
            Charset::Lower => &GLYPHS_LOWER,
        };
        table[(code & 0x7f) as usize]
    }
}

/// screen codes 0x00-0x7f of the upper case/graphics set, as UTF-8
#[rustfmt::skip]
pub const GLYPHS_UPPER: [&str; 128] = [
    "@", "A", "B", "C", "D", "E", "F", "G", "H", "I", "J", "K", "L", "M", "N", "O", // 0x00
    "P", "Q", "R", "S", "T", "U", "V", "W", "X", "Y", "Z", "[", "£", "]", "↑", "←", // 0x10
    " ", "!", "\"", "#", "$", "%", "&", "´", "(", ")", "*", "+", ",", "-", ".", "/", // 0x20
    "0", "1", "2", "3", "4", "5", "6", "7", "8", "9", ":", ";", "<", "=", ">", "?", // 0x30
    "🭸", "♠", "🭳", "🭸", "🭸", "🭷", "🭺", "🭲", "🭴", "╮", "╰", "╯", "🭼", "╲", "╱", "🭽", // 0x40
    "🭾", "●", "🭻", "♥", "┃", "╭", "╳", "○", "♣", "┃", "♦", "╋", "🮌", "┃", "π", "◥", // 0x50
    " ", "▌", "▄", "▔", "▁", "▏", "🮐", "🭵", "🮏", "◤", "🭵", "┣", "▗", "┗", "┓", "▁", // 0x60
    "┏", "┻", "┳", "┫", "▏", "▍", "🮈", "🮃", "▀", "▃", "🭿", "▖", "▝", "┛", "▘", "▚", // 0x70
];

/// screen codes 0x00-0x7f of the lower/upper case set, as UTF-8
#[rustfmt::skip]
pub const GLYPHS_LOWER: [&str; 128] = [
    "@", "a", "b", "c", "d", "e", "f", "g", "h", "i", "j", "k", "l", "m", "n", "o", // 0x00
    "p", "q", "r", "s", "t", "u", "v", "w", "x", "y", "z", "[", "£", "]", "↑", "←", // 0x10
    " ", "!", "\"", "#", "$", "%", "&", "´", "(", ")", "*", "+", ",", "-", ".", "/", // 0x20
    "0", "1", "2", "3", "4", "5", "6", "7", "8", "9", ":", ";", "<", "=", ">", "?", // 0x30
    "🭸", "A", "B", "C", "D", "E", "F", "G", "H", "I", "J", "K", "L", "M", "N", "O", // 0x40
    "P", "Q", "R", "S", "T", "U", "V", "W", "X", "Y", "Z", "╋", "🮌", "┃", "π", "◥", // 0x50
    " ", "▌", "▄", "▔", "▁", "▏", "🮐", "🭵", "🮏", "◤", "🭵", "┣", "▗", "┗", "┓", "▁", // 0x60
    "┏", "┻", "┳", "┫", "▏", "▍", "🮈", "🮃", "▀", "▃", "🭿", "▖", "▝", "┛", "▘", "▚", // 0x70
];
