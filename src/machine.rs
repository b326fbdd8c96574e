//! # machine
//!
//! The front end never emulates chips itself. Everything it needs from the
//! hardware emulation goes through `Machine`: run for a slice of emulated
//! time, peek at the CPU and video chip address spaces, press keys, and
//! drop a program image straight into RAM.
//!
//! Addresses the front end cares about:
//!
//!   0x002b  TXTTAB  start of BASIC program text (0x0801 after power-on)
//!   0x002d  VARTAB  end of BASIC program text
//!   0x00c6  NDX     number of characters in the keyboard buffer
//!   0x0400  default screen memory (video chip address space)
//!   0xd018  video chip memory pointers; bits 4-7 select the screen page
//!   0xd020  border colour
//!   0xd021  background colour 0

use crate::timing;

pub const TXTTAB: u16 = 0x002b;
pub const VARTAB: u16 = 0x002d;
pub const KEYBUF_COUNT: u16 = 0x00c6;
pub const BASIC_START: u16 = 0x0801;

/// video chip register offsets from 0xd000
pub const VIC_MEMORY_POINTERS: u8 = 0x18;
pub const VIC_BORDER_COLOUR: u8 = 0x20;
pub const VIC_BACKGROUND_COLOUR: u8 = 0x21;

/// the hardware emulation as seen by the front end
pub trait Machine {
    /// run the emulation for this many microseconds of emulated time
    fn exec(&mut self, micros: f64);

    /// read a byte from the CPU's view of memory
    fn cpu_read(&self, addr: u16) -> u8;

    /// read a little-endian word from the CPU's view of memory
    fn cpu_read16(&self, addr: u16) -> u16 {
        u16::from_le_bytes([self.cpu_read(addr), self.cpu_read(addr.wrapping_add(1))])
    }

    /// read a byte from the video chip's 16K view of memory
    fn vic_read(&self, addr: u16) -> u8;

    /// read a video chip register without side effects
    fn vic_register(&self, reg: u8) -> u8;

    /// read colour RAM; only the low nibble is wired
    fn color_ram(&self, offset: u16) -> u8;

    fn key_down(&mut self, key: u8);
    fn key_up(&mut self, key: u8);

    /// place `bytes` at `addr`, bypassing any storage device. false if the
    /// machine refuses the image
    fn quickload(&mut self, addr: u16, bytes: &[u8]) -> bool;
}

const RAM_SIZE_BYTES: usize = 0x10000;
const COLOR_RAM_SIZE_BYTES: usize = 0x400;
const VIC_REGISTER_COUNT: usize = 0x40;

/// Memory-only machine: holds RAM, colour RAM and the video chip registers
/// but has no CPU, so `exec` just counts ticks. Good for tests, and for
/// bringing the front end up without a chip backend.
pub struct MemoryMachine {
    ram: Box<[u8]>,
    color_ram: [u8; COLOR_RAM_SIZE_BYTES],
    vic_registers: [u8; VIC_REGISTER_COUNT],
    ticks: u64,
    exec_calls: Vec<u64>,
    keys: Vec<u8>,
    held: Vec<u8>,
}

impl MemoryMachine {
    pub fn new() -> MemoryMachine {
        let mut vic_registers = [0u8; VIC_REGISTER_COUNT];
        // screen at 0x0400, upper case character set, light blue on blue
        vic_registers[VIC_MEMORY_POINTERS as usize] = 0x15;
        vic_registers[VIC_BORDER_COLOUR as usize] = 14;
        vic_registers[VIC_BACKGROUND_COLOUR as usize] = 6;
        MemoryMachine {
            ram: vec![0u8; RAM_SIZE_BYTES].into_boxed_slice(),
            color_ram: [0u8; COLOR_RAM_SIZE_BYTES],
            vic_registers,
            ticks: 0,
            exec_calls: Vec::new(),
            keys: Vec::new(),
            held: Vec::new(),
        }
    }

    /// memory as the KERNAL leaves it after power-on: banner, `READY.`
    /// prompt, empty BASIC program
    pub fn booted() -> MemoryMachine {
        let mut m = MemoryMachine::new();
        m.ram[0x0400..0x07e8].fill(0x20);
        m.color_ram.fill(14);
        m.write_screen_text(1, 4, "**** COMMODORE 64 BASIC V2 ****");
        m.write_screen_text(3, 1, "64K RAM SYSTEM  38911 BASIC BYTES FREE");
        m.write_screen_text(5, 0, "READY.");
        m.set_basic_end(BASIC_START + 2);
        m.write_word(TXTTAB, BASIC_START);
        m
    }

    /// write ASCII text to the default screen as screen codes
    pub fn write_screen_text(&mut self, row: usize, col: usize, text: &str) {
        for (i, ch) in text.bytes().enumerate() {
            let code = match ch {
                b'@'..=b'_' => ch - 0x40,
                _ => ch,
            };
            let addr = 0x0400 + row * 40 + col + i;
            if addr < 0x07e8 {
                self.ram[addr] = code;
            }
        }
    }

    pub fn write(&mut self, addr: u16, value: u8) {
        self.ram[addr as usize] = value;
    }

    pub fn write_word(&mut self, addr: u16, value: u16) {
        let [lo, hi] = value.to_le_bytes();
        self.write(addr, lo);
        self.write(addr.wrapping_add(1), hi);
    }

    pub fn set_color_ram(&mut self, offset: u16, value: u8) {
        if let Some(c) = self.color_ram.get_mut(offset as usize) {
            *c = value;
        }
    }

    pub fn set_vic_register(&mut self, reg: u8, value: u8) {
        if let Some(r) = self.vic_registers.get_mut(reg as usize) {
            *r = value;
        }
    }

    /// clear RAM, leaving registers alone
    pub fn clear_ram(&mut self) {
        self.ram.fill(0);
    }

    /// total emulated ticks so far
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// tick count of every `exec` call, in order
    pub fn exec_calls(&self) -> &[u64] {
        &self.exec_calls
    }

    /// keys that have been pressed and released, in order
    pub fn typed_keys(&self) -> &[u8] {
        &self.keys
    }

    // the BASIC end-of-program, end-of-variables and end-of-arrays pointers
    fn set_basic_end(&mut self, end: u16) {
        self.write_word(VARTAB, end);
        self.write_word(0x002f, end);
        self.write_word(0x0031, end);
    }
}

impl Default for MemoryMachine {
    fn default() -> Self {
        MemoryMachine::new()
    }
}

impl Machine for MemoryMachine {
    fn exec(&mut self, micros: f64) {
        let ticks = timing::micros_to_ticks(micros);
        self.ticks += ticks;
        self.exec_calls.push(ticks);
    }

    fn cpu_read(&self, addr: u16) -> u8 {
        self.ram[addr as usize]
    }

    // NB. always bank 0, and without the character ROM overlay at 0x1000
    fn vic_read(&self, addr: u16) -> u8 {
        self.ram[(addr & 0x3fff) as usize]
    }

    fn vic_register(&self, reg: u8) -> u8 {
        self.vic_registers[(reg & 0x3f) as usize]
    }

    fn color_ram(&self, offset: u16) -> u8 {
        self.color_ram[(offset & 0x3ff) as usize]
    }

    fn key_down(&mut self, key: u8) {
        self.held.push(key);
    }

    fn key_up(&mut self, key: u8) {
        if let Some(pos) = self.held.iter().position(|k| *k == key) {
            self.held.remove(pos);
            self.keys.push(key);
        }
    }

    fn quickload(&mut self, addr: u16, bytes: &[u8]) -> bool {
        let start = addr as usize;
        let end = start + bytes.len();
        if end > RAM_SIZE_BYTES {
            return false;
        }
        self.ram[start..end].copy_from_slice(bytes);
        if addr == BASIC_START {
            self.set_basic_end(end as u16);
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_word_is_little_endian() {
        let mut m = MemoryMachine::new();
        m.write(0x2d, 0x34);
        m.write(0x2e, 0x12);
        assert_eq!(m.cpu_read16(VARTAB), 0x1234);
    }

    #[test]
    fn test_quickload_basic_sets_end_pointers() {
        let mut m = MemoryMachine::new();
        assert!(m.quickload(BASIC_START, &[1, 2, 3, 4]));
        assert_eq!(m.cpu_read(0x0803), 3);
        assert_eq!(m.cpu_read16(VARTAB), 0x0805);
        assert_eq!(m.cpu_read16(0x0031), 0x0805);
    }

    #[test]
    fn test_quickload_elsewhere_leaves_pointers() {
        let mut m = MemoryMachine::new();
        assert!(m.quickload(0xc000, &[0xea]));
        assert_eq!(m.cpu_read(0xc000), 0xea);
        assert_eq!(m.cpu_read16(VARTAB), 0);
    }

    #[test]
    fn test_quickload_rejects_overflow() {
        let mut m = MemoryMachine::new();
        assert!(!m.quickload(0xfffe, &[0, 0, 0]));
    }

    #[test]
    fn test_booted_screen() {
        let m = MemoryMachine::booted();
        // "READY." as screen codes on row 5
        let row: Vec<u8> = (0..6).map(|i| m.vic_read(0x0400 + 200 + i)).collect();
        assert_eq!(row, [0x12, 0x05, 0x01, 0x04, 0x19, 0x2e]);
        assert_eq!(m.cpu_read16(TXTTAB), BASIC_START);
        assert_eq!(m.cpu_read(KEYBUF_COUNT), 0);
    }

    #[test]
    fn test_keys_are_recorded_on_release() {
        let mut m = MemoryMachine::new();
        m.key_down(0x0d);
        assert!(m.typed_keys().is_empty());
        m.key_up(0x0d);
        assert_eq!(m.typed_keys(), &[0x0d]);
    }

    #[test]
    fn test_exec_counts_ticks() {
        let mut m = MemoryMachine::new();
        m.exec(timing::ticks_to_micros(504));
        m.exec(timing::ticks_to_micros(63));
        assert_eq!(m.ticks(), 567);
        assert_eq!(m.exec_calls(), &[504, 63]);
    }
}
