//! # c64term
//!
//! A Commodore 64 in a terminal. The chips are emulated elsewhere, behind
//! `machine::Machine`; this crate runs that emulation in step with the real
//! world and shows the text screen with Unicode glyphs in 256 colours.
//!
//! ## Design
//!
//! * frame rate matches a PAL machine exactly (19656 ticks at 985248Hz)
//! * the emulation runs a few raster lines at a time, and the part of the
//!   screen those lines produced is rebuilt straight away
//! * only cells that changed since the last frame are drawn; terminals are
//!   slow and a frame is 50x31 cells
//! * keys are injected one per frame, so the machine's keyboard scan sees
//!   every one
//! * abstract the terminal (tui backend) and input (crossterm events), so
//!   tests can run without a tty
//!
//! Model
//!
//! main
//!  |-- machine, config, terminal display, input
//!  `-- session(machine, config)
//!       `-- loop until shutdown
//!            |-- scanline executor: per sub-range
//!            |     exec(exact micros) -> compose border rows | text row
//!            |-- auto-run: BASIC ready? -> load, type "RUN"
//!            |-- one input event -> command
//!            |-- type one queued key
//!            |-- diff renderer -> backend -> flush
//!            `-- frame clock: sleep until next deadline, if it's ahead

pub mod config;
pub mod display;
pub mod error;
pub mod font;
pub mod input;
pub mod machine;
pub mod palette;
pub mod prg;
pub mod ready;
pub mod scanline;
pub mod screen;
pub mod session;
pub mod timing;
