use std::io;
use thiserror::Error;

/// things that can go wrong moving program images in and out of the machine
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// fewer bytes than the 2-byte load address header
    #[error("program image too short ({0} bytes)")]
    ShortImage(usize),

    /// the machine refused to place the image
    #[error("machine rejected image at ${0:04x}")]
    Rejected(u16),
}

pub type Result<T> = std::result::Result<T, Error>;
