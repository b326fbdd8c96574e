use crate::error::{Error, Result};
use crate::machine::{Machine, BASIC_START, VARTAB};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

/// A PRG image: 2-byte little-endian load address, then the bytes to place
/// there.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrgImage<'a> {
    pub load_address: u16,
    pub data: &'a [u8],
}

impl<'a> PrgImage<'a> {
    pub fn parse(bytes: &'a [u8]) -> Result<PrgImage<'a>> {
        match bytes {
            [lo, hi, data @ ..] => Ok(PrgImage {
                load_address: u16::from_le_bytes([*lo, *hi]),
                data,
            }),
            _ => Err(Error::ShortImage(bytes.len())),
        }
    }

    /// first address after the image
    pub fn end_address(&self) -> usize {
        self.load_address as usize + self.data.len()
    }
}

/// quickload a PRG file; returns where it went
pub fn load_file(m: &mut impl Machine, path: &Path) -> Result<u16> {
    let bytes = fs::read(path)?;
    let image = PrgImage::parse(&bytes)?;
    if !m.quickload(image.load_address, image.data) {
        return Err(Error::Rejected(image.load_address));
    }
    log::info!(
        "loaded {} to ${:04x}-${:04x}",
        path.display(),
        image.load_address,
        image.end_address()
    );
    Ok(image.load_address)
}

/// write memory `start..end` as a PRG file; returns the bytes written
pub fn save_range(m: &impl Machine, path: &Path, start: u16, end: u16) -> Result<usize> {
    let mut out = BufWriter::new(File::create(path)?);
    out.write_all(&start.to_le_bytes())?;
    let data: Vec<u8> = (start..end).map(|addr| m.cpu_read(addr)).collect();
    out.write_all(&data)?;
    out.flush()?;
    log::info!("saved ${:04x}-${:04x} to {}", start, end, path.display());
    Ok(2 + data.len())
}

/// save the BASIC program, from its usual start to the end-of-program pointer
pub fn save_file(m: &impl Machine, path: &Path) -> Result<usize> {
    save_range(m, path, BASIC_START, m.cpu_read16(VARTAB))
}
