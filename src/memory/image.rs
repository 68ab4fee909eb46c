//! Program images: the textual form LS-8 programs are distributed in.
//!
//! An image is a text file with one byte per line, written as exactly eight
//! `0`/`1` characters, most significant bit first. Blank lines are skipped and
//! surrounding whitespace is ignored. There is no comment syntax, length
//! prefix, or checksum; bytes are loaded in file order starting at address 0.

use crate::arch::ls8::{Data, PtrVal};
use crate::error::{Error, Result};
use crate::memory::Memory;
use std::fs;
use std::io::BufRead;
use std::path::Path;

/// Parse a single trimmed line of an image.
fn parse_line(text: &str) -> Option<Data> {
    if text.len() != 8 || !text.bytes().all(|b| b == b'0' || b == b'1') {
        return None;
    }

    Data::from_str_radix(text, 2).ok()
}

/// Parse an image held in a string into the bytes it encodes.
#[cfg(test)]
pub fn parse_image(source: &str) -> Result<Vec<Data>> {
    read_image(source.as_bytes())
}

/// Parse an image from any buffered reader.
pub fn read_image<R>(reader: R) -> Result<Vec<Data>>
where
    R: BufRead,
{
    let mut bytes = Vec::new();

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let text = line.trim();
        if text.is_empty() {
            continue;
        }

        bytes.push(parse_line(text).ok_or_else(|| Error::MalformedProgramLine {
            line: index + 1,
            text: text.to_string(),
        })?);
    }

    Ok(bytes)
}

/// Load an image into memory at address 0, yielding the number of bytes
/// loaded.
///
/// Nothing is written unless the whole image parses and fits.
pub fn load_image<R>(reader: R, memory: &mut Memory) -> Result<PtrVal>
where
    R: BufRead,
{
    let bytes = read_image(reader)?;
    memory.load(0, &bytes)?;

    tracing::debug!("Loaded {} bytes of program image", bytes.len());

    Ok(bytes.len())
}

/// Load an image file from disk into memory at address 0.
pub fn load_image_file<P>(path: P, memory: &mut Memory) -> Result<PtrVal>
where
    P: AsRef<Path>,
{
    let file = fs::File::open(path.as_ref())?;

    tracing::info!("Loading program image {}", path.as_ref().display());

    load_image(std::io::BufReader::new(file), memory)
}
