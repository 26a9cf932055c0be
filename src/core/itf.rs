//! Interleaved 2 of 5 encoding.
//!
//! The symbol is produced as a list of run widths in modules, alternating
//! bar / space and starting with a bar. Each digit is five elements, two of
//! them wide; digits are taken in pairs, the first drawn in the bars and the
//! second in the spaces between them.

use crate::utils::error::{BarcodeError, Result};

/// Wide (`W`) / narrow (`N`) elements per digit.
const PATTERNS: [&[u8; 5]; 10] = [
    b"NNWWN", b"WNNNW", b"NWNNW", b"WWNNN", b"NNWNW",
    b"WNWNN", b"NWWNN", b"NNNWW", b"WNNWN", b"NWNWN",
];

/// Digit values of `data`, left-padded with a zero to an even count.
pub fn normalize(data: &str) -> Result<Vec<u8>> {
    if data.is_empty() {
        return Err(BarcodeError::EmptyBarcodeData);
    }

    let mut digits = Vec::with_capacity(data.len() + 1);
    for (position, character) in data.chars().enumerate() {
        match character.to_digit(10) {
            Some(d) => digits.push(d as u8),
            _ => {
                return Err(BarcodeError::IllegalCharacter {
                    character,
                    position,
                })
            }
        }
    }

    if digits.len() % 2 != 0 {
        digits.insert(0, 0);
    }
    Ok(digits)
}

/// Run widths of the full symbol, guards included, quiet zones excluded.
pub fn encode_runs(data: &str, narrow: u32, wide: u32) -> Result<Vec<u32>> {
    let digits = normalize(data)?;
    let width = |element: u8| if element == b'W' { wide } else { narrow };

    let mut runs = Vec::with_capacity(4 + digits.len() * 5 + 3);
    // start guard: bar, space, bar, space
    runs.extend_from_slice(&[narrow; 4]);

    for pair in digits.chunks_exact(2) {
        let bars = PATTERNS[pair[0] as usize];
        let spaces = PATTERNS[pair[1] as usize];
        for (bar, space) in bars.iter().zip(spaces.iter()) {
            runs.push(width(*bar));
            runs.push(width(*space));
        }
    }

    // stop guard: wide bar, space, bar
    runs.extend_from_slice(&[wide, narrow, narrow]);
    Ok(runs)
}

pub fn module_count(runs: &[u32]) -> u32 {
    runs.iter().sum()
}

/// Modules in a symbol of `digits` digits, without encoding it.
pub fn symbol_modules(digits: usize, narrow: u32, wide: u32) -> u64 {
    let (narrow, wide) = (narrow as u64, wide as u64);
    let padded = (digits + digits % 2) as u64;
    4 * narrow + padded * (2 * wide + 3 * narrow) + wide + 2 * narrow
}

/// Run widths of one scanned row, from the first dark pixel to the last.
pub fn row_runs(row: &[u8]) -> Vec<u32> {
    let dark = |p: &u8| *p < 128;
    let (Some(first), Some(last)) = (row.iter().position(dark), row.iter().rposition(dark)) else {
        return Vec::new();
    };

    let mut runs = Vec::new();
    let mut current = true;
    let mut len = 0u32;
    for pixel in &row[first..=last] {
        if dark(pixel) == current {
            len += 1;
        } else {
            runs.push(len);
            current = !current;
            len = 1;
        }
    }
    runs.push(len);
    runs
}

/// Reads the digits back out of run widths in any unit. Runs wider than the
/// midpoint of the shortest and longest run count as wide.
pub fn decode_runs(runs: &[u32]) -> Option<String> {
    if runs.len() < 7 || (runs.len() - 7) % 10 != 0 {
        return None;
    }
    let shortest = *runs.iter().min()?;
    let longest = *runs.iter().max()?;
    let element = |w: &u32| if 2 * *w > shortest + longest { b'W' } else { b'N' };

    let (start, rest) = runs.split_at(4);
    let (body, stop) = rest.split_at(rest.len() - 3);
    let start: Vec<u8> = start.iter().map(element).collect();
    let stop: Vec<u8> = stop.iter().map(element).collect();
    if start != b"NNNN" || stop != b"WNN" {
        return None;
    }

    let mut digits = String::with_capacity(body.len() / 5);
    for chunk in body.chunks_exact(10) {
        let bars: Vec<u8> = chunk.iter().step_by(2).map(element).collect();
        let spaces: Vec<u8> = chunk.iter().skip(1).step_by(2).map(element).collect();
        digits.push(digit_for(&bars)?);
        digits.push(digit_for(&spaces)?);
    }
    Some(digits)
}

fn digit_for(elements: &[u8]) -> Option<char> {
    let digit = PATTERNS.iter().position(|p| p.as_slice() == elements)?;
    char::from_digit(digit as u32, 10)
}
