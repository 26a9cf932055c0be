use crate::core::{BarcodeData, DigitLine};
use crate::domain::model::{BARCODE_DATA_LENGTH, DIGIT_LINE_LENGTH};
use crate::utils::error::{BarcodeError, Result};
use std::ops::Range;

/// Slices of the digit line, in barcode order. Positions 9, 20 and 31 hold the
/// block check digits and do not appear in the barcode.
const PAYLOAD_RANGES: [Range<usize>; 5] = [0..4, 32..47, 4..9, 10..20, 21..31];

/// Drops the spaces and periods used to group the printed line.
pub fn sanitize(line: &str) -> String {
    line.chars().filter(|c| *c != ' ' && *c != '.').collect()
}

pub fn parse(line: &str) -> Result<DigitLine> {
    let sanitized = sanitize(line);
    let actual = sanitized.chars().count();
    if actual != DIGIT_LINE_LENGTH {
        return Err(BarcodeError::InvalidLength {
            expected: DIGIT_LINE_LENGTH,
            actual,
        });
    }
    Ok(DigitLine::new_unchecked(sanitized))
}

/// Rearranges a parsed digit line into the ITF payload.
pub fn to_barcode_data(line: &DigitLine) -> BarcodeData {
    let chars: Vec<char> = line.as_str().chars().collect();
    let mut data = String::with_capacity(BARCODE_DATA_LENGTH);
    for range in PAYLOAD_RANGES.iter() {
        data.extend(&chars[range.clone()]);
    }
    BarcodeData::new(data)
}

/// Sanitizes, checks the length and reorders a printed digit line.
/// Check digits are not verified.
pub fn transform(line: &str) -> Result<BarcodeData> {
    let digit_line = parse(line)?;
    let data = to_barcode_data(&digit_line);
    tracing::debug!(digit_line = %digit_line, barcode_data = %data, "Transformed digit line");
    Ok(data)
}
