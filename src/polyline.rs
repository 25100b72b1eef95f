//! Encoded polyline codec
//!
//! Directions services return route geometry as an encoded polyline: each
//! coordinate is stored as the delta from the previous one, scaled by 1e5 and
//! written as variable-length groups of 5 bits.
//!
//! - Each character holds one group in its low 5 bits, offset by 63
//! - Bit 0x20 set means another group follows
//! - Groups are little-endian; the lowest bit of the result is the sign

use std::fmt;

use crate::geo::Coordinate;

const PRECISION: f64 = 1e5;
const CHAR_OFFSET: u8 = 63;
const CONTINUATION: u64 = 0x20;
const GROUP_MASK: u64 = 0x1f;
// The last group of a 64-bit value starts at bit 60 and has room for 4 bits only.
const MAX_SHIFT: u32 = 60;

/// Failure while decoding an encoded polyline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeError {
    /// Input ended inside a value (mid continuation group, or a latitude with no longitude)
    Truncated { offset: usize },
    /// Byte outside the `?`..=`~` alphabet
    InvalidCharacter { offset: usize, byte: u8 },
    /// Value ran past the accumulator width
    Overflow { offset: usize },
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeError::Truncated { offset } => {
                write!(f, "truncated value at offset {}", offset)
            }
            DecodeError::InvalidCharacter { offset, byte } => {
                write!(f, "invalid character 0x{:02X} at offset {}", byte, offset)
            }
            DecodeError::Overflow { offset } => {
                write!(f, "value overflow at offset {}", offset)
            }
        }
    }
}

impl std::error::Error for DecodeError {}

/// Decodes an encoded polyline into coordinates
pub fn decode(encoded: &str) -> Result<Vec<Coordinate>, DecodeError> {
    let mut reader = ValueReader::new(encoded.as_bytes());
    let mut points = Vec::with_capacity(encoded.len() / 4);
    let mut lat: i64 = 0;
    let mut lng: i64 = 0;

    while !reader.is_empty() {
        lat = reader.accumulate(lat)?;
        lng = reader.accumulate(lng)?;

        points.push(Coordinate::new(lat as f64 / PRECISION, lng as f64 / PRECISION));
    }

    Ok(points)
}

/// Encodes coordinates as a polyline; exact inverse of [`decode`] at 1e-5 precision
pub fn encode(points: &[Coordinate]) -> String {
    let mut output = String::with_capacity(points.len() * 8);
    let mut prev_lat: i64 = 0;
    let mut prev_lng: i64 = 0;

    for point in points {
        let lat = (point.latitude * PRECISION).round() as i64;
        let lng = (point.longitude * PRECISION).round() as i64;

        write_value(&mut output, lat - prev_lat);
        write_value(&mut output, lng - prev_lng);

        prev_lat = lat;
        prev_lng = lng;
    }

    output
}

fn write_value(output: &mut String, value: i64) {
    let mut bits = (value << 1) as u64;
    if value < 0 {
        bits = !bits;
    }

    while bits >= CONTINUATION {
        output.push(((CONTINUATION | (bits & GROUP_MASK)) as u8 + CHAR_OFFSET) as char);
        bits >>= 5;
    }
    output.push((bits as u8 + CHAR_OFFSET) as char);
}

/// Reads zigzag-signed varints from the encoded byte stream
struct ValueReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> ValueReader<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    fn is_empty(&self) -> bool {
        self.pos >= self.data.len()
    }

    fn read_value(&mut self) -> Result<i64, DecodeError> {
        let mut result: u64 = 0;
        let mut shift: u32 = 0;

        loop {
            let byte = *self
                .data
                .get(self.pos)
                .ok_or(DecodeError::Truncated { offset: self.pos })?;

            if !(CHAR_OFFSET..=CHAR_OFFSET + 63).contains(&byte) {
                return Err(DecodeError::InvalidCharacter { offset: self.pos, byte });
            }
            let group = (byte - CHAR_OFFSET) as u64;
            if shift > MAX_SHIFT || (shift == MAX_SHIFT && group & GROUP_MASK > 0xf) {
                return Err(DecodeError::Overflow { offset: self.pos });
            }

            self.pos += 1;

            result |= (group & GROUP_MASK) << shift;
            shift += 5;

            if group < CONTINUATION {
                break;
            }
        }

        let magnitude = (result >> 1) as i64;
        Ok(if result & 1 == 1 { !magnitude } else { magnitude })
    }

    /// Reads one delta and adds it to the running value
    fn accumulate(&mut self, running: i64) -> Result<i64, DecodeError> {
        let offset = self.pos;
        running
            .checked_add(self.read_value()?)
            .ok_or(DecodeError::Overflow { offset })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const REFERENCE: &str = "_p~iF~ps|U_ulLnnqC_mqNvxq`@";

    fn assert_close(actual: &[Coordinate], expected: &[(f64, f64)]) {
        assert_eq!(actual.len(), expected.len());
        for (point, &(lat, lng)) in actual.iter().zip(expected) {
            assert!((point.latitude - lat).abs() < 1e-9, "{:?} vs {:?}", point, (lat, lng));
            assert!((point.longitude - lng).abs() < 1e-9, "{:?} vs {:?}", point, (lat, lng));
        }
    }

    #[test]
    fn test_reference_vector() {
        let points = decode(REFERENCE).unwrap();
        assert_close(&points, &[(38.5, -120.2), (40.7, -120.95), (43.252, -126.453)]);
    }

    #[test]
    fn test_encode_reference_vector() {
        let points = vec![
            Coordinate::new(38.5, -120.2),
            Coordinate::new(40.7, -120.95),
            Coordinate::new(43.252, -126.453),
        ];
        assert_eq!(encode(&points), REFERENCE);
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(decode("").unwrap(), vec![]);
        assert_eq!(encode(&[]), "");
    }

    #[test]
    fn test_round_trip_campus_route() {
        let points = vec![
            Coordinate::new(12.87279953771407, 80.2208933391326),
            Coordinate::new(12.872502, 80.219496),
            Coordinate::new(12.873147339012304, 80.22180918077176),
            Coordinate::new(12.871388230107986, 80.22526689609808),
            Coordinate::new(-33.8688, 151.2093),
            Coordinate::new(0.0, 0.0),
        ];

        let decoded = decode(&encode(&points)).unwrap();
        assert_eq!(decoded.len(), points.len());
        for (a, b) in decoded.iter().zip(&points) {
            assert!((a.latitude - b.latitude).abs() <= 1e-5);
            assert!((a.longitude - b.longitude).abs() <= 1e-5);
        }
    }

    #[test]
    fn test_truncated_continuation_group() {
        // '|' carries the continuation bit, so the longitude never finishes
        let err = decode("_p~iF~ps|").unwrap_err();
        assert_eq!(err, DecodeError::Truncated { offset: 9 });
    }

    #[test]
    fn test_latitude_without_longitude() {
        let err = decode("_p~iF").unwrap_err();
        assert_eq!(err, DecodeError::Truncated { offset: 5 });
    }

    #[test]
    fn test_invalid_character() {
        let err = decode("_p~iF ps|U").unwrap_err();
        assert_eq!(err, DecodeError::InvalidCharacter { offset: 5, byte: b' ' });
    }

    #[test]
    fn test_overflow() {
        let input = "~".repeat(20);
        assert!(matches!(decode(&input), Err(DecodeError::Overflow { .. })));
    }

    #[test]
    fn test_last_group_wider_than_accumulator() {
        // twelve full groups put the thirteenth at bit 60, where '^' needs five bits
        let input = ("~".repeat(12) + "^").repeat(4);
        assert_eq!(decode(&input), Err(DecodeError::Overflow { offset: 12 }));
    }

    #[test]
    fn test_running_sum_overflow() {
        // each latitude delta is 2^62 and fits on its own; the second one overflows the sum
        let big = "_".repeat(12) + "G";
        let input = format!("{big}?{big}?");
        assert_eq!(decode(&input), Err(DecodeError::Overflow { offset: 14 }));
    }

    #[test]
    fn test_largest_single_delta_decodes() {
        let input = "_".repeat(12) + "G?";
        let points = decode(&input).unwrap();
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].latitude, (1i64 << 62) as f64 / PRECISION);
    }
}
