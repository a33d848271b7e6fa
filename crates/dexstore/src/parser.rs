//! Append-log format parser using nom
//!
//! File format:
//! ```text
//! DEXLOG1\n
//! [version: u32]
//! ...records (\n-terminated)...
//! ```
//!
//! Record format:
//! ```text
//! S\t<key>\t<value>\n     set key to value
//! D\t<key>\n              remove key
//! ```

use nom::{
    branch::alt,
    bytes::complete::{tag, take_till, take_until},
    character::complete::char,
    combinator::{map, map_res},
    sequence::tuple,
    IResult,
};

use crate::error::{Error, Result};

/// Magic header for dex log files
pub const LOG_MAGIC: &[u8] = b"DEXLOG1\n";

/// Current log format version
pub const LOG_VERSION: u32 = 1;

/// Length of the fixed header
pub const HEADER_LEN: usize = LOG_MAGIC.len() + 4;

/// Log file header
#[derive(Debug, Clone, PartialEq)]
pub struct LogHeader {
    /// File format version
    pub version: u32,
}

/// A single replayable mutation
#[derive(Debug, Clone, PartialEq)]
pub enum Record<'a> {
    /// Key set to value
    Set {
        /// Entry key
        key: &'a str,
        /// Entry value
        value: &'a str,
    },
    /// Key removed
    Delete {
        /// Entry key
        key: &'a str,
    },
}

/// Parse the log file header
///
/// Format:
/// ```text
/// DEXLOG1\n
/// [4 bytes: version u32 little-endian]
/// ```
pub fn parse_header(input: &[u8]) -> Result<LogHeader> {
    if input.len() < HEADER_LEN {
        return Err(Error::Parse("Input too short for header".to_string()));
    }

    if &input[0..LOG_MAGIC.len()] != LOG_MAGIC {
        return Err(Error::Parse("Invalid log magic header".to_string()));
    }

    let mut version_bytes = [0u8; 4];
    version_bytes.copy_from_slice(&input[LOG_MAGIC.len()..HEADER_LEN]);
    let version = u32::from_le_bytes(version_bytes);

    if version != LOG_VERSION {
        return Err(Error::Parse(format!("Unsupported log version {}", version)));
    }

    Ok(LogHeader { version })
}

/// Create a log file header
pub fn create_header(version: u32) -> Vec<u8> {
    let mut header = Vec::with_capacity(HEADER_LEN);
    header.extend_from_slice(LOG_MAGIC);
    header.extend_from_slice(&version.to_le_bytes());
    header
}

fn key_field(input: &[u8]) -> IResult<&[u8], &str> {
    map_res(take_till(|c: u8| c == b'\t' || c == b'\n'), std::str::from_utf8)(input)
}

fn set_record(input: &[u8]) -> IResult<&[u8], Record<'_>> {
    map(
        tuple((
            tag("S\t"),
            key_field,
            char('\t'),
            map_res(take_until("\n"), std::str::from_utf8),
            char('\n'),
        )),
        |(_, key, _, value, _)| Record::Set { key, value },
    )(input)
}

fn delete_record(input: &[u8]) -> IResult<&[u8], Record<'_>> {
    map(
        tuple((tag("D\t"), key_field, char('\n'))),
        |(_, key, _)| Record::Delete { key },
    )(input)
}

/// Parse one record
pub fn parse_record(input: &[u8]) -> IResult<&[u8], Record<'_>> {
    alt((set_record, delete_record))(input)
}

/// Parse records until the input ends or stops parsing.
///
/// Returns the records and the number of bytes they span. A short count means
/// the tail after that offset is torn or corrupt.
pub fn parse_records(input: &[u8]) -> (Vec<Record<'_>>, usize) {
    let mut records = Vec::new();
    let mut rest = input;

    while !rest.is_empty() {
        match parse_record(rest) {
            Ok((remaining, record)) => {
                records.push(record);
                rest = remaining;
            }
            Err(_) => break,
        }
    }

    (records, input.len() - rest.len())
}

/// Encode a set record
pub fn encode_set(key: &str, value: &str) -> Vec<u8> {
    let mut line = Vec::with_capacity(key.len() + value.len() + 4);
    line.extend_from_slice(b"S\t");
    line.extend_from_slice(key.as_bytes());
    line.push(b'\t');
    line.extend_from_slice(value.as_bytes());
    line.push(b'\n');
    line
}

/// Encode a delete record
pub fn encode_delete(key: &str) -> Vec<u8> {
    let mut line = Vec::with_capacity(key.len() + 3);
    line.extend_from_slice(b"D\t");
    line.extend_from_slice(key.as_bytes());
    line.push(b'\n');
    line
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_header() {
        let header = create_header(LOG_VERSION);
        let parsed = parse_header(&header).unwrap();

        assert_eq!(parsed.version, LOG_VERSION);
    }

    #[test]
    fn test_parse_header_invalid_magic() {
        let mut header = create_header(LOG_VERSION);
        header[0] = b'X'; // Corrupt magic

        assert!(parse_header(&header).is_err());
    }

    #[test]
    fn test_parse_header_too_short() {
        assert!(parse_header(b"DEXLOG1\n").is_err());
    }

    #[test]
    fn test_parse_header_unknown_version() {
        let header = create_header(9);
        assert!(parse_header(&header).is_err());
    }

    #[test]
    fn test_parse_set_and_delete() {
        let input = b"S\tpoke_favs\t[{\"id\":1}]\nD\tpoke_favs\nmore";
        let (rest, first) = parse_record(input).unwrap();
        assert_eq!(
            first,
            Record::Set {
                key: "poke_favs",
                value: "[{\"id\":1}]"
            }
        );

        let (rest, second) = parse_record(rest).unwrap();
        assert_eq!(second, Record::Delete { key: "poke_favs" });
        assert_eq!(rest, b"more");
    }

    #[test]
    fn test_value_may_contain_tabs() {
        let line = encode_set("k", "a\tb");
        let (_, record) = parse_record(&line).unwrap();
        assert_eq!(record, Record::Set { key: "k", value: "a\tb" });
    }

    #[test]
    fn test_parse_records_stops_at_torn_tail() {
        let mut input = encode_set("a", "1");
        input.extend(encode_delete("b"));
        let good_len = input.len();
        input.extend_from_slice(b"S\tc\t{\"partial");

        let (records, consumed) = parse_records(&input);
        assert_eq!(records.len(), 2);
        assert_eq!(consumed, good_len);
    }
}
