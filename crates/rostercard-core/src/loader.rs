//! Roster source loading.
//!
//! `load` never fails: a missing, unreadable or empty source is replaced by the
//! built-in fallback roster and the reason is recorded in the report. Rows
//! with too few fields are dropped individually and reported as warnings.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use crate::error::{ParseWarning, RosterError};
use crate::models::Record;
use crate::parser::{parse_line, parse_record};

/// Where the records in a `LoadReport` came from.
#[derive(Debug)]
pub enum RosterOrigin {
    /// Parsed from the source file
    File(PathBuf),
    /// The source was unusable; the fallback roster was substituted
    Fallback(RosterError),
}

#[derive(Debug)]
pub struct LoadReport {
    pub records: Vec<Record>,
    pub warnings: Vec<ParseWarning>,
    pub origin: RosterOrigin,
    pub loaded_at: DateTime<Utc>,
}

impl LoadReport {
    pub fn is_fallback(&self) -> bool {
        matches!(self.origin, RosterOrigin::Fallback(_))
    }

    fn fallback(reason: RosterError, warnings: Vec<ParseWarning>) -> Self {
        Self {
            records: default_roster(),
            warnings,
            origin: RosterOrigin::Fallback(reason),
            loaded_at: Utc::now(),
        }
    }
}

/// Load a roster from `path`, substituting the fallback roster on failure.
pub fn load(path: impl AsRef<Path>) -> LoadReport {
    let path = path.as_ref();

    let file = match File::open(path) {
        Ok(f) => f,
        Err(e) => {
            let reason = RosterError::from_open(path.to_path_buf(), e);
            warn!(path = %path.display(), error = %reason, "Using default roster data instead");
            return LoadReport::fallback(reason, Vec::new());
        }
    };

    match load_from_reader(BufReader::new(file)) {
        Ok((records, warnings)) => {
            info!(path = %path.display(), count = records.len(), "Loaded roster");
            LoadReport {
                records,
                warnings,
                origin: RosterOrigin::File(path.to_path_buf()),
                loaded_at: Utc::now(),
            }
        }
        Err((reason, warnings)) => {
            warn!(path = %path.display(), error = %reason, "Using default roster data instead");
            LoadReport::fallback(reason, warnings)
        }
    }
}

/// Parse a roster from any buffered reader.
///
/// The first line is a header and is always discarded. Lines may end in `\n`,
/// `\r\n` or a bare `\r`, and bytes that are not valid UTF-8 decode to U+FFFD.
/// On failure the error is returned together with the row warnings gathered
/// so far.
pub fn load_from_reader<R: BufRead>(
    mut reader: R,
) -> Result<(Vec<Record>, Vec<ParseWarning>), (RosterError, Vec<ParseWarning>)> {
    let mut records = Vec::new();
    let mut warnings = Vec::new();
    let mut raw = Vec::new();
    let mut line_number = 0;

    loop {
        match read_raw_line(&mut reader, &mut raw) {
            Ok(true) => {}
            Ok(false) => break,
            Err(e) => return Err((RosterError::SourceReadError(e), warnings)),
        }
        line_number += 1;
        let line = String::from_utf8_lossy(&raw);

        if line_number == 1 {
            debug!(header = %line, "Skipping header");
            continue;
        }

        match parse_record(&parse_line(&line), line_number) {
            Ok(record) => records.push(record),
            Err(warning) => {
                warn!(line = warning.line, fields = warning.fields, "Dropping malformed row");
                warnings.push(warning);
            }
        }
    }

    if records.is_empty() {
        return Err((RosterError::EmptySource, warnings));
    }

    Ok((records, warnings))
}

/// Read one line into `line` without its terminator.
///
/// `\n`, `\r\n` and a lone `\r` all end a line. Returns `Ok(false)` once the
/// input is exhausted.
fn read_raw_line<R: BufRead>(reader: &mut R, line: &mut Vec<u8>) -> io::Result<bool> {
    line.clear();
    let mut read_any = false;

    loop {
        let available = match reader.fill_buf() {
            Ok(buf) => buf,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        if available.is_empty() {
            return Ok(read_any);
        }
        read_any = true;

        match available.iter().position(|&b| b == b'\n' || b == b'\r') {
            Some(end) => {
                let terminator = available[end];
                line.extend_from_slice(&available[..end]);
                reader.consume(end + 1);
                if terminator == b'\r' {
                    skip_line_feed(reader)?;
                }
                return Ok(true);
            }
            None => {
                let len = available.len();
                line.extend_from_slice(available);
                reader.consume(len);
            }
        }
    }
}

/// Consume the `\n` of a `\r\n` pair, which may sit in the next buffer fill.
fn skip_line_feed<R: BufRead>(reader: &mut R) -> io::Result<()> {
    loop {
        match reader.fill_buf() {
            Ok(buf) => {
                if buf.first() == Some(&b'\n') {
                    reader.consume(1);
                }
                return Ok(());
            }
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
}

/// The roster shown when no usable source is available.
pub fn default_roster() -> Vec<Record> {
    vec![
        Record::new(
            "Player Roster - Quarterbacks",
            "Lamar Jackson – QB",
            "Stats:\n• NFL MVP: 2019, 2023\n• Career Passing Yards: 17,000+\n• Career Rushing Yards: 5,000+\n\nDescription:\nElite dual-threat quarterback and centerpiece of the Ravens offense.",
        ),
        Record::new(
            "Player Roster - Quarterbacks",
            "Cooper Rush – QB",
            "Stats:\n• NFL Starts: 10+\n\nDescription:\nVeteran backup quarterback providing experience and stability.",
        ),
        Record::new(
            "Player Roster - Running Backs",
            "Derrick Henry – RB",
            "Stats:\n• Career Rushing Yards: 9,000+\n• Career Rushing TDs: 90+\n\nDescription:\nPower back known for size, speed, and late-game dominance.",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};

    const HEADER: &str = "category,name,details\n";

    fn write_source(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_default_roster_shape() {
        let roster = default_roster();
        assert_eq!(roster.len(), 3);
        assert_eq!(roster[0].name, "Lamar Jackson – QB");
        assert_eq!(roster[1].name, "Cooper Rush – QB");
        assert_eq!(roster[2].name, "Derrick Henry – RB");
        assert_eq!(roster[2].category, "Player Roster - Running Backs");
        assert!(roster[0].details.contains("NFL MVP"));
    }

    #[test]
    fn test_load_from_reader_skips_header() {
        let text = "Player Roster - Quarterbacks,Lamar Jackson – QB,MVP\n\
                    Player Roster - Quarterbacks,Cooper Rush – QB,Backup\n";
        let (records, warnings) = load_from_reader(Cursor::new(text)).unwrap();
        // The first line is discarded even though it looks like data
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "Cooper Rush – QB");
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_load_from_reader_drops_malformed_rows() {
        let text = format!(
            "{}Coaching Staff,John Harbaugh – Head Coach,Since 2008\nbroken row\nCoaching Staff,Todd Monken – OC,Offense\n",
            HEADER
        );
        let (records, warnings) = load_from_reader(Cursor::new(text)).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(warnings, vec![ParseWarning { line: 3, fields: 1 }]);
    }

    #[test]
    fn test_load_from_reader_handles_crlf_and_quotes() {
        let text = "h\r\n\"Player Roster - Quarterbacks\",\"Lamar Jackson – QB\",\"Stats:\\n• MVP: 2019, 2023\"\r\n";
        let (records, _) = load_from_reader(Cursor::new(text)).unwrap();
        assert_eq!(records[0].category, "Player Roster - Quarterbacks");
        assert_eq!(records[0].details, "Stats:\n• MVP: 2019, 2023");
    }

    #[test]
    fn test_load_from_reader_header_only_is_empty() {
        let result = load_from_reader(Cursor::new(HEADER));
        assert!(matches!(result, Err((RosterError::EmptySource, _))));
    }

    #[test]
    fn test_load_from_reader_invalid_utf8_is_replaced() {
        let bytes: Vec<u8> = b"h\nCoaching Staff,Jos\xe9 Doe \xe2 Coach,Latin-1\n".to_vec();
        let (records, warnings) = load_from_reader(Cursor::new(bytes)).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "Jos\u{FFFD} Doe \u{FFFD} Coach");
        assert_eq!(records[0].details, "Latin-1");
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_load_from_reader_cr_only_line_endings() {
        let text = "h\rCoaching Staff,John Harbaugh – Head Coach,Since 2008\rCoaching Staff,Todd Monken – OC,Offense\r";
        let (records, warnings) = load_from_reader(Cursor::new(text)).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].name, "John Harbaugh – Head Coach");
        assert_eq!(records[1].details, "Offense");
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_load_from_reader_mixed_line_endings_across_buffer_fills() {
        let text = "h\r\nCoaching Staff,A – Coach,one\rCoaching Staff,B – Coach,two\r\nCoaching Staff,C – Coach,three";
        // A one-byte buffer splits every \r\n pair across fills
        let reader = BufReader::with_capacity(1, Cursor::new(text));
        let (records, warnings) = load_from_reader(reader).unwrap();
        let details: Vec<&str> = records.iter().map(|r| r.details.as_str()).collect();
        assert_eq!(details, vec!["one", "two", "three"]);
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_load_from_reader_blank_line_is_a_malformed_row() {
        let text = "h\r\n\r\nCoaching Staff,A – Coach,one\n";
        let (records, warnings) = load_from_reader(Cursor::new(text)).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(warnings, vec![ParseWarning { line: 2, fields: 1 }]);
    }

    #[test]
    fn test_load_file() {
        let file = write_source(&format!(
            "{}Player Roster - Wide Receivers,Zay Flowers – WR,Speed\n",
            HEADER
        ));
        let report = load(file.path());
        assert!(!report.is_fallback());
        assert_eq!(report.records, vec![Record::new("Player Roster - Wide Receivers", "Zay Flowers – WR", "Speed")]);
        assert!(matches!(report.origin, RosterOrigin::File(ref p) if p == file.path()));
    }

    #[test]
    fn test_load_latin1_file_keeps_real_roster() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(
            b"category,name,details\n\
              Player Roster - Quarterbacks,Lamar Jackson \xe2 QB,MVP\n\
              Coaching Staff,Andr\xe9 Curtis \xe2 Coach,Secondary\n\
              Player Roster - Running Backs,Derrick Henry \xe2 RB,Power\n",
        )
        .unwrap();
        file.flush().unwrap();

        let report = load(file.path());
        assert!(!report.is_fallback());
        assert_eq!(report.records.len(), 3);
        assert_eq!(report.records[1].name, "Andr\u{FFFD} Curtis \u{FFFD} Coach");
    }

    #[test]
    fn test_load_cr_only_file_keeps_real_roster() {
        let file = write_source("category,name,details\rCoaching Staff,A – Coach,one\rCoaching Staff,B – Coach,two\r");
        let report = load(file.path());
        assert!(!report.is_fallback());
        assert_eq!(report.records.len(), 2);
    }

    #[test]
    fn test_load_header_only_uses_fallback() {
        let file = write_source(HEADER);
        let report = load(file.path());
        assert_eq!(report.records, default_roster());
        assert!(matches!(report.origin, RosterOrigin::Fallback(RosterError::EmptySource)));
    }

    #[test]
    fn test_load_empty_file_uses_fallback() {
        let file = write_source("");
        let report = load(file.path());
        assert_eq!(report.records, default_roster());
    }

    #[test]
    fn test_load_all_rows_malformed_keeps_warnings() {
        let file = write_source(&format!("{}one\ntwo,fields\n", HEADER));
        let report = load(file.path());
        assert!(report.is_fallback());
        assert_eq!(report.records.len(), 3);
        assert_eq!(report.warnings.len(), 2);
    }

    #[test]
    fn test_load_missing_path_uses_fallback() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.csv");
        let report = load(&missing);
        assert_eq!(report.records, default_roster());
        assert!(matches!(report.origin, RosterOrigin::Fallback(RosterError::SourceNotFound(ref p)) if p == &missing));
    }
}
