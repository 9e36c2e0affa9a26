//! Rolling week cursor.
//!
//! A single date persisted between runs: the Monday of the next week
//! to generate. Each generation call reads and advances it by exactly
//! seven days, so repeated runs produce a non-overlapping sequence of
//! weeks instead of always scheduling "today".
//!
//! The cursor file is the pipeline's only shared mutable resource.
//! Nothing here locks it: concurrent generation requests must be
//! serialized by the caller (file lock, single writer, or external
//! coordination), or two callers can read the same value and advance
//! it inconsistently.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{Duration, NaiveDate};

use crate::error::{Error, Result};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// First-ever start date: Monday, 22 September 2025.
pub fn seed_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 9, 22).expect("valid seed date")
}

/// File-backed "next week" cursor with get-and-advance semantics.
#[derive(Debug, Clone)]
pub struct WeekCursor {
    path: PathBuf,
}

impl WeekCursor {
    /// Creates a cursor backed by `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the stored date without advancing.
    ///
    /// Returns `None` when the cursor has never been written.
    pub fn peek(&self) -> Result<Option<NaiveDate>> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => NaiveDate::parse_from_str(contents.trim(), DATE_FORMAT)
                .map(Some)
                .map_err(|source| Error::CursorFormat {
                    path: self.path.clone(),
                    source,
                }),
            Err(source) if source.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(Error::CursorIo {
                path: self.path.clone(),
                source,
            }),
        }
    }

    /// Returns the start date for the next generation run and persists it.
    ///
    /// The first call seeds the cursor to [`seed_date`]; every later
    /// call moves exactly seven days past the stored date. The new
    /// value is written back before returning, so the advance happens
    /// once per generation attempt.
    pub fn advance(&self) -> Result<NaiveDate> {
        let next = match self.peek()? {
            Some(current) => current + Duration::days(7),
            None => seed_date(),
        };
        fs::write(&self.path, format!("{}\n", next.format(DATE_FORMAT))).map_err(|source| {
            Error::CursorIo {
                path: self.path.clone(),
                source,
            }
        })?;
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cursor_in(dir: &tempfile::TempDir) -> WeekCursor {
        WeekCursor::new(dir.path().join("current_week.txt"))
    }

    #[test]
    fn test_first_advance_seeds_and_persists() {
        let dir = tempfile::tempdir().unwrap();
        let cursor = cursor_in(&dir);

        assert_eq!(cursor.peek().unwrap(), None);
        let start = cursor.advance().unwrap();
        assert_eq!(start, seed_date());
        assert_eq!(cursor.peek().unwrap(), Some(seed_date()));
    }

    #[test]
    fn test_consecutive_runs_do_not_overlap() {
        let dir = tempfile::tempdir().unwrap();
        let cursor = cursor_in(&dir);

        let first = cursor.advance().unwrap();
        let second = cursor.advance().unwrap();
        assert_eq!(second - first, Duration::days(7));
        // A 7-day window starting at `first` ends the day before `second`.
        assert!(first + Duration::days(6) < second);
    }

    #[test]
    fn test_resumes_from_stored_date() {
        let dir = tempfile::tempdir().unwrap();
        let cursor = cursor_in(&dir);
        fs::write(cursor.path(), "2026-01-05\n").unwrap();

        let start = cursor.advance().unwrap();
        assert_eq!(start, NaiveDate::from_ymd_opt(2026, 1, 12).unwrap());
    }

    #[test]
    fn test_garbage_cursor_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let cursor = cursor_in(&dir);
        fs::write(cursor.path(), "next tuesday").unwrap();

        assert!(matches!(cursor.peek(), Err(Error::CursorFormat { .. })));
        assert!(matches!(cursor.advance(), Err(Error::CursorFormat { .. })));
    }
}
