// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Error types for loading and querying

use std::path::PathBuf;
use thiserror::Error;

/// Failure while reading the edge or class CSV files
#[derive(Debug, Error)]
pub enum LoadError {
    /// The file could not be opened
    #[error("failed to open {path}: {source}")]
    Io {
        /// File that failed to open
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// A record could not be read or has the wrong shape
    #[error("malformed record at line {line}: {source}")]
    Record {
        /// One-based line number, 0 when unknown
        line: u64,
        /// Underlying CSV error
        source: csv::Error,
    },

    /// A class start or end time is not `HH:MM`
    #[error("invalid time of day {value:?} at line {line}")]
    TimeOfDay {
        /// One-based line number, 0 when unknown
        line: u64,
        /// Offending value
        value: String,
    },
}

/// Failure of a route query
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    /// No student with the given id is registered
    #[error("student not found: {0}")]
    StudentNotFound(String),
}

/// Failure of a student registry update
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    /// A student with this id is already registered
    #[error("student already exists: {0}")]
    DuplicateStudent(String),

    /// No student with this id is registered
    #[error("student not found: {0}")]
    StudentNotFound(String),

    /// The student is not enrolled in the class
    #[error("student {student} is not enrolled in {code}")]
    NotEnrolled {
        /// Student id
        student: String,
        /// Class code
        code: String,
    },

    /// The student is already enrolled in the class
    #[error("student {student} is already enrolled in {code}")]
    AlreadyEnrolled {
        /// Student id
        student: String,
        /// Class code
        code: String,
    },
}
