// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! CSV loaders for the walkway graph and the class catalog
//!
//! Both files start with a header row that is skipped. Columns are read by
//! position, not by header name.

use crate::catalog::ClassCatalog;
use crate::error::LoadError;
use crate::graph::CampusGraph;
use crate::types::{ClassRecord, Minutes, Vertex, Weight};
use chrono::{NaiveTime, Timelike};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::info;

/// `LocationID_1, LocationID_2, Name_1, Name_2, Time`
type EdgeRow = (Vertex, Vertex, String, String, Weight);

/// `ClassCode, LocationID, Start, End`
type ClassRow = (String, Vertex, String, String);

fn reader<R: Read>(input: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(input)
}

fn open(path: &Path) -> Result<File, LoadError> {
    File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn line_of(record: &csv::StringRecord) -> u64 {
    record.position().map_or(0, csv::Position::line)
}

/// Read walkways from CSV into `graph`, returning how many were added
pub fn read_edges<R: Read>(input: R, graph: &mut CampusGraph) -> Result<usize, LoadError> {
    let mut rdr = reader(input);
    let mut record = csv::StringRecord::new();
    let mut count = 0;

    loop {
        let more = rdr
            .read_record(&mut record)
            .map_err(|source| LoadError::Record {
                line: source.position().map_or(0, csv::Position::line),
                source,
            })?;
        if !more {
            break;
        }
        let (u, v, name_u, name_v, minutes): EdgeRow = record
            .deserialize(None)
            .map_err(|source| LoadError::Record {
                line: line_of(&record),
                source,
            })?;

        graph.add_edge(u, v, minutes);
        graph.set_label(u, &name_u);
        graph.set_label(v, &name_v);
        count += 1;
    }
    Ok(count)
}

/// Read classes from CSV into `catalog`, returning how many rows were read.
///
/// A later row with the same code replaces the earlier one.
pub fn read_classes<R: Read>(input: R, catalog: &mut ClassCatalog) -> Result<usize, LoadError> {
    let mut rdr = reader(input);
    let mut record = csv::StringRecord::new();
    let mut count = 0;

    loop {
        let more = rdr
            .read_record(&mut record)
            .map_err(|source| LoadError::Record {
                line: source.position().map_or(0, csv::Position::line),
                source,
            })?;
        if !more {
            break;
        }
        let line = line_of(&record);
        let (code, location, start, end): ClassRow = record
            .deserialize(None)
            .map_err(|source| LoadError::Record { line, source })?;

        let start = parse_time_of_day(&start).ok_or(LoadError::TimeOfDay { line, value: start })?;
        let end = parse_time_of_day(&end).ok_or(LoadError::TimeOfDay { line, value: end })?;

        catalog.insert(ClassRecord::new(code, location, start, end));
        count += 1;
    }
    Ok(count)
}

/// Load the walkway graph from a CSV file
pub fn load_edges(path: &Path, graph: &mut CampusGraph) -> Result<usize, LoadError> {
    let count = read_edges(open(path)?, graph)?;
    info!("Loaded {} walkways from {}", count, path.display());
    Ok(count)
}

/// Load the class catalog from a CSV file
pub fn load_classes(path: &Path, catalog: &mut ClassCatalog) -> Result<usize, LoadError> {
    let count = read_classes(open(path)?, catalog)?;
    info!("Loaded {} classes from {}", count, path.display());
    Ok(count)
}

/// Parse `HH:MM` into minutes since midnight
#[must_use]
pub fn parse_time_of_day(value: &str) -> Option<Minutes> {
    if value.len() != 5 {
        return None;
    }
    let time = NaiveTime::parse_from_str(value, "%H:%M").ok()?;
    Some(time.hour() * 60 + time.minute())
}
