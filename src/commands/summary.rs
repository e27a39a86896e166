// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Summary command - counts for the loaded campus

use crate::campus::Campus;
use anyhow::Result;
use serde::Serialize;

/// Counts reported by the summary command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Summary {
    /// Known locations
    pub locations: usize,
    /// Walkways, parallel ones included
    pub walkways: usize,
    /// Walkways currently open
    pub open: usize,
    /// Walkways currently closed
    pub closed: usize,
    /// Classes in the catalog
    pub classes: usize,
    /// Registered students
    pub students: usize,
}

impl Summary {
    /// Collect counts from the campus
    #[must_use]
    pub fn of(campus: &Campus) -> Self {
        let walkways = campus.graph.edge_count();
        let open = campus.graph.open_edge_count();
        Self {
            locations: campus.graph.vertex_count(),
            walkways,
            open,
            closed: walkways - open,
            classes: campus.catalog.len(),
            students: campus.students.len(),
        }
    }
}

/// Run the summary command
pub fn run(campus: &Campus, json: bool) -> Result<()> {
    let summary = Summary::of(campus);

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!("Locations: {}", summary.locations);
    println!("Walkways:  {} ({} open, {} closed)", summary.walkways, summary.open, summary.closed);
    println!("Classes:   {}", summary.classes);
    println!("Students:  {}", summary.students);
    Ok(())
}
