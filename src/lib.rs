// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//
//! Campus Compass library - walkway routing for a campus map
//!
//! This crate provides the weighted walkway graph (shortest paths,
//! reachability, edge closures, induced spanning-tree cost), the class and
//! student records, and the route queries composed from both.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod campus;
pub mod catalog;
pub mod commands;
pub mod config;
pub mod error;
pub mod graph;
pub mod loader;
pub mod routes;
pub mod students;

/// Core data types shared by the graph, the record store and the queries
pub mod types {
    use serde::{Deserialize, Serialize};
    use std::fmt;

    // =========================================================================
    // Graph Scalars
    // =========================================================================

    /// Location identifier on the campus map
    pub type Vertex = i64;

    /// Walking time along a single walkway, in minutes
    pub type Weight = u32;

    /// Accumulated walking time over a path or tree, in minutes
    pub type Cost = u64;

    /// Time of day, in minutes since midnight
    pub type Minutes = u32;

    // =========================================================================
    // Edge Status
    // =========================================================================

    /// Current state of the walkway between two locations
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    #[serde(rename_all = "kebab-case")]
    pub enum EdgeStatus {
        /// Walkway exists and can be used for routing
        Open,
        /// Walkway exists but is temporarily blocked
        Closed,
        /// No walkway joins the two locations
        DoesNotExist,
    }

    impl EdgeStatus {
        /// Short code printed by the command dispatcher
        #[must_use]
        pub fn code(&self) -> &'static str {
            match self {
                Self::Open => "open",
                Self::Closed => "closed",
                Self::DoesNotExist => "DNE",
            }
        }

        /// Whether a walkway exists at all
        #[must_use]
        pub fn exists(&self) -> bool {
            !matches!(self, Self::DoesNotExist)
        }
    }

    impl fmt::Display for EdgeStatus {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str(self.code())
        }
    }

    // =========================================================================
    // Class Records
    // =========================================================================

    /// A class in the catalog
    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    pub struct ClassRecord {
        /// Class code, e.g. `COP3530`
        pub code: String,
        /// Location where the class meets
        pub location: Vertex,
        /// Start time, minutes since midnight
        pub start: Minutes,
        /// End time, minutes since midnight
        pub end: Minutes,
    }

    impl ClassRecord {
        /// Create a new class record
        #[must_use]
        pub fn new(code: impl Into<String>, location: Vertex, start: Minutes, end: Minutes) -> Self {
            Self {
                code: code.into(),
                location,
                start,
                end,
            }
        }
    }

    // =========================================================================
    // Student Records
    // =========================================================================

    /// An enrolled student
    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    pub struct StudentRecord {
        /// Eight digit student id
        pub id: String,
        /// Display name
        pub name: String,
        /// Location of the student's residence
        pub residence: Vertex,
        /// Enrolled class codes, no duplicates
        pub classes: Vec<String>,
    }

    impl StudentRecord {
        /// Create a new student record
        #[must_use]
        pub fn new(
            id: impl Into<String>,
            name: impl Into<String>,
            residence: Vertex,
            classes: Vec<String>,
        ) -> Self {
            Self {
                id: id.into(),
                name: name.into(),
                residence,
                classes,
            }
        }

        /// Check whether the student is enrolled in a class
        #[must_use]
        pub fn is_enrolled(&self, code: &str) -> bool {
            self.classes.iter().any(|c| c == code)
        }
    }
}

/// Prelude for common imports
pub mod prelude {
    pub use crate::campus::Campus;
    pub use crate::graph::{CampusGraph, Reach, ShortestPathTree, SpanningTree};
    pub use crate::routes::RouteQueries;
    pub use crate::types::*;
    pub use anyhow::{Context, Result};
}
