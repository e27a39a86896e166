// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Application state - the walkway graph plus the class and student records

use crate::catalog::ClassCatalog;
use crate::graph::CampusGraph;
use crate::loader;
use crate::routes::RouteQueries;
use crate::students::StudentRegistry;
use anyhow::{Context, Result};
use std::path::Path;

/// Everything a command can read or change
#[derive(Debug, Clone, Default)]
pub struct Campus {
    /// Walkway graph
    pub graph: CampusGraph,
    /// Class catalog
    pub catalog: ClassCatalog,
    /// Registered students
    pub students: StudentRegistry,
}

impl Campus {
    /// Create an empty campus
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the walkway graph and class catalog from CSV files
    pub fn load(edges: &Path, classes: &Path) -> Result<Self> {
        let mut campus = Self::new();
        loader::load_edges(edges, &mut campus.graph)
            .with_context(|| format!("Failed to load walkways from {}", edges.display()))?;
        loader::load_classes(classes, &mut campus.catalog)
            .with_context(|| format!("Failed to load classes from {}", classes.display()))?;
        Ok(campus)
    }

    /// Read-only query view over the current state
    #[must_use]
    pub fn routes(&self) -> RouteQueries<'_> {
        RouteQueries::new(&self.graph, &self.catalog, &self.students)
    }
}
