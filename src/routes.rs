// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Route queries for a student - travel times, zone cost, schedule check
//!
//! Each query resolves the student first and fails with
//! [`QueryError::StudentNotFound`] if the id is unknown. Results are
//! structured; rendering is left to the command layer.

use crate::catalog::ClassCatalog;
use crate::error::QueryError;
use crate::graph::{CampusGraph, ShortestPathTree};
use crate::students::StudentRegistry;
use crate::types::{ClassRecord, Cost, StudentRecord, Vertex};
use std::collections::{BTreeSet, HashMap};
use tracing::debug;

/// Shortest walking time from the residence to one class
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassTravel {
    /// Class code
    pub code: String,
    /// Walking time, `None` when the class cannot be reached or is not in the catalog
    pub minutes: Option<Cost>,
}

/// Per-class travel times for a student, sorted by class code
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TravelReport {
    /// Student display name
    pub student: String,
    /// One entry per enrolled class
    pub classes: Vec<ClassTravel>,
}

/// Spanning cost of the locations on a student's shortest routes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZoneReport {
    /// Student display name
    pub student: String,
    /// Locations in the zone, residence first, the rest ascending
    pub vertices: Vec<Vertex>,
    /// Minimum spanning tree cost over the zone
    pub cost: Cost,
}

/// Feasibility of walking from one class to the next
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    /// Earlier class
    pub from: String,
    /// Following class
    pub to: String,
    /// Minutes between the end of `from` and the start of `to`, may be negative
    pub gap: i64,
    /// Shortest walking time, `None` when unreachable
    pub travel: Option<Cost>,
    /// Whether the walk fits in the gap
    pub feasible: bool,
}

/// Outcome of a back-to-back schedule check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScheduleCheck {
    /// Fewer than two catalogued classes, nothing to compare
    NotApplicable,
    /// One transition per consecutive pair, in start-time order
    Checked(Vec<Transition>),
}

/// Schedule check for a student
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleReport {
    /// Student display name
    pub student: String,
    /// Pairwise results
    pub check: ScheduleCheck,
}

/// Read-only view over the graph and records for answering route queries
#[derive(Debug, Clone, Copy)]
pub struct RouteQueries<'a> {
    graph: &'a CampusGraph,
    catalog: &'a ClassCatalog,
    students: &'a StudentRegistry,
}

impl<'a> RouteQueries<'a> {
    /// Create a query view
    #[must_use]
    pub fn new(graph: &'a CampusGraph, catalog: &'a ClassCatalog, students: &'a StudentRegistry) -> Self {
        Self {
            graph,
            catalog,
            students,
        }
    }

    fn student(&self, id: &str) -> Result<&'a StudentRecord, QueryError> {
        self.students
            .get(id)
            .ok_or_else(|| QueryError::StudentNotFound(id.to_string()))
    }

    /// Shortest walking time from the residence to each enrolled class
    pub fn class_travel_times(&self, id: &str) -> Result<TravelReport, QueryError> {
        let student = self.student(id)?;
        let tree = self.graph.shortest_paths(student.residence);

        let mut codes: Vec<&String> = student.classes.iter().collect();
        codes.sort();

        let classes = codes
            .into_iter()
            .map(|code| ClassTravel {
                code: code.clone(),
                minutes: self
                    .catalog
                    .get(code)
                    .and_then(|class| tree.distance(class.location)),
            })
            .collect();

        Ok(TravelReport {
            student: student.name.clone(),
            classes,
        })
    }

    /// Spanning tree cost over every location on a shortest route from the
    /// residence to a reachable class
    pub fn zone_cost(&self, id: &str) -> Result<ZoneReport, QueryError> {
        let student = self.student(id)?;
        let tree = self.graph.shortest_paths(student.residence);

        let mut zone = BTreeSet::from([student.residence]);
        for class in self.enrolled(student) {
            tree.trace_into(class.location, &mut zone);
        }

        // Prim starts from the first entry, so keep the residence in front.
        zone.remove(&student.residence);
        let mut vertices = Vec::with_capacity(zone.len() + 1);
        vertices.push(student.residence);
        vertices.extend(zone);

        let spanning = self.graph.minimum_spanning_tree(&vertices);
        debug!(
            student = %student.id,
            vertices = vertices.len(),
            cost = spanning.cost,
            complete = spanning.is_complete(),
            "zone cost"
        );

        Ok(ZoneReport {
            student: student.name.clone(),
            vertices,
            cost: spanning.cost,
        })
    }

    /// Check whether each consecutive pair of classes leaves enough time to walk
    pub fn verify_schedule(&self, id: &str) -> Result<ScheduleReport, QueryError> {
        let student = self.student(id)?;

        let mut classes: Vec<&ClassRecord> = self.enrolled(student).collect();
        if classes.len() < 2 {
            return Ok(ScheduleReport {
                student: student.name.clone(),
                check: ScheduleCheck::NotApplicable,
            });
        }
        classes.sort_by_key(|c| c.start);

        let mut trees: HashMap<Vertex, ShortestPathTree> = HashMap::new();
        let transitions = classes
            .windows(2)
            .map(|pair| {
                let (earlier, later) = (pair[0], pair[1]);
                let gap = i64::from(later.start) - i64::from(earlier.end);
                let travel = trees
                    .entry(earlier.location)
                    .or_insert_with(|| self.graph.shortest_paths(earlier.location))
                    .distance(later.location);
                let feasible = travel.is_some_and(|t| i64::try_from(t).is_ok_and(|t| gap >= t));
                Transition {
                    from: earlier.code.clone(),
                    to: later.code.clone(),
                    gap,
                    travel,
                    feasible,
                }
            })
            .collect();

        Ok(ScheduleReport {
            student: student.name.clone(),
            check: ScheduleCheck::Checked(transitions),
        })
    }

    /// Enrolled classes that exist in the catalog, in enrollment order
    fn enrolled(&self, student: &'a StudentRecord) -> impl Iterator<Item = &'a ClassRecord> + 'a {
        let catalog = self.catalog;
        student.classes.iter().filter_map(move |code| catalog.get(code))
    }
}
