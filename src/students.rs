// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Student registry - enrollment bookkeeping
//!
//! A student with no remaining classes is removed from the registry.

use crate::error::RecordError;
use crate::types::StudentRecord;
use std::collections::HashMap;
use tracing::debug;

/// Registered students keyed by id
#[derive(Debug, Clone, Default)]
pub struct StudentRegistry {
    students: HashMap<String, StudentRecord>,
}

impl StudentRegistry {
    /// Create an empty registry
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new student
    pub fn insert(&mut self, student: StudentRecord) -> Result<(), RecordError> {
        if self.students.contains_key(&student.id) {
            return Err(RecordError::DuplicateStudent(student.id));
        }
        debug!(id = %student.id, classes = student.classes.len(), "registered student");
        self.students.insert(student.id.clone(), student);
        Ok(())
    }

    /// Remove a student entirely
    pub fn remove(&mut self, id: &str) -> Result<StudentRecord, RecordError> {
        self.students
            .remove(id)
            .ok_or_else(|| RecordError::StudentNotFound(id.to_string()))
    }

    /// Drop one class from a student's schedule
    pub fn drop_class(&mut self, id: &str, code: &str) -> Result<(), RecordError> {
        let student = self
            .students
            .get_mut(id)
            .ok_or_else(|| RecordError::StudentNotFound(id.to_string()))?;

        let position = student
            .classes
            .iter()
            .position(|c| c == code)
            .ok_or_else(|| RecordError::NotEnrolled {
                student: id.to_string(),
                code: code.to_string(),
            })?;
        student.classes.remove(position);

        if student.classes.is_empty() {
            debug!(id, "no classes left, removing student");
            self.students.remove(id);
        }
        Ok(())
    }

    /// Swap one enrolled class for another in place
    pub fn replace_class(&mut self, id: &str, from: &str, to: &str) -> Result<(), RecordError> {
        let student = self
            .students
            .get_mut(id)
            .ok_or_else(|| RecordError::StudentNotFound(id.to_string()))?;

        if student.is_enrolled(to) {
            return Err(RecordError::AlreadyEnrolled {
                student: id.to_string(),
                code: to.to_string(),
            });
        }
        let slot = student
            .classes
            .iter_mut()
            .find(|c| *c == from)
            .ok_or_else(|| RecordError::NotEnrolled {
                student: id.to_string(),
                code: from.to_string(),
            })?;
        *slot = to.to_string();
        Ok(())
    }

    /// Remove a class from every student, returning how many were enrolled
    pub fn remove_class_from_all(&mut self, code: &str) -> usize {
        let mut affected = 0;
        for student in self.students.values_mut() {
            let before = student.classes.len();
            student.classes.retain(|c| c != code);
            if student.classes.len() < before {
                affected += 1;
            }
        }
        self.students.retain(|_, s| !s.classes.is_empty());
        debug!(code, affected, "removed class from all students");
        affected
    }

    /// Get a student by id
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&StudentRecord> {
        self.students.get(id)
    }

    /// Check if a student is registered
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.students.contains_key(id)
    }

    /// Number of registered students
    #[must_use]
    pub fn len(&self) -> usize {
        self.students.len()
    }

    /// Check if no students are registered
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.students.is_empty()
    }
}
