// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Class catalog keyed by class code

use crate::types::ClassRecord;
use std::collections::HashMap;

/// All classes offered, keyed by code
#[derive(Debug, Clone, Default)]
pub struct ClassCatalog {
    classes: HashMap<String, ClassRecord>,
}

impl ClassCatalog {
    /// Create an empty catalog
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a class, replacing any existing class with the same code.
    ///
    /// Returns the replaced record.
    pub fn insert(&mut self, record: ClassRecord) -> Option<ClassRecord> {
        self.classes.insert(record.code.clone(), record)
    }

    /// Check if a class exists
    #[must_use]
    pub fn contains(&self, code: &str) -> bool {
        self.classes.contains_key(code)
    }

    /// Get a class by code
    #[must_use]
    pub fn get(&self, code: &str) -> Option<&ClassRecord> {
        self.classes.get(code)
    }

    /// Number of classes
    #[must_use]
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    /// Check if the catalog is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}
