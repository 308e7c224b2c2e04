// Copyright (c) 2018 Blackfynn, Inc. All Rights Reserved.

use std::slice;
use std::vec;

use gym::model;

/// A page of the student listing.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Students {
    #[serde(default)]
    clients: Vec<model::Student>,
    #[serde(default)]
    total_clients: u64,
}

impl Students {
    /// The number of students matching the filter, across all pages.
    pub fn total(&self) -> u64 {
        self.total_clients
    }

    pub fn len(&self) -> usize {
        self.clients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clients.is_empty()
    }

    pub fn iter(&self) -> slice::Iter<model::Student> {
        self.clients.iter()
    }
}

impl IntoIterator for Students {
    type Item = model::Student;
    type IntoIter = vec::IntoIter<model::Student>;

    fn into_iter(self) -> Self::IntoIter {
        self.clients.into_iter()
    }
}
