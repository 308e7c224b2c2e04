// Copyright (c) 2018 Blackfynn, Inc. All Rights Reserved.

use super::{push_param, RequestParam};

/// The body of a plan `POST` or `PATCH`.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Plan {
    name: String,
    price: f64,
}

impl Plan {
    pub fn new<S: Into<String>>(name: S, price: f64) -> Self {
        Self {
            name: name.into(),
            price,
        }
    }
}

/// Filters for the plan listing.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Filter {
    page: Option<u32>,
    limit: Option<u32>,
    name: Option<String>,
}

impl Filter {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn page(mut self, page: u32, limit: u32) -> Self {
        self.page = Some(page);
        self.limit = Some(limit);
        self
    }

    pub fn name<S: Into<String>>(mut self, name: S) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn params(&self) -> Vec<RequestParam> {
        let mut params = vec![];
        push_param(&mut params, "page", self.page);
        push_param(&mut params, "limit", self.limit);
        push_param(&mut params, "name", self.name.as_ref());
        params
    }
}
