// Copyright (c) 2018 Blackfynn, Inc. All Rights Reserved.

use chrono::{DateTime, Utc};

use super::{push_param, RequestParam};
use gym::model::StudentId;

/// Records a student's payment for a month.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    client_id: StudentId,
    month: u32,
    year: i32,
    payment_date: DateTime<Utc>,
}

impl Record {
    pub fn new(student_id: StudentId, month: u32, year: i32, payment_date: DateTime<Utc>) -> Self {
        Self {
            client_id: student_id,
            month,
            year,
            payment_date,
        }
    }
}

/// Filters for the payment listing.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Filter {
    client_name: Option<String>,
    due_day: Option<u8>,
    month: Option<u32>,
    year: Option<i32>,
    paid: Option<bool>,
}

impl Filter {
    /// Payments of the given month and year.
    pub fn new(month: u32, year: i32) -> Self {
        Self {
            month: Some(month),
            year: Some(year),
            ..Default::default()
        }
    }

    pub fn student_name<S: Into<String>>(mut self, name: S) -> Self {
        self.client_name = Some(name.into());
        self
    }

    pub fn due_day(mut self, due_day: u8) -> Self {
        self.due_day = Some(due_day);
        self
    }

    pub fn paid(mut self, paid: bool) -> Self {
        self.paid = Some(paid);
        self
    }

    pub fn params(&self) -> Vec<RequestParam> {
        let mut params = vec![];
        push_param(&mut params, "clientName", self.client_name.as_ref());
        push_param(&mut params, "dueDay", self.due_day);
        push_param(&mut params, "month", self.month);
        push_param(&mut params, "year", self.year);
        push_param(&mut params, "paid", self.paid);
        params
    }
}
