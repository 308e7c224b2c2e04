// Copyright (c) 2018 Blackfynn, Inc. All Rights Reserved.

use chrono::{DateTime, Utc};

use gym::model::{Plan, StudentId};

/// A payment recorded for a student for one month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    #[serde(default)]
    month: Option<u32>,
    #[serde(default)]
    year: Option<i32>,
    #[serde(default)]
    payment_date: Option<DateTime<Utc>>,
}

impl Payment {
    pub fn month(&self) -> Option<u32> {
        self.month
    }

    pub fn year(&self) -> Option<i32> {
        self.year
    }

    pub fn payment_date(&self) -> Option<&DateTime<Utc>> {
        self.payment_date.as_ref()
    }
}

/// A row of the payment listing: a student and the payments recorded for the
/// requested period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentPayments {
    id: StudentId,
    name: String,
    #[serde(default)]
    phone: Option<String>,
    #[serde(default)]
    due_day: Option<u8>,
    #[serde(default)]
    paid: Option<bool>,
    #[serde(default)]
    plan: Option<Plan>,
    #[serde(default)]
    payments: Vec<Payment>,
}

impl StudentPayments {
    pub fn id(&self) -> &StudentId {
        &self.id
    }

    pub fn name(&self) -> &String {
        &self.name
    }

    pub fn phone(&self) -> Option<&String> {
        self.phone.as_ref()
    }

    pub fn due_day(&self) -> Option<u8> {
        self.due_day
    }

    pub fn plan(&self) -> Option<&Plan> {
        self.plan.as_ref()
    }

    pub fn payments(&self) -> &Vec<Payment> {
        &self.payments
    }

    /// Whether the student paid for the requested period. An explicit `paid`
    /// flag wins over the presence of payment records.
    pub fn is_paid(&self) -> bool {
        self.paid.unwrap_or_else(|| !self.payments.is_empty())
    }
}
