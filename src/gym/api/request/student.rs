// Copyright (c) 2018 Blackfynn, Inc. All Rights Reserved.

use super::{push_param, RequestParam};
use gym::model::{CompanyId, PlanId};

/// The body of a student `POST`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Create {
    name: String,
    phone: String,
    due_day: u8,
    plan_id: PlanId,
    company_id: Option<CompanyId>,
}

impl Create {
    pub fn new<N, P>(name: N, phone: P, due_day: u8, plan_id: PlanId) -> Self
    where
        N: Into<String>,
        P: Into<String>,
    {
        Self {
            name: name.into(),
            phone: phone.into(),
            due_day,
            plan_id,
            company_id: None,
        }
    }

    pub fn company_id(&self) -> Option<&CompanyId> {
        self.company_id.as_ref()
    }

    /// Sets the owning company. When unset the client fills in the company
    /// of the current session.
    pub fn with_company(mut self, company_id: CompanyId) -> Self {
        self.company_id = Some(company_id);
        self
    }
}

/// The body of a student `PATCH`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Update {
    name: String,
    phone: String,
    due_day: u8,
    plan_id: PlanId,
}

impl Update {
    pub fn new<N, P>(name: N, phone: P, due_day: u8, plan_id: PlanId) -> Self
    where
        N: Into<String>,
        P: Into<String>,
    {
        Self {
            name: name.into(),
            phone: phone.into(),
            due_day,
            plan_id,
        }
    }
}

/// Activates or deactivates a student.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SetActive {
    is_active: bool,
}

impl SetActive {
    pub fn new(is_active: bool) -> Self {
        Self { is_active }
    }
}

/// Filters for the student listing. Unset filters are left out of the query.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Filter {
    page: Option<u32>,
    limit: Option<u32>,
    phone: Option<String>,
    name: Option<String>,
    plan_id: Option<PlanId>,
    due_day: Option<u8>,
    is_active: Option<bool>,
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

    pub fn phone<S: Into<String>>(mut self, phone: S) -> Self {
        self.phone = Some(phone.into());
        self
    }

    pub fn name<S: Into<String>>(mut self, name: S) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn plan(mut self, plan_id: PlanId) -> Self {
        self.plan_id = Some(plan_id);
        self
    }

    pub fn due_day(mut self, due_day: u8) -> Self {
        self.due_day = Some(due_day);
        self
    }

    pub fn active(mut self, is_active: bool) -> Self {
        self.is_active = Some(is_active);
        self
    }

    pub fn params(&self) -> Vec<RequestParam> {
        let mut params = vec![];
        push_param(&mut params, "page", self.page);
        push_param(&mut params, "limit", self.limit);
        push_param(&mut params, "phone", self.phone.as_ref());
        push_param(&mut params, "name", self.name.as_ref());
        push_param(&mut params, "planId", self.plan_id.as_ref());
        push_param(&mut params, "dueDay", self.due_day);
        push_param(&mut params, "isActive", self.is_active);
        params
    }
}
