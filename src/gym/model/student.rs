// Copyright (c) 2018 Blackfynn, Inc. All Rights Reserved.

use gym::model::{Plan, PlanId};

id_type! {
    /// An identifier for a student. The backend names this resource `client`.
    StudentId
}

/// A student (gym member) registered by a company.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    id: StudentId,
    name: String,
    #[serde(default)]
    phone: Option<String>,
    #[serde(default)]
    due_day: Option<u8>,
    #[serde(default)]
    plan_id: Option<PlanId>,
    #[serde(default = "default_active")]
    is_active: bool,
    #[serde(default)]
    plans: Vec<Plan>,
}

fn default_active() -> bool {
    true
}

impl Student {
    pub fn id(&self) -> &StudentId {
        &self.id
    }

    pub fn name(&self) -> &String {
        &self.name
    }

    pub fn phone(&self) -> Option<&String> {
        self.phone.as_ref()
    }

    /// Day of the month the student's payment falls due.
    pub fn due_day(&self) -> Option<u8> {
        self.due_day
    }

    pub fn plan_id(&self) -> Option<&PlanId> {
        self.plan_id.as_ref()
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    pub fn plans(&self) -> &Vec<Plan> {
        &self.plans
    }

    /// The plan the student is subscribed to, when the backend included it.
    pub fn plan(&self) -> Option<&Plan> {
        let plan_id = self.plan_id.as_ref()?;
        self.plans.iter().find(|p| p.id() == plan_id)
    }
}
