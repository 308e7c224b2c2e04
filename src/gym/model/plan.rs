// Copyright (c) 2018 Blackfynn, Inc. All Rights Reserved.

id_type! {
    /// An identifier for a membership plan.
    PlanId
}

/// A membership plan offered by a company.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Plan {
    id: PlanId,
    name: String,
    #[serde(default)]
    price: f64,
}

impl Plan {
    pub fn id(&self) -> &PlanId {
        &self.id
    }

    pub fn name(&self) -> &String {
        &self.name
    }

    /// The monthly price of the plan.
    pub fn price(&self) -> f64 {
        self.price
    }
}
