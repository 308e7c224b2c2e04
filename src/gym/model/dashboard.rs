// Copyright (c) 2018 Blackfynn, Inc. All Rights Reserved.

/// Headline numbers shown on the company dashboard.
#[derive(Debug, Clone, Default, Hash, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DashboardSummary {
    total_clients: u64,
    clients_paid_this_month: u64,
    clients_not_paid_this_month: u64,
}

impl DashboardSummary {
    pub fn total_clients(&self) -> u64 {
        self.total_clients
    }

    pub fn clients_paid_this_month(&self) -> u64 {
        self.clients_paid_this_month
    }

    pub fn clients_not_paid_this_month(&self) -> u64 {
        self.clients_not_paid_this_month
    }
}
