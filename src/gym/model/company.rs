// Copyright (c) 2018 Blackfynn, Inc. All Rights Reserved.

use gym::model::{Notification, NotificationType};

id_type! {
    /// An identifier for a company (a gym) on the backend.
    CompanyId
}

/// Which overdue notifications the backend sends for a company.
#[derive(Debug, Clone, Default, Hash, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CompanySetting {
    send_overdue_notification_to_company: bool,
    send_overdue_notification_to_clients: bool,
    send_overdue_for_last_month_to_company: bool,
}

impl CompanySetting {
    pub fn send_overdue_notification_to_company(&self) -> bool {
        self.send_overdue_notification_to_company
    }

    pub fn send_overdue_notification_to_clients(&self) -> bool {
        self.send_overdue_notification_to_clients
    }

    pub fn send_overdue_for_last_month_to_company(&self) -> bool {
        self.send_overdue_for_last_month_to_company
    }
}

/// A company, as defined by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    id: CompanyId,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    fantasy_name: Option<String>,
    #[serde(default)]
    cnpj: Option<String>,
    #[serde(default)]
    phone: Option<String>,
    #[serde(default)]
    company_setting: Option<CompanySetting>,
    #[serde(default)]
    notifications: Vec<Notification>,
}

impl Company {
    pub fn id(&self) -> &CompanyId {
        &self.id
    }

    pub fn name(&self) -> Option<&String> {
        self.name.as_ref()
    }

    pub fn fantasy_name(&self) -> Option<&String> {
        self.fantasy_name.as_ref()
    }

    /// The company's CNPJ (Brazilian company registration number), digits only.
    pub fn cnpj(&self) -> Option<&String> {
        self.cnpj.as_ref()
    }

    pub fn phone(&self) -> Option<&String> {
        self.phone.as_ref()
    }

    pub fn company_setting(&self) -> Option<&CompanySetting> {
        self.company_setting.as_ref()
    }

    pub fn notifications(&self) -> &Vec<Notification> {
        &self.notifications
    }

    /// Finds the notification of the given type, if configured.
    pub fn notification(&self, kind: NotificationType) -> Option<&Notification> {
        self.notifications.iter().find(|n| n.kind() == Some(kind))
    }
}
