// Copyright (c) 2018 Blackfynn, Inc. All Rights Reserved.

/// Overdue notification settings of the current company.
#[derive(Clone, Debug, Default, Hash, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationSettings {
    overdue_for_last_month_to_company: bool,
    overdue_for_last_month_frequency: String,
    overdue_notification_to_company: bool,
    overdue_notification_frequency: String,
}

impl NotificationSettings {
    pub fn new() -> Self {
        Default::default()
    }

    /// Notify the company, once per `frequency`, about students that did not
    /// pay last month.
    pub fn overdue_for_last_month<S: Into<String>>(mut self, enabled: bool, frequency: S) -> Self {
        self.overdue_for_last_month_to_company = enabled;
        self.overdue_for_last_month_frequency = frequency.into();
        self
    }

    /// Notify the company, once per `frequency`, about overdue students.
    pub fn overdue_to_company<S: Into<String>>(mut self, enabled: bool, frequency: S) -> Self {
        self.overdue_notification_to_company = enabled;
        self.overdue_notification_frequency = frequency.into();
        self
    }
}
