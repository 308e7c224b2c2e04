// Copyright (c) 2018 Blackfynn, Inc. All Rights Reserved.

use std::fmt;
use std::str::FromStr;

/// The kinds of scheduled notification a company can configure.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub enum NotificationType {
    OverdueNotificationToCompany,
    OverdueNotificationToClients,
    OverdueForLastMonthToCompany,
}

impl NotificationType {
    pub fn as_str(&self) -> &'static str {
        use self::NotificationType::*;
        match *self {
            OverdueNotificationToCompany => "OVERDUE_NOTIFICATION_TO_COMPANY",
            OverdueNotificationToClients => "OVERDUE_NOTIFICATION_TO_CLIENTS",
            OverdueForLastMonthToCompany => "OVERDUE_FOR_LAST_MONTH_TO_COMPANY",
        }
    }
}

impl FromStr for NotificationType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        use self::NotificationType::*;
        match s {
            "OVERDUE_NOTIFICATION_TO_COMPANY" => Ok(OverdueNotificationToCompany),
            "OVERDUE_NOTIFICATION_TO_CLIENTS" => Ok(OverdueNotificationToClients),
            "OVERDUE_FOR_LAST_MONTH_TO_COMPANY" => Ok(OverdueForLastMonthToCompany),
            other => Err(format!("unknown notification type: {}", other)),
        }
    }
}

impl fmt::Display for NotificationType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A scheduled notification configured for a company.
#[derive(Debug, Clone, Hash, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    // Kept as sent: the backend may know types this library does not.
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    frequency: String,
    #[serde(default)]
    enabled: bool,
}

impl Notification {
    /// The notification type, when it is one this library knows about.
    pub fn kind(&self) -> Option<NotificationType> {
        self.kind.parse().ok()
    }

    pub fn raw_kind(&self) -> &String {
        &self.kind
    }

    /// How often the notification is sent, e.g. `daily` or `first-day`.
    pub fn frequency(&self) -> &String {
        &self.frequency
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }
}
