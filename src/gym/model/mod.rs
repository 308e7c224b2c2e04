// Copyright (c) 2018 Blackfynn, Inc. All Rights Reserved.

//! Top-level model definitions and re-exports go here.

use serde_json;

// Backend identifiers arrive either as JSON strings or as JSON numbers; both
// are kept as their string form.
#[derive(Deserialize)]
#[serde(untagged)]
pub(crate) enum RawId {
    Text(String),
    Number(serde_json::Number),
}

impl From<RawId> for String {
    fn from(raw: RawId) -> Self {
        match raw {
            RawId::Text(s) => s,
            RawId::Number(n) => n.to_string(),
        }
    }
}

macro_rules! id_type {
    ($(#[$attr:meta])* $name:ident) => {
        $(#[$attr])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
        pub struct $name(String);

        impl $name {
            pub fn new<S: Into<String>>(id: S) -> Self {
                $name(id.into())
            }

            /// Unwraps the value.
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                self.0.as_str()
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl<'a> From<&'a $name> for String {
            fn from(id: &'a $name) -> Self {
                id.0.clone()
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                $name::new(id)
            }
        }

        impl<'a> From<&'a str> for $name {
            fn from(id: &'a str) -> Self {
                $name::new(id)
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter) -> ::std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl<'de> ::serde::Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: ::serde::Deserializer<'de>,
            {
                <::gym::model::RawId as ::serde::Deserialize>::deserialize(deserializer)
                    .map(|raw| $name(raw.into()))
            }
        }
    };
}

pub mod company;
pub mod dashboard;
pub mod notification;
pub mod payment;
pub mod plan;
pub mod session;
pub mod student;
pub mod user;
pub mod whatsapp;

// Re-export
pub use self::company::{Company, CompanyId, CompanySetting};
pub use self::dashboard::DashboardSummary;
pub use self::notification::{Notification, NotificationType};
pub use self::payment::{Payment, StudentPayments};
pub use self::plan::{Plan, PlanId};
pub use self::session::{AccessToken, RefreshToken, Session};
pub use self::student::{Student, StudentId};
pub use self::user::UserId;
pub use self::whatsapp::{ConnectionStatus, QrCode};
