// Copyright (c) 2018 Blackfynn, Inc. All Rights Reserved.

//! This module contains types that serve as representations
//! of client requests to the gym backend.

pub mod company;
pub mod login;
pub mod notification;
pub mod payment;
pub mod plan;
pub mod refresh;
pub mod student;
pub mod user;

// Re-export
pub use self::login::Login;
pub use self::notification::NotificationSettings;
pub use self::refresh::Refresh;
pub use self::user::ChangePassword;

/// A query string parameter.
pub type RequestParam = (String, String);

// Pushes `key=value` only when a value is present.
fn push_param<V: ToString>(params: &mut Vec<RequestParam>, key: &str, value: Option<V>) {
    if let Some(value) = value {
        let value = value.to_string();
        if !value.is_empty() {
            params.push((key.to_string(), value));
        }
    }
}
