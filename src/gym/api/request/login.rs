// Copyright (c) 2018 Blackfynn, Inc. All Rights Reserved.

/// A type representing a login request
#[derive(Clone, Hash, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Login {
    pub email: String,
    pub password: String,
}

impl Login {
    pub fn new<S: Into<String>>(email: S, password: S) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}
