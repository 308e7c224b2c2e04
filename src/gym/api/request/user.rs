// Copyright (c) 2018 Blackfynn, Inc. All Rights Reserved.

/// A request to change the password of the logged-in user.
#[derive(Clone, Hash, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePassword {
    current_password: String,
    new_password: String,
}

impl ChangePassword {
    pub fn new<P, Q>(current_password: P, new_password: Q) -> Self
    where
        P: Into<String>,
        Q: Into<String>,
    {
        Self {
            current_password: current_password.into(),
            new_password: new_password.into(),
        }
    }
}
