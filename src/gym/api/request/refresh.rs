// Copyright (c) 2018 Blackfynn, Inc. All Rights Reserved.

use gym::model::RefreshToken;

/// A request to mint a new access token.
#[derive(Clone, Hash, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Refresh {
    refresh_token: RefreshToken,
}

impl Refresh {
    pub fn new(refresh_token: RefreshToken) -> Self {
        Self { refresh_token }
    }
}
