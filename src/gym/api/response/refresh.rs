// Copyright (c) 2018 Blackfynn, Inc. All Rights Reserved.

use gym::model::{AccessToken, RefreshToken};

/// A freshly minted token pair.
#[derive(Debug, Clone, Hash, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Refresh {
    token: AccessToken,
    refresh_token: RefreshToken,
}

impl Refresh {
    pub fn take(self) -> (AccessToken, RefreshToken) {
        (self.token, self.refresh_token)
    }
}
