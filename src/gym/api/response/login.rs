// Copyright (c) 2018 Blackfynn, Inc. All Rights Reserved.

use gym::model::{AccessToken, CompanyId, RefreshToken, Session, UserId};

/// A type representing the result of a successful login
#[derive(Debug, Clone, Hash, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Login {
    token: AccessToken,
    refresh_token: RefreshToken,
    #[serde(default)]
    user_id: Option<UserId>,
    #[serde(default)]
    company_id: Option<CompanyId>,
}

impl Login {
    pub fn user_id(&self) -> Option<&UserId> {
        self.user_id.as_ref()
    }

    pub fn company_id(&self) -> Option<&CompanyId> {
        self.company_id.as_ref()
    }

    /// The session established by this login.
    pub fn session(&self) -> Session {
        Session::new(self.token.clone(), self.refresh_token.clone())
            .with_user(self.user_id.clone())
            .with_company(self.company_id.clone())
    }
}
