// Copyright (c) 2018 Blackfynn, Inc. All Rights Reserved.

use gym::model::{CompanyId, UserId};

/// A short-lived bearer credential authorizing API calls.
#[derive(Debug, Clone, Hash, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn new<S: Into<String>>(token: S) -> Self {
        AccessToken(token.into())
    }
}

impl AsRef<str> for AccessToken {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl From<String> for AccessToken {
    fn from(token: String) -> Self {
        AccessToken::new(token)
    }
}

impl From<AccessToken> for String {
    fn from(token: AccessToken) -> Self {
        token.0
    }
}

/// A longer-lived credential used solely to mint a new access token.
#[derive(Debug, Clone, Hash, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshToken(String);

impl RefreshToken {
    pub fn new<S: Into<String>>(token: S) -> Self {
        RefreshToken(token.into())
    }
}

impl AsRef<str> for RefreshToken {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl From<String> for RefreshToken {
    fn from(token: String) -> Self {
        RefreshToken::new(token)
    }
}

impl From<RefreshToken> for String {
    fn from(token: RefreshToken) -> Self {
        token.0
    }
}

/// The credentials and identifiers held for the duration of a logged-in
/// session.
///
/// An access token never exists without its refresh token: the absence of a
/// session is represented by the absence of a `Session` value.
#[derive(Debug, Clone, Hash, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    access_token: AccessToken,
    refresh_token: RefreshToken,
    #[serde(default)]
    user_id: Option<UserId>,
    #[serde(default)]
    company_id: Option<CompanyId>,
}

impl Session {
    pub fn new(access_token: AccessToken, refresh_token: RefreshToken) -> Self {
        Self {
            access_token,
            refresh_token,
            user_id: None,
            company_id: None,
        }
    }

    pub fn with_user(mut self, user_id: Option<UserId>) -> Self {
        self.user_id = user_id;
        self
    }

    pub fn with_company(mut self, company_id: Option<CompanyId>) -> Self {
        self.company_id = company_id;
        self
    }

    /// Replaces the token pair, keeping the session identifiers.
    pub fn with_tokens(self, access_token: AccessToken, refresh_token: RefreshToken) -> Self {
        Self {
            access_token,
            refresh_token,
            ..self
        }
    }

    pub fn access_token(&self) -> &AccessToken {
        &self.access_token
    }

    pub fn refresh_token(&self) -> &RefreshToken {
        &self.refresh_token
    }

    pub fn user_id(&self) -> Option<&UserId> {
        self.user_id.as_ref()
    }

    pub fn company_id(&self) -> Option<&CompanyId> {
        self.company_id.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json;

    #[test]
    fn replacing_tokens_keeps_identifiers() {
        let session = Session::new(AccessToken::new("a1"), RefreshToken::new("r1"))
            .with_user(Some(UserId::new("7")))
            .with_company(Some(CompanyId::new("3")));
        let refreshed = session.with_tokens(AccessToken::new("a2"), RefreshToken::new("r2"));

        assert_eq!(refreshed.access_token().as_ref(), "a2");
        assert_eq!(refreshed.refresh_token().as_ref(), "r2");
        assert_eq!(refreshed.user_id(), Some(&UserId::new("7")));
        assert_eq!(refreshed.company_id(), Some(&CompanyId::new("3")));
    }

    #[test]
    fn persisted_form_uses_camel_case() {
        let session = Session::new(AccessToken::new("a1"), RefreshToken::new("r1"))
            .with_company(Some(CompanyId::new("3")));
        let value = serde_json::to_value(&session).unwrap();
        assert_eq!(
            value,
            json!({
                "accessToken": "a1",
                "refreshToken": "r1",
                "userId": null,
                "companyId": "3"
            })
        );
        let back: Session = serde_json::from_value(value).unwrap();
        assert_eq!(back, session);
    }
}
