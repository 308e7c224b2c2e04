// Copyright (c) 2018 Blackfynn, Inc. All Rights Reserved.

/// The operator account created together with a company.
#[derive(Clone, Hash, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyUser {
    name: String,
    email: String,
    password: String,
}

impl CompanyUser {
    pub fn new<N, E, P>(name: N, email: E, password: P) -> Self
    where
        N: Into<String>,
        E: Into<String>,
        P: Into<String>,
    {
        Self {
            name: name.into(),
            email: email.into(),
            password: password.into(),
        }
    }
}

/// The body of a company `POST`.
#[derive(Clone, Hash, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Create {
    fantasy_name: String,
    user: CompanyUser,
    cnpj: String,
    phone: String,
}

impl Create {
    /// `cnpj` and `phone` are sent as given; callers strip display masks.
    pub fn new<N, C, P>(fantasy_name: N, user: CompanyUser, cnpj: C, phone: P) -> Self
    where
        N: Into<String>,
        C: Into<String>,
        P: Into<String>,
    {
        Self {
            fantasy_name: fantasy_name.into(),
            user,
            cnpj: cnpj.into(),
            phone: phone.into(),
        }
    }
}
