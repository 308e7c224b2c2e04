// Copyright (c) 2018 Blackfynn, Inc. All Rights Reserved.

/// A trait defining the login redirect signal. The client calls
/// `redirect_to_login` once the session has been cleared for good: when a
/// retried call is still forbidden or when a token refresh is rejected.
pub trait LoginRedirect: Send + Sync {
    fn redirect_to_login(&self);
}

/// An implementation of `LoginRedirect` that does nothing.
#[derive(Debug, Clone, Hash)]
pub struct NoRedirect;

impl LoginRedirect for NoRedirect {
    fn redirect_to_login(&self) {
        // Do nothing
    }
}

impl<F> LoginRedirect for F
where
    F: Fn() + Send + Sync,
{
    fn redirect_to_login(&self) {
        self()
    }
}
