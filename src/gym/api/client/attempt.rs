// Copyright (c) 2018 Blackfynn, Inc. All Rights Reserved.

//! The retry state of a single logical API call.
//!
//! A call starts as `FirstAttempt`. A 403 response moves it to `Retried`
//! (after a token refresh); there is no transition out of `Retried`, so a call
//! is retried at most once.

use hyper::StatusCode;

#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub enum Attempt {
    FirstAttempt,
    Retried,
}

impl Default for Attempt {
    fn default() -> Self {
        Attempt::FirstAttempt
    }
}

impl Attempt {
    pub fn retry_allowed(self) -> bool {
        self == Attempt::FirstAttempt
    }

    /// The state of the retried call, or `None` if this call may not be
    /// retried again.
    pub fn retry(self) -> Option<Attempt> {
        match self {
            Attempt::FirstAttempt => Some(Attempt::Retried),
            Attempt::Retried => None,
        }
    }
}

/// What the client does with the response to an authenticated call.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub enum Disposition {
    /// 2xx: hand the body to the caller.
    Success,
    /// 403 on a first attempt: refresh the tokens, then reissue the call in
    /// the given state.
    RefreshAndRetry(Attempt),
    /// 403 on a retried call: the session is over.
    LoginRequired,
    /// Any other status: surface the backend's error payload.
    Failure,
}

pub fn disposition(status: StatusCode, attempt: Attempt) -> Disposition {
    if status.is_success() {
        Disposition::Success
    } else if status == StatusCode::FORBIDDEN {
        match attempt.retry() {
            Some(next) => Disposition::RefreshAndRetry(next),
            None => Disposition::LoginRequired,
        }
    } else {
        Disposition::Failure
    }
}
