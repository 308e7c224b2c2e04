// Copyright (c) 2018 Blackfynn, Inc. All Rights Reserved.

//! Errors raised by the gym client.

use std::fmt;
use std::io;

use hyper;

use serde_json;

use url;

/// The error body returned by the backend for a failed (non-2xx, non-403)
/// request.
///
/// When the backend responds with an `errors` field (typically a list of
/// per-field validation failures) only that field is kept; otherwise the whole
/// parsed body is.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiErrorPayload(serde_json::Value);

impl ApiErrorPayload {
    /// Extracts the payload from a parsed error body.
    ///
    /// An `errors` field that is `null`, `false`, `0` or `""` counts as
    /// absent.
    pub fn from_body(body: serde_json::Value) -> Self {
        let errors = match body {
            serde_json::Value::Object(ref fields) => {
                fields.get("errors").filter(|e| !is_blank(e)).cloned()
            }
            _ => None,
        };
        ApiErrorPayload(errors.unwrap_or(body))
    }

    /// The payload as sent by the backend.
    pub fn value(&self) -> &serde_json::Value {
        &self.0
    }

    /// Unwraps the value.
    pub fn into_inner(self) -> serde_json::Value {
        self.0
    }

    /// Human readable messages carried by the payload.
    ///
    /// Validation failures arrive as `[{ "msg": ... }, ...]`; other failures
    /// as `{ "message": ... }` or a bare string.
    pub fn messages(&self) -> Vec<String> {
        fn message_of(value: &serde_json::Value) -> Option<String> {
            match *value {
                serde_json::Value::String(ref s) => Some(s.clone()),
                serde_json::Value::Object(ref fields) => fields
                    .get("msg")
                    .or_else(|| fields.get("message"))
                    .and_then(|m| m.as_str())
                    .map(String::from),
                _ => None,
            }
        }

        match self.0 {
            serde_json::Value::Array(ref entries) => entries.iter().filter_map(message_of).collect(),
            ref other => message_of(other).into_iter().collect(),
        }
    }
}

fn is_blank(value: &serde_json::Value) -> bool {
    match *value {
        serde_json::Value::Null => true,
        serde_json::Value::Bool(b) => !b,
        serde_json::Value::Number(ref n) => n.as_f64().map_or(false, |n| n == 0.0),
        serde_json::Value::String(ref s) => s.is_empty(),
        _ => false,
    }
}

impl fmt::Display for ApiErrorPayload {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

error_chain! {
    foreign_links {
        Http(hyper::Error);
        Io(io::Error);
        Json(serde_json::Error);
        UrlParse(url::ParseError);
    }

    errors {
        ApiError(status: hyper::StatusCode, payload: ApiErrorPayload) {
            description("api error")
            display("API error :: {} :: {}", status, payload)
        }

        LoginRequired(reason: String) {
            description("session ended; login required")
            display("Login required :: {}", reason)
        }

        NoSessionError {
            description("no active session")
            display("No active session; log in first")
        }

        NoCompanySetError {
            description("no company set for the current session")
            display("The current session is not associated with a company")
        }

        MissingEnvironmentVariable(name: String) {
            description("missing environment variable")
            display("Environment variable {} must be defined", name)
        }
    }
}

impl Error {
    /// The backend error payload, if this error came from a rejected request.
    pub fn api_payload(&self) -> Option<&ApiErrorPayload> {
        match *self.kind() {
            ErrorKind::ApiError(_, ref payload) => Some(payload),
            _ => None,
        }
    }

    /// Tests if the session was terminally lost and the user must log in again.
    pub fn is_login_required(&self) -> bool {
        match *self.kind() {
            ErrorKind::LoginRequired(_) => true,
            _ => false,
        }
    }
}
