// Copyright (c) 2018 Blackfynn, Inc. All Rights Reserved.

//! Functions to interact with the gym backend.

pub mod attempt;
pub mod redirect;

use self::attempt::{disposition, Attempt, Disposition};
use self::redirect::{LoginRedirect, NoRedirect};

use std::sync::{Arc, Mutex, MutexGuard};

use futures::future::Shared;
use futures::*;

use hyper;
use hyper::client::{Client, HttpConnector};
use hyper::header::{self, HeaderValue};
use hyper_tls::HttpsConnector;

use serde;
use serde_json;

use url::form_urlencoded;
use url::Url;

use super::request::RequestParam;
use super::{request, response};
use gym;
use gym::config::Config;
use gym::error::{ApiErrorPayload, ErrorKind};
use gym::model::{self, CompanyId, PlanId, Session, StudentId, UserId};
use gym::session::{FileSessionStore, MemorySessionStore, SessionStore};
use gym::util::futures::into_future_trait;

// The token refresh endpoint:
const REFRESH_ROUTE: &str = "/refresh-token";

// Why an in-flight refresh failed. Shared between every caller waiting on
// the refresh, so it only carries plain data.
#[derive(Debug, Clone)]
enum RefreshFailure {
    // The session was cleared and the login redirect fired.
    SessionEnded(String),
    Other(String),
}

impl From<gym::Error> for RefreshFailure {
    fn from(error: gym::Error) -> Self {
        match *error.kind() {
            ErrorKind::LoginRequired(ref reason) => RefreshFailure::SessionEnded(reason.clone()),
            _ => RefreshFailure::Other(
                error
                    .iter()
                    .map(|e| e.to_string())
                    .collect::<Vec<_>>()
                    .join(" :: "),
            ),
        }
    }
}

impl From<RefreshFailure> for gym::Error {
    fn from(failure: RefreshFailure) -> Self {
        match failure {
            RefreshFailure::SessionEnded(reason) => ErrorKind::LoginRequired(reason).into(),
            RefreshFailure::Other(message) => message.into(),
        }
    }
}

type SharedRefresh = Shared<Box<Future<Item = Session, Error = RefreshFailure> + Send>>;

struct GymImpl {
    config: Config,
    api_url: Url,
    http_client: Client<HttpsConnector<HttpConnector>>,
    session_store: Arc<SessionStore>,
    login_redirect: Arc<LoginRedirect>,
    // The refresh currently in flight, tagged with its generation:
    refresh: Option<(u64, SharedRefresh)>,
    refresh_generation: u64,
}

/// The gym backend client.
pub struct Gym {
    inner: Arc<Mutex<GymImpl>>,
}

impl Clone for Gym {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

// =============================================================================

// A useful alias when dealing with the fact that an endpoint does not expect
// a POST/PUT body, but a type is still expected:
type Nothing = serde_json::Value;

/// One logical API call: the original request and, at most, its retry. The
/// body is serialized once and reused verbatim by the retry.
#[derive(Debug, Clone)]
struct RequestAttempt {
    method: hyper::Method,
    url: Url,
    body: Option<Vec<u8>>,
    authenticated: bool,
    attempt: Attempt,
}

impl RequestAttempt {
    fn label(&self) -> String {
        format!("{method}:{url}", method = self.method, url = self.url)
    }

    fn retried(self, attempt: Attempt) -> Self {
        Self { attempt, ..self }
    }
}

// =============================================================================

// Useful builder macros:
macro_rules! route {
    ($uri:expr, $($var:ident),*) => (
        format!($uri, $($var = Into::<String>::into($var)),*)
    )
}

macro_rules! param {
    ($key:expr, $value:expr) => {
        ($key.into(), $value.into())
    };
}

// Based on https://docs.rs/maplit/1.0.1/maplit/
macro_rules! params {
    () => (vec![]); // For empty parameter lists
    ($($key:expr => $value:expr),*) => {
        {
            let mut _p: Vec<RequestParam> = vec![];
            $(
                _p.push(param!($key, $value));
            )*
            _p
        }
    }
}

// Empty payload
macro_rules! payload {
    () => {
        None as Option<&Nothing>
    };
    ($target:expr) => {
        Some($target)
    };
}

macro_rules! get {
    ($target:expr, $route:expr) => {
        $target.get($route, params!())
    };
    ($target:expr, $route:expr, $params:expr) => {
        $target.get($route, $params)
    };
}

macro_rules! post {
    ($target:expr, $route:expr) => {
        $target.post($route, params!(), payload!())
    };
    ($target:expr, $route:expr, $params:expr, $payload:expr) => {
        $target.post($route, $params, payload!($payload))
    };
}

macro_rules! patch {
    ($target:expr, $route:expr, $params:expr, $payload:expr) => {
        $target.patch($route, $params, payload!($payload))
    };
}

macro_rules! delete {
    ($target:expr, $route:expr, $params:expr) => {
        $target.delete($route, $params)
    };
}

// =============================================================================

// Joins `route` (which may carry its own query string) onto the base URL and
// appends `params` to the query.
fn build_url<I>(base: &Url, route: &str, params: I) -> gym::Result<Url>
where
    I: IntoIterator<Item = RequestParam>,
{
    let (path, query) = match route.find('?') {
        Some(i) => (&route[..i], Some(&route[i + 1..])),
        None => (route, None),
    };

    let mut pairs: Vec<RequestParam> = query
        .map(|q| form_urlencoded::parse(q.as_bytes()).into_owned().collect())
        .unwrap_or_default();
    pairs.extend(params);

    let mut url = base.clone();
    url.set_path(&format!(
        "{base}/{route}",
        base = base.path().trim_end_matches('/'),
        route = path.trim_start_matches('/')
    ));
    url.set_query(None);
    url.set_fragment(None);
    if !pairs.is_empty() {
        url.query_pairs_mut().extend_pairs(pairs);
    }
    Ok(url)
}

fn chunk_to_string(body: &hyper::Chunk) -> String {
    String::from_utf8_lossy(&body[..]).to_string()
}

// Parses a successful response body into a typeful representation:
fn parse_body<Q>(label: &str, body: &hyper::Chunk) -> gym::Result<Q>
where
    Q: serde::de::DeserializeOwned,
{
    debug!(
        "gym:request<{label}>:serialize:payload = {payload}",
        label = label,
        payload = chunk_to_string(body)
    );
    serde_json::from_slice(&body[..]).map_err(|e| {
        gym::Error::with_chain(
            e,
            format!(
                "gym:request<{label}>:serialize:payload = {payload}",
                label = label,
                payload = chunk_to_string(body)
            ),
        )
    })
}

// Builds the error for a rejected (non-2xx) response. The backend's `errors`
// field is preferred over the rest of the body. An empty body yields a `null`
// payload; any other non-JSON body is a parse error.
fn api_error(label: &str, status: hyper::StatusCode, body: &hyper::Chunk) -> gym::Error {
    // A blank error body is an `ApiError` with a `null` payload, not a JSON
    // parse error:
    if body.iter().all(|b| b.is_ascii_whitespace()) {
        return ErrorKind::ApiError(status, ApiErrorPayload::from_body(serde_json::Value::Null))
            .into();
    }
    match serde_json::from_slice::<serde_json::Value>(&body[..]) {
        Ok(value) => ErrorKind::ApiError(status, ApiErrorPayload::from_body(value)).into(),
        Err(e) => gym::Error::with_chain(
            e,
            format!(
                "gym:request<{label}>:error<{status}>:payload = {payload}",
                label = label,
                status = status,
                payload = chunk_to_string(body)
            ),
        ),
    }
}

// =============================================================================

impl Gym {
    /// Create a new gym API client.
    ///
    /// The session is kept in memory, or in the file named by
    /// `Config::with_session_file`.
    pub fn new(config: Config) -> gym::Result<Self> {
        let session_store = match config.session_file() {
            Some(path) => Arc::new(FileSessionStore::new(path)) as Arc<SessionStore>,
            None => Arc::new(MemorySessionStore::new()) as Arc<SessionStore>,
        };
        Self::with_session_store(config, session_store)
    }

    /// Create a new gym API client backed by the given session store.
    pub fn with_session_store(config: Config, session_store: Arc<SessionStore>) -> gym::Result<Self> {
        let api_url = config.api_url()?;
        let connector = HttpsConnector::new(config.dns_threads())
            .map_err(|e| gym::Error::with_chain(e, "gym:client:connector"))?;
        let http_client = Client::builder().build(connector);
        Ok(Self {
            inner: Arc::new(Mutex::new(GymImpl {
                config,
                api_url,
                http_client,
                session_store,
                login_redirect: Arc::new(NoRedirect),
                refresh: None,
                refresh_generation: 0,
            })),
        })
    }

    // Recovers the state even if a panicking thread poisoned the lock; every
    // critical section below leaves it consistent.
    fn inner(&self) -> MutexGuard<GymImpl> {
        self.inner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn session_store(&self) -> Arc<SessionStore> {
        Arc::clone(&self.inner().session_store)
    }

    /// Set the callback fired when the session ends and the user has to log
    /// in again.
    pub fn set_login_redirect<R: 'static + LoginRedirect>(&self, redirect: R) {
        self.inner().login_redirect = Arc::new(redirect);
    }

    /// The configuration the client was created with.
    pub fn config(&self) -> Config {
        self.inner().config.clone()
    }

    /// The base URL every route is resolved against.
    pub fn api_url(&self) -> Url {
        self.inner().api_url.clone()
    }

    /// The current session, if the user is logged in.
    pub fn session(&self) -> gym::Result<Option<Session>> {
        self.session_store().get()
    }

    /// Test if the user is logged in.
    pub fn has_session(&self) -> bool {
        match self.session() {
            Ok(session) => session.is_some(),
            Err(e) => {
                warn!("gym:session:read failed :: {}", e);
                false
            }
        }
    }

    /// Get the company the logged-in user operates.
    pub fn current_company(&self) -> gym::Result<Option<CompanyId>> {
        Ok(self.session()?.and_then(|s| s.company_id().cloned()))
    }

    /// Get the logged-in user.
    pub fn current_user(&self) -> gym::Result<Option<UserId>> {
        Ok(self.session()?.and_then(|s| s.user_id().cloned()))
    }

    /// Log out, discarding the session.
    pub fn logout(&self) -> gym::Result<()> {
        info!("gym:logout");
        self.session_store().clear()
    }

    // Clears the session and fires the login redirect. Returns the error to
    // hand to the caller.
    fn end_session<S: Into<String>>(&self, reason: S) -> gym::Error {
        let reason = reason.into();
        let (session_store, login_redirect) = {
            let inner = self.inner();
            (
                Arc::clone(&inner.session_store),
                Arc::clone(&inner.login_redirect),
            )
        };
        warn!("gym:session:end :: {}", reason);
        if let Err(e) = session_store.clear() {
            warn!("gym:session:clear failed :: {}", e);
        }
        login_redirect.redirect_to_login();
        ErrorKind::LoginRequired(reason).into()
    }

    fn prepare<I, P, S>(
        &self,
        method: hyper::Method,
        route: S,
        params: I,
        payload: Option<&P>,
        authenticated: bool,
    ) -> gym::Result<RequestAttempt>
    where
        P: serde::Serialize,
        I: IntoIterator<Item = RequestParam>,
        S: Into<String>,
    {
        let route: String = route.into();
        let url = build_url(&self.api_url(), &route, params)?;
        let body = match payload {
            Some(p) => Some(
                serde_json::to_vec(p).map_err(|e| gym::Error::with_chain(e, "gym:request:serde"))?,
            ),
            None => None,
        };
        Ok(RequestAttempt {
            method,
            url,
            body,
            authenticated,
            attempt: Attempt::FirstAttempt,
        })
    }

    // Issues one physical HTTP call. The access token is read from the session
    // store at call time.
    fn send(&self, attempt: &RequestAttempt) -> gym::Future<(hyper::StatusCode, hyper::Chunk)> {
        let token = if attempt.authenticated {
            match self.session() {
                Ok(session) => session.map(|s| s.access_token().clone()),
                Err(e) => return into_future_trait(future::err(e)),
            }
        } else {
            None
        };
        let client = self.inner().http_client.clone();
        let label = attempt.label();
        let label_clone = label.clone();

        let body = match attempt.body {
            Some(ref bytes) => hyper::Body::from(bytes.clone()),
            None => hyper::Body::empty(),
        };

        let mut builder = hyper::Request::builder();
        builder
            .method(attempt.method.clone())
            .uri(attempt.url.as_str())
            .header(header::CONTENT_TYPE, HeaderValue::from_static("application/json"))
            .header(header::ACCEPT, HeaderValue::from_static("application/json"));
        if let Some(token) = token {
            builder.header(
                header::AUTHORIZATION,
                format!("Bearer {}", AsRef::<str>::as_ref(&token)).as_str(),
            );
        }
        let req = match builder.body(body) {
            Ok(req) => req,
            Err(e) => {
                return into_future_trait(future::err(gym::Error::with_chain(
                    e,
                    format!("gym:request<{label}>:build", label = label),
                )))
            }
        };

        debug!(
            "gym:request<{label}>:send attempt = {attempt:?}",
            label = label,
            attempt = attempt.attempt
        );

        let f = client
            .request(req)
            .map_err(move |e| {
                gym::Error::with_chain(e, format!("gym:request<{label}>:execute", label = label))
            })
            .and_then(move |resp| {
                let status = resp.status();
                resp.into_body()
                    .concat2()
                    .map_err({
                        let label = label_clone.clone();
                        move |e| {
                            gym::Error::with_chain(
                                e,
                                format!("gym:request<{label}>:response", label = label),
                            )
                        }
                    })
                    .map(move |body| {
                        debug!(
                            "gym:request<{label}>:status = {status}",
                            label = label_clone,
                            status = status
                        );
                        (status, body)
                    })
            });

        into_future_trait(f)
    }

    // Runs a logical call: the request, and on a first 403 a token refresh
    // followed by exactly one retry.
    fn execute(&self, attempt: RequestAttempt) -> gym::Future<hyper::Chunk> {
        let this = self.clone();
        let f = self.send(&attempt).and_then(move |(status, body)| {
            let label = attempt.label();
            if !attempt.authenticated {
                return into_future_trait(if status.is_success() {
                    future::ok(body)
                } else {
                    future::err(api_error(&label, status, &body))
                });
            }

            match disposition(status, attempt.attempt) {
                Disposition::Success => into_future_trait(future::ok(body)),
                Disposition::RefreshAndRetry(next) => {
                    info!("gym:request<{label}> :: forbidden; refreshing session", label = label);
                    let retry = attempt.retried(next);
                    into_future_trait(
                        this.refresh_session()
                            .and_then(move |_| this.execute(retry)),
                    )
                }
                Disposition::LoginRequired => into_future_trait(future::err(this.end_session(
                    format!("gym:request<{label}> :: forbidden after token refresh", label = label),
                ))),
                Disposition::Failure => {
                    into_future_trait(future::err(api_error(&label, status, &body)))
                }
            }
        });

        into_future_trait(f)
    }

    fn dispatch<Q>(&self, attempt: gym::Result<RequestAttempt>) -> gym::Future<Q>
    where
        Q: 'static + Send + serde::de::DeserializeOwned,
    {
        match attempt {
            Ok(attempt) => {
                let label = attempt.label();
                into_future_trait(
                    self.execute(attempt)
                        .and_then(move |body| parse_body(&label, &body)),
                )
            }
            Err(e) => into_future_trait(future::err(e)),
        }
    }

    // Like `dispatch`, but the response body is discarded unread.
    fn dispatch_unit(&self, attempt: gym::Result<RequestAttempt>) -> gym::Future<()> {
        match attempt {
            Ok(attempt) => into_future_trait(self.execute(attempt).map(|_| ())),
            Err(e) => into_future_trait(future::err(e)),
        }
    }

    // =========================================================================
    // Token refresh

    // Refreshes the session tokens. Concurrent callers share the refresh in
    // flight rather than each starting their own.
    fn refresh_session(&self) -> gym::Future<Session> {
        let mut inner = self.inner();
        let joined = inner.refresh.as_ref().map(|&(_, ref f)| f.clone());
        let in_flight = match joined {
            Some(in_flight) => {
                debug!("gym:refresh :: joining refresh in flight");
                in_flight
            }
            None => {
                inner.refresh_generation += 1;
                let generation = inner.refresh_generation;
                let this = self.clone();
                let that = self.clone();
                // `lazy` defers the round trip until first polled, outside
                // of this lock:
                let round_trip = future::lazy(move || this.refresh_round_trip()).then(
                    move |result| {
                        that.finish_refresh(generation);
                        result.map_err(RefreshFailure::from)
                    },
                );
                let boxed: Box<Future<Item = Session, Error = RefreshFailure> + Send> =
                    Box::new(round_trip);
                let shared = boxed.shared();
                inner.refresh = Some((generation, shared.clone()));
                shared
            }
        };
        drop(inner);

        into_future_trait(
            in_flight
                .map(|session| (*session).clone())
                .map_err(|failure| gym::Error::from((*failure).clone())),
        )
    }

    fn finish_refresh(&self, generation: u64) {
        let mut inner = self.inner();
        if inner.refresh.as_ref().map(|&(g, _)| g) == Some(generation) {
            inner.refresh = None;
        }
    }

    // A single `POST /refresh-token`. Any failure ends the session; the
    // refresh itself is never retried and a rejected refresh never touches
    // the stored tokens.
    fn refresh_round_trip(&self) -> gym::Future<Session> {
        let session_store = self.session_store();
        let session = match session_store.get() {
            Ok(Some(session)) => session,
            Ok(None) => return into_future_trait(future::err(self.end_session("no session to refresh"))),
            Err(e) => return into_future_trait(future::err(e)),
        };

        let payload = request::Refresh::new(session.refresh_token().clone());
        let attempt = match self.prepare(
            hyper::Method::POST,
            REFRESH_ROUTE,
            params!(),
            payload!(&payload),
            false,
        ) {
            Ok(attempt) => attempt,
            Err(e) => return into_future_trait(future::err(e)),
        };
        let label = attempt.label();

        let this = self.clone();
        let f = self.send(&attempt).and_then(move |(status, body)| -> gym::Result<Session> {
            if !status.is_success() {
                return Err(this.end_session(format!(
                    "gym:refresh :: rejected with status {status}",
                    status = status
                )));
            }
            let (token, refresh_token) = parse_body::<response::Refresh>(&label, &body)?.take();

            // Logging out while the refresh was in flight wins:
            match session_store.get()? {
                Some(current) => {
                    let refreshed = current.with_tokens(token, refresh_token);
                    session_store.set(&refreshed)?;
                    info!("gym:refresh :: session tokens replaced");
                    Ok(refreshed)
                }
                None => Err(ErrorKind::LoginRequired(
                    "gym:refresh :: session ended while refreshing".into(),
                )
                .into()),
            }
        });

        into_future_trait(f)
    }

    // =========================================================================
    // Generic verbs

    /// Issue an authenticated `GET`, returning the parsed response body.
    pub fn get<Q, S, I>(&self, route: S, params: I) -> gym::Future<Q>
    where
        Q: 'static + Send + serde::de::DeserializeOwned,
        S: Into<String>,
        I: IntoIterator<Item = RequestParam>,
    {
        self.dispatch(self.prepare(hyper::Method::GET, route, params, payload!(), true))
    }

    /// Issue an authenticated `POST`, returning the parsed response body.
    pub fn post<P, Q, S, I>(&self, route: S, params: I, payload: Option<&P>) -> gym::Future<Q>
    where
        P: serde::Serialize,
        Q: 'static + Send + serde::de::DeserializeOwned,
        S: Into<String>,
        I: IntoIterator<Item = RequestParam>,
    {
        self.dispatch(self.prepare(hyper::Method::POST, route, params, payload, true))
    }

    /// Issue an authenticated `PUT`, returning the parsed response body.
    pub fn put<P, Q, S, I>(&self, route: S, params: I, payload: Option<&P>) -> gym::Future<Q>
    where
        P: serde::Serialize,
        Q: 'static + Send + serde::de::DeserializeOwned,
        S: Into<String>,
        I: IntoIterator<Item = RequestParam>,
    {
        self.dispatch(self.prepare(hyper::Method::PUT, route, params, payload, true))
    }

    /// Issue an authenticated `PATCH`.
    ///
    /// The response body is not parsed; callers get `()` whatever the backend
    /// sends back.
    pub fn patch<P, S, I>(&self, route: S, params: I, payload: Option<&P>) -> gym::Future<()>
    where
        P: serde::Serialize,
        S: Into<String>,
        I: IntoIterator<Item = RequestParam>,
    {
        self.dispatch_unit(self.prepare(hyper::Method::PATCH, route, params, payload, true))
    }

    /// Issue an authenticated `DELETE`.
    ///
    /// As with `patch`, the response body is not parsed.
    pub fn delete<S, I>(&self, route: S, params: I) -> gym::Future<()>
    where
        S: Into<String>,
        I: IntoIterator<Item = RequestParam>,
    {
        self.dispatch_unit(self.prepare(hyper::Method::DELETE, route, params, payload!(), true))
    }

    // =========================================================================
    // Session

    /// Log in to the gym backend.
    ///
    /// If successful, the resulting session is stored for subsequent API
    /// calls.
    pub fn login<S: Into<String>>(&self, email: S, password: S) -> gym::Future<response::Login> {
        let payload = request::Login::new(email, password);
        let session_store = self.session_store();
        let attempt = self.prepare(
            hyper::Method::POST,
            "/login",
            params!(),
            payload!(&payload),
            false,
        );
        into_future_trait(self.dispatch(attempt).and_then(
            move |login: response::Login| -> gym::Result<response::Login> {
                session_store.set(&login.session())?;
                info!(
                    "gym:login :: session established for user {user:?}",
                    user = login.user_id()
                );
                Ok(login)
            },
        ))
    }

    /// Check that the stored access token is still accepted by the backend.
    pub fn check_token(&self) -> gym::Future<()> {
        let session = match self.session() {
            Ok(Some(session)) => session,
            Ok(None) => return into_future_trait(future::err(ErrorKind::NoSessionError.into())),
            Err(e) => return into_future_trait(future::err(e)),
        };
        let token: String = session.access_token().clone().into();
        self.dispatch_unit(self.prepare(
            hyper::Method::GET,
            "/check-token",
            params!("token" => token),
            payload!(),
            true,
        ))
    }

    /// Pick up a stored session, e.g. one persisted by a previous process.
    ///
    /// Resolves to `true` if a session exists and the backend accepts it. A
    /// rejected session is discarded.
    pub fn resume_session(&self) -> gym::Future<bool> {
        if !self.has_session() {
            return into_future_trait(future::ok(false));
        }
        let session_store = self.session_store();
        into_future_trait(self.check_token().then(move |result| match result {
            Ok(()) => Ok(true),
            Err(e) => {
                info!("gym:session:resume :: stored session rejected :: {}", e);
                session_store.clear().map(|_| false)
            }
        }))
    }

    /// Change the password of the logged-in user.
    pub fn change_password(&self, payload: &request::ChangePassword) -> gym::Future<()> {
        patch!(self, "/user/change-password", params!(), payload)
    }

    // =========================================================================
    // Students

    /// List the students of the current company.
    pub fn list_students(
        &self,
        filter: &request::student::Filter,
    ) -> gym::Future<response::Students> {
        get!(self, "/client", filter.params())
    }

    /// Get a specific student.
    pub fn get_student(&self, id: &StudentId) -> gym::Future<model::Student> {
        get!(self, route!("/client/{id}", id))
    }

    /// Register a new student.
    ///
    /// The student is registered with the company of the current session
    /// unless the payload names one.
    pub fn create_student(
        &self,
        payload: request::student::Create,
    ) -> gym::Future<serde_json::Value> {
        let payload = if payload.company_id().is_some() {
            payload
        } else {
            match self.current_company() {
                Ok(Some(company_id)) => payload.with_company(company_id),
                Ok(None) => {
                    return into_future_trait(future::err(ErrorKind::NoCompanySetError.into()))
                }
                Err(e) => return into_future_trait(future::err(e)),
            }
        };
        post!(self, "/client", params!(), &payload)
    }

    /// Update an existing student.
    pub fn update_student(
        &self,
        id: &StudentId,
        payload: &request::student::Update,
    ) -> gym::Future<()> {
        patch!(self, route!("/client/{id}", id), params!(), payload)
    }

    /// Activate or deactivate a student.
    pub fn set_student_active(&self, id: &StudentId, is_active: bool) -> gym::Future<()> {
        patch!(
            self,
            route!("/client/{id}", id),
            params!(),
            &request::student::SetActive::new(is_active)
        )
    }

    /// Delete a student.
    pub fn delete_student(&self, id: &StudentId) -> gym::Future<()> {
        delete!(self, "/client", params!("id" => id))
    }

    // =========================================================================
    // Plans

    /// List the plans of the current company.
    pub fn list_plans(&self, filter: &request::plan::Filter) -> gym::Future<Vec<model::Plan>> {
        get!(self, "/plan", filter.params())
    }

    /// Get a specific plan.
    pub fn get_plan(&self, id: &PlanId) -> gym::Future<model::Plan> {
        get!(self, route!("/plan/{id}", id))
    }

    /// Create a new plan.
    pub fn create_plan(&self, payload: &request::plan::Plan) -> gym::Future<serde_json::Value> {
        post!(self, "/plan", params!(), payload)
    }

    /// Update an existing plan.
    pub fn update_plan(&self, id: &PlanId, payload: &request::plan::Plan) -> gym::Future<()> {
        patch!(self, "/plan", params!("planId" => id), payload)
    }

    /// Delete a plan.
    pub fn delete_plan(&self, id: &PlanId) -> gym::Future<()> {
        delete!(self, "/plan", params!("id" => id))
    }

    // =========================================================================
    // Payments

    /// List students with their payments for a period.
    pub fn list_payments(
        &self,
        filter: &request::payment::Filter,
    ) -> gym::Future<Vec<model::StudentPayments>> {
        get!(self, "/client/payment", filter.params())
    }

    /// Record a student's payment.
    pub fn record_payment(
        &self,
        payload: &request::payment::Record,
    ) -> gym::Future<serde_json::Value> {
        post!(self, "/payment", params!(), payload)
    }

    // =========================================================================
    // Companies

    /// Get the company of the logged-in user, with its notification settings.
    pub fn get_company(&self) -> gym::Future<model::Company> {
        get!(self, "/company")
    }

    /// List every company.
    pub fn list_companies(&self) -> gym::Future<Vec<model::Company>> {
        get!(self, "/company/all")
    }

    /// Create a company together with its operator account.
    pub fn create_company(
        &self,
        payload: &request::company::Create,
    ) -> gym::Future<serde_json::Value> {
        post!(self, "/company", params!(), payload)
    }

    /// Delete a company.
    pub fn delete_company(&self, id: &CompanyId) -> gym::Future<()> {
        delete!(self, "/company", params!("id" => id))
    }

    /// Update the overdue notification settings of the current company.
    pub fn update_notification_settings(
        &self,
        payload: &request::NotificationSettings,
    ) -> gym::Future<()> {
        patch!(self, "/notification", params!(), payload)
    }

    // =========================================================================
    // WhatsApp

    /// Get a QR code to pair the company's WhatsApp account.
    pub fn whatsapp_qr_code(&self) -> gym::Future<model::QrCode> {
        get!(self, "/whatsapp/qrcode")
    }

    /// Get the state of the WhatsApp connection.
    pub fn whatsapp_status(&self) -> gym::Future<model::ConnectionStatus> {
        get!(self, "/whatsapp/status")
    }

    /// Disconnect the company's WhatsApp account.
    pub fn disconnect_whatsapp(&self) -> gym::Future<model::ConnectionStatus> {
        post!(self, "/whatsapp/disconnect")
    }

    // =========================================================================
    // Dashboard

    /// Get the dashboard summary of the current company.
    pub fn dashboard(&self) -> gym::Future<model::DashboardSummary> {
        get!(self, "/dashboard")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as StdError;
    use std::net::SocketAddr;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::{Duration, Instant};

    use hyper::service::service_fn;
    use hyper::{Body, Request, Response, Server};

    use tokio::runtime::Runtime;
    use tokio::timer::Delay;

    use gym::model::{AccessToken, RefreshToken};

    lazy_static! {
        static ref EXPIRED_ACCESS: AccessToken = AccessToken::new("access-1");
        static ref FRESH_ACCESS: AccessToken = AccessToken::new("access-2");
    }

    /// A request as seen by the mock backend.
    #[derive(Debug, Clone)]
    struct Recorded {
        method: String,
        path: String,
        authorization: Option<String>,
        body: String,
    }

    impl Recorded {
        fn json(&self) -> serde_json::Value {
            serde_json::from_str(&self.body).unwrap()
        }
    }

    /// The mock backend's answer to a request.
    struct Reply {
        status: u16,
        body: String,
        delay: Duration,
    }

    fn reply(status: u16, body: serde_json::Value) -> Reply {
        Reply {
            status,
            body: body.to_string(),
            delay: Duration::from_millis(0),
        }
    }

    fn raw_reply(status: u16, body: &str) -> Reply {
        Reply {
            status,
            body: body.to_string(),
            delay: Duration::from_millis(0),
        }
    }

    fn refreshed_tokens() -> Reply {
        reply(200, json!({ "token": "access-2", "refreshToken": "refresh-2" }))
    }

    fn bearer(token: &AccessToken) -> Option<String> {
        Some(format!("Bearer {}", AsRef::<str>::as_ref(token)))
    }

    fn logged_in() -> Session {
        Session::new(EXPIRED_ACCESS.clone(), RefreshToken::new("refresh-1"))
            .with_user(Some(UserId::new("7")))
            .with_company(Some(CompanyId::new("3")))
    }

    type ResponseFuture = Box<Future<Item = Response<Body>, Error = Box<StdError + Send + Sync>> + Send>;

    /// An in-process backend answering every request through `handler`, which
    /// receives the request and how many identical (method and path) requests
    /// came before it.
    struct Backend {
        runtime: Runtime,
        url: String,
        requests: Arc<Mutex<Vec<Recorded>>>,
    }

    impl Backend {
        fn start<H>(handler: H) -> Self
        where
            H: 'static + Fn(&Recorded, usize) -> Reply + Send + Sync,
        {
            let requests = Arc::new(Mutex::new(Vec::<Recorded>::new()));
            let handler = Arc::new(handler);
            let log = Arc::clone(&requests);

            let new_service = move || {
                let log = Arc::clone(&log);
                let handler = Arc::clone(&handler);
                service_fn(move |req: Request<Body>| -> ResponseFuture {
                    let log = Arc::clone(&log);
                    let handler = Arc::clone(&handler);
                    let method = req.method().to_string();
                    let path = req
                        .uri()
                        .path_and_query()
                        .map(|pq| pq.as_str().to_string())
                        .unwrap_or_default();
                    let authorization = req
                        .headers()
                        .get(header::AUTHORIZATION)
                        .and_then(|v| v.to_str().ok())
                        .map(String::from);

                    Box::new(
                        req.into_body()
                            .concat2()
                            .map_err(|e| -> Box<StdError + Send + Sync> { Box::new(e) })
                            .and_then(move |chunk| {
                                let recorded = Recorded {
                                    method,
                                    path,
                                    authorization,
                                    body: chunk_to_string(&chunk),
                                };
                                let seen = {
                                    let mut log = log.lock().unwrap();
                                    let seen = log
                                        .iter()
                                        .filter(|r| {
                                            r.method == recorded.method && r.path == recorded.path
                                        })
                                        .count();
                                    log.push(recorded.clone());
                                    seen
                                };
                                let reply = (*handler)(&recorded, seen);
                                let response = Response::builder()
                                    .status(reply.status)
                                    .header(header::CONTENT_TYPE, "application/json")
                                    .body(Body::from(reply.body))
                                    .unwrap();
                                Delay::new(Instant::now() + reply.delay)
                                    .map_err(|e| -> Box<StdError + Send + Sync> { Box::new(e) })
                                    .map(move |_| response)
                            }),
                    )
                })
            };

            let addr: SocketAddr = ([127, 0, 0, 1], 0).into();
            let server = Server::bind(&addr).serve(new_service);
            let url = format!("http://{}", server.local_addr());

            let mut runtime = Runtime::new().unwrap();
            runtime.spawn(server.map_err(|e| eprintln!("mock backend failed: {}", e)));

            Self {
                runtime,
                url,
                requests,
            }
        }

        fn client(&self, session: Option<Session>) -> (Gym, Arc<MemorySessionStore>) {
            let store = Arc::new(match session {
                Some(session) => MemorySessionStore::with_session(session),
                None => MemorySessionStore::new(),
            });
            let config = Config::from_url(&self.url).unwrap();
            let gym = Gym::with_session_store(config, Arc::clone(&store) as Arc<SessionStore>).unwrap();
            (gym, store)
        }

        fn run<T>(&mut self, f: gym::Future<T>) -> gym::Result<T>
        where
            T: 'static + Send,
        {
            self.runtime.block_on(f)
        }

        fn requests(&self) -> Vec<Recorded> {
            self.requests.lock().unwrap().clone()
        }

        fn requests_to(&self, method: &str, path: &str) -> Vec<Recorded> {
            self.requests()
                .into_iter()
                .filter(|r| r.method == method && r.path == path)
                .collect()
        }
    }

    // Counts login redirects.
    fn count_redirects(gym: &Gym) -> Arc<AtomicUsize> {
        let redirects = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&redirects);
        gym.set_login_redirect(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        redirects
    }

    fn is_api_error(e: &gym::Error, expected: u16) -> bool {
        match *e.kind() {
            ErrorKind::ApiError(status, _) => status.as_u16() == expected,
            _ => false,
        }
    }

    #[test]
    fn routes_are_joined_onto_the_base_url() {
        let base = "https://api.example.com/v1/".parse::<Url>().unwrap();
        let url = build_url(&base, "/client/5", params!()).unwrap();
        assert_eq!(url.as_str(), "https://api.example.com/v1/client/5");

        let base = "http://localhost:3333".parse::<Url>().unwrap();
        let url = build_url(&base, "/dashboard", params!()).unwrap();
        assert_eq!(url.as_str(), "http://localhost:3333/dashboard");
    }

    #[test]
    fn embedded_query_strings_are_merged_with_params() {
        let base = "http://localhost:3333".parse::<Url>().unwrap();
        let url = build_url(
            &base,
            "/client?page=1&limit=10",
            params!("name" => "ana maria"),
        )
        .unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:3333/client?page=1&limit=10&name=ana+maria"
        );
        assert_eq!(url.path(), "/client");
    }

    #[test]
    fn get_returns_the_body_unchanged() {
        let listing = json!({
            "clients": [
                { "id": 5, "name": "Ana", "phone": "11987654321", "dueDay": 10, "isActive": true },
                { "id": 6, "name": "Bruno", "isActive": false, "extra": { "nested": [1, 2] } }
            ],
            "totalClients": 42
        });
        let expected = listing.clone();
        let mut backend = Backend::start(move |_, _| reply(200, listing.clone()));
        let (gym, _) = backend.client(Some(logged_in()));

        let body: serde_json::Value = backend
            .run(gym.get("/client?page=1&limit=10", params!()))
            .unwrap();
        assert_eq!(body, expected);

        let students = backend
            .run(gym.list_students(&request::student::Filter::new().page(1, 10)))
            .unwrap();
        assert_eq!(students.total(), 42);
        assert_eq!(students.len(), 2);
        assert!(!students.iter().nth(1).unwrap().is_active());

        let requests = backend.requests_to("GET", "/client?page=1&limit=10");
        assert_eq!(requests.len(), 2);
        for r in requests {
            assert_eq!(r.authorization, bearer(&EXPIRED_ACCESS));
        }
    }

    #[test]
    fn expired_token_is_refreshed_and_the_call_retried_once() {
        let mut backend = Backend::start(|r, seen| match (r.method.as_str(), r.path.as_str()) {
            ("PATCH", "/client/5") if seen == 0 => reply(403, json!({ "message": "jwt expired" })),
            ("PATCH", "/client/5") => raw_reply(200, "not json at all"),
            ("POST", "/refresh-token") => refreshed_tokens(),
            _ => reply(404, json!({})),
        });
        let (gym, store) = backend.client(Some(logged_in()));
        let redirects = count_redirects(&gym);

        let update = request::student::Update::new("Ana", "11987654321", 10, PlanId::new("2"));
        let result = backend.run(gym.update_student(&StudentId::new("5"), &update));
        assert!(result.is_ok());

        let refreshes = backend.requests_to("POST", "/refresh-token");
        assert_eq!(refreshes.len(), 1);
        assert_eq!(refreshes[0].json(), json!({ "refreshToken": "refresh-1" }));
        assert_eq!(refreshes[0].authorization, None);

        let patches = backend.requests_to("PATCH", "/client/5");
        assert_eq!(patches.len(), 2);
        assert_eq!(patches[0].authorization, bearer(&EXPIRED_ACCESS));
        assert_eq!(patches[1].authorization, bearer(&FRESH_ACCESS));
        assert_eq!(patches[0].body, patches[1].body);
        assert_eq!(
            patches[1].json(),
            json!({ "name": "Ana", "phone": "11987654321", "dueDay": 10, "planId": "2" })
        );

        let session = store.get().unwrap().unwrap();
        assert_eq!(session.access_token(), &*FRESH_ACCESS);
        assert_eq!(session.refresh_token(), &RefreshToken::new("refresh-2"));
        assert_eq!(session.company_id(), Some(&CompanyId::new("3")));
        assert_eq!(session.user_id(), Some(&UserId::new("7")));
        assert_eq!(redirects.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn retried_get_returns_the_retried_body() {
        let mut backend = Backend::start(|r, _| match r.path.as_str() {
            "/refresh-token" => refreshed_tokens(),
            "/dashboard" if r.authorization == bearer(&FRESH_ACCESS) => reply(
                200,
                json!({ "totalClients": 12, "clientsPaidThisMonth": 9, "clientsNotPaidThisMonth": 3 }),
            ),
            _ => reply(403, json!({})),
        });
        let (gym, _) = backend.client(Some(logged_in()));

        let summary = backend.run(gym.dashboard()).unwrap();
        assert_eq!(summary.total_clients(), 12);
        assert_eq!(summary.clients_not_paid_this_month(), 3);
        assert_eq!(backend.requests().len(), 3);
    }

    #[test]
    fn put_returns_the_retried_body() {
        let replaced = json!({ "id": 2, "name": "Premium", "price": 130.0, "tags": ["a", null] });
        let expected = replaced.clone();
        let mut backend = Backend::start(move |r, seen| match (r.method.as_str(), r.path.as_str()) {
            ("PUT", "/plan/2") if seen == 0 => reply(403, json!({})),
            ("PUT", "/plan/2") => reply(200, replaced.clone()),
            ("POST", "/refresh-token") => refreshed_tokens(),
            _ => reply(404, json!({})),
        });
        let (gym, store) = backend.client(Some(logged_in()));
        let redirects = count_redirects(&gym);

        let payload = request::plan::Plan::new("Premium", 130.0);
        let body: serde_json::Value = backend
            .run(gym.put("/plan/2", params!(), Some(&payload)))
            .unwrap();
        assert_eq!(body, expected);

        let puts = backend.requests_to("PUT", "/plan/2");
        assert_eq!(puts.len(), 2);
        assert_eq!(puts[0].authorization, bearer(&EXPIRED_ACCESS));
        assert_eq!(puts[1].authorization, bearer(&FRESH_ACCESS));
        assert_eq!(puts[0].body, puts[1].body);
        assert_eq!(puts[1].json(), json!({ "name": "Premium", "price": 130.0 }));

        assert_eq!(backend.requests_to("POST", "/refresh-token").len(), 1);
        assert_eq!(
            store.get().unwrap().map(|s| s.access_token().clone()),
            Some(FRESH_ACCESS.clone())
        );
        assert_eq!(redirects.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn forbidden_retry_ends_the_session() {
        let mut backend = Backend::start(|r, _| match r.path.as_str() {
            "/refresh-token" => refreshed_tokens(),
            _ => reply(403, json!({ "message": "forbidden" })),
        });
        let (gym, store) = backend.client(Some(logged_in()));
        let redirects = count_redirects(&gym);

        let err = backend
            .run(gym.set_student_active(&StudentId::new("5"), false))
            .unwrap_err();
        assert!(err.is_login_required());
        assert_eq!(store.get().unwrap(), None);
        assert_eq!(redirects.load(Ordering::SeqCst), 1);

        // The original call, one refresh, one retry and nothing more:
        let requests = backend.requests();
        assert_eq!(requests.len(), 3);
        assert_eq!(backend.requests_to("PATCH", "/client/5").len(), 2);
        assert_eq!(backend.requests_to("POST", "/refresh-token").len(), 1);
    }

    #[test]
    fn rejected_refresh_redirects_without_replacing_tokens() {
        let mut backend = Backend::start(|r, _| match r.path.as_str() {
            "/refresh-token" => reply(401, json!({ "message": "refresh token expired" })),
            _ => reply(403, json!({})),
        });
        let (gym, store) = backend.client(Some(logged_in()));
        let redirects = count_redirects(&gym);

        let err = backend.run(gym.get_company()).unwrap_err();
        assert!(err.is_login_required());
        assert_eq!(redirects.load(Ordering::SeqCst), 1);
        assert_eq!(store.get().unwrap(), None);
        assert_eq!(backend.requests_to("GET", "/company").len(), 1);
        assert_eq!(backend.requests_to("POST", "/refresh-token").len(), 1);
    }

    #[test]
    fn forbidden_without_a_session_redirects_without_refreshing() {
        let mut backend = Backend::start(|_, _| reply(403, json!({})));
        let (gym, _) = backend.client(None);
        let redirects = count_redirects(&gym);

        let err = backend.run(gym.whatsapp_status()).unwrap_err();
        assert!(err.is_login_required());
        assert_eq!(redirects.load(Ordering::SeqCst), 1);

        let requests = backend.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].authorization, None);
    }

    #[test]
    fn failed_retry_propagates_its_error() {
        let mut backend = Backend::start(|r, seen| match (r.method.as_str(), r.path.as_str()) {
            ("POST", "/refresh-token") => refreshed_tokens(),
            ("DELETE", _) if seen == 0 => reply(403, json!({})),
            _ => reply(500, json!({ "errors": ["plan has students"] })),
        });
        let (gym, store) = backend.client(Some(logged_in()));
        let redirects = count_redirects(&gym);

        let err = backend.run(gym.delete_plan(&PlanId::new("3"))).unwrap_err();
        assert!(is_api_error(&err, 500));
        assert_eq!(
            err.api_payload().unwrap().value(),
            &json!(["plan has students"])
        );
        assert_eq!(backend.requests_to("DELETE", "/plan?id=3").len(), 2);
        assert_eq!(redirects.load(Ordering::SeqCst), 0);
        assert_eq!(
            store.get().unwrap().map(|s| s.access_token().clone()),
            Some(FRESH_ACCESS.clone())
        );
    }

    #[test]
    fn rejected_requests_surface_the_errors_field() {
        let mut backend = Backend::start(|r, _| match r.path.as_str() {
            "/client" => reply(
                422,
                json!({
                    "message": "validation failed",
                    "errors": [{ "msg": "Nome é obrigatório", "param": "name" }]
                }),
            ),
            _ => reply(404, json!({ "message": "plan not found" })),
        });
        let (gym, _) = backend.client(Some(logged_in()));

        let create = request::student::Create::new("", "11987654321", 10, PlanId::new("2"));
        let err = backend.run(gym.create_student(create)).unwrap_err();
        assert!(is_api_error(&err, 422));
        assert_eq!(
            err.api_payload().unwrap().messages(),
            vec!["Nome é obrigatório".to_string()]
        );

        let err = backend.run(gym.get_plan(&PlanId::new("9"))).unwrap_err();
        assert!(is_api_error(&err, 404));
        assert_eq!(
            err.api_payload().unwrap().value(),
            &json!({ "message": "plan not found" })
        );

        assert!(backend.requests_to("POST", "/refresh-token").is_empty());
    }

    #[test]
    fn non_json_error_bodies_are_parse_errors() {
        let mut backend = Backend::start(|_, _| raw_reply(502, "<html>Bad Gateway</html>"));
        let (gym, _) = backend.client(Some(logged_in()));

        let err = backend.run(gym.dashboard()).unwrap_err();
        assert!(err.api_payload().is_none());
        assert!(!err.is_login_required());
    }

    #[test]
    fn blank_error_bodies_carry_a_null_payload() {
        let mut backend = Backend::start(|_, _| raw_reply(400, "  \n"));
        let (gym, _) = backend.client(Some(logged_in()));

        let err = backend.run(gym.get_student(&StudentId::new("5"))).unwrap_err();
        assert!(is_api_error(&err, 400));
        assert_eq!(err.api_payload().unwrap().value(), &serde_json::Value::Null);
    }

    #[test]
    fn patch_and_delete_ignore_the_response_body() {
        let mut backend = Backend::start(|r, _| match r.method.as_str() {
            "PATCH" => raw_reply(200, "OK"),
            _ => raw_reply(204, ""),
        });
        let (gym, _) = backend.client(Some(logged_in()));

        let settings = request::NotificationSettings::new()
            .overdue_to_company(true, "daily")
            .overdue_for_last_month(false, "first-day");
        assert!(backend.run(gym.update_notification_settings(&settings)).is_ok());
        assert!(backend.run(gym.delete_company(&CompanyId::new("4"))).is_ok());

        let patch = &backend.requests_to("PATCH", "/notification")[0];
        assert_eq!(
            patch.json(),
            json!({
                "overdueForLastMonthToCompany": false,
                "overdueForLastMonthFrequency": "first-day",
                "overdueNotificationToCompany": true,
                "overdueNotificationFrequency": "daily"
            })
        );
        assert_eq!(backend.requests_to("DELETE", "/company?id=4").len(), 1);
    }

    #[test]
    fn login_stores_the_session_used_by_later_calls() {
        let mut backend = Backend::start(|r, _| match r.path.as_str() {
            "/login" => reply(
                200,
                json!({ "token": "access-1", "refreshToken": "refresh-1", "userId": 7, "companyId": 3 }),
            ),
            _ => reply(201, json!({ "id": 11 })),
        });
        let (gym, store) = backend.client(None);
        assert!(!gym.has_session());

        let login = backend
            .run(gym.login("owner@gym.com", "secret"))
            .unwrap();
        assert_eq!(login.company_id(), Some(&CompanyId::new("3")));
        assert_eq!(store.get().unwrap(), Some(logged_in()));
        assert_eq!(gym.current_company().unwrap(), Some(CompanyId::new("3")));
        assert_eq!(gym.current_user().unwrap(), Some(UserId::new("7")));

        let created = backend
            .run(gym.create_student(request::student::Create::new(
                "Ana",
                "11987654321",
                10,
                PlanId::new("2"),
            )))
            .unwrap();
        assert_eq!(created, json!({ "id": 11 }));

        let login_request = &backend.requests_to("POST", "/login")[0];
        assert_eq!(login_request.authorization, None);
        assert_eq!(
            login_request.json(),
            json!({ "email": "owner@gym.com", "password": "secret" })
        );

        let create_request = &backend.requests_to("POST", "/client")[0];
        assert_eq!(create_request.authorization, bearer(&EXPIRED_ACCESS));
        assert_eq!(create_request.json()["companyId"], json!("3"));

        gym.logout().unwrap();
        assert!(!gym.has_session());
    }

    #[test]
    fn rejected_login_does_not_refresh() {
        let mut backend = Backend::start(|_, _| {
            reply(403, json!({ "errors": [{ "msg": "Credenciais inválidas" }] }))
        });
        let (gym, store) = backend.client(None);
        let redirects = count_redirects(&gym);

        let err = backend.run(gym.login("owner@gym.com", "wrong")).unwrap_err();
        assert!(is_api_error(&err, 403));
        assert_eq!(store.get().unwrap(), None);
        assert_eq!(redirects.load(Ordering::SeqCst), 0);
        assert_eq!(backend.requests().len(), 1);
    }

    #[test]
    fn creating_a_student_needs_a_company() {
        let mut backend = Backend::start(|_, _| reply(201, json!({})));
        let (gym, _) = backend.client(Some(Session::new(
            EXPIRED_ACCESS.clone(),
            RefreshToken::new("refresh-1"),
        )));

        let create = request::student::Create::new("Ana", "11987654321", 10, PlanId::new("2"));
        match backend.run(gym.create_student(create)) {
            Err(gym::Error(ErrorKind::NoCompanySetError, _)) => {}
            other => panic!("unexpected result: {:?}", other),
        }
        assert!(backend.requests().is_empty());
    }

    #[test]
    fn concurrent_forbidden_calls_share_one_refresh() {
        let mut backend = Backend::start(|r, _| match r.path.as_str() {
            "/refresh-token" => Reply {
                delay: Duration::from_millis(300),
                ..refreshed_tokens()
            },
            _ if r.authorization == bearer(&FRESH_ACCESS) => reply(200, json!({ "totalClients": 1 })),
            _ => reply(403, json!({})),
        });
        let (gym, _) = backend.client(Some(logged_in()));

        let both = gym.dashboard().join(gym.dashboard());
        let (first, second) = backend.run(into_future_trait(both)).unwrap();
        assert_eq!(first.total_clients(), 1);
        assert_eq!(second.total_clients(), 1);

        assert_eq!(backend.requests_to("POST", "/refresh-token").len(), 1);
        let dashboards = backend.requests_to("GET", "/dashboard");
        assert_eq!(dashboards.len(), 4);
        assert_eq!(
            dashboards
                .iter()
                .filter(|r| r.authorization == bearer(&FRESH_ACCESS))
                .count(),
            2
        );
    }

    #[test]
    fn resuming_checks_the_stored_token() {
        let mut backend = Backend::start(|r, _| {
            if r.path == "/check-token?token=access-1" {
                reply(200, json!({ "valid": true }))
            } else {
                reply(401, json!({ "message": "invalid token" }))
            }
        });

        let (gym, _) = backend.client(None);
        assert_eq!(backend.run(gym.resume_session()).unwrap(), false);
        assert!(backend.requests().is_empty());

        let (gym, store) = backend.client(Some(logged_in()));
        assert_eq!(backend.run(gym.resume_session()).unwrap(), true);
        assert!(store.get().unwrap().is_some());

        let stale = Session::new(AccessToken::new("stale"), RefreshToken::new("refresh-1"));
        let (gym, store) = backend.client(Some(stale));
        assert_eq!(backend.run(gym.resume_session()).unwrap(), false);
        assert_eq!(store.get().unwrap(), None);
    }

    #[test]
    fn endpoint_routes_and_payloads() {
        let mut backend = Backend::start(|r, _| match (r.method.as_str(), r.path.as_str()) {
            ("GET", "/plan?page=2&limit=10&name=pre") => reply(
                200,
                json!([{ "id": 2, "name": "Premium", "price": 120.5 }]),
            ),
            ("GET", "/client/payment?month=3&year=2024&paid=false") => reply(
                200,
                json!([{ "id": 5, "name": "Ana", "dueDay": 10, "payments": [] }]),
            ),
            ("GET", "/whatsapp/qrcode") => reply(200, json!({ "qrCodeImage": "data:image/png;base64,AAA" })),
            ("POST", "/whatsapp/disconnect") => reply(200, json!({ "connectionStatus": "DISCONNECTED" })),
            ("GET", "/company/all") => reply(
                200,
                json!([{ "id": 3, "fantasyName": "Academia Forte", "cnpj": "12345678000199" }]),
            ),
            _ => reply(200, json!({})),
        });
        let (gym, _) = backend.client(Some(logged_in()));

        let plans = backend
            .run(gym.list_plans(&request::plan::Filter::new().page(2, 10).name("pre")))
            .unwrap();
        assert_eq!(plans[0].price(), 120.5);

        let payments = backend
            .run(gym.list_payments(&request::payment::Filter::new(3, 2024).paid(false)))
            .unwrap();
        assert!(!payments[0].is_paid());

        let qr = backend.run(gym.whatsapp_qr_code()).unwrap();
        assert_eq!(qr.image(), "data:image/png;base64,AAA");

        let status = backend.run(gym.disconnect_whatsapp()).unwrap();
        assert_eq!(status.status(), "DISCONNECTED");
        assert_eq!(backend.requests_to("POST", "/whatsapp/disconnect")[0].body, "");

        let companies = backend.run(gym.list_companies()).unwrap();
        assert_eq!(
            companies[0].fantasy_name().map(|s| s.as_str()),
            Some("Academia Forte")
        );

        backend
            .run(gym.update_plan(&PlanId::new("2"), &request::plan::Plan::new("Premium", 130.0)))
            .unwrap();
        let update = &backend.requests_to("PATCH", "/plan?planId=2")[0];
        assert_eq!(update.json(), json!({ "name": "Premium", "price": 130.0 }));

        backend
            .run(gym.change_password(&request::ChangePassword::new("old", "new")))
            .unwrap();
        assert_eq!(
            backend.requests_to("PATCH", "/user/change-password")[0].json(),
            json!({ "currentPassword": "old", "newPassword": "new" })
        );

        let company = request::company::Create::new(
            "Academia Forte",
            request::company::CompanyUser::new("Carla", "carla@forte.com", "secret"),
            "12345678000199",
            "11987654321",
        );
        backend.run(gym.create_company(&company)).unwrap();
        assert_eq!(
            backend.requests_to("POST", "/company")[0].json(),
            json!({
                "fantasyName": "Academia Forte",
                "user": { "name": "Carla", "email": "carla@forte.com", "password": "secret" },
                "cnpj": "12345678000199",
                "phone": "11987654321"
            })
        );
    }
}
