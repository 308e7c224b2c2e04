// Copyright (c) 2018 Blackfynn, Inc. All Rights Reserved.

//! Library configuration options and environment definitions.

use std::env;
use std::path::{Path, PathBuf};

use url::Url;

use gym;
use gym::error::ErrorKind;

/// The environment variable consulted by `Environment::Local`.
pub const API_LOCATION_VAR: &str = "GYM_API_LOC";

const DEFAULT_DNS_THREADS: usize = 4;

/// Defines the server environment the library is interacting with.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum Environment {
    /// The backend location is read from `GYM_API_LOC`.
    Local,
    /// An explicitly provided backend location.
    Custom(Url),
}

impl Environment {
    pub fn url(&self) -> gym::Result<Url> {
        use self::Environment::*;
        match *self {
            Local => {
                let api_loc = env::var(API_LOCATION_VAR)
                    .map_err(|_| ErrorKind::MissingEnvironmentVariable(API_LOCATION_VAR.into()))?;
                Ok(api_loc.parse::<Url>()?)
            }
            Custom(ref url) => Ok(url.clone()),
        }
    }
}

/// Configuration options for the gym client.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Config {
    env: Environment,
    session_file: Option<PathBuf>,
    dns_threads: usize,
}

impl Config {
    pub fn new(env: Environment) -> Self {
        Self {
            env,
            session_file: None,
            dns_threads: DEFAULT_DNS_THREADS,
        }
    }

    /// Configuration pointing at an explicit backend URL.
    pub fn from_url<S: AsRef<str>>(url: S) -> gym::Result<Self> {
        Ok(Self::new(Environment::Custom(url.as_ref().parse::<Url>()?)))
    }

    /// Persist the session as JSON at `path` instead of keeping it in memory.
    pub fn with_session_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.session_file = Some(path.as_ref().to_path_buf());
        self
    }

    /// Number of threads used for DNS resolution by the HTTP connector.
    pub fn with_dns_threads(mut self, threads: usize) -> Self {
        self.dns_threads = threads.max(1);
        self
    }

    pub fn env(&self) -> &Environment {
        &self.env
    }

    pub fn api_url(&self) -> gym::Result<Url> {
        self.env.url()
    }

    pub fn session_file(&self) -> Option<&Path> {
        self.session_file.as_ref().map(|p| p.as_path())
    }

    pub fn dns_threads(&self) -> usize {
        self.dns_threads
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn custom_environment_uses_given_url() {
        let config = Config::from_url("https://api.example.com/v1").unwrap();
        assert_eq!(
            config.api_url().unwrap().as_str(),
            "https://api.example.com/v1"
        );
        assert_eq!(config.session_file(), None);
        assert_eq!(config.dns_threads(), DEFAULT_DNS_THREADS);
    }

    #[test]
    fn invalid_url_is_rejected() {
        assert!(Config::from_url("not a url").is_err());
    }

    #[test]
    fn local_environment_reads_variable() {
        env::set_var(API_LOCATION_VAR, "http://localhost:3333");
        let url = Config::new(Environment::Local).api_url().unwrap();
        assert_eq!(url.as_str(), "http://localhost:3333/");

        env::remove_var(API_LOCATION_VAR);
        match Config::new(Environment::Local).api_url() {
            Err(gym::Error(ErrorKind::MissingEnvironmentVariable(name), _)) => {
                assert_eq!(name, API_LOCATION_VAR)
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn builder_options_are_kept() {
        let config = Config::from_url("http://localhost")
            .unwrap()
            .with_session_file("/tmp/gym-session.json")
            .with_dns_threads(0);
        assert_eq!(
            config.session_file(),
            Some(Path::new("/tmp/gym-session.json"))
        );
        assert_eq!(config.dns_threads(), 1);
    }
}
