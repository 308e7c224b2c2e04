// Copyright (c) 2018 Blackfynn, Inc. All Rights Reserved.

extern crate chrono;
#[macro_use]
extern crate error_chain;
extern crate futures;
extern crate hyper;
extern crate hyper_tls;
#[cfg(test)]
#[macro_use]
extern crate lazy_static;
#[macro_use]
extern crate log;
extern crate serde;
#[macro_use]
extern crate serde_derive;
#[cfg_attr(test, macro_use)]
extern crate serde_json;
#[cfg(test)]
extern crate tempfile;
#[cfg(test)]
extern crate tokio;
extern crate url;

mod gym;

// Publicly re-export:
pub use gym::{api, error, model, session};
pub use gym::api::{Gym, LoginRedirect, NoRedirect};
pub use gym::config::{Config, Environment};
pub use gym::types::{Future, Result};
