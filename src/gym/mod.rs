// Copyright (c) 2018 Blackfynn, Inc. All Rights Reserved.

//! Library top-level definitions go in this module.

pub mod api;
pub mod config;
pub mod error;
pub mod model;
pub mod session;
pub mod types;
pub mod util;

// Re-export
pub use gym::api::Gym;
pub use gym::config::{Config, Environment};
pub use gym::error::{Error, ErrorKind};
pub use gym::types::{Future, Result};
