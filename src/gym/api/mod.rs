// Copyright (c) 2018 Blackfynn, Inc. All Rights Reserved.

//! The gym backend API.

mod client;
pub mod request;
pub mod response;

// Re-export:
pub use self::client::attempt::{self, Attempt, Disposition};
pub use self::client::redirect::{LoginRedirect, NoRedirect};
pub use self::client::Gym;
