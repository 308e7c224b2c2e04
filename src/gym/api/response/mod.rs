// Copyright (c) 2018 Blackfynn, Inc. All Rights Reserved.

//! This module contains types that serve as representations
//! of server responses from the gym backend.

pub mod login;
pub mod refresh;
pub mod student;

// Re-export
pub use self::login::Login;
pub use self::refresh::Refresh;
pub use self::student::Students;
