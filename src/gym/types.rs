// Copyright (c) 2018 Blackfynn, Inc. All Rights Reserved.

//! Library-wide type definitions.

use futures;

use gym::error;

/// A Result type parameterized by `gym::error::Error`
pub type Result<T> = error::Result<T>;

/// A Future type parameterized by `gym::error::Error`
pub type Future<T> = Box<futures::Future<Item = T, Error = error::Error> + Send>;
