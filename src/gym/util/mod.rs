// Copyright (c) 2018 Blackfynn, Inc. All Rights Reserved.

//! Assorted utility code.

pub mod futures;
