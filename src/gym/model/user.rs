// Copyright (c) 2018 Blackfynn, Inc. All Rights Reserved.

id_type! {
    /// An identifier for a user (a company operator) of the backend.
    UserId
}
