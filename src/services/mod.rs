// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod google;
pub mod records;
pub mod users;

pub use google::{GoogleEndpoints, GoogleOAuthClient, ProviderProfile};
pub use records::RecordStore;
pub use users::UserDirectory;
