// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - identity provider access and sessions.

pub mod directory;
pub mod management;
pub mod session;

pub use directory::DirectoryClient;
pub use management::ManagementClient;
pub use session::{issue_session_token, Identity, JwtSessionProvider, SessionProvider};
