//! # usersignup
//!
//! A small form-based signup and login service.
//!
//! - `GET/POST /signup` validates a user record and stores it, redirecting to
//!   `/login` on success.
//! - `GET/POST /login` validates a login attempt and checks it against the
//!   stored record, rendering a success or failure page.
//!
//! ## Passwords
//!
//! Passwords are stored ROT13-encoded, which is a reversible letter
//! substitution and not a hash. Login compares the typed password with the
//! stored value directly, so a user signed up with `secret` logs in with
//! `frperg`.
//!
//! ## Storage
//!
//! With `--dsn` the service uses `PostgreSQL` (the `users` table is created on
//! startup); without it, users live in memory for the lifetime of the process.

pub mod cli;
pub mod model;
pub mod signup;
pub mod store;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};
