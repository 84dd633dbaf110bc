//! Faucet detection API: accepts image uploads over HTTP and forwards them
//! to a hosted Roboflow workflow, returning the workflow's JSON untouched.

pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod presentation;
