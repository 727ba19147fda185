//! Library crate behind the `taskpro` CLI: backend API client, data
//! model, config/session persistence, and the due-date reminder poller.

pub mod api;
pub mod commands;
pub mod config;
pub mod models;
pub mod reminder;
pub mod session;
