pub mod auth;
pub mod create;
pub mod delete;
pub mod list;
pub mod roadmap;
pub mod show;
pub mod status;
pub mod update;
pub mod watch;
