//! CLI subcommands

pub mod clean;
pub mod export;
pub mod init;
pub mod list;
pub mod new;
pub mod show;
pub mod slides;
pub mod status;
