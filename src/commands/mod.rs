//! CLI commands

pub mod contact;
pub mod init;
pub mod list;
pub mod new;
