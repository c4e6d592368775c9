pub mod analyze;
pub mod columns;
pub mod config;
pub mod init;
pub mod session;
