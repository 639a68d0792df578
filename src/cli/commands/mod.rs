mod context;
pub mod init;
pub mod list;
pub mod sync;
