pub mod decide;
pub mod init;
pub mod list;
pub mod render;
pub mod watch;
