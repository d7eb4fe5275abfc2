pub mod clock;
pub mod command;
pub mod config;
pub mod host;
pub mod widget;
