//! Application services

pub mod notification;

pub use notification::{Notice, NoticeKind, Notifier};
