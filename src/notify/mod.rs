//! Where sale notifications go once formatted.

pub mod sink;

pub use sink::{NotificationSink, WriterSink};
