pub mod send_event;

pub use send_event::{BaseEvent, CapturingSender, LogSender, NullSender, TelemetrySender};
