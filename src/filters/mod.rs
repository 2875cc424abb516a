pub mod apply;

pub use apply::{filter_conversations, filter_empty_messages};
