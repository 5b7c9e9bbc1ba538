//! Channel keys and stream specs

pub mod channel;
pub mod spec;

pub use channel::Channel;
pub use spec::StreamSpec;
