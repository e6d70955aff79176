pub mod config;
pub mod detect;
pub mod dom;
pub mod extract;
pub mod feedgen;
pub mod fetch;
pub mod session;
pub mod store;
pub mod synth;

pub use pagepick_common::formatter;
pub use pagepick_common::protocol;
