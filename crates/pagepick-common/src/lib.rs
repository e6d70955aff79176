pub mod formatter;
pub mod protocol;
