pub mod classify;
pub mod sanitize;

pub use classify::classify_hint;
