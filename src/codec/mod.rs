pub mod jpeg;
pub mod search;
