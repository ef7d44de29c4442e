// src/models/mod.rs

pub mod part;
pub mod submission;
pub mod test_key;
