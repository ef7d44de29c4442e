// src/grading/mod.rs
//
// Pure grading core: no database access and no transport concerns.

pub mod aggregate;
pub mod grader;
pub mod normalize;
