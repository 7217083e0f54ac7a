pub mod accessors;
pub mod error;
pub mod merkle;
pub mod misc;
pub mod predicates;
pub mod signing;
