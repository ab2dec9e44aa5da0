//! Train ticket availability query engine.
//!
//! Answers: "which trains between these two stations on this date still
//! have a seat I want, leaving at a sensible hour?"

pub mod cache;
pub mod domain;
pub mod query;
pub mod stations;
pub mod upstream;
pub mod web;

#[cfg(test)]
pub(crate) mod testing;
