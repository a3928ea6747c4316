//! Admission scoring, averaging and course ranking

pub mod admission;
pub mod average;
pub mod catalog;
pub mod config;
pub mod dataset;
pub mod models;
pub mod ranking;
pub mod recommendation;
