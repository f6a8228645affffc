//! The three parsing stages and the boundaries around them.
//!
//! Data flows detection -> regions -> extractor -> storage -> calendar.

pub mod calendar;
pub mod detection;
pub mod extractor;
pub mod regions;
pub mod storage;
