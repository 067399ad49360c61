//! Data models for AdminHub

mod client;
mod dashboard;
mod report;

pub use client::*;
pub use dashboard::*;
pub use report::*;
