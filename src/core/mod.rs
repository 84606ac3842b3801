// src/core/mod.rs
//! Shared building blocks for the pipeline stages

pub mod fs_ops;
pub mod table;

pub use fs_ops::FsOps;
pub use table::Table;
