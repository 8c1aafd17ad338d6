//! CLI subcommands, one module per build flow, plus the shared image
//! pipeline. Each command is a linear sequence of resolve-then-run steps;
//! the first external-process failure aborts the invocation.

pub mod autosdk;
pub mod engine;
pub mod images;
pub mod project;
pub mod ubt;
