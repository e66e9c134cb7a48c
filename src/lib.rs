//! shelf - A single-user book inventory
//!
//! Books live in an in-memory [`catalog::Catalog`] and are persisted as a
//! flat file of fixed-size records by [`storage::BookFile`]. The [`cli`]
//! module is the operator boundary: an interactive menu plus JSON `list`
//! and `search` commands.

pub mod catalog;
pub mod cli;
pub mod observability;
pub mod storage;
