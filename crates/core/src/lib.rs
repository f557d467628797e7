//! Domain types and rules for the lost-and-found backend.
//!
//! Nothing in this crate talks to the database. Item rules (found-report
//! validation, location mirroring, claim comparison) live in [`item`]; the
//! upload store abstraction lives in [`storage`].

pub mod error;
pub mod item;
pub mod storage;
pub mod types;
