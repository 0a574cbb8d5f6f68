//! Shared foundational types for the Weft packing toolchain.
//!
//! This crate provides the types every other Weft crate builds on: interned
//! identifiers, the four-state logic value used in single-output covers, and
//! the common internal result type.

#![warn(missing_docs)]

pub mod ident;
pub mod logic;
pub mod result;

pub use ident::{Ident, Interner};
pub use logic::LogicValue;
pub use result::{InternalError, WeftResult};
