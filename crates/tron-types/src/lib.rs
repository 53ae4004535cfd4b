//! Common types shared by the Tron transaction sender crates.
//!
//! This crate holds the account primitives (addresses, signatures, transaction ids),
//! the typed contract model with its canonical protobuf encoding, the wire messages
//! of the node's transaction format, contract method ABI helpers, and the
//! configuration schema machinery used by pluggable implementations.

pub mod abi;
pub mod account;
pub mod contract;
pub mod protocol;
pub mod transaction;
pub mod validation;

pub use abi::*;
pub use account::*;
pub use contract::*;
pub use transaction::*;
pub use validation::*;
