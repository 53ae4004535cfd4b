//! Transaction construction and verification pipeline.
//!
//! [`TransactionSender`] drives a send end to end; [`verify`] is the integrity
//! check it runs on every provider-built transaction before signing.

pub mod error;
pub mod sender;
pub mod verifier;

pub use error::{IntegrityError, SendError};
pub use sender::TransactionSender;
pub use verifier::{transaction_id, verify, VerifiedTransaction};
