use std::future::Future;

use alloy::primitives::Address;
use thiserror::Error;

use crate::models::CreateEventArgs;

pub mod contract;

pub use contract::ContractWriter;

/// Failure of the outbound write. Every cause (RPC, revert, user rejection)
/// collapses into one message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct WriteError {
    pub message: String,
}

impl WriteError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Sends `createEvent` on behalf of `sender` and resolves with the
/// transaction hash once it is mined.
pub trait EventWriter: Send + Sync + 'static {
    fn create_event(
        &self,
        sender: Address,
        args: CreateEventArgs,
    ) -> impl Future<Output = Result<String, WriteError>> + Send;
}
