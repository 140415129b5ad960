use alloy::primitives::Address;
use alloy::providers::{DynProvider, Provider, ProviderBuilder};
use alloy::sol;
use alloy::transports::http::reqwest::Url;

use crate::chain::{EventWriter, WriteError};
use crate::models::CreateEventArgs;
use crate::utils::error::AppError;

sol! {
    #[allow(missing_docs)]
    #[sol(rpc)]
    contract EventRegistry {
        function createEvent(
            string name,
            string description,
            string imageCID,
            uint256 startTime,
            uint256 endTime,
            string venueName,
            string streetAddress,
            string city,
            string state,
            string postalCode,
            string country,
            bool isOnline,
            uint256 ticketPrice,
            uint256 maxAttendees,
            bool isPrivate
        ) external;
    }
}

/// `EventWriter` backed by a JSON-RPC node. Transactions are sent from the
/// connected address, so the node (or the wallet behind it) signs them.
#[derive(Clone)]
pub struct ContractWriter {
    contract: EventRegistry::EventRegistryInstance<DynProvider>,
}

impl ContractWriter {
    pub fn connect(rpc_url: &str, contract_address: &str) -> Result<Self, AppError> {
        let url: Url = rpc_url
            .parse()
            .map_err(|e| AppError::ValidationError(format!("invalid RPC_URL '{rpc_url}': {e}")))?;
        let address: Address = contract_address.parse().map_err(|_| {
            AppError::ValidationError(format!("invalid CONTRACT_ADDRESS '{contract_address}'"))
        })?;

        let provider = ProviderBuilder::new().connect_http(url).erased();
        tracing::info!(%address, rpc_url, "event registry writer ready");

        Ok(Self {
            contract: EventRegistry::new(address, provider),
        })
    }
}

impl EventWriter for ContractWriter {
    async fn create_event(
        &self,
        sender: Address,
        args: CreateEventArgs,
    ) -> Result<String, WriteError> {
        let pending = self
            .contract
            .createEvent(
                args.name,
                args.description,
                args.image_cid,
                args.start_time,
                args.end_time,
                args.venue_name,
                args.street_address,
                args.city,
                args.state,
                args.postal_code,
                args.country,
                args.is_online,
                args.ticket_price,
                args.max_attendees,
                args.is_private,
            )
            .from(sender)
            .send()
            .await
            .map_err(|e| WriteError::new(e.to_string()))?;

        tracing::debug!(tx_hash = %pending.tx_hash(), "createEvent sent, waiting for inclusion");

        let tx_hash = pending
            .watch()
            .await
            .map_err(|e| WriteError::new(e.to_string()))?;
        Ok(tx_hash.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_bad_contract_address() {
        let err = ContractWriter::connect("http://127.0.0.1:8545", "not-an-address")
            .err()
            .unwrap();
        assert!(matches!(err, AppError::ValidationError(_)));
    }

    #[test]
    fn test_rejects_bad_rpc_url() {
        let err = ContractWriter::connect("::nope::", "0x5FbDB2315678afecb367f032d93F642f64180aa3")
            .err()
            .unwrap();
        assert!(matches!(err, AppError::ValidationError(_)));
    }
}
