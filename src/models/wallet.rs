use alloy::primitives::Address;
use serde::Serialize;

use crate::utils::error::AppError;

/// Wallet connection as reported by the client. Absent when no wallet is
/// connected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Connection(Option<Address>);

impl Connection {
    pub fn connected(address: Address) -> Self {
        Self(Some(address))
    }

    pub fn disconnected() -> Self {
        Self(None)
    }

    /// Parses the optional address sent by the client. Blank counts as
    /// disconnected.
    pub fn from_param(raw: Option<&str>) -> Result<Self, AppError> {
        match raw.map(str::trim).filter(|s| !s.is_empty()) {
            None => Ok(Self::disconnected()),
            Some(s) => s
                .parse::<Address>()
                .map(Self::connected)
                .map_err(|_| AppError::ValidationError(format!("invalid wallet address '{s}'"))),
        }
    }

    pub fn address(&self) -> Option<Address> {
        self.0
    }

    pub fn is_connected(&self) -> bool {
        self.0.is_some()
    }
}

/// Connected account as shown on the landing page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConnectedAs {
    pub address: String,
    pub short: String,
}

impl From<Address> for ConnectedAs {
    fn from(address: Address) -> Self {
        let full = address.to_checksum(None);
        let short = format!("{}...{}", &full[..6], &full[full.len() - 4..]);
        Self {
            address: full,
            short,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ADDR: &str = "0x5FbDB2315678afecb367f032d93F642f64180aa3";

    #[test]
    fn test_blank_param_is_disconnected() {
        assert!(!Connection::from_param(None).unwrap().is_connected());
        assert!(!Connection::from_param(Some("  ")).unwrap().is_connected());
    }

    #[test]
    fn test_parses_address() {
        let conn = Connection::from_param(Some(ADDR)).unwrap();
        assert_eq!(conn.address().unwrap().to_checksum(None), ADDR);
    }

    #[test]
    fn test_rejects_garbage() {
        let err = Connection::from_param(Some("0xnope")).unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
    }

    #[test]
    fn test_short_form() {
        let shown = ConnectedAs::from(ADDR.parse::<Address>().unwrap());
        assert_eq!(shown.address, ADDR);
        assert_eq!(shown.short, "0x5FbD...0aa3");
    }
}
