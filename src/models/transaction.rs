use alloy::primitives::U256;
use thiserror::Error;

use crate::models::event::EventDraft;
use crate::models::ticket::{parse_ticket_price, PriceError};

/// Positional arguments of `createEvent`, in call order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateEventArgs {
    pub name: String,
    pub description: String,
    pub image_cid: String,
    pub start_time: U256,
    pub end_time: U256,
    pub venue_name: String,
    pub street_address: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub country: String,
    pub is_online: bool,
    pub ticket_price: U256,
    pub max_attendees: U256,
    pub is_private: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArgsError {
    #[error("{field} must not be negative (got {value})")]
    NegativeTime { field: &'static str, value: i64 },
    #[error(transparent)]
    Price(#[from] PriceError),
}

fn timestamp(field: &'static str, value: i64) -> Result<U256, ArgsError> {
    u64::try_from(value)
        .map(U256::from)
        .map_err(|_| ArgsError::NegativeTime { field, value })
}

impl TryFrom<&EventDraft> for CreateEventArgs {
    type Error = ArgsError;

    fn try_from(draft: &EventDraft) -> Result<Self, Self::Error> {
        Ok(Self {
            name: draft.name.clone(),
            description: draft.description.clone(),
            image_cid: draft.media_ref.clone(),
            start_time: timestamp("start time", draft.start_time)?,
            end_time: timestamp("end time", draft.end_time)?,
            venue_name: draft.venue_name.clone(),
            street_address: draft.street_address.clone(),
            city: draft.city.clone(),
            state: draft.state.clone(),
            postal_code: draft.postal_code.clone(),
            country: draft.country.clone(),
            is_online: draft.is_online,
            ticket_price: parse_ticket_price(&draft.ticket_price)?,
            max_attendees: U256::from(draft.max_attendees),
            is_private: draft.is_private,
        })
    }
}
