use serde::{Deserialize, Serialize};

use crate::models::EventDraft;

/// Wizard pages, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    BasicInfo,
    DateTime,
    Location,
    Tickets,
}

impl Step {
    pub const ALL: [Step; 4] = [Step::BasicInfo, Step::DateTime, Step::Location, Step::Tickets];

    /// Step number (1-based)
    pub fn number(self) -> u8 {
        match self {
            Step::BasicInfo => 1,
            Step::DateTime => 2,
            Step::Location => 3,
            Step::Tickets => 4,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Step::BasicInfo => "Basic Info",
            Step::DateTime => "Date & Time",
            Step::Location => "Location",
            Step::Tickets => "Tickets",
        }
    }

    pub fn next(self) -> Option<Step> {
        match self {
            Step::BasicInfo => Some(Step::DateTime),
            Step::DateTime => Some(Step::Location),
            Step::Location => Some(Step::Tickets),
            Step::Tickets => None,
        }
    }

    pub fn prev(self) -> Option<Step> {
        match self {
            Step::BasicInfo => None,
            Step::DateTime => Some(Step::BasicInfo),
            Step::Location => Some(Step::DateTime),
            Step::Tickets => Some(Step::Location),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BasicInfoUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub media_ref: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DateTimeUpdate {
    pub start_time: Option<i64>,
    pub end_time: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocationUpdate {
    pub venue_name: Option<String>,
    pub street_address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub postal_code: Option<String>,
    pub country: Option<String>,
    pub is_online: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TicketsUpdate {
    pub ticket_price: Option<String>,
    pub max_attendees: Option<u64>,
    pub is_private: Option<bool>,
}

/// Partial draft edit. Each variant only carries the fields its page owns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum StepUpdate {
    BasicInfo(BasicInfoUpdate),
    DateTime(DateTimeUpdate),
    Location(LocationUpdate),
    Tickets(TicketsUpdate),
}

fn set<T>(slot: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *slot = value;
    }
}

impl StepUpdate {
    pub fn step(&self) -> Step {
        match self {
            StepUpdate::BasicInfo(_) => Step::BasicInfo,
            StepUpdate::DateTime(_) => Step::DateTime,
            StepUpdate::Location(_) => Step::Location,
            StepUpdate::Tickets(_) => Step::Tickets,
        }
    }

    /// Overwrites the fields present in the update and leaves the rest alone.
    pub fn apply(self, draft: &mut EventDraft) {
        match self {
            StepUpdate::BasicInfo(u) => {
                set(&mut draft.name, u.name);
                set(&mut draft.description, u.description);
                set(&mut draft.media_ref, u.media_ref);
            }
            StepUpdate::DateTime(u) => {
                set(&mut draft.start_time, u.start_time);
                set(&mut draft.end_time, u.end_time);
            }
            StepUpdate::Location(u) => {
                set(&mut draft.venue_name, u.venue_name);
                set(&mut draft.street_address, u.street_address);
                set(&mut draft.city, u.city);
                set(&mut draft.state, u.state);
                set(&mut draft.postal_code, u.postal_code);
                set(&mut draft.country, u.country);
                set(&mut draft.is_online, u.is_online);
            }
            StepUpdate::Tickets(u) => {
                set(&mut draft.ticket_price, u.ticket_price);
                set(&mut draft.max_attendees, u.max_attendees);
                set(&mut draft.is_private, u.is_private);
            }
        }
    }
}
