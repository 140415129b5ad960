use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::DEFAULT_MEDIA_REF;

/// Event data accumulated across the wizard steps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventDraft {
    pub name: String,
    pub description: String,
    pub media_ref: String,
    /// Unix seconds.
    pub start_time: i64,
    /// Unix seconds.
    pub end_time: i64,
    pub venue_name: String,
    pub street_address: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub country: String,
    /// When set the physical address fields are ignored but kept.
    pub is_online: bool,
    /// Decimal amount in the native currency, e.g. "0.05".
    pub ticket_price: String,
    pub max_attendees: u64,
    pub is_private: bool,
}

impl Default for EventDraft {
    fn default() -> Self {
        Self::new(DEFAULT_MEDIA_REF)
    }
}

impl EventDraft {
    pub fn new(media_ref: impl Into<String>) -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            media_ref: media_ref.into(),
            start_time: 0,
            end_time: 0,
            venue_name: String::new(),
            street_address: String::new(),
            city: String::new(),
            state: String::new(),
            postal_code: String::new(),
            country: String::new(),
            is_online: false,
            ticket_price: String::new(),
            max_attendees: 0,
            is_private: false,
        }
    }

    pub fn starts_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.start_time, 0)
    }

    pub fn ends_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.end_time, 0)
    }

    /// Suspicious values worth showing to the organizer. None of these block
    /// submission; the contract decides what it accepts.
    pub fn issues(&self) -> Vec<DraftIssue> {
        let mut issues = Vec::new();
        if self.name.trim().is_empty() {
            issues.push(DraftIssue::MissingName);
        }
        if self.end_time < self.start_time {
            issues.push(DraftIssue::EndsBeforeStart);
        }
        if !self.is_online
            && [&self.venue_name, &self.street_address, &self.city, &self.country]
                .iter()
                .any(|field| field.trim().is_empty())
        {
            issues.push(DraftIssue::IncompleteAddress);
        }
        if self.max_attendees == 0 {
            issues.push(DraftIssue::NoCapacity);
        }
        issues
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DraftIssue {
    MissingName,
    EndsBeforeStart,
    IncompleteAddress,
    NoCapacity,
}

impl fmt::Display for DraftIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            DraftIssue::MissingName => "event has no name",
            DraftIssue::EndsBeforeStart => "end time is before start time",
            DraftIssue::IncompleteAddress => "in-person event is missing address fields",
            DraftIssue::NoCapacity => "maximum attendees is zero",
        };
        f.write_str(text)
    }
}
