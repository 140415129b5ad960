use alloy::primitives::Address;
use serde::{Serialize, Serializer};

/// Pages the client can be sent to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    CreateEvent,
    Events,
    VerifyTicket,
    /// Events created by an organizer, reached from the landing page.
    CreatedEvents { organizer: Address },
    /// Same listing, reached from the wizard after a successful submission.
    ViewAll { organizer: Address },
}

impl Route {
    pub fn path(&self) -> String {
        match self {
            Route::CreateEvent => "/create-event".to_string(),
            Route::Events => "/events".to_string(),
            Route::VerifyTicket => "/verify-ticket".to_string(),
            Route::CreatedEvents { organizer } => format!("/create-event/viewAll?id={organizer}"),
            Route::ViewAll { organizer } => format!("/viewAll?id={organizer}"),
        }
    }
}

impl Serialize for Route {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.path())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Success,
    Error,
}

/// Toast the client should show.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub level: Level,
    pub message: String,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: Level::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: Level::Error,
            message: message.into(),
        }
    }
}
