use serde::Serialize;

use crate::models::wallet::ConnectedAs;
use crate::models::{Connection, Route};
use crate::wizard::Navigator;

pub const TITLE: &str = "ZKonnect";
pub const TAGLINE: &str = "Secure Event Management with Zero-Knowledge Proofs";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Link {
    pub label: &'static str,
    pub route: Route,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LandingView {
    pub title: &'static str,
    pub tagline: &'static str,
    pub links: Vec<Link>,
    pub view_created_events: Option<Link>,
    pub connected_as: Option<ConnectedAs>,
}

/// Landing page entry points. Holds no state of its own beyond the
/// connection it was built with.
pub struct LandingNavigator<R> {
    connection: Connection,
    navigator: R,
}

impl<R: Navigator> LandingNavigator<R> {
    pub fn new(connection: Connection, navigator: R) -> Self {
        Self {
            connection,
            navigator,
        }
    }

    pub fn render(&self) -> LandingView {
        let links = vec![
            Link {
                label: "Create Event",
                route: Route::CreateEvent,
            },
            Link {
                label: "Join Event",
                route: Route::Events,
            },
            Link {
                label: "Get Verified",
                route: Route::VerifyTicket,
            },
        ];

        LandingView {
            title: TITLE,
            tagline: TAGLINE,
            links,
            view_created_events: self.connection.address().map(|organizer| Link {
                label: "View Created Events",
                route: Route::CreatedEvents { organizer },
            }),
            connected_as: self.connection.address().map(ConnectedAs::from),
        }
    }

    /// Sends the client to the organizer's event list. Does nothing without a
    /// connected wallet.
    pub fn view_created_events(&self) -> bool {
        match self.connection.address() {
            Some(organizer) => {
                self.navigator.navigate(Route::CreatedEvents { organizer });
                true
            }
            None => false,
        }
    }
}
