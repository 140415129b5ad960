use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::Serialize;

use crate::models::{Notification, Route};

pub trait Notifier: Send {
    fn notify(&self, notification: Notification);
}

pub trait Navigator: Send {
    fn navigate(&self, route: Route);
}

/// Side effects queued for the client, drained into each response.
#[derive(Debug, Clone, Default)]
pub struct Outbox(Arc<Mutex<Effects>>);

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Effects {
    pub notifications: Vec<Notification>,
    pub navigation: Vec<Route>,
}

impl Outbox {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn drain(&self) -> Effects {
        std::mem::take(&mut *self.lock())
    }

    // A panic elsewhere must not swallow queued effects.
    fn lock(&self) -> MutexGuard<'_, Effects> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Notifier for Outbox {
    fn notify(&self, notification: Notification) {
        self.lock().notifications.push(notification);
    }
}

impl Navigator for Outbox {
    fn navigate(&self, route: Route) {
        self.lock().navigation.push(route);
    }
}
