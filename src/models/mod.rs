pub mod event;
pub mod navigation;
pub mod ticket;
pub mod transaction;
pub mod wallet;

pub use event::{DraftIssue, EventDraft};
pub use navigation::{Notification, Route};
pub use transaction::CreateEventArgs;
pub use wallet::Connection;
