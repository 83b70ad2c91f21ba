//! Contact-form handlers: public submission and the admin inbox.

mod list_messages;
mod reply_to_message;
mod resolve_message;
mod submit_message;

pub use list_messages::{ListContactMessagesHandler, ListContactMessagesQuery};
pub use reply_to_message::{ReplyToContactMessageCommand, ReplyToContactMessageHandler};
pub use resolve_message::{ResolveContactMessageCommand, ResolveContactMessageHandler};
pub use submit_message::SubmitContactMessageHandler;
