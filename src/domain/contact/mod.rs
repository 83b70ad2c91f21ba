//! Contact module - visitor messages and administrator replies.

mod errors;
mod message;

pub use errors::ContactError;
pub use message::{ContactForm, ContactMessage, MessageStatus};

#[cfg(test)]
pub(crate) use message::sample_form;
