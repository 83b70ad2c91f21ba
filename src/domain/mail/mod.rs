//! Mail module - rendering of transactional emails.

mod templates;

pub use templates::{
    default_reminder_message, escape_html, otp_email, reminder_email, reply_email, OutboundEmail,
    ReminderEmail, ReplyEmail,
};
