//! Mail delivery adapters implementing the `Mailer` port.

mod mailjet;
mod recording;

pub use mailjet::MailjetMailer;
pub use recording::RecordingMailer;
