//! Outbound email templates: OTP codes, expiry reminders and contact replies.
//!
//! Each builder returns a provider-neutral [`OutboundEmail`]; the mail
//! adapter adds the sender and talks to the delivery API.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::Serialize;

/// A rendered message ready to hand to a `Mailer`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutboundEmail {
    pub to_email: String,
    pub to_name: Option<String>,
    pub subject: String,
    pub text: String,
    pub html: Option<String>,
}

/// Inputs for the membership expiry reminder.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReminderEmail {
    pub email: String,
    pub user_name: String,
    pub package_name: String,
    pub days_remaining: Option<i64>,
    /// ISO date or RFC 3339 timestamp; anything else is shown as given.
    pub end_date: Option<String>,
    pub message: String,
}

/// Inputs for the reply to a contact-form message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplyEmail {
    pub email: String,
    pub user_name: String,
    pub user_subject: Option<String>,
    pub user_message: Option<String>,
    pub admin_reply: String,
}

pub fn otp_email(email: &str, otp: &str) -> OutboundEmail {
    OutboundEmail {
        to_email: email.to_string(),
        to_name: None,
        subject: "Your OTP Code".to_string(),
        text: format!("Your OTP is {}", otp),
        html: None,
    }
}

pub fn reminder_email(input: &ReminderEmail) -> OutboundEmail {
    let expires_in = expires_in(input.days_remaining);
    let expiry_date = input
        .end_date
        .as_deref()
        .map(display_date)
        .unwrap_or_else(|| "N/A".to_string());

    let text = format!(
        "Dear {name},\n\n{message}\n\nPackage: {package}\nExpires in: {expires_in}\nExpiry Date: {expiry_date}\n\nBest regards,\nGym Management Team",
        name = input.user_name,
        message = input.message,
        package = input.package_name,
    );

    let html = format!(
        r#"<div style="font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto;">
  <div style="background-color: #f97316; color: white; padding: 20px; text-align: center;">
    <h1 style="margin: 0;">Membership Expiry Reminder</h1>
  </div>
  <div style="padding: 30px; background-color: #f9fafb;">
    <p style="font-size: 16px; color: #374151;">Dear {name},</p>
    <div style="background-color: #fef3c7; border-left: 4px solid #f59e0b; padding: 15px; margin: 20px 0;">
      <p style="margin: 0; color: #92400e; font-weight: bold;">Your membership expires in {expires_in}!</p>
      <p style="margin: 5px 0 0 0; color: #92400e;">Package: <strong>{package}</strong></p>
      <p style="margin: 5px 0 0 0; color: #92400e;">Expiry Date: <strong>{expiry_date}</strong></p>
    </div>
    <div style="white-space: pre-line; color: #4b5563; line-height: 1.6;">{message}</div>
    <div style="margin-top: 30px; padding: 20px; background-color: white; border-radius: 8px; text-align: center;">
      <p style="color: #6b7280; margin: 0;">To renew your membership, please visit our gym or contact us.</p>
    </div>
  </div>
  {footer}
</div>"#,
        name = escape_html(&input.user_name),
        expires_in = escape_html(&expires_in),
        package = escape_html(&input.package_name),
        expiry_date = escape_html(&expiry_date),
        message = escape_html(&input.message),
        footer = footer(None),
    );

    OutboundEmail {
        to_email: input.email.clone(),
        to_name: Some(input.user_name.clone()),
        subject: format!("Membership Expiry Reminder - {}", input.package_name),
        text,
        html: Some(html),
    }
}

pub fn reply_email(input: &ReplyEmail) -> OutboundEmail {
    let subject = match input.user_subject.as_deref().map(str::trim) {
        Some(s) if !s.is_empty() => format!("Re: {}", s),
        _ => "Re: Your Inquiry".to_string(),
    };
    let user_message = input
        .user_message
        .as_deref()
        .map(str::trim)
        .filter(|m| !m.is_empty());

    let mut text = format!(
        "Dear {},\n\nThank you for reaching out to us. Here's our response to your inquiry:\n\n",
        input.user_name
    );
    if let Some(m) = user_message {
        text.push_str(&format!("Your Message:\n{}\n\n", m));
    }
    text.push_str(&format!(
        "Our Response:\n{}\n\nIf you have any further questions, feel free to contact us.\n\nBest regards,\nGym Management Team",
        input.admin_reply
    ));

    let quoted = user_message
        .map(|m| {
            format!(
                r#"
    <div style="background-color: #e5e7eb; padding: 15px; border-radius: 8px; margin: 20px 0;">
      <p style="margin: 0 0 5px 0; font-size: 12px; color: #6b7280; font-weight: bold;">YOUR MESSAGE:</p>
      <p style="margin: 0; color: #374151; font-style: italic;">{}</p>
    </div>"#,
                escape_html(m)
            )
        })
        .unwrap_or_default();

    let html = format!(
        r#"<div style="font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto;">
  <div style="background-color: #3b82f6; color: white; padding: 20px; text-align: center;">
    <h1 style="margin: 0;">Response to Your Message</h1>
  </div>
  <div style="padding: 30px; background-color: #f9fafb;">
    <p style="font-size: 16px; color: #374151;">Dear {name},</p>
    <p style="color: #6b7280;">Thank you for reaching out to us. Here's our response to your inquiry:</p>{quoted}
    <div style="background-color: white; padding: 20px; border-radius: 8px; border-left: 4px solid #3b82f6; margin: 20px 0;">
      <p style="margin: 0 0 10px 0; font-size: 12px; color: #3b82f6; font-weight: bold;">OUR RESPONSE:</p>
      <div style="white-space: pre-line; color: #374151; line-height: 1.6;">{reply}</div>
    </div>
    <div style="margin-top: 30px; padding: 15px; background-color: #dbeafe; border-radius: 8px;">
      <p style="color: #1e40af; margin: 0; font-size: 14px;">If you have any further questions, feel free to contact us or visit our gym.</p>
    </div>
  </div>
  {footer}
</div>"#,
        name = escape_html(&input.user_name),
        quoted = quoted,
        reply = escape_html(&input.admin_reply),
        footer = footer(Some("This is an automated response to your inquiry.")),
    );

    OutboundEmail {
        to_email: input.email.clone(),
        to_name: Some(input.user_name.clone()),
        subject,
        text,
        html: Some(html),
    }
}

/// Reminder body used when the administrator does not write one.
pub fn default_reminder_message(package_name: &str, days_remaining: i64, end_date: NaiveDate) -> String {
    format!(
        "This is a friendly reminder that your {} membership expires in {} on {}. Renew now to keep enjoying uninterrupted access to the gym.",
        package_name,
        expires_in(Some(days_remaining)),
        end_date.format("%Y-%m-%d"),
    )
}

fn expires_in(days: Option<i64>) -> String {
    match days {
        Some(1) => "1 day".to_string(),
        Some(d) => format!("{} days", d),
        None => "a few days".to_string(),
    }
}

fn display_date(raw: &str) -> String {
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date.format("%Y-%m-%d").to_string();
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.with_timezone(&Utc).format("%Y-%m-%d").to_string();
    }
    raw.to_string()
}

fn footer(note: Option<&str>) -> String {
    let note = note
        .map(|n| format!(r#"<p style="margin: 5px 0 0 0;">{}</p>"#, n))
        .unwrap_or_default();
    format!(
        r#"<div style="background-color: #1f2937; color: #9ca3af; padding: 20px; text-align: center; font-size: 12px;">
    <p style="margin: 0;">&copy; {} Gym Management System. All rights reserved.</p>{}
  </div>"#,
        Utc::now().year(),
        note
    )
}

pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reminder() -> ReminderEmail {
        ReminderEmail {
            email: "asha@example.com".to_string(),
            user_name: "Asha".to_string(),
            package_name: "Monthly".to_string(),
            days_remaining: Some(2),
            end_date: Some("2024-01-31".to_string()),
            message: "Please renew.".to_string(),
        }
    }

    #[test]
    fn otp_email_is_plain_text() {
        let email = otp_email("a@example.com", "482913");
        assert_eq!(email.subject, "Your OTP Code");
        assert_eq!(email.text, "Your OTP is 482913");
        assert!(email.html.is_none());
    }

    #[test]
    fn reminder_subject_names_package() {
        let email = reminder_email(&reminder());
        assert_eq!(email.subject, "Membership Expiry Reminder - Monthly");
        assert!(email.text.contains("Expires in: 2 days"));
        assert!(email.text.contains("Expiry Date: 2024-01-31"));
    }

    #[test]
    fn reminder_uses_singular_for_one_day() {
        let email = reminder_email(&ReminderEmail {
            days_remaining: Some(1),
            ..reminder()
        });
        assert!(email.text.contains("Expires in: 1 day\n"));
    }

    #[test]
    fn reminder_formats_timestamp_end_dates() {
        let email = reminder_email(&ReminderEmail {
            end_date: Some("2024-01-31T00:00:00Z".to_string()),
            ..reminder()
        });
        assert!(email.text.contains("Expiry Date: 2024-01-31"));
    }

    #[test]
    fn reminder_passes_unparseable_dates_through() {
        let email = reminder_email(&ReminderEmail {
            end_date: Some("end of month".to_string()),
            ..reminder()
        });
        assert!(email.text.contains("Expiry Date: end of month"));
    }

    #[test]
    fn reminder_html_escapes_user_text() {
        let email = reminder_email(&ReminderEmail {
            message: "<script>alert(1)</script>".to_string(),
            ..reminder()
        });
        let html = email.html.unwrap();
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn reply_subject_falls_back_when_missing() {
        let email = reply_email(&ReplyEmail {
            email: "r@example.com".to_string(),
            user_name: "Ravi".to_string(),
            admin_reply: "We open at 6.".to_string(),
            ..Default::default()
        });
        assert_eq!(email.subject, "Re: Your Inquiry");
        assert!(!email.text.contains("Your Message:"));
        assert!(!email.html.unwrap().contains("YOUR MESSAGE"));
    }

    #[test]
    fn reply_quotes_user_message_when_present() {
        let email = reply_email(&ReplyEmail {
            email: "r@example.com".to_string(),
            user_name: "Ravi".to_string(),
            user_subject: Some("Timings".to_string()),
            user_message: Some("Open on Sunday?".to_string()),
            admin_reply: "Yes.".to_string(),
        });
        assert_eq!(email.subject, "Re: Timings");
        assert!(email.text.contains("Your Message:\nOpen on Sunday?"));
        assert!(email.html.unwrap().contains("YOUR MESSAGE"));
    }

    #[test]
    fn default_reminder_mentions_days_and_date() {
        let text = default_reminder_message(
            "Quarterly",
            2,
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
        );
        assert!(text.contains("Quarterly membership expires in 2 days on 2024-03-01"));
    }
}
