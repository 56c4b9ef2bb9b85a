//! Email sending via SMTP
//!
//! Credentials and recipients come from the process environment; a missing
//! variable is a notifier configuration error, never a check failure.
//! Recipients go on BCC with the sender as the visible To address.

use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::{error, info};

use sw_core::{AppointmentSlot, CheckResult};

use crate::error::{EmailError, Result};

/// Email sender configuration
#[derive(Debug, Clone)]
pub struct EmailConfig {
    pub smtp_host: String,
    pub smtp_port: u16,
    pub sender: String,
    pub password: String,
    pub recipients: Vec<String>,
}

impl EmailConfig {
    /// Read the sender credentials and recipient list from the environment.
    ///
    /// `SENDER_EMAIL`, `SENDER_PASSWORD` and `RECEIVER_EMAIL` are required;
    /// `RECEIVER_EMAIL` is a comma-separated list. `SMTP_HOST` and
    /// `SMTP_PORT` override the Gmail defaults.
    pub fn from_env() -> Result<Self> {
        let sender = require_var("SENDER_EMAIL")?;
        let password = require_var("SENDER_PASSWORD")?;

        let recipients = parse_recipients(&require_var("RECEIVER_EMAIL")?);
        if recipients.is_empty() {
            return Err(EmailError::Config(
                "RECEIVER_EMAIL contains no addresses".to_string(),
            ));
        }

        let smtp_host =
            std::env::var("SMTP_HOST").unwrap_or_else(|_| "smtp.gmail.com".to_string());
        let smtp_port = match std::env::var("SMTP_PORT") {
            Ok(port) => port
                .parse()
                .map_err(|_| EmailError::Config(format!("Invalid SMTP_PORT: {}", port)))?,
            Err(_) => 587,
        };

        Ok(Self {
            smtp_host,
            smtp_port,
            sender,
            password,
            recipients,
        })
    }
}

fn require_var(name: &str) -> Result<String> {
    std::env::var(name).map_err(|_| EmailError::Config(format!("{} not set", name)))
}

/// Split a comma-separated address list, dropping surrounding whitespace
/// and empty entries.
fn parse_recipients(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|address| address.trim().to_string())
        .filter(|address| !address.is_empty())
        .collect()
}

/// Delivers check results by email.
#[derive(Debug, Clone)]
pub struct Notifier {
    config: EmailConfig,
    booking_url: String,
}

impl Notifier {
    pub fn new(config: EmailConfig, booking_url: impl Into<String>) -> Self {
        Self {
            config,
            booking_url: booking_url.into(),
        }
    }

    /// Surface the check result. Sends email only when slots were found;
    /// delivery failures are logged and swallowed.
    pub async fn notify(&self, result: &CheckResult) {
        if !result.available {
            info!("No appointments available, nothing to deliver");
            return;
        }

        match self.send_availability(&result.slots).await {
            Ok(()) => info!("Email notification sent successfully"),
            Err(e) => error!("Failed to send email notification: {}", e),
        }
    }

    async fn send_availability(&self, slots: &[AppointmentSlot]) -> Result<()> {
        let sender: Mailbox = self
            .config
            .sender
            .parse()
            .map_err(|e| EmailError::Address(format!("{}: {}", self.config.sender, e)))?;

        // Sender as the visible To; recipients stay on BCC
        let mut builder = Message::builder()
            .from(sender.clone())
            .to(sender)
            .subject("Swedish Embassy Appointments Available!");

        for recipient in &self.config.recipients {
            let mailbox: Mailbox = recipient
                .parse()
                .map_err(|e| EmailError::Address(format!("{}: {}", recipient, e)))?;
            builder = builder.bcc(mailbox);
        }

        let message = builder
            .body(render_slots(slots, &self.booking_url))
            .map_err(|e| EmailError::Send(format!("Failed to build message: {}", e)))?;

        let mailer = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&self.config.smtp_host)
            .map_err(|e| EmailError::Transport(format!("{}", e)))?
            .port(self.config.smtp_port)
            .credentials(Credentials::new(
                self.config.sender.clone(),
                self.config.password.clone(),
            ))
            .build();

        info!(
            "Sending availability email to {} recipients via {}:{}",
            self.config.recipients.len(),
            self.config.smtp_host,
            self.config.smtp_port
        );

        mailer
            .send(message)
            .await
            .map_err(|e| EmailError::Send(format!("{}", e)))?;

        Ok(())
    }
}

/// Render the slot list for a human reader: grouped by date in first-seen
/// order, times ascending within each date.
pub fn render_slots(slots: &[AppointmentSlot], booking_url: &str) -> String {
    let mut groups: Vec<(&str, Vec<&str>)> = Vec::new();
    for slot in slots {
        match groups.iter_mut().find(|(date, _)| *date == slot.date) {
            Some((_, times)) => times.push(&slot.time),
            None => groups.push((slot.date.as_str(), vec![slot.time.as_str()])),
        }
    }

    let mut body = String::from("Appointments are now available at the Swedish embassy!\n");
    for (date, mut times) in groups {
        times.sort_unstable();
        body.push_str(&format!("\n{}\n", date));
        for time in times {
            body.push_str(&format!("  {}\n", time));
        }
    }
    body.push_str(&format!("\nVisit {} to book your appointment.\n", booking_url));

    body
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_recipients_trims_and_drops_empty() {
        let recipients = parse_recipients(" a@example.com , b@example.com ,, ");
        assert_eq!(recipients, vec!["a@example.com", "b@example.com"]);
    }

    #[test]
    fn test_render_groups_by_date_and_sorts_times() {
        let slots = vec![
            AppointmentSlot::new("10 March 2026", "09:30"),
            AppointmentSlot::new("11 March 2026", "08:00"),
            AppointmentSlot::new("10 March 2026", "09:00"),
        ];

        let body = render_slots(&slots, "https://ventus.example/Booking");

        let march_10 = body.find("10 March 2026").unwrap();
        let march_11 = body.find("11 March 2026").unwrap();
        assert!(march_10 < march_11, "dates keep first-seen order");

        // Within 10 March, 09:00 comes before 09:30
        let first = body.find("09:00").unwrap();
        let second = body.find("09:30").unwrap();
        assert!(first < second);

        assert!(body.contains("https://ventus.example/Booking"));
    }

    #[test]
    fn test_from_env_reads_all_variables() {
        unsafe {
            std::env::set_var("SENDER_EMAIL", "sender@example.com");
            std::env::set_var("SENDER_PASSWORD", "secret");
            std::env::set_var("RECEIVER_EMAIL", "one@example.com, two@example.com");
        }

        let config = EmailConfig::from_env().unwrap();
        assert_eq!(config.sender, "sender@example.com");
        assert_eq!(config.recipients.len(), 2);
        assert_eq!(config.smtp_host, "smtp.gmail.com");
        assert_eq!(config.smtp_port, 587);

        unsafe {
            std::env::remove_var("SENDER_EMAIL");
            std::env::remove_var("SENDER_PASSWORD");
            std::env::remove_var("RECEIVER_EMAIL");
        }
    }
}
