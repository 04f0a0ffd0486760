use std::io::Write;
use std::thread;
use std::time::{Duration, Instant};

use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials as SmtpCredentials;
use lettre::{Message, SmtpTransport, Transport};

use mailmerge_config::Credentials;

use crate::error::SendError;
use crate::message::Email;

/// Minimum spacing between two SMTP submissions.
pub const SEND_INTERVAL: Duration = Duration::from_millis(100);

/// Delivers one message at a time. Implementations block until the message
/// is accepted or rejected.
pub trait Sender {
    fn send(&mut self, email: &Email) -> Result<(), SendError>;
}

impl<S: Sender + ?Sized> Sender for Box<S> {
    fn send(&mut self, email: &Email) -> Result<(), SendError> {
        (**self).send(email)
    }
}

// ============================================================================
// Dry run
// ============================================================================

/// Prints each message instead of sending it.
pub struct DryRunSender<W: Write> {
    out: W,
}

impl<W: Write> DryRunSender<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Sender for DryRunSender<W> {
    fn send(&mut self, email: &Email) -> Result<(), SendError> {
        writeln!(self.out)?;
        writeln!(self.out, "To: {}", email.to.join(", "))?;
        writeln!(self.out, "Subject: {}", email.subject)?;
        writeln!(self.out, "Body:")?;
        writeln!(self.out, "{}", email.body)?;
        Ok(())
    }
}

// ============================================================================
// SMTP
// ============================================================================

/// Enforces a minimum interval between consecutive calls to [`Throttle::wait`].
#[derive(Debug)]
pub struct Throttle {
    interval: Duration,
    last: Option<Instant>,
}

impl Throttle {
    pub fn new(interval: Duration) -> Self {
        Self { interval, last: None }
    }

    /// Sleep until `interval` has passed since the previous call.
    pub fn wait(&mut self) {
        if let Some(last) = self.last {
            let elapsed = last.elapsed();
            if elapsed < self.interval {
                let pause = self.interval - elapsed;
                log::trace!("throttling for {pause:?}");
                thread::sleep(pause);
            }
        }
        self.last = Some(Instant::now());
    }
}

/// Sends through an authenticated SMTP relay (implicit TLS).
pub struct SmtpSender {
    transport: SmtpTransport,
    from: Mailbox,
    throttle: Throttle,
}

impl SmtpSender {
    pub fn new(credentials: &Credentials) -> Result<Self, SendError> {
        let from = parse_mailbox(&credentials.email_id)?;
        let host = credentials.effective_smtp_host();
        let transport = SmtpTransport::relay(host)?
            .credentials(SmtpCredentials::new(
                credentials.email_id.clone(),
                credentials.password.clone(),
            ))
            .build();
        log::info!("sending through {host} as {}", credentials.email_id);
        Ok(Self {
            transport,
            from,
            throttle: Throttle::new(SEND_INTERVAL),
        })
    }

    fn build(&self, email: &Email) -> Result<Message, SendError> {
        let mut builder = Message::builder()
            .from(self.from.clone())
            .subject(email.subject.as_str())
            .header(ContentType::TEXT_PLAIN);
        for to in &email.to {
            builder = builder.to(parse_mailbox(to)?);
        }
        builder.body(email.body.clone()).map_err(|source| SendError::Build {
            recipient: email.to.join(", "),
            source,
        })
    }
}

impl Sender for SmtpSender {
    fn send(&mut self, email: &Email) -> Result<(), SendError> {
        let message = self.build(email)?;
        self.throttle.wait();
        let response = self.transport.send(&message)?;
        log::debug!("sent to {}: {}", email.to.join(", "), response.code());
        Ok(())
    }
}

fn parse_mailbox(address: &str) -> Result<Mailbox, SendError> {
    address.parse().map_err(|source| SendError::Address {
        address: address.to_string(),
        source,
    })
}
