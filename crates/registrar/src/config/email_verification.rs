use std::convert::TryInto;

use handlebars::Handlebars;
use lettre::message::{header, Mailbox, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::transport::smtp::client::Tls;
use lettre::{Message, SmtpTransport, Transport};
use serde_json::Value;

use crate::{Error, Result, Success};

lazy_static! {
    static ref HANDLEBARS: Handlebars<'static> = Handlebars::new();
}

/// SMTP mail server configuration
#[derive(Serialize, Deserialize, Clone)]
pub struct SMTPSettings {
    /// Sender address
    pub from: String,

    /// Reply-To address
    pub reply_to: Option<String>,

    /// SMTP host
    pub host: String,

    /// SMTP port
    pub port: Option<i32>,

    /// SMTP username
    pub username: String,

    /// SMTP password
    pub password: String,

    /// Whether to use TLS
    pub use_tls: Option<bool>,
}

/// Email template
///
/// `{{code}}` is filled with the one-time code.
#[derive(Serialize, Deserialize, Clone)]
pub struct Template {
    /// Title of the email
    pub title: String,
    /// Plain text version of this email
    pub text: String,
    /// HTML version of this email
    pub html: Option<String>,
}

/// Email templates
#[derive(Serialize, Deserialize, Clone)]
pub struct Templates {
    /// Template for the verification code email
    pub verify: Template,
}

/// Email verification config
#[derive(Default, Serialize, Deserialize, Clone)]
pub enum EmailVerificationConfig {
    /// No mail relay; codes are handed back to the caller directly
    #[default]
    Disabled,
    /// Dispatch codes by email
    Enabled {
        smtp: SMTPSettings,
        templates: Templates,
    },
}

impl SMTPSettings {
    fn transport(&self) -> Result<SmtpTransport> {
        let relay = SmtpTransport::relay(&self.host).map_err(|_| Error::InternalError)?;

        let relay = if let Some(port) = self.port {
            relay.port(port.try_into().map_err(|_| Error::InternalError)?)
        } else {
            relay
        };

        let relay = if let Some(false) = self.use_tls {
            relay.tls(Tls::None)
        } else {
            relay
        };

        Ok(relay
            .credentials(Credentials::new(
                self.username.clone(),
                self.password.clone(),
            ))
            .build())
    }

    /// Render and send an email through the configured relay
    pub fn send_email(&self, to: &str, template: &Template, variables: Value) -> Success {
        let text = HANDLEBARS
            .render_template(&template.text, &variables)
            .map_err(|_| Error::RenderFail)?;

        let html = template
            .html
            .as_ref()
            .map(|html| HANDLEBARS.render_template(html, &variables))
            .transpose()
            .map_err(|_| Error::RenderFail)?;

        let from: Mailbox = self.from.parse().map_err(|_| Error::InternalError)?;
        let to: Mailbox = to.parse().map_err(|_| Error::IncorrectData { with: "email" })?;

        let mut message = Message::builder()
            .from(from)
            .to(to)
            .subject(template.title.clone());

        if let Some(reply_to) = &self.reply_to {
            message = message.reply_to(reply_to.parse().map_err(|_| Error::InternalError)?);
        }

        let message = message
            .multipart(generate_multipart(text, html))
            .map_err(|_| Error::InternalError)?;

        self.transport()?.send(&message).map_err(|err| {
            error!("Failed to send an email: {}", err);
            Error::EmailFailed {
                reason: err.to_string(),
                code: None,
            }
        })?;

        Ok(())
    }
}

fn generate_multipart(text: String, html: Option<String>) -> MultiPart {
    let plain = SinglePart::builder()
        .header(header::ContentType::TEXT_PLAIN)
        .body(text);

    if let Some(html) = html {
        MultiPart::alternative().singlepart(plain).singlepart(
            SinglePart::builder()
                .header(header::ContentType::TEXT_HTML)
                .body(html),
        )
    } else {
        MultiPart::mixed().singlepart(plain)
    }
}
