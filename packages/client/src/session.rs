//! Session configuration: instance selection and credentials.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use url::Url;

use crate::error::Error;

/// The production instance.
pub const MAIN_URL: &str = "https://fluiddb.fluidinfo.com/";

/// The sandbox instance, for experiments.
pub const SANDBOX_URL: &str = "https://sandbox.fluidinfo.com/";

/// Which Fluidinfo instance a session talks to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Instance {
    #[default]
    Main,
    Sandbox,
    /// A bespoke instance. Must start with `http://` or `https://` and end
    /// with a trailing slash, e.g. `https://localhost/`.
    Custom(String),
}

/// Options for creating a [`Session`].
///
/// With no credentials the session is anonymous and requests go out
/// unauthenticated.
#[derive(Debug, Clone, Default)]
pub struct SessionConfig {
    pub instance: Instance,
    pub username: Option<String>,
    pub password: Option<String>,
}

impl SessionConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn instance(mut self, instance: Instance) -> Self {
        self.instance = instance;
        self
    }

    pub fn credentials(
        mut self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.username = Some(username.into());
        self.password = Some(password.into());
        self
    }
}

/// An immutable session: base endpoint plus the derived authorization
/// token. Construction performs no network activity; in-flight requests
/// only ever read from it.
#[derive(Debug, Clone)]
pub struct Session {
    base_url: Url,
    auth_token: Option<String>,
}

impl Session {
    pub fn new(config: SessionConfig) -> Result<Self, Error> {
        let base_url = match &config.instance {
            Instance::Main => Url::parse(MAIN_URL)?,
            Instance::Sandbox => Url::parse(SANDBOX_URL)?,
            Instance::Custom(raw) => validate_custom(raw)?,
        };

        // Both halves or nothing: a lone username is ignored.
        let auth_token = match (&config.username, &config.password) {
            (Some(username), Some(password)) => {
                Some(STANDARD.encode(format!("{username}:{password}")))
            }
            _ => None,
        };

        Ok(Self {
            base_url,
            auth_token,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The HTTP Basic credential, already base64-encoded, or `None` for an
    /// anonymous session.
    pub fn auth_token(&self) -> Option<&str> {
        self.auth_token.as_deref()
    }
}

/// A bespoke instance must look like `scheme://host/`: http or https, a
/// host of word characters, dots and dashes with an optional port, and a
/// trailing slash.
fn validate_custom(raw: &str) -> Result<Url, Error> {
    let authority = raw
        .strip_prefix("http://")
        .or_else(|| raw.strip_prefix("https://"))
        .and_then(|rest| rest.strip_suffix('/'));

    let valid = matches!(authority, Some(authority) if {
        let (host, port) = match authority.split_once(':') {
            Some((host, port)) => (host, Some(port)),
            None => (authority, None),
        };
        !host.is_empty()
            && host
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_'))
            && port.is_none_or(|port| {
                !port.is_empty() && port.chars().all(|c| c.is_ascii_digit())
            })
    });

    if !valid {
        return Err(Error::value(format!(
            "invalid instance URL '{raw}': must start with http[s]:// and \
             have a trailing slash, e.g. https://localhost/"
        )));
    }

    Ok(Url::parse(raw)?)
}
