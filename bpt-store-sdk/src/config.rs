//! Client configuration: credentials, endpoint selection and retry budget.

use std::fmt;
use std::time::Duration;

use url::Url;

use crate::errors::BuildError;

/// Version segment substituted into the URL templates when none is configured.
pub const DEFAULT_API_VERSION: u32 = 1;

/// Number of re-authentication retries a single request may spend on `401` responses.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Production endpoint template.
pub const PROD_URL: &str = "https://api.bpt-store.com/api/v{apiVersionNumber}/";

/// Sandbox endpoint template.
pub const SANDBOX_URL: &str = "https://dev-api.bpt-store.com/api/v{apiVersionNumber}/";

const VERSION_PLACEHOLDER: &str = "{apiVersionNumber}";

/// Environment variables read by [`ClientConfig::from_env`].
pub mod env {
    /// Account login (required).
    pub const LOGIN: &str = "BPT_STORE_LOGIN";
    /// Account password (required).
    pub const PASSWORD: &str = "BPT_STORE_PASSWORD";
    /// `true`/`false`/`1`/`0`: use the sandbox endpoint.
    pub const SANDBOX: &str = "BPT_STORE_SANDBOX";
    /// Retry budget for `401` responses.
    pub const MAX_ATTEMPTS: &str = "BPT_STORE_MAX_ATTEMPTS";
    /// Base URL override, may contain `{apiVersionNumber}`.
    pub const URL: &str = "BPT_STORE_URL";
    /// API version number.
    pub const VERSION: &str = "BPT_STORE_VERSION";
}

/// Immutable settings of a [`crate::Connection`].
///
/// Built with [`ClientConfig::builder()`] or [`ClientConfig::from_env()`]. The base URL
/// is resolved once at build time and always ends with `/`, so relative endpoint paths
/// such as `login` or `users/{userUuid}/files` join beneath it.
///
/// # Example
/// ```
/// # use bpt_store::ClientConfig;
/// let config = ClientConfig::builder()
///     .login("alice")
///     .password("secret")
///     .sandbox(true)
///     .build()?;
/// assert_eq!(config.base_url().as_str(), "https://dev-api.bpt-store.com/api/v1/");
/// # Ok::<_, bpt_store::BuildError>(())
/// ```
#[derive(Clone)]
pub struct ClientConfig {
    login: String,
    password: String,
    sandbox: bool,
    max_attempts: u32,
    version_number: u32,
    base_url: Url,
    request_timeout: Option<Duration>,
    user_agent_extra: Option<String>,
}

impl ClientConfig {
    /// Returns a builder with every optional setting at its default.
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }

    /// Build a configuration from the `BPT_STORE_*` environment variables (see [`env`]).
    pub fn from_env() -> Result<ClientConfig, BuildError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> Result<ClientConfig, BuildError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut builder = Self::builder();

        if let Some(login) = lookup(env::LOGIN) {
            builder.login(login);
        }
        if let Some(password) = lookup(env::PASSWORD) {
            builder.password(password);
        }
        if let Some(raw) = lookup(env::SANDBOX) {
            builder.sandbox(parse_bool(env::SANDBOX, &raw)?);
        }
        if let Some(raw) = lookup(env::MAX_ATTEMPTS) {
            builder.max_attempts(parse_number(env::MAX_ATTEMPTS, &raw)?);
        }
        if let Some(url) = lookup(env::URL) {
            builder.url(url);
        }
        if let Some(raw) = lookup(env::VERSION) {
            builder.version_number(parse_number(env::VERSION, &raw)?);
        }

        builder.build()
    }

    /// Account login.
    pub fn login(&self) -> &str {
        &self.login
    }

    pub(crate) fn password(&self) -> &str {
        &self.password
    }

    /// Whether the sandbox endpoint is selected.
    pub fn sandbox(&self) -> bool {
        self.sandbox
    }

    /// How many times one request may re-authenticate and retry after a `401`.
    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// API version substituted into the URL template.
    pub fn version_number(&self) -> u32 {
        self.version_number
    }

    /// Resolved base URL, always ending with `/`.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Optional per-request timeout applied to the HTTP client.
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout
    }

    pub(crate) fn user_agent_extra(&self) -> Option<&str> {
        self.user_agent_extra.as_deref()
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("login", &self.login)
            .field("password", &"<redacted>")
            .field("sandbox", &self.sandbox)
            .field("max_attempts", &self.max_attempts)
            .field("version_number", &self.version_number)
            .field("base_url", &self.base_url.as_str())
            .field("request_timeout", &self.request_timeout)
            .finish_non_exhaustive()
    }
}

/// Configures a [`ClientConfig`] before construction.
///
/// # Defaults
/// - sandbox: `false`
/// - max attempts: [`DEFAULT_MAX_ATTEMPTS`]
/// - version number: [`DEFAULT_API_VERSION`]
/// - url: [`PROD_URL`] or [`SANDBOX_URL`] depending on `sandbox`
/// - HTTP request timeout: reqwest default (none) unless set via [`Self::request_timeout`]
#[derive(Debug, Clone, Default)]
#[must_use]
pub struct ClientConfigBuilder {
    login: Option<String>,
    password: Option<String>,
    sandbox: bool,
    max_attempts: Option<u32>,
    url: Option<String>,
    version_number: Option<u32>,
    request_timeout: Option<Duration>,
    user_agent_extra: Option<String>,
}

impl ClientConfigBuilder {
    /// Account login. Required.
    pub fn login<S: Into<String>>(&mut self, login: S) -> &mut Self {
        self.login = Some(login.into());
        self
    }

    /// Account password. Required.
    pub fn password<S: Into<String>>(&mut self, password: S) -> &mut Self {
        self.password = Some(password.into());
        self
    }

    /// Select the sandbox endpoint instead of production.
    pub fn sandbox(&mut self, sandbox: bool) -> &mut Self {
        self.sandbox = sandbox;
        self
    }

    /// Retry budget for `401` responses, per request.
    pub fn max_attempts(&mut self, max_attempts: u32) -> &mut Self {
        self.max_attempts = Some(max_attempts);
        self
    }

    /// Override the endpoint template. `{apiVersionNumber}` is substituted if present.
    pub fn url<S: Into<String>>(&mut self, url: S) -> &mut Self {
        self.url = Some(url.into());
        self
    }

    /// API version number.
    pub fn version_number(&mut self, version: u32) -> &mut Self {
        self.version_number = Some(version);
        self
    }

    /// Set HTTP requests timeout.
    pub fn request_timeout(&mut self, timeout: Duration) -> &mut Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// Append an extra user-agent segment after the default `bpt-store@<version>`.
    pub fn user_agent_extra<S: Into<String>>(&mut self, extra: S) -> &mut Self {
        self.user_agent_extra = Some(extra.into());
        self
    }

    /// Validate the settings and resolve the base URL.
    pub fn build(&self) -> Result<ClientConfig, BuildError> {
        let login = required(self.login.as_deref(), "login")?;
        let password = required(self.password.as_deref(), "password")?;
        let version_number = self.version_number.unwrap_or(DEFAULT_API_VERSION);

        let template = match &self.url {
            Some(url) => url.as_str(),
            None if self.sandbox => SANDBOX_URL,
            None => PROD_URL,
        };
        let base_url = resolve_base_url(template, version_number)?;

        Ok(ClientConfig {
            login,
            password,
            sandbox: self.sandbox,
            max_attempts: self.max_attempts.unwrap_or(DEFAULT_MAX_ATTEMPTS),
            version_number,
            base_url,
            request_timeout: self.request_timeout,
            user_agent_extra: self.user_agent_extra.clone(),
        })
    }
}

fn required(value: Option<&str>, name: &'static str) -> Result<String, BuildError> {
    match value {
        Some(v) if !v.is_empty() => Ok(v.to_string()),
        _ => Err(BuildError::MissingCredential(name)),
    }
}

fn resolve_base_url(template: &str, version: u32) -> Result<Url, BuildError> {
    let mut raw = template.replace(VERSION_PLACEHOLDER, &version.to_string());
    if !raw.ends_with('/') {
        raw.push('/');
    }
    Ok(Url::parse(&raw)?)
}

fn parse_bool(key: &str, raw: &str) -> Result<bool, BuildError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" => Ok(true),
        "0" | "false" | "no" | "" => Ok(false),
        _ => Err(invalid(key, raw)),
    }
}

fn parse_number(key: &str, raw: &str) -> Result<u32, BuildError> {
    raw.trim().parse().ok().ok_or_else(|| invalid(key, raw))
}

fn invalid(key: &str, raw: &str) -> BuildError {
    BuildError::InvalidValue {
        key: key.to_string(),
        value: raw.to_string(),
    }
}
