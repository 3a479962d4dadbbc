use serde::Serialize;
use tracing::{debug, info};
use url::Url;

use crate::{
    ClientConfig, FileResource, Session,
    errors::{AuthError, BuildError, Result},
    session::LoginResponse,
    util::{decode_json, response_message},
};

const DEFAULT_USER_AGENT: &str = concat!("bpt-store", "@", env!("CARGO_PKG_VERSION"));

/// Endpoint that exchanges credentials for a [`Session`].
pub(crate) const LOGIN_PATH: &str = "login";

/// Placeholder for the base URL, without its trailing slash.
pub const BASE_URL_ALIAS: &str = "{baseUrl}";
/// Placeholder for the current session's user uuid.
pub const USER_UUID_ALIAS: &str = "{userUuid}";
/// Placeholder for the current session's auth token.
pub const AUTH_TOKEN_ALIAS: &str = "{authToken}";

#[derive(Serialize)]
struct LoginRequest<'a> {
    login: &'a str,
    password: &'a str,
}

/// Authenticated connection to a BPT Store endpoint.
///
/// A `Connection` owns the HTTP client, the immutable [`ClientConfig`] and, once logged in,
/// the current [`Session`]. Login is lazy: the first [`Connection::request`] (or an explicit
/// [`Connection::ensure_auth`]) performs it.
///
/// ### What it does
/// - Attaches `Authorization: <authToken>` to every request it sends.
/// - Expands `{baseUrl}`, `{userUuid}` and `{authToken}` in request URIs.
/// - On `401 Unauthorized`, logs in again and retries, at most
///   [`ClientConfig::max_attempts`] times per call.
///
/// ### Ownership
/// Methods that may refresh the session take `&mut self`; a connection serves one caller
/// at a time. Clone it to get an independent connection with a copy of the session.
///
/// ### Example
/// ```no_run
/// # use bpt_store::{ClientConfig, Connection, Method, RequestOptions};
/// # async fn run() -> bpt_store::Result<()> {
/// let config = ClientConfig::builder().login("alice").password("secret").build()?;
/// let mut conn = Connection::new(config)?;
/// let resp = conn
///     .request(Method::GET, "users/{userUuid}/files", RequestOptions::new())
///     .await?;
/// println!("{}", resp.status());
/// # Ok(()) }
/// ```
#[derive(Clone, Debug)]
pub struct Connection {
    pub(crate) http: reqwest::Client,
    pub(crate) config: ClientConfig,
    pub(crate) session: Option<Session>,
}

impl Connection {
    /// Create a connection for the given configuration. No network call is made.
    pub fn new(config: ClientConfig) -> std::result::Result<Connection, BuildError> {
        // Compose user agent with optional extra part.
        let user_agent = match config.user_agent_extra() {
            Some(extra) if !extra.trim().is_empty() => {
                &format!("{DEFAULT_USER_AGENT} {}", extra.trim())
            }
            _ => DEFAULT_USER_AGENT,
        };

        let mut http_builder = reqwest::Client::builder().user_agent(user_agent);
        if let Some(timeout) = config.request_timeout() {
            http_builder = http_builder.timeout(timeout);
        }

        Ok(Connection {
            http: http_builder.build()?,
            config,
            session: None,
        })
    }

    /// Create a connection configured from the `BPT_STORE_*` environment variables.
    pub fn from_env() -> std::result::Result<Connection, BuildError> {
        Self::new(ClientConfig::from_env()?)
    }

    // === Getters ===

    /// The configuration this connection was built with.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// The current session, if a login has succeeded.
    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// File operations bound to this connection.
    pub fn files(&mut self) -> FileResource<'_> {
        FileResource::new(self)
    }

    // === Authentication ===

    /// Make sure a session exists, logging in if needed.
    ///
    /// Without `force`, an existing session is returned as-is and no request is sent.
    /// With `force`, a fresh login always happens and its session replaces the current one.
    /// If that login fails or is cancelled, the previous session is kept.
    pub async fn ensure_auth(&mut self, force: bool) -> Result<&Session> {
        if !force && self.session.is_some() {
            return Ok(self.session.as_ref().expect("session checked above"));
        }
        // The current session stays in place until a fresh one arrives.
        let fresh = self.login().await?;
        Ok(self.session.insert(fresh))
    }

    /// Forget the local session. The next request logs in again.
    pub fn sign_out(&mut self) -> Option<Session> {
        self.session.take()
    }

    async fn login(&self) -> Result<Session> {
        let url = self.config.base_url().join(LOGIN_PATH)?;
        debug!(login = %self.config.login(), %url, "Logging in");

        let response = self
            .http
            .post(url)
            .json(&LoginRequest {
                login: self.config.login(),
                password: self.config.password(),
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response_message(response).await;
            return Err(AuthError::Rejected { status, message }.into());
        }

        let body: LoginResponse = decode_json(response).await?;
        let session = Session::try_from(body)?;
        info!(user_uuid = %session.user_uuid(), "Authenticated");

        Ok(session)
    }

    // === Aliases ===

    /// Substitute `{baseUrl}`, `{userUuid}` and `{authToken}` in `template`.
    ///
    /// `{baseUrl}` expands to the base URL without its trailing slash, so
    /// `"{baseUrl}/files/abc"` yields exactly one `/` between the two. Session aliases expand
    /// to the empty string while no session exists. Pure string operation, no I/O.
    pub fn resolve_aliases(&self, template: &str) -> String {
        let base_url = self.config.base_url().as_str().trim_end_matches('/');
        let (user_uuid, auth_token) = self
            .session
            .as_ref()
            .map_or(("", ""), |s| (s.user_uuid(), s.auth_token()));

        template
            .replace(BASE_URL_ALIAS, base_url)
            .replace(USER_UUID_ALIAS, user_uuid)
            .replace(AUTH_TOKEN_ALIAS, auth_token)
    }

    /// Resolve aliases and join the result onto the base URL.
    ///
    /// Relative paths land beneath the versioned base (a leading `/` is ignored);
    /// absolute URLs are kept as they are.
    pub(crate) fn resolve_url(&self, uri: &str) -> Result<Url> {
        let resolved = self.resolve_aliases(uri);
        Ok(self.config.base_url().join(resolved.trim_start_matches('/'))?)
    }
}
