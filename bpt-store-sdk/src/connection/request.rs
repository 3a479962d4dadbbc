use reqwest::{Method, Response, StatusCode};
use tracing::{debug, warn};

use super::core::Connection;
use super::options::RequestOptions;
use crate::{errors::Result, util::check_http_status};

impl Connection {
    /// Send an authenticated request and return the successful (2xx) response.
    ///
    /// 1. Logs in if no session exists yet.
    /// 2. Resolves aliases in `uri` and joins it onto the base URL.
    /// 3. Sends `options` with `Authorization: <authToken>`.
    ///
    /// A `401 Unauthorized` answer makes the connection log in again and resend, as long as
    /// this call has retried fewer than [`crate::ClientConfig::max_attempts`] times. The budget
    /// belongs to this call only; later calls start from zero. Once the budget
    /// is spent the last `401` is returned as [`crate::errors::RequestError::Server`].
    ///
    /// Any other non-2xx status, transport failure or login failure is returned immediately.
    pub async fn request(
        &mut self,
        method: Method,
        uri: &str,
        options: RequestOptions,
    ) -> Result<Response> {
        let max_attempts = self.config.max_attempts();
        let mut attempt: u32 = 0;

        loop {
            let auth_token = self.ensure_auth(false).await?.auth_token().to_owned();

            let mut url = self.resolve_url(uri)?;
            options.extend_query(&mut url);
            debug!(%method, %url, attempt, "Sending request");

            let rb = self.http.request(method.clone(), url);
            let response = options.apply(rb, &auth_token)?.send().await?;

            if response.status() == StatusCode::UNAUTHORIZED && attempt < max_attempts {
                attempt += 1;
                warn!(%method, uri, attempt, max_attempts, "Unauthorized, re-authenticating");
                self.ensure_auth(true).await?;
                continue;
            }

            return check_http_status(response).await;
        }
    }
}
