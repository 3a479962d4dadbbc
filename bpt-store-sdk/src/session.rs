use std::fmt;

use serde::Deserialize;

use crate::errors::AuthError;

/// Credentials issued by the `login` endpoint.
///
/// Both values are opaque to the client. They are always replaced together on
/// re-authentication, so a `Session` never mixes a token from one login with the
/// user uuid of another.
#[derive(Clone, PartialEq, Eq)]
pub struct Session {
    auth_token: String,
    user_uuid: String,
}

/// Wire shape of a login response. Fields are optional so a partial body maps to
/// [`AuthError::MalformedResponse`] instead of a JSON decode error.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct LoginResponse {
    auth_token: Option<String>,
    user_uuid: Option<String>,
}

impl Session {
    /// Construct a session from known values.
    pub fn new<T: Into<String>, U: Into<String>>(auth_token: T, user_uuid: U) -> Session {
        Session {
            auth_token: auth_token.into(),
            user_uuid: user_uuid.into(),
        }
    }

    /// Opaque token sent verbatim as the `Authorization` header.
    pub fn auth_token(&self) -> &str {
        &self.auth_token
    }

    /// Identifier scoping private resource paths.
    pub fn user_uuid(&self) -> &str {
        &self.user_uuid
    }
}

impl TryFrom<LoginResponse> for Session {
    type Error = AuthError;

    fn try_from(resp: LoginResponse) -> Result<Self, Self::Error> {
        let auth_token = resp
            .auth_token
            .filter(|t| !t.is_empty())
            .ok_or_else(|| AuthError::MalformedResponse("missing `authToken`".into()))?;
        let user_uuid = resp
            .user_uuid
            .filter(|u| !u.is_empty())
            .ok_or_else(|| AuthError::MalformedResponse("missing `userUuid`".into()))?;

        Ok(Session::new(auth_token, user_uuid))
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("auth_token", &"<redacted>")
            .field("user_uuid", &self.user_uuid)
            .finish()
    }
}
