mod retry;

use bpt_store_mock::{DEFAULT_LOGIN, DEFAULT_PASSWORD, DEFAULT_USER_UUID, MockBptStore};
use bpt_store_mock::bpt_store::Connection;

/// Token issued by the second login of a scenario.
const REFRESHED_TOKEN: &str = "token-2";

/// A connection that has already logged in once with the default login mock.
/// The login mock is removed afterwards so the scenario controls what the next login returns.
async fn authenticated(store: &MockBptStore) -> Connection {
    let login = store.mock_default_login().await;
    let mut conn = store.connection();
    conn.ensure_auth(false).await.unwrap();
    login.delete_async().await;
    conn
}

/// Make every subsequent login return [`REFRESHED_TOKEN`].
async fn refresh_login(store: &MockBptStore) -> bpt_store_mock::httpmock::Mock<'_> {
    store
        .mock_login(
            DEFAULT_LOGIN,
            DEFAULT_PASSWORD,
            REFRESHED_TOKEN,
            DEFAULT_USER_UUID,
        )
        .await
}
