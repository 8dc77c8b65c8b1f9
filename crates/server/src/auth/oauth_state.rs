use oauth2::PkceCodeVerifier;
use std::collections::HashMap;
use std::sync::LazyLock;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

struct StateEntry {
    verifier: PkceCodeVerifier,
    created_at: Instant,
    redirect_after: Option<String>,
}

const STATE_TTL: Duration = Duration::from_secs(600);

/// Pending OAuth flows keyed by CSRF secret.
static STATE_STORE: LazyLock<Mutex<HashMap<String, StateEntry>>> =
    LazyLock::new(|| Mutex::new(HashMap::new()));

/// Remember a pending flow. Expired entries are pruned on every insert.
pub async fn store_state(
    state: String,
    verifier: PkceCodeVerifier,
    redirect_after: Option<String>,
) {
    let mut store = STATE_STORE.lock().await;
    store.retain(|_, entry| entry.created_at.elapsed() <= STATE_TTL);
    store.insert(
        state,
        StateEntry {
            verifier,
            created_at: Instant::now(),
            redirect_after,
        },
    );
}

/// Consume a pending flow. `None` when unknown, already used or expired.
pub async fn take_state(state: &str) -> Option<(PkceCodeVerifier, Option<String>)> {
    let mut store = STATE_STORE.lock().await;
    let entry = store.remove(state)?;

    if entry.created_at.elapsed() > STATE_TTL {
        return None;
    }

    Some((entry.verifier, entry.redirect_after))
}
