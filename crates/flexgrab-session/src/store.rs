//! The observable session store.

use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

use tracing::{debug, info, instrument, warn};

use flexgrab_api::ApiClient;
use flexgrab_core::UserRecord;

use crate::storage::CredentialStorage;

/// Immutable view of the session handed to observers and screens.
///
/// Invariants: `is_authenticated` holds exactly when `current_user` is
/// present; `has_amazon_credentials` holds exactly when the user record
/// carries both linked-identity fields.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSnapshot {
    pub current_user: Option<UserRecord>,
    pub is_authenticated: bool,
    pub has_amazon_credentials: bool,
}

impl SessionSnapshot {
    fn from_user(user: Option<&UserRecord>) -> Self {
        Self {
            is_authenticated: user.is_some(),
            has_amazon_credentials: user.is_some_and(UserRecord::has_amazon_credentials),
            current_user: user.cloned(),
        }
    }
}

/// Handle returned by [`SessionStore::subscribe`]; pass it to
/// [`SessionStore::unsubscribe`] to detach the observer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Handler = Box<dyn Fn(&SessionSnapshot) + Send + Sync>;

#[derive(Default)]
struct SessionState {
    user: Option<UserRecord>,
    token: Option<String>,
}

/// Single source of truth for the authenticated session.
///
/// Construction attempts restoration from [`CredentialStorage`]; the
/// four operations ([`login`], [`link_amazon_credentials`], [`logout`],
/// and restoration itself) are the only paths that mutate session
/// state, the client token, or the persisted blob, and they keep all
/// three in agreement.
///
/// # Observers
///
/// Subscribing delivers the current snapshot immediately; after that,
/// every mutation is delivered to all subscribed observers on the
/// mutating call's own stack, before the call returns. Delivery happens
/// under the observer-list lock, so once [`unsubscribe`] returns the
/// handler will never run again. Handlers must not call back into
/// `subscribe`/`unsubscribe`.
///
/// # Concurrency
///
/// State mutations are serialized by an internal lock; the persisted
/// blob is written under that lock, so interleaved partial writes
/// cannot occur. [`link_amazon_credentials`] suspends only for its
/// network call and commits atomically afterwards.
///
/// [`login`]: SessionStore::login
/// [`logout`]: SessionStore::logout
/// [`link_amazon_credentials`]: SessionStore::link_amazon_credentials
/// [`unsubscribe`]: SessionStore::unsubscribe
pub struct SessionStore {
    api: ApiClient,
    storage: CredentialStorage,
    state: Mutex<SessionState>,
    observers: Mutex<Vec<(SubscriptionId, Handler)>>,
    next_subscription: AtomicU64,
}

impl SessionStore {
    /// Create the store, restoring any persisted session.
    ///
    /// A missing or malformed credential blob is a normal first-run
    /// condition, not an error: the store starts logged out and makes
    /// no network calls. A well-formed blob reconstructs the session
    /// and pushes the token into the API client.
    pub fn new(api: ApiClient, storage: CredentialStorage) -> Self {
        let mut state = SessionState::default();

        match storage.load() {
            Ok(Some((user, token))) => {
                info!(user = %user.id, "restored persisted session");
                api.set_token(token.as_str());
                state.user = Some(user);
                state.token = Some(token);
            }
            Ok(None) => {
                debug!("no persisted session");
            }
            Err(e) => {
                debug!(error = %e, "ignoring malformed persisted session");
            }
        }

        Self {
            api,
            storage,
            state: Mutex::new(state),
            observers: Mutex::new(Vec::new()),
            next_subscription: AtomicU64::new(0),
        }
    }

    /// Enter the logged-in state.
    ///
    /// The only path by which `is_authenticated` becomes true. Pushes
    /// the token into the API client and persists the credential blob;
    /// a persistence failure is logged and absorbed.
    #[instrument(skip(self, user, token), fields(user = %user.id))]
    pub fn login(&self, user: UserRecord, token: impl Into<String>) {
        let token = token.into();
        {
            let mut state = self.state.lock().unwrap();
            self.api.set_token(token.as_str());
            if let Err(e) = self.storage.save(&user, &token) {
                warn!(error = %e, "failed to persist credentials");
            }
            state.user = Some(user);
            state.token = Some(token);
        }
        info!("logged in");
        self.notify();
    }

    /// Link Amazon credentials to the account via the current token.
    ///
    /// All-or-nothing: on success the persisted blob is rewritten
    /// first, then the in-memory record replaced and observers
    /// notified. Any failure — transport, decode, server rejection, or
    /// persistence — leaves memory and disk untouched and returns
    /// `false`. This method never raises.
    #[instrument(skip_all)]
    pub async fn link_amazon_credentials(&self, email: &str, password: &str) -> bool {
        let response = match self.api.save_amazon_credentials(email, password).await {
            Ok(response) => response,
            Err(e) => {
                warn!(error = %e, "linking Amazon credentials failed");
                return false;
            }
        };

        if !response.success {
            debug!(
                message = response.message.as_deref().unwrap_or_default(),
                "server rejected Amazon credentials"
            );
            return false;
        }

        let Some(user) = response.user else {
            warn!("server reported success without an updated user record");
            return false;
        };

        {
            let mut state = self.state.lock().unwrap();
            let Some(token) = state.token.clone() else {
                // Logged out while the request was in flight.
                return false;
            };
            if let Err(e) = self.storage.save(&user, &token) {
                warn!(error = %e, "failed to persist linked credentials");
                return false;
            }
            state.user = Some(user);
        }

        info!("Amazon credentials linked");
        self.notify();
        true
    }

    /// Return to the logged-out state.
    ///
    /// Resets the session, clears the client token, and erases the
    /// persisted blob, in that order. Safe to call when already logged
    /// out.
    #[instrument(skip(self))]
    pub fn logout(&self) {
        {
            let mut state = self.state.lock().unwrap();
            state.user = None;
            state.token = None;
            self.api.clear_token();
            if let Err(e) = self.storage.clear() {
                warn!(error = %e, "failed to erase persisted credentials");
            }
        }
        info!("logged out");
        self.notify();
    }

    /// Immutable snapshot of the current session.
    pub fn snapshot(&self) -> SessionSnapshot {
        let state = self.state.lock().unwrap();
        SessionSnapshot::from_user(state.user.as_ref())
    }

    /// Attach an observer.
    ///
    /// The handler receives the current snapshot synchronously before
    /// this returns, then every subsequent mutation until detached.
    pub fn subscribe<F>(&self, handler: F) -> SubscriptionId
    where
        F: Fn(&SessionSnapshot) + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.next_subscription.fetch_add(1, Ordering::Relaxed));
        let handler: Handler = Box::new(handler);
        let mut observers = self.observers.lock().unwrap();
        // Snapshot under the observer lock: any mutation whose
        // notification already ran is visible to the initial delivery.
        let snapshot = self.snapshot();
        handler(&snapshot);
        observers.push((id, handler));
        id
    }

    /// Detach an observer. After this returns, its handler will not be
    /// invoked again. Unknown ids are ignored.
    pub fn unsubscribe(&self, id: SubscriptionId) {
        self.observers
            .lock()
            .unwrap()
            .retain(|(observer, _)| *observer != id);
    }

    fn notify(&self) {
        let snapshot = self.snapshot();
        let observers = self.observers.lock().unwrap();
        for (_, handler) in observers.iter() {
            handler(&snapshot);
        }
    }
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.lock().unwrap();
        f.debug_struct("SessionStore")
            .field("user", &state.user.as_ref().map(|u| u.id.as_str()))
            .field("token", &state.token.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::AtomicUsize;

    use flexgrab_core::ApiBaseUrl;

    fn store_in(dir: &std::path::Path) -> SessionStore {
        let api = ApiClient::new(ApiBaseUrl::default());
        let storage = CredentialStorage::at(dir).unwrap();
        SessionStore::new(api, storage)
    }

    fn sample_user() -> UserRecord {
        UserRecord {
            id: "u1".to_string(),
            name: "Ali".to_string(),
            email: "a@x.com".to_string(),
            amazon_email: None,
            amazon_password: None,
            token: None,
            device_token: None,
        }
    }

    #[test]
    fn starts_logged_out_without_persisted_state() {
        let dir = tempfile::tempdir().unwrap();
        let snapshot = store_in(dir.path()).snapshot();
        assert!(!snapshot.is_authenticated);
        assert!(!snapshot.has_amazon_credentials);
        assert!(snapshot.current_user.is_none());
    }

    #[test]
    fn subscribing_delivers_the_current_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(dir.path());
        store.login(sample_user(), "T1");

        let seen = Arc::new(Mutex::new(Vec::new()));
        let seen_by_handler = Arc::clone(&seen);
        store.subscribe(move |snapshot| {
            seen_by_handler.lock().unwrap().push(snapshot.is_authenticated);
        });

        // A fresh observer sees the logged-in state without waiting for
        // the next mutation.
        assert_eq!(seen.lock().unwrap().as_slice(), &[true]);
    }

    #[test]
    fn login_notifies_observers_before_returning() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(dir.path());

        let seen = Arc::new(Mutex::new(Vec::new()));
        let seen_by_handler = Arc::clone(&seen);
        store.subscribe(move |snapshot| {
            seen_by_handler.lock().unwrap().push(snapshot.is_authenticated);
        });

        store.login(sample_user(), "T1");
        // Delivery is synchronous on the mutating call's stack.
        assert_eq!(seen.lock().unwrap().as_slice(), &[false, true]);
    }

    #[test]
    fn detached_observer_receives_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(dir.path());

        let seen = Arc::new(AtomicUsize::new(0));
        let seen_by_handler = Arc::clone(&seen);
        let id = store.subscribe(move |_| {
            seen_by_handler.fetch_add(1, Ordering::SeqCst);
        });

        store.login(sample_user(), "T1");
        store.unsubscribe(id);
        store.logout();

        // One delivery on subscribe, one for the login, none after.
        assert_eq!(seen.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn initial_delivery_is_never_older_than_a_completed_notification() {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(store_in(dir.path()));

        // A long-lived observer tracks the newest state delivered so far.
        let delivered = Arc::new(AtomicUsize::new(0));
        let delivered_by_handler = Arc::clone(&delivered);
        store.subscribe(move |snapshot| {
            if let Some(user) = &snapshot.current_user {
                delivered_by_handler.store(user.id.parse().unwrap(), Ordering::SeqCst);
            }
        });

        let writer = {
            let store = Arc::clone(&store);
            std::thread::spawn(move || {
                for version in 1..=200usize {
                    let mut user = sample_user();
                    user.id = version.to_string();
                    store.login(user, "T1");
                }
            })
        };

        // Fresh observers must never see a snapshot older than one the
        // long-lived observer has already been handed.
        let stale = Arc::new(AtomicUsize::new(0));
        for _ in 0..100 {
            let delivered = Arc::clone(&delivered);
            let stale = Arc::clone(&stale);
            let id = store.subscribe(move |snapshot| {
                let version = snapshot
                    .current_user
                    .as_ref()
                    .map_or(0, |user| user.id.parse().unwrap());
                if version < delivered.load(Ordering::SeqCst) {
                    stale.fetch_add(1, Ordering::SeqCst);
                }
            });
            store.unsubscribe(id);
        }

        writer.join().unwrap();
        assert_eq!(stale.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn logout_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(dir.path());
        store.logout();
        store.logout();
        assert!(!store.snapshot().is_authenticated);
    }

    #[test]
    fn snapshot_is_a_copy_not_a_live_view() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(dir.path());
        store.login(sample_user(), "T1");

        let before = store.snapshot();
        store.logout();
        assert!(before.is_authenticated);
        assert!(!store.snapshot().is_authenticated);
    }

    #[test]
    fn debug_never_prints_the_token() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(dir.path());
        store.login(sample_user(), "very-secret-token");
        let debug = format!("{:?}", store);
        assert!(!debug.contains("very-secret-token"));
    }
}
