//! Holds the current user and publishes changes to subscribers.

use tokio::sync::watch;

use crate::{session::KeyValueStore, user::User};

/// The key the current user is saved under.
pub(crate) const CURRENT_USER_KEY: &str = "currentUser";

/// The currently logged in user, or none.
///
/// There is one session per server process. It is the only source of truth
/// for whether someone is logged in. Changes are written through to a
/// [KeyValueStore] so a restart keeps the user logged in.
#[derive(Debug)]
pub struct Session {
    store: Box<dyn KeyValueStore>,
    sender: watch::Sender<Option<User>>,
}

impl Session {
    /// Load the saved user from `store`.
    ///
    /// A missing, unreadable or corrupt record gives an empty session.
    pub fn restore(store: impl KeyValueStore + 'static) -> Self {
        let user = match store.get(CURRENT_USER_KEY) {
            Ok(Some(json)) => match serde_json::from_str::<User>(&json) {
                Ok(user) => {
                    tracing::info!("Restored session for user {}", user.id);
                    Some(user)
                }
                Err(error) => {
                    tracing::warn!("Ignoring corrupt saved session: {error}");
                    None
                }
            },
            Ok(None) => None,
            Err(error) => {
                tracing::warn!("Could not read saved session: {error}");
                None
            }
        };

        let (sender, _) = watch::channel(user);

        Self {
            store: Box::new(store),
            sender,
        }
    }

    /// The logged in user, if any.
    pub fn current(&self) -> Option<User> {
        self.sender.borrow().clone()
    }

    /// Whether a user is logged in.
    pub fn is_logged_in(&self) -> bool {
        self.sender.borrow().is_some()
    }

    /// Save `user` and notify subscribers.
    ///
    /// Subscribers are notified even if the user could not be saved.
    pub fn set_current(&self, user: User) {
        match serde_json::to_string(&user) {
            Ok(json) => {
                if let Err(error) = self.store.set(CURRENT_USER_KEY, &json) {
                    tracing::error!("Could not save session for user {}: {error}", user.id);
                }
            }
            Err(error) => tracing::error!("Could not serialize user {}: {error}", user.id),
        }

        self.sender.send_replace(Some(user));
    }

    /// Forget the current user and notify subscribers.
    pub fn clear(&self) {
        if let Err(error) = self.store.remove(CURRENT_USER_KEY) {
            tracing::error!("Could not remove saved session: {error}");
        }

        self.sender.send_replace(None);
    }

    /// Watch the current user.
    ///
    /// The first call to [SessionSubscriber::next] returns the user at the time
    /// of subscribing, and later calls wait for a change.
    pub fn subscribe(&self) -> SessionSubscriber {
        SessionSubscriber {
            receiver: self.sender.subscribe(),
            primed: false,
        }
    }
}

/// Receives the current user and then each change to it.
///
/// If the user changes several times between calls to [SessionSubscriber::next],
/// only the latest value is seen.
#[derive(Debug)]
pub struct SessionSubscriber {
    receiver: watch::Receiver<Option<User>>,
    primed: bool,
}

impl SessionSubscriber {
    /// Wait for the next value of the session.
    ///
    /// The first call returns the current value straight away. Returns `None`
    /// once the [Session] has been dropped.
    pub async fn next(&mut self) -> Option<Option<User>> {
        if !self.primed {
            self.primed = true;
            return Some(self.receiver.borrow_and_update().clone());
        }

        self.receiver.changed().await.ok()?;

        Some(self.receiver.borrow_and_update().clone())
    }
}
