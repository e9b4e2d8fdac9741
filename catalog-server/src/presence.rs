//! Presence registry
//!
//! Process-wide map of which realtime connection currently speaks for which
//! user. A user has at most one live connection; registering again replaces
//! the previous one. Disconnecting a connection only clears the user entry
//! when that connection still owns it.

use dashmap::DashMap;

#[derive(Debug, Default)]
pub struct PresenceRegistry {
    /// user id → connection id
    by_user: DashMap<String, String>,
    /// connection id → user id
    by_conn: DashMap<String, String>,
}

impl PresenceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `user_id` to `conn_id`, returning the connection it replaced
    pub fn register(&self, user_id: &str, conn_id: &str) -> Option<String> {
        // a connection re-registering as someone else drops its old binding
        if let Some((_, old_user)) = self.by_conn.remove(conn_id)
            && old_user != user_id
        {
            self.by_user.remove_if(&old_user, |_, c| c == conn_id);
        }

        let previous = self
            .by_user
            .insert(user_id.to_string(), conn_id.to_string())
            .filter(|prev| prev != conn_id);
        if let Some(prev) = &previous {
            self.by_conn.remove(prev);
        }
        self.by_conn.insert(conn_id.to_string(), user_id.to_string());

        tracing::debug!(user_id, conn_id, replaced = ?previous, "Presence registered");
        previous
    }

    /// Forget `conn_id`, returning the user it was bound to
    pub fn disconnect(&self, conn_id: &str) -> Option<String> {
        let (_, user_id) = self.by_conn.remove(conn_id)?;
        self.by_user.remove_if(&user_id, |_, c| c == conn_id);
        tracing::debug!(user_id = %user_id, conn_id, "Presence removed");
        Some(user_id)
    }

    pub fn connection_of(&self, user_id: &str) -> Option<String> {
        self.by_user.get(user_id).map(|c| c.value().clone())
    }

    pub fn is_online(&self, user_id: &str) -> bool {
        self.by_user.contains_key(user_id)
    }

    /// Number of online users
    pub fn len(&self) -> usize {
        self.by_user.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_user.is_empty()
    }
}
