//! Viewer presence registry.
//!
//! Tracks which `(role, user)` identities currently hold a websocket
//! connection. Presence is ephemeral by contract: it lives only in process
//! memory and resets on restart.

use std::collections::HashMap;

use tokio::sync::RwLock;

use crate::domain::foundation::{Role, UserId};

use super::rooms::ClientId;

/// Process-wide map of connected users.
///
/// A user opening a second connection replaces the first entry; the
/// registry answers "is this user connected", not "how many tabs".
#[derive(Default)]
pub struct PresenceRegistry {
    online: RwLock<HashMap<(Role, UserId), ClientId>>,
}

impl PresenceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a connection. Returns the client id it replaced, if any,
    /// so the caller can close the stale socket.
    pub async fn connect(&self, role: Role, user_id: UserId, client_id: ClientId) -> Option<ClientId> {
        self.online
            .write()
            .await
            .insert((role, user_id), client_id)
    }

    /// Remove a connection. Only removes the entry if it still belongs to
    /// this client; a newer connection for the same user is kept.
    pub async fn disconnect(&self, role: Role, user_id: &UserId, client_id: &ClientId) {
        let mut online = self.online.write().await;
        if online.get(&(role, user_id.clone())) == Some(client_id) {
            online.remove(&(role, user_id.clone()));
        }
    }

    pub async fn is_online(&self, role: Role, user_id: &UserId) -> bool {
        self.online
            .read()
            .await
            .contains_key(&(role, user_id.clone()))
    }

    pub async fn online_count(&self) -> usize {
        self.online.read().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: &str) -> UserId {
        UserId::new(id).unwrap()
    }

    #[tokio::test]
    async fn connect_then_disconnect_round_trip() {
        let registry = PresenceRegistry::new();
        let client = ClientId::new();

        registry
            .connect(Role::Student, user("student-1"), client)
            .await;
        assert!(registry.is_online(Role::Student, &user("student-1")).await);

        registry
            .disconnect(Role::Student, &user("student-1"), &client)
            .await;
        assert!(!registry.is_online(Role::Student, &user("student-1")).await);
    }

    #[tokio::test]
    async fn reconnect_replaces_previous_client() {
        let registry = PresenceRegistry::new();
        let first = ClientId::new();
        let second = ClientId::new();

        registry
            .connect(Role::Teacher, user("teacher-1"), first)
            .await;
        let replaced = registry
            .connect(Role::Teacher, user("teacher-1"), second)
            .await;
        assert_eq!(replaced, Some(first));

        // The stale connection's cleanup must not evict the new one.
        registry
            .disconnect(Role::Teacher, &user("teacher-1"), &first)
            .await;
        assert!(registry.is_online(Role::Teacher, &user("teacher-1")).await);
    }

    #[tokio::test]
    async fn same_user_id_is_tracked_per_role() {
        let registry = PresenceRegistry::new();
        registry
            .connect(Role::Teacher, user("u1"), ClientId::new())
            .await;

        assert!(registry.is_online(Role::Teacher, &user("u1")).await);
        assert!(!registry.is_online(Role::Student, &user("u1")).await);
        assert_eq!(registry.online_count().await, 1);
    }
}
