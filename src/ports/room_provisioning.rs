//! Room provisioning port.

use async_trait::async_trait;

use crate::domain::foundation::DomainError;

/// External meeting-room provider.
///
/// Calls are bounded, cancellable I/O with no automatic retry: a
/// provisioning failure surfaces as a server error to the caller.
#[async_trait]
pub trait RoomProvisioningClient: Send + Sync {
    /// Issue a signed join URL for a room.
    ///
    /// # Errors
    ///
    /// - `ProvisioningError` if the provider rejects or is unreachable
    async fn create_join_url(
        &self,
        room_id: &str,
        display_name: &str,
        is_presenter: bool,
    ) -> Result<String, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn room_provisioning_client_is_object_safe() {
        fn _accepts_dyn(_client: &dyn RoomProvisioningClient) {}
    }
}
