//! Identity collaborator port

use async_trait::async_trait;

use crate::domain::BookingResult;

/// Outcome of an identity verification call.
#[derive(Debug, Clone)]
pub struct IdentityCheck {
    pub is_valid: bool,
    pub role: String,
}

impl IdentityCheck {
    /// Reservations require a valid identity holding the customer capability.
    pub fn is_eligible_customer(&self) -> bool {
        self.is_valid && self.role == "customer"
    }
}

/// Confirms that a requester exists, is active and holds a valid driving
/// credential with the "customer" role.
///
/// Implementations signal `RequesterIneligible` for invalid identities and
/// `UpstreamUnavailable` when the user service cannot be reached; both are
/// fatal to a reservation attempt.
#[async_trait]
pub trait IdentityVerifier: Send + Sync {
    async fn verify_requester(&self, user_id: &str) -> BookingResult<IdentityCheck>;
}
