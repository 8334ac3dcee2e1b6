// src/session.rs

/// Identity lifecycle of a wallet store.
///
/// An identity change always resets to a provisional account before the
/// persisted snapshot is consulted, so the sequence is Loading first,
/// Ready after the load resolves. Operations that need an identity are
/// no-ops in NoIdentity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WalletSession {
    /// No user is current; the store holds an inert empty account.
    NoIdentity,
    /// An identity just became current; the provisional account stands
    /// until its persisted snapshot is consulted.
    Loading(String),
    /// The identity's account is resolved and mutable.
    Ready(String),
}

impl WalletSession {
    pub fn user_id(&self) -> Option<&str> {
        match self {
            WalletSession::NoIdentity => None,
            WalletSession::Loading(user) | WalletSession::Ready(user) => Some(user),
        }
    }

    pub fn has_identity(&self) -> bool {
        self.user_id().is_some()
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, WalletSession::Loading(_))
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, WalletSession::Ready(_))
    }

    /// Check if this state can transition to another state
    pub fn can_transition_to(&self, target: &WalletSession) -> bool {
        use WalletSession::*;

        match (self, target) {
            // Identity can drop away at any point
            (_, NoIdentity) => true,
            // A load begins whenever a different identity becomes current
            (NoIdentity, Loading(_)) => true,
            (Ready(current), Loading(next)) => current != next,
            (Loading(current), Loading(next)) => current != next,
            // Only the load in flight may complete
            (Loading(loading), Ready(user)) => loading == user,
            // Staying on the same ready identity is a no-op, not a reset
            (Ready(current), Ready(next)) => current == next,
            // Ready requires a load first
            (NoIdentity, Ready(_)) => false,
        }
    }
}
