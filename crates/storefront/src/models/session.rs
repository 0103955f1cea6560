//! Session-related types.
//!
//! The purchase screen keeps its per-visitor selection state in the
//! session: the active pricing tier, the explicitly selected plan, and the
//! pending purchase intent awaiting a channel pick. Each flow instance owns
//! its state exclusively; there is no cross-session sharing.

/// Session keys for purchase flow state.
pub mod keys {
    /// Key for the visitor's active pricing tier.
    pub const TIER: &str = "store.tier";

    /// Key for the explicitly selected subscription plan.
    pub const SELECTED_PLAN: &str = "store.selected_plan";

    /// Key for the purchase intent awaiting channel selection.
    pub const PENDING_INTENT: &str = "store.pending_intent";
}
