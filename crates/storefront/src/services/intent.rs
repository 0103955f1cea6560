//! Purchase intents and outbound support messages.
//!
//! There is no in-app payment capture: when the user commits to an item the
//! screen builds a purchase intent, the user picks a support channel, and
//! the intent is rendered into a canonical WhatsApp message wrapped in a
//! deep link. Opening the link is the host environment's job; this module
//! only constructs it.

use serde::{Deserialize, Serialize};

use studykart_core::{Rupees, Tier, UserId};

use crate::models::catalog::{CreditPackage, SubscriptionPlan, SupportChannel};

/// Country code prefixed to every stored support number.
const COUNTRY_CODE: &str = "91";

/// The item a purchase intent refers to.
///
/// An explicit tag rather than duck-typing on the presence of a duration
/// field, so the subscription/top-up split is visible in the type system.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PurchaseItem {
    Subscription(SubscriptionPlan),
    CreditPackage(CreditPackage),
}

/// What the user wants to buy, at which tier, pending channel selection.
///
/// Ephemeral: lives in the session between the buy action and the channel
/// pick, and is discarded once dispatched or cancelled. The item is a
/// snapshot; catalog changes after the buy action do not affect it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchaseIntent {
    pub item: PurchaseItem,
    pub tier: Tier,
}

impl PurchaseIntent {
    /// Create an intent for the given item at the given tier.
    #[must_use]
    pub const fn new(item: PurchaseItem, tier: Tier) -> Self {
        Self { item, tier }
    }

    /// Price the support agent should quote.
    #[must_use]
    pub fn price(&self) -> Rupees {
        match &self.item {
            PurchaseItem::Subscription(plan) => plan.price(self.tier),
            PurchaseItem::CreditPackage(package) => package.price,
        }
    }

    /// Terse entitlement summary embedded in the outbound message.
    ///
    /// Deliberately shorter than the on-screen feature table: support staff
    /// only need the headline entitlements.
    #[must_use]
    pub fn summary(&self) -> String {
        match &self.item {
            PurchaseItem::Subscription(_) => match self.tier {
                Tier::Basic => "MCQ + Notes".to_string(),
                Tier::Ultra => "PDF + Videos + AI Studio".to_string(),
            },
            PurchaseItem::CreditPackage(package) => format!("{} Credits", package.credits),
        }
    }

    /// Item line for the outbound message; subscriptions carry the tier.
    fn item_line(&self) -> String {
        match &self.item {
            PurchaseItem::Subscription(plan) => format!("{} ({})", plan.name, self.tier),
            PurchaseItem::CreditPackage(package) => package.name.clone(),
        }
    }

    /// Render the canonical support request message.
    ///
    /// The user ID is embedded verbatim; support staff match it against the
    /// platform's user records.
    #[must_use]
    pub fn message(&self, user_id: &UserId) -> String {
        format!(
            "Hello Admin, I want to buy:\n\n\
             Item: {}\n\
             Price: {}\n\
             User ID: {}\n\
             Details: {}\n\n\
             Please share payment details.",
            self.item_line(),
            self.price(),
            user_id,
            self.summary(),
        )
    }

    /// Build the WhatsApp deep link that hands this intent to a channel.
    #[must_use]
    pub fn dispatch_url(&self, user_id: &UserId, channel: &SupportChannel) -> String {
        let message = self.message(user_id);
        format!(
            "https://wa.me/{COUNTRY_CODE}{}?text={}",
            channel.number,
            urlencoding::encode(&message),
        )
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use studykart_core::{ChannelId, PackageId, PlanId};

    fn package() -> CreditPackage {
        CreditPackage {
            id: PackageId::new("pkg-1"),
            name: "100 Credits".to_string(),
            credits: 100,
            price: Rupees::from_whole(10),
        }
    }

    fn plan() -> SubscriptionPlan {
        SubscriptionPlan {
            id: PlanId::new("plan-m"),
            name: "Monthly".to_string(),
            duration: "30 days".to_string(),
            basic_price: Rupees::from_whole(99),
            ultra_price: Rupees::from_whole(199),
            basic_original_price: None,
            ultra_original_price: None,
            popular: None,
        }
    }

    fn channel() -> SupportChannel {
        SupportChannel {
            id: ChannelId::new("def"),
            name: "Main Support".to_string(),
            number: "8227070298".to_string(),
            daily_clicks: 0,
        }
    }

    #[test]
    fn test_package_message_body() {
        let intent = PurchaseIntent::new(PurchaseItem::CreditPackage(package()), Tier::Ultra);
        let message = intent.message(&UserId::new("u1"));

        assert_eq!(
            message,
            "Hello Admin, I want to buy:\n\n\
             Item: 100 Credits\n\
             Price: ₹10\n\
             User ID: u1\n\
             Details: 100 Credits\n\n\
             Please share payment details."
        );
    }

    #[test]
    fn test_subscription_message_carries_tier() {
        let intent = PurchaseIntent::new(PurchaseItem::Subscription(plan()), Tier::Ultra);
        let message = intent.message(&UserId::new("u42"));

        assert!(message.contains("Item: Monthly (ULTRA)"));
        assert!(message.contains("Price: ₹199"));
        assert!(message.contains("Details: PDF + Videos + AI Studio"));
    }

    #[test]
    fn test_subscription_price_follows_tier() {
        let basic = PurchaseIntent::new(PurchaseItem::Subscription(plan()), Tier::Basic);
        assert_eq!(basic.price(), Rupees::from_whole(99));
        assert_eq!(basic.summary(), "MCQ + Notes");

        let ultra = PurchaseIntent::new(PurchaseItem::Subscription(plan()), Tier::Ultra);
        assert_eq!(ultra.price(), Rupees::from_whole(199));
        assert_eq!(ultra.summary(), "PDF + Videos + AI Studio");
    }

    #[test]
    fn test_package_price_ignores_tier() {
        let basic = PurchaseIntent::new(PurchaseItem::CreditPackage(package()), Tier::Basic);
        let ultra = PurchaseIntent::new(PurchaseItem::CreditPackage(package()), Tier::Ultra);
        assert_eq!(basic.price(), ultra.price());
        assert_eq!(basic.summary(), "100 Credits");
    }

    #[test]
    fn test_dispatch_url_shape() {
        let intent = PurchaseIntent::new(PurchaseItem::CreditPackage(package()), Tier::Ultra);
        let url = intent.dispatch_url(&UserId::new("u1"), &channel());

        assert!(url.starts_with("https://wa.me/918227070298?text="));
        // The message text is percent-encoded
        assert!(url.contains("Hello%20Admin"));
        assert!(url.contains("%0A"));
        assert!(!url.contains('\n'));
    }
}
