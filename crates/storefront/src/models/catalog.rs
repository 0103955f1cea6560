//! Catalog domain types.
//!
//! These mirror the shape of the externally managed store settings: the
//! admin panel publishes a camelCase JSON document with subscription plans,
//! credit packages and support channels, and this module deserializes it.
//! The storefront never mutates catalog data; every entity is a read-only
//! view of what the admin published.

use serde::{Deserialize, Serialize};

use studykart_core::{ChannelId, PackageId, PlanId, Rupees, Tier};

/// A purchasable subscription duration with tier-split pricing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionPlan {
    pub id: PlanId,
    pub name: String,
    /// Duration label shown under the plan name (e.g. "30 days").
    pub duration: String,
    pub basic_price: Rupees,
    pub ultra_price: Rupees,
    /// Struck-through price for the Basic tier. Display only, not enforced
    /// against the current price.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub basic_original_price: Option<Rupees>,
    /// Struck-through price for the Ultra tier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ultra_original_price: Option<Rupees>,
    /// Marks the plan with a "Popular" badge.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub popular: Option<bool>,
}

impl SubscriptionPlan {
    /// Price charged for this plan at the given tier.
    #[must_use]
    pub const fn price(&self, tier: Tier) -> Rupees {
        match tier {
            Tier::Basic => self.basic_price,
            Tier::Ultra => self.ultra_price,
        }
    }

    /// Struck-through price for the given tier, if the admin set one.
    #[must_use]
    pub const fn original_price(&self, tier: Tier) -> Option<Rupees> {
        match tier {
            Tier::Basic => self.basic_original_price,
            Tier::Ultra => self.ultra_original_price,
        }
    }
}

/// A one-time credit top-up offer with flat pricing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreditPackage {
    pub id: PackageId,
    pub name: String,
    pub credits: u32,
    pub price: Rupees,
}

/// A human-staffed contact destination for completing purchases.
///
/// `daily_clicks` is a recent-activity counter updated out of band by the
/// admin panel; the storefront only reads it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupportChannel {
    pub id: ChannelId,
    pub name: String,
    /// Local phone number; the country prefix is added at dispatch time.
    pub number: String,
    #[serde(default)]
    pub daily_clicks: u64,
}

/// Store settings published by the admin panel.
///
/// Every field is optional; absent fields fall back to built-in defaults
/// when the catalog is resolved.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemSettings {
    /// Purchases are enabled unless this is explicitly `false`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_payment_enabled: Option<bool>,
    /// Custom notice shown when purchases are disabled.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_disabled_message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub packages: Option<Vec<CreditPackage>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subscription_plans: Option<Vec<SubscriptionPlan>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_numbers: Option<Vec<SupportChannel>>,
}
