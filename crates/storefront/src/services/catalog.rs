//! Catalog resolution.
//!
//! Merges the externally published store settings with built-in fallback
//! defaults and derives everything the purchase screen renders: credit
//! packages, subscription plans, the default plan selection, and the
//! tier feature table. When the admin has disabled purchases the whole
//! catalog collapses to a locked notice and nothing else is derived.

use serde::Serialize;

use studykart_core::{PackageId, PlanId, Rupees, Tier};

use crate::models::catalog::{CreditPackage, SubscriptionPlan, SystemSettings};

/// Default notice shown when the admin has disabled purchases.
pub const DEFAULT_LOCKED_MESSAGE: &str =
    "Purchases are currently disabled by the Admin. Please check back later.";

/// Built-in credit packages used when the admin has not published any,
/// as (id, credits) pairs. Prices follow a flat rate of ten credits per
/// rupee.
const DEFAULT_PACKAGES: &[(&str, u32)] = &[
    ("pkg-1", 100),
    ("pkg-2", 200),
    ("pkg-3", 500),
    ("pkg-4", 1000),
    ("pkg-5", 2000),
    ("pkg-6", 5000),
    ("pkg-7", 10_000),
];

/// Credits bought per rupee in the default package list.
const CREDITS_PER_RUPEE: u32 = 10;

/// The fixed default package list.
fn default_packages() -> Vec<CreditPackage> {
    DEFAULT_PACKAGES
        .iter()
        .map(|&(id, credits)| CreditPackage {
            id: PackageId::new(id),
            name: format!("{credits} Credits"),
            credits,
            price: Rupees::from_whole(i64::from(credits / CREDITS_PER_RUPEE)),
        })
        .collect()
}

/// Result of resolving the store catalog for one evaluation.
#[derive(Debug, Clone)]
pub enum Catalog {
    /// Purchases are administratively disabled; only the notice is shown.
    Locked { message: String },
    /// The store is open for purchases.
    Open(OpenCatalog),
}

/// The purchasable catalog: credit packages plus subscription plans.
#[derive(Debug, Clone)]
pub struct OpenCatalog {
    pub packages: Vec<CreditPackage>,
    pub plans: Vec<SubscriptionPlan>,
}

impl Catalog {
    /// Resolve the catalog from an optional settings snapshot.
    ///
    /// An absent or empty package list falls back to the built-in defaults.
    /// An absent plan list resolves to an empty duration selector; there
    /// are no fallback plans.
    #[must_use]
    pub fn resolve(settings: Option<&SystemSettings>) -> Self {
        if let Some(settings) = settings {
            // Purchases stay enabled unless the flag is explicitly false.
            if settings.is_payment_enabled == Some(false) {
                let message = settings
                    .payment_disabled_message
                    .clone()
                    .unwrap_or_else(|| DEFAULT_LOCKED_MESSAGE.to_string());
                return Self::Locked { message };
            }
        }

        let packages = settings
            .and_then(|s| s.packages.as_ref())
            .filter(|packages| !packages.is_empty())
            .cloned()
            .unwrap_or_else(default_packages);

        let plans = settings
            .and_then(|s| s.subscription_plans.clone())
            .unwrap_or_default();

        Self::Open(OpenCatalog { packages, plans })
    }
}

impl OpenCatalog {
    /// The plan preselected when the screen first loads: the first plan
    /// whose name contains "Monthly", falling back to the first plan in
    /// list order. An explicit user selection overrides this.
    #[must_use]
    pub fn default_plan(&self) -> Option<&SubscriptionPlan> {
        self.plans
            .iter()
            .find(|plan| plan.name.contains("Monthly"))
            .or_else(|| self.plans.first())
    }

    /// Look up a plan by ID.
    #[must_use]
    pub fn plan(&self, id: &PlanId) -> Option<&SubscriptionPlan> {
        self.plans.iter().find(|plan| &plan.id == id)
    }

    /// Look up a credit package by ID.
    #[must_use]
    pub fn package(&self, id: &PackageId) -> Option<&CreditPackage> {
        self.packages.iter().find(|package| &package.id == id)
    }
}

/// One entry in the tier feature table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TierFeature {
    pub label: &'static str,
    pub unlocked: bool,
}

const BASIC_FEATURES: &[TierFeature] = &[
    TierFeature { label: "All MCQs Unlocked", unlocked: true },
    TierFeature { label: "Standard Notes Access", unlocked: true },
    TierFeature { label: "Daily 5 Spin Limit", unlocked: true },
    TierFeature { label: "Basic AI Chat Access", unlocked: true },
    TierFeature { label: "Video Lectures (Locked)", unlocked: false },
    TierFeature { label: "Offline Downloads (Locked)", unlocked: false },
    TierFeature { label: "Competition Mode (Locked)", unlocked: false },
];

const ULTRA_FEATURES: &[TierFeature] = &[
    TierFeature { label: "All MCQs Unlocked", unlocked: true },
    TierFeature { label: "Premium Deep-Dive Notes", unlocked: true },
    TierFeature { label: "Full Video Lectures", unlocked: true },
    TierFeature { label: "Offline Downloads", unlocked: true },
    TierFeature { label: "10 Daily Spins", unlocked: true },
    TierFeature { label: "Priority AI Support", unlocked: true },
    TierFeature { label: "Competition Mode Access", unlocked: true },
    TierFeature { label: "Ad-Free Experience", unlocked: true },
];

/// The capability list shown for a tier.
///
/// A compile-time table, not configuration. The terse entitlement summary
/// used in outbound support messages is maintained separately as deliberate
/// short copy.
#[must_use]
pub const fn tier_features(tier: Tier) -> &'static [TierFeature] {
    match tier {
        Tier::Basic => BASIC_FEATURES,
        Tier::Ultra => ULTRA_FEATURES,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn open(catalog: Catalog) -> OpenCatalog {
        match catalog {
            Catalog::Open(open) => open,
            Catalog::Locked { message } => panic!("expected open catalog, got locked: {message}"),
        }
    }

    fn plan(id: &str, name: &str) -> SubscriptionPlan {
        SubscriptionPlan {
            id: PlanId::new(id),
            name: name.to_string(),
            duration: "30 days".to_string(),
            basic_price: Rupees::from_whole(99),
            ultra_price: Rupees::from_whole(199),
            basic_original_price: None,
            ultra_original_price: None,
            popular: None,
        }
    }

    #[test]
    fn test_default_catalog_without_settings() {
        let catalog = open(Catalog::resolve(None));

        assert_eq!(catalog.packages.len(), 7);
        assert!(catalog.plans.is_empty());

        for package in &catalog.packages {
            assert_eq!(
                package.price,
                Rupees::from_whole(i64::from(package.credits / 10)),
            );
        }

        let first = catalog.packages.first().unwrap();
        assert_eq!(first.credits, 100);
        assert_eq!(first.price, Rupees::from_whole(10));
        assert_eq!(first.name, "100 Credits");

        let last = catalog.packages.last().unwrap();
        assert_eq!(last.credits, 10_000);
        assert_eq!(last.price, Rupees::from_whole(1000));
    }

    #[test]
    fn test_empty_package_list_falls_back_to_defaults() {
        let settings = SystemSettings {
            packages: Some(Vec::new()),
            ..SystemSettings::default()
        };

        let catalog = open(Catalog::resolve(Some(&settings)));
        assert_eq!(catalog.packages.len(), 7);
    }

    #[test]
    fn test_published_packages_win_over_defaults() {
        let settings = SystemSettings {
            packages: Some(vec![CreditPackage {
                id: PackageId::new("festive"),
                name: "Festive 300".to_string(),
                credits: 300,
                price: Rupees::from_whole(25),
            }]),
            ..SystemSettings::default()
        };

        let catalog = open(Catalog::resolve(Some(&settings)));
        assert_eq!(catalog.packages.len(), 1);
        assert_eq!(catalog.packages.first().unwrap().name, "Festive 300");
    }

    #[test]
    fn test_locked_store_uses_default_message() {
        let settings = SystemSettings {
            is_payment_enabled: Some(false),
            ..SystemSettings::default()
        };

        match Catalog::resolve(Some(&settings)) {
            Catalog::Locked { message } => assert_eq!(message, DEFAULT_LOCKED_MESSAGE),
            Catalog::Open(_) => panic!("expected locked catalog"),
        }
    }

    #[test]
    fn test_locked_store_uses_custom_message() {
        let settings = SystemSettings {
            is_payment_enabled: Some(false),
            payment_disabled_message: Some("Back after maintenance.".to_string()),
            ..SystemSettings::default()
        };

        match Catalog::resolve(Some(&settings)) {
            Catalog::Locked { message } => assert_eq!(message, "Back after maintenance."),
            Catalog::Open(_) => panic!("expected locked catalog"),
        }
    }

    #[test]
    fn test_absent_payment_flag_keeps_store_open() {
        let settings = SystemSettings::default();
        assert!(matches!(Catalog::resolve(Some(&settings)), Catalog::Open(_)));
    }

    #[test]
    fn test_default_plan_prefers_monthly() {
        let catalog = OpenCatalog {
            packages: Vec::new(),
            plans: vec![plan("a", "Yearly"), plan("b", "Monthly Special")],
        };

        assert_eq!(catalog.default_plan().unwrap().id, PlanId::new("b"));
    }

    #[test]
    fn test_default_plan_falls_back_to_first() {
        let catalog = OpenCatalog {
            packages: Vec::new(),
            plans: vec![plan("a", "Yearly"), plan("c", "Weekly")],
        };

        assert_eq!(catalog.default_plan().unwrap().id, PlanId::new("a"));
    }

    #[test]
    fn test_default_plan_with_no_plans() {
        let catalog = OpenCatalog {
            packages: Vec::new(),
            plans: Vec::new(),
        };

        assert!(catalog.default_plan().is_none());
    }

    #[test]
    fn test_tier_feature_table_shape() {
        let basic = tier_features(Tier::Basic);
        assert_eq!(basic.iter().filter(|f| f.unlocked).count(), 4);
        assert_eq!(basic.iter().filter(|f| !f.unlocked).count(), 3);

        let ultra = tier_features(Tier::Ultra);
        assert_eq!(ultra.len(), 8);
        assert!(ultra.iter().all(|f| f.unlocked));
    }
}
