//! Integration tests for the purchase flow.
//!
//! These walk the flow the purchase screen drives: resolve the catalog
//! from a settings document, apply the default plan selection, build a
//! purchase intent, rank the support channels, and render the dispatch
//! deep link - without a running server.

#![allow(clippy::unwrap_used)]

use studykart_core::{Tier, UserId};
use studykart_storefront::models::catalog::SystemSettings;
use studykart_storefront::services::catalog::{Catalog, OpenCatalog};
use studykart_storefront::services::intent::{PurchaseIntent, PurchaseItem};
use studykart_storefront::services::routing::rank_channels;

/// A settings document the admin panel could plausibly publish.
fn published_settings() -> SystemSettings {
    serde_json::from_str(
        r#"{
            "isPaymentEnabled": true,
            "subscriptionPlans": [
                {
                    "id": "plan-y",
                    "name": "Yearly",
                    "duration": "365 days",
                    "basicPrice": 799,
                    "ultraPrice": 1499,
                    "basicOriginalPrice": 999,
                    "ultraOriginalPrice": 1999
                },
                {
                    "id": "plan-m",
                    "name": "Monthly Special",
                    "duration": "30 days",
                    "basicPrice": 99,
                    "ultraPrice": 199,
                    "popular": true
                }
            ],
            "paymentNumbers": [
                {"id": "ch-1", "name": "Priya", "number": "9876543210", "dailyClicks": 10},
                {"id": "ch-2", "name": "Rahul", "number": "9123456780", "dailyClicks": 90}
            ]
        }"#,
    )
    .unwrap()
}

fn open(catalog: Catalog) -> OpenCatalog {
    match catalog {
        Catalog::Open(open) => open,
        Catalog::Locked { message } => panic!("expected open catalog, got locked: {message}"),
    }
}

#[test]
fn subscription_flow_end_to_end() {
    let settings = published_settings();
    let catalog = open(Catalog::resolve(Some(&settings)));

    // First load preselects the plan whose name contains "Monthly"
    let plan = catalog.default_plan().unwrap();
    assert_eq!(plan.id.as_str(), "plan-m");

    // The visitor keeps the default Ultra tier and commits
    let intent = PurchaseIntent::new(PurchaseItem::Subscription(plan.clone()), Tier::default());
    let message = intent.message(&UserId::new("user-7"));
    assert!(message.contains("Item: Monthly Special (ULTRA)"));
    assert!(message.contains("Price: ₹199"));
    assert!(message.contains("User ID: user-7"));
    assert!(message.contains("Details: PDF + Videos + AI Studio"));

    // The picker shows both channels; the visitor picks the quiet one
    let channels = settings.payment_numbers.unwrap();
    let ranked = rank_channels(&channels);
    let quiet = ranked.iter().find(|r| r.traffic_percent < 30).unwrap();
    assert_eq!(quiet.channel.id.as_str(), "ch-1");

    let url = intent.dispatch_url(&UserId::new("user-7"), &quiet.channel);
    assert!(url.starts_with("https://wa.me/919876543210?text="));
}

#[test]
fn package_flow_uses_default_catalog_and_channel() {
    // No settings published at all: built-in packages, synthesized channel
    let catalog = open(Catalog::resolve(None));
    assert!(catalog.plans.is_empty());
    assert!(catalog.default_plan().is_none());

    let package = catalog.packages.first().unwrap();
    let intent = PurchaseIntent::new(PurchaseItem::CreditPackage(package.clone()), Tier::Ultra);

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

    let ranked = rank_channels(&[]);
    let only = ranked.first().unwrap();
    assert_eq!(only.channel.name, "Main Support");

    let url = intent.dispatch_url(&UserId::new("u1"), &only.channel);
    assert!(url.starts_with("https://wa.me/918227070298?text="));
}

#[test]
fn switching_tier_changes_the_quote_without_touching_the_plan() {
    let settings = published_settings();
    let catalog = open(Catalog::resolve(Some(&settings)));
    let plan = catalog.default_plan().unwrap();

    let basic = PurchaseIntent::new(PurchaseItem::Subscription(plan.clone()), Tier::Basic);
    let ultra = PurchaseIntent::new(PurchaseItem::Subscription(plan.clone()), Tier::Ultra);

    assert!(basic.message(&UserId::new("u1")).contains("Price: ₹99"));
    assert!(ultra.message(&UserId::new("u1")).contains("Price: ₹199"));

    // The catalog entry itself is untouched by quoting
    assert_eq!(plan.price(Tier::Basic), plan.basic_price);
}

#[test]
fn locked_store_suppresses_the_whole_flow() {
    let settings: SystemSettings =
        serde_json::from_str(r#"{"isPaymentEnabled": false}"#).unwrap();

    match Catalog::resolve(Some(&settings)) {
        Catalog::Locked { message } => assert_eq!(
            message,
            "Purchases are currently disabled by the Admin. Please check back later."
        ),
        Catalog::Open(_) => panic!("expected locked store"),
    }
}
