//! Store route handlers.
//!
//! The purchase flow is session-driven: the visitor's tier, plan selection
//! and pending purchase intent live in the session, and every handler
//! resolves the catalog from a fresh settings snapshot so admin edits show
//! up on the next request. When the admin has disabled purchases, every
//! purchase-flow handler short-circuits with the locked notice.

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::instrument;

use studykart_core::{ChannelId, PackageId, PlanId, Rupees, Tier, UserId};

use crate::error::{self, AppError, Result};
use crate::models::catalog::{CreditPackage, SubscriptionPlan, SupportChannel};
use crate::models::session::keys;
use crate::services::catalog::{Catalog, OpenCatalog, TierFeature, tier_features};
use crate::services::intent::{PurchaseIntent, PurchaseItem};
use crate::services::routing::{RankedChannel, rank_channels};
use crate::state::AppState;

/// Placeholder plan label shown before any plan exists or is selected.
const SELECT_PLAN_LABEL: &str = "Select Plan";

// =============================================================================
// View Types
// =============================================================================

/// Purchase screen data for the UI.
#[derive(Debug, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum StoreView {
    /// Purchases are administratively disabled.
    Locked { message: String },
    /// The store is open; full screen data follows.
    Open(StoreScreen),
}

/// The open store screen: tier, features, plans and packages.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreScreen {
    pub tier: Tier,
    pub features: Vec<TierFeature>,
    pub plans: Vec<PlanView>,
    pub selected_plan_id: Option<PlanId>,
    /// Selected plan name, or the "Select Plan" placeholder.
    pub plan_label: String,
    /// Active price for the selection; zero when nothing is selected.
    pub current_price: Rupees,
    pub original_price: Option<Rupees>,
    pub packages: Vec<CreditPackage>,
}

/// Per-plan display data with the active tier's prices applied.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanView {
    pub id: PlanId,
    pub name: String,
    pub duration: String,
    pub price: Rupees,
    pub original_price: Option<Rupees>,
    pub popular: bool,
    pub selected: bool,
}

impl PlanView {
    fn new(plan: &SubscriptionPlan, tier: Tier, selected: bool) -> Self {
        Self {
            id: plan.id.clone(),
            name: plan.name.clone(),
            duration: plan.duration.clone(),
            price: plan.price(tier),
            original_price: plan.original_price(tier),
            popular: plan.popular.unwrap_or(false),
            selected,
        }
    }
}

/// Ranked channels returned when a purchase intent opens the picker.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelPicker {
    pub channels: Vec<RankedChannel>,
}

/// Command handed back to the host environment on dispatch.
///
/// The host opens the URL in a new top-level navigation context; the
/// storefront performs no navigation itself.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DispatchCommand {
    pub open_url: String,
}

// =============================================================================
// Request Types
// =============================================================================

/// Tier switch request body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetTierRequest {
    pub tier: Tier,
}

/// Plan selection request body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectPlanRequest {
    pub plan_id: PlanId,
}

/// Credit top-up purchase request body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchasePackageRequest {
    pub package_id: PackageId,
}

/// Dispatch request body. The host app supplies the purchasing user's ID;
/// authentication is its concern, not the storefront's.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DispatchRequest {
    pub channel_id: ChannelId,
    pub user_id: UserId,
}

// =============================================================================
// Session Helpers
// =============================================================================

/// Get the visitor's active tier, defaulting to Ultra.
async fn current_tier(session: &Session) -> Tier {
    session
        .get::<Tier>(keys::TIER)
        .await
        .ok()
        .flatten()
        .unwrap_or_default()
}

/// Resolve the effective plan selection.
///
/// An explicit session choice wins while it still exists in the catalog; a
/// selection orphaned by a catalog change is dropped and the default plan
/// rule applies again.
async fn effective_plan<'a>(
    catalog: &'a OpenCatalog,
    session: &Session,
) -> Option<&'a SubscriptionPlan> {
    let explicit = session
        .get::<PlanId>(keys::SELECTED_PLAN)
        .await
        .ok()
        .flatten();

    explicit
        .and_then(|id| catalog.plan(&id))
        .or_else(|| catalog.default_plan())
}

/// Get the pending purchase intent, if any.
async fn pending_intent(session: &Session) -> Option<PurchaseIntent> {
    session
        .get::<PurchaseIntent>(keys::PENDING_INTENT)
        .await
        .ok()
        .flatten()
}

// =============================================================================
// Catalog Helpers
// =============================================================================

/// One settings evaluation: the resolved catalog plus the configured
/// support channels, all from a single snapshot.
async fn evaluate(state: &AppState) -> Result<(Catalog, Vec<SupportChannel>)> {
    let settings = state.settings().snapshot().await?;
    let catalog = Catalog::resolve(settings.as_ref());
    let channels = settings
        .and_then(|settings| settings.payment_numbers)
        .unwrap_or_default();

    Ok((catalog, channels))
}

/// Unwrap an open catalog or fail with the locked notice.
fn require_open(catalog: Catalog) -> Result<OpenCatalog> {
    match catalog {
        Catalog::Locked { message } => Err(AppError::StoreLocked(message)),
        Catalog::Open(open) => Ok(open),
    }
}

/// Assemble the full screen view for the current session state.
async fn build_screen(catalog: &OpenCatalog, session: &Session) -> StoreScreen {
    let tier = current_tier(session).await;
    let selected = effective_plan(catalog, session).await;

    let plans = catalog
        .plans
        .iter()
        .map(|plan| {
            let is_selected = selected.is_some_and(|s| s.id == plan.id);
            PlanView::new(plan, tier, is_selected)
        })
        .collect();

    StoreScreen {
        tier,
        features: tier_features(tier).to_vec(),
        plans,
        selected_plan_id: selected.map(|plan| plan.id.clone()),
        plan_label: selected.map_or_else(|| SELECT_PLAN_LABEL.to_string(), |plan| plan.name.clone()),
        current_price: selected.map_or(Rupees::ZERO, |plan| plan.price(tier)),
        original_price: selected.and_then(|plan| plan.original_price(tier)),
        packages: catalog.packages.clone(),
    }
}

// =============================================================================
// Handlers
// =============================================================================

/// Display the purchase screen data.
///
/// Unlike the purchase actions this never fails on a locked store; the
/// locked notice is itself the screen.
#[instrument(skip(state, session))]
pub async fn show(State(state): State<AppState>, session: Session) -> Result<Response> {
    let (catalog, _) = evaluate(&state).await?;

    let view = match catalog {
        Catalog::Locked { message } => StoreView::Locked { message },
        Catalog::Open(catalog) => StoreView::Open(build_screen(&catalog, &session).await),
    };

    Ok(Json(view).into_response())
}

/// Switch the active pricing tier.
#[instrument(skip(state, session))]
pub async fn set_tier(
    State(state): State<AppState>,
    session: Session,
    Json(request): Json<SetTierRequest>,
) -> Result<Response> {
    let (catalog, _) = evaluate(&state).await?;
    let catalog = require_open(catalog)?;

    session.insert(keys::TIER, request.tier).await?;

    Ok(Json(build_screen(&catalog, &session).await).into_response())
}

/// Select a subscription duration.
#[instrument(skip(state, session))]
pub async fn select_plan(
    State(state): State<AppState>,
    session: Session,
    Json(request): Json<SelectPlanRequest>,
) -> Result<Response> {
    let (catalog, _) = evaluate(&state).await?;
    let catalog = require_open(catalog)?;

    if catalog.plan(&request.plan_id).is_none() {
        return Err(AppError::NotFound(format!("plan {}", request.plan_id)));
    }

    session.insert(keys::SELECTED_PLAN, &request.plan_id).await?;

    Ok(Json(build_screen(&catalog, &session).await).into_response())
}

/// Start a purchase of the currently selected plan.
///
/// With no plan available the action is suppressed entirely rather than
/// failed; the screen simply has nothing to buy.
#[instrument(skip(state, session))]
pub async fn purchase_plan(State(state): State<AppState>, session: Session) -> Result<Response> {
    let (catalog, channels) = evaluate(&state).await?;
    let catalog = require_open(catalog)?;

    let tier = current_tier(&session).await;
    let Some(plan) = effective_plan(&catalog, &session).await else {
        return Ok(StatusCode::NO_CONTENT.into_response());
    };

    let intent = PurchaseIntent::new(PurchaseItem::Subscription(plan.clone()), tier);
    session.insert(keys::PENDING_INTENT, &intent).await?;

    Ok(Json(ChannelPicker {
        channels: rank_channels(&channels),
    })
    .into_response())
}

/// Start a credit top-up purchase.
#[instrument(skip(state, session))]
pub async fn purchase_package(
    State(state): State<AppState>,
    session: Session,
    Json(request): Json<PurchasePackageRequest>,
) -> Result<Response> {
    let (catalog, channels) = evaluate(&state).await?;
    let catalog = require_open(catalog)?;

    let Some(package) = catalog.package(&request.package_id) else {
        return Err(AppError::NotFound(format!(
            "package {}",
            request.package_id
        )));
    };

    let tier = current_tier(&session).await;
    let intent = PurchaseIntent::new(PurchaseItem::CreditPackage(package.clone()), tier);
    session.insert(keys::PENDING_INTENT, &intent).await?;

    Ok(Json(ChannelPicker {
        channels: rank_channels(&channels),
    })
    .into_response())
}

/// Ranked support channels for the picker.
#[instrument(skip(state))]
pub async fn channels(State(state): State<AppState>) -> Result<Response> {
    let (catalog, channels) = evaluate(&state).await?;
    require_open(catalog)?;

    Ok(Json(ChannelPicker {
        channels: rank_channels(&channels),
    })
    .into_response())
}

/// Hand the pending purchase intent to the chosen support channel.
///
/// Responds with the WhatsApp deep link the host should open, and discards
/// the intent; this is the terminal state of one purchase flow. Dispatching
/// with nothing pending is a silent no-op.
#[instrument(skip(state, session))]
pub async fn dispatch(
    State(state): State<AppState>,
    session: Session,
    Json(request): Json<DispatchRequest>,
) -> Result<Response> {
    let (catalog, channels) = evaluate(&state).await?;
    require_open(catalog)?;

    let Some(intent) = pending_intent(&session).await else {
        return Ok(StatusCode::NO_CONTENT.into_response());
    };

    let ranked = rank_channels(&channels);
    let Some(channel) = ranked
        .iter()
        .map(|entry| &entry.channel)
        .find(|channel| channel.id == request.channel_id)
    else {
        return Err(AppError::NotFound(format!(
            "channel {}",
            request.channel_id
        )));
    };

    error::set_sentry_user(&request.user_id);

    let open_url = intent.dispatch_url(&request.user_id, channel);
    session
        .remove::<PurchaseIntent>(keys::PENDING_INTENT)
        .await?;

    tracing::info!(channel = %channel.id, "purchase intent dispatched");

    Ok(Json(DispatchCommand { open_url }).into_response())
}

/// Discard the pending purchase intent (picker cancelled).
#[instrument(skip(session))]
pub async fn cancel(session: Session) -> Result<Response> {
    session
        .remove::<PurchaseIntent>(keys::PENDING_INTENT)
        .await?;

    Ok(StatusCode::NO_CONTENT.into_response())
}
