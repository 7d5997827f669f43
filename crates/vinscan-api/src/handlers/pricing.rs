//! Pricing page

use super::parse_param;
use crate::error::ApiResult;
use axum::{extract::Query, response::Json};
use serde::{Deserialize, Serialize};
use vinscan_core::fixtures::{pricing_faq, pricing_plans};
use vinscan_core::navigation::{Navigation, Route};
use vinscan_core::pricing::{BillingCycle, FaqEntry, PlanQuote, TRIAL_DAYS, quote_plans};

/// Query parameters for the pricing page
#[derive(Debug, Default, Deserialize)]
pub struct PricingParams {
    /// `monthly` or `annual`
    pub billing: Option<String>,
}

/// Pricing payload
#[derive(Debug, Clone, Serialize)]
pub struct PricingPage {
    /// Header
    pub navigation: Navigation,
    /// Selected billing cycle
    pub billing: BillingCycle,
    /// Free trial length
    pub trial_days: u32,
    /// Plans priced for the cycle
    pub plans: Vec<PlanQuote>,
    /// Questions and answers
    pub faq: Vec<FaqEntry>,
}

/// `GET /pricing`
pub async fn pricing(Query(params): Query<PricingParams>) -> ApiResult<PricingPage> {
    let billing = parse_param::<BillingCycle>(params.billing.as_deref())?.unwrap_or_default();

    Ok(Json(PricingPage {
        navigation: Navigation::for_route(Route::Pricing),
        billing,
        trial_days: TRIAL_DAYS,
        plans: quote_plans(pricing_plans(), billing),
        faq: pricing_faq(),
    }))
}
