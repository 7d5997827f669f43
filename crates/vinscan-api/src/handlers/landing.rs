//! Landing page

use axum::response::Json;
use serde::Serialize;
use vinscan_core::fixtures::pricing_plans;
use vinscan_core::navigation::{Navigation, PRODUCT_NAME, Route};
use vinscan_core::pricing::{BillingCycle, PlanQuote, TRIAL_DAYS, quote_plans};

/// A link to one of the fixed pages
#[derive(Debug, Clone, Serialize)]
pub struct PageLink {
    /// URL path
    pub path: &'static str,
    /// Page title
    pub title: &'static str,
}

/// Landing page payload
#[derive(Debug, Clone, Serialize)]
pub struct LandingPage {
    /// Header
    pub navigation: Navigation,
    /// Product name
    pub product: &'static str,
    /// Free trial length
    pub trial_days: u32,
    /// Every page the site serves
    pub pages: Vec<PageLink>,
    /// Plans at monthly prices
    pub plans: Vec<PlanQuote>,
}

/// `GET /`
pub async fn landing() -> Json<LandingPage> {
    Json(LandingPage {
        navigation: Navigation::for_route(Route::Home),
        product: PRODUCT_NAME,
        trial_days: TRIAL_DAYS,
        pages: Route::ALL
            .into_iter()
            .map(|route| PageLink {
                path: route.path(),
                title: route.title(),
            })
            .collect(),
        plans: quote_plans(pricing_plans(), BillingCycle::Monthly),
    })
}
