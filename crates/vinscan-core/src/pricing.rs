//! Subscription plans and billing-cycle pricing

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Billing cycle toggle on the pricing page
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BillingCycle {
    /// Billed every month
    #[default]
    Monthly,
    /// Billed once a year
    Annual,
}

impl fmt::Display for BillingCycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Monthly => f.write_str("monthly"),
            Self::Annual => f.write_str("annual"),
        }
    }
}

impl FromStr for BillingCycle {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "monthly" | "month" => Ok(Self::Monthly),
            "annual" | "annually" | "yearly" => Ok(Self::Annual),
            _ => Err(crate::Error::InvalidQuery {
                parameter: "billing".to_string(),
                value: s.to_string(),
            }),
        }
    }
}

/// A subscription plan as listed on the pricing page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingPlan {
    /// Plan name
    pub name: String,
    /// One-line pitch
    pub description: String,
    /// Price per month in whole dollars
    pub monthly_price: u32,
    /// Price per year in whole dollars
    pub annual_price: u32,
    /// Highlight badge
    pub badge: Option<String>,
    /// Included features
    pub features: Vec<String>,
    /// Notable restrictions
    pub limitations: Vec<String>,
    /// Call-to-action text
    pub cta: String,
    /// Whether this is the highlighted plan
    pub popular: bool,
}

impl PricingPlan {
    /// Amount charged per billing period
    #[must_use]
    pub const fn price(&self, cycle: BillingCycle) -> u32 {
        match cycle {
            BillingCycle::Monthly => self.monthly_price,
            BillingCycle::Annual => self.annual_price,
        }
    }

    /// Headline per-month figure; annual plans show `annual / 12` rounded
    /// half up
    #[must_use]
    pub fn display_price(&self, cycle: BillingCycle) -> u32 {
        match cycle {
            BillingCycle::Monthly => self.monthly_price,
            BillingCycle::Annual => {
                let per_month = (u64::from(self.annual_price) + 6) / 12;
                u32::try_from(per_month).unwrap_or(u32::MAX)
            }
        }
    }

    /// Whole-percent discount of annual billing versus twelve monthly
    /// payments, `0` when there is no discount
    #[must_use]
    pub fn annual_savings_percent(&self) -> u32 {
        let twelve_months = u64::from(self.monthly_price) * 12;
        if twelve_months == 0 {
            return 0;
        }
        let saved = twelve_months.saturating_sub(u64::from(self.annual_price));
        let percent = (saved * 200 + twelve_months) / (twelve_months * 2);
        u32::try_from(percent).unwrap_or(0)
    }
}

/// Length of the free trial offered on every plan
pub const TRIAL_DAYS: u32 = 14;

/// A question and answer shown under the plans
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaqEntry {
    /// Question
    pub question: String,
    /// Answer
    pub answer: String,
}

/// A plan priced for one billing cycle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanQuote {
    /// The plan
    #[serde(flatten)]
    pub plan: PricingPlan,
    /// Selected cycle
    pub billing: BillingCycle,
    /// Amount charged per period
    pub price: u32,
    /// Per-month headline figure
    pub display_price: u32,
    /// Annual discount in percent
    pub savings_percent: u32,
}

/// Price every plan for `cycle`
#[must_use]
pub fn quote_plans(plans: Vec<PricingPlan>, cycle: BillingCycle) -> Vec<PlanQuote> {
    plans
        .into_iter()
        .map(|plan| PlanQuote {
            billing: cycle,
            price: plan.price(cycle),
            display_price: plan.display_price(cycle),
            savings_percent: plan.annual_savings_percent(),
            plan,
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::missing_panics_doc, clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::fixtures::pricing_plans;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case(0, 79, 790, 66)]
    #[case(1, 199, 1_990, 166)]
    #[case(2, 399, 3_990, 333)]
    fn test_plan_prices(
        #[case] index: usize,
        #[case] monthly: u32,
        #[case] annual: u32,
        #[case] annual_display: u32,
    ) {
        let plan = &pricing_plans()[index];

        assert_eq!(plan.price(BillingCycle::Monthly), monthly);
        assert_eq!(plan.price(BillingCycle::Annual), annual);
        assert_eq!(plan.display_price(BillingCycle::Monthly), monthly);
        assert_eq!(plan.display_price(BillingCycle::Annual), annual_display);
        assert_eq!(plan.annual_savings_percent(), 17);
    }

    #[test]
    fn test_savings_guards() {
        let mut plan = pricing_plans().remove(0);
        plan.monthly_price = 0;
        assert_eq!(plan.annual_savings_percent(), 0);

        plan.monthly_price = 10;
        plan.annual_price = 500;
        assert_eq!(plan.annual_savings_percent(), 0);
    }

    #[test]
    fn test_annual_display_price_at_u32_max() {
        let mut plan = pricing_plans().remove(0);
        plan.annual_price = u32::MAX;

        assert_eq!(plan.display_price(BillingCycle::Annual), 357_913_941);
        assert_eq!(plan.price(BillingCycle::Annual), u32::MAX);
    }

    #[test]
    fn test_billing_cycle_parse() {
        assert_eq!("annual".parse::<BillingCycle>().unwrap(), BillingCycle::Annual);
        assert_eq!("Monthly".parse::<BillingCycle>().unwrap(), BillingCycle::Monthly);
        assert!("weekly".parse::<BillingCycle>().is_err());
    }

    #[test]
    fn test_quote_plans() {
        let quotes = quote_plans(pricing_plans(), BillingCycle::Annual);

        assert_eq!(quotes.len(), 3);
        assert_eq!(quotes[1].price, 1_990);
        assert_eq!(quotes[1].display_price, 166);
        assert_eq!(quotes[1].billing, BillingCycle::Annual);

        let json = serde_json::to_value(&quotes[0]).unwrap();
        assert_eq!(json["name"], "Hero Starter");
        assert_eq!(json["billing"], "annual");
    }
}
