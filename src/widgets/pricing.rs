use serde::{Deserialize, Serialize};

use crate::error::StateError;
use crate::fixtures::Plan;
use crate::money::Money;
use crate::state::Reducer;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BillingPeriod {
    #[default]
    Monthly,
    Annual,
}

impl BillingPeriod {
    pub fn flipped(self) -> Self {
        match self {
            Self::Monthly => Self::Annual,
            Self::Annual => Self::Monthly,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Monthly => "monthly",
            Self::Annual => "annual",
        }
    }

    /// Suffix shown after the price.
    pub fn unit(self) -> &'static str {
        match self {
            Self::Monthly => "/month",
            Self::Annual => "/year",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PricingTable {
    plans: Vec<Plan>,
    period: BillingPeriod,
    selected: Option<(String, BillingPeriod)>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PricingAction {
    TogglePeriod,
    SetPeriod(BillingPeriod),
    Select(String),
}

impl PricingTable {
    pub fn new(plans: Vec<Plan>, period: BillingPeriod) -> Self {
        Self {
            plans,
            period,
            selected: None,
        }
    }

    pub fn plans(&self) -> &[Plan] {
        &self.plans
    }

    pub fn period(&self) -> BillingPeriod {
        self.period
    }

    /// Plan id and billing period of the last call to action.
    pub fn selected(&self) -> Option<(&str, BillingPeriod)> {
        self.selected.as_ref().map(|(id, p)| (id.as_str(), *p))
    }

    pub fn price(&self, plan: &Plan) -> Money {
        match self.period {
            BillingPeriod::Monthly => plan.monthly,
            BillingPeriod::Annual => plan.annual,
        }
    }

    /// Annual price spread over twelve months; only shown when billed yearly.
    pub fn monthly_equivalent(&self, plan: &Plan) -> Option<Money> {
        match self.period {
            BillingPeriod::Monthly => None,
            BillingPeriod::Annual => Some(Money::cents(
                (plan.annual.as_cents() + 6).div_euclid(12),
            )),
        }
    }
}

/// Whole percent saved by paying yearly instead of twelve monthly payments.
pub fn annual_savings_percent(plan: &Plan) -> i64 {
    let full_year = plan.monthly.as_cents() * 12;
    if full_year == 0 {
        return 0;
    }
    ((full_year - plan.annual.as_cents()) * 100 + full_year / 2) / full_year
}

impl Reducer for PricingTable {
    type Action = PricingAction;

    fn apply(&mut self, action: PricingAction) -> Result<(), StateError> {
        match action {
            PricingAction::TogglePeriod => {
                self.period = self.period.flipped();
                tracing::debug!("Billing period changed to: {}", self.period.as_str());
            }
            PricingAction::SetPeriod(period) => self.period = period,
            PricingAction::Select(id) => {
                let plan = self
                    .plans
                    .iter()
                    .find(|p| p.id == id)
                    .ok_or_else(|| StateError::missing("plan", &id))?;
                tracing::info!("Plan selected: {} ({}) - {}", plan.name, plan.id, self.period.as_str());
                self.selected = Some((id, self.period));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::plans;

    #[test]
    fn test_toggle_switches_displayed_price() {
        let mut table = PricingTable::new(plans(), BillingPeriod::Monthly);
        let pro = table.plans()[1].clone();
        assert_eq!(table.price(&pro), Money::dollars(29));
        assert_eq!(table.monthly_equivalent(&pro), None);

        table.apply(PricingAction::TogglePeriod).unwrap();
        assert_eq!(table.period(), BillingPeriod::Annual);
        assert_eq!(table.price(&pro), Money::dollars(290));
        assert_eq!(table.monthly_equivalent(&pro), Some(Money::cents(2417)));
        assert_eq!(table.period().unit(), "/year");
    }

    #[test]
    fn test_savings_percent() {
        let all = plans();
        // 9 * 12 = 108 vs 90
        assert_eq!(annual_savings_percent(&all[0]), 17);
        assert_eq!(annual_savings_percent(&all[2]), 17);
    }

    #[test]
    fn test_select_records_period() {
        let mut table = PricingTable::new(plans(), BillingPeriod::Annual);
        table.apply(PricingAction::Select("enterprise".into())).unwrap();
        assert_eq!(table.selected(), Some(("enterprise", BillingPeriod::Annual)));
        assert!(table.apply(PricingAction::Select("gold".into())).is_err());
    }
}
