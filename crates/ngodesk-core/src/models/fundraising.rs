use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::Record;

categorical! {
    /// Pipeline stage of a fundraising opportunity.
    pub enum OpportunityStage {
        Prospect => "Prospect",
        Drafting => "Drafting",
        Submitted => "Submitted",
        Awarded => "Awarded",
        Declined => "Declined",
    }
}

impl OpportunityStage {
    /// Awarded and declined opportunities are decided and leave the pipeline.
    pub fn is_open(&self) -> bool {
        !matches!(self, OpportunityStage::Awarded | OpportunityStage::Declined)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS))]
#[serde(rename_all = "camelCase")]
pub struct Opportunity {
    pub id: String,
    pub name: String,
    pub funder: String,
    pub stage: OpportunityStage,
    pub amount: f64,
    #[serde(default)]
    pub deadline: Option<NaiveDate>,
    pub region: String,
    pub owner: String,
}

impl Opportunity {
    pub fn is_open(&self) -> bool {
        self.stage.is_open()
    }

    /// Open opportunities whose deadline falls within `days` of `today`.
    pub fn deadline_within(&self, today: NaiveDate, days: i64) -> bool {
        self.is_open()
            && self
                .deadline
                .map(|d| {
                    let left = (d - today).num_days();
                    (0..=days).contains(&left)
                })
                .unwrap_or(false)
    }
}

impl Record for Opportunity {
    fn id(&self) -> &str {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_is_open() {
        assert!(OpportunityStage::Prospect.is_open());
        assert!(OpportunityStage::Submitted.is_open());
        assert!(!OpportunityStage::Awarded.is_open());
        assert!(!OpportunityStage::Declined.is_open());
    }

    #[test]
    fn test_deadline_within() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        let mut opp = Opportunity {
            id: "o-1".to_string(),
            name: "Maternal Health Expansion".to_string(),
            funder: "Gates Foundation".to_string(),
            stage: OpportunityStage::Drafting,
            amount: 500_000.0,
            deadline: NaiveDate::from_ymd_opt(2025, 6, 20),
            region: "West Africa".to_string(),
            owner: "Grace Adeyemi".to_string(),
        };
        assert!(opp.deadline_within(today, 30));
        assert!(!opp.deadline_within(today, 7));

        opp.stage = OpportunityStage::Awarded;
        assert!(!opp.deadline_within(today, 30));
    }
}
