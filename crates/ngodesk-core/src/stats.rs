//! Summary figures shown above the dashboard tables.

use std::collections::BTreeMap;

use crate::models::{
    ComplianceDocument, ComplianceStatus, Employee, ExitRecord, Grant, GrantStatus, Opportunity,
    OpportunityStage,
};

/// Count records per category, ordered by the category's `Ord`.
pub fn tally<'a, T, K, I, F>(records: I, key: F) -> BTreeMap<K, usize>
where
    T: 'a,
    K: Ord,
    I: IntoIterator<Item = &'a T>,
    F: Fn(&T) -> K,
{
    let mut counts = BTreeMap::new();
    for record in records {
        *counts.entry(key(record)).or_insert(0) += 1;
    }
    counts
}

#[derive(Debug, Clone, PartialEq)]
pub struct ComplianceStats {
    pub total: usize,
    pub by_status: BTreeMap<ComplianceStatus, usize>,
    pub reminder_eligible: usize,
}

impl ComplianceStats {
    pub fn from_documents<'a>(docs: impl IntoIterator<Item = &'a ComplianceDocument>) -> Self {
        let docs: Vec<&ComplianceDocument> = docs.into_iter().collect();
        Self {
            total: docs.len(),
            by_status: tally(docs.iter().copied(), |d: &ComplianceDocument| d.status),
            reminder_eligible: docs.iter().filter(|d| d.is_reminder_eligible()).count(),
        }
    }

    pub fn count(&self, status: ComplianceStatus) -> usize {
        self.by_status.get(&status).copied().unwrap_or(0)
    }

    /// Percentage of documents that are compliant; 0 when there are none.
    pub fn compliance_rate(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.count(ComplianceStatus::Compliant) as f64 * 100.0 / self.total as f64
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct GrantTotals {
    pub count: usize,
    pub total_amount: f64,
    pub by_status: BTreeMap<GrantStatus, (usize, f64)>,
}

impl GrantTotals {
    pub fn from_grants<'a>(grants: impl IntoIterator<Item = &'a Grant>) -> Self {
        let mut totals = Self::default();
        for grant in grants {
            totals.count += 1;
            totals.total_amount += grant.amount;
            let entry = totals.by_status.entry(grant.status).or_insert((0, 0.0));
            entry.0 += 1;
            entry.1 += grant.amount;
        }
        totals
    }

    pub fn amount(&self, status: GrantStatus) -> f64 {
        self.by_status.get(&status).map(|(_, a)| *a).unwrap_or(0.0)
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct PipelineStats {
    pub by_stage: BTreeMap<OpportunityStage, f64>,
    pub open_amount: f64,
    pub awarded: usize,
    pub declined: usize,
}

impl PipelineStats {
    pub fn from_opportunities<'a>(opps: impl IntoIterator<Item = &'a Opportunity>) -> Self {
        let mut stats = Self::default();
        for opp in opps {
            *stats.by_stage.entry(opp.stage).or_insert(0.0) += opp.amount;
            if opp.is_open() {
                stats.open_amount += opp.amount;
            }
            match opp.stage {
                OpportunityStage::Awarded => stats.awarded += 1,
                OpportunityStage::Declined => stats.declined += 1,
                _ => {}
            }
        }
        stats
    }

    /// Awarded share of decided opportunities, or None before any decision.
    pub fn win_rate(&self) -> Option<f64> {
        let decided = self.awarded + self.declined;
        (decided > 0).then(|| self.awarded as f64 * 100.0 / decided as f64)
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct HeadcountStats {
    pub by_department: BTreeMap<String, usize>,
    pub by_status: BTreeMap<String, usize>,
    pub exits_by_type: BTreeMap<String, usize>,
}

impl HeadcountStats {
    pub fn new(employees: &[Employee], exits: &[ExitRecord]) -> Self {
        Self {
            by_department: tally(employees, |e: &Employee| e.department.clone()),
            by_status: tally(employees, |e: &Employee| e.status.label().to_string()),
            exits_by_type: tally(exits, |x: &ExitRecord| x.exit_type.label().to_string()),
        }
    }

    pub fn headcount(&self) -> usize {
        self.by_department.values().sum()
    }
}
