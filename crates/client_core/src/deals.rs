//! Read-only deal pipeline grouped by stage.

use shared::domain::{ContactId, Deal, DealStage};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageSummary<'a> {
    pub stage: DealStage,
    pub deals: Vec<&'a Deal>,
    pub total_value: u64,
}

impl StageSummary<'_> {
    pub fn count(&self) -> usize {
        self.deals.len()
    }
}

#[derive(Debug, Clone, Default)]
pub struct DealPipeline {
    deals: Vec<Deal>,
}

impl DealPipeline {
    pub fn new(deals: Vec<Deal>) -> Self {
        Self { deals }
    }

    pub fn deals(&self) -> &[Deal] {
        &self.deals
    }

    /// One summary per stage in pipeline order, empty stages included.
    pub fn stages(&self) -> Vec<StageSummary<'_>> {
        DealStage::PIPELINE
            .into_iter()
            .map(|stage| {
                let deals: Vec<&Deal> = self.deals.iter().filter(|d| d.stage == stage).collect();
                let total_value = deals.iter().map(|d| d.value).sum();
                StageSummary {
                    stage,
                    deals,
                    total_value,
                }
            })
            .collect()
    }

    pub fn total_value(&self) -> u64 {
        self.deals.iter().map(|d| d.value).sum()
    }

    /// Value of deals not yet won or lost.
    pub fn open_value(&self) -> u64 {
        self.deals
            .iter()
            .filter(|d| !d.stage.is_closed())
            .map(|d| d.value)
            .sum()
    }

    pub fn deals_for_contact(&self, contact_id: ContactId) -> Vec<&Deal> {
        self.deals
            .iter()
            .filter(|d| d.contact_id == contact_id)
            .collect()
    }
}
