//! The finished, immutable dataset handed to consumers.

use crate::entities::{
    Campaign, CampaignTemplate, ComplianceRecord, DataProcessingSummary, HealthIdentity, Partner,
    TreasuryState, TreasurySnapshot, TreasuryTransaction, VerificationReceipt,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Named collections exposed by a [`Dataset`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Collection {
    Partners,
    Identities,
    Campaigns,
    CampaignTemplates,
    Verifications,
    TreasuryState,
    TreasuryTransactions,
    TreasurySnapshots,
    ComplianceRecords,
    DataProcessingSummaries,
}

impl Collection {
    pub const ALL: &'static [Collection] = &[
        Collection::Partners,
        Collection::Identities,
        Collection::Campaigns,
        Collection::CampaignTemplates,
        Collection::Verifications,
        Collection::TreasuryState,
        Collection::TreasuryTransactions,
        Collection::TreasurySnapshots,
        Collection::ComplianceRecords,
        Collection::DataProcessingSummaries,
    ];

    /// Name used for file stems and log lines.
    pub fn name(&self) -> &'static str {
        match self {
            Collection::Partners => "partners",
            Collection::Identities => "identities",
            Collection::Campaigns => "campaigns",
            Collection::CampaignTemplates => "campaign_templates",
            Collection::Verifications => "verifications",
            Collection::TreasuryState => "treasury_state",
            Collection::TreasuryTransactions => "treasury_transactions",
            Collection::TreasurySnapshots => "treasury_snapshots",
            Collection::ComplianceRecords => "compliance_records",
            Collection::DataProcessingSummaries => "data_processing_summaries",
        }
    }

    /// Whether the collection is a single record rather than a sequence.
    pub fn is_singleton(&self) -> bool {
        matches!(self, Collection::TreasuryState)
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Collection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Collection::ALL
            .iter()
            .copied()
            .find(|c| c.name() == s)
            .ok_or_else(|| format!("unknown collection '{s}'"))
    }
}

/// Owned collections, in the shape generators produce them.
#[derive(Debug, Clone)]
pub struct Collections {
    pub partners: Vec<Partner>,
    pub identities: Vec<HealthIdentity>,
    pub campaigns: Vec<Campaign>,
    pub campaign_templates: Vec<CampaignTemplate>,
    pub verifications: Vec<VerificationReceipt>,
    pub treasury_state: TreasuryState,
    pub treasury_transactions: Vec<TreasuryTransaction>,
    pub treasury_snapshots: Vec<TreasurySnapshot>,
    pub compliance_records: Vec<ComplianceRecord>,
    pub data_processing_summaries: Vec<DataProcessingSummary>,
}

/// Read-only view over every generated collection.
///
/// Built once and never mutated; share it by reference or behind an `Arc`.
#[derive(Debug, Clone)]
pub struct Dataset {
    generated_at: DateTime<Utc>,
    collections: Collections,
    identity_index: HashMap<String, usize>,
}

impl Dataset {
    /// Wrap finished collections. `generated_at` is the reference "now" every
    /// relative date was computed from.
    pub fn new(generated_at: DateTime<Utc>, collections: Collections) -> Self {
        let identity_index = collections
            .identities
            .iter()
            .enumerate()
            .map(|(i, identity)| (identity.id.clone(), i))
            .collect();
        Self {
            generated_at,
            collections,
            identity_index,
        }
    }

    pub fn generated_at(&self) -> DateTime<Utc> {
        self.generated_at
    }

    pub fn partners(&self) -> &[Partner] {
        &self.collections.partners
    }

    pub fn identities(&self) -> &[HealthIdentity] {
        &self.collections.identities
    }

    pub fn campaigns(&self) -> &[Campaign] {
        &self.collections.campaigns
    }

    pub fn campaign_templates(&self) -> &[CampaignTemplate] {
        &self.collections.campaign_templates
    }

    /// Newest first.
    pub fn verifications(&self) -> &[VerificationReceipt] {
        &self.collections.verifications
    }

    pub fn treasury_state(&self) -> &TreasuryState {
        &self.collections.treasury_state
    }

    /// Oldest first.
    pub fn treasury_transactions(&self) -> &[TreasuryTransaction] {
        &self.collections.treasury_transactions
    }

    /// Oldest first.
    pub fn treasury_snapshots(&self) -> &[TreasurySnapshot] {
        &self.collections.treasury_snapshots
    }

    /// Newest first.
    pub fn compliance_records(&self) -> &[ComplianceRecord] {
        &self.collections.compliance_records
    }

    /// Oldest period first.
    pub fn data_processing_summaries(&self) -> &[DataProcessingSummary] {
        &self.collections.data_processing_summaries
    }

    pub fn partner(&self, id: &str) -> Option<&Partner> {
        self.partners().iter().find(|p| p.id == id)
    }

    pub fn campaign(&self, id: &str) -> Option<&Campaign> {
        self.campaigns().iter().find(|c| c.id == id)
    }

    /// If identity ids collide, the last identity with that id wins.
    pub fn identity(&self, id: &str) -> Option<&HealthIdentity> {
        self.identity_index
            .get(id)
            .map(|&i| &self.collections.identities[i])
    }

    /// Number of records in a collection (1 for the treasury state).
    pub fn len_of(&self, collection: Collection) -> usize {
        match collection {
            Collection::Partners => self.partners().len(),
            Collection::Identities => self.identities().len(),
            Collection::Campaigns => self.campaigns().len(),
            Collection::CampaignTemplates => self.campaign_templates().len(),
            Collection::Verifications => self.verifications().len(),
            Collection::TreasuryState => 1,
            Collection::TreasuryTransactions => self.treasury_transactions().len(),
            Collection::TreasurySnapshots => self.treasury_snapshots().len(),
            Collection::ComplianceRecords => self.compliance_records().len(),
            Collection::DataProcessingSummaries => self.data_processing_summaries().len(),
        }
    }

    /// Serialize one collection as a JSON value (array, or object for the
    /// treasury state).
    pub fn collection_json(&self, collection: Collection) -> serde_json::Result<serde_json::Value> {
        match collection {
            Collection::Partners => serde_json::to_value(self.partners()),
            Collection::Identities => serde_json::to_value(self.identities()),
            Collection::Campaigns => serde_json::to_value(self.campaigns()),
            Collection::CampaignTemplates => serde_json::to_value(self.campaign_templates()),
            Collection::Verifications => serde_json::to_value(self.verifications()),
            Collection::TreasuryState => serde_json::to_value(self.treasury_state()),
            Collection::TreasuryTransactions => serde_json::to_value(self.treasury_transactions()),
            Collection::TreasurySnapshots => serde_json::to_value(self.treasury_snapshots()),
            Collection::ComplianceRecords => serde_json::to_value(self.compliance_records()),
            Collection::DataProcessingSummaries => {
                serde_json::to_value(self.data_processing_summaries())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collection_names_are_unique() {
        let mut names: Vec<_> = Collection::ALL.iter().map(|c| c.name()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), Collection::ALL.len());
    }

    #[test]
    fn test_only_treasury_state_is_singleton() {
        let singletons: Vec<_> = Collection::ALL
            .iter()
            .filter(|c| c.is_singleton())
            .collect();
        assert_eq!(singletons, vec![&Collection::TreasuryState]);
    }

    #[test]
    fn test_collection_from_name() {
        for c in Collection::ALL {
            assert_eq!(c.name().parse::<Collection>(), Ok(*c));
        }
        assert!("users".parse::<Collection>().is_err());
    }
}
