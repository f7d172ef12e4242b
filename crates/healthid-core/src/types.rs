//! Closed categorical enumerations shared by every collection.
//!
//! Each enum exposes `ALL` in the canonical order used by the weight tables
//! (index `i` of a weight list refers to `ALL[i]`), plus the wire name used in
//! serialized output.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! categorical {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $( $variant:ident => $wire:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $wire)]
                $variant,
            )+
        }

        impl $name {
            /// All variants in weight-table order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Serialized name of this variant.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $wire,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

categorical! {
    /// Partner account tier.
    pub enum PartnerTier {
        Enterprise => "enterprise",
        Professional => "professional",
        Starter => "starter",
    }
}

categorical! {
    /// Partner industry vertical.
    pub enum PartnerIndustry {
        Insurance => "insurance",
        Pharma => "pharma",
        Employer => "employer",
        Research => "research",
        Healthcare => "healthcare",
    }
}

categorical! {
    /// Identity reputation tier, ordered from most to least common.
    pub enum ReputationTier {
        Bronze => "bronze",
        Silver => "silver",
        Gold => "gold",
        Platinum => "platinum",
        Diamond => "diamond",
    }
}

categorical! {
    /// Connected health data source, ordered by popularity.
    pub enum DataSource {
        AppleHealth => "apple_health",
        GoogleFit => "google_fit",
        Fitbit => "fitbit",
        SamsungHealth => "samsung_health",
        Garmin => "garmin",
        Oura => "oura",
        Whoop => "whoop",
        LabResults => "lab_results",
    }
}

impl DataSource {
    /// Fallback pool when an identity has no connected sources, in the order
    /// the verification and summary generators sample it.
    pub const FALLBACK_ORDER: &'static [DataSource] = &[
        DataSource::AppleHealth,
        DataSource::Fitbit,
        DataSource::Garmin,
        DataSource::Oura,
        DataSource::Whoop,
        DataSource::GoogleFit,
        DataSource::SamsungHealth,
        DataSource::LabResults,
    ];
}

categorical! {
    pub enum Gender {
        Male => "male",
        Female => "female",
        Other => "other",
    }
}

categorical! {
    pub enum AgeRange {
        From18To24 => "18-24",
        From25To34 => "25-34",
        From35To44 => "35-44",
        From45To54 => "45-54",
        From55To64 => "55-64",
        Over65 => "65+",
    }
}

categorical! {
    pub enum Region {
        NorthAmerica => "North America",
        Europe => "Europe",
        AsiaPacific => "Asia Pacific",
        LatinAmerica => "Latin America",
        MiddleEastAfrica => "Middle East & Africa",
    }
}

categorical! {
    /// Health metric a campaign challenge is evaluated on.
    pub enum HealthMetric {
        Steps => "steps",
        SleepHours => "sleep_hours",
        SleepQuality => "sleep_quality",
        HeartRateResting => "heart_rate_resting",
        Hrv => "hrv",
        ActiveMinutes => "active_minutes",
        StressScore => "stress_score",
        Hydration => "hydration",
        BodyComposition => "body_composition",
        BloodGlucose => "blood_glucose",
    }
}

categorical! {
    pub enum ChallengeOperator {
        Gte => "gte",
        Lte => "lte",
        Eq => "eq",
        Between => "between",
    }
}

categorical! {
    /// Campaign lifecycle status.
    pub enum CampaignStatus {
        Draft => "draft",
        Active => "active",
        Completed => "completed",
        Paused => "paused",
    }
}

categorical! {
    pub enum StreamFrequency {
        Daily => "daily",
        Weekly => "weekly",
        Monthly => "monthly",
    }
}

categorical! {
    /// Proof scheme named on a verification receipt. Labels only; no proof
    /// is ever computed.
    pub enum ProofType {
        ZkSnark => "zk_snark",
        ZkStark => "zk_stark",
        Bulletproof => "bulletproof",
    }
}

categorical! {
    pub enum VerificationStatus {
        Verified => "verified",
        Pending => "pending",
        Failed => "failed",
        Expired => "expired",
    }
}

categorical! {
    pub enum AggregationType {
        Mean => "mean",
        Max => "max",
        Min => "min",
        Sum => "sum",
        Latest => "latest",
    }
}

categorical! {
    /// Treasury ledger entry kind.
    pub enum TransactionType {
        Deposit => "deposit",
        YieldCredit => "yield_credit",
        Distribution => "distribution",
        Expiration => "expiration",
        Withdrawal => "withdrawal",
    }
}

categorical! {
    /// Compliance audit event kind.
    pub enum ComplianceEventType {
        VerificationRequested => "verification_requested",
        ProofGenerated => "proof_generated",
        ProofVerified => "proof_verified",
        ProofFailed => "proof_failed",
        DataProcessed => "data_processed",
        AuditQuery => "audit_query",
    }
}

impl ComplianceEventType {
    /// Whether records of this kind carry a proof hash.
    pub fn is_proof_related(&self) -> bool {
        matches!(
            self,
            ComplianceEventType::ProofGenerated
                | ComplianceEventType::ProofVerified
                | ComplianceEventType::ProofFailed
        )
    }
}
