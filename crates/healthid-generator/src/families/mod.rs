//! Entity family generators.
//!
//! Each family owns one seeded stream and returns a finished collection.
//! Families that reference other collections take them as slices, so the
//! generation order is visible in their signatures.

pub mod campaigns;
pub mod compliance;
pub mod identities;
pub mod partners;
pub mod summaries;
pub mod treasury;
pub mod verifications;

pub use campaigns::{build_funnel, generate_campaign_templates, generate_campaigns};
pub use compliance::generate_compliance_records;
pub use identities::generate_identities;
pub use partners::generate_partners;
pub use summaries::generate_summaries;
pub use treasury::{generate_snapshots, generate_transactions, treasury_state};
pub use verifications::generate_verifications;
