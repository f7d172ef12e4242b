//! Treasury: a constant state singleton, a running-balance ledger, and daily
//! growth snapshots.

use crate::generator::GeneratorError;
use crate::generators::timestamp::{
    date_days_before, from_epoch_millis, months_before, random_epoch_millis,
};
use crate::generators::{
    generate_id, random_float, random_int, random_item, round_to, weighted_item,
};
use crate::prng::{next_float, Mulberry32};
use chrono::{DateTime, Utc};
use healthid_core::{
    Partner, TransactionType, TreasuryConfig, TreasurySnapshot, TreasuryState,
    TreasuryTransaction,
};
use rand::RngCore;
use tracing::debug;

// ============================================================================
// State
// ============================================================================

/// The current treasury position. Constant; consumes no randomness.
pub fn treasury_state() -> TreasuryState {
    TreasuryState {
        total_budget: 250_000.0,
        available_balance: 148_320.0,
        yield_rate: 0.045,
        yield_generated: 8_412.75,
        value_multiplier: 1.47,
        points_distributed: 87_450,
        points_reserved: 42_000,
        points_expired: 3_820,
    }
}

// ============================================================================
// Transactions
// ============================================================================

fn descriptions(kind: TransactionType) -> &'static [&'static str] {
    match kind {
        TransactionType::Deposit => &[
            "Partner budget deposit",
            "Quarterly budget top-up",
            "Campaign funding deposit",
            "Initial programme funding",
        ],
        TransactionType::YieldCredit => &[
            "Daily yield accrual",
            "Weekly yield credit",
            "Compounded yield credit",
            "Treasury yield distribution",
        ],
        TransactionType::Distribution => &[
            "Verification reward distribution",
            "Campaign participant payout",
            "Batch reward settlement",
            "Achievement reward payout",
        ],
        TransactionType::Expiration => &[
            "Unused points expiration",
            "Quarterly point expiry",
            "Dormant account point sweep",
        ],
        TransactionType::Withdrawal => &[
            "Partner balance withdrawal",
            "Budget reallocation withdrawal",
            "End-of-campaign withdrawal",
        ],
    }
}

/// Signed amount for a ledger entry of `kind`, one draw.
fn signed_amount<R: RngCore + ?Sized>(rng: &mut R, kind: TransactionType) -> f64 {
    match kind {
        TransactionType::Deposit => random_int(rng, 5_000, 50_000) as f64,
        TransactionType::YieldCredit => round_to(random_float(rng, 20.0, 250.0), 2),
        TransactionType::Distribution => -(random_int(rng, 100, 5_000) as f64),
        TransactionType::Expiration => -(random_int(rng, 50, 1_500) as f64),
        TransactionType::Withdrawal => -(random_int(rng, 1_000, 15_000) as f64),
    }
}

/// Generate the ledger in chronological order.
///
/// All timestamps are drawn first and sorted, then each entry draws its kind,
/// partner, description and amount. An outflow that would take the running
/// balance below zero is booked as an inflow instead. Fails with
/// [`GeneratorError::EmptyPool`] when there are entries to book but no
/// partners.
pub fn generate_transactions(
    config: &TreasuryConfig,
    partners: &[Partner],
    now: DateTime<Utc>,
) -> Result<Vec<TreasuryTransaction>, GeneratorError> {
    if config.transaction_count > 0 && partners.is_empty() {
        return Err(GeneratorError::EmptyPool {
            family: "treasury",
            pool: "partners",
        });
    }

    let mut rng = Mulberry32::new(config.seed);
    let window_start = months_before(now, config.history_months);

    let mut instants: Vec<f64> = (0..config.transaction_count)
        .map(|_| random_epoch_millis(&mut rng, window_start, now))
        .collect();
    instants.sort_by(f64::total_cmp);

    let mut running = config.opening_balance;
    let mut transactions = Vec::with_capacity(instants.len());

    for ms in instants {
        let kind = weighted_item(&mut rng, TransactionType::ALL, &config.transaction_weights);
        let Some(partner) = random_item(&mut rng, partners) else {
            break;
        };
        let description = random_item(&mut rng, descriptions(kind))
            .copied()
            .unwrap_or_default();

        let mut amount = signed_amount(&mut rng, kind);
        if running + amount < 0.0 {
            amount = amount.abs();
        }
        running += amount;

        transactions.push(TreasuryTransaction {
            id: generate_id(&mut rng, "txn"),
            kind,
            amount,
            balance: round_to(running, 2),
            description: description.to_string(),
            timestamp: from_epoch_millis(ms, window_start),
            partner_id: partner.id.clone(),
        });
    }

    debug!(
        count = transactions.len(),
        seed = config.seed,
        closing_balance = running,
        "Generated treasury transactions"
    );
    Ok(transactions)
}

// ============================================================================
// Snapshots
// ============================================================================

pub const SNAPSHOT_OPENING_BUDGET: u64 = 150_000;
pub const SNAPSHOT_OPENING_POINTS: u64 = 15_000;
pub const DEPOSIT_PROBABILITY: f64 = 0.05;
pub const MULTIPLIER_DAILY_GROWTH: f64 = 0.0026;

/// One snapshot per UTC day from `config.snapshot_days` days ago up to today.
///
/// Cumulative yield and points distributed strictly increase; total budget
/// and the value multiplier never decrease.
pub fn generate_snapshots(config: &TreasuryConfig, now: DateTime<Utc>) -> Vec<TreasurySnapshot> {
    let mut rng = Mulberry32::new(config.snapshot_seed);
    let total_days = config.snapshot_days;

    let mut cumulative_yield = 0.0;
    let mut total_budget = SNAPSHOT_OPENING_BUDGET;
    let mut points_distributed = SNAPSHOT_OPENING_POINTS;
    let mut value_multiplier: f64 = 1.0;

    let snapshots: Vec<TreasurySnapshot> = (0..=total_days)
        .rev()
        .map(|day| {
            let yield_accrued = round_to(random_float(&mut rng, 30.0, 70.0), 2);
            cumulative_yield = round_to(cumulative_yield + yield_accrued, 2);

            if next_float(&mut rng) < DEPOSIT_PROBABILITY {
                total_budget += random_int(&mut rng, 5_000, 25_000) as u64;
            }
            points_distributed += random_int(&mut rng, 100, 800) as u64;

            let elapsed = f64::from(total_days - day);
            let drawn = round_to(
                1.0 + elapsed * MULTIPLIER_DAILY_GROWTH + next_float(&mut rng) * 0.02,
                3,
            );
            value_multiplier = value_multiplier.max(drawn);

            TreasurySnapshot {
                date: date_days_before(now, day),
                total_budget,
                yield_accrued,
                cumulative_yield,
                points_distributed,
                value_multiplier,
            }
        })
        .collect();

    debug!(
        count = snapshots.len(),
        seed = config.snapshot_seed,
        "Generated treasury snapshots"
    );
    snapshots
}
