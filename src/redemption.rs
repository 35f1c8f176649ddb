// 🎁 Redemption - pure affordability arithmetic
// Pre-validates reward claims before the network layer issues them and
// keeps the optimistic balance consistent with what the backend will do.

use crate::entities::Reward;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ============================================================================
// AFFORDABILITY CHECK
// ============================================================================

/// Whether a balance covers a cost. Pure, stateless.
pub fn can_redeem(balance: u32, cost: u32) -> bool {
    balance >= cost
}

/// Deduct a cost from a balance.
///
/// Returns the new balance, or `InsufficientPoints` carrying the shortfall.
/// No network call, no persistence: the calling layer runs this before
/// posting a redemption and to render the post-claim balance.
pub fn redeem(balance: u32, cost: u32) -> Result<u32, InsufficientPoints> {
    if can_redeem(balance, cost) {
        Ok(balance - cost)
    } else {
        Err(InsufficientPoints {
            cost,
            balance,
            shortfall: cost - balance,
        })
    }
}

// ============================================================================
// INSUFFICIENT POINTS
// ============================================================================

/// An expected business outcome, not a fault: the user cannot afford the
/// reward yet. Surfaced as an actionable message, never retried.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsufficientPoints {
    pub cost: u32,
    pub balance: u32,
    /// Points still missing (`cost - balance`)
    pub shortfall: u32,
}

impl std::fmt::Display for InsufficientPoints {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "insufficient points: cost {}, balance {} ({} short)",
            self.cost, self.balance, self.shortfall
        )
    }
}

impl std::error::Error for InsufficientPoints {}

// ============================================================================
// CLAIMED REWARDS
// ============================================================================

/// A reward the user has already exchanged points for
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClaimedReward {
    pub reward_id: u32,
    pub name: String,
    pub cost: u32,
    pub redeemed_at: DateTime<Utc>,
}

/// In-memory log of confirmed claims, for the history view.
/// Append-only; the backend owns the durable record.
#[derive(Debug, Clone, Default)]
pub struct RedemptionLog {
    claims: Vec<ClaimedReward>,
}

impl RedemptionLog {
    pub fn new() -> Self {
        RedemptionLog { claims: Vec::new() }
    }

    /// Append a confirmed claim, stamped with the current time
    pub fn record(&mut self, reward: &Reward) -> &ClaimedReward {
        self.claims.push(ClaimedReward {
            reward_id: reward.id,
            name: reward.name.clone(),
            cost: reward.cost,
            redeemed_at: Utc::now(),
        });
        self.claims.last().expect("claim was just pushed")
    }

    /// All claims, oldest first
    pub fn claims(&self) -> &[ClaimedReward] {
        &self.claims
    }

    /// Total points spent across all claims
    pub fn total_redeemed(&self) -> u32 {
        self.claims.iter().map(|claim| claim.cost).sum()
    }

    pub fn count(&self) -> usize {
        self.claims.len()
    }

    pub fn is_empty(&self) -> bool {
        self.claims.is_empty()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_can_redeem_at_exact_cost() {
        assert!(can_redeem(100, 100));
    }

    #[test]
    fn test_can_redeem_one_point_short() {
        assert!(!can_redeem(99, 100));
    }

    #[test]
    fn test_can_redeem_free_reward() {
        assert!(can_redeem(0, 0));
    }

    #[test]
    fn test_redeem_deducts_cost() {
        assert_eq!(redeem(100, 30), Ok(70));
    }

    #[test]
    fn test_redeem_to_zero_balance() {
        assert_eq!(redeem(100, 100), Ok(0));
    }

    #[test]
    fn test_redeem_reports_shortfall() {
        let err = redeem(20, 30).unwrap_err();

        assert_eq!(err.shortfall, 10);
        assert_eq!(err.cost, 30);
        assert_eq!(err.balance, 20);
    }

    #[test]
    fn test_insufficient_points_message() {
        let err = redeem(20, 30).unwrap_err();
        let message = err.to_string();

        assert!(message.contains("10 short"));
    }

    #[test]
    fn test_log_records_claims_in_order() {
        let mut log = RedemptionLog::new();
        assert!(log.is_empty());

        log.record(&Reward::new(1, "Botella reutilizable", 120));
        log.record(&Reward::new(2, "Planta de escritorio", 80));

        assert_eq!(log.count(), 2);
        assert_eq!(log.claims()[0].name, "Botella reutilizable");
        assert_eq!(log.claims()[1].reward_id, 2);
        assert_eq!(log.total_redeemed(), 200);
    }

    #[test]
    fn test_recorded_claim_carries_reward_fields() {
        let mut log = RedemptionLog::new();
        let claim = log.record(&Reward::new(7, "Termo EcoPet", 350));

        assert_eq!(claim.reward_id, 7);
        assert_eq!(claim.cost, 350);
        assert!(claim.redeemed_at <= Utc::now());
    }
}
