// 🎁 Reward Entity - catalog entries exchangeable for points
// Redeemability depends only on cost vs. balance, never on rank.

use crate::redemption::can_redeem;
use serde::{Deserialize, Serialize};

// ============================================================================
// REWARD
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reward {
    pub id: u32,
    pub name: String,
    /// Points deducted when the reward is claimed
    pub cost: u32,
}

impl Reward {
    pub fn new(id: u32, name: &str, cost: u32) -> Self {
        Reward {
            id,
            name: name.to_string(),
            cost,
        }
    }

    /// Whether a balance covers this reward
    pub fn is_affordable(&self, balance: u32) -> bool {
        can_redeem(balance, self.cost)
    }
}

// ============================================================================
// REWARD CATALOG
// ============================================================================

/// Snapshot of the backend's reward list for one screen visit.
/// Not a durable store: re-fetched by the caller, never cached here.
#[derive(Debug, Clone, Default)]
pub struct RewardCatalog {
    rewards: Vec<Reward>,
}

impl RewardCatalog {
    pub fn new() -> Self {
        RewardCatalog {
            rewards: Vec::new(),
        }
    }

    /// Build a catalog from a fetched list, cheapest first
    pub fn from_rewards(mut rewards: Vec<Reward>) -> Self {
        rewards.sort_by_key(|reward| reward.cost);
        RewardCatalog { rewards }
    }

    pub fn add(&mut self, reward: Reward) {
        self.rewards.push(reward);
        self.rewards.sort_by_key(|reward| reward.cost);
    }

    /// All rewards, cheapest first
    pub fn rewards(&self) -> &[Reward] {
        &self.rewards
    }

    pub fn find_by_id(&self, id: u32) -> Option<&Reward> {
        self.rewards.iter().find(|reward| reward.id == id)
    }

    /// Rewards the given balance can pay for, cheapest first
    pub fn affordable(&self, balance: u32) -> Vec<&Reward> {
        self.rewards
            .iter()
            .filter(|reward| reward.is_affordable(balance))
            .collect()
    }

    pub fn count(&self) -> usize {
        self.rewards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rewards.is_empty()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_catalog() -> RewardCatalog {
        RewardCatalog::from_rewards(vec![
            Reward::new(1, "Termo EcoPet", 350),
            Reward::new(2, "Botella reutilizable", 120),
            Reward::new(3, "Sticker TTY", 40),
        ])
    }

    #[test]
    fn test_catalog_sorts_by_cost() {
        let catalog = sample_catalog();

        let costs: Vec<u32> = catalog.rewards().iter().map(|r| r.cost).collect();
        assert_eq!(costs, vec![40, 120, 350]);
    }

    #[test]
    fn test_find_by_id() {
        let catalog = sample_catalog();

        assert_eq!(catalog.find_by_id(2).unwrap().name, "Botella reutilizable");
        assert!(catalog.find_by_id(99).is_none());
    }

    #[test]
    fn test_affordable_filter() {
        let catalog = sample_catalog();

        let affordable = catalog.affordable(166);
        let names: Vec<&str> = affordable.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Sticker TTY", "Botella reutilizable"]);

        assert!(catalog.affordable(39).is_empty());
        assert_eq!(catalog.affordable(350).len(), 3);
    }

    #[test]
    fn test_affordability_at_exact_cost() {
        let reward = Reward::new(9, "Kit de jardinería", 500);

        assert!(reward.is_affordable(500));
        assert!(!reward.is_affordable(499));
    }

    #[test]
    fn test_add_keeps_order() {
        let mut catalog = sample_catalog();
        catalog.add(Reward::new(4, "Descuento 10%", 80));

        let costs: Vec<u32> = catalog.rewards().iter().map(|r| r.cost).collect();
        assert_eq!(costs, vec![40, 80, 120, 350]);
        assert_eq!(catalog.count(), 4);
    }
}
