// 🏅 Rank Ladder - points-to-rank mapping and progress computation
// The ladder is a fixed, ordered, contiguous partition of [0, ∞):
// every non-negative point total belongs to exactly one rank.

use anyhow::{Context as AnyhowContext, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

// ============================================================================
// RANK
// ============================================================================

/// One tier of the ladder, covering the closed point range [min, max].
/// The final rank is unbounded (`max == None`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rank {
    /// Ordinal position in the ladder (1-based, display only)
    pub id: u32,

    /// Display name (e.g. "Recolector Novato")
    pub name: String,

    /// Optional icon for UI (e.g. "🔵")
    #[serde(default)]
    pub icon: Option<String>,

    /// Optional color for UI (e.g. "#0099FF")
    #[serde(default)]
    pub color: Option<String>,

    /// Lowest point total belonging to this rank
    pub min: u32,

    /// Highest point total belonging to this rank (None = unbounded)
    #[serde(default)]
    pub max: Option<u32>,
}

impl Rank {
    /// Create a rank without display metadata
    pub fn new(id: u32, name: &str, min: u32, max: Option<u32>) -> Self {
        Rank {
            id,
            name: name.to_string(),
            icon: None,
            color: None,
            min,
            max,
        }
    }

    /// Create a rank with icon and color
    pub fn with_display(
        id: u32,
        name: &str,
        min: u32,
        max: Option<u32>,
        icon: &str,
        color: &str,
    ) -> Self {
        let mut rank = Self::new(id, name, min, max);
        rank.icon = Some(icon.to_string());
        rank.color = Some(color.to_string());
        rank
    }

    /// Whether a point total falls inside this rank's range.
    /// A total exactly equal to `min` belongs to this rank, not the previous one.
    pub fn contains(&self, points: u32) -> bool {
        points >= self.min && self.max.map_or(true, |max| points <= max)
    }

    /// Formatted point range for display
    ///
    /// Example: "100 - 299 pts", "6,000+ pts"
    pub fn range_label(&self) -> String {
        match self.max {
            Some(max) => format!(
                "{} - {} pts",
                group_thousands(self.min),
                group_thousands(max)
            ),
            None => format!("{}+ pts", group_thousands(self.min)),
        }
    }
}

/// Insert thousands separators ("6000" → "6,000")
fn group_thousands(n: u32) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

// ============================================================================
// CONFIGURATION ERROR
// ============================================================================

/// A rank table that fails the partition invariant. Fatal at startup:
/// construction halts instead of serving silently wrong ranks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    /// No ranks at all
    EmptyTable,

    /// The ladder must start at zero points
    FirstMinNotZero { found: u32 },

    /// A rank whose max is below its min
    EmptyRange { rank: String, min: u32, max: u32 },

    /// Gap or overlap between consecutive ranks
    Discontinuity {
        prev: String,
        next: String,
        expected_min: u32,
        found_min: u32,
    },

    /// An unbounded rank that is not the last entry
    UnboundedBeforeEnd { rank: String },

    /// The final rank must be unbounded so the partition covers [0, ∞)
    BoundedTop { rank: String, max: u32 },
}

impl std::fmt::Display for ConfigurationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigurationError::EmptyTable => {
                write!(f, "rank table is empty")
            }
            ConfigurationError::FirstMinNotZero { found } => {
                write!(f, "first rank must start at 0 points, starts at {}", found)
            }
            ConfigurationError::EmptyRange { rank, min, max } => {
                write!(f, "rank '{}' has max {} below min {}", rank, max, min)
            }
            ConfigurationError::Discontinuity {
                prev,
                next,
                expected_min,
                found_min,
            } => {
                write!(
                    f,
                    "rank '{}' must start at {} to continue '{}', starts at {}",
                    next, expected_min, prev, found_min
                )
            }
            ConfigurationError::UnboundedBeforeEnd { rank } => {
                write!(f, "rank '{}' is unbounded but not the last entry", rank)
            }
            ConfigurationError::BoundedTop { rank, max } => {
                write!(
                    f,
                    "final rank '{}' caps at {} points, must be unbounded",
                    rank, max
                )
            }
        }
    }
}

impl std::error::Error for ConfigurationError {}

// ============================================================================
// RANK STATUS
// ============================================================================

/// Derived view data for a point total: everything the Points screen shows.
#[derive(Debug, Clone, Serialize)]
pub struct RankStatus {
    pub points: u32,
    pub rank: Rank,
    pub next_rank: Option<Rank>,
    /// Fractional advancement from the current rank's floor to the next
    /// rank's floor, in [0, 1]. Exactly 1.0 at the top rank.
    pub progress: f64,
    pub points_to_next: Option<u32>,
}

// ============================================================================
// RANK TABLE
// ============================================================================

/// The validated rank ladder. Constructed once at process start,
/// read-only thereafter.
#[derive(Debug, Clone)]
pub struct RankTable {
    ranks: Vec<Rank>,
}

impl RankTable {
    /// Build a table from an explicit rank list, verifying the partition
    /// invariant. Ranks are sorted by `min` ascending before validation.
    pub fn new(mut ranks: Vec<Rank>) -> std::result::Result<Self, ConfigurationError> {
        ranks.sort_by_key(|r| r.min);
        validate_partition(&ranks)?;
        Ok(RankTable { ranks })
    }

    /// Load a table from a JSON file (an array of rank records)
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read rank table: {:?}", path.as_ref()))?;

        let ranks: Vec<Rank> =
            serde_json::from_str(&content).context("Failed to parse rank table JSON")?;

        RankTable::new(ranks).context("Rank table failed partition validation")
    }

    /// The built-in EcoPet ladder
    pub fn with_defaults() -> Self {
        let ranks = vec![
            Rank::with_display(1, "Aprendiz del Reciclaje", 0, Some(99), "🟢", "#00FF00"),
            Rank::with_display(2, "Recolector Novato", 100, Some(299), "🔵", "#0099FF"),
            Rank::with_display(3, "Eco-Explorador", 300, Some(599), "🟣", "#9900FF"),
            Rank::with_display(4, "Guardián del PET", 600, Some(999), "🟠", "#FF9900"),
            Rank::with_display(5, "Reciclador Experto", 1000, Some(1499), "🟡", "#FFFF00"),
            Rank::with_display(6, "Eco-Héroe", 1500, Some(2499), "⚪", "#FFFFFF"),
            Rank::with_display(7, "Embajador del Reciclaje", 2500, Some(3999), "🟤", "#8B4513"),
            Rank::with_display(8, "Maestro del PET", 4000, Some(5999), "🏆", "#FFD700"),
            Rank::with_display(9, "Leyenda Verde", 6000, None, "🏅", "#32CD32"),
        ];

        RankTable::new(ranks).expect("built-in ladder is a valid partition")
    }

    /// All ranks, ordered by `min` ascending
    pub fn ranks(&self) -> &[Rank] {
        &self.ranks
    }

    /// Number of ranks in the ladder
    pub fn count(&self) -> usize {
        self.ranks.len()
    }

    /// Index of the rank containing `points`. Total by construction:
    /// the validated table covers every u32. Linear scan is enough for a
    /// ladder of this size; a binary search on `min` would do for larger
    /// tables since mins are strictly increasing.
    fn position_of(&self, points: u32) -> usize {
        self.ranks
            .iter()
            .position(|rank| rank.contains(points))
            .expect("validated table partitions [0, ∞)")
    }

    /// The unique rank whose range contains `points`
    pub fn current_rank(&self, points: u32) -> &Rank {
        &self.ranks[self.position_of(points)]
    }

    /// The rank immediately after the current one, or None at the top
    pub fn next_rank(&self, points: u32) -> Option<&Rank> {
        self.ranks.get(self.position_of(points) + 1)
    }

    /// Fractional advancement toward the next rank's floor, clamped to
    /// [0, 1]. Returns exactly 1.0 at the top (unbounded) rank.
    pub fn progress(&self, points: u32) -> f64 {
        let pos = self.position_of(points);
        let current = &self.ranks[pos];
        match self.ranks.get(pos + 1) {
            Some(next) => {
                // Denominator > 0: consecutive mins are strictly increasing
                let span = (next.min - current.min) as f64;
                let gained = (points - current.min) as f64;
                (gained / span).clamp(0.0, 1.0)
            }
            None => 1.0,
        }
    }

    /// Points still needed to reach the next rank, or None at the top.
    /// Always ≥ 1 while a next rank exists.
    pub fn points_to_next(&self, points: u32) -> Option<u32> {
        self.next_rank(points).map(|next| next.min - points)
    }

    /// Bundle the derived values for view consumption
    pub fn status(&self, points: u32) -> RankStatus {
        RankStatus {
            points,
            rank: self.current_rank(points).clone(),
            next_rank: self.next_rank(points).cloned(),
            progress: self.progress(points),
            points_to_next: self.points_to_next(points),
        }
    }
}

impl Default for RankTable {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// Verify that a sorted rank list is a contiguous, non-overlapping
/// partition of [0, ∞)
fn validate_partition(ranks: &[Rank]) -> std::result::Result<(), ConfigurationError> {
    let first = ranks.first().ok_or(ConfigurationError::EmptyTable)?;

    if first.min != 0 {
        return Err(ConfigurationError::FirstMinNotZero { found: first.min });
    }

    for (i, rank) in ranks.iter().enumerate() {
        let is_last = i == ranks.len() - 1;

        match rank.max {
            Some(max) => {
                if max < rank.min {
                    return Err(ConfigurationError::EmptyRange {
                        rank: rank.name.clone(),
                        min: rank.min,
                        max,
                    });
                }
                if is_last {
                    return Err(ConfigurationError::BoundedTop {
                        rank: rank.name.clone(),
                        max,
                    });
                }
                // rank[i].max + 1 == rank[i+1].min (checked: a u32::MAX
                // ceiling can never be continued)
                let next = &ranks[i + 1];
                if Some(next.min) != max.checked_add(1) {
                    return Err(ConfigurationError::Discontinuity {
                        prev: rank.name.clone(),
                        next: next.name.clone(),
                        expected_min: max.saturating_add(1),
                        found_min: next.min,
                    });
                }
            }
            None => {
                if !is_last {
                    return Err(ConfigurationError::UnboundedBeforeEnd {
                        rank: rank.name.clone(),
                    });
                }
            }
        }
    }

    Ok(())
}

// ============================================================================
// TESTS
// ============================================================================
