// 👤 User Profile - the externally-owned point balance holder
// The balance is fetched from the backend per screen visit; the engine
// treats it as an immutable input and never mutates it.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: u32,
    pub name: String,
    pub email: Option<String>,
    /// Aggregated by the backend across completed tasks
    pub points_total: u32,
}

impl UserProfile {
    pub fn new(id: u32, name: &str, points_total: u32) -> Self {
        UserProfile {
            id,
            name: name.to_string(),
            email: None,
            points_total,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_creation() {
        let user = UserProfile::new(3, "Valeria", 166);

        assert_eq!(user.id, 3);
        assert_eq!(user.name, "Valeria");
        assert_eq!(user.email, None);
        assert_eq!(user.points_total, 166);
    }
}
