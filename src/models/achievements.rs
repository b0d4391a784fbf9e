//! Global achievements record
//!
//! Exactly one of these exists per store. Storage holds it in a single slot
//! and hands out an [`AchievementsHandle`] once it has been created, so
//! there is no way to bind to a second record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::emergency_fund::EmergencyFund;
use super::ids::{AchievementsId, BadgeId};
use crate::gamification;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AchievementsStore {
    pub id: AchievementsId,

    #[serde(default)]
    pub xp: u32,

    #[serde(default)]
    pub emergency_fund: EmergencyFund,

    #[serde(default)]
    pub badge_ids: Vec<BadgeId>,

    pub created_at: DateTime<Utc>,
}

impl AchievementsStore {
    pub fn new() -> Self {
        Self {
            id: AchievementsId::new(),
            xp: 0,
            emergency_fund: EmergencyFund::default(),
            badge_ids: Vec::new(),
            created_at: Utc::now(),
        }
    }

    pub fn level(&self) -> u32 {
        gamification::level(self.xp)
    }
}

impl Default for AchievementsStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Proof that the achievements record exists, obtained once at startup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AchievementsHandle {
    id: AchievementsId,
}

impl AchievementsHandle {
    pub(crate) fn new(id: AchievementsId) -> Self {
        Self { id }
    }

    pub fn id(&self) -> AchievementsId {
        self.id
    }
}
