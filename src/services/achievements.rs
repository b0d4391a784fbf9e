//! Achievements service
//!
//! Operates on the global achievements record through the handle obtained
//! from [`Storage::ensure_achievements`] at startup.

use tracing::info;

use crate::error::{BudgetXpError, BudgetXpResult};
use crate::models::{AchievementsHandle, AchievementsStore, Badge, EmergencyFund, Money};
use crate::reports::AchievementsReport;
use crate::storage::Storage;

pub struct AchievementsService<'a> {
    storage: &'a Storage,
    handle: AchievementsHandle,
}

impl<'a> AchievementsService<'a> {
    pub fn new(storage: &'a Storage, handle: AchievementsHandle) -> Self {
        Self { storage, handle }
    }

    pub fn handle(&self) -> AchievementsHandle {
        self.handle
    }

    pub fn get(&self) -> BudgetXpResult<AchievementsStore> {
        self.storage.achievements(self.handle)
    }

    pub fn badges(&self) -> BudgetXpResult<Vec<Badge>> {
        self.storage.global_badges(self.handle)
    }

    /// Overwrite the global XP
    pub fn set_xp(&self, xp: u32) -> BudgetXpResult<AchievementsStore> {
        let store = self.storage.update_achievements(self.handle, |s| {
            s.xp = xp;
            s.clone()
        })?;
        self.storage.commit()?;

        info!(xp, level = store.level(), "updated global xp");
        Ok(store)
    }

    pub fn set_emergency_fund(
        &self,
        goal: Option<Money>,
        progress: Option<Money>,
    ) -> BudgetXpResult<AchievementsStore> {
        let current = self.get()?.emergency_fund;
        let fund = EmergencyFund::new(
            goal.unwrap_or(current.goal),
            progress.unwrap_or(current.progress),
        );
        fund.validate()
            .map_err(|e| BudgetXpError::Validation(e.to_string()))?;

        let store = self.storage.update_achievements(self.handle, |s| {
            s.emergency_fund = fund;
            s.clone()
        })?;
        self.storage.commit()?;
        Ok(store)
    }

    pub fn report(&self) -> BudgetXpResult<AchievementsReport> {
        AchievementsReport::global(self.storage, self.handle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_xp_derives_level() {
        let storage = Storage::in_memory().unwrap();
        let handle = storage.ensure_achievements().unwrap();
        let service = AchievementsService::new(&storage, handle);

        assert_eq!(service.get().unwrap().level(), 1);
        assert_eq!(service.set_xp(499).unwrap().level(), 1);
        assert_eq!(service.set_xp(500).unwrap().level(), 2);
        assert_eq!(service.report().unwrap().level, 2);
    }

    #[test]
    fn test_emergency_fund_zero_goal_ratio() {
        let storage = Storage::in_memory().unwrap();
        let handle = storage.ensure_achievements().unwrap();
        let service = AchievementsService::new(&storage, handle);

        let store = service
            .set_emergency_fund(None, Some(Money::from_units(3)))
            .unwrap();
        assert!((store.emergency_fund.ratio() - 3.0).abs() < 1e-9);

        let store = service
            .set_emergency_fund(Some(Money::from_units(12)), None)
            .unwrap();
        assert!((store.emergency_fund.ratio() - 0.25).abs() < 1e-9);
    }

    #[test]
    fn test_emergency_fund_rejects_negative() {
        let storage = Storage::in_memory().unwrap();
        let handle = storage.ensure_achievements().unwrap();
        let service = AchievementsService::new(&storage, handle);

        assert!(service
            .set_emergency_fund(None, Some(Money::from_units(-3)))
            .unwrap_err()
            .is_validation());
        assert!(service.get().unwrap().emergency_fund.progress.is_zero());
    }

    #[test]
    fn test_global_badges_seeded() {
        let storage = Storage::in_memory().unwrap();
        let handle = storage.ensure_achievements().unwrap();
        let service = AchievementsService::new(&storage, handle);

        assert_eq!(service.badges().unwrap().len(), 6);
        assert_eq!(service.handle(), handle);
    }
}
