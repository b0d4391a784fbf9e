//! Badge service
//!
//! Read access to badges and the two mutation hooks an unlocking rule
//! engine would drive. Nothing in this crate decides when to call them.

use chrono::{DateTime, Utc};
use tracing::info;

use crate::error::{BudgetXpError, BudgetXpResult};
use crate::models::{AchievementsHandle, Badge, BadgeId, BudgetId};
use crate::storage::Storage;

/// Service for badge management
pub struct BadgeService<'a> {
    storage: &'a Storage,
}

impl<'a> BadgeService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    pub fn get(&self, id: BadgeId) -> BudgetXpResult<Option<Badge>> {
        self.storage.badges.get(id)
    }

    pub fn for_budget(&self, budget_id: BudgetId) -> BudgetXpResult<Vec<Badge>> {
        let budget = self.storage.require_budget(budget_id)?;
        self.storage.badges_for(&budget)
    }

    pub fn global(&self, handle: AchievementsHandle) -> BudgetXpResult<Vec<Badge>> {
        self.storage.global_badges(handle)
    }

    /// First badge in `badges` whose name matches (case-insensitive) or whose ID matches
    pub fn find_in(badges: &[Badge], identifier: &str) -> Option<Badge> {
        let identifier = identifier.trim();
        badges
            .iter()
            .find(|b| b.name.eq_ignore_ascii_case(identifier))
            .or_else(|| {
                let by_id = identifier.parse::<BadgeId>().ok();
                badges
                    .iter()
                    .find(|b| Some(b.id) == by_id || b.id.to_string() == identifier)
            })
            .cloned()
    }

    /// Store a new progress count
    ///
    /// Reaching the goal does not mark the badge achieved.
    pub fn record_progress(&self, id: BadgeId, progress: f64) -> BudgetXpResult<Badge> {
        self.modify(id, |b| b.progress = progress)
    }

    pub fn mark_achieved(&self, id: BadgeId, at: DateTime<Utc>) -> BudgetXpResult<Badge> {
        let badge = self.modify(id, |b| b.mark_achieved(at))?;
        info!(badge = %id, name = %badge.name, owner = %badge.owner, "badge achieved");
        Ok(badge)
    }

    fn modify(&self, id: BadgeId, f: impl FnOnce(&mut Badge)) -> BudgetXpResult<Badge> {
        let mut badge = self.storage.require_badge(id)?;
        f(&mut badge);
        badge
            .validate()
            .map_err(|e| BudgetXpError::Validation(e.to_string()))?;

        self.storage.badges.upsert(badge.clone())?;
        self.storage.commit()?;
        Ok(badge)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BadgeOwner, Budget, Money, StarterBadge};
    use chrono::NaiveDate;

    fn setup() -> (Storage, Budget) {
        let storage = Storage::in_memory().unwrap();
        let budget = Budget::new(
            "Test",
            Money::zero(),
            NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2025, 1, 31).unwrap(),
        );
        let badges = StarterBadge::seed(BadgeOwner::Budget(budget.id));
        storage.insert_budget(budget.clone(), badges).unwrap();
        (storage, budget)
    }

    #[test]
    fn test_record_progress_does_not_unlock() {
        let (storage, budget) = setup();
        let service = BadgeService::new(&storage);
        let badges = service.for_budget(budget.id).unwrap();
        let tracker = BadgeService::find_in(&badges, "transaction tracker").unwrap();

        let updated = service.record_progress(tracker.id, 60.0).unwrap();
        assert_eq!(updated.progress_fraction(), 1.0);
        assert!(!updated.achieved);

        let half = service.record_progress(tracker.id, 25.0).unwrap();
        assert!((half.progress_fraction() - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_record_progress_rejects_negative() {
        let (storage, budget) = setup();
        let service = BadgeService::new(&storage);
        let badge_id = service.for_budget(budget.id).unwrap()[0].id;

        assert!(service
            .record_progress(badge_id, -1.0)
            .unwrap_err()
            .is_validation());
        assert_eq!(service.get(badge_id).unwrap().unwrap().progress, 0.0);
    }

    #[test]
    fn test_mark_achieved_sets_date() {
        let (storage, budget) = setup();
        let service = BadgeService::new(&storage);
        let badge_id = service.for_budget(budget.id).unwrap()[0].id;
        let now = Utc::now();

        let badge = service.mark_achieved(badge_id, now).unwrap();
        assert!(badge.achieved);
        assert_eq!(badge.achieved_date, Some(now));
        assert!(!badge.shows_progress_bar());
    }

    #[test]
    fn test_binary_badge_fraction_is_zero() {
        let (storage, budget) = setup();
        let service = BadgeService::new(&storage);
        let badges = service.for_budget(budget.id).unwrap();
        let first = BadgeService::find_in(&badges, "First Budget").unwrap();

        let updated = service.record_progress(first.id, 10.0).unwrap();
        assert_eq!(updated.progress_fraction(), 0.0);
    }

    #[test]
    fn test_global_badges_are_separate() {
        let (storage, budget) = setup();
        let handle = storage.ensure_achievements().unwrap();
        let service = BadgeService::new(&storage);

        let global_id = service.global(handle).unwrap()[0].id;
        service.mark_achieved(global_id, Utc::now()).unwrap();

        assert!(service.for_budget(budget.id).unwrap().iter().all(|b| !b.achieved));
    }

    #[test]
    fn test_unknown_badge() {
        let (storage, _) = setup();
        let service = BadgeService::new(&storage);
        assert!(service
            .record_progress(BadgeId::new(), 1.0)
            .unwrap_err()
            .is_not_found());
    }
}
