//! Achievements read model
//!
//! XP, level, emergency fund and badge progress for either the global
//! achievements record or a single budget.

use chrono::{DateTime, Utc};

use crate::error::BudgetXpResult;
use crate::gamification;
use crate::models::{AchievementsHandle, Badge, BadgeId, Budget, EmergencyFund, Money};
use crate::storage::Storage;

/// Width of the text progress bars
const BAR_WIDTH: usize = 20;

#[derive(Debug, Clone)]
pub struct BadgeProgress {
    pub id: BadgeId,
    pub name: String,
    pub description: String,
    pub icon: String,
    pub achieved: bool,
    pub achieved_date: Option<DateTime<Utc>>,
    pub progress: f64,
    pub goal: f64,
    pub fraction: f64,
    pub shows_progress_bar: bool,
}

impl From<&Badge> for BadgeProgress {
    fn from(badge: &Badge) -> Self {
        Self {
            id: badge.id,
            name: badge.name.clone(),
            description: badge.description.clone(),
            icon: badge.icon.clone(),
            achieved: badge.achieved,
            achieved_date: badge.achieved_date,
            progress: badge.progress,
            goal: badge.goal,
            fraction: badge.progress_fraction(),
            shows_progress_bar: badge.shows_progress_bar(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AchievementsReport {
    /// "Global" or the budget name
    pub scope: String,
    pub xp: u32,
    pub level: u32,
    pub xp_into_level: u32,
    pub xp_to_next_level: u32,
    pub emergency_fund: EmergencyFund,
    /// Not clamped; above 1 once the goal is exceeded
    pub fund_ratio: f64,
    /// Amount still needed to reach the goal; zero once met
    pub fund_remaining: Money,
    pub badges: Vec<BadgeProgress>,
}

impl AchievementsReport {
    pub fn global(storage: &Storage, handle: AchievementsHandle) -> BudgetXpResult<Self> {
        let store = storage.achievements(handle)?;
        let badges = storage.global_badges(handle)?;
        Ok(Self::from_parts("Global", store.xp, store.emergency_fund, &badges))
    }

    pub fn for_budget(storage: &Storage, budget: &Budget) -> BudgetXpResult<Self> {
        let badges = storage.badges_for(budget)?;
        Ok(Self::from_parts(
            &budget.name,
            budget.xp,
            budget.emergency_fund,
            &badges,
        ))
    }

    pub fn from_parts(scope: &str, xp: u32, fund: EmergencyFund, badges: &[Badge]) -> Self {
        Self {
            scope: scope.to_string(),
            xp,
            level: gamification::level(xp),
            xp_into_level: gamification::xp_into_level(xp),
            xp_to_next_level: gamification::xp_to_next_level(xp),
            emergency_fund: fund,
            fund_ratio: fund.ratio(),
            fund_remaining: fund.remaining(),
            badges: badges.iter().map(BadgeProgress::from).collect(),
        }
    }

    pub fn achieved_count(&self) -> usize {
        self.badges.iter().filter(|b| b.achieved).count()
    }

    pub fn format_terminal(&self, currency_symbol: &str) -> String {
        let money = |m: Money| m.format_with_symbol(currency_symbol);
        let mut output = String::new();

        output.push_str(&format!("Achievements: {}\n", self.scope));
        output.push_str(&"=".repeat(48));
        output.push('\n');

        output.push_str(&format!(
            "Level {}  ({} XP, {} to next level)\n",
            self.level, self.xp, self.xp_to_next_level
        ));
        output.push_str(&format!(
            "  {} {}/{}\n",
            bar(
                self.xp_into_level as f64 / gamification::XP_PER_LEVEL as f64
            ),
            self.xp_into_level,
            gamification::XP_PER_LEVEL
        ));

        output.push_str(&format!(
            "\nEmergency fund: {} of {} ({:.0}%)\n",
            money(self.emergency_fund.progress),
            money(self.emergency_fund.goal),
            self.fund_ratio * 100.0
        ));
        output.push_str(&format!("  {}\n", bar(self.fund_ratio)));
        if self.fund_remaining.is_positive() {
            output.push_str(&format!("  {} to go\n", money(self.fund_remaining)));
        }

        output.push_str(&format!(
            "\nBadges ({}/{} earned)\n",
            self.achieved_count(),
            self.badges.len()
        ));
        for badge in &self.badges {
            let mark = if badge.achieved { "[x]" } else { "[ ]" };
            output.push_str(&format!("  {} {:<20} {}\n", mark, badge.name, badge.description));
            if let Some(date) = badge.achieved_date {
                output.push_str(&format!("      earned {}\n", date.format("%Y-%m-%d")));
            }
            if badge.shows_progress_bar {
                output.push_str(&format!(
                    "      {} {}/{}\n",
                    bar(badge.fraction),
                    badge.progress,
                    badge.goal
                ));
            }
        }

        output
    }
}

/// Text bar for a fraction; values outside [0, 1] are drawn clamped
fn bar(fraction: f64) -> String {
    let filled = (fraction.clamp(0.0, 1.0) * BAR_WIDTH as f64).round() as usize;
    format!("[{}{}]", "#".repeat(filled), "-".repeat(BAR_WIDTH - filled))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BadgeOwner, BudgetId, StarterBadge};

    #[test]
    fn test_from_parts_derives_level() {
        let badges = StarterBadge::seed(BadgeOwner::Budget(BudgetId::new()));
        let report = AchievementsReport::from_parts("Global", 1_250, EmergencyFund::default(), &badges);

        assert_eq!(report.level, 3);
        assert_eq!(report.xp_into_level, 250);
        assert_eq!(report.xp_to_next_level, 250);
        assert_eq!(report.badges.len(), 6);
        assert_eq!(report.achieved_count(), 0);
    }

    #[test]
    fn test_progress_bars_only_for_tracked_badges() {
        let badges = StarterBadge::seed(BadgeOwner::Budget(BudgetId::new()));
        let report = AchievementsReport::from_parts("B", 0, EmergencyFund::default(), &badges);

        let with_bar: Vec<&str> = report
            .badges
            .iter()
            .filter(|b| b.shows_progress_bar)
            .map(|b| b.name.as_str())
            .collect();
        assert_eq!(with_bar, vec!["Transaction Tracker", "Data Diver"]);
        assert!(report.badges.iter().all(|b| b.fraction == 0.0));
    }

    #[test]
    fn test_fund_ratio_not_clamped() {
        let fund = EmergencyFund::new(Money::from_units(100), Money::from_units(150));
        let report = AchievementsReport::from_parts("B", 0, fund, &[]);
        assert!((report.fund_ratio - 1.5).abs() < 1e-9);
        assert!(report.format_terminal("$").contains("150%"));
        assert!(report.fund_remaining.is_zero());
        assert!(!report.format_terminal("$").contains("to go"));
    }

    #[test]
    fn test_fund_remaining_shown_until_goal_met() {
        let fund = EmergencyFund::new(Money::from_units(1000), Money::from_units(250));
        let report = AchievementsReport::from_parts("B", 0, fund, &[]);
        assert_eq!(report.fund_remaining, Money::from_units(750));
        assert!(report.format_terminal("$").contains("$750.00 to go"));
    }

    #[test]
    fn test_bar_clamps() {
        assert_eq!(bar(2.0), format!("[{}]", "#".repeat(BAR_WIDTH)));
        assert_eq!(bar(0.0), format!("[{}]", "-".repeat(BAR_WIDTH)));
    }

    #[test]
    fn test_global_report_from_storage() {
        let storage = Storage::in_memory().unwrap();
        let handle = storage.ensure_achievements().unwrap();
        storage.update_achievements(handle, |s| s.xp = 500).unwrap();

        let report = AchievementsReport::global(&storage, handle).unwrap();
        assert_eq!(report.scope, "Global");
        assert_eq!(report.level, 2);
        assert_eq!(report.badges.len(), 6);
    }
}
