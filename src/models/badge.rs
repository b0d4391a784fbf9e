//! Badge model and the starter badge set
//!
//! A badge is either binary (`goal == 0`) or progress-tracked. Each badge
//! names its owner scope explicitly: a single budget or the global
//! achievements record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{AchievementsId, BadgeId, BudgetId};
use crate::gamification;

/// Which parent owns a badge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "scope", content = "id", rename_all = "lowercase")]
pub enum BadgeOwner {
    Budget(BudgetId),
    Global(AchievementsId),
}

impl fmt::Display for BadgeOwner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Budget(id) => write!(f, "budget {}", id),
            Self::Global(id) => write!(f, "global {}", id),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Badge {
    pub id: BadgeId,

    pub owner: BadgeOwner,

    pub name: String,

    pub description: String,

    /// Symbol name the presentation layer maps to an icon
    pub icon: String,

    #[serde(default)]
    pub achieved: bool,

    /// Set only together with `achieved`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub achieved_date: Option<DateTime<Utc>>,

    #[serde(default)]
    pub progress: f64,

    /// Zero for binary badges
    #[serde(default)]
    pub goal: f64,
}

impl Badge {
    pub fn new(
        owner: BadgeOwner,
        name: impl Into<String>,
        description: impl Into<String>,
        icon: impl Into<String>,
    ) -> Self {
        Self {
            id: BadgeId::new(),
            owner,
            name: name.into(),
            description: description.into(),
            icon: icon.into(),
            achieved: false,
            achieved_date: None,
            progress: 0.0,
            goal: 0.0,
        }
    }

    pub fn with_goal(mut self, goal: f64) -> Self {
        self.goal = goal;
        self
    }

    pub fn is_progress_tracked(&self) -> bool {
        self.goal > 0.0
    }

    pub fn progress_fraction(&self) -> f64 {
        gamification::progress_fraction(self.progress, self.goal)
    }

    /// A progress bar is only drawn for unfinished progress badges
    pub fn shows_progress_bar(&self) -> bool {
        self.is_progress_tracked() && !self.achieved
    }

    pub fn mark_achieved(&mut self, at: DateTime<Utc>) {
        self.achieved = true;
        self.achieved_date = Some(at);
    }

    pub fn validate(&self) -> Result<(), BadgeValidationError> {
        if self.name.trim().is_empty() {
            return Err(BadgeValidationError::EmptyName);
        }
        if !self.goal.is_finite() || self.goal < 0.0 {
            return Err(BadgeValidationError::InvalidGoal(self.goal));
        }
        if !self.progress.is_finite() || self.progress < 0.0 {
            return Err(BadgeValidationError::InvalidProgress(self.progress));
        }
        if self.achieved_date.is_some() && !self.achieved {
            return Err(BadgeValidationError::DateWithoutAchievement);
        }
        Ok(())
    }
}

impl fmt::Display for Badge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// The six badges seeded on every new budget and on the global record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StarterBadge {
    FirstBudget,
    OnTrack,
    BudgetVeteran,
    BigSaver,
    TransactionTracker,
    DataDiver,
}

impl StarterBadge {
    /// All starter badges in seeding order
    pub fn all() -> &'static [Self] {
        &[
            Self::FirstBudget,
            Self::OnTrack,
            Self::BudgetVeteran,
            Self::BigSaver,
            Self::TransactionTracker,
            Self::DataDiver,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::FirstBudget => "First Budget",
            Self::OnTrack => "On Track",
            Self::BudgetVeteran => "Budget Veteran",
            Self::BigSaver => "Big Saver",
            Self::TransactionTracker => "Transaction Tracker",
            Self::DataDiver => "Data Diver",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::FirstBudget => "Created your first budget",
            Self::OnTrack => "Stay under budget this month",
            Self::BudgetVeteran => "Completed 6 full budgets",
            Self::BigSaver => "Saved over $500 in a single month",
            Self::TransactionTracker => "Log 50 transactions",
            Self::DataDiver => "Log spending for 90 days",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Self::FirstBudget => "flag.fill",
            Self::OnTrack => "checkmark.circle.fill",
            Self::BudgetVeteran => "rosette",
            Self::BigSaver => "trophy.fill",
            Self::TransactionTracker => "list.bullet",
            Self::DataDiver => "calendar",
        }
    }

    pub fn goal(&self) -> f64 {
        match self {
            Self::TransactionTracker => 50.0,
            Self::DataDiver => 90.0,
            _ => 0.0,
        }
    }

    pub fn to_badge(&self, owner: BadgeOwner) -> Badge {
        Badge::new(owner, self.name(), self.description(), self.icon()).with_goal(self.goal())
    }

    /// Fresh starter set for one owner
    pub fn seed(owner: BadgeOwner) -> Vec<Badge> {
        Self::all().iter().map(|b| b.to_badge(owner)).collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum BadgeValidationError {
    EmptyName,
    InvalidGoal(f64),
    InvalidProgress(f64),
    DateWithoutAchievement,
}

impl fmt::Display for BadgeValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Badge name cannot be empty"),
            Self::InvalidGoal(goal) => write!(f, "Badge goal must be a non-negative number, got {}", goal),
            Self::InvalidProgress(p) => {
                write!(f, "Badge progress must be a non-negative number, got {}", p)
            }
            Self::DateWithoutAchievement => {
                write!(f, "Badge has an achieved date but is not achieved")
            }
        }
    }
}

impl std::error::Error for BadgeValidationError {}
