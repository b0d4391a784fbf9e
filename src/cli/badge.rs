//! Badge CLI commands
//!
//! Manual access to the badge hooks. Without `--budget` a command applies
//! to the global badges.

use chrono::Utc;
use clap::{Args, Subcommand};

use crate::error::{BudgetXpError, BudgetXpResult};
use crate::models::{AchievementsHandle, Badge};
use crate::services::{BadgeService, BudgetService};
use crate::storage::Storage;

#[derive(Args)]
pub struct BadgeScope {
    /// Budget name or ID (global badges when omitted)
    #[arg(short, long)]
    budget: Option<String>,
}

#[derive(Subcommand)]
pub enum BadgeCommands {
    /// List badges
    List {
        #[command(flatten)]
        scope: BadgeScope,
    },

    /// Record a progress count on a badge
    Progress {
        /// Badge name or ID
        badge: String,
        progress: f64,
        #[command(flatten)]
        scope: BadgeScope,
    },

    /// Mark a badge as achieved now
    Achieve {
        /// Badge name or ID
        badge: String,
        #[command(flatten)]
        scope: BadgeScope,
    },
}

pub fn handle_badge_command(
    storage: &Storage,
    handle: AchievementsHandle,
    cmd: BadgeCommands,
) -> BudgetXpResult<()> {
    let service = BadgeService::new(storage);

    match cmd {
        BadgeCommands::List { scope } => {
            for badge in scoped_badges(storage, handle, &scope)? {
                println!("{}", format_badge_line(&badge));
            }
        }

        BadgeCommands::Progress {
            badge,
            progress,
            scope,
        } => {
            let target = find_badge(storage, handle, &scope, &badge)?;
            let updated = service.record_progress(target.id, progress)?;
            println!("{}", format_badge_line(&updated));
        }

        BadgeCommands::Achieve { badge, scope } => {
            let target = find_badge(storage, handle, &scope, &badge)?;
            let updated = service.mark_achieved(target.id, Utc::now())?;
            println!("{}", format_badge_line(&updated));
        }
    }

    Ok(())
}

fn scoped_badges(
    storage: &Storage,
    handle: AchievementsHandle,
    scope: &BadgeScope,
) -> BudgetXpResult<Vec<Badge>> {
    let service = BadgeService::new(storage);
    match &scope.budget {
        Some(budget) => {
            let budget = BudgetService::new(storage).resolve(budget)?;
            service.for_budget(budget.id)
        }
        None => service.global(handle),
    }
}

fn find_badge(
    storage: &Storage,
    handle: AchievementsHandle,
    scope: &BadgeScope,
    identifier: &str,
) -> BudgetXpResult<Badge> {
    let badges = scoped_badges(storage, handle, scope)?;
    BadgeService::find_in(&badges, identifier)
        .ok_or_else(|| BudgetXpError::badge_not_found(identifier))
}

fn format_badge_line(badge: &Badge) -> String {
    let mark = if badge.achieved { "[x]" } else { "[ ]" };
    let progress = if badge.is_progress_tracked() {
        format!(
            " {}/{} ({:.0}%)",
            badge.progress,
            badge.goal,
            badge.progress_fraction() * 100.0
        )
    } else {
        String::new()
    };
    format!("{} {}{}", mark, badge.name, progress)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_achieve_global_badge_by_name() {
        let storage = Storage::in_memory().unwrap();
        let handle = storage.ensure_achievements().unwrap();

        handle_badge_command(
            &storage,
            handle,
            BadgeCommands::Achieve {
                badge: "big saver".into(),
                scope: BadgeScope { budget: None },
            },
        )
        .unwrap();

        let badges = storage.global_badges(handle).unwrap();
        let saver = BadgeService::find_in(&badges, "Big Saver").unwrap();
        assert!(saver.achieved);
        assert!(saver.achieved_date.is_some());
    }

    #[test]
    fn test_badge_line() {
        let storage = Storage::in_memory().unwrap();
        let handle = storage.ensure_achievements().unwrap();
        let badges = storage.global_badges(handle).unwrap();
        let tracker = BadgeService::find_in(&badges, "Transaction Tracker").unwrap();

        assert_eq!(format_badge_line(&tracker), "[ ] Transaction Tracker 0/50 (0%)");
    }
}
