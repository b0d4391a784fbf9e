//! Global achievements CLI commands

use clap::Subcommand;

use super::parse_optional_money;
use crate::config::settings::Settings;
use crate::error::BudgetXpResult;
use crate::models::AchievementsHandle;
use crate::services::AchievementsService;
use crate::storage::Storage;

#[derive(Subcommand)]
pub enum AchievementsCommands {
    /// Show level, emergency fund and badges
    Show,

    /// Set the global emergency-fund goal or progress
    Fund {
        #[arg(short, long)]
        goal: Option<String>,
        #[arg(short, long)]
        progress: Option<String>,
    },

    /// Set the global XP
    Xp { xp: u32 },
}

pub fn handle_achievements_command(
    storage: &Storage,
    settings: &Settings,
    handle: AchievementsHandle,
    cmd: AchievementsCommands,
) -> BudgetXpResult<()> {
    let service = AchievementsService::new(storage, handle);

    match cmd {
        AchievementsCommands::Show => {
            print!(
                "{}",
                service.report()?.format_terminal(&settings.currency_symbol)
            );
        }

        AchievementsCommands::Fund { goal, progress } => {
            let store = service.set_emergency_fund(
                parse_optional_money(goal)?,
                parse_optional_money(progress)?,
            )?;
            let fund = store.emergency_fund;
            println!(
                "Emergency fund: {} of {} ({:.0}%)",
                settings.format_money(fund.progress),
                settings.format_money(fund.goal),
                fund.ratio() * 100.0
            );
        }

        AchievementsCommands::Xp { xp } => {
            let store = service.set_xp(xp)?;
            println!("{} XP, level {}", store.xp, store.level());
        }
    }

    Ok(())
}
