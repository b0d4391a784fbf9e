//! Budget display formatting

use crate::config::settings::Settings;
use crate::models::{Budget, Transaction};

/// Format budgets as a table
pub fn format_budget_list(budgets: &[Budget], settings: &Settings) -> String {
    if budgets.is_empty() {
        return "No budgets found.\n\nRun 'budgetxp budget create' to add one.\n".to_string();
    }

    let name_width = budgets
        .iter()
        .map(|b| b.name.chars().count())
        .max()
        .unwrap_or(4)
        .max(4);

    let mut output = String::new();
    output.push_str(&format!(
        "{:<12}  {:<width$}  {:>12}  {:<23}  {:>5}\n",
        "ID",
        "Name",
        "Limit",
        "Period",
        "Level",
        width = name_width
    ));
    output.push_str(&"-".repeat(name_width + 62));
    output.push('\n');

    for budget in budgets {
        output.push_str(&format!(
            "{:<12}  {:<width$}  {:>12}  {:<23}  {:>5}\n",
            budget.id.to_string(),
            budget.name,
            settings.format_money(budget.limit),
            format_period(budget, settings),
            budget.level(),
            width = name_width
        ));
    }

    output
}

/// Format one budget with its most recent transactions
pub fn format_budget_details(budget: &Budget, recent: &[Transaction], settings: &Settings) -> String {
    let mut output = String::new();

    output.push_str(&format!("Budget: {}\n", budget.name));
    output.push_str(&format!("  ID:        {}\n", budget.id.full()));
    output.push_str(&format!("  Limit:     {}\n", settings.format_money(budget.limit)));
    output.push_str(&format!("  Period:    {}\n", format_period(budget, settings)));
    output.push_str(&format!("  XP:        {} (level {})\n", budget.xp, budget.level()));
    output.push_str(&format!(
        "  Emergency: {} of {}\n",
        settings.format_money(budget.emergency_fund.progress),
        settings.format_money(budget.emergency_fund.goal)
    ));
    output.push_str(&format!(
        "  Counts:    {} transactions, {} categories, {} badges\n",
        budget.transaction_ids.len(),
        budget.category_ids.len(),
        budget.badge_ids.len()
    ));

    output.push_str("\nRecent transactions:\n");
    if recent.is_empty() {
        output.push_str("  (none)\n");
    } else {
        for txn in recent {
            output.push_str(&format!(
                "  {}\n",
                super::transaction::format_transaction_row(txn, settings)
            ));
        }
    }

    output
}

fn format_period(budget: &Budget, settings: &Settings) -> String {
    format!(
        "{} - {}",
        budget.start_date.format(&settings.date_format),
        budget.end_date.format(&settings.date_format)
    )
}
