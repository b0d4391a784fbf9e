//! Category display formatting

use crate::config::settings::Settings;
use crate::models::{BudgetCategory, Money};
use crate::reports::allocated_total;

/// Format a budget's stored categories with the unallocated remainder
pub fn format_category_list(categories: &[BudgetCategory], limit: Money, settings: &Settings) -> String {
    if categories.is_empty() {
        return format!(
            "No categories. The whole limit ({}) is Miscellaneous.\n",
            settings.format_money(limit)
        );
    }

    let name_width = categories
        .iter()
        .map(|c| c.name.chars().count())
        .max()
        .unwrap_or(4)
        .max(4);

    let mut output = String::new();
    output.push_str(&format!(
        "{:<12}  {:<width$}  {:>12}\n",
        "ID",
        "Name",
        "Allocated",
        width = name_width
    ));
    output.push_str(&"-".repeat(name_width + 28));
    output.push('\n');

    for category in categories {
        output.push_str(&format!(
            "{:<12}  {:<width$}  {:>12}\n",
            category.id.to_string(),
            category.name,
            settings.format_money(category.amount),
            width = name_width
        ));
    }

    let allocated = allocated_total(categories);
    output.push('\n');
    if allocated < limit {
        output.push_str(&format!(
            "Unallocated (Miscellaneous): {}\n",
            settings.format_money(limit - allocated)
        ));
    } else if allocated > limit {
        output.push_str(&format!(
            "Over-allocated by {}\n",
            settings.format_money(allocated - limit)
        ));
    }

    output
}
