//! Spending analytics
//!
//! Category breakdown and the implied Miscellaneous allocation, plus the
//! per-budget report built from them. Everything here is a pure function
//! of the current entity state and is recomputed on every call.

use std::collections::HashMap;

use chrono::NaiveDate;

use crate::error::BudgetXpResult;
use crate::models::{Budget, BudgetCategory, BudgetId, Money, Transaction};
use crate::storage::Storage;

/// Sum transaction amounts per category label
///
/// Grouping is by the label stored on each transaction, so renamed or
/// deleted categories still accumulate under their old name. Totals
/// saturate rather than overflow.
pub fn category_breakdown(transactions: &[Transaction]) -> HashMap<String, Money> {
    let mut totals: HashMap<String, Money> = HashMap::new();
    for txn in transactions {
        *totals.entry(txn.category.clone()).or_default() += txn.amount;
    }
    totals
}

/// Sum of the amounts allocated to `categories`
pub fn allocated_total(categories: &[BudgetCategory]) -> Money {
    categories.iter().map(|c| c.amount).sum()
}

/// The budget's categories, plus a Miscellaneous entry for any unallocated limit
///
/// The Miscellaneous entry is built fresh on each call and is never stored.
/// An over-allocated budget gets its categories back unchanged.
pub fn adjusted_categories(budget: &Budget, categories: &[BudgetCategory]) -> Vec<BudgetCategory> {
    let mut adjusted = categories.to_vec();
    let allocated = allocated_total(categories);

    if allocated < budget.limit {
        adjusted.push(BudgetCategory::miscellaneous(
            budget.id,
            budget.limit - allocated,
        ));
    }

    adjusted
}

/// One row of the spending report
#[derive(Debug, Clone)]
pub struct SpendingRow {
    pub name: String,
    pub allocated: Money,
    pub spent: Money,
    /// spent / allocated, 0 when nothing is allocated; may exceed 1
    pub fraction: f64,
    /// True for the computed Miscellaneous row
    pub synthetic: bool,
}

/// Spending analysis for one budget
#[derive(Debug, Clone)]
pub struct SpendingReport {
    pub budget_id: BudgetId,
    pub budget_name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub limit: Money,
    /// Sum of stored category allocations (Miscellaneous excluded)
    pub allocated: Money,
    /// Sum of all transactions, orphaned labels included
    pub spent: Money,
    /// limit - spent; negative when overspent
    pub remaining: Money,
    pub over_allocated: bool,
    pub rows: Vec<SpendingRow>,
    /// Labels on transactions that match no current category, sorted by name
    pub orphaned: Vec<(String, Money)>,
    pub transaction_count: usize,
    /// Transactions dated outside the budget period (still counted in `spent`)
    pub out_of_period: usize,
}

impl SpendingReport {
    /// Build the report from the store
    pub fn for_budget(storage: &Storage, budget: &Budget) -> BudgetXpResult<Self> {
        let categories = storage.categories_for(budget)?;
        let transactions = storage.transactions_for(budget)?;
        Ok(Self::from_parts(budget, &categories, &transactions))
    }

    pub fn from_parts(
        budget: &Budget,
        categories: &[BudgetCategory],
        transactions: &[Transaction],
    ) -> Self {
        let breakdown = category_breakdown(transactions);
        let allocated = allocated_total(categories);
        let adjusted = adjusted_categories(budget, categories);

        let rows: Vec<SpendingRow> = adjusted
            .iter()
            .enumerate()
            .map(|(i, category)| {
                let spent = breakdown.get(&category.name).copied().unwrap_or_default();
                let fraction = if category.amount.is_zero() {
                    0.0
                } else {
                    spent.as_f64() / category.amount.as_f64()
                };
                SpendingRow {
                    name: category.name.clone(),
                    allocated: category.amount,
                    spent,
                    fraction,
                    synthetic: i >= categories.len(),
                }
            })
            .collect();

        let mut orphaned: Vec<(String, Money)> = breakdown
            .iter()
            .filter(|(label, _)| !adjusted.iter().any(|c| &c.name == *label))
            .map(|(label, amount)| (label.clone(), *amount))
            .collect();
        orphaned.sort_by(|a, b| a.0.cmp(&b.0));

        let spent: Money = breakdown.values().sum();

        Self {
            budget_id: budget.id,
            budget_name: budget.name.clone(),
            start_date: budget.start_date,
            end_date: budget.end_date,
            limit: budget.limit,
            allocated,
            spent,
            remaining: budget.limit - spent,
            over_allocated: allocated > budget.limit,
            rows,
            orphaned,
            transaction_count: transactions.len(),
            out_of_period: transactions
                .iter()
                .filter(|t| !budget.contains_date(t.date))
                .count(),
        }
    }

    /// Row for a category name, first match
    pub fn row(&self, name: &str) -> Option<&SpendingRow> {
        self.rows.iter().find(|r| r.name == name)
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, currency_symbol: &str) -> String {
        let money = |m: Money| m.format_with_symbol(currency_symbol);
        let mut output = String::new();

        output.push_str(&format!(
            "Spending: {} ({} to {})\n",
            self.budget_name, self.start_date, self.end_date
        ));
        output.push_str(&"=".repeat(64));
        output.push('\n');
        output.push_str(&format!("Limit:      {}\n", money(self.limit)));
        output.push_str(&format!("Allocated:  {}\n", money(self.allocated)));
        output.push_str(&format!("Spent:      {}\n", money(self.spent)));
        output.push_str(&format!("Remaining:  {}\n", money(self.remaining)));
        if self.over_allocated {
            output.push_str("Categories allocate more than the budget limit.\n");
        }
        output.push('\n');

        output.push_str(&format!(
            "{:<24} {:>12} {:>12} {:>7}\n",
            "Category", "Allocated", "Spent", "Used"
        ));
        output.push_str(&"-".repeat(64));
        output.push('\n');

        for row in &self.rows {
            let name = if row.synthetic {
                format!("{}*", row.name)
            } else {
                row.name.clone()
            };
            output.push_str(&format!(
                "{:<24} {:>12} {:>12} {:>6.0}%\n",
                name,
                money(row.allocated),
                money(row.spent),
                row.fraction * 100.0
            ));
        }

        if !self.orphaned.is_empty() {
            output.push_str("\nNo longer a category:\n");
            for (label, amount) in &self.orphaned {
                output.push_str(&format!("  {:<22} {:>12}\n", label, money(*amount)));
            }
        }

        output.push_str(&format!("\n{} transaction(s)", self.transaction_count));
        if self.out_of_period > 0 {
            output.push_str(&format!(
                ", {} dated outside the budget period",
                self.out_of_period
            ));
        }
        output.push('\n');

        output
    }
}
