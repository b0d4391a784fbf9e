//! Transaction display formatting

use crate::config::settings::Settings;
use crate::models::Transaction;

/// Format a single transaction as one line
pub fn format_transaction_row(txn: &Transaction, settings: &Settings) -> String {
    let description = if txn.description.is_empty() {
        String::new()
    } else {
        format!("  {}", truncate(&txn.description, 30))
    };

    format!(
        "{:<12}  {}  {:>12}  {:<16}{}",
        txn.id.to_string(),
        txn.date.format(&settings.date_format),
        settings.format_money(txn.amount),
        truncate(&txn.category, 16),
        description
    )
}

/// Format a list of transactions
pub fn format_transaction_list(transactions: &[Transaction], settings: &Settings) -> String {
    if transactions.is_empty() {
        return "No transactions found.\n".to_string();
    }

    let mut output = String::new();
    for txn in transactions {
        output.push_str(&format_transaction_row(txn, settings));
        output.push('\n');
    }
    output
}

/// Truncate a string to a maximum number of characters
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(1)).collect();
        format!("{}…", kept)
    }
}
