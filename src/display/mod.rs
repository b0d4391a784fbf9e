//! Display formatting for terminal output
//!
//! Reports format themselves; this module covers plain entity listings.

pub mod budget;
pub mod category;
pub mod transaction;

pub use budget::{format_budget_details, format_budget_list};
pub use category::format_category_list;
pub use transaction::{format_transaction_list, format_transaction_row};
