use serde::{Deserialize, Serialize};

use super::settings::Settings;
use super::transaction::Transaction;

/// A monthly spending limit for one category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetLimit {
    pub category: String,
    pub amount: f64,
}

/// The main data container held by the tracker.
///
/// Contains: transactions (insertion order), budget limits, and user settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Ledger {
    /// All recorded expenses and incomes
    pub transactions: Vec<Transaction>,

    /// Per-category monthly limits, in the order they were first set
    #[serde(default)]
    pub budgets: Vec<BudgetLimit>,

    /// User settings (theme, chart placement)
    #[serde(default)]
    pub settings: Settings,
}
