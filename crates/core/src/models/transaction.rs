use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Direction of money flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionType {
    /// Money spent
    Expense,
    /// Money received
    Income,
}

impl std::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransactionType::Expense => write!(f, "Expense"),
            TransactionType::Income => write!(f, "Income"),
        }
    }
}

/// Filter pills of the activity log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TransactionFilter {
    #[default]
    All,
    Expense,
    Income,
}

impl TransactionFilter {
    pub fn matches(&self, kind: TransactionType) -> bool {
        match self {
            TransactionFilter::All => true,
            TransactionFilter::Expense => kind == TransactionType::Expense,
            TransactionFilter::Income => kind == TransactionType::Income,
        }
    }
}

/// A single recorded expense or income.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique identifier
    pub id: Uuid,

    /// Short description shown in lists (e.g., "Grocery Shopping")
    pub title: String,

    /// Amount of money (always positive; direction comes from `kind`)
    pub amount: f64,

    /// Category name (e.g., "Food", "Transport")
    pub category: String,

    /// Day the transaction happened (daily granularity)
    pub date: NaiveDate,

    /// Expense or income
    pub kind: TransactionType,
}

impl Transaction {
    pub fn new(
        kind: TransactionType,
        title: impl Into<String>,
        amount: f64,
        category: impl Into<String>,
        date: NaiveDate,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            amount,
            category: category.into(),
            date,
            kind,
        }
    }

    pub fn expense(
        title: impl Into<String>,
        amount: f64,
        category: impl Into<String>,
        date: NaiveDate,
    ) -> Self {
        Self::new(TransactionType::Expense, title, amount, category, date)
    }

    pub fn income(
        title: impl Into<String>,
        amount: f64,
        category: impl Into<String>,
        date: NaiveDate,
    ) -> Self {
        Self::new(TransactionType::Income, title, amount, category, date)
    }

    /// `YYYY-MM-DD`, the key used for calendar activity markers.
    pub fn iso_date(&self) -> String {
        super::calendar::iso_date(self.date)
    }
}

/// Income and expense sums over a set of transactions.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MonthTotals {
    pub income: f64,
    pub expense: f64,
}

impl MonthTotals {
    /// Income minus expense
    pub fn net(&self) -> f64 {
        self.income - self.expense
    }
}
