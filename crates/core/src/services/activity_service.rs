use chrono::NaiveDate;
use std::collections::{HashMap, HashSet};

use crate::errors::CoreError;
use crate::models::calendar::CalendarMonth;
use crate::models::chart::ChartEntry;
use crate::models::transaction::{MonthTotals, Transaction, TransactionFilter, TransactionType};

/// Default category colours, as shown in the category picker.
pub const CATEGORY_COLORS: &[(&str, &str)] = &[
    ("Food", "#F97316"),
    ("Transport", "#3B82F6"),
    ("Shopping", "#EC4899"),
    ("Entertainment", "#8B5CF6"),
    ("Utilities", "#10B981"),
    ("Health", "#EF4444"),
    ("Education", "#6366F1"),
    ("Travel", "#0EA5E9"),
    ("Housing", "#F59E0B"),
    ("Other", "#71717A"),
];

/// Derives what the screens show from the transaction list:
/// month/type filtering, totals, calendar activity markers and the
/// per-category spending breakdown that feeds the pie chart.
///
/// Pure business logic — no I/O. Easy to test.
pub struct ActivityService;

impl ActivityService {
    pub fn new() -> Self {
        Self
    }

    /// Reject transactions the UI should never have let through.
    pub fn validate(&self, transaction: &Transaction) -> Result<(), CoreError> {
        if !transaction.amount.is_finite() || transaction.amount <= 0.0 {
            return Err(CoreError::ValidationError(format!(
                "amount must be positive, got {}",
                transaction.amount
            )));
        }
        if transaction.title.trim().is_empty() {
            return Err(CoreError::ValidationError("title must not be empty".into()));
        }
        if transaction.category.trim().is_empty() {
            return Err(CoreError::ValidationError("category must not be empty".into()));
        }
        Ok(())
    }

    /// Transactions of `month` that pass `filter`, newest first.
    pub fn filter_month<'a>(
        &self,
        transactions: &'a [Transaction],
        month: CalendarMonth,
        filter: TransactionFilter,
    ) -> Vec<&'a Transaction> {
        let mut result: Vec<&Transaction> = transactions
            .iter()
            .filter(|t| month.contains(t.date) && filter.matches(t.kind))
            .collect();
        // Stable sort: same-day transactions keep insertion order
        result.sort_by(|a, b| b.date.cmp(&a.date));
        result
    }

    /// Income and expense sums.
    pub fn month_totals<'a, I>(&self, transactions: I) -> MonthTotals
    where
        I: IntoIterator<Item = &'a Transaction>,
    {
        transactions
            .into_iter()
            .fold(MonthTotals::default(), |mut totals, t| {
                match t.kind {
                    TransactionType::Income => totals.income += t.amount,
                    TransactionType::Expense => totals.expense += t.amount,
                }
                totals
            })
    }

    /// `YYYY-MM-DD` of every day with at least one transaction.
    pub fn activity_dates(&self, transactions: &[Transaction]) -> HashSet<String> {
        transactions.iter().map(Transaction::iso_date).collect()
    }

    /// Everything recorded on `date`, in insertion order.
    pub fn transactions_on<'a>(
        &self,
        transactions: &'a [Transaction],
        date: NaiveDate,
    ) -> Vec<&'a Transaction> {
        transactions.iter().filter(|t| t.date == date).collect()
    }

    /// Expenses of `month` summed per category, in first-seen order.
    ///
    /// Colours come from `palette` (category name → colour); unknown
    /// categories are left uncoloured for the renderer to fill in.
    pub fn category_breakdown(
        &self,
        transactions: &[Transaction],
        month: CalendarMonth,
        palette: &HashMap<String, String>,
    ) -> Vec<ChartEntry> {
        let mut entries: Vec<ChartEntry> = Vec::new();
        let mut index_by_category: HashMap<&str, usize> = HashMap::new();

        for t in transactions
            .iter()
            .filter(|t| t.kind == TransactionType::Expense && month.contains(t.date))
        {
            match index_by_category.get(t.category.as_str()) {
                Some(&i) => entries[i].value += t.amount,
                None => {
                    index_by_category.insert(t.category.as_str(), entries.len());
                    entries.push(ChartEntry {
                        label: t.category.clone(),
                        value: t.amount,
                        color: palette.get(&t.category).cloned(),
                    });
                }
            }
        }
        entries
    }

    /// [`CATEGORY_COLORS`] as a lookup map.
    pub fn default_palette(&self) -> HashMap<String, String> {
        CATEGORY_COLORS
            .iter()
            .map(|(name, color)| (name.to_string(), color.to_string()))
            .collect()
    }
}

impl Default for ActivityService {
    fn default() -> Self {
        Self::new()
    }
}
