pub mod errors;
pub mod models;
pub mod services;

use chrono::NaiveDate;
use models::{
    budget::CategoryBudget,
    calendar::{CalendarCell, CalendarMonth},
    chart::PieChart,
    ledger::{BudgetLimit, Ledger},
    settings::{Settings, ThemeMode},
    transaction::{MonthTotals, Transaction, TransactionFilter},
};
use services::{
    activity_service::ActivityService, calendar_service::CalendarGridBuilder,
    chart_service::PieChartGeometryBuilder, render_service::RenderService,
};
use std::collections::HashMap;
use tracing::info;

use errors::CoreError;

/// Main entry point for the Expense Tracker core library.
/// Holds the ledger and all services needed to derive screen data from it.
#[must_use]
pub struct ExpenseTracker {
    ledger: Ledger,
    activity_service: ActivityService,
    calendar_builder: CalendarGridBuilder,
    render_service: RenderService,
    palette: HashMap<String, String>,
}

impl std::fmt::Debug for ExpenseTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExpenseTracker")
            .field("transactions", &self.ledger.transactions.len())
            .field("budgets", &self.ledger.budgets.len())
            .field("settings", &self.ledger.settings)
            .finish()
    }
}

impl ExpenseTracker {
    /// Create an empty tracker with default settings.
    pub fn new() -> Self {
        Self::build(Ledger::default())
    }

    /// Create an empty tracker with previously stored settings.
    pub fn with_settings(settings: Settings) -> Self {
        Self::build(Ledger {
            settings,
            ..Ledger::default()
        })
    }

    /// Wrap an existing ledger, validating every transaction in it.
    pub fn from_ledger(ledger: Ledger) -> Result<Self, CoreError> {
        let activity_service = ActivityService::new();
        for transaction in &ledger.transactions {
            activity_service.validate(transaction)?;
        }
        Ok(Self::build(ledger))
    }

    fn build(ledger: Ledger) -> Self {
        let activity_service = ActivityService::new();
        let palette = activity_service.default_palette();
        Self {
            ledger,
            activity_service,
            calendar_builder: CalendarGridBuilder::new(),
            render_service: RenderService::new(),
            palette,
        }
    }

    #[must_use]
    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    // ── Transactions ────────────────────────────────────────────────

    /// Record a transaction. Returns its id.
    pub fn add_transaction(&mut self, transaction: Transaction) -> Result<uuid::Uuid, CoreError> {
        self.activity_service.validate(&transaction)?;
        let id = transaction.id;
        info!(%id, kind = %transaction.kind, amount = transaction.amount, "transaction added");
        self.ledger.transactions.push(transaction);
        Ok(id)
    }

    /// Remove a transaction by its id, returning it.
    pub fn remove_transaction(&mut self, id: uuid::Uuid) -> Result<Transaction, CoreError> {
        let idx = self
            .ledger
            .transactions
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| CoreError::TransactionNotFound(id.to_string()))?;
        info!(%id, "transaction removed");
        Ok(self.ledger.transactions.remove(idx))
    }

    /// All transactions in insertion order.
    #[must_use]
    pub fn transactions(&self) -> &[Transaction] {
        &self.ledger.transactions
    }

    /// Transactions of a month that pass `filter`, newest first.
    #[must_use]
    pub fn month_transactions(
        &self,
        month: CalendarMonth,
        filter: TransactionFilter,
    ) -> Vec<&Transaction> {
        self.activity_service
            .filter_month(&self.ledger.transactions, month, filter)
    }

    /// Income/expense sums of a month, restricted by `filter`.
    #[must_use]
    pub fn month_totals(&self, month: CalendarMonth, filter: TransactionFilter) -> MonthTotals {
        self.activity_service
            .month_totals(self.month_transactions(month, filter))
    }

    /// Everything recorded on one day.
    #[must_use]
    pub fn transactions_on(&self, date: NaiveDate) -> Vec<&Transaction> {
        self.activity_service
            .transactions_on(&self.ledger.transactions, date)
    }

    // ── Calendar ────────────────────────────────────────────────────

    /// Grid cells of `month`, with activity markers from the ledger.
    pub fn calendar(
        &self,
        month: CalendarMonth,
        today: NaiveDate,
    ) -> Result<Vec<CalendarCell>, CoreError> {
        let activity = self
            .activity_service
            .activity_dates(&self.ledger.transactions);
        self.calendar_builder
            .build(month.year(), month.month() as i32, &activity, today)
    }

    // ── Charts ──────────────────────────────────────────────────────

    /// Spending per category for `month` as pie chart geometry.
    pub fn category_chart(&self, month: CalendarMonth) -> Result<PieChart, CoreError> {
        let entries = self.activity_service.category_breakdown(
            &self.ledger.transactions,
            month,
            &self.palette,
        );
        PieChartGeometryBuilder::new(self.ledger.settings.chart_geometry.clone()).build(&entries)
    }

    /// The category chart of `month` as an SVG string, in the effective theme.
    pub fn category_chart_svg(
        &self,
        month: CalendarMonth,
        system: ThemeMode,
    ) -> Result<String, CoreError> {
        let chart = self.category_chart(month)?;
        let document = self.render_service.render_pie_chart(
            &chart,
            &self.ledger.settings.chart_geometry,
            self.theme(system),
        );
        Ok(document.to_string())
    }

    // ── Budgets ─────────────────────────────────────────────────────

    /// Set (or replace) the monthly limit of a category.
    pub fn set_budget(&mut self, category: impl Into<String>, amount: f64) -> Result<(), CoreError> {
        let category = category.into();
        if !amount.is_finite() || amount <= 0.0 {
            return Err(CoreError::ValidationError(format!(
                "budget for '{category}' must be positive, got {amount}"
            )));
        }
        match self
            .ledger
            .budgets
            .iter_mut()
            .find(|b| b.category == category)
        {
            Some(limit) => limit.amount = amount,
            None => self.ledger.budgets.push(BudgetLimit { category, amount }),
        }
        Ok(())
    }

    /// Spending of `month` against every configured limit.
    #[must_use]
    pub fn budgets(&self, month: CalendarMonth) -> Vec<CategoryBudget> {
        let spent: HashMap<String, f64> = self
            .activity_service
            .category_breakdown(&self.ledger.transactions, month, &self.palette)
            .into_iter()
            .map(|entry| (entry.label, entry.value))
            .collect();
        self.ledger
            .budgets
            .iter()
            .map(|limit| CategoryBudget {
                name: limit.category.clone(),
                spent: spent.get(&limit.category).copied().unwrap_or(0.0),
                budget: limit.amount,
                color: self.palette.get(&limit.category).cloned(),
            })
            .collect()
    }

    // ── Settings ────────────────────────────────────────────────────

    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.ledger.settings
    }

    /// Effective theme given the current system colour scheme.
    pub fn theme(&self, system: ThemeMode) -> ThemeMode {
        self.ledger.settings.theme.resolve(system)
    }

    /// Flip the displayed theme and pin it. Returns the new mode.
    pub fn toggle_theme(&mut self, system: ThemeMode) -> ThemeMode {
        let mode = self.ledger.settings.theme.toggle(system);
        info!(%mode, "theme toggled");
        mode
    }

    /// Settings as JSON, for the host to store under
    /// [`THEME_STORAGE_KEY`](models::settings::THEME_STORAGE_KEY).
    pub fn settings_to_json(&self) -> Result<String, CoreError> {
        serde_json::to_string(&self.ledger.settings)
            .map_err(|e| CoreError::Serialization(e.to_string()))
    }

    /// Replace the settings with a stored JSON blob.
    pub fn settings_from_json(&mut self, json: &str) -> Result<(), CoreError> {
        self.ledger.settings = serde_json::from_str(json)?;
        Ok(())
    }
}

impl Default for ExpenseTracker {
    fn default() -> Self {
        Self::new()
    }
}
