use serde::{Deserialize, Serialize};

/// How close a category is to its monthly budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BudgetStatus {
    /// Below 50% of the budget
    OnTrack,
    /// 50% to 79%
    Caution,
    /// 80% or more, not yet exceeded
    NearLimit,
    /// Spent more than the budget
    OverBudget,
}

impl std::fmt::Display for BudgetStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BudgetStatus::OnTrack => write!(f, "On track"),
            BudgetStatus::Caution => write!(f, "Caution"),
            BudgetStatus::NearLimit => write!(f, "Near limit"),
            BudgetStatus::OverBudget => write!(f, "Over budget"),
        }
    }
}

/// Spending against a per-category budget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryBudget {
    pub name: String,
    pub spent: f64,
    /// Always positive
    pub budget: f64,
    pub color: Option<String>,
}

impl CategoryBudget {
    pub fn new(name: impl Into<String>, spent: f64, budget: f64) -> Self {
        Self {
            name: name.into(),
            spent,
            budget,
            color: None,
        }
    }

    /// Rounded share of the budget spent, capped at 100.
    pub fn progress_pct(&self) -> u32 {
        if self.budget <= 0.0 {
            return 100;
        }
        let pct = (self.spent / self.budget * 100.0).round();
        pct.clamp(0.0, 100.0) as u32
    }

    pub fn is_over_budget(&self) -> bool {
        self.spent > self.budget
    }

    pub fn status(&self) -> BudgetStatus {
        match self.progress_pct() {
            p if p < 50 => BudgetStatus::OnTrack,
            p if p < 80 => BudgetStatus::Caution,
            _ if self.is_over_budget() => BudgetStatus::OverBudget,
            _ => BudgetStatus::NearLimit,
        }
    }
}
