// ═══════════════════════════════════════════════════════════════════
// Service & Integration Tests — ActivityService, RenderService,
// ExpenseTracker facade
// ═══════════════════════════════════════════════════════════════════

use chrono::NaiveDate;
use std::collections::HashMap;
use uuid::Uuid;

use expense_tracker_core::errors::CoreError;
use expense_tracker_core::models::budget::BudgetStatus;
use expense_tracker_core::models::calendar::CalendarMonth;
use expense_tracker_core::models::chart::{ChartGeometry, PieChart};
use expense_tracker_core::models::ledger::Ledger;
use expense_tracker_core::models::settings::{Settings, ThemeMode};
use expense_tracker_core::models::transaction::{Transaction, TransactionFilter};
use expense_tracker_core::services::activity_service::{ActivityService, CATEGORY_COLORS};
use expense_tracker_core::services::chart_service::PieChartGeometryBuilder;
use expense_tracker_core::services::render_service::{ChartPalette, RenderService};
use expense_tracker_core::ExpenseTracker;

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn march_2024() -> CalendarMonth {
    CalendarMonth::new(2024, 2).unwrap()
}

fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("expense_tracker_core=debug")
        .with_test_writer()
        .try_init();
}

/// A few weeks of activity spanning January to March 2024.
fn sample_transactions() -> Vec<Transaction> {
    vec![
        Transaction::expense("Grocery Shopping", 45.99, "Food", d(2024, 3, 15)),
        Transaction::income("Salary Deposit", 2500.0, "Income", d(2024, 3, 10)),
        Transaction::expense("Netflix Subscription", 12.99, "Entertainment", d(2024, 3, 5)),
        Transaction::expense("Coffee Shop", 8.5, "Food", d(2024, 3, 18)),
        Transaction::income("Freelance Project", 750.0, "Income", d(2024, 3, 17)),
        Transaction::expense("Uber Rides", 42.5, "Transport", d(2024, 3, 1)),
        Transaction::expense("Gas Station", 35.4, "Transport", d(2024, 2, 28)),
        Transaction::expense("Rent Payment", 1200.0, "Housing", d(2024, 1, 31)),
    ]
}

// ═══════════════════════════════════════════════════════════════════
//  ActivityService
// ═══════════════════════════════════════════════════════════════════

mod activity_service {
    use super::*;

    #[test]
    fn filter_month_all_newest_first() {
        let txs = sample_transactions();
        let result = ActivityService::new().filter_month(&txs, march_2024(), TransactionFilter::All);
        let titles: Vec<&str> = result.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(
            titles,
            vec![
                "Coffee Shop",
                "Freelance Project",
                "Grocery Shopping",
                "Salary Deposit",
                "Netflix Subscription",
                "Uber Rides",
            ]
        );
    }

    #[test]
    fn filter_month_by_type() {
        let txs = sample_transactions();
        let service = ActivityService::new();
        let income = service.filter_month(&txs, march_2024(), TransactionFilter::Income);
        assert_eq!(income.len(), 2);
        let expense = service.filter_month(&txs, march_2024(), TransactionFilter::Expense);
        assert_eq!(expense.len(), 4);
    }

    #[test]
    fn filter_month_empty_month() {
        let txs = sample_transactions();
        let result = ActivityService::new().filter_month(
            &txs,
            CalendarMonth::new(2024, 5).unwrap(),
            TransactionFilter::All,
        );
        assert!(result.is_empty());
    }

    #[test]
    fn month_totals() {
        let txs = sample_transactions();
        let service = ActivityService::new();
        let march = service.filter_month(&txs, march_2024(), TransactionFilter::All);
        let totals = service.month_totals(march);
        assert!((totals.income - 3250.0).abs() < 1e-9);
        assert!((totals.expense - (45.99 + 12.99 + 8.5 + 42.5)).abs() < 1e-9);
    }

    #[test]
    fn activity_dates_deduplicated() {
        let mut txs = sample_transactions();
        txs.push(Transaction::expense("Snack", 3.0, "Food", d(2024, 3, 15)));
        let dates = ActivityService::new().activity_dates(&txs);
        assert_eq!(dates.len(), 8);
        assert!(dates.contains("2024-03-15"));
        assert!(dates.contains("2024-01-31"));
    }

    #[test]
    fn transactions_on_day() {
        let txs = sample_transactions();
        let result = ActivityService::new().transactions_on(&txs, d(2024, 3, 10));
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].title, "Salary Deposit");
    }

    #[test]
    fn category_breakdown_groups_expenses_in_first_seen_order() {
        let txs = sample_transactions();
        let service = ActivityService::new();
        let entries = service.category_breakdown(&txs, march_2024(), &service.default_palette());
        let labels: Vec<&str> = entries.iter().map(|e| e.label.as_str()).collect();
        assert_eq!(labels, vec!["Food", "Entertainment", "Transport"]);
        assert!((entries[0].value - 54.49).abs() < 1e-9);
        assert!((entries[2].value - 42.5).abs() < 1e-9);
        assert_eq!(entries[0].color.as_deref(), Some("#F97316"));
    }

    #[test]
    fn category_breakdown_unknown_category_uncoloured() {
        let txs = vec![Transaction::expense("Gift", 20.0, "Presents", d(2024, 3, 2))];
        let entries = ActivityService::new().category_breakdown(&txs, march_2024(), &HashMap::new());
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].color, None);
    }

    #[test]
    fn breakdown_feeds_chart_builder() {
        let txs = sample_transactions();
        let service = ActivityService::new();
        let entries = service.category_breakdown(&txs, march_2024(), &service.default_palette());
        let chart = PieChartGeometryBuilder::default().build(&entries).unwrap();
        assert_eq!(chart.segments[0].label, "Food");
        assert_eq!(chart.segments[1].label, "Transport");
        assert_eq!(chart.segments[2].label, "Entertainment");
        assert!((chart.total - 109.98).abs() < 1e-9);
    }

    #[test]
    fn validate_rejects_bad_amounts() {
        let service = ActivityService::new();
        for amount in [0.0, -5.0, f64::NAN, f64::INFINITY] {
            let t = Transaction::expense("x", amount, "Food", d(2024, 3, 1));
            assert!(
                matches!(service.validate(&t), Err(CoreError::ValidationError(_))),
                "amount {amount}"
            );
        }
    }

    #[test]
    fn validate_rejects_blank_title_and_category() {
        let service = ActivityService::new();
        let no_title = Transaction::expense("  ", 5.0, "Food", d(2024, 3, 1));
        assert!(service.validate(&no_title).is_err());
        let no_category = Transaction::expense("Lunch", 5.0, "", d(2024, 3, 1));
        assert!(service.validate(&no_category).is_err());
        let ok = Transaction::expense("Lunch", 5.0, "Food", d(2024, 3, 1));
        assert!(service.validate(&ok).is_ok());
    }
}

// ═══════════════════════════════════════════════════════════════════
//  RenderService
// ═══════════════════════════════════════════════════════════════════

mod render_service {
    use super::*;
    use expense_tracker_core::models::chart::ChartEntry;

    #[test]
    fn one_path_per_segment() {
        let entries = vec![
            ChartEntry::with_color("Food", 245.3, "#f97316"),
            ChartEntry::new("Transport", 120.75),
            ChartEntry::new("Utilities", 145.2),
        ];
        let chart = PieChartGeometryBuilder::default().build(&entries).unwrap();
        let svg = RenderService::new()
            .render_pie_chart(&chart, &ChartGeometry::default(), ThemeMode::Light)
            .to_string();
        assert_eq!(svg.matches("<path").count(), 3);
        assert!(svg.contains("#f97316"));
        assert!(svg.contains("Total"));
        assert!(svg.contains("$511.25"));
        assert!(svg.contains("48.0%"));
    }

    #[test]
    fn uncoloured_segments_use_category_palette() {
        let entries = vec![ChartEntry::new("Rent", 900.0), ChartEntry::new("Bus", 60.0)];
        let chart = PieChartGeometryBuilder::default().build(&entries).unwrap();
        let svg = RenderService::new()
            .render_pie_chart(&chart, &ChartGeometry::default(), ThemeMode::Light)
            .to_string();
        assert!(svg.contains(CATEGORY_COLORS[0].1));
        assert!(svg.contains(CATEGORY_COLORS[1].1));
    }

    #[test]
    fn empty_chart_shows_no_data() {
        let svg = RenderService::new()
            .render_pie_chart(&PieChart::default(), &ChartGeometry::default(), ThemeMode::Dark)
            .to_string();
        assert!(svg.contains("No expense data available"));
        assert!(!svg.contains("<path"));
    }

    #[test]
    fn theme_colours_applied() {
        let chart = PieChartGeometryBuilder::default()
            .build(&[ChartEntry::new("A", 1.0)])
            .unwrap();
        let dark = RenderService::new()
            .render_pie_chart(&chart, &ChartGeometry::default(), ThemeMode::Dark)
            .to_string();
        assert!(dark.contains(ChartPalette::for_theme(ThemeMode::Dark).primary));
        assert!(!dark.contains(ChartPalette::for_theme(ThemeMode::Light).primary));
    }
}

// ═══════════════════════════════════════════════════════════════════
//  ExpenseTracker facade
// ═══════════════════════════════════════════════════════════════════

mod facade {
    use super::*;

    fn tracker_with_samples() -> ExpenseTracker {
        init_logging();
        let mut tracker = ExpenseTracker::new();
        for t in sample_transactions() {
            tracker.add_transaction(t).unwrap();
        }
        tracker
    }

    #[test]
    fn add_and_remove_transaction() {
        let mut tracker = ExpenseTracker::new();
        let id = tracker
            .add_transaction(Transaction::expense("Lunch", 12.0, "Food", d(2024, 3, 4)))
            .unwrap();
        assert_eq!(tracker.transactions().len(), 1);
        let removed = tracker.remove_transaction(id).unwrap();
        assert_eq!(removed.title, "Lunch");
        assert!(tracker.transactions().is_empty());
    }

    #[test]
    fn remove_unknown_transaction() {
        let mut tracker = ExpenseTracker::new();
        let result = tracker.remove_transaction(Uuid::new_v4());
        assert!(matches!(result, Err(CoreError::TransactionNotFound(_))));
    }

    #[test]
    fn invalid_transaction_not_stored() {
        let mut tracker = ExpenseTracker::new();
        let result = tracker.add_transaction(Transaction::expense("Refund", -3.0, "Food", d(2024, 3, 4)));
        assert!(matches!(result, Err(CoreError::ValidationError(_))));
        assert!(tracker.transactions().is_empty());
    }

    #[test]
    fn from_ledger_validates() {
        let ledger = Ledger {
            transactions: vec![Transaction::expense("Bad", 0.0, "Food", d(2024, 3, 4))],
            ..Ledger::default()
        };
        assert!(ExpenseTracker::from_ledger(ledger).is_err());
    }

    #[test]
    fn calendar_marks_activity_and_today() {
        let tracker = tracker_with_samples();
        let cells = tracker.calendar(march_2024(), d(2024, 3, 18)).unwrap();
        // Mar 1 2024 is a Friday
        assert_eq!(cells.iter().take_while(|c| c.is_blank()).count(), 5);
        let active: Vec<u32> = cells
            .iter()
            .filter(|c| c.has_activity)
            .filter_map(|c| c.day)
            .collect();
        assert_eq!(active, vec![1, 5, 10, 15, 17, 18]);
        let today: Vec<u32> = cells.iter().filter(|c| c.is_today).filter_map(|c| c.day).collect();
        assert_eq!(today, vec![18]);
    }

    #[test]
    fn month_navigation_drives_calendar() {
        let tracker = tracker_with_samples();
        let february = march_2024().prev().unwrap();
        let cells = tracker.calendar(february, d(2024, 3, 18)).unwrap();
        assert_eq!(cells.iter().filter(|c| !c.is_blank()).count(), 29);
        assert!(cells.iter().all(|c| !c.is_today));
        assert!(cells.iter().any(|c| c.iso_date == "2024-02-28" && c.has_activity));
    }

    #[test]
    fn month_views() {
        let tracker = tracker_with_samples();
        assert_eq!(tracker.month_transactions(march_2024(), TransactionFilter::Expense).len(), 4);
        let totals = tracker.month_totals(march_2024(), TransactionFilter::Income);
        assert_eq!(totals.expense, 0.0);
        assert_eq!(totals.income, 3250.0);
        assert_eq!(tracker.transactions_on(d(2024, 1, 31)).len(), 1);
    }

    #[test]
    fn category_chart_for_month() {
        let tracker = tracker_with_samples();
        let chart = tracker.category_chart(march_2024()).unwrap();
        assert_eq!(chart.segments.len(), 3);
        assert_eq!(chart.segments[0].label, "Food");
        assert_eq!(chart.segments.last().unwrap().end_angle, 360.0);

        let empty = tracker.category_chart(CalendarMonth::new(2024, 5).unwrap()).unwrap();
        assert!(empty.is_empty());
    }

    #[test]
    fn category_chart_svg() {
        let tracker = tracker_with_samples();
        let svg = tracker.category_chart_svg(march_2024(), ThemeMode::Light).unwrap();
        assert!(svg.contains("<svg"));
        assert_eq!(svg.matches("<path").count(), 3);
    }

    #[test]
    fn budgets_track_month_spending() {
        let mut tracker = tracker_with_samples();
        tracker.set_budget("Food", 100.0).unwrap();
        tracker.set_budget("Housing", 1000.0).unwrap();
        tracker.set_budget("Travel", 300.0).unwrap();

        let march = tracker.budgets(march_2024());
        assert_eq!(march.len(), 3);
        assert_eq!(march[0].name, "Food");
        assert_eq!(march[0].status(), BudgetStatus::Caution);
        assert_eq!(march[1].spent, 0.0);
        assert_eq!(march[2].status(), BudgetStatus::OnTrack);

        let january = tracker.budgets(CalendarMonth::new(2024, 0).unwrap());
        assert_eq!(january[1].status(), BudgetStatus::OverBudget);
    }

    #[test]
    fn set_budget_replaces_and_validates() {
        let mut tracker = ExpenseTracker::new();
        tracker.set_budget("Food", 100.0).unwrap();
        tracker.set_budget("Food", 250.0).unwrap();
        assert_eq!(tracker.ledger().budgets.len(), 1);
        assert_eq!(tracker.ledger().budgets[0].amount, 250.0);
        assert!(matches!(
            tracker.set_budget("Food", 0.0),
            Err(CoreError::ValidationError(_))
        ));
    }

    #[test]
    fn theme_toggle_and_json_roundtrip() {
        let mut tracker = ExpenseTracker::new();
        assert_eq!(tracker.theme(ThemeMode::Dark), ThemeMode::Dark);
        assert_eq!(tracker.toggle_theme(ThemeMode::Dark), ThemeMode::Light);
        assert_eq!(tracker.theme(ThemeMode::Dark), ThemeMode::Light);

        let json = tracker.settings_to_json().unwrap();
        assert!(json.contains("\"light\""));

        let mut restored = ExpenseTracker::new();
        restored.settings_from_json(&json).unwrap();
        assert_eq!(restored.settings(), tracker.settings());
    }

    #[test]
    fn settings_from_bad_json() {
        let mut tracker = ExpenseTracker::new();
        let result = tracker.settings_from_json("{not json");
        assert!(matches!(result, Err(CoreError::Deserialization(_))));
        assert_eq!(tracker.settings(), &Settings::default());
    }

    #[test]
    fn with_settings_uses_chart_geometry() {
        let settings = Settings {
            chart_geometry: ChartGeometry::for_canvas(200.0),
            ..Settings::default()
        };
        let mut tracker = ExpenseTracker::with_settings(settings);
        tracker
            .add_transaction(Transaction::expense("Lunch", 10.0, "Food", d(2024, 3, 4)))
            .unwrap();
        let chart = tracker.category_chart(march_2024()).unwrap();
        assert!(chart.segments[0].path.starts_with("M 100 100 "));
    }

    #[test]
    fn debug_is_summarised() {
        let tracker = tracker_with_samples();
        let out = format!("{tracker:?}");
        assert!(out.contains("transactions: 8"));
    }
}
