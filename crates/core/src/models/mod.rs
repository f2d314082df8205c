pub mod budget;
pub mod calendar;
pub mod chart;
pub mod ledger;
pub mod settings;
pub mod transaction;
