pub mod activity_service;
pub mod calendar_service;
pub mod chart_service;
pub mod render_service;
