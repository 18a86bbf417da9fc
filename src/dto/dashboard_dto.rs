use serde::Serialize;

use crate::services::document_alerts::DocumentAlert;
use crate::services::expense_report::ExpenseSummary;

#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub month: String,
    pub pending_quotes: i64,
    pub upcoming_services: i64,
    pub vehicles: i64,
    pub drivers: i64,
    pub expenses: ExpenseSummary,
    pub document_alerts: Vec<DocumentAlert>,
}
