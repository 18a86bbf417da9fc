use chrono::{Days, NaiveDate};
use sqlx::PgPool;

use crate::dto::dashboard_dto::DashboardResponse;
use crate::dto::ApiResponse;
use crate::middleware::AuthenticatedUser;
use crate::models::expense::reference_month;
use crate::models::quote::QuoteStatus;
use crate::repositories::{
    driver_repository::DriverRepository, expense_repository::ExpenseRepository,
    quote_repository::QuoteRepository, service_repository::ServiceRepository,
    vehicle_repository::VehicleRepository,
};
use crate::services::document_alerts::collect_alerts;
use crate::services::expense_filter::{self, ExpenseFilters};
use crate::services::expense_report::summarize;
use crate::utils::errors::AppError;

/// Días hacia adelante que cuentan como servicios próximos
const UPCOMING_DAYS: u64 = 7;

pub struct DashboardController {
    quotes: QuoteRepository,
    services: ServiceRepository,
    vehicles: VehicleRepository,
    drivers: DriverRepository,
    expenses: ExpenseRepository,
}

impl DashboardController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            quotes: QuoteRepository::new(pool.clone()),
            services: ServiceRepository::new(pool.clone()),
            vehicles: VehicleRepository::new(pool.clone()),
            drivers: DriverRepository::new(pool.clone()),
            expenses: ExpenseRepository::new(pool),
        }
    }

    pub async fn overview(
        &self,
        actor: &AuthenticatedUser,
        today: NaiveDate,
        alert_window_days: i64,
    ) -> Result<ApiResponse<DashboardResponse>, AppError> {
        let month = reference_month(today);
        let filters = ExpenseFilters {
            month: Some(month.clone()),
            ..Default::default()
        };
        let expenses = expense_filter::apply(self.expenses.list(actor.owner_scope()).await?, &filters, today)?;

        let vehicles = self.vehicles.list().await?;
        let drivers = self.drivers.list().await?;
        let upcoming_until = today.checked_add_days(Days::new(UPCOMING_DAYS)).unwrap_or(NaiveDate::MAX);

        Ok(ApiResponse::success(DashboardResponse {
            month,
            pending_quotes: self.quotes.count_by_status(QuoteStatus::Pendente).await?,
            upcoming_services: self
                .services
                .count_starting_between(today, upcoming_until)
                .await?,
            vehicles: vehicles.len() as i64,
            drivers: drivers.len() as i64,
            expenses: summarize(&expenses, today),
            document_alerts: collect_alerts(&vehicles, &drivers, today, alert_window_days),
        }))
    }
}
