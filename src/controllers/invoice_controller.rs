use chrono::NaiveDate;
use sqlx::PgPool;
use tracing::info;
use validator::Validate;

use crate::dto::invoice_dto::CreateInvoiceRequest;
use crate::dto::ApiResponse;
use crate::repositories::service_repository::ServiceRepository;
use crate::services::invoice::{build_invoice, unique_ids, Invoice};
use crate::utils::errors::AppError;
use crate::utils::validation::clean_optional;

pub struct InvoiceController {
    services: ServiceRepository,
}

impl InvoiceController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            services: ServiceRepository::new(pool),
        }
    }

    /// Armar la fatura y marcar sus servicios como faturados
    pub async fn create(
        &self,
        request: CreateInvoiceRequest,
        today: NaiveDate,
    ) -> Result<ApiResponse<Invoice>, AppError> {
        request.validate()?;

        let ids = unique_ids(&request.service_ids);
        let services = self.services.find_by_ids(&ids).await?;
        let invoice = build_invoice(
            &ids,
            services,
            request.bank,
            request.issue_date.unwrap_or(today),
            clean_optional(request.notes),
        )?;

        self.services.mark_invoiced(&ids).await?;
        info!(
            "🧾 Fatura {} para {}: {} servicio(s), total {}",
            invoice.number,
            invoice.company,
            invoice.items.len(),
            invoice.total
        );

        Ok(ApiResponse::success_with_message(invoice, "Fatura generada"))
    }
}
