//! Armado de faturas
//!
//! Reúne servicios seleccionados de una misma empresa en un documento de
//! fatura con los datos bancarios informados por el usuario.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::HashSet;
use uuid::Uuid;

use crate::dto::invoice_dto::BankDetails;
use crate::models::service::{Service, ServiceStatus};
use crate::utils::errors::{bad_request_error, not_found_error, validation_error, AppError};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InvoiceItem {
    pub service_id: Uuid,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub origin: String,
    pub destination: String,
    pub passengers: i32,
    pub value: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Invoice {
    pub number: String,
    pub issue_date: NaiveDate,
    pub company: String,
    pub items: Vec<InvoiceItem>,
    pub total: Decimal,
    pub bank: BankDetails,
    pub notes: Option<String>,
}

/// Número de fatura: FAT-YYYYMMDD-XXXXXXXX
pub fn invoice_number(issue_date: NaiveDate, id: Uuid) -> String {
    let suffix: String = id.simple().to_string().chars().take(8).collect();
    format!("FAT-{}-{}", issue_date.format("%Y%m%d"), suffix.to_uppercase())
}

/// Ids sin repetir, en el orden recibido
pub fn unique_ids(ids: &[Uuid]) -> Vec<Uuid> {
    let mut seen = HashSet::new();
    ids.iter().copied().filter(|id| seen.insert(*id)).collect()
}

/// Validar los servicios encontrados y construir la fatura
pub fn build_invoice(
    requested: &[Uuid],
    services: Vec<Service>,
    bank: BankDetails,
    issue_date: NaiveDate,
    notes: Option<String>,
) -> Result<Invoice, AppError> {
    let requested = unique_ids(requested);
    if requested.is_empty() {
        return Err(validation_error("service_ids", "at least one service is required"));
    }

    if let Some(missing) = requested.iter().find(|id| !services.iter().any(|s| s.id == **id)) {
        return Err(not_found_error("Service", &missing.to_string()));
    }

    let mut services: Vec<Service> = services
        .into_iter()
        .filter(|s| requested.contains(&s.id))
        .collect();

    if let Some(cancelled) = services.iter().find(|s| s.status == ServiceStatus::Cancelado) {
        return Err(bad_request_error(&format!("Service {} is cancelled", cancelled.id)));
    }

    if let Some(invoiced) = services.iter().find(|s| s.invoiced) {
        return Err(AppError::Conflict(format!("Service {} was already invoiced", invoiced.id)));
    }

    let company = services[0].company.trim().to_string();
    if services
        .iter()
        .any(|s| !s.company.trim().eq_ignore_ascii_case(&company))
    {
        return Err(bad_request_error("All services of an invoice must belong to the same company"));
    }

    services.sort_by(|a, b| a.start_date.cmp(&b.start_date).then_with(|| a.created_at.cmp(&b.created_at)));

    let items: Vec<InvoiceItem> = services
        .into_iter()
        .map(|s| InvoiceItem {
            service_id: s.id,
            start_date: s.start_date,
            end_date: s.end_date,
            origin: s.origin,
            destination: s.destination,
            passengers: s.passengers,
            value: s.final_value,
        })
        .collect();
    let total = items.iter().map(|i| i.value).sum();

    Ok(Invoice {
        number: invoice_number(issue_date, Uuid::new_v4()),
        issue_date,
        company,
        items,
        total,
        bank,
        notes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn service(company: &str, start: NaiveDate, cents: i64) -> Service {
        Service {
            id: Uuid::new_v4(),
            company: company.to_string(),
            start_date: start,
            end_date: start,
            vehicle_id: None,
            passengers: 20,
            origin: "São Paulo".to_string(),
            destination: "Santos".to_string(),
            final_value: Decimal::new(cents, 2),
            status: ServiceStatus::Concluido,
            invoiced: false,
            notes: None,
            created_at: Utc::now(),
        }
    }

    fn bank() -> BankDetails {
        BankDetails {
            bank_name: "Banco do Brasil".to_string(),
            agency: "1234-5".to_string(),
            account: "98765-0".to_string(),
            holder: "Turismo Ltda".to_string(),
            pix_key: None,
        }
    }

    #[test]
    fn test_builds_invoice_sorted_with_total() {
        let late = service("Escola ABC", d(2025, 5, 20), 150000);
        let early = service("escola abc ", d(2025, 5, 2), 90050);
        let ids = vec![late.id, early.id, late.id];

        let invoice = build_invoice(&ids, vec![late.clone(), early.clone()], bank(), d(2025, 6, 1), None).unwrap();

        assert_eq!(invoice.items.len(), 2);
        assert_eq!(invoice.items[0].service_id, early.id);
        assert_eq!(invoice.total, Decimal::new(240050, 2));
        assert_eq!(invoice.company, "Escola ABC");
        assert!(invoice.number.starts_with("FAT-20250601-"));
        assert_eq!(invoice.number.len(), "FAT-20250601-".len() + 8);
    }

    #[test]
    fn test_missing_service_is_not_found() {
        let existing = service("Escola ABC", d(2025, 5, 2), 1000);
        let err = build_invoice(&[existing.id, Uuid::new_v4()], vec![existing], bank(), d(2025, 6, 1), None)
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[test]
    fn test_rejects_cancelled_invoiced_and_mixed_companies() {
        let mut cancelled = service("Escola ABC", d(2025, 5, 2), 1000);
        cancelled.status = ServiceStatus::Cancelado;
        let err = build_invoice(&[cancelled.id], vec![cancelled], bank(), d(2025, 6, 1), None).unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));

        let mut invoiced = service("Escola ABC", d(2025, 5, 2), 1000);
        invoiced.invoiced = true;
        let err = build_invoice(&[invoiced.id], vec![invoiced], bank(), d(2025, 6, 1), None).unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));

        let a = service("Escola ABC", d(2025, 5, 2), 1000);
        let b = service("Hotel Mar", d(2025, 5, 3), 1000);
        let err = build_invoice(&[a.id, b.id], vec![a, b], bank(), d(2025, 6, 1), None).unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[test]
    fn test_empty_selection_is_invalid() {
        let err = build_invoice(&[], Vec::new(), bank(), d(2025, 6, 1), None).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }
}
