//! Gastos recurrentes
//!
//! Expande un gasto marcado como recurrente en N cuotas mensuales
//! independientes que comparten un `recurrence_group_id`.

use chrono::{Months, NaiveDate};
use uuid::Uuid;

use crate::models::expense::{reference_month, NewExpense};
use crate::utils::errors::{validation_error, AppError};

/// Máximo de cuotas aceptadas en una sola petición
pub const MAX_INSTALLMENTS: u32 = 60;

/// Fecha de la cuota `index` (0-based) contada desde la primera.
///
/// Si el día no existe en el mes destino se usa el último día del mes.
pub fn installment_due_date(first_due: NaiveDate, index: u32) -> Option<NaiveDate> {
    first_due.checked_add_months(Months::new(index))
}

/// Convertir un gasto base en `count` cuotas mensuales
pub fn expand_installments(base: &NewExpense, count: u32) -> Result<Vec<NewExpense>, AppError> {
    if count == 0 || count > MAX_INSTALLMENTS {
        return Err(validation_error("installments", "installments must be between 1 and 60"));
    }

    let group_id = Uuid::new_v4();
    let total = count as i32;

    (0..count)
        .map(|index| {
            let due_date = installment_due_date(base.due_date, index)
                .ok_or_else(|| validation_error("due_date", "installment date out of range"))?;
            let number = index as i32 + 1;

            Ok(NewExpense {
                name: format!("{} ({}/{})", base.name, number, total),
                due_date,
                payment_date: if index == 0 { base.payment_date } else { None },
                recurring: true,
                reference_month: Some(reference_month(due_date)),
                recurrence_group_id: Some(group_id),
                installment_number: Some(number),
                installment_total: Some(total),
                ..base.clone()
            })
        })
        .collect()
}

/// Gasto único: sin grupo y con el mes de su vencimiento
pub fn single(base: NewExpense) -> NewExpense {
    NewExpense {
        recurring: false,
        reference_month: Some(reference_month(base.due_date)),
        recurrence_group_id: None,
        installment_number: None,
        installment_total: None,
        ..base
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn base(due_date: NaiveDate) -> NewExpense {
        NewExpense {
            user_id: Uuid::nil(),
            name: "Seguro frota".to_string(),
            amount: Decimal::new(45000, 2),
            category: "veiculo".to_string(),
            subcategory: Some("seguro".to_string()),
            company: Some("Porto".to_string()),
            payment_method: Some("boleto".to_string()),
            due_date,
            payment_date: None,
            recurring: false,
            reference_month: None,
            recurrence_group_id: None,
            installment_number: None,
            installment_total: None,
            notes: None,
        }
    }

    #[test]
    fn test_produces_exactly_n_monthly_installments() {
        let first = d(2025, 3, 10);
        let installments = expand_installments(&base(first), 4).unwrap();

        assert_eq!(installments.len(), 4);
        let dues: Vec<NaiveDate> = installments.iter().map(|e| e.due_date).collect();
        assert_eq!(dues, vec![d(2025, 3, 10), d(2025, 4, 10), d(2025, 5, 10), d(2025, 6, 10)]);

        let months: Vec<&str> = installments
            .iter()
            .map(|e| e.reference_month.as_deref().unwrap())
            .collect();
        assert_eq!(months, vec!["2025-03", "2025-04", "2025-05", "2025-06"]);
    }

    #[test]
    fn test_shared_fields_are_identical() {
        let template = base(d(2025, 1, 5));
        let installments = expand_installments(&template, 3).unwrap();
        let group = installments[0].recurrence_group_id;
        assert!(group.is_some());

        for (i, item) in installments.iter().enumerate() {
            assert_eq!(item.amount, template.amount);
            assert_eq!(item.category, template.category);
            assert_eq!(item.subcategory, template.subcategory);
            assert_eq!(item.company, template.company);
            assert_eq!(item.payment_method, template.payment_method);
            assert_eq!(item.user_id, template.user_id);
            assert!(item.recurring);
            assert_eq!(item.recurrence_group_id, group);
            assert_eq!(item.installment_number, Some(i as i32 + 1));
            assert_eq!(item.installment_total, Some(3));
            assert_eq!(item.name, format!("Seguro frota ({}/3)", i + 1));
        }
    }

    #[test]
    fn test_month_end_is_clamped_from_first_due_date() {
        let installments = expand_installments(&base(d(2024, 1, 31)), 4).unwrap();
        let dues: Vec<NaiveDate> = installments.iter().map(|e| e.due_date).collect();
        assert_eq!(dues, vec![d(2024, 1, 31), d(2024, 2, 29), d(2024, 3, 31), d(2024, 4, 30)]);
    }

    #[test]
    fn test_crosses_year_boundary() {
        let installments = expand_installments(&base(d(2025, 11, 15)), 3).unwrap();
        assert_eq!(installments[2].due_date, d(2026, 1, 15));
        assert_eq!(installments[2].reference_month.as_deref(), Some("2026-01"));
    }

    #[test]
    fn test_payment_date_only_on_first_installment() {
        let mut template = base(d(2025, 2, 1));
        template.payment_date = Some(d(2025, 1, 30));
        let installments = expand_installments(&template, 3).unwrap();
        assert_eq!(installments[0].payment_date, Some(d(2025, 1, 30)));
        assert!(installments[1..].iter().all(|e| e.payment_date.is_none()));
    }

    #[test]
    fn test_single_installment_is_allowed() {
        let installments = expand_installments(&base(d(2025, 2, 1)), 1).unwrap();
        assert_eq!(installments.len(), 1);
        assert_eq!(installments[0].name, "Seguro frota (1/1)");
    }

    #[test]
    fn test_rejects_out_of_range_counts() {
        assert!(expand_installments(&base(d(2025, 2, 1)), 0).is_err());
        assert!(expand_installments(&base(d(2025, 2, 1)), MAX_INSTALLMENTS + 1).is_err());
    }

    #[test]
    fn test_single_tags_reference_month() {
        let expense = single(base(d(2025, 8, 20)));
        assert!(!expense.recurring);
        assert_eq!(expense.reference_month.as_deref(), Some("2025-08"));
        assert!(expense.recurrence_group_id.is_none());
    }
}
