//! Clasificación del estado de un gasto
//!
//! Regla única usada por listados, tarjetas de resumen, gráficos,
//! exportación y dashboard. Trabaja sólo con fechas de calendario.

use chrono::NaiveDate;

use crate::models::expense::ExpenseStatus;

/// Derivar el estado a partir del vencimiento, el pago y la fecha de hoy
pub fn classify(due_date: NaiveDate, payment_date: Option<NaiveDate>, today: NaiveDate) -> ExpenseStatus {
    match payment_date {
        Some(paid_on) if paid_on <= today => ExpenseStatus::Pago,
        Some(_) => ExpenseStatus::Programado,
        None if due_date < today => ExpenseStatus::Vencido,
        None => ExpenseStatus::Pendente,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_paid_regardless_of_due_date() {
        let today = d(2025, 6, 15);
        // vencido hace tiempo, pagado después del vencimiento
        assert_eq!(classify(d(2025, 1, 10), Some(d(2025, 2, 1)), today), ExpenseStatus::Pago);
        // vence en el futuro, pagado por adelantado
        assert_eq!(classify(d(2025, 12, 1), Some(d(2025, 6, 1)), today), ExpenseStatus::Pago);
        // pagado hoy mismo
        assert_eq!(classify(d(2025, 6, 20), Some(today), today), ExpenseStatus::Pago);
    }

    #[test]
    fn test_future_payment_is_scheduled() {
        let today = d(2025, 6, 15);
        assert_eq!(classify(d(2025, 6, 10), Some(d(2025, 6, 16)), today), ExpenseStatus::Programado);
        assert_eq!(classify(d(2025, 7, 1), Some(d(2025, 7, 1)), today), ExpenseStatus::Programado);
    }

    #[test]
    fn test_unpaid_past_due_is_overdue() {
        let today = d(2025, 6, 15);
        assert_eq!(classify(d(2025, 6, 14), None, today), ExpenseStatus::Vencido);
        assert_eq!(classify(d(2024, 12, 31), None, today), ExpenseStatus::Vencido);
    }

    #[test]
    fn test_unpaid_due_today_or_later_is_pending() {
        let today = d(2025, 6, 15);
        assert_eq!(classify(today, None, today), ExpenseStatus::Pendente);
        assert_eq!(classify(d(2025, 6, 16), None, today), ExpenseStatus::Pendente);
    }
}
