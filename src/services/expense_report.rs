//! Resúmenes, gráficos y exportación de gastos
//!
//! Todas las funciones reciben la lista ya filtrada y la fecha de hoy,
//! de modo que tarjetas, gráficos y exportación cuadran entre sí.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;

use crate::models::expense::{reference_month, Expense, ExpenseStatus};

/// Cantidad e importe de un estado
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct StatusTotals {
    pub count: usize,
    pub amount: Decimal,
}

impl StatusTotals {
    fn add(&mut self, amount: Decimal) {
        self.count += 1;
        self.amount += amount;
    }
}

/// Tarjetas de resumen
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ExpenseSummary {
    pub count: usize,
    pub total: Decimal,
    pub pago: StatusTotals,
    pub pendente: StatusTotals,
    pub vencido: StatusTotals,
    pub programado: StatusTotals,
}

impl ExpenseSummary {
    fn bucket_mut(&mut self, status: ExpenseStatus) -> &mut StatusTotals {
        match status {
            ExpenseStatus::Pago => &mut self.pago,
            ExpenseStatus::Pendente => &mut self.pendente,
            ExpenseStatus::Vencido => &mut self.vencido,
            ExpenseStatus::Programado => &mut self.programado,
        }
    }
}

pub fn summarize(expenses: &[Expense], today: NaiveDate) -> ExpenseSummary {
    let mut summary = ExpenseSummary::default();
    for expense in expenses {
        summary.count += 1;
        summary.total += expense.amount;
        summary.bucket_mut(expense.status(today)).add(expense.amount);
    }
    summary
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryTotal {
    pub category: String,
    pub count: usize,
    pub total: Decimal,
}

/// Clave de categoría: sin espacios de borde y en minúsculas
pub fn normalize_category(category: &str) -> String {
    category.trim().to_lowercase()
}

/// Total por categoría, de mayor a menor
pub fn chart_by_category(expenses: &[Expense]) -> Vec<CategoryTotal> {
    let mut totals: BTreeMap<String, (usize, Decimal)> = BTreeMap::new();
    for expense in expenses {
        let entry = totals.entry(normalize_category(&expense.category)).or_default();
        entry.0 += 1;
        entry.1 += expense.amount;
    }

    let mut chart: Vec<CategoryTotal> = totals
        .into_iter()
        .map(|(category, (count, total))| CategoryTotal {
            category,
            count,
            total,
        })
        .collect();
    // BTreeMap ya deja las categorías en orden alfabético para los empates
    chart.sort_by(|a, b| b.total.cmp(&a.total));
    chart
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MonthBucket {
    pub month: String,
    pub total: Decimal,
    pub pago: Decimal,
    pub pendente: Decimal,
    pub vencido: Decimal,
    pub programado: Decimal,
}

/// Importes por mes de vencimiento y estado, en orden cronológico
pub fn chart_by_month(expenses: &[Expense], today: NaiveDate) -> Vec<MonthBucket> {
    let mut months: BTreeMap<String, MonthBucket> = BTreeMap::new();
    for expense in expenses {
        let month = reference_month(expense.due_date);
        let bucket = months.entry(month.clone()).or_insert_with(|| MonthBucket {
            month,
            ..Default::default()
        });
        bucket.total += expense.amount;
        let slot = match expense.status(today) {
            ExpenseStatus::Pago => &mut bucket.pago,
            ExpenseStatus::Pendente => &mut bucket.pendente,
            ExpenseStatus::Vencido => &mut bucket.vencido,
            ExpenseStatus::Programado => &mut bucket.programado,
        };
        *slot += expense.amount;
    }
    months.into_values().collect()
}

/// BOM UTF-8 para que Excel abra correctamente los acentos
const BOM: &str = "\u{FEFF}";
/// Separador de columnas (punto y coma para Excel en portugués)
const SEP: &str = ";";

const HEADERS: [&str; 9] = [
    "Nome",
    "Categoria",
    "Subcategoria",
    "Empresa",
    "Forma de pagamento",
    "Vencimento",
    "Pagamento",
    "Status",
    "Valor",
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportRow {
    pub name: String,
    pub category: String,
    pub subcategory: String,
    pub company: String,
    pub payment_method: String,
    pub due_date: NaiveDate,
    pub payment_date: Option<NaiveDate>,
    pub status: ExpenseStatus,
    pub amount: Decimal,
}

/// Planilla de gastos filtrados
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExpenseExport {
    pub rows: Vec<ExportRow>,
    pub total: Decimal,
}

fn escape_cell(value: &str) -> String {
    if value.contains(SEP) || value.contains('"') || value.contains('\n') || value.contains('\r') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

fn format_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// Formato numérico brasileño sin separador de miles: 1234,50
fn format_amount(amount: Decimal) -> String {
    format!("{:.2}", amount.round_dp(2)).replace('.', ",")
}

impl ExpenseExport {
    pub fn build(expenses: &[Expense], today: NaiveDate) -> Self {
        let rows: Vec<ExportRow> = expenses
            .iter()
            .map(|e| ExportRow {
                name: e.name.clone(),
                category: e.category.clone(),
                subcategory: e.subcategory.clone().unwrap_or_default(),
                company: e.company.clone().unwrap_or_default(),
                payment_method: e.payment_method.clone().unwrap_or_default(),
                due_date: e.due_date,
                payment_date: e.payment_date,
                status: e.status(today),
                amount: e.amount,
            })
            .collect();
        let total = rows.iter().map(|r| r.amount).sum();
        Self { rows, total }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Renderizar como CSV compatible con Excel
    pub fn to_csv(&self) -> String {
        let mut out = String::from(BOM);
        out.push_str(&HEADERS.join(SEP));
        out.push_str("\r\n");

        for row in &self.rows {
            let cells = [
                escape_cell(&row.name),
                escape_cell(&row.category),
                escape_cell(&row.subcategory),
                escape_cell(&row.company),
                escape_cell(&row.payment_method),
                format_date(row.due_date),
                row.payment_date.map(format_date).unwrap_or_default(),
                row.status.as_str().to_string(),
                format_amount(row.amount),
            ];
            out.push_str(&cells.join(SEP));
            out.push_str("\r\n");
        }

        let mut total_line = vec![String::new(); HEADERS.len()];
        total_line[0] = "TOTAL".to_string();
        total_line[HEADERS.len() - 1] = format_amount(self.total);
        out.push_str(&total_line.join(SEP));
        out.push_str("\r\n");
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::expense_filter::{self, fixtures::*, ExpenseFilters};

    #[test]
    fn test_summary_cards() {
        let summary = summarize(&ten_expenses(), today());
        assert_eq!(summary.count, 10);
        assert_eq!(summary.total, Decimal::new(1303000, 2));
        assert_eq!(summary.vencido.count, 4);
        assert_eq!(summary.vencido.amount, Decimal::new(453000, 2));
        assert_eq!(summary.pendente.count, 3);
        assert_eq!(summary.pendente.amount, Decimal::new(185000, 2));
        assert_eq!(summary.pago.count, 2);
        assert_eq!(summary.pago.amount, Decimal::new(650000, 2));
        assert_eq!(summary.programado.count, 1);
        assert_eq!(summary.programado.amount, Decimal::new(15000, 2));
        assert_eq!(
            summary.pago.amount + summary.pendente.amount + summary.vencido.amount + summary.programado.amount,
            summary.total
        );
    }

    #[test]
    fn test_chart_by_category_sorted_by_total() {
        let chart = chart_by_category(&ten_expenses());
        let order: Vec<&str> = chart.iter().map(|c| c.category.as_str()).collect();
        assert_eq!(order, vec!["veiculo", "pessoal", "escritorio", "servicos"]);
        assert_eq!(chart[0].count, 6);
        assert_eq!(chart[0].total, Decimal::new(598000, 2));
    }

    #[test]
    fn test_chart_by_category_merges_case_variants() {
        let expenses = vec![
            expense("Pneus", 10000, "Veiculo", d(2025, 6, 1), None),
            expense("Óleo", 5000, " veiculo ", d(2025, 6, 2), None),
            expense("Aluguel", 20000, "escritorio", d(2025, 6, 3), None),
        ];
        let chart = chart_by_category(&expenses);
        assert_eq!(chart.len(), 2);
        assert_eq!(chart[1].category, "veiculo");
        assert_eq!(chart[1].count, 2);
        assert_eq!(chart[1].total, Decimal::new(15000, 2));
    }

    #[test]
    fn test_chart_by_month_is_chronological() {
        let chart = chart_by_month(&ten_expenses(), today());
        let months: Vec<&str> = chart.iter().map(|m| m.month.as_str()).collect();
        assert_eq!(months, vec!["2025-04", "2025-05", "2025-06", "2025-07"]);

        let june = &chart[2];
        assert_eq!(june.vencido, Decimal::new(450000, 2));
        assert_eq!(june.pago, Decimal::new(350000, 2));
        assert_eq!(june.programado, Decimal::new(15000, 2));
        assert_eq!(june.pendente, Decimal::new(95000, 2));
        assert_eq!(june.total, june.vencido + june.pago + june.programado + june.pendente);
    }

    #[test]
    fn test_export_matches_filtered_list() {
        let filters = ExpenseFilters {
            category: Some("veiculo".to_string()),
            ..Default::default()
        };
        let filtered = expense_filter::apply(ten_expenses(), &filters, today()).unwrap();
        let export = ExpenseExport::build(&filtered, today());

        assert_eq!(export.row_count(), filtered.len());
        assert_eq!(export.total, filtered.iter().map(|e| e.amount).sum::<Decimal>());

        let csv = export.to_csv();
        assert!(csv.starts_with('\u{FEFF}'));
        // cabecera + filas + total
        assert_eq!(csv.lines().count(), filtered.len() + 2);
        assert!(csv.trim_end().ends_with("TOTAL;;;;;;;;5980,00"));
    }

    #[test]
    fn test_export_of_empty_list() {
        let export = ExpenseExport::build(&[], today());
        assert_eq!(export.row_count(), 0);
        assert_eq!(export.total, Decimal::ZERO);
        assert_eq!(export.to_csv().lines().count(), 2);
    }

    #[test]
    fn test_csv_cells_are_escaped() {
        let mut expense = expense("Peças; \"motor\"", 1000, "veiculo", d(2025, 6, 1), Some(d(2025, 6, 2)));
        expense.company = Some("Oficina".to_string());
        let csv = ExpenseExport::build(&[expense], today()).to_csv();
        let row = csv.lines().nth(1).unwrap();
        assert_eq!(row, "\"Peças; \"\"motor\"\"\";veiculo;;Oficina;;01/06/2025;02/06/2025;pago;10,00");
    }
}
