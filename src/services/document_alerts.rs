//! Alertas de documentos por vencer
//!
//! Licencias de vehículos, CNH y curso de motoristas que vencen dentro de
//! la ventana configurada (o que ya vencieron).

use chrono::{Days, NaiveDate};
use serde::Serialize;
use uuid::Uuid;

use crate::models::{driver::Driver, vehicle::Vehicle};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertSubject {
    Vehicle,
    Driver,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocumentAlert {
    pub subject: AlertSubject,
    pub subject_id: Uuid,
    /// Matrícula o nombre del motorista
    pub label: String,
    pub document: String,
    pub expires_on: NaiveDate,
    pub expired: bool,
    pub days_left: i64,
}

fn alert(
    subject: AlertSubject,
    subject_id: Uuid,
    label: &str,
    document: &str,
    expires_on: NaiveDate,
    today: NaiveDate,
    window_days: i64,
) -> Option<DocumentAlert> {
    let horizon = today
        .checked_add_days(Days::new(window_days.max(0) as u64))
        .unwrap_or(NaiveDate::MAX);
    if expires_on > horizon {
        return None;
    }
    Some(DocumentAlert {
        subject,
        subject_id,
        label: label.to_string(),
        document: document.to_string(),
        expires_on,
        expired: expires_on < today,
        days_left: (expires_on - today).num_days(),
    })
}

pub fn collect_alerts(
    vehicles: &[Vehicle],
    drivers: &[Driver],
    today: NaiveDate,
    window_days: i64,
) -> Vec<DocumentAlert> {
    let mut alerts: Vec<DocumentAlert> = Vec::new();

    for vehicle in vehicles {
        for (permit, expiry) in vehicle.permits() {
            alerts.extend(alert(
                AlertSubject::Vehicle,
                vehicle.id,
                &vehicle.plate,
                permit,
                expiry,
                today,
                window_days,
            ));
        }
    }

    for driver in drivers {
        let documents = [("CNH", driver.license_expiry), ("Curso", driver.course_expiry)];
        for (document, expiry) in documents {
            if let Some(expiry) = expiry {
                alerts.extend(alert(
                    AlertSubject::Driver,
                    driver.id,
                    &driver.name,
                    document,
                    expiry,
                    today,
                    window_days,
                ));
            }
        }
    }

    alerts.sort_by(|a, b| a.expires_on.cmp(&b.expires_on).then_with(|| a.label.cmp(&b.label)));
    alerts
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn vehicle(plate: &str) -> Vehicle {
        Vehicle {
            id: Uuid::new_v4(),
            plate: plate.to_string(),
            vehicle_type: "van".to_string(),
            color: None,
            capacity: 15,
            registration_number: None,
            antt_license: false,
            antt_expiry: None,
            der_license: false,
            der_expiry: None,
            municipal_license: false,
            municipal_expiry: None,
            notes: None,
            created_at: Utc::now(),
        }
    }

    fn driver(name: &str) -> Driver {
        Driver {
            id: Uuid::new_v4(),
            name: name.to_string(),
            phone: "11987654321".to_string(),
            company: None,
            license_number: None,
            license_expiry: None,
            course_expiry: None,
            bank_name: None,
            bank_agency: None,
            bank_account: None,
            pix_key: None,
            photo_path: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_alerts_inside_window_sorted_by_expiry() {
        let today = d(2025, 6, 15);

        let mut van = vehicle("ABC1D23");
        van.antt_license = true;
        van.antt_expiry = Some(d(2025, 7, 1));
        van.der_license = true;
        van.der_expiry = Some(d(2025, 12, 1)); // fuera de la ventana
        // sin la licencia activa la fecha se ignora
        van.municipal_expiry = Some(d(2025, 6, 1));

        let mut joao = driver("João");
        joao.license_expiry = Some(d(2025, 6, 10));
        joao.course_expiry = Some(d(2025, 7, 15));

        let alerts = collect_alerts(&[van], &[joao], today, 30);
        let docs: Vec<(&str, &str)> = alerts
            .iter()
            .map(|a| (a.label.as_str(), a.document.as_str()))
            .collect();
        assert_eq!(docs, vec![("João", "CNH"), ("ABC1D23", "ANTT"), ("João", "Curso")]);

        assert!(alerts[0].expired);
        assert_eq!(alerts[0].days_left, -5);
        assert!(!alerts[1].expired);
        assert_eq!(alerts[1].days_left, 16);
        assert_eq!(alerts[2].days_left, 30);
    }

    #[test]
    fn test_no_alerts_without_dates() {
        let alerts = collect_alerts(&[vehicle("ABC1234")], &[driver("Ana")], d(2025, 1, 1), 30);
        assert!(alerts.is_empty());
    }

    #[test]
    fn test_huge_window_includes_everything_without_overflow() {
        let mut ana = driver("Ana");
        ana.license_expiry = Some(d(2090, 1, 1));
        let alerts = collect_alerts(&[], &[ana], d(2025, 1, 1), i64::MAX);
        assert_eq!(alerts.len(), 1);
        assert!(!alerts[0].expired);
    }
}
