//! Cálculo del estado del permiso
//! 
//! Función pura: (fecha de expiración, retención, ahora) -> estado.
//! El estado nunca se persiste; se recalcula en cada lectura.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

/// Días de margen en los que el permiso cuenta como "Expiring Soon"
const EXPIRING_SOON_WINDOW_DAYS: i64 = 10;

const SECONDS_PER_DAY: i64 = 24 * 60 * 60;

/// Estado derivado del permiso de un vehículo
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PermitStatus {
    #[serde(rename = "Valid")]
    Valid,
    #[serde(rename = "Expiring Soon")]
    ExpiringSoon,
    #[serde(rename = "Invalid")]
    Invalid,
    #[serde(rename = "On Hold")]
    OnHold,
}

impl PermitStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PermitStatus::Valid => "Valid",
            PermitStatus::ExpiringSoon => "Expiring Soon",
            PermitStatus::Invalid => "Invalid",
            PermitStatus::OnHold => "On Hold",
        }
    }
}

/// Calcula el estado del permiso.
/// 
/// La retención manda sobre cualquier fecha. Si no hay retención se
/// cuentan los días restantes hasta la medianoche UTC de la fecha de
/// expiración, redondeando hacia arriba: negativos -> Invalid,
/// 0..=10 -> ExpiringSoon, resto -> Valid.
pub fn compute_status(expiry: NaiveDate, on_hold: bool, now: DateTime<Utc>) -> PermitStatus {
    if on_hold {
        return PermitStatus::OnHold;
    }

    let expiry_midnight = expiry.and_time(NaiveTime::MIN).and_utc();
    let days_remaining = ceil_days((expiry_midnight - now).num_seconds());

    if days_remaining < 0 {
        PermitStatus::Invalid
    } else if days_remaining <= EXPIRING_SOON_WINDOW_DAYS {
        PermitStatus::ExpiringSoon
    } else {
        PermitStatus::Valid
    }
}

fn ceil_days(seconds: i64) -> i64 {
    let days = seconds.div_euclid(SECONDS_PER_DAY);
    if seconds.rem_euclid(SECONDS_PER_DAY) > 0 {
        days + 1
    } else {
        days
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn at_noon() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 15, 12, 0, 0).single().expect("valid timestamp")
    }

    fn date_offset(now: DateTime<Utc>, days: i64) -> NaiveDate {
        (now + Duration::days(days)).date_naive()
    }

    #[test]
    fn test_on_hold_overrides_dates() {
        let now = at_noon();
        for offset in [-400, -1, 0, 5, 10, 11, 400] {
            assert_eq!(
                compute_status(date_offset(now, offset), true, now),
                PermitStatus::OnHold
            );
        }
    }

    #[test]
    fn test_past_expiry_is_invalid() {
        let now = at_noon();
        assert_eq!(
            compute_status(date_offset(now, -1), false, now),
            PermitStatus::Invalid
        );
        assert_eq!(
            compute_status(date_offset(now, -30), false, now),
            PermitStatus::Invalid
        );
    }

    #[test]
    fn test_expiring_soon_window() {
        let now = at_noon();
        assert_eq!(
            compute_status(date_offset(now, 0), false, now),
            PermitStatus::ExpiringSoon
        );
        assert_eq!(
            compute_status(date_offset(now, 5), false, now),
            PermitStatus::ExpiringSoon
        );
        assert_eq!(
            compute_status(date_offset(now, 10), false, now),
            PermitStatus::ExpiringSoon
        );
    }

    #[test]
    fn test_valid_past_the_window() {
        let now = at_noon();
        assert_eq!(
            compute_status(date_offset(now, 11), false, now),
            PermitStatus::Valid
        );
        assert_eq!(
            compute_status(date_offset(now, 30), false, now),
            PermitStatus::Valid
        );
    }

    #[test]
    fn test_window_boundary_at_midnight() {
        // Con now exactamente a medianoche los días restantes son enteros
        let now = Utc.with_ymd_and_hms(2025, 6, 15, 0, 0, 0).single().expect("valid timestamp");
        assert_eq!(
            compute_status(date_offset(now, 10), false, now),
            PermitStatus::ExpiringSoon
        );
        assert_eq!(
            compute_status(date_offset(now, 11), false, now),
            PermitStatus::Valid
        );
    }

    #[test]
    fn test_serialized_display_strings() {
        assert_eq!(
            serde_json::to_string(&PermitStatus::ExpiringSoon).expect("serializes"),
            "\"Expiring Soon\""
        );
        assert_eq!(PermitStatus::OnHold.as_str(), "On Hold");
    }
}
