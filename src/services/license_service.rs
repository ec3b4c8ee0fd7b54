//! Licencia y periodo de prueba
//! 
//! El estado se deriva de install_date/is_activated en system_config.
//! La clave válida es un digest MD5 del install_date más la sal.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::config::environment::EnvironmentConfig;
use crate::models::license::LicenseStatus;
use crate::repositories::config_repository::ConfigRepository;
use crate::utils::errors::{AppError, AppResult};

const SECONDS_PER_DAY: i64 = 24 * 60 * 60;

pub struct LicenseService {
    config_repo: ConfigRepository,
    trial_days: i64,
    license_salt: String,
}

impl LicenseService {
    pub fn new(pool: PgPool, config: &EnvironmentConfig) -> Self {
        Self {
            config_repo: ConfigRepository::new(pool),
            trial_days: config.trial_days,
            license_salt: config.license_salt.clone(),
        }
    }

    /// Estado actual de licencia/trial
    pub async fn status(&self) -> AppResult<LicenseStatus> {
        let install_id = self.install_date_raw().await?;
        let install_date = DateTime::parse_from_rfc3339(&install_id)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| AppError::Internal(format!("Invalid install_date: {}", e)))?;

        let is_activated = self
            .config_repo
            .get("is_activated")
            .await?
            .map(|v| v == "true")
            .unwrap_or(false);

        Ok(evaluate_license(
            install_date,
            is_activated,
            self.trial_days,
            install_id,
            Utc::now(),
        ))
    }

    /// Activa el sistema si la clave coincide con la derivada del
    /// install_date. La activación es permanente.
    pub async fn activate(&self, key: &str) -> AppResult<()> {
        let install_id = self.install_date_raw().await?;
        let valid_key = generate_license_key(&install_id, &self.license_salt);

        if key != valid_key {
            log::warn!("Intento de activación con clave inválida");
            return Err(AppError::Validation("Invalid Serial Key".to_string()));
        }

        self.config_repo.set("is_activated", "true").await
    }

    async fn install_date_raw(&self) -> AppResult<String> {
        self.config_repo
            .get("install_date")
            .await?
            .ok_or_else(|| AppError::Internal("install_date is not configured".to_string()))
    }
}

/// Deriva la clave de activación a partir de la semilla de instalación
pub fn generate_license_key(seed: &str, salt: &str) -> String {
    let digest = md5::compute(format!("{}{}", seed, salt));
    let hex = format!("{:x}", digest).to_uppercase();
    format!("VMS-{}", &hex[..16])
}

/// Evalúa el estado del trial: los días consumidos se redondean hacia
/// arriba y el trial expira solo si no hay activación
pub fn evaluate_license(
    install_date: DateTime<Utc>,
    is_activated: bool,
    trial_days: i64,
    install_id: String,
    now: DateTime<Utc>,
) -> LicenseStatus {
    let elapsed_days = ceil_days((now - install_date).num_seconds());
    let trial_remaining = (trial_days - elapsed_days).max(0);

    LicenseStatus {
        is_activated,
        trial_remaining,
        is_expired: !is_activated && trial_remaining == 0,
        install_id,
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

    fn install_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 1, 9, 30, 0).single().expect("valid timestamp")
    }

    #[test]
    fn test_license_key_is_deterministic() {
        let a = generate_license_key("2025-01-01T09:30:00Z", "some-salt");
        let b = generate_license_key("2025-01-01T09:30:00Z", "some-salt");
        let c = generate_license_key("2025-01-01T09:30:00Z", "other-salt");

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert!(a.starts_with("VMS-"));
        assert_eq!(a.len(), 4 + 16);
    }

    #[test]
    fn test_trial_counts_down() {
        let install = install_at();
        let status = evaluate_license(install, false, 15, "id".into(), install + Duration::days(3));

        assert_eq!(status.trial_remaining, 12);
        assert!(!status.is_expired);
    }

    #[test]
    fn test_trial_expires_without_activation() {
        let install = install_at();
        let status =
            evaluate_license(install, false, 15, "id".into(), install + Duration::days(20));

        assert_eq!(status.trial_remaining, 0);
        assert!(status.is_expired);
    }

    #[test]
    fn test_activation_disables_expiry() {
        let install = install_at();
        let status =
            evaluate_license(install, true, 15, "id".into(), install + Duration::days(200));

        assert!(status.is_activated);
        assert_eq!(status.trial_remaining, 0);
        assert!(!status.is_expired);
    }

    #[test]
    fn test_partial_day_counts_as_consumed() {
        let install = install_at();
        let status =
            evaluate_license(install, false, 15, "id".into(), install + Duration::hours(1));

        // Una hora de uso ya consume el primer día del trial
        assert_eq!(status.trial_remaining, 14);
    }
}
