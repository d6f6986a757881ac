//! Public holiday source (Nager.Date-compatible API).
//!
//! Holidays are fetched per calendar year and cached only for the lifetime
//! of one view. Callers must treat any failure as "zero holidays": the
//! calendar and analytics views keep working without holiday events.

use std::time::Duration;

use chrono::NaiveDate;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::config::HolidayConfig;
use crate::error::{HolidayError, Result};

/// A public holiday.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Holiday {
    /// Calendar date.
    pub date: NaiveDate,
    /// Localized display name.
    pub local_name: String,
    /// English name.
    pub name: String,
}

/// Wire format of one holiday entry.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct HolidayRow {
    date: String,
    local_name: String,
    name: String,
}

impl HolidayRow {
    /// Parse the wire date; entries with malformed dates are dropped by the
    /// caller rather than failing the whole year.
    fn into_holiday(self) -> Option<Holiday> {
        match NaiveDate::parse_from_str(&self.date, "%Y-%m-%d") {
            Ok(date) => Some(Holiday {
                date,
                local_name: self.local_name,
                name: self.name,
            }),
            Err(_) => {
                warn!(date = %self.date, name = %self.name, "skipping holiday with malformed date");
                None
            }
        }
    }
}

/// Client for the public holiday API.
pub struct HolidayClient {
    client: Client,
    base_url: String,
    country: String,
}

impl HolidayClient {
    /// Create a client from configuration.
    pub fn from_config(config: &HolidayConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| HolidayError::Request(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            country: config.country.clone(),
        })
    }

    /// Fetch the public holidays for one year.
    pub async fn fetch_year(&self, year: i32) -> Result<Vec<Holiday>> {
        let url = format!(
            "{}/api/v3/PublicHolidays/{}/{}",
            self.base_url, year, self.country
        );

        let response = self.client.get(&url).send().await.map_err(|e| {
            if e.is_timeout() {
                HolidayError::Request("Request timed out".to_string())
            } else if e.is_connect() {
                HolidayError::Request(format!("Connection failed: {}", e))
            } else {
                HolidayError::Request(format!("Request failed: {}", e))
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(HolidayError::Status(status.as_u16()).into());
        }

        let rows: Vec<HolidayRow> = response
            .json()
            .await
            .map_err(|e| HolidayError::Malformed(e.to_string()))?;

        Ok(rows.into_iter().filter_map(HolidayRow::into_holiday).collect())
    }

    /// Fetch a year's holidays, degrading to an empty list on any failure.
    pub async fn fetch_year_or_empty(&self, year: i32) -> Vec<Holiday> {
        match self.fetch_year(year).await {
            Ok(holidays) => holidays,
            Err(err) => {
                warn!(year, error = %err, "holiday fetch failed, continuing without holidays");
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_parsing() {
        let row: HolidayRow = serde_json::from_str(
            r#"{"date": "2023-07-14", "localName": "Fête nationale", "name": "Bastille Day"}"#,
        )
        .unwrap();
        let holiday = row.into_holiday().unwrap();
        assert_eq!(holiday.date, NaiveDate::from_ymd_opt(2023, 7, 14).unwrap());
        assert_eq!(holiday.local_name, "Fête nationale");
    }

    #[test]
    fn test_malformed_date_is_dropped() {
        let row: HolidayRow = serde_json::from_str(
            r#"{"date": "not-a-date", "localName": "X", "name": "X"}"#,
        )
        .unwrap();
        assert!(row.into_holiday().is_none());
    }

    #[test]
    fn test_base_url_normalization() {
        let config = HolidayConfig {
            base_url: "https://date.nager.at/".to_string(),
            ..Default::default()
        };
        let client = HolidayClient::from_config(&config).unwrap();
        assert!(!client.base_url.ends_with('/'));
    }

    // Run with: cargo test test_fetch_year_integration -- --ignored
    #[tokio::test]
    #[ignore = "requires network access"]
    async fn test_fetch_year_integration() {
        let client = HolidayClient::from_config(&HolidayConfig::default()).unwrap();
        let holidays = client.fetch_year(2023).await.unwrap();
        assert!(holidays.iter().any(|h| h.local_name == "Fête nationale"));
    }
}
