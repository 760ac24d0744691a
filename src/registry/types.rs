use serde::Serialize;

use crate::entity::{measure_types, sensors, user_sensors, users};

/// Fields of a new subscription, as supplied by the owner.
#[derive(Debug, Clone, PartialEq)]
pub struct NewUserSensor {
    pub user_id: String,
    pub sensor_id: i32,
    pub name: String,
    pub description: String,
    pub min_value: f64,
    pub max_value: f64,
    pub polling_interval: i32,
    pub latitude: f64,
    pub longitude: f64,
    pub is_public: bool,
    pub alarm: bool,
    pub image_url: String,
}

/// Replacement values for the mutable fields of an existing subscription.
///
/// The sensor is addressed by its external identifier; the image and the
/// stored sensor reference are never changed by an edit.
#[derive(Debug, Clone, PartialEq)]
pub struct EditUserSensor {
    pub user_sensor_id: i32,
    pub external_sensor_id: String,
    pub name: String,
    pub description: String,
    pub min_value: f64,
    pub max_value: f64,
    pub polling_interval: i32,
    pub latitude: f64,
    pub longitude: f64,
    pub is_public: bool,
    pub alarm: bool,
}

/// One-based pagination window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub page: u32,
    pub page_size: u32,
}

impl Page {
    pub const DEFAULT_SIZE: u32 = 10;

    #[must_use]
    pub fn new(page: u32, page_size: u32) -> Self {
        Self { page, page_size }
    }

    #[must_use]
    pub fn first(page_size: u32) -> Self {
        Self::new(1, page_size)
    }

    /// Rows to skip before this page starts. Never overflows: both factors
    /// are at most `u32::MAX`.
    #[must_use]
    pub fn offset(&self) -> u64 {
        u64::from(self.page.saturating_sub(1)) * u64::from(self.page_size)
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::first(Self::DEFAULT_SIZE)
    }
}

/// A subscription together with the related rows a listing asked for.
///
/// Which relations are filled depends on the query: public/private/all
/// listings load the owner and sensor, per-user listings load the sensor and
/// its measure type, and search loads all three.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserSensorDetails {
    #[serde(flatten)]
    pub user_sensor: user_sensors::Model,
    pub user: Option<users::Model>,
    pub sensor: Option<sensors::Model>,
    pub measure_type: Option<measure_types::Model>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SensorBounds {
    pub min: f64,
    pub max: f64,
}

impl From<&sensors::Model> for SensorBounds {
    fn from(sensor: &sensors::Model) -> Self {
        Self {
            min: sensor.min_value,
            max: sensor.max_value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_page_is_first_ten() {
        let page = Page::default();
        assert_eq!(page, Page::new(1, 10));
        assert_eq!(page.offset(), 0);
    }

    #[test]
    fn offset_skips_previous_pages() {
        assert_eq!(Page::new(2, 10).offset(), 10);
        assert_eq!(Page::new(5, 3).offset(), 12);
    }

    #[test]
    fn offset_of_largest_window_fits_u64() {
        let last = Page::new(u32::MAX, u32::MAX);
        assert_eq!(
            last.offset(),
            u64::from(u32::MAX - 1) * u64::from(u32::MAX)
        );
        assert!(i64::try_from(last.offset()).is_err());
    }
}
