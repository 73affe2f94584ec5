//! Building configuration, read from JSON.

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::stop_set::{BITMASK_MAX_FLOORS, StopSetKind};
use crate::types::request::Floor;

pub const DEFAULT_CARS: usize = 3;
pub const MIN_FLOOR: Floor = 1;
pub const MAX_FLOOR: Floor = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BuildingConfig {
    pub cars: usize,
    pub min_floor: Floor,
    pub max_floor: Floor,
    pub stop_set: StopSetKind,
    /// Upper bound on simulation steps in the demo driver.
    pub max_ticks: u32,
    pub tick_interval_ms: u64,
}

impl Default for BuildingConfig {
    fn default() -> Self {
        BuildingConfig {
            cars: DEFAULT_CARS,
            min_floor: MIN_FLOOR,
            max_floor: MAX_FLOOR,
            stop_set: StopSetKind::default(),
            max_ticks: 100,
            tick_interval_ms: 100,
        }
    }
}

impl BuildingConfig {
    /// Parses and validates a JSON document. Missing fields take their defaults.
    pub fn from_json(raw: &str) -> anyhow::Result<Self> {
        let config: BuildingConfig =
            serde_json::from_str(raw).context("failed to parse building config")?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)
            .context(format!("failed to read config file {}", path.display()))?;
        Self::from_json(&raw).context(format!("invalid config file {}", path.display()))
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(self.cars >= 1, "a building needs at least one car");
        anyhow::ensure!(
            self.min_floor <= self.max_floor,
            "min_floor {} is above max_floor {}",
            self.min_floor,
            self.max_floor
        );
        anyhow::ensure!(self.tick_interval_ms > 0, "tick_interval_ms must be positive");
        if self.stop_set == StopSetKind::Bitmask {
            anyhow::ensure!(
                self.floor_count() <= BITMASK_MAX_FLOORS,
                "bitmask stop set supports at most {BITMASK_MAX_FLOORS} floors, config has {}",
                self.floor_count()
            );
        }
        Ok(())
    }

    pub fn floor_count(&self) -> usize {
        (i64::from(self.max_floor) - i64::from(self.min_floor) + 1).max(0) as usize
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_gives_defaults() {
        let config = BuildingConfig::from_json("{}").unwrap();
        assert_eq!(config, BuildingConfig::default());
        assert_eq!(config.floor_count(), 10);
        assert_eq!(config.tick_interval(), Duration::from_millis(100));
    }

    #[test]
    fn reads_every_field() {
        let config = BuildingConfig::from_json(
            r#"{
                "cars": 2,
                "min_floor": -2,
                "max_floor": 120,
                "stop_set": "bit_vec",
                "max_ticks": 500,
                "tick_interval_ms": 5
            }"#,
        )
        .unwrap();
        assert_eq!(config.cars, 2);
        assert_eq!(config.min_floor, -2);
        assert_eq!(config.stop_set, StopSetKind::BitVec);
        assert_eq!(config.floor_count(), 123);
        assert_eq!(config.max_ticks, 500);
    }

    #[test]
    fn rejects_unknown_fields() {
        assert!(BuildingConfig::from_json(r#"{"floors": 5}"#).is_err());
    }

    #[test]
    fn validation() {
        let no_cars = BuildingConfig {
            cars: 0,
            ..BuildingConfig::default()
        };
        assert!(no_cars.validate().is_err());

        let inverted = BuildingConfig {
            min_floor: 5,
            max_floor: 4,
            ..BuildingConfig::default()
        };
        assert!(inverted.validate().is_err());

        let stalled = BuildingConfig {
            tick_interval_ms: 0,
            ..BuildingConfig::default()
        };
        assert!(stalled.validate().is_err());
    }

    #[test]
    fn bitmask_limited_to_64_floors() {
        let tall = r#"{"stop_set": "bitmask", "min_floor": 0, "max_floor": 64}"#;
        let err = BuildingConfig::from_json(tall).unwrap_err();
        assert!(err.to_string().contains("at most 64 floors"));

        let ok = r#"{"stop_set": "bitmask", "min_floor": 0, "max_floor": 63}"#;
        assert!(BuildingConfig::from_json(ok).is_ok());
    }

    #[test]
    fn missing_file_names_the_path() {
        let err = BuildingConfig::load("/nonexistent/building.json").unwrap_err();
        assert!(err.to_string().contains("/nonexistent/building.json"));
    }
}
