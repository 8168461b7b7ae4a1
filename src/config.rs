use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{GameError, Result};
use crate::session::TARGET_SCORE;

/// Game settings, loadable from a JSON file. Missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Score at which a game is won.
    pub target: u32,
    /// Seed for the random tile generator; drawn from the OS when absent.
    pub seed: Option<u64>,
    /// Chance that a new tile is a 4 rather than a 2.
    pub four_probability: f64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            target: TARGET_SCORE,
            seed: None,
            four_probability: 0.1,
        }
    }
}

impl GameConfig {
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let config: GameConfig = serde_json::from_reader(reader)?;

        config.validate()?;

        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .map_err(|e| GameError::Config(format!("{}: {}", path.display(), e)))?;

        Self::from_reader(BufReader::new(file))
    }

    pub fn validate(&self) -> Result<()> {
        if self.target == 0 {
            return Err(GameError::Config("target must be positive".to_string()));
        }
        if !(0.0..=1.0).contains(&self.four_probability) {
            return Err(GameError::Config(format!(
                "four_probability must be within [0, 1], got {}",
                self.four_probability
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_take_defaults() {
        let config = GameConfig::from_reader(r#"{ "seed": 9 }"#.as_bytes()).unwrap();

        assert_eq!(config.seed, Some(9));
        assert_eq!(config.target, TARGET_SCORE);
        assert_eq!(config.four_probability, 0.1);
    }

    #[test]
    fn out_of_range_probability_is_rejected() {
        let result = GameConfig::from_reader(r#"{ "four_probability": 1.5 }"#.as_bytes());

        assert!(matches!(result, Err(GameError::Config(_))));
    }

    #[test]
    fn malformed_json_is_a_config_error() {
        let result = GameConfig::from_reader("{ target: ".as_bytes());

        assert!(matches!(result, Err(GameError::Config(_))));
    }
}
