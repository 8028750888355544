use ao_core::{AoConfig, ConfigError, Direction};
use serde::{Deserialize, Serialize};

// Bake settings as stored in a TOML file. Missing keys fall back to the
// `AoConfig` defaults.
//
//   directions = [[0, 1], [0, -1], [1, 0], [-1, 0]]
//   falloff = 0.5
//   height_scale = 1.0
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BakeSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub directions: Option<Vec<[i32; 2]>>, // [dx, dy] pairs
    #[serde(skip_serializing_if = "Option::is_none")]
    pub falloff: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height_scale: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sample_count: Option<usize>, // checked against the direction count
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parallel: Option<bool>,
}

impl BakeSettings {
    pub fn from_toml_str(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    // Resolve into a validated config
    pub fn into_config(self) -> Result<AoConfig, ConfigError> {
        let mut config = AoConfig::default();
        if let Some(dirs) = self.directions {
            config.directions = dirs
                .into_iter()
                .map(|[dx, dy]| Direction::new(dx, dy))
                .collect::<Result<Vec<_>, _>>()?;
        }
        if let Some(falloff) = self.falloff {
            config.falloff = falloff;
        }
        if let Some(height_scale) = self.height_scale {
            config.height_scale = height_scale;
        }
        if let Some(parallel) = self.parallel {
            config.parallel = parallel;
        }
        config.sample_count = self.sample_count;
        config.validate()?;
        Ok(config)
    }
}
