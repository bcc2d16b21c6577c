use crate::CONFY_APP_NAME;
use crate::error::RigError;

use serde::{Deserialize, Serialize};
use serde::de::DeserializeOwned;
use std::path::Path;

/// Sizes of the primitives and where their joints sit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BodyDimensions {
    pub torso_height: f64,
    pub torso_radius: f64,
    pub head_radius: f64,

    pub arm_radius: f64,
    pub arm_length: f64,
    pub arm_joint_ratio: f64,

    pub forearm_radius: f64,
    pub forearm_length: f64,
    pub elbow_joint_ratio: f64,

    pub leg_radius: f64,
    pub leg_height: f64,
    pub hip_joint_ratio: f64,

    pub lower_leg_radius: f64,
    pub lower_leg_height: f64,
    pub knee_joint_ratio: f64,
}

impl Default for BodyDimensions {
    fn default() -> Self {
        Self {
            torso_height: 1.5,
            torso_radius: 0.75,
            head_radius: 0.32,
            arm_radius: 0.125,
            arm_length: 0.45,
            arm_joint_ratio: 0.10,
            forearm_radius: 0.125,
            forearm_length: 0.45,
            elbow_joint_ratio: 0.10,
            leg_radius: 0.125,
            leg_height: 0.45,
            hip_joint_ratio: 0.0,
            lower_leg_radius: 0.125,
            lower_leg_height: 0.55,
            knee_joint_ratio: 0.10,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WalkSettings {
    /// Applied to the raw speed before moving and counting units
    pub stride_scale: f64,
    /// Distance covered by one movement unit
    pub unit_duration: f64,
    /// Units in one full walk cycle; split into four phase bands
    pub cycle_length: u32,
}

impl Default for WalkSettings {
    fn default() -> Self {
        Self {
            stride_scale: 0.5,
            unit_duration: 0.05,
            cycle_length: 80,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlSettings {
    pub move_speed: f64,
    pub turn_step: f64,
    pub limb_step: f64,
}

impl Default for ControlSettings {
    fn default() -> Self {
        Self {
            move_speed: 0.1,
            turn_step: 0.1,
            limb_step: 0.01,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LookAtSettings {
    pub max_iterations: u32,
}

impl Default for LookAtSettings {
    fn default() -> Self {
        Self { max_iterations: 100 }
    }
}

fn load_or_default<T>(name: &str) -> T
where
    T: Serialize + DeserializeOwned + Default,
{
    match confy::load(CONFY_APP_NAME, name) {
        Ok(value) => value,
        Err(e) => {
            log::warn!("Falling back to default {name} settings: {e}");
            T::default()
        }
    }
}

fn store<T: Serialize>(name: &'static str, value: &T) -> Result<(), RigError> {
    confy::store(CONFY_APP_NAME, name, value)
        .map_err(|e| RigError::new("settings-store").with_arg("name", name).push_std(e))
}

// Aggregate struct for convenience
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RigSettings {
    pub body: BodyDimensions,
    pub walk: WalkSettings,
    pub controls: ControlSettings,
    pub look_at: LookAtSettings,
}

impl RigSettings {
    pub fn load() -> Self {
        Self {
            body: load_or_default("body"),
            walk: load_or_default("walk"),
            controls: load_or_default("controls"),
            look_at: load_or_default("look_at"),
        }
    }

    pub fn save(&self) -> Result<(), RigError> {
        store("body", &self.body)?;
        store("walk", &self.walk)?;
        store("controls", &self.controls)?;
        store("look_at", &self.look_at)
    }

    /// Read every section from one file. A missing file is created with
    /// defaults.
    pub fn load_from(path: &Path) -> Result<Self, RigError> {
        confy::load_path(path).map_err(|e| {
            RigError::new("settings-load")
                .with_arg("path", path.display())
                .push_std(e)
        })
    }

    pub fn save_to(&self, path: &Path) -> Result<(), RigError> {
        confy::store_path(path, self).map_err(|e| {
            RigError::new("settings-store")
                .with_arg("path", path.display())
                .push_std(e)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let parsed: RigSettings =
            serde_json::from_str(r#"{ "walk": { "cycle_length": 40 } }"#).unwrap();
        assert_eq!(parsed.walk.cycle_length, 40);
        assert_eq!(parsed.walk.unit_duration, 0.05);
        assert_eq!(parsed.body, BodyDimensions::default());
        assert_eq!(parsed.look_at.max_iterations, 100);
    }

    #[test]
    fn file_round_trip() {
        let dir = std::env::temp_dir().join(format!("walkbot-settings-{}", std::process::id()));
        let path = dir.join("rig.toml");

        let mut settings = RigSettings::default();
        settings.walk.cycle_length = 120;
        settings.controls.turn_step = 0.25;
        settings.body.head_radius = 0.4;
        settings.save_to(&path).unwrap();

        let loaded = RigSettings::load_from(&path).unwrap();
        std::fs::remove_dir_all(&dir).ok();
        assert_eq!(loaded, settings);
    }

    #[test]
    fn missing_file_loads_defaults() {
        let dir = std::env::temp_dir().join(format!("walkbot-fresh-{}", std::process::id()));
        let path = dir.join("rig.toml");
        let loaded = RigSettings::load_from(&path).unwrap();
        assert!(path.exists());
        std::fs::remove_dir_all(&dir).ok();
        assert_eq!(loaded, RigSettings::default());
    }
}
