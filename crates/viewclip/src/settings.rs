//! Pipeline configuration.

use serde::{Deserialize, Serialize};
use viewclip_clip::LineClipAlgorithm;
use viewclip_curve::SurfaceSampling;

use crate::{Result, SceneError};

/// How the window maps world space onto its plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectionMode {
    /// Perspective divide from the center of projection.
    #[default]
    Perspective,
    /// Orthographic projection along the window's view axis.
    Parallel,
}

/// Settings shared by every object in a scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineSettings {
    /// Line clipper used for lines and curve crossings.
    pub line_clipper: LineClipAlgorithm,
    /// Projection mode.
    pub projection: ProjectionMode,
    /// Distance from the window plane to the eye, in half-window units.
    pub cop_distance: f64,
    /// Steps per curve segment.
    pub curve_samples: usize,
    /// Iso-curve density for surfaces.
    pub surface: SurfaceSampling,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            line_clipper: LineClipAlgorithm::CohenSutherland,
            projection: ProjectionMode::Perspective,
            cop_distance: 1.0,
            curve_samples: 100,
            surface: SurfaceSampling::default(),
        }
    }
}

impl PipelineSettings {
    /// Parse settings from JSON; missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Validate settings.
    pub fn validate(&self) -> Result<()> {
        if !(self.cop_distance.is_finite() && self.cop_distance > 0.0) {
            return Err(SceneError::InvalidSettings(
                "cop_distance must be positive".into(),
            ));
        }
        if self.curve_samples == 0 {
            return Err(SceneError::InvalidSettings(
                "curve_samples must be at least 1".into(),
            ));
        }
        if self.surface.curves == 0 || self.surface.steps == 0 {
            return Err(SceneError::InvalidSettings(
                "surface sampling needs at least one curve and one step".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let settings = PipelineSettings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.curve_samples, 100);
        assert_eq!(settings.surface, SurfaceSampling { curves: 10, steps: 20 });
    }

    #[test]
    fn test_from_json_fills_missing_fields() {
        let json = r#"{"line_clipper": "nicholl_lee_nicholl", "projection": "parallel"}"#;
        let settings = PipelineSettings::from_json(json).unwrap();
        assert_eq!(settings.line_clipper, LineClipAlgorithm::NichollLeeNicholl);
        assert_eq!(settings.projection, ProjectionMode::Parallel);
        assert_eq!(settings.cop_distance, 1.0);
        assert_eq!(settings.surface.steps, 20);

        let settings = PipelineSettings::from_json(r#"{"surface": {"curves": 4}}"#).unwrap();
        assert_eq!(settings.surface, SurfaceSampling { curves: 4, steps: 20 });
    }

    #[test]
    fn test_from_json_rejects_bad_values() {
        assert!(matches!(
            PipelineSettings::from_json(r#"{"cop_distance": 0.0}"#),
            Err(SceneError::InvalidSettings(_))
        ));
        assert!(matches!(
            PipelineSettings::from_json(r#"{"curve_samples": 0}"#),
            Err(SceneError::InvalidSettings(_))
        ));
        assert!(matches!(
            PipelineSettings::from_json(r#"{"line_clipper": "liang_barsky"}"#),
            Err(SceneError::Settings(_))
        ));
    }

    #[test]
    fn test_round_trip_through_json() {
        let settings = PipelineSettings {
            cop_distance: 2.5,
            ..PipelineSettings::default()
        };
        let json = serde_json::to_string(&settings).unwrap();
        assert_eq!(PipelineSettings::from_json(&json).unwrap(), settings);
    }
}
