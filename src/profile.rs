//! The user's body profile.
//!
//! A [`UserProfile`] holds the gender chosen during onboarding and a set of
//! body measurements, all expressed in a single [`UnitSystem`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::classify::ShapeLabel;
use crate::error::AinaError;
use crate::units::{self, UnitSystem, WeightPolicy};

/// Gender selected during onboarding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Gender {
    /// Not chosen yet.
    #[default]
    Unset,
    /// Male body models and rules.
    Male,
    /// Female body models and rules.
    Female,
}

impl Gender {
    /// Lowercase token used in asset keys.
    pub fn as_str(self) -> &'static str {
        match self {
            Gender::Unset => "unset",
            Gender::Male => "male",
            Gender::Female => "female",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gender {
    type Err = AinaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "male" | "m" => Ok(Gender::Male),
            "female" | "f" => Ok(Gender::Female),
            "" | "unset" | "null" => Ok(Gender::Unset),
            other => Err(AinaError::UnknownGender(other.to_string())),
        }
    }
}

// An unset gender is stored as `null`, matching records written before
// onboarding completed.
impl Serialize for Gender {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Gender::Unset => serializer.serialize_none(),
            other => serializer.serialize_str(other.as_str()),
        }
    }
}

impl<'de> Deserialize<'de> for Gender {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        match raw {
            None => Ok(Gender::Unset),
            Some(s) => s.parse().map_err(serde::de::Error::custom),
        }
    }
}

/// Body measurements for one user.
///
/// Linear fields (`height`, `shoulder`, `chest`, `belly`, `waist`, `hips`)
/// are lengths in the unit of `unit_system`; `weight` is a mass in the same
/// system. A profile never mixes units: switching systems goes through
/// [`UserProfile::set_unit_system`], which converts every field at once.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    /// Selected gender.
    #[serde(default)]
    pub gender: Gender,
    /// Unit system of every measurement below.
    #[serde(default)]
    pub unit_system: UnitSystem,
    /// Standing height.
    pub height: f64,
    /// Body mass.
    pub weight: f64,
    /// Shoulder circumference.
    #[serde(default = "default_shoulder")]
    pub shoulder: f64,
    /// Chest circumference.
    pub chest: f64,
    /// Belly circumference.
    #[serde(default = "default_belly")]
    pub belly: f64,
    /// Waist circumference.
    pub waist: f64,
    /// Hip circumference.
    #[serde(alias = "hip")]
    pub hips: f64,
}

fn default_shoulder() -> f64 {
    UserProfile::default().shoulder
}

fn default_belly() -> f64 {
    UserProfile::default().belly
}

/// Metric measurements used to seed a profile.
#[derive(Debug, Clone, Copy)]
struct Defaults {
    height: f64,
    weight: f64,
    shoulder: f64,
    chest: f64,
    belly: f64,
    waist: f64,
    hips: f64,
}

const NEUTRAL_DEFAULTS: Defaults = Defaults {
    height: 170.0,
    weight: 70.0,
    shoulder: 100.0,
    chest: 90.0,
    belly: 80.0,
    waist: 75.0,
    hips: 95.0,
};

const MALE_DEFAULTS: Defaults = Defaults {
    height: 175.0,
    weight: 75.0,
    shoulder: 106.0,
    chest: 96.0,
    belly: 84.0,
    waist: 82.0,
    hips: 98.0,
};

const FEMALE_DEFAULTS: Defaults = Defaults {
    height: 162.0,
    weight: 60.0,
    shoulder: 94.0,
    chest: 88.0,
    belly: 78.0,
    waist: 70.0,
    hips: 92.0,
};

impl Default for UserProfile {
    fn default() -> Self {
        Self::from_defaults(Gender::Unset, &NEUTRAL_DEFAULTS)
    }
}

impl UserProfile {
    fn from_defaults(gender: Gender, d: &Defaults) -> Self {
        Self {
            gender,
            unit_system: UnitSystem::Metric,
            height: d.height,
            weight: d.weight,
            shoulder: d.shoulder,
            chest: d.chest,
            belly: d.belly,
            waist: d.waist,
            hips: d.hips,
        }
    }

    /// Create a metric profile with the default measurements for `gender`.
    pub fn for_gender(gender: Gender) -> Self {
        let defaults = match gender {
            Gender::Unset => &NEUTRAL_DEFAULTS,
            Gender::Male => &MALE_DEFAULTS,
            Gender::Female => &FEMALE_DEFAULTS,
        };
        Self::from_defaults(gender, defaults)
    }

    /// Choose a gender, replacing every measurement with that gender's defaults.
    ///
    /// The defaults are expressed in the profile's current unit system.
    pub fn set_gender(&mut self, gender: Gender) {
        let system = self.unit_system;
        *self = units::convert_profile(&Self::for_gender(gender), UnitSystem::Metric, system);
    }

    /// Switch the profile to another unit system, converting in place.
    pub fn set_unit_system(&mut self, to: UnitSystem, policy: WeightPolicy) {
        if to == self.unit_system {
            return;
        }
        *self = units::convert_profile_with(self, self.unit_system, to, policy);
    }

    /// A metric copy of this profile with unrounded values.
    pub fn canonical(&self) -> UserProfile {
        self.canonical_with(WeightPolicy::Convert)
    }

    /// A metric copy of this profile with unrounded values.
    ///
    /// Under [`WeightPolicy::Keep`] the weight number is copied as is.
    pub fn canonical_with(&self, policy: WeightPolicy) -> UserProfile {
        let system = self.unit_system;
        let mut out = self.clone();
        out.unit_system = UnitSystem::Metric;
        for field in out.lengths_mut() {
            *field = units::to_canonical(*field, system);
        }
        if policy == WeightPolicy::Convert {
            out.weight = units::weight_to_canonical(self.weight, system);
        }
        out
    }

    /// The linear measurements in field order: height, shoulder, chest, belly, waist, hips.
    pub fn lengths(&self) -> [f64; 6] {
        [
            self.height,
            self.shoulder,
            self.chest,
            self.belly,
            self.waist,
            self.hips,
        ]
    }

    pub(crate) fn lengths_mut(&mut self) -> [&mut f64; 6] {
        [
            &mut self.height,
            &mut self.shoulder,
            &mut self.chest,
            &mut self.belly,
            &mut self.waist,
            &mut self.hips,
        ]
    }

    /// Shape labels the user can pick from, given the chosen gender.
    ///
    /// Empty until a gender is set.
    pub fn shape_options(&self) -> &'static [ShapeLabel] {
        ShapeLabel::options_for(self.gender)
    }

    /// Set a single measurement by field name (`height`, `weight`, `chest`, ...).
    pub fn set_field(&mut self, name: &str, value: f64) -> crate::error::Result<()> {
        if !value.is_finite() || value < 0.0 {
            return Err(AinaError::invalid_param(
                "measurement",
                value,
                "must be a non-negative number",
            ));
        }
        let slot = match name {
            "height" => &mut self.height,
            "weight" => &mut self.weight,
            "shoulder" => &mut self.shoulder,
            "chest" => &mut self.chest,
            "belly" => &mut self.belly,
            "waist" => &mut self.waist,
            "hips" | "hip" => &mut self.hips,
            _ => {
                return Err(AinaError::invalid_param(
                    "field",
                    name,
                    "unknown measurement",
                ))
            }
        };
        *slot = value;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_metric_and_unset() {
        let profile = UserProfile::default();
        assert_eq!(profile.gender, Gender::Unset);
        assert_eq!(profile.unit_system, UnitSystem::Metric);
        assert_eq!(profile.height, 170.0);
        assert_eq!(profile.shoulder, 100.0);
        assert_eq!(profile.belly, 80.0);
        assert_eq!(profile.hips, 95.0);
        assert!(profile.shape_options().is_empty());
    }

    #[test]
    fn test_set_gender_overwrites_measurements() {
        let mut profile = UserProfile::default();
        profile.chest = 120.0;
        profile.set_gender(Gender::Female);

        assert_eq!(profile.gender, Gender::Female);
        assert_eq!(profile.height, 162.0);
        assert_eq!(profile.weight, 60.0);
        assert_eq!(profile.chest, 88.0);
        assert_eq!(profile.waist, 70.0);
        assert!(profile.shape_options().contains(&ShapeLabel::Hourglass));
        assert!(!profile.shape_options().contains(&ShapeLabel::Trapezoid));
    }

    #[test]
    fn test_set_gender_respects_unit_system() {
        let mut profile = UserProfile::default();
        profile.set_unit_system(UnitSystem::Imperial, WeightPolicy::Convert);
        profile.set_gender(Gender::Male);

        assert_eq!(profile.unit_system, UnitSystem::Imperial);
        assert_eq!(profile.height, (175.0_f64 / 2.54).round());
        assert_eq!(profile.weight, (75.0_f64 * 2.20462).round());
    }

    #[test]
    fn test_canonical_is_unrounded() {
        let mut profile = UserProfile::for_gender(Gender::Male);
        profile.set_unit_system(UnitSystem::Imperial, WeightPolicy::Convert);
        let canonical = profile.canonical();
        assert_eq!(canonical.unit_system, UnitSystem::Metric);
        assert_eq!(canonical.chest, profile.chest * 2.54);

        let kept = profile.canonical_with(WeightPolicy::Keep);
        assert_eq!(kept.weight, profile.weight);
        assert_eq!(kept.chest, canonical.chest);
    }

    #[test]
    fn test_set_field() {
        let mut profile = UserProfile::default();
        profile.set_field("hip", 101.0).unwrap();
        assert_eq!(profile.hips, 101.0);
        assert!(profile.set_field("neck", 40.0).is_err());
        assert!(profile.set_field("chest", f64::NAN).is_err());
    }

    #[test]
    fn test_gender_serde() {
        assert_eq!(serde_json::to_string(&Gender::Unset).unwrap(), "null");
        assert_eq!(serde_json::to_string(&Gender::Male).unwrap(), "\"male\"");
        let g: Gender = serde_json::from_str("\"female\"").unwrap();
        assert_eq!(g, Gender::Female);
        assert!(serde_json::from_str::<Gender>("\"robot\"").is_err());
    }

    #[test]
    fn test_reads_legacy_record() {
        let json = r#"{"gender":null,"height":170,"weight":70,"chest":90,"waist":75,"hip":95}"#;
        let profile: UserProfile = serde_json::from_str(json).unwrap();
        assert_eq!(profile, UserProfile::default());
    }
}
