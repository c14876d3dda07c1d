//! Measurement unit normalization.
//!
//! Linear measurements are stored in the profile's active unit system and
//! converted to a canonical metric form (centimeters, kilograms) before any
//! classification logic runs.
//!
//! # Rounding
//!
//! [`convert_profile`] rounds every converted field to the nearest whole unit.
//! The rounding is lossy: converting metric → imperial → metric does not
//! necessarily reproduce the original integers. [`express_profile`] is the
//! exact counterpart used for persistence.
//!
//! ```
//! use aina::units::{to_canonical, from_canonical, UnitSystem};
//!
//! assert_eq!(to_canonical(10.0, UnitSystem::Imperial), 25.4);
//! assert_eq!(from_canonical(25.4, UnitSystem::Imperial), 10.0);
//! assert_eq!(to_canonical(90.0, UnitSystem::Metric), 90.0);
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AinaError;
use crate::profile::UserProfile;

/// Centimeters per inch.
pub const CM_PER_INCH: f64 = 2.54;

/// Pounds per kilogram.
pub const LB_PER_KG: f64 = 2.20462;

/// Unit system used to interpret a profile's measurements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitSystem {
    /// Centimeters and kilograms.
    #[default]
    Metric,
    /// Inches and pounds.
    Imperial,
}

impl UnitSystem {
    /// Short label for linear measurements.
    pub fn length_unit(self) -> &'static str {
        match self {
            UnitSystem::Metric => "cm",
            UnitSystem::Imperial => "in",
        }
    }

    /// Short label for body mass.
    pub fn mass_unit(self) -> &'static str {
        match self {
            UnitSystem::Metric => "kg",
            UnitSystem::Imperial => "lb",
        }
    }
}

impl fmt::Display for UnitSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnitSystem::Metric => f.write_str("metric"),
            UnitSystem::Imperial => f.write_str("imperial"),
        }
    }
}

impl FromStr for UnitSystem {
    type Err = AinaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "metric" | "cm" => Ok(UnitSystem::Metric),
            "imperial" | "in" => Ok(UnitSystem::Imperial),
            other => Err(AinaError::invalid_param(
                "unit_system",
                other,
                "expected 'metric' or 'imperial'",
            )),
        }
    }
}

/// How body weight is treated when a profile switches unit systems.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeightPolicy {
    /// Convert weight between kilograms and pounds along with the linear fields.
    #[default]
    Convert,
    /// Leave the weight number untouched (legacy behavior).
    Keep,
}

/// Convert a linear measurement in `system` units to centimeters.
#[inline]
pub fn to_canonical(value: f64, system: UnitSystem) -> f64 {
    match system {
        UnitSystem::Metric => value,
        UnitSystem::Imperial => value * CM_PER_INCH,
    }
}

/// Convert a linear measurement in centimeters to `system` units.
#[inline]
pub fn from_canonical(cm: f64, system: UnitSystem) -> f64 {
    match system {
        UnitSystem::Metric => cm,
        UnitSystem::Imperial => cm / CM_PER_INCH,
    }
}

/// Convert a mass in `system` units to kilograms.
#[inline]
pub fn weight_to_canonical(value: f64, system: UnitSystem) -> f64 {
    match system {
        UnitSystem::Metric => value,
        UnitSystem::Imperial => value / LB_PER_KG,
    }
}

/// Convert a mass in kilograms to `system` units.
#[inline]
pub fn weight_from_canonical(kg: f64, system: UnitSystem) -> f64 {
    match system {
        UnitSystem::Metric => kg,
        UnitSystem::Imperial => kg * LB_PER_KG,
    }
}

/// Convert a length between two unit systems, rounded to the nearest whole unit.
pub fn convert_length(value: f64, from: UnitSystem, to: UnitSystem) -> f64 {
    from_canonical(to_canonical(value, from), to).round()
}

/// Convert a mass between two unit systems, rounded to the nearest whole unit.
pub fn convert_weight(value: f64, from: UnitSystem, to: UnitSystem) -> f64 {
    weight_from_canonical(weight_to_canonical(value, from), to).round()
}

/// Convert every measurement of a profile from `from` to `to`, converting weight too.
///
/// See [`convert_profile_with`] for the legacy mode that leaves weight alone.
pub fn convert_profile(profile: &UserProfile, from: UnitSystem, to: UnitSystem) -> UserProfile {
    convert_profile_with(profile, from, to, WeightPolicy::Convert)
}

/// Convert every linear field of a profile from `from` to `to`.
///
/// Weight follows `policy`. The returned profile is tagged with `to`. When
/// `from == to` the record is returned unchanged, without rounding.
pub fn convert_profile_with(
    profile: &UserProfile,
    from: UnitSystem,
    to: UnitSystem,
    policy: WeightPolicy,
) -> UserProfile {
    let mut out = profile.clone();
    out.unit_system = to;
    if from == to {
        return out;
    }

    for field in out.lengths_mut() {
        *field = convert_length(*field, from, to);
    }
    if policy == WeightPolicy::Convert {
        out.weight = convert_weight(out.weight, from, to);
    }
    out
}

/// Re-express a profile in `to` without whole-unit rounding.
///
/// Float noise below 1e-9 is snapped away, so a value taken to metric with
/// [`UserProfile::canonical_with`] and brought back here reproduces the
/// entered number. Weight follows `policy`.
pub fn express_profile(profile: &UserProfile, to: UnitSystem, policy: WeightPolicy) -> UserProfile {
    let from = profile.unit_system;
    let mut out = profile.clone();
    out.unit_system = to;
    if from == to {
        return out;
    }

    for field in out.lengths_mut() {
        *field = snap(from_canonical(to_canonical(*field, from), to));
    }
    if policy == WeightPolicy::Convert {
        out.weight = snap(weight_from_canonical(weight_to_canonical(out.weight, from), to));
    }
    out
}

fn snap(value: f64) -> f64 {
    (value * 1e9).round() / 1e9
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::Gender;

    #[test]
    fn test_length_factors() {
        assert_eq!(to_canonical(1.0, UnitSystem::Imperial), 2.54);
        assert_eq!(from_canonical(254.0, UnitSystem::Imperial), 100.0);
        assert_eq!(convert_length(100.0, UnitSystem::Metric, UnitSystem::Imperial), 39.0);
        assert_eq!(convert_length(39.0, UnitSystem::Imperial, UnitSystem::Metric), 99.0);
    }

    #[test]
    fn test_weight_factors() {
        assert_eq!(convert_weight(70.0, UnitSystem::Metric, UnitSystem::Imperial), 154.0);
        assert_eq!(convert_weight(154.0, UnitSystem::Imperial, UnitSystem::Metric), 70.0);
        assert!((weight_to_canonical(LB_PER_KG, UnitSystem::Imperial) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_convert_profile_rounds_all_lengths() {
        let mut profile = UserProfile::default();
        profile.set_gender(Gender::Male);
        let imperial = convert_profile(&profile, UnitSystem::Metric, UnitSystem::Imperial);

        assert_eq!(imperial.unit_system, UnitSystem::Imperial);
        assert_eq!(imperial.gender, Gender::Male);
        assert_eq!(imperial.height, (175.0 / CM_PER_INCH).round());
        assert_eq!(imperial.chest, (96.0 / CM_PER_INCH).round());
        assert_eq!(imperial.weight, (75.0 * LB_PER_KG).round());
        for value in imperial.lengths() {
            assert_eq!(value, value.round());
        }
    }

    #[test]
    fn test_keep_weight_policy() {
        let profile = UserProfile::default();
        let imperial = convert_profile_with(
            &profile,
            UnitSystem::Metric,
            UnitSystem::Imperial,
            WeightPolicy::Keep,
        );
        assert_eq!(imperial.weight, profile.weight);
        assert_ne!(imperial.height, profile.height);
    }

    #[test]
    fn test_identity_conversion_is_exact() {
        let mut profile = UserProfile::default();
        profile.chest = 90.4;
        let same = convert_profile(&profile, UnitSystem::Metric, UnitSystem::Metric);
        assert_eq!(same, profile);
    }

    #[test]
    fn test_round_trip_is_lossy_but_close() {
        let profile = UserProfile::default();
        let there = convert_profile(&profile, UnitSystem::Metric, UnitSystem::Imperial);
        let back = convert_profile(&there, UnitSystem::Imperial, UnitSystem::Metric);
        for (a, b) in profile.lengths().iter().zip(back.lengths().iter()) {
            assert!((a - b).abs() <= CM_PER_INCH, "{} vs {}", a, b);
        }
    }

    #[test]
    fn test_express_profile_is_exact() {
        let mut profile = UserProfile::default();
        profile.unit_system = UnitSystem::Imperial;
        profile.chest = 38.5;
        profile.weight = 151.0;

        let metric = profile.canonical();
        let back = express_profile(&metric, UnitSystem::Imperial, WeightPolicy::Convert);
        assert_eq!(back, profile);
    }

    #[test]
    fn test_parse_unit_system() {
        assert_eq!("Imperial".parse::<UnitSystem>().unwrap(), UnitSystem::Imperial);
        assert_eq!("cm".parse::<UnitSystem>().unwrap(), UnitSystem::Metric);
        assert!("furlong".parse::<UnitSystem>().is_err());
    }
}
