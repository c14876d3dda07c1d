//! Body-shape classification.
//!
//! Two independent classifiers live here:
//!
//! - [`classify`] derives a silhouette [`ShapeLabel`] from ratios between
//!   shoulder, chest, belly, waist and hip circumferences.
//! - [`body_type`] buckets a profile into a coarse [`BodyType`] from the
//!   chest circumference alone.
//!
//! Both normalize measurements to centimeters before applying thresholds, so
//! the result does not depend on the profile's display units.
//!
//! # Rule order
//!
//! The shape rules are evaluated in a fixed priority order and the first
//! matching rule wins. Oval comes first for both genders: frontal protrusion
//! is independent of the shoulder/hip silhouette and must not be masked by it.
//!
//! | Priority | Male | Female |
//! |----------|------|--------|
//! | 1 | `belly > chest + 2` → oval | `belly > chest` or `waist > chest` → oval |
//! | 2 | `shoulder / hips > 1.10` → inverted triangle | `hips / chest > 1.05` → triangle |
//! | 3 | `shoulder / hips < 0.95` → triangle | `shoulder / hips > 1.05` → inverted triangle |
//! | 4 | `waist / chest < 0.88` → trapezoid | `waist / hips < 0.80` → hourglass |
//! | 5 | rectangle | rectangle |
//!
//! ```
//! use aina::classify::{classify, ShapeLabel};
//! use aina::profile::{Gender, UserProfile};
//!
//! let mut profile = UserProfile::for_gender(Gender::Male);
//! profile.shoulder = 100.0;
//! profile.hips = 80.0;
//! assert_eq!(classify(&profile), ShapeLabel::InvertedTriangle);
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AinaError;
use crate::profile::{Gender, UserProfile};

/// Overall body silhouette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeLabel {
    /// Shoulders, waist and hips roughly aligned.
    Rectangle,
    /// Hips wider than the upper body.
    Triangle,
    /// Shoulders wider than the hips.
    InvertedTriangle,
    /// Broad chest tapering to a narrower waist (male only).
    Trapezoid,
    /// Defined waist between balanced bust and hips (female only).
    Hourglass,
    /// Midsection wider than the chest.
    Oval,
}

const MALE_SHAPES: [ShapeLabel; 5] = [
    ShapeLabel::Trapezoid,
    ShapeLabel::Rectangle,
    ShapeLabel::Triangle,
    ShapeLabel::InvertedTriangle,
    ShapeLabel::Oval,
];

const FEMALE_SHAPES: [ShapeLabel; 5] = [
    ShapeLabel::Hourglass,
    ShapeLabel::Rectangle,
    ShapeLabel::Triangle,
    ShapeLabel::InvertedTriangle,
    ShapeLabel::Oval,
];

impl ShapeLabel {
    /// Snake-case identifier, as used in asset keys.
    pub fn as_str(self) -> &'static str {
        match self {
            ShapeLabel::Rectangle => "rectangle",
            ShapeLabel::Triangle => "triangle",
            ShapeLabel::InvertedTriangle => "inverted_triangle",
            ShapeLabel::Trapezoid => "trapezoid",
            ShapeLabel::Hourglass => "hourglass",
            ShapeLabel::Oval => "oval",
        }
    }

    /// Human-readable name.
    pub fn display_name(self) -> &'static str {
        match self {
            ShapeLabel::Rectangle => "Rectangle",
            ShapeLabel::Triangle => "Triangle",
            ShapeLabel::InvertedTriangle => "Inverted Triangle",
            ShapeLabel::Trapezoid => "Trapezoid",
            ShapeLabel::Hourglass => "Hourglass",
            ShapeLabel::Oval => "Oval",
        }
    }

    /// The closed set of labels [`classify`] can return for `gender`.
    ///
    /// Empty for [`Gender::Unset`].
    pub fn options_for(gender: Gender) -> &'static [ShapeLabel] {
        match gender {
            Gender::Male => &MALE_SHAPES,
            Gender::Female => &FEMALE_SHAPES,
            Gender::Unset => &[],
        }
    }
}

impl fmt::Display for ShapeLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ShapeLabel {
    type Err = AinaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace([' ', '-'], "_").as_str() {
            "rectangle" => Ok(ShapeLabel::Rectangle),
            "triangle" => Ok(ShapeLabel::Triangle),
            "inverted_triangle" => Ok(ShapeLabel::InvertedTriangle),
            "trapezoid" => Ok(ShapeLabel::Trapezoid),
            "hourglass" => Ok(ShapeLabel::Hourglass),
            "oval" => Ok(ShapeLabel::Oval),
            _ => Err(AinaError::UnknownShape(s.to_string())),
        }
    }
}

/// Classify the body silhouette of a profile.
///
/// Deterministic and total: every profile maps to exactly one label from
/// [`ShapeLabel::options_for`] its gender. Profiles without a gender are
/// [`ShapeLabel::Rectangle`].
pub fn classify(profile: &UserProfile) -> ShapeLabel {
    let m = profile.canonical();
    match m.gender {
        Gender::Male => classify_male(&m),
        Gender::Female => classify_female(&m),
        Gender::Unset => ShapeLabel::Rectangle,
    }
}

fn classify_male(m: &UserProfile) -> ShapeLabel {
    let shoulder_hips = m.shoulder / m.hips;

    if m.belly > m.chest + 2.0 {
        ShapeLabel::Oval
    } else if shoulder_hips > 1.10 {
        ShapeLabel::InvertedTriangle
    } else if shoulder_hips < 0.95 {
        ShapeLabel::Triangle
    } else if m.waist / m.chest < 0.88 {
        ShapeLabel::Trapezoid
    } else {
        ShapeLabel::Rectangle
    }
}

fn classify_female(m: &UserProfile) -> ShapeLabel {
    if m.belly > m.chest || m.waist > m.chest {
        ShapeLabel::Oval
    } else if m.hips / m.chest > 1.05 {
        ShapeLabel::Triangle
    } else if m.shoulder / m.hips > 1.05 {
        ShapeLabel::InvertedTriangle
    } else if m.waist / m.hips < 0.80 {
        ShapeLabel::Hourglass
    } else {
        ShapeLabel::Rectangle
    }
}

/// Coarse body-type bucket derived from chest circumference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BodyType {
    /// Slim build.
    Lean,
    /// Mid-range build.
    Average,
    /// Muscular build (male only).
    Athletic,
    /// Fuller build.
    Curvy,
    /// Largest female bucket.
    PlusSize,
}

impl BodyType {
    /// Snake-case identifier, as used in asset keys.
    pub fn as_str(self) -> &'static str {
        match self {
            BodyType::Lean => "lean",
            BodyType::Average => "average",
            BodyType::Athletic => "athletic",
            BodyType::Curvy => "curvy",
            BodyType::PlusSize => "plus_size",
        }
    }

    /// Capitalized label for display, e.g. `"Athletic"` or `"Plus_size"`.
    pub fn label(self) -> String {
        let s = self.as_str();
        let mut chars = s.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }
}

impl fmt::Display for BodyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Bucket a profile by chest circumference.
///
/// | Male chest (cm) | Bucket | Female chest (cm) | Bucket |
/// |-----------------|--------|-------------------|--------|
/// | < 90 | lean | < 85 | lean |
/// | < 100 | average | < 95 | average |
/// | < 110 | athletic | < 105 | curvy |
/// | otherwise | curvy | otherwise | plus size |
///
/// Profiles without a gender are [`BodyType::Average`].
pub fn body_type(profile: &UserProfile) -> BodyType {
    let chest = crate::units::to_canonical(profile.chest, profile.unit_system);
    match profile.gender {
        Gender::Unset => BodyType::Average,
        Gender::Male => {
            if chest < 90.0 {
                BodyType::Lean
            } else if chest < 100.0 {
                BodyType::Average
            } else if chest < 110.0 {
                BodyType::Athletic
            } else {
                BodyType::Curvy
            }
        }
        Gender::Female => {
            if chest < 85.0 {
                BodyType::Lean
            } else if chest < 95.0 {
                BodyType::Average
            } else if chest < 105.0 {
                BodyType::Curvy
            } else {
                BodyType::PlusSize
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::{convert_profile, UnitSystem};

    fn male(shoulder: f64, chest: f64, belly: f64, waist: f64, hips: f64) -> UserProfile {
        let mut p = UserProfile::for_gender(Gender::Male);
        p.shoulder = shoulder;
        p.chest = chest;
        p.belly = belly;
        p.waist = waist;
        p.hips = hips;
        p
    }

    fn female(shoulder: f64, chest: f64, belly: f64, waist: f64, hips: f64) -> UserProfile {
        let mut p = UserProfile::for_gender(Gender::Female);
        p.shoulder = shoulder;
        p.chest = chest;
        p.belly = belly;
        p.waist = waist;
        p.hips = hips;
        p
    }

    #[test]
    fn test_male_rules() {
        assert_eq!(classify(&male(100.0, 96.0, 101.0, 90.0, 100.0)), ShapeLabel::Oval);
        assert_eq!(classify(&male(100.0, 96.0, 85.0, 90.0, 80.0)), ShapeLabel::InvertedTriangle);
        assert_eq!(classify(&male(90.0, 96.0, 85.0, 90.0, 100.0)), ShapeLabel::Triangle);
        assert_eq!(classify(&male(100.0, 100.0, 85.0, 80.0, 100.0)), ShapeLabel::Trapezoid);
        assert_eq!(classify(&male(100.0, 100.0, 90.0, 95.0, 100.0)), ShapeLabel::Rectangle);
    }

    #[test]
    fn test_female_rules() {
        assert_eq!(classify(&female(90.0, 90.0, 92.0, 70.0, 90.0)), ShapeLabel::Oval);
        assert_eq!(classify(&female(90.0, 90.0, 80.0, 92.0, 90.0)), ShapeLabel::Oval);
        assert_eq!(classify(&female(90.0, 90.0, 80.0, 75.0, 100.0)), ShapeLabel::Triangle);
        assert_eq!(classify(&female(100.0, 90.0, 80.0, 80.0, 90.0)), ShapeLabel::InvertedTriangle);
        assert_eq!(classify(&female(90.0, 90.0, 80.0, 60.0, 90.0)), ShapeLabel::Hourglass);
        assert_eq!(classify(&female(90.0, 90.0, 80.0, 80.0, 90.0)), ShapeLabel::Rectangle);
    }

    #[test]
    fn test_oval_takes_priority_over_silhouette() {
        // belly = chest + 5 and shoulder/hips = 1.2 both hold.
        let p = male(120.0, 96.0, 101.0, 90.0, 100.0);
        assert_eq!(classify(&p), ShapeLabel::Oval);

        // Female: both oval and triangle conditions hold.
        let p = female(90.0, 90.0, 95.0, 70.0, 100.0);
        assert_eq!(classify(&p), ShapeLabel::Oval);
    }

    #[test]
    fn test_boundaries_are_strict() {
        // belly == chest + 2 is not oval; shoulder/hips == 1.10 is not inverted.
        assert_eq!(classify(&male(110.0, 96.0, 98.0, 90.0, 100.0)), ShapeLabel::Rectangle);
        // waist/hips == 0.80 is not hourglass.
        assert_eq!(classify(&female(90.0, 90.0, 80.0, 72.0, 90.0)), ShapeLabel::Rectangle);
    }

    #[test]
    fn test_gender_defaults() {
        assert_eq!(classify(&UserProfile::for_gender(Gender::Male)), ShapeLabel::Trapezoid);
        assert_eq!(classify(&UserProfile::for_gender(Gender::Female)), ShapeLabel::Hourglass);
        assert_eq!(classify(&UserProfile::default()), ShapeLabel::Rectangle);
    }

    #[test]
    fn test_result_in_gender_set_and_deterministic() {
        let shoulders = [80.0, 95.0, 105.0, 120.0];
        let bellies = [70.0, 95.0, 110.0];
        let waists = [60.0, 80.0, 100.0];
        let hips = [85.0, 100.0, 115.0];
        for gender in [Gender::Male, Gender::Female] {
            for &s in &shoulders {
                for &b in &bellies {
                    for &w in &waists {
                        for &h in &hips {
                            let mut p = UserProfile::for_gender(gender);
                            p.shoulder = s;
                            p.belly = b;
                            p.waist = w;
                            p.hips = h;
                            let label = classify(&p);
                            assert!(ShapeLabel::options_for(gender).contains(&label));
                            assert_eq!(label, classify(&p.clone()));
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn test_unit_invariance() {
        let profiles = [
            male(120.0, 100.0, 85.0, 90.0, 100.0),
            male(85.0, 100.0, 85.0, 90.0, 105.0),
            male(104.0, 104.0, 86.0, 84.0, 100.0),
            female(90.0, 90.0, 80.0, 60.0, 90.0),
            female(90.0, 88.0, 78.0, 75.0, 110.0),
        ];
        for p in &profiles {
            let imperial = convert_profile(p, UnitSystem::Metric, UnitSystem::Imperial);
            assert_eq!(classify(p), classify(&imperial), "profile {:?}", p);
        }
    }

    #[test]
    fn test_body_type_breakpoints() {
        let mut p = UserProfile::for_gender(Gender::Male);
        for (chest, expected) in [
            (89.0, BodyType::Lean),
            (90.0, BodyType::Average),
            (105.0, BodyType::Athletic),
            (110.0, BodyType::Curvy),
        ] {
            p.chest = chest;
            assert_eq!(body_type(&p), expected);
        }

        let mut p = UserProfile::for_gender(Gender::Female);
        for (chest, expected) in [
            (80.0, BodyType::Lean),
            (94.0, BodyType::Average),
            (95.0, BodyType::Curvy),
            (105.0, BodyType::PlusSize),
        ] {
            p.chest = chest;
            assert_eq!(body_type(&p), expected);
        }

        assert_eq!(body_type(&UserProfile::default()), BodyType::Average);
    }

    #[test]
    fn test_body_type_uses_metric_chest() {
        let mut p = UserProfile::for_gender(Gender::Male);
        p.set_unit_system(UnitSystem::Imperial, crate::units::WeightPolicy::Convert);
        p.chest = 44.0; // 111.76 cm
        assert_eq!(body_type(&p), BodyType::Curvy);
    }

    #[test]
    fn test_labels() {
        assert_eq!(BodyType::Athletic.label(), "Athletic");
        assert_eq!(BodyType::PlusSize.label(), "Plus_size");
        assert_eq!(ShapeLabel::InvertedTriangle.display_name(), "Inverted Triangle");
        assert_eq!("Inverted Triangle".parse::<ShapeLabel>().unwrap(), ShapeLabel::InvertedTriangle);
        assert!("pear".parse::<ShapeLabel>().is_err());
    }
}
