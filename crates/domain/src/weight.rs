use derive_more::{Display, Into};
use serde::{Deserialize, Serialize};

/// Exact conversion factor (international avoirdupois pound).
pub const LB_PER_KG: f64 = 1.0 / 0.453_592_37;

/// Display unit for weights. Stored weights are always kilograms,
/// the unit only affects values at the presentation boundary.
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum WeightUnit {
    #[default]
    Kg,
    Lb,
}

impl WeightUnit {
    #[must_use]
    pub fn to_display(self, kg: f64) -> f64 {
        match self {
            WeightUnit::Kg => kg,
            WeightUnit::Lb => kg * LB_PER_KG,
        }
    }

    #[must_use]
    pub fn to_kg(self, display: f64) -> f64 {
        match self {
            WeightUnit::Kg => display,
            WeightUnit::Lb => display / LB_PER_KG,
        }
    }

    /// Format a stored weight in this unit with at most
    /// `max_fraction_digits` fraction digits, trailing zeros trimmed.
    #[must_use]
    pub fn format(self, weight: Weight, max_fraction_digits: usize) -> String {
        let text = format!("{:.*}", max_fraction_digits, self.to_display(weight.kg()));
        if text.contains('.') {
            text.trim_end_matches('0').trim_end_matches('.').to_string()
        } else {
            text
        }
    }
}

/// A weight in canonical kilograms.
#[derive(Debug, Default, Display, Clone, Copy, Into, PartialEq, PartialOrd)]
pub struct Weight(f64);

impl Weight {
    pub fn new(kg: f64) -> Result<Self, WeightError> {
        if !kg.is_finite() {
            return Err(WeightError::ParseError);
        }

        if !(0.0..1000.0).contains(&kg) {
            return Err(WeightError::OutOfRange);
        }

        Ok(Self(kg))
    }

    /// Parse user-entered text denominated in `unit` into a canonical
    /// weight.
    pub fn parse(text: &str, unit: WeightUnit) -> Result<Self, WeightError> {
        match text.trim().parse::<f64>() {
            Ok(value) if value.is_finite() => Weight::new(unit.to_kg(value)),
            _ => Err(WeightError::ParseError),
        }
    }

    #[must_use]
    pub fn kg(self) -> f64 {
        self.0
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum WeightError {
    #[error("Weight must be in the range 0.0 to 999.9 kg")]
    OutOfRange,
    #[error("Weight must be a decimal")]
    ParseError,
}

#[cfg(test)]
mod tests {
    use assert_approx_eq::assert_approx_eq;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(0.0, Ok(Weight(0.0)))]
    #[case(999.9, Ok(Weight(999.9)))]
    #[case(1000.0, Err(WeightError::OutOfRange))]
    #[case(-0.1, Err(WeightError::OutOfRange))]
    #[case(f64::NAN, Err(WeightError::ParseError))]
    #[case(f64::INFINITY, Err(WeightError::ParseError))]
    fn test_weight_new(#[case] input: f64, #[case] expected: Result<Weight, WeightError>) {
        assert_eq!(Weight::new(input), expected);
    }

    #[rstest]
    #[case("100", WeightUnit::Kg, Ok(Weight(100.0)))]
    #[case(" 62.5 ", WeightUnit::Kg, Ok(Weight(62.5)))]
    #[case("8", WeightUnit::Lb, Ok(Weight(3.628_738_96)))]
    #[case("abc", WeightUnit::Kg, Err(WeightError::ParseError))]
    #[case("", WeightUnit::Kg, Err(WeightError::ParseError))]
    #[case("1000", WeightUnit::Kg, Err(WeightError::OutOfRange))]
    fn test_weight_parse(
        #[case] text: &str,
        #[case] unit: WeightUnit,
        #[case] expected: Result<Weight, WeightError>,
    ) {
        match (Weight::parse(text, unit), expected) {
            (Ok(parsed), Ok(expected)) => assert_approx_eq!(parsed.kg(), expected.kg(), 1e-9),
            (result, expected) => assert_eq!(result, expected),
        }
    }

    #[rstest]
    #[case(0.1)]
    #[case(2.5)]
    #[case(60.0)]
    #[case(102.5)]
    #[case(999.9)]
    fn test_unit_conversion_round_trip(#[case] kg: f64) {
        for unit in [WeightUnit::Kg, WeightUnit::Lb] {
            assert_approx_eq!(unit.to_kg(unit.to_display(kg)), kg, kg * 1e-6);
        }
    }

    #[rstest]
    #[case(Weight(100.0), WeightUnit::Kg, "100")]
    #[case(Weight(62.5), WeightUnit::Kg, "62.5")]
    #[case(Weight(0.0), WeightUnit::Kg, "0")]
    #[case(Weight(100.0), WeightUnit::Lb, "220.462")]
    fn test_format(#[case] weight: Weight, #[case] unit: WeightUnit, #[case] expected: &str) {
        assert_eq!(unit.format(weight, 3), expected);
    }

    #[rstest]
    #[case(WeightUnit::Kg, "kg")]
    #[case(WeightUnit::Lb, "lb")]
    fn test_weight_unit_display(#[case] unit: WeightUnit, #[case] expected: &str) {
        assert_eq!(unit.to_string(), expected);
    }
}
