//! Flame stat ranges by item level.

use super::CalculatorError;

const ETERNAL_RANGE: StatRange = StatRange { min: 4.0, max: 10.0 };
const POWERFUL_RANGE: StatRange = StatRange { min: 1.0, max: 7.0 };
const OVERALL_MULTIPLIER: f64 = 2.0;

/// Inclusive stat range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatRange {
    pub min: f64,
    pub max: f64,
}

impl StatRange {
    fn scaled(self, factor: f64) -> Self {
        Self {
            min: self.min * factor,
            max: self.max * factor,
        }
    }
}

/// Flame ranges for one item level.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlameStats {
    pub level: f64,
    pub eternal: StatRange,
    pub powerful: StatRange,
}

impl FlameStats {
    /// Computes flame ranges for a non-overall item of `level`.
    ///
    /// The stat tier is `ceil(level / 20) + 1`.
    ///
    /// # Errors
    ///
    /// Returns [`CalculatorError::OutOfRange`] for negative or non-finite
    /// levels.
    pub fn for_level(level: f64) -> Result<Self, CalculatorError> {
        if !level.is_finite() || level < 0.0 {
            return Err(CalculatorError::out_of_range("level", "a number of at least 0"));
        }
        let tier = (level / 20.0).ceil() + 1.0;
        Ok(Self {
            level,
            eternal: ETERNAL_RANGE.scaled(tier),
            powerful: POWERFUL_RANGE.scaled(tier),
        })
    }

    /// Eternal flame range on an overall.
    pub fn overall_eternal(&self) -> StatRange {
        self.eternal.scaled(OVERALL_MULTIPLIER)
    }

    /// Powerful flame range on an overall.
    pub fn overall_powerful(&self) -> StatRange {
        self.powerful.scaled(OVERALL_MULTIPLIER)
    }
}
