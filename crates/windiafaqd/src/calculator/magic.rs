//! Magic needed to defeat a monster in one hit.

use std::str::FromStr;

use super::CalculatorError;

pub const STAFF_MULTIPLIER: f64 = 1.25;
pub const ADVANTAGE_MULTIPLIER: f64 = 1.5;
pub const DISADVANTAGE_MULTIPLIER: f64 = 0.5;
pub const FP_IL_AMP_MULTIPLIER: f64 = 1.4;
pub const BW_AMP_MULTIPLIER: f64 = 1.3;

/// Elemental matchup against the target.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Element {
    #[default]
    Neutral,
    Advantage,
    Disadvantage,
}

impl Element {
    pub fn multiplier(self) -> f64 {
        match self {
            Self::Neutral => 1.0,
            Self::Advantage => ADVANTAGE_MULTIPLIER,
            Self::Disadvantage => DISADVANTAGE_MULTIPLIER,
        }
    }
}

/// Parsed modifier flags such as `-es`.
///
/// A leading `-` is optional. `e` marks elemental advantage, `d`
/// disadvantage, and `l` or `s` an elemental staff.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MagicFlags {
    pub element: Element,
    pub staff: bool,
}

impl MagicFlags {
    /// Combined multiplier applied to spell attack.
    pub fn multiplier(self) -> f64 {
        let staff = if self.staff { STAFF_MULTIPLIER } else { 1.0 };
        self.element.multiplier() * staff
    }
}

impl FromStr for MagicFlags {
    type Err = CalculatorError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let flags = raw.strip_prefix('-').unwrap_or(raw);
        if flags.contains(char::is_whitespace) {
            return Err(CalculatorError::FlagSpaces);
        }

        let mut parsed = Self::default();
        for flag in flags.chars() {
            match flag {
                'e' if parsed.element == Element::Disadvantage => {
                    return Err(CalculatorError::ConflictingElements);
                }
                'd' if parsed.element == Element::Advantage => {
                    return Err(CalculatorError::ConflictingElements);
                }
                'e' => parsed.element = Element::Advantage,
                'd' => parsed.element = Element::Disadvantage,
                'l' | 's' if parsed.staff => return Err(CalculatorError::DuplicateStaff),
                'l' | 's' => parsed.staff = true,
                other => return Err(CalculatorError::UnknownFlag { flag: other }),
            }
        }
        Ok(parsed)
    }
}

/// Magic required per class.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MagicEstimate {
    /// Bishop/Wizard with the Elemental Amplification bonus.
    pub bw: f64,
    /// Fire/Poison and Ice/Lightning mages.
    pub fp_il: f64,
    /// Bishop, no amplification.
    pub bs: f64,
}

/// Computes the magic each class needs to one-shot a monster.
///
/// # Errors
///
/// Returns [`CalculatorError::OutOfRange`] unless `hp` and `spell_attack` are
/// finite and positive.
pub fn magic_required(
    hp: f64,
    spell_attack: f64,
    flags: MagicFlags,
) -> Result<MagicEstimate, CalculatorError> {
    if !hp.is_finite() || hp <= 0.0 {
        return Err(CalculatorError::out_of_range("hp", "greater than 0"));
    }
    if !spell_attack.is_finite() || spell_attack <= 0.0 {
        return Err(CalculatorError::out_of_range("spell attack", "greater than 0"));
    }

    let modifier = spell_attack * flags.multiplier();
    Ok(MagicEstimate {
        bw: one_shot_magic(hp, modifier * BW_AMP_MULTIPLIER),
        fp_il: one_shot_magic(hp, modifier * FP_IL_AMP_MULTIPLIER),
        bs: one_shot_magic(hp, modifier),
    })
}

// Larger root of a·x² + b·x − 1 = 0, rounded up.
fn one_shot_magic(hp: f64, modifier: f64) -> f64 {
    let a = 0.000_033_333_3 * modifier / hp;
    let b = 0.023 * modifier / hp;
    let discriminant = (b * b + 4.0 * a).sqrt();
    let high = (-b + discriminant) / (2.0 * a);
    let low = (-b - discriminant) / (2.0 * a);
    high.max(low).ceil()
}
