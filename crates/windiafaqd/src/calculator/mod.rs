//! Game-statistic calculators behind the computation listeners.
//!
//! The calculators are plain functions over validated inputs. They know
//! nothing about commands or replies; the listeners handle argument reading
//! and formatting.

mod ees;
mod flame;
mod magic;

use thiserror::Error;

pub use self::ees::{
    AEES_RATES, COGS_PER_ATTEMPT, CREDITS_PER_PROTECT, EES_PER_ATTEMPT, EES_RATES,
    EnhancementPlan, EnhancementRates, MESO_PER_ATTEMPT, Simulation, Summary, VP_PER_PROTECT,
    simulate,
};
pub use self::flame::{FlameStats, StatRange};
pub use self::magic::{
    ADVANTAGE_MULTIPLIER, BW_AMP_MULTIPLIER, DISADVANTAGE_MULTIPLIER, Element, FP_IL_AMP_MULTIPLIER,
    MagicEstimate, MagicFlags, STAFF_MULTIPLIER, magic_required,
};

/// Rejected calculator input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalculatorError {
    #[error("{name} must be {requirement}")]
    OutOfRange {
        name: &'static str,
        requirement: &'static str,
    },
    #[error("end must be greater than start")]
    EmptyPlan,
    #[error("flags cannot contain spaces (use -es instead of -e -s)")]
    FlagSpaces,
    #[error("cannot have both elemental advantage and disadvantage")]
    ConflictingElements,
    #[error("cannot have two staves")]
    DuplicateStaff,
    #[error("unknown flag: {flag}")]
    UnknownFlag { flag: char },
}

impl CalculatorError {
    pub(crate) fn out_of_range(name: &'static str, requirement: &'static str) -> Self {
        Self::OutOfRange { name, requirement }
    }
}
