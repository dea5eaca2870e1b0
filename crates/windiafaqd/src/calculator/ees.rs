//! Monte-Carlo simulation of equipment enhancement scrolls.
//!
//! Each attempt succeeds with a chance that shrinks as the star level rises.
//! A failed attempt drops one level unless the item sits on a safe point
//! (a multiple of five) or a star-force protect was spent on the attempt.

use std::num::NonZeroU32;

use rand::Rng;

use super::CalculatorError;

const RATE_REDUCTION_PER_LEVEL: u32 = 5;
const MIN_PROTECT_LEVEL: u32 = 5;
const SAFE_POINT_INTERVAL: u32 = 5;

pub const MESO_PER_ATTEMPT: f64 = 175_000_000.0;
pub const COGS_PER_ATTEMPT: f64 = 15.0;
pub const EES_PER_ATTEMPT: f64 = 1.0;
pub const VP_PER_PROTECT: f64 = 5.0;
pub const CREDITS_PER_PROTECT: f64 = 2_500.0;

/// Success chance bounds, in whole percent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnhancementRates {
    /// Chance at level 0.
    pub base: u32,
    /// Floor the chance never drops below.
    pub min: u32,
}

impl EnhancementRates {
    /// Success chance in percent for an attempt from `level`.
    pub fn chance(self, level: u32) -> u32 {
        self.base
            .saturating_sub(RATE_REDUCTION_PER_LEVEL * level)
            .max(self.min)
    }
}

/// Regular enhancement scrolls.
pub const EES_RATES: EnhancementRates = EnhancementRates { base: 75, min: 10 };
/// Advanced enhancement scrolls.
pub const AEES_RATES: EnhancementRates = EnhancementRates { base: 95, min: 30 };

/// Validated start level, target level and protect window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnhancementPlan {
    start: u32,
    end: u32,
    delta: u32,
}

impl EnhancementPlan {
    /// Validates a plan read from request arguments.
    ///
    /// `delta` is how many levels before each safe point a protect is used.
    ///
    /// # Errors
    ///
    /// Returns [`CalculatorError::OutOfRange`] when a value is not a whole
    /// number in range (start 0–14, end 1–15, delta 0–4) and
    /// [`CalculatorError::EmptyPlan`] when `end` does not exceed `start`.
    pub fn new(start: f64, end: f64, delta: f64) -> Result<Self, CalculatorError> {
        let start = whole_in_range(start, 0, 14)
            .ok_or_else(|| CalculatorError::out_of_range("start", "a whole number within 0-14"))?;
        let end = whole_in_range(end, 1, 15)
            .ok_or_else(|| CalculatorError::out_of_range("end", "a whole number within 1-15"))?;
        let delta = whole_in_range(delta, 0, 4)
            .ok_or_else(|| CalculatorError::out_of_range("delta", "a whole number within 0-4"))?;
        if end <= start {
            return Err(CalculatorError::EmptyPlan);
        }
        Ok(Self { start, end, delta })
    }

    pub fn start(&self) -> u32 {
        self.start
    }

    pub fn end(&self) -> u32 {
        self.end
    }

    pub fn delta(&self) -> u32 {
        self.delta
    }

    fn uses_protect(&self, level: u32) -> bool {
        level > MIN_PROTECT_LEVEL && level % SAFE_POINT_INTERVAL + self.delta >= SAFE_POINT_INTERVAL
    }
}

fn whole_in_range(value: f64, min: u32, max: u32) -> Option<u32> {
    if value.fract() != 0.0 || value < f64::from(min) || value > f64::from(max) {
        return None;
    }
    Some(value as u32)
}

/// Average, minimum and maximum of one simulated quantity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    pub average: f64,
    pub min: f64,
    pub max: f64,
}

impl Summary {
    /// Scales every statistic by a per-unit cost.
    #[must_use]
    pub fn scaled(self, factor: f64) -> Self {
        Self {
            average: self.average * factor,
            min: self.min * factor,
            max: self.max * factor,
        }
    }
}

/// Aggregated outcome of a simulation run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Simulation {
    pub plan: EnhancementPlan,
    pub samples: NonZeroU32,
    /// Scrolls used per run.
    pub attempts: Summary,
    /// Protects used per run.
    pub protects: Summary,
}

impl Simulation {
    pub fn meso(&self) -> Summary {
        self.attempts.scaled(MESO_PER_ATTEMPT)
    }

    pub fn cogs(&self) -> Summary {
        self.attempts.scaled(COGS_PER_ATTEMPT)
    }

    pub fn ees(&self) -> Summary {
        self.attempts.scaled(EES_PER_ATTEMPT)
    }

    pub fn vp(&self) -> Summary {
        self.protects.scaled(VP_PER_PROTECT)
    }

    pub fn credits(&self) -> Summary {
        self.protects.scaled(CREDITS_PER_PROTECT)
    }
}

/// Running total and bounds of one per-run count.
#[derive(Debug, Clone, Copy)]
struct Tally {
    total: u64,
    min: u32,
    max: u32,
}

impl Tally {
    fn new() -> Self {
        Self {
            total: 0,
            min: u32::MAX,
            max: 0,
        }
    }

    fn record(&mut self, value: u32) {
        self.total += u64::from(value);
        self.min = self.min.min(value);
        self.max = self.max.max(value);
    }

    fn summary(self, samples: NonZeroU32) -> Summary {
        Summary {
            average: self.total as f64 / f64::from(samples.get()),
            min: f64::from(self.min),
            max: f64::from(self.max),
        }
    }
}

/// Runs `samples` independent enhancement runs of `plan`.
///
/// Only running totals are kept, so memory use does not grow with `samples`.
pub fn simulate<R: Rng>(
    plan: EnhancementPlan,
    rates: EnhancementRates,
    samples: NonZeroU32,
    rng: &mut R,
) -> Simulation {
    let mut attempts = Tally::new();
    let mut protects = Tally::new();
    for _ in 0..samples.get() {
        let (run_attempts, run_protects) = run_once(plan, rates, rng);
        attempts.record(run_attempts);
        protects.record(run_protects);
    }
    Simulation {
        plan,
        samples,
        attempts: attempts.summary(samples),
        protects: protects.summary(samples),
    }
}

fn run_once<R: Rng>(
    plan: EnhancementPlan,
    rates: EnhancementRates,
    rng: &mut R,
) -> (u32, u32) {
    let mut level = plan.start;
    let mut attempts = 0;
    let mut protects = 0;
    while level < plan.end {
        attempts += 1;
        let protected = plan.uses_protect(level);
        if protected {
            protects += 1;
        }
        let roll: u32 = rng.random_range(0..=100);
        if roll <= rates.chance(level) {
            level += 1;
        } else if !protected && level % SAFE_POINT_INTERVAL != 0 {
            level -= 1;
        }
    }
    (attempts, protects)
}
