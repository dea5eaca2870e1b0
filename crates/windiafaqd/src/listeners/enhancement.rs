//! `ees` and `aees`: enhancement scroll simulations.

use std::num::NonZeroU32;
use std::sync::Mutex;

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::calculator::{
    AEES_RATES, EES_RATES, EnhancementPlan, EnhancementRates, Simulation, Summary, simulate,
};
use crate::dispatch::{Command, CommandListener, Embed, EmbedField, HandlerError, ReturnData};

use super::format::fixed;

/// Which scroll is being simulated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scroll {
    Ees,
    Aees,
}

impl Scroll {
    fn label(self) -> &'static str {
        match self {
            Self::Ees => "EES",
            Self::Aees => "AEES",
        }
    }

    fn rates(self) -> EnhancementRates {
        match self {
            Self::Ees => EES_RATES,
            Self::Aees => AEES_RATES,
        }
    }
}

/// Runs the simulator for one scroll kind.
#[derive(Debug)]
pub struct EnhancementListener {
    scroll: Scroll,
    samples: NonZeroU32,
    rng: Mutex<StdRng>,
}

impl EnhancementListener {
    /// Creates a listener seeded from the thread-local generator.
    pub fn new(scroll: Scroll, samples: NonZeroU32) -> Self {
        Self::with_rng(scroll, samples, StdRng::from_rng(&mut rand::rng()))
    }

    /// Creates a listener with a caller-supplied generator.
    pub fn with_rng(scroll: Scroll, samples: NonZeroU32, rng: StdRng) -> Self {
        Self {
            scroll,
            samples,
            rng: Mutex::new(rng),
        }
    }

    /// Creates a deterministic listener.
    pub fn seeded(scroll: Scroll, samples: NonZeroU32, seed: u64) -> Self {
        Self::with_rng(scroll, samples, StdRng::seed_from_u64(seed))
    }
}

impl CommandListener for EnhancementListener {
    fn run(&self, command: &Command) -> Result<ReturnData, HandlerError> {
        let args = command.args();
        let plan = EnhancementPlan::new(args.float_at(0)?, args.float_at(1)?, args.float_at(2)?)?;

        let simulation = {
            let mut rng = self
                .rng
                .lock()
                .map_err(|_| HandlerError::internal("random generator lock poisoned"))?;
            simulate(plan, self.scroll.rates(), self.samples, &mut *rng)
        };

        let mut embeds = vec![self.scroll_embed(&simulation)];
        if simulation.protects.average > 0.0 {
            embeds.push(self.protect_embed(&simulation));
        }
        Ok(ReturnData::embeds(embeds))
    }
}

impl EnhancementListener {
    fn scroll_embed(&self, simulation: &Simulation) -> Embed {
        let label = self.scroll.label();
        let mut stats = vec![
            format!("Average {label} Used\nMinimum {label} Used\nMaximum {label} Used"),
            "Average Meso Used\nMinimum Meso Used\nMaximum Meso Used".to_owned(),
        ];
        let mut values = vec![summary_lines(simulation.attempts), summary_lines(simulation.meso())];
        if self.scroll == Scroll::Aees {
            stats.push("Average COGs Used\nMinimum COGs Used\nMaximum COGs Used".to_owned());
            stats.push("Average EES Used\nMinimum EES Used\nMaximum EES Used".to_owned());
            values.push(summary_lines(simulation.cogs()));
            values.push(summary_lines(simulation.ees()));
        }

        Embed::new(
            format!("{label} Simulator"),
            format!(
                "Took {} {label} on average over {} samples to go from {}* to {}*",
                fixed(simulation.attempts.average, 2),
                fixed(f64::from(simulation.samples.get()), 0),
                simulation.plan.start(),
                simulation.plan.end(),
            ),
        )
        .with_field(EmbedField::inline("Stats", stats.join("\n\n")))
        .with_field(EmbedField::inline("Simulated Values", values.join("\n\n")))
    }

    fn protect_embed(&self, simulation: &Simulation) -> Embed {
        let protects = simulation.protects;
        let vp = simulation.vp();
        let credits = simulation.credits();
        let values = format!(
            "{}\n{}\n{}\n\n{}/{}\n{}/{}\n{}/{}",
            fixed(protects.average, 2),
            fixed(protects.min, 0),
            fixed(protects.max, 0),
            fixed(vp.average, 2),
            fixed(credits.average, 2),
            fixed(vp.min, 0),
            fixed(credits.min, 0),
            fixed(vp.max, 0),
            fixed(credits.max, 0),
        );

        Embed::new(
            format!("{} Simulator", self.scroll.label()),
            format!(
                "Took {} SF protects on average over {} samples to go from {}* to {}*",
                fixed(protects.average, 2),
                fixed(f64::from(simulation.samples.get()), 0),
                simulation.plan.start(),
                simulation.plan.end(),
            ),
        )
        .with_field(EmbedField::inline(
            "Stats",
            "Average SF Protects Used\nMinimum SF Protects Used\nMaximum SF Protects Used\n\n\
             Average VP/Credits Used\nMinimum VP/Credits Used\nMaximum VP/Credits Used",
        ))
        .with_field(EmbedField::inline("Simulated Values", values))
    }
}

fn summary_lines(summary: Summary) -> String {
    format!(
        "{}\n{}\n{}",
        fixed(summary.average, 2),
        fixed(summary.min, 0),
        fixed(summary.max, 0)
    )
}
