//! The command listeners served by the daemon.

mod enhancement;
mod faq;
mod flame;
mod format;
mod magic;

use std::num::NonZeroU32;

use crate::calculator::CalculatorError;
use crate::dispatch::{HandlerError, ListenerRegistry};
use crate::store::FaqStore;

pub use self::enhancement::{EnhancementListener, Scroll};
pub use self::faq::FaqListener;
pub use self::flame::FlameListener;
pub use self::magic::MagicListener;

const LISTENER_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::listeners");

pub const FLAME: &str = "flame";
pub const MAGIC: &str = "magic";
pub const EES: &str = "ees";
pub const AEES: &str = "aees";
pub const FAQ: &str = "faq";

impl From<CalculatorError> for HandlerError {
    fn from(error: CalculatorError) -> Self {
        Self::invalid_input(error.to_string())
    }
}

/// Registers every shipped listener.
pub fn register_defaults(
    registry: &mut ListenerRegistry,
    ees_samples: NonZeroU32,
    faq_store: Box<dyn FaqStore>,
) {
    registry.register(FLAME, FlameListener);
    registry.register(MAGIC, MagicListener);
    registry.register(EES, EnhancementListener::new(Scroll::Ees, ees_samples));
    registry.register(AEES, EnhancementListener::new(Scroll::Aees, ees_samples));
    registry.register(FAQ, FaqListener::from_boxed(faq_store));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryFaqStore;

    #[test]
    fn registers_every_listener() {
        let mut registry = ListenerRegistry::new();
        let samples = NonZeroU32::new(10).expect("non-zero");
        register_defaults(&mut registry, samples, Box::new(MemoryFaqStore::new()));
        assert_eq!(registry.names(), ["aees", "ees", "faq", "flame", "magic"]);
    }
}
