/*!
Configuration of a context.

All configuration for a translation is contained in a [Config], fixed when the [context](crate::context) is created.
The defaults are chosen to give quick, deterministic results on small formulas; anything larger is expected to adjust the state budget or the strategy.

One absence worth noting: there are no knobs for the decision diagram package.
Reordering packages expose tunables --- a reorder heuristic, slot counts for a global unique table and operation cache --- but the bundled package stores each diagram as a self-contained node array in a fixed variable order, with nothing global to size or reorder.
Rather than accept such fields and silently ignore them, the configuration omits them.
*/

use std::time::Duration;

pub use crate::procedures::models::EnumerationStrategy;

/// The primary configuration structure.
#[derive(Clone, Debug)]
pub struct Config {
    /// The state budget, as a count of state bits.
    ///
    /// Exploration fails with a [capacity error](crate::types::err::CapacityError::StateBitsExhausted) on discovering more than 2^`max_state_bits` states.
    pub max_state_bits: u32,

    /// Which model enumeration to use where a strategy enumerates models.
    pub enumeration: EnumerationStrategy,

    /// The probability of assigning positive polarity to an atom when freely choosing during SAT-based enumeration.
    pub polarity_lean: f64,

    /// The time limit for a translation, checked at each state pop.
    ///
    /// Zero means no limit.
    pub time_limit: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            max_state_bits: 10,
            enumeration: EnumerationStrategy::Naive,
            polarity_lean: 0.0,
            time_limit: Duration::ZERO,
        }
    }
}
