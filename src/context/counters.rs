use std::time::Duration;

/// Counters over the lifetime of a context.
#[derive(Clone, Debug, Default)]
pub struct Counters {
    /// A count of distinct DFA states discovered during exploration.
    pub states_discovered: usize,

    /// A count of transitions registered during exploration.
    pub transitions_added: usize,

    /// A count of δ-expansions answered from the cache.
    pub delta_cache_hits: usize,

    /// A count of models produced by enumeration.
    pub models_enumerated: usize,

    /// Time spent in the most recent exploration.
    pub time: Duration,
}
