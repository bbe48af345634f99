/*!
Named log targets, and notes on logging.

The library reports on its work through the [log] facade --- δ-expansions, state registrations, model counts, and the like --- and bundles no implementation of its own: install whichever logger suits the embedding, or none.

Every call names one of the targets below, so output can be narrowed to the part of the pipeline under investigation.
With [env_logger](https://docs.rs/env_logger/latest/env_logger/), for example, `RUST_LOG=explore` follows the subset construction alone, and `RUST_LOG=delta` the expansions feeding it.
*/

/// The targets named by the library's [log] calls.
pub mod targets {
    /// Logs related to [δ-expansion](crate::procedures::delta)
    pub const DELTA: &str = "delta";

    /// Logs related to [exploration](crate::procedures::explore)
    pub const EXPLORE: &str = "explore";

    /// Logs related to [model enumeration](crate::procedures::models)
    pub const MODELS: &str = "models";

    /// Logs related to [minimization](crate::dfa)
    pub const MINIMIZE: &str = "minimize";

    /// Logs related to [parsing](crate::builder)
    pub const BUILDER: &str = "builder";
}
