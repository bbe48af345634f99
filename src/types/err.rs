/*!
Error types used in the library.

- Most of these are very unlikely to occur during use.
- Some are external --- e.g. a capacity error notes a formula was too large for the requested strategy, and the caller may retry the translation with a symbolic strategy or a larger state budget.
- Others are internal, and indicate a bug --- e.g. an ε-expansion which failed to reduce to a constant.

Translation is all-or-nothing: whenever one of these errors surfaces from a translation no partial automaton is returned.

Names of the error enums --- for the most part --- overlap with the module the error originates from.
*/

/// A union of varied error kinds.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    /// An error while parsing a formula or a trace.
    Parse(ParseError),

    /// A formula shape outside the supported grammar.
    Unsupported(UnsupportedError),

    /// A resource budget was exhausted.
    ///
    /// Capacity errors are recoverable, in the sense that the same formula may translate with a different strategy or a larger budget.
    Capacity(CapacityError),

    /// The time limit given in the configuration elapsed during exploration.
    ///
    /// Only surfaced if a (non-zero) time limit was set.
    Cancellation,

    /// An invariant of the library was violated.
    ///
    /// Always fatal, and indicates a bug.
    Internal(InternalError),
}

/// Noted errors when parsing source text.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ParseError {
    /// The source text is not a formula of the requested logic.
    Formula(String),

    /// The source text is not a trace.
    Trace(String),
}

impl From<ParseError> for ErrorKind {
    fn from(e: ParseError) -> Self {
        ErrorKind::Parse(e)
    }
}

/// Noted errors from formulas outside the supported grammar.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum UnsupportedError {
    /// A quoted formula was used as an atom inside a regular expression guard.
    ///
    /// Guards are propositional formulas over plain atoms.
    QuotedAtomInGuard,
}

impl From<UnsupportedError> for ErrorKind {
    fn from(e: UnsupportedError) -> Self {
        ErrorKind::Unsupported(e)
    }
}

/// Noted errors from exhausted budgets.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CapacityError {
    /// Too many distinct atoms for powerset enumeration.
    ///
    /// Enumeration interprets a 64-bit integer as a subset of the atoms, so at most 63 atoms are supported.
    AtomsExhausted {
        /// The number of distinct atoms found.
        count: usize,
    },

    /// The automaton under construction exceeded the state budget.
    StateBitsExhausted {
        /// The budget, as a count of state bits.
        bits: u32,
    },
}

impl From<CapacityError> for ErrorKind {
    fn from(e: CapacityError) -> Self {
        ErrorKind::Capacity(e)
    }
}

/// Noted violations of library invariants.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum InternalError {
    /// An ε-expansion failed to reduce to a constant.
    UngroundedEpsilonExpansion,

    /// A model contained a named atom where only quoted subformulas were expected.
    NamedAtomInSuccessor,

    /// A formula handed to clause extraction was not in conjunctive normal form.
    NotInClausalForm,

    /// A state index was used before the state was registered.
    MissingState,
}

impl From<InternalError> for ErrorKind {
    fn from(e: InternalError) -> Self {
        ErrorKind::Internal(e)
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(ParseError::Formula(detail)) => write!(f, "parse error: {detail}"),
            Self::Parse(ParseError::Trace(detail)) => write!(f, "trace error: {detail}"),
            Self::Unsupported(e) => write!(f, "unsupported construct: {e:?}"),
            Self::Capacity(CapacityError::AtomsExhausted { count }) => {
                write!(f, "capacity: {count} atoms is too many for enumeration")
            }
            Self::Capacity(CapacityError::StateBitsExhausted { bits }) => {
                write!(f, "capacity: state count exceeds {bits} state bits")
            }
            Self::Cancellation => write!(f, "cancelled: time limit elapsed"),
            Self::Internal(e) => write!(f, "internal error: {e:?}"),
        }
    }
}
