/*!
δ-expansion: the one-step "what must hold next" function.

Given an LDLf formula and a letter, δ produces a propositional formula whose models are exactly the sets of subformulas the automaton may hold at the next step --- the subformulas appear as [quoted atoms](crate::structures::pl::AtomLabel::Quoted).
Three modes share one engine:

- [Against a concrete letter](GenericContext::delta), guards are evaluated away and the result is over quoted atoms alone.
- [Against ε](GenericContext::delta_epsilon) --- the end of the trace --- every guard fails, every box is vacuous, and the result collapses to a constant: the finality judgment.
- [Symbolically](GenericContext::delta_symbolic), guards are kept, and the result is a single formula over named *and* quoted atoms covering every letter at once. Restricting it to a letter agrees with the concrete mode, which is what lets a decision diagram carry one δ per state.

# The rules

Booleans distribute.
A diamond or box dispatches on its expression:

- A guard consumes the letter: `δ(⟨π⟩φ) = π ∧ quote(φ)` and `δ([π]φ) = ¬π ∨ quote(φ)` (under ε: false, resp. true).
- A test stays in place: `δ(⟨ψ?⟩φ) = δ(ψ) ∧ δ(φ)` and `δ([ψ?]φ) = δ(¬ψ) ∨ δ(φ)`.
- Union and sequence rewrite structurally: `⟨ρ₁ ∪ ρ₂⟩φ` splits into a disjunction (conjunction for box), `⟨ρ₁;ρ₂⟩φ` nests as `⟨ρ₁⟩⟨ρ₂⟩φ`.
- A star unfolds once: `δ(⟨ρ*⟩φ) = δ(φ) ∨ δ(⟨ρ⟩ F(⟨ρ*⟩φ))`, with the box dual using a T-marker and a conjunction.

The expansion of a marked formula is constant --- false for F, true for T --- whatever the letter.
A star whose body consumes no input therefore bottoms out instead of unfolding forever, and since [quoting strips markers](GenericContext::ldlf_strip_marks), a marker never outlives the δ-step which introduced it.

ε-mode and symbolic results are memoized on the context; concrete-letter results are not, as they vary with the letter.
*/

use std::collections::BTreeSet;

use crate::context::GenericContext;
use crate::misc::log::targets;
use crate::procedures::eval::Interpretation;
use crate::structures::ldlf::{Ldlf, LdlfId, Regex, RegexId};
use crate::structures::pl::PlId;
use crate::structures::state::{DfaState, NfaState};
use crate::types::err::{ErrorKind, InternalError};

/// What δ expands against.
#[derive(Clone, Copy)]
enum DeltaMode<'a> {
    /// The end of the trace.
    Epsilon,

    /// A concrete letter.
    Letter(&'a Interpretation),

    /// Every letter at once: guards stay in the result.
    Symbolic,
}

impl<R: rand::Rng + std::default::Default> GenericContext<R> {
    /// The expansion of `formula` against a concrete letter.
    pub fn delta(&mut self, formula: LdlfId, letter: &Interpretation) -> PlId {
        self.delta_mode(formula, DeltaMode::Letter(letter))
    }

    /// The finality judgment: whether `formula` accepts the empty suffix.
    pub fn delta_epsilon(&mut self, formula: LdlfId) -> Result<bool, ErrorKind> {
        if let Some(expansion) = self.delta_cache.get(&(formula, true)) {
            let expansion = *expansion;
            self.counters.delta_cache_hits += 1;
            return self.ground_truth(expansion);
        }

        let expansion = self.delta_mode(formula, DeltaMode::Epsilon);
        self.delta_cache.insert((formula, true), expansion);
        self.ground_truth(expansion)
    }

    /// The symbolic expansion of `formula`, over named and quoted atoms.
    pub fn delta_symbolic(&mut self, formula: LdlfId) -> PlId {
        if let Some(expansion) = self.delta_cache.get(&(formula, false)) {
            self.counters.delta_cache_hits += 1;
            return *expansion;
        }

        let expansion = self.delta_mode(formula, DeltaMode::Symbolic);
        log::trace!(target: targets::DELTA, "symbolic δ of {formula:?}");
        self.delta_cache.insert((formula, false), expansion);
        expansion
    }

    fn ground_truth(&self, expansion: PlId) -> Result<bool, ErrorKind> {
        if expansion == self.pl_true() {
            Ok(true)
        } else if expansion == self.pl_false() {
            Ok(false)
        } else {
            Err(InternalError::UngroundedEpsilonExpansion.into())
        }
    }

    fn delta_mode(&mut self, formula: LdlfId, mode: DeltaMode) -> PlId {
        match self.ldlf_db.get(formula).clone() {
            Ldlf::True => self.pl_true(),
            Ldlf::False => self.pl_false(),

            Ldlf::And(operands) => {
                let operands = operands
                    .into_iter()
                    .map(|operand| self.delta_mode(operand, mode))
                    .collect::<Vec<_>>();
                self.mk_pl_and(operands)
            }

            Ldlf::Or(operands) => {
                let operands = operands
                    .into_iter()
                    .map(|operand| self.delta_mode(operand, mode))
                    .collect::<Vec<_>>();
                self.mk_pl_or(operands)
            }

            // δ is defined on normal forms; an unnormalized negation is normalized on the way through.
            Ldlf::Not(_) => {
                let normalized = self.ldlf_nnf(formula);
                debug_assert_ne!(normalized, formula);
                self.delta_mode(normalized, mode)
            }

            Ldlf::Diamond(regex, body) => self.delta_diamond(regex, body, mode),
            Ldlf::Box(regex, body) => self.delta_box(regex, body, mode),

            Ldlf::FMarked(_) => self.pl_false(),
            Ldlf::TMarked(_) => self.pl_true(),
        }
    }

    fn delta_diamond(&mut self, regex: RegexId, body: LdlfId, mode: DeltaMode) -> PlId {
        match self.regex_db.get(regex).clone() {
            Regex::Prop(guard) => match mode {
                DeltaMode::Epsilon => self.pl_false(),
                DeltaMode::Letter(letter) => {
                    if self.pl_eval(guard, letter) {
                        self.quote_successor(body)
                    } else {
                        self.pl_false()
                    }
                }
                DeltaMode::Symbolic => {
                    let successor = self.quote_successor(body);
                    self.mk_pl_and([guard, successor])
                }
            },

            Regex::Test(test) => {
                let here = self.delta_mode(test, mode);
                let onwards = self.delta_mode(body, mode);
                self.mk_pl_and([here, onwards])
            }

            Regex::Union(operands) => {
                let operands = operands
                    .into_iter()
                    .map(|operand| self.delta_diamond(operand, body, mode))
                    .collect::<Vec<_>>();
                self.mk_pl_or(operands)
            }

            Regex::Seq(operands) => {
                let rest = match operands.len() {
                    2 => operands[1],
                    _ => self.mk_regex_seq(operands[1..].to_vec()),
                };
                let nested = self.mk_ldlf_diamond(rest, body);
                self.delta_diamond(operands[0], nested, mode)
            }

            Regex::Star(argument) => {
                let star = self.mk_ldlf_diamond(regex, body);
                let marked = self.mk_ldlf_fmarked(star);
                let now = self.delta_mode(body, mode);
                let unfolded = self.delta_diamond(argument, marked, mode);
                self.mk_pl_or([now, unfolded])
            }
        }
    }

    fn delta_box(&mut self, regex: RegexId, body: LdlfId, mode: DeltaMode) -> PlId {
        match self.regex_db.get(regex).clone() {
            Regex::Prop(guard) => match mode {
                DeltaMode::Epsilon => self.pl_true(),
                DeltaMode::Letter(letter) => {
                    if self.pl_eval(guard, letter) {
                        self.quote_successor(body)
                    } else {
                        self.pl_true()
                    }
                }
                DeltaMode::Symbolic => {
                    let blocked = self.pl_negate(guard);
                    let successor = self.quote_successor(body);
                    self.mk_pl_or([blocked, successor])
                }
            },

            Regex::Test(test) => {
                let refuted = self.ldlf_nnf_negated(test);
                let here = self.delta_mode(refuted, mode);
                let onwards = self.delta_mode(body, mode);
                self.mk_pl_or([here, onwards])
            }

            Regex::Union(operands) => {
                let operands = operands
                    .into_iter()
                    .map(|operand| self.delta_box(operand, body, mode))
                    .collect::<Vec<_>>();
                self.mk_pl_and(operands)
            }

            Regex::Seq(operands) => {
                let rest = match operands.len() {
                    2 => operands[1],
                    _ => self.mk_regex_seq(operands[1..].to_vec()),
                };
                let nested = self.mk_ldlf_box(rest, body);
                self.delta_box(operands[0], nested, mode)
            }

            Regex::Star(argument) => {
                let star = self.mk_ldlf_box(regex, body);
                let marked = self.mk_ldlf_tmarked(star);
                let now = self.delta_mode(body, mode);
                let unfolded = self.delta_box(argument, marked, mode);
                self.mk_pl_and([now, unfolded])
            }
        }
    }

    /// The quoted atom of a successor formula, markers stripped.
    fn quote_successor(&mut self, formula: LdlfId) -> PlId {
        let stripped = self.ldlf_strip_marks(formula);
        self.mk_pl_quote(stripped)
    }

    /// `formula` with every δ-marker removed.
    pub fn ldlf_strip_marks(&mut self, formula: LdlfId) -> LdlfId {
        match self.ldlf_db.get(formula).clone() {
            Ldlf::True | Ldlf::False => formula,
            Ldlf::And(operands) => {
                let operands = operands
                    .into_iter()
                    .map(|operand| self.ldlf_strip_marks(operand))
                    .collect::<Vec<_>>();
                self.mk_ldlf_and(operands)
            }
            Ldlf::Or(operands) => {
                let operands = operands
                    .into_iter()
                    .map(|operand| self.ldlf_strip_marks(operand))
                    .collect::<Vec<_>>();
                self.mk_ldlf_or(operands)
            }
            Ldlf::Not(argument) => {
                let argument = self.ldlf_strip_marks(argument);
                self.mk_ldlf_not(argument)
            }
            Ldlf::Diamond(regex, body) => {
                let regex = self.regex_strip_marks(regex);
                let body = self.ldlf_strip_marks(body);
                self.mk_ldlf_diamond(regex, body)
            }
            Ldlf::Box(regex, body) => {
                let regex = self.regex_strip_marks(regex);
                let body = self.ldlf_strip_marks(body);
                self.mk_ldlf_box(regex, body)
            }
            Ldlf::FMarked(argument) | Ldlf::TMarked(argument) => self.ldlf_strip_marks(argument),
        }
    }

    fn regex_strip_marks(&mut self, regex: RegexId) -> RegexId {
        match self.regex_db.get(regex).clone() {
            Regex::Prop(_) => regex,
            Regex::Test(formula) => {
                let formula = self.ldlf_strip_marks(formula);
                self.mk_regex_test(formula)
            }
            Regex::Union(operands) => {
                let operands = operands
                    .into_iter()
                    .map(|operand| self.regex_strip_marks(operand))
                    .collect::<Vec<_>>();
                self.mk_regex_union(operands)
            }
            Regex::Seq(operands) => {
                let operands = operands
                    .into_iter()
                    .map(|operand| self.regex_strip_marks(operand))
                    .collect::<Vec<_>>();
                self.mk_regex_seq(operands)
            }
            Regex::Star(argument) => {
                let argument = self.regex_strip_marks(argument);
                self.mk_regex_star(argument)
            }
        }
    }

    /// Whether an NFA state accepts the empty suffix: every member does.
    pub fn nfa_is_final(&mut self, state: &NfaState) -> Result<bool, ErrorKind> {
        for member in &state.formulas {
            if !self.delta_epsilon(*member)? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Whether a DFA state accepts the empty suffix: some member NFA state does.
    pub fn dfa_is_final(&mut self, state: &DfaState) -> Result<bool, ErrorKind> {
        for member in state.states.clone() {
            if self.nfa_is_final(&member)? {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Every formula δ can quote, starting from `formula` and closing under succession.
    ///
    /// The closure fixes the quoted-variable block of a δ-diagram before exploration begins.
    pub fn quoted_closure(&mut self, formula: LdlfId) -> BTreeSet<LdlfId> {
        let mut closure = BTreeSet::default();
        let mut frontier = vec![formula];

        while let Some(next) = frontier.pop() {
            let expansion = self.delta_symbolic(next);
            for quoted in self.pl_quoted(expansion) {
                if closure.insert(quoted) {
                    frontier.push(quoted);
                }
            }
        }

        closure
    }
}
