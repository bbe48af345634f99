use std::collections::BTreeSet;

use marten_dfa::config::Config;
use marten_dfa::context::Context;
use marten_dfa::procedures::models::EnumerationStrategy;
use marten_dfa::structures::pl::PlId;

/// All set-view traces over the given atom names, up to the given length.
fn all_traces(ctx: &mut Context, names: &[&str], up_to: usize) -> Vec<Vec<BTreeSet<PlId>>> {
    let atoms = names.iter().map(|name| ctx.mk_pl_atom(name)).collect::<Vec<_>>();

    let letters = (0..1_usize << atoms.len())
        .map(|mask| {
            atoms
                .iter()
                .enumerate()
                .filter_map(|(bit, atom)| (mask & (1 << bit) != 0).then_some(*atom))
                .collect::<BTreeSet<_>>()
        })
        .collect::<Vec<_>>();

    let mut traces: Vec<Vec<BTreeSet<PlId>>> = vec![Vec::default()];
    let mut frontier: Vec<Vec<BTreeSet<PlId>>> = vec![Vec::default()];
    for _ in 0..up_to {
        let mut extended = Vec::default();
        for trace in &frontier {
            for letter in &letters {
                let mut longer = trace.clone();
                longer.push(letter.clone());
                extended.push(longer);
            }
        }
        traces.extend(extended.iter().cloned());
        frontier = extended;
    }
    traces
}

mod hash_consing {
    use super::*;

    #[test]
    fn structural_identity() {
        let mut ctx = Context::from_config(Config::default());

        let first = ctx.parse_ldlf("<a ; b>(tt & <c>tt)").unwrap();
        let second = ctx.parse_ldlf("<a ; b>(<c>tt & tt)").unwrap();
        assert_eq!(first, second);

        let a = ctx.mk_pl_atom("a");
        let b = ctx.mk_pl_atom("b");
        let left = ctx.mk_pl_or([a, b]);
        let right = ctx.mk_pl_or([b, a]);
        assert_eq!(left, right);
    }

    #[test]
    fn constructive_simplification() {
        let mut ctx = Context::from_config(Config::default());

        let a = ctx.mk_pl_atom("a");
        let top = ctx.pl_true();
        let bottom = ctx.pl_false();

        assert_eq!(ctx.mk_pl_and([a, top]), a);
        assert_eq!(ctx.mk_pl_and([a, bottom]), bottom);
        assert_eq!(ctx.mk_pl_or([a, bottom]), a);
        assert_eq!(ctx.mk_pl_or([a, top]), top);

        let tt = ctx.ldlf_true();
        let not_tt = ctx.mk_ldlf_not(tt);
        assert_eq!(not_tt, ctx.ldlf_false());
    }
}

mod normalization {
    use super::*;

    const LDLF_FORMULAS: [&str; 8] = [
        "tt",
        "!(<a>tt)",
        "!([a]ff | <b>tt)",
        "!(tt & !(<a>tt))",
        "!<true*><a>tt",
        "!(<a ; b>tt)",
        "!(<a + b><c>tt)",
        "!< ( (<a>tt)? ; true )* > end",
    ];

    #[test]
    fn idempotence() {
        let mut ctx = Context::from_config(Config::default());
        for source in LDLF_FORMULAS {
            let formula = ctx.parse_ldlf(source).unwrap();
            let once = ctx.ldlf_nnf(formula);
            let twice = ctx.ldlf_nnf(once);
            assert_eq!(once, twice, "{source}");
        }
    }

    #[test]
    fn semantics_preserved() {
        let mut ctx = Context::from_config(Config::default());
        let traces = all_traces(&mut ctx, &["a", "b", "c"], 2);

        for source in LDLF_FORMULAS {
            let formula = ctx.parse_ldlf(source).unwrap();
            let normalized = ctx.ldlf_nnf(formula);
            for trace in &traces {
                assert_eq!(
                    ctx.ldlf_holds(formula, trace),
                    ctx.ldlf_holds(normalized, trace),
                    "{source} on {trace:?}"
                );
            }
        }
    }

    #[test]
    fn ltlf_idempotence() {
        let mut ctx = Context::from_config(Config::default());
        for source in ["!(a U b)", "!(X a | WX b)", "!F (a & G b)", "!(a R !b)"] {
            let formula = ctx.parse_ltlf(source).unwrap();
            let once = ctx.ltlf_nnf(formula);
            let twice = ctx.ltlf_nnf(once);
            assert_eq!(once, twice, "{source}");
        }
    }
}

mod reduction {
    use super::*;

    const LTLF_FORMULAS: [&str; 12] = [
        "True",
        "False",
        "a",
        "!a",
        "X a",
        "WX a",
        "F a",
        "G a",
        "a U b",
        "a R b",
        "F (a & X b)",
        "G (a -> X b)",
    ];

    #[test]
    fn agrees_with_trace_semantics() {
        let mut ctx = Context::from_config(Config::default());
        let traces = all_traces(&mut ctx, &["a", "b"], 3);

        for source in LTLF_FORMULAS {
            let formula = ctx.parse_ltlf(source).unwrap();
            let reduced = ctx.ltlf_to_ldlf(formula);

            // Normalizing first reduces through the dual rules; both routes must agree.
            let normalized = ctx.ltlf_nnf(formula);
            let reduced_normalized = ctx.ltlf_to_ldlf(normalized);

            for trace in &traces {
                assert_eq!(
                    ctx.ldlf_holds(reduced, trace),
                    ctx.ldlf_holds(reduced_normalized, trace),
                    "{source} on {trace:?}"
                );
                assert_eq!(
                    ctx.ltlf_holds(formula, trace),
                    ctx.ldlf_holds(reduced, trace),
                    "{source} on {trace:?}"
                );
            }
        }
    }
}

mod acceptance {
    use super::*;

    const LDLF_FORMULAS: [&str; 9] = [
        "tt",
        "ff",
        "<a>tt",
        "[a]ff",
        "<true*><a>tt",
        "<a ; b>tt",
        "<a + b>tt",
        "<(tt? ; a)*>end",
        "[(<a>tt)? ; true]<b>tt",
    ];

    /// The automaton and the reference evaluator agree on every short trace.
    #[test]
    fn coherence() {
        for source in LDLF_FORMULAS {
            let mut ctx = Context::from_config(Config::default());
            let formula = ctx.parse_ldlf(source).unwrap();
            let dfa = ctx.to_dfa(formula).unwrap();

            // Build each trace twice: as atom sets for the evaluator, as bitvectors for the automaton.
            let names = dfa.atoms().iter().map(|name| name.clone()).collect::<Vec<_>>();
            let name_refs = names.iter().map(|name| name.as_str()).collect::<Vec<_>>();
            let set_traces = all_traces(&mut ctx, &name_refs, 3);

            for set_trace in &set_traces {
                let bit_trace = set_trace
                    .iter()
                    .map(|letter| {
                        let on = letter
                            .iter()
                            .filter_map(|atom| {
                                use marten_dfa::structures::pl::{AtomLabel, Pl};
                                match ctx.pl_db.get(*atom) {
                                    Pl::Atom(AtomLabel::Name(symbol)) => {
                                        Some(ctx.symbol_db.name(*symbol).to_owned())
                                    }
                                    _ => None,
                                }
                            })
                            .collect::<Vec<_>>();
                        let on_refs = on.iter().map(|name| name.as_str()).collect::<Vec<_>>();
                        dfa.letter(&on_refs)
                    })
                    .collect::<Vec<_>>();

                assert_eq!(
                    ctx.ldlf_holds(formula, set_trace),
                    dfa.accepts(&bit_trace),
                    "{source} on {set_trace:?}"
                );
            }
        }
    }

    #[test]
    fn successor_is_total() {
        for source in LDLF_FORMULAS {
            let dfa = marten_dfa::procedures::translate::translate_ldlf(source, &Config::default()).unwrap();
            let width = dfa.atoms().len();
            for state in 0..dfa.state_count() {
                for mask in 0..1_usize << width {
                    let letter = (0..width).map(|bit| mask & (1 << bit) != 0).collect::<Vec<_>>();
                    let successor = dfa.successor(state, &letter);
                    assert!(successor < dfa.state_count(), "{source}: {state} -> {successor}");
                }
            }
        }
    }

    /// No two states of the returned automaton are behaviorally equal.
    #[test]
    fn minimality() {
        for source in LDLF_FORMULAS {
            let dfa = marten_dfa::procedures::translate::translate_ldlf(source, &Config::default()).unwrap();
            let width = dfa.atoms().len();
            let letters = (0..1_usize << width)
                .map(|mask| (0..width).map(|bit| mask & (1 << bit) != 0).collect::<Vec<_>>())
                .collect::<Vec<_>>();

            let n = dfa.state_count();
            let mut classes = (0..n).map(|state| usize::from(dfa.is_final(state))).collect::<Vec<_>>();

            loop {
                let signatures = (0..n)
                    .map(|state| {
                        let mut signature = vec![classes[state]];
                        for letter in &letters {
                            signature.push(classes[dfa.successor(state, letter)]);
                        }
                        signature
                    })
                    .collect::<Vec<_>>();

                let mut refined = vec![0_usize; n];
                let mut seen: Vec<&Vec<usize>> = Vec::default();
                for state in 0..n {
                    match seen.iter().position(|signature| **signature == signatures[state]) {
                        Some(class) => refined[state] = class,
                        None => {
                            refined[state] = seen.len();
                            seen.push(&signatures[state]);
                        }
                    }
                }

                let stable = seen.len() == classes.iter().collect::<BTreeSet<_>>().len();
                classes = refined;
                if stable {
                    break;
                }
            }

            let distinct = classes.iter().collect::<BTreeSet<_>>().len();
            assert_eq!(distinct, n, "{source}: states collapse further");
        }
    }
}

mod enumeration {
    use super::*;

    const PL_FORMULAS: [&str; 6] = [
        "true",
        "false",
        "a",
        "a & (b | !c)",
        "(a -> b) & (b -> c)",
        "(a <-> b) | c",
    ];

    /// Parse a guard through the LDLf surface syntax: `<guard>tt` carries a full propositional formula.
    fn parse_guard(ctx: &mut Context, source: &str) -> PlId {
        use marten_dfa::structures::ldlf::{Ldlf, Regex};
        let wrapped = ctx.parse_ldlf(&format!("<{source}>tt")).unwrap();
        let Ldlf::Diamond(regex, _) = ctx.ldlf_db.get(wrapped).clone() else {
            panic!("not a diamond");
        };
        let Regex::Prop(guard) = ctx.regex_db.get(regex).clone() else {
            panic!("not a guard");
        };
        guard
    }

    #[test]
    fn strategies_agree() {
        let mut ctx = Context::from_config(Config::default());
        for source in PL_FORMULAS {
            let formula = parse_guard(&mut ctx, source);

            let naive = ctx
                .all_models_with(formula, EnumerationStrategy::Naive)
                .unwrap()
                .into_iter()
                .collect::<BTreeSet<_>>();
            let sat = ctx
                .all_models_with(formula, EnumerationStrategy::Sat)
                .unwrap()
                .into_iter()
                .collect::<BTreeSet<_>>();

            assert_eq!(naive, sat, "{source}");
        }
    }

    #[test]
    fn model_counts() {
        let mut ctx = Context::from_config(Config::default());

        let top = parse_guard(&mut ctx, "true");
        assert_eq!(ctx.all_models(top).unwrap().len(), 1);

        let bottom = parse_guard(&mut ctx, "false");
        assert!(ctx.all_models(bottom).unwrap().is_empty());

        let xor_ish = parse_guard(&mut ctx, "(a | b) & !(a & b)");
        assert_eq!(ctx.all_models(xor_ish).unwrap().len(), 2);
    }

    #[test]
    fn cnf_preserves_semantics() {
        let mut ctx = Context::from_config(Config::default());
        for source in PL_FORMULAS {
            let formula = parse_guard(&mut ctx, source);
            let cnf = ctx.pl_cnf(formula);

            let atoms = ctx.pl_atoms(formula).into_iter().collect::<Vec<_>>();
            for mask in 0..1_usize << atoms.len() {
                let interpretation = atoms
                    .iter()
                    .enumerate()
                    .filter_map(|(bit, atom)| (mask & (1 << bit) != 0).then_some(*atom))
                    .collect::<BTreeSet<_>>();
                assert_eq!(
                    ctx.pl_eval(formula, &interpretation),
                    ctx.pl_eval(cnf, &interpretation),
                    "{source}"
                );
            }
        }
    }

    #[test]
    fn cnf_is_clausal() {
        use marten_dfa::structures::pl::Pl;

        let mut ctx = Context::from_config(Config::default());
        for source in PL_FORMULAS {
            let formula = parse_guard(&mut ctx, source);
            let cnf = ctx.pl_cnf(formula);

            // Conjunction of clauses; a clause is a disjunction of literals; a literal is an atom or its negation.
            let clauses = match ctx.pl_db.get(cnf).clone() {
                Pl::And(operands) => operands.into_iter().collect::<Vec<_>>(),
                _ => vec![cnf],
            };
            for clause in clauses {
                let literals = match ctx.pl_db.get(clause).clone() {
                    Pl::Or(operands) => operands.into_iter().collect::<Vec<_>>(),
                    _ => vec![clause],
                };
                for literal in literals {
                    let fine = match ctx.pl_db.get(literal) {
                        Pl::True | Pl::False | Pl::Atom(_) => true,
                        Pl::Not(argument) => matches!(ctx.pl_db.get(*argument), Pl::Atom(_)),
                        _ => false,
                    };
                    assert!(fine, "{source}: {literal:?} is not a literal");
                }
            }
        }
    }
}

mod expansion {
    use super::*;

    #[test]
    fn finality_judgments() {
        let mut ctx = Context::from_config(Config::default());

        let cases = [
            ("tt", true),
            ("ff", false),
            ("<a>tt", false),
            ("[a]ff", true),
            ("end", true),
            ("last", false),
            ("<true*><a>tt", false),
            ("[true*]end", true),
            ("<true*>end", true),
        ];

        for (source, expected) in cases {
            let formula = ctx.parse_ldlf(source).unwrap();
            let normalized = ctx.ldlf_nnf(formula);
            assert_eq!(ctx.delta_epsilon(normalized).unwrap(), expected, "{source}");
        }
    }

    #[test]
    fn concrete_letters_restrict_symbolic() {
        let mut ctx = Context::from_config(Config::default());
        let sources = ["<a>tt", "[a]ff", "<true*><a>tt", "<a ; b>tt", "<a + b><b>tt"];

        for source in sources {
            let formula = ctx.parse_ldlf(source).unwrap();
            let normalized = ctx.ldlf_nnf(formula);
            let symbolic = ctx.delta_symbolic(normalized);

            let a = ctx.mk_pl_atom("a");
            let b = ctx.mk_pl_atom("b");
            for letter in [
                BTreeSet::default(),
                BTreeSet::from([a]),
                BTreeSet::from([b]),
                BTreeSet::from([a, b]),
            ] {
                let concrete = ctx.delta(normalized, &letter);

                // The symbolic expansion, with the letter decided, must agree with the concrete
                // expansion on every successor valuation.
                let quoted = ctx.pl_quoted(symbolic);
                let quoted_atoms = quoted
                    .iter()
                    .map(|subformula| ctx.mk_pl_quote(*subformula))
                    .collect::<Vec<_>>();

                for mask in 0..1_usize << quoted_atoms.len() {
                    let mut interpretation = letter.clone();
                    for (bit, atom) in quoted_atoms.iter().enumerate() {
                        if mask & (1 << bit) != 0 {
                            interpretation.insert(*atom);
                        }
                    }
                    assert_eq!(
                        ctx.pl_eval(symbolic, &interpretation),
                        ctx.pl_eval(concrete, &interpretation),
                        "{source} under {letter:?}"
                    );
                }
            }
        }
    }
}
