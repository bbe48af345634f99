use marten_dfa::config::{Config, EnumerationStrategy};
use marten_dfa::context::Context;
use marten_dfa::dfa::SymbolicDfa;
use marten_dfa::procedures::explore::{BddStrategy, CompositionalStrategy, NaiveStrategy};
use marten_dfa::procedures::translate::{translate_ldlf, translate_ltlf};

fn ldlf(source: &str) -> SymbolicDfa {
    translate_ldlf(source, &Config::default()).expect("translation failed")
}

fn ltlf(source: &str) -> SymbolicDfa {
    translate_ltlf(source, &Config::default()).expect("translation failed")
}

mod constants {
    use super::*;

    #[test]
    fn verum() {
        let dfa = ldlf("tt");
        assert_eq!(dfa.state_count(), 1);
        assert_eq!(dfa.finals().len(), 1);

        let blank = dfa.letter(&[]);
        assert!(dfa.accepts(&[]));
        assert!(dfa.accepts(&[blank.clone()]));
        assert!(dfa.accepts(&[blank.clone(), blank]));
        // An atom the formula never mentions cannot matter.
        assert!(dfa.accepts(&[dfa.letter(&["a"])]));
    }

    #[test]
    fn falsum() {
        let dfa = ldlf("ff");
        assert_eq!(dfa.state_count(), 1);
        assert!(dfa.finals().is_empty());

        let blank = dfa.letter(&[]);
        assert!(!dfa.accepts(&[]));
        assert!(!dfa.accepts(&[blank.clone()]));
        assert!(!dfa.accepts(&[blank.clone(), blank]));
    }
}

mod modalities {
    use super::*;

    #[test]
    fn diamond_atom() {
        let dfa = ldlf("<a>tt");
        assert_eq!(dfa.state_count(), 3);

        let a = dfa.letter(&["a"]);
        let blank = dfa.letter(&[]);

        assert!(dfa.accepts(&[a.clone()]));
        assert!(dfa.accepts(&[a.clone(), blank.clone()]));
        assert!(dfa.accepts(&[a.clone(), a.clone()]));

        assert!(!dfa.accepts(&[]));
        assert!(!dfa.accepts(&[blank.clone()]));
        assert!(!dfa.accepts(&[blank, a]));
    }

    #[test]
    fn always_end() {
        // Only the empty trace survives `[true*]end`.
        let dfa = ldlf("[true*]end");
        assert_eq!(dfa.state_count(), 2);

        let blank = dfa.letter(&[]);
        assert!(dfa.accepts(&[]));
        assert!(!dfa.accepts(&[blank.clone()]));
        assert!(!dfa.accepts(&[blank.clone(), blank]));
    }

    #[test]
    fn sequence() {
        let dfa = ldlf("<a ; b>tt");
        let a = dfa.letter(&["a"]);
        let b = dfa.letter(&["b"]);
        let both = dfa.letter(&["a", "b"]);

        assert!(dfa.accepts(&[a.clone(), b.clone()]));
        assert!(dfa.accepts(&[both.clone(), both.clone()]));
        assert!(dfa.accepts(&[a.clone(), b.clone(), a.clone()]));

        assert!(!dfa.accepts(&[]));
        assert!(!dfa.accepts(&[a.clone()]));
        assert!(!dfa.accepts(&[b.clone(), a.clone()]));
        assert!(!dfa.accepts(&[a.clone(), a]));
    }

    #[test]
    fn union() {
        let dfa = ldlf("<a + b>tt");
        let a = dfa.letter(&["a"]);
        let b = dfa.letter(&["b"]);
        let blank = dfa.letter(&[]);

        assert!(dfa.accepts(&[a]));
        assert!(dfa.accepts(&[b]));
        assert!(!dfa.accepts(&[]));
        assert!(!dfa.accepts(&[blank]));
    }

    #[test]
    fn box_union() {
        // `[a+b]ff`: no first letter may satisfy a or b.
        let dfa = ldlf("[a + b]ff");
        let a = dfa.letter(&["a"]);
        let b = dfa.letter(&["b"]);
        let blank = dfa.letter(&[]);

        assert!(dfa.accepts(&[]));
        assert!(dfa.accepts(&[blank.clone()]));
        assert!(dfa.accepts(&[blank.clone(), a.clone()]));

        assert!(!dfa.accepts(&[a.clone()]));
        assert!(!dfa.accepts(&[b, blank.clone()]));
        assert!(!dfa.accepts(&[a, blank]));
    }

    #[test]
    fn starred_guard() {
        // `<(tt? ; a)*>end`: every letter satisfies a.
        let dfa = ldlf("<(tt? ; a)*>end");
        let a = dfa.letter(&["a"]);
        let blank = dfa.letter(&[]);

        assert!(dfa.accepts(&[]));
        assert!(dfa.accepts(&[a.clone()]));
        assert!(dfa.accepts(&[a.clone(), a.clone()]));

        assert!(!dfa.accepts(&[blank.clone()]));
        assert!(!dfa.accepts(&[a.clone(), blank]));
    }

    #[test]
    fn test_expression() {
        // `<(<a>tt)? ; true><b>tt`: a now, one step, then b.
        let dfa = ldlf("<(<a>tt)? ; true><b>tt");
        let a = dfa.letter(&["a"]);
        let b = dfa.letter(&["b"]);
        let blank = dfa.letter(&[]);

        assert!(dfa.accepts(&[a.clone(), b.clone()]));
        assert!(dfa.accepts(&[a.clone(), b.clone(), blank.clone()]));

        assert!(!dfa.accepts(&[]));
        assert!(!dfa.accepts(&[a.clone()]));
        assert!(!dfa.accepts(&[b.clone(), b.clone()]));
        assert!(!dfa.accepts(&[a, blank]));
    }

    #[test]
    fn end_and_last() {
        let end = ldlf("end");
        assert!(end.accepts(&[]));
        assert!(!end.accepts(&[end.letter(&[])]));

        let last = ldlf("last");
        let blank = last.letter(&[]);
        assert!(!last.accepts(&[]));
        assert!(last.accepts(&[blank.clone()]));
        assert!(!last.accepts(&[blank.clone(), blank]));
    }
}

mod temporal {
    use super::*;

    #[test]
    fn eventually() {
        let dfa = ltlf("F a");
        let a = dfa.letter(&["a"]);
        let blank = dfa.letter(&[]);

        assert!(dfa.accepts(&[a.clone()]));
        assert!(dfa.accepts(&[blank.clone(), a.clone()]));
        assert!(dfa.accepts(&[blank.clone(), blank.clone(), a.clone(), blank.clone()]));

        assert!(!dfa.accepts(&[]));
        assert!(!dfa.accepts(&[blank.clone()]));
        assert!(!dfa.accepts(&[blank.clone(), blank]));

        // The free-function form reads the same automaton.
        assert!(marten_dfa::dfa::evaluate(&dfa, &[a]));
    }

    #[test]
    fn always() {
        let dfa = ltlf("G a");
        let a = dfa.letter(&["a"]);
        let blank = dfa.letter(&[]);

        assert!(dfa.accepts(&[a.clone()]));
        assert!(dfa.accepts(&[a.clone(), a.clone()]));

        assert!(!dfa.accepts(&[]));
        assert!(!dfa.accepts(&[blank.clone(), a.clone()]));
        assert!(!dfa.accepts(&[a, blank]));
    }

    #[test]
    fn next_and_weak_next() {
        let strong = ltlf("X a");
        let a = strong.letter(&["a"]);
        let blank = strong.letter(&[]);

        assert!(strong.accepts(&[blank.clone(), a.clone()]));
        assert!(!strong.accepts(&[blank.clone()]));
        assert!(!strong.accepts(&[]));
        assert!(!strong.accepts(&[a.clone(), blank.clone()]));

        let weak = ltlf("WX a");
        assert!(weak.accepts(&[blank.clone(), a.clone()]));
        // At the final letter there is no next, and the weak form is vacuous.
        assert!(weak.accepts(&[blank.clone()]));
        assert!(!weak.accepts(&[]));
        assert!(!weak.accepts(&[a, blank]));
    }

    #[test]
    fn until() {
        let dfa = ltlf("a U b");
        let a = dfa.letter(&["a"]);
        let b = dfa.letter(&["b"]);
        let blank = dfa.letter(&[]);

        assert!(dfa.accepts(&[b.clone()]));
        assert!(dfa.accepts(&[a.clone(), b.clone()]));
        assert!(dfa.accepts(&[a.clone(), a.clone(), b.clone(), blank.clone()]));

        assert!(!dfa.accepts(&[]));
        assert!(!dfa.accepts(&[a.clone()]));
        assert!(!dfa.accepts(&[a.clone(), blank.clone(), b.clone()]));
        assert!(!dfa.accepts(&[blank, b]));

        // b alongside a still witnesses the until.
        let both = dfa.letter(&["a", "b"]);
        assert!(dfa.accepts(&[both]));
    }

    #[test]
    fn response() {
        let dfa = ltlf("G (request -> F grant)");
        let request = dfa.letter(&["request"]);
        let grant = dfa.letter(&["grant"]);
        let blank = dfa.letter(&[]);

        assert!(dfa.accepts(&[blank.clone()]));
        assert!(dfa.accepts(&[request.clone(), grant.clone()]));
        assert!(dfa.accepts(&[request.clone(), blank.clone(), grant.clone()]));
        assert!(dfa.accepts(&[grant.clone()]));

        assert!(!dfa.accepts(&[]));
        assert!(!dfa.accepts(&[request.clone()]));
        assert!(!dfa.accepts(&[request.clone(), grant, request]));
    }
}

mod strategies {
    use super::*;

    const FORMULAS: [&str; 6] = [
        "tt",
        "<a>tt",
        "[true*]end",
        "<true*><a>tt",
        "<a ; b>tt",
        "[(tt? ; a)*]<b>tt",
    ];

    fn under_naive(source: &str, enumeration: EnumerationStrategy) -> SymbolicDfa {
        let mut config = Config::default();
        config.enumeration = enumeration;
        let mut ctx = Context::from_config(config);
        let formula = ctx.parse_ldlf(source).expect("parse failed");
        ctx.to_dfa_with(formula, NaiveStrategy).expect("translation failed")
    }

    fn under_bdd(source: &str, compositional: bool) -> SymbolicDfa {
        let mut ctx = Context::from_config(Config::default());
        let formula = ctx.parse_ldlf(source).expect("parse failed");
        match compositional {
            false => ctx.to_dfa_with(formula, BddStrategy::new()).expect("translation failed"),
            true => ctx
                .to_dfa_with(formula, CompositionalStrategy)
                .expect("translation failed"),
        }
    }

    /// All traces over the automaton's alphabet, up to the given length.
    fn all_traces(dfa: &SymbolicDfa, up_to: usize) -> Vec<Vec<Vec<bool>>> {
        let width = dfa.atoms().len();
        let letters = (0..1_usize << width)
            .map(|mask| (0..width).map(|bit| mask & (1 << bit) != 0).collect::<Vec<_>>())
            .collect::<Vec<_>>();

        let mut traces: Vec<Vec<Vec<bool>>> = vec![Vec::default()];
        let mut frontier: Vec<Vec<Vec<bool>>> = vec![Vec::default()];
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

    #[test]
    fn agreement() {
        for source in FORMULAS {
            let naive = under_naive(source, EnumerationStrategy::Naive);
            let sat = under_naive(source, EnumerationStrategy::Sat);
            let bdd = under_bdd(source, false);
            let compositional = under_bdd(source, true);

            // Minimal automata of the same language have the same state count.
            assert_eq!(naive.state_count(), sat.state_count(), "{source}");
            assert_eq!(naive.state_count(), bdd.state_count(), "{source}");
            assert_eq!(naive.state_count(), compositional.state_count(), "{source}");

            for trace in all_traces(&naive, 3) {
                let expected = naive.accepts(&trace);
                assert_eq!(expected, sat.accepts(&trace), "{source} on {trace:?}");
                assert_eq!(expected, bdd.accepts(&trace), "{source} on {trace:?}");
                assert_eq!(expected, compositional.accepts(&trace), "{source} on {trace:?}");
            }
        }
    }
}

mod failure {
    use super::*;
    use marten_dfa::types::err::ErrorKind;

    #[test]
    fn parse_errors_surface() {
        let outcome = translate_ldlf("<a tt", &Config::default());
        assert!(matches!(outcome, Err(ErrorKind::Parse(_))));

        let outcome = translate_ltlf("G (a", &Config::default());
        assert!(matches!(outcome, Err(ErrorKind::Parse(_))));
    }

    #[test]
    fn state_budget_is_enforced() {
        let mut config = Config::default();
        config.max_state_bits = 1;
        // Needs more than two exploration states.
        let outcome = translate_ldlf("<a ; b ; a>tt", &config);
        assert!(matches!(outcome, Err(ErrorKind::Capacity(_))));
    }
}
