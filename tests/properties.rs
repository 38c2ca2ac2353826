use dpll_backjump::{Formula, Lit, Solver, TraceOptions};
use proptest::prelude::*;

fn lits(xs: &[i32]) -> Vec<Lit> {
    xs.iter().map(|&i| Lit::new(i)).collect()
}

fn brute_force_sat(num_vars: u32, clauses: &[Vec<i32>]) -> bool {
    if num_vars == 0 {
        return clauses.iter().all(|c| !c.is_empty());
    }
    for assignment in 0u32..(1u32 << num_vars) {
        let holds = clauses.iter().all(|clause| {
            clause.iter().any(|&lit| {
                let v = lit.unsigned_abs() - 1;
                let value = (assignment >> v) & 1 == 1;
                (lit > 0) == value
            })
        });
        if holds {
            return true;
        }
    }
    false
}

fn random_clauses(num_vars: u32, num_clauses: usize) -> impl Strategy<Value = Vec<Vec<i32>>> {
    let var_strategy = 1..=(num_vars as i32);
    prop::collection::vec(
        prop::collection::vec(
            var_strategy.prop_flat_map(|v| prop_oneof![Just(v), Just(-v)]),
            1..=3,
        ),
        0..=num_clauses,
    )
}

proptest! {
    #[test]
    fn agrees_with_brute_force_on_random_3sat(clauses in random_clauses(8, 20)) {
        let num_vars = 8;
        let expected = brute_force_sat(num_vars, &clauses);

        let formula = Formula::new(num_vars, clauses.iter().map(|c| lits(c)).collect());
        let mut solver = Solver::new(formula, TraceOptions::none());
        let actual = solver.check_sat();
        prop_assert_eq!(actual, expected);

        if actual {
            let model = solver.get_model();
            prop_assert!(model.satisfies(solver.formula()));
        }
    }

    #[test]
    fn solving_is_deterministic(clauses in random_clauses(7, 15)) {
        let formula = Formula::new(7, clauses.iter().map(|c| lits(c)).collect());
        let mut a = Solver::new(formula.clone(), TraceOptions::none());
        let mut b = Solver::new(formula, TraceOptions::none());
        prop_assert_eq!(a.check_sat(), b.check_sat());
    }
}

#[test]
fn pigeonhole_six_is_unsat() {
    // 6 pigeons, 5 holes: var(p, h) = 5*p + h + 1.
    fn var(p: u32, h: u32) -> i32 {
        (5 * p + h + 1) as i32
    }
    let mut clauses: Vec<Vec<i32>> = Vec::new();
    for p in 0..6 {
        clauses.push((0..5).map(|h| var(p, h)).collect());
    }
    for h in 0..5 {
        for p1 in 0..6 {
            for p2 in (p1 + 1)..6 {
                clauses.push(vec![-var(p1, h), -var(p2, h)]);
            }
        }
    }
    let formula = Formula::new(30, clauses.into_iter().map(|c| lits(&c)).collect());
    let mut solver = Solver::new(formula, TraceOptions::all_traces());
    assert!(!solver.check_sat());
}

#[test]
fn dimacs_round_trip_preserves_satisfiability() {
    let text = "p cnf 3 3\n1 2 3 0\n-1 2 0\n-2 3 0\n";
    let mut solver = Solver::from_dimacs(text, TraceOptions::none()).unwrap();
    let sat = solver.check_sat();

    let mut reparsed = Solver::from_dimacs(text, TraceOptions::none()).unwrap();
    assert_eq!(sat, reparsed.check_sat());
}
