//! Integration tests for the unification solver.
//!
//! These exercise the solver's structural cases over hand-built terms:
//! atom identity, variable binding and transitivity through sequences,
//! generic-type-shaped nesting, and the failure cases (length mismatch,
//! conflicting atoms reached through chained bindings).

use anvil_infer::term::{AtomId, Substitution, Term, VarId};
use anvil_infer::unify::unify;

// ── Helpers ────────────────────────────────────────────────────────────

fn atom(n: u32) -> Term {
    Term::Atom(AtomId(n))
}

fn var(n: u32) -> Term {
    Term::Var(VarId(n))
}

fn seq(items: Vec<Term>) -> Term {
    Term::Seq(items)
}

/// Unify and resolve a variable, asserting resolution succeeds.
fn resolve(subst: &Substitution, term: &Term) -> Term {
    subst.resolve(term).expect("resolution should terminate")
}

// ── Solver Tests ───────────────────────────────────────────────────────

/// Two distinct atoms never unify, regardless of what text they might
/// represent -- identity is the handle, not the spelling.
#[test]
fn test_two_distinct_atoms_fail() {
    assert!(unify(&atom(0), &atom(1)).is_none());
    assert!(unify(&atom(0), &atom(0)).is_some());
}

/// Y = [a, X] and X = b: a variable bound to a sequence resolves
/// transitively once the sequence's own variable is bound.
#[test]
fn test_variable_resolves_transitively_to_atom() {
    let a = atom(0);
    let b = atom(1);
    let x = var(0);
    let y = var(1);

    let subst = unify(
        &seq(vec![seq(vec![a.clone(), x.clone()]), b.clone()]),
        &seq(vec![y.clone(), x.clone()]),
    )
    .expect("unification should succeed");

    assert_eq!(resolve(&subst, &y), seq(vec![a, b.clone()]));
    assert_eq!(resolve(&subst, &x), b);
}

/// [a, X] ~ [Y, b]: independent bindings in both directions.
#[test]
fn test_simple_assignment_across_sequence() {
    let a = atom(0);
    let b = atom(1);
    let x = var(0);
    let y = var(1);

    let subst = unify(
        &seq(vec![a.clone(), x.clone()]),
        &seq(vec![y.clone(), b.clone()]),
    )
    .expect("unification should succeed");

    assert_eq!(subst.len(), 2);
    assert_eq!(subst.get(VarId(0)), Some(&b));
    assert_eq!(subst.get(VarId(1)), Some(&a));
}

/// a<X> == a<b<Y>> with Y = c: the generic-type-shaped case.
/// Result: Y = c, X = b<c>.
#[test]
fn test_generic_type_like_case() {
    let a = atom(0);
    let b = atom(1);
    let c = atom(2);
    let x = var(0);
    let y = var(1);

    let subst = unify(
        &seq(vec![seq(vec![a.clone(), x.clone()]), y.clone()]),
        &seq(vec![
            seq(vec![a.clone(), seq(vec![b.clone(), y.clone()])]),
            c.clone(),
        ]),
    )
    .expect("unification should succeed");

    assert_eq!(resolve(&subst, &y), c);
    assert_eq!(resolve(&subst, &x), seq(vec![b, c]));
}

/// [a] ~ [b] fails on the atoms; sequences of different lengths fail
/// before looking at any content.
#[test]
fn test_trivial_failure() {
    assert!(unify(&seq(vec![atom(0)]), &seq(vec![atom(1)])).is_none());
    assert!(unify(
        &seq(vec![var(0), var(1)]),
        &seq(vec![var(0), var(1), var(2)])
    )
    .is_none());
}

/// [a, X, X, Z] ~ [Y, b, Z, Y]: X must equal both b and Z, and Y both a
/// and Z, which is unsatisfiable once the bindings are chased.
#[test]
fn test_chained_conflict_fails() {
    let subst = unify(
        &seq(vec![atom(0), var(0), var(0), var(2)]),
        &seq(vec![var(1), atom(1), var(2), var(1)]),
    );
    assert!(subst.is_none());
}

/// A sequence can bundle independent equations: each position unifies on
/// its own, with bindings flowing left to right.
#[test]
fn test_sequence_as_equation_list() {
    let x = var(0);
    let y = var(1);
    let f = var(2);

    // f = [#0, ?0], x = #1, y = f  (as three positional equations)
    let subst = unify(
        &seq(vec![f.clone(), x.clone(), y.clone()]),
        &seq(vec![seq(vec![atom(0), x.clone()]), atom(1), f.clone()]),
    )
    .expect("unification should succeed");

    assert_eq!(resolve(&subst, &y), seq(vec![atom(0), atom(1)]));
}
