//! Structural unification over [`Term`]s.
//!
//! Failure is a first-class result, not an error: a mismatch is ordinary
//! control flow, and the caller decides what an unsatisfiable constraint
//! system means. There is no occurs check; a variable may be bound to a
//! sequence containing itself, which [`Substitution::resolve`] later
//! reports as cyclic.

use crate::term::{Substitution, Term};

/// Unify two terms. Returns the substitution under which both sides are
/// equal, or `None` if no such substitution exists.
pub fn unify(lhs: &Term, rhs: &Term) -> Option<Substitution> {
    match (lhs, rhs) {
        // The identical variable on both sides -- nothing to bind.
        (Term::Var(l), Term::Var(r)) if l == r => Some(Substitution::empty()),

        // A variable unifies with anything; the left side binds first.
        (Term::Var(l), _) => Some(Substitution::singleton(*l, rhs.clone())),
        (_, Term::Var(r)) => Some(Substitution::singleton(*r, lhs.clone())),

        // Atoms are identity-compared constants.
        (Term::Atom(l), Term::Atom(r)) => {
            if l == r {
                Some(Substitution::empty())
            } else {
                None
            }
        }

        (Term::Seq(l), Term::Seq(r)) => unify_seqs(l, r),

        // Atom vs. sequence, in either order.
        _ => None,
    }
}

/// Unify two equal-length term sequences position by position.
///
/// The substitution from each position is applied to the remainders of
/// both sides before they are unified, so bindings flow left to right
/// through the sequence; the final result is the union of all positions'
/// substitutions.
pub fn unify_seqs(lhs: &[Term], rhs: &[Term]) -> Option<Substitution> {
    if lhs.len() != rhs.len() {
        return None;
    }
    let ((first_l, rest_l), (first_r, rest_r)) = match (lhs.split_first(), rhs.split_first()) {
        (Some(l), Some(r)) => (l, r),
        _ => return Some(Substitution::empty()),
    };

    let first = unify(first_l, first_r)?;
    let rest_l: Vec<Term> = rest_l.iter().map(|item| item.apply(&first)).collect();
    let rest_r: Vec<Term> = rest_r.iter().map(|item| item.apply(&first)).collect();
    let rest = unify_seqs(&rest_l, &rest_r)?;
    Some(first.union(rest))
}
