//! Term algebra for symbolic unification.
//!
//! Defines the three-variant [`Term`] type the solver works over, and the
//! immutable [`Substitution`] a successful unification produces. Atoms and
//! variables carry identity as small integer handles allocated by the
//! per-inference [`Registry`](crate::registry::Registry); two handles are
//! equal only if they were allocated as the same atom or variable.

use std::fmt;

use rustc_hash::FxHashMap;

use crate::error::InferError;

/// Handle of an interned atom, an index into the registry's text arena.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct AtomId(pub u32);

/// Handle of a unification variable.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct VarId(pub u32);

/// A node in the type-expression algebra.
///
/// - `Atom`: an opaque constant standing for one concrete type name.
/// - `Var`: a placeholder standing for an as-yet-unknown type.
/// - `Seq`: an ordered composite. By convention the first element is the
///   head (a base type name) and the rest are its generic type arguments;
///   a one-element sequence denotes a non-generic type. The solver also
///   accepts a sequence as a bundle of independent equality constraints.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Term {
    Atom(AtomId),
    Var(VarId),
    Seq(Vec<Term>),
}

impl Term {
    /// Apply a substitution in a single pass: every variable present as a
    /// key is replaced by its mapped value, recursively over sequence
    /// contents. Values are not re-substituted; see
    /// [`Substitution::resolve`] for the fixpoint.
    pub fn apply(&self, subst: &Substitution) -> Term {
        match self {
            Term::Atom(_) => self.clone(),
            Term::Var(var) => match subst.get(*var) {
                Some(value) => value.clone(),
                None => self.clone(),
            },
            Term::Seq(items) => Term::Seq(items.iter().map(|item| item.apply(subst)).collect()),
        }
    }

    /// Whether the term contains no variables.
    pub fn is_ground(&self) -> bool {
        match self {
            Term::Atom(_) => true,
            Term::Var(_) => false,
            Term::Seq(items) => items.iter().all(|item| item.is_ground()),
        }
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Atom(atom) => write!(f, "#{}", atom.0),
            Term::Var(var) => write!(f, "?{}", var.0),
            Term::Seq(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
        }
    }
}

/// An immutable mapping from variables to terms, the output of a
/// successful unification.
///
/// Keys are always variables that appeared as one side of an equation;
/// values may themselves contain unresolved variables. Substitutions are
/// not transitively resolved on construction -- use [`resolve`] to read a
/// fully-substituted term back.
///
/// [`resolve`]: Substitution::resolve
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Substitution {
    map: FxHashMap<VarId, Term>,
}

impl Substitution {
    /// The empty substitution.
    pub fn empty() -> Substitution {
        Substitution::default()
    }

    /// A one-entry substitution `{var -> term}`.
    pub fn singleton(var: VarId, term: Term) -> Substitution {
        let mut map = FxHashMap::default();
        map.insert(var, term);
        Substitution { map }
    }

    /// Look up the binding for a variable.
    pub fn get(&self, var: VarId) -> Option<&Term> {
        self.map.get(&var)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Union two substitutions, entries of `later` winning on a key
    /// collision. Collisions cannot actually occur during unification:
    /// every variable is introduced once and bound at most once per
    /// constraint pass.
    pub fn union(mut self, later: Substitution) -> Substitution {
        self.map.extend(later.map);
        self
    }

    /// Resolve a term to its most-concrete form: apply the substitution
    /// repeatedly until a full pass produces no change. A single pass is
    /// not enough because a binding's value may itself contain a variable
    /// bound by another entry.
    ///
    /// An acyclic substitution with `n` entries reaches its fixpoint
    /// within `n + 1` passes (each pass shortens the longest unresolved
    /// chain). A term still changing after that means some variable was
    /// unified into a term containing itself -- there is no occurs check
    /// -- and resolution reports [`InferError::CyclicSubstitution`]
    /// rather than looping.
    pub fn resolve(&self, term: &Term) -> Result<Term, InferError> {
        let limit = self.map.len() + 1;
        let mut current = term.clone();
        for _ in 0..limit {
            let next = current.apply(self);
            if next == current {
                return Ok(current);
            }
            current = next;
        }
        Err(InferError::CyclicSubstitution {
            term: term.to_string(),
        })
    }
}
