//! The atom/variable registry: encoding between host type descriptions
//! and terms.
//!
//! The registry owns the bijection between atom handles and canonical
//! type text. Interning on first encode guarantees that structurally
//! identical type names map to the same atom, which is what makes atom
//! identity comparison in the solver mean "same type name". A registry is
//! created fresh per field inference and discarded after decoding; atom
//! identities never cross inference attempts.

use rustc_hash::FxHashMap;

use anvil_desc::TypeDesc;

use crate::error::InferError;
use crate::term::{AtomId, Term, VarId};

/// Per-inference arena for atoms and variables.
#[derive(Debug, Default)]
pub struct Registry {
    /// Canonical text of each atom, indexed by `AtomId`.
    texts: Vec<String>,
    /// Inverse of `texts`, for interning.
    atoms: FxHashMap<String, AtomId>,
    next_var: u32,
}

impl Registry {
    /// Create an empty registry.
    pub fn new() -> Registry {
        Registry::default()
    }

    /// Intern a canonical type text, returning the existing atom if the
    /// text was seen before.
    fn atom(&mut self, text: &str) -> AtomId {
        if let Some(&id) = self.atoms.get(text) {
            return id;
        }
        let id = AtomId(self.texts.len() as u32);
        self.texts.push(text.to_string());
        self.atoms.insert(text.to_string(), id);
        id
    }

    /// Allocate a fresh, identity-unique unification variable.
    pub fn fresh_var(&mut self) -> VarId {
        let var = VarId(self.next_var);
        self.next_var += 1;
        var
    }

    /// Encode a type description into a term.
    ///
    /// `overrides` maps a declared generic-parameter name to the variable
    /// standing for it; this is how an operation's own type parameters
    /// become unification variables while every other name stays an
    /// opaque constant. The map is built fresh per operation.
    pub fn encode(
        &mut self,
        desc: &TypeDesc,
        overrides: &FxHashMap<String, VarId>,
    ) -> Result<Term, InferError> {
        match desc {
            TypeDesc::Parameterized { name, args } => {
                let mut items = vec![Term::Atom(self.atom(name))];
                for arg in args {
                    items.push(self.encode(arg, overrides)?);
                }
                Ok(Term::Seq(items))
            }
            TypeDesc::TypeVar { name } => match overrides.get(name) {
                Some(&var) => Ok(Term::Var(var)),
                // A type parameter of an enclosing scope: opaque here.
                None => Ok(Term::Atom(self.atom(name))),
            },
            TypeDesc::Primitive { .. } | TypeDesc::Array { .. } => {
                Ok(Term::Atom(self.atom(&desc.canonical())))
            }
            TypeDesc::Wildcard | TypeDesc::Intersection { .. } => {
                Err(InferError::UnsupportedDescription {
                    description: desc.canonical(),
                })
            }
        }
    }

    /// Render a term back to type text -- the exact inverse of the
    /// generic-type encoding. A sequence renders its head's text and
    /// appends `<arg1, arg2, ...>` only when more than one element is
    /// present. A variable renders as `?N`; callers that emit generated
    /// source check groundness first, so `?N` only ever reaches
    /// diagnostics.
    pub fn render(&self, term: &Term) -> String {
        match term {
            Term::Atom(atom) => self.texts[atom.0 as usize].clone(),
            Term::Var(var) => format!("?{}", var.0),
            Term::Seq(items) => match items.split_first() {
                None => String::new(),
                Some((head, args)) => {
                    let mut out = self.render(head);
                    if !args.is_empty() {
                        let rendered: Vec<String> =
                            args.iter().map(|arg| self.render(arg)).collect();
                        out.push('<');
                        out.push_str(&rendered.join(", "));
                        out.push('>');
                    }
                    out
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_overrides() -> FxHashMap<String, VarId> {
        FxHashMap::default()
    }

    #[test]
    fn repeated_encoding_interns_to_the_same_atom() {
        let mut registry = Registry::new();
        let first = registry.encode(&TypeDesc::primitive("String"), &no_overrides()).unwrap();
        let second = registry.encode(&TypeDesc::primitive("String"), &no_overrides()).unwrap();
        assert_eq!(first, second, "same name must yield the same atom handle");
    }

    #[test]
    fn distinct_names_get_distinct_atoms() {
        let mut registry = Registry::new();
        let a = registry.encode(&TypeDesc::primitive("int"), &no_overrides()).unwrap();
        let b = registry.encode(&TypeDesc::primitive("long"), &no_overrides()).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn parameterized_encodes_to_head_plus_args() {
        let mut registry = Registry::new();
        let desc = TypeDesc::parameterized(
            "Map",
            vec![TypeDesc::primitive("String"), TypeDesc::primitive("int")],
        );
        let term = registry.encode(&desc, &no_overrides()).unwrap();
        match term {
            Term::Seq(ref items) => assert_eq!(items.len(), 3),
            ref other => panic!("expected a sequence, got {}", other),
        }
        assert_eq!(registry.render(&term), "Map<String, int>");
    }

    #[test]
    fn raw_parameterized_type_is_a_one_element_sequence() {
        let mut registry = Registry::new();
        let term = registry
            .encode(&TypeDesc::parameterized("List", vec![]), &no_overrides())
            .unwrap();
        assert!(matches!(term, Term::Seq(ref items) if items.len() == 1));
        assert_eq!(registry.render(&term), "List");
    }

    #[test]
    fn overridden_type_var_becomes_a_variable() {
        let mut registry = Registry::new();
        let var = registry.fresh_var();
        let mut overrides = FxHashMap::default();
        overrides.insert("T".to_string(), var);
        let term = registry.encode(&TypeDesc::type_var("T"), &overrides).unwrap();
        assert_eq!(term, Term::Var(var));
    }

    #[test]
    fn unoverridden_type_var_stays_an_atom() {
        let mut registry = Registry::new();
        let term = registry.encode(&TypeDesc::type_var("T"), &no_overrides()).unwrap();
        assert!(matches!(term, Term::Atom(_)));
        assert_eq!(registry.render(&term), "T");
    }

    #[test]
    fn array_encodes_as_an_opaque_atom() {
        let mut registry = Registry::new();
        let desc = TypeDesc::array(TypeDesc::primitive("int"));
        let term = registry.encode(&desc, &no_overrides()).unwrap();
        assert!(matches!(term, Term::Atom(_)));
        assert_eq!(registry.render(&term), "int[]");
    }

    #[test]
    fn wildcard_and_intersection_are_unsupported() {
        let mut registry = Registry::new();
        let err = registry.encode(&TypeDesc::Wildcard, &no_overrides()).unwrap_err();
        assert_eq!(
            err,
            InferError::UnsupportedDescription {
                description: "?".to_string()
            }
        );

        let inter = TypeDesc::Intersection {
            members: vec![TypeDesc::primitive("A"), TypeDesc::primitive("B")],
        };
        let err = registry.encode(&inter, &no_overrides()).unwrap_err();
        assert_eq!(
            err,
            InferError::UnsupportedDescription {
                description: "A & B".to_string()
            }
        );
    }

    #[test]
    fn encode_render_round_trip() {
        let mut registry = Registry::new();
        let descs = [
            TypeDesc::primitive("boolean"),
            TypeDesc::array(TypeDesc::primitive("byte")),
            TypeDesc::parameterized("List", vec![]),
            TypeDesc::parameterized(
                "Map",
                vec![
                    TypeDesc::type_var("K"),
                    TypeDesc::parameterized("List", vec![TypeDesc::type_var("V")]),
                ],
            ),
        ];
        for desc in &descs {
            let term = registry.encode(desc, &no_overrides()).unwrap();
            assert_eq!(registry.render(&term), desc.canonical());
        }
    }

    #[test]
    fn render_variable_for_diagnostics() {
        let mut registry = Registry::new();
        let var = registry.fresh_var();
        assert_eq!(registry.render(&Term::Var(var)), "?0");
    }
}
