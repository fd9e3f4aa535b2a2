//! Field type inference: the constraint system over one style's
//! operations.
//!
//! The accumulator field's type is dictated by four things at once: the
//! type the wrapped method expects for the parameter, the return type of
//! the style's `start`, the parameter type of the style's `finish`, and
//! the return type of `finish`. The finisher may convert the accumulator
//! arbitrarily (e.g. a builder to the built collection), so the field
//! type is the solution of an equation system, not a simple lookup.

use rustc_hash::FxHashMap;

use anvil_desc::{FieldStyle, MethodSig, TypeDesc};

use crate::error::InferError;
use crate::registry::Registry;
use crate::term::{Term, VarId};
use crate::unify::unify;
use crate::Inference;

/// Fresh unification variables for an operation's declared type
/// parameters, keyed by declared name.
///
/// Built anew for every operation: two operations sharing a printed
/// parameter name still get independent variables.
fn type_param_vars(registry: &mut Registry, method: &MethodSig) -> FxHashMap<String, VarId> {
    let mut vars = FxHashMap::default();
    for name in &method.type_params {
        vars.insert(name.clone(), registry.fresh_var());
    }
    vars
}

/// A successful field inference: the resolved accumulator type, plus the
/// registry so that modifier signatures can be inferred against the same
/// atom identities.
#[derive(Debug)]
pub struct TypeInference {
    registry: Registry,
    field_term: Term,
    field_type: String,
}

impl TypeInference {
    /// Infer the accumulator field type for `style`, given the type the
    /// wrapped method expects for the parameter (`consumer`).
    ///
    /// Builds the equation system
    ///
    /// ```text
    /// start.return_type   =  fieldVar
    /// fieldVar            =  finish.param_type
    /// finish.return_type  =  consumer
    /// ```
    ///
    /// and unifies both columns as sequences, each position being one
    /// independent equality constraint. An unsatisfiable system yields
    /// `Indeterminate`, never an error.
    pub fn for_field(
        style: &FieldStyle,
        consumer: &TypeDesc,
    ) -> Result<Inference<TypeInference>, InferError> {
        style.validate()?;

        let mut registry = Registry::new();
        let field_var = registry.fresh_var();

        // The generic type parameters of start and finish are variables
        // in unification; type parameters of enclosing scopes are not.
        let start_vars = type_param_vars(&mut registry, &style.start);
        let finish_vars = type_param_vars(&mut registry, &style.finish);
        let no_overrides = FxHashMap::default();

        let mut lhs = Vec::new();
        let mut rhs = Vec::new();

        // The return of start() must match the type of the builder field.
        lhs.push(registry.encode(&style.start.return_type, &start_vars)?);
        rhs.push(Term::Var(field_var));

        // The parameter of finish() must also match the builder field.
        lhs.push(Term::Var(field_var));
        rhs.push(registry.encode(&style.finish.params[0].ty, &finish_vars)?);

        // The return of finish() must match what the wrapped method expects.
        lhs.push(registry.encode(&style.finish.return_type, &finish_vars)?);
        rhs.push(registry.encode(consumer, &no_overrides)?);

        let subst = match unify(&Term::Seq(lhs), &Term::Seq(rhs)) {
            Some(subst) => subst,
            None => return Ok(Inference::Indeterminate),
        };

        let field_term = subst.resolve(&Term::Var(field_var))?;
        if !field_term.is_ground() {
            // The system is satisfiable but leaves the field type open;
            // emitting it would produce a dangling variable.
            return Ok(Inference::Indeterminate);
        }
        let field_type = registry.render(&field_term);
        Ok(Inference::Resolved(TypeInference {
            registry,
            field_term,
            field_type,
        }))
    }

    /// The accumulator field's type text, ready for direct insertion into
    /// generated source.
    pub fn builder_field_type(&self) -> &str {
        &self.field_type
    }

    /// The resolved field term, for diagnostics.
    pub fn field_term(&self) -> &Term {
        &self.field_term
    }

    /// The registry backing this inference. Its `render` is the
    /// diagnostic type-rendering surface.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Infer the parameter types of the wrapper method generated for one
    /// modifier: everything after the modifier's receiver (its first
    /// parameter, which takes the accumulator itself).
    ///
    /// Each modifier gets an independent unification of the resolved
    /// field type against the modifier's return type, with fresh
    /// variables for the modifier's own type parameters. A modifier whose
    /// constraints are unsatisfiable, or whose parameters the solution
    /// leaves open, is `Indeterminate` and can be skipped without
    /// affecting the rest of the style.
    pub fn modifier_parameter_types(
        &mut self,
        modifier: &MethodSig,
    ) -> Result<Inference<Vec<String>>, InferError> {
        let overrides = type_param_vars(&mut self.registry, modifier);
        let return_term = self.registry.encode(&modifier.return_type, &overrides)?;

        let subst = match unify(&self.field_term, &return_term) {
            Some(subst) => subst,
            None => return Ok(Inference::Indeterminate),
        };

        let mut parameter_types = Vec::new();
        for param in modifier.params.iter().skip(1) {
            let encoded = self.registry.encode(&param.ty, &overrides)?;
            let resolved = subst.resolve(&encoded)?;
            if !resolved.is_ground() {
                return Ok(Inference::Indeterminate);
            }
            parameter_types.push(self.registry.render(&resolved));
        }
        Ok(Inference::Resolved(parameter_types))
    }
}
