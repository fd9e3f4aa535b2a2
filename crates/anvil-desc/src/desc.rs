//! Host type descriptions and operation signatures.
//!
//! A [`TypeDesc`] is the opaque "type description" the host reflection
//! facility hands us for a parameter or return type. Anvil never resolves
//! textual names to nominal types itself; it only needs the kind of each
//! description, the canonical base name, and the ordered type arguments.
//! A [`MethodSig`] bundles the descriptions for one operation together with
//! the operation's own declared generic type parameters.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A type description supplied by the host type-reflection facility.
///
/// The supported kinds are `Primitive`, `Array`, `Parameterized`, and
/// `TypeVar`. `Wildcard` and `Intersection` can appear in host signatures
/// but are rejected by the encoder; a field using them cannot have a
/// builder generated.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TypeDesc {
    /// A primitive or other non-generic named type (`int`, `String`).
    Primitive { name: String },
    /// An array of some component type. Arrays are opaque to inference:
    /// they encode as a single constant, never recursed into.
    Array { component: Box<TypeDesc> },
    /// A named type applied to zero or more type arguments
    /// (`List<String>`, or a raw `List` with no arguments).
    Parameterized { name: String, args: Vec<TypeDesc> },
    /// A reference to a declared generic type parameter, by name.
    TypeVar { name: String },
    /// A wildcard type argument. Unsupported.
    Wildcard,
    /// An intersection of several types. Unsupported.
    Intersection { members: Vec<TypeDesc> },
}

impl TypeDesc {
    /// Create a primitive (or plain named) type description.
    pub fn primitive(name: impl Into<String>) -> TypeDesc {
        TypeDesc::Primitive { name: name.into() }
    }

    /// Create an array type description.
    pub fn array(component: TypeDesc) -> TypeDesc {
        TypeDesc::Array {
            component: Box::new(component),
        }
    }

    /// Create a parameterized type description. Zero arguments denotes a
    /// raw (non-generic) named type.
    pub fn parameterized(name: impl Into<String>, args: Vec<TypeDesc>) -> TypeDesc {
        TypeDesc::Parameterized {
            name: name.into(),
            args,
        }
    }

    /// Create a type-variable reference.
    pub fn type_var(name: impl Into<String>) -> TypeDesc {
        TypeDesc::TypeVar { name: name.into() }
    }

    /// The canonical textual form of this description, exactly as it would
    /// appear in generated source. Generic argument lists are joined with
    /// `", "` and wrapped in `<...>` only when at least one argument is
    /// present.
    pub fn canonical(&self) -> String {
        match self {
            TypeDesc::Primitive { name } => name.clone(),
            TypeDesc::Array { component } => format!("{}[]", component.canonical()),
            TypeDesc::Parameterized { name, args } => {
                if args.is_empty() {
                    name.clone()
                } else {
                    let rendered: Vec<String> = args.iter().map(|a| a.canonical()).collect();
                    format!("{}<{}>", name, rendered.join(", "))
                }
            }
            TypeDesc::TypeVar { name } => name.clone(),
            TypeDesc::Wildcard => "?".to_string(),
            TypeDesc::Intersection { members } => {
                let rendered: Vec<String> = members.iter().map(|m| m.canonical()).collect();
                rendered.join(" & ")
            }
        }
    }
}

impl fmt::Display for TypeDesc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.canonical())
    }
}

/// A named parameter in an operation signature.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParamSig {
    pub name: String,
    pub ty: TypeDesc,
}

impl ParamSig {
    pub fn new(name: impl Into<String>, ty: TypeDesc) -> ParamSig {
        ParamSig {
            name: name.into(),
            ty,
        }
    }
}

/// The signature of one style operation (initializer, modifier, or
/// finisher): its name, its own declared generic type parameters, its
/// parameters, and its return type.
///
/// The declared type parameters matter to inference: they become fresh
/// unification variables, scoped to this one operation. Type parameters of
/// enclosing scopes are not listed here and stay opaque constants.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodSig {
    pub name: String,
    #[serde(default)]
    pub type_params: Vec<String>,
    #[serde(default)]
    pub params: Vec<ParamSig>,
    pub return_type: TypeDesc,
}

impl MethodSig {
    /// Create a signature with no declared type parameters.
    pub fn new(name: impl Into<String>, params: Vec<ParamSig>, return_type: TypeDesc) -> MethodSig {
        MethodSig {
            name: name.into(),
            type_params: Vec::new(),
            params,
            return_type,
        }
    }

    /// Create a signature with declared generic type parameters.
    pub fn generic(
        name: impl Into<String>,
        type_params: &[&str],
        params: Vec<ParamSig>,
        return_type: TypeDesc,
    ) -> MethodSig {
        MethodSig {
            name: name.into(),
            type_params: type_params.iter().map(|p| p.to_string()).collect(),
            params,
            return_type,
        }
    }
}

impl fmt::Display for MethodSig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        if !self.type_params.is_empty() {
            write!(f, "<{}>", self.type_params.join(", "))?;
        }
        write!(f, "(")?;
        for (i, p) in self.params.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}: {}", p.name, p.ty)?;
        }
        write!(f, ") -> {}", self.return_type)
    }
}
