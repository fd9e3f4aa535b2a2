//! Field styles: the start/modify/finish protocol of a builder field.
//!
//! A style describes how one accumulator-based field is built up: `start`
//! produces the initial accumulator, each modifier folds another value in,
//! and `finish` converts the accumulator into the type the wrapped method
//! expects. The inference engine works out the accumulator's concrete type
//! from these signatures; this module only defines and validates the shape.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::desc::{MethodSig, ParamSig, TypeDesc};

/// A field style: an initializer (`start`), a finisher (`finish`), and any
/// number of modifier operations.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldStyle {
    /// The style's name, used in diagnostics and in CLI requests.
    pub name: String,
    pub start: MethodSig,
    pub finish: MethodSig,
    #[serde(default)]
    pub modifiers: Vec<MethodSig>,
}

impl FieldStyle {
    /// Assemble a style from a flat method list, the way the generator
    /// sees a style definition: the method named `start` is the
    /// initializer, the method named `finish` is the finisher, and every
    /// other method is a modifier.
    pub fn from_methods(
        name: impl Into<String>,
        methods: Vec<MethodSig>,
    ) -> Result<FieldStyle, StyleError> {
        let name = name.into();
        let mut start = None;
        let mut finish = None;
        let mut modifiers = Vec::new();

        for method in methods {
            match method.name.as_str() {
                "start" => start = Some(method),
                "finish" => finish = Some(method),
                _ => modifiers.push(method),
            }
        }

        let style = FieldStyle {
            start: start.ok_or_else(|| StyleError::MissingInitializer { style: name.clone() })?,
            finish: finish.ok_or_else(|| StyleError::MissingFinisher { style: name.clone() })?,
            name,
            modifiers,
        };
        style.validate()?;
        Ok(style)
    }

    /// Check the structural constraints inference relies on. Currently
    /// only one: the finisher takes exactly one parameter (the
    /// accumulator). Called by the engine before any unification.
    pub fn validate(&self) -> Result<(), StyleError> {
        if self.finish.params.len() != 1 {
            return Err(StyleError::FinisherArity {
                style: self.name.clone(),
                found: self.finish.params.len(),
            });
        }
        Ok(())
    }
}

/// A structurally malformed style definition, detected before any
/// unification is attempted.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub enum StyleError {
    /// The style has no `start` method.
    MissingInitializer { style: String },
    /// The style has no `finish` method.
    MissingFinisher { style: String },
    /// The `finish` method does not take exactly one parameter.
    FinisherArity { style: String, found: usize },
}

impl fmt::Display for StyleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StyleError::MissingInitializer { style } => {
                write!(f, "style `{}` has no `start` method", style)
            }
            StyleError::MissingFinisher { style } => {
                write!(f, "style `{}` has no `finish` method", style)
            }
            StyleError::FinisherArity { style, found } => {
                write!(
                    f,
                    "the `finish` method of style `{}` must take exactly one parameter, found {}",
                    style, found
                )
            }
        }
    }
}

impl std::error::Error for StyleError {}

// ── Built-in styles ────────────────────────────────────────────────────

/// Ready-made styles for the common accumulator shapes.
pub mod builtin {
    use super::*;

    /// Accumulate string pieces in a `StringBuilder`, finish to `String`.
    pub fn string_appending() -> FieldStyle {
        let sb = || TypeDesc::primitive("StringBuilder");
        FieldStyle {
            name: "string_appending".to_string(),
            start: MethodSig::new("start", vec![], sb()),
            finish: MethodSig::new(
                "finish",
                vec![ParamSig::new("from", sb())],
                TypeDesc::primitive("String"),
            ),
            modifiers: vec![MethodSig::new(
                "append_to",
                vec![
                    ParamSig::new("start", sb()),
                    ParamSig::new("value", TypeDesc::primitive("String")),
                ],
                sb(),
            )],
        }
    }

    /// Accumulate elements in a `ListBuilder<E>`, finish to `List<E>`.
    pub fn list_adding() -> FieldStyle {
        let builder = || TypeDesc::parameterized("ListBuilder", vec![TypeDesc::type_var("E")]);
        let list = TypeDesc::parameterized("List", vec![TypeDesc::type_var("E")]);
        let iterable = TypeDesc::parameterized("Iterable", vec![TypeDesc::type_var("E")]);
        FieldStyle {
            name: "list_adding".to_string(),
            start: MethodSig::generic("start", &["E"], vec![], builder()),
            finish: MethodSig::generic(
                "finish",
                &["E"],
                vec![ParamSig::new("from", builder())],
                list,
            ),
            modifiers: vec![
                MethodSig::generic(
                    "add_to",
                    &["E"],
                    vec![
                        ParamSig::new("start", builder()),
                        ParamSig::new("item", TypeDesc::type_var("E")),
                    ],
                    builder(),
                ),
                MethodSig::generic(
                    "add_all_to",
                    &["E"],
                    vec![
                        ParamSig::new("start", builder()),
                        ParamSig::new("items", iterable),
                    ],
                    builder(),
                ),
            ],
        }
    }

    /// Accumulate elements directly in an `ArrayList<T>`; the accumulator
    /// and the finished type coincide.
    pub fn array_list_adding() -> FieldStyle {
        let list = || TypeDesc::parameterized("ArrayList", vec![TypeDesc::type_var("T")]);
        let iterable = TypeDesc::parameterized("Iterable", vec![TypeDesc::type_var("T")]);
        FieldStyle {
            name: "array_list_adding".to_string(),
            start: MethodSig::generic("start", &["T"], vec![], list()),
            finish: MethodSig::generic(
                "finish",
                &["T"],
                vec![ParamSig::new("list", list())],
                list(),
            ),
            modifiers: vec![
                MethodSig::generic(
                    "add_to",
                    &["T"],
                    vec![
                        ParamSig::new("to", list()),
                        ParamSig::new("item", TypeDesc::type_var("T")),
                    ],
                    list(),
                ),
                MethodSig::generic(
                    "add_all_to",
                    &["T"],
                    vec![
                        ParamSig::new("to", list()),
                        ParamSig::new("items", iterable),
                    ],
                    list(),
                ),
            ],
        }
    }

    /// Hold at most one value in an `Option<E>`; setting replaces it.
    pub fn optional_setting() -> FieldStyle {
        let option = || TypeDesc::parameterized("Option", vec![TypeDesc::type_var("E")]);
        FieldStyle {
            name: "optional_setting".to_string(),
            start: MethodSig::generic("start", &["E"], vec![], option()),
            finish: MethodSig::generic(
                "finish",
                &["E"],
                vec![ParamSig::new("from", option())],
                option(),
            ),
            modifiers: vec![MethodSig::generic(
                "set",
                &["E"],
                vec![
                    ParamSig::new("start", option()),
                    ParamSig::new("value", TypeDesc::type_var("E")),
                ],
                option(),
            )],
        }
    }

    /// All built-in styles, for lookup by name.
    pub fn all() -> Vec<FieldStyle> {
        vec![
            string_appending(),
            list_adding(),
            array_list_adding(),
            optional_setting(),
        ]
    }

    /// Look up a built-in style by name.
    pub fn by_name(name: &str) -> Option<FieldStyle> {
        all().into_iter().find(|s| s.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit() -> TypeDesc {
        TypeDesc::primitive("void")
    }

    #[test]
    fn from_methods_partitions_by_name() {
        let style = FieldStyle::from_methods(
            "counting",
            vec![
                MethodSig::new("start", vec![], TypeDesc::primitive("int")),
                MethodSig::new(
                    "increment",
                    vec![ParamSig::new("count", TypeDesc::primitive("int"))],
                    TypeDesc::primitive("int"),
                ),
                MethodSig::new(
                    "finish",
                    vec![ParamSig::new("count", TypeDesc::primitive("int"))],
                    TypeDesc::primitive("int"),
                ),
            ],
        )
        .unwrap();
        assert_eq!(style.start.name, "start");
        assert_eq!(style.finish.name, "finish");
        assert_eq!(style.modifiers.len(), 1);
        assert_eq!(style.modifiers[0].name, "increment");
    }

    #[test]
    fn from_methods_missing_start() {
        let err = FieldStyle::from_methods(
            "broken",
            vec![MethodSig::new(
                "finish",
                vec![ParamSig::new("x", unit())],
                unit(),
            )],
        )
        .unwrap_err();
        assert_eq!(
            err,
            StyleError::MissingInitializer {
                style: "broken".to_string()
            }
        );
        assert_eq!(err.to_string(), "style `broken` has no `start` method");
    }

    #[test]
    fn from_methods_missing_finish() {
        let err = FieldStyle::from_methods(
            "broken",
            vec![MethodSig::new("start", vec![], unit())],
        )
        .unwrap_err();
        assert_eq!(
            err,
            StyleError::MissingFinisher {
                style: "broken".to_string()
            }
        );
    }

    #[test]
    fn validate_rejects_wrong_finisher_arity() {
        let err = FieldStyle::from_methods(
            "broken",
            vec![
                MethodSig::new("start", vec![], unit()),
                MethodSig::new(
                    "finish",
                    vec![ParamSig::new("a", unit()), ParamSig::new("b", unit())],
                    unit(),
                ),
            ],
        )
        .unwrap_err();
        assert_eq!(
            err,
            StyleError::FinisherArity {
                style: "broken".to_string(),
                found: 2
            }
        );
        assert_eq!(
            err.to_string(),
            "the `finish` method of style `broken` must take exactly one parameter, found 2"
        );
    }

    #[test]
    fn builtins_are_well_formed() {
        for style in builtin::all() {
            assert!(style.validate().is_ok(), "built-in style `{}` is malformed", style.name);
        }
    }

    #[test]
    fn builtin_lookup_by_name() {
        assert!(builtin::by_name("list_adding").is_some());
        assert!(builtin::by_name("no_such_style").is_none());
    }

    #[test]
    fn style_serde_round_trip() {
        let style = builtin::optional_setting();
        let json = serde_json::to_string(&style).unwrap();
        let back: FieldStyle = serde_json::from_str(&json).unwrap();
        assert_eq!(back, style);
    }
}
