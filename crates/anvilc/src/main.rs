//! The Anvil command-line inspector.
//!
//! Style authors use this to see what the generator would infer for a
//! field without running a full generation: `anvilc infer` takes a JSON
//! request naming a style (built-in, or defined inline) and a consumer
//! parameter type, and prints the inferred accumulator field type plus
//! the parameter list of each generated modifier method.

use std::fmt;
use std::fs;
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

use anvil_desc::style::builtin;
use anvil_desc::{FieldStyle, TypeDesc};
use anvil_infer::{infer_field, Inference};

#[derive(Parser)]
#[command(name = "anvilc", about = "Inspect Anvil builder-field type inference", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Infer a field's accumulator type and modifier signatures from a
    /// JSON request file.
    Infer {
        /// Path to the JSON inference request.
        input: PathBuf,
        /// Emit the report as JSON instead of text.
        #[arg(long)]
        json: bool,
    },
    /// List the built-in field styles.
    Styles,
}

/// A JSON inference request: a style -- built-in by name, or defined
/// inline -- plus the consumer parameter type.
#[derive(Deserialize)]
struct InferRequest {
    /// Name of a built-in style. Mutually exclusive with `style`.
    builtin: Option<String>,
    /// An inline style definition. Mutually exclusive with `builtin`.
    style: Option<FieldStyle>,
    /// The type the wrapped method expects for this parameter.
    consumer: TypeDesc,
}

#[derive(Serialize, Debug)]
struct InferReport {
    style: String,
    consumer: String,
    /// The inferred accumulator type; `null` when indeterminate.
    field_type: Option<String>,
    modifiers: Vec<ModifierReport>,
}

#[derive(Serialize, Debug)]
struct ModifierReport {
    name: String,
    /// Generated parameter types; `null` when indeterminate (the
    /// generator skips such a modifier).
    parameter_types: Option<Vec<String>>,
}

fn resolve_style(request: &InferRequest) -> Result<FieldStyle, String> {
    match (&request.builtin, &request.style) {
        (Some(name), None) => {
            builtin::by_name(name).ok_or_else(|| format!("no built-in style named `{}`", name))
        }
        (None, Some(style)) => Ok(style.clone()),
        (Some(_), Some(_)) => Err("request has both `builtin` and `style`; pick one".to_string()),
        (None, None) => Err("request needs either `builtin` or `style`".to_string()),
    }
}

fn run_infer(request: &InferRequest) -> Result<InferReport, String> {
    let style = resolve_style(request)?;
    let mut report = InferReport {
        style: style.name.clone(),
        consumer: request.consumer.canonical(),
        field_type: None,
        modifiers: Vec::new(),
    };

    let outcome = infer_field(&style, &request.consumer).map_err(|err| err.to_string())?;
    let mut inference = match outcome {
        Inference::Resolved(inference) => inference,
        Inference::Indeterminate => return Ok(report),
    };
    report.field_type = Some(inference.builder_field_type().to_string());

    for modifier in &style.modifiers {
        let parameter_types = inference
            .modifier_parameter_types(modifier)
            .map_err(|err| err.to_string())?
            .resolved();
        report.modifiers.push(ModifierReport {
            name: modifier.name.clone(),
            parameter_types,
        });
    }
    Ok(report)
}

fn print_report(report: &InferReport) {
    println!("style: {}", report.style);
    println!("consumer: {}", report.consumer);
    match &report.field_type {
        Some(field_type) => println!("field type: {}", field_type),
        None => println!("field type: indeterminate"),
    }
    for modifier in &report.modifiers {
        match &modifier.parameter_types {
            Some(types) => println!("  {}({})", modifier.name, types.join(", ")),
            None => println!("  {}: indeterminate, skipped", modifier.name),
        }
    }
}

fn print_styles() {
    for style in builtin::all() {
        println!("{}", style.name);
        println!("  {}", style.start);
        println!("  {}", style.finish);
        for modifier in &style.modifiers {
            println!("  {}", modifier);
        }
    }
}

fn fail(message: impl fmt::Display) -> ! {
    eprintln!("error: {}", message);
    process::exit(1);
}

fn main() {
    let cli = Cli::parse();
    match cli.command {
        Command::Infer { input, json } => {
            let text = match fs::read_to_string(&input) {
                Ok(text) => text,
                Err(err) => fail(format_args!("cannot read {}: {}", input.display(), err)),
            };
            let request: InferRequest = match serde_json::from_str(&text) {
                Ok(request) => request,
                Err(err) => fail(format_args!("malformed request: {}", err)),
            };
            let report = match run_infer(&request) {
                Ok(report) => report,
                Err(message) => fail(message),
            };
            if json {
                match serde_json::to_string_pretty(&report) {
                    Ok(rendered) => println!("{}", rendered),
                    Err(err) => fail(err),
                }
            } else {
                print_report(&report);
            }
        }
        Command::Styles => print_styles(),
    }
}
