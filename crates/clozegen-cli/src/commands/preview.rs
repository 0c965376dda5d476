//! The `clozegen preview` command.

use std::path::PathBuf;

use anyhow::Result;

use clozegen_core::config::load_config_from;
use clozegen_core::{Bindings, QuizGenerator};

pub fn execute(problem_id: String, format: String, config_path: Option<PathBuf>) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let problem = clozegen_problems::create_problem(&problem_id)?;
    let trace = QuizGenerator::new(config.generator_config()).trace(&problem)?;

    match format.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&trace)?),
        "text" => {
            for entry in &trace {
                println!("Test {}", entry.index);
                print_bindings("Inputs", &entry.inputs);
                print_bindings("Outputs", &entry.outputs);
                println!();
            }
            println!("{}: {} combinations", problem.id, trace.len());
        }
        other => anyhow::bail!("unknown format: '{other}' (expected text or json)"),
    }

    Ok(())
}

fn print_bindings(label: &str, bindings: &Bindings) {
    println!("  {label}:");
    for (name, value) in bindings.iter() {
        println!("    {name} = {value}");
    }
}
