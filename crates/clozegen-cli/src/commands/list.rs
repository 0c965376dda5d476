//! The `clozegen list` command.

use anyhow::Result;
use comfy_table::{Cell, Table};

pub fn execute() -> Result<()> {
    let problems = clozegen_problems::all_problems()?;

    let mut table = Table::new();
    table.set_header(vec!["Problem", "Question base", "Combinations", "Title"]);
    for problem in &problems {
        table.add_row(vec![
            Cell::new(&problem.id),
            Cell::new(&problem.question_base),
            Cell::new(problem.inputs.combination_count()),
            Cell::new(&problem.title),
        ]);
    }

    println!("{table}");
    Ok(())
}
