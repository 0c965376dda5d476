//! Children's ages: mean value, eldest child, longest name.
//!
//! Exercises all three cloze answer kinds: NUMERICAL, MULTICHOICE and
//! SHORTANSWER.

use clozegen_core::{
    ClozeError, Combination, ComputationError, FnProblem, InputSpace, Outputs, Problem, Template,
    Value,
};

pub const ID: &str = "children";

const TEMPLATE: &str = r#"
John Smith has 3 children:
{name[0]:s}, age {age[0]:.1f},
{name[1]:s}, age {age[1]:.1f},
{name[2]:s}, age {age[2]:.1f}.

The mean age of the children is
$$\mu$$ = {{1:NUMERICAL:={mean_age:.1f}:0.5}} (±0.5).

The eldest child is :
{{1:MULTICHOICE:{oldest[0]:s} {name[0]:s}
               ~{oldest[1]:s} {name[1]:s}
               ~{oldest[2]:s} {name[2]:s}}}.

The child with the longest name is {{1:SHORTANSWER:~={longest_name:s}}}.
"#;

pub fn problem() -> Result<FnProblem, ClozeError> {
    let inputs = InputSpace::new()
        .with(
            "name",
            [
                Value::from(["Antoinette", "Lawrence", "Sebastian"]),
                Value::from(["Anastasia", "Catherine", "Quentin"]),
            ],
        )?
        .with(
            "age",
            [
                Value::from([10.2, 12.9, 9.7]),
                Value::from([23.4, 12.5, 17.2]),
                Value::from([4.9, 14.1, 8.5]),
            ],
        )?;

    Ok(Problem::new(
        ID,
        "PyClz00",
        inputs,
        Template::parse(ID, TEMPLATE)?,
        evaluate as fn(&Combination<'_>) -> Result<Outputs, ComputationError>,
    )
    .with_title("Mean age, eldest child and longest name of three children"))
}

fn evaluate(x: &Combination<'_>) -> Result<Outputs, ComputationError> {
    let ages = x.numbers("age")?;
    let names = x
        .row("name")?
        .iter()
        .map(|v| {
            v.as_str()
                .ok_or_else(|| ComputationError::new("names must be text"))
        })
        .collect::<Result<Vec<_>, _>>()?;
    if ages.is_empty() || ages.len() != names.len() {
        return Err(ComputationError::new(format!(
            "{} names for {} ages",
            names.len(),
            ages.len()
        )));
    }

    let mean_age = ages.iter().sum::<f64>() / ages.len() as f64;

    // First maximum wins on ties.
    let eldest = ages
        .iter()
        .enumerate()
        .fold(0, |best, (i, &age)| if age > ages[best] { i } else { best });
    let oldest: Vec<Value> = (0..ages.len()).map(|i| Value::choice(i == eldest)).collect();

    // Last of the longest names wins on ties.
    let longest_name = names
        .iter()
        .copied()
        .max_by_key(|n| n.chars().count())
        .unwrap_or_default();

    Ok(Outputs::new()
        .with("mean_age", mean_age)
        .with("oldest", oldest)
        .with("longest_name", longest_name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clozegen_core::generate_quiz;

    #[test]
    fn six_questions() {
        let problem = problem().unwrap();
        assert_eq!(problem.inputs.combination_count(), 6);
        let doc = generate_quiz(&problem).unwrap();
        assert_eq!(doc.len(), 6);
        assert_eq!(doc.questions[5].name, "PyClz00_5");
        assert!(doc.questions.iter().all(|q| q.default_grade == 3));
    }

    #[test]
    fn first_question_answers() {
        let doc = generate_quiz(&problem().unwrap()).unwrap();
        let body = &doc.questions[0].body;
        assert!(body.contains("Antoinette, age 10.2,"));
        // (10.2 + 12.9 + 9.7) / 3 = 10.93
        assert!(body.contains("{1:NUMERICAL:=10.9:0.5}"));
        assert!(body.contains("{1:MULTICHOICE: Antoinette\n               ~= Lawrence\n"));
        assert!(body.contains("{1:SHORTANSWER:~=Antoinette}"));
    }

    #[test]
    fn longest_name_tie_takes_the_last() {
        let problem = problem().unwrap();
        let trace = clozegen_core::QuizGenerator::new(Default::default())
            .trace(&problem)
            .unwrap();
        // Anastasia and Catherine both have 9 letters.
        assert_eq!(
            trace[3].outputs.get("longest_name"),
            Some(&Value::from("Catherine"))
        );
        // Ages 23.4, 12.5, 17.2: the first child is the eldest.
        assert_eq!(
            trace[4].outputs.get("oldest"),
            Some(&Value::from(["=", "", ""]))
        );
    }
}
