//! Steady one-dimensional conduction through a plane concrete wall.

use clozegen_core::{
    arange, arange_int, ClozeError, Combination, ComputationError, FnProblem, InputSpace, Outputs,
    Problem, Template,
};

pub const ID: &str = "wall";

const TEMPLATE: &str = r#"
Let's consider a flat concrete wall of width $$w$$ = {w:3.2f} m
and surface area $$S$$ = {S:3.2f} m<sup>2</sup>.
The surfaces at $$x$$ = 0 and at $$x = w$$ are maintained at temperatures
$$\theta_0$$ = {θ0:3.1f} °C and
$$\theta_w$$ = {θw:3.1f} °C.
It will be assumed that the heat transfer is in one direction and in steady
state, without internal sources and that the thermal conductivity of medium
concrete is
$$\lambda$$ = {λ:3.2f} W/m·K.

**Give the values of:**

$$U$$ = {{1:NUMERICAL:={U:3.2f}:0.5}} (±0.5) W/m<sup>2</sup>K,
thermal transmittance

$$R$$ = {{1:NUMERICAL:={R:7.6f}:0.005}} (±0.005) K/W,
(absolute) thermal resistance,

$$\varphi_{{0,w}}$$ = {{1:NUMERICAL:={φ:3.2f}:10}} (±10) W/m<sup>2</sup>,
heat flux from $$x$$ = 0 to $$x = w$$,

$$q_{{0,w}}$$ = {{1:NUMERICAL:={q:3.2f}:100}} (±100) W,
heat transfer rate from $$x$$ = 0 to $$x = w$$.
"#;

pub fn problem() -> Result<FnProblem, ClozeError> {
    let inputs = InputSpace::new()
        .with("w", arange(0.10, 0.30, 0.10)?)? // width [m]
        .with("S", arange_int(20, 30, 10)?)? // surface area [m²]
        .with("θ0", arange_int(0, -10, -5)?)? // temperature at x = 0 [°C]
        .with("θw", arange_int(20, 22, 2)?)? // temperature at x = w [°C]
        .with("λ", [0.5, 1.0, 1.8])?; // thermal conductivity [W/m·K]

    Ok(Problem::new(
        ID,
        "PyClz01",
        inputs,
        Template::parse(ID, TEMPLATE)?,
        evaluate as fn(&Combination<'_>) -> Result<Outputs, ComputationError>,
    )
    .with_title("Thermal transmittance, resistance, flux and rate of a plane wall"))
}

fn evaluate(x: &Combination<'_>) -> Result<Outputs, ComputationError> {
    let w = x.number("w")?;
    let s = x.number("S")?;
    let theta_0 = x.number("θ0")?;
    let theta_w = x.number("θw")?;
    let lambda = x.number("λ")?;
    if w <= 0.0 || s <= 0.0 {
        return Err(ComputationError::new(format!(
            "wall width and area must be positive (w = {w}, S = {s})"
        )));
    }

    let u = lambda / w; // [W/m²·K]
    let r = 1.0 / (u * s); // [K/W]
    let phi = u * (theta_0 - theta_w); // [W/m²]
    let q = 1.0 / r * (theta_0 - theta_w); // [W]

    Ok(Outputs::new()
        .with("U", u)
        .with("R", r)
        .with("φ", phi)
        .with("q", q))
}
