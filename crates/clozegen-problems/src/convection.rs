//! Convective exchange coefficients of a water-carrying copper pipe in still air.
//!
//! Forced convection inside the pipe uses the Colburn correlation, natural
//! convection outside uses a Grashof-number correlation. Combinations that
//! fall outside either correlation's validity range fail the computation.

use clozegen_core::{
    ClozeError, Combination, ComputationError, FnProblem, InputSpace, Outputs, Problem, Template,
    Value,
};

pub const ID: &str = "convection";

/// Gravitational acceleration [m/s²].
const G: f64 = 9.81;

const TEMPLATE: &str = r#"
#Evaluation of convective exchange coefficients

Let's consider a copper pipe in which a pump
circulates water. The tube is in still air. It is considered
that the temperature of the outer surface of the tube
is almost equal to the temperature inside the tube.

By using existing correlations for forced convection
in the tube and for natural convection in the air
(based on the Grashof number), find the values of the coefficients
of convective exchange in the tube (water - tube) and outside of the tube
(air - tube) for the water temperature in the pipe
$$\theta_{{water}}$$ = {water[0]:3.0f} K,
and the air temperature
$$\theta_{{air}}$$ = {air[0]:3.0f} K.

<br/>

**Data**

*Thermo-physical properties*

|Substance|Temperature    |Conductivity   |Viscosity     |Density        |Specific heat   |Expansion coef.|
|---------|---------------|---------------|--------------|---------------|----------------|---------------|
|         |T [K]          |λ [W/m·K]      |μ [Pa·s]      |ρ [kg/m³]      |c [J/kg·K]      |β [1/K]        |
|Water    |{water[0]:2.0f}|{water[1]:4.3f}|{water[2]:.3e}|{water[3]:3.0f}|{water[4]:3.0f} |{water[5]:.4e} |
|Air      |{air[0]:2.0f}  |{air[1]:4.3f}  |{air[2]:.3e}  |{air[3]:3.4f}  |{air[4]:3.0f}   |{air[5]:.4e}   |

<br/>

*Pipe*

|Ext. diameter        |Width                 |Water velocity       |
|---------------------|----------------------|---------------------|
|D [m]                |w [m]                 |v [m/s]              |
|{pipe_copper[0]:0.3f}|{pipe_copper[1]:0.3f} |{pipe_copper[2]:3.2f}|

<br/>

**Give the values of:**

$$h_i$$ = {{1:NUMERICAL:={hw:3.0f}:10}} (±10) $$\mathrm{{W/m^2K}}$$,
coefficient of convective exchange between water and pipe.

$$h_{{o,min}}$$ = {{1:NUMERICAL:={ha_min:3.1f}:1}} (±1) $$\mathrm{{W/m^2K}}$$,
minimum value of the convective exchange coefficient of the pipe with the air.

$$h_{{o,max}}$$ = {{1:NUMERICAL:={ha_max:3.1f}:1}} (±1) $$\mathrm{{W/m^2K}}$$,
maximum value of the convective exchange coefficient of the pipe with the air.


**Fill in the sentence:**

The correlation used for forced convection in a tube is called the formula of
{{1:SHORTANSWER:=Colburn}}

**Choose the correct answer:**

The type of air flow is {{1:MULTICHOICE:undetermined
                           ~{flow_air_laminar:s} laminar
                           ~{flow_air_turbulent:s} turbulent}}
"#;

fn rows<const N: usize>(rows: &[[f64; N]]) -> Vec<Value> {
    rows.iter().map(|r| Value::from(*r)).collect()
}

pub fn problem() -> Result<FnProblem, ClozeError> {
    //            T [K]   λ      μ       ρ     c       β
    let water = rows(&[
        [330.0, 0.650, 489e-6, 984.0, 4184.0, 504.0e-6],
        [340.0, 0.660, 420e-6, 979.0, 4188.0, 566.0e-6],
        [350.0, 0.668, 365e-6, 974.0, 4195.0, 624.2e-6],
        [360.0, 0.674, 324e-6, 967.0, 4203.0, 697.9e-6],
        [365.0, 0.677, 306e-6, 963.0, 4209.0, 701.1e-6],
    ]);
    let air = rows(&[
        [250.0, 22.3e-3, 15.96e-6, 1.3947, 1.006e3, 4.08e-3],
        [300.0, 26.3e-3, 18.46e-6, 1.1614, 1.007e3, 3.38e-3],
    ]);
    //               D [m]  w [m]  v [m/s]
    let pipe = rows(&[
        [22e-3, 1e-3, 0.63],
        [35e-3, 1e-3, 0.81],
        [42e-3, 1e-3, 0.89],
    ]);

    let inputs = InputSpace::new()
        .with("water", water)?
        .with("air", air)?
        .with("pipe_copper", pipe)?;

    Ok(Problem::new(
        ID,
        "PyClz02",
        inputs,
        Template::parse(ID, TEMPLATE)?,
        evaluate as fn(&Combination<'_>) -> Result<Outputs, ComputationError>,
    )
    .with_title("Forced and natural convection coefficients of a copper pipe"))
}

fn unpack<const N: usize>(x: &Combination<'_>, name: &str) -> Result<[f64; N], ComputationError> {
    let values = x.numbers(name)?;
    let found = values.len();
    values.try_into().map_err(|_| {
        ComputationError::new(format!("'{name}' has {found} columns, expected {N}"))
    })
}

fn evaluate(x: &Combination<'_>) -> Result<Outputs, ComputationError> {
    let [theta_w, lambda_w, mu_w, rho_w, c_w, _beta_w] = unpack::<6>(x, "water")?;
    let [theta_a, lambda_a, mu_a, rho_a, c_a, beta_a] = unpack::<6>(x, "air")?;
    let [d, w, v] = unpack::<3>(x, "pipe_copper")?;

    // Forced convection inside the pipe.
    let d_in = d - 2.0 * w;
    let re = rho_w * v * d_in / mu_w;
    let pr = mu_w * c_w / lambda_w;
    if !((0.7..=160.0).contains(&pr) && re > 10_000.0 && re < 120_000.0) {
        return Err(ComputationError::new(format!(
            "Colburn correlation not valid for D = {d}: Pr = {pr:.2}, Re = {re:.0} \
             (needs 0.7 <= Pr <= 160 and 1e4 < Re < 1.2e5)"
        )));
    }
    let nu = 0.023 * re.powf(0.8) * pr.powf(0.33);
    let hw = lambda_w / d_in * nu;

    // Natural convection outside the pipe.
    let pr = mu_a * c_a / lambda_a;
    let gr = G * beta_a * rho_a.powi(2) * d.powi(3) / mu_a.powi(2) * (theta_w - theta_a);
    let (c, n, laminar) = if gr > 1e3 && gr < 1e9 {
        ([0.2, 0.6], 0.25, true)
    } else if gr > 1e9 && gr < 1e12 {
        ([0.07, 0.15], 1.0 / 3.0, false)
    } else {
        return Err(ComputationError::new(format!(
            "Grashof number Gr = {gr:.0} outside 1e3 < Gr < 1e12"
        )));
    };
    let ha = c.map(|ci| lambda_a / d * ci * (gr * pr).powf(n));

    Ok(Outputs::new()
        .with("hw", hw)
        .with("ha_min", ha[0])
        .with("ha_max", ha[1])
        .with("Gr", gr)
        .with("flow_air_laminar", Value::choice(laminar))
        .with("flow_air_turbulent", Value::choice(!laminar)))
}
