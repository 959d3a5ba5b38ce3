use crate::engine::error::InvalidExpressionError;
use std::collections::HashMap;
use std::f64::consts::{E, PI, TAU};
use std::fmt;
use std::fmt::Formatter;
use std::ops::RangeInclusive;

/// Whether trigonometric functions read their argument as radians or degrees.
///
/// The mode is passed explicitly to every evaluation instead of living in
/// shared state, so two concurrent evaluations can use different modes.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum AngleMode {
    Radians,
    Degrees,
}

impl Default for AngleMode {
    fn default() -> Self {
        AngleMode::Radians
    }
}

impl fmt::Display for AngleMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            AngleMode::Radians => write!(f, "rad"),
            AngleMode::Degrees => write!(f, "deg"),
        }
    }
}

/// A named entry of the symbol table.
#[derive(Clone, Copy)]
pub enum Symbol {
    Constant(f64),
    Function(Function),
}

#[derive(Clone, Copy)]
enum Callable {
    Unary(fn(f64) -> f64),
    Binary(fn(f64, f64) -> f64),
    /// Logarithm with an optional base argument.
    LogBase { default_base: f64 },
    Factorial,
}

/// A function the evaluator may call.
///
/// Most entries wrap a plain `f64` method. The wrapper checks the argument
/// count up front and inspects the result afterwards: a call that turns
/// finite arguments into `NaN` is reported as a domain error, one that
/// overflows to infinity as a range error. Non-finite arguments skip that
/// check, so expressions built from the `inf` and `nan` constants still flow
/// through.
#[derive(Clone, Copy)]
pub struct Function {
    name: &'static str,
    callable: Callable,
}

impl Function {
    fn unary(name: &'static str, apply: fn(f64) -> f64) -> Function {
        Function {
            name,
            callable: Callable::Unary(apply),
        }
    }

    fn binary(name: &'static str, apply: fn(f64, f64) -> f64) -> Function {
        Function {
            name,
            callable: Callable::Binary(apply),
        }
    }

    fn log_base(name: &'static str, default_base: f64) -> Function {
        Function {
            name,
            callable: Callable::LogBase { default_base },
        }
    }

    fn factorial(name: &'static str) -> Function {
        Function {
            name,
            callable: Callable::Factorial,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    fn argument_range(&self) -> RangeInclusive<usize> {
        match self.callable {
            Callable::Unary(_) | Callable::Factorial => 1..=1,
            Callable::Binary(_) => 2..=2,
            Callable::LogBase { .. } => 1..=2,
        }
    }

    pub fn call(&self, arguments: &[f64]) -> Result<f64, InvalidExpressionError> {
        let range = self.argument_range();
        if !range.contains(&arguments.len()) {
            return Err(InvalidExpressionError::new(format!(
                "{}() expected {}, got {}",
                self.name,
                describe_arity(&range),
                arguments.len()
            )));
        }

        let value = match self.callable {
            Callable::Unary(apply) => apply(arguments[0]),
            Callable::Binary(apply) => apply(arguments[0], arguments[1]),
            Callable::LogBase { default_base } => {
                let base = arguments.get(1).copied().unwrap_or(default_base);
                log_with_base(arguments[0], base)?
            }
            Callable::Factorial => factorial(arguments[0])?,
        };

        if arguments.iter().all(|argument| argument.is_finite()) && !value.is_finite() {
            return if value.is_nan() {
                Err(InvalidExpressionError::new(format!(
                    "math domain error in {}()",
                    self.name
                )))
            } else {
                Err(InvalidExpressionError::new(format!(
                    "math range error in {}()",
                    self.name
                )))
            };
        }

        Ok(value)
    }
}

fn describe_arity(range: &RangeInclusive<usize>) -> String {
    if range.start() == range.end() {
        let count = *range.start();
        format!(
            "exactly {} argument{}",
            count,
            if count == 1 { "" } else { "s" }
        )
    } else {
        format!("{} to {} arguments", range.start(), range.end())
    }
}

/// The closed set of names an expression may reference.
///
/// The table is rebuilt for every evaluation, so nothing a caller does can
/// leak state between evaluations. Names are case-sensitive and there is no
/// fallback lookup of any kind.
pub struct SymbolTable {
    entries: HashMap<&'static str, Symbol>,
}

const CONSTANTS: [(&str, f64); 5] = [
    ("pi", PI),
    ("e", E),
    ("tau", TAU),
    ("inf", f64::INFINITY),
    ("nan", f64::NAN),
];

impl SymbolTable {
    /// Builds the symbol table for the given angle mode.
    ///
    /// In degrees mode the `sin`, `cos` and `tan` entries are replaced by
    /// wrappers that convert the argument from degrees first. The inverse
    /// functions are deliberately left alone and keep returning radians.
    pub fn for_mode(mode: AngleMode) -> SymbolTable {
        let mut entries = HashMap::new();

        for (name, value) in CONSTANTS {
            entries.insert(name, Symbol::Constant(value));
        }
        for function in default_functions() {
            entries.insert(function.name, Symbol::Function(function));
        }
        if mode == AngleMode::Degrees {
            for function in degree_overrides() {
                entries.insert(function.name, Symbol::Function(function));
            }
        }

        SymbolTable { entries }
    }

    pub fn lookup(&self, name: &str) -> Option<&Symbol> {
        self.entries.get(name)
    }
}

/// The default function set: the real-valued functions of the standard
/// mathematics library, plus the bare-name `abs`, a `logb` with a default
/// base of 10, and an exact `factorial`.
fn default_functions() -> Vec<Function> {
    vec![
        Function::unary("abs", f64::abs),
        Function::unary("acos", f64::acos),
        Function::unary("acosh", f64::acosh),
        Function::unary("asin", f64::asin),
        Function::unary("asinh", f64::asinh),
        Function::unary("atan", f64::atan),
        Function::binary("atan2", f64::atan2),
        Function::unary("cbrt", f64::cbrt),
        Function::unary("ceil", f64::ceil),
        Function::binary("copysign", f64::copysign),
        Function::unary("cos", f64::cos),
        Function::unary("cosh", f64::cosh),
        Function::unary("degrees", f64::to_degrees),
        Function::unary("exp", f64::exp),
        Function::unary("exp2", f64::exp2),
        Function::unary("expm1", f64::exp_m1),
        Function::unary("fabs", f64::abs),
        Function::factorial("factorial"),
        Function::unary("floor", f64::floor),
        Function::binary("fmod", fmod),
        Function::unary("gamma", gamma),
        Function::binary("hypot", f64::hypot),
        Function::log_base("log", E),
        Function::unary("log10", f64::log10),
        Function::unary("log1p", f64::ln_1p),
        Function::unary("log2", f64::log2),
        Function::log_base("logb", 10.0),
        Function::binary("pow", f64::powf),
        Function::unary("radians", f64::to_radians),
        Function::unary("sin", f64::sin),
        Function::unary("sinh", f64::sinh),
        Function::unary("sqrt", f64::sqrt),
        Function::unary("tan", f64::tan),
        Function::unary("tanh", f64::tanh),
        Function::unary("trunc", f64::trunc),
    ]
}

fn degree_overrides() -> Vec<Function> {
    vec![
        Function::unary("sin", sin_degrees),
        Function::unary("cos", cos_degrees),
        Function::unary("tan", tan_degrees),
    ]
}

fn sin_degrees(x: f64) -> f64 {
    x.to_radians().sin()
}

fn cos_degrees(x: f64) -> f64 {
    x.to_radians().cos()
}

fn tan_degrees(x: f64) -> f64 {
    x.to_radians().tan()
}

/// `fmod` keeps the sign of the dividend, unlike the `%` operator whose
/// floored result follows the divisor.
fn fmod(x: f64, y: f64) -> f64 {
    x % y
}

fn log_with_base(x: f64, base: f64) -> Result<f64, InvalidExpressionError> {
    if x <= 0.0 {
        return Err(InvalidExpressionError::new(
            "math domain error: logarithm of a non-positive value",
        ));
    }
    if base <= 0.0 || base == 1.0 {
        return Err(InvalidExpressionError::new(
            "math domain error: logarithm base must be positive and not 1",
        ));
    }
    Ok(x.log(base))
}

fn factorial(x: f64) -> Result<f64, InvalidExpressionError> {
    if x < 0.0 {
        return Err(InvalidExpressionError::new(
            "factorial() not defined for negative values",
        ));
    }
    if x.fract() != 0.0 {
        return Err(InvalidExpressionError::new(
            "factorial() only accepts integral values",
        ));
    }
    // 171! overflows f64; the caller reports the infinity as a range error.
    if x > 170.0 {
        return Ok(f64::INFINITY);
    }
    let mut product = 1.0;
    for factor in 2..=(x as u64) {
        product *= factor as f64;
    }
    Ok(product)
}

const LANCZOS_G: f64 = 7.0;
const LANCZOS_COEFFICIENTS: [f64; 9] = [
    0.99999999999980993,
    676.5203681218851,
    -1259.1392167224028,
    771.32342877765313,
    -176.61502916214059,
    12.507343278686905,
    -0.13857109526572012,
    9.9843695780195716e-6,
    1.5056327351493116e-7,
];

/// Gamma function via the Lanczos approximation.
///
/// Zero and the negative integers are poles; they surface as `NaN` so the
/// call wrapper reports them as domain errors.
fn gamma(x: f64) -> f64 {
    if x <= 0.0 && x.fract() == 0.0 {
        return f64::NAN;
    }
    lanczos_gamma(x)
}

fn lanczos_gamma(x: f64) -> f64 {
    if x < 0.5 {
        // Reflection formula maps the left half-line onto the right.
        return PI / ((PI * x).sin() * lanczos_gamma(1.0 - x));
    }

    let x = x - 1.0;
    let mut series = LANCZOS_COEFFICIENTS[0];
    for (index, coefficient) in LANCZOS_COEFFICIENTS.iter().enumerate().skip(1) {
        series += coefficient / (x + index as f64);
    }
    let t = x + LANCZOS_G + 0.5;

    (2.0 * PI).sqrt() * t.powf(x + 0.5) * (-t).exp() * series
}
