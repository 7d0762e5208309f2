//! Parameter registry and override sets.

use crate::engine::error::{EngineError, Result};
use std::collections::BTreeMap;
use std::fmt;

/// Named engine parameters.
///
/// Each parameter has a fixed type, a default, and a valid range, all
/// enforced by [`ParamSet::set`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Param {
    /// Handle all function constraints as true nonlinear functions (1)
    /// instead of per-constraint attribute control (0).
    FuncNonlinear,
    /// Default piece count for approximated function constraints.
    FuncPieces,
    /// How many ranked tuning results to retain.
    TuneResults,
    /// Cap on candidate settings evaluated during tuning, 0 = all.
    TuneTrials,
    /// Sampling budget of the grid reference engine.
    GridPoints,
    /// Constraint violation tolerance.
    FeasibilityTol,
    /// Engine log chatter: 0 silent, 1 normal.
    OutputFlag,
}

/// Value of a parameter, typed per the registry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParamValue {
    Int(i64),
    Float(f64),
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Int(v) => write!(f, "{v}"),
            ParamValue::Float(v) => write!(f, "{v}"),
        }
    }
}

/// Type tag of a parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    Int,
    Float,
}

const ALL_PARAMS: [Param; 7] = [
    Param::FuncNonlinear,
    Param::FuncPieces,
    Param::TuneResults,
    Param::TuneTrials,
    Param::GridPoints,
    Param::FeasibilityTol,
    Param::OutputFlag,
];

impl Param {
    /// Canonical parameter name, as used in `.prm` files.
    pub fn name(&self) -> &'static str {
        match self {
            Param::FuncNonlinear => "FuncNonlinear",
            Param::FuncPieces => "FuncPieces",
            Param::TuneResults => "TuneResults",
            Param::TuneTrials => "TuneTrials",
            Param::GridPoints => "GridPoints",
            Param::FeasibilityTol => "FeasibilityTol",
            Param::OutputFlag => "OutputFlag",
        }
    }

    /// Looks a parameter up by its canonical name.
    pub fn from_name(name: &str) -> Option<Param> {
        ALL_PARAMS.iter().copied().find(|p| p.name() == name)
    }

    /// All known parameters.
    pub fn all() -> &'static [Param] {
        &ALL_PARAMS
    }

    pub fn kind(&self) -> ParamKind {
        match self {
            Param::FeasibilityTol => ParamKind::Float,
            _ => ParamKind::Int,
        }
    }

    /// Default value per the registry.
    pub fn default_value(&self) -> ParamValue {
        match self {
            Param::FuncNonlinear => ParamValue::Int(0),
            Param::FuncPieces => ParamValue::Int(64),
            Param::TuneResults => ParamValue::Int(1),
            Param::TuneTrials => ParamValue::Int(0),
            Param::GridPoints => ParamValue::Int(4096),
            Param::FeasibilityTol => ParamValue::Float(1e-6),
            Param::OutputFlag => ParamValue::Int(1),
        }
    }

    /// Validates a candidate value against type and range.
    pub fn check(&self, value: ParamValue) -> Result<()> {
        let ok = match (self, value) {
            (Param::FuncNonlinear, ParamValue::Int(v)) => v == 0 || v == 1,
            (Param::FuncPieces, ParamValue::Int(v)) => v >= 2,
            (Param::TuneResults, ParamValue::Int(v)) => v >= 1,
            (Param::TuneTrials, ParamValue::Int(v)) => v >= 0,
            (Param::GridPoints, ParamValue::Int(v)) => v >= 2,
            (Param::FeasibilityTol, ParamValue::Float(v)) => v > 0.0 && v.is_finite(),
            (Param::OutputFlag, ParamValue::Int(v)) => v == 0 || v == 1,
            _ => {
                return Err(EngineError::InvalidArgument(format!(
                    "parameter {} expects {:?} value",
                    self.name(),
                    self.kind()
                )))
            }
        };
        if ok {
            Ok(())
        } else {
            Err(EngineError::InvalidArgument(format!(
                "value {value} out of range for parameter {}",
                self.name()
            )))
        }
    }
}

/// A bag of parameter overrides on top of the registry defaults.
///
/// Scoped either to an environment (inherited by new models) or to a
/// single model. Only overrides are stored; [`ParamSet::get`] falls back
/// to the default.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParamSet {
    overrides: BTreeMap<Param, ParamValue>,
}

impl ParamSet {
    /// Creates an empty set (all defaults).
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets an override after type/range validation.
    pub fn set(&mut self, param: Param, value: ParamValue) -> Result<()> {
        param.check(value)?;
        self.overrides.insert(param, value);
        Ok(())
    }

    /// Current value: the override if present, the default otherwise.
    pub fn get(&self, param: Param) -> ParamValue {
        self.overrides
            .get(&param)
            .copied()
            .unwrap_or_else(|| param.default_value())
    }

    /// Integer parameter value.
    ///
    /// # Panics
    ///
    /// Panics when called for a float-typed parameter.
    pub fn int(&self, param: Param) -> i64 {
        match self.get(param) {
            ParamValue::Int(v) => v,
            ParamValue::Float(_) => panic!("{} is not an integer parameter", param.name()),
        }
    }

    /// Float parameter value.
    ///
    /// # Panics
    ///
    /// Panics when called for an integer-typed parameter.
    pub fn float(&self, param: Param) -> f64 {
        match self.get(param) {
            ParamValue::Float(v) => v,
            ParamValue::Int(_) => panic!("{} is not a float parameter", param.name()),
        }
    }

    /// Whether any override is stored.
    pub fn is_empty(&self) -> bool {
        self.overrides.is_empty()
    }

    /// Iterates stored overrides in a stable order.
    pub fn overrides(&self) -> impl Iterator<Item = (Param, ParamValue)> + '_ {
        self.overrides.iter().map(|(p, v)| (*p, *v))
    }

    /// Returns a copy with `other`'s overrides applied on top.
    pub fn merged(&self, other: &ParamSet) -> ParamSet {
        let mut out = self.clone();
        for (p, v) in other.overrides() {
            out.overrides.insert(p, v);
        }
        out
    }
}
