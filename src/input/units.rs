//! Unit Registry
//!
//! Converts typed quantities such as `154 lb` or `1.5 l` into a question's
//! target unit.
//!
//! ## Conversion Model
//! Every unit maps onto its dimension's base unit:
//! ```text
//! base = (magnitude + offset) * factor
//! ```
//! `offset` is zero except for temperature scales.
//!
//! The registry is built once at startup and passed by reference to whatever
//! needs it.

use std::collections::HashMap;

use regex::Regex;
use thiserror::Error;

/// Physical dimension of a unit; conversion only happens within one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dimension {
    Mass,
    Length,
    Volume,
    Time,
    Energy,
    Temperature,
}

/// Why an answer could not be read as a quantity
#[derive(Debug, Clone, PartialEq, Error)]
pub enum QuantityError {
    #[error("not a quantity: '{0}'")]
    Unparseable(String),

    #[error("undefined unit '{0}'")]
    UndefinedUnit(String),

    #[error("cannot convert from '{from}' to '{to}'")]
    Dimensionality { from: String, to: String },
}

/// A number with an optional unit, as typed
#[derive(Debug, Clone, PartialEq)]
pub struct Quantity {
    pub magnitude: f64,
    pub unit: Option<String>,
}

#[derive(Debug, Clone, Copy)]
struct UnitDef {
    dimension: Dimension,
    factor: f64,
    offset: f64,
}

/// Registry of known units
pub struct UnitRegistry {
    units: HashMap<String, UnitDef>,
    pattern: Regex,
}

impl UnitRegistry {
    /// Create a registry with the default unit table
    pub fn new() -> Self {
        let mut registry = Self::empty();

        use Dimension::*;

        // Mass (base: kilogram)
        registry.define(&["kg", "kilogram", "kilograms"], Mass, 1.0);
        registry.define(&["g", "gram", "grams"], Mass, 1e-3);
        registry.define(&["mg", "milligram", "milligrams"], Mass, 1e-6);
        registry.define(&["lb", "lbs", "pound", "pounds"], Mass, 0.453_592_37);
        registry.define(&["oz", "ounce", "ounces"], Mass, 0.028_349_523_125);
        registry.define(&["st", "stone", "stones"], Mass, 6.350_293_18);

        // Length (base: metre)
        registry.define(&["m", "meter", "meters", "metre", "metres"], Length, 1.0);
        registry.define(&["cm", "centimeter", "centimeters"], Length, 0.01);
        registry.define(&["mm", "millimeter", "millimeters"], Length, 0.001);
        registry.define(&["km", "kilometer", "kilometers"], Length, 1000.0);
        registry.define(&["in", "inch", "inches"], Length, 0.0254);
        registry.define(&["ft", "foot", "feet"], Length, 0.3048);
        registry.define(&["yd", "yard", "yards"], Length, 0.9144);
        registry.define(&["mi", "mile", "miles"], Length, 1609.344);

        // Volume (base: litre)
        registry.define(&["l", "liter", "liters", "litre", "litres"], Volume, 1.0);
        registry.define(&["ml", "milliliter", "milliliters"], Volume, 1e-3);
        registry.define(&["cup", "cups"], Volume, 0.236_588_236_5);
        registry.define(&["floz", "fl_oz"], Volume, 0.029_573_529_562_5);
        registry.define(&["pint", "pints"], Volume, 0.473_176_473);
        registry.define(&["gal", "gallon", "gallons"], Volume, 3.785_411_784);

        // Time (base: second)
        registry.define(&["s", "sec", "second", "seconds"], Time, 1.0);
        registry.define(&["min", "minute", "minutes"], Time, 60.0);
        registry.define(&["h", "hr", "hour", "hours"], Time, 3600.0);
        registry.define(&["day", "days"], Time, 86_400.0);
        registry.define(&["week", "weeks"], Time, 604_800.0);

        // Energy (base: joule)
        registry.define(&["j", "joule", "joules"], Energy, 1.0);
        registry.define(&["kj", "kilojoule", "kilojoules"], Energy, 1000.0);
        registry.define(&["cal", "calorie", "calories"], Energy, 4.184);
        registry.define(&["kcal", "kilocalorie", "kilocalories"], Energy, 4184.0);

        // Temperature (base: kelvin)
        registry.define_affine(&["k", "kelvin"], Temperature, 1.0, 0.0);
        registry.define_affine(&["degc", "celsius", "°c"], Temperature, 1.0, 273.15);
        registry.define_affine(&["degf", "fahrenheit", "°f"], Temperature, 5.0 / 9.0, 459.67);

        registry
    }

    /// Create a registry with no units defined
    pub fn empty() -> Self {
        Self {
            units: HashMap::new(),
            pattern: Regex::new(r"^([+-]?(?:\d+(?:\.\d*)?|\.\d+)(?:[eE][+-]?\d+)?)\s*(.*)$")
                .expect("valid quantity regex"),
        }
    }

    /// Register names for a linear unit
    pub fn define(&mut self, names: &[&str], dimension: Dimension, factor: f64) {
        self.define_affine(names, dimension, factor, 0.0);
    }

    /// Register names for a unit with an offset (temperature scales)
    pub fn define_affine(&mut self, names: &[&str], dimension: Dimension, factor: f64, offset: f64) {
        let def = UnitDef {
            dimension,
            factor,
            offset,
        };
        for name in names {
            self.units.insert(name.to_lowercase(), def);
        }
    }

    pub fn is_defined(&self, unit: &str) -> bool {
        self.lookup(unit).is_some()
    }

    /// Split an answer into magnitude and optional unit
    pub fn parse(&self, input: &str) -> Result<Quantity, QuantityError> {
        let trimmed = input.trim();
        let caps = self
            .pattern
            .captures(trimmed)
            .ok_or_else(|| QuantityError::Unparseable(trimmed.to_string()))?;

        let magnitude: f64 = caps[1]
            .parse()
            .map_err(|_| QuantityError::Unparseable(trimmed.to_string()))?;
        let unit = caps[2].trim();
        if unit.is_empty() {
            return Ok(Quantity {
                magnitude,
                unit: None,
            });
        }
        if !self.is_defined(unit) {
            return Err(QuantityError::UndefinedUnit(unit.to_string()));
        }

        Ok(Quantity {
            magnitude,
            unit: Some(unit.to_string()),
        })
    }

    /// Convert a magnitude between two units of the same dimension
    pub fn convert(&self, magnitude: f64, from: &str, to: &str) -> Result<f64, QuantityError> {
        let source = self
            .lookup(from)
            .ok_or_else(|| QuantityError::UndefinedUnit(from.to_string()))?;
        let target = self
            .lookup(to)
            .ok_or_else(|| QuantityError::UndefinedUnit(to.to_string()))?;

        if source.dimension != target.dimension {
            return Err(QuantityError::Dimensionality {
                from: from.to_string(),
                to: to.to_string(),
            });
        }

        let base = (magnitude + source.offset) * source.factor;
        Ok(base / target.factor - target.offset)
    }

    /// Read an answer as a magnitude in `target`
    ///
    /// A bare number is taken to already be in `target`.
    pub fn to_unit(&self, input: &str, target: &str) -> Result<f64, QuantityError> {
        let quantity = self.parse(input)?;
        match quantity.unit {
            Some(unit) => self.convert(quantity.magnitude, &unit, target),
            None => Ok(quantity.magnitude),
        }
    }

    fn lookup(&self, unit: &str) -> Option<&UnitDef> {
        self.units.get(&unit.to_lowercase())
    }
}

impl Default for UnitRegistry {
    fn default() -> Self {
        Self::new()
    }
}
