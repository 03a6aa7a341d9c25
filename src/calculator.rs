//! Odorant dosing calculator
//!
//! Derives the odorant dose for a volume of consumed gas through a fixed
//! linear chain: grams of odorant, then drops, then drops per minute.

#[cfg(test)]
mod proptests;

use serde::Serialize;

/// Grams of odorant required per 1000 m³ of gas
pub const GRAMS_PER_THOUSAND_CUBIC_METERS: f64 = 16.0;

/// Weight of one drop, in grams
pub const GRAMS_PER_DROP: f64 = 0.02;

/// Metering window the drop count is spread over, in minutes
pub const MINUTES_PER_WINDOW: f64 = 60.0;

/// Three derived quantities for one gas volume.
///
/// Either all fields are zero or all were derived from the same input.
/// Fields are private so a partial result cannot be assembled by hand.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct CalculationResult {
    odorant_amount: f64,
    drops: f64,
    drops_per_minute: f64,
}

impl CalculationResult {
    /// The all-zero "no result" value
    pub const ZERO: Self = Self {
        odorant_amount: 0.0,
        drops: 0.0,
        drops_per_minute: 0.0,
    };

    /// Run the derivation chain for a gas volume in cubic meters.
    ///
    /// Each stage feeds the next unrounded value.
    pub fn from_volume(cubic_meters: f64) -> Self {
        let odorant_amount = (cubic_meters / 1000.0) * GRAMS_PER_THOUSAND_CUBIC_METERS;
        let drops = odorant_amount / GRAMS_PER_DROP;
        let drops_per_minute = drops / MINUTES_PER_WINDOW;
        Self {
            odorant_amount,
            drops,
            drops_per_minute,
        }
    }

    /// Odorant amount in grams
    pub fn odorant_amount(&self) -> f64 {
        self.odorant_amount
    }

    pub fn drops(&self) -> f64 {
        self.drops
    }

    pub fn drops_per_minute(&self) -> f64 {
        self.drops_per_minute
    }

    pub fn is_zero(&self) -> bool {
        self.odorant_amount() == 0.0 && self.drops() == 0.0 && self.drops_per_minute() == 0.0
    }

    /// Format for display, rounded to two decimals
    pub fn display(&self) -> DisplayResult {
        DisplayResult {
            odorant_amount: format!("{:.2}", self.odorant_amount()),
            drops: format!("{:.2}", self.drops()),
            drops_per_minute: format!("{:.2}", self.drops_per_minute()),
        }
    }
}

/// Display strings for a result. This is the only place rounding happens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayResult {
    pub odorant_amount: String,
    pub drops: String,
    pub drops_per_minute: String,
}

/// Outcome of one calculator submission
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Calculation {
    /// No input, or only whitespace. Explicit reset.
    Empty,
    /// Input present but not a finite number
    Invalid { raw: String },
    /// Derived from a parsed volume
    Computed { input: f64, result: CalculationResult },
}

impl Calculation {
    /// The result to render. Zero for `Empty` and `Invalid`.
    pub fn result(&self) -> CalculationResult {
        match self {
            Calculation::Computed { result, .. } => *result,
            Calculation::Empty | Calculation::Invalid { .. } => CalculationResult::ZERO,
        }
    }

    /// Whether there is a non-zero result worth showing
    pub fn has_result(&self) -> bool {
        !self.result().is_zero()
    }

    pub fn is_invalid(&self) -> bool {
        matches!(self, Calculation::Invalid { .. })
    }
}

/// Compute the dose for raw user input.
///
/// Never fails: blank input resets, unparseable or non-finite input is
/// reported as [`Calculation::Invalid`].
pub fn compute(raw: Option<&str>) -> Calculation {
    let Some(trimmed) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return Calculation::Empty;
    };

    match trimmed.parse::<f64>() {
        Ok(input) if input.is_finite() => Calculation::Computed {
            input,
            result: CalculationResult::from_volume(input),
        },
        _ => Calculation::Invalid {
            raw: trimmed.to_string(),
        },
    }
}

/// Last input/result pair shown by the calculator panel
#[derive(Debug, Clone)]
pub struct CalculatorPanel {
    input: Option<String>,
    calculation: Calculation,
}

impl Default for CalculatorPanel {
    fn default() -> Self {
        Self {
            input: None,
            calculation: Calculation::Empty,
        }
    }
}

impl CalculatorPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the stored pair with a fresh calculation for `raw`
    pub fn update(&mut self, raw: Option<&str>) -> &Calculation {
        self.calculation = compute(raw);
        self.input = raw.map(str::to_string);
        &self.calculation
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn input(&self) -> Option<&str> {
        self.input.as_deref()
    }

    pub fn calculation(&self) -> &Calculation {
        &self.calculation
    }
}
