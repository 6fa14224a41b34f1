//! Parameter introspection for effect kernels and slot controls.
//!
//! A [`ParamDescriptor`] carries everything a control surface needs to present
//! and validate one parameter: names, unit, range, default and step. Kernels
//! expose their parameters through the index-based [`ParameterInfo`] trait;
//! the slot controller describes its own four controls (bypass, wet, decay,
//! gate) with the same descriptor type.
//!
//! # Example
//!
//! ```rust
//! use rack_core::{ParameterInfo, ParamDescriptor};
//!
//! struct SimpleGain {
//!     gain_db: f32,
//! }
//!
//! impl ParameterInfo for SimpleGain {
//!     fn param_count(&self) -> usize { 1 }
//!
//!     fn param_info(&self, index: usize) -> Option<ParamDescriptor> {
//!         match index {
//!             0 => Some(ParamDescriptor::gain_db("Gain", "Gain", -60.0, 12.0, 0.0)
//!                 .with_string_id("gain_level")),
//!             _ => None,
//!         }
//!     }
//!
//!     fn get_param(&self, index: usize) -> f32 {
//!         match index {
//!             0 => self.gain_db,
//!             _ => 0.0,
//!         }
//!     }
//!
//!     fn set_param(&mut self, index: usize, value: f32) {
//!         if index == 0 {
//!             self.gain_db = value.clamp(-60.0, 12.0);
//!         }
//!     }
//! }
//! ```

/// Unit of a parameter value, used for display formatting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParamUnit {
    /// Decibels (dB) - gain and level parameters.
    Decibels,
    /// Milliseconds (ms) - time parameters.
    Milliseconds,
    /// Percentage (%) - mix and feedback amounts stored as 0–100.
    Percent,
    /// Unit interval (0.0–1.0) - wet level, gate threshold.
    Ratio,
    /// Dimensionless.
    #[default]
    None,
}

impl ParamUnit {
    /// Returns the unit suffix string for display.
    ///
    /// ```rust
    /// use rack_core::ParamUnit;
    ///
    /// assert_eq!(ParamUnit::Decibels.suffix(), " dB");
    /// assert_eq!(ParamUnit::Milliseconds.suffix(), " ms");
    /// assert_eq!(ParamUnit::None.suffix(), "");
    /// ```
    pub const fn suffix(&self) -> &'static str {
        match self {
            ParamUnit::Decibels => " dB",
            ParamUnit::Milliseconds => " ms",
            ParamUnit::Percent => "%",
            ParamUnit::Ratio | ParamUnit::None => "",
        }
    }
}

/// Trait for kernels that expose introspectable parameters.
///
/// Parameters are accessed by zero-based index, stable for the lifetime of
/// the instance. `set_param` clamps to the descriptor range; out-of-range
/// indices are ignored and `get_param` returns `0.0` for them.
pub trait ParameterInfo {
    /// Number of parameters. Valid indices are `0..param_count()`.
    fn param_count(&self) -> usize;

    /// Descriptor for the parameter at `index`, `None` when out of range.
    fn param_info(&self, index: usize) -> Option<ParamDescriptor>;

    /// Current value of the parameter at `index`.
    fn get_param(&self, index: usize) -> f32;

    /// Sets the parameter at `index`, clamped to its range.
    fn set_param(&mut self, index: usize, value: f32);
}

/// Describes a single parameter's metadata for display and validation.
///
/// `step` is the recommended increment for knob or encoder control; values
/// are not quantized to it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamDescriptor {
    /// Full parameter name (e.g. "Wet/Dry mix").
    pub name: &'static str,
    /// Short label for compact displays (e.g. "W/D").
    pub short_name: &'static str,
    /// Unit for formatting.
    pub unit: ParamUnit,
    /// Minimum allowed value.
    pub min: f32,
    /// Maximum allowed value.
    pub max: f32,
    /// Value at construction.
    pub default: f32,
    /// Recommended increment.
    pub step: f32,
    /// Stable id used as the persistence key (e.g. `"amp_gain"`).
    pub string_id: &'static str,
}

impl ParamDescriptor {
    /// Time parameter in milliseconds.
    pub fn time_ms(
        name: &'static str,
        short_name: &'static str,
        min: f32,
        max: f32,
        default: f32,
    ) -> Self {
        Self {
            name,
            short_name,
            unit: ParamUnit::Milliseconds,
            min,
            max,
            default,
            step: 1.0,
            string_id: "",
        }
    }

    /// Gain parameter in decibels.
    pub fn gain_db(
        name: &'static str,
        short_name: &'static str,
        min: f32,
        max: f32,
        default: f32,
    ) -> Self {
        Self {
            name,
            short_name,
            unit: ParamUnit::Decibels,
            min,
            max,
            default,
            step: 0.5,
            string_id: "",
        }
    }

    /// Percentage parameter (0–`max`, step 1).
    pub fn percent(name: &'static str, short_name: &'static str, max: f32, default: f32) -> Self {
        Self {
            name,
            short_name,
            unit: ParamUnit::Percent,
            min: 0.0,
            max,
            default,
            step: 1.0,
            string_id: "",
        }
    }

    /// Unit-interval parameter (0.0–1.0, step 0.01).
    pub fn ratio(name: &'static str, short_name: &'static str, default: f32) -> Self {
        Self {
            name,
            short_name,
            unit: ParamUnit::Ratio,
            min: 0.0,
            max: 1.0,
            default,
            step: 0.01,
            string_id: "",
        }
    }

    /// Sets the stable string id.
    pub const fn with_string_id(mut self, string_id: &'static str) -> Self {
        self.string_id = string_id;
        self
    }

    /// Clamps a value to this parameter's range.
    ///
    /// NaN maps to the default so a corrupt input can never escape the range.
    ///
    /// ```rust
    /// use rack_core::ParamDescriptor;
    ///
    /// let wet = ParamDescriptor::ratio("Wet", "W/D", 1.0);
    /// assert_eq!(wet.clamp(-0.5), 0.0);
    /// assert_eq!(wet.clamp(1.7), 1.0);
    /// assert_eq!(wet.clamp(f32::NAN), 1.0);
    /// ```
    #[inline]
    pub fn clamp(&self, value: f32) -> f32 {
        if value.is_nan() {
            self.default
        } else if value < self.min {
            self.min
        } else if value > self.max {
            self.max
        } else {
            value
        }
    }

    /// Formats a value with the unit suffix, e.g. `"250.0 ms"`.
    pub fn format_value(&self, value: f32) -> String {
        match self.unit {
            ParamUnit::Ratio => format!("{value:.2}"),
            ParamUnit::Percent => format!("{value:.0}%"),
            _ => format!("{value:.1}{}", self.unit.suffix()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct TwoParams {
        values: [f32; 2],
    }

    impl ParameterInfo for TwoParams {
        fn param_count(&self) -> usize {
            2
        }

        fn param_info(&self, index: usize) -> Option<ParamDescriptor> {
            match index {
                0 => Some(ParamDescriptor::time_ms("Time", "Time", 1.0, 100.0, 10.0).with_string_id("t")),
                1 => Some(ParamDescriptor::percent("Amount", "Amt", 100.0, 50.0).with_string_id("a")),
                _ => None,
            }
        }

        fn get_param(&self, index: usize) -> f32 {
            self.values.get(index).copied().unwrap_or(0.0)
        }

        fn set_param(&mut self, index: usize, value: f32) {
            if let Some(desc) = self.param_info(index) {
                self.values[index] = desc.clamp(value);
            }
        }
    }

    #[test]
    fn set_param_clamps_through_descriptor() {
        let mut p = TwoParams { values: [10.0, 50.0] };
        p.set_param(0, 500.0);
        assert_eq!(p.get_param(0), 100.0);
        p.set_param(7, 1.0);
        assert_eq!(p.get_param(7), 0.0);
    }

    #[test]
    fn ratio_defaults() {
        let d = ParamDescriptor::ratio("Gate", "Gate", 0.0);
        assert_eq!((d.min, d.max, d.step), (0.0, 1.0, 0.01));
        assert_eq!(d.unit, ParamUnit::Ratio);
    }

    #[test]
    fn format_values() {
        let t = ParamDescriptor::time_ms("Decay", "Decay", 1.0, 8000.0, 1.0);
        assert_eq!(t.format_value(250.0), "250.0 ms");
        let r = ParamDescriptor::ratio("Wet", "W/D", 1.0);
        assert_eq!(r.format_value(0.5), "0.50");
        let p = ParamDescriptor::percent("Fb", "Fb", 95.0, 40.0);
        assert_eq!(p.format_value(40.0), "40%");
    }
}
