//! Attribute keys and tolerant value parsing.
//!
//! Saved state comes from files written by other versions or edited by hand,
//! so parsers return `None` instead of failing. Callers keep their prior value
//! on `None`.

/// Attribute keys of a saved slot. These names are part of the file format.
pub mod slot_keys {
    /// `1` when the effect is enabled, `0` when bypassed.
    pub const ON: &str = "on";
    /// Wet/dry mix in `[0, 1]`.
    pub const WET: &str = "wet";
    /// Decay time in milliseconds.
    pub const AUTOQUIT: &str = "autoquit";
    /// Noise-floor gate in `[0, 1]`.
    pub const GATE: &str = "gate";
    /// Tag of the slot element itself.
    pub const SLOT_TAG: &str = "slot";
}

/// Parse a boolean attribute.
///
/// Accepts `true`/`false` (any case) and integers, where any nonzero integer
/// is `true`.
pub fn parse_bool_attr(value: &str) -> Option<bool> {
    let value = value.trim();
    if value.eq_ignore_ascii_case("true") {
        return Some(true);
    }
    if value.eq_ignore_ascii_case("false") {
        return Some(false);
    }
    value.parse::<i64>().ok().map(|n| n != 0)
}

/// Parse a finite float attribute.
pub fn parse_float_attr(value: &str) -> Option<f32> {
    value
        .trim()
        .parse::<f32>()
        .ok()
        .filter(|v| v.is_finite())
}

/// Format a float for storage. Integral values print without a fraction.
pub fn format_float_attr(value: f32) -> String {
    format!("{value}")
}

/// Format a boolean the way slot files store it.
pub fn format_bool_attr(value: bool) -> String {
    if value { "1" } else { "0" }.to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bool_forms() {
        assert_eq!(parse_bool_attr("1"), Some(true));
        assert_eq!(parse_bool_attr("0"), Some(false));
        assert_eq!(parse_bool_attr(" TRUE "), Some(true));
        assert_eq!(parse_bool_attr("false"), Some(false));
        assert_eq!(parse_bool_attr("-3"), Some(true));
        assert_eq!(parse_bool_attr("yes"), None);
        assert_eq!(parse_bool_attr(""), None);
    }

    #[test]
    fn float_forms() {
        assert_eq!(parse_float_attr("0.5"), Some(0.5));
        assert_eq!(parse_float_attr(" 100 "), Some(100.0));
        assert_eq!(parse_float_attr("1e3"), Some(1000.0));
        assert_eq!(parse_float_attr("NaN"), None);
        assert_eq!(parse_float_attr("inf"), None);
        assert_eq!(parse_float_attr("loud"), None);
    }

    #[test]
    fn formatting() {
        assert_eq!(format_float_attr(100.0), "100");
        assert_eq!(format_float_attr(0.25), "0.25");
        assert_eq!(format_bool_attr(true), "1");
        assert_eq!(format_bool_attr(false), "0");
    }
}
