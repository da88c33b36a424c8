//! Built-in demo functions.

use dynamo_application::{ApplicationResult, CssFunction, Engine, FunctionHandle, from_sync};

/// Value written for `--blurple`.
pub const BLURPLE: &str = "#7289DA";

/// Resolves `--blurple` to [`BLURPLE`].
#[must_use]
pub fn blurple() -> impl CssFunction {
    from_sync(|variable, context| {
        if variable == "--blurple" {
            context.set_value(BLURPLE);
        }
        Ok(None)
    })
}

/// Resolves `--color_hex--<digits>` to `#<digits>`.
///
/// Variables whose `hex` property is not a 3, 4, 6 or 8 digit hex string are
/// left untouched.
#[must_use]
pub fn hex_color() -> impl CssFunction {
    from_sync(|_, context| {
        let Some(variable) = context.parsed() else {
            return Ok(None);
        };
        if let Some(hex) = variable.property("hex")
            && variable.is_named("color")
            && is_hex_color(hex)
        {
            context.set_value(format!("#{hex}"));
        }
        Ok(None)
    })
}

/// Returns true for 3, 4, 6 or 8 ASCII hex digits.
#[must_use]
pub fn is_hex_color(digits: &str) -> bool {
    matches!(digits.len(), 3 | 4 | 6 | 8) && digits.chars().all(|c| c.is_ascii_hexdigit())
}

/// Registers [`blurple`] as `blurple` and [`hex_color`] as `color`.
///
/// # Errors
///
/// Propagates registration failures from the engine.
pub fn register_defaults(engine: &Engine) -> ApplicationResult<Vec<FunctionHandle>> {
    Ok(vec![
        engine.register_function("blurple", blurple())?,
        engine.register_function("color", hex_color())?,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_hex_color() {
        for valid in ["fff", "FFFA", "7289da", "7289DAff"] {
            assert!(is_hex_color(valid), "{valid}");
        }
        for invalid in ["", "ff", "fffff", "fffffff", "zzz", "12345g", "fffffffff"] {
            assert!(!is_hex_color(invalid), "{invalid}");
        }
    }
}
