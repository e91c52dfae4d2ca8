use crate::utils::error::{ChartError, Result};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(ChartError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(ChartError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_positive_number(field_name: &str, value: usize, min_value: usize) -> Result<()> {
    if value < min_value {
        return Err(ChartError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ChartError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_finite(field_name: &str, value: f64) -> Result<()> {
    if !value.is_finite() {
        return Err(ChartError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value must be a finite number".to_string(),
        });
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    // Written as a negated containment so NaN is rejected too.
    if !(value >= min && value <= max) {
        return Err(ChartError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

/// Parses a `#rrggbb` color into its channels.
pub fn parse_hex_color(field_name: &str, value: &str) -> Result<(u8, u8, u8)> {
    let invalid = |reason: &str| ChartError::InvalidConfigValueError {
        field: field_name.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    };

    let hex = value
        .strip_prefix('#')
        .ok_or_else(|| invalid("Color must start with '#'"))?;
    if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(invalid("Color must have the form #rrggbb"));
    }

    let channel = |i: usize| {
        u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid("Invalid hex digit"))
    };
    Ok((channel(0)?, channel(2)?, channel(4)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_path() {
        assert!(validate_path("export.chart_file", "chart.png").is_ok());
        assert!(validate_path("export.chart_file", "").is_err());
        assert!(validate_path("export.chart_file", "bad\0path").is_err());
    }

    #[test]
    fn test_validate_positive_number() {
        assert!(validate_positive_number("segments[0].count", 5, 1).is_ok());
        assert!(validate_positive_number("segments[0].count", 0, 1).is_err());
    }

    #[test]
    fn test_validate_range_rejects_nan() {
        assert!(validate_range("chart.box_width", 0.6, 0.0, 1.0).is_ok());
        assert!(validate_range("chart.box_width", 1.5, 0.0, 1.0).is_err());
        assert!(validate_range("chart.box_width", f64::NAN, 0.0, 1.0).is_err());
    }

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(parse_hex_color("c", "#66c2a5").unwrap(), (0x66, 0xc2, 0xa5));
        assert_eq!(parse_hex_color("c", "#FC8D62").unwrap(), (0xfc, 0x8d, 0x62));
        assert!(parse_hex_color("c", "66c2a5").is_err());
        assert!(parse_hex_color("c", "#66c2a").is_err());
        assert!(parse_hex_color("c", "#gggggg").is_err());
    }
}
