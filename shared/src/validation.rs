//! Input validation functions
//!
//! Light shape checks for user supplied values. Request types run their
//! `validator` derives first and then these, naming the offending field.

/// Validate that a name-like field is not blank
pub fn validate_not_blank(value: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        return Err("Value cannot be blank".to_string());
    }
    Ok(())
}

/// Validate age in years
pub fn validate_age(age: u32) -> Result<(), String> {
    if age < 1 {
        return Err("Age must be at least 1 year".to_string());
    }
    if age > 150 {
        return Err("Age cannot exceed 150 years".to_string());
    }
    Ok(())
}

/// Validate a body measurement (height in cm, weight in kg)
pub fn validate_measurement(value: f64) -> Result<(), String> {
    if value.is_nan() || value.is_infinite() {
        return Err("Measurement must be a valid number".to_string());
    }
    if value <= 0.0 {
        return Err("Measurement must be greater than zero".to_string());
    }
    Ok(())
}

/// Validate calories and macronutrient amounts
pub fn validate_non_negative(value: f64) -> Result<(), String> {
    if value.is_nan() || value.is_infinite() {
        return Err("Value must be a valid number".to_string());
    }
    if value < 0.0 {
        return Err("Value cannot be negative".to_string());
    }
    Ok(())
}

/// Validate duration in minutes
pub fn validate_duration_minutes(minutes: u32) -> Result<(), String> {
    if minutes > 1440 {
        return Err("Duration cannot exceed 24 hours".to_string());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_validate_not_blank() {
        assert!(validate_not_blank("John Doe").is_ok());
        assert!(validate_not_blank("").is_err());
        assert!(validate_not_blank("   ").is_err());
    }

    #[test]
    fn test_validate_age() {
        assert!(validate_age(28).is_ok());
        assert!(validate_age(0).is_err());
        assert!(validate_age(151).is_err());
    }

    #[test]
    fn test_validate_measurement() {
        assert!(validate_measurement(175.0).is_ok());
        assert!(validate_measurement(0.0).is_err());
        assert!(validate_measurement(-70.0).is_err());
        assert!(validate_measurement(f64::NAN).is_err());
    }

    #[test]
    fn test_validate_non_negative() {
        assert!(validate_non_negative(0.0).is_ok());
        assert!(validate_non_negative(350.5).is_ok());
        assert!(validate_non_negative(-1.0).is_err());
        assert!(validate_non_negative(f64::INFINITY).is_err());
    }

    #[test]
    fn test_validate_duration_minutes() {
        assert!(validate_duration_minutes(0).is_ok());
        assert!(validate_duration_minutes(1440).is_ok());
        assert!(validate_duration_minutes(1441).is_err());
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Property: any finite non-negative amount is accepted
        #[test]
        fn prop_non_negative_accepts_valid(value in 0.0f64..100_000.0) {
            prop_assert!(validate_non_negative(value).is_ok());
        }
    }
}
