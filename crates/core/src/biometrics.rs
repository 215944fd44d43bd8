//! Biometric calculators used when saving intake data.

/// Body mass index (kg / m²), rounded to two decimal places.
pub fn bmi(weight_kg: f64, height_cm: f64) -> f64 {
    let height_m = height_cm / 100.0;
    let raw = weight_kg / (height_m * height_m);
    (raw * 100.0).round() / 100.0
}

/// Recommended daily water intake in liters: 35 ml per kg of body weight,
/// rounded to one decimal place.
pub fn water_intake_liters(weight_kg: f64) -> f64 {
    (weight_kg * 0.035 * 10.0).round() / 10.0
}

/// Basal metabolic rate via the Mifflin-St Jeor equation, rounded to the
/// nearest kcal.
pub fn bmr(weight_kg: f64, height_cm: f64, age: i32, is_female: bool) -> i32 {
    let base = 10.0 * weight_kg + 6.25 * height_cm - 5.0 * f64::from(age);
    let adjusted = if is_female { base - 161.0 } else { base + 5.0 };
    adjusted.round() as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bmi_matches_known_values() {
        assert_eq!(bmi(70.0, 175.0), 22.86);
        assert_eq!(bmi(90.0, 160.0), 35.16);
    }

    #[test]
    fn water_intake_is_35ml_per_kg() {
        assert_eq!(water_intake_liters(70.0), 2.5);
        assert_eq!(water_intake_liters(58.0), 2.0);
    }

    #[test]
    fn bmr_applies_sex_offset() {
        // 70kg, 165cm, 35y female: 700 + 1031.25 - 175 - 161 = 1395.25 -> 1395
        assert_eq!(bmr(70.0, 165.0, 35, true), 1395);
        // Same male: +5 instead of -161
        assert_eq!(bmr(70.0, 165.0, 35, false), 1561);
    }
}
