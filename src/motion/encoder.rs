// src/motion/encoder.rs - Pulse width to controller count conversion

/// Converts a pulse width in milliseconds into the controller-native on
/// count for the given PWM frequency and counter resolution.
///
/// Period in µs is `1_000_000 / frequency`, so one count lasts
/// `period / resolution` µs. Rounds half away from zero (`f64::round`)
/// before truncating, so a width landing on an X.5 count boundary never
/// silently floors.
///
/// Inputs are not range-checked here; clamping to the valid pulse range is
/// the caller's responsibility.
pub fn pulse_counts(width_ms: f64, frequency_hz: u32, resolution: u32) -> u16 {
    let period_us = 1_000_000.0 / frequency_hz as f64;
    let us_per_count = period_us / resolution as f64;
    (width_ms * 1000.0 / us_per_count).round() as u16
}
