//! Unit conversions at the engine boundary
//!
//! The engine works in K, V/m and m throughout; callers usually speak °C,
//! MV/m and µm.

use crate::constants::KELVIN_OFFSET;

pub fn kelvin_to_celsius(t_k: f64) -> f64 {
    t_k - KELVIN_OFFSET
}

pub fn celsius_to_kelvin(t_c: f64) -> f64 {
    t_c + KELVIN_OFFSET
}

pub fn mv_per_m_to_v_per_m(e_mv_m: f64) -> f64 {
    e_mv_m * 1e6
}

pub fn v_per_m_to_mv_per_m(e_v_m: f64) -> f64 {
    e_v_m / 1e6
}

pub fn um_to_m(r_um: f64) -> f64 {
    r_um * 1e-6
}

pub fn m_to_um(r_m: f64) -> f64 {
    r_m * 1e6
}

/// Axis ticks every 200 °C inside a Kelvin range, returned in Kelvin
pub fn temperature_ticks(t_min: f64, t_max: f64) -> Vec<f64> {
    let start = (kelvin_to_celsius(t_min) / 200.0).ceil() as i64;
    let stop = (kelvin_to_celsius(t_max) / 200.0).floor() as i64;
    (start..=stop)
        .map(|i| celsius_to_kelvin(i as f64 * 200.0))
        .collect()
}

/// Standard 800/1000/1200 °C annotation markers inside a Kelvin range
pub fn temperature_markers(t_min: f64, t_max: f64) -> Vec<f64> {
    [800.0, 1000.0, 1200.0]
        .into_iter()
        .map(celsius_to_kelvin)
        .filter(|t| (t_min..=t_max).contains(t))
        .collect()
}
