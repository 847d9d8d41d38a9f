//! Conversion between the host brightness scale (0-255) and the bus dim
//! level (0-100 percent).
//!
//! The two directions are not exact inverses: a host value can move by up to
//! two steps after a round trip through the bus scale.

use crate::types::{BUS_LEVEL_MAX, HOST_BRIGHTNESS_MAX};

/// Converts a host brightness (0-255) to a bus level (0-100).
///
/// Out-of-range input is clamped first. `None` means "no brightness given"
/// and maps to full level.
pub fn to_bus_level(brightness: Option<i32>) -> u8 {
    let Some(brightness) = brightness else {
        return BUS_LEVEL_MAX;
    };
    let clamped = brightness.clamp(0, i32::from(HOST_BRIGHTNESS_MAX)) as u32;
    let level = div_round_half_even(
        clamped * u32::from(BUS_LEVEL_MAX),
        u32::from(HOST_BRIGHTNESS_MAX),
    );
    level.min(u32::from(BUS_LEVEL_MAX)) as u8
}

/// Converts a bus level (0-100) to a host brightness (0-255).
pub fn to_host_brightness(level: i32) -> u8 {
    let clamped = level.clamp(0, i32::from(BUS_LEVEL_MAX)) as u32;
    let brightness = div_round_half_even(
        clamped * u32::from(HOST_BRIGHTNESS_MAX),
        u32::from(BUS_LEVEL_MAX),
    );
    brightness.min(u32::from(HOST_BRIGHTNESS_MAX)) as u8
}

/// Integer division rounding to nearest, ties to even.
fn div_round_half_even(numerator: u32, denominator: u32) -> u32 {
    let quotient = numerator / denominator;
    let twice_remainder = 2 * (numerator % denominator);
    if twice_remainder > denominator || (twice_remainder == denominator && quotient % 2 == 1) {
        quotient + 1
    } else {
        quotient
    }
}
