//! Color temperature control and the fixture's temperature encoding.

use serde::{Deserialize, Serialize};

/// Color temperature in Kelvin, with valid values from 2900K to 7000K.
///
/// Lower values produce warmer (more yellow/orange) light, while higher
/// values produce cooler (more blue) light.
///
/// The fixture does not speak Kelvin on the wire. It expects an integer
/// from an empirically fit inverse-power curve, see [`Kelvin::wire`].
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct Kelvin {
    pub(crate) kelvin: u16,
}

impl Default for Kelvin {
    fn default() -> Self {
        Kelvin { kelvin: Self::MIN }
    }
}

impl Kelvin {
    pub const MIN: u16 = 2900;
    pub const MAX: u16 = 7000;

    const WIRE_COEFFICIENT: f64 = 987_007.0;
    const WIRE_EXPONENT: f64 = -0.999;

    /// Get the kelvin value.
    pub fn kelvin(&self) -> u16 {
        self.kelvin
    }

    /// Create a new Kelvin with the given value.
    ///
    /// Returns `None` if value is outside the valid range (2900-7000).
    ///
    /// # Examples
    ///
    /// ```
    /// use elgato_light_rs::Kelvin;
    ///
    /// assert!(Kelvin::create(2899).is_none());
    /// assert!(Kelvin::create(2900).is_some());
    /// assert!(Kelvin::create(7000).is_some());
    /// assert!(Kelvin::create(7001).is_none());
    /// ```
    pub fn create(kelvin: i32) -> Option<Self> {
        u16::try_from(kelvin)
            .ok()
            .filter(|k| (Self::MIN..=Self::MAX).contains(k))
            .map(|kelvin| Kelvin { kelvin })
    }

    /// Encode as the fixture's wire value: `round(987007 * k^-0.999)`.
    ///
    /// # Examples
    ///
    /// ```
    /// use elgato_light_rs::Kelvin;
    ///
    /// assert_eq!(Kelvin::create(2900).unwrap().wire(), 343);
    /// assert_eq!(Kelvin::create(7000).unwrap().wire(), 142);
    /// ```
    pub fn wire(&self) -> u16 {
        let wire = Self::WIRE_COEFFICIENT * f64::from(self.kelvin).powf(Self::WIRE_EXPONENT);
        // Range is bounded by MIN/MAX, so this always fits.
        wire.round_ties_even() as u16
    }

    /// Decode a wire value back to Kelvin, rounded to the nearest 100K.
    ///
    /// This is only an approximate inverse of [`Kelvin::wire`]. The result
    /// is not range checked since it reflects whatever the fixture reports.
    /// Returns `None` for a zero wire value, or one small enough that the
    /// Kelvin value does not fit in a `u16` (wire 1-15).
    ///
    /// # Examples
    ///
    /// ```
    /// use elgato_light_rs::Kelvin;
    ///
    /// assert_eq!(Kelvin::kelvin_from_wire(277), Some(3600));
    /// assert_eq!(Kelvin::kelvin_from_wire(0), None);
    /// assert_eq!(Kelvin::kelvin_from_wire(15), None);
    /// ```
    pub fn kelvin_from_wire(wire: u16) -> Option<u16> {
        if wire == 0 {
            return None;
        }
        let hundreds = (1_000_000.0 / f64::from(wire) / 100.0).round_ties_even();
        u16::try_from(hundreds as u32 * 100).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_encoding_matches_firmware_curve() {
        let cases = [(2900, 343), (3600, 276), (4000, 249), (5000, 199), (6500, 153), (7000, 142)];
        for (kelvin, wire) in cases {
            assert_eq!(Kelvin::create(kelvin).unwrap().wire(), wire, "{kelvin}K");
        }
    }

    #[test]
    fn test_wire_decoding_rounds_to_hundreds() {
        assert_eq!(Kelvin::kelvin_from_wire(143), Some(7000));
        assert_eq!(Kelvin::kelvin_from_wire(344), Some(2900));
        assert_eq!(Kelvin::kelvin_from_wire(250), Some(4000));
        // 1_000_000 / 160 lands exactly on 6250
        assert_eq!(Kelvin::kelvin_from_wire(160), Some(6200));
    }

    #[test]
    fn test_wire_too_small_for_u16_kelvin() {
        assert_eq!(Kelvin::kelvin_from_wire(1), None);
        assert_eq!(Kelvin::kelvin_from_wire(15), None);
        assert_eq!(Kelvin::kelvin_from_wire(16), Some(62500));
    }

    #[test]
    fn test_round_trip_is_within_one_step() {
        for kelvin in (Kelvin::MIN..=Kelvin::MAX).step_by(37) {
            let wire = Kelvin::create(i32::from(kelvin)).unwrap().wire();
            let back = Kelvin::kelvin_from_wire(wire).unwrap();
            assert!(
                back.abs_diff(kelvin) <= 100,
                "{kelvin}K -> {wire} -> {back}K"
            );
        }
    }
}
