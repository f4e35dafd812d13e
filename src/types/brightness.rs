//! Brightness control for Elgato lights.

use serde::{Deserialize, Serialize};

/// Brightness level from 0 to 100 percent.
#[derive(Default, Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct Brightness {
    pub(crate) value: u8,
}

impl Brightness {
    pub const MIN: u8 = 0;
    pub const MAX: u8 = 100;

    pub fn value(&self) -> u8 {
        self.value
    }

    /// Returns None if value is outside valid range (0-100).
    ///
    /// # Examples
    ///
    /// ```
    /// use elgato_light_rs::Brightness;
    ///
    /// assert!(Brightness::create(-1).is_none());
    /// assert_eq!(Brightness::create(0).unwrap().value(), 0);
    /// assert_eq!(Brightness::create(100).unwrap().value(), 100);
    /// assert!(Brightness::create(101).is_none());
    /// ```
    pub fn create(value: i32) -> Option<Self> {
        u8::try_from(value)
            .ok()
            .filter(|v| (Self::MIN..=Self::MAX).contains(v))
            .map(|value| Brightness { value })
    }
}
