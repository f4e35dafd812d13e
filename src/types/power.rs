//! Power mode for light control.

/// Power state for a light.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerMode {
    /// Turn the light on
    On,
    /// Turn the light off
    Off,
}

impl PowerMode {
    /// The 0/1 flag the fixture uses for `on`.
    pub fn value(&self) -> u8 {
        match self {
            PowerMode::On => 1,
            PowerMode::Off => 0,
        }
    }
}
