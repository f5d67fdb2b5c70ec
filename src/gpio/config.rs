//! # Electrical pin configuration
//!
//! The enums carry the register encodings of the STM32H7 port configuration fields. A
//! [`PinConfig`] bundles all of them, and can be applied in one go with
//! [`GpioBank::configure_pin`](super::GpioBank::configure_pin).

/// Port mode (MODER), 2 bits per pin
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinMode {
    /// Reset state
    #[default]
    Input = 0b00,
    Output = 0b01,
    Alternate = 0b10,
    Analog = 0b11,
}

/// Output type (OTYPER), 1 bit per pin. Only relevant for output and alternate function modes
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OutputType {
    #[default]
    PushPull = 0,
    OpenDrain = 1,
}

/// Output slew speed (OSPEEDR), 2 bits per pin
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Speed {
    #[default]
    Low = 0b00,
    Medium = 0b01,
    High = 0b10,
    VeryHigh = 0b11,
}

/// Pull resistor (PUPDR), 2 bits per pin. `0b11` is reserved
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Pull {
    #[default]
    None = 0b00,
    Up = 0b01,
    Down = 0b10,
}

/// Highest alternate function selector
pub const MAX_AF: u8 = 15;

/// Complete configuration of one pin
///
/// `af` is only written when set. It selects which peripheral drives the pin in
/// [`PinMode::Alternate`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PinConfig {
    pub mode: PinMode,
    pub otype: OutputType,
    pub speed: Speed,
    pub pull: Pull,
    pub af: Option<u8>,
}

impl PinConfig {
    pub fn floating_input() -> Self {
        Self::default()
    }

    pub fn push_pull_output() -> Self {
        Self::default().mode(PinMode::Output)
    }

    pub fn open_drain_output() -> Self {
        Self::push_pull_output().otype(OutputType::OpenDrain)
    }

    /// Alternate function `af`, push-pull
    pub fn alternate(af: u8) -> Self {
        Self::default().mode(PinMode::Alternate).af(af)
    }

    pub fn analog() -> Self {
        Self::default().mode(PinMode::Analog)
    }

    pub fn mode(mut self, mode: PinMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn otype(mut self, otype: OutputType) -> Self {
        self.otype = otype;
        self
    }

    pub fn speed(mut self, speed: Speed) -> Self {
        self.speed = speed;
        self
    }

    pub fn pull(mut self, pull: Pull) -> Self {
        self.pull = pull;
        self
    }

    pub fn pull_up(self) -> Self {
        self.pull(Pull::Up)
    }

    pub fn pull_down(self) -> Self {
        self.pull(Pull::Down)
    }

    pub fn af(mut self, af: u8) -> Self {
        self.af = Some(af);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodings() {
        assert_eq!(PinMode::Input as u32, 0);
        assert_eq!(PinMode::Output as u32, 1);
        assert_eq!(PinMode::Alternate as u32, 2);
        assert_eq!(PinMode::Analog as u32, 3);
        assert_eq!(OutputType::OpenDrain as u32, 1);
        assert_eq!(Speed::VeryHigh as u32, 3);
        assert_eq!(Pull::Up as u32, 1);
        assert_eq!(Pull::Down as u32, 2);
    }

    #[test]
    fn builder() {
        let cfg = PinConfig::alternate(7).speed(Speed::High).pull_up();
        assert_eq!(
            cfg,
            PinConfig {
                mode: PinMode::Alternate,
                otype: OutputType::PushPull,
                speed: Speed::High,
                pull: Pull::Up,
                af: Some(7),
            }
        );
        assert_eq!(PinConfig::floating_input().mode, PinMode::Input);
        assert_eq!(PinConfig::open_drain_output().otype, OutputType::OpenDrain);
        assert_eq!(PinConfig::analog().af, None);
    }
}
