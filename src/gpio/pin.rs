//! # Single-pin view of a bank
//!
//! A [`BankPin`] mutably borrows its [`GpioBank`] and forwards to the pin operations of the
//! bank. It implements the `embedded-hal` digital traits, so one pin can be handed to a driver
//! written against those traits.
//!
//! ```ignore
//! let mut gpioc = GpioBank::new(BankId::C);
//! gpioc.clock_enable();
//! let mut led = gpioc.pin(13).into_push_pull_output();
//! led.set_high().ok();
//! ```
use super::bank::GpioBank;
use super::config::{OutputType, PinConfig, PinMode, Pull};
use core::convert::Infallible;
use embedded_hal::digital::v2::{InputPin, OutputPin, StatefulOutputPin, ToggleableOutputPin};

/// One pin of a [`GpioBank`]
pub struct BankPin<'a> {
    bank: &'a mut GpioBank,
    num: u8,
}

impl<'a> BankPin<'a> {
    pub(super) fn new(bank: &'a mut GpioBank, num: u8) -> Self {
        BankPin { bank, num }
    }

    /// Pin number within the bank
    #[inline]
    pub fn num(&self) -> u8 {
        self.num
    }

    pub fn configure(self, config: &PinConfig) -> Self {
        self.bank.configure_pin(self.num, config);
        self
    }

    pub fn into_floating_input(self) -> Self {
        self.into_input(Pull::None)
    }

    pub fn into_pull_up_input(self) -> Self {
        self.into_input(Pull::Up)
    }

    pub fn into_pull_down_input(self) -> Self {
        self.into_input(Pull::Down)
    }

    pub fn into_push_pull_output(self) -> Self {
        self.into_output(OutputType::PushPull)
    }

    pub fn into_open_drain_output(self) -> Self {
        self.into_output(OutputType::OpenDrain)
    }

    pub fn into_analog(self) -> Self {
        self.bank.set_pin_pupd(self.num, Pull::None);
        self.bank.set_pin_mode(self.num, PinMode::Analog);
        self
    }

    /// Route alternate function `af` to the pin
    pub fn into_alternate(self, af: u8) -> Self {
        self.bank.set_pin_af(self.num, af);
        self.bank.set_pin_mode(self.num, PinMode::Alternate);
        self
    }

    fn into_input(self, pull: Pull) -> Self {
        self.bank.set_pin_pupd(self.num, pull);
        self.bank.set_pin_mode(self.num, PinMode::Input);
        self
    }

    fn into_output(self, otype: OutputType) -> Self {
        self.bank.set_pin_type(self.num, otype);
        self.bank.set_pin_mode(self.num, PinMode::Output);
        self
    }
}

impl InputPin for BankPin<'_> {
    type Error = Infallible;

    #[inline]
    fn is_high(&self) -> Result<bool, Self::Error> {
        Ok(self.bank.read_pin(self.num))
    }

    #[inline]
    fn is_low(&self) -> Result<bool, Self::Error> {
        self.is_high().map(|v| !v)
    }
}

impl OutputPin for BankPin<'_> {
    type Error = Infallible;

    #[inline]
    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.bank.pin_on(self.num);
        Ok(())
    }

    #[inline]
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.bank.pin_off(self.num);
        Ok(())
    }
}

impl StatefulOutputPin for BankPin<'_> {
    #[inline]
    fn is_set_high(&self) -> Result<bool, Self::Error> {
        Ok(self.bank.is_pin_set(self.num))
    }

    #[inline]
    fn is_set_low(&self) -> Result<bool, Self::Error> {
        self.is_set_high().map(|v| !v)
    }
}

impl ToggleableOutputPin for BankPin<'_> {
    type Error = Infallible;

    #[inline]
    fn toggle(&mut self) -> Result<(), Self::Error> {
        self.bank.pin_toggle(self.num);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gpio::banks::BankId;
    use crate::gpio::sim::{SimChip, SimPort, AFRH, AFRL, IDR, MODER, ODR, OTYPER, PUPDR};

    fn sim_bank() -> (GpioBank, &'static SimPort) {
        let chip = SimChip::with_banks(&[BankId::B]);
        (chip.bank(BankId::B), chip.port(BankId::B))
    }

    #[test]
    fn output_traits_drive_odr() {
        let (mut bank, port) = sim_bank();
        let mut pin = bank.pin(5).into_push_pull_output();
        assert_eq!(pin.num(), 5);
        pin.set_high().unwrap();
        assert_eq!(port[ODR].get(), 1 << 5);
        assert!(pin.is_set_high().unwrap());
        pin.toggle().unwrap();
        assert!(pin.is_set_low().unwrap());
        pin.set_low().unwrap();
        assert_eq!(port[ODR].get(), 0);
        assert_eq!(port[MODER].get(), 0b01 << 10);
        assert_eq!(port[OTYPER].get(), 0);
    }

    #[test]
    fn input_traits_read_idr() {
        let (mut bank, port) = sim_bank();
        let pin = bank.pin(12).into_pull_down_input();
        assert_eq!(port[PUPDR].get(), 0b10 << 24);
        assert!(pin.is_low().unwrap());
        port[IDR].set(1 << 12);
        assert!(pin.is_high().unwrap());
    }

    #[test]
    fn mode_helpers() {
        let (mut bank, port) = sim_bank();
        bank.pin(0).into_open_drain_output();
        assert_eq!(port[OTYPER].get(), 1);
        assert_eq!(port[MODER].get(), 0b01);

        bank.pin(9).into_alternate(4);
        assert_eq!(port[AFRH].get(), 4 << 4);
        assert_eq!(port[MODER].get(), 0b01 | (0b10 << 18));

        bank.pin(0).into_analog();
        assert_eq!(port[MODER].get(), 0b11 | (0b10 << 18));

        bank.pin(3).into_pull_up_input();
        assert_eq!(port[PUPDR].get(), 0b01 << 6);
        bank.pin(3).into_floating_input();
        assert_eq!(port[PUPDR].get(), 0);

        bank.pin(7).configure(&PinConfig::alternate(11));
        assert_eq!(port[AFRL].get(), 11 << 28);
    }
}
