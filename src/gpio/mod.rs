//! # GPIO module
//!
//! A [`GpioBank`] drives one 16-pin port of the STM32H7. It is created from a [`BankId`], which
//! is resolved through a [`RegisterMap`] to the port registers and the RCC enable/reset bits of
//! the port. Register layouts and addresses come from the [`pac`](crate::pac). The bank
//! implements the shared [`Peripheral`](crate::Peripheral) lifecycle and adds pin-level
//! operations:
//!
//! - single pins: [`read_pin`](GpioBank::read_pin), [`pin_on`](GpioBank::pin_on),
//!   [`pin_off`](GpioBank::pin_off), [`pin_toggle`](GpioBank::pin_toggle)
//! - several pins at once through a mask: [`pins_on`](GpioBank::pins_on),
//!   [`pins_off`](GpioBank::pins_off), [`pins_toggle`](GpioBank::pins_toggle)
//! - electrical configuration: mode, output type, speed, pull resistor and alternate function,
//!   one field at a time or through a [`PinConfig`]
//!
//! A single pin can be borrowed as a [`BankPin`], which implements the `embedded-hal`
//! digital traits.
//!
//! ```ignore
//! let mut gpioa = GpioBank::new(BankId::A);
//! gpioa.clock_enable();
//! gpioa.set_pin_mode(5, PinMode::Output);
//! gpioa.pin_on(5);
//! ```
//!
//! ## Concurrency
//!
//! Every read-modify-write of a register runs inside a critical section, so an interrupt
//! handler touching the same port cannot lose an update. Nothing prevents two banks from being
//! created for the same port. Keep a single owner per port.
mod reg;
pub use reg::{RegisterBlock, PINS_PER_BANK};

mod bank;
pub use bank::GpioBank;

pub mod banks;
pub use banks::{BankId, BankRegisters, RegisterMap};

pub mod config;
pub use config::{OutputType, PinConfig, PinMode, Pull, Speed};

mod pin;
pub use pin::BankPin;

#[cfg(test)]
mod sim;

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GpioError {
    /// The register map has no entry for this bank
    UnknownBank(BankId),
    /// Not a port letter
    InvalidBankLetter(char),
}
