#![cfg_attr(not(test), no_std)]

pub use stm32h7::stm32h743v as pac;

#[macro_use]
mod fmt;

pub mod clock;
pub mod gpio;
pub mod peripheral;
pub mod prelude;
pub mod reg;

pub use peripheral::{Peripheral, PeripheralHandle, PeripheralStatus};
