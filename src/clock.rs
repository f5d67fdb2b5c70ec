//! # Reset and clock control (RCC) boundary
//!
//! Only the AHB4 enable and reset registers are touched here. GPIO ports hang off AHB4 on the
//! STM32H7, each port owning one enable bit and one reset bit. The addresses come from the PAC.
use crate::pac::{self, rcc};
use crate::reg::Reg;
use core::mem::offset_of;

/// Address of the AHB4 peripheral clock enable register
pub fn ahb4enr() -> usize {
    pac::RCC::ptr() as usize + offset_of!(rcc::RegisterBlock, ahb4enr)
}

/// Address of the AHB4 peripheral reset register
pub fn ahb4rstr() -> usize {
    pac::RCC::ptr() as usize + offset_of!(rcc::RegisterBlock, ahb4rstr)
}

pub fn enable_peripheral_clock(enable_reg: &Reg, bit: u32) {
    enable_reg.set_bits(bit);
}

pub fn disable_peripheral_clock(enable_reg: &Reg, bit: u32) {
    enable_reg.clear_bits(bit);
}

/// Set the reset bit and clear it again right away. The peripheral registers return to their
/// reset values, the bit itself is left cleared
pub fn pulse_reset(reset_reg: &Reg, bit: u32) {
    reset_reg.set_bits(bit);
    reset_reg.clear_bits(bit);
}
