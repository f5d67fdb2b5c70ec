//! # Raw register words
//!
//! [`PeripheralHandle`](crate::PeripheralHandle) keeps the clock enable and reset registers of a
//! peripheral as plain addresses, because they live in different RCC registers depending on
//! the bus of the peripheral. [`Reg`] gives volatile access to such a word. Every
//! read-modify-write runs inside a [`critical_section`] so that an interrupt handler touching
//! the same register cannot lose an update between the read and the write.
use core::cell::UnsafeCell;

/// A 32-bit read-write register addressed by its raw address
#[repr(transparent)]
pub struct Reg {
    value: UnsafeCell<u32>,
}

// NOTE(unsafe) all accesses are volatile word accesses, and modifications are serialized by a
// critical section
unsafe impl Sync for Reg {}

impl Reg {
    /// Create a register holding `value`. Only useful for registers simulated in RAM
    pub const fn new(value: u32) -> Self {
        Reg {
            value: UnsafeCell::new(value),
        }
    }

    /// Turn a raw address into a register reference
    ///
    /// # Safety
    ///
    /// `addr` must be the word-aligned address of a register (or register sized memory) that
    /// stays valid for the rest of the program
    #[inline(always)]
    pub unsafe fn at(addr: usize) -> &'static Reg {
        &*(addr as *const Reg)
    }

    #[inline(always)]
    pub fn read(&self) -> u32 {
        // Safety: the cell points to a valid, aligned word
        unsafe { self.value.get().read_volatile() }
    }

    #[inline(always)]
    pub fn write(&self, value: u32) {
        unsafe { self.value.get().write_volatile(value) }
    }

    /// Read-modify-write with the new value computed by `f`
    #[inline]
    pub fn modify<F: FnOnce(u32) -> u32>(&self, f: F) {
        critical_section::with(|_cs| self.write(f(self.read())));
    }

    #[inline]
    pub fn set_bits(&self, mask: u32) {
        self.modify(|r| r | mask);
    }

    #[inline]
    pub fn clear_bits(&self, mask: u32) {
        self.modify(|r| r & !mask);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bit_helpers_touch_only_masked_bits() {
        let reg = Reg::new(0b1010);
        reg.set_bits(0b0101);
        assert_eq!(reg.read(), 0b1111);
        reg.clear_bits(0b0011);
        assert_eq!(reg.read(), 0b1100);
        reg.modify(|r| r ^ 0b1001);
        assert_eq!(reg.read(), 0b0101);
    }

    #[test]
    fn register_at_address_aliases_memory() {
        let backing: &'static Reg = Box::leak(Box::new(Reg::new(7)));
        let alias = unsafe { Reg::at(backing as *const Reg as usize) };
        alias.write(42);
        assert_eq!(backing.read(), 42);
    }
}
