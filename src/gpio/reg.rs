use crate::pac::gpioa;

/// Type definition to avoid confusion: all GPIO port register blocks are identical
pub type RegisterBlock = gpioa::RegisterBlock;

//==================================================================================================
//  Field layout
//==================================================================================================

/// Pins per port
pub const PINS_PER_BANK: u8 = 16;

pub(super) const MODE_WIDTH: u32 = 2;
pub(super) const OTYPE_WIDTH: u32 = 1;
pub(super) const SPEED_WIDTH: u32 = 2;
pub(super) const PUPD_WIDTH: u32 = 2;
pub(super) const AF_WIDTH: u32 = 4;

/// Pins covered by each of AFRL and AFRH
pub(super) const PINS_PER_AFR: u8 = 8;

#[inline(always)]
pub(super) fn pin_mask(pin: u8) -> u32 {
    1u32.wrapping_shl(pin as u32)
}

/// Bit offset of a pin's field in a register with fields of `width` bits
#[inline(always)]
pub(super) fn field_offset(pin: u8, width: u32) -> u32 {
    pin as u32 * width
}

/// Mask covering a `width` bit field at bit `offset`. Offsets past the register wrap
#[inline(always)]
pub(super) fn field_mask(offset: u32, width: u32) -> u32 {
    ((1u32 << width) - 1).wrapping_shl(offset)
}

/// Replace one field of a port register, preserving all other fields. Bits of the value beyond
/// the field width are dropped. The read-modify-write runs in a critical section
macro_rules! write_field {
    ($reg:expr, $offset:expr, $width:expr, $value:expr) => {{
        let mask = $crate::gpio::reg::field_mask($offset, $width);
        let value = ($value as u32).wrapping_shl($offset) & mask;
        critical_section::with(|_cs| {
            // Safety: only the bits of this field are changed
            $reg.modify(|r, w| unsafe { w.bits((r.bits() & !mask) | value) });
        });
    }};
}

/// Set, clear or flip the masked bits of a port register in a critical section
macro_rules! modify_bits {
    ($reg:expr, |$r:ident| $new:expr) => {{
        critical_section::with(|_cs| {
            // Safety: every bit pattern is valid for the data and configuration registers
            $reg.modify(|r, w| unsafe {
                let $r = r.bits();
                w.bits($new)
            });
        });
    }};
}

pub(super) use {modify_bits, write_field};
