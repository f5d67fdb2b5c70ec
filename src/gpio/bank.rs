use super::banks::{BankId, RegisterMap};
use super::config::{OutputType, PinConfig, PinMode, Pull, Speed, MAX_AF};
use super::pin::BankPin;
use super::reg::{
    field_offset, modify_bits, pin_mask, write_field, RegisterBlock, AF_WIDTH, MODE_WIDTH,
    OTYPE_WIDTH, PINS_PER_AFR, PINS_PER_BANK, PUPD_WIDTH, SPEED_WIDTH,
};
use super::GpioError;
use crate::peripheral::{Peripheral, PeripheralHandle};
use crate::reg::Reg;

/// Mask of the 16 data bits of a port
const DATA_MASK: u32 = 0xFFFF;

/// Driver for one 16-pin GPIO port
///
/// All pin numbers must be in `0..16`. They are not checked: an out-of-range pin number writes
/// to unrelated register bits. The same applies to alternate function selectors above 15,
/// except that the excess bits are dropped instead of spilling into the neighbouring pin.
///
/// While the bank is in [`PeripheralStatus::Error`](crate::PeripheralStatus::Error), every
/// operation is a no-op and reads return 0 or `false`.
///
/// Pin operations do not require [`Peripheral::clock_enable`] to have been called. Without the
/// port clock the hardware ignores the writes.
pub struct GpioBank {
    handle: PeripheralHandle,
    bank: Option<BankId>,
    /// Address of the port register block, valid as promised by [`GpioBank::with_map`]
    block: Option<usize>,
}

impl GpioBank {
    /// Bind to a port using the STM32H7 register map
    pub fn new(bank: BankId) -> Self {
        // Safety: the STM32H7 map only contains the chip's own port and RCC addresses
        unsafe { Self::with_map(bank, &RegisterMap::stm32h7()) }
    }

    /// Bind to a port using a custom register map
    ///
    /// If `map` has no entry for `bank`, the returned bank is in
    /// [`PeripheralStatus::Error`](crate::PeripheralStatus::Error).
    ///
    /// # Safety
    ///
    /// Every address in the entry for `bank` must point to memory laid out like the
    /// corresponding registers, valid for the rest of the program. Only one bank should
    /// control a given register block at a time
    pub unsafe fn with_map(bank: BankId, map: &RegisterMap) -> Self {
        let Some(entry) = map.get(bank) else {
            warn!("GPIO bank {} is not in the register map", bank);
            return GpioBank {
                handle: PeripheralHandle::unbound(),
                bank: Some(bank),
                block: None,
            };
        };
        debug!("GPIO bank {} bound at {=usize:#x}", bank, entry.block);
        GpioBank {
            handle: PeripheralHandle::bound(
                Reg::at(entry.enable_reg),
                entry.enable_bit,
                Reg::at(entry.reset_reg),
                entry.reset_bit,
            ),
            bank: Some(bank),
            block: Some(entry.block),
        }
    }

    /// Like [`GpioBank::new`], but report an unknown bank instead of returning a bank in
    /// [`PeripheralStatus::Error`](crate::PeripheralStatus::Error)
    pub fn try_new(bank: BankId) -> Result<Self, GpioError> {
        Self::try_from_map(bank, &RegisterMap::stm32h7())
    }

    fn try_from_map(bank: BankId, map: &RegisterMap) -> Result<Self, GpioError> {
        if !map.contains(bank) {
            return Err(GpioError::UnknownBank(bank));
        }
        // Safety: only called with the built-in chip maps
        Ok(unsafe { Self::with_map(bank, map) })
    }

    /// Bank which is not bound to any port. It stays in
    /// [`PeripheralStatus::Error`](crate::PeripheralStatus::Error)
    pub const fn unbound() -> Self {
        GpioBank {
            handle: PeripheralHandle::unbound(),
            bank: None,
            block: None,
        }
    }

    /// The port this bank was created for
    #[inline]
    pub fn bank(&self) -> Option<BankId> {
        self.bank
    }

    /// Port registers, or `None` while in error state
    #[inline]
    fn regs(&self) -> Option<&RegisterBlock> {
        if !self.handle.is_ok() {
            return None;
        }
        // Safety: the address was handed to `with_map`, whose caller vouches for it
        self.block.map(|addr| unsafe { &*(addr as *const RegisterBlock) })
    }

    //==============================================================================================
    //  Whole-port data
    //==============================================================================================

    /// Level of all 16 input pins
    pub fn read_input(&self) -> u16 {
        self.regs()
            .map(|regs| (regs.idr.read().bits() & DATA_MASK) as u16)
            .unwrap_or(0)
    }

    /// Levels currently driven by the output data register
    pub fn read_output(&self) -> u16 {
        self.regs()
            .map(|regs| (regs.odr.read().bits() & DATA_MASK) as u16)
            .unwrap_or(0)
    }

    /// Drive all 16 pins at once. Pins whose bit is clear are driven low
    pub fn write_output(&mut self, value: u16) {
        if let Some(regs) = self.regs() {
            // Safety: every 16-bit pattern is a valid output level
            regs.odr.write(|w| unsafe { w.bits(value as u32) });
        }
    }

    //==============================================================================================
    //  Pin data
    //==============================================================================================

    pub fn read_pin(&self, pin: u8) -> bool {
        match self.regs() {
            Some(regs) => regs.idr.read().bits() & pin_mask(pin) != 0,
            None => false,
        }
    }

    /// Whether the output data register drives `pin` high
    pub fn is_pin_set(&self, pin: u8) -> bool {
        match self.regs() {
            Some(regs) => regs.odr.read().bits() & pin_mask(pin) != 0,
            None => false,
        }
    }

    #[inline]
    pub fn pin_on(&mut self, pin: u8) {
        self.pins_on_mask(pin_mask(pin));
    }

    /// Drive every pin in `mask` high, leaving the others unaffected
    #[inline]
    pub fn pins_on(&mut self, mask: u16) {
        self.pins_on_mask(mask as u32);
    }

    #[inline]
    pub fn pin_off(&mut self, pin: u8) {
        self.pins_off_mask(pin_mask(pin));
    }

    /// Drive every pin in `mask` low, leaving the others unaffected
    #[inline]
    pub fn pins_off(&mut self, mask: u16) {
        self.pins_off_mask(mask as u32);
    }

    #[inline]
    pub fn pin_toggle(&mut self, pin: u8) {
        self.pins_toggle_mask(pin_mask(pin));
    }

    /// Flip every pin in `mask`, leaving the others unaffected
    #[inline]
    pub fn pins_toggle(&mut self, mask: u16) {
        self.pins_toggle_mask(mask as u32);
    }

    fn pins_on_mask(&mut self, mask: u32) {
        if let Some(regs) = self.regs() {
            modify_bits!(regs.odr, |r| r | mask);
        }
    }

    fn pins_off_mask(&mut self, mask: u32) {
        if let Some(regs) = self.regs() {
            modify_bits!(regs.odr, |r| r & !mask);
        }
    }

    fn pins_toggle_mask(&mut self, mask: u32) {
        if let Some(regs) = self.regs() {
            modify_bits!(regs.odr, |r| r ^ mask);
        }
    }

    //==============================================================================================
    //  Pin configuration
    //==============================================================================================

    pub fn set_pin_mode(&mut self, pin: u8, mode: PinMode) {
        if let Some(regs) = self.regs() {
            write_field!(regs.moder, field_offset(pin, MODE_WIDTH), MODE_WIDTH, mode);
        }
    }

    pub fn set_pin_type(&mut self, pin: u8, otype: OutputType) {
        if let Some(regs) = self.regs() {
            write_field!(regs.otyper, field_offset(pin, OTYPE_WIDTH), OTYPE_WIDTH, otype);
        }
    }

    pub fn set_pin_speed(&mut self, pin: u8, speed: Speed) {
        if let Some(regs) = self.regs() {
            write_field!(regs.ospeedr, field_offset(pin, SPEED_WIDTH), SPEED_WIDTH, speed);
        }
    }

    pub fn set_pin_pupd(&mut self, pin: u8, pull: Pull) {
        if let Some(regs) = self.regs() {
            write_field!(regs.pupdr, field_offset(pin, PUPD_WIDTH), PUPD_WIDTH, pull);
        }
    }

    /// Select alternate function `af` (0-15). Pins 0-7 live in AFRL, pins 8-15 in AFRH
    pub fn set_pin_af(&mut self, pin: u8, af: u8) {
        let Some(regs) = self.regs() else {
            return;
        };
        debug_assert!(af <= MAX_AF);
        if pin < PINS_PER_AFR {
            write_field!(regs.afrl, field_offset(pin, AF_WIDTH), AF_WIDTH, af);
        } else {
            write_field!(
                regs.afrh,
                field_offset(pin - PINS_PER_AFR, AF_WIDTH),
                AF_WIDTH,
                af
            );
        }
    }

    /// Apply a complete [`PinConfig`]. The mode is written last, so the pin only switches to
    /// output or alternate function once its electrical settings are in place
    pub fn configure_pin(&mut self, pin: u8, config: &PinConfig) {
        self.set_pin_type(pin, config.otype);
        self.set_pin_speed(pin, config.speed);
        self.set_pin_pupd(pin, config.pull);
        if let Some(af) = config.af {
            self.set_pin_af(pin, af);
        }
        self.set_pin_mode(pin, config.mode);
    }

    /// Borrow a single pin, e.g. to hand it to a driver expecting the `embedded-hal` traits
    pub fn pin(&mut self, pin: u8) -> BankPin<'_> {
        debug_assert!(pin < PINS_PER_BANK);
        BankPin::new(self, pin)
    }
}

impl Default for GpioBank {
    fn default() -> Self {
        Self::unbound()
    }
}

impl Peripheral for GpioBank {
    fn handle(&self) -> &PeripheralHandle {
        &self.handle
    }

    fn handle_mut(&mut self) -> &mut PeripheralHandle {
        &mut self.handle
    }

    /// All 16 input pins, zero-extended
    fn read(&mut self) -> u32 {
        self.read_input() as u32
    }

    /// Drive all 16 pins from the low half of `word`
    fn write(&mut self, word: u32) {
        self.write_output((word & DATA_MASK) as u16);
    }

    /// Write each word in turn, without any delay in between
    fn stream(&mut self, words: &[u32]) {
        if !self.handle.is_ok() {
            return;
        }
        trace!("streaming {=usize} words", words.len());
        for &word in words {
            Peripheral::write(self, word);
        }
    }
}
