//! # Shared peripheral lifecycle
//!
//! Every clock-gated, resettable peripheral carries a [`PeripheralHandle`] and implements
//! [`Peripheral`]. Generic code can then move data through any peripheral and drive its
//! lifecycle without knowing the concrete type.
//!
//! The data transfer methods have default bodies which do nothing (or return 0), so a
//! peripheral only overrides what it actually supports. Unsupported calls degrade to harmless
//! defaults instead of failing.
//!
//! A peripheral whose handle is in [`PeripheralStatus::Error`] ignores every call except
//! [`Peripheral::status`].
use crate::clock;
use crate::reg::Reg;

/// Lifecycle state of a peripheral, as far as the driver knows
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PeripheralStatus {
    /// Unusable, e.g. bound to an unknown instance. All operations are no-ops
    #[default]
    Error = 0,
    /// Registers resolved, clock gated off
    Configured = 1,
    /// Clock enabled
    Enabled = 2,
    /// Transfer in progress. Reserved for peripherals with an active transfer state
    Run = 3,
}

impl PeripheralStatus {
    /// Numeric status code
    #[inline]
    pub fn code(self) -> u8 {
        self as u8
    }
}

/// Status and clock/reset wiring shared by all peripherals
#[derive(Default, Clone, Copy)]
pub struct PeripheralHandle {
    status: PeripheralStatus,
    enable_reg: Option<&'static Reg>,
    enable_bit: u32,
    reset_reg: Option<&'static Reg>,
    reset_bit: u32,
}

impl PeripheralHandle {
    /// Handle which is not bound to any hardware. Its status is [`PeripheralStatus::Error`]
    pub const fn unbound() -> Self {
        PeripheralHandle {
            status: PeripheralStatus::Error,
            enable_reg: None,
            enable_bit: 0,
            reset_reg: None,
            reset_bit: 0,
        }
    }

    /// Handle bound to the given enable and reset bits, in [`PeripheralStatus::Configured`]
    pub const fn bound(
        enable_reg: &'static Reg,
        enable_bit: u32,
        reset_reg: &'static Reg,
        reset_bit: u32,
    ) -> Self {
        PeripheralHandle {
            status: PeripheralStatus::Configured,
            enable_reg: Some(enable_reg),
            enable_bit,
            reset_reg: Some(reset_reg),
            reset_bit,
        }
    }

    #[inline]
    pub fn status(&self) -> PeripheralStatus {
        self.status
    }

    #[inline]
    pub fn is_ok(&self) -> bool {
        self.status != PeripheralStatus::Error
    }

    #[inline]
    pub fn enable_bit(&self) -> u32 {
        self.enable_bit
    }

    #[inline]
    pub fn reset_bit(&self) -> u32 {
        self.reset_bit
    }

    /// Set the status. Used by peripherals with states beyond the common lifecycle
    #[inline]
    pub fn set_status(&mut self, status: PeripheralStatus) {
        self.status = status;
    }

    fn clock_enable(&mut self) {
        if !self.is_ok() {
            return;
        }
        if let Some(reg) = self.enable_reg {
            clock::enable_peripheral_clock(reg, self.enable_bit);
        }
        trace!("clock enabled, bit {=u32:#x}", self.enable_bit);
        self.status = PeripheralStatus::Enabled;
    }

    fn reset(&mut self) {
        if !self.is_ok() {
            return;
        }
        if let Some(reg) = self.reset_reg {
            clock::pulse_reset(reg, self.reset_bit);
        }
        trace!("reset pulsed, bit {=u32:#x}", self.reset_bit);
    }

    fn disable(&mut self) {
        if !self.is_ok() {
            return;
        }
        if let Some(reg) = self.enable_reg {
            clock::disable_peripheral_clock(reg, self.enable_bit);
        }
        trace!("clock disabled, bit {=u32:#x}", self.enable_bit);
        self.status = PeripheralStatus::Configured;
    }
}

/// Common contract for peripherals which move data between devices
///
/// Implementers supply access to their [`PeripheralHandle`]. The lifecycle methods work on the
/// handle and should not normally be overridden. The data methods default to no-ops.
pub trait Peripheral {
    fn handle(&self) -> &PeripheralHandle;

    fn handle_mut(&mut self) -> &mut PeripheralHandle;

    /// Read the peripheral's native data word. The default returns 0
    fn read(&mut self) -> u32 {
        0
    }

    /// Write the peripheral's native data word. The default does nothing
    fn write(&mut self, _word: u32) {}

    /// Write several words in order. The default does nothing
    fn stream(&mut self, _words: &[u32]) {}

    /// Enable the peripheral clock. Moves [`PeripheralStatus::Configured`] to
    /// [`PeripheralStatus::Enabled`]
    fn clock_enable(&mut self) {
        self.handle_mut().clock_enable();
    }

    /// Pulse the peripheral reset line. The status is unchanged
    fn reset(&mut self) {
        self.handle_mut().reset();
    }

    /// Gate the peripheral clock off. Moves back to [`PeripheralStatus::Configured`]
    fn disable(&mut self) {
        self.handle_mut().disable();
    }

    fn status(&self) -> PeripheralStatus {
        self.handle().status()
    }

    /// `false` while the peripheral is in [`PeripheralStatus::Error`]
    fn is_ok(&self) -> bool {
        self.handle().is_ok()
    }
}
