//! # GPIO bank identifiers and register map
//!
//! A [`RegisterMap`] resolves a [`BankId`] to the addresses a [`GpioBank`](super::GpioBank)
//! needs: the port register block plus the clock enable and reset bits in the RCC. The map is
//! plain data, so supporting another bank or chip variant means adding a table entry.
use super::GpioError;
use crate::clock;
use crate::pac;
use paste::paste;

/// Addresses and bits resolved for one bank
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BankRegisters {
    /// Base address of the port register block
    pub block: usize,
    pub enable_reg: usize,
    pub enable_bit: u32,
    pub reset_reg: usize,
    pub reset_bit: u32,
}

impl BankRegisters {
    /// Registers of an STM32H7 port clocked from AHB4. The GPIOxEN and GPIOxRST bits sit at
    /// the port index in AHB4ENR and AHB4RSTR
    pub fn ahb4(bank: BankId) -> Self {
        let index = bank as u32;
        BankRegisters {
            block: bank.block_address(),
            enable_reg: clock::ahb4enr(),
            enable_bit: 1 << index,
            reset_reg: clock::ahb4rstr(),
            reset_bit: 1 << index,
        }
    }
}

macro_rules! banks {
    ($($Bank:ident: $index:literal,)+) => {
        paste! {
            /// Physical GPIO port
            #[derive(Debug, Clone, Copy, PartialEq, Eq)]
            #[cfg_attr(feature = "defmt", derive(defmt::Format))]
            pub enum BankId {
                $(
                    #[doc = "GPIO port " $Bank]
                    $Bank = $index,
                )+
            }

            impl BankId {
                pub const ALL: [BankId; BANK_COUNT] = [$(BankId::$Bank,)+];

                /// Port letter, e.g. `'A'`
                pub fn letter(self) -> char {
                    match self {
                        $(BankId::$Bank => stringify!($Bank).as_bytes()[0] as char,)+
                    }
                }

                /// Base address of the port register block, taken from the PAC
                pub fn block_address(self) -> usize {
                    match self {
                        $(BankId::$Bank => pac::[<GPIO $Bank>]::ptr() as usize,)+
                    }
                }
            }

            impl RegisterMap {
                /// Register map of the STM32H7 GPIO ports
                pub fn stm32h7() -> Self {
                    RegisterMap::new()
                        $(.with_bank(BankId::$Bank, BankRegisters::ahb4(BankId::$Bank)))+
                }
            }
        }
    };
}

/// Number of ports a [`RegisterMap`] can describe
pub const BANK_COUNT: usize = 11;

banks!(
    A: 0,
    B: 1,
    C: 2,
    D: 3,
    E: 4,
    F: 5,
    G: 6,
    H: 7,
    I: 8,
    J: 9,
    K: 10,
);

impl TryFrom<char> for BankId {
    type Error = GpioError;

    /// Parse a port letter, case insensitive
    fn try_from(letter: char) -> Result<Self, Self::Error> {
        let upper = letter.to_ascii_uppercase();
        BankId::ALL
            .into_iter()
            .find(|bank| bank.letter() == upper)
            .ok_or(GpioError::InvalidBankLetter(letter))
    }
}

/// Lookup table from [`BankId`] to [`BankRegisters`]
///
/// Banks without an entry are unknown. Binding a [`GpioBank`](super::GpioBank) to an unknown
/// bank leaves it in [`PeripheralStatus::Error`](crate::PeripheralStatus::Error).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegisterMap {
    banks: [Option<BankRegisters>; BANK_COUNT],
}

impl RegisterMap {
    /// Empty map where every bank is unknown
    pub const fn new() -> Self {
        RegisterMap {
            banks: [None; BANK_COUNT],
        }
    }

    /// Add or replace the entry for `bank`
    pub const fn with_bank(mut self, bank: BankId, regs: BankRegisters) -> Self {
        self.banks[bank as usize] = Some(regs);
        self
    }

    #[inline]
    pub fn get(&self, bank: BankId) -> Option<BankRegisters> {
        self.banks[bank as usize]
    }

    #[inline]
    pub fn contains(&self, bank: BankId) -> bool {
        self.get(bank).is_some()
    }
}

impl Default for RegisterMap {
    fn default() -> Self {
        Self::new()
    }
}
