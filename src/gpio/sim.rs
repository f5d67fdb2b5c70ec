//! Ports and RCC simulated in leaked RAM for the host tests
use super::banks::{BankId, BankRegisters, RegisterMap, BANK_COUNT};
use super::reg::RegisterBlock;
use super::GpioBank;
use crate::reg::Reg;
use core::cell::Cell;
use core::mem::size_of;

/// Words in a port register block
pub const PORT_WORDS: usize = 10;

pub const MODER: usize = 0;
pub const OTYPER: usize = 1;
pub const OSPEEDR: usize = 2;
pub const PUPDR: usize = 3;
pub const IDR: usize = 4;
pub const ODR: usize = 5;
pub const AFRL: usize = 8;
pub const AFRH: usize = 9;

/// RAM laid out like a port register block, word by word
pub type SimPort = [Cell<u32>; PORT_WORDS];

pub struct SimChip {
    pub map: RegisterMap,
    pub enable: &'static Reg,
    pub reset: &'static Reg,
    ports: [&'static SimPort; BANK_COUNT],
}

impl SimChip {
    /// Chip where every bank in `banks` is known
    pub fn with_banks(banks: &[BankId]) -> Self {
        assert_eq!(size_of::<RegisterBlock>(), size_of::<SimPort>());
        let enable: &'static Reg = Box::leak(Box::new(Reg::new(0)));
        let reset: &'static Reg = Box::leak(Box::new(Reg::new(0)));
        let ports: [&'static SimPort; BANK_COUNT] = core::array::from_fn(|_| {
            let port: &'static SimPort = Box::leak(Box::new(Default::default()));
            port
        });
        let mut map = RegisterMap::new();
        for &bank in banks {
            map = map.with_bank(
                bank,
                BankRegisters {
                    block: ports[bank as usize] as *const SimPort as usize,
                    enable_reg: enable as *const Reg as usize,
                    enable_bit: 1 << bank as u32,
                    reset_reg: reset as *const Reg as usize,
                    reset_bit: 1 << bank as u32,
                },
            );
        }
        SimChip {
            map,
            enable,
            reset,
            ports,
        }
    }

    pub fn all() -> Self {
        Self::with_banks(&BankId::ALL)
    }

    pub fn bank(&self, bank: BankId) -> GpioBank {
        unsafe { GpioBank::with_map(bank, &self.map) }
    }

    pub fn port(&self, bank: BankId) -> &'static SimPort {
        self.ports[bank as usize]
    }

    /// Snapshot of every register of `bank` plus the RCC registers
    pub fn snapshot(&self, bank: BankId) -> [u32; PORT_WORDS + 2] {
        let port = self.port(bank);
        let mut words = [0; PORT_WORDS + 2];
        for (word, reg) in words.iter_mut().zip(port.iter()) {
            *word = reg.get();
        }
        words[PORT_WORDS] = self.enable.read();
        words[PORT_WORDS + 1] = self.reset.read();
        words
    }

    /// Loop the outputs back to the inputs, as if each pin were only observed
    pub fn loopback(&self, bank: BankId) {
        let port = self.port(bank);
        port[IDR].set(port[ODR].get());
    }
}
