use memedit::MemorySource;
use std::ops::Range;
use tracing::debug;

/// Size of the boot ROM
pub const ROM_SIZE: usize = 0x100;
/// Size of the whole bus address space, backed by RAM
pub const RAM_SIZE: usize = 0x10000;
/// I/O register page, highlighted in the editors
pub const IO_REGISTERS: Range<usize> = 0xFF00..0xFF80;

/// Memory map of the machine: ROM overlays the bottom of the address space, RAM backs the rest
#[derive(Debug, Clone)]
pub struct GbMemory {
    pub rom: Vec<u8>,
    pub ram: Vec<u8>,
}

impl Default for GbMemory {
    fn default() -> Self {
        Self {
            rom: vec![0; ROM_SIZE],
            ram: vec![0; RAM_SIZE],
        }
    }
}

impl GbMemory {
    /// Read a byte through the bus
    pub fn read(&self, address: u16) -> u8 {
        let addr = usize::from(address);
        self.rom
            .get(addr)
            .or_else(|| self.ram.get(addr))
            .copied()
            .unwrap_or(0xFF)
    }

    /// Write a byte through the bus. Writes to the ROM area are rejected.
    pub fn write(&mut self, address: u16, value: u8) -> bool {
        let addr = usize::from(address);
        if addr < self.rom.len() {
            debug!("Rejected write of 0x{value:02X} to ROM at 0x{addr:04X}");
            return false;
        }

        self.ram.get_mut(addr).is_some_and(|byte| {
            *byte = value;
            true
        })
    }

    pub fn clear_ram(&mut self) {
        self.ram.fill(0);
    }
}

#[allow(clippy::cast_possible_truncation)]
impl MemorySource for GbMemory {
    fn read_byte(&self, addr: usize) -> u8 {
        self.read(addr as u16)
    }

    fn write_byte(&mut self, addr: usize, value: u8) {
        self.write(addr as u16, value);
    }

    fn is_highlighted(&self, addr: usize) -> bool {
        IO_REGISTERS.contains(&addr)
    }
}
