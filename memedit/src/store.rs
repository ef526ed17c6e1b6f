//! Backing store capability.
//!
//! The editor never owns the bytes it shows. It reads and writes them one at a time through
//! [`MemorySource`], so a store can apply memory-mapped side effects on access.

use std::fmt;
use std::rc::Rc;

/// Byte-addressable store viewed by the editor
pub trait MemorySource {
    /// Read the byte at `addr`. Only called with `addr < mem_size`.
    fn read_byte(&self, addr: usize) -> u8;

    /// Write `value` at `addr`. Only called with `addr < mem_size`.
    fn write_byte(&mut self, addr: usize, value: u8);

    /// Extra, non-contiguous highlighting on top of the editor's own highlight range
    fn is_highlighted(&self, _addr: usize) -> bool {
        false
    }
}

impl MemorySource for [u8] {
    fn read_byte(&self, addr: usize) -> u8 {
        self[addr]
    }

    fn write_byte(&mut self, addr: usize, value: u8) {
        self[addr] = value;
    }
}

impl MemorySource for Vec<u8> {
    fn read_byte(&self, addr: usize) -> u8 {
        self[addr]
    }

    fn write_byte(&mut self, addr: usize, value: u8) {
        self[addr] = value;
    }
}

pub type ReadFn = Rc<dyn Fn(&[u8], usize) -> u8>;
pub type WriteFn = Rc<dyn Fn(&mut [u8], usize, u8)>;
pub type HighlightFn = Rc<dyn Fn(&[u8], usize) -> bool>;

/// Optional handlers used instead of direct indexing into a byte slice
#[derive(Clone, Default)]
pub struct MemoryHooks {
    pub read: Option<ReadFn>,
    pub write: Option<WriteFn>,
    pub highlight: Option<HighlightFn>,
}

impl fmt::Debug for MemoryHooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryHooks")
            .field("read", &self.read.is_some())
            .field("write", &self.write.is_some())
            .field("highlight", &self.highlight.is_some())
            .finish()
    }
}

/// Plain byte slice routed through [`MemoryHooks`]. Missing hooks fall back to indexing.
pub struct HookedSlice<'a> {
    data: &'a mut [u8],
    hooks: &'a MemoryHooks,
}

impl<'a> HookedSlice<'a> {
    pub const fn new(data: &'a mut [u8], hooks: &'a MemoryHooks) -> Self {
        Self { data, hooks }
    }

    pub const fn len(&self) -> usize {
        self.data.len()
    }

    pub const fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl MemorySource for HookedSlice<'_> {
    fn read_byte(&self, addr: usize) -> u8 {
        self.hooks
            .read
            .as_ref()
            .map_or_else(|| self.data[addr], |read| read(&*self.data, addr))
    }

    fn write_byte(&mut self, addr: usize, value: u8) {
        match self.hooks.write.as_ref() {
            Some(write) => write(&mut *self.data, addr, value),
            None => self.data[addr] = value,
        }
    }

    fn is_highlighted(&self, addr: usize) -> bool {
        self.hooks
            .highlight
            .as_ref()
            .is_some_and(|highlight| highlight(&*self.data, addr))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_slice_passthrough() {
        let mut data = vec![0u8; 4];
        let mem: &mut [u8] = &mut data;

        mem.write_byte(2, 0xAB);

        assert_eq!(mem.read_byte(2), 0xAB);
        assert!(!mem.is_highlighted(2));
    }

    #[test]
    fn test_hooks_override_access() {
        // Arrange
        let writes = Rc::new(Cell::new(0));
        let counter = writes.clone();
        let hooks = MemoryHooks {
            read: Some(Rc::new(|data: &[u8], addr: usize| data[addr] ^ 0xFF)),
            write: Some(Rc::new(move |data: &mut [u8], addr: usize, value: u8| {
                counter.set(counter.get() + 1);
                data[addr] = value.wrapping_add(1);
            })),
            highlight: Some(Rc::new(|_: &[u8], addr: usize| addr == 1)),
        };
        let mut data = [0x00, 0x10, 0x20];

        // Act
        let mut mem = HookedSlice::new(&mut data, &hooks);
        mem.write_byte(0, 0x41);

        // Assert
        assert_eq!(mem.read_byte(0), !0x42);
        assert!(mem.is_highlighted(1));
        assert!(!mem.is_highlighted(2));
        assert_eq!(writes.get(), 1);
        assert_eq!(data[0], 0x42);
    }

    #[test]
    fn test_missing_hooks_fall_back_to_indexing() {
        let hooks = MemoryHooks::default();
        let mut data = [1, 2, 3];
        let mut mem = HookedSlice::new(&mut data, &hooks);

        mem.write_byte(1, 9);

        assert_eq!(mem.read_byte(1), 9);
        assert_eq!(mem.len(), 3);
        assert!(!mem.is_highlighted(0));
    }
}
