//! Identity hashing for integer keys.
//!
//! With `BuildIdentityHasher` an integer key hashes to its own value, so its
//! home slot is `key mod capacity`. Useful when keys are already well spread
//! (ids, dense counters) and for reasoning about collisions in tests.

use core::hash::{BuildHasherDefault, Hasher};

#[derive(Debug, Default, Clone, Copy)]
pub struct IdentityHasher(u64);

impl IdentityHasher {
    // Starting from zero, a single write leaves exactly `v`.
    #[inline]
    fn mix(&mut self, v: u64) {
        self.0 = self.0.rotate_left(5) ^ v;
    }
}

impl Hasher for IdentityHasher {
    // Non-integer input: fold 8-byte little-endian chunks together.
    fn write(&mut self, bytes: &[u8]) {
        for chunk in bytes.chunks(8) {
            let mut buf = [0u8; 8];
            buf[..chunk.len()].copy_from_slice(chunk);
            self.mix(u64::from_le_bytes(buf));
        }
    }

    fn write_u8(&mut self, i: u8) {
        self.mix(i as u64);
    }
    fn write_u16(&mut self, i: u16) {
        self.mix(i as u64);
    }
    fn write_u32(&mut self, i: u32) {
        self.mix(i as u64);
    }
    fn write_u64(&mut self, i: u64) {
        self.mix(i);
    }
    fn write_usize(&mut self, i: usize) {
        self.mix(i as u64);
    }
    // Sign-extended, so negative keys land high in u64 space.
    fn write_i8(&mut self, i: i8) {
        self.mix(i as u64);
    }
    fn write_i16(&mut self, i: i16) {
        self.mix(i as u64);
    }
    fn write_i32(&mut self, i: i32) {
        self.mix(i as u64);
    }
    fn write_i64(&mut self, i: i64) {
        self.mix(i as u64);
    }
    fn write_isize(&mut self, i: isize) {
        self.mix(i as u64);
    }

    fn finish(&self) -> u64 {
        self.0
    }
}

pub type BuildIdentityHasher = BuildHasherDefault<IdentityHasher>;
