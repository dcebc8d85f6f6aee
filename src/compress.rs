//! The SHA-256 compression function (FIPS 180-4, section 6.2.2).

use std::convert::TryInto;

use crate::{BLOCK_LEN, BLOCK_SIZE, DIGEST_SIZE};

/// The running hash value, eight 32-bit words.
pub type State = [u32; DIGEST_SIZE];

/// Number of rounds applied to every block.
const ROUNDS: usize = 64;

/// Initial hash value: the first 32 bits of the fractional parts of the square roots of the
/// first 8 primes.
pub const IV: State = [
    0x6a09e667, 0xbb67ae85, 0x3c6ef372, 0xa54ff53a, 0x510e527f, 0x9b05688c, 0x1f83d9ab, 0x5be0cd19,
];

/// Round constants: the first 32 bits of the fractional parts of the cube roots of the first
/// 64 primes.
pub const K: [u32; ROUNDS] = [
    0x428a2f98, 0x71374491, 0xb5c0fbcf, 0xe9b5dba5, 0x3956c25b, 0x59f111f1, 0x923f82a4, 0xab1c5ed5,
    0xd807aa98, 0x12835b01, 0x243185be, 0x550c7dc3, 0x72be5d74, 0x80deb1fe, 0x9bdc06a7, 0xc19bf174,
    0xe49b69c1, 0xefbe4786, 0x0fc19dc6, 0x240ca1cc, 0x2de92c6f, 0x4a7484aa, 0x5cb0a9dc, 0x76f988da,
    0x983e5152, 0xa831c66d, 0xb00327c8, 0xbf597fc7, 0xc6e00bf3, 0xd5a79147, 0x06ca6351, 0x14292967,
    0x27b70a85, 0x2e1b2138, 0x4d2c6dfc, 0x53380d13, 0x650a7354, 0x766a0abb, 0x81c2c92e, 0x92722c85,
    0xa2bfe8a1, 0xa81a664b, 0xc24b8b70, 0xc76c51a3, 0xd192e819, 0xd6990624, 0xf40e3585, 0x106aa070,
    0x19a4c116, 0x1e376c08, 0x2748774c, 0x34b0bcb5, 0x391c0cb3, 0x4ed8aa4a, 0x5b9cca4f, 0x682e6ff3,
    0x748f82ee, 0x78a5636f, 0x84c87814, 0x8cc70208, 0x90befffa, 0xa4506ceb, 0xbef9a3f7, 0xc67178f2,
];

/// A block compression function that folds one 64-byte block into the running state.
///
/// [`Sha256`](crate::Sha256) is generic over this so that callers can substitute an
/// accelerated backend, or observe the blocks it is handed.
pub trait Compress {
    /// Processes exactly one block of input, updating `state` in place.
    fn compress(&mut self, state: &mut State, block: &[u8; BLOCK_LEN]);
}

/// Portable implementation of the compression function.
#[derive(Clone, Copy, Debug, Default)]
pub struct Soft;

impl Compress for Soft {
    #[inline]
    fn compress(&mut self, state: &mut State, block: &[u8; BLOCK_LEN]) {
        compress(state, block)
    }
}

#[inline]
fn ch(x: u32, y: u32, z: u32) -> u32 {
    (x & y) ^ (!x & z)
}

#[inline]
fn maj(x: u32, y: u32, z: u32) -> u32 {
    (x & y) ^ (x & z) ^ (y & z)
}

#[inline]
fn upper_sigma_0(x: u32) -> u32 {
    x.rotate_right(2) ^ x.rotate_right(13) ^ x.rotate_right(22)
}

#[inline]
fn upper_sigma_1(x: u32) -> u32 {
    x.rotate_right(6) ^ x.rotate_right(11) ^ x.rotate_right(25)
}

#[inline]
fn lower_sigma_0(x: u32) -> u32 {
    x.rotate_right(7) ^ x.rotate_right(18) ^ (x >> 3)
}

#[inline]
fn lower_sigma_1(x: u32) -> u32 {
    x.rotate_right(17) ^ x.rotate_right(19) ^ (x >> 10)
}

/// Expands a block into the 64-word message schedule.
fn schedule(block: &[u8; BLOCK_LEN]) -> [u32; ROUNDS] {
    let mut w = [0u32; ROUNDS];
    for (word, chunk) in w.iter_mut().zip(block.chunks_exact(4)).take(BLOCK_SIZE) {
        *word = u32::from_be_bytes(chunk.try_into().expect("chunk.len() == 4"));
    }
    for i in BLOCK_SIZE..ROUNDS {
        w[i] = lower_sigma_1(w[i - 2])
            .wrapping_add(w[i - 7])
            .wrapping_add(lower_sigma_0(w[i - 15]))
            .wrapping_add(w[i - 16]);
    }
    w
}

/// Applies the 64-round compression function to `state` for a single block.
pub fn compress(state: &mut State, block: &[u8; BLOCK_LEN]) {
    let w = schedule(block);

    let [mut a, mut b, mut c, mut d, mut e, mut f, mut g, mut h] = *state;

    for (k, word) in K.iter().zip(w.iter()) {
        let t1 = h
            .wrapping_add(upper_sigma_1(e))
            .wrapping_add(ch(e, f, g))
            .wrapping_add(*k)
            .wrapping_add(*word);
        let t2 = upper_sigma_0(a).wrapping_add(maj(a, b, c));

        h = g;
        g = f;
        f = e;
        e = d.wrapping_add(t1);
        d = c;
        c = b;
        b = a;
        a = t1.wrapping_add(t2);
    }

    for (word, v) in state.iter_mut().zip([a, b, c, d, e, f, g, h].iter()) {
        *word = word.wrapping_add(*v);
    }
}

#[cfg(test)]
mod test {
    use super::*;

    /// "abc" already padded to a single block, as in FIPS 180-4 appendix B.1.
    fn abc_block() -> [u8; BLOCK_LEN] {
        let mut block = [0u8; BLOCK_LEN];
        block[..3].copy_from_slice(b"abc");
        block[3] = 0x80;
        block[63] = 24;
        block
    }

    #[test]
    fn abc_single_block() {
        let mut state = IV;
        compress(&mut state, &abc_block());
        assert_eq!(
            state,
            [
                0xba7816bf, 0x8f01cfea, 0x414140de, 0x5dae2223, 0xb00361a3, 0x96177a9c, 0xb410ff61,
                0xf20015ad,
            ]
        );
    }

    #[test]
    fn schedule_copies_block_words_big_endian() {
        let w = schedule(&abc_block());
        assert_eq!(w[0], 0x61626380);
        assert_eq!(&w[1..15], &[0u32; 14]);
        assert_eq!(w[15], 0x00000018);
        // First expanded word from appendix B.1.
        assert_eq!(w[16], 0x61626380);
        assert_eq!(w[17], 0x000f0000);
    }

    #[test]
    fn soft_matches_free_function() {
        let block = [0x5au8; BLOCK_LEN];
        let mut expected = IV;
        compress(&mut expected, &block);

        let mut state = IV;
        Soft.compress(&mut state, &block);
        assert_eq!(state, expected);
    }

    #[test]
    fn compress_depends_on_state() {
        let block = [0u8; BLOCK_LEN];
        let mut from_iv = IV;
        let mut from_zero = [0u32; DIGEST_SIZE];
        compress(&mut from_iv, &block);
        compress(&mut from_zero, &block);
        assert_ne!(from_iv, from_zero);
    }
}
