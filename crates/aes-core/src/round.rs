//! AES round transformations. Every function mutates the state in place.

use crate::block::{xor_in_place, Block};
use crate::tables::{inv_sbox, sbox, MUL_11, MUL_13, MUL_14, MUL_2, MUL_3, MUL_9};

/// One 4-byte state column, row 0 first.
pub type Column = [u8; 4];

/// Applies SubBytes to the state in place.
#[inline]
pub fn sub_bytes(state: &mut Block) {
    for byte in state.iter_mut() {
        *byte = sbox(*byte);
    }
}

/// Applies the inverse SubBytes transformation.
#[inline]
pub fn inv_sub_bytes(state: &mut Block) {
    for byte in state.iter_mut() {
        *byte = inv_sbox(*byte);
    }
}

/// Swaps between column-major and row-major layout. Self-inverse.
#[inline]
pub fn transpose(state: &mut Block) {
    for col in 0..4 {
        for row in col + 1..4 {
            state.swap(col * 4 + row, row * 4 + col);
        }
    }
}

/// Rotates each row `r` of a row-major state; `left` selects the direction.
fn rotate_rows(state: &mut Block, left: bool) {
    for (r, row) in state.chunks_exact_mut(4).enumerate().skip(1) {
        let word = u32::from_be_bytes([row[0], row[1], row[2], row[3]]);
        let shift = (r * 8) as u32;
        let rotated = if left {
            word.rotate_left(shift)
        } else {
            word.rotate_right(shift)
        };
        row.copy_from_slice(&rotated.to_be_bytes());
    }
}

/// Performs ShiftRows in place: row `r` rotates left by `r` bytes.
#[inline]
pub fn shift_rows(state: &mut Block) {
    transpose(state);
    rotate_rows(state, true);
    transpose(state);
}

/// Performs the inverse of ShiftRows in place.
#[inline]
pub fn inv_shift_rows(state: &mut Block) {
    transpose(state);
    rotate_rows(state, false);
    transpose(state);
}

/// Multiplies one column by the MixColumns matrix.
#[inline]
pub fn mix_column(col: &mut Column) {
    let [a0, a1, a2, a3] = col.map(usize::from);
    let [b0, b1, b2, b3] = *col;
    col[0] = MUL_2[a0] ^ MUL_3[a1] ^ b2 ^ b3;
    col[1] = b0 ^ MUL_2[a1] ^ MUL_3[a2] ^ b3;
    col[2] = b0 ^ b1 ^ MUL_2[a2] ^ MUL_3[a3];
    col[3] = MUL_3[a0] ^ b1 ^ b2 ^ MUL_2[a3];
}

/// Multiplies one column by the inverse MixColumns matrix.
#[inline]
pub fn inv_mix_column(col: &mut Column) {
    let [a0, a1, a2, a3] = col.map(usize::from);
    col[0] = MUL_14[a0] ^ MUL_11[a1] ^ MUL_13[a2] ^ MUL_9[a3];
    col[1] = MUL_9[a0] ^ MUL_14[a1] ^ MUL_11[a2] ^ MUL_13[a3];
    col[2] = MUL_13[a0] ^ MUL_9[a1] ^ MUL_14[a2] ^ MUL_11[a3];
    col[3] = MUL_11[a0] ^ MUL_13[a1] ^ MUL_9[a2] ^ MUL_14[a3];
}

fn for_each_column(state: &mut Block, f: fn(&mut Column)) {
    for chunk in state.chunks_exact_mut(4) {
        let mut column = [chunk[0], chunk[1], chunk[2], chunk[3]];
        f(&mut column);
        chunk.copy_from_slice(&column);
    }
}

/// MixColumns over all four columns.
#[inline]
pub fn mix_columns(state: &mut Block) {
    for_each_column(state, mix_column);
}

/// Inverse MixColumns over all four columns.
#[inline]
pub fn inv_mix_columns(state: &mut Block) {
    for_each_column(state, inv_mix_column);
}

/// Adds (XORs) a round key into the state. Self-inverse.
#[inline]
pub fn add_round_key(state: &mut Block, round_key: &Block) {
    xor_in_place(state, round_key);
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::{RngCore, SeedableRng};
    use rand_chacha::ChaCha20Rng;

    fn random_block(rng: &mut ChaCha20Rng) -> Block {
        let mut block = [0u8; 16];
        rng.fill_bytes(&mut block);
        block
    }

    #[test]
    fn sub_bytes_round_trip() {
        let mut rng = ChaCha20Rng::from_seed([10u8; 32]);
        for _ in 0..32 {
            let original = random_block(&mut rng);
            let mut state = original;
            sub_bytes(&mut state);
            inv_sub_bytes(&mut state);
            assert_eq!(state, original);
        }
    }

    #[test]
    fn transpose_is_an_involution() {
        let original: Block = core::array::from_fn(|i| i as u8);
        let mut state = original;
        transpose(&mut state);
        assert_eq!(state[1], 4);
        assert_eq!(state[4], 1);
        assert_eq!(state[15], 15);
        transpose(&mut state);
        assert_eq!(state, original);
    }

    #[test]
    fn shift_rows_moves_bytes_like_fips_197() {
        let mut state: Block = core::array::from_fn(|i| i as u8);
        shift_rows(&mut state);
        assert_eq!(
            state,
            [0, 5, 10, 15, 4, 9, 14, 3, 8, 13, 2, 7, 12, 1, 6, 11]
        );
        inv_shift_rows(&mut state);
        assert_eq!(state, core::array::from_fn(|i| i as u8));
    }

    #[test]
    fn shift_rows_round_trip() {
        let mut rng = ChaCha20Rng::from_seed([11u8; 32]);
        for _ in 0..32 {
            let original = random_block(&mut rng);
            let mut state = original;
            shift_rows(&mut state);
            inv_shift_rows(&mut state);
            assert_eq!(state, original);
        }
    }

    #[test]
    fn mix_column_known_vectors() {
        // Widely published MixColumns test columns.
        let cases: [(Column, Column); 3] = [
            ([0xdb, 0x13, 0x53, 0x45], [0x8e, 0x4d, 0xa1, 0xbc]),
            ([0xf2, 0x0a, 0x22, 0x5c], [0x9f, 0xdc, 0x58, 0x9d]),
            ([0xd4, 0xd4, 0xd4, 0xd5], [0xd5, 0xd5, 0xd7, 0xd6]),
        ];
        for (input, expected) in cases {
            let mut col = input;
            mix_column(&mut col);
            assert_eq!(col, expected);
            inv_mix_column(&mut col);
            assert_eq!(col, input);
        }
    }

    #[test]
    fn mix_columns_round_trip() {
        let mut rng = ChaCha20Rng::from_seed([12u8; 32]);
        for _ in 0..32 {
            let original = random_block(&mut rng);
            let mut state = original;
            mix_columns(&mut state);
            inv_mix_columns(&mut state);
            assert_eq!(state, original);
        }
    }

    proptest! {
        #[test]
        fn inv_mix_column_undoes_mix_column(word in any::<u32>()) {
            let original = word.to_be_bytes();
            let mut col = original;
            mix_column(&mut col);
            inv_mix_column(&mut col);
            prop_assert_eq!(col, original);
        }

        #[test]
        fn add_round_key_is_self_inverse(state in any::<[u8; 16]>(), key in any::<[u8; 16]>()) {
            let mut block = state;
            add_round_key(&mut block, &key);
            add_round_key(&mut block, &key);
            prop_assert_eq!(block, state);
        }
    }
}
