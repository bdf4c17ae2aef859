//! AES key schedule and single-block encryption/decryption for all key sizes.

use crate::block::Block;
use crate::key::{Key, RoundKeys, MAX_ROUND_KEYS};
use crate::round::{
    add_round_key, inv_mix_columns, inv_shift_rows, inv_sub_bytes, mix_columns, shift_rows,
    sub_bytes,
};
use crate::tables::{sbox, RCON};

fn rot_word(word: u32) -> u32 {
    word.rotate_left(8)
}

fn sub_word(word: u32) -> u32 {
    u32::from_be_bytes(word.to_be_bytes().map(sbox))
}

/// Expands a key into `Nr + 1` round keys.
pub fn expand_key(key: &Key) -> RoundKeys {
    let nk = key.size().words();
    let rounds = key.size().rounds();
    let total = 4 * (rounds + 1);

    let mut w: Vec<u32> = key
        .as_bytes()
        .chunks_exact(4)
        .map(|c| u32::from_be_bytes([c[0], c[1], c[2], c[3]]))
        .collect();
    w.reserve_exact(total - nk);

    for c in nk..total {
        let mut temp = w[c - 1];
        if c % nk == 0 {
            temp = sub_word(rot_word(temp)) ^ (u32::from(RCON[c / nk]) << 24);
        } else if nk > 6 && c % nk == 4 {
            temp = sub_word(temp);
        }
        w.push(w[c - nk] ^ temp);
    }

    let mut round_keys = [[0u8; 16]; MAX_ROUND_KEYS];
    for (block, words) in round_keys.iter_mut().zip(w.chunks_exact(4)) {
        for (dst, word) in block.chunks_exact_mut(4).zip(words) {
            dst.copy_from_slice(&word.to_be_bytes());
        }
    }

    zeroize::Zeroize::zeroize(&mut w);
    RoundKeys::new(round_keys, rounds)
}

/// Encrypts a single 16-byte block with pre-expanded round keys.
pub fn encrypt_block(block: &Block, round_keys: &RoundKeys) -> Block {
    let rounds = round_keys.rounds();
    let mut state = *block;

    add_round_key(&mut state, round_keys.get(0));

    for round in 1..rounds {
        sub_bytes(&mut state);
        shift_rows(&mut state);
        mix_columns(&mut state);
        add_round_key(&mut state, round_keys.get(round));
    }

    sub_bytes(&mut state);
    shift_rows(&mut state);
    add_round_key(&mut state, round_keys.get(rounds));

    state
}

/// Decrypts a single 16-byte block with pre-expanded round keys.
pub fn decrypt_block(block: &Block, round_keys: &RoundKeys) -> Block {
    let rounds = round_keys.rounds();
    let mut state = *block;

    add_round_key(&mut state, round_keys.get(rounds));
    inv_shift_rows(&mut state);
    inv_sub_bytes(&mut state);
    for round in (1..rounds).rev() {
        add_round_key(&mut state, round_keys.get(round));
        inv_mix_columns(&mut state);
        inv_shift_rows(&mut state);
        inv_sub_bytes(&mut state);
    }
    add_round_key(&mut state, round_keys.get(0));

    state
}
