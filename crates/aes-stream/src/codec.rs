//! Block framing, padding and one-block lookahead decryption.

use std::io::{self, ErrorKind, Read, Write};

use aes_core::{AesEngine, Block, BLOCK_SIZE};

use crate::error::StreamError;

/// Fills `block` from `input`, returning how many bytes were read.
///
/// Short reads are retried until the block is full or the input ends; a
/// closed transport (`UnexpectedEof`) counts as the end of input.
fn read_block<R: Read>(input: &mut R, block: &mut Block) -> io::Result<usize> {
    let mut filled = 0;
    while filled < BLOCK_SIZE {
        match input.read(&mut block[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) if e.kind() == ErrorKind::UnexpectedEof => {
                log::debug!("input closed after {filled} bytes of a block");
                break;
            }
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}

/// Pads the tail of a block holding `filled` valid bytes (`0..16`).
fn pad_block(block: &mut Block, filled: usize) {
    let value = (BLOCK_SIZE - filled) as u8;
    block[filled..].fill(value);
}

/// Number of plaintext bytes to keep from the final decrypted block.
///
/// A trailing byte outside `1..=16` means the block carries no padding.
fn unpadded_len(block: &Block) -> usize {
    let padding = usize::from(block[BLOCK_SIZE - 1]);
    if (1..=BLOCK_SIZE).contains(&padding) {
        BLOCK_SIZE - padding
    } else {
        BLOCK_SIZE
    }
}

/// Encrypts `input` to `output`, padding the final block.
///
/// Returns the number of ciphertext bytes written, always a positive multiple
/// of 16.
pub fn encrypt_stream<R: Read, W: Write>(
    engine: &mut AesEngine,
    mut input: R,
    mut output: W,
) -> Result<u64, StreamError> {
    let mut block = [0u8; BLOCK_SIZE];
    let mut blocks = 0u64;

    loop {
        let filled = read_block(&mut input, &mut block)?;
        let last = filled < BLOCK_SIZE;
        if last {
            pad_block(&mut block, filled);
        }
        engine.encrypt_block(&mut block);
        output.write_all(&block)?;
        blocks += 1;
        if last {
            break;
        }
    }
    output.flush()?;

    let written = blocks * BLOCK_SIZE as u64;
    log::debug!("encrypted {blocks} blocks ({written} bytes) with {}", engine.mode());
    Ok(written)
}

/// Decrypts `input` to `output`, stripping the padding of the final block.
///
/// Returns the number of plaintext bytes written. Empty input yields empty
/// output. If the input ends part-way through a block, [`StreamError::Framing`]
/// is returned and nothing further is written; blocks emitted before that
/// point stay in `output`.
pub fn decrypt_stream<R: Read, W: Write>(
    engine: &mut AesEngine,
    mut input: R,
    mut output: W,
) -> Result<u64, StreamError> {
    // The most recent block is held back until we know whether it is the last.
    let mut held: Option<Block> = None;
    let mut offset = 0u64;
    let mut written = 0u64;

    loop {
        let mut block = [0u8; BLOCK_SIZE];
        let read = read_block(&mut input, &mut block)?;
        if read == 0 {
            break;
        }
        if read != BLOCK_SIZE {
            log::warn!("truncated ciphertext block at offset {offset} ({read} bytes)");
            return Err(StreamError::Framing { offset, read });
        }
        offset += BLOCK_SIZE as u64;

        if let Some(mut previous) = held.replace(block) {
            engine.decrypt_block(&mut previous);
            output.write_all(&previous)?;
            written += BLOCK_SIZE as u64;
        }
    }

    match held {
        Some(mut last) => {
            engine.decrypt_block(&mut last);
            let keep = unpadded_len(&last);
            output.write_all(&last[..keep])?;
            written += keep as u64;
        }
        None => log::debug!("empty ciphertext stream"),
    }
    output.flush()?;

    log::debug!(
        "decrypted {} blocks into {written} bytes with {}",
        offset / BLOCK_SIZE as u64,
        engine.mode()
    );
    Ok(written)
}

/// Encrypts an in-memory buffer.
pub fn encrypt_to_vec(
    engine: &mut AesEngine,
    plaintext: &[u8],
) -> Result<Vec<u8>, StreamError> {
    let mut out = Vec::with_capacity((plaintext.len() / BLOCK_SIZE + 1) * BLOCK_SIZE);
    encrypt_stream(engine, plaintext, &mut out)?;
    Ok(out)
}

/// Decrypts an in-memory buffer.
pub fn decrypt_to_vec(engine: &mut AesEngine, ciphertext: &[u8]) -> Result<Vec<u8>, StreamError> {
    let mut out = Vec::with_capacity(ciphertext.len());
    decrypt_stream(engine, ciphertext, &mut out)?;
    Ok(out)
}
