use std::ops::Deref;

use super::galois::exp;
use super::poly::Polynomial;
use crate::common::error::QRResult;
use crate::common::metadata::{ECLevel, RSBlock, Version};

// Block
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Clone)]
pub(crate) struct Block<'a> {
    data: &'a [u8],
    ecc: Vec<u8>,
}

impl<'a> Block<'a> {
    pub fn new(data: &'a [u8], ec_len: usize) -> QRResult<Self> {
        let ecc = ecc_per_block(data, ec_len)?;
        Ok(Self { data, ecc })
    }

    pub fn data(&self) -> &[u8] {
        self.data
    }

    pub fn ecc(&self) -> &[u8] {
        &self.ecc
    }
}

// Error correction codewords
//------------------------------------------------------------------------------

/// Splits the padded data codewords into RS blocks, appends error correction
/// to each and interleaves everything into the final codeword sequence.
pub fn ecc(data: &[u8], ver: Version, ecl: ECLevel) -> QRResult<Vec<u8>> {
    let blocks = blockify(data, &ver.rs_blocks(ecl))?;

    let data_blocks = blocks.iter().map(Block::data).collect::<Vec<_>>();
    let ecc_blocks = blocks.iter().map(Block::ecc).collect::<Vec<_>>();

    let mut res = interleave(&data_blocks);
    res.extend(interleave(&ecc_blocks));

    debug_assert_eq!(
        res.len(),
        ver.total_codewords(),
        "Codeword count mismatch for version {} {ecl:?}",
        *ver
    );
    Ok(res)
}

pub(crate) fn blockify<'a>(data: &'a [u8], layout: &[RSBlock]) -> QRResult<Vec<Block<'a>>> {
    let total_size = layout.iter().map(|b| b.data).sum::<usize>();
    debug_assert!(
        total_size == data.len(),
        "Data len doesn't match total size of blocks: Data len {}, Total block size {}",
        data.len(),
        total_size
    );

    let mut offset = 0;
    let mut blocks = Vec::with_capacity(layout.len());
    for rs in layout {
        blocks.push(Block::new(&data[offset..offset + rs.data], rs.ec_len())?);
        offset += rs.data;
    }
    Ok(blocks)
}

// Product of (x - a^i) for i in 0..ec_len
pub fn generator_polynomial(ec_len: usize) -> QRResult<Polynomial> {
    let mut gen = Polynomial::new(&[1], 0)?;
    for i in 0..ec_len {
        gen = gen.multiply(&Polynomial::new(&[1, exp(i as i32)], 0)?);
    }
    Ok(gen)
}

// Remainder of data * x^ec_len divided by the generator, left padded with
// zeros up to ec_len
fn ecc_per_block(block: &[u8], ec_len: usize) -> QRResult<Vec<u8>> {
    let gen = generator_polynomial(ec_len)?;
    let raw = Polynomial::new(block, gen.len() - 1)?;
    let rem = raw.rem(&gen)?;

    let mut res = vec![0u8; ec_len];
    let coeffs = rem.coeffs();
    debug_assert!(coeffs.len() <= ec_len, "Remainder longer than ec len: {}", coeffs.len());
    res[ec_len - coeffs.len()..].copy_from_slice(coeffs);
    Ok(res)
}

pub fn interleave<T: Copy, V: Deref<Target = [T]>>(blocks: &[V]) -> Vec<T> {
    let max_block_size = blocks.iter().map(|b| b.len()).max().unwrap_or(0);
    let total_size = blocks.iter().map(|b| b.len()).sum::<usize>();
    let mut res = Vec::with_capacity(total_size);
    for i in 0..max_block_size {
        for b in blocks {
            if i < b.len() {
                res.push(b[i]);
            }
        }
    }
    res
}
