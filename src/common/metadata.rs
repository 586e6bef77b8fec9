use std::ops::Deref;
use std::str::FromStr;

use super::error::{QRError, QRResult};
use super::mask::MaskPattern;

// Color
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum Color {
    Light,
    Dark,
}

impl From<bool> for Color {
    fn from(dark: bool) -> Self {
        if dark {
            Self::Dark
        } else {
            Self::Light
        }
    }
}

// Version
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone, PartialOrd, Ord, Hash)]
pub struct Version(u8);

impl Deref for Version {
    type Target = u8;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Version {
    pub const MIN: Self = Self(1);
    pub const MAX: Self = Self(MAX_VERSION);

    pub fn new(version: u8) -> QRResult<Self> {
        match version {
            1..=MAX_VERSION => Ok(Self(version)),
            _ => Err(QRError::InvalidVersion),
        }
    }

    pub fn all() -> impl Iterator<Item = Self> {
        (1..=MAX_VERSION).map(Self)
    }

    pub const fn width(self) -> usize {
        self.0 as usize * 4 + 17
    }

    pub fn alignment_pattern(self) -> &'static [i16] {
        ALIGNMENT_PATTERN_POSITIONS[self.0 as usize - 1]
    }

    pub fn char_cnt_bits(self) -> usize {
        match self.0 {
            1..=9 => 8,
            _ => 16,
        }
    }

    pub fn rs_blocks(self, ecl: ECLevel) -> Vec<RSBlock> {
        RS_BLOCK_TABLE[self.0 as usize - 1][ecl as usize]
            .iter()
            .flat_map(|&(count, total, data)| (0..count).map(move |_| RSBlock { total, data }))
            .collect()
    }

    pub fn total_codewords(self) -> usize {
        TOTAL_CODEWORDS[self.0 as usize - 1]
    }

    pub fn data_codewords(self, ecl: ECLevel) -> usize {
        RS_BLOCK_TABLE[self.0 as usize - 1][ecl as usize]
            .iter()
            .map(|&(count, _, data)| count * data)
            .sum()
    }

    pub fn data_bit_capacity(self, ecl: ECLevel) -> usize {
        self.data_codewords(ecl) << 3
    }

    pub fn remainder_bits(self) -> usize {
        match self.0 {
            2..=6 => 7,
            _ => 0,
        }
    }

    pub fn info(self) -> u32 {
        debug_assert!(self.0 >= 7, "Version info is only defined from version 7: {}", self.0);
        let data = self.0 as u32;
        (data << 12) | bch_remainder(data << 12, VERSION_INFO_GENERATOR)
    }
}


// RS block
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub struct RSBlock {
    pub total: usize,
    pub data: usize,
}

impl RSBlock {
    pub fn ec_len(&self) -> usize {
        self.total - self.data
    }
}

// Error correction level
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone, PartialOrd, Ord, Hash)]
pub enum ECLevel {
    L = 0,
    M = 1,
    Q = 2,
    H = 3,
}

impl ECLevel {
    pub fn format_bits(self) -> u32 {
        match self {
            Self::L => 0b01,
            Self::M => 0b00,
            Self::Q => 0b11,
            Self::H => 0b10,
        }
    }
}

impl FromStr for ECLevel {
    type Err = QRError;

    fn from_str(s: &str) -> QRResult<Self> {
        match s.trim() {
            "L" | "l" => Ok(Self::L),
            "M" | "m" => Ok(Self::M),
            "Q" | "q" => Ok(Self::Q),
            "H" | "h" => Ok(Self::H),
            _ => Err(QRError::InvalidECLevel),
        }
    }
}

// Format info
//------------------------------------------------------------------------------

pub fn generate_format_info(ecl: ECLevel, mask: MaskPattern) -> u32 {
    let data = (ecl.format_bits() << 3) | *mask as u32;
    ((data << 10) | bch_remainder(data << 10, FORMAT_INFO_GENERATOR)) ^ FORMAT_MASK
}

// Remainder of the shifted data divided by the generator over GF(2)
const fn bch_remainder(shifted: u32, generator: u32) -> u32 {
    let gen_len = bit_len(generator);
    let mut rem = shifted;
    while bit_len(rem) >= gen_len {
        rem ^= generator << (bit_len(rem) - gen_len);
    }
    rem
}

const fn bit_len(n: u32) -> u32 {
    32 - n.leading_zeros()
}

#[cfg(test)]
mod info_tests {
    use test_case::test_case;

    use super::{generate_format_info, ECLevel};
    use crate::MaskPattern;

    #[test_case(ECLevel::M, 0, 0x5412)]
    #[test_case(ECLevel::L, 0, 0x77C4)]
    #[test_case(ECLevel::L, 4, 0x662F)]
    #[test_case(ECLevel::Q, 7, 0x2BED)]
    #[test_case(ECLevel::H, 0, 0x1689)]
    #[test_case(ECLevel::H, 7, 0x083B)]
    fn test_format_info(ecl: ECLevel, mask: u8, exp: u32) {
        let mask = MaskPattern::new(mask).unwrap();
        assert_eq!(generate_format_info(ecl, mask), exp);
    }

    #[test]
    fn test_ec_level_from_str() {
        assert_eq!("q".parse::<ECLevel>(), Ok(ECLevel::Q));
        assert_eq!(" H ".parse::<ECLevel>(), Ok(ECLevel::H));
        assert!("X".parse::<ECLevel>().is_err());
        assert!("".parse::<ECLevel>().is_err());
    }
}

// Global constants
//------------------------------------------------------------------------------

pub const MAX_VERSION: u8 = 10;

pub const MAX_QR_SIZE: usize = Version::MAX.width() * Version::MAX.width();

pub const FORMAT_INFO_BIT_LEN: usize = 15;

pub const VERSION_INFO_BIT_LEN: usize = 18;

const FORMAT_INFO_GENERATOR: u32 = 0b101_0011_0111;

const FORMAT_MASK: u32 = 0b101_0100_0001_0010;

const VERSION_INFO_GENERATOR: u32 = 0b1_1111_0010_0101;

// Coordinates of format bits, least significant bit first. Negative indices
// wrap around from the bottom/right edge.
pub static FORMAT_INFO_COORDS_QR_MAIN: [(i16, i16); FORMAT_INFO_BIT_LEN] = [
    (0, 8),
    (1, 8),
    (2, 8),
    (3, 8),
    (4, 8),
    (5, 8),
    (7, 8),
    (8, 8),
    (-7, 8),
    (-6, 8),
    (-5, 8),
    (-4, 8),
    (-3, 8),
    (-2, 8),
    (-1, 8),
];

pub static FORMAT_INFO_COORDS_QR_SIDE: [(i16, i16); FORMAT_INFO_BIT_LEN] = [
    (8, -1),
    (8, -2),
    (8, -3),
    (8, -4),
    (8, -5),
    (8, -6),
    (8, -7),
    (8, -8),
    (8, 7),
    (8, 5),
    (8, 4),
    (8, 3),
    (8, 2),
    (8, 1),
    (8, 0),
];

pub static VERSION_INFO_COORDS_TR: [(i16, i16); VERSION_INFO_BIT_LEN] =
    version_info_coords(false);

pub static VERSION_INFO_COORDS_BL: [(i16, i16); VERSION_INFO_BIT_LEN] = version_info_coords(true);

const fn version_info_coords(transpose: bool) -> [(i16, i16); VERSION_INFO_BIT_LEN] {
    let mut coords = [(0, 0); VERSION_INFO_BIT_LEN];
    let mut i = 0;
    while i < VERSION_INFO_BIT_LEN {
        let (a, b) = ((i / 3) as i16, (i % 3) as i16 - 11);
        coords[i] = if transpose { (b, a) } else { (a, b) };
        i += 1;
    }
    coords
}

static ALIGNMENT_PATTERN_POSITIONS: [&[i16]; MAX_VERSION as usize] = [
    &[],
    &[6, 18],
    &[6, 22],
    &[6, 26],
    &[6, 30],
    &[6, 34],
    &[6, 22, 38],
    &[6, 24, 42],
    &[6, 26, 46],
    &[6, 28, 50],
];

static TOTAL_CODEWORDS: [usize; MAX_VERSION as usize] =
    [26, 44, 70, 100, 134, 172, 196, 242, 292, 346];

// (block count, total codewords, data codewords) for each version & L, M, Q, H
type BlockRow = &'static [(usize, usize, usize)];

static RS_BLOCK_TABLE: [[BlockRow; 4]; MAX_VERSION as usize] = [
    [&[(1, 26, 19)], &[(1, 26, 16)], &[(1, 26, 13)], &[(1, 26, 9)]],
    [&[(1, 44, 34)], &[(1, 44, 28)], &[(1, 44, 22)], &[(1, 44, 16)]],
    [&[(1, 70, 55)], &[(1, 70, 44)], &[(2, 35, 17)], &[(2, 35, 13)]],
    [&[(1, 100, 80)], &[(2, 50, 32)], &[(2, 50, 24)], &[(4, 25, 9)]],
    [&[(1, 134, 108)], &[(2, 67, 43)], &[(2, 33, 15), (2, 34, 16)], &[(2, 33, 11), (2, 34, 12)]],
    [&[(2, 86, 68)], &[(4, 43, 27)], &[(4, 43, 19)], &[(4, 43, 15)]],
    [&[(2, 98, 78)], &[(4, 49, 31)], &[(2, 32, 14), (4, 33, 15)], &[(4, 39, 13), (1, 40, 14)]],
    [
        &[(2, 121, 97)],
        &[(2, 60, 38), (2, 61, 39)],
        &[(4, 40, 18), (2, 41, 19)],
        &[(4, 40, 14), (2, 41, 15)],
    ],
    [
        &[(2, 146, 116)],
        &[(3, 58, 36), (2, 59, 37)],
        &[(4, 36, 16), (4, 37, 17)],
        &[(4, 36, 12), (4, 37, 13)],
    ],
    [
        &[(2, 86, 68), (2, 87, 69)],
        &[(4, 69, 43), (1, 70, 44)],
        &[(6, 43, 19), (2, 44, 20)],
        &[(6, 43, 15), (2, 44, 16)],
    ],
];
