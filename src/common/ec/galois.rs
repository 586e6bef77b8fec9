use crate::common::error::{QRError, QRResult};

// Galois field GF(256) with primitive polynomial x^8 + x^4 + x^3 + x^2 + 1
//------------------------------------------------------------------------------

pub static EXP_TABLE: [u8; 256] = TABLES.0;

pub static LOG_TABLE: [u8; 256] = TABLES.1;

const TABLES: ([u8; 256], [u8; 256]) = generate_tables();

const fn generate_tables() -> ([u8; 256], [u8; 256]) {
    let mut exp = [0u8; 256];
    let mut log = [0u8; 256];

    let mut i = 0;
    while i < 8 {
        exp[i] = 1 << i;
        i += 1;
    }
    while i < 256 {
        exp[i] = exp[i - 4] ^ exp[i - 5] ^ exp[i - 6] ^ exp[i - 8];
        i += 1;
    }

    let mut i = 0;
    while i < 255 {
        log[exp[i] as usize] = i as u8;
        i += 1;
    }

    (exp, log)
}

/// Generator raised to `power`, for any integer power including negatives.
#[inline]
pub fn exp(power: i32) -> u8 {
    EXP_TABLE[power.rem_euclid(255) as usize]
}

#[inline]
pub fn log(value: u8) -> QRResult<u8> {
    match value {
        0 => Err(QRError::InvalidFieldOperand),
        v => Ok(LOG_TABLE[v as usize]),
    }
}

#[inline]
pub fn mul(a: u8, b: u8) -> u8 {
    if a == 0 || b == 0 {
        return 0;
    }
    let log_sum = LOG_TABLE[a as usize] as usize + LOG_TABLE[b as usize] as usize;
    EXP_TABLE[log_sum % 255]
}
