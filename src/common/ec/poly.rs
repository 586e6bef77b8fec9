use super::galois::{exp, log, mul};
use crate::common::error::{QRError, QRResult};

// Polynomial over GF(256), coefficients from the highest degree down
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Polynomial {
    coeffs: Vec<u8>,
}

impl Polynomial {
    /// Strips leading zeros and appends `shift` zero coefficients. The zero
    /// polynomial has no coefficients and is never shifted.
    pub fn new(coeffs: &[u8], shift: usize) -> QRResult<Self> {
        if coeffs.is_empty() {
            return Err(QRError::MalformedPolynomial);
        }
        Ok(Self::from_stripped(coeffs, shift))
    }

    fn from_stripped(coeffs: &[u8], shift: usize) -> Self {
        let offset = coeffs.iter().position(|&c| c != 0).unwrap_or(coeffs.len());
        let coeffs = &coeffs[offset..];
        if coeffs.is_empty() {
            return Self { coeffs: Vec::new() };
        }
        let mut res = Vec::with_capacity(coeffs.len() + shift);
        res.extend_from_slice(coeffs);
        res.resize(coeffs.len() + shift, 0);
        Self { coeffs: res }
    }

    pub fn len(&self) -> usize {
        self.coeffs.len()
    }

    pub fn is_zero(&self) -> bool {
        self.coeffs.is_empty()
    }

    pub fn coeffs(&self) -> &[u8] {
        &self.coeffs
    }

    pub fn multiply(&self, other: &Self) -> Self {
        if self.is_zero() || other.is_zero() {
            return Self { coeffs: Vec::new() };
        }
        let mut res = vec![0u8; self.len() + other.len() - 1];
        for (i, &a) in self.coeffs.iter().enumerate() {
            for (j, &b) in other.coeffs.iter().enumerate() {
                res[i + j] ^= mul(a, b);
            }
        }
        Self::from_stripped(&res, 0)
    }

    pub fn rem(&self, divisor: &Self) -> QRResult<Self> {
        if divisor.is_zero() {
            return Err(QRError::InvalidFieldOperand);
        }

        let mut rem = self.clone();
        let log_lead = log(divisor.coeffs[0])? as i32;
        while rem.len() >= divisor.len() {
            let ratio = log(rem.coeffs[0])? as i32 - log_lead;
            let mut coeffs = rem.coeffs;
            for (c, &d) in coeffs.iter_mut().zip(divisor.coeffs.iter()) {
                if d != 0 {
                    *c ^= exp(log(d)? as i32 + ratio);
                }
            }
            rem = Self::from_stripped(&coeffs, 0);
        }
        Ok(rem)
    }
}
