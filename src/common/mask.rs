use std::ops::Deref;

use log::trace;

use super::error::{QRError, QRResult};
use super::metadata::{Color, ECLevel, Version};
use crate::builder::QR;

// Mask pattern
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone, PartialOrd, Ord, Hash)]
pub struct MaskPattern(u8);

impl MaskPattern {
    pub fn new(pattern: u8) -> QRResult<Self> {
        match pattern {
            0..=7 => Ok(Self(pattern)),
            _ => Err(QRError::InvalidMaskingPattern),
        }
    }

    pub fn all() -> impl Iterator<Item = Self> {
        (0..8).map(Self)
    }
}

impl Deref for MaskPattern {
    type Target = u8;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

mod mask_functions {
    pub fn checkerboard(r: i16, c: i16) -> bool {
        (r + c) & 1 == 0
    }

    pub fn horizontal_lines(r: i16, _: i16) -> bool {
        r & 1 == 0
    }

    pub fn vertical_lines(_: i16, c: i16) -> bool {
        c % 3 == 0
    }

    pub fn diagonal_lines(r: i16, c: i16) -> bool {
        (r + c) % 3 == 0
    }

    pub fn large_checkerboard(r: i16, c: i16) -> bool {
        ((r >> 1) + (c / 3)) & 1 == 0
    }

    pub fn fields(r: i16, c: i16) -> bool {
        let rc = r as i32 * c as i32;
        (rc & 1) + (rc % 3) == 0
    }

    pub fn diamonds(r: i16, c: i16) -> bool {
        let rc = r as i32 * c as i32;
        ((rc & 1) + (rc % 3)) & 1 == 0
    }

    pub fn meadow(r: i16, c: i16) -> bool {
        let rc = r as i32 * c as i32;
        ((rc % 3) + ((r + c) as i32 & 1)) & 1 == 0
    }
}

impl MaskPattern {
    pub fn mask_functions(self) -> fn(i16, i16) -> bool {
        match *self {
            0b000 => mask_functions::checkerboard,
            0b001 => mask_functions::horizontal_lines,
            0b010 => mask_functions::vertical_lines,
            0b011 => mask_functions::diagonal_lines,
            0b100 => mask_functions::large_checkerboard,
            0b101 => mask_functions::fields,
            0b110 => mask_functions::diamonds,
            0b111 => mask_functions::meadow,
            _ => unreachable!("Mask pattern is validated on construction"),
        }
    }
}

#[cfg(test)]
mod mask_pattern_tests {
    use test_case::test_case;

    use super::MaskPattern;
    use crate::common::error::QRError;

    #[test]
    fn test_new() {
        assert_eq!(*MaskPattern::new(7).unwrap(), 7);
        assert_eq!(MaskPattern::new(8), Err(QRError::InvalidMaskingPattern));
        assert_eq!(MaskPattern::all().count(), 8);
    }

    #[test_case(0, &[(0, 0), (1, 1), (3, 5)], &[(0, 1), (4, 7)])]
    #[test_case(1, &[(0, 3), (2, 9)], &[(1, 0), (5, 5)])]
    #[test_case(2, &[(1, 0), (7, 3), (2, 6)], &[(0, 1), (0, 5)])]
    #[test_case(3, &[(0, 0), (1, 2), (4, 5)], &[(1, 1), (2, 2)])]
    #[test_case(4, &[(0, 0), (1, 2), (2, 3)], &[(0, 3), (2, 0)])]
    #[test_case(5, &[(0, 0), (6, 1), (2, 3)], &[(1, 1), (2, 2)])]
    #[test_case(6, &[(0, 0), (1, 1), (2, 4)], &[(1, 3), (1, 5)])]
    #[test_case(7, &[(0, 0), (0, 2), (1, 3)], &[(0, 1), (2, 2)])]
    fn test_mask_functions(pattern: u8, dark: &[(i16, i16)], light: &[(i16, i16)]) {
        let mask_fn = MaskPattern::new(pattern).unwrap().mask_functions();
        for &(r, c) in dark {
            assert!(mask_fn(r, c), "Pattern {pattern} should flip ({r}, {c})");
        }
        for &(r, c) in light {
            assert!(!mask_fn(r, c), "Pattern {pattern} shouldn't flip ({r}, {c})");
        }
    }
}

// Scoring
//------------------------------------------------------------------------------

/// Penalty rule used to rank the mask trials.
#[derive(Debug, PartialEq, Eq, Copy, Clone, Default)]
pub enum Scoring {
    /// Same-coloured neighbours among the 8 adjacent modules; a module with
    /// more than 5 adds `3 + (count - 5)`.
    #[default]
    Adjacency,
    /// Runs, 2x2 blocks, finder-like sequences and dark module balance.
    Standard,
}

pub fn compute_total_penalty(qr: &QR, scoring: Scoring) -> u32 {
    match scoring {
        Scoring::Adjacency => compute_neighbour_penalty(qr),
        Scoring::Standard => {
            let adj_pen = compute_adjacent_penalty(qr);
            let blk_pen = compute_block_penalty(qr);
            let fp_pen_h = compute_finder_pattern_penalty(qr, true);
            let fp_pen_v = compute_finder_pattern_penalty(qr, false);
            let bal_pen = compute_balance_penalty(qr);
            adj_pen + blk_pen + fp_pen_h + fp_pen_v + bal_pen
        }
    }
}

fn compute_neighbour_penalty(qr: &QR) -> u32 {
    let mut pen = 0;
    let w = qr.width() as i16;
    for r in 0..w {
        for c in 0..w {
            let clr = *qr.get(r, c);
            let mut same = 0;
            for dr in -1..=1 {
                for dc in -1..=1 {
                    let (nr, nc) = (r + dr, c + dc);
                    if (dr, dc) == (0, 0) || !(0..w).contains(&nr) || !(0..w).contains(&nc) {
                        continue;
                    }
                    if *qr.get(nr, nc) == clr {
                        same += 1;
                    }
                }
            }
            if same > 5 {
                pen += 3 + (same - 5);
            }
        }
    }
    pen
}

fn compute_adjacent_penalty(qr: &QR) -> u32 {
    let mut pen = 0;
    let w = qr.width();
    let mut cols = vec![(Color::Dark, 0); w];
    for r in 0..w {
        let mut last = Color::Dark;
        let mut consec_row_len = 0;
        for (c, col) in cols.iter_mut().enumerate() {
            let clr = *qr.get(r as i16, c as i16);
            if last != clr {
                last = clr;
                consec_row_len = 0;
            }
            consec_row_len += 1;
            pen += run_penalty(consec_row_len);
            if col.0 != clr {
                col.0 = clr;
                col.1 = 0;
            }
            col.1 += 1;
            pen += run_penalty(col.1);
        }
    }
    pen
}

// 3 once a run reaches 5, then 1 for each extra module
fn run_penalty(run_len: u32) -> u32 {
    match run_len {
        5 => 3,
        n if n > 5 => 1,
        _ => 0,
    }
}

fn compute_block_penalty(qr: &QR) -> u32 {
    let mut pen = 0;
    let w = qr.width() as i16;
    for r in 0..w - 1 {
        for c in 0..w - 1 {
            let clr = *qr.get(r, c);
            if clr == *qr.get(r + 1, c) && clr == *qr.get(r, c + 1) && clr == *qr.get(r + 1, c + 1)
            {
                pen += 3;
            }
        }
    }
    pen
}

fn compute_finder_pattern_penalty(qr: &QR, is_hor: bool) -> u32 {
    static PATTERN: [Color; 7] = [
        Color::Dark,
        Color::Light,
        Color::Dark,
        Color::Dark,
        Color::Dark,
        Color::Light,
        Color::Dark,
    ];

    let mut pen = 0;
    let w = qr.width() as i16;
    for i in 0..w {
        let get = |x: i16| if is_hor { *qr.get(i, x) } else { *qr.get(x, i) };
        // Outside of the symbol counts as light
        let is_light = |x: i16| x < 0 || x >= w || get(x) == Color::Light;
        for j in 0..w - 6 {
            if (j..j + 7).map(get).eq(PATTERN.iter().copied())
                && ((j - 4..j).all(is_light) || (j + 7..j + 11).all(is_light))
            {
                pen += 40;
            }
        }
    }
    pen
}

fn compute_balance_penalty(qr: &QR) -> u32 {
    let dark_cnt = qr.count_dark_modules();
    let w = qr.width();
    let percent = (dark_cnt * 100 / (w * w)) as i32;
    ((percent - 50).unsigned_abs() / 5) * 10
}

#[cfg(test)]
mod penalty_tests {
    use super::{
        compute_balance_penalty, compute_finder_pattern_penalty, compute_total_penalty, Scoring,
    };
    use crate::builder::{Module, QR};
    use crate::common::metadata::{Color, ECLevel, Version};

    fn filled_qr(f: impl Fn(i16, i16) -> bool) -> QR {
        let mut qr = QR::new(Version::new(1).unwrap(), ECLevel::L);
        let w = qr.width() as i16;
        for r in 0..w {
            for c in 0..w {
                qr.set(r, c, Module::Data(Color::from(f(r, c))));
            }
        }
        qr
    }

    #[test]
    fn test_uniform_grid() {
        let qr = filled_qr(|_, _| false);
        // 19 * 19 interior modules with 8 equal neighbours
        assert_eq!(compute_total_penalty(&qr, Scoring::Adjacency), 19 * 19 * 6);
        // Runs: 42 lines of 21, blocks: 20 * 20, balance: 0% dark
        assert_eq!(compute_total_penalty(&qr, Scoring::Standard), 42 * 19 + 400 * 3 + 100);
    }

    #[test]
    fn test_checkerboard_grid() {
        let qr = filled_qr(|r, c| (r + c) & 1 == 0);
        assert_eq!(compute_total_penalty(&qr, Scoring::Adjacency), 0);
        assert_eq!(compute_total_penalty(&qr, Scoring::Standard), 0);
    }

    #[test]
    fn test_finder_pattern_penalty() {
        let pattern = [true, false, true, true, true, false, true];
        let qr = filled_qr(|r, c| r == 10 && (c as usize) < 7 && pattern[c as usize]);
        assert_eq!(compute_finder_pattern_penalty(&qr, true), 40);
        assert_eq!(compute_finder_pattern_penalty(&qr, false), 0);

        // No light margin on either side
        let qr = filled_qr(|r, c| {
            r == 10 && (c < 2 || c > 12 || ((4..11).contains(&c) && pattern[c as usize - 4]))
        });
        assert_eq!(compute_finder_pattern_penalty(&qr, true), 0);
    }

    #[test]
    fn test_balance_penalty() {
        let qr = filled_qr(|r, _| r < 7);
        // 147 of 441 modules dark, 33%
        assert_eq!(compute_balance_penalty(&qr), 30);
        let qr = filled_qr(|_, _| true);
        assert_eq!(compute_balance_penalty(&qr), 100);
    }
}

// Mask selection
//------------------------------------------------------------------------------

/// Scores every mask on an independent test-mode matrix built from the
/// codewords.
pub fn compute_mask_penalties(
    ver: Version,
    ecl: ECLevel,
    codewords: &[u8],
    scoring: Scoring,
) -> [u32; 8] {
    let trial = |m: MaskPattern| {
        let qr = QR::assemble(ver, ecl, codewords, m, true);
        let pen = compute_total_penalty(&qr, scoring);
        trace!("Mask {} penalty {pen}", *m);
        pen
    };
    run_trials(trial)
}

#[cfg(not(feature = "parallel"))]
fn run_trials(trial: impl Fn(MaskPattern) -> u32) -> [u32; 8] {
    std::array::from_fn(|m| trial(MaskPattern(m as u8)))
}

#[cfg(feature = "parallel")]
fn run_trials(trial: impl Fn(MaskPattern) -> u32 + Sync) -> [u32; 8] {
    use rayon::prelude::*;

    let scores = (0..8u8).into_par_iter().map(|m| trial(MaskPattern(m))).collect::<Vec<_>>();
    let mut res = [0; 8];
    res.copy_from_slice(&scores);
    res
}

/// Lowest penalty wins, lowest index on ties.
pub fn select_best_mask(penalties: &[u32; 8]) -> MaskPattern {
    let best = (0..8u8).min_by_key(|&m| (penalties[m as usize], m)).unwrap_or(0);
    MaskPattern(best)
}
