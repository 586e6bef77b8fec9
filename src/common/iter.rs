use super::metadata::Version;

// Iterator for placing data in encoding region of QR
//------------------------------------------------------------------------------

const VERT_TIMING_COL: i16 = 6;

/// Zig-zag over column pairs from the bottom right corner, right column
/// first. Function modules are visited too; callers skip them.
pub struct EncRegionIter {
    r: i16,
    // Right column of the current pair
    c: i16,
    width: i16,
    upward: bool,
    left: bool,
}

impl EncRegionIter {
    pub const fn new(version: Version) -> Self {
        let w = version.width() as i16;
        Self { r: w - 1, c: w - 1, width: w, upward: true, left: false }
    }

    fn advance(&mut self) {
        if !self.left {
            self.left = true;
            return;
        }
        self.left = false;

        let edge = if self.upward { 0 } else { self.width - 1 };
        if self.r == edge {
            self.upward = !self.upward;
            self.c -= 2;
            if self.c == VERT_TIMING_COL {
                self.c -= 1;
            }
        } else if self.upward {
            self.r -= 1;
        } else {
            self.r += 1;
        }
    }
}

impl Iterator for EncRegionIter {
    type Item = (i16, i16);
    fn next(&mut self) -> Option<Self::Item> {
        if self.c < 1 {
            return None;
        }
        let res = (self.r, self.c - self.left as i16);
        self.advance();
        Some(res)
    }
}
