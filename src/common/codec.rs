use log::{debug, warn};

use super::bitstream::BitStream;
use super::error::{QRError, QRResult};
use super::metadata::{ECLevel, Version};

// Mode
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum Mode {
    Byte = 0b0100,
}

impl Mode {
    pub const BITS: usize = 4;
}

// Segment
//------------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub mode: Mode,
    pub data: Vec<u8>,
}

impl Segment {
    pub fn new(data: &[u8]) -> Self {
        Self { mode: Mode::Byte, data: data.to_vec() }
    }

    pub fn bit_len(&self, ver: Version) -> usize {
        Mode::BITS + ver.char_cnt_bits() + (self.data.len() << 3)
    }
}

#[cfg(test)]
mod segment_tests {
    use super::Segment;
    use crate::common::bitstream::BitStream;
    use crate::common::metadata::Version;

    #[test]
    fn test_bit_len_byte_mode_1() {
        let seg = Segment::new(b"a");
        assert_eq!(seg.bit_len(Version::new(1).unwrap()), 20);
    }

    #[test]
    fn test_bit_len_byte_mode_10() {
        let seg = Segment::new(b"ab");
        assert_eq!(seg.bit_len(Version::new(10).unwrap()), 36);
    }

    #[test]
    fn test_bit_len_matches_written_bits() {
        let seg = Segment::new(&[0x5A; 37]);
        for ver in Version::all() {
            let mut bs = BitStream::new(0);
            super::writer::push_segment(&seg, ver, &mut bs);
            assert_eq!(seg.bit_len(ver), bs.len());
        }
    }
}

// Overflow policy
//------------------------------------------------------------------------------

/// What to do when the data doesn't fit the chosen (or largest) version.
#[derive(Debug, PartialEq, Eq, Copy, Clone, Default)]
pub enum Overflow {
    /// Fail with [`QRError::DataTooLong`].
    #[default]
    Reject,
    /// Fall back to the largest version and truncate the data stream to its
    /// capacity.
    Clamp,
}

// Encoder
//------------------------------------------------------------------------------

/// Serializes the segments into a data bit stream padded to the data
/// capacity of the version.
pub fn encode_with_version(
    segs: &[Segment],
    ver: Version,
    ecl: ECLevel,
    overflow: Overflow,
) -> QRResult<BitStream> {
    let bcap = ver.data_bit_capacity(ecl);
    let mut bs = BitStream::new(bcap);
    for seg in segs {
        writer::push_segment(seg, ver, &mut bs);
    }

    if bs.len() > bcap {
        match overflow {
            Overflow::Reject => return Err(QRError::DataTooLong),
            Overflow::Clamp => {
                warn!(
                    "Data of {} bits exceeds capacity of version {} {ecl:?}, truncating to {bcap} bits",
                    bs.len(),
                    *ver
                );
                bs.truncate(bcap);
            }
        }
    }

    writer::push_terminator(&mut bs);
    writer::pad_remaining_capacity(&mut bs);
    Ok(bs)
}

/// Finds the smallest version whose data capacity fits the segments.
pub fn find_version(segs: &[Segment], ecl: ECLevel, overflow: Overflow) -> QRResult<Version> {
    for ver in Version::all() {
        let bit_len = segs.iter().map(|s| s.bit_len(ver)).sum::<usize>();
        let bcap = ver.data_bit_capacity(ecl);
        if bit_len <= bcap {
            debug!("Version {} fits {bit_len} bits in capacity {bcap}", *ver);
            return Ok(ver);
        }
    }

    match overflow {
        Overflow::Reject => Err(QRError::DataTooLong),
        Overflow::Clamp => {
            warn!("Data doesn't fit any version at {ecl:?}, falling back to version {}", *Version::MAX);
            Ok(Version::MAX)
        }
    }
}

#[cfg(test)]
mod encode_tests {
    use test_case::test_case;

    use super::{encode_with_version, find_version, Overflow, Segment};
    use crate::common::error::QRError;
    use crate::common::metadata::{ECLevel, Version};

    #[test]
    fn test_encode_single_byte() {
        let segs = [Segment::new(b"A")];
        let ver = Version::new(1).unwrap();
        let bs = encode_with_version(&segs, ver, ECLevel::M, Overflow::Reject).unwrap();
        assert_eq!(bs.len(), 128);
        assert_eq!(
            bs.data(),
            b"\x40\x14\x10\xec\x11\xec\x11\xec\x11\xec\x11\xec\x11\xec\x11\xec"
        );
    }

    #[test]
    fn test_encode_multiple_segments() {
        let segs = [Segment::new(b"ab"), Segment::new(b"")];
        let ver = Version::new(1).unwrap();
        let bs = encode_with_version(&segs, ver, ECLevel::H, Overflow::Reject).unwrap();
        // 0100 00000010 01100001 01100010 | 0100 00000000 | 0000
        assert_eq!(&bs.data()[..6], b"\x40\x26\x16\x24\x00\x00");
        assert_eq!(&bs.data()[6..], b"\xec\x11\xec");
    }

    #[test]
    fn test_encode_empty() {
        let ver = Version::new(1).unwrap();
        let bs = encode_with_version(&[], ver, ECLevel::L, Overflow::Reject).unwrap();
        assert_eq!(bs.len(), 19 * 8);
        assert_eq!(&bs.data()[..3], b"\x00\xec\x11");
    }

    #[test]
    fn test_encode_16_bit_length() {
        let segs = [Segment::new(b"xy")];
        let ver = Version::new(10).unwrap();
        let bs = encode_with_version(&segs, ver, ECLevel::H, Overflow::Reject).unwrap();
        assert_eq!(&bs.data()[..5], b"\x40\x00\x27\x87\x90");
    }

    #[test]
    fn test_encode_terminator_fills_capacity() {
        // 4 + 8 + 17 * 8 = 148 bits of 152, terminator takes the remaining 4
        let data = [0xFFu8; 17];
        let segs = [Segment::new(&data)];
        let ver = Version::new(1).unwrap();
        let bs = encode_with_version(&segs, ver, ECLevel::L, Overflow::Reject).unwrap();
        assert_eq!(bs.len(), 152);
        assert_eq!(bs.data()[18], 0xF0);
    }

    #[test]
    fn test_encode_overflow() {
        let data = [0u8; 20];
        let segs = [Segment::new(&data)];
        let ver = Version::new(1).unwrap();
        let res = encode_with_version(&segs, ver, ECLevel::L, Overflow::Reject);
        assert_eq!(res, Err(QRError::DataTooLong));

        let bs = encode_with_version(&segs, ver, ECLevel::L, Overflow::Clamp).unwrap();
        assert_eq!(bs.len(), 152);
    }

    #[test_case(0, ECLevel::M, 1)]
    #[test_case(14, ECLevel::M, 1)]
    #[test_case(15, ECLevel::M, 2)]
    #[test_case(17, ECLevel::L, 1)]
    #[test_case(18, ECLevel::L, 2)]
    #[test_case(7, ECLevel::H, 1)]
    #[test_case(8, ECLevel::H, 2)]
    #[test_case(230, ECLevel::L, 9)]
    #[test_case(271, ECLevel::L, 10)]
    #[test_case(119, ECLevel::H, 10)]
    fn test_find_version(len: usize, ecl: ECLevel, exp: u8) {
        let data = vec![b'x'; len];
        let segs = [Segment::new(&data)];
        let ver = find_version(&segs, ecl, Overflow::Reject).unwrap();
        assert_eq!(*ver, exp);
    }

    #[test]
    fn test_find_version_overflow() {
        let data = vec![b'x'; 272];
        let segs = [Segment::new(&data)];
        assert_eq!(find_version(&segs, ECLevel::L, Overflow::Reject), Err(QRError::DataTooLong));
        assert_eq!(find_version(&segs, ECLevel::L, Overflow::Clamp), Ok(Version::MAX));
    }

    #[test]
    fn test_find_version_monotonic() {
        for ecl in [ECLevel::L, ECLevel::M, ECLevel::Q, ECLevel::H] {
            let mut last = Version::MIN;
            for len in 0..300 {
                let data = vec![0u8; len];
                let segs = [Segment::new(&data)];
                match find_version(&segs, ecl, Overflow::Reject) {
                    Ok(ver) => {
                        assert!(ver >= last, "Version decreased at len {len} {ecl:?}");
                        last = ver;
                    }
                    Err(e) => assert_eq!(e, QRError::DataTooLong),
                }
            }
        }
    }
}

// Writer for encoded data
//------------------------------------------------------------------------------

pub(super) mod writer {
    use log::warn;

    use super::{Mode, Segment};
    use crate::common::bitstream::BitStream;
    use crate::common::metadata::Version;

    pub fn push_segment(seg: &Segment, ver: Version, out: &mut BitStream) {
        push_header(seg, ver, out);
        match seg.mode {
            Mode::Byte => push_byte_data(&seg.data, out),
        }
    }

    fn push_header(seg: &Segment, ver: Version, out: &mut BitStream) {
        out.push_bits(seg.mode as u8, Mode::BITS);
        let len_bits = ver.char_cnt_bits();
        let max_cnt = (1usize << len_bits) - 1;
        let mut char_cnt = seg.data.len();
        if char_cnt > max_cnt {
            warn!("Segment of {char_cnt} bytes overflows {len_bits} bit length field");
            char_cnt &= max_cnt;
        }
        out.push_bits(char_cnt as u16, len_bits);
    }

    fn push_byte_data(data: &[u8], out: &mut BitStream) {
        out.extend(data);
    }

    pub fn push_terminator(out: &mut BitStream) {
        let bit_len = out.len();
        let bit_capacity = out.capacity();
        if bit_len < bit_capacity {
            let term_len = std::cmp::min(4, bit_capacity - bit_len);
            out.push_bits(0u8, term_len);
        }
    }

    pub fn pad_remaining_capacity(out: &mut BitStream) {
        push_padding_bits(out);
        push_padding_codewords(out);
    }

    fn push_padding_bits(out: &mut BitStream) {
        let offset = out.len() & 7;
        if offset > 0 {
            let padding_bits_len = 8 - offset;
            out.push_bits(0u8, padding_bits_len);
        }
    }

    fn push_padding_codewords(out: &mut BitStream) {
        let offset = out.len() & 7;
        debug_assert!(offset == 0, "Bit offset should be zero before padding codewords: {offset}");

        let remain_byte_capacity = out.capacity().saturating_sub(out.len()) >> 3;
        PADDING_CODEWORDS.iter().copied().cycle().take(remain_byte_capacity).for_each(|pc| {
            out.push_bits(pc, 8);
        });
    }

    static PADDING_CODEWORDS: [u8; 2] = [0b1110_1100, 0b0001_0001];

}
