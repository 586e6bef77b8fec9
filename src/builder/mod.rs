mod qr;

pub use qr::{Module, QR};

use encoding_rs::WINDOWS_1252;
use log::debug;

use crate::common::{
    codec::{encode_with_version, find_version, Overflow, Segment},
    ec::ecc,
    error::{QRError, QRResult},
    mask::{compute_mask_penalties, select_best_mask, MaskPattern, Scoring},
    metadata::{ECLevel, Version},
};

// Interleaved data & error correction codewords for a version
#[derive(Debug, Clone, PartialEq, Eq)]
struct Encoded {
    ver: Version,
    codewords: Vec<u8>,
}

/// Accumulates byte segments and builds the QR symbol.
///
/// Encoded codewords are cached between builds; changing the data, version,
/// ec level or overflow policy drops the cache.
#[derive(Debug, Clone)]
pub struct QRBuilder {
    segments: Vec<Segment>,
    version: Option<Version>,
    ec_level: ECLevel,
    mask: Option<MaskPattern>,
    scoring: Scoring,
    overflow: Overflow,
    cache: Option<Encoded>,
    penalties: Option<[u32; 8]>,
    qr: Option<QR>,
}

impl QRBuilder {
    pub fn new(ec_level: ECLevel) -> Self {
        Self {
            segments: Vec::new(),
            version: None,
            ec_level,
            mask: None,
            scoring: Scoring::default(),
            overflow: Overflow::default(),
            cache: None,
            penalties: None,
            qr: None,
        }
    }

    /// `version_hint` 0 picks the smallest fitting version, 1 to 10 pins it.
    pub fn create(version_hint: u8, ec_level: ECLevel) -> QRResult<Self> {
        let mut builder = Self::new(ec_level);
        if version_hint != 0 {
            builder.version(Version::new(version_hint)?);
        }
        Ok(builder)
    }

    pub fn version(&mut self, version: Version) -> &mut Self {
        self.version = Some(version);
        self.invalidate();
        self
    }

    pub fn unset_version(&mut self) -> &mut Self {
        self.version = None;
        self.invalidate();
        self
    }

    pub fn ec_level(&mut self, ec_level: ECLevel) -> &mut Self {
        self.ec_level = ec_level;
        self.invalidate();
        self
    }

    pub fn mask(&mut self, mask: MaskPattern) -> &mut Self {
        self.mask = Some(mask);
        self
    }

    pub fn unset_mask(&mut self) -> &mut Self {
        self.mask = None;
        self
    }

    pub fn scoring(&mut self, scoring: Scoring) -> &mut Self {
        self.scoring = scoring;
        self.penalties = None;
        self
    }

    pub fn overflow(&mut self, overflow: Overflow) -> &mut Self {
        self.overflow = overflow;
        self.invalidate();
        self
    }

    pub fn add_data(&mut self, data: &[u8]) -> &mut Self {
        self.segments.push(Segment::new(data));
        self.invalidate();
        self
    }

    /// Appends the text as one ISO-8859-1 byte segment.
    pub fn add_text(&mut self, text: &str) -> QRResult<&mut Self> {
        let (bytes, _, had_errors) = WINDOWS_1252.encode(text);
        if had_errors {
            return Err(QRError::InvalidChar);
        }
        Ok(self.add_data(&bytes))
    }

    pub fn metadata(&self) -> String {
        let ver = self.version.map_or("None".to_string(), |v| (*v).to_string());
        let mask = self.mask.map_or("None".to_string(), |m| (*m).to_string());
        format!(
            "{{ Version: {ver}, Ec level: {:?}, Mask: {mask}, Scoring: {:?}, Overflow: {:?} }}",
            self.ec_level, self.scoring, self.overflow
        )
    }

    fn invalidate(&mut self) {
        self.cache = None;
        self.penalties = None;
    }
}


// Build
//------------------------------------------------------------------------------

impl QRBuilder {
    /// Encodes the segments, picks the mask and commits the symbol. On error
    /// the previously built symbol is kept.
    pub fn build(&mut self) -> QRResult<&QR> {
        debug!("Generating QR {}", self.metadata());

        let mask = match self.mask {
            Some(m) => {
                debug!("Using mask {}", *m);
                m
            }
            None => {
                debug!("Finding best mask...");
                let mask = select_best_mask(&self.mask_penalties()?);
                debug!("Best mask {}", *mask);
                mask
            }
        };

        let ecl = self.ec_level;
        let enc = self.encoded()?;
        debug!("Drawing version {} symbol with mask {}...", *enc.ver, *mask);
        let qr = QR::assemble(enc.ver, ecl, &enc.codewords, mask, false);

        let total_modules = qr.width() * qr.width();
        let dark_modules = qr.count_dark_modules();
        debug!(
            "QR generated: Width {}, Dark modules {dark_modules}, Balance {}%",
            qr.width(),
            dark_modules * 100 / total_modules
        );

        Ok(&*self.qr.insert(qr))
    }

    /// Penalty of each mask trial, indexed by mask pattern.
    pub fn mask_penalties(&mut self) -> QRResult<[u32; 8]> {
        if let Some(penalties) = self.penalties {
            return Ok(penalties);
        }
        let (ecl, scoring) = (self.ec_level, self.scoring);
        let enc = self.encoded()?;
        let penalties = compute_mask_penalties(enc.ver, ecl, &enc.codewords, scoring);
        self.penalties = Some(penalties);
        Ok(penalties)
    }

    pub fn qr(&self) -> Option<&QR> {
        self.qr.as_ref()
    }

    /// Width of the last built symbol, 0 before the first build.
    pub fn width(&self) -> usize {
        self.qr.as_ref().map_or(0, QR::width)
    }

    /// Always light before the first build.
    pub fn is_dark(&self, r: usize, c: usize) -> QRResult<bool> {
        match &self.qr {
            Some(qr) => qr.is_dark(r, c),
            None => Ok(false),
        }
    }

    fn encoded(&mut self) -> QRResult<&Encoded> {
        let enc = match self.cache.take() {
            Some(enc) => enc,
            None => self.encode()?,
        };
        Ok(&*self.cache.insert(enc))
    }

    fn encode(&self) -> QRResult<Encoded> {
        let ecl = self.ec_level;
        let ver = match self.version {
            Some(v) => v,
            None => {
                debug!("Finding best version...");
                find_version(&self.segments, ecl, self.overflow)?
            }
        };

        debug!("Encoding data for version {}...", *ver);
        let data = encode_with_version(&self.segments, ver, ecl, self.overflow)?;

        debug!("Computing error correction & interleaving...");
        let codewords = ecc(data.data(), ver, ecl)?;

        Ok(Encoded { ver, codewords })
    }
}
