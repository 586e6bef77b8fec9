//! # qrmatrix
//!
//! A Rust library for encoding byte payloads into QR symbol matrices (versions 1 to 10) with
//! Reed-Solomon error correction.
//!
//! ## Features
//!
//! - **Byte mode encoding**: One or more 8-bit segments, with automatic version selection
//! - **Reed-Solomon Error Correction**: Configurable levels (L, M, Q, H) with block interleaving
//! - **Mask optimisation**: All 8 masks are scored and the lowest penalty wins
//! - **Module access**: Query the finished matrix module by module
//!
//! ## Quick Start
//!
//! ```rust
//! use qrmatrix::{ECLevel, QRBuilder};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut builder = QRBuilder::new(ECLevel::M);
//! builder.add_data(b"Hello, World!");
//! let qr = builder.build()?;
//!
//! assert_eq!(qr.width(), 21);
//! assert!(qr.is_dark(0, 0)?);
//! # Ok(())
//! # }
//! ```
//!
//! ### Full Configuration
//!
//! ```rust
//! use qrmatrix::{ECLevel, MaskPattern, Overflow, QRBuilder, Scoring, Version};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut builder = QRBuilder::create(0, "Q".parse::<ECLevel>()?)?;
//! builder
//!     .version(Version::new(3)?)      // Pin the version, smallest fitting version otherwise
//!     .mask(MaskPattern::new(5)?)     // Pin the mask, lowest penalty otherwise
//!     .scoring(Scoring::Standard)     // Penalty rule for mask trials, Scoring::Adjacency by default
//!     .overflow(Overflow::Reject)     // Fail on oversized data, Overflow::Clamp truncates instead
//!     .add_text("Grüße")?;
//!
//! let qr = builder.build()?;
//! for r in 0..qr.width() {
//!     let row = (0..qr.width()).map(|c| if qr.is_dark(r, c).unwrap_or(false) { '#' } else { ' ' });
//!     println!("{}", row.collect::<String>());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Correction Levels
//! - **L (Low)**: ~7% error correction
//! - **M (Medium)**: ~15% error correction
//! - **Q (Quartile)**: ~25% error correction
//! - **H (High)**: ~30% error correction

pub mod builder;
pub(crate) mod common;

pub use builder::{Module, QRBuilder, QR};
pub use common::codec::Overflow;
pub use common::error::{QRError, QRResult};
pub use common::mask::{MaskPattern, Scoring};
pub use common::metadata::{Color, ECLevel, Version};
