mod block;
pub mod galois;
pub mod poly;

pub use block::ecc;
