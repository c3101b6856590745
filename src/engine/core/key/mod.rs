pub mod codec;
pub mod mask;
pub mod sort;
pub mod structure;

pub use codec::{BitPackedKeyGenerator, KeyCodecError, KeyGenerator};
pub use structure::KeyStructureInfo;

#[cfg(test)]
mod mask_test;
#[cfg(test)]
mod sort_test;
