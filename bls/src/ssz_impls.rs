use ssz::{Decode, DecodeError, Encode};
use tree_hash::{Hash256, PackedEncoding, TreeHash, TreeHashType, BYTES_PER_CHUNK};

use crate::{
    consts::{PUBLIC_KEY_SIZE, SIGNATURE_SIZE},
    public_key_bytes::PublicKeyBytes,
    signature_bytes::SignatureBytes,
};

// Compressed points are SSZ byte vectors of a fixed length.
macro_rules! impl_ssz_for_byte_vector {
    ($name:ident, $size:expr) => {
        impl Encode for $name {
            #[inline]
            fn is_ssz_fixed_len() -> bool {
                true
            }

            #[inline]
            fn ssz_fixed_len() -> usize {
                $size
            }

            #[inline]
            fn ssz_bytes_len(&self) -> usize {
                $size
            }

            #[inline]
            fn ssz_append(&self, buffer: &mut Vec<u8>) {
                buffer.extend_from_slice(self.as_bytes());
            }
        }

        impl Decode for $name {
            #[inline]
            fn is_ssz_fixed_len() -> bool {
                true
            }

            #[inline]
            fn ssz_fixed_len() -> usize {
                $size
            }

            fn from_ssz_bytes(bytes: &[u8]) -> Result<Self, DecodeError> {
                if bytes.len() != $size {
                    return Err(DecodeError::InvalidByteLength {
                        len: bytes.len(),
                        expected: $size,
                    });
                }

                Ok(Self::from_slice(bytes))
            }
        }

        impl TreeHash for $name {
            fn tree_hash_type() -> TreeHashType {
                TreeHashType::Vector
            }

            fn tree_hash_packed_encoding(&self) -> PackedEncoding {
                unreachable!("byte vectors are never packed")
            }

            fn tree_hash_packing_factor() -> usize {
                unreachable!("byte vectors are never packed")
            }

            fn tree_hash_root(&self) -> Hash256 {
                tree_hash::merkle_root(self.as_bytes(), $size.div_ceil(BYTES_PER_CHUNK))
            }
        }
    };
}

impl_ssz_for_byte_vector!(PublicKeyBytes, PUBLIC_KEY_SIZE);
impl_ssz_for_byte_vector!(SignatureBytes, SIGNATURE_SIZE);
