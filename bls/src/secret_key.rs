use blst::min_pk::SecretKey as RawSecretKey;

use crate::{
    consts::{DOMAIN_SEPARATION_TAG, SECRET_KEY_SIZE},
    error::Error,
    public_key::PublicKey,
    signature::Signature,
};

// `RawSecretKey` zeroizes itself on drop.
pub struct SecretKey(RawSecretKey);

impl TryFrom<[u8; SECRET_KEY_SIZE]> for SecretKey {
    type Error = Error;

    #[inline]
    fn try_from(bytes: [u8; SECRET_KEY_SIZE]) -> Result<Self, Self::Error> {
        RawSecretKey::from_bytes(&bytes)
            .map(Self)
            .map_err(|_| Error::InvalidSecretKey)
    }
}

impl SecretKey {
    #[inline]
    #[must_use]
    pub fn to_public_key(&self) -> PublicKey {
        self.0.sk_to_pk().into()
    }

    #[inline]
    #[must_use]
    pub fn sign(&self, message: impl AsRef<[u8]>) -> Signature {
        self.0
            .sign(message.as_ref(), DOMAIN_SEPARATION_TAG, &[])
            .into()
    }
}
