use blst::{
    min_pk::{AggregateSignature as RawAggregateSignature, Signature as RawSignature},
    BLST_ERROR,
};
use derive_more::From;
use itertools::Itertools as _;

use crate::{
    consts::DOMAIN_SEPARATION_TAG, error::Error, public_key::PublicKey,
    signature_bytes::SignatureBytes,
};

#[derive(Clone, Copy, PartialEq, Eq, Debug, From)]
pub struct Signature(RawSignature);

impl TryFrom<SignatureBytes> for Signature {
    type Error = Error;

    #[inline]
    fn try_from(bytes: SignatureBytes) -> Result<Self, Self::Error> {
        RawSignature::uncompress(bytes.as_bytes())
            .map(Self)
            .map_err(|_| Error::InvalidSignature)
    }
}

impl Signature {
    #[must_use]
    pub fn verify(&self, message: impl AsRef<[u8]>, public_key: &PublicKey) -> bool {
        let result = self.as_raw().verify(
            true,
            message.as_ref(),
            DOMAIN_SEPARATION_TAG,
            &[],
            public_key.as_raw(),
            false,
        );

        result == BLST_ERROR::BLST_SUCCESS
    }

    /// Verifies an aggregate signature of the same message by all of `public_keys`.
    ///
    /// Returns `false` when `public_keys` is empty.
    #[must_use]
    pub fn fast_aggregate_verify<'keys>(
        &self,
        message: impl AsRef<[u8]>,
        public_keys: impl IntoIterator<Item = &'keys PublicKey>,
    ) -> bool {
        let public_keys = public_keys.into_iter().map(PublicKey::as_raw).collect_vec();

        if public_keys.is_empty() {
            return false;
        }

        let result = self.as_raw().fast_aggregate_verify(
            true,
            message.as_ref(),
            DOMAIN_SEPARATION_TAG,
            public_keys.as_slice(),
        );

        result == BLST_ERROR::BLST_SUCCESS
    }

    #[inline]
    pub fn aggregate_in_place(&mut self, other: Self) {
        let mut self_aggregate = RawAggregateSignature::from_signature(self.as_raw());
        let other_aggregate = RawAggregateSignature::from_signature(other.as_raw());
        self_aggregate.add_aggregate(&other_aggregate);
        self.0 = self_aggregate.to_signature();
    }

    pub(crate) const fn as_raw(&self) -> &RawSignature {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use tap::TryConv as _;

    use crate::{PublicKeyBytes, SecretKey};

    use super::*;

    const MESSAGE: &str = "foo";

    #[test]
    fn signature_verify_succeeds_on_correct_triple() {
        let secret_key = secret_key(1);
        let public_key = secret_key.to_public_key();
        let signature = secret_key.sign(MESSAGE);

        assert!(signature.verify(MESSAGE, &public_key));
    }

    #[test]
    fn signature_verify_fails_on_incorrect_public_key() {
        let signature = secret_key(1).sign(MESSAGE);
        let public_key = secret_key(2).to_public_key();

        assert!(!signature.verify(MESSAGE, &public_key));
    }

    #[test]
    fn fast_aggregate_verify_succeeds_for_all_signers() {
        let secret_keys = [secret_key(1), secret_key(2), secret_key(3)];
        let public_keys = secret_keys.iter().map(SecretKey::to_public_key).collect_vec();

        let mut aggregate = secret_keys[0].sign(MESSAGE);

        for secret_key in &secret_keys[1..] {
            aggregate.aggregate_in_place(secret_key.sign(MESSAGE));
        }

        assert!(aggregate.fast_aggregate_verify(MESSAGE, &public_keys));
        assert!(!aggregate.fast_aggregate_verify(MESSAGE, &public_keys[1..]));
        assert!(!aggregate.fast_aggregate_verify(MESSAGE, []));
    }

    #[test]
    fn signature_survives_compression() -> Result<(), Error> {
        let signature = secret_key(1).sign(MESSAGE);
        let bytes = SignatureBytes::from(signature);

        assert_eq!(bytes.try_conv::<Signature>()?, signature);

        Ok(())
    }

    #[test]
    fn zero_public_key_is_rejected() {
        assert_eq!(
            PublicKey::try_from(PublicKeyBytes::zero()),
            Err(Error::InvalidPublicKey),
        );
    }

    #[test]
    fn signature_bytes_serialize_as_prefixed_hex() -> Result<(), serde_json::Error> {
        let json = serde_json::to_string(&SignatureBytes::empty())?;

        assert!(json.starts_with("\"0xc000"));

        Ok(())
    }

    fn secret_key(seed: u8) -> SecretKey {
        [seed; 32]
            .try_conv::<SecretKey>()
            .expect("bytes encode a valid secret key")
    }
}
