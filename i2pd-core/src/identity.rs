use std::fmt;
use std::fs;
use std::path::Path;

use data_encoding::BASE32_NOPAD;
use sha2::{Digest, Sha256};
use tracing::debug;

use crate::error::KeyError;
use crate::keys::{CryptoKeyType, SigningKeyType};

pub const IDENT_HASH_LEN: usize = 32;

const PUBLIC_KEY_AREA_LEN: usize = 256;
const SIGNING_KEY_AREA_LEN: usize = 128;
const CERTIFICATE_HEADER_LEN: usize = 3;
const STANDARD_IDENTITY_LEN: usize =
    PUBLIC_KEY_AREA_LEN + SIGNING_KEY_AREA_LEN + CERTIFICATE_HEADER_LEN;
const KEY_CERTIFICATE_TYPES_LEN: usize = 4;

const CERTIFICATE_TYPE_NULL: u8 = 0;
const CERTIFICATE_TYPE_KEY: u8 = 5;

/// SHA-256 of a serialized identity.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct IdentHash([u8; IDENT_HASH_LEN]);

impl IdentHash {
    pub fn digest(data: &[u8]) -> Self {
        let mut hash = [0u8; IDENT_HASH_LEN];
        hash.copy_from_slice(&Sha256::digest(data));
        IdentHash(hash)
    }

    pub fn as_bytes(&self) -> &[u8; IDENT_HASH_LEN] {
        &self.0
    }

    /// Lowercase, unpadded base32 (52 characters).
    pub fn to_base32(&self) -> String {
        BASE32_NOPAD.encode(&self.0).to_ascii_lowercase()
    }

    /// `<base32>.b32.i2p`
    pub fn to_b32_address(&self) -> String {
        format!("{}.b32.i2p", self.to_base32())
    }
}

impl fmt::Display for IdentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_base32())
    }
}

impl fmt::Debug for IdentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "IdentHash({})", hex::encode(self.0))
    }
}

/// A serialized public identity together with its key types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    bytes: Vec<u8>,
    signing_type: SigningKeyType,
    crypto_type: CryptoKeyType,
}

impl Identity {
    /// Build a standard identity from raw public keys.
    ///
    /// DSA-SHA1 with ElGamal gets a NULL certificate, everything else a key
    /// certificate. Signing keys longer than the signing area spill into the
    /// certificate payload.
    pub fn new(
        signing_type: SigningKeyType,
        crypto_type: CryptoKeyType,
        crypto_public: &[u8],
        signing_public: &[u8],
    ) -> Result<Self, KeyError> {
        check_len("crypto public key", crypto_type.public_key_len(), crypto_public)?;
        check_len("signing public key", signing_type.public_key_len(), signing_public)?;

        let mut bytes = vec![0u8; PUBLIC_KEY_AREA_LEN + SIGNING_KEY_AREA_LEN];
        bytes[..crypto_public.len()].copy_from_slice(crypto_public);

        let signing_area = &mut bytes[PUBLIC_KEY_AREA_LEN..];
        let (in_area, excess) = if signing_public.len() <= SIGNING_KEY_AREA_LEN {
            (signing_public, &[][..])
        } else {
            signing_public.split_at(SIGNING_KEY_AREA_LEN)
        };
        let padding = SIGNING_KEY_AREA_LEN - in_area.len();
        signing_area[padding..].copy_from_slice(in_area);

        if signing_type == SigningKeyType::DsaSha1 && crypto_type == CryptoKeyType::ElGamal {
            bytes.push(CERTIFICATE_TYPE_NULL);
            bytes.extend_from_slice(&0u16.to_be_bytes());
        } else {
            let payload_len = (KEY_CERTIFICATE_TYPES_LEN + excess.len()) as u16;
            bytes.push(CERTIFICATE_TYPE_KEY);
            bytes.extend_from_slice(&payload_len.to_be_bytes());
            bytes.extend_from_slice(&signing_type.code().to_be_bytes());
            bytes.extend_from_slice(&crypto_type.code().to_be_bytes());
            bytes.extend_from_slice(excess);
        }

        Ok(Identity {
            bytes,
            signing_type,
            crypto_type,
        })
    }

    /// Parse an identity from the front of `buf`, returning it and the
    /// number of bytes consumed.
    pub fn from_buffer(buf: &[u8]) -> Result<(Self, usize), KeyError> {
        need(buf, STANDARD_IDENTITY_LEN)?;

        let cert_type = buf[PUBLIC_KEY_AREA_LEN + SIGNING_KEY_AREA_LEN];
        let cert_len_offset = PUBLIC_KEY_AREA_LEN + SIGNING_KEY_AREA_LEN + 1;
        let cert_len =
            u16::from_be_bytes([buf[cert_len_offset], buf[cert_len_offset + 1]]) as usize;
        let total = STANDARD_IDENTITY_LEN + cert_len;
        need(buf, total)?;

        let (signing_type, crypto_type) = match cert_type {
            CERTIFICATE_TYPE_NULL => (SigningKeyType::DsaSha1, CryptoKeyType::ElGamal),
            CERTIFICATE_TYPE_KEY => {
                if cert_len < KEY_CERTIFICATE_TYPES_LEN {
                    return Err(KeyError::Truncated {
                        needed: KEY_CERTIFICATE_TYPES_LEN,
                        available: cert_len,
                    });
                }
                let payload = &buf[STANDARD_IDENTITY_LEN..total];
                let signing_type =
                    SigningKeyType::try_from(u16::from_be_bytes([payload[0], payload[1]]))?;
                let crypto_type =
                    CryptoKeyType::try_from(u16::from_be_bytes([payload[2], payload[3]]))?;

                let excess = signing_type
                    .public_key_len()
                    .saturating_sub(SIGNING_KEY_AREA_LEN);
                if cert_len < KEY_CERTIFICATE_TYPES_LEN + excess {
                    return Err(KeyError::Truncated {
                        needed: KEY_CERTIFICATE_TYPES_LEN + excess,
                        available: cert_len,
                    });
                }
                (signing_type, crypto_type)
            }
            other => return Err(KeyError::UnsupportedCertificate(other)),
        };

        let identity = Identity {
            bytes: buf[..total].to_vec(),
            signing_type,
            crypto_type,
        };
        Ok((identity, total))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn signing_type(&self) -> SigningKeyType {
        self.signing_type
    }

    pub fn crypto_type(&self) -> CryptoKeyType {
        self.crypto_type
    }

    pub fn ident_hash(&self) -> IdentHash {
        IdentHash::digest(&self.bytes)
    }
}

/// Contents of a private keys file: the public identity followed by the
/// encryption private key and the signing private key.
#[derive(Clone, PartialEq, Eq)]
pub struct PrivateKeys {
    identity: Identity,
    private_key: Vec<u8>,
    signing_private_key: Vec<u8>,
}

impl PrivateKeys {
    pub fn new(
        identity: Identity,
        private_key: Vec<u8>,
        signing_private_key: Vec<u8>,
    ) -> Result<Self, KeyError> {
        check_len(
            "crypto private key",
            identity.crypto_type().private_key_len(),
            &private_key,
        )?;
        check_len(
            "signing private key",
            identity.signing_type().private_key_len(),
            &signing_private_key,
        )?;
        Ok(PrivateKeys {
            identity,
            private_key,
            signing_private_key,
        })
    }

    pub fn from_buffer(buf: &[u8]) -> Result<Self, KeyError> {
        let (identity, mut offset) = Identity::from_buffer(buf)?;

        let private_len = identity.crypto_type().private_key_len();
        need(buf, offset + private_len)?;
        let private_key = buf[offset..offset + private_len].to_vec();
        offset += private_len;

        let signing_len = identity.signing_type().private_key_len();
        need(buf, offset + signing_len)?;
        let signing_private_key = buf[offset..offset + signing_len].to_vec();

        Ok(PrivateKeys {
            identity,
            private_key,
            signing_private_key,
        })
    }

    pub fn from_file(path: &Path) -> Result<Self, KeyError> {
        let buf = fs::read(path)?;
        debug!("read {} bytes of key data from {}", buf.len(), path.display());
        Self::from_buffer(&buf)
    }

    /// Load a keys file and require the given key types.
    pub fn from_file_with_types(
        path: &Path,
        signing_type: SigningKeyType,
        crypto_type: CryptoKeyType,
    ) -> Result<Self, KeyError> {
        let keys = Self::from_file(path)?;
        if keys.identity.signing_type() != signing_type {
            return Err(KeyError::SigningTypeMismatch {
                requested: signing_type,
                found: keys.identity.signing_type(),
            });
        }
        if keys.identity.crypto_type() != crypto_type {
            return Err(KeyError::CryptoTypeMismatch {
                requested: crypto_type,
                found: keys.identity.crypto_type(),
            });
        }
        Ok(keys)
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(
            self.identity.bytes.len() + self.private_key.len() + self.signing_private_key.len(),
        );
        buf.extend_from_slice(&self.identity.bytes);
        buf.extend_from_slice(&self.private_key);
        buf.extend_from_slice(&self.signing_private_key);
        buf
    }

    pub fn public(&self) -> &Identity {
        &self.identity
    }

    pub fn ident_hash(&self) -> IdentHash {
        self.identity.ident_hash()
    }
}

impl fmt::Debug for PrivateKeys {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrivateKeys")
            .field("ident", &self.ident_hash())
            .field("signing_type", &self.identity.signing_type())
            .field("crypto_type", &self.identity.crypto_type())
            .finish_non_exhaustive()
    }
}

fn need(buf: &[u8], needed: usize) -> Result<(), KeyError> {
    if buf.len() < needed {
        return Err(KeyError::Truncated {
            needed,
            available: buf.len(),
        });
    }
    Ok(())
}

fn check_len(what: &'static str, expected: usize, data: &[u8]) -> Result<(), KeyError> {
    if data.len() != expected {
        return Err(KeyError::InvalidKeyLength {
            what,
            expected,
            actual: data.len(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(signing_type: SigningKeyType, crypto_type: CryptoKeyType) -> PrivateKeys {
        let identity = Identity::new(
            signing_type,
            crypto_type,
            &vec![0x11; crypto_type.public_key_len()],
            &vec![0x22; signing_type.public_key_len()],
        )
        .unwrap();
        PrivateKeys::new(
            identity,
            vec![0x33; crypto_type.private_key_len()],
            vec![0x44; signing_type.private_key_len()],
        )
        .unwrap()
    }

    #[test]
    fn test_ed25519_x25519_layout() {
        let keys = keys(SigningKeyType::EddsaSha512Ed25519, CryptoKeyType::EciesX25519Aead);
        let identity = keys.public().as_bytes();

        assert_eq!(identity.len(), STANDARD_IDENTITY_LEN + KEY_CERTIFICATE_TYPES_LEN);
        assert_eq!(identity[384], CERTIFICATE_TYPE_KEY);
        assert_eq!(&identity[385..387], &[0, 4]);
        assert_eq!(&identity[387..391], &[0, 7, 0, 4]);
        // signing key is right-aligned in its area
        assert_eq!(&identity[384 - 32..384], &[0x22; 32][..]);
        assert_eq!(identity[256], 0);

        let bytes = keys.to_bytes();
        assert_eq!(bytes.len(), identity.len() + 32 + 32);
        assert_eq!(PrivateKeys::from_buffer(&bytes).unwrap(), keys);
    }

    #[test]
    fn test_dsa_elgamal_uses_null_certificate() {
        let keys = keys(SigningKeyType::DsaSha1, CryptoKeyType::ElGamal);
        let identity = keys.public().as_bytes();
        assert_eq!(identity.len(), STANDARD_IDENTITY_LEN);
        assert_eq!(&identity[384..387], &[0, 0, 0]);

        let parsed = PrivateKeys::from_buffer(&keys.to_bytes()).unwrap();
        assert_eq!(parsed.public().signing_type(), SigningKeyType::DsaSha1);
        assert_eq!(parsed.public().crypto_type(), CryptoKeyType::ElGamal);
    }

    #[test]
    fn test_long_signing_key_spills_into_certificate() {
        let keys = keys(SigningKeyType::EcdsaSha512P521, CryptoKeyType::ElGamal);
        let identity = keys.public().as_bytes();
        // 132-byte key: 4 bytes of excess after the type codes
        assert_eq!(&identity[385..387], &[0, 8]);
        assert_eq!(&identity[391..395], &[0x22; 4]);
        assert_eq!(PrivateKeys::from_buffer(&keys.to_bytes()).unwrap(), keys);
    }

    #[test]
    fn test_ident_hash_is_sha256_of_identity() {
        let keys = keys(SigningKeyType::EddsaSha512Ed25519, CryptoKeyType::ElGamal);
        let expected = Sha256::digest(keys.public().as_bytes());
        assert_eq!(&keys.ident_hash().as_bytes()[..], &expected[..]);

        let b32 = keys.ident_hash().to_base32();
        assert_eq!(b32.len(), 52);
        assert!(b32.chars().all(|c| c.is_ascii_lowercase() || ('2'..='7').contains(&c)));
        assert_eq!(keys.ident_hash().to_b32_address(), format!("{}.b32.i2p", b32));
    }

    #[test]
    fn test_truncated_private_part() {
        let keys = keys(SigningKeyType::EddsaSha512Ed25519, CryptoKeyType::EciesX25519Aead);
        let mut bytes = keys.to_bytes();
        bytes.truncate(bytes.len() - 1);
        assert!(matches!(
            PrivateKeys::from_buffer(&bytes),
            Err(KeyError::Truncated { .. })
        ));
    }

    #[test]
    fn test_unsupported_certificate() {
        let mut bytes = vec![0u8; STANDARD_IDENTITY_LEN];
        bytes[384] = 3;
        assert!(matches!(
            Identity::from_buffer(&bytes),
            Err(KeyError::UnsupportedCertificate(3))
        ));
    }

    #[test]
    fn test_wrong_public_key_length() {
        let err = Identity::new(
            SigningKeyType::EddsaSha512Ed25519,
            CryptoKeyType::EciesX25519Aead,
            &[0u8; 31],
            &[0u8; 32],
        )
        .unwrap_err();
        assert!(matches!(err, KeyError::InvalidKeyLength { expected: 32, actual: 31, .. }));
    }
}
