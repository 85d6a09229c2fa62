use std::fmt;

use crate::error::KeyError;

/// Signing key types as carried in key certificates.
///
/// The numeric codes are the ones used on the wire and at the C boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum SigningKeyType {
    DsaSha1 = 0,
    EcdsaSha256P256 = 1,
    EcdsaSha384P384 = 2,
    EcdsaSha512P521 = 3,
    RsaSha2562048 = 4,
    RsaSha3843072 = 5,
    RsaSha5124096 = 6,
    EddsaSha512Ed25519 = 7,
    EddsaSha512Ed25519ph = 8,
    Gostr3410CryptoProAGostr3411256 = 9,
    Gostr3410Tc26A512Gostr3411512 = 10,
    RedDsaSha512Ed25519 = 11,
}

impl SigningKeyType {
    pub fn code(self) -> u16 {
        self as u16
    }

    /// Length of the signing public key in bytes.
    pub fn public_key_len(self) -> usize {
        match self {
            SigningKeyType::DsaSha1 => 128,
            SigningKeyType::EcdsaSha256P256 => 64,
            SigningKeyType::EcdsaSha384P384 => 96,
            SigningKeyType::EcdsaSha512P521 => 132,
            SigningKeyType::RsaSha2562048 => 256,
            SigningKeyType::RsaSha3843072 => 384,
            SigningKeyType::RsaSha5124096 => 512,
            SigningKeyType::EddsaSha512Ed25519
            | SigningKeyType::EddsaSha512Ed25519ph
            | SigningKeyType::RedDsaSha512Ed25519 => 32,
            SigningKeyType::Gostr3410CryptoProAGostr3411256 => 64,
            SigningKeyType::Gostr3410Tc26A512Gostr3411512 => 128,
        }
    }

    /// Length of the signing private key in bytes.
    pub fn private_key_len(self) -> usize {
        match self {
            SigningKeyType::DsaSha1 => 20,
            SigningKeyType::EcdsaSha256P256 => 32,
            SigningKeyType::EcdsaSha384P384 => 48,
            SigningKeyType::EcdsaSha512P521 => 66,
            SigningKeyType::RsaSha2562048 => 512,
            SigningKeyType::RsaSha3843072 => 768,
            SigningKeyType::RsaSha5124096 => 1024,
            SigningKeyType::EddsaSha512Ed25519
            | SigningKeyType::EddsaSha512Ed25519ph
            | SigningKeyType::RedDsaSha512Ed25519 => 32,
            SigningKeyType::Gostr3410CryptoProAGostr3411256 => 32,
            SigningKeyType::Gostr3410Tc26A512Gostr3411512 => 64,
        }
    }
}

impl TryFrom<u16> for SigningKeyType {
    type Error = KeyError;

    fn try_from(code: u16) -> Result<Self, Self::Error> {
        let key_type = match code {
            0 => SigningKeyType::DsaSha1,
            1 => SigningKeyType::EcdsaSha256P256,
            2 => SigningKeyType::EcdsaSha384P384,
            3 => SigningKeyType::EcdsaSha512P521,
            4 => SigningKeyType::RsaSha2562048,
            5 => SigningKeyType::RsaSha3843072,
            6 => SigningKeyType::RsaSha5124096,
            7 => SigningKeyType::EddsaSha512Ed25519,
            8 => SigningKeyType::EddsaSha512Ed25519ph,
            9 => SigningKeyType::Gostr3410CryptoProAGostr3411256,
            10 => SigningKeyType::Gostr3410Tc26A512Gostr3411512,
            11 => SigningKeyType::RedDsaSha512Ed25519,
            other => return Err(KeyError::UnknownSigningKeyType(other)),
        };
        Ok(key_type)
    }
}

impl fmt::Display for SigningKeyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}({})", self, self.code())
    }
}

/// Encryption key types as carried in key certificates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum CryptoKeyType {
    ElGamal = 0,
    EciesP256Sha256Aes256Cbc = 1,
    EciesX25519Aead = 4,
    EciesMlKem512X25519Aead = 5,
    EciesMlKem768X25519Aead = 6,
    EciesMlKem1024X25519Aead = 7,
}

impl CryptoKeyType {
    pub fn code(self) -> u16 {
        self as u16
    }

    /// Length of the encryption public key in bytes.
    pub fn public_key_len(self) -> usize {
        match self {
            CryptoKeyType::ElGamal => 256,
            CryptoKeyType::EciesP256Sha256Aes256Cbc => 64,
            CryptoKeyType::EciesX25519Aead
            | CryptoKeyType::EciesMlKem512X25519Aead
            | CryptoKeyType::EciesMlKem768X25519Aead
            | CryptoKeyType::EciesMlKem1024X25519Aead => 32,
        }
    }

    /// Length of the encryption private key as stored in a keys file.
    pub fn private_key_len(self) -> usize {
        match self {
            CryptoKeyType::ElGamal => 256,
            _ => 32,
        }
    }
}

impl TryFrom<u16> for CryptoKeyType {
    type Error = KeyError;

    fn try_from(code: u16) -> Result<Self, Self::Error> {
        let key_type = match code {
            0 => CryptoKeyType::ElGamal,
            1 => CryptoKeyType::EciesP256Sha256Aes256Cbc,
            4 => CryptoKeyType::EciesX25519Aead,
            5 => CryptoKeyType::EciesMlKem512X25519Aead,
            6 => CryptoKeyType::EciesMlKem768X25519Aead,
            7 => CryptoKeyType::EciesMlKem1024X25519Aead,
            other => return Err(KeyError::UnknownCryptoKeyType(other)),
        };
        Ok(key_type)
    }
}

impl fmt::Display for CryptoKeyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}({})", self, self.code())
    }
}
