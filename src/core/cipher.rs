//! AES-256-CBC envelope encryption.
//!
//! # Envelope format
//!
//! ```text
//! IV (16 bytes) || AES-256-CBC(PKCS#7(plaintext))
//! ```
//!
//! A fresh IV is drawn from the OS CSPRNG on every call to [`encrypt`].
//!
//! # Known limitation
//!
//! The envelope carries no MAC. Decrypting under the wrong key usually fails
//! with [`CipherError::Padding`], but roughly one time in 256 the padding
//! happens to check out and garbage bytes are returned instead. Those bytes
//! then fail at JSON parsing in [`crate::core::codec::deserialize`]. Wrong
//! key and corrupted payload cannot be told apart.

use aes::Aes256;
use cbc::cipher::{block_padding::Pkcs7, BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use rand::{rngs::OsRng, RngCore};
use sha2::{Digest, Sha256};
use tracing::trace;
use zeroize::Zeroizing;

use crate::core::constants::{BLOCK_LEN, IV_LEN, KEY_LEN};
use crate::error::{CipherError, Result};

type Aes256CbcEnc = cbc::Encryptor<Aes256>;
type Aes256CbcDec = cbc::Decryptor<Aes256>;

/// Encrypt `plaintext` under a 32-byte key and return the envelope.
///
/// # Errors
///
/// Returns `CipherError::InvalidKeyLength` if `key` is not [`KEY_LEN`] bytes.
pub fn encrypt(plaintext: &[u8], key: &[u8]) -> Result<Vec<u8>> {
    check_key(key)?;

    let mut iv = [0u8; IV_LEN];
    OsRng.fill_bytes(&mut iv);

    let encryptor = Aes256CbcEnc::new_from_slices(key, &iv).map_err(|_| {
        CipherError::InvalidKeyLength {
            expected: KEY_LEN,
            actual: key.len(),
        }
    })?;
    let ciphertext = encryptor.encrypt_padded_vec_mut::<Pkcs7>(plaintext);

    trace!(
        plaintext_len = plaintext.len(),
        ciphertext_len = ciphertext.len(),
        "encrypted"
    );

    let mut envelope = Vec::with_capacity(IV_LEN + ciphertext.len());
    envelope.extend_from_slice(&iv);
    envelope.extend_from_slice(&ciphertext);
    Ok(envelope)
}

/// Decrypt an envelope produced by [`encrypt`].
///
/// # Errors
///
/// - `CipherError::InvalidKeyLength` if `key` is not [`KEY_LEN`] bytes
/// - `CipherError::EnvelopeTooShort` if there is no room for the IV
/// - `CipherError::Misaligned` if the ciphertext is empty or not block-aligned
/// - `CipherError::Padding` if the padding is inconsistent after decryption
pub fn decrypt(envelope: &[u8], key: &[u8]) -> Result<Vec<u8>> {
    check_key(key)?;

    if envelope.len() < IV_LEN {
        return Err(CipherError::EnvelopeTooShort(envelope.len()).into());
    }
    let (iv, ciphertext) = envelope.split_at(IV_LEN);
    if ciphertext.is_empty() || ciphertext.len() % BLOCK_LEN != 0 {
        return Err(CipherError::Misaligned(ciphertext.len()).into());
    }

    trace!(ciphertext_len = ciphertext.len(), "decrypting");

    let decryptor = Aes256CbcDec::new_from_slices(key, iv).map_err(|_| {
        CipherError::InvalidKeyLength {
            expected: KEY_LEN,
            actual: key.len(),
        }
    })?;
    let plaintext = decryptor
        .decrypt_padded_vec_mut::<Pkcs7>(ciphertext)
        .map_err(|_| CipherError::Padding)?;

    trace!(plaintext_len = plaintext.len(), "decrypted");
    Ok(plaintext)
}

/// Generate a random 32-byte key from the OS CSPRNG.
pub fn generate_key() -> Zeroizing<Vec<u8>> {
    let mut key = Zeroizing::new(vec![0u8; KEY_LEN]);
    OsRng.fill_bytes(&mut key);
    key
}

/// Short, non-reversible identifier for a key, safe to log.
///
/// First four bytes of SHA-256, hex-encoded.
pub fn key_fingerprint(key: &[u8]) -> String {
    Sha256::digest(key)
        .iter()
        .take(4)
        .map(|b| format!("{:02x}", b))
        .collect()
}

fn check_key(key: &[u8]) -> Result<()> {
    if key.len() != KEY_LEN {
        return Err(CipherError::InvalidKeyLength {
            expected: KEY_LEN,
            actual: key.len(),
        }
        .into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    const POEM: &str = "How much wood could a woodchuck chuck\n\
                        If a woodchuck could chuck wood?\n";

    fn cipher_err(result: Result<Vec<u8>>) -> CipherError {
        match result {
            Err(Error::Cipher(e)) => e,
            other => panic!("expected cipher error, got {:?}", other),
        }
    }

    #[test]
    fn test_encrypt_decrypt_roundtrip() {
        let key = generate_key();
        let envelope = encrypt(POEM.as_bytes(), &key).unwrap();

        assert_ne!(&envelope[IV_LEN..], POEM.as_bytes());
        assert_eq!(decrypt(&envelope, &key).unwrap(), POEM.as_bytes());
    }

    #[test]
    fn test_roundtrip_large_and_empty_plaintext() {
        let key = generate_key();

        let large = POEM.repeat(200);
        let envelope = encrypt(large.as_bytes(), &key).unwrap();
        assert_eq!(decrypt(&envelope, &key).unwrap(), large.as_bytes());

        let envelope = encrypt(b"", &key).unwrap();
        assert_eq!(envelope.len(), IV_LEN + BLOCK_LEN);
        assert!(decrypt(&envelope, &key).unwrap().is_empty());
    }

    #[test]
    fn test_block_aligned_plaintext_gets_full_padding_block() {
        let key = generate_key();
        let envelope = encrypt(&[7u8; BLOCK_LEN * 2], &key).unwrap();
        assert_eq!(envelope.len(), IV_LEN + BLOCK_LEN * 3);
    }

    #[test]
    fn test_fresh_iv_per_call() {
        let key = generate_key();
        let a = encrypt(POEM.as_bytes(), &key).unwrap();
        let b = encrypt(POEM.as_bytes(), &key).unwrap();

        assert_ne!(a[..IV_LEN], b[..IV_LEN]);
        assert_ne!(a, b);
        assert_eq!(decrypt(&a, &key).unwrap(), decrypt(&b, &key).unwrap());
    }

    #[test]
    fn test_wrong_key_never_returns_plaintext() {
        let envelope = encrypt(POEM.as_bytes(), &generate_key()).unwrap();
        match decrypt(&envelope, &generate_key()) {
            Err(Error::Cipher(CipherError::Padding)) => {}
            Ok(garbage) => assert_ne!(garbage, POEM.as_bytes()),
            Err(other) => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_invalid_key_length_rejected() {
        let short = vec![0u8; 16];
        assert_eq!(
            cipher_err(encrypt(b"x", &short)),
            CipherError::InvalidKeyLength {
                expected: KEY_LEN,
                actual: 16
            }
        );

        let envelope = encrypt(b"x", &generate_key()).unwrap();
        assert!(matches!(
            cipher_err(decrypt(&envelope, &[0u8; 33])),
            CipherError::InvalidKeyLength { actual: 33, .. }
        ));
    }

    #[test]
    fn test_short_envelope_rejected() {
        let key = generate_key();
        assert_eq!(
            cipher_err(decrypt(&[0u8; 10], &key)),
            CipherError::EnvelopeTooShort(10)
        );
    }

    #[test]
    fn test_misaligned_ciphertext_rejected() {
        let key = generate_key();
        assert_eq!(
            cipher_err(decrypt(&[0u8; IV_LEN + 5], &key)),
            CipherError::Misaligned(5)
        );
        assert_eq!(
            cipher_err(decrypt(&[0u8; IV_LEN], &key)),
            CipherError::Misaligned(0)
        );
    }

    #[test]
    fn test_fingerprint_is_stable_and_short() {
        let key = [1u8; KEY_LEN];
        let fp = key_fingerprint(&key);
        assert_eq!(fp.len(), 8);
        assert_eq!(fp, key_fingerprint(&key));
        assert_ne!(fp, key_fingerprint(&[2u8; KEY_LEN]));
    }
}
