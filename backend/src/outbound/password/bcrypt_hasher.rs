//! bcrypt-backed [`PasswordHasher`].
//!
//! Hashing is CPU bound, so both operations run on Tokio's blocking pool.
//! The plaintext copy handed to the blocking task is zeroised on drop.

use async_trait::async_trait;
use zeroize::Zeroizing;

use crate::domain::PasswordHash;
use crate::domain::ports::{PasswordHasher, PasswordHasherError};

/// Lowest work factor bcrypt accepts.
pub const MIN_COST: u32 = 4;
/// Highest work factor bcrypt accepts.
pub const MAX_COST: u32 = 31;

/// Hashes passwords with bcrypt at a fixed cost.
#[derive(Debug, Clone, Copy)]
pub struct BcryptPasswordHasher {
    cost: u32,
}

impl BcryptPasswordHasher {
    /// Create a hasher using `cost`, clamped to bcrypt's accepted range.
    pub fn new(cost: u32) -> Self {
        Self {
            cost: cost.clamp(MIN_COST, MAX_COST),
        }
    }

    /// Work factor applied to new hashes.
    pub fn cost(&self) -> u32 {
        self.cost
    }
}

impl Default for BcryptPasswordHasher {
    fn default() -> Self {
        Self::new(bcrypt::DEFAULT_COST)
    }
}

#[async_trait]
impl PasswordHasher for BcryptPasswordHasher {
    async fn hash(&self, password: &str) -> Result<PasswordHash, PasswordHasherError> {
        let password = Zeroizing::new(password.to_owned());
        let cost = self.cost;
        let hashed = tokio::task::spawn_blocking(move || bcrypt::hash(password.as_bytes(), cost))
            .await
            .map_err(|err| PasswordHasherError::hash(err.to_string()))?
            .map_err(|err| PasswordHasherError::hash(err.to_string()))?;
        Ok(PasswordHash::new(hashed))
    }

    async fn verify(
        &self,
        password: &str,
        hash: &PasswordHash,
    ) -> Result<bool, PasswordHasherError> {
        let password = Zeroizing::new(password.to_owned());
        let hash = hash.as_ref().to_owned();
        tokio::task::spawn_blocking(move || bcrypt::verify(password.as_bytes(), &hash))
            .await
            .map_err(|err| PasswordHasherError::verify(err.to_string()))?
            .map_err(|err| PasswordHasherError::verify(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for the bcrypt adapter.
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn hasher() -> BcryptPasswordHasher {
        BcryptPasswordHasher::new(MIN_COST)
    }

    #[rstest]
    #[tokio::test]
    async fn hashes_verify_against_their_password(hasher: BcryptPasswordHasher) {
        let hash = hasher.hash("correct horse").await.expect("hash");
        assert!(hash.as_ref().starts_with("$2"));
        assert!(hasher.verify("correct horse", &hash).await.expect("verify"));
        assert!(!hasher.verify("wrong horse", &hash).await.expect("verify"));
    }

    #[rstest]
    #[tokio::test]
    async fn malformed_hashes_are_verify_errors(hasher: BcryptPasswordHasher) {
        let err = hasher
            .verify("secret", &PasswordHash::new("plaintext"))
            .await
            .expect_err("not a bcrypt hash");
        assert!(matches!(err, PasswordHasherError::Verify { .. }));
    }

    #[rstest]
    #[case(1, MIN_COST)]
    #[case(10, 10)]
    #[case(99, MAX_COST)]
    fn cost_is_clamped(#[case] requested: u32, #[case] expected: u32) {
        assert_eq!(BcryptPasswordHasher::new(requested).cost(), expected);
    }
}
