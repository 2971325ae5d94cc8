//! bcrypt 기반 비밀번호 해시/검증
use crate::config::PasswordConfig;
use crate::core::{AppResult, ErrorContext};

/// 비밀번호 해셔
///
/// 비용(cost)은 환경별 설정에서 한 번 정해집니다. 개발/테스트는 4, 그 외에는 10 이상입니다.
/// 평문 비밀번호는 어떤 경로로도 로그에 남기지 않습니다.
#[derive(Debug, Clone)]
pub struct PasswordHasher {
    cost: u32,
}

impl PasswordHasher {
    pub fn new(config: &PasswordConfig) -> Self {
        Self { cost: config.bcrypt_cost }
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }

    pub fn hash(&self, plain: &str) -> AppResult<String> {
        bcrypt::hash(plain, self.cost).context("비밀번호 해싱 실패")
    }

    /// 불일치는 에러가 아니라 `false`입니다. 저장된 해시가 손상된 경우에만 에러를 돌려줍니다.
    pub fn verify(&self, plain: &str, hash: &str) -> AppResult<bool> {
        bcrypt::verify(plain, hash).context("비밀번호 검증 실패")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hasher() -> PasswordHasher {
        PasswordHasher::new(&PasswordConfig { bcrypt_cost: 4 })
    }

    #[test]
    fn test_hash_and_verify() {
        let hasher = hasher();
        let hash = hasher.hash("Recruit2024").unwrap();

        assert_ne!(hash, "Recruit2024");
        assert!(hash.starts_with("$2"));
        assert!(hasher.verify("Recruit2024", &hash).unwrap());
        assert!(!hasher.verify("recruit2024", &hash).unwrap());
    }

    #[test]
    fn test_same_password_gets_different_salt() {
        let hasher = hasher();
        assert_ne!(hasher.hash("Recruit2024").unwrap(), hasher.hash("Recruit2024").unwrap());
    }

    #[test]
    fn test_corrupted_hash_is_error() {
        assert!(hasher().verify("Recruit2024", "not-a-bcrypt-hash").is_err());
    }
}
