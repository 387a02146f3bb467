//! Result of a single API key lookup

/// What the credential store knows about a presented key.
///
/// A failed lookup is not a variant: it surfaces as an `Err` from
/// [`ApiKeyRepository::check`](super::ApiKeyRepository::check).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiKeyCheck {
    /// Key is registered and active
    Valid,
    /// Key is registered but not active
    Invalid,
    /// Key is not registered at all
    Unknown,
}

impl ApiKeyCheck {
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }
}

impl From<Option<bool>> for ApiKeyCheck {
    /// Map a nullable `active` flag as read from storage
    fn from(active: Option<bool>) -> Self {
        match active {
            Some(true) => Self::Valid,
            Some(false) => Self::Invalid,
            None => Self::Unknown,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_active_flag() {
        assert_eq!(ApiKeyCheck::from(Some(true)), ApiKeyCheck::Valid);
        assert_eq!(ApiKeyCheck::from(Some(false)), ApiKeyCheck::Invalid);
        assert_eq!(ApiKeyCheck::from(None), ApiKeyCheck::Unknown);
    }

    #[test]
    fn test_only_valid_is_valid() {
        assert!(ApiKeyCheck::Valid.is_valid());
        assert!(!ApiKeyCheck::Invalid.is_valid());
        assert!(!ApiKeyCheck::Unknown.is_valid());
    }
}
