//! Random implementation of the `IdGenerator` port.

use std::collections::HashSet;
use std::sync::{Mutex, PoisonError};

use anyhow::Result;

use crate::application::ports::IdGenerator;
use crate::domain::AppId;

/// Attempts made before giving up on finding an unused id.
const MAX_ATTEMPTS: usize = 8;

/// Issues `app-` + 16 lowercase hex ids and remembers the ones still in use.
///
/// The record holds one entry per live application: the registry releases an
/// id when it deletes the application.
#[derive(Debug, Default)]
pub struct RandomIdGenerator {
    issued: Mutex<HashSet<String>>,
}

impl RandomIdGenerator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdGenerator for RandomIdGenerator {
    fn next_id(&self) -> Result<AppId> {
        let mut issued = self.issued.lock().unwrap_or_else(PoisonError::into_inner);
        for _ in 0..MAX_ATTEMPTS {
            let id = generate_app_id();
            if issued.insert(id.clone()) {
                return Ok(AppId::new(id));
            }
        }
        anyhow::bail!("could not generate a unique application id after {MAX_ATTEMPTS} attempts")
    }

    fn release(&self, id: &AppId) {
        self.issued
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(id.as_str());
    }
}

/// Generate an application identifier.
///
/// Format: `app-` followed by 16 lowercase hex characters.
/// Entropy sources: nanosecond timestamp and two independent `RandomState` hashes.
#[must_use]
pub fn generate_app_id() -> String {
    use std::collections::hash_map::RandomState;
    use std::hash::{BuildHasher, Hasher};

    let mut hasher = RandomState::new().build_hasher();
    hasher.write_u128(
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_nanos())
            .unwrap_or(0),
    );
    hasher.write_u64(RandomState::new().build_hasher().finish());
    hasher.write_u64(RandomState::new().build_hasher().finish());
    format!("app-{:016x}", hasher.finish())
}

/// `true` if `id` has the shape produced by [`generate_app_id`].
#[must_use]
pub fn is_valid_app_id(id: &str) -> bool {
    id.len() == 20
        && id.starts_with("app-")
        && id[4..].chars().all(|c| c.is_ascii_hexdigit())
}
