//! Anonymous per-install user id.
//!
//! The id is generated once, stored under the `userId` key and never rotated.
//! It is not a credential: anyone who knows it can read and delete the
//! matching links.

use rand::Rng;

use buzzin_shared::constants::STORAGE_KEY_USER_ID;

use crate::error::Result;
use crate::storage::LocalStorage;

const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const SUFFIX_LEN: usize = 9;

/// Return the cached user id, generating and persisting one on first use.
pub fn user_id(storage: &mut LocalStorage) -> Result<String> {
    if let Some(existing) = storage.get_item(STORAGE_KEY_USER_ID).filter(|id| !id.is_empty()) {
        return Ok(existing.to_string());
    }

    let id = generate_user_id();
    storage.set_item(STORAGE_KEY_USER_ID, id.clone())?;
    tracing::info!(user_id = %id, "generated anonymous user id");
    Ok(id)
}

/// `user_<unix millis>_<9 base-36 chars>`
fn generate_user_id() -> String {
    let mut rng = rand::thread_rng();
    let suffix: String = (0..SUFFIX_LEN)
        .map(|_| BASE36[rng.gen_range(0..BASE36.len())] as char)
        .collect();
    format!("user_{}_{}", chrono::Utc::now().timestamp_millis(), suffix)
}
