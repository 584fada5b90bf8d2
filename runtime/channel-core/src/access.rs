//! Access control hook. The pipeline only ever consults this trait; the
//! actual policy (host allow-lists, username mapping, gateway rules) is
//! an external collaborator's responsibility.

use async_trait::async_trait;

use crate::types::AccessRights;

/// Resolves the rights a given client identity holds for a channel.
#[async_trait]
pub trait AccessControl: Send + Sync {
    async fn check_access(&self, hostname: &str, username: &str) -> AccessRights;
}

/// Default policy: every identity gets full read/write access. Matches
/// the behavior of a channel with no access security configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllowAll;

#[async_trait]
impl AccessControl for AllowAll {
    async fn check_access(&self, _hostname: &str, _username: &str) -> AccessRights {
        AccessRights::default()
    }
}
