//! Exclusive per-upload assembly claims.

use chute_core::UploadId;
use std::collections::HashSet;
use std::sync::Mutex;

/// Coordinates the check-then-assemble sequence across concurrent requests.
///
/// Completion is observed independently by whichever request writes the
/// last-needed chunk; when chunks arrive concurrently, more than one
/// request can see the upload complete at the same moment. Only the holder
/// of the claim may assemble and finalize. Once an upload settles, the
/// claim can never be taken again, so the receiver is invoked exactly once
/// per assembled upload; a claim dropped without settling (failed assembly)
/// is released so a client retry can re-trigger.
#[derive(Default)]
pub struct AssemblyClaims {
    state: Mutex<ClaimState>,
}

#[derive(Default)]
struct ClaimState {
    active: HashSet<String>,
    settled: HashSet<String>,
}

impl AssemblyClaims {
    /// Create an empty claim registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Try to take the exclusive claim for `upload_id`.
    ///
    /// Returns `None` when another request currently holds the claim or
    /// the upload has already settled.
    pub fn begin(&self, upload_id: &UploadId) -> Option<AssemblyClaim<'_>> {
        let mut state = self.state.lock().expect("claim state lock poisoned");
        let key = upload_id.to_string();
        if state.settled.contains(&key) || !state.active.insert(key.clone()) {
            return None;
        }
        Some(AssemblyClaim {
            claims: self,
            key,
            settled: false,
        })
    }
}

/// An exclusive claim on one upload's assembly, released on drop.
pub struct AssemblyClaim<'a> {
    claims: &'a AssemblyClaims,
    key: String,
    settled: bool,
}

impl AssemblyClaim<'_> {
    /// Mark the upload as finalized. The claim for this upload can never
    /// be taken again.
    pub fn settle(mut self) {
        self.settled = true;
    }
}

impl Drop for AssemblyClaim<'_> {
    fn drop(&mut self) {
        let mut state = self
            .claims
            .state
            .lock()
            .expect("claim state lock poisoned");
        state.active.remove(&self.key);
        if self.settled {
            state.settled.insert(std::mem::take(&mut self.key));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> UploadId {
        UploadId::parse(s).unwrap()
    }

    #[test]
    fn test_claim_is_exclusive_while_held() {
        let claims = AssemblyClaims::new();
        let held = claims.begin(&id("upload-a")).unwrap();
        assert!(claims.begin(&id("upload-a")).is_none());
        assert!(claims.begin(&id("upload-b")).is_some());
        drop(held);
    }

    #[test]
    fn test_drop_without_settle_releases() {
        let claims = AssemblyClaims::new();
        drop(claims.begin(&id("upload-a")).unwrap());
        assert!(claims.begin(&id("upload-a")).is_some());
    }

    #[test]
    fn test_settled_upload_is_never_reclaimed() {
        let claims = AssemblyClaims::new();
        claims.begin(&id("upload-a")).unwrap().settle();
        assert!(claims.begin(&id("upload-a")).is_none());
        // Other uploads are unaffected.
        assert!(claims.begin(&id("upload-b")).is_some());
    }
}
