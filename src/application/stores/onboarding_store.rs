use super::logged;
use crate::planning::domain::ONBOARDING_KEYS;
use crate::ports::outbound::OnboardingRepository;
use crate::shared::Result;
use std::collections::BTreeSet;
use tokio::sync::watch;

/// OnboardingStore tracks which onboarding steps the user has already seen
///
/// Until the seen keys are loaded nothing is shown, so a slow request never
/// flashes a tour the user already dismissed.
pub struct OnboardingStore<R: OnboardingRepository> {
    repository: R,
    seen: watch::Sender<Option<BTreeSet<String>>>,
}

impl<R: OnboardingRepository> OnboardingStore<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository,
            seen: watch::Sender::new(None),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<BTreeSet<String>>> {
        self.seen.subscribe()
    }

    pub fn is_loaded(&self) -> bool {
        self.seen.borrow().is_some()
    }

    pub async fn load(&self) -> Result<BTreeSet<String>> {
        let keys = logged("load onboarding status", self.repository.seen_keys().await)?;
        let seen: BTreeSet<String> = keys.into_iter().collect();
        self.seen.send_replace(Some(seen.clone()));
        Ok(seen)
    }

    pub fn should_show(&self, key: &str) -> bool {
        self.seen
            .borrow()
            .as_ref()
            .is_some_and(|seen| !seen.contains(key))
    }

    /// Marks `key` as seen locally first; a failed request is only logged
    pub async fn mark_seen(&self, key: &str) {
        self.remember([key]);
        if let Err(error) = self.repository.mark_seen(key).await {
            tracing::warn!(key, %error, "failed to record onboarding step");
        }
    }

    pub async fn skip_all(&self) {
        self.remember(ONBOARDING_KEYS);
        if let Err(error) = self.repository.skip_all().await {
            tracing::warn!(%error, "failed to skip onboarding");
        }
    }

    fn remember<'a>(&self, keys: impl IntoIterator<Item = &'a str>) {
        self.seen.send_if_modified(|seen| match seen {
            Some(seen) => {
                seen.extend(keys.into_iter().map(str::to_string));
                true
            }
            None => false,
        });
    }
}
