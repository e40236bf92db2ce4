//! Live-site preview for a selected repository.
//!
//! A repository's preview URL is guessed from the GitHub Pages naming
//! convention and then probed. Each selection gets a fresh generation so a
//! slow probe for an earlier selection can never overwrite the current one.

use crate::github::{ProbeOutcome, Repository};
use serde::{Deserialize, Serialize};

/// Fill `{account}` and `{name}` in a preview URL template
pub fn preview_url(template: &str, account: &str, name: &str) -> String {
    template.replace("{account}", account).replace("{name}", name)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreviewStatus {
    Idle,
    Probing,
    Available,
    Unavailable,
}

impl PreviewStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, PreviewStatus::Available | PreviewStatus::Unavailable)
    }
}

/// Where a probe that got no HTTP response ends up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    Available,
    #[default]
    Unavailable,
}

impl ProbeOutcome {
    pub fn classify(&self, policy: FailurePolicy) -> PreviewStatus {
        match self {
            ProbeOutcome::Status(404) => PreviewStatus::Unavailable,
            ProbeOutcome::Status(_) => PreviewStatus::Available,
            ProbeOutcome::TimedOut | ProbeOutcome::Failed(_) => match policy {
                FailurePolicy::Available => PreviewStatus::Available,
                FailurePolicy::Unavailable => PreviewStatus::Unavailable,
            },
        }
    }
}

/// A probe to run, tagged with the selection it belongs to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeTicket {
    pub generation: u64,
    pub url: String,
}

/// Snapshot of the preview for rendering
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewView {
    pub preview_url: String,
    pub status: PreviewStatus,
}

#[derive(Debug, Clone)]
struct Selection {
    repository: Repository,
    preview_url: String,
}

#[derive(Debug)]
pub struct PreviewResolver {
    account: String,
    template: String,
    policy: FailurePolicy,
    generation: u64,
    selection: Option<Selection>,
    status: PreviewStatus,
}

impl PreviewResolver {
    pub fn new(account: &str, template: &str, policy: FailurePolicy) -> Self {
        Self {
            account: account.to_string(),
            template: template.to_string(),
            policy,
            generation: 0,
            selection: None,
            status: PreviewStatus::Idle,
        }
    }

    /// Select `repository`, replacing any previous selection
    pub fn resolve(&mut self, repository: &Repository) -> ProbeTicket {
        let url = preview_url(&self.template, &self.account, &repository.name);
        self.generation += 1;
        self.selection = Some(Selection {
            repository: repository.clone(),
            preview_url: url.clone(),
        });
        self.status = PreviewStatus::Probing;
        ProbeTicket {
            generation: self.generation,
            url,
        }
    }

    /// Apply a probe result. Returns false when the result was stale.
    pub fn complete(&mut self, generation: u64, outcome: &ProbeOutcome) -> bool {
        if generation != self.generation || self.status != PreviewStatus::Probing {
            return false;
        }
        self.status = outcome.classify(self.policy);
        true
    }

    pub fn close(&mut self) {
        self.generation += 1;
        self.selection = None;
        self.status = PreviewStatus::Idle;
    }

    pub fn selected(&self) -> Option<&Repository> {
        self.selection.as_ref().map(|s| &s.repository)
    }

    pub fn status(&self) -> PreviewStatus {
        self.status
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn view(&self) -> Option<PreviewView> {
        self.selection.as_ref().map(|s| PreviewView {
            preview_url: s.preview_url.clone(),
            status: self.status,
        })
    }

    /// Where "open externally" goes for the current state
    pub fn external_target(&self) -> Option<&str> {
        let selection = self.selection.as_ref()?;
        match self.status {
            PreviewStatus::Available => Some(&selection.preview_url),
            PreviewStatus::Unavailable => Some(&selection.repository.html_url),
            PreviewStatus::Idle | PreviewStatus::Probing => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repo(id: u64, name: &str) -> Repository {
        Repository {
            id,
            name: name.to_string(),
            description: None,
            html_url: format!("https://github.com/bar/{name}"),
            updated_at: None,
        }
    }

    fn resolver() -> PreviewResolver {
        PreviewResolver::new("bar", "https://{account}.github.io/{name}", FailurePolicy::Unavailable)
    }

    #[test]
    fn derives_pages_url() {
        assert_eq!(
            preview_url("https://{account}.github.io/{name}", "bar", "foo"),
            "https://bar.github.io/foo"
        );
    }

    #[test]
    fn classifies_outcomes() {
        let policy = FailurePolicy::Unavailable;
        assert_eq!(ProbeOutcome::Status(404).classify(policy), PreviewStatus::Unavailable);
        assert_eq!(ProbeOutcome::Status(200).classify(policy), PreviewStatus::Available);
        assert_eq!(ProbeOutcome::Status(500).classify(policy), PreviewStatus::Available);
        assert_eq!(ProbeOutcome::TimedOut.classify(policy), PreviewStatus::Unavailable);
        assert_eq!(
            ProbeOutcome::Failed("refused".into()).classify(FailurePolicy::Available),
            PreviewStatus::Available
        );
    }

    #[test]
    fn resolve_starts_probing() {
        let mut r = resolver();
        assert_eq!(r.status(), PreviewStatus::Idle);
        let ticket = r.resolve(&repo(1, "foo"));
        assert_eq!(ticket.url, "https://bar.github.io/foo");
        assert_eq!(r.status(), PreviewStatus::Probing);
        assert_eq!(r.external_target(), None);
    }

    #[test]
    fn stale_result_is_discarded() {
        let mut r = resolver();
        let a = r.resolve(&repo(1, "a"));
        let b = r.resolve(&repo(2, "b"));

        assert!(r.complete(b.generation, &ProbeOutcome::Status(404)));
        assert!(!r.complete(a.generation, &ProbeOutcome::Status(200)));

        assert_eq!(r.status(), PreviewStatus::Unavailable);
        assert_eq!(r.selected().map(|s| s.name.as_str()), Some("b"));
        assert_eq!(r.external_target(), Some("https://github.com/bar/b"));
    }

    #[test]
    fn terminal_state_is_sticky() {
        let mut r = resolver();
        let t = r.resolve(&repo(1, "a"));
        assert!(r.complete(t.generation, &ProbeOutcome::Status(200)));
        assert!(!r.complete(t.generation, &ProbeOutcome::Status(404)));
        assert_eq!(r.status(), PreviewStatus::Available);
        assert_eq!(r.external_target(), Some("https://bar.github.io/a"));
    }

    #[test]
    fn close_resets_and_invalidates() {
        let mut r = resolver();
        let t = r.resolve(&repo(1, "a"));
        r.close();
        assert_eq!(r.status(), PreviewStatus::Idle);
        assert!(r.view().is_none());
        assert!(!r.complete(t.generation, &ProbeOutcome::Status(200)));
        assert_eq!(r.status(), PreviewStatus::Idle);
    }
}
