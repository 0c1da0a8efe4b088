use serde::Serialize;

// ============================================================================
// Target resolution - pure decision chain
// ============================================================================

/// Which branch of the chain produced the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TargetSource {
    /// Newest record fetched right after a submit made with autofill on.
    PostSubmit,
    /// Remembered target for this context.
    Sticky,
    /// Newest record fetched because nothing was remembered yet.
    ColdStart,
}

/// Record chosen to seed the form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Target {
    pub id: String,
    pub source: TargetSource,
}

impl Target {
    pub fn new(id: impl Into<String>, source: TargetSource) -> Self {
        Target {
            id: id.into(),
            source,
        }
    }

    /// Only a target confirmed by a post-submit fetch is persisted; a
    /// cold-start guess is used once and forgotten.
    pub fn should_remember(&self) -> bool {
        self.source == TargetSource::PostSubmit
    }
}

/// Why the resolver wants the newest record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FetchPhase {
    PostSubmit,
    ColdStart,
}

/// What the resolver does next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    FetchNewest(FetchPhase),
    Populate(Target),
    Stop,
}

/// Entry point of the chain.
///
/// A pending submit marker always wins; otherwise a remembered target is
/// used without touching the network.
pub fn first_step(marker_set: bool, remembered: Option<&str>) -> Step {
    if marker_set {
        return Step::FetchNewest(FetchPhase::PostSubmit);
    }
    match remembered {
        Some(id) => Step::Populate(Target::new(id, TargetSource::Sticky)),
        None => Step::FetchNewest(FetchPhase::ColdStart),
    }
}

/// Continue the chain once a newest-record fetch finished.
///
/// `newest` is the identifier found, or `None` when the fetch failed or the
/// record had no usable identifier.
pub fn after_newest(phase: FetchPhase, newest: Option<String>, remembered: Option<&str>) -> Step {
    match (phase, newest) {
        (FetchPhase::PostSubmit, Some(id)) => {
            Step::Populate(Target::new(id, TargetSource::PostSubmit))
        }
        (FetchPhase::PostSubmit, None) => first_step(false, remembered),
        (FetchPhase::ColdStart, Some(id)) => {
            Step::Populate(Target::new(id, TargetSource::ColdStart))
        }
        (FetchPhase::ColdStart, None) => Step::Stop,
    }
}

/// Run the whole chain against a fetch function.
///
/// `fetch_newest` is called at most twice (post-submit, then cold start),
/// one call at a time.
pub fn resolve_target<F>(marker_set: bool, remembered: Option<&str>, mut fetch_newest: F) -> Option<Target>
where
    F: FnMut(FetchPhase) -> Option<String>,
{
    let mut step = first_step(marker_set, remembered);
    loop {
        step = match step {
            Step::FetchNewest(phase) => after_newest(phase, fetch_newest(phase), remembered),
            Step::Populate(target) => return Some(target),
            Step::Stop => return None,
        };
    }
}
