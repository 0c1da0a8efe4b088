use serde::Serialize;
use tracing::{debug, error, info, warn};

use crate::{
    api::client::RecordSource,
    autofill::{
        decision::{FetchPhase, Target, resolve_target},
        populate::{PopulateReport, clear_form, populate_form},
    },
    form::form_model::{FormContext, FormSurface, PageSnapshot},
    store::{keys, state_store::StateStore},
    trace::{logger::TraceLogger, trace::TraceEvent},
};

/// What one resolution did. Nothing in here is an error for the caller.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolveReport {
    pub target: Option<Target>,
    /// The per-context remembered target was overwritten.
    pub remembered: bool,
    /// `None` when no target was found or the details fetch failed.
    pub populated: Option<PopulateReport>,
}

/// Result of a page-level handler.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum PageOutcome {
    /// The page has no autofill toggle; autofill is not offered here.
    NoToggle,
    NoForm,
    /// The form lacks an application label or model name.
    NoContext,
    /// Autofill is off; nothing was fetched or changed.
    Disabled,
    Resolved(ResolveReport),
    /// Autofill was switched off and this many controls were reset.
    Cleared(usize),
}

/// Seeds creation forms from earlier records.
///
/// Owns the state store and the record source it was given, so tests can
/// hand in a `MemoryStore` and a fake source.
pub struct AutofillResolver<S: StateStore, R: RecordSource> {
    store: S,
    source: R,
    tracer: TraceLogger,
}

impl<S: StateStore, R: RecordSource> AutofillResolver<S, R> {
    pub fn new(store: S, source: R) -> Self {
        AutofillResolver {
            store,
            source,
            tracer: TraceLogger::disabled(),
        }
    }

    pub fn with_tracer(mut self, tracer: TraceLogger) -> Self {
        self.tracer = tracer;
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    pub fn is_enabled(&self) -> bool {
        keys::preference_enabled(&self.store)
    }

    // ========================================================================
    // Core resolution
    // ========================================================================

    /// Pick a template record for `context` and copy it into `form`.
    ///
    /// Every fetch is attempted once. Fetch failures while looking for the
    /// newest record count as "nothing found"; a failed details fetch leaves
    /// the form untouched. A pending submit marker is consumed whatever the
    /// outcome.
    pub fn resolve<F: FormSurface + ?Sized>(
        &mut self,
        context: &FormContext,
        form: &mut F,
    ) -> ResolveReport {
        let marker_set = keys::submit_marker_set(&self.store);
        let remembered = keys::remembered_target(&self.store, context);
        let source = &self.source;

        let target = resolve_target(marker_set, remembered.as_deref(), |phase| {
            newest_identifier(source, context, phase)
        });

        if marker_set {
            if let Err(e) = keys::clear_submit_marker(&mut self.store) {
                warn!(%context, "failed to clear submit marker: {}", e);
            }
        }

        let mut remembered_updated = false;
        if let Some(t) = target.as_ref().filter(|t| t.should_remember()) {
            match keys::remember_target(&mut self.store, context, &t.id) {
                Ok(()) => remembered_updated = true,
                Err(e) => warn!(%context, target = %t.id, "failed to remember target: {}", e),
            }
        }

        let target = match target {
            Some(t) => t,
            None => {
                info!(%context, "no template record available");
                self.tracer.log(&TraceEvent::now(context, "resolve"));
                return ResolveReport {
                    target: None,
                    remembered: remembered_updated,
                    populated: None,
                };
            }
        };

        debug!(%context, target = %target.id, source = ?target.source, "resolved template record");
        self.tracer
            .log(&TraceEvent::now(context, "resolve").with_target(&target));

        let populated = match self.source.details(context, &target.id) {
            Ok(record) => {
                let report = populate_form(form, &record);
                self.tracer.log(
                    &TraceEvent::now(context, "populate")
                        .with_target(&target)
                        .with_report(&report),
                );
                Some(report)
            }
            Err(e) => {
                error!(%context, target = %target.id, "failed to fetch details: {}", e);
                self.tracer.log(
                    &TraceEvent::now(context, "populate")
                        .with_target(&target)
                        .with_error(&e),
                );
                None
            }
        };

        ResolveReport {
            target: Some(target),
            remembered: remembered_updated,
            populated,
        }
    }

    // ========================================================================
    // Page handlers
    // ========================================================================

    /// Page-load handler: sync the toggle, then autofill if enabled.
    pub fn page_load(&mut self, page: &mut PageSnapshot) -> PageOutcome {
        if page.toggle.is_none() {
            return PageOutcome::NoToggle;
        }

        let enabled = self.is_enabled();
        page.toggle = Some(enabled);

        let form = match page.form.as_mut() {
            Some(f) => f,
            None => return PageOutcome::NoForm,
        };
        let context = match form.context() {
            Some(c) => c,
            None => return PageOutcome::NoContext,
        };

        if !enabled {
            return PageOutcome::Disabled;
        }

        PageOutcome::Resolved(self.resolve(&context, form))
    }

    /// Submit handler: arm the marker when autofill is on, disarm it otherwise.
    ///
    /// Returns whether the marker is now set.
    pub fn submit(&mut self) -> bool {
        let enabled = self.is_enabled();
        let result = if enabled {
            keys::set_submit_marker(&mut self.store)
        } else {
            keys::clear_submit_marker(&mut self.store)
        };

        if let Err(e) = result {
            warn!("failed to update submit marker: {}", e);
        }
        enabled
    }

    /// Toggle handler: persist the preference, then autofill or clear.
    pub fn toggle(&mut self, enabled: bool, page: &mut PageSnapshot) -> PageOutcome {
        if page.toggle.is_none() {
            return PageOutcome::NoToggle;
        }

        let form = match page.form.as_mut() {
            Some(f) => f,
            None => return PageOutcome::NoForm,
        };
        let context = match form.context() {
            Some(c) => c,
            None => return PageOutcome::NoContext,
        };

        page.toggle = Some(enabled);
        if let Err(e) = keys::write_preference(&mut self.store, enabled) {
            warn!(%context, "failed to persist autofill preference: {}", e);
        }

        if enabled {
            PageOutcome::Resolved(self.resolve(&context, form))
        } else {
            let cleared = clear_form(form);
            info!(%context, cleared, "autofill switched off, form cleared");
            self.tracer.log(&TraceEvent::now(&context, "clear"));
            PageOutcome::Cleared(cleared)
        }
    }
}

/// Identifier of the newest record, or `None` on any failure.
fn newest_identifier<R: RecordSource + ?Sized>(
    source: &R,
    context: &FormContext,
    phase: FetchPhase,
) -> Option<String> {
    match source.last_entry(context, None) {
        Ok(Some(record)) => {
            let pk = record.pk();
            if pk.is_none() {
                warn!(%context, ?phase, "newest record carries no identifier");
            }
            pk
        }
        Ok(None) => {
            debug!(%context, ?phase, "no records yet");
            None
        }
        Err(e) if e.is_not_found() => {
            debug!(%context, ?phase, "endpoint reports no records yet");
            None
        }
        Err(e) => {
            match phase {
                FetchPhase::PostSubmit => {
                    error!(%context, "failed to fetch the newest record after submit: {}", e)
                }
                FetchPhase::ColdStart => warn!(%context, "no history found: {}", e),
            }
            None
        }
    }
}
