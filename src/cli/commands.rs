use crate::api::client::{HttpRecordSource, RecordSource};
use crate::api::record::Record;
use crate::autofill::populate::IncrementOutcome;
use crate::autofill::resolver::{AutofillResolver, PageOutcome};
use crate::cli::config::Settings;
use crate::error::AutofillError;
use crate::form::form_model::{FormContext, FormSurface, PageSnapshot};
use crate::store::file::FileStore;
use crate::trace::logger::TraceLogger;

type Resolver = AutofillResolver<FileStore, HttpRecordSource>;

// ============================================================================
// load subcommand
// ============================================================================

pub fn cmd_load(
    settings: &Settings,
    page_path: &str,
    output: Option<&str>,
    verbose: u8,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut page = load_page(page_path)?;
    let mut resolver = build_resolver(settings)?;

    let outcome = resolver.page_load(&mut page);
    if verbose > 0 {
        eprintln!("{}", describe_outcome(&outcome));
    }

    write_page(&page, output)?;
    Ok(())
}

// ============================================================================
// submit subcommand
// ============================================================================

pub fn cmd_submit(
    settings: &Settings,
    page_path: &str,
    verbose: u8,
) -> Result<(), Box<dyn std::error::Error>> {
    let page = load_page(page_path)?;

    // The submit handler only exists on pages with a toggle and a bound form
    let context = page
        .form
        .as_ref()
        .and_then(|f| f.context())
        .filter(|_| page.toggle.is_some());
    let context = match context {
        Some(c) => c,
        None => {
            eprintln!("Page has no autofill-enabled form; nothing recorded");
            return Ok(());
        }
    };

    let mut resolver = build_resolver(settings)?;
    let armed = resolver.submit();
    if verbose > 0 {
        eprintln!(
            "{}: submit marker {}",
            context,
            if armed { "set" } else { "cleared" }
        );
    }
    Ok(())
}

// ============================================================================
// toggle subcommand
// ============================================================================

pub fn cmd_toggle(
    settings: &Settings,
    page_path: &str,
    enabled: bool,
    output: Option<&str>,
    verbose: u8,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut page = load_page(page_path)?;
    let mut resolver = build_resolver(settings)?;

    let outcome = resolver.toggle(enabled, &mut page);
    if verbose > 0 {
        eprintln!("{}", describe_outcome(&outcome));
    }

    write_page(&page, output)?;
    Ok(())
}

// ============================================================================
// last-entry / details subcommands
// ============================================================================

pub fn cmd_last_entry(
    settings: &Settings,
    app: &str,
    model: &str,
    before_id: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let context = parse_context(app, model)?;
    let source = build_source(settings)?;

    match source.last_entry(&context, before_id)? {
        Some(record) => println!("{}", record_json(&record)?),
        None => eprintln!("No records for {}", context),
    }
    Ok(())
}

pub fn cmd_details(
    settings: &Settings,
    app: &str,
    model: &str,
    pk: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let context = parse_context(app, model)?;
    let source = build_source(settings)?;

    let record = source.details(&context, pk)?;
    println!("{}", record_json(&record)?);
    Ok(())
}

// ============================================================================
// end-session subcommand
// ============================================================================

pub fn cmd_end_session(settings: &Settings) -> Result<(), Box<dyn std::error::Error>> {
    let mut store = FileStore::open(&settings.store_path)?;
    store.end_session()?;
    Ok(())
}

// ============================================================================
// Helpers
// ============================================================================

fn build_source(settings: &Settings) -> Result<HttpRecordSource, AutofillError> {
    HttpRecordSource::new(
        &settings.base_url,
        settings.session_cookie.as_deref(),
        settings.timeout,
    )
}

fn build_resolver(settings: &Settings) -> Result<Resolver, AutofillError> {
    let store = FileStore::open(&settings.store_path)?;
    let source = build_source(settings)?;
    let tracer = match &settings.trace_path {
        Some(path) => TraceLogger::new(path),
        None => TraceLogger::disabled(),
    };
    Ok(AutofillResolver::new(store, source).with_tracer(tracer))
}

fn parse_context(app: &str, model: &str) -> Result<FormContext, Box<dyn std::error::Error>> {
    FormContext::new(app, model)
        .ok_or_else(|| "Both --app and --model must be non-empty".into())
}

fn record_json(record: &Record) -> Result<String, AutofillError> {
    serde_json::to_string_pretty(record).map_err(|e| AutofillError::JsonSerialize {
        context: "record".into(),
        source: e,
    })
}

/// Read a page snapshot from a JSON file.
pub fn load_page(path: &str) -> Result<PageSnapshot, AutofillError> {
    let content = std::fs::read_to_string(path).map_err(|e| AutofillError::StoreIo {
        path: path.to_string(),
        source: e,
    })?;
    serde_json::from_str(&content).map_err(|e| AutofillError::JsonParse {
        context: format!("page snapshot {}", path),
        source: e,
    })
}

/// Write a page snapshot to a file, or stdout when no path is given.
pub fn write_page(page: &PageSnapshot, output: Option<&str>) -> Result<(), AutofillError> {
    let json = serde_json::to_string_pretty(page).map_err(|e| AutofillError::JsonSerialize {
        context: "page snapshot".into(),
        source: e,
    })?;

    match output {
        Some(path) => std::fs::write(path, json).map_err(|e| AutofillError::StoreIo {
            path: path.to_string(),
            source: e,
        }),
        None => {
            println!("{}", json);
            Ok(())
        }
    }
}

/// One-line summary of a handler outcome for the console.
pub fn describe_outcome(outcome: &PageOutcome) -> String {
    match outcome {
        PageOutcome::NoToggle => "Page has no autofill toggle".to_string(),
        PageOutcome::NoForm => "Page has no form".to_string(),
        PageOutcome::NoContext => "Form declares no app label / model name".to_string(),
        PageOutcome::Disabled => "Autofill is disabled".to_string(),
        PageOutcome::Cleared(n) => format!("Autofill disabled, cleared {} controls", n),
        PageOutcome::Resolved(report) => match (&report.target, &report.populated) {
            (None, _) => "No template record found".to_string(),
            (Some(t), None) => format!("Template record {} could not be loaded", t.id),
            (Some(t), Some(p)) => {
                let increment = match &p.increment {
                    IncrementOutcome::Incremented { name, to, .. } => {
                        format!(", {} -> {}", name, to)
                    }
                    _ => String::new(),
                };
                format!(
                    "Filled {} fields from record {} ({:?}){}",
                    p.applied_count(),
                    t.id,
                    t.source,
                    increment
                )
            }
        },
    }
}
