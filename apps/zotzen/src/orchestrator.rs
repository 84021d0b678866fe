//! Per-invocation flow sequencing
//!
//! Two flows: the create flow (`--new`) builds a fresh pair; the
//! inspect/link/sync flow resolves an existing citation record and runs
//! the requested sub-operations in a fixed order. A sub-operation
//! failure that only concerns itself (projection preconditions, link
//! mismatch) is reported and later independent sub-operations still
//! run; gateway and resolver failures abort immediately.

use anyhow::{anyhow, bail, Context};

use zotzen_core::attachments::push_attachments;
use zotzen_core::config::{self, InstallPaths};
use zotzen_core::domain::{CitationRecord, DepositTemplate};
use zotzen_core::gateway::{
    ArchiveGateway, CitationGateway, CliRunner, NewItemSpec, ZenodoCli, ZoteroCli,
};
use zotzen_core::identifiers::resolve;
use zotzen_core::link::{DoiOutcome, InteractiveOutcome, LinkEngine, LinkOutcome};
use zotzen_core::prompt::StdinPrompter;
use zotzen_core::sync::{preflight, project};
use zotzen_core::ZotzenError;

use crate::report;
use crate::Cli;

pub fn run(cli: &Cli) -> anyhow::Result<()> {
    if cli.install {
        let paths = InstallPaths::default_locations()?;
        config::install(&StdinPrompter, &paths)?;
        println!("Credentials installed for both helpers.");
        return Ok(());
    }

    let runner = CliRunner::default();
    let citations = ZoteroCli::new(runner.clone());
    let archives = ZenodoCli::new(runner);

    if cli.new {
        return create_pair(cli, &citations, &archives);
    }
    match &cli.zot {
        Some(token) => inspect(cli, token, &citations, &archives),
        None => bail!("nothing to do: pass --new, --install, or an item reference"),
    }
}

fn load_template(cli: &Cli) -> anyhow::Result<DepositTemplate> {
    match &cli.template {
        Some(path) => Ok(DepositTemplate::load(path)?),
        None => Ok(DepositTemplate::default()),
    }
}

fn create_pair<C, A>(cli: &Cli, citations: &C, archives: &A) -> anyhow::Result<()>
where
    C: CitationGateway,
    A: ArchiveGateway,
{
    let spec = if let Some(path) = &cli.json {
        NewItemSpec::JsonFile(path.clone())
    } else if let Some(title) = &cli.title {
        NewItemSpec::Template {
            title: title.clone(),
        }
    } else {
        bail!("--new requires --title or --json");
    };

    let record = citations
        .create_citation(&spec)
        .context("creating the citation record")?;

    let prompter = StdinPrompter;
    let engine = LinkEngine::new(citations, archives, &prompter);
    let template = load_template(cli)?;

    let archive = match engine.ensure_doi(&record, &template)? {
        DoiOutcome::Created { archive } => archive,
        // A user-supplied item JSON can already carry a DOI; report it
        // instead of creating a second deposit.
        DoiOutcome::Existing { doi } => {
            println!("Citation record already carries DOI: {}", doi);
            return Ok(());
        }
    };

    report::print_pair(&record, &archive);

    if cli.open {
        open_url(&record.select_link());
        if let Some(url) = &archive.deposit_url {
            open_url(url);
        }
    }
    Ok(())
}

fn inspect<C, A>(cli: &Cli, token: &str, citations: &C, archives: &A) -> anyhow::Result<()>
where
    C: CitationGateway,
    A: ArchiveGateway,
{
    let reference = resolve(token, cli.group.as_deref())?;
    tracing::debug!(reference = %reference.display(), "resolved item reference");
    let mut record = citations
        .fetch_citation(&reference)
        .context("fetching the citation record")?;

    let prompter = StdinPrompter;
    let engine = LinkEngine::new(citations, archives, &prompter);
    let mut failures: Vec<ZotzenError> = Vec::new();
    let mut refetch = false;

    if cli.getdoi {
        let template = load_template(cli)?;
        match engine.ensure_doi(&record, &template) {
            Ok(DoiOutcome::Existing { doi }) => {
                println!("Citation record already carries DOI: {}", doi);
            }
            Ok(DoiOutcome::Created { archive }) => {
                println!("Created archive record.");
                report::print_pair(&record, &archive);
                refetch = true;
            }
            Err(e) => sub_operation_failed(&mut failures, "getdoi", e)?,
        }
    }

    if let Some(candidate) = &cli.zen {
        match engine.link_explicit(&record, candidate) {
            Ok(LinkOutcome::AlreadyLinked { doi }) => {
                println!(
                    "Citation record already carries DOI: {} (candidate {} ignored)",
                    doi, candidate
                );
            }
            Ok(LinkOutcome::Linked { archive }) => {
                println!("Linked citation {} to {}", record.compound_key(), archive.doi);
                refetch = true;
            }
            Err(e) => sub_operation_failed(&mut failures, "link", e)?,
        }
    }

    // Later sub-operations must see the DOI a linking step just wrote.
    if refetch {
        record = citations
            .fetch_citation(&reference)
            .context("refetching the citation record")?;
    }

    if cli.sync {
        if let Err(e) = run_sync(&engine, archives, &record) {
            sub_operation_failed(&mut failures, "sync", e)?;
        }
    }

    if cli.push {
        if let Err(e) = run_push(&engine, citations, archives, &record, &cli.attachment_type) {
            sub_operation_failed(&mut failures, "push", e)?;
        }
    }

    if cli.publish {
        if let Err(e) = run_publish(&engine, archives, &record) {
            sub_operation_failed(&mut failures, "publish", e)?;
        }
    }

    let explicit_sub_operation =
        cli.getdoi || cli.zen.is_some() || cli.sync || cli.push || cli.publish;
    if !explicit_sub_operation {
        match engine.interactive_link(&record)? {
            InteractiveOutcome::NothingToDo => {}
            InteractiveOutcome::AlreadyConsistent { doi } => {
                println!("Citation and archive record {} are consistently linked.", doi);
            }
            InteractiveOutcome::Repaired { doi } => {
                println!("Archive record {} now points back at the citation.", doi);
            }
            InteractiveOutcome::Declined { doi } => {
                println!("Left archive record {} unlinked.", doi);
            }
        }
    }

    if cli.show {
        show(&engine, &record);
    }

    if cli.open {
        open_url(&record.select_link());
        if let Ok((_, Some(archive))) = engine.resolve_linkage(&record) {
            if let Some(url) = &archive.deposit_url {
                open_url(url);
            }
        }
    }

    if let Some(first) = failures.into_iter().next() {
        return Err(anyhow!(first).context("one or more requested operations failed"));
    }
    Ok(())
}

/// Record a sub-operation failure, or abort the invocation when the
/// failure class is fatal (resolver and gateway errors).
fn sub_operation_failed(
    failures: &mut Vec<ZotzenError>,
    operation: &str,
    error: ZotzenError,
) -> anyhow::Result<()> {
    if error.is_sub_operation_error() {
        eprintln!("{} skipped: {}", operation, error);
        failures.push(error);
        Ok(())
    } else {
        Err(anyhow!(error).context(format!("{} failed", operation)))
    }
}

fn run_sync<C, A, P>(
    engine: &LinkEngine<C, A, P>,
    archives: &A,
    record: &CitationRecord,
) -> Result<(), ZotzenError>
where
    C: CitationGateway,
    A: ArchiveGateway,
    P: zotzen_core::prompt::Prompter,
{
    let archive = engine.require_linked(record)?;
    for warning in preflight(record) {
        eprintln!("warning: {}", warning);
    }
    let metadata = project(record)?;
    if archive.metadata_matches(&metadata) {
        println!("Archive record {} already in sync.", archive.doi);
        return Ok(());
    }
    archives.update_archive_metadata(&archive.record_id, &metadata)?;
    println!("Synced citation metadata into archive record {}.", archive.doi);
    Ok(())
}

fn run_push<C, A, P>(
    engine: &LinkEngine<C, A, P>,
    citations: &C,
    archives: &A,
    record: &CitationRecord,
    extension: &str,
) -> Result<(), ZotzenError>
where
    C: CitationGateway,
    A: ArchiveGateway,
    P: zotzen_core::prompt::Prompter,
{
    let archive = engine.require_linked(record)?;
    let report = push_attachments(citations, archives, record, &archive, extension)?;
    if report.uploaded.is_empty() {
        println!("No .{} attachments to push.", extension);
    } else {
        println!(
            "Pushed {} attachment(s): {}",
            report.uploaded.len(),
            report.uploaded.join(", ")
        );
    }
    Ok(())
}

fn run_publish<C, A, P>(
    engine: &LinkEngine<C, A, P>,
    archives: &A,
    record: &CitationRecord,
) -> Result<(), ZotzenError>
where
    C: CitationGateway,
    A: ArchiveGateway,
    P: zotzen_core::prompt::Prompter,
{
    let archive = engine.require_linked(record)?;
    archives.publish_archive(&archive.record_id)?;
    println!("Published archive record {}.", archive.doi);
    Ok(())
}

fn show<C, A, P>(engine: &LinkEngine<C, A, P>, record: &CitationRecord)
where
    C: CitationGateway,
    A: ArchiveGateway,
    P: zotzen_core::prompt::Prompter,
{
    match engine.resolve_linkage(record) {
        Ok((linkage, archive)) => report::print_show(record, Some(&linkage), archive.as_ref()),
        Err(e) => {
            report::print_show(record, None, None);
            eprintln!("warning: could not resolve linkage: {}", e);
        }
    }
}

/// Open a URL with the platform opener; failures are non-fatal.
fn open_url(url: &str) {
    #[cfg(target_os = "macos")]
    let result = std::process::Command::new("open").arg(url).spawn();
    #[cfg(target_os = "windows")]
    let result = std::process::Command::new("cmd").args(["/C", "start", url]).spawn();
    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    let result = std::process::Command::new("xdg-open").arg(url).spawn();

    if let Err(e) = result {
        eprintln!("warning: could not open {}: {}", url, e);
    }
}
