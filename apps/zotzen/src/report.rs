//! User-facing output formatting

use zotzen_core::domain::{ArchiveRecord, CitationRecord};
use zotzen_core::link::Linkage;
use zotzen_core::sync::preflight;

/// Full pairing report after a create or getdoi flow.
pub fn print_pair(record: &CitationRecord, archive: &ArchiveRecord) {
    println!("Item successfully created:");
    println!("Zotero ID: {}", record.compound_key());
    if let Some(href) = &record.api_href {
        println!("Zotero link: {}", href);
    }
    println!("Zotero select link: {}", record.select_link());
    println!("Zenodo RecordId: {}", archive.record_id);
    println!("Zenodo DOI: {}", archive.doi);
    if let Some(url) = &archive.deposit_url {
        println!("Zenodo deposit link: {}", url);
    }
}

/// Inspection report: citation summary, linkage state, archive summary.
pub fn print_show(
    record: &CitationRecord,
    linkage: Option<&Linkage>,
    archive: Option<&ArchiveRecord>,
) {
    println!("Zotero ID: {}", record.compound_key());
    println!("Title: {}", record.title);
    if let Some(date) = &record.date {
        println!("Date: {}", date);
    }
    println!(
        "Creators: {}",
        record
            .creators
            .iter()
            .filter_map(|c| c.archive_name())
            .collect::<Vec<_>>()
            .join("; ")
    );
    println!("Select link: {}", record.select_link());

    match linkage {
        Some(Linkage::Unlinked) => println!("Linkage: unlinked (no archive DOI)"),
        Some(Linkage::LinkedConsistent { doi }) => {
            println!("Linkage: linked to {}", doi);
        }
        Some(Linkage::LinkedInconsistent { doi, found }) => {
            println!(
                "Linkage: INCONSISTENT - {} points at {}",
                doi,
                found.as_deref().unwrap_or("(absent)")
            );
        }
        None => println!("Linkage: unknown (archive record unreachable)"),
    }

    if let Some(archive) = archive {
        println!("Zenodo RecordId: {}", archive.record_id);
        println!("Zenodo state: {:?}", archive.state);
        if let Some(url) = &archive.deposit_url {
            println!("Zenodo deposit link: {}", url);
        }
    }

    for warning in preflight(record) {
        println!("warning: {}", warning);
    }
}
