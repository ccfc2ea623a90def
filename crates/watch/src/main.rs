//! Track one scan from the terminal.
//!
//! Takes a single argument: an existing scan id, a repository URL (a
//! new GitHub scan is submitted first), or a path to a source archive
//! (uploaded first). Polls the scan to completion, prints the
//! severity summary and annotated snippets, and optionally writes the
//! SARIF artifact when `FOXHOUND_SARIF_DIR` is set.

use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use foxhound_client::{
    export_sarif, ClientConfig, PollOutcome, PollerConfig, ScanApi, ScanEvent, ScanSession,
    ScanTracker,
};
use foxhound_core::severity::ALL_SEVERITIES;
use foxhound_core::{aggregate, annotate_or_placeholder, language_for_path, Scan};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "foxhound_watch=info,foxhound_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let target = std::env::args()
        .nth(1)
        .context("usage: foxhound-watch <scan-id | repo-url | archive-path>")?;

    let config = ClientConfig::from_env();
    let api = Arc::new(ScanApi::from_config(&config)?);

    let scan = resolve_target(&api, &target).await?;
    tracing::info!(scan_id = scan.id, status = %scan.status, "Tracking scan");

    let tracker = ScanTracker::new(
        Arc::clone(&api),
        PollerConfig {
            interval: config.poll_interval,
        },
    );
    let mut events = tracker.subscribe();
    let (session, handle) = tracker.track(scan);

    // Progress lines from the event stream while the poll task runs.
    let printer = tokio::spawn(async move {
        while let Ok(event) = events.recv().await {
            match event {
                ScanEvent::Progress {
                    files_scanned,
                    total_files,
                    ..
                } => {
                    if total_files > 0 {
                        tracing::info!("Scanning files... {files_scanned}/{total_files}");
                    } else {
                        tracing::info!("Scanning files... {files_scanned}/?");
                    }
                }
                ScanEvent::Completed { .. }
                | ScanEvent::Failed { .. }
                | ScanEvent::TransportError { .. } => break,
                _ => {}
            }
        }
    });

    let outcome = handle.join().await;
    let _ = printer.await;

    match outcome {
        PollOutcome::Completed => {
            print_results(&session).await?;
            write_sarif_if_requested(&api, &session).await?;
            Ok(())
        }
        PollOutcome::Failed => {
            let snapshot = session.snapshot().await;
            let message = snapshot
                .error_message
                .unwrap_or_else(|| "Scan failed".to_string());
            anyhow::bail!("scan {} failed: {message}", snapshot.id);
        }
        PollOutcome::TransportError => {
            let error = session
                .transport_error()
                .await
                .unwrap_or_else(|| "unknown transport error".to_string());
            anyhow::bail!("lost the scan service: {error}");
        }
        PollOutcome::Cancelled => Ok(()),
    }
}

/// Turn the CLI argument into a scan record to track: an id fetches
/// the existing scan, a URL submits a repository scan, anything else
/// is treated as an archive to upload.
async fn resolve_target(api: &ScanApi, target: &str) -> anyhow::Result<Scan> {
    if let Ok(scan_id) = target.parse::<i64>() {
        return Ok(api.get_scan(scan_id).await?);
    }

    if target.starts_with("http://") || target.starts_with("https://") {
        tracing::info!(repo_url = %target, "Submitting repository scan");
        return Ok(api.scan_repository(target, "main", true).await?);
    }

    let path = Path::new(target);
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .context("archive path has no file name")?;
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("failed to read {target}"))?;
    tracing::info!(file_name, "Uploading archive");
    Ok(api.upload(file_name, bytes, true).await?)
}

/// Print the severity summary and annotated snippet for each finding.
async fn print_results(session: &ScanSession) -> anyhow::Result<()> {
    let scan = session.snapshot().await;
    let summary = aggregate(&scan.findings);

    println!();
    println!(
        "Scan #{} completed: {} files scanned, {} findings",
        scan.id, scan.files_scanned, summary.total
    );
    if !scan.languages_detected.is_empty() {
        println!("Languages: {}", scan.languages_detected.join(", "));
    }
    for severity in ALL_SEVERITIES.iter().rev() {
        let count = summary.count(*severity);
        if count > 0 {
            println!("  {} {:<8} {}", severity.icon(), severity.as_str(), count);
        }
    }
    if summary.unrecognized > 0 {
        println!("  {:>2} other severity values", summary.unrecognized);
    }

    for finding in &scan.findings {
        let severity = finding.severity_level();
        println!();
        println!(
            "{} [{}] {} — {}",
            severity.icon(),
            finding.rule_id,
            finding.rule_name,
            finding.message
        );
        println!(
            "  {}:{}-{} ({})",
            finding.file_path,
            finding.start_line,
            finding.end_line,
            language_for_path(&finding.file_path)
        );
        let lines =
            annotate_or_placeholder(&finding.code_snippet, finding.start_line, finding.end_line)?;
        for line in lines {
            let marker = if line.is_flagged { ">" } else { " " };
            println!("  {marker} {:>4} | {}", line.line_number, line.text);
        }
    }

    Ok(())
}

/// Write the SARIF artifact into `FOXHOUND_SARIF_DIR` when set.
async fn write_sarif_if_requested(api: &ScanApi, session: &ScanSession) -> anyhow::Result<()> {
    let Ok(dir) = std::env::var("FOXHOUND_SARIF_DIR") else {
        return Ok(());
    };

    let export = export_sarif(api, session).await?;
    let path = Path::new(&dir).join(&export.file_name);
    tokio::fs::write(&path, &export.bytes)
        .await
        .with_context(|| format!("failed to write {}", path.display()))?;
    tracing::info!(path = %path.display(), "SARIF report written");
    Ok(())
}
