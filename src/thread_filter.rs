use anyhow::{Context, Result};
use log::{debug, info};
use serde::de::IgnoredAny;
use std::fs;
use std::path::Path;

use crate::models::{ApprovedThread, GraphQLError, GraphQLResponse, ReviewThread};

/// Read a `gh api graphql` response from disk and extract its review threads
pub fn load_review_threads(path: &Path) -> Result<Vec<ReviewThread>> {
    let raw_json = fs::read_to_string(path)
        .with_context(|| format!("Error reading file: {}", path.display()))?;

    parse_review_threads(&raw_json)
        .with_context(|| format!("Invalid input file: {}", path.display()))
}

/// Parse a GraphQL response and navigate to
/// `data.repository.pullRequest.reviewThreads.nodes`.
///
/// Malformed JSON and well-formed JSON of the wrong shape are reported
/// with different messages so the caller can tell them apart.
pub fn parse_review_threads(raw_json: &str) -> Result<Vec<ReviewThread>> {
    // Syntax first: a typed parse stops at the first type mismatch
    serde_json::from_str::<IgnoredAny>(raw_json).context("Error parsing JSON")?;

    let response: GraphQLResponse =
        serde_json::from_str(raw_json).context("Unexpected response shape")?;

    let pull_request = response
        .data
        .and_then(|data| data.repository)
        .and_then(|repository| repository.pull_request)
        .ok_or_else(|| missing_pull_request(response.errors.as_deref()))?;

    debug!(
        "Pull request #{} ({})",
        pull_request.number.map_or_else(|| "?".to_string(), |n| n.to_string()),
        pull_request.head_ref_name.as_deref().unwrap_or("unknown branch")
    );

    Ok(pull_request.review_threads.nodes)
}

fn missing_pull_request(errors: Option<&[GraphQLError]>) -> anyhow::Error {
    match errors {
        Some(errors) if !errors.is_empty() => {
            let messages: Vec<&str> = errors.iter().map(|e| e.message.as_str()).collect();
            anyhow::anyhow!(
                "Unexpected response shape: no pull request data, GraphQL errors: {}",
                messages.join("; ")
            )
        }
        _ => anyhow::anyhow!(
            "Unexpected response shape: data.repository.pullRequest is missing or null"
        ),
    }
}

/// An unresolved thread with at least one `reaction` left by `reviewer`
/// on any of its comments
pub fn is_approved_by(thread: &ReviewThread, reviewer: &str, reaction: &str) -> bool {
    !thread.is_resolved
        && thread.comments.nodes.iter().any(|comment| {
            comment
                .reactions
                .nodes
                .iter()
                .any(|r| r.content == reaction && r.is_from(reviewer))
        })
}

/// Keep approved threads in input order and project them for output
pub fn approved_threads(
    threads: &[ReviewThread],
    reviewer: &str,
    reaction: &str,
) -> Vec<ApprovedThread> {
    threads
        .iter()
        .filter(|thread| {
            let approved = is_approved_by(thread, reviewer, reaction);
            debug!(
                "Thread {} on {}: {}",
                thread.id,
                thread.path,
                if approved {
                    "approved"
                } else if thread.is_resolved {
                    "resolved, skipping"
                } else {
                    "not approved, skipping"
                }
            );
            approved
        })
        .map(ApprovedThread::from)
        .collect()
}

/// Write threads as pretty-printed JSON, creating parent directories as needed
pub fn write_approved_threads(path: &Path, threads: &[ApprovedThread]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Error creating output directory: {}", parent.display()))?;
    }

    let json = serde_json::to_string_pretty(threads)
        .context("Failed to serialize approved threads")?;

    fs::write(path, json)
        .with_context(|| format!("Error writing output file: {}", path.display()))?;

    Ok(())
}

/// Filter `input` down to threads approved by `reviewer` and write them to
/// `output`. Returns the number of threads written.
pub fn run(input: &Path, reviewer: &str, output: &Path, reaction: &str) -> Result<usize> {
    info!("Reading review threads from {}", input.display());
    let threads = load_review_threads(input)?;
    info!("Found {} review threads", threads.len());

    let approved = approved_threads(&threads, reviewer, reaction);
    info!(
        "{} of {} threads approved by {} with {}",
        approved.len(),
        threads.len(),
        reviewer,
        reaction
    );

    write_approved_threads(output, &approved)?;

    Ok(approved.len())
}
