//! Assembly tree commands: tree, download, fork.

use anyhow::Result;
use humansize::{format_size, DECIMAL};
use serde::Serialize;

use cad_history_core::AssemblyKind;
use cad_history_ops::{CommitDownload, Config, HistoryBrowser, LoggingCollaborators};
use cad_history_tree::DownloadIntent;

#[derive(Serialize)]
struct NodeRow<'a> {
    path: &'a str,
    name: &'a str,
    kind: AssemblyKind,
    depth: usize,
    expanded: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    size: Option<&'a str>,
}

/// Print the visible part of a commit's tree.
pub fn show(config: &Config, commit: &str, expand: &[String], all: bool, json: bool) -> Result<()> {
    let mut browser = HistoryBrowser::from_config(config)?;
    browser.select(commit)?;

    if let Err(err) = browser.current_tree() {
        if err.is_not_found() {
            println!("No assembly data for commit {}", commit);
            return Ok(());
        }
        return Err(err.into());
    }

    for path in expand {
        browser.expand(path);
    }
    if all {
        browser.expand_all()?;
    }

    let visible = browser.visible_tree()?;

    if json {
        let rows: Vec<NodeRow> = visible
            .iter()
            .map(|v| NodeRow {
                path: &v.path,
                name: &v.node.name,
                kind: v.node.kind,
                depth: v.depth,
                expanded: v.node.has_children() && browser.is_expanded(&v.path),
                size: v.node.size.as_deref(),
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    for v in &visible {
        let marker = if !v.node.has_children() {
            " "
        } else if browser.is_expanded(&v.path) {
            "▾"
        } else {
            "▸"
        };
        let indent = "  ".repeat(v.depth);
        match &v.node.size {
            Some(size) => println!("{}{} {}  ({})", indent, marker, v.node.name, size),
            None => println!("{}{} {}", indent, marker, v.node.name),
        }
    }

    let root = browser.current_tree()?;
    println!();
    println!(
        "{} parts, {}",
        root.part_count(),
        format_size(root.total_size_bytes(), DECIMAL)
    );

    Ok(())
}

/// Download a node, or the whole commit when `path` is `None`.
pub fn download(
    config: &Config,
    commit: &str,
    path: Option<&str>,
    kind: CommitDownload,
) -> Result<()> {
    let mut browser = HistoryBrowser::from_config(config)?;
    browser.select(commit)?;

    match path {
        Some(path) => {
            let intent = browser.download(path, &LoggingCollaborators)?;
            print_intent(&intent);
        }
        None => {
            let intents = browser.download_commit(kind, &LoggingCollaborators)?;
            println!("⬇️  {} of {}: {} downloads", kind, commit, intents.len());
            for intent in &intents {
                print_intent(intent);
            }
        }
    }

    Ok(())
}

fn print_intent(intent: &DownloadIntent) {
    let size = match intent.node.kind {
        AssemblyKind::Part => intent
            .node
            .size
            .clone()
            .unwrap_or_else(|| "N/A".to_string()),
        AssemblyKind::Assembly => intent.total_size(),
    };

    println!("⬇️  Downloading: {}", intent.node.name);
    println!("   Path:  {}", intent.path);
    println!("   Size:  {}", size);
    println!("   Files: {}", intent.files().len());
}

/// Create a branch from `path` in a commit.
pub fn fork(config: &Config, commit: &str, path: &str, branch: &str) -> Result<()> {
    let mut browser = HistoryBrowser::from_config(config)?;
    let short = browser.select(commit)?.id.short().to_string();

    let created = browser.fork(path, branch, &LoggingCollaborators)?;
    println!("🌿 Created new branch: \"{}\"", created);
    println!("   Forked from: {}", path);
    println!("   Commit:      {} ({})", commit, short);

    Ok(())
}
