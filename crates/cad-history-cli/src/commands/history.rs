//! Commit graph commands: graph, layout, summary, share, sample.

use anyhow::Result;
use serde::Serialize;

use cad_history_core::Commit;
use cad_history_graph::{Bounds, CommitEdge, LaneLayout};
use cad_history_ops::{Config, HistoryBrowser, ProjectData};

#[derive(Serialize)]
struct EdgeOutput {
    #[serde(flatten)]
    edge: CommitEdge,
    svg_path: String,
}

#[derive(Serialize)]
struct GraphOutput<'a> {
    commits: &'a [Commit],
    edges: Vec<EdgeOutput>,
    bounds: Bounds,
}

#[derive(Serialize)]
struct LayoutRow<'a> {
    id: &'a str,
    branch: &'a str,
    generation: usize,
    lane: usize,
    x: f64,
    y: f64,
}

/// Print commits, edges and canvas bounds.
pub fn graph(config: &Config, json: bool) -> Result<()> {
    let browser = HistoryBrowser::from_config(config)?;
    let graph = browser.graph();
    let bounds = graph.bounds(config.canvas_margin);
    let edges: Vec<EdgeOutput> = graph
        .edges()
        .into_iter()
        .map(|edge| EdgeOutput {
            svg_path: edge.curve.to_svg_path(),
            edge,
        })
        .collect();

    if json {
        let output = GraphOutput {
            commits: graph.commits(),
            edges,
            bounds,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!(
        "📊 {}: {} commits, {} edges",
        browser.project().name,
        graph.len(),
        edges.len()
    );
    println!("   Canvas: {} x {}", bounds.width, bounds.height);
    println!();

    for commit in graph.topological_order() {
        println!(
            "● {:<12} {:<12} {} ({})",
            commit.id.as_str(),
            commit.branch.as_str(),
            commit.message,
            commit.author
        );
    }

    println!();
    println!("Edges:");
    for output in &edges {
        println!(
            "  {} -> {}  {}  {}",
            output.edge.parent, output.edge.child, output.edge.color, output.svg_path
        );
    }

    for dangling in graph.dangling_parents() {
        println!(
            "⚠️  {} references missing parent {}",
            dangling.commit, dangling.parent
        );
    }

    Ok(())
}

/// Print lane layout positions, independent of the configured layout mode.
pub fn layout(config: &Config, json: bool) -> Result<()> {
    let browser = HistoryBrowser::from_config(config)?;
    let graph = browser.graph();
    let layout = LaneLayout::compute(graph.topological_order(), &config.layout_config());

    let rows: Vec<LayoutRow> = graph
        .topological_order()
        .filter_map(|commit| {
            let position = layout.position_of(commit.id.as_str())?;
            Some(LayoutRow {
                id: commit.id.as_str(),
                branch: commit.branch.as_str(),
                generation: layout.generation_of(commit.id.as_str())?,
                lane: layout.lane_of(&commit.branch)?,
                x: position.x,
                y: position.y,
            })
        })
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    let lanes: Vec<&str> = layout.lanes().iter().map(|b| b.as_str()).collect();
    println!("Lanes: {}", lanes.join(", "));
    println!();
    println!(
        "{:<12} {:<12} {:>4} {:>4} {:>8} {:>8}",
        "commit", "branch", "gen", "lane", "x", "y"
    );
    for row in &rows {
        println!(
            "{:<12} {:<12} {:>4} {:>4} {:>8} {:>8}",
            row.id, row.branch, row.generation, row.lane, row.x, row.y
        );
    }

    Ok(())
}

/// Print project overview figures.
pub fn summary(config: &Config, json: bool) -> Result<()> {
    let browser = HistoryBrowser::from_config(config)?;
    let summary = browser.summary();

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!("📁 {} ({})", summary.name, summary.project_id);
    if let Some(description) = &summary.description {
        println!("   {}", description);
    }
    println!("   Commits:       {}", summary.total_commits);
    println!(
        "   Contributors:  {} ({})",
        summary.contributors.len(),
        summary.contributors.join(", ")
    );
    println!(
        "   Last modified: {}",
        summary.last_modified.as_deref().unwrap_or("-")
    );
    println!();
    println!("Branches:");
    for branch in &summary.branches {
        println!(
            "   {:<14} {}  {} commits ({} declared)",
            branch.name, branch.color, branch.actual_commits, branch.declared_commits
        );
    }

    Ok(())
}

/// Print a share link for a commit.
pub fn share(config: &Config, commit: &str) -> Result<()> {
    let mut browser = HistoryBrowser::from_config(config)?;
    browser.select(commit)?;
    println!("{}", browser.share_link()?);
    Ok(())
}

/// Print the built-in sample project.
pub fn sample() -> Result<()> {
    println!("{}", ProjectData::sample().to_json()?);
    Ok(())
}
