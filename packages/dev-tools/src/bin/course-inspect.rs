//! Course snapshot inspector
//!
//! Loads a JSON page snapshot into the in-memory store and prints what the
//! course site would render from it, as pretty JSON on stdout.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin course-inspect -- pages.json                 # site TOC
//! cargo run --bin course-inspect -- pages.json course rust     # one course
//! cargo run --bin course-inspect -- pages.json nav intro       # prev/next
//! cargo run --bin course-inspect -- pages.json complete ana intro
//! cargo run --bin course-inspect -- pages.json categories
//! cargo run --bin course-inspect -- pages.json quick
//! cargo run --bin course-inspect -- pages.json recent
//! cargo run --bin course-inspect -- pages.json search deploy
//! cargo run --bin course-inspect -- pages.json order rust edit.json
//! ```
//!
//! `order` reads `{ "modules": [...], "chapters": [...] }` from the edit file,
//! saves it, and prints the canonical order followed by the new course tree.
//!
//! # Configuration
//!
//! Settings come from `COURSEWAY_CONFIG` or `~/.courseway/config.json` when
//! present. Log level follows `RUST_LOG`.

use anyhow::{bail, Context};
use courseway_core::{
    ChapterPosition, ContentService, CourseConfig, InMemoryPageStore, ModulePosition,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

const USAGE: &str = "usage: course-inspect <snapshot.json> \
[toc | course <id> | nav <page-id> | complete <user-id> <page-id> | categories | quick | recent | search <term> | order <course-id> <edit.json>]";

/// Ordering edit as submitted by the course editor
#[derive(Debug, Deserialize)]
struct OrderEdit {
    #[serde(default)]
    modules: Vec<ModulePosition>,
    #[serde(default)]
    chapters: Vec<ChapterPosition>,
}

fn print_json(value: &impl Serialize) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn required<'a>(args: &'a [String], index: usize, name: &str) -> anyhow::Result<&'a str> {
    match args.get(index) {
        Some(value) => Ok(value.as_str()),
        None => bail!("missing <{}>\n{}", name, USAGE),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("course_inspect=info,courseway_core=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let snapshot_path = required(&args, 0, "snapshot.json")?;
    let command = args.get(1).map(String::as_str).unwrap_or("toc");

    let config = CourseConfig::load_or_default()
        .await
        .context("Failed to load configuration")?;
    let store = InMemoryPageStore::from_json_file(snapshot_path)
        .await
        .with_context(|| format!("Failed to load snapshot {}", snapshot_path))?;
    let service = ContentService::new(Arc::new(store), config);
    tracing::info!("Running '{}' against {}", command, snapshot_path);

    match command {
        "toc" => print_json(&service.site_toc().await?)?,
        "course" => print_json(&service.course_toc(required(&args, 2, "id")?).await?)?,
        "nav" => print_json(&service.navigate(required(&args, 2, "page-id")?).await?)?,
        "complete" => {
            let user_id = required(&args, 2, "user-id")?;
            let page_id = required(&args, 3, "page-id")?;
            print_json(&service.complete_and_advance(user_id, page_id).await?)?;
        }
        "categories" => print_json(&*service.categories().await?)?,
        "quick" => print_json(&service.quick_access_pages().await?)?,
        "recent" => print_json(&service.recent_updates().await?)?,
        "search" => print_json(&service.search(required(&args, 2, "term")?, None).await?)?,
        "order" => {
            let course_id = required(&args, 2, "course-id")?;
            let edit_path = required(&args, 3, "edit.json")?;

            let contents = tokio::fs::read_to_string(edit_path)
                .await
                .with_context(|| format!("Failed to read {}", edit_path))?;
            let edit: OrderEdit = serde_json::from_str(&contents)
                .with_context(|| format!("Failed to parse {}", edit_path))?;

            let order = service
                .save_course_order(course_id, &edit.modules, &edit.chapters)
                .await?;
            print_json(&order)?;
            print_json(&service.course_toc(course_id).await?)?;
        }
        other => bail!("unknown command '{}'\n{}", other, USAGE),
    }

    Ok(())
}
