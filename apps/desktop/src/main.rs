use anyhow::{anyhow, Context, Result};
use clap::Parser;
use client_core::{load_settings, MutationMode, PostListController};
use shared::domain::PostId;
use tracing_subscriber::EnvFilter;

/// Loads the post list, applies the requested edits and prints the result.
///
/// Edits run in a fixed order: adds, then renames, then deletes.
#[derive(Parser, Debug)]
struct Args {
    #[arg(long)]
    posts_url: Option<String>,
    /// Title of a post to append. Repeatable.
    #[arg(long = "add")]
    add: Vec<String>,
    /// `<id>=<title>`. Repeatable.
    #[arg(long = "rename", value_parser = parse_rename)]
    rename: Vec<(PostId, String)>,
    #[arg(long = "delete")]
    delete: Vec<i64>,
    /// Send mutations to the posts endpoint instead of applying them locally.
    #[arg(long)]
    remote_mutations: bool,
}

fn parse_rename(raw: &str) -> Result<(PostId, String)> {
    let (id, title) = raw
        .split_once('=')
        .ok_or_else(|| anyhow!("expected <id>=<title>, got '{raw}'"))?;
    let id = id
        .trim()
        .parse::<i64>()
        .with_context(|| format!("invalid post id '{id}'"))?;
    Ok((PostId(id), title.to_string()))
}

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
    let args = Args::parse();

    let mut settings = load_settings()?;
    if let Some(url) = args.posts_url {
        settings.posts_url = client_core::config::normalize_posts_url(&url)?;
    }
    if args.remote_mutations {
        settings.mutation_mode = MutationMode::Remote;
    }

    let mut controller = PostListController::from_settings(&settings);
    controller
        .load()
        .await
        .with_context(|| format!("Error fetching posts from {}", settings.posts_url))?;

    for title in args.add {
        let id = controller.add(title).await?;
        tracing::info!(post_id = %id, "added");
    }
    for (id, title) in args.rename {
        if !controller.rename(id, title).await? {
            tracing::warn!(post_id = %id, "rename skipped: no such post");
        }
    }
    for id in args.delete.into_iter().map(PostId) {
        if !controller.delete(id).await? {
            tracing::warn!(post_id = %id, "delete skipped: no such post");
        }
    }

    println!("{}", serde_json::to_string_pretty(controller.posts())?);
    Ok(())
}
