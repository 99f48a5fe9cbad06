//! Development tasks for chatview
//!
//! Run with `cargo run -p xtask -- <task>`.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};

use chatview::cli::Cli;

#[derive(Parser)]
#[command(name = "xtask", about = "Development tasks for chatview")]
struct Xtask {
    #[command(subcommand)]
    task: Task,
}

#[derive(Subcommand)]
enum Task {
    /// Generate man pages for chatview and its subcommands
    Man {
        /// Output directory
        #[arg(long, default_value = "target/man")]
        out: PathBuf,
    },
}

fn main() -> Result<()> {
    match Xtask::parse().task {
        Task::Man { out } => generate_man_pages(&out),
    }
}

/// Write `chatview.1` plus one page per subcommand into `out`.
fn generate_man_pages(out: &Path) -> Result<()> {
    fs::create_dir_all(out).with_context(|| format!("Failed to create {:?}", out))?;

    let cmd = Cli::command();
    write_page(&cmd, "chatview", out)?;

    for sub in cmd.get_subcommands() {
        let name = format!("chatview-{}", sub.get_name());
        let sub = sub.clone().name(name.clone());
        write_page(&sub, &name, out)?;
    }

    println!("Man pages written to {}", out.display());
    Ok(())
}

fn write_page(cmd: &clap::Command, name: &str, out: &Path) -> Result<()> {
    let mut buffer = Vec::new();
    clap_mangen::Man::new(cmd.clone())
        .render(&mut buffer)
        .with_context(|| format!("Failed to render man page for {}", name))?;

    let path = out.join(format!("{}.1", name));
    fs::write(&path, buffer).with_context(|| format!("Failed to write {:?}", path))?;
    Ok(())
}
