//! reportkit - structured report assembly tool
//!
//! A CLI tool that builds Microsoft Word reports from TOML manifests and
//! reads rendered reports back for inspection.

#![deny(unsafe_code)]
#![cfg_attr(all(not(debug_assertions), not(test)), deny(clippy::all))]
#![cfg_attr(all(not(debug_assertions), not(test)), deny(missing_docs))]

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use reportkit::content_tree::Node;
use reportkit::renderer::DocumentRenderer;
use reportkit::style_catalog;
use reportkit::{DocxRenderer, Manifest};
use std::path::PathBuf;

/// Main entry point for the reportkit CLI application
fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {:?}", e);
        std::process::exit(1);
    }
}

/// Run the CLI application
fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Build {
            manifest,
            output,
            verbose,
        } => {
            init_logging(verbose);
            handle_build_command(manifest, output, verbose)?;
        }

        Commands::Inspect { path, verbose } => {
            init_logging(verbose);
            handle_inspect_command(path)?;
        }

        Commands::Styles => {
            handle_styles_command()?;
        }
    }

    Ok(())
}

/// Initialize logging if verbose
fn init_logging(verbose: bool) {
    if verbose {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Info)
            .init();
    }
}

/// Handle the build command
fn handle_build_command(
    manifest_path: PathBuf,
    output: Option<PathBuf>,
    verbose: bool,
) -> Result<()> {
    let manifest = Manifest::load(&manifest_path)
        .with_context(|| format!("Failed to load manifest {}", manifest_path.display()))?;

    let output = manifest.output_path(output);

    let document = manifest
        .build()
        .with_context(|| format!("Failed to build report from {}", manifest_path.display()))?;

    if verbose {
        println!("Input: {}", manifest_path.display());
        println!("Output: {}", output.display());
        println!("  - {} nodes", document.len());
        println!("  - {} headings", document.heading_count());
        println!("  - {} list items", document.list_item_count());
        println!("  - {} words", document.word_count());
    }

    DocxRenderer::new()
        .render(&document, &output)
        .with_context(|| format!("Failed to export DOCX to {}", output.display()))?;

    println!("Report generated successfully: {}", output.display());

    Ok(())
}

/// Handle the inspect command
fn handle_inspect_command(path: PathBuf) -> Result<()> {
    let nodes = reportkit::inspect(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    println!("{} ({} nodes)", path.display(), nodes.len());
    for (index, node) in nodes.iter().enumerate() {
        print_node_info(index, node);
    }

    Ok(())
}

/// Handle the styles command
fn handle_styles_command() -> Result<()> {
    println!("Style catalog:\n");

    for token in style_catalog::catalog() {
        let directive = style_catalog::resolve(token)?;
        let mut traits = Vec::new();
        if let Some(style_id) = directive.style_id {
            traits.push(format!("style {}", style_id));
        }
        if directive.bold {
            traits.push("bold".to_string());
        }
        if directive.italic {
            traits.push("italic".to_string());
        }
        if let Some(size) = directive.size_half_points {
            traits.push(format!("{}pt", size as f32 / 2.0));
        }
        if let Some(alignment) = directive.alignment {
            traits.push(format!("align {}", alignment));
        }
        println!("  {:<12} {}", token.to_string(), traits.join(", "));
    }

    Ok(())
}

/// Print information about a single node
fn print_node_info(index: usize, node: &Node) {
    let label = match node {
        Node::Heading { level, .. } => format!("Heading {}", level),
        Node::Paragraph {
            list_style: Some(style),
            ..
        } => style.to_string(),
        Node::Paragraph { .. } => "Paragraph".to_string(),
    };

    println!("  [{:>3}] {} ({}): {}", index, label, node.alignment(), node.plain_text());
    for run in node.runs().iter().filter(|r| r.has_formatting()) {
        let mut flags = Vec::new();
        if run.bold {
            flags.push("bold".to_string());
        }
        if run.italic {
            flags.push("italic".to_string());
        }
        if let Some(size) = run.font_size_pt {
            flags.push(format!("{}pt", size));
        }
        println!("        run {:?} [{}]", run.text, flags.join(", "));
    }
}
