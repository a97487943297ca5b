use std::fs;
use std::io;
use std::path::PathBuf;

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use colored::Colorize;

use channelscope::config::Config;
use channelscope::format::{format_compact_number, NOT_AVAILABLE};
use channelscope::model::PatternsReport;
use channelscope::serve::{start_viewer, ViewerPaths};
use channelscope::summary::{video_rows, ChannelSummary};
use channelscope::{load, render, report};

#[derive(Parser, Debug)]
#[command(name = "channelscope")]
#[command(author, version, about = "Render YouTube channel analytics exports as dashboards")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render both dashboards to HTML files
    Render {
        /// Channel analysis export (JSON)
        #[arg(long)]
        analysis: Option<PathBuf>,

        /// Media-kit export (JSON)
        #[arg(long)]
        media_kit: Option<PathBuf>,

        /// Output directory for the rendered pages
        #[arg(short, long)]
        output_dir: Option<PathBuf>,
    },

    /// Serve the dashboards over HTTP, re-reading exports per request
    Serve {
        /// Port to listen on
        #[arg(short, long)]
        port: Option<u16>,

        /// Channel analysis export (JSON)
        #[arg(long)]
        analysis: Option<PathBuf>,

        /// Media-kit export (JSON)
        #[arg(long)]
        media_kit: Option<PathBuf>,
    },

    /// Print the segmented patterns report
    Patterns {
        /// Channel analysis export (JSON)
        #[arg(long)]
        analysis: Option<PathBuf>,

        /// Section label to segment (default: the common patterns section)
        #[arg(long)]
        section: Option<String>,

        /// Show only the second-half success factors of the section
        #[arg(long)]
        factors: bool,
    },

    /// Print channel-level aggregates and the video table
    Summary {
        /// Channel analysis export (JSON)
        #[arg(long)]
        analysis: Option<PathBuf>,
    },

    /// Generate shell completions
    Completion {
        /// Shell to generate completions for
        shell: Shell,
    },
}

fn main() {
    let args = Args::parse();
    let config = Config::load();

    let result = match args.command {
        Command::Render {
            analysis,
            media_kit,
            output_dir,
        } => cmd_render(
            analysis.unwrap_or(config.input.analysis),
            media_kit.unwrap_or(config.input.media_kit),
            output_dir.unwrap_or(config.output.dir),
        ),
        Command::Serve {
            port,
            analysis,
            media_kit,
        } => {
            let paths = ViewerPaths {
                analysis: analysis.unwrap_or(config.input.analysis),
                media_kit: media_kit.unwrap_or(config.input.media_kit),
            };
            start_viewer(port.unwrap_or(config.server.port), &paths)
                .map_err(|e| format!("Server error: {}", e))
        }
        Command::Patterns {
            analysis,
            section,
            factors,
        } => cmd_patterns(analysis.unwrap_or(config.input.analysis), section, factors),
        Command::Summary { analysis } => cmd_summary(analysis.unwrap_or(config.input.analysis)),
        Command::Completion { shell } => {
            let mut cmd = Args::command();
            clap_complete::generate(shell, &mut cmd, "channelscope", &mut io::stdout());
            Ok(())
        }
    };

    if let Err(message) = result {
        eprintln!("{} {}", "error:".red().bold(), message);
        std::process::exit(1);
    }
}

fn cmd_render(
    analysis_path: PathBuf,
    media_kit_path: PathBuf,
    output_dir: PathBuf,
) -> Result<(), String> {
    fs::create_dir_all(&output_dir)
        .map_err(|e| format!("cannot create {}: {}", output_dir.display(), e))?;

    // Render both pages even if one fails, then report every failure.
    let mut failures = Vec::new();

    match load::load_analysis(&analysis_path) {
        Ok(doc) => {
            let out_path = output_dir.join("analysis.html");
            match fs::File::create(&out_path) {
                Ok(mut file) => match render::analysis::write(&mut file, &doc) {
                    Ok(()) => println!("{} {}", "rendered".green(), out_path.display()),
                    Err(e) => failures.push(format!("{}: {}", out_path.display(), e)),
                },
                Err(e) => failures.push(format!("{}: {}", out_path.display(), e)),
            }
        }
        Err(e) => failures.push(format!("{}: {}", analysis_path.display(), e)),
    }

    match load::load_media_kit(&media_kit_path) {
        Ok(doc) => {
            let out_path = output_dir.join("media_kit.html");
            match fs::File::create(&out_path) {
                Ok(mut file) => match render::media_kit::write(&mut file, &doc) {
                    Ok(()) => println!("{} {}", "rendered".green(), out_path.display()),
                    Err(e) => failures.push(format!("{}: {}", out_path.display(), e)),
                },
                Err(e) => failures.push(format!("{}: {}", out_path.display(), e)),
            }
        }
        Err(e) => failures.push(format!("{}: {}", media_kit_path.display(), e)),
    }

    if failures.is_empty() {
        Ok(())
    } else {
        Err(failures.join("; "))
    }
}

/// Heading form of a section label: each word capitalized.
fn title_case(label: &str) -> String {
    label
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn cmd_patterns(
    analysis_path: PathBuf,
    section: Option<String>,
    factors: bool,
) -> Result<(), String> {
    let doc = load::load_analysis(&analysis_path)
        .map_err(|e| format!("{}: {}", analysis_path.display(), e))?;
    let patterns = &doc.patterns_report;

    let label = section
        .as_deref()
        .unwrap_or(PatternsReport::COMMON_PATTERNS);
    let (heading, entries) = if factors {
        (
            "Success Factors".to_string(),
            report::second_half_of_section(patterns, label),
        )
    } else {
        (title_case(label), report::segment_section(patterns, label))
    };

    println!("{}", heading.bold());
    if entries.is_empty() {
        println!("  (no entries found)");
        return Ok(());
    }
    for (i, entry) in entries.iter().enumerate() {
        println!("  {}. {}", i + 1, entry.title.cyan());
        if !entry.content.is_empty() {
            println!("     {}", entry.content);
        }
    }
    Ok(())
}

fn cmd_summary(analysis_path: PathBuf) -> Result<(), String> {
    let doc = load::load_analysis(&analysis_path)
        .map_err(|e| format!("{}: {}", analysis_path.display(), e))?;

    let summary = ChannelSummary::from_document(&doc);
    println!("{}", doc.channel_name.bold());
    println!(
        "  subscribers:     {}",
        summary
            .subscribers
            .map(format_compact_number)
            .unwrap_or_else(|| NOT_AVAILABLE.to_string())
    );
    println!(
        "  top-video views: {}",
        format_compact_number(summary.total_views)
    );
    println!("  avg engagement:  {}", summary.average_engagement_display());

    let rows = video_rows(&doc);
    if rows.is_empty() {
        return Ok(());
    }
    println!();
    for row in rows {
        let rank = row
            .rank
            .map(|r| r.to_string())
            .unwrap_or_else(|| "-".to_string());
        let views = row
            .views
            .map(format_compact_number)
            .unwrap_or_else(|| NOT_AVAILABLE.to_string());
        let engagement = match row.engagement_band.as_str() {
            "high" => row.engagement_display.green(),
            "medium" => row.engagement_display.yellow(),
            _ => row.engagement_display.red(),
        };
        println!(
            "  {:>3}. {:<50} {:>8} views  {} engagement",
            rank,
            row.title,
            views,
            engagement
        );
    }
    Ok(())
}
