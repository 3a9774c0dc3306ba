use std::collections::HashSet;
use std::ffi::OsStr;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};
use tagline_lib::config::{self, ConfigError, PaletteFile};
use tagline_lib::schema::{Asset, AssetNode, MaterializationEvent, collect_labels};
use tagline_lib::{Badge, Palette, StatusTag};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

#[derive(Debug, Parser, Clone)]
#[command(
    name = "labeler",
    author,
    version,
    about = "Assign deterministic badge colors to labels and asset query responses",
    long_about = None
)]
pub struct Cli {
    /// Palette override file; defaults to the configured palette
    #[arg(long, global = true, value_name = "PALETTE_FILE")]
    pub palette: Option<PathBuf>,

    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Color each name and print the assignments
    Colors {
        #[arg(required = true, value_name = "NAME")]
        names: Vec<String>,

        /// Write to this file instead of stdout
        #[arg(long, value_name = "OUTPUT_FILE")]
        output: Option<PathBuf>,
    },
    /// Print the active palette
    Palette {
        /// Write to this file instead of stdout
        #[arg(long, value_name = "OUTPUT_FILE")]
        output: Option<PathBuf>,
    },
    /// Collect labels from response files and color them
    Badges {
        /// A response JSON file, or a directory searched for `*.json`
        #[arg(long, value_name = "SOURCE")]
        source: PathBuf,

        /// Destination file for the badge report
        #[arg(long, value_name = "OUTPUT_FILE")]
        output: PathBuf,
    },
}

/// A response document in any of the shapes the asset queries return.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ResponseDocument {
    Event(Box<MaterializationEvent>),
    Node(Box<AssetNode>),
    Asset(Box<Asset>),
    Many(Vec<ResponseDocument>),
}

impl ResponseDocument {
    fn push_labels(&self, labels: &mut Vec<String>, seen: &mut HashSet<String>) {
        let mut push = |label: &str| {
            if seen.insert(label.to_string()) {
                labels.push(label.to_string());
            }
        };

        match self {
            ResponseDocument::Event(event) => collect_labels(event).into_iter().for_each(push),
            ResponseDocument::Node(node) => node.badge_labels().into_iter().for_each(push),
            ResponseDocument::Asset(asset) => {
                for event in &asset.asset_materializations {
                    collect_labels(event).into_iter().for_each(&mut push);
                }
                if let Some(node) = &asset.definition {
                    node.badge_labels().into_iter().for_each(push);
                }
            }
            ResponseDocument::Many(documents) => {
                for document in documents {
                    document.push_labels(labels, seen);
                }
            }
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct BadgeReport {
    pub badges: Vec<Badge>,
    pub statuses: Vec<Badge>,
    pub sources: usize,
}

pub fn run(cli: Cli) -> Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    execute(cli, &mut handle)
}

/// Runs `cli`, writing any stdout-bound output to `out`.
pub fn execute<W: Write>(cli: Cli, out: &mut W) -> Result<()> {
    let palette = resolve_palette(cli.palette.as_deref())?;

    match cli.command {
        Command::Colors { names, output } => {
            let assignments = palette.assign_all(&names);
            write_json(&assignments, output.as_deref(), out)?;
            info!(
                target: "tagline::labeler",
                names = assignments.len(),
                palette = palette.len(),
                "colored names"
            );
        }
        Command::Palette { output } => {
            let file = PaletteFile {
                entries: palette.entries().to_vec(),
            };
            write_json(&file, output.as_deref(), out)?;
        }
        Command::Badges { source, output } => {
            let report = build_report(&palette, &source)?;
            write_json(&report, Some(&output), out)?;
            info!(
                target: "tagline::labeler",
                source = %source.display(),
                output = %output.display(),
                badges = report.badges.len(),
                sources = report.sources,
                "badge report written"
            );
        }
    }

    Ok(())
}

fn resolve_palette(path: Option<&Path>) -> Result<Palette> {
    match path {
        Some(path) => {
            if !path.is_file() {
                bail!("palette file '{}' does not exist", path.display());
            }
            config::load_palette_from_path(path)
                .with_context(|| format!("failed to load palette from '{}'", path.display()))
        }
        None => match config::load_palette() {
            Ok(palette) => Ok(palette),
            Err(ConfigError::MissingConfigDir) => {
                debug!("no config directory, using built-in palette");
                Ok(Palette::default())
            }
            Err(err) => Err(err).context("failed to load configured palette"),
        },
    }
}

fn build_report(palette: &Palette, source: &Path) -> Result<BadgeReport> {
    let files = response_files(source)?;

    let mut labels = Vec::new();
    let mut seen = HashSet::new();
    for path in &files {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read response '{}'", path.display()))?;
        let document: ResponseDocument = serde_json::from_str(&contents)
            .with_context(|| format!("failed to parse response '{}'", path.display()))?;
        document.push_labels(&mut labels, &mut seen);
    }

    let badges = labels
        .into_iter()
        .map(|label| Badge::for_label_in(palette, label))
        .collect();
    let statuses = StatusTag::ALL.into_iter().map(Badge::for_status).collect();

    Ok(BadgeReport {
        badges,
        statuses,
        sources: files.len(),
    })
}

fn response_files(source: &Path) -> Result<Vec<PathBuf>> {
    let metadata = fs::metadata(source)
        .with_context(|| format!("failed to read metadata for '{}'", source.display()))?;

    if metadata.is_file() {
        return Ok(vec![source.to_path_buf()]);
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(source) {
        let entry = entry
            .with_context(|| format!("failed to walk source directory '{}'", source.display()))?;

        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.into_path();
        if !is_json(&path) {
            warn!(path = %path.display(), "skipping non-JSON file");
            continue;
        }

        files.push(path);
    }

    files.sort();
    Ok(files)
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .and_then(OsStr::to_str)
        .map(|ext| ext.eq_ignore_ascii_case("json"))
        .unwrap_or(false)
}

fn write_json<T, W>(value: &T, output: Option<&Path>, out: &mut W) -> Result<()>
where
    T: Serialize + ?Sized,
    W: Write,
{
    let json = serde_json::to_vec_pretty(value)?;

    match output {
        Some(path) => {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() {
                    fs::create_dir_all(parent).with_context(|| {
                        format!(
                            "failed to create output parent directory '{}'",
                            parent.display()
                        )
                    })?;
                }
            }
            fs::write(path, json)
                .with_context(|| format!("failed to write output to '{}'", path.display()))?;
        }
        None => {
            out.write_all(&json)?;
            out.write_all(b"\n")?;
        }
    }

    Ok(())
}
