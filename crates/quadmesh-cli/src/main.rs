//! quadmesh CLI - inspect and subdivide quad-only OBJ models.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use log::info;
use quadmesh::{read_obj, subdivide_levels, write_obj, Config, LogLevel, MeshStats, QuadMesh};
use serde::Serialize;

#[derive(Parser, Debug)]
#[command(name = "quadmesh", version)]
#[command(about = "Catmull-Clark subdivision for quad meshes", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,
    /// Log verbosity (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    log_level: Option<LogLevel>,
    /// Compute flat face normals instead of using `vn` records
    #[arg(long, global = true)]
    flat_normals: bool,
    /// Centre the model and scale it into a unit box on import
    #[arg(long, global = true)]
    unitize: bool,
    /// Refuse to subdivide past this many faces
    #[arg(long, global = true, value_name = "N")]
    max_faces: Option<usize>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print element counts of an OBJ model
    Info {
        /// Input OBJ file
        file: PathBuf,
        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Subdivide an OBJ model and write the result as OBJ
    Subdivide {
        /// Input OBJ file
        input: PathBuf,
        /// Output OBJ file
        output: PathBuf,
        /// Number of subdivision passes (default: from config)
        #[arg(short, long)]
        level: Option<u32>,
    },
    /// Subdivide an OBJ model and write its flat render buffers as JSON
    ExportBuffers {
        /// Input OBJ file
        input: PathBuf,
        /// Output JSON file
        output: PathBuf,
        /// Number of subdivision passes (default: from config)
        #[arg(short, long)]
        level: Option<u32>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Serialize)]
struct InfoReport<'a> {
    file: &'a Path,
    #[serde(flatten)]
    stats: MeshStats,
    euler_characteristic: i64,
    closed: bool,
}

#[derive(Serialize)]
struct BufferExport<'a> {
    level: u32,
    quads: usize,
    positions: &'a [f32],
    normals: &'a [f32],
    indices: Vec<u32>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;
    init_logger(&resolve_log_level(&cli, &config));

    match &cli.command {
        Commands::Info { file, format } => show_info(file, *format, &config),
        Commands::Subdivide {
            input,
            output,
            level,
        } => {
            let mesh = load_refined(input, level.unwrap_or(config.subdivide.level), &config)?;
            write_obj(&mesh, output)
                .with_context(|| format!("failed to write {}", output.display()))?;
            info!("Wrote {} faces to {}", mesh.num_faces(), output.display());
            Ok(())
        }
        Commands::ExportBuffers {
            input,
            output,
            level,
        } => {
            let level = level.unwrap_or(config.subdivide.level);
            let mesh = load_refined(input, level, &config)?;
            export_buffers(&mesh, level, output)
        }
    }
}

/// Load the config file (if any) and apply command-line overrides.
fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    if cli.flat_normals {
        config.import.use_file_normals = false;
    }
    if cli.unitize {
        config.import.unitize = true;
    }
    if let Some(max) = cli.max_faces {
        config.subdivide.max_faces = max;
    }
    Ok(config)
}

/// Flag, then `RUST_LOG`, then config, then `info`.
fn resolve_log_level(cli: &Cli, config: &Config) -> String {
    if let Some(level) = cli.log_level {
        return level.as_str().to_string();
    }

    if let Ok(level) = std::env::var("RUST_LOG") {
        if !level.trim().is_empty() {
            return level;
        }
    }

    if let Some(level) = config.log_level {
        return level.as_str().to_string();
    }

    "info".to_string()
}

fn init_logger(level: &str) {
    let mut builder = env_logger::Builder::new();
    builder.target(env_logger::Target::Stderr);
    builder.filter_level(log::LevelFilter::Info);
    builder.parse_filters(level);
    builder.format(|buf, record| {
        use std::io::Write;
        let module = record.module_path().unwrap_or(record.target());
        writeln!(
            buf,
            "{} [{}] {}: {}",
            buf.timestamp_millis(),
            record.level(),
            module,
            record.args()
        )
    });

    if let Err(err) = builder.try_init() {
        eprintln!("Failed to initialize logger: {}", err);
    }
}

fn load(input: &Path, config: &Config) -> Result<QuadMesh> {
    let mesh = read_obj(input, &config.import)
        .with_context(|| format!("failed to import {}", input.display()))?;
    info!(
        "Loaded {}: {} vertices, {} faces",
        input.display(),
        mesh.num_vertices(),
        mesh.num_faces()
    );
    Ok(mesh)
}

fn load_refined(input: &Path, level: u32, config: &Config) -> Result<QuadMesh> {
    let mesh = load(input, config)?;
    if level == 0 {
        return Ok(mesh);
    }
    subdivide_levels(&mesh, level, &config.subdivide.params())
        .with_context(|| format!("failed to subdivide {} to level {}", input.display(), level))
}

fn show_info(file: &Path, format: OutputFormat, config: &Config) -> Result<()> {
    let mesh = load(file, config)?;
    let stats = mesh.stats();

    match format {
        OutputFormat::Json => {
            let report = InfoReport {
                file,
                stats,
                euler_characteristic: stats.euler_characteristic(),
                closed: stats.is_closed(),
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        OutputFormat::Text => {
            println!("OBJ model: {}", file.display());
            println!("  Vertices: {}", stats.vertices);
            println!("  Edges: {}", stats.edges);
            println!("  Faces: {}", stats.faces);
            println!("  Boundary edges: {}", stats.boundary_edges);
            println!("  Extraordinary vertices: {}", stats.extraordinary_vertices);
            println!("  Euler characteristic: {}", stats.euler_characteristic());
            if let Some((lo, hi)) = mesh.bounds() {
                println!(
                    "  Bounds: ({}, {}, {}) - ({}, {}, {})",
                    lo.x, lo.y, lo.z, hi.x, hi.y, hi.z
                );
            }
        }
    }

    Ok(())
}

fn export_buffers(mesh: &QuadMesh, level: u32, output: &Path) -> Result<()> {
    let buffers = mesh.buffers();
    let export = BufferExport {
        level,
        quads: buffers.num_quads(),
        positions: &buffers.positions,
        normals: &buffers.normals,
        indices: buffers.triangle_indices(),
    };
    let json = serde_json::to_string(&export)?;
    fs::write(output, json).with_context(|| format!("failed to write {}", output.display()))?;
    info!(
        "Exported {} quads ({} corners) to {}",
        export.quads,
        buffers.num_corners(),
        output.display()
    );
    Ok(())
}
