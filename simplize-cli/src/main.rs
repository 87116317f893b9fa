//! Simplize CLI - closed triangle mesh inspection and simplification.
//!
//! Usage: simplize [-v] <COMMAND> <INPUT> [OUTPUT] [OPTIONS]
//!
//! Run `simplize --help` for available commands.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use simplize_core::HalfEdgeMesh;
use simplize_simplification::{MeshSimplifier, QuadricErrorSimplifier};

#[derive(Parser)]
#[command(name = "simplize")]
#[command(author, version, about = "Half-edge mesh simplification CLI", long_about = None)]
struct Cli {
    /// Log debug output (RUST_LOG still applies to other targets)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Display mesh statistics
    Info {
        /// Input mesh file (.obj)
        input: PathBuf,

        /// Check the half-edge invariants
        #[arg(long)]
        verify: bool,
    },

    /// Simplify a mesh by quadric error edge contraction
    Simplify {
        /// Input mesh file (.obj)
        input: PathBuf,

        /// Output mesh file (.obj)
        output: PathBuf,

        /// Fraction of faces to keep, in (0, 1]
        #[arg(short, long, default_value = "0.5")]
        ratio: f32,

        /// Stop once the cheapest contraction costs more than this
        #[arg(long)]
        max_error: Option<f64>,

        /// Check the half-edge invariants before and after
        #[arg(long)]
        verify: bool,
    },
}

fn main() {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Info { input, verify } => cmd_info(&input, verify),
        Commands::Simplify {
            input,
            output,
            ratio,
            max_error,
            verify,
        } => cmd_simplify(&input, &output, ratio, max_error, verify),
    }
}

fn init_logger(verbose: bool) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    builder.target(env_logger::Target::Stderr);
    if verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }

    if let Err(err) = builder.try_init() {
        eprintln!("Failed to initialize logger: {}", err);
    }
}

fn load(input: &Path) -> Result<HalfEdgeMesh> {
    let soup = simplize_io::read_soup(input)
        .with_context(|| format!("failed to read {}", input.display()))?;
    HalfEdgeMesh::from_soup(&soup)
        .with_context(|| format!("{} is not a closed manifold triangle mesh", input.display()))
}

fn print_report(mesh: &HalfEdgeMesh, verify: bool) {
    println!("{}", mesh.stats());
    println!("genus: {}", mesh.compute_genus());
    println!("surface area: {:.6}", mesh.compute_surface_area());
    println!("volume: {:.6}", mesh.compute_volume());
    println!("average degree: {:.3}", mesh.compute_average_degree());

    if verify {
        let violations = mesh.verify();
        println!("invariant violations: {:#010b}", violations.bits());
        if !violations.is_empty() {
            tracing::warn!(?violations, "mesh failed verification");
        }
    }
}

fn cmd_info(input: &Path, verify: bool) -> Result<()> {
    let mesh = load(input)?;
    println!("File: {}", input.display());
    print_report(&mesh, verify);
    Ok(())
}

fn cmd_simplify(
    input: &Path,
    output: &Path,
    ratio: f32,
    max_error: Option<f64>,
    verify: bool,
) -> Result<()> {
    let mut mesh = load(input)?;
    println!("Input: {}", input.display());
    print_report(&mesh, verify);

    let simplifier = QuadricErrorSimplifier::with_params(max_error);
    let start = Instant::now();
    let stats = simplifier
        .simplify(&mut mesh, ratio)
        .context("simplification failed")?;
    tracing::info!(elapsed_ms = start.elapsed().as_millis() as u64, "{}", stats);

    println!();
    println!("Output: {}", output.display());
    print_report(&mesh, verify);

    simplize_io::write_soup(&mesh.to_soup(), output)
        .with_context(|| format!("failed to write {}", output.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_simplify_defaults() {
        let cli = Cli::try_parse_from(["simplize", "simplify", "in.obj", "out.obj"]).unwrap();
        assert!(!cli.verbose);
        match cli.command {
            Commands::Simplify {
                ratio,
                max_error,
                verify,
                ..
            } => {
                assert_eq!(ratio, 0.5);
                assert!(max_error.is_none());
                assert!(!verify);
            }
            _ => panic!("expected simplify"),
        }
    }

    #[test]
    fn test_global_verbose_after_subcommand() {
        let cli = Cli::try_parse_from(["simplize", "info", "in.obj", "--verify", "-v"]).unwrap();
        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::Info { verify: true, .. }));
    }

    #[test]
    fn test_simplify_options() {
        let cli = Cli::try_parse_from([
            "simplize",
            "simplify",
            "in.obj",
            "out.obj",
            "-r",
            "0.2",
            "--max-error",
            "0.01",
        ])
        .unwrap();
        match cli.command {
            Commands::Simplify {
                ratio, max_error, ..
            } => {
                assert_eq!(ratio, 0.2);
                assert_eq!(max_error, Some(0.01));
            }
            _ => panic!("expected simplify"),
        }
    }

    #[test]
    fn test_missing_output_is_rejected() {
        assert!(Cli::try_parse_from(["simplize", "simplify", "in.obj"]).is_err());
    }

    #[test]
    fn test_simplify_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("cube.obj");
        let output = dir.path().join("cube_half.obj");
        simplize_io::write_soup(&simplize_core::primitives::cube(), &input).unwrap();

        cmd_simplify(&input, &output, 0.5, None, true).unwrap();
        let result = load(&output).unwrap();

        assert_eq!(result.face_count(), 6);
        assert!(result.verify().is_empty());
    }
}
