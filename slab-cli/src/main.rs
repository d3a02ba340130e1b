use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::info;
use serde::Serialize;
use slab_core::{Material, SimulationParams, calculate, result_len, unpack};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum MaterialKind {
    /// lambda = 46, rho = 7800, c = 460
    Steel,
    /// Diffusivity 1 (r = tau / h^2)
    Unit,
}

impl MaterialKind {
    fn material(self) -> Material {
        match self {
            MaterialKind::Steel => Material::steel(),
            MaterialKind::Unit => Material::unit(),
        }
    }
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Transient heat conduction in a 1-D slab")]
struct Args {
    /// Slab thickness L (m)
    #[arg(long, default_value_t = 0.1)]
    length: f64,

    /// Spatial step h (m)
    #[arg(long, default_value_t = 0.01)]
    h: f64,

    /// Time step tau (s)
    #[arg(long, default_value_t = 0.01)]
    tau: f64,

    /// Simulated time (s)
    #[arg(long, default_value_t = 2.0)]
    time: f64,

    /// Left boundary temperature (C)
    #[arg(long, default_value_t = -100.0, allow_hyphen_values = true)]
    t_left: f64,

    /// Right boundary temperature (C)
    #[arg(long, default_value_t = 100.0, allow_hyphen_values = true)]
    t_right: f64,

    /// Initial interior temperature (C)
    #[arg(long, default_value_t = 20.0, allow_hyphen_values = true)]
    t_start: f64,

    #[arg(long, value_enum, default_value_t = MaterialKind::Steel)]
    material: MaterialKind,

    /// JSON file with all simulation parameters; replaces the flags above
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output directory for profile.bin and meta.json
    #[arg(long)]
    out: Option<PathBuf>,

    /// Print the (x, T) table
    #[arg(long)]
    print: bool,
}

#[derive(Serialize)]
struct MetaRow {
    params: SimulationParams,

    n: usize,
    steps: usize,
    mesh_ratio: f64,
    diffusivity: f64,

    center_temperature: f64,
    compute_ms: f64,
}

fn main() -> Result<()> {
    env_logger::init_from_env(
        env_logger::Env::default().filter_or(env_logger::DEFAULT_FILTER_ENV, "info"),
    );
    let args = Args::parse();

    let params = match &args.config {
        Some(path) => load_params(path)?,
        None => params_from_args(&args),
    };

    let mut result = alloc_result(&params)?;
    let n = result.len() / 2;

    let t0 = Instant::now();
    let summary = calculate(&params, &mut result).context("simulation failed")?;
    let compute_ms = t0.elapsed().as_secs_f64() * 1e3;

    let (xs, temps) = unpack(&result, n)?;
    let center = temps[n / 2];

    info!(
        "N = {}, steps = {}, r = {:.6}",
        summary.points, summary.steps, summary.mesh_ratio
    );
    println!("Centre temperature: {center:.4} C");
    println!("Compute time: {:.6} s", compute_ms / 1e3);

    if args.print {
        println!("{:>12} {:>14}", "x (m)", "T (C)");
        for (x, t) in xs.iter().zip(&temps) {
            println!("{x:>12.6} {t:>14.6}");
        }
    }

    if let Some(out) = &args.out {
        fs::create_dir_all(out)?;

        let mut profile_writer = BufWriter::new(File::create(out.join("profile.bin"))?);
        write_f64_vec(&mut profile_writer, &result)?;
        profile_writer.flush()?;

        let row = MetaRow {
            params,
            n,
            steps: summary.steps,
            mesh_ratio: summary.mesh_ratio,
            diffusivity: params.material.diffusivity(),
            center_temperature: center,
            compute_ms,
        };
        let mut meta_file = BufWriter::new(File::create(out.join("meta.json"))?);
        serde_json::to_writer_pretty(&mut meta_file, &row)?;
        meta_file.write_all(b"\n")?;
        meta_file.flush()?;

        println!("Wrote profile to: {}", out.display());
    }

    Ok(())
}

fn params_from_args(args: &Args) -> SimulationParams {
    SimulationParams {
        t_left: args.t_left,
        t_right: args.t_right,
        t_start: args.t_start,
        length: args.length,
        h: args.h,
        tau: args.tau,
        total_time: args.time,
        material: args.material.material(),
    }
}

fn load_params(path: &Path) -> Result<SimulationParams> {
    let text = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    parse_params(&text).with_context(|| format!("parsing {}", path.display()))
}

fn parse_params(text: &str) -> Result<SimulationParams> {
    Ok(serde_json::from_str(text)?)
}

/// Interleaved result buffer of `2N` zeros; configuration errors surface before allocating.
fn alloc_result(params: &SimulationParams) -> Result<Vec<f64>> {
    let len = result_len(params).context("invalid simulation parameters")?;
    let mut result = Vec::new();
    result
        .try_reserve_exact(len)
        .with_context(|| format!("cannot allocate {len} result values"))?;
    result.resize(len, 0.0);
    Ok(result)
}

fn write_f64_vec<W: Write>(w: &mut W, v: &[f64]) -> std::io::Result<()> {
    for &x in v {
        w.write_all(&x.to_le_bytes())?;
    }
    Ok(())
}
