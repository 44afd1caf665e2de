//! Command line front end for repivot
//!
//! Loads a scene document (or a raw OBJ file), runs one of the registered
//! origin actions over its selection, and writes the result back out.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand};

use repivot_core::{Point3f, Scene};
use repivot_io::{read_scene, write_scene};
use repivot_ops::{actions, OriginMode};

#[derive(Parser)]
#[command(name = "repivot", version, about = "Batch origin placement for 3D mesh scenes")]
struct Cli {
    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Move selected origins to the bottom center of their bounds
    Bottom(RunArgs),
    /// Move selected origins to the top center of their bounds
    Top(RunArgs),
    /// List the registered actions
    Actions,
    /// Print the objects and viewport state of a scene
    Inspect {
        /// Scene document (.json) or OBJ file
        scene: PathBuf,
    },
}

#[derive(Args)]
struct RunArgs {
    /// Scene document (.json) or OBJ file
    scene: PathBuf,

    /// Where to write the result; defaults to the input path
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Select these objects by name instead of the stored selection
    #[arg(long = "select", value_name = "NAME")]
    select: Vec<String>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Bottom(args) => run_batch(OriginMode::Bottom, &args),
        Command::Top(args) => run_batch(OriginMode::Top, &args),
        Command::Actions => {
            list_actions();
            Ok(())
        }
        Command::Inspect { scene } => inspect(&scene),
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn run_batch(mode: OriginMode, args: &RunArgs) -> anyhow::Result<()> {
    let mut scene = read_scene(&args.scene)
        .with_context(|| format!("cannot read {}", args.scene.display()))?;
    apply_selection(&mut scene, &args.select)?;

    let report = actions::for_mode(mode).run(&mut scene)?;
    println!(
        "{}: {} relocated, {} skipped ({} non-mesh, {} without vertices)",
        mode.label(),
        report.relocated,
        report.skipped(),
        report.skipped_non_mesh,
        report.skipped_empty
    );

    let output = args.output.as_deref().unwrap_or(&args.scene);
    write_scene(&scene, output).with_context(|| format!("cannot write {}", output.display()))?;
    Ok(())
}

fn apply_selection(scene: &mut Scene, names: &[String]) -> anyhow::Result<()> {
    if names.is_empty() {
        return Ok(());
    }
    let mut ids = Vec::with_capacity(names.len());
    for name in names {
        match scene.find_by_name(name) {
            Some(id) => ids.push(id),
            None => bail!("no object named {name:?} in the scene"),
        }
    }
    scene.set_selection(ids);
    Ok(())
}

fn list_actions() {
    for action in actions::ACTIONS {
        println!("{:<18} {}", action.id, action.label());
    }
}

fn inspect(path: &Path) -> anyhow::Result<()> {
    let scene = read_scene(path).with_context(|| format!("cannot read {}", path.display()))?;

    println!("{} objects", scene.object_count());
    for (id, object) in scene.objects() {
        let marker = if scene.selection().contains(&id) { '*' } else { ' ' };
        let mut line = format!("[{marker}] {id} {} ({})", object.name, object.kind());
        if let Some(mesh) = object.base_mesh() {
            if mesh.is_empty() {
                line.push_str(", empty mesh");
            } else {
                line.push_str(&format!(", {} vertices", mesh.vertex_count()));
            }
        }
        if let Some(bounds) = object.world_bounds() {
            line.push_str(&format!(
                ", bounds {} to {}",
                fmt_point(&bounds.min),
                fmt_point(&bounds.max)
            ));
        }
        if scene.active() == Some(id) {
            line.push_str(" [active]");
        }
        println!("{line}");
    }
    let scene_bounds = scene
        .objects()
        .filter_map(|(_, object)| object.world_bounds())
        .reduce(|a, b| a.union(&b));
    if let Some(bounds) = scene_bounds {
        let size = bounds.size();
        println!(
            "scene bounds {} to {}, size {:.3} x {:.3} x {:.3}",
            fmt_point(&bounds.min),
            fmt_point(&bounds.max),
            size.x,
            size.y,
            size.z
        );
    }
    println!("cursor at {}", fmt_point(&scene.cursor()));
    Ok(())
}

fn fmt_point(point: &Point3f) -> String {
    format!("({:.3}, {:.3}, {:.3})", point.x, point.y, point.z)
}
