//! Strata CLI - mesh and scalar-field processing tool.
//!
//! Usage: strata <COMMAND> [OPTIONS]
//!
//! Run `strata --help` for available commands.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use strata::field::ScalarField;
use strata::io::obj;
use strata::mesh::VertexId;
use strata::region::{Criterion, Segment};

#[derive(Parser)]
#[command(name = "strata")]
#[command(author, version, about = "Mesh segmentation CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Display mesh information
    Info {
        /// Input mesh file (OBJ)
        input: PathBuf,
    },

    /// Scale a mesh so its dominant axis has unit extent
    Normalize {
        /// Input mesh file (OBJ)
        input: PathBuf,

        /// Output mesh file (OBJ)
        output: PathBuf,
    },

    /// Display scalar field information
    FieldInfo {
        /// Input field file (one value per line)
        input: PathBuf,
    },

    /// Remap a scalar field to a new value range
    Rescale {
        /// Input field file
        input: PathBuf,

        /// Output field file
        output: PathBuf,

        /// New minimum value
        #[arg(long, allow_hyphen_values = true, default_value = "-50")]
        min: f64,

        /// New maximum value
        #[arg(long, allow_hyphen_values = true, default_value = "50")]
        max: f64,
    },

    /// Discretize a scalar field into classes
    Classes {
        /// Input field file
        input: PathBuf,

        /// Output field file
        output: PathBuf,

        /// Number of classes
        #[arg(short, long)]
        n: usize,
    },

    /// Grow a region from a seed vertex
    Grow {
        /// Input mesh file (OBJ)
        mesh: PathBuf,

        /// Input field file, index-aligned with the mesh
        field: PathBuf,

        /// Seed vertex id
        #[arg(short, long)]
        seed: usize,

        /// Membership criterion relative to the seed's value
        #[arg(short, long, value_enum, default_value = "equal")]
        criterion: GrowCriterion,

        /// Write member vertex ids here, one per line
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum GrowCriterion {
    /// Exact equality with the seed value
    Equal,
    /// Greater than or equal to the seed value
    GreaterEqual,
    /// Lesser than or equal to the seed value
    LesserEqual,
}

impl From<GrowCriterion> for Criterion {
    fn from(c: GrowCriterion) -> Self {
        match c {
            GrowCriterion::Equal => Criterion::Equal,
            GrowCriterion::GreaterEqual => Criterion::GreaterEqual,
            GrowCriterion::LesserEqual => Criterion::LesserEqual,
        }
    }
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Info { input } => cmd_info(&input)?,
        Commands::Normalize { input, output } => cmd_normalize(&input, &output)?,
        Commands::FieldInfo { input } => cmd_field_info(&input)?,
        Commands::Rescale { input, output, min, max } => cmd_rescale(&input, &output, min, max)?,
        Commands::Classes { input, output, n } => cmd_classes(&input, &output, n)?,
        Commands::Grow { mesh, field, seed, criterion, output } => {
            cmd_grow(&mesh, &field, seed, criterion.into(), output.as_deref())?
        }
    }
    Ok(())
}

fn cmd_info(input: &PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    let mesh = obj::load(input)?;

    println!("Mesh: {}", input.display());
    println!("  vertices:   {}", mesh.num_vertices());
    println!("  half-edges: {}", mesh.num_halfedges());
    println!("  faces:      {}", mesh.num_faces());

    if let Some((min, max)) = mesh.bounding_box() {
        println!("  bbox min:   ({:.4}, {:.4}, {:.4})", min.x, min.y, min.z);
        println!("  bbox max:   ({:.4}, {:.4}, {:.4})", max.x, max.y, max.z);
    }

    println!("  valid:      {}", mesh.is_valid());

    Ok(())
}

fn cmd_normalize(input: &PathBuf, output: &PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    let mut mesh = obj::load(input)?;
    let scale = mesh.normalize()?;
    obj::save(&mesh, output)?;

    println!("Scaled by 1/{} -> {}", scale, output.display());
    Ok(())
}

fn cmd_field_info(input: &PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    let field = ScalarField::load(input)?;

    println!("Field: {}", input.display());
    println!("  values: {}", field.len());
    println!("  min:    {}", field.min());
    println!("  max:    {}", field.max());

    Ok(())
}

fn cmd_rescale(
    input: &PathBuf,
    output: &PathBuf,
    min: f64,
    max: f64,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut field = ScalarField::load(input)?;
    field.expand(min, max)?;
    field.save(output)?;

    println!("Rescaled {} values to [{}, {}] -> {}", field.len(), min, max, output.display());
    Ok(())
}

fn cmd_classes(
    input: &PathBuf,
    output: &PathBuf,
    n: usize,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut field = ScalarField::load(input)?;
    field.segment(n)?;
    field.save(output)?;

    println!("Discretized {} values into {} classes -> {}", field.len(), n, output.display());
    Ok(())
}

fn cmd_grow(
    mesh_path: &PathBuf,
    field_path: &PathBuf,
    seed: usize,
    criterion: Criterion,
    output: Option<&std::path::Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mesh = obj::load(mesh_path)?;
    let field = ScalarField::load(field_path)?;

    let segment = Segment::from_seed(&mesh, &field, VertexId::new(seed), criterion)?;

    println!(
        "Segment from seed {}: {} of {} vertices",
        seed,
        segment.len(),
        mesh.num_vertices()
    );

    if let Some(path) = output {
        use std::io::Write;
        let mut file = std::fs::File::create(path)?;
        for v in segment.vertices() {
            writeln!(file, "{}", v.index())?;
        }
        println!("Member ids -> {}", path.display());
    }

    Ok(())
}
