//! CLI for operator mutant generation

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use colored::Colorize;

use operator_mutants::codegen;
use operator_mutants::report::ReportEntry;
use operator_mutants::selector::ModeName;
use operator_mutants::{
    collector, generate, generate_parallel, plan, Config, GenerationReport, OperatorCatalog,
    RenderedMutant,
};

#[derive(Parser)]
#[command(name = "operator-mutants")]
#[command(author, version, about = "Deterministic operator mutants for Rust source files", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate mutants of a source file
    Generate {
        /// Rust source file to mutate
        file: PathBuf,

        /// Number of mutants to generate
        count: Option<usize>,

        /// Path to a configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Seed of the selection stream
        #[arg(short, long)]
        seed: Option<u64>,

        /// Draw every mutant from this family
        #[arg(short, long, conflicts_with = "round_robin")]
        family: Option<String>,

        /// Cycle over every family of the catalog
        #[arg(long)]
        round_robin: bool,

        /// Directory mutants are written to
        #[arg(short, long)]
        out_dir: Option<PathBuf>,

        /// Also write manifest.json
        #[arg(long)]
        manifest: bool,

        /// Build mutants on all cores
        #[arg(long)]
        parallel: bool,

        /// Enable verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// List the candidate sites of a source file
    Sites {
        /// Rust source file to scan
        file: PathBuf,

        /// Only show this family
        #[arg(short, long)]
        family: Option<String>,
    },

    /// List the mutation families and their rules
    Families,

    /// Show example configuration
    Example,
}

/// Settings of a `generate` run after applying command line overrides
struct GenerateArgs {
    file: PathBuf,
    count: Option<usize>,
    config: Option<PathBuf>,
    seed: Option<u64>,
    family: Option<String>,
    round_robin: bool,
    out_dir: Option<PathBuf>,
    manifest: bool,
    parallel: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let verbose = matches!(cli.command, Commands::Generate { verbose: true, .. });
    init_logging(verbose);

    let result = match cli.command {
        Commands::Generate {
            file,
            count,
            config,
            seed,
            family,
            round_robin,
            out_dir,
            manifest,
            parallel,
            verbose: _,
        } => run_generate(GenerateArgs {
            file,
            count,
            config,
            seed,
            family,
            round_robin,
            out_dir,
            manifest,
            parallel,
        }),

        Commands::Sites { file, family } => list_sites(&file, family.as_deref()),

        Commands::Families => list_families(),

        Commands::Example => {
            print_example();
            Ok(ExitCode::SUCCESS)
        }
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", "Error".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .init();
}

fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    match path {
        Some(path) => {
            println!("{}", "Loading configuration...".dimmed());
            Ok(Config::load(path)?)
        }
        None => Ok(Config::default()),
    }
}

fn run_generate(args: GenerateArgs) -> anyhow::Result<ExitCode> {
    let mut config = load_config(args.config.as_deref())?;

    // Command line overrides
    if let Some(count) = args.count {
        config.settings.count = count;
    }
    if let Some(seed) = args.seed {
        config.settings.seed = seed;
    }
    if let Some(family) = args.family {
        config.settings.mode = ModeName::SingleFamily;
        config.settings.family = family;
    }
    if args.round_robin {
        config.settings.mode = ModeName::RoundRobin;
    }
    if let Some(dir) = args.out_dir {
        config.output.dir = dir;
    }
    config.output.manifest |= args.manifest;

    let catalog = OperatorCatalog::standard()?;
    if let Err(errors) = config.validate(&catalog) {
        eprintln!("{}", "Configuration errors found:".red().bold());
        for error in &errors {
            eprintln!("  • {}", error);
        }
        return Ok(ExitCode::FAILURE);
    }

    let source = codegen::read_source(&args.file)?;
    let tree = codegen::parse_source(&source, &args.file)?;

    let mode = config.selection_mode();
    let plan = plan(&tree, &catalog, config.settings.count, config.settings.seed, &mode)?;
    println!(
        "Planned {} mutant(s) of {}",
        plan.len(),
        args.file.display()
    );

    let naming = config.output_naming();
    naming.prepare()?;

    let mode_name = match config.settings.mode {
        ModeName::SingleFamily => format!("family {}", config.settings.family),
        ModeName::RoundRobin => "round-robin".to_string(),
    };
    let mut report = GenerationReport::new(&args.file, plan.seed(), &mode_name);

    // Each mutant is written as soon as it is rendered; only its entry is kept
    if args.parallel {
        let entries = generate_parallel(&source, &args.file, &plan, |mutant| {
            let path = codegen::write_mutant(&mutant, &naming)?;
            Ok(ReportEntry::new(&mutant, Some(path)))
        })?;
        report.entries.extend(entries);
    } else {
        for (index, mutant) in generate(&tree, &plan).enumerate() {
            let mutant = RenderedMutant::new(index, mutant);
            let path = codegen::write_mutant(&mutant, &naming)?;
            report.push(ReportEntry::new(&mutant, Some(path)));
        }
    }

    if config.output.manifest {
        let manifest = naming.manifest_path();
        report
            .save_manifest(&manifest)
            .with_context(|| format!("while saving {}", manifest.display()))?;
    }

    report.print();

    if report.unchanged() > 0 {
        Ok(ExitCode::from(2)) // Plan and tree disagree
    } else {
        Ok(ExitCode::SUCCESS)
    }
}

fn list_sites(file: &Path, family: Option<&str>) -> anyhow::Result<ExitCode> {
    let tree = codegen::read_tree(file)?;
    let catalog = OperatorCatalog::standard()?;

    let families = match family {
        Some(name) => vec![catalog.get(name)?],
        None => catalog.families().to_vec(),
    };

    for family in families {
        let nodes = collector::candidate_nodes(&tree, &family);
        println!(
            "{} {}",
            family.name().bold(),
            format!("({} site(s), {} nodes)", nodes.len(), family.kind()).dimmed()
        );
        for node in nodes {
            let operator = node.operator.map(|op| op.symbol()).unwrap_or("?");
            println!(
                "  #{:<4} {:<3} {}:{}:{}",
                node.ordinal,
                operator,
                file.display(),
                node.line,
                node.column
            );
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn list_families() -> anyhow::Result<ExitCode> {
    let catalog = OperatorCatalog::standard()?;

    for family in catalog.families() {
        println!(
            "{} {} {}",
            family.name().bold(),
            format!("[{}]", family.kind()).dimmed(),
            family.description()
        );
        for (source, candidates) in family.rules() {
            let targets: Vec<&str> = candidates.iter().map(|op| op.symbol()).collect();
            println!("    {:<3} -> {}", source.symbol(), targets.join(", "));
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn print_example() {
    let example = r#"# Example mutants.yaml configuration file
version: "1.0"

settings:
  seed: 2873465893     # same seed, same mutants
  count: 10            # mutants to generate; sites are reused when there are fewer
  mode: single-family  # or round-robin over every family
  family: arithmetic   # see `operator-mutants families`

output:
  dir: mutants         # mutants are written as <dir>/<index>.<extension>
  extension: rs
  manifest: true       # also write <dir>/manifest.json
"#;

    println!("{}", example);
}
