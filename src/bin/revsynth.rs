use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use std::time::Instant;

use clap::Parser;
use color_eyre::eyre::{bail, WrapErr};
use log::info;

use revsynth::cnf::write_dimacs;
use revsynth::encoder::{Encoder, SynthesisConfig};
use revsynth::oracle::VarisatOracle;
use revsynth::render::RenderConfig;
use revsynth::synth::{search, Synthesis};
use revsynth::table::TruthTable;

#[derive(Debug, Parser)]
#[command(author, version)]
struct Cli {
    /// Truth table (CSV).
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Number of gates (= number of circuit lines).
    #[arg(value_name = "GATES")]
    gates: usize,

    /// Output file for the rendered circuit.
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    /// Retry with more gates, up to this count, while unsatisfiable.
    #[arg(long, value_name = "INT")]
    max_gates: Option<usize>,

    /// Also write the model (true c/n atoms, one per line).
    #[arg(long, value_name = "FILE")]
    model: Option<PathBuf>,

    /// Dump the CNF for GATES in DIMACS format.
    #[arg(long, value_name = "FILE")]
    dimacs: Option<PathBuf>,

    /// Allow input and output lines to overlap.
    #[arg(long)]
    allow_shared_lines: bool,

    /// Enable debug logging.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let args = Cli::parse();

    simplelog::TermLogger::init(
        if args.verbose {
            simplelog::LevelFilter::Debug
        } else {
            simplelog::LevelFilter::Info
        },
        simplelog::Config::default(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    println!("args = {:?}", args);

    if !args.input.exists() {
        bail!("Input file '{}' does not exist", args.input.display());
    }
    if args.input.extension().map_or(true, |ext| ext != "csv") {
        bail!("Input file '{}' is not a .csv file", args.input.display());
    }

    let table = TruthTable::read_csv(&args.input)?;
    info!(
        "Truth table: {} rows, {} input bits, {} outputs",
        table.num_rows(),
        table.num_input_bits(),
        table.num_outputs()
    );

    let config = SynthesisConfig::default().with_allow_shared_lines(args.allow_shared_lines);

    if let Some(path) = &args.dimacs {
        let encoding = Encoder::new(&table, args.gates).with_config(config.clone()).encode()?;
        let formula = encoding.to_cnf();
        let file = File::create(path).wrap_err_with(|| format!("Could not create '{}'", path.display()))?;
        write_dimacs(&formula, BufWriter::new(file))?;
        info!(
            "Wrote {} variables and {} clauses to '{}'",
            formula.var_count(),
            formula.len(),
            path.display()
        );
    }

    let time_synth = Instant::now();
    let max_gates = args.max_gates.unwrap_or(args.gates);
    let res = search(&table, args.gates..=max_gates, &config, VarisatOracle)?;
    let time_synth = time_synth.elapsed();

    let solution = match res {
        Synthesis::Unsatisfiable => {
            println!("Model is not satisfiable");
            println!("Done in {:.3} s", time_synth.as_secs_f64());
            return Ok(());
        }
        Synthesis::Satisfiable(solution) => solution,
    };
    info!("Found circuit with {} gates", solution.num_gates());

    if let Some(path) = &args.model {
        std::fs::write(path, solution.model.to_string())
            .wrap_err_with(|| format!("Could not write model to '{}'", path.display()))?;
        info!("Wrote model to '{}'", path.display());
    }

    let circuit = solution.decode()?;
    circuit.verify(&table)?;
    info!("Circuit reproduces all {} rows", table.num_rows());

    let text = circuit.render(&RenderConfig::default());
    std::fs::write(&args.output, &text)
        .wrap_err_with(|| format!("Could not write circuit to '{}'", args.output.display()))?;
    print!("{}", text);

    println!("Done in {:.3} s", time_synth.as_secs_f64());

    Ok(())
}
