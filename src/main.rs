//! MIPS pipeline simulator CLI.
//!
//! Loads a TOML configuration and an assembly program, runs the pipeline
//! cycle-by-cycle until it drains, and prints the statistics report (or the
//! summary record as JSON).

use clap::Parser;
use std::{fs, process};

use mips_simulator::config::Config;
use mips_simulator::core::Cpu;
use mips_simulator::sim::loader;

/// Command-line arguments for the pipeline simulator.
#[derive(Parser, Debug)]
#[command(author, version, about = "MIPS five-stage pipeline cycle simulator")]
struct Args {
    /// Assembly program to simulate.
    program: String,

    #[arg(short, long, default_value = "configs/default.toml")]
    config: String,

    /// Print the per-cycle pipeline diagram to stderr.
    #[arg(long)]
    trace: bool,

    /// Print the end-of-run summary as JSON instead of the report.
    #[arg(long)]
    json: bool,
}

fn main() {
    let args = Args::parse();
    let config: Config = match fs::read_to_string(&args.config) {
        Ok(text) => toml::from_str(&text).expect("Failed to parse config"),
        Err(_) => Config::default(),
    };

    println!("Global Configuration");
    println!("--------------------");
    println!("  Trace Pipeline:   {}", config.general.trace_pipeline);
    println!("  Cycle Limit:      {}", config.pipeline.cycle_limit);
    match config.memory.latency_model.as_str() {
        "Fixed" => println!(
            "  Memory Latency:   Fixed ({} cycles)",
            config.memory.fixed_latency
        ),
        _ => println!(
            "  Memory Latency:   Random ({}..={} cycles)",
            config.memory.min_latency, config.memory.max_latency
        ),
    }
    println!("--------------------");

    let source = loader::read_source(&args.program);
    let loaded = loader::load_program(&source);
    for d in &loaded.diagnostics {
        eprintln!(
            "[Loader] line {}: skipped '{}': {}",
            d.line, d.text, d.reason
        );
    }
    if loaded.instructions.is_empty() {
        println!("[*] No valid instructions loaded, nothing to simulate.");
        return;
    }
    println!("[Loader] {} instructions loaded", loaded.instructions.len());

    let mut cpu = Cpu::new(loaded.instructions, &config);
    cpu.trace = args.trace || config.general.trace_pipeline;

    match cpu.run() {
        Ok(summary) => {
            if args.json {
                let rendered =
                    serde_json::to_string_pretty(&summary).expect("Failed to serialize summary");
                println!("{}", rendered);
            } else {
                cpu.stats.print();
            }
        }
        Err(e) => {
            eprintln!("\n[!] FATAL: {}", e);
            cpu.stats.print();
            process::exit(1);
        }
    }
}
