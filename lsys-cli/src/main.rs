//! `lsys` CLI: draw L-system presets and write SVG.

use std::fs;
use std::path::Path;
use std::process;

use clap::Parser;
use rand::SeedableRng;
use rand::rngs::StdRng;

use lsys_core::canvas::Canvas;
use lsys_core::config::{Preset, PresetMap, load_presets};
use lsys_core::error::{LsysError, Severity};
use lsys_core::expand::Iterations;
use lsys_core::lsystem::LSystem;
use lsys_svg::{RenderOptions, render_to_string};

/// Presets shipped with the binary.
const BUILTIN_PRESETS: &str = include_str!("../presets.json");

#[derive(Parser)]
#[command(version, about = "Draw Lindenmayer systems as SVG")]
struct Cli {
    /// Preset to draw
    name: Option<String>,

    /// Read presets from this JSON file instead of the built-in set
    #[arg(long, value_name = "FILE")]
    presets: Option<String>,

    /// Override the preset's iteration count
    #[arg(short = 'n', long)]
    iterations: Option<usize>,

    /// Seed for probabilistic rules (random if absent)
    #[arg(long)]
    seed: Option<u64>,

    /// Interpret the expanded string as is, without condensation
    #[arg(long)]
    no_condense: bool,

    /// Output directory for SVG files
    #[arg(short, long, default_value = ".")]
    output: String,

    /// List preset names and exit
    #[arg(long)]
    list: bool,

    /// Print the produced symbol string instead of drawing it
    #[arg(long)]
    print: bool,
}

fn main() {
    let cli = Cli::parse();
    let presets = read_presets(&cli);

    if cli.list {
        for name in presets.keys() {
            println!("{name}");
        }
        return;
    }

    let Some(name) = cli.name.as_deref() else {
        eprintln!("No preset name specified (use --list to see them)");
        process::exit(1);
    };
    let Some(preset) = presets.get(name) else {
        eprintln!("Error: no preset named `{name}`");
        process::exit(1);
    };

    run_preset(&cli, name, preset);
}

fn read_presets(cli: &Cli) -> PresetMap {
    let source = match cli.presets {
        Some(ref file) => match fs::read_to_string(file) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("Error reading {file}: {e}");
                process::exit(1);
            }
        },
        None => BUILTIN_PRESETS.to_owned(),
    };
    load_presets(&source).unwrap_or_else(|e| fail(&e))
}

fn run_preset(cli: &Cli, name: &str, preset: &Preset) {
    let system = LSystem::from_config(&preset.lsystem).unwrap_or_else(|e| fail(&e));
    print_diagnostics(system.diagnostics());

    let mut options = preset.draw.options();
    if let Some(n) = cli.iterations {
        options.iterations = Iterations::Exactly(n);
    }
    if cli.no_condense {
        options.condense = false;
    }
    let mut rng = cli
        .seed
        .map_or_else(StdRng::from_entropy, StdRng::seed_from_u64);

    if cli.print {
        let symbols = system.produce(&options, &mut rng).unwrap_or_else(|e| fail(&e));
        println!("{symbols}");
        return;
    }

    let style = &preset.style;
    let mut canvas = Canvas::new()
        .with_pen_width(style.pen_width)
        .with_color(style.pen_color());
    let mut hooks = preset.draw.build_hooks().unwrap_or_else(|e| fail(&e));

    if let Err(e) = system.draw(&options, &mut canvas, &mut hooks, &mut rng) {
        fail(&e);
    }

    let opts = RenderOptions {
        background: style.background_color(),
        ..RenderOptions::default()
    };
    let svg = render_to_string(&canvas.into_picture(), &opts);
    write_svg(&cli.output, &format!("{name}.svg"), &svg);
}

fn print_diagnostics(diagnostics: &[LsysError]) {
    for err in diagnostics {
        match err.severity {
            Severity::Warning => {
                eprintln!("Warning: {}", err.message);
            }
            _ => {
                eprintln!("Error: {}", err.message);
            }
        }
    }
}

fn fail(err: &LsysError) -> ! {
    eprintln!("Error: {err}");
    process::exit(1);
}

fn write_svg(output_dir: &str, filename: &str, content: &str) {
    let path = Path::new(output_dir).join(filename);
    match fs::write(&path, content) {
        Ok(()) => {
            eprintln!("Wrote {}", path.display());
        }
        Err(e) => {
            eprintln!("Error writing {}: {e}", path.display());
            process::exit(1);
        }
    }
}
