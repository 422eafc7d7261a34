use clap::Parser;
use favicon_tester::process::RegenOptions;
use favicon_tester::{generate, imaging, mutate, output, process, serve};
use std::path::PathBuf;

fn version_string() -> &'static str {
    let describe = env!("BUILD_GIT_DESCRIBE");
    if describe.is_empty() {
        env!("CARGO_PKG_VERSION")
    } else {
        // Leaked once at startup — trivial, called exactly once
        Box::leak(format!("{} ({describe})", env!("CARGO_PKG_VERSION")).into_boxed_str())
    }
}

#[derive(Parser)]
#[command(name = "favicon-tester")]
#[command(about = "Generate a favicon preview page and optionally serve it")]
#[command(long_about = "\
Generate a favicon preview page and optionally serve it

Drop images (png, jpg, jpeg, webp, svg) into a directory and run the tool.
Stray filenames are renamed into the favicon- namespace, each raster source
is resized to 16x16 and 32x32 PNGs, and favicon-tester.html shows every
candidate at tab size.

  favicon-tester              # generate outputs and the page
  favicon-tester --check      # also regenerate outputs older than their source
  favicon-tester --force      # regenerate everything
  favicon-tester --clean      # remove only -16x16/-32x32 outputs
  favicon-tester --clean-all  # remove all favicon-* assets and the page
  favicon-tester --delete F   # delete one asset, then regenerate
  favicon-tester --serve      # generate, then serve (Delete removes files)

With --serve the page is available at http://127.0.0.1:8765 and its Delete
buttons remove files from disk; without it they copy the CLI command.")]
#[command(version = version_string())]
struct Cli {
    /// Only regenerate derived outputs older than their source
    #[arg(long)]
    check: bool,

    /// Regenerate all derived outputs regardless of timestamps
    #[arg(long)]
    force: bool,

    /// Remove only the -16x16/-32x32 outputs, then exit
    #[arg(long)]
    clean: bool,

    /// Remove all favicon-* assets, derived outputs, and the page, then exit
    #[arg(long)]
    clean_all: bool,

    /// Delete one asset and its derived outputs, then regenerate
    #[arg(long, value_name = "FILE")]
    delete: Option<String>,

    /// Generate, then serve the directory (Delete removes files from disk)
    #[arg(long)]
    serve: bool,

    /// Base directory holding source assets and the generated page
    #[arg(long, default_value = ".")]
    dir: PathBuf,

    /// Port for --serve
    #[arg(long, default_value_t = 8765)]
    port: u16,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if let Some(name) = &cli.delete {
        let outcome = mutate::delete_asset(&cli.dir, name)?;
        if let Some(line) = output::format_delete_outcome(name, &outcome) {
            println!("{line}");
        }
    }

    if cli.clean_all {
        let removed = mutate::clean_all(&cli.dir)?;
        output::print_removed(&removed);
        println!("Done. Add images and run again.");
        return Ok(());
    }

    if cli.clean {
        let removed = mutate::clean(&cli.dir)?;
        output::print_removed(&removed);
        println!("Done. Run again to regenerate.");
        return Ok(());
    }

    let backend = imaging::probe()?;
    let report = process::regenerate(
        &cli.dir,
        &backend,
        RegenOptions {
            check: cli.check,
            force: cli.force,
        },
    )?;
    output::print_regen_events(&report.events);

    let page = generate::generate(&cli.dir, &report.assets, cli.serve)?;
    println!("{}", output::format_done(&page, report.assets.len()));

    if cli.serve {
        serve::serve(&cli.dir, cli.port, &backend)?;
    }

    Ok(())
}
