use clap::{Parser, Subcommand};
use simple_folio::validate::{Field, ValidationReport};
use simple_folio::{config, logging, output, render};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "simple-folio")]
#[command(about = "Static portfolio site generator")]
#[command(long_about = "\
Static portfolio site generator

Renders a three-page portfolio (home, projects, contact) from a single
config.toml. The project catalog, stats, colors and contact form limits all
live in that file; everything is optional.

Source structure:

  site/
  ├── config.toml      # Site config (optional; stock defaults otherwise)
  └── assets/          # Static assets (favicon, images) → copied to output root

Run 'simple-folio gen-config' to generate a documented config.toml.")]
#[command(version)]
struct Cli {
    /// Source directory holding config.toml and assets/
    #[arg(long, default_value = "site", global = true)]
    source: PathBuf,

    /// Output directory
    #[arg(long, default_value = "dist", global = true)]
    output: PathBuf,

    /// More log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render the site into the output directory
    Build,
    /// Validate config.toml and list the project catalog
    Check,
    /// Print a stock config.toml with all options documented
    GenConfig,
    /// Run the contact form validators against the given values
    Validate(ValidateArgs),
}

#[derive(clap::Args)]
struct ValidateArgs {
    #[arg(long, default_value = "")]
    name: String,
    #[arg(long, default_value = "")]
    email: String,
    #[arg(long, default_value = "")]
    subject: String,
    #[arg(long, default_value = "")]
    message: String,
    /// Print the report as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose, cli.quiet)?;

    match cli.command {
        Command::Build => {
            let site_config = config::load_config(&cli.source)?;
            println!("==> Building {} → {}", cli.source.display(), cli.output.display());
            let summary = render::generate(&site_config, &cli.source, &cli.output)?;
            output::print_build_output(&summary);
            println!("==> Build complete: {}", summary.output.display());
        }
        Command::Check => {
            println!("==> Checking {}", cli.source.display());
            let site_config = config::load_config(&cli.source)?;
            output::print_check_output(&site_config);
            println!("==> Config is valid");
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
        Command::Validate(args) => {
            let site_config = config::load_config(&cli.source)?;
            let report = ValidationReport::check(
                [
                    (Field::Name, args.name.as_str()),
                    (Field::Email, args.email.as_str()),
                    (Field::Subject, args.subject.as_str()),
                    (Field::Message, args.message.as_str()),
                ],
                &site_config.limits(),
            );
            if args.json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                output::print_validation_report(&report);
            }
            if !report.is_valid() {
                return Ok(ExitCode::FAILURE);
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}
