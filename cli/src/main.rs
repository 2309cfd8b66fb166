mod demo;

use clap::{Args, Parser, Subcommand};
use flagbind_core::{Bindable, Flags, Group, SetRecord, SetRecorder, candidate_names, split};
use serde::Serialize;
use tracing_subscriber::{EnvFilter, fmt};

use demo::{DemoConfig, lookup_path};

/// Output format for command results.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum CliOutputFormat {
    Json,
    Yaml,
}

#[derive(Debug, Parser)]
#[command(name = "flagbind")]
#[command(about = "Inspect and bind grouped command-line flag assignments")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Tokenize arguments into command groups.
    Split(SplitArgs),
    /// List the candidate flag names of a field, in lookup order.
    Names(NamesArgs),
    /// Bind arguments into the demonstration configuration.
    Bind(BindArgs),
}

#[derive(Debug, Args)]
struct SplitArgs {
    /// Output format.
    #[arg(long, default_value = "json")]
    format: CliOutputFormat,
    /// Arguments to tokenize, after `--`.
    #[arg(last = true)]
    args: Vec<String>,
}

#[derive(Debug, Args)]
struct NamesArgs {
    /// Output format.
    #[arg(long, default_value = "json")]
    format: CliOutputFormat,
    /// Field path, e.g. `Databases[3].NestedNamed.ConnTimeout`.
    path: String,
}

#[derive(Debug, Args)]
struct BindArgs {
    /// Output format.
    #[arg(long, default_value = "json")]
    format: CliOutputFormat,
    /// Bind the group of this sub-command instead of the global flags.
    #[arg(long)]
    command: Option<String>,
    /// Arguments to bind, after `--`.
    #[arg(last = true)]
    args: Vec<String>,
}

#[derive(Debug, Serialize)]
struct BindOutput<'a> {
    config: &'a DemoConfig,
    changes: &'a [SetRecord],
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Split(args) => run_split(args),
        Command::Names(args) => run_names(args),
        Command::Bind(args) => run_bind(args),
    };

    if let Err(err) = result {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

fn run_split(args: SplitArgs) -> Result<(), String> {
    let groups = split(&args.args);
    print_formatted(&groups, args.format)
}

fn run_names(args: NamesArgs) -> Result<(), String> {
    let path = lookup_path(DemoConfig::schema(), &args.path)?;
    let names = candidate_names(&path);
    print_formatted(&names, args.format)
}

fn run_bind(args: BindArgs) -> Result<(), String> {
    let groups = split(&args.args);
    let group = select_group(&groups, args.command.as_deref())?;

    let mut config = DemoConfig::default();
    let mut recorder = SetRecorder::new();
    Flags::new(group)
        .unmarshal_with_emitter(&mut config, &mut recorder)
        .map_err(|err| err.to_string())?;

    let output = BindOutput {
        config: &config,
        changes: recorder.records(),
    };
    print_formatted(&output, args.format)
}

fn select_group<'a>(groups: &'a [Group], command: Option<&str>) -> Result<&'a Group, String> {
    let found = match command {
        Some(name) => groups.iter().find(|group| group.command_name == name),
        None => groups.iter().find(|group| group.is_root()),
    };
    found.ok_or_else(|| match command {
        Some(name) => format!("no arguments for command '{name}'"),
        None => "no global arguments".to_string(),
    })
}

fn print_formatted<T: Serialize + ?Sized>(
    value: &T,
    format: CliOutputFormat,
) -> Result<(), String> {
    let rendered = match format {
        CliOutputFormat::Json => serde_json::to_string_pretty(value)
            .map_err(|err| format!("Failed to serialize JSON: {err}"))?,
        CliOutputFormat::Yaml => serde_yaml::to_string(value)
            .map_err(|err| format!("Failed to serialize YAML: {err}"))?,
    };
    println!("{}", rendered.trim_end());
    Ok(())
}
