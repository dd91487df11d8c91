use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "yarnloom", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Convert a dialogue script between JSON and yarn-dialect text.
    Convert(ConvertArgs),
    /// Check that the dialogue has at least one path to an ending.
    Validate(ValidateArgs),
}

#[derive(Parser, Debug)]
struct ConvertArgs {
    /// Input script path.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output script path.
    #[arg(long)]
    out: PathBuf,

    /// Input format (inferred from the file extension when omitted).
    #[arg(long, value_enum)]
    from: Option<FormatChoice>,

    /// Output format (inferred from the file extension when omitted).
    #[arg(long, value_enum)]
    to: Option<FormatChoice>,
}

#[derive(Parser, Debug)]
struct ValidateArgs {
    /// Input script path.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Node id the dialogue starts from.
    #[arg(long, default_value = "start")]
    start: String,

    /// Input format (inferred from the file extension when omitted).
    #[arg(long, value_enum)]
    from: Option<FormatChoice>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum FormatChoice {
    Json,
    Yarn,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Convert(args) => cmd_convert(args),
        Command::Validate(args) => cmd_validate(args),
    }
}

fn detect_format(path: &Path, explicit: Option<FormatChoice>) -> anyhow::Result<FormatChoice> {
    if let Some(f) = explicit {
        return Ok(f);
    }
    match path.extension().and_then(|e| e.to_str()) {
        Some("json") => Ok(FormatChoice::Json),
        Some("yarn") | Some("txt") => Ok(FormatChoice::Yarn),
        _ => anyhow::bail!(
            "cannot infer format of '{}'; pass --from/--to",
            path.display()
        ),
    }
}

fn read_script(path: &Path, format: FormatChoice) -> anyhow::Result<yarnloom::Script> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("read script '{}'", path.display()))?;
    let script = match format {
        FormatChoice::Json => yarnloom::Script::from_json(&text)?,
        FormatChoice::Yarn => yarnloom::parse_dialect(&text)?,
    };
    script.validate()?;
    Ok(script)
}

fn cmd_convert(args: ConvertArgs) -> anyhow::Result<()> {
    let from = detect_format(&args.in_path, args.from)?;
    let to = detect_format(&args.out, args.to)?;
    let script = read_script(&args.in_path, from)?;

    let out = match to {
        FormatChoice::Json => {
            let mut s = script.to_json()?;
            s.push('\n');
            s
        }
        FormatChoice::Yarn => yarnloom::serialize_dialect(&script),
    };

    if let Some(parent) = args.out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(&args.out, out)
        .with_context(|| format!("write script '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_validate(args: ValidateArgs) -> anyhow::Result<()> {
    let from = detect_format(&args.in_path, args.from)?;
    let script = read_script(&args.in_path, from)?;
    let graph = yarnloom::expand(&script)?;

    if yarnloom::is_reachable(&graph, &args.start) {
        eprintln!("valid: an ending is reachable from '{}'", args.start);
        Ok(())
    } else {
        anyhow::bail!("dialogue has no end path from '{}'", args.start)
    }
}
