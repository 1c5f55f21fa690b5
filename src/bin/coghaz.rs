use std::{
    io::{BufRead as _, Write as _},
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand, ValueEnum};
use sha2::Digest as _;

const DEFAULT_TEXT: &str = "PERLMAN-GREENE";
const FONT_ENV: &str = "COGHAZ_FONT";

#[derive(Parser, Debug)]
#[command(name = "coghaz", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render one image as a PNG.
    Generate(GenerateArgs),
    /// Print the placement plan as JSON without rendering.
    Plan(PlanArgs),
    /// Read `.generate <output-filename>` commands from stdin.
    Shell(ShellArgs),
}

#[derive(Args, Debug)]
struct GeneratorArgs {
    /// Text to nest. Defaults to the config file's text, then "PERLMAN-GREENE".
    #[arg(long)]
    text: Option<String>,

    /// Font file. Falls back to the config file, then $COGHAZ_FONT.
    #[arg(long)]
    font: Option<PathBuf>,

    /// JSON generator config; flags override its fields.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Backdrop painted before the text.
    #[arg(long, value_enum)]
    backdrop: Option<BackdropChoice>,

    /// Seed for the fractal backdrop. Implies `--backdrop fractal` unless solid is asked for.
    #[arg(long)]
    seed: Option<u64>,

    /// Foreground color as #rrggbb or #rrggbbaa.
    #[arg(long)]
    foreground: Option<String>,

    /// Print the font family and SHA-256 of the font bytes.
    #[arg(long)]
    dump_font: bool,
}

#[derive(Args, Debug)]
struct GenerateArgs {
    /// Output PNG path.
    out: PathBuf,

    /// Output height in pixels.
    #[arg(long, default_value_t = coghaz::DEFAULT_HEIGHT)]
    height: u32,

    /// Output width in pixels.
    #[arg(long, default_value_t = coghaz::DEFAULT_WIDTH)]
    width: u32,

    #[command(flatten)]
    generator: GeneratorArgs,
}

#[derive(Args, Debug)]
struct PlanArgs {
    /// Canvas height in pixels.
    #[arg(long, default_value_t = coghaz::DEFAULT_HEIGHT)]
    height: u32,

    /// Canvas width in pixels.
    #[arg(long, default_value_t = coghaz::DEFAULT_WIDTH)]
    width: u32,

    #[command(flatten)]
    generator: GeneratorArgs,
}

#[derive(Args, Debug)]
struct ShellArgs {
    /// Height used when `.generate` is given only a filename.
    #[arg(long, default_value_t = coghaz::DEFAULT_HEIGHT)]
    height: u32,

    /// Width used when `.generate` is given only a filename.
    #[arg(long, default_value_t = coghaz::DEFAULT_WIDTH)]
    width: u32,

    #[command(flatten)]
    generator: GeneratorArgs,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum BackdropChoice {
    Solid,
    Fractal,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Generate(args) => cmd_generate(args),
        Command::Plan(args) => cmd_plan(args),
        Command::Shell(args) => cmd_shell(args),
    }
}

fn build_config(args: &GeneratorArgs) -> anyhow::Result<coghaz::GeneratorConfig> {
    let mut config = match &args.config {
        Some(path) => coghaz::GeneratorConfig::from_json_file(path)?,
        None => coghaz::GeneratorConfig::default(),
    };

    if let Some(text) = &args.text {
        config.text = text.clone();
    } else if config.text.is_empty() {
        config.text = DEFAULT_TEXT.to_string();
    }

    if let Some(font) = &args.font {
        config.font_path = font.clone();
    } else if config.font_path.as_os_str().is_empty() {
        let from_env = std::env::var_os(FONT_ENV).with_context(|| {
            format!("no font given: pass --font, set font_path in --config, or set ${FONT_ENV}")
        })?;
        config.font_path = PathBuf::from(from_env);
    }

    match (args.backdrop, args.seed) {
        (Some(BackdropChoice::Solid), _) => {
            if !matches!(config.backdrop, coghaz::Backdrop::Solid { .. }) {
                config.backdrop = coghaz::Backdrop::default();
            }
        }
        (Some(BackdropChoice::Fractal) | None, Some(seed)) => {
            config.backdrop = coghaz::Backdrop::Fractal { seed };
        }
        (Some(BackdropChoice::Fractal), None) => {
            if !matches!(config.backdrop, coghaz::Backdrop::Fractal { .. }) {
                config.backdrop = coghaz::Backdrop::Fractal { seed: 0 };
            }
        }
        (None, None) => {}
    }

    if let Some(fg) = &args.foreground {
        config.foreground = coghaz::Rgba8::parse_hex(fg)?;
    }

    Ok(config)
}

fn make_generator(args: &GeneratorArgs) -> anyhow::Result<coghaz::PerlmanGreeneGenerator> {
    let config = build_config(args)?;
    if args.dump_font {
        dump_font_diagnostics(&config.font_path)?;
    }
    let font_path = config.font_path.clone();
    coghaz::PerlmanGreeneGenerator::with_config(config)
        .with_context(|| format!("set up generator with font '{}'", font_path.display()))
}

fn cmd_generate(args: GenerateArgs) -> anyhow::Result<()> {
    let generator = make_generator(&args.generator)?;
    generator
        .generate(&args.out, args.height, args.width)
        .with_context(|| format!("generate '{}'", args.out.display()))?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_plan(args: PlanArgs) -> anyhow::Result<()> {
    let generator = make_generator(&args.generator)?;
    let plan = generator.plan(args.height, args.width)?;
    let json = serde_json::to_string_pretty(&plan).context("serialize plan")?;
    println!("{json}");
    Ok(())
}

fn cmd_shell(args: ShellArgs) -> anyhow::Result<()> {
    let generator = make_generator(&args.generator)?;
    let stdin = std::io::stdin();
    let mut stderr = std::io::stderr();

    eprint!("coghaz> ");
    stderr.flush().ok();
    for line in stdin.lock().lines() {
        let line = line.context("read command")?;
        match parse_shell_line(&line, args.height, args.width) {
            Ok(ShellCommand::Generate { out, height, width }) => {
                match generator.generate(&out, height, width) {
                    Ok(()) => eprintln!("wrote {}", out.display()),
                    Err(e) => eprintln!("error: {e}"),
                }
            }
            Ok(ShellCommand::Help) => eprintln!("{SHELL_HELP}"),
            Ok(ShellCommand::Quit) => return Ok(()),
            Ok(ShellCommand::Nothing) => {}
            Err(msg) => eprintln!("error: {msg}"),
        }
        eprint!("coghaz> ");
        stderr.flush().ok();
    }
    eprintln!();
    Ok(())
}

const SHELL_HELP: &str = "\
commands:
  .generate <output-filename> [height width]
  .help
  .quit";

#[derive(Debug, PartialEq, Eq)]
enum ShellCommand {
    Generate {
        out: PathBuf,
        height: u32,
        width: u32,
    },
    Help,
    Quit,
    Nothing,
}

fn parse_shell_line(line: &str, height: u32, width: u32) -> Result<ShellCommand, String> {
    let mut words = line.split_whitespace();
    let Some(cmd) = words.next() else {
        return Ok(ShellCommand::Nothing);
    };
    match cmd {
        ".generate" => {
            let out = words
                .next()
                .ok_or_else(|| "usage: .generate <output-filename> [height width]".to_string())?;
            let rest: Vec<&str> = words.collect();
            let (height, width) = match rest.as_slice() {
                [] => (height, width),
                [h, w] => (parse_side("height", h)?, parse_side("width", w)?),
                _ => return Err("expected both height and width, or neither".to_string()),
            };
            Ok(ShellCommand::Generate {
                out: PathBuf::from(out),
                height,
                width,
            })
        }
        ".help" => Ok(ShellCommand::Help),
        ".quit" | ".exit" => Ok(ShellCommand::Quit),
        other => Err(format!("unknown command '{other}' (try .help)")),
    }
}

fn parse_side(name: &str, s: &str) -> Result<u32, String> {
    s.parse::<u32>()
        .map_err(|e| format!("{name} '{s}' is not a non-negative integer: {e}"))
}

fn dump_font_diagnostics(path: &Path) -> anyhow::Result<()> {
    let font = coghaz::FontSource::load(path)?;
    eprintln!("font diagnostics:");
    eprintln!("  path:    {}", font.path().display());
    eprintln!("  family:  {}", font.family_name());
    eprintln!("  sha256:  {}", sha256_hex(font.bytes()));
    Ok(())
}

fn sha256_hex(bytes: &[u8]) -> String {
    let digest = sha2::Sha256::digest(bytes);
    let mut out = String::with_capacity(digest.len() * 2);
    for b in digest {
        out.push_str(&format!("{:02x}", b));
    }
    out
}
