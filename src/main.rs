use std::path::PathBuf;
use std::process::ExitCode;

use golayers::settings::load_settings;
use golayers::theme::color_to_hex;
use golayers::{Category, Color, Layer, Syntax, Theme};
use serde_json::json;

mod logging;

const USAGE: &str = "usage: golayers <file.go> [--settings <path>] [--json]";

#[derive(Debug, PartialEq, Eq)]
struct Args {
    file: PathBuf,
    settings: Option<PathBuf>,
    json: bool,
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Args, String> {
    let mut file = None;
    let mut settings = None;
    let mut json = false;
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--json" => json = true,
            "--settings" => {
                let path = args.next().ok_or("--settings needs a path")?;
                settings = Some(PathBuf::from(path));
            }
            flag if flag.starts_with("--") => return Err(format!("unknown flag {}", flag)),
            _ if file.is_some() => return Err("only one file may be given".to_string()),
            _ => file = Some(PathBuf::from(&arg)),
        }
    }
    let file = file.ok_or("missing file")?;
    Ok(Args {
        file,
        settings,
        json,
    })
}

fn main() -> ExitCode {
    let logging = logging::init();
    if let Some(dir) = logging.as_ref().and_then(|guard| guard.log_dir()) {
        tracing::info!(log_dir = %dir.display(), "logging to file");
    }

    let args = match parse_args(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(msg) => {
            eprintln!("golayers: {}\n{}", msg, USAGE);
            return ExitCode::from(2);
        }
    };

    let theme = match &args.settings {
        Some(path) => match load_settings(path) {
            Ok(settings) => Theme::from_settings(&settings),
            Err(err) => {
                tracing::error!(error = %err, "failed to load settings");
                eprintln!("golayers: {}", err);
                return ExitCode::FAILURE;
            }
        },
        None => Theme::default(),
    };

    let source = match std::fs::read_to_string(&args.file) {
        Ok(source) => source,
        Err(err) => {
            eprintln!("golayers: cannot read {}: {}", args.file.display(), err);
            return ExitCode::FAILURE;
        }
    };

    let mut syntax = Syntax::new(theme);
    let parsed = syntax.parse(&source);
    if let Err(errors) = &parsed {
        tracing::info!(file = %args.file.display(), errors = errors.len(), "parsed with errors");
        for err in errors {
            eprintln!("{}:{}", args.file.display(), err);
        }
    }

    if args.json {
        let errors: Vec<String> = syntax.errors().iter().map(ToString::to_string).collect();
        let out = json!({
            "file": args.file.display().to_string(),
            "layers": syntax.layers(),
            "errors": errors,
        });
        match serde_json::to_string_pretty(&out) {
            Ok(text) => println!("{}", text),
            Err(err) => {
                eprintln!("golayers: {}", err);
                return ExitCode::FAILURE;
            }
        }
    } else {
        print_layers(&syntax, &source);
    }

    if parsed.is_ok() {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    }
}

fn print_layers(syntax: &Syntax, source: &str) {
    let runes: Vec<char> = source.chars().collect();
    for layer in syntax.layers() {
        println!("{}", layer_header(syntax.theme(), layer));
        for span in layer.spans() {
            let text: String = runes
                .get(span.start()..span.end())
                .unwrap_or_default()
                .iter()
                .collect();
            println!("  {}..{}\t{:?}", span.start(), span.end(), text);
        }
    }
}

fn layer_header(theme: &Theme, layer: &Layer) -> String {
    let names: Vec<&str> = Category::ALL
        .into_iter()
        .filter(|category| theme.style(*category) == Some(layer.style()))
        .map(Category::name)
        .collect();
    let bg = layer.bg().map(describe_color).unwrap_or_else(|| "-".to_string());
    format!(
        "[{}] fg={} bg={}",
        names.join(","),
        describe_color(layer.fg()),
        bg
    )
}

fn describe_color(color: Color) -> String {
    match color {
        Color::Indexed(idx) => format!("ansi:{}", idx),
        Color::Reset => "reset".to_string(),
        Color::Rgb(..) => color_to_hex(color).unwrap_or_default(),
    }
}
