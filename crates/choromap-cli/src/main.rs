use choromap::fetch::HttpBoundaryProvider;
use choromap::render::raster::{RasterError, RasterOptions};
use choromap::render::{ExportError, RegionMapExporter, export_filename};
use choromap::{BoundaryProvider, Error as MapError, MapSession, Scope};
use serde::Serialize;
use std::future::Future;
use std::path::PathBuf;
use std::str::FromStr;

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Io(std::io::Error),
    Map(MapError),
    Export(ExportError),
    Raster(RasterError),
    Json(serde_json::Error),
    Runtime(std::io::Error),
    NoMatch,
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Map(err) => write!(f, "{err}"),
            CliError::Export(err) => write!(f, "{err}"),
            CliError::Raster(err) => write!(f, "{err}"),
            CliError::Json(err) => write!(f, "JSON error: {err}"),
            CliError::Runtime(err) => write!(f, "failed to start async runtime: {err}"),
            CliError::NoMatch => write!(f, "none of the given names matched a region"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<MapError> for CliError {
    fn from(value: MapError) -> Self {
        Self::Map(value)
    }
}

impl From<ExportError> for CliError {
    fn from(value: ExportError) -> Self {
        Self::Export(value)
    }
}

impl From<RasterError> for CliError {
    fn from(value: RasterError) -> Self {
        Self::Raster(value)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
enum Command {
    #[default]
    Match,
    Export,
    Fetch,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
enum ExportFormat {
    #[default]
    Svg,
    Png,
}

impl ExportFormat {
    fn extension(self) -> &'static str {
        match self {
            Self::Svg => "svg",
            Self::Png => "png",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "svg" => Ok(Self::Svg),
            "png" => Ok(Self::Png),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Default)]
struct Args {
    command: Command,
    scope: Scope,
    names: Vec<String>,
    base_url: Option<String>,
    boundaries_dir: Option<PathBuf>,
    out_dir: Option<PathBuf>,
    format: ExportFormat,
    scale: f32,
    background: Option<String>,
    out: Option<String>,
    pretty: bool,
}

#[derive(Serialize)]
struct MatchedOut<'a> {
    id: String,
    name: &'a str,
}

#[derive(Serialize)]
struct MatchOut<'a> {
    scope: &'a str,
    matched: Vec<MatchedOut<'a>>,
    unmatched: &'a [String],
}

fn usage() -> &'static str {
    "choromap-cli\n\
\n\
USAGE:\n\
  choromap-cli match [--scope world|china-provinces|china-prefecture-cities] [--pretty] [OPTIONS] <name>...\n\
  choromap-cli export [--scope <scope>] [--format svg|png] [--scale <n>] [--background <css-color>] [--out <path>|-] [OPTIONS] [<name>...]\n\
  choromap-cli fetch [--scope <scope>] [--out-dir <dir>] [--base-url <url>]\n\
\n\
OPTIONS:\n\
  --base-url <url>         boundary server base URL (default http://127.0.0.1:8765)\n\
  --boundaries-dir <dir>   read <dir>/<scope>.json instead of fetching over HTTP\n\
\n\
NOTES:\n\
  - match prints a JSON report of matched/unmatched names to stdout.\n\
  - export highlights the given names (if any) and writes the map; the\n\
    default output path is region-map-<scope>-<timestamp>.<ext> in the\n\
    current directory. Use --out - to write to stdout.\n\
  - fetch downloads a scope's boundary collection into <dir>/<scope>.json\n\
    (default dir '.') for later offline use with --boundaries-dir.\n\
"
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args {
        scale: 1.0,
        ..Default::default()
    };

    let mut it = argv.iter().skip(1).peekable();
    let mut command_seen = false;
    while let Some(a) = it.next() {
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "match" if !command_seen => {
                args.command = Command::Match;
                command_seen = true;
            }
            "export" if !command_seen => {
                args.command = Command::Export;
                command_seen = true;
            }
            "fetch" if !command_seen => {
                args.command = Command::Fetch;
                command_seen = true;
            }
            "--scope" => {
                let Some(scope) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.scope = scope.parse::<Scope>().map_err(CliError::Map)?;
            }
            "--base-url" => {
                let Some(url) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.base_url = Some(url.clone());
            }
            "--boundaries-dir" => {
                let Some(dir) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.boundaries_dir = Some(PathBuf::from(dir));
            }
            "--out-dir" => {
                let Some(dir) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.out_dir = Some(PathBuf::from(dir));
            }
            "--format" => {
                let Some(fmt) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.format = fmt
                    .parse::<ExportFormat>()
                    .map_err(|_| CliError::Usage(usage()))?;
            }
            "--scale" => {
                let Some(scale) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.scale = scale.parse::<f32>().map_err(|_| CliError::Usage(usage()))?;
                if !(args.scale.is_finite() && args.scale > 0.0) {
                    return Err(CliError::Usage(usage()));
                }
            }
            "--background" => {
                let Some(bg) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                if !bg.trim().is_empty() {
                    args.background = Some(bg.trim().to_string());
                }
            }
            "--out" => {
                let Some(out) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.out = Some(out.clone());
            }
            "--pretty" => args.pretty = true,
            "--" => {
                for rest in it.by_ref() {
                    args.names.push(rest.clone());
                }
            }
            other if other.starts_with('-') => return Err(CliError::Usage(usage())),
            name => args.names.push(name.to_string()),
        }
    }

    if args.command == Command::Match && args.names.is_empty() {
        return Err(CliError::Usage(usage()));
    }

    Ok(args)
}

/// Boundary source chosen on the command line.
enum CliProvider {
    Http(HttpBoundaryProvider),
    Dir(DirBoundaryProvider),
}

impl BoundaryProvider for CliProvider {
    fn fetch(&self, scope: Scope) -> impl Future<Output = choromap::Result<Vec<u8>>> + Send {
        async move {
            match self {
                CliProvider::Http(p) => p.fetch(scope).await,
                CliProvider::Dir(p) => p.fetch(scope).await,
            }
        }
    }
}

/// Serves `<dir>/<scope>.json` from disk, for offline use with cached
/// boundary files.
struct DirBoundaryProvider {
    dir: PathBuf,
}

impl BoundaryProvider for DirBoundaryProvider {
    fn fetch(&self, scope: Scope) -> impl Future<Output = choromap::Result<Vec<u8>>> + Send {
        let path = self.dir.join(format!("{}.json", scope.as_str()));
        async move {
            std::fs::read(&path).map_err(|err| MapError::BoundaryFetch {
                scope,
                message: format!("{}: {err}", path.display()),
            })
        }
    }
}

fn build_provider(args: &Args) -> CliProvider {
    match &args.boundaries_dir {
        Some(dir) => CliProvider::Dir(DirBoundaryProvider { dir: dir.clone() }),
        None => CliProvider::Http(match &args.base_url {
            Some(url) => HttpBoundaryProvider::new(url.clone()),
            None => HttpBoundaryProvider::default(),
        }),
    }
}

fn write_json(value: &impl Serialize, pretty: bool) -> Result<(), CliError> {
    if pretty {
        serde_json::to_writer_pretty(std::io::stdout().lock(), value)?;
    } else {
        serde_json::to_writer(std::io::stdout().lock(), value)?;
    }
    println!();
    Ok(())
}

fn write_bytes(bytes: &[u8], out: &str) -> Result<(), CliError> {
    if out == "-" {
        use std::io::Write;
        std::io::stdout().lock().write_all(bytes)?;
    } else {
        std::fs::write(out, bytes)?;
    }
    Ok(())
}

async fn run(args: Args) -> Result<(), CliError> {
    if args.command == Command::Fetch {
        return run_fetch(args).await;
    }
    run_session(args).await
}

/// Downloads one scope's collection into the cache directory layout that
/// `--boundaries-dir` reads back.
async fn run_fetch(args: Args) -> Result<(), CliError> {
    let provider = build_provider(&args);
    let payload = provider.fetch(args.scope).await?;
    // Parse before writing so a bad download never poisons the cache.
    let features = choromap::boundary::parse_collection(args.scope, &payload)?;
    let dir = args.out_dir.unwrap_or_else(|| PathBuf::from("."));
    let path = dir.join(format!("{}.json", args.scope.as_str()));
    std::fs::write(&path, &payload)?;
    eprintln!("wrote {} ({} features)", path.display(), features.len());
    Ok(())
}

async fn run_session(args: Args) -> Result<(), CliError> {
    let provider = build_provider(&args);
    let mut session = MapSession::new(provider);
    session.set_scope(args.scope).await?;

    let result = if args.names.is_empty() {
        None
    } else {
        Some(session.match_names(&args.names).await?)
    };

    match args.command {
        Command::Fetch => unreachable!("dispatched in run"),
        Command::Match => {
            let result = result.expect("names checked in parse_args");
            if result.matched.is_empty() {
                return Err(CliError::NoMatch);
            }
            let matched = result
                .matched
                .iter()
                .map(|id| MatchedOut {
                    id: id.to_string(),
                    name: session
                        .feature(id)
                        .map(|f| f.display_name.as_str())
                        .unwrap_or(""),
                })
                .collect();
            let out = MatchOut {
                scope: args.scope.as_str(),
                matched,
                unmatched: &result.unmatched,
            };
            write_json(&out, args.pretty)?;
            Ok(())
        }
        Command::Export => {
            if let Some(result) = &result {
                for name in &result.unmatched {
                    tracing::warn!(name = %name, "name did not match any region");
                }
            }
            let exporter = RegionMapExporter::new();
            let out = args
                .out
                .clone()
                .unwrap_or_else(|| export_filename(args.scope, args.format.extension()));
            match args.format {
                ExportFormat::Svg => {
                    let svg = exporter.export_svg(&session)?;
                    write_bytes(svg.as_bytes(), &out)?;
                }
                ExportFormat::Png => {
                    let raster = RasterOptions {
                        scale: args.scale,
                        background: args.background.clone(),
                    };
                    let bytes = exporter.export_png(&session, &raster)?;
                    write_bytes(&bytes, &out)?;
                }
            }
            if out != "-" {
                eprintln!("wrote {out}");
            }
            Ok(())
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = match parse_args(&std::env::args().collect::<Vec<_>>()) {
        Ok(v) => v,
        Err(CliError::Usage(msg)) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(err) => {
            eprintln!("{}", CliError::Runtime(err));
            std::process::exit(1);
        }
    };

    match runtime.block_on(run(args)) {
        Ok(()) => {}
        Err(CliError::NoMatch) => {
            eprintln!("{}", CliError::NoMatch);
            std::process::exit(3);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(parts: &[&str]) -> Vec<String> {
        std::iter::once("choromap-cli")
            .chain(parts.iter().copied())
            .map(String::from)
            .collect()
    }

    #[test]
    fn match_requires_at_least_one_name() {
        assert!(matches!(
            parse_args(&argv(&["match"])),
            Err(CliError::Usage(_))
        ));
        let args = parse_args(&argv(&["match", "四川", "北京"])).unwrap();
        assert_eq!(args.command, Command::Match);
        assert_eq!(args.names, vec!["四川", "北京"]);
    }

    #[test]
    fn export_accepts_scope_format_and_out() {
        let args = parse_args(&argv(&[
            "export",
            "--scope",
            "china-provinces",
            "--format",
            "png",
            "--scale",
            "2",
            "--out",
            "map.png",
        ]))
        .unwrap();
        assert_eq!(args.command, Command::Export);
        assert_eq!(args.scope, Scope::ChinaProvince);
        assert_eq!(args.format, ExportFormat::Png);
        assert_eq!(args.scale, 2.0);
        assert_eq!(args.out.as_deref(), Some("map.png"));
    }

    #[test]
    fn fetch_accepts_out_dir() {
        let args = parse_args(&argv(&["fetch", "--scope", "world", "--out-dir", "cache"])).unwrap();
        assert_eq!(args.command, Command::Fetch);
        assert_eq!(
            args.out_dir.as_deref(),
            Some(std::path::Path::new("cache"))
        );
    }

    #[test]
    fn unknown_flags_are_rejected() {
        assert!(matches!(
            parse_args(&argv(&["export", "--bogus"])),
            Err(CliError::Usage(_))
        ));
        assert!(matches!(
            parse_args(&argv(&["export", "--scale", "-1"])),
            Err(CliError::Usage(_))
        ));
    }

    #[test]
    fn dir_provider_reads_scope_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("world.json"), b"{}").unwrap();
        let provider = DirBoundaryProvider {
            dir: dir.path().to_path_buf(),
        };
        let rt = tokio::runtime::Runtime::new().unwrap();
        let payload = rt.block_on(provider.fetch(Scope::Global)).unwrap();
        assert_eq!(payload, b"{}");
        let err = rt.block_on(provider.fetch(Scope::ChinaProvince)).unwrap_err();
        assert!(err.to_string().contains("china-provinces"));
    }
}
