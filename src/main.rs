use dart_ingest::configs::ExtractConfig;
use dart_ingest::error::ConfigError;
use dart_ingest::export::CsvSink;
use dart_ingest::ingest::run_extraction;
use dart_ingest::runtime::fetcher::HttpFetcher;

const USAGE: &str = "Usage: dart-ingest <company_name> [--begin YYYYMMDD] [--end YYYYMMDD] \
                     [--out DIR] [--config FILE] [--api-key KEY]";

fn parse_args(args: Vec<String>) -> Result<ExtractConfig, String> {
    let mut args = args.into_iter();
    let mut company_name = None;
    let mut begin = None;
    let mut end = None;
    let mut output_dir = None;
    let mut config_path = None;
    let mut api_key = None;

    while let Some(arg) = args.next() {
        let mut value = |flag: &str| args.next().ok_or_else(|| format!("{flag} needs a value"));
        match arg.as_str() {
            "--begin" => begin = Some(value("--begin")?),
            "--end" => end = Some(value("--end")?),
            "--out" => output_dir = Some(value("--out")?),
            "--config" => config_path = Some(value("--config")?),
            "--api-key" => api_key = Some(value("--api-key")?),
            flag if flag.starts_with("--") => return Err(format!("unknown option {flag}")),
            _ if company_name.is_none() => company_name = Some(arg.clone()),
            _ => return Err(format!("unexpected argument {arg}")),
        }
    }

    let mut config = match config_path {
        Some(path) => ExtractConfig::load_from_file(path).map_err(|e| e.to_string())?,
        None => ExtractConfig::default(),
    };
    if let Some(name) = company_name {
        config.company_name = name;
    }
    if begin.is_some() {
        config.begin_date = begin;
    }
    if end.is_some() {
        config.end_date = end;
    }
    if let Some(dir) = output_dir {
        config.output_dir = dir;
    }
    if let Some(key) = api_key {
        config.api_key = key;
    }
    Ok(config.with_env_api_key())
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let config = match parse_args(std::env::args().skip(1).collect()) {
        Ok(config) => config,
        Err(message) => {
            eprintln!("{message}\n{USAGE}");
            std::process::exit(2);
        }
    };

    let fetcher = HttpFetcher::default();
    let sink = CsvSink::new(&config.output_dir);

    match run_extraction(&fetcher, &sink, &config).await {
        Ok(report) => {
            println!(
                "Saved {} rows x {} columns for {} (rcept_no {}) to {}",
                report.rows,
                report.columns,
                report.company_name,
                report.rcept_no,
                report.output.display()
            );
        }
        Err(dart_ingest::Error::Config(err @ ConfigError::MissingField(_))) => {
            eprintln!("{err}\n{USAGE}");
            std::process::exit(2);
        }
        Err(err) => {
            tracing::error!("[dart] extraction failed: {}", err);
            eprintln!("Error: {err}");
            std::process::exit(1);
        }
    }
}
