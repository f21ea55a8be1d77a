use dart_ingest::allocation::{extract_allocation_table, SectionQuery};
use dart_ingest::export::{write_csv, CsvSink};
use dart_ingest::runtime::archive::read_first_entry;
use dart_ingest::runtime::types::DatasetSink;
use std::path::Path;

type DynError = Box<dyn std::error::Error + Send + Sync + 'static>;

fn main() -> Result<(), DynError> {
    tracing_subscriber::fmt::init();

    let mut args = std::env::args().skip(1).collect::<Vec<_>>();
    if args.is_empty() || args.len() > 2 {
        eprintln!("Usage: extract_file <document.zip|document.xml> [output_dir]");
        std::process::exit(2);
    }

    let input = args.remove(0);
    let raw = std::fs::read(&input)?;
    let is_zip = Path::new(&input)
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("zip"));
    let document = if is_zip {
        read_first_entry(&raw)?.bytes
    } else {
        raw
    };

    let dataset = extract_allocation_table(&document, &SectionQuery::default())?;

    match args.pop() {
        Some(output_dir) => {
            let stem = Path::new(&input)
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| "allocation".to_string());
            let path = CsvSink::new(output_dir).write(&dataset, &stem)?;
            println!("{}", path.display());
        }
        None => write_csv(std::io::stdout().lock(), &dataset)?,
    }

    Ok(())
}
