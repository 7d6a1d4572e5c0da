//! The `rewind list` subcommand.

use rewind_config::Overrides;
use rewind_store::{DbFileStore, FileRecord, RecordStore};
use serde_json::json;

use crate::logging;
use crate::{pipeline, GlobalArgs, ListArgs, ListFormat};

/// Prints every record in the database of `args.project`, sorted by path.
pub fn run(args: &ListArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let overrides = Overrides {
        database: args.db.clone(),
        ..Overrides::default()
    };
    let settings = pipeline::resolve_project_settings(global, &args.project, overrides)?;
    logging::init(settings.verbosity);

    let store = DbFileStore::open(&settings.database)?;
    let mut records = store.load_all()?;
    records.sort_by(|a, b| a.path.cmp(&b.path));

    print!("{}", render(&records, args.format)?);
    Ok(0)
}

/// Renders records in the requested format.
pub fn render(records: &[FileRecord], format: ListFormat) -> Result<String, serde_json::Error> {
    match format {
        ListFormat::Text => {
            let mut out = String::new();
            for record in records {
                out.push_str(&format!(
                    "{:>6}  {}  {}  {}\n",
                    record.id.map(|id| id.to_string()).unwrap_or_default(),
                    record.last_write_time,
                    record.hash,
                    record.path.display()
                ));
            }
            Ok(out)
        }
        ListFormat::Json => {
            let entries: Vec<_> = records
                .iter()
                .map(|record| {
                    json!({
                        "id": record.id.map(|id| id.get()),
                        "path": record.path.display().to_string(),
                        "last_write_time": record.last_write_time.to_string(),
                        "last_write_time_ns": record.last_write_time.as_nanos(),
                        "hash": record.hash.to_string(),
                    })
                })
                .collect();
            let mut out = serde_json::to_string_pretty(&entries)?;
            out.push('\n');
            Ok(out)
        }
    }
}
