//! The `rewind run` subcommand.

use rewind_config::Overrides;
use rewind_engine::{Engine, EngineOptions, Snapshot};
use rewind_events::{Event, EventSink};
use rewind_store::DbFileStore;

use crate::logging::{self, TracingSink};
use crate::{inputs, pipeline, GlobalArgs, RunArgs};

/// Reconciles the tracked files of `args.project` against its record database.
///
/// Per-file failures are reported and excluded but still exit with 0; only a
/// database that cannot be read or written fails the command.
pub fn run(args: &RunArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let overrides = Overrides {
        database: args.db.clone(),
        jobs: args.jobs,
        sequential: args.sequential,
        verbosity: None,
    };
    let settings = pipeline::resolve_project_settings(global, &args.project, overrides)?;
    logging::init(settings.verbosity);

    let tracked = inputs::collect_tracked(&args.files, args.files_from.as_deref())?;

    let mut store = DbFileStore::open(&settings.database)?;
    let snapshot = Snapshot::capture(tracked);

    let sink = TracingSink;
    sink.emit(Event::RunStarted {
        database: settings.database.clone(),
        tracked: snapshot.len(),
    });

    let options = EngineOptions {
        jobs: settings.jobs,
        parallel: settings.parallel,
    };
    let summary = Engine::new(&sink, options).reconcile(&snapshot, &mut store)?;
    if summary.has_failures() {
        tracing::warn!(
            unreadable = summary.unreadable,
            failed = summary.failed,
            store_write_failures = summary.store_write_failures,
            "some files were left out of the database and will be examined again next run"
        );
    }

    Ok(0)
}
