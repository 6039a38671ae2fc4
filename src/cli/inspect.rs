//! `inspect` command: show the plan for one object without writing.

use anyhow::{Context, Result};

use crate::cli::StoreArgs;
use crate::config::ResizeConfig;
use crate::event::ObjectRef;
use crate::log;
use crate::pipeline::{Inspection, Pipeline};
use crate::store::FsStore;

/// Execute the inspect command.
pub fn run_inspect(
    bucket: &str,
    key: &str,
    store: &StoreArgs,
    config: &ResizeConfig,
) -> Result<()> {
    let pipeline = Pipeline::new(config, FsStore::new(&store.store));
    let object = ObjectRef::new(bucket, key);
    let inspection = pipeline
        .inspect(&object)
        .with_context(|| format!("failed to inspect {bucket}/{key}"))?;

    for line in render(&object, &inspection) {
        log!("inspect"; "{}", line);
    }
    Ok(())
}

fn render(object: &ObjectRef, inspection: &Inspection) -> Vec<String> {
    match inspection {
        Inspection::Skipped(reason) => {
            vec![format!("{}/{}: skipped ({reason})", object.bucket, object.key)]
        }
        Inspection::Planned {
            format,
            native_width,
            widths,
        } => {
            let native = match native_width {
                0 => "unbounded".to_string(),
                w => format!("{w}px"),
            };
            let mut lines = vec![format!(
                "{}/{}: {format}, native width {native}",
                object.bucket, object.key
            )];
            for planned in widths {
                for (kind, key) in &planned.variants {
                    lines.push(format!(
                        "  w{:<5} -> {:>5}px  {:<15} {key}",
                        planned.target.requested,
                        planned.target.clamped,
                        kind.as_str()
                    ));
                }
            }
            lines
        }
    }
}
