//! CLI entry point.
//!
//! # Responsibility
//! - Verify `plansmith_core` linkage with a version check.
//! - Schedule a project snapshot read from a JSON file and print the result.
//!
//! Usage: `plansmith_cli [snapshot.json]`. Set `PLANSMITH_LOG_DIR` to an
//! absolute directory to enable file logging.

use plansmith_core::{
    analyze_critical_path, default_log_level, init_logging, recalculate_task_dates,
    CriticalPathAnalysis, ProjectSnapshot,
};
use serde::Serialize;
use std::error::Error;
use std::process::ExitCode;

const LOG_DIR_ENV: &str = "PLANSMITH_LOG_DIR";

#[derive(Serialize)]
struct ScheduleOutput {
    project: String,
    passes: usize,
    converged: bool,
    critical_path: CriticalPathAnalysis,
}

fn main() -> ExitCode {
    if let Ok(dir) = std::env::var(LOG_DIR_ENV) {
        if let Err(err) = init_logging(default_log_level(), &dir) {
            eprintln!("logging disabled: {err}");
        }
    }

    println!("plansmith_core ping={}", plansmith_core::ping());
    println!("plansmith_core version={}", plansmith_core::core_version());

    let Some(path) = std::env::args().nth(1) else {
        return ExitCode::SUCCESS;
    };
    match schedule_file(&path) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            log::error!("event=cli_schedule module=cli status=error path={path} error={err}");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn schedule_file(path: &str) -> Result<String, Box<dyn Error>> {
    let raw = std::fs::read_to_string(path)?;
    let snapshot: ProjectSnapshot = serde_json::from_str(&raw)?;
    snapshot.validate()?;

    let outcome = recalculate_task_dates(
        &snapshot.tasks,
        &snapshot.dependencies,
        &snapshot.config.working_days,
    )?;
    let critical_path = analyze_critical_path(&outcome.tasks, &snapshot.dependencies)?;

    let output = ScheduleOutput {
        project: snapshot.name,
        passes: outcome.passes,
        converged: outcome.converged,
        critical_path,
    };
    Ok(serde_json::to_string_pretty(&output)?)
}
