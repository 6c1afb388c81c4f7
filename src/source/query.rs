//! External flare query.
//!
//! The query program is invoked as
//! `<program> [script] <start> <end> <comparator> <class> <wave> <output>`
//! and writes a tab-separated file shaped like the cache. Exit status and
//! captured output are the only other contract.

use crate::config::ResolvedConfig;
use crate::model::{FlareRecord, QueryError, StoreError};
use crate::store::split_tsv;
use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::sync::mpsc::Sender;
use std::thread::JoinHandle;
use tracing::{debug, info, warn};

/// Arguments of one query run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryRequest {
    /// Identifies the run; completions carry it back.
    pub id: u64,
    /// Start date, `YYYY-MM-DD`.
    pub start: String,
    /// End date, `YYYY-MM-DD`.
    pub end: String,
    /// Comparator value such as `>=` or `All`.
    pub comparator: String,
    /// Class threshold such as `M1.0` or `Any`.
    pub flare_class: String,
    /// Comma-separated wavelength codes.
    pub wave: String,
}

/// Parsed output of a successful run.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QueryOutput {
    /// Header line of the output file, blank if the file was empty.
    pub header: String,
    /// Rows with all six fields, in output order.
    pub records: Vec<FlareRecord>,
}

/// The single event a query run delivers.
#[derive(Debug)]
pub struct QueryCompletion {
    /// Id of the request this answers.
    pub id: u64,
    /// Parsed rows, or why there are none.
    pub result: Result<QueryOutput, QueryError>,
}

/// Parse a query output file.
///
/// Rows with fewer than six fields are dropped and timestamps are made
/// readable. An empty file parses to no rows.
pub fn parse_query_output(text: &str) -> QueryOutput {
    let Some(doc) = split_tsv(text) else {
        return QueryOutput::default();
    };
    let total = doc.lines.len();
    let records: Vec<FlareRecord> = doc
        .lines
        .iter()
        .filter_map(|line| FlareRecord::from_query_line(line))
        .collect();
    if records.len() < total {
        debug!(skipped = total - records.len(), "Dropped short query rows");
    }
    QueryOutput {
        header: doc.header,
        records,
    }
}

/// Launches the query program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryRunner {
    program: String,
    script: Option<PathBuf>,
    dir: Option<PathBuf>,
}

impl QueryRunner {
    /// Runner for `program`, passing `script` first when set and running in
    /// `dir` when set.
    pub fn new(program: impl Into<String>, script: Option<PathBuf>, dir: Option<PathBuf>) -> Self {
        Self {
            program: program.into(),
            script,
            dir,
        }
    }

    /// Runner described by the resolved configuration.
    pub fn from_config(config: &ResolvedConfig) -> Self {
        Self::new(
            config.query_program.clone(),
            config.query_script.clone(),
            config.query_dir.clone(),
        )
    }

    /// Run the query to completion on the current thread.
    ///
    /// # Errors
    ///
    /// `Spawn` if the program cannot start, `Failed` on a non-zero exit,
    /// `Output` if the temporary output file cannot be created or read.
    pub fn run(&self, request: &QueryRequest) -> Result<QueryOutput, QueryError> {
        let output_file = tempfile::Builder::new()
            .prefix("flarecat_flares_")
            .suffix(".tsv")
            .tempfile()
            .map_err(|e| StoreError::io(std::env::temp_dir(), e))?;

        let mut command = Command::new(&self.program);
        if let Some(script) = &self.script {
            command.arg(script);
        }
        command
            .args([
                &request.start,
                &request.end,
                &request.comparator,
                &request.flare_class,
                &request.wave,
            ])
            .arg(output_file.path())
            .stdin(Stdio::null());
        if let Some(dir) = &self.dir {
            command.current_dir(dir);
        }

        info!(id = request.id, program = %self.program, "Running flare query");
        let output = command.output().map_err(|source| QueryError::Spawn {
            program: self.program.clone(),
            source,
        })?;

        if !output.status.success() {
            let mut captured = String::from_utf8_lossy(&output.stdout).into_owned();
            captured.push_str(&String::from_utf8_lossy(&output.stderr));
            return Err(QueryError::Failed {
                status: output.status.to_string(),
                output: captured.trim().to_string(),
            });
        }

        let text = std::fs::read_to_string(output_file.path())
            .map_err(|e| StoreError::io(output_file.path(), e))?;
        let parsed = parse_query_output(&text);
        info!(id = request.id, rows = parsed.records.len(), "Flare query finished");
        Ok(parsed)
    }

    /// Run the query on a detached worker thread. Exactly one
    /// [`QueryCompletion`] is sent on `completions`.
    ///
    /// # Errors
    ///
    /// Fails only if the thread cannot be created.
    pub fn spawn(
        &self,
        request: QueryRequest,
        completions: Sender<QueryCompletion>,
    ) -> std::io::Result<JoinHandle<()>> {
        let runner = self.clone();
        std::thread::Builder::new()
            .name("flare-query".to_string())
            .spawn(move || {
                let result = runner.run(&request);
                if let Err(e) = &result {
                    warn!(id = request.id, error = %e, "Flare query failed");
                }
                if completions
                    .send(QueryCompletion {
                        id: request.id,
                        result,
                    })
                    .is_err()
                {
                    debug!(id = request.id, "Completion receiver gone");
                }
            })
    }
}
