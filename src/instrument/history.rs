//! Call History Module
//!
//! Reads back what the instrumentation wrappers recorded and renders it.

use std::fmt;
use std::io::Write;

use serde::Serialize;
use tracing::trace;

use crate::backend::Backend;
use crate::error::{CacheError, Result};
use crate::instrument::{inputs_key, outputs_key, BoundOperation};

// == Call Record ==
/// One recorded call: rendered argument tuple and rendered result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CallRecord {
    pub input: String,
    pub output: String,
}

// == Call History ==
/// Snapshot of an operation's counter and history lists.
///
/// `calls` comes from the counter while `records` pairs the two lists by
/// position, so under concurrent writers the two may disagree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CallHistory {
    pub name: String,
    pub calls: i64,
    pub records: Vec<CallRecord>,
}

impl CallHistory {
    // == Load ==
    /// Reads the counter and both history lists of `op`.
    ///
    /// A missing counter reads as zero. When the lists differ in length the
    /// shorter one bounds the records.
    pub async fn load<B: Backend>(op: &BoundOperation<'_, B>) -> Result<Self> {
        let name = op.name();
        let backend = op.backend();

        let calls = match backend.get(name).await? {
            Some(raw) => {
                let text = String::from_utf8_lossy(&raw);
                text.trim()
                    .parse::<i64>()
                    .map_err(|_| CacheError::InvalidCounter {
                        name: name.to_string(),
                        raw: text.to_string(),
                    })?
            }
            None => 0,
        };

        let inputs = backend.lrange_all(&inputs_key(name)).await?;
        let outputs = backend.lrange_all(&outputs_key(name)).await?;
        trace!(
            "{}: counter={} inputs={} outputs={}",
            name,
            calls,
            inputs.len(),
            outputs.len()
        );

        let records = inputs
            .iter()
            .zip(outputs.iter())
            .map(|(input, output)| CallRecord {
                input: String::from_utf8_lossy(input).into_owned(),
                output: String::from_utf8_lossy(output).into_owned(),
            })
            .collect();

        Ok(Self {
            name: name.to_string(),
            calls,
            records,
        })
    }
}

impl fmt::Display for CallHistory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} was called {} times:", self.name, self.calls)?;
        for record in &self.records {
            writeln!(f, "{}(*{}) -> {}", self.name, record.input, record.output)?;
        }
        Ok(())
    }
}

// == Replay ==
/// Prints the call history of `op` to stdout.
pub async fn replay<B: Backend>(op: &BoundOperation<'_, B>) -> Result<()> {
    let history = CallHistory::load(op).await?;
    write_history(&history, &mut std::io::stdout().lock())
}

/// Writes the call history of `op` to `out`.
pub async fn replay_to<B, W>(op: &BoundOperation<'_, B>, out: &mut W) -> Result<()>
where
    B: Backend,
    W: Write + ?Sized,
{
    let history = CallHistory::load(op).await?;
    write_history(&history, out)
}

fn write_history<W: Write + ?Sized>(history: &CallHistory, out: &mut W) -> Result<()> {
    write!(out, "{}", history)?;
    out.flush()?;
    Ok(())
}
