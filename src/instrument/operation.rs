//! Operation Wrappers
//!
//! `CountCalls` and `RecordHistory` wrap any `Operation` and add one concern
//! each. `instrument` nests them with counting outermost, so a call runs:
//! increment counter, log input, run the operation, log output, return.

use std::fmt;

use async_trait::async_trait;
use tracing::debug;

use crate::backend::Backend;
use crate::error::Result;
use crate::instrument::{inputs_key, outputs_key};

// == Operation Trait ==
/// A named operation running against a backend.
#[async_trait]
pub trait Operation<B: Backend>: Send + Sync {
    /// Argument tuple; its `Debug` form is what the history records.
    type Input: fmt::Debug + Send + 'static;
    /// Return value; its `Display` form is what the history records.
    type Output: fmt::Display + Send + 'static;

    /// Stable identifier, also used as the counter key.
    fn name(&self) -> &'static str;

    /// Runs the operation.
    async fn call(&self, backend: &B, input: Self::Input) -> Result<Self::Output>;
}

// == Count Calls ==
/// Increments the operation's counter before each call.
#[derive(Debug, Clone)]
pub struct CountCalls<O> {
    inner: O,
}

impl<O> CountCalls<O> {
    pub fn new(inner: O) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &O {
        &self.inner
    }
}

#[async_trait]
impl<B, O> Operation<B> for CountCalls<O>
where
    B: Backend,
    O: Operation<B>,
{
    type Input = O::Input;
    type Output = O::Output;

    fn name(&self) -> &'static str {
        self.inner.name()
    }

    async fn call(&self, backend: &B, input: Self::Input) -> Result<Self::Output> {
        let name = self.inner.name();
        let count = backend.incr(name).await?;
        debug!("{} call #{}", name, count);
        self.inner.call(backend, input).await
    }
}

// == Record History ==
/// Appends the rendered input before each call and the rendered output after it.
///
/// A failing call leaves its input recorded without a matching output.
#[derive(Debug, Clone)]
pub struct RecordHistory<O> {
    inner: O,
}

impl<O> RecordHistory<O> {
    pub fn new(inner: O) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &O {
        &self.inner
    }
}

#[async_trait]
impl<B, O> Operation<B> for RecordHistory<O>
where
    B: Backend,
    O: Operation<B>,
{
    type Input = O::Input;
    type Output = O::Output;

    fn name(&self) -> &'static str {
        self.inner.name()
    }

    async fn call(&self, backend: &B, input: Self::Input) -> Result<Self::Output> {
        let name = self.inner.name();

        let rendered_input = format!("{:?}", input);
        backend
            .rpush(&inputs_key(name), rendered_input.as_bytes())
            .await?;

        let output = self.inner.call(backend, input).await?;

        let rendered_output = output.to_string();
        backend
            .rpush(&outputs_key(name), rendered_output.as_bytes())
            .await?;
        debug!("{}(*{}) -> {}", name, rendered_input, rendered_output);

        Ok(output)
    }
}

// == Composition ==
/// An operation that is both counted and history-logged.
pub type Instrumented<O> = CountCalls<RecordHistory<O>>;

/// Wraps `op` so its calls are counted (outer) and history-logged (inner).
pub fn instrument<O>(op: O) -> Instrumented<O> {
    CountCalls::new(RecordHistory::new(op))
}

// == Bound Operation ==
/// One operation tied to the backend of one cache.
///
/// This is what replay reads from: the same name on another backend is a
/// different history.
pub struct BoundOperation<'a, B> {
    name: &'static str,
    backend: &'a B,
}

impl<'a, B> BoundOperation<'a, B> {
    pub fn new(name: &'static str, backend: &'a B) -> Self {
        Self { name, backend }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn backend(&self) -> &'a B {
        self.backend
    }
}

impl<B> Clone for BoundOperation<'_, B> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<B> Copy for BoundOperation<'_, B> {}

impl<B> fmt::Debug for BoundOperation<'_, B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoundOperation")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}
