//! Instrumentation Module
//!
//! Wraps operations so every call is counted and its arguments and result
//! are appended to history lists in the same backend the operation uses.
//!
//! For an operation named `N` the backend holds:
//! - `N` - the call counter
//! - `N:inputs` - the rendered argument tuple of each call, in call order
//! - `N:outputs` - the rendered return value of each call, in call order
//!
//! The three writes of one call are separate backend commands. Under
//! concurrent callers the counter can briefly run ahead of the lists.

mod history;
mod operation;

pub use history::{replay, replay_to, CallHistory, CallRecord};
pub use operation::{
    instrument, BoundOperation, CountCalls, Instrumented, Operation, RecordHistory,
};

/// Key of the list holding the rendered inputs of `name`.
pub fn inputs_key(name: &str) -> String {
    format!("{}:inputs", name)
}

/// Key of the list holding the rendered outputs of `name`.
pub fn outputs_key(name: &str) -> String {
    format!("{}:outputs", name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_history_keys() {
        assert_eq!(inputs_key("Cache.store"), "Cache.store:inputs");
        assert_eq!(outputs_key("Cache.store"), "Cache.store:outputs");
    }
}
