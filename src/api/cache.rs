use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use leptos::logging;
use serde::{de::DeserializeOwned, Serialize};

use super::Operation;

#[derive(Clone, Debug, PartialEq)]
enum Outcome {
    Data(serde_json::Value),
    Failed(String),
}

/// Query outcomes gathered while serving one request, keyed by operation name.
///
/// A fresh cache is created per request and handed to the render step as context;
/// it is never shared between requests. Failures are kept alongside data so the
/// render answers from the cache instead of asking the service again.
#[derive(Clone, Default, Debug)]
pub struct QueryCache {
    entries: Arc<RwLock<HashMap<&'static str, Outcome>>>,
}

impl QueryCache {
    pub fn write<T: Serialize>(&self, operation: &Operation, data: &T) {
        let outcome = match serde_json::to_value(data) {
            Ok(value) => Outcome::Data(value),
            Err(e) => {
                logging::error!("not caching {}: {}", operation.name, e);
                return;
            }
        };
        self.insert(operation, outcome);
    }

    pub fn write_error(&self, operation: &Operation, message: impl ToString) {
        self.insert(operation, Outcome::Failed(message.to_string()));
    }

    /// `None` when the operation never ran for this request.
    pub fn read<T: DeserializeOwned>(&self, operation: &Operation) -> Option<Result<T, String>> {
        let outcome = self
            .entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(operation.name)?
            .clone();
        Some(match outcome {
            Outcome::Data(value) => serde_json::from_value(value).map_err(|e| e.to_string()),
            Outcome::Failed(message) => Err(message),
        })
    }

    pub fn is_empty(&self) -> bool {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_empty()
    }

    fn insert(&self, operation: &Operation, outcome: Outcome) {
        let mut entries = self.entries.write().unwrap_or_else(|poisoned| {
            logging::error!("query cache lock poisoned while caching {}", operation.name);
            poisoned.into_inner()
        });
        entries.insert(operation.name, outcome);
    }
}
