use leptos::prelude::*;

use crate::model::MeData;
#[cfg(feature = "ssr")]
use crate::api::{GraphqlClient, QueryCache, GET_ME};
#[cfg(feature = "ssr")]
use leptos::logging;

/// Runs GET_ME once before the page is rendered.
///
/// Failures are logged and recorded in the cache, never returned; the page still renders.
#[cfg(feature = "ssr")]
pub async fn prefetch_me(client: &GraphqlClient, cache: &QueryCache) {
    match client.query::<MeData>(&GET_ME).await {
        Ok(data) => cache.write(&GET_ME, &data),
        Err(e) => {
            logging::error!("error prefetching {}: {}", GET_ME.name, e);
            cache.write_error(&GET_ME, e);
        }
    }
}

// Inside a prefetched render the cache is the only source; otherwise asks the service.
#[server(prefix = "/api", endpoint = "get_me")]
pub async fn get_me() -> Result<MeData, ServerFnError> {
    if let Some(cache) = use_context::<QueryCache>() {
        return match cache.read::<MeData>(&GET_ME) {
            Some(outcome) => outcome.map_err(ServerFnError::new),
            None => Err(ServerFnError::new(format!("{} was not prefetched", GET_ME.name))),
        };
    }

    let client = use_context::<GraphqlClient>()
        .ok_or_else(|| ServerFnError::new("GraphQL client is not configured"))?;
    client.query::<MeData>(&GET_ME).await.map_err(|e| {
        logging::error!("{} failed: {}", GET_ME.name, e);
        ServerFnError::new(e)
    })
}
