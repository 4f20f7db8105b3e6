#[cfg(feature = "ssr")]
#[tokio::main]
async fn main() -> Result<(), rochescaf_web::server::ServerError> {
    use leptos::config::get_configuration;
    use leptos::logging;
    use rochescaf_web::api::{GraphqlClient, HttpTransport};
    use rochescaf_web::config::GraphqlConfig;

    let conf = get_configuration(None)?;
    let graphql = GraphqlConfig::from_env()?;
    logging::log!("using GraphQL endpoint {}", graphql.endpoint);
    let transport = HttpTransport::new(graphql.endpoint, graphql.timeout)?;

    rochescaf_web::server::serve(conf.leptos_options, GraphqlClient::new(transport)).await
}

#[cfg(not(feature = "ssr"))]
pub fn main() {
    // no client-side main function
    // see lib.rs for hydration function instead
}
