use leptos::prelude::ServerFnError;

// Payload of the `me` field on the GraphQL service
#[derive(Default, Debug, Clone, serde::Serialize, serde::Deserialize, PartialEq)]
pub struct User {
    pub name: String,
}

// `data` of a GET_ME response. `me` is null when the service has no current user.
#[derive(Default, Debug, Clone, serde::Serialize, serde::Deserialize, PartialEq)]
pub struct MeData {
    pub me: Option<User>,
}

/// Lifecycle of the about page's user query, in rendering priority order.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryStatus {
    Pending,
    Failed(String),
    Ready(User),
    /// The query succeeded but the service returned no user.
    MissingUser,
}

impl QueryStatus {
    /// Derives the status from a resource value; `None` means still in flight.
    pub fn from_query(result: Option<Result<MeData, ServerFnError>>) -> Self {
        match result {
            None => QueryStatus::Pending,
            Some(Err(e)) => QueryStatus::Failed(error_message(&e)),
            Some(Ok(MeData { me: Some(user) })) => QueryStatus::Ready(user),
            Some(Ok(MeData { me: None })) => QueryStatus::MissingUser,
        }
    }
}

fn error_message(error: &ServerFnError) -> String {
    match error {
        ServerFnError::ServerError(message) => message.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unresolved_query_is_pending() {
        assert_eq!(QueryStatus::from_query(None), QueryStatus::Pending);
    }

    #[test]
    fn server_error_keeps_its_message() {
        let status = QueryStatus::from_query(Some(Err(ServerFnError::new("not authenticated"))));
        assert_eq!(status, QueryStatus::Failed("not authenticated".to_string()));
    }

    #[test]
    fn transport_errors_are_failures_too() {
        let status = QueryStatus::from_query(Some(Err(ServerFnError::Request(
            "connection refused".to_string(),
        ))));
        match status {
            QueryStatus::Failed(message) => assert!(message.contains("connection refused")),
            other => panic!("expected a failure, got {other:?}"),
        }
    }

    #[test]
    fn present_user_is_ready() {
        let data = MeData {
            me: Some(User {
                name: "Alice".to_string(),
            }),
        };
        assert_eq!(
            QueryStatus::from_query(Some(Ok(data))),
            QueryStatus::Ready(User {
                name: "Alice".to_string()
            })
        );
    }

    #[test]
    fn null_me_is_missing_user() {
        assert_eq!(
            QueryStatus::from_query(Some(Ok(MeData { me: None }))),
            QueryStatus::MissingUser
        );
    }
}
