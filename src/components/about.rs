use leptos::prelude::*;
use leptos_meta::Title;

use crate::api::get_me;
use crate::model::QueryStatus;

#[component]
pub fn AboutPage() -> impl IntoView {
    // On the server this resolves from the prefetched cache and is serialized
    // into the page, so hydration reuses it instead of calling get_me again.
    let me = Resource::new(|| (), |_| get_me());

    view! {
        <Title text="About" />
        <Suspense fallback=|| about_body(QueryStatus::Pending)>
            {move || Suspend::new(async move {
                about_body(QueryStatus::from_query(Some(me.await)))
            })}
        </Suspense>
    }
}

/// Markup for one query status. A pending query shows nothing but the loading line.
pub fn about_body(status: QueryStatus) -> AnyView {
    let detail = match status {
        QueryStatus::Pending => return view! { <p class="loading">"Loading..."</p> }.into_any(),
        QueryStatus::Failed(message) => {
            view! { <p class="error">{format!("Error: {message}")}</p> }.into_any()
        }
        QueryStatus::Ready(user) => view! { <p class="user-name">{user.name}</p> }.into_any(),
        QueryStatus::MissingUser => {
            view! { <p class="missing-user">"No user information available."</p> }.into_any()
        }
    };

    view! {
        <div class="about">
            <h1>"About Page"</h1>
            <p>"This page is using Server Side Rendering to fetch User Info"</p>
            {detail}
        </div>
    }
    .into_any()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::User;

    fn render(status: QueryStatus) -> String {
        let owner = Owner::new();
        owner.with(|| about_body(status).to_html())
    }

    #[test]
    fn pending_renders_only_the_loading_line() {
        let html = render(QueryStatus::Pending);
        assert!(html.contains("Loading..."), "got: {html}");
        assert!(!html.contains("About Page"), "heading leaked into loading state: {html}");
        assert!(!html.contains("Error:"), "got: {html}");
    }

    #[test]
    fn failure_renders_the_message() {
        let html = render(QueryStatus::Failed("X".to_string()));
        assert!(html.contains("Error: X"), "got: {html}");
        assert!(html.contains("About Page"), "got: {html}");
        assert!(!html.contains("Loading..."), "got: {html}");
    }

    #[test]
    fn ready_renders_the_user_name() {
        let html = render(QueryStatus::Ready(User {
            name: "Alice".to_string(),
        }));
        assert!(html.contains("Alice"), "got: {html}");
        assert!(html.contains("This page is using Server Side Rendering"), "got: {html}");
        assert!(!html.contains("Error:"), "got: {html}");
    }

    #[test]
    fn missing_user_gets_its_own_notice() {
        let html = render(QueryStatus::MissingUser);
        assert!(html.contains("No user information available."), "got: {html}");
        assert!(!html.contains("Error:"), "got: {html}");
    }
}
