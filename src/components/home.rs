use leptos::prelude::*;
use leptos_meta::Title;
use thaw::*;

use super::BRAND;

#[component]
pub fn HomePage() -> impl IntoView {
    view! {
        <Title text="Home" />
        <Flex vertical=true align=FlexAlign::Center class="home">
            <h1>{BRAND}</h1>
            <p>"Welcome. The about page shows who you are signed in as."</p>
            <a href="/about">
                <Button appearance=ButtonAppearance::Primary>"About"</Button>
            </a>
        </Flex>
    }
}
