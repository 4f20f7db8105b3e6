use chrono::{Datelike, Local};
use leptos::prelude::*;

pub const BRAND: &str = "Roche Scaf";

fn copyright_line(year: i32) -> String {
    format!("© {year} {BRAND}. All rights reserved.")
}

/// Site footer dated with the current local year.
#[component]
pub fn Footer() -> impl IntoView {
    let year = Local::now().year();
    view! { <FooterContent year=year /> }
}

#[component]
pub fn FooterContent(year: i32) -> impl IntoView {
    view! {
        <footer class="site-footer">
            <div class="footer-container">
                <div class="footer-row">
                    <div>
                        <h3 class="footer-brand">{BRAND}</h3>
                        <p class="footer-copyright">{copyright_line(year)}</p>
                    </div>
                    <nav class="footer-links">
                        <a href="/">"Home"</a>
                        <a href="/about">"About"</a>
                    </nav>
                </div>
            </div>
        </footer>
    }
}
