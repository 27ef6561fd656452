use leptos::*;

use crate::config::APP_NAME;
use crate::Converter;

#[component]
pub fn Header(converter: Converter) -> impl IntoView {
    let badge = move || {
        converter
            .health
            .with(|h| h.as_ref().map(|h| h.badge()).unwrap_or_else(|| "offline".to_string()))
    };
    let title = move || {
        converter.health.with(|h| {
            h.as_ref()
                .and_then(|h| h.service.clone())
                .unwrap_or_else(|| APP_NAME.to_string())
        })
    };

    view! {
        <header>
            <div class="header-left">
                <a href="/" class="logo">{APP_NAME}</a>
            </div>
            <div class="header-right">
                <div class="service-status" class:connected=move || converter.health.with(Option::is_some) title=title>
                    <span class="service-dot" class:connected=move || converter.health.with(Option::is_some)></span>
                    <span>{badge}</span>
                </div>
            </div>
        </header>
    }
}
