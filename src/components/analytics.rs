//! Analytics Loader
//!
//! Loads the gtag script when an analytics id was configured at build time.

use leptos::prelude::*;
use leptos_hooks::{use_script, ScriptSource};

use crate::config::ANALYTICS_ID;
use crate::context::use_app_context;

fn gtag_bootstrap(id: &str) -> String {
    format!(
        "window.dataLayer = window.dataLayer || [];\
         function gtag(){{dataLayer.push(arguments);}}\
         gtag('js', new Date());\
         gtag('config', '{}');",
        id
    )
}

#[component]
pub fn Analytics() -> impl IntoView {
    let Some(id) = ANALYTICS_ID else {
        return;
    };
    let ctx = use_app_context();
    let registry = ctx.scripts.get_value();

    let library = use_script(
        &registry,
        ScriptSource::Url(format!("https://www.googletagmanager.com/gtag/js?id={}", id)),
    );
    use_script(&registry, ScriptSource::Inline(gtag_bootstrap(id)));

    Effect::new(move |_| {
        let state = library.get();
        if state.error {
            tracing::warn!("analytics script failed to load");
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bootstrap_embeds_id() {
        let script = gtag_bootstrap("G-123");
        assert!(script.contains("gtag('config', 'G-123');"));
        assert!(script.starts_with("window.dataLayer"));
    }
}
