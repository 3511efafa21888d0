//! Archive file name templates.
//!
//! Templates use `{name}`, `{version}` and `{platform}` placeholders. Anything
//! else, including unknown `{...}` sequences, is kept verbatim.

/// Default template, e.g. `Game-1.2.3-Linux`.
pub const DEFAULT_TEMPLATE: &str = "{name}-{version}-{platform}";

/// Substitutes the packaging placeholders in `template`.
pub fn expand_template(template: &str, name: &str, version: &str, platform: &str) -> String {
    template
        .replace("{name}", name)
        .replace("{version}", version)
        .replace("{platform}", platform)
}
