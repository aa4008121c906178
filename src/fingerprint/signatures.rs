//! Built-in technology signature tables.
//!
//! Markup signatures are regexes applied to the lowercased page body.
//! Bump [`SIGNATURES_VERSION`] whenever a table changes.

use std::sync::LazyLock;

use regex::Regex;

use crate::utils::compile_regex_unsafe;

/// Version of the tables below; reported with every fingerprint.
pub const SIGNATURES_VERSION: &str = "2025.1";

/// A labelled group of markup patterns.
pub struct Signature {
    pub label: &'static str,
    pub patterns: &'static [&'static str],
}

/// `<meta name="generator">` substrings, checked before any markup marker.
pub const CMS_GENERATORS: &[(&str, &str)] = &[
    ("wordpress", "WordPress"),
    ("shopify", "Shopify"),
    ("joomla", "Joomla"),
    ("drupal", "Drupal"),
];

/// Markup substrings identifying a CMS, in precedence order.
pub const CMS_MARKERS: &[(&str, &str)] = &[
    ("wp-content", "WordPress"),
    ("shopify.theme", "Shopify"),
    ("cdn.shopify.com", "Shopify"),
    ("drupal.settings", "Drupal"),
    ("wp-json", "WordPress"),
];

pub const FRAMEWORKS: &[Signature] = &[
    Signature {
        label: "Next.js",
        patterns: &[r"__next_data__", r"next-route-announcer"],
    },
    Signature {
        label: "React",
        patterns: &[r"reactdom", r"data-reactroot", r#"id="root""#],
    },
    Signature {
        label: "Vue.js",
        patterns: &[r"vue-cli-service", r" data-v-[0-9a-f]+"],
    },
    Signature {
        label: "Svelte",
        patterns: &[r"sveltekit", r"svelte-"],
    },
    Signature {
        label: "Nuxt.js",
        patterns: &[r"nuxt\.config", r"nuxt-link"],
    },
    Signature {
        label: "Gatsby",
        patterns: &[r"gatsby"],
    },
];

pub const UI_LIBRARIES: &[Signature] = &[
    Signature {
        label: "Bootstrap",
        patterns: &[r"bootstrap(\.min)?\.css", r"bootstrap"],
    },
    Signature {
        label: "Tailwind CSS",
        patterns: &[r"tailwind(\.min)?\.css", r"tailwind"],
    },
    Signature {
        label: "Font Awesome",
        patterns: &[r"fontawesome", r"font-awesome"],
    },
];

pub const ANALYTICS: &[Signature] = &[
    Signature {
        label: "Google Analytics / GTM",
        patterns: &[
            r"gtag\(.+ga4",
            r"googletagmanager\.com",
            r"google-analytics\.com",
        ],
    },
    Signature {
        label: "Yandex Metrica",
        patterns: &[r"metrik.*yandex", r"mc\.yandex"],
    },
    Signature {
        label: "Plausible",
        patterns: &[r"plausible\.io"],
    },
    Signature {
        label: "Matomo",
        patterns: &[r"matomo"],
    },
];

/// Substrings of script/stylesheet URLs identifying a CDN.
pub const CDN_MARKERS: &[(&str, &str)] = &[
    ("cloudflare", "Cloudflare"),
    ("stackpath", "StackPath / CDN"),
];

/// A signature with its patterns compiled.
pub(crate) struct CompiledSignature {
    pub label: &'static str,
    pub patterns: Vec<Regex>,
}

fn compile(table: &'static [Signature], context: &str) -> Vec<CompiledSignature> {
    table
        .iter()
        .map(|signature| CompiledSignature {
            label: signature.label,
            patterns: signature
                .patterns
                .iter()
                .map(|pattern| compile_regex_unsafe(pattern, context))
                .collect(),
        })
        .collect()
}

pub(crate) static COMPILED_FRAMEWORKS: LazyLock<Vec<CompiledSignature>> =
    LazyLock::new(|| compile(FRAMEWORKS, "FRAMEWORKS"));
pub(crate) static COMPILED_UI_LIBRARIES: LazyLock<Vec<CompiledSignature>> =
    LazyLock::new(|| compile(UI_LIBRARIES, "UI_LIBRARIES"));
pub(crate) static COMPILED_ANALYTICS: LazyLock<Vec<CompiledSignature>> =
    LazyLock::new(|| compile(ANALYTICS, "ANALYTICS"));
