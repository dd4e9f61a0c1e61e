//! Translation of Firecrawl options from the legacy (v0) vocabulary to the
//! current (v1) one.
//!
//! Callers may hand over option maps written against either API shape, or a
//! mix of both. The rename and format tables below are the whole contract;
//! any key they do not mention passes through untouched.
//!
//! The caller's map is never modified: both entry points normalise a copy.

use serde_json::{Map, Value};
use std::fmt;

/// Free-form request options.
pub type Params = Map<String, Value>;

/// Output formats a scrape can request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    Markdown,
    Html,
    RawHtml,
    Extract,
    Links,
    Screenshot,
    FullPageScreenshot,
}

impl Format {
    /// Wire token for this format.
    pub fn as_str(&self) -> &'static str {
        match self {
            Format::Markdown => "markdown",
            Format::Html => "html",
            Format::RawHtml => "rawHtml",
            Format::Extract => "extract",
            Format::Links => "links",
            Format::Screenshot => "screenshot",
            Format::FullPageScreenshot => "screenshot@fullPage",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Crawl-level renames: (legacy key, canonical key).
pub const CRAWL_RENAMES: &[(&str, &str)] = &[
    ("includes", "includePaths"),
    ("excludes", "excludePaths"),
    ("allowBackwardCrawling", "allowBackwardLinks"),
    ("allowExternalContentLinks", "allowExternalLinks"),
];

/// Scrape-level renames: (legacy key, canonical key).
pub const SCRAPE_RENAMES: &[(&str, &str)] = &[
    ("onlyIncludeTags", "includeTags"),
    ("removeTags", "excludeTags"),
];

/// Boolean flags that become formats, in priority order:
/// (flag key, format, value when the flag is absent).
pub const FORMAT_FLAGS: &[(&str, Format, bool)] = &[
    ("includeMarkdown", Format::Markdown, true),
    ("includeHtml", Format::Html, false),
    ("includeRawHtml", Format::RawHtml, false),
    ("includeExtract", Format::Extract, false),
    ("includeLinks", Format::Links, false),
    ("screenshot", Format::Screenshot, false),
    ("fullPageScreenshot", Format::FullPageScreenshot, false),
];

/// `extractorOptions` fields lifted to the top level, applied in order.
/// `userPrompt` comes last and overwrites `extractionPrompt`.
const EXTRACTOR_FIELDS: &[(&str, &str)] = &[
    ("extractionPrompt", "prompt"),
    ("extractionSchema", "schema"),
    ("userPrompt", "prompt"),
];

/// Normalise options for a crawl request.
///
/// Renames the legacy path/link keys and turns a nested `pageOptions` map
/// into `scrapeOptions` via [`normalize_scrape_options`]. Formats are not
/// derived at the crawl level.
pub fn normalize_crawl_options(params: &Params) -> Params {
    let mut params = params.clone();
    apply_renames(&mut params, CRAWL_RENAMES);

    if let Some(page_options) = params.remove("pageOptions") {
        let page_options = match page_options {
            Value::Object(map) => map,
            _ => Params::new(),
        };
        params.insert(
            "scrapeOptions".to_string(),
            Value::Object(scrape_options(page_options)),
        );
    }

    params
}

/// Normalise options for a scrape request.
///
/// Lifts `extractorOptions` fields, converts the `include*`/screenshot flags
/// into `formats`, renames the legacy tag keys, and defaults `formats` to
/// `["markdown"]`. An explicit `formats` key is left as given.
pub fn normalize_scrape_options(params: &Params) -> Params {
    scrape_options(params.clone())
}

fn scrape_options(mut params: Params) -> Params {
    if let Some(Value::Object(extractor)) = params.remove("extractorOptions") {
        for (from, to) in EXTRACTOR_FIELDS {
            if let Some(value) = extractor.get(*from) {
                params.insert((*to).to_string(), value.clone());
            }
        }
    }

    let formats = take_formats(&mut params);
    apply_renames(&mut params, SCRAPE_RENAMES);

    if !params.contains_key("formats") {
        let formats = if formats.is_empty() {
            vec![Format::Markdown]
        } else {
            formats
        };
        params.insert("formats".to_string(), formats_value(&formats));
    }

    params
}

/// Consume every format flag from `params`, returning the enabled formats in
/// table order.
fn take_formats(params: &mut Params) -> Vec<Format> {
    FORMAT_FLAGS
        .iter()
        .filter_map(|(flag, format, default)| {
            let enabled = params
                .remove(*flag)
                .map_or(*default, |value| is_truthy(&value));
            enabled.then_some(*format)
        })
        .collect()
}

fn apply_renames(params: &mut Params, renames: &[(&str, &str)]) {
    for (legacy, canonical) in renames {
        if let Some(value) = params.remove(*legacy) {
            params.insert((*canonical).to_string(), value);
        }
    }
}

fn formats_value(formats: &[Format]) -> Value {
    Value::Array(formats.iter().map(|f| Value::from(f.as_str())).collect())
}

/// Loose truthiness: `null`, `false`, zero and empty strings/collections
/// are false.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(true, |f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    fn params(value: Value) -> Params {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected an object"),
        }
    }

    #[test]
    fn test_empty_scrape_options_default_to_markdown() {
        let normalized = normalize_scrape_options(&Params::new());
        assert_eq!(Value::Object(normalized), json!({"formats": ["markdown"]}));
    }

    #[test]
    fn test_empty_crawl_options_stay_empty() {
        assert!(normalize_crawl_options(&Params::new()).is_empty());
    }

    #[test]
    fn test_explicit_false_markdown_is_excluded() {
        let normalized =
            normalize_scrape_options(&params(json!({"includeHtml": true, "includeMarkdown": false})));

        assert_eq!(Value::Object(normalized), json!({"formats": ["html"]}));
    }

    #[test]
    fn test_formats_follow_flag_priority() {
        let normalized = normalize_scrape_options(&params(json!({
            "fullPageScreenshot": true,
            "includeLinks": true,
            "includeRawHtml": true,
            "screenshot": true,
            "includeExtract": true,
            "includeHtml": true
        })));

        assert_eq!(
            normalized["formats"],
            json!([
                "markdown",
                "html",
                "rawHtml",
                "extract",
                "links",
                "screenshot",
                "screenshot@fullPage"
            ])
        );
        for (flag, _, _) in FORMAT_FLAGS {
            assert!(!normalized.contains_key(*flag), "{flag} was not consumed");
        }
    }

    #[test]
    fn test_all_flags_false_falls_back_to_markdown() {
        let normalized = normalize_scrape_options(&params(json!({"includeMarkdown": false})));
        assert_eq!(normalized["formats"], json!(["markdown"]));
    }

    #[test]
    fn test_explicit_formats_are_kept_but_flags_consumed() {
        let normalized = normalize_scrape_options(&params(json!({
            "formats": ["links"],
            "includeHtml": true
        })));

        assert_eq!(Value::Object(normalized), json!({"formats": ["links"]}));
    }

    #[test]
    fn test_truthy_non_bool_flags() {
        let normalized = normalize_scrape_options(&params(json!({
            "includeMarkdown": 0,
            "includeHtml": "yes",
            "includeLinks": null
        })));

        assert_eq!(normalized["formats"], json!(["html"]));
    }

    #[test]
    fn test_user_prompt_overrides_extraction_prompt() {
        let normalized = normalize_scrape_options(&params(json!({
            "extractorOptions": {
                "extractionPrompt": "old prompt",
                "extractionSchema": {"type": "object"},
                "userPrompt": "new prompt"
            }
        })));

        assert_eq!(normalized["prompt"], json!("new prompt"));
        assert_eq!(normalized["schema"], json!({"type": "object"}));
        assert!(!normalized.contains_key("extractorOptions"));
    }

    #[test]
    fn test_extraction_prompt_alone() {
        let normalized = normalize_scrape_options(&params(json!({
            "extractorOptions": {"mode": "llm-extraction", "extractionPrompt": "company name"}
        })));

        assert_eq!(normalized["prompt"], json!("company name"));
        assert!(!normalized.contains_key("schema"));
        assert!(!normalized.contains_key("mode"));
    }

    #[test]
    fn test_tag_renames_and_passthrough() {
        let normalized = normalize_scrape_options(&params(json!({
            "onlyIncludeTags": ["article"],
            "removeTags": ["nav", "footer"],
            "waitFor": 1000
        })));

        assert_eq!(normalized["includeTags"], json!(["article"]));
        assert_eq!(normalized["excludeTags"], json!(["nav", "footer"]));
        assert_eq!(normalized["waitFor"], json!(1000));
        assert!(!normalized.contains_key("onlyIncludeTags"));
        assert!(!normalized.contains_key("removeTags"));
    }

    #[test]
    fn test_crawl_page_options_become_scrape_options() {
        let normalized = normalize_crawl_options(&params(json!({
            "includes": ["/blog/*"],
            "limit": 10,
            "pageOptions": {"includeHtml": true, "onlyIncludeTags": ["main"]}
        })));

        assert_eq!(
            Value::Object(normalized),
            json!({
                "includePaths": ["/blog/*"],
                "limit": 10,
                "scrapeOptions": {"formats": ["markdown", "html"], "includeTags": ["main"]}
            })
        );
    }

    #[test]
    fn test_crawl_page_options_rederived_alongside_outer_formats() {
        let normalized = normalize_crawl_options(&params(json!({
            "formats": ["html"],
            "pageOptions": {}
        })));

        assert_eq!(normalized["formats"], json!(["html"]));
        assert_eq!(normalized["scrapeOptions"], json!({"formats": ["markdown"]}));
    }

    #[test]
    fn test_caller_map_is_not_mutated() {
        let original = params(json!({"includes": ["/a"], "includeHtml": true}));
        let copy = original.clone();

        let _ = normalize_crawl_options(&original);
        let _ = normalize_scrape_options(&original);

        assert_eq!(original, copy);
    }

    proptest! {
        #[test]
        fn legacy_crawl_keys_are_renamed(
            values in proptest::collection::vec(proptest::option::of("[a-z/*]{1,12}"), CRAWL_RENAMES.len())
        ) {
            let mut input = Params::new();
            for ((legacy, _), value) in CRAWL_RENAMES.iter().zip(&values) {
                if let Some(value) = value {
                    input.insert(legacy.to_string(), json!([value]));
                }
            }

            let normalized = normalize_crawl_options(&input);

            for ((legacy, canonical), value) in CRAWL_RENAMES.iter().zip(&values) {
                prop_assert!(!normalized.contains_key(*legacy));
                match value {
                    Some(value) => prop_assert_eq!(&normalized[*canonical], &json!([value])),
                    None => prop_assert!(!normalized.contains_key(*canonical)),
                }
            }
        }

        #[test]
        fn legacy_tag_keys_are_renamed(
            include in proptest::collection::vec("[a-z]{1,8}", 0..4),
            exclude in proptest::collection::vec("[a-z]{1,8}", 0..4)
        ) {
            let input = params(json!({"onlyIncludeTags": include, "removeTags": exclude}));

            let normalized = normalize_scrape_options(&input);

            prop_assert!(!normalized.contains_key("onlyIncludeTags"));
            prop_assert!(!normalized.contains_key("removeTags"));
            prop_assert_eq!(&normalized["includeTags"], &json!(include));
            prop_assert_eq!(&normalized["excludeTags"], &json!(exclude));
        }
    }
}
