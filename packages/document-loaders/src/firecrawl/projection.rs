//! Projection of Firecrawl response records into documents.

use firecrawl_client::ScrapeData;
use tracing::debug;

use crate::document::Document;

/// A response record, tagged by how its content is read.
#[derive(Debug, Clone, PartialEq)]
pub enum Record {
    /// A scraped page with optional content variants and metadata
    Page(ScrapeData),
    /// An opaque string (a mapped URL, a serialized extract result)
    Text(String),
}

impl From<ScrapeData> for Record {
    fn from(page: ScrapeData) -> Self {
        Record::Page(page)
    }
}

impl From<String> for Record {
    fn from(text: String) -> Self {
        Record::Text(text)
    }
}

type ContentField = fn(&ScrapeData) -> Option<&str>;

fn markdown(page: &ScrapeData) -> Option<&str> {
    page.markdown.as_deref()
}

fn html(page: &ScrapeData) -> Option<&str> {
    page.html.as_deref()
}

fn raw_html(page: &ScrapeData) -> Option<&str> {
    page.raw_html.as_deref()
}

/// Page content fields, highest priority first.
const CONTENT_PRIORITY: [ContentField; 3] = [markdown, html, raw_html];

/// The first present, non-empty content field of a page.
pub fn page_content(page: &ScrapeData) -> Option<&str> {
    CONTENT_PRIORITY
        .iter()
        .find_map(|field| field(page).filter(|content| !content.is_empty()))
}

/// Lazily project records into documents, skipping records without content.
pub fn project<I>(records: I) -> Projection<I::IntoIter>
where
    I: IntoIterator<Item = Record>,
{
    Projection {
        records: records.into_iter(),
    }
}

/// Iterator returned by [`project`]. Single pass, in record order.
#[derive(Debug)]
pub struct Projection<I> {
    records: I,
}

impl<I> Iterator for Projection<I>
where
    I: Iterator<Item = Record>,
{
    type Item = Document;

    fn next(&mut self) -> Option<Document> {
        self.records.by_ref().find_map(project_record)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.records.size_hint().1)
    }
}

fn project_record(record: Record) -> Option<Document> {
    match record {
        Record::Text(text) => {
            if text.is_empty() {
                debug!("Skipping empty text record");
                return None;
            }
            Some(Document::new(text))
        }
        Record::Page(page) => {
            let Some(content) = page_content(&page).map(str::to_owned) else {
                debug!(
                    url = page.url.as_deref().unwrap_or_default(),
                    "Skipping page record without content"
                );
                return None;
            };
            Some(Document::new(content).with_metadata_map(page.metadata.unwrap_or_default()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_markdown_wins_over_html() {
        let page = ScrapeData::markdown("# Title")
            .with_html("<h1>Title</h1>")
            .with_raw_html("<html><h1>Title</h1></html>");

        assert_eq!(page_content(&page), Some("# Title"));
    }

    #[test]
    fn test_empty_markdown_falls_through() {
        let page = ScrapeData::markdown("").with_html("<p>body</p>");
        assert_eq!(page_content(&page), Some("<p>body</p>"));
    }

    #[test]
    fn test_raw_html_only() {
        let page = ScrapeData::default().with_raw_html("<html>raw</html>");

        let docs: Vec<_> = project(vec![Record::Page(page)]).collect();

        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].page_content, "<html>raw</html>");
        assert!(docs[0].metadata.is_empty());
    }

    #[test]
    fn test_page_without_content_is_skipped() {
        let empty = ScrapeData::markdown("")
            .with_html("")
            .with_metadata("title", "Empty");
        let missing = ScrapeData::default().with_metadata("title", "Missing");

        let docs: Vec<_> = project(vec![Record::Page(empty), Record::Page(missing)]).collect();

        assert!(docs.is_empty());
    }

    #[test]
    fn test_metadata_is_carried() {
        let page = ScrapeData::markdown("content")
            .with_metadata("sourceURL", "https://example.com")
            .with_metadata("statusCode", 200);

        let doc = project(vec![page.into()]).next().unwrap();

        assert_eq!(doc.metadata_str("sourceURL"), Some("https://example.com"));
        assert_eq!(doc.metadata["statusCode"], json!(200));
    }

    #[test]
    fn test_text_records_skip_empty_and_keep_order() {
        let records = vec![
            Record::Text("https://example.com/a".into()),
            Record::Text(String::new()),
            Record::Text("https://example.com/b".into()),
        ];

        let contents: Vec<_> = project(records).map(|d| d.page_content).collect();

        assert_eq!(contents, vec!["https://example.com/a", "https://example.com/b"]);
    }

    #[test]
    fn test_projection_is_lazy() {
        let mut seen = 0;
        let records = (0..3).map(|i| {
            seen += 1;
            Record::Text(format!("item {i}"))
        });

        let mut projection = project(records);
        let first = projection.next().unwrap();

        assert_eq!(first.page_content, "item 0");
        drop(projection);
        assert_eq!(seen, 1);
    }
}
