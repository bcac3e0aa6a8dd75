// src/services/detail.rs

//! Course detail page parser.
//!
//! A course page has two sources of attributes: a summary list right after
//! the page title (duration, workload, credits, language, certificate) and a
//! details panel of labeled blocks (description, syllabus, subject groups,
//! custom fields). Both are extracted in one pass; any structural surprise
//! is a parse error so the caller can retry the page.

use regex::Regex;
use scraper::{ElementRef, Html, Selector};

use crate::error::{AppError, Result};
use crate::models::{CourseDetail, SubjectGroup};
use crate::normalize::{language_code, parse_credits, parse_hour_range, parse_week_range};
use crate::utils::url::extract_group_id;

const TITLE_SELECTOR: &str = "h1.product-page-module__qYqKqa__title";
const DETAILS_SELECTOR: &str = "div.productDetails";
const CUSTOM_FIELD_PATTERN: &str = r"^custom_field\d+_body";

/// Everything extracted from one course page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedPage {
    pub detail: CourseDetail,
    /// Subject groups referenced by the page, in page order
    pub groups: Vec<SubjectGroup>,
}

/// Classification of a details-panel block by its label id.
#[derive(Debug, Clone, PartialEq, Eq)]
enum DetailLabel {
    Directions,
    Instructors,
    CustomField(String),
    Section(String),
}

/// Classification of one summary list item by its phrasing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SummaryItem {
    Weeks,
    Hours,
    Credits,
    Language,
    Certificate,
}

/// Workload phrases mention both units ("hours per week"), so the week
/// check must exclude them before the hour check picks them up.
fn classify_summary_item(text: &str) -> Option<SummaryItem> {
    if text.contains("week") && !text.contains("hour") {
        Some(SummaryItem::Weeks)
    } else if text.contains("hour") {
        Some(SummaryItem::Hours)
    } else if text.contains("credit") {
        Some(SummaryItem::Credits)
    } else if text.contains("language") {
        Some(SummaryItem::Language)
    } else if text.contains("certificate") {
        Some(SummaryItem::Certificate)
    } else {
        None
    }
}

/// Extracts course attributes from raw HTML.
pub trait PageParser: Send + Sync {
    fn parse(&self, html: &str) -> Result<ParsedPage>;
}

/// Parser for the catalog's course pages.
pub struct CoursePageParser {
    title_selector: Selector,
    details_selector: Selector,
    anchor_selector: Selector,
    custom_field: Regex,
}

impl CoursePageParser {
    pub fn new() -> Result<Self> {
        Ok(Self {
            title_selector: parse_selector(TITLE_SELECTOR)?,
            details_selector: parse_selector(DETAILS_SELECTOR)?,
            anchor_selector: parse_selector("a")?,
            custom_field: Regex::new(CUSTOM_FIELD_PATTERN)
                .map_err(|e| AppError::parse(format!("invalid field pattern: {e}")))?,
        })
    }

    fn classify(&self, name: &str) -> DetailLabel {
        match name {
            "directions" => DetailLabel::Directions,
            "instructors" => DetailLabel::Instructors,
            _ if self.custom_field.is_match(name) => DetailLabel::CustomField(name.to_string()),
            _ => DetailLabel::Section(name.to_string()),
        }
    }

    /// Walk the labeled blocks of the details panel.
    ///
    /// A block with a single child element is the course intro. Every other
    /// block is a label element (identified by its `id` attribute) followed
    /// by a content element.
    fn parse_details_panel(&self, document: &Html, page: &mut ParsedPage) -> Result<()> {
        let container = document
            .select(&self.details_selector)
            .next()
            .ok_or_else(|| AppError::parse("details panel not found"))?;

        for child in container.children().filter_map(ElementRef::wrap) {
            let blocks: Vec<ElementRef> = child.children().filter_map(ElementRef::wrap).collect();

            match blocks.as_slice() {
                [] => return Err(AppError::parse("empty block in details panel")),
                [only] => {
                    page.detail.intro = Some(element_text(only));
                }
                [label, content, ..] => {
                    let name = label.value().attr("id").ok_or_else(|| {
                        AppError::parse("details block label has no id attribute")
                    })?;

                    match self.classify(name) {
                        DetailLabel::Directions => self.parse_directions(*content, page)?,
                        DetailLabel::Instructors => {}
                        DetailLabel::CustomField(key) => {
                            page.detail.custom_info.insert(key, element_text(content));
                        }
                        DetailLabel::Section(key) => {
                            page.detail.sections.insert(key, element_text(content));
                        }
                    }
                }
            }
        }

        Ok(())
    }

    /// Collect subject-group links from the directions block.
    fn parse_directions(&self, content: ElementRef<'_>, page: &mut ParsedPage) -> Result<()> {
        let mut ids = Vec::new();

        for anchor in content.select(&self.anchor_selector) {
            let href = anchor
                .value()
                .attr("href")
                .ok_or_else(|| AppError::parse("direction link has no href"))?;
            let id = extract_group_id(href)?;

            let text: String = anchor.text().collect();
            let (code, title) = text.split_once(' ').ok_or_else(|| {
                AppError::parse(format!("direction label {text:?} has no code separator"))
            })?;

            ids.push(id);
            page.groups.push(SubjectGroup {
                id,
                code: code.to_string(),
                title: title.to_string(),
            });
        }

        page.detail.directions = Some(ids);
        Ok(())
    }

    /// Classify the summary list items that follow the course title.
    fn parse_summary(&self, document: &Html, detail: &mut CourseDetail) -> Result<()> {
        let header = document
            .select(&self.title_selector)
            .next()
            .ok_or_else(|| AppError::parse("course title header not found"))?;

        let list = header
            .next_siblings()
            .filter_map(ElementRef::wrap)
            .next()
            .ok_or_else(|| AppError::parse("summary list missing after course title"))?;

        for item in list.children().filter_map(ElementRef::wrap) {
            if item.value().name() != "li" {
                continue;
            }

            let raw: String = item.text().collect();
            let text = raw.trim();

            match classify_summary_item(text) {
                Some(SummaryItem::Weeks) => detail.weeks = Some(parse_week_range(text)?),
                Some(SummaryItem::Hours) => detail.hours = Some(parse_hour_range(text)?),
                Some(SummaryItem::Credits) => detail.credit_units = Some(parse_credits(text)?),
                Some(SummaryItem::Language) => {
                    detail.language = Some(language_code(text).to_string());
                }
                Some(SummaryItem::Certificate) => detail.certificate = true,
                None => {}
            }
        }

        Ok(())
    }
}

impl PageParser for CoursePageParser {
    fn parse(&self, html: &str) -> Result<ParsedPage> {
        let document = Html::parse_document(html);
        let mut page = ParsedPage::default();

        self.parse_details_panel(&document, &mut page)?;
        self.parse_summary(&document, &mut page.detail)?;

        Ok(page)
    }
}

fn parse_selector(s: &str) -> Result<Selector> {
    Selector::parse(s).map_err(|e| AppError::selector(s, format!("{e:?}")))
}

fn element_text(element: &ElementRef) -> String {
    element.text().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL_PAGE: &str = r#"<html><body>
<h1 class="product-page-module__qYqKqa__title">Linear Algebra</h1>
<ul>
<li>from 4 to 8 weeks</li>
<li>~ 6 hours per week</li>
<li>3 credit units</li>
<li>English language</li>
<li>certificate upon completion</li>
</ul>
<div class="productDetails">
<div><p>An introduction to matrices.</p></div>
<div><h2 id="about">About</h2><div>Full course description.</div></div>
<div><h2 id="directions">Directions</h2><div><a href="/course/?course_group=10">01.03.02 Applied Mathematics</a><a href="/course/?course_group=20">09.03.01 Computer Science</a></div></div>
<div><h2 id="custom_field2_body">Extra</h2><div>Laboratory access.</div></div>
<div><h2 id="instructors">Instructors</h2><div>Prof. Ivanova</div></div>
</div>
</body></html>"#;

    fn parser() -> CoursePageParser {
        CoursePageParser::new().unwrap()
    }

    #[test]
    fn full_page_extracts_summary_fields() {
        let page = parser().parse(FULL_PAGE).unwrap();
        assert_eq!(page.detail.weeks, Some((4, 8)));
        assert_eq!(page.detail.hours, Some((6, 6)));
        assert_eq!(page.detail.credit_units, Some(3));
        assert_eq!(page.detail.language.as_deref(), Some("en"));
        assert!(page.detail.certificate);
    }

    #[test]
    fn full_page_extracts_panel_fields() {
        let page = parser().parse(FULL_PAGE).unwrap();
        assert_eq!(
            page.detail.intro.as_deref(),
            Some("An introduction to matrices.")
        );
        assert_eq!(
            page.detail.sections.get("about").map(String::as_str),
            Some("Full course description.")
        );
        assert_eq!(page.detail.sections.len(), 1);
        assert_eq!(
            page.detail.custom_info.get("custom_field2_body").map(String::as_str),
            Some("Laboratory access.")
        );
    }

    #[test]
    fn full_page_extracts_directions_and_groups() {
        let page = parser().parse(FULL_PAGE).unwrap();
        assert_eq!(page.detail.directions, Some(vec![10, 20]));
        assert_eq!(
            page.groups,
            vec![
                SubjectGroup {
                    id: 10,
                    code: "01.03.02".to_string(),
                    title: "Applied Mathematics".to_string(),
                },
                SubjectGroup {
                    id: 20,
                    code: "09.03.01".to_string(),
                    title: "Computer Science".to_string(),
                },
            ]
        );
    }

    #[test]
    fn instructors_block_is_skipped() {
        let page = parser().parse(FULL_PAGE).unwrap();
        assert!(!page.detail.sections.contains_key("instructors"));
    }

    #[test]
    fn parse_is_idempotent() {
        let p = parser();
        assert_eq!(p.parse(FULL_PAGE).unwrap(), p.parse(FULL_PAGE).unwrap());
    }

    #[test]
    fn missing_title_header_is_error() {
        let html = r#"<html><body><div class="productDetails"></div></body></html>"#;
        assert!(parser().parse(html).is_err());
    }

    #[test]
    fn missing_summary_list_is_error() {
        let html = concat!(
            r#"<html><body><div class="productDetails"></div>"#,
            r#"<h1 class="product-page-module__qYqKqa__title">T</h1></body></html>"#,
        );
        assert!(parser().parse(html).is_err());
    }

    #[test]
    fn missing_details_panel_is_error() {
        let html = concat!(
            r#"<html><body><h1 class="product-page-module__qYqKqa__title">T</h1>"#,
            r#"<ul><li>16 weeks</li></ul></body></html>"#,
        );
        assert!(parser().parse(html).is_err());
    }

    fn page_with_panel(panel: &str) -> String {
        format!(
            concat!(
                r#"<html><body><h1 class="product-page-module__qYqKqa__title">T</h1>"#,
                r#"<ul><li>16 weeks</li></ul>"#,
                r#"<div class="productDetails">{}</div></body></html>"#,
            ),
            panel
        )
    }

    #[test]
    fn text_only_block_is_error() {
        let html = page_with_panel("<div>loose text</div>");
        assert!(parser().parse(&html).is_err());
    }

    #[test]
    fn label_without_id_is_error() {
        let html = page_with_panel("<div><h2>About</h2><div>x</div></div>");
        assert!(parser().parse(&html).is_err());
    }

    #[test]
    fn direction_link_without_href_is_error() {
        let html = page_with_panel(
            r#"<div><h2 id="directions">D</h2><div><a>01.03.02 Math</a></div></div>"#,
        );
        assert!(parser().parse(&html).is_err());
    }

    #[test]
    fn direction_label_without_space_is_error() {
        let html = page_with_panel(
            r#"<div><h2 id="directions">D</h2><div><a href="/c/?course_group=1">Solo</a></div></div>"#,
        );
        assert!(parser().parse(&html).is_err());
    }

    #[test]
    fn direction_label_with_trailing_space_keeps_empty_title() {
        let html = page_with_panel(
            r#"<div><h2 id="directions">D</h2><div><a href="/c/?course_group=5">10.03.01 </a></div></div>"#,
        );
        let page = parser().parse(&html).unwrap();
        assert_eq!(page.groups[0].code, "10.03.01");
        assert_eq!(page.groups[0].title, "");
    }

    #[test]
    fn empty_directions_block_yields_empty_list() {
        let html = page_with_panel(r#"<div><h2 id="directions">D</h2><div></div></div>"#);
        let page = parser().parse(&html).unwrap();
        assert_eq!(page.detail.directions, Some(vec![]));
        assert!(page.groups.is_empty());
    }

    #[test]
    fn summary_items_classify_by_phrase() {
        assert_eq!(
            classify_summary_item("from 4 to 8 weeks"),
            Some(SummaryItem::Weeks)
        );
        assert_eq!(
            classify_summary_item("~ 6 hours per week"),
            Some(SummaryItem::Hours)
        );
        assert_eq!(
            classify_summary_item("3 credit units"),
            Some(SummaryItem::Credits)
        );
        assert_eq!(
            classify_summary_item("English language"),
            Some(SummaryItem::Language)
        );
        assert_eq!(
            classify_summary_item("certificate upon completion"),
            Some(SummaryItem::Certificate)
        );
        assert_eq!(classify_summary_item("Starts in September"), None);
    }

    #[test]
    fn labels_classify_by_shape() {
        let p = parser();
        assert_eq!(p.classify("directions"), DetailLabel::Directions);
        assert_eq!(p.classify("instructors"), DetailLabel::Instructors);
        assert_eq!(
            p.classify("custom_field7_body"),
            DetailLabel::CustomField("custom_field7_body".to_string())
        );
        assert_eq!(
            p.classify("syllabus"),
            DetailLabel::Section("syllabus".to_string())
        );
    }

    #[test]
    fn custom_field_pattern_matches_prefix_only() {
        let html = page_with_panel(concat!(
            r#"<div><h2 id="custom_field12_body">A</h2><div>first</div></div>"#,
            r#"<div><h2 id="custom_field3_body_extra">B</h2><div>second</div></div>"#,
            r#"<div><h2 id="custom_field_body">C</h2><div>third</div></div>"#,
        ));
        let page = parser().parse(&html).unwrap();
        assert!(page.detail.custom_info.contains_key("custom_field12_body"));
        assert!(page.detail.custom_info.contains_key("custom_field3_body_extra"));
        assert_eq!(
            page.detail.sections.get("custom_field_body").map(String::as_str),
            Some("third")
        );
    }

    #[test]
    fn later_intro_block_wins() {
        let html = page_with_panel("<div><p>first</p></div><div><p>second</p></div>");
        let page = parser().parse(&html).unwrap();
        assert_eq!(page.detail.intro.as_deref(), Some("second"));
    }

    #[test]
    fn last_summary_match_wins() {
        let html = concat!(
            r#"<html><body><h1 class="product-page-module__qYqKqa__title">T</h1>"#,
            r#"<ul><li>Russian language</li><li>English language</li></ul>"#,
            r#"<div class="productDetails"></div></body></html>"#,
        );
        let page = parser().parse(html).unwrap();
        assert_eq!(page.detail.language.as_deref(), Some("en"));
    }

    #[test]
    fn unmatched_summary_items_are_ignored() {
        let html = concat!(
            r#"<html><body><h1 class="product-page-module__qYqKqa__title">T</h1>"#,
            r#"<ul><li>Starts in September</li><li>16 weeks</li></ul>"#,
            r#"<div class="productDetails"></div></body></html>"#,
        );
        let page = parser().parse(html).unwrap();
        assert_eq!(page.detail.weeks, Some((16, 16)));
        assert!(page.detail.hours.is_none());
    }

    #[test]
    fn malformed_week_phrase_is_error() {
        let html = concat!(
            r#"<html><body><h1 class="product-page-module__qYqKqa__title">T</h1>"#,
            r#"<ul><li>weeks to be announced</li></ul>"#,
            r#"<div class="productDetails"></div></body></html>"#,
        );
        assert!(parser().parse(html).is_err());
    }
}
