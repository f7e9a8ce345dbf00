//! Markup extraction for source word pages.
//!
//! Two independent optional-field lookups: the word-type heading and the
//! first meaning block. A missing element yields `None` for that field
//! only, never an error, so a change in one part of the page does not
//! blank the entire result.
//!
//! Parsing uses a lenient quick-xml streaming reader. Real-world HTML has
//! void elements and stray end tags; the reader is configured to tolerate
//! both, and a parse error simply ends the scan with whatever was
//! collected so far.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use etym_core::collapse_whitespace;

/// Exact class attribute of the heading that carries the word and its
/// lexical category label.
const WORD_HEADING_CLASS: &str =
    "scroll-m-16 text-2xl font-serif font-bold text-foreground text-4xl";

/// Exact class attribute of an etymology entry block.
const MEANING_BLOCK_CLASS: &str = "space-y-2 pb-2";

fn lenient_reader(html: &str) -> Reader<&[u8]> {
    let mut reader = Reader::from_str(html);
    let config = reader.config_mut();
    config.check_end_names = false;
    config.allow_unmatched_ends = true;
    config.trim_text(true);
    reader
}

fn class_attr(element: &BytesStart) -> Option<String> {
    element
        .try_get_attribute("class")
        .ok()
        .flatten()
        .and_then(|attr| attr.unescape_value().ok())
        .map(|value| value.into_owned())
}

/// Word type: the second inline label of the designated heading, stripped
/// of its surrounding parentheses. `None` when the heading is absent, has
/// fewer than two labels, or the label is empty once cleaned.
pub fn extract_word_type(html: &str) -> Option<String> {
    let mut reader = lenient_reader(html);
    let mut in_heading = false;
    let mut span_depth = 0usize;
    let mut labels: Vec<String> = Vec::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) => match e.local_name().as_ref() {
                b"h2" if !in_heading => {
                    if class_attr(e).as_deref() == Some(WORD_HEADING_CLASS) {
                        in_heading = true;
                        labels.clear();
                    }
                }
                b"span" if in_heading => {
                    if span_depth == 0 {
                        labels.push(String::new());
                    }
                    span_depth += 1;
                }
                _ => {}
            },
            Ok(Event::Empty(ref e)) => {
                if in_heading && span_depth == 0 && e.local_name().as_ref() == b"span" {
                    labels.push(String::new());
                }
            }
            Ok(Event::Text(ref t)) if in_heading && span_depth > 0 => {
                if let Ok(text) = t.unescape() {
                    let segment = text.trim();
                    if !segment.is_empty() {
                        if let Some(label) = labels.last_mut() {
                            if !label.is_empty() {
                                label.push(' ');
                            }
                            label.push_str(segment);
                        }
                    }
                }
            }
            Ok(Event::End(ref e)) => match e.local_name().as_ref() {
                b"span" if in_heading && span_depth > 0 => span_depth -= 1,
                b"h2" if in_heading => break,
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => {
                tracing::debug!("markup parse error in heading scan: {}", e);
                break;
            }
            _ => {}
        }
    }

    let label = labels.get(1)?;
    let cleaned = label.trim_matches(|c| c == '(' || c == ')').trim();
    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned.to_string())
    }
}

/// First attested meaning: normalized text of the first meaning block in
/// document order. `None` when no block exists or it carries no text.
pub fn extract_first_meaning(html: &str) -> Option<String> {
    let mut reader = lenient_reader(html);
    let mut in_block = false;
    // Nested div depth inside the block. Only divs are counted, so void
    // elements and unclosed inline tags cannot unbalance the scan.
    let mut div_depth = 0usize;
    let mut segments: Vec<String> = Vec::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) if e.local_name().as_ref() == b"div" => {
                if in_block {
                    div_depth += 1;
                } else if class_attr(e).as_deref() == Some(MEANING_BLOCK_CLASS) {
                    in_block = true;
                    div_depth = 0;
                }
            }
            Ok(Event::Text(ref t)) if in_block => {
                if let Ok(text) = t.unescape() {
                    let segment = text.trim().to_string();
                    if !segment.is_empty() {
                        segments.push(segment);
                    }
                }
            }
            Ok(Event::End(ref e)) if in_block && e.local_name().as_ref() == b"div" => {
                if div_depth == 0 {
                    break;
                }
                div_depth -= 1;
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                tracing::debug!("markup parse error in meaning scan: {}", e);
                break;
            }
            _ => {}
        }
    }

    if segments.is_empty() {
        None
    } else {
        Some(collapse_whitespace(&segments.join(" ")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADING_CLASS: &str =
        "scroll-m-16 text-2xl font-serif font-bold text-foreground text-4xl";

    fn word_page(word: &str, word_type: &str, meaning: &str) -> String {
        format!(
            r#"<html><body>
<h2 class="{HEADING_CLASS}"><span>{word}</span> <span>({word_type})</span></h2>
<div class="space-y-2 pb-2"><p>{meaning}</p></div>
</body></html>"#
        )
    }

    #[test]
    fn word_type_is_second_label_without_parens() {
        let html = word_page("run", "v.", "to move swiftly");
        assert_eq!(extract_word_type(&html), Some("v.".to_string()));
    }

    #[test]
    fn word_type_missing_heading() {
        let html = r#"<html><h2 class="other"><span>run</span> <span>(v.)</span></h2></html>"#;
        assert_eq!(extract_word_type(html), None);
    }

    #[test]
    fn word_type_fewer_than_two_labels() {
        let html = format!(r#"<h2 class="{HEADING_CLASS}"><span>run</span></h2>"#);
        assert_eq!(extract_word_type(&html), None);
    }

    #[test]
    fn word_type_nested_span_counts_once() {
        let html = format!(
            r#"<h2 class="{HEADING_CLASS}"><span><span>run</span></span> <span>(n.)</span></h2>"#
        );
        assert_eq!(extract_word_type(&html), Some("n.".to_string()));
    }

    #[test]
    fn meaning_from_first_block_in_document_order() {
        let html = r#"<div class="space-y-2 pb-2">first entry</div>
<div class="space-y-2 pb-2">second entry</div>"#;
        assert_eq!(extract_first_meaning(html), Some("first entry".to_string()));
    }

    #[test]
    fn meaning_text_is_whitespace_collapsed() {
        let html = "<div class=\"space-y-2 pb-2\"><p>to move\n   swiftly</p> <em>c. 1200</em></div>";
        assert_eq!(
            extract_first_meaning(html),
            Some("to move swiftly c. 1200".to_string())
        );
    }

    #[test]
    fn meaning_absent_block() {
        assert_eq!(extract_first_meaning("<div class=\"other\">text</div>"), None);
        assert_eq!(extract_first_meaning(""), None);
    }

    #[test]
    fn meaning_nested_divs_stay_inside_block() {
        let html = r#"<div class="space-y-2 pb-2"><div>inner</div> outer</div>
<div class="space-y-2 pb-2">next block</div>"#;
        assert_eq!(extract_first_meaning(html), Some("inner outer".to_string()));
    }

    #[test]
    fn tolerates_void_elements_and_entities() {
        let html =
            "<div class=\"space-y-2 pb-2\">before<br>after &amp; more</div>";
        assert_eq!(
            extract_first_meaning(html),
            Some("before after & more".to_string())
        );
    }

    #[test]
    fn both_fields_from_one_page() {
        let html = word_page("running", "n.", "the act of one who runs");
        assert_eq!(extract_word_type(&html), Some("n.".to_string()));
        assert_eq!(
            extract_first_meaning(&html),
            Some("the act of one who runs".to_string())
        );
    }
}
