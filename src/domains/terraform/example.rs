//! "Example Usage" extraction from resource documentation pages.
//!
//! Documentation pages carry their canonical example as the first code block
//! after an `Example Usage` heading. The search for a code block is bounded
//! by the next heading of the same or a higher level so that an example from
//! an unrelated section is never returned.
//!
//! Rendered HTML pages (`<h2>` + `<pre>`) are scanned for heading and block
//! markers. When no HTML heading names the example, the page is read as
//! CommonMark with `pulldown-cmark` (ATX or setext headings, backtick or
//! tilde fences).

use std::ops::Range;
use std::sync::LazyLock;

use pulldown_cmark::{Event, Parser, Tag, TagEnd};
use regex::{Captures, Regex};

static HTML_HEADING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<h([1-6])\b[^>]*>(.*?)</h[1-6]\s*>").expect("valid heading regex")
});

static HTML_PRE_OPEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<pre\b[^>]*>").expect("valid pre regex"));

static TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").expect("valid tag regex"));

static MARKUP_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)</?([a-z][a-z0-9]*)\b[^>]*>").expect("valid markup regex")
});

const EXAMPLE_HEADING: &str = "example usage";

/// Outcome of scanning a page for its usage example.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExampleExtraction {
    Found(Example),
    NotFound,
}

/// An extracted example.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Example {
    /// Source text of the code block, markup removed, outer blank lines removed.
    pub code: String,
    /// Raw text of the example section (heading end to section end).
    pub section: String,
}

#[derive(Debug)]
struct Heading {
    level: usize,
    start: usize,
    end: usize,
    text: String,
}

#[derive(Debug)]
struct CodeBlock {
    start: usize,
    body: Range<usize>,
}

enum MarkdownScan {
    SeekingHeading,
    InHeading { level: usize, text: String },
    SeekingCodeBlock { level: usize, from: usize },
    InCodeBlock { level: usize, from: usize, code: String },
    SeekingSectionEnd { level: usize, from: usize, code: String },
}

/// Find the first example code block following an "Example Usage" heading.
///
/// Only the first matching heading is considered. A page without such a
/// heading, or whose example section holds no code block, yields
/// [`ExampleExtraction::NotFound`].
pub fn extract_example(document: &str) -> ExampleExtraction {
    let headings = html_headings(document);
    match headings.iter().position(|h| h.text == EXAMPLE_HEADING) {
        Some(index) => extract_html(document, &headings, index),
        None => extract_markdown(document),
    }
}

fn extract_html(document: &str, headings: &[Heading], index: usize) -> ExampleExtraction {
    let heading = &headings[index];
    let until = headings[index + 1..]
        .iter()
        .find(|next| next.level <= heading.level)
        .map_or(document.len(), |next| next.start);

    let Some(block) = next_pre_block(document, heading.end).filter(|b| b.start < until) else {
        return ExampleExtraction::NotFound;
    };
    let code = clean_html_code(&document[block.body]);
    if code.is_empty() {
        return ExampleExtraction::NotFound;
    }
    ExampleExtraction::Found(Example {
        code,
        section: document[heading.end..until.max(heading.end)].to_string(),
    })
}

fn extract_markdown(document: &str) -> ExampleExtraction {
    let mut state = MarkdownScan::SeekingHeading;

    for (event, range) in Parser::new(document).into_offset_iter() {
        state = match (state, event) {
            (MarkdownScan::SeekingHeading, Event::Start(Tag::Heading { level, .. })) => {
                MarkdownScan::InHeading {
                    level: level as usize,
                    text: String::new(),
                }
            }
            (
                MarkdownScan::InHeading { level, mut text },
                Event::Text(part) | Event::Code(part),
            ) => {
                text.push_str(&part);
                MarkdownScan::InHeading { level, text }
            }
            (MarkdownScan::InHeading { level, text }, Event::End(TagEnd::Heading(_))) => {
                if normalize_heading(&text) == EXAMPLE_HEADING {
                    MarkdownScan::SeekingCodeBlock {
                        level,
                        from: range.end,
                    }
                } else {
                    MarkdownScan::SeekingHeading
                }
            }
            (
                MarkdownScan::SeekingCodeBlock { level, .. },
                Event::Start(Tag::Heading { level: next, .. }),
            ) if next as usize <= level => return ExampleExtraction::NotFound,
            (MarkdownScan::SeekingCodeBlock { level, from }, Event::Start(Tag::CodeBlock(_))) => {
                MarkdownScan::InCodeBlock {
                    level,
                    from,
                    code: String::new(),
                }
            }
            (MarkdownScan::InCodeBlock { level, from, mut code }, Event::Text(part)) => {
                code.push_str(&part);
                MarkdownScan::InCodeBlock { level, from, code }
            }
            (MarkdownScan::InCodeBlock { level, from, code }, Event::End(TagEnd::CodeBlock)) => {
                let code = trim_blank_lines(&code);
                if code.is_empty() {
                    return ExampleExtraction::NotFound;
                }
                MarkdownScan::SeekingSectionEnd { level, from, code }
            }
            (
                MarkdownScan::SeekingSectionEnd { level, from, code },
                Event::Start(Tag::Heading { level: next, .. }),
            ) if next as usize <= level => {
                return ExampleExtraction::Found(Example {
                    code,
                    section: document[from..range.start].to_string(),
                });
            }
            (state, _) => state,
        };
    }

    match state {
        MarkdownScan::SeekingSectionEnd { from, code, .. } => {
            ExampleExtraction::Found(Example {
                code,
                section: document[from..].to_string(),
            })
        }
        _ => ExampleExtraction::NotFound,
    }
}

fn html_headings(document: &str) -> Vec<Heading> {
    HTML_HEADING
        .captures_iter(document)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            Some(Heading {
                level: caps[1].parse().ok()?,
                start: whole.start(),
                end: whole.end(),
                text: normalize_heading(&decode_entities(&TAG.replace_all(&caps[2], ""))),
            })
        })
        .collect()
}

/// Remove highlighting markup from a `<pre>` body. A nested `<pre>` pair is
/// part of the example and stays.
fn clean_html_code(body: &str) -> String {
    let text = MARKUP_TAG.replace_all(body, |caps: &Captures| {
        if caps[1].eq_ignore_ascii_case("pre") {
            caps[0].to_string()
        } else {
            String::new()
        }
    });
    trim_blank_lines(&decode_entities(&text))
}

/// Locate the next `<pre>` block, matching nested `<pre>` pairs so the outer
/// block is returned whole.
fn next_pre_block(document: &str, from: usize) -> Option<CodeBlock> {
    let open = HTML_PRE_OPEN.find_at(document, from)?;
    let lower = document.to_ascii_lowercase();
    let mut depth = 1usize;
    let mut cursor = open.end();

    loop {
        let close = cursor + lower[cursor..].find("</pre")?;
        match find_open_tag(&lower, cursor, "<pre") {
            Some(nested) if nested < close => {
                depth += 1;
                cursor = nested + "<pre".len();
            }
            _ => {
                depth -= 1;
                if depth == 0 {
                    return Some(CodeBlock {
                        start: open.start(),
                        body: open.end()..close,
                    });
                }
                cursor = close + "</pre".len();
            }
        }
    }
}

fn find_open_tag(lower: &str, from: usize, tag: &str) -> Option<usize> {
    let mut cursor = from;
    while let Some(offset) = lower[cursor..].find(tag) {
        let at = cursor + offset;
        let next = lower[at + tag.len()..].chars().next();
        if matches!(next, Some(c) if c == '>' || c == '/' || c.is_whitespace()) {
            return Some(at);
        }
        cursor = at + tag.len();
    }
    None
}

fn normalize_heading(raw: &str) -> String {
    raw.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .trim_matches(|c: char| matches!(c, '*' | '_' | '`' | ':') || c.is_whitespace())
        .to_lowercase()
}

/// Drop leading and trailing whitespace-only lines, keeping inner indentation.
fn trim_blank_lines(code: &str) -> String {
    let lines: Vec<&str> = code.lines().collect();
    let first = lines.iter().position(|l| !l.trim().is_empty());
    let last = lines.iter().rposition(|l| !l.trim().is_empty());
    match (first, last) {
        (Some(first), Some(last)) => lines[first..=last].join("\n"),
        _ => String::new(),
    }
}

/// Decode named and numeric HTML character references.
fn decode_entities(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let tail = &rest[amp..];
        let decoded = tail[1..]
            .find(';')
            .filter(|&end| end > 0 && end <= 10)
            .and_then(|end| decode_entity(&tail[1..=end]).map(|c| (c, end + 2)));
        match decoded {
            Some((ch, consumed)) => {
                out.push(ch);
                rest = &tail[consumed..];
            }
            None => {
                out.push('&');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

fn decode_entity(name: &str) -> Option<char> {
    match name {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        "nbsp" => Some(' '),
        _ => {
            let numeric = name.strip_prefix('#')?;
            let hex = numeric
                .strip_prefix('x')
                .or_else(|| numeric.strip_prefix('X'));
            let code = match hex {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => numeric.parse().ok()?,
            };
            char::from_u32(code)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INSTANCE_PAGE: &str = r#"
      <html>
        <h2>Example Usage</h2>
        <pre>
resource "aws_instance" "example" {
  ami           = "ami-12345"
  instance_type = "t2.micro"
}

resource "aws_security_group" "example" {
  name = "example"
}
        </pre>
      </html>
    "#;

    fn code_of(extraction: ExampleExtraction) -> String {
        match extraction {
            ExampleExtraction::Found(example) => example.code,
            ExampleExtraction::NotFound => panic!("expected an example"),
        }
    }

    #[test]
    fn test_extracts_block_after_heading() {
        let code = code_of(extract_example(INSTANCE_PAGE));
        assert!(code.starts_with("resource \"aws_instance\" \"example\" {"));
        assert!(code.ends_with("  name = \"example\"\n}"));
        assert!(code.contains("aws_security_group"));
    }

    #[test]
    fn test_heading_variations() {
        let page = "<h3 id=\"example-usage\">\n  <a href=\"#x\">Example</a>   USAGE:\n</H3>\
                    <pre><code class=\"language-hcl\">data &quot;aws_ami&quot; &quot;x&quot; {}</code></pre>";
        assert_eq!(code_of(extract_example(page)), "data \"aws_ami\" \"x\" {}");
    }

    #[test]
    fn test_no_heading_is_not_found() {
        let page = "<h2>Argument Reference</h2><pre>ami = \"x\"</pre>";
        assert_eq!(extract_example(page), ExampleExtraction::NotFound);
        assert_eq!(extract_example(""), ExampleExtraction::NotFound);
    }

    #[test]
    fn test_code_block_from_later_section_is_ignored() {
        let page = "<h2>Example Usage</h2><p>Coming soon.</p>\
                    <h2>Import</h2><pre>terraform import aws_instance.web i-123</pre>";
        assert_eq!(extract_example(page), ExampleExtraction::NotFound);
    }

    #[test]
    fn test_lower_level_heading_does_not_end_section() {
        let page = "<h2>Example Usage</h2><h3>Basic</h3><pre>resource \"a_b\" \"c\" {}</pre>\
                    <h2>Arguments</h2>";
        assert_eq!(code_of(extract_example(page)), "resource \"a_b\" \"c\" {}");
    }

    #[test]
    fn test_first_example_heading_wins() {
        let page = "<h2>Example Usage</h2><pre>first</pre>\
                    <h2>Example Usage</h2><pre>second</pre>";
        assert_eq!(code_of(extract_example(page)), "first");
    }

    #[test]
    fn test_nested_pre_kept_verbatim() {
        let page = "<h2>Example Usage</h2><pre>outer\n<pre>inner</pre>\ntail</pre>";
        assert_eq!(
            code_of(extract_example(page)),
            "outer\n<pre>inner</pre>\ntail"
        );
    }

    #[test]
    fn test_markdown_page() {
        let page = "# aws_vpc\n\n## Example Usage\n\n```terraform\n# comment, not a heading\n\
                    resource \"aws_vpc\" \"main\" {\n  cidr_block = \"10.0.0.0/16\"\n}\n```\n\n\
                    ## Argument Reference\n";
        let code = code_of(extract_example(page));
        assert!(code.starts_with("# comment, not a heading"));
        assert!(code.ends_with('}'));
    }

    #[test]
    fn test_markdown_without_block_is_not_found() {
        let page = "## Example Usage\n\nSee the guides.\n\n## Import\n\n```\nterraform import x y\n```\n";
        assert_eq!(extract_example(page), ExampleExtraction::NotFound);
    }

    #[test]
    fn test_markdown_tilde_fence() {
        let page = "## Example Usage\n\n~~~terraform\nresource \"aws_vpc\" \"main\" {}\n~~~\n\n\
                    ## Argument Reference\n";
        assert_eq!(
            code_of(extract_example(page)),
            "resource \"aws_vpc\" \"main\" {}"
        );
    }

    #[test]
    fn test_markdown_setext_heading() {
        let page = "aws_vpc\n=======\n\nExample Usage\n-------------\n\n\
                    ```hcl\nresource \"aws_vpc\" \"main\" {}\n```\n\n\
                    Import\n------\n\nterraform import aws_vpc.main vpc-123\n";
        match extract_example(page) {
            ExampleExtraction::Found(example) => {
                assert_eq!(example.code, "resource \"aws_vpc\" \"main\" {}");
                assert!(!example.section.contains("terraform import"));
            }
            ExampleExtraction::NotFound => panic!("expected an example"),
        }
    }

    #[test]
    fn test_markdown_mentioning_pre_tag() {
        let page = "## Example Usage\n\n```terraform\nresource \"aws_vpc\" \"main\" {}\n```\n\n\
                    ## Notes\n\nUse <pre> tags sparingly.\n";
        assert_eq!(
            code_of(extract_example(page)),
            "resource \"aws_vpc\" \"main\" {}"
        );
    }

    #[test]
    fn test_highlighted_html_block() {
        let page = "<h2>Example Usage</h2><pre><code class=\"language-hcl\">\
                    <span class=\"k\">resource</span> <span class=\"s\">&quot;aws_instance&quot;</span> \
                    <span class=\"s\">&quot;web&quot;</span> {}</code></pre>";
        assert_eq!(
            code_of(extract_example(page)),
            "resource \"aws_instance\" \"web\" {}"
        );
    }

    #[test]
    fn test_html_entities_are_not_markup() {
        let page = "<h2>Example Usage</h2><pre>value = &quot;&lt;b&gt;&quot;</pre>";
        assert_eq!(code_of(extract_example(page)), "value = \"<b>\"");
    }

    #[test]
    fn test_decode_entities() {
        assert_eq!(decode_entities("a &lt;b&gt; &amp; &#39;c&#x27;"), "a <b> & 'c'");
        assert_eq!(decode_entities("AT&T & co;"), "AT&T & co;");
        assert_eq!(decode_entities("&unknown;"), "&unknown;");
    }

    #[test]
    fn test_section_covers_example_region() {
        match extract_example(INSTANCE_PAGE) {
            ExampleExtraction::Found(example) => {
                assert!(example.section.contains("<pre>"));
                assert!(example.section.contains("aws_security_group"));
            }
            ExampleExtraction::NotFound => panic!("expected an example"),
        }
    }
}
