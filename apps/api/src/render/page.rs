//! Server-rendered HTML for the upload form and its result block.

use std::fmt::Write;

use crate::matching::pipeline::MatchReport;

const STYLE: &str = "body{font-family:sans-serif;max-width:860px;margin:2rem auto;padding:0 1rem}\
textarea{width:100%;min-height:12rem}\
.score{font-size:2rem;font-weight:bold}\
.matched li{color:#2c7a2c}.missing li{color:#b02a2a}\
img{max-width:100%;border:1px solid #ddd}";

/// Renders the page. `report` is `None` for a blank form.
pub fn render_page(job_description: &str, report: Option<&MatchReport>) -> String {
    let mut html = String::with_capacity(4096);

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str("<title>Resume Keyword Matcher</title>\n");
    let _ = writeln!(html, "<style>{STYLE}</style>");
    html.push_str("</head>\n<body>\n<h1>Resume Keyword Matcher</h1>\n");

    html.push_str("<form method=\"post\" action=\"/\" enctype=\"multipart/form-data\">\n");
    html.push_str("<p><label>Resume (PDF or DOCX): <input type=\"file\" name=\"resume\" accept=\".pdf,.docx\" required></label></p>\n");
    let _ = writeln!(
        html,
        "<p><label>Job description:<br><textarea name=\"job_description\" required>{}</textarea></label></p>",
        escape_html(job_description)
    );
    html.push_str("<p><button type=\"submit\">Match</button></p>\n</form>\n");

    if let Some(report) = report {
        render_result(&mut html, report);
    }

    html.push_str("</body>\n</html>\n");
    html
}

fn render_result(html: &mut String, report: &MatchReport) {
    html.push_str("<section class=\"result\">\n<h2>Result</h2>\n");
    let _ = writeln!(
        html,
        "<p>Keyword coverage: <span class=\"score\">{}</span></p>",
        escape_html(&report.score)
    );

    render_list(html, "matched", "Matched keywords", &report.matched);
    render_list(html, "missing", "Missing keywords", &report.missing);

    if let Some(image) = &report.wordcloud_img {
        let _ = writeln!(
            html,
            "<h3>Word cloud</h3>\n<img alt=\"Word cloud of matched keywords\" src=\"data:image/png;base64,{image}\">"
        );
    }
    html.push_str("</section>\n");
}

fn render_list(html: &mut String, class: &str, title: &str, words: &[String]) {
    let _ = writeln!(html, "<h3>{title} ({})</h3>", words.len());
    if words.is_empty() {
        html.push_str("<p>None</p>\n");
        return;
    }

    let _ = write!(html, "<ul class=\"{class}\">");
    for word in words {
        let _ = write!(html, "<li>{}</li>", escape_html(word));
    }
    html.push_str("</ul>\n");
}

fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(matched: &[&str], missing: &[&str], image: Option<&str>) -> MatchReport {
        MatchReport {
            score: "50.00%".to_string(),
            score_value: 50.0,
            matched: matched.iter().map(|s| s.to_string()).collect(),
            missing: missing.iter().map(|s| s.to_string()).collect(),
            keyword_phrases: vec![],
            wordcloud_img: image.map(String::from),
        }
    }

    #[test]
    fn test_blank_form_has_fields_and_no_result() {
        let html = render_page("", None);
        assert!(html.contains("name=\"resume\""));
        assert!(html.contains("name=\"job_description\""));
        assert!(html.contains("enctype=\"multipart/form-data\""));
        assert!(!html.contains("class=\"result\""));
    }

    #[test]
    fn test_result_block_lists_keywords_and_image() {
        let html = render_page("jd", Some(&report(&["python"], &["cloud"], Some("QUJD"))));
        assert!(html.contains("50.00%"));
        assert!(html.contains("<ul class=\"matched\"><li>python</li></ul>"));
        assert!(html.contains("<ul class=\"missing\"><li>cloud</li></ul>"));
        assert!(html.contains("src=\"data:image/png;base64,QUJD\""));
    }

    #[test]
    fn test_no_image_tag_without_wordcloud() {
        let html = render_page("jd", Some(&report(&[], &["cloud"], None)));
        assert!(!html.contains("<img"));
        assert!(html.contains("Matched keywords (0)"));
    }

    #[test]
    fn test_user_text_is_escaped() {
        let html = render_page(
            "<script>alert('x')</script> & more",
            Some(&report(&["<b>"], &[], None)),
        );
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt; &amp; more"));
        assert!(html.contains("<li>&lt;b&gt;</li>"));
    }
}
