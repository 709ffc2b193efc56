//! HTML helpers for Polarion rich text fields
//!
//! Polarion renders descriptions, steps and custom fields as HTML, so free text
//! has to be escaped and line breaks turned into `<br>` before it is placed in
//! the importer XML.

use crate::models::testcase::Step;
use quick_xml::escape::escape;

const TABLE_STYLE: &str = "margin: auto; empty-cells: hide; border-collapse: collapse; border: 1px solid #CCCCCC; width: 100%;";
const HEADER_STYLE: &str = "text-align: left; vertical-align: top; font-weight: bold; background-color: #F0F0F0; border: 1px solid #CCCCCC; padding: 4px;";
const CELL_STYLE: &str =
    "text-align: left; vertical-align: top; border: 1px solid #CCCCCC; padding: 4px;";

/// Escape HTML special characters and turn newlines into `<br>`
///
/// ```rust
/// use fmf_exporter::export::html::html_text;
///
/// assert_eq!(html_text("a < b\nc"), "a &lt; b<br>c");
/// ```
pub fn html_text(text: &str) -> String {
    escape(text).replace('\n', "<br>")
}

/// Two-column (step / expected result) HTML table, `""` when there are no steps
pub fn steps_table(steps: &[Step]) -> String {
    if steps.is_empty() {
        return String::new();
    }

    let mut html = format!(
        "<table style=\"{}\"><tbody><tr><th style=\"{}\">Step</th><th style=\"{}\">Expected Result</th></tr>",
        TABLE_STYLE, HEADER_STYLE, HEADER_STYLE
    );
    for step in steps {
        html.push_str(&format!(
            "<tr><td style=\"{}\">{}</td><td style=\"{}\">{}</td></tr>",
            CELL_STYLE,
            html_text(&step.step),
            CELL_STYLE,
            html_text(&step.expected)
        ));
    }
    html.push_str("</tbody></table>");
    html
}
