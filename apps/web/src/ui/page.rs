//! Server-rendered HTML for the single-page form.

use html_escape::{encode_double_quoted_attribute, encode_text};

use crate::intake::inputs::{
    FIELD_CLIENT_LOGO, FIELD_DISASTER_ARTICLE, FIELD_DOCUMENT, FIELD_YEARLY_BUDGET,
};

pub const TITLE: &str = "Proposal Writer App";
pub const SIDEBAR_LABEL: &str = "Proposal Writer App using Llama 3.1 and Groq API";
pub const LOGO_DISPLAY_WIDTH_PX: u32 = 200;

/// What to show under the input form.
#[derive(Debug)]
pub enum PageBody<'a> {
    Empty,
    Warning(&'a str),
    Error(&'a str),
    Extracted {
        lines: &'a [String],
        session: &'a str,
    },
    Proposal {
        lines: &'a [String],
        proposal: &'a str,
        logo_url: &'a str,
    },
}

const STYLE: &str = "
body { margin: 0; font-family: sans-serif; display: flex; min-height: 100vh; }
aside { width: 16rem; padding: 1.5rem; background: #f0f2f6; }
main { flex: 1; padding: 1.5rem 3rem; max-width: 48rem; }
label { display: block; margin-top: 1rem; font-weight: 600; }
textarea { width: 100%; height: 200px; }
.warning { padding: 0.75rem; background: #fffce7; border-left: 4px solid #ffbd45; }
.error { padding: 0.75rem; background: #ffecec; border-left: 4px solid #ff4b4b; white-space: pre-wrap; }
.proposal { white-space: pre-wrap; }
#spinner { display: none; }
";

pub fn render_page(body: &PageBody<'_>) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{title}</title>\n<style>{STYLE}</style>\n</head>\n<body>\n\
         <aside><p>{sidebar}</p></aside>\n<main>\n<h1>{title}</h1>\n{form}\n{body}\n</main>\n\
         </body>\n</html>\n",
        title = encode_text(TITLE),
        sidebar = encode_text(SIDEBAR_LABEL),
        form = render_input_form(),
        body = render_body(body),
    )
}

fn render_input_form() -> String {
    format!(
        r#"<form method="post" action="/submit" enctype="multipart/form-data">
<label for="{FIELD_DOCUMENT}">Upload a PDF document</label>
<input type="file" id="{FIELD_DOCUMENT}" name="{FIELD_DOCUMENT}" accept=".pdf,application/pdf">
<label for="{FIELD_DISASTER_ARTICLE}">Enter article about the disaster</label>
<textarea id="{FIELD_DISASTER_ARTICLE}" name="{FIELD_DISASTER_ARTICLE}"></textarea>
<label for="{FIELD_CLIENT_LOGO}">Upload client logo</label>
<input type="file" id="{FIELD_CLIENT_LOGO}" name="{FIELD_CLIENT_LOGO}" accept=".png,.jpg,.jpeg,image/png,image/jpeg">
<label for="{FIELD_YEARLY_BUDGET}">Enter yearly budget</label>
<input type="number" id="{FIELD_YEARLY_BUDGET}" name="{FIELD_YEARLY_BUDGET}" min="0" step="1000" value="0">
<p><button type="submit">Submit</button></p>
</form>"#
    )
}

fn render_body(body: &PageBody<'_>) -> String {
    match body {
        PageBody::Empty => String::new(),
        PageBody::Warning(message) => {
            format!("<div class=\"warning\">{}</div>", encode_text(message))
        }
        PageBody::Error(message) => {
            format!("<div class=\"error\">{}</div>", encode_text(message))
        }
        PageBody::Extracted { lines, session } => {
            format!(
                "{}\n{}",
                render_extracted(lines),
                render_generate_form(session)
            )
        }
        PageBody::Proposal {
            lines,
            proposal,
            logo_url,
        } => format!(
            "{}\n<h2>Generated Proposal</h2>\n<div class=\"proposal\">{}</div>\n\
             <figure><img src=\"{}\" width=\"{LOGO_DISPLAY_WIDTH_PX}\" alt=\"Client Logo\">\
             <figcaption>Client Logo</figcaption></figure>",
            render_extracted(lines),
            encode_text(proposal),
            encode_double_quoted_attribute(logo_url),
        ),
    }
}

fn render_extracted(lines: &[String]) -> String {
    let rows: String = lines
        .iter()
        .map(|line| format!("<p class=\"field\">{}</p>\n", encode_text(line)))
        .collect();
    format!("<h2>Extracted Information</h2>\n{rows}")
}

fn render_generate_form(session: &str) -> String {
    format!(
        r#"<form method="post" action="/generate" onsubmit="document.getElementById('spinner').style.display='block'">
<input type="hidden" name="session" value="{}">
<p><button type="submit">Generate Proposal</button></p>
<p id="spinner">Generating proposal...</p>
</form>"#,
        encode_double_quoted_attribute(session)
    )
}
