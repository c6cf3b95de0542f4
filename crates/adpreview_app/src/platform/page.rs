use std::fmt::Write;

use adpreview_core::{AppViewModel, Phase, SlotContent, SlotView};

const STYLE: &str = "body { font-family: sans-serif; margin: 24px; }\n\
.status { color: #555; }\n\
#previewContainer { display: flex; flex-wrap: wrap; gap: 16px; }\n\
.ad-preview { border: 1px solid #ddd; padding: 8px; }\n\
.ad-preview iframe { border: 0; display: block; }\n\
.ad-preview .file { font-size: 12px; color: #777; margin: 4px 0 0; }\n\
.pending { color: #999; }\n";

/// Renders the preview container as a standalone page.
///
/// While a batch is still running the page asks the browser to reload itself.
pub(crate) fn render_page(view: &AppViewModel, title: &str, generated_at: &str) -> String {
    let mut html = String::with_capacity(1024);
    let title = escape_html(title);

    html.push_str("<!doctype html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    if view.phase == Phase::Processing {
        html.push_str("<meta http-equiv=\"refresh\" content=\"1\">\n");
    }
    let _ = writeln!(html, "<title>{title}</title>");
    let _ = writeln!(html, "<style>\n{STYLE}</style>\n</head>\n<body>");
    let _ = writeln!(html, "<h1>{title}</h1>");
    let _ = writeln!(html, "<p class=\"status\">{}</p>", escape_html(&status_text(view)));

    html.push_str("<div id=\"previewContainer\">\n");
    for slot in &view.slots {
        render_slot(&mut html, slot);
    }
    html.push_str("</div>\n");

    let _ = writeln!(
        html,
        "<footer class=\"status\">Generated {}</footer>\n</body>\n</html>",
        escape_html(generated_at)
    );
    html
}

pub(crate) fn status_text(view: &AppViewModel) -> String {
    if view.batch == 0 {
        return "No files selected".to_string();
    }
    let phase = match view.phase {
        Phase::Idle => "Done",
        Phase::Processing => "Processing",
    };
    format!(
        "Batch {} | {} | Previews: {} | Errors: {} | Skipped: {}",
        view.batch,
        phase,
        view.frame_count(),
        view.error_count(),
        view.skipped_files
    )
}

fn render_slot(html: &mut String, slot: &SlotView) {
    let file_name = escape_html(&slot.file_name);
    let _ = writeln!(html, "<div class=\"ad-preview\" data-file=\"{file_name}\">");
    match &slot.content {
        SlotContent::Frame {
            html: srcdoc,
            width,
            height,
        } => {
            let _ = writeln!(
                html,
                "<iframe srcdoc=\"{}\" width=\"{width}\" height=\"{height}\"></iframe>",
                escape_html(srcdoc)
            );
            let _ = writeln!(html, "<p class=\"file\">{file_name}</p>");
        }
        SlotContent::Error { message } => {
            let _ = writeln!(html, "<p>{}</p>", escape_html(message));
        }
        SlotContent::Pending => {
            let _ = writeln!(html, "<p class=\"pending\">Loading {file_name}…</p>");
        }
    }
    html.push_str("</div>\n");
}

/// Escapes text for use in element content and double- or single-quoted attributes.
pub(crate) fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
