use std::fmt::Write as _;

use nutrition_advisor_core::domain::{
    analysis::renderer::escape_text,
    image::value_objects::ImageMimeType,
    session::value_objects::{SessionStatus, SessionView},
};

use crate::args::Args;

/// Seconds between reloads while an analysis is pending
pub const REFRESH_INTERVAL_SECS: u32 = 2;

const STYLE: &str = r#"
*{box-sizing:border-box}
body{margin:0;font-family:system-ui,-apple-system,"Segoe UI",Roboto,sans-serif;color:#374151;background:#fff}
main{min-height:100vh;padding:1rem 1.25rem 2.5rem}
h1{font-size:2.25rem;font-weight:700;margin:1.5rem 0 0}
header{margin:0 0 1.5rem}
header .home{display:inline-block;font-size:.875rem;color:#374151;text-decoration:none;border:2px dashed rgba(3,7,18,.25);border-radius:.375rem;padding:.25rem .75rem}
.intro{text-align:center}
.intro .example a{color:#3b82f6;font-size:.875rem;text-decoration:none}
.intro .example a:hover{font-weight:700}
.intro p{max-width:24rem;margin:.75rem auto 0}
.stage{display:flex;justify-content:center;margin-top:2.5rem}
.dropzone{display:flex;flex-direction:column;align-items:center;justify-content:center;width:100%;max-width:32rem;height:16rem;border:2px dashed #d1d5db;border-radius:.5rem;background:#f9fafb;cursor:pointer;position:relative}
.dropzone:hover{background:#f3f4f6}
.dropzone input{position:absolute;inset:0;opacity:0;cursor:pointer}
.dropzone svg{width:2rem;height:2rem;margin-bottom:1rem;color:#6b7280}
.dropzone .hint{font-size:.875rem;color:#6b7280;margin:0 0 .5rem}
.dropzone .types{font-size:.75rem;color:#6b7280;margin:0}
.preview{display:flex;flex-direction:column;align-items:flex-end}
.preview img{max-width:42rem;width:100%;height:auto;object-fit:contain}
.reset{margin-top:.5rem;color:#fff;background:#1f2937;border:0;border-radius:.5rem;padding:.625rem 1.25rem;font-size:.875rem;font-weight:500;cursor:pointer}
.reset:hover{background:#111827}
.spinner{display:flex;justify-content:center;margin:4rem 0}
.spinner div{width:2rem;height:2rem;border:4px solid currentColor;border-right-color:transparent;border-radius:50%;animation:spin 1s linear infinite}
@keyframes spin{to{transform:rotate(360deg)}}
.sr-only{position:absolute;width:1px;height:1px;overflow:hidden;clip:rect(0,0,0,0)}
.result{max-width:42rem;margin:2.5rem auto 0}
.result table{border-collapse:collapse}
.result th,.result td{border:1px solid #e5e7eb;padding:.25rem .5rem}
.notice{max-width:42rem;margin:1.5rem auto 0;padding:.75rem 1rem;border-radius:.5rem;background:#fef2f2;color:#991b1b}
"#;

const UPLOAD_ICON: &str = r#"<svg aria-hidden="true" xmlns="http://www.w3.org/2000/svg" fill="none" viewBox="0 0 20 16"><path stroke="currentColor" stroke-linecap="round" stroke-linejoin="round" stroke-width="2" d="M13 13h3a3 3 0 0 0 0-6h-.025A5.56 5.56 0 0 0 16 6.5 5.5 5.5 0 0 0 5.207 5.021C5.137 5.017 5.071 5 5 5a4 4 0 0 0 0 8h2.167M10 15V6m0 0L8 8m2-2 2 2"/></svg>"#;

/// Settings shared by every render of the page
#[derive(Debug, Clone, Copy, Default)]
pub struct PageLayout<'a> {
    pub root_path: &'a str,
    pub home_url: Option<&'a str>,
    pub example_url: Option<&'a str>,
}

impl<'a> PageLayout<'a> {
    pub fn from_args(args: &'a Args) -> Self {
        let non_empty = |url: &'a str| Some(url.trim()).filter(|url| !url.is_empty());

        Self {
            root_path: &args.server.root_path,
            home_url: non_empty(&args.page.home_url),
            example_url: non_empty(&args.page.example_url),
        }
    }
}

/// `https://dhavalcode.com/` is shown as `dhavalcode.com`
fn link_label(url: &str) -> &str {
    let without_scheme = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
        .or_else(|| url.strip_prefix("//"))
        .unwrap_or(url);

    without_scheme.trim_end_matches('/')
}

/// Renders the whole page for one session. `notice` is shown above the
/// result, e.g. when an upload was rejected.
pub fn render_page(view: &SessionView, layout: &PageLayout<'_>, notice: Option<&str>) -> String {
    let root_path = layout.root_path;
    let mut html = String::with_capacity(4096 + view.preview.as_ref().map_or(0, String::len));

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    if view.is_pending {
        let _ = writeln!(
            html,
            "<meta http-equiv=\"refresh\" content=\"{}\">",
            REFRESH_INTERVAL_SECS
        );
    }
    html.push_str("<title>Nutrition Advisor</title>\n<style>");
    html.push_str(STYLE);
    html.push_str("</style>\n</head>\n<body>\n<main>\n");

    if let Some(home_url) = layout.home_url {
        let _ = writeln!(
            html,
            "<header><a class=\"home\" href=\"{}\" target=\"_blank\" rel=\"noopener\">{}</a></header>",
            escape_text(home_url),
            escape_text(link_label(home_url))
        );
    }

    html.push_str(
        "<div class=\"intro\">\n<h1>Nutrition Advisor</h1>\n\
         <p>Upload a clear food image to receive expert nutritional analysis.</p>\n",
    );
    if let Some(example_url) = layout.example_url {
        let _ = writeln!(
            html,
            "<p class=\"example\">See the <a href=\"{}\" target=\"_blank\" rel=\"noopener\">Example</a></p>",
            escape_text(example_url)
        );
    }
    html.push_str("</div>\n");

    html.push_str("<div class=\"stage\">\n");
    match &view.preview {
        Some(preview) => render_preview(&mut html, view, preview, root_path),
        None => render_dropzone(&mut html, root_path),
    }
    html.push_str("</div>\n");

    if let Some(notice) = notice {
        let _ = writeln!(
            html,
            "<div class=\"notice\" role=\"alert\">{}</div>",
            escape_text(notice)
        );
    }

    if view.status == SessionStatus::Failed {
        let _ = writeln!(
            html,
            "<div class=\"notice\" role=\"alert\">We could not analyze this photo. {}</div>",
            escape_text(view.error.as_deref().unwrap_or_default())
        );
    }

    if view.is_pending {
        html.push_str(
            "<div class=\"spinner\" role=\"status\"><div></div>\
             <span class=\"sr-only\">Loading...</span></div>\n",
        );
    }

    if let Some(result_html) = &view.result_html {
        let _ = writeln!(html, "<article class=\"result\">\n{}</article>", result_html);
    }

    html.push_str("</main>\n</body>\n</html>\n");
    html
}

fn render_dropzone(html: &mut String, root_path: &str) {
    let _ = write!(
        html,
        "<form class=\"dropzone\" method=\"post\" action=\"{root}/upload\" enctype=\"multipart/form-data\">\n\
         {icon}\n\
         <p class=\"hint\"><strong>Click to upload</strong> or drag and drop</p>\n\
         <p class=\"types\">PNG or JPG</p>\n\
         <input type=\"file\" name=\"image\" accept=\"{accept}\" aria-label=\"Food photo\" onchange=\"this.form.submit()\">\n\
         <noscript><button type=\"submit\">Analyze</button></noscript>\n\
         </form>\n",
        root = escape_text(root_path),
        icon = UPLOAD_ICON,
        accept = ImageMimeType::accept_attribute(),
    );
}

fn render_preview(html: &mut String, view: &SessionView, preview: &str, root_path: &str) {
    html.push_str("<div class=\"preview\">\n");
    let _ = writeln!(
        html,
        "<img src=\"{}\" width=\"320\" height=\"320\" alt=\"preview\">",
        escape_text(preview)
    );

    if view.can_reset {
        let _ = writeln!(
            html,
            "<form method=\"post\" action=\"{}/reset\"><button type=\"submit\" class=\"reset\">Reset</button></form>",
            escape_text(root_path)
        );
    }
    html.push_str("</div>\n");
}
