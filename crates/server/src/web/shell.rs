use crate::web::html::escape;

const NAV: [(&str, &str); 6] = [
    ("Dashboard", "/"),
    ("Students", "/students"),
    ("Faculty", "/faculty"),
    ("Courses", "/courses"),
    ("Enrollment", "/enrollment"),
    ("Teaching", "/teaching"),
];

const CARDS: [(&str, &str, &str); 5] = [
    ("Students", "/students", "Manage student records and information"),
    ("Faculty", "/faculty", "Manage faculty members and details"),
    ("Courses", "/courses", "Manage course catalog and details"),
    ("Enrollment", "/enrollment", "Manage student course enrollments"),
    ("Teaching", "/teaching", "Manage faculty teaching assignments"),
];

const STYLE: &str = "body{font-family:system-ui,sans-serif;margin:0;background:#f5f6fa;color:#1f2937}\
nav{display:flex;gap:1rem;padding:1rem 2rem;background:#1e3a8a}\
nav a{color:#dbeafe;text-decoration:none}nav a.active{color:#fff;font-weight:700}\
main{max-width:72rem;margin:0 auto;padding:2rem}\
.page-header{display:flex;justify-content:space-between;align-items:center}\
.data-table{width:100%;border-collapse:collapse;background:#fff}\
.data-table th,.data-table td{padding:.75rem 1rem;text-align:left;border-bottom:1px solid #e5e7eb}\
.actions{text-align:right}.inline{display:inline}\
.btn{padding:.4rem .9rem;border-radius:.4rem;border:0;cursor:pointer;text-decoration:none}\
.btn-primary{background:#2563eb;color:#fff}.btn-secondary{background:#e5e7eb;color:#111}\
.btn-edit{color:#2563eb}.btn-delete{color:#dc2626;background:none}\
.modal-backdrop{position:fixed;inset:0;background:rgba(0,0,0,.4);display:flex;align-items:center;justify-content:center}\
.modal{background:#fff;padding:2rem;border-radius:.75rem;min-width:24rem}\
.field{display:flex;flex-direction:column;margin-bottom:1rem}\
.toast{padding:.75rem 1rem;border-radius:.4rem;margin-bottom:.5rem}\
.toast-success{background:#dcfce7}.toast-error{background:#fee2e2}\
.table-empty,.table-loading{text-align:center;padding:4rem;background:#fff}\
.cards{display:grid;grid-template-columns:repeat(auto-fill,minmax(16rem,1fr));gap:1.5rem}\
.card{background:#fff;padding:1.5rem;border-radius:.75rem;color:inherit;text-decoration:none}";

/// Wraps page content in the document, navbar and stylesheet
pub fn layout(title: &str, active: &str, body: &str) -> String {
    let links: String = NAV
        .iter()
        .map(|(name, href)| {
            let class = if *href == active { r#" class="active""# } else { "" };
            format!(r#"<a href="{href}"{class}>{name}</a>"#)
        })
        .collect();

    format!(
        r#"<!DOCTYPE html><html lang="en"><head><meta charset="utf-8"><meta name="viewport" content="width=device-width, initial-scale=1"><title>{title} | College Management System</title><style>{STYLE}</style></head><body><nav>{links}</nav><main>{body}</main></body></html>"#,
        title = escape(title),
    )
}

pub fn dashboard() -> String {
    let cards: String = CARDS
        .iter()
        .map(|(name, href, blurb)| {
            format!(r#"<a class="card" href="{href}"><h2>{name}</h2><p>{blurb}</p></a>"#)
        })
        .collect();

    format!(
        r#"<h1>Welcome to College Management System</h1><p>A comprehensive database management system for university records</p><div class="cards">{cards}</div>"#
    )
}
