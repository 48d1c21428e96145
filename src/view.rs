//! HTML views rendered from entity descriptors. Plain escaped string building;
//! handlers consume these as a black-box `render` service.

use crate::entity::EntityDef;
use crate::forms::{FormErrors, FormValues};
use crate::store::Record;

/// Escape text for HTML element and attribute positions.
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
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

const STYLE: &str = "body{font-family:sans-serif;margin:2rem auto;max-width:48rem;padding:0 1rem}\
table{border-collapse:collapse;width:100%}th,td{border:1px solid #ccc;padding:.4rem .6rem;text-align:left}\
.field-error{color:#b00020;margin:.2rem 0}label{display:block;margin-top:.8rem}\
input[type=text]{width:100%;padding:.3rem}.actions{margin-top:1rem}";

fn layout(title: &str, body: &str) -> String {
    format!(
        "<!doctype html>\n<html><head><meta charset=\"utf-8\"><title>{}</title>\
         <style>{}</style></head>\n<body>\n{}\n</body></html>\n",
        escape(title),
        STYLE,
        body
    )
}

fn record_label(entity: &EntityDef, record: &Record) -> String {
    escape(record.value(entity.label_field().name))
}

/// Collection view: one table row per record, with view/edit/delete links.
pub fn list_page(entity: &EntityDef, records: &[Record]) -> String {
    let mut body = format!(
        "<h1>{}</h1>\n<p><a href=\"/new\">New {}</a></p>\n",
        escape(entity.plural),
        escape(entity.name)
    );
    if records.is_empty() {
        body.push_str("<p class=\"empty\">No records.</p>\n");
        return layout(entity.plural, &body);
    }
    body.push_str("<table>\n<tr><th>Id</th>");
    for f in entity.fields {
        body.push_str(&format!("<th>{}</th>", escape(f.label)));
    }
    body.push_str("<th></th></tr>\n");
    for r in records {
        body.push_str(&format!("<tr><td>{}</td>", r.id));
        for f in entity.fields {
            body.push_str(&format!("<td>{}</td>", escape(r.value(f.name))));
        }
        body.push_str(&format!(
            "<td><a href=\"/view/{id}\">View</a> <a href=\"/edit/{id}\">Edit</a> \
             <a href=\"/delete/{id}\">Delete</a></td></tr>\n",
            id = r.id
        ));
    }
    body.push_str("</table>\n");
    layout(entity.plural, &body)
}

/// Single-record view.
pub fn detail_page(entity: &EntityDef, record: &Record) -> String {
    let mut body = format!(
        "<h1>{}: {}</h1>\n<dl>\n<dt>Id</dt><dd>{}</dd>\n",
        escape(entity.name),
        record_label(entity, record),
        record.id
    );
    for f in entity.fields {
        body.push_str(&format!(
            "<dt>{}</dt><dd>{}</dd>\n",
            escape(f.label),
            escape(record.value(f.name))
        ));
    }
    body.push_str(&format!(
        "</dl>\n<p class=\"actions\"><a href=\"/edit/{}\">Edit</a> <a href=\"/\">Back to list</a></p>\n",
        record.id
    ));
    layout(entity.name, &body)
}

/// Create/edit form. `values` prefills inputs; `errors` renders per-field
/// messages under the offending inputs.
pub fn form_page(
    entity: &EntityDef,
    action: &str,
    title: &str,
    values: &FormValues,
    errors: &FormErrors,
) -> String {
    let mut body = format!(
        "<h1>{}</h1>\n<form method=\"post\" action=\"{}\">\n",
        escape(title),
        escape(action)
    );
    for f in entity.fields {
        let value = values.get(f.name).map(String::as_str).unwrap_or("");
        body.push_str(&format!(
            "<label for=\"{name}\">{label}</label>\
             <input type=\"text\" id=\"{name}\" name=\"{name}\" value=\"{value}\">\n",
            name = escape(f.name),
            label = escape(f.label),
            value = escape(value)
        ));
        if let Some(msg) = errors.get(f.name) {
            body.push_str(&format!("<p class=\"field-error\">{}</p>\n", escape(msg)));
        }
    }
    body.push_str(
        "<p class=\"actions\"><button type=\"submit\">Save</button> <a href=\"/\">Cancel</a></p>\n</form>\n",
    );
    layout(title, &body)
}

/// Delete confirmation step: the destructive action only happens on POST.
pub fn confirm_delete_page(entity: &EntityDef, record: &Record) -> String {
    let title = format!("Delete {}", entity.name);
    let body = format!(
        "<h1>{}</h1>\n<p>Are you sure you want to delete \"{}\"?</p>\n\
         <form method=\"post\" action=\"/delete/{}\">\n\
         <p class=\"actions\"><button type=\"submit\">Delete</button> <a href=\"/\">Cancel</a></p>\n</form>\n",
        escape(&title),
        record_label(entity, record),
        record.id
    );
    layout(&title, &body)
}

/// Minimal error page for 4xx/5xx responses.
pub fn error_page(title: &str, message: &str) -> String {
    let body = format!(
        "<h1>{}</h1>\n<p>{}</p>\n<p><a href=\"/\">Back to list</a></p>\n",
        escape(title),
        escape(message)
    );
    layout(title, &body)
}
