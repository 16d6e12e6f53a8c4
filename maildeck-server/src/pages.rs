//! Minimal functional HTML for the catalog surfaces. Styling is
//! intentionally thin; the catalog engine, not the chrome, is the product.

use maildeck_model::{
    ArtifactItem, ArtifactMetadata, ArtifactSlug, FilterCriteria, RouteClass,
    StatusFilter, ViewMode,
};
use url::form_urlencoded;

use crate::handlers::catalog::ListingParams;
use crate::infra::app_state::AppState;

fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

fn query_string<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for (name, value) in pairs {
        serializer.append_pair(name, value);
    }
    serializer.finish()
}

const STYLE: &str = "\
body{font-family:system-ui,sans-serif;margin:0;background:#f8fafc;color:#0f172a}\
a{color:inherit}\
.bar{position:sticky;top:0;background:#fff;border-bottom:1px solid #e5e7eb;\
padding:10px 16px;display:flex;gap:10px;align-items:center;flex-wrap:wrap;z-index:10}\
.muted{color:#64748b;font-size:12px}\
.pill{border:1px solid #e5e7eb;border-radius:999px;padding:6px 10px;\
text-decoration:none;font-size:12px;font-weight:700;background:#fff;cursor:pointer}\
.pill.active{border-color:#dc146e;box-shadow:0 0 0 3px rgba(220,20,110,.18)}\
.card{background:#fff;border:1px solid #e5e7eb;border-radius:14px;padding:14px;\
display:grid;gap:10px;margin:12px 16px}\
.badge{display:inline-flex;padding:4px 10px;border-radius:999px;font-size:12px;\
font-weight:700;text-transform:uppercase;border:1px solid #e2e8f0;background:#f1f5f9}\
.badge.approved{background:rgba(34,197,94,.1);border-color:rgba(34,197,94,.35);color:#14532d}\
.badge.sent{background:rgba(59,130,246,.1);border-color:rgba(59,130,246,.35);color:#1e3a8a}\
.row{display:flex;gap:8px;align-items:center;flex-wrap:wrap}\
.frame{border:1px solid #e5e7eb;border-radius:14px;overflow:hidden;background:#fff}\
.frame iframe{display:block;border:0;width:100%;background:#fff}\
.panes{display:flex;gap:16px;justify-content:center;align-items:flex-start;\
flex-wrap:wrap;padding:16px}\
.warn{color:#b45309;font-size:12px;font-weight:700}\
";

fn page(title: &str, body_attrs: &str, body: &str) -> String {
    format!(
        "<!doctype html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
<title>{}</title>\n<style>{}</style>\n</head>\n<body{}>\n{}\n</body>\n</html>\n",
        escape(title),
        STYLE,
        body_attrs,
        body
    )
}

/// Public landing surface; also where denied catalog requests land.
pub fn landing() -> String {
    let body = "\
<main style=\"max-width:720px;margin:0 auto;padding:64px 24px\">\n\
<span class=\"pill\">Maildeck &middot; Email previews</span>\n\
<h1 style=\"margin-top:24px\">Rendered email artifacts, reviewed and shared in one place</h1>\n\
<p class=\"muted\" style=\"font-size:14px\">Browse the internal catalog, tag artifacts per project\n\
and status, and hand clients a direct preview link when a template is ready.</p>\n\
<p><a class=\"pill\" href=\"/preview\">Open the catalog</a></p>\n\
</main>";
    page("Maildeck", "", body)
}

fn status_badge(item: &ArtifactItem) -> String {
    let status = item.effective_status();
    format!("<span class=\"badge {status}\">{status}</span>")
}

fn card(state: &AppState, params: &ListingParams, item: &ArtifactItem) -> String {
    let slug = &item.slug;
    let title = escape(item.effective_title());
    let project = escape(item.effective_project());
    let created = escape(item.created_at().unwrap_or("not set"));
    let key = params.key.as_deref().unwrap_or_default();

    let internal_href = if key.is_empty() {
        format!("/preview/{slug}")
    } else {
        format!("/preview/{slug}?{}", query_string([("key", key)]))
    };

    let mut body = format!(
        "<div class=\"card\">\n<div class=\"row\">\n<strong>{title}</strong>\n{}\n\
<span class=\"muted\">project: <b>{project}</b></span>\n\
<span class=\"muted\">created: <b>{created}</b></span>\n\
<span class=\"muted\" style=\"margin-left:auto\">{}</span>\n</div>\n<div class=\"row\">\n\
<a class=\"pill\" href=\"{internal_href}\">Open</a>\n",
        status_badge(item),
        escape(&item.asset_path),
    );

    if item.client_visible() {
        let public_path = format!("/p/{slug}");
        let copy_target = state
            .share_url(&public_path)
            .unwrap_or_else(|| public_path.clone());
        body.push_str(&format!(
            "<a class=\"pill\" href=\"{public_path}\">Open (Public)</a>\n\
<a class=\"pill\" href=\"{public_path}?view=desktop\">Desktop</a>\n\
<a class=\"pill\" href=\"{public_path}?view=mobile\">Mobile</a>\n\
<button class=\"pill\" data-copy=\"{}\">Copy link</button>\n",
            escape(&copy_target),
        ));
    } else {
        body.push_str(
            "<span class=\"muted\">public links hidden (client: no)</span>\n",
        );
    }

    if !item.is_managed() {
        body.push_str("<span class=\"warn\">meta missing</span>\n");
    }

    if state.config.local_meta_tools {
        body.push_str(&quick_publish(slug, item.metadata.as_ref()));
    }

    body.push_str("</div>\n</div>");
    body
}

/// Inline status/client editor, rendered only when local meta tools are on.
fn quick_publish(slug: &ArtifactSlug, meta: Option<&ArtifactMetadata>) -> String {
    let status = meta.map(|m| m.status.as_str()).unwrap_or("draft");
    let checked = meta
        .map(|m| m.can_show_client)
        .unwrap_or(false)
        .then_some(" checked")
        .unwrap_or("");
    let options: String = ["draft", "approved", "sent"]
        .iter()
        .map(|value| {
            let selected = if *value == status { " selected" } else { "" };
            format!("<option value=\"{value}\"{selected}>{value}</option>")
        })
        .collect();
    format!(
        "</div>\n<div class=\"row\" data-quick=\"{slug}\">\n\
<span class=\"muted\"><b>quick:</b></span>\n\
<select class=\"pill\" name=\"status\">{options}</select>\n\
<label class=\"muted\"><input type=\"checkbox\" name=\"client\"{checked}> client</label>\n\
<button class=\"pill\" data-save>Save</button>\n<span class=\"muted\" data-result></span>\n"
    )
}

const LISTING_SCRIPT: &str = "\
document.querySelectorAll('[data-copy]').forEach(function (el) {\n\
  el.addEventListener('click', function () {\n\
    navigator.clipboard.writeText(el.dataset.copy);\n\
    el.textContent = 'Copied';\n\
  });\n\
});\n\
document.querySelectorAll('[data-quick]').forEach(function (row) {\n\
  var save = row.querySelector('[data-save]');\n\
  save.addEventListener('click', function () {\n\
    var payload = {\n\
      slug: row.dataset.quick,\n\
      meta: {\n\
        status: row.querySelector('[name=status]').value,\n\
        can_show_client: row.querySelector('[name=client]').checked\n\
      }\n\
    };\n\
    fetch('/api/meta/write', {\n\
      method: 'POST',\n\
      headers: { 'Content-Type': 'application/json' },\n\
      body: JSON.stringify(payload)\n\
    }).then(function (res) {\n\
      if (res.ok) { location.reload(); return; }\n\
      return res.json().then(function (body) {\n\
        row.querySelector('[data-result]').textContent =\n\
          (body && body.error && body.error.message) || ('HTTP ' + res.status);\n\
      });\n\
    });\n\
  });\n\
});\n";

/// Internal catalog listing page.
pub fn listing(
    state: &AppState,
    params: &ListingParams,
    criteria: &FilterCriteria,
    items: &[ArtifactItem],
    projects: &[String],
) -> String {
    let key = params.key.as_deref().unwrap_or_default();
    let active_status = criteria.status;
    let active_project = criteria.project.as_str();
    let client_flag = if criteria.client_only { "1" } else { "0" };
    let sort = params.sort.as_deref().unwrap_or_default();
    let q = params.q.as_deref().unwrap_or_default();

    let listing_qs = |status: StatusFilter, client: &str, project: &str| {
        let mut pairs: Vec<(&str, &str)> = Vec::new();
        if !key.is_empty() {
            pairs.push(("key", key));
        }
        pairs.push(("status", status.as_str()));
        pairs.push(("client", client));
        if project != "all" {
            pairs.push(("project", project));
        }
        if !sort.is_empty() {
            pairs.push(("sort", sort));
        }
        if !q.is_empty() {
            pairs.push(("q", q));
        }
        query_string(pairs)
    };

    let status_pills: String = StatusFilter::all_variants()
        .iter()
        .map(|status| {
            let active = if *status == active_status { " active" } else { "" };
            format!(
                "<a class=\"pill{active}\" href=\"/preview?{}\">{}</a>\n",
                listing_qs(*status, client_flag, active_project),
                status.as_str().to_uppercase(),
            )
        })
        .collect();

    let client_toggle = format!(
        "<a class=\"pill{}\" href=\"/preview?{}\">CLIENT ONLY: {}</a>\n",
        if criteria.client_only { " active" } else { "" },
        listing_qs(
            active_status,
            if criteria.client_only { "0" } else { "1" },
            active_project,
        ),
        if criteria.client_only { "ON" } else { "OFF" },
    );

    let project_options: String = std::iter::once("all")
        .chain(projects.iter().map(String::as_str))
        .map(|project| {
            let selected = if project == active_project { " selected" } else { "" };
            let label = if project == "all" {
                "ALL projects".to_string()
            } else {
                escape(project)
            };
            format!(
                "<option value=\"{}\"{selected}>{label}</option>",
                escape(project),
            )
        })
        .collect();

    // Search, sort and project selection submit back through the same GET
    // surface, so every view of the catalog is a plain shareable URL.
    let form = format!(
        "<form class=\"row\" method=\"get\" action=\"/preview\">\n\
<input type=\"hidden\" name=\"key\" value=\"{}\">\n\
<input type=\"hidden\" name=\"status\" value=\"{}\">\n\
<input type=\"hidden\" name=\"client\" value=\"{client_flag}\">\n\
<input class=\"pill\" type=\"search\" name=\"q\" value=\"{}\" placeholder=\"search: slug / title / project\">\n\
<select class=\"pill\" name=\"project\">{project_options}</select>\n\
<select class=\"pill\" name=\"sort\">\n\
<option value=\"\">default order</option>\n\
<option value=\"created_desc\"{}>created &darr; (new first)</option>\n\
<option value=\"created_asc\"{}>created &uarr; (old first)</option>\n\
<option value=\"title_asc\"{}>title A&rarr;Z</option>\n\
<option value=\"slug_asc\"{}>slug A&rarr;Z</option>\n\
</select>\n<button class=\"pill\">Apply</button>\n</form>",
        escape(key),
        active_status.as_str(),
        escape(q),
        if sort == "created_desc" { " selected" } else { "" },
        if sort == "created_asc" { " selected" } else { "" },
        if sort == "title_asc" { " selected" } else { "" },
        if sort == "slug_asc" { " selected" } else { "" },
    );

    let cards: String = if items.is_empty() {
        "<div class=\"card muted\">Nothing matches the current filters.</div>".to_string()
    } else {
        items.iter().map(|item| card(state, params, item)).collect()
    };

    let body = format!(
        "<div class=\"bar\">\n<strong>Maildeck &middot; Previews</strong>\n\
<span class=\"muted\">artifacts: {}</span>\n{form}\n\
<div class=\"row\">{status_pills}{client_toggle}</div>\n\
<span class=\"muted\" style=\"margin-left:auto\">key: <code>{}</code></span>\n</div>\n\
{cards}\n<script>{LISTING_SCRIPT}</script>",
        items.len(),
        if key.is_empty() { "no" } else { "yes" },
    );
    page("Maildeck · Previews", "", &body)
}

const VIEWER_SCRIPT: &str = "\
(function () {\n\
  var BREAKPOINT = 768;\n\
  var narrow = function () { return window.innerWidth < BREAKPOINT; };\n\
  var coerce = function (mode) {\n\
    return mode === 'all' && narrow() ? 'mobile' : mode;\n\
  };\n\
  var current = document.body.dataset.initialMode;\n\
  var apply = function (mode) {\n\
    mode = coerce(mode);\n\
    current = mode;\n\
    document.querySelectorAll('[data-pane]').forEach(function (el) {\n\
      el.style.display =\n\
        mode === 'all' || el.dataset.pane === mode ? '' : 'none';\n\
    });\n\
    document.querySelectorAll('[data-mode]').forEach(function (el) {\n\
      el.classList.toggle('active', el.dataset.mode === mode);\n\
    });\n\
    var params = new URLSearchParams(location.search);\n\
    params.set('view', mode);\n\
    history.replaceState(null, '', location.pathname + '?' + params.toString());\n\
  };\n\
  document.querySelectorAll('[data-mode]').forEach(function (el) {\n\
    el.addEventListener('click', function () { apply(el.dataset.mode); });\n\
  });\n\
  window.addEventListener('resize', function () { apply(current); });\n\
  apply(current);\n\
})();\n";

fn pane(slug: &ArtifactSlug, mode: ViewMode, width: u32) -> String {
    format!(
        "<div data-pane=\"{}\">\n\
<div class=\"muted\" style=\"padding:4px 2px\">{} ({width}px)</div>\n\
<div class=\"frame\" style=\"width:{width}px;max-width:100%\">\n\
<iframe title=\"email preview\" src=\"/emails/{slug}.html\" height=\"{}\"\n\
 sandbox=\"allow-same-origin allow-popups allow-popups-to-escape-sandbox\"\n\
 referrerpolicy=\"no-referrer-when-downgrade\" loading=\"lazy\"></iframe>\n</div>\n</div>",
        mode.as_str(),
        mode.label(),
        ViewMode::FRAME_HEIGHT,
    )
}

/// Artifact viewer page, shared by the internal and public routes.
pub fn viewer(
    slug: &ArtifactSlug,
    mode: ViewMode,
    route: RouteClass,
    meta: Option<&ArtifactMetadata>,
) -> String {
    let title = meta.map(|m| m.title.as_str()).unwrap_or_else(|| slug.as_str());

    let pills: String = ViewMode::all()
        .iter()
        .map(|candidate| {
            let active = if *candidate == mode { " active" } else { "" };
            format!(
                "<button class=\"pill{active}\" data-mode=\"{}\">{}</button>\n",
                candidate.as_str(),
                candidate.label(),
            )
        })
        .collect();

    let badge = match route {
        RouteClass::Internal => "",
        RouteClass::Public => "<span class=\"badge\">shared preview</span>\n",
    };

    let body = format!(
        "<div class=\"bar\" >\n<strong>{}</strong>\n{badge}{pills}\
<span class=\"muted\" style=\"margin-left:auto\">/emails/{slug}.html</span>\n</div>\n\
<div class=\"panes\">\n{}\n{}\n</div>\n<script>{VIEWER_SCRIPT}</script>",
        escape(title),
        pane(slug, ViewMode::Desktop, ViewMode::DESKTOP_WIDTH),
        pane(slug, ViewMode::Mobile, ViewMode::MOBILE_WIDTH),
    );

    // data-initial-mode seeds the synchronizer script; panes start visible
    // and the first apply() hides whichever the mode excludes.
    page(
        &format!("Preview · {title}"),
        &format!(" data-initial-mode=\"{}\"", mode.as_str()),
        &body,
    )
}
