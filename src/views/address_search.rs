use crate::helpers::html::escape;
use crate::state::address_search::{AddressSearch, AUTOCOMPLETE_DEBOUNCE};
use crate::state::query::PageQuery;

/// Dropdown under the search box. Loaded suggestions that are hidden stay in
/// the page so focusing the box can bring them back; with none loaded it is empty.
pub fn render_suggestions(search: &AddressSearch) -> String {
    if search.suggestions().is_empty() {
        return String::new();
    }

    let items: String = search
        .suggestions()
        .iter()
        .enumerate()
        .map(|(index, suggestion)| {
            let class = if search.cursor() == Some(index) { "suggestion active" } else { "suggestion" };
            let secondary = suggestion
                .secondary_text
                .as_deref()
                .map(|s| format!(r#"<div class="secondary">{}</div>"#, escape(s)))
                .unwrap_or_default();
            format!(
                r#"<button type="submit" name="place_id" value="{}" class="{}" data-index="{}"><div class="main">{}</div>{}</button>"#,
                escape(&suggestion.place_id),
                class,
                index,
                escape(suggestion.headline()),
                secondary
            )
        })
        .collect();

    let cursor = search.cursor().map(|c| c.to_string()).unwrap_or_default();
    let class = if search.suggestions_visible() { "suggestions" } else { "suggestions hidden" };
    format!(r#"<div class="{}" data-cursor="{}">{}</div>"#, class, cursor, items)
}

/// Search form. Typing fetches suggestion fragments once input has been quiet
/// for the debounce window; picking one or pressing Enter resolves the address.
/// The locate button comes first so a plain Enter submits the typed text.
pub fn render_address_search(search: &AddressSearch, query: &PageQuery) -> String {
    let carried: String = query
        .with_selected(None)
        .with_detail(None)
        .with_address("")
        .pairs()
        .into_iter()
        .map(|(name, value)| format!(r#"<input type="hidden" name="{}" value="{}">"#, name, escape(&value)))
        .collect();

    format!(
        r#"<form class="address-search" method="get" action="/address/locate" autocomplete="off">{carried}
<input type="text" id="address" name="q" value="{value}" placeholder="Search for an address or location...">
<button type="submit" id="locate" class="locate"{disabled}>{button}</button>
<div id="suggestions">{suggestions}</div>
</form>
<script>
(function () {{
  var input = document.getElementById("address");
  var box = document.getElementById("suggestions");
  var locate = document.getElementById("locate");
  var form = input.form;
  var timer = null;
  function list() {{
    return box.querySelector(".suggestions");
  }}
  function cursor() {{
    var shown = list();
    return shown ? shown.getAttribute("data-cursor") : "";
  }}
  function load(key, hidden) {{
    var url = "/address/suggest?q=" + encodeURIComponent(input.value);
    if (key) {{ url += "&key=" + key + "&cursor=" + cursor(); }}
    if (hidden) {{ url += "&hidden=true"; }}
    fetch(url).then(function (r) {{ return r.text(); }}).then(function (html) {{ box.innerHTML = html; }});
  }}
  input.addEventListener("input", function () {{
    locate.disabled = input.value.trim() === "";
    clearTimeout(timer);
    timer = setTimeout(function () {{ load(null, false); }}, {debounce_ms});
  }});
  input.addEventListener("focus", function () {{
    if (box.querySelector(".suggestions.hidden")) {{ load("Focus", true); }}
  }});
  input.addEventListener("keydown", function (e) {{
    if (!box.querySelector(".suggestions:not(.hidden)")) {{ return; }}
    if (e.key === "ArrowDown" || e.key === "ArrowUp" || e.key === "Escape") {{
      e.preventDefault();
      load(e.key, false);
    }} else if (e.key === "Enter") {{
      var active = box.querySelector(".suggestions:not(.hidden) .suggestion.active");
      if (active) {{ e.preventDefault(); active.click(); }}
    }}
  }});
  document.addEventListener("mousedown", function (e) {{
    var shown = list();
    if (shown && !form.contains(e.target)) {{ shown.classList.add("hidden"); }}
  }});
}})();
</script>"#,
        carried = carried,
        value = escape(search.query()),
        suggestions = render_suggestions(search),
        disabled = if search.can_submit() { "" } else { " disabled" },
        button = if search.is_searching() { "Searching..." } else { "Search" },
        debounce_ms = AUTOCOMPLETE_DEBOUNCE.as_millis(),
    )
}
