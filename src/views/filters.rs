use crate::helpers::html::escape;
use crate::models::price::{ceiling_label, PriceLevel};
use crate::models::search::{Radius, CUISINE_OPTIONS};
use crate::state::page::PageState;
use crate::state::query::PageQuery;

/// Query parameters the filter form itself edits.
const EDITED: [&str; 3] = ["radius", "max_price", "cuisine"];

/// Filter form. Submitting it reloads the page with the new filters, which
/// the page turns into the matching filter actions.
pub fn render_filters(state: &PageState, query: &PageQuery) -> String {
    let carried: String = query
        .with_selected(None)
        .with_detail(None)
        .pairs()
        .into_iter()
        .filter(|(name, _)| !EDITED.contains(name))
        .map(|(name, value)| {
            format!(r#"<input type="hidden" name="{}" value="{}">"#, name, escape(&value))
        })
        .collect();

    let cuisine_options: String = CUISINE_OPTIONS
        .iter()
        .map(|option| {
            let selected = if option.value == state.cuisine_type { " selected" } else { "" };
            format!(
                r#"<option value="{}"{}>{}</option>"#,
                option.value, selected, option.label
            )
        })
        .collect();

    let clear_price = query.with_selected(None).with_detail(None);
    let clear_price = PageQuery {
        max_price: Some(PriceLevel::MAX),
        ..clear_price
    };

    format!(
        r#"<form class="filters" method="get" action="/">{carried}
<h2>Filters</h2>
<div class="filter">
<label for="max_price">Maximum Price: {price_label}</label>
<input type="range" id="max_price" name="max_price" min="0" max="{price_max}" value="{price_position}">
<a class="clear" href="{clear_href}">Clear</a>
<div class="scale"><span>Free</span><span>$$$$</span></div>
</div>
<div class="filter">
<label for="cuisine">Cuisine Type</label>
<select id="cuisine" name="cuisine">{cuisine_options}</select>
</div>
<div class="filter">
<label for="radius">Search Radius: {radius_label}</label>
<input type="range" id="radius" name="radius" min="{radius_min}" max="{radius_max}" step="{radius_step}" value="{radius}">
<div class="scale"><span>0.1 mi</span><span>1 mi</span></div>
</div>
<button type="submit" class="search"{disabled}>{button}</button>
</form>"#,
        carried = carried,
        price_label = ceiling_label(state.max_price),
        price_max = PriceLevel::MAX,
        price_position = PriceLevel::slider_position(state.max_price),
        clear_href = escape(&clear_price.href()),
        cuisine_options = cuisine_options,
        radius_label = state.radius.label(),
        radius_min = Radius::MIN,
        radius_max = Radius::MAX,
        radius_step = Radius::STEP,
        radius = state.radius.meters(),
        disabled = if state.loading() { " disabled" } else { "" },
        button = if state.loading() { "Searching..." } else { "Search Restaurants" },
    )
}

#[cfg(test)]
mod tests {
    use crate::state::options::PageOptions;
    use crate::state::page::Action;
    use super::*;

    #[test]
    fn reflects_current_filters() {
        let mut state = PageState::new(&PageOptions::default());
        state.apply(Action::MaxPriceChanged(PriceLevel::new(2)));
        state.apply(Action::CuisineChanged("thai".to_string()));
        let query = PageQuery { lat: Some(1.0), lng: Some(2.0), cuisine: Some("thai".to_string()), ..PageQuery::default() };

        let html = render_filters(&state, &query);

        assert!(html.contains("Maximum Price: $$"));
        assert!(html.contains(r#"<option value="thai" selected>Thai</option>"#));
        assert!(html.contains("Search Radius: 0.2 miles"));
        assert!(html.contains(r#"min="161" max="1609" step="161" value="322""#));
        assert!(html.contains(r#"<input type="hidden" name="lat" value="1">"#));
        assert!(!html.contains(r#"type="hidden" name="cuisine""#));
    }

    #[test]
    fn any_price_when_no_ceiling() {
        let state = PageState::new(&PageOptions::default());

        let html = render_filters(&state, &PageQuery::default());

        assert!(html.contains("Maximum Price: Any"));
        assert!(html.contains(r#"max="4" value="4""#));
        assert!(html.contains("Search Restaurants"));
    }
}
