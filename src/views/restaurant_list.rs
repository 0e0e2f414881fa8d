use crate::helpers::html::escape;
use crate::models::restaurant::Restaurant;
use crate::state::page::PageState;
use crate::state::query::PageQuery;

/// `⭐4.5 (120)`, or nothing without a rating.
pub fn rating_badge(restaurant: &Restaurant, suffix: &str) -> Option<String> {
    let rating = restaurant.rating?;
    let count = restaurant
        .user_ratings_total
        .map(|total| format!(" ({}{})", total, suffix))
        .unwrap_or_default();
    Some(format!("⭐{:.1}{}", rating, count))
}

/// One-line summary of a row, the way it reads on screen.
pub fn row_summary(restaurant: &Restaurant) -> String {
    let mut summary = restaurant.name.clone();
    if let Some(rating) = restaurant.rating {
        summary.push_str(&format!(" ⭐{:.1}", rating));
    }
    if let Some(price) = restaurant.price_level {
        summary.push(' ');
        summary.push_str(price.label());
    }
    summary
}

pub fn render_restaurant_list(state: &PageState, query: &PageQuery) -> String {
    if state.restaurants.is_empty() {
        return r#"<div class="empty"><p>No restaurants found. Try adjusting your filters.</p></div>"#
            .to_string();
    }

    let rows: String = state
        .restaurants
        .iter()
        .map(|restaurant| render_row(restaurant, state.is_selected(&restaurant.place_id), query))
        .collect();

    format!(r#"<ul class="restaurants">{}</ul>"#, rows)
}

fn render_row(restaurant: &Restaurant, selected: bool, query: &PageQuery) -> String {
    let class = if selected { "restaurant selected" } else { "restaurant" };
    let address = restaurant
        .address
        .as_deref()
        .map(|a| format!(r#"<p class="address">{}</p>"#, escape(a)))
        .unwrap_or_default();
    let rating = rating_badge(restaurant, "")
        .map(|r| format!(r#"<span class="rating">{}</span>"#, escape(&r)))
        .unwrap_or_default();
    let price = restaurant
        .price_level
        .map(|p| format!(r#"<span class="price">{}</span>"#, p.label()))
        .unwrap_or_default();

    let select_href = query.with_selected(Some(&restaurant.place_id)).href();
    let details_href = query
        .with_selected(Some(&restaurant.place_id))
        .with_detail(Some(&restaurant.place_id))
        .href();

    format!(
        r#"<li class="{class}" data-place-id="{id}" aria-label="{summary}">
<a class="select" href="{select_href}"><h3>{name}</h3></a>{address}
<div class="meta">{rating}{price}</div>
<a class="details" href="{details_href}">Details</a>
</li>"#,
        class = class,
        id = escape(&restaurant.place_id),
        summary = escape(&row_summary(restaurant)),
        select_href = escape(&select_href),
        name = escape(&restaurant.name),
        address = address,
        rating = rating,
        price = price,
        details_href = escape(&details_href),
    )
}
