use crate::helpers::html::escape;
use crate::models::restaurant::RestaurantDetail;
use crate::views::restaurant_list::rating_badge;

fn section(title: &str, body: String) -> String {
    format!(r#"<section><h3>{}</h3>{}</section>"#, title, body)
}

/// Detail modal for a loaded record. Absent fields are skipped.
pub fn render_detail(detail: &RestaurantDetail, close_href: &str) -> String {
    let restaurant = &detail.restaurant;
    let mut sections = Vec::new();

    if let Some(address) = &restaurant.address {
        sections.push(section("Address", format!("<p>{}</p>", escape(address))));
    }

    let mut facts = Vec::new();
    if let Some(rating) = rating_badge(restaurant, " reviews") {
        facts.push(section("Rating", format!("<p>{}</p>", escape(&rating))));
    }
    if let Some(price) = restaurant.price_level {
        facts.push(section("Price Level", format!("<p>{}</p>", price.label())));
    }
    if !facts.is_empty() {
        sections.push(format!(r#"<div class="facts">{}</div>"#, facts.concat()));
    }

    if let Some(phone) = &detail.phone_number {
        sections.push(section(
            "Phone",
            format!(r#"<a href="tel:{0}">{0}</a>"#, escape(phone)),
        ));
    }
    if let Some(website) = &detail.website {
        sections.push(section(
            "Website",
            format!(r#"<a href="{0}" target="_blank" rel="noopener noreferrer">{0}</a>"#, escape(website)),
        ));
    }
    if let Some(menu) = &detail.menu_url {
        sections.push(section(
            "Menu",
            format!(r#"<a href="{}" target="_blank" rel="noopener noreferrer">View Menu →</a>"#, escape(menu)),
        ));
    }

    if let Some(hours) = &detail.opening_hours {
        let status = match hours.open_now {
            Some(true) => r#"<p class="open">Open Now</p>"#,
            Some(false) => r#"<p class="closed">Closed</p>"#,
            None => "",
        };
        let days: String = hours
            .weekday_text
            .iter()
            .map(|day| format!("<li>{}</li>", escape(day)))
            .collect();
        let days = if days.is_empty() { days } else { format!("<ul>{}</ul>", days) };
        sections.push(section("Opening Hours", format!("{}{}", status, days)));
    }

    let categories: String = restaurant
        .display_categories()
        .iter()
        .map(|c| format!(r#"<span class="tag">{}</span>"#, escape(c)))
        .collect();
    if !categories.is_empty() {
        sections.push(section("Categories", format!(r#"<div class="tags">{}</div>"#, categories)));
    }

    format!(
        r#"<div class="modal" role="dialog"><div class="modal-body">
<header><h2>{}</h2><a class="close" href="{}" aria-label="Close">×</a></header>
{}
</div></div>"#,
        escape(&restaurant.name),
        escape(close_href),
        sections.concat()
    )
}
