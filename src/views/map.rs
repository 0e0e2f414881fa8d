use serde::Serialize;
use crate::helpers::html::escape;
use crate::models::restaurant::Restaurant;
use crate::state::map_view::{markers, MapView, RESIZE_DELAY};
use crate::state::page::PageState;
use crate::state::query::PageQuery;
use crate::views::restaurant_list::rating_badge;

const MAPBOX_VERSION: &str = "v3.1.2";
const MAP_STYLE: &str = "mapbox://styles/mapbox/streets-v12";

#[derive(Serialize)]
struct MarkerData<'a> {
    place_id: &'a str,
    lng: f64,
    lat: f64,
    selected: bool,
    href: String,
}

#[derive(Serialize)]
struct PopupData {
    lng: f64,
    lat: f64,
    html: String,
    close_href: String,
}

#[derive(Serialize)]
struct MapData<'a> {
    token: &'a str,
    style: &'a str,
    center: [f64; 2],
    zoom: f64,
    markers: Vec<MarkerData<'a>>,
    popup: Option<PopupData>,
    move_href: String,
    resize_delay_ms: u128,
}

pub fn render_popup(restaurant: &Restaurant) -> String {
    let rating = rating_badge(restaurant, "")
        .map(|r| format!(r#"<p class="rating">{}</p>"#, escape(&r)))
        .unwrap_or_default();
    let address = restaurant
        .address
        .as_deref()
        .map(|a| format!(r#"<p class="address">{}</p>"#, escape(a)))
        .unwrap_or_default();

    format!(
        r#"<div class="popup"><h3>{}</h3>{}{}</div>"#,
        escape(&restaurant.name),
        rating,
        address
    )
}

/// Where the map reports a pan. The script appends `view_lat`, `view_lng`
/// and `zoom`, so they must not already be present.
fn move_href(query: &PageQuery, selected: Option<&str>) -> String {
    PageQuery {
        zoom: None,
        view_lat: None,
        view_lng: None,
        ..query.with_selected(selected)
    }
    .href_to("/map/move")
}

/// Map panel. Without an access token only a placeholder is shown.
pub fn render_map(
    state: &PageState,
    map: &MapView,
    query: &PageQuery,
    token: Option<&str>,
) -> String {
    let Some(token) = token.filter(|t| !t.is_empty()) else {
        return r#"<div class="map-placeholder"><p>Please set MAPBOX_TOKEN to show the map</p></div>"#
            .to_string();
    };

    let viewport = map.viewport();
    let data = MapData {
        token,
        style: MAP_STYLE,
        center: [viewport.center.lng, viewport.center.lat],
        zoom: viewport.zoom,
        markers: markers(&state.restaurants, state.selected.as_deref())
            .into_iter()
            .zip(&state.restaurants)
            .map(|(marker, restaurant)| MarkerData {
                place_id: &restaurant.place_id,
                lng: marker.position.lng,
                lat: marker.position.lat,
                selected: marker.selected,
                href: query.with_selected(Some(&marker.place_id)).href(),
            })
            .collect(),
        popup: state.selected_restaurant().map(|restaurant| PopupData {
            lng: restaurant.lng,
            lat: restaurant.lat,
            html: render_popup(restaurant),
            close_href: query.with_selected(None).href(),
        }),
        move_href: move_href(query, state.selected.as_deref()),
        resize_delay_ms: RESIZE_DELAY.as_millis(),
    };
    // `</` must not close the script element early.
    let json = serde_json::to_string(&data)
        .unwrap_or_else(|_| "null".to_string())
        .replace("</", "<\\/");

    format!(
        r#"<link href="https://api.mapbox.com/mapbox-gl-js/{version}/mapbox-gl.css" rel="stylesheet">
<script src="https://api.mapbox.com/mapbox-gl-js/{version}/mapbox-gl.js"></script>
<div id="map" class="map"></div>
<script>
(function () {{
  var data = {json};
  mapboxgl.accessToken = data.token;
  var map = new mapboxgl.Map({{ container: "map", style: data.style, center: data.center, zoom: data.zoom }});
  data.markers.forEach(function (m) {{
    var el = document.createElement("div");
    el.className = m.selected ? "marker selected" : "marker";
    el.addEventListener("click", function () {{ window.location.href = m.href; }});
    new mapboxgl.Marker({{ element: el, anchor: "bottom" }}).setLngLat([m.lng, m.lat]).addTo(map);
  }});
  if (data.popup) {{
    var popup = new mapboxgl.Popup({{ anchor: "bottom", closeButton: true, closeOnClick: false }})
      .setLngLat([data.popup.lng, data.popup.lat]).setHTML(data.popup.html).addTo(map);
    popup.on("close", function () {{ window.location.href = data.popup.close_href; }});
  }}
  map.on("moveend", function (e) {{
    if (!e.originalEvent) {{ return; }}
    var c = map.getCenter();
    var sep = data.move_href.indexOf("?") < 0 ? "?" : "&";
    window.location.href = data.move_href + sep + "view_lat=" + c.lat + "&view_lng=" + c.lng + "&zoom=" + map.getZoom();
  }});
  setTimeout(function () {{ map.resize(); }}, data.resize_delay_ms);
}})();
</script>"#,
        version = MAPBOX_VERSION,
        json = json,
    )
}

#[cfg(test)]
mod tests {
    use crate::models::location::{LatLng, Viewport};
    use crate::models::price::PriceLevel;
    use crate::models::restaurant::SearchResponse;
    use crate::state::options::PageOptions;
    use crate::state::page::Action;
    use super::*;

    fn state() -> PageState {
        let mut state = PageState::new(&PageOptions::default());
        state.apply(Action::SearchSucceeded(SearchResponse {
            restaurants: vec![Restaurant {
                place_id: "p1".to_string(),
                name: "Cafe </script>".to_string(),
                address: Some("1 Market St".to_string()),
                lat: 37.788,
                lng: -122.409,
                rating: Some(4.5),
                price_level: PriceLevel::new(2),
                types: vec![],
                user_ratings_total: Some(12),
                photos: None,
            }],
            count: 1,
        }));
        state
    }

    #[test]
    fn placeholder_without_token() {
        let state = state();
        let map = MapView::new(state.center, 13.0);

        for token in [None, Some("")] {
            let html = render_map(&state, &map, &PageQuery::default(), token);
            assert!(html.contains("map-placeholder"));
            assert!(!html.contains("mapboxgl"));
        }
    }

    #[test]
    fn markers_and_popup_follow_selection() {
        let mut state = state();
        state.apply(Action::RestaurantSelected(Some("p1".to_string())));
        let map = MapView::new(state.center, 13.0);

        let html = render_map(&state, &map, &PageQuery::default(), Some("pk.test"));

        assert!(html.contains(r#""place_id":"p1""#));
        assert!(html.contains(r#""selected":true"#));
        assert!(html.contains(r#""close_href":"/""#));
        assert!(html.contains(r#""zoom":13.0"#));
        assert!(html.contains(r#""resize_delay_ms":150"#));
        assert!(!html.contains("Cafe </script>"));
    }

    #[test]
    fn move_href_leaves_the_viewport_to_the_script() {
        let state = state();
        let map = MapView::with_viewport(
            Viewport::new(LatLng::new(37.7882, -122.4093), 15.0),
            state.center,
        );
        let query = PageQuery::from_state(&state, &map);
        assert_eq!(query.view_lat, Some(37.7882));

        let html = render_map(&state, &map, &query, Some("pk.test"));

        assert!(html.contains(
            r#""move_href":"/map/move?lat=37.7879&lng=-122.4095&radius=322&max_price=4""#
        ));
    }

    #[test]
    fn marker_selects_like_the_list_row() {
        let state = state();
        let map = MapView::new(state.center, 13.0);
        let query = PageQuery::from_state(&state, &map);

        let html = render_map(&state, &map, &query, Some("pk.test"));
        let list = crate::views::restaurant_list::render_restaurant_list(&state, &query);

        let select_href = query.with_selected(Some("p1")).href();
        assert!(html.contains(&format!(r#""href":"{}""#, select_href)));
        assert!(list.contains(&format!(r#"class="select" href="{}""#, escape(&select_href))));
    }

    #[test]
    fn no_popup_without_selection() {
        let state = state();
        let map = MapView::new(state.center, 13.0);

        let html = render_map(&state, &map, &PageQuery::default(), Some("pk.test"));

        assert!(html.contains(r#""popup":null"#));
        assert!(html.contains(r#""selected":false"#));
    }

    #[test]
    fn popup_shows_rating_and_address() {
        let html = render_popup(&state().restaurants[0]);

        assert!(html.contains("⭐4.5 (12)"));
        assert!(html.contains("1 Market St"));
    }
}
