use reqwest::Url;

/// Site-relative link with an encoded query string, e.g. `/?lat=1&lng=2`.
pub fn href(path: &str, pairs: &[(&str, String)]) -> String {
    let Ok(mut url) = Url::parse("http://localhost/") else {
        return path.to_string();
    };
    url.set_path(path);
    if !pairs.is_empty() {
        url.query_pairs_mut()
            .extend_pairs(pairs.iter().map(|(k, v)| (*k, v.as_str())));
    }
    match url.query() {
        Some(query) => format!("{}?{}", url.path(), query),
        None => url.path().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_query_values() {
        assert_eq!(
            href("/", &[("cuisine", "thai".to_string()), ("address", "Ferry Bldg & Co".to_string())]),
            "/?cuisine=thai&address=Ferry+Bldg+%26+Co"
        );
        assert_eq!(href("/map/move", &[]), "/map/move");
    }
}
