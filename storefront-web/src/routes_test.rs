//! Tests for the route and page mapping

#[cfg(test)]
mod tests {
    use crate::routes::Route;
    use shared::router::Page;
    use strum::IntoEnumIterator;
    use yew_router::Routable;

    #[test]
    fn test_every_page_round_trips() {
        for page in Page::iter() {
            assert_eq!(Route::from(page).page(), page);
        }
    }

    #[test]
    fn test_default_page_is_the_root() {
        assert_eq!(Route::from(Page::Products), Route::Home);
        assert_eq!(Route::Home.to_path(), "/");
    }

    #[test]
    fn test_paths_use_page_identifiers() {
        assert_eq!(Route::from(Page::OwnerDashboard).to_path(), "/owner-dashboard");
        assert_eq!(Route::from(Page::Cart).to_path(), "/cart");
    }

    #[test]
    fn test_unknown_segments_fall_back_to_products() {
        let route = Route::Page {
            page: "specials".to_string(),
        };
        assert_eq!(route.page(), Page::Products);
        assert_eq!(Route::NotFound.page(), Page::Products);
    }
}
