use http::Method;

use crossbar::{RequestContext, RouteError, RouteSpec, Router};

#[test]
fn test_set_materializes_cartesian_product() {
    let mut router = Router::new();
    router
        .route()
        .path("/pets")
        .method(Method::GET)
        .method(Method::POST)
        .language("en")
        .set("pets_handler");

    let routes = router.routes();
    assert_eq!(routes.len(), 2);
    assert!(routes.iter().all(|r| r.payload() == &"pets_handler"));

    let mut ctx = RequestContext::new(Method::GET, "/pets").with_accept_language("en");
    assert_eq!(router.resolve(&mut ctx), Ok(&"pets_handler"));
    let mut ctx = RequestContext::new(Method::POST, "/pets").with_accept_language("en");
    assert_eq!(router.resolve(&mut ctx), Ok(&"pets_handler"));
}

#[test]
fn test_empty_manager_sets_global_default_route() {
    let mut router = Router::new();
    router.route().set("catch_all");

    assert_eq!(router.routes(), vec![crossbar::Route::new(RouteSpec::new(), "catch_all")]);
    let mut ctx = RequestContext::new(Method::DELETE, "/anything/at/all");
    assert_eq!(router.resolve(&mut ctx), Ok(&"catch_all"));
}

#[test]
fn test_find_routes_unconstrained_axis_is_dont_care() {
    let mut router = Router::new();
    router.route().path("/pets").method(Method::GET).set("list");
    router.route().path("/pets").method(Method::POST).set("add");
    router.route().path("/owners").method(Method::GET).set("owners");

    let found = router.route().path("/pets").find_routes();
    assert_eq!(found.len(), 2);
    assert!(found.iter().all(|r| {
        r.spec() == &RouteSpec::new().path("/pets").method(Method::GET)
            || r.spec() == &RouteSpec::new().path("/pets").method(Method::POST)
    }));

    let found = router.route().method(Method::GET).find_routes();
    assert_eq!(found.len(), 2);
}

#[test]
fn test_find_routes_matches_route_with_unconstrained_axis() {
    let mut router = Router::new();
    router.route().path("/pets").set("any_method");

    // A constrained query axis still matches routes that left that axis open.
    let found = router.route().path("/pets").method(Method::GET).find_routes();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].payload(), &"any_method");
}

#[test]
fn test_find_routes_follows_pattern_inclusion() {
    let mut router = Router::new();
    router.route().path("/pets/1").method(Method::GET).set("literal");
    router.route().path("/pets/{id}").method(Method::GET).set("pattern");
    router.route().path("/owners/{id}").method(Method::GET).set("other");

    // The query pattern covers the equal pattern and any literal it matches.
    let found = router.route().path("/pets/{id}").find_routes();
    assert_eq!(found.len(), 2);

    let found = router.route().path("/{a}/{b}").find_routes();
    assert_eq!(found.len(), 3);
}

#[test]
fn test_bulk_remove_by_path() {
    let mut router = Router::new();
    router.route().path("/pets").method(Method::GET).set("list");
    router.route().path("/pets").method(Method::POST).set("add");
    router.route().path("/owners").method(Method::GET).set("owners");

    router.route().path("/pets").remove();

    assert_eq!(router.routes().len(), 1);
    let mut ctx = RequestContext::new(Method::GET, "/pets");
    assert_eq!(router.resolve(&mut ctx), Err(RouteError::NotFound));
    let mut ctx = RequestContext::new(Method::GET, "/owners");
    assert_eq!(router.resolve(&mut ctx), Ok(&"owners"));
}

#[test]
fn test_bulk_disable_and_enable_by_method() {
    let mut router = Router::new();
    router.route().path("/pets").method(Method::GET).set("list");
    router.route().path("/owners").method(Method::GET).set("owners");
    router.route().path("/pets").method(Method::POST).set("add");

    router.route().method(Method::GET).disable();
    let mut ctx = RequestContext::new(Method::GET, "/pets");
    assert!(router.resolve(&mut ctx).is_err());
    let mut ctx = RequestContext::new(Method::POST, "/pets");
    assert_eq!(router.resolve(&mut ctx), Ok(&"add"));

    router.route().method(Method::GET).enable();
    let mut ctx = RequestContext::new(Method::GET, "/owners");
    assert_eq!(router.resolve(&mut ctx), Ok(&"owners"));
}

#[test]
fn test_manager_remove_with_no_matches_is_noop() {
    let mut router = Router::new();
    router.route().path("/pets").method(Method::GET).set("list");
    router.route().path("/ghost").remove();
    assert_eq!(router.routes().len(), 1);
}
