//! Resolution contract of the declared route table.

use spa_router::config::{parse_config, AppConfig};
use spa_router::routing::{ParamValue, RouteRule, RouteTable, Router};
use spa_router::{Page, Resolution, RoutingError};

fn declared() -> Router {
    AppConfig::default().build_router().unwrap()
}

#[test]
fn test_todo_renders_todo_page() {
    assert_eq!(declared().resolve("/todo"), Ok(Resolution::Render(Page::Todo)));
}

#[test]
fn test_root_redirects_to_todo() {
    assert_eq!(declared().resolve("/"), Ok(Resolution::Redirect("/todo".into())));
}

#[test]
fn test_nested_unknown_path_redirects_to_todo() {
    assert_eq!(
        declared().resolve("/unknown/nested/path"),
        Ok(Resolution::Redirect("/todo".into()))
    );
}

#[test]
fn test_empty_path_redirects_to_todo() {
    assert_eq!(declared().resolve(""), Ok(Resolution::Redirect("/todo".into())));
}

#[test]
fn test_redirect_target_is_terminal() {
    let router = declared();
    let Ok(Resolution::Redirect(target)) = router.resolve("/anything") else {
        panic!("expected a redirect");
    };
    assert_eq!(router.resolve(&target), Ok(Resolution::Render(Page::Todo)));
    assert_eq!(router.resolve(&target), Ok(Resolution::Render(Page::Todo)));
}

#[test]
fn test_resolution_is_total() {
    let router = declared();
    let paths = [
        "", "/", "/todo", "/todo/", "/TODO", "/todos", "todo", "//", "/a/b/c/d/e",
        "/%20", "/ünïcödé", "?q=1", "#frag", "/todo?x", "/../etc/passwd", " ",
    ];

    for path in paths {
        let resolution = router.resolve(path);
        assert!(resolution.is_ok(), "{path:?} did not resolve: {resolution:?}");

        let navigation = router.navigate(path).unwrap();
        assert_eq!(navigation.page, Page::Todo);
        assert_eq!(navigation.path, "/todo");
    }
}

#[test]
fn test_catch_all_exposes_path_segments() {
    let router = declared();
    let matched = router.match_path("/unknown/nested/path").unwrap();
    assert_eq!(
        matched.params["pathMatch"],
        ParamValue::Repeated(vec!["unknown".into(), "nested".into(), "path".into()])
    );
}

#[test]
fn test_without_catch_all_no_route_matches() {
    let router = Router::new(RouteTable::new(vec![
        RouteRule::render("/todo", Page::Todo).unwrap(),
    ]));

    assert_eq!(router.resolve("/todo"), Ok(Resolution::Render(Page::Todo)));
    for path in ["/", "", "/unknown/nested/path"] {
        assert_eq!(
            router.resolve(path),
            Err(RoutingError::NoRouteMatched { path: path.into() })
        );
    }
}

#[test]
fn test_first_match_wins() {
    let router = Router::new(RouteTable::new(vec![
        RouteRule::render("/todo", Page::Todo).unwrap(),
        RouteRule::render("/todo", Page::Home).unwrap(),
        RouteRule::redirect("/:pathMatch(.*)*", "/todo").unwrap(),
    ]));
    assert_eq!(router.resolve("/todo"), Ok(Resolution::Render(Page::Todo)));
}

#[test]
fn test_relaxed_matching_from_config() {
    let config = parse_config(
        r#"
[router]
sensitive = false
strict = false
"#,
    )
    .unwrap();
    let router = config.build_router().unwrap();

    assert_eq!(router.resolve("/TODO/"), Ok(Resolution::Render(Page::Todo)));
    assert_eq!(declared().resolve("/TODO/"), Ok(Resolution::Redirect("/todo".into())));
}
