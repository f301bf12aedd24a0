//! Declaration file parsing.
//!
//! Declarations are authored in YAML (JSON works too). Each entry is either a
//! positional tuple or a named mapping; both forms may be mixed freely:
//!
//! ```yaml
//! - [HomePage, { name: home }, { path: / }]
//! - [BlogPage, { name: blog }, { path: /blog }, [
//!     [PostPage, { name: post }, { path: /post }]
//!   ]]
//! - target: AboutPage
//!   route: { name: about, order: 10 }
//!   path: /about
//!   children: []
//! ```
//!
//! Leaving `path` out (or writing `{}` in the tuple form) declares a node that
//! is not routable by path. A `path` that is present but null is an invalid
//! path.
//!
//! Shape errors are reported as [`ConfigError::MalformedDeclaration`] with the
//! location of the offending entry (e.g. `declarations[1].children[0]`).

use serde_yaml::{Mapping, Value};

use crate::ConfigError;
use crate::declaration::{PathMeta, RawDeclaration, RenderTarget, RouteMeta};

/// Keys accepted in the mapping form.
const MAPPING_KEYS: [&str; 4] = ["target", "route", "path", "children"];

/// Parse a declaration file.
///
/// # Errors
///
/// Returns [`ConfigError::Parse`] for invalid YAML and
/// [`ConfigError::MalformedDeclaration`] for entries of the wrong shape.
pub fn parse_declarations(content: &str) -> Result<Vec<RawDeclaration<RenderTarget>>, ConfigError> {
    let value: Value =
        serde_yaml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;

    let Value::Sequence(items) = value else {
        return Err(ConfigError::malformed(
            "declarations",
            "expected a list of declarations",
        ));
    };

    let decls = items
        .iter()
        .enumerate()
        .map(|(i, item)| parse_declaration(item, &format!("declarations[{i}]")))
        .collect::<Result<Vec<_>, _>>()?;
    tracing::debug!(count = decls.len(), "Parsed declarations");
    Ok(decls)
}

fn parse_declaration(
    value: &Value,
    location: &str,
) -> Result<RawDeclaration<RenderTarget>, ConfigError> {
    match value {
        Value::Sequence(parts) => parse_tuple(parts, location),
        Value::Mapping(map) => parse_mapping(map, location),
        _ => Err(ConfigError::malformed(
            location,
            "expected a [target, route, path, children?] list or a mapping",
        )),
    }
}

fn parse_tuple(
    parts: &[Value],
    location: &str,
) -> Result<RawDeclaration<RenderTarget>, ConfigError> {
    if !(3..=4).contains(&parts.len()) {
        return Err(ConfigError::malformed(
            location,
            format!("expected 3 or 4 elements, found {}", parts.len()),
        ));
    }

    let target = parse_target(&parts[0], location)?;
    let route = parse_route(&parts[1], location)?;
    let path = parse_path(&parts[2], location)?;
    let children = match parts.get(3) {
        Some(children) => parse_children(children, location)?,
        None => Vec::new(),
    };

    Ok(RawDeclaration::from_parts(target, route, path).with_children(children))
}

fn parse_mapping(
    map: &Mapping,
    location: &str,
) -> Result<RawDeclaration<RenderTarget>, ConfigError> {
    if let Some(key) = map
        .keys()
        .find(|key| !key.as_str().is_some_and(|k| MAPPING_KEYS.contains(&k)))
    {
        return Err(ConfigError::malformed(
            location,
            format!("unexpected key {}", describe_key(key)),
        ));
    }

    let target = map
        .get("target")
        .ok_or_else(|| ConfigError::malformed(location, "missing `target`"))?;
    let route = map
        .get("route")
        .ok_or_else(|| ConfigError::malformed(location, "missing `route`"))?;

    let target = parse_target(target, location)?;
    let route = parse_route(route, location)?;
    let path = match map.get("path") {
        Some(path) => parse_path(path, location)?,
        None => PathMeta::default(),
    };
    let children = match map.get("children") {
        Some(children) => parse_children(children, location)?,
        None => Vec::new(),
    };

    Ok(RawDeclaration::from_parts(target, route, path).with_children(children))
}

fn describe_key(key: &Value) -> String {
    match key.as_str() {
        Some(k) => format!("`{k}`"),
        None => format!("{key:?}"),
    }
}

fn parse_target(value: &Value, location: &str) -> Result<RenderTarget, ConfigError> {
    match value {
        Value::String(name) if !name.is_empty() => Ok(RenderTarget::new(name.as_str())),
        _ => Err(ConfigError::malformed(
            location,
            "render target must be a non-empty string",
        )),
    }
}

fn parse_route(value: &Value, location: &str) -> Result<RouteMeta, ConfigError> {
    if !value.is_mapping() {
        return Err(ConfigError::malformed(
            location,
            "route metadata must be a mapping",
        ));
    }
    serde_yaml::from_value(value.clone())
        .map_err(|e| ConfigError::malformed(location, format!("route metadata: {e}")))
}

fn parse_path(value: &Value, location: &str) -> Result<PathMeta, ConfigError> {
    match value {
        // Shorthand: `path: /about`
        Value::String(path) => Ok(PathMeta::new(path.as_str())),
        // Present but null: invalid, not unrouted
        Value::Null => Err(ConfigError::invalid_path("")),
        Value::Mapping(map) => {
            if map.get("path").is_some_and(Value::is_null) {
                return Err(ConfigError::invalid_path(""));
            }
            serde_yaml::from_value(value.clone())
                .map_err(|e| ConfigError::malformed(location, format!("path metadata: {e}")))
        }
        _ => Err(ConfigError::malformed(
            location,
            "path metadata must be a mapping or a string",
        )),
    }
}

fn parse_children(
    value: &Value,
    location: &str,
) -> Result<Vec<RawDeclaration<RenderTarget>>, ConfigError> {
    match value {
        Value::Null => Ok(Vec::new()),
        Value::Sequence(items) => items
            .iter()
            .enumerate()
            .map(|(i, item)| parse_declaration(item, &format!("{location}.children[{i}]")))
            .collect(),
        _ => Err(ConfigError::malformed(
            location,
            "children must be a list of declarations",
        )),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::declaration::Child;

    fn assert_malformed(content: &str, expected_location: &str, expected_reason: &str) {
        let err = parse_declarations(content).unwrap_err();
        let ConfigError::MalformedDeclaration { location, reason } = &err else {
            panic!("Expected MalformedDeclaration, got {err:?}");
        };
        assert_eq!(location, expected_location);
        assert!(
            reason.contains(expected_reason),
            "Expected reason to contain '{expected_reason}', got: {reason}"
        );
    }

    fn raw_child(decl: &RawDeclaration<RenderTarget>, index: usize) -> &RawDeclaration<RenderTarget> {
        match &decl.children[index] {
            Child::Raw(child) => child,
            Child::Node(_) => panic!("parser only produces raw children"),
        }
    }

    #[test]
    fn test_parse_tuple_form() {
        let decls = parse_declarations(
            r"
- [HomePage, { name: home }, { path: / }]
- [HomePage, { name: homePage }, { path: /home }]
",
        )
        .unwrap();

        assert_eq!(
            decls,
            vec![
                RawDeclaration::new(RenderTarget::from("HomePage"), "home", "/"),
                RawDeclaration::new(RenderTarget::from("HomePage"), "homePage", "/home"),
            ]
        );
    }

    #[test]
    fn test_parse_nested_tuple_form() {
        let decls = parse_declarations(
            r"
- [BlogPage, { name: blog }, { path: /blog }, [
    [PostPage, { name: post }, { path: /post }]
  ]]
",
        )
        .unwrap();

        assert_eq!(decls.len(), 1);
        let post = raw_child(&decls[0], 0);
        assert_eq!(post.target.as_str(), "PostPage");
        assert_eq!(post.route.name, "post");
    }

    #[test]
    fn test_parse_mapping_form() {
        let decls = parse_declarations(
            r"
- target: AboutPage
  route: { name: about, order: 10, title: About us }
  path: /about
  children:
    - target: TeamPage
      route: { name: team }
      path: { path: /team }
",
        )
        .unwrap();

        let about = &decls[0];
        assert_eq!(about.target.as_str(), "AboutPage");
        assert_eq!(about.route.order, Some(10));
        assert_eq!(about.route.extra["title"], "About us");
        assert_eq!(about.path.path.as_deref(), Some("/about"));
        assert_eq!(raw_child(about, 0).path.path.as_deref(), Some("/team"));
    }

    #[test]
    fn test_parse_json() {
        let decls =
            parse_declarations(r#"[["HomePage", {"name": "home", "default": true}, {"path": "/"}]]"#)
                .unwrap();
        assert!(decls[0].route.default);
    }

    #[test]
    fn test_mapping_without_path_is_unrouted() {
        let decls = parse_declarations("- { target: Widget, route: { name: widget } }").unwrap();
        assert!(decls[0].path.path.is_none());
    }

    #[test]
    fn test_empty_path_metadata_is_unrouted() {
        let decls = parse_declarations("- [Widget, { name: widget }, {}]").unwrap();
        assert!(decls[0].path.path.is_none());
    }

    #[test]
    fn test_null_path_rejected() {
        let expected = ConfigError::InvalidPath {
            path: String::new(),
        };
        for content in [
            "- [HomePage, { name: home }, { path: null }]",
            "- [HomePage, { name: home }, ~]",
            "- { target: HomePage, route: { name: home }, path: ~ }",
            "- { target: HomePage, route: { name: home }, path: { path: ~ } }",
        ] {
            assert_eq!(parse_declarations(content).unwrap_err(), expected, "{content}");
        }
    }

    #[test]
    fn test_null_path_fails_instead_of_dropping_declaration() {
        let err = parse_declarations(
            r"
- [HomePage, { name: home }, { path: null }]
- [AboutPage, { name: about }, { path: /about }]
",
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPath { .. }));
    }

    #[test]
    fn test_unknown_path_metadata_key_rejected() {
        assert_malformed(
            "- [HomePage, { name: home }, { path: /, title: Home }]",
            "declarations[0]",
            "unknown field `title`",
        );
    }

    #[test]
    fn test_empty_children_allowed() {
        let decls = parse_declarations("- [HomePage, { name: home }, { path: / }, []]").unwrap();
        assert!(decls[0].children.is_empty());
    }

    #[test]
    fn test_wrong_arity_rejected() {
        assert_malformed(
            "- [HomePage, { name: home }]",
            "declarations[0]",
            "expected 3 or 4 elements, found 2",
        );
        assert_malformed(
            "- [HomePage, { name: home }, { path: / }, [], extra]",
            "declarations[0]",
            "found 5",
        );
    }

    #[test]
    fn test_nested_error_location() {
        assert_malformed(
            r"
- [HomePage, { name: home }, { path: / }]
- [BlogPage, { name: blog }, { path: /blog }, [
    [PostPage, { name: post }]
  ]]
",
            "declarations[1].children[0]",
            "expected 3 or 4",
        );
    }

    #[test]
    fn test_top_level_must_be_list() {
        assert_malformed("home: HomePage", "declarations", "expected a list");
    }

    #[test]
    fn test_scalar_entry_rejected() {
        assert_malformed("- HomePage", "declarations[0]", "expected a");
    }

    #[test]
    fn test_route_meta_requires_name() {
        assert_malformed(
            "- [HomePage, { title: Home }, { path: / }]",
            "declarations[0]",
            "name",
        );
    }

    #[test]
    fn test_route_meta_must_be_mapping() {
        assert_malformed(
            "- [HomePage, home, { path: / }]",
            "declarations[0]",
            "route metadata must be a mapping",
        );
    }

    #[test]
    fn test_target_must_be_string() {
        assert_malformed(
            "- [[HomePage], { name: home }, { path: / }]",
            "declarations[0]",
            "render target",
        );
    }

    #[test]
    fn test_children_must_be_list() {
        assert_malformed(
            "- [HomePage, { name: home }, { path: / }, nope]",
            "declarations[0]",
            "children must be a list",
        );
    }

    #[test]
    fn test_unknown_mapping_key_rejected() {
        assert_malformed(
            "- { target: HomePage, route: { name: home }, handler: HomePage }",
            "declarations[0]",
            "unexpected key `handler`",
        );
    }

    #[test]
    fn test_mapping_requires_target() {
        assert_malformed(
            "- { route: { name: home }, path: / }",
            "declarations[0]",
            "missing `target`",
        );
    }

    #[test]
    fn test_invalid_yaml() {
        let err = parse_declarations("- [HomePage, {").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)), "got {err:?}");
    }

    #[test]
    fn test_path_validity_left_to_normalization() {
        // Shape is fine; the missing slash is caught when normalizing
        let decls = parse_declarations("- [HomePage, { name: home }, { path: home }]").unwrap();
        assert_eq!(decls[0].path.path.as_deref(), Some("home"));
    }
}
