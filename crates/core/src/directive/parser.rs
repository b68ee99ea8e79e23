use crate::{
    error::{Error, Result},
    types::DirectiveMap,
};
use tracing::{debug, warn};

/// Token every directive comment starts with
pub const MARKER: &str = "mapmap:";

const SOURCE_KEY: &str = "source";
const TARGET_KEY: &str = "target";

/// Parse one comment into target -> source pairs.
///
/// Later groups in the same comment replace earlier ones for the same target.
/// A group naming only one side yields an empty string for the other.
pub fn parse_directives(comment: &str) -> Result<DirectiveMap> {
    let body = strip_comment_syntax(comment);
    if !body.starts_with(MARKER) {
        return Err(Error::DirectiveFormat {
            comment: comment.trim().to_string(),
        });
    }

    let mut result = DirectiveMap::new();
    for group in body.split(MARKER) {
        let group = group.trim();
        if group.is_empty() {
            continue;
        }

        let mut source = None;
        let mut target = None;
        for clause in group.split(',') {
            let Some((key, value)) = clause.split_once(':') else {
                continue;
            };
            match key.trim() {
                SOURCE_KEY => source = Some(value.trim().to_string()),
                TARGET_KEY => target = Some(value.trim().to_string()),
                other => debug!("Ignoring unknown directive key `{}`", other),
            }
        }

        if source.is_none() && target.is_none() {
            continue;
        }
        result.insert(target.unwrap_or_default(), source.unwrap_or_default());
    }

    Ok(result)
}

/// Merge the directives of every comment attached to a method.
///
/// Comments are accumulated: once a target is mapped to a source, later comments
/// cannot remap it. A target left without a source stays open. Comments that are not
/// directives are skipped.
pub fn collect_explicit<S: AsRef<str>>(comments: &[S]) -> DirectiveMap {
    let mut explicit = DirectiveMap::new();
    for comment in comments {
        let comment = comment.as_ref();
        match parse_directives(comment) {
            Ok(parsed) => {
                for (target, source) in explicit.absorb(parsed) {
                    warn!(
                        "Ignoring `{}` -> `{}`: target already mapped by an earlier comment",
                        source, target
                    );
                }
            }
            Err(e) => debug!("Skipping comment: {}", e),
        }
    }
    explicit
}

fn strip_comment_syntax(comment: &str) -> &str {
    let mut text = comment.trim();
    if let Some(inner) = text.strip_prefix("/*") {
        text = inner.strip_suffix("*/").unwrap_or(inner);
        text = text.trim_matches('*');
    }
    text.trim_start_matches('/').trim_start_matches('!').trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_comment_without_marker() {
        let err = parse_directives("// converts a user").unwrap_err();
        assert!(matches!(err, Error::DirectiveFormat { .. }));
    }

    #[test]
    fn test_marker_must_lead() {
        let err = parse_directives("// note mapmap:source:a,target:b").unwrap_err();
        assert!(matches!(err, Error::DirectiveFormat { .. }));
    }

    #[test]
    fn test_single_group() {
        let map = parse_directives("mapmap:source:A,target:B").unwrap();
        assert_eq!(map.iter().collect::<Vec<_>>(), vec![("B", "A")]);
    }

    #[test]
    fn test_comment_syntax_is_stripped() {
        let map = parse_directives("// mapmap:source:name, target:age").unwrap();
        assert_eq!(map.get("age"), Some("name"));

        let map = parse_directives("/// mapmap:target:age,source:name").unwrap();
        assert_eq!(map.get("age"), Some("name"));

        let map = parse_directives("/* mapmap:source:name,target:age */").unwrap();
        assert_eq!(map.get("age"), Some("name"));
    }

    #[test]
    fn test_last_group_wins_within_one_comment() {
        let map = parse_directives("mapmap:source:A,target:B mapmap:source:C,target:B").unwrap();
        assert_eq!(map.len(), 1);
        assert_eq!(map.get("B"), Some("C"));
    }

    #[test]
    fn test_multiple_targets_in_one_comment() {
        let map =
            parse_directives("// mapmap:source:name,target:age mapmap:source:age,target:name")
                .unwrap();
        assert_eq!(map.get("age"), Some("name"));
        assert_eq!(map.get("name"), Some("age"));
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let map = parse_directives("mapmap:source:A,target:B,format:upper").unwrap();
        assert_eq!(map.iter().collect::<Vec<_>>(), vec![("B", "A")]);
    }

    #[test]
    fn test_keys_are_case_sensitive() {
        let map = parse_directives("mapmap:Source:A,target:B").unwrap();
        assert_eq!(map.get("B"), Some(""));
    }

    #[test]
    fn test_half_group_yields_empty_side() {
        let map = parse_directives("mapmap:target:B").unwrap();
        assert_eq!(map.get("B"), Some(""));

        let map = parse_directives("mapmap:source:A").unwrap();
        assert_eq!(map.get(""), Some("A"));
    }

    #[test]
    fn test_marker_only_yields_nothing() {
        assert!(parse_directives("// mapmap:").unwrap().is_empty());
        assert!(parse_directives("// mapmap:assembler").unwrap().is_empty());
    }

    #[test]
    fn test_collect_accumulates_across_comments() {
        let comments = [
            "// mapmap:source:name,target:age",
            "// plain remark",
            "// mapmap:source:age,target:name",
            "// mapmap:source:id,target:age",
        ];
        let explicit = collect_explicit(&comments);
        assert_eq!(
            explicit.iter().collect::<Vec<_>>(),
            vec![("age", "name"), ("name", "age")]
        );
    }

    #[test]
    fn test_half_directive_does_not_block_later_mapping() {
        let comments = ["// mapmap:target:age", "// mapmap:source:name,target:age"];
        let explicit = collect_explicit(&comments);
        assert_eq!(explicit.iter().collect::<Vec<_>>(), vec![("age", "name")]);
    }

    #[test]
    fn test_complete_mapping_is_not_cleared_by_half_directive() {
        let comments = ["// mapmap:source:name,target:age", "// mapmap:target:age"];
        let explicit = collect_explicit(&comments);
        assert_eq!(explicit.iter().collect::<Vec<_>>(), vec![("age", "name")]);
    }
}
