/// Split an object path into `(source, table_name)`.
///
/// `source` is everything before the final segment, `"."` when there is none,
/// and `"/"` for a rooted single segment. Trailing slashes are ignored.
pub fn split_object_path(path: &str) -> (String, String) {
    let trimmed = path.trim_end_matches('/');
    match trimmed.rsplit_once('/') {
        Some((parent, name)) => {
            let parent = parent.trim_end_matches('/');
            let source = if parent.is_empty() { "/" } else { parent };
            (source.to_string(), name.to_string())
        }
        None => (".".to_string(), trimmed.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn nested_path_splits_at_last_segment() {
        assert_eq!(
            split_object_path("a/b/c/config.yaml"),
            ("a/b/c".to_string(), "config.yaml".to_string())
        );
        assert_eq!(
            split_object_path("source/folder/subfolder/file_config.yaml"),
            ("source/folder/subfolder".to_string(), "file_config.yaml".to_string())
        );
    }

    #[test]
    fn single_segment_has_current_dir_parent() {
        assert_eq!(split_object_path("config.yaml"), (".".to_string(), "config.yaml".to_string()));
    }

    #[test]
    fn rooted_and_trailing_slashes() {
        assert_eq!(split_object_path("/config.yaml"), ("/".to_string(), "config.yaml".to_string()));
        assert_eq!(split_object_path("a/b/"), ("a".to_string(), "b".to_string()));
        assert_eq!(split_object_path("a//b"), ("a".to_string(), "b".to_string()));
    }

    proptest! {
        #[test]
        fn rejoining_recovers_the_path(
            dirs in prop::collection::vec("[a-z0-9_]{1,8}", 1..5),
            name in "[a-z0-9_]{1,8}\\.yaml",
        ) {
            let path = format!("{}/{}", dirs.join("/"), name);
            let (source, table_name) = split_object_path(&path);
            prop_assert_eq!(&table_name, &name);
            prop_assert_eq!(format!("{}/{}", source, table_name), path);
        }
    }
}
