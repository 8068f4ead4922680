use std::path::PathBuf;

use crate::config::SiteConfig;

/// Trees whose changes trigger a rebuild: pages and static assets.
///
/// A tree that is also the output directory is skipped, or every build
/// would trigger the next one.
pub(super) fn collect_watch_paths(config: &SiteConfig) -> Vec<PathBuf> {
    let output = &config.build.output;
    let mut paths = Vec::with_capacity(2);

    for dir in [&config.build.views, &config.build.public] {
        if dir == output {
            crate::log!("watch"; "not watching output dir {}", dir.display());
            continue;
        }
        if !paths.contains(dir) {
            paths.push(dir.clone());
        }
    }
    paths
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;

    #[test]
    fn test_default_watch_paths() {
        let config = test_parse_config("");
        let paths = collect_watch_paths(&config);
        assert_eq!(paths.len(), 2);
        assert!(paths[0].ends_with("views"));
        assert!(paths[1].ends_with("public"));
    }

    #[test]
    fn test_shared_dir_listed_once() {
        let config = test_parse_config("[build]\nviews = \"site\"\npublic = \"site\"\n");
        assert_eq!(collect_watch_paths(&config).len(), 1);
    }
}
