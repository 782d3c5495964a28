//! Phase 6: Render the index page
//!
//! Runs the index renderer once over every clone in the staging workspace
//! and writes its output to `<publish_root>/index.html`, then copies the
//! static assets into the publish root.
//!
//! `stagit-index` refuses to run without at least one repository, so an
//! empty workspace gets a fixed page with the same layout and no rows.

use super::copy_static_assets;
use crate::error::Result;
use crate::operations::{RendererOperations, RendererToolset};
use glob::Pattern;
use log::info;
use std::fs;
use std::path::{Path, PathBuf};

/// Index page for a site without repositories.
const EMPTY_INDEX_PAGE: &str = r#"<!DOCTYPE html>
<html>
<head>
<meta http-equiv="Content-Type" content="text/html; charset=UTF-8" />
<meta name="viewport" content="width=device-width, initial-scale=1" />
<title>Repositories</title>
<link rel="icon" type="image/png" href="favicon.png" />
<link rel="stylesheet" type="text/css" href="style.css" />
</head>
<body>
<table>
<tr><td><img src="logo.png" alt="" width="32" height="32" /></td>
<td><span class="desc">Repositories</span></td></tr><tr><td></td><td>
</td></tr>
</table>
<hr/>
<div id="content">
<table id="index"><thead>
<tr><td><b>Name</b></td><td><b>Description</b></td><td><b>Owner</b></td><td><b>Last commit</b></td></tr></thead><tbody>
</tbody>
</table>
</div>
</body>
</html>
"#;

/// Immediate subdirectories of `staging_root`, sorted by path.
///
/// Entries starting with a dot are included; every entry in the staging
/// workspace is a clone.
pub fn staged_repositories(staging_root: &Path) -> Result<Vec<PathBuf>> {
    let root = std::path::absolute(staging_root)?;
    let pattern = format!("{}/*", Pattern::escape(&root.to_string_lossy()));

    let mut repo_dirs = Vec::new();
    for entry in glob::glob(&pattern)? {
        let path = entry?;
        if path.is_dir() {
            repo_dirs.push(path);
        }
    }
    repo_dirs.sort();
    Ok(repo_dirs)
}

/// Renders the index over every staged clone.
pub fn execute(
    renderer_ops: &dyn RendererOperations,
    toolset: &RendererToolset,
    staging_root: &Path,
    publish_root: &Path,
    static_dir: &Path,
) -> Result<PathBuf> {
    let repo_dirs = staged_repositories(staging_root)?;
    let index_page = publish_root.join("index.html");

    if repo_dirs.is_empty() {
        info!("No repositories staged, writing an empty index");
        fs::write(&index_page, EMPTY_INDEX_PAGE)?;
    } else {
        info!("Rendering index over {} repositories", repo_dirs.len());
        renderer_ops.render_index(toolset, &repo_dirs, &index_page)?;
    }

    copy_static_assets(static_dir, publish_root)?;
    Ok(index_page)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::phases::test_support::*;
    use tempfile::TempDir;

    fn toolset() -> RendererToolset {
        RendererToolset::in_dir(Path::new("/opt/stagit"))
    }

    #[test]
    fn test_staged_repositories_lists_only_directories_sorted() {
        let temp = TempDir::new().unwrap();
        for name in ["zeta", "alpha", ".dotted", "mid"] {
            fs::create_dir(temp.path().join(name)).unwrap();
        }
        fs::write(temp.path().join("stray-file"), "").unwrap();

        let dirs = staged_repositories(temp.path()).unwrap();

        let names: Vec<_> = dirs
            .iter()
            .map(|d| d.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec![".dotted", "alpha", "mid", "zeta"]);
        assert!(dirs.iter().all(|d| d.is_absolute()));
    }

    #[test]
    fn test_staged_repositories_handles_glob_characters_in_root() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("[weird]*root");
        fs::create_dir_all(root.join("a")).unwrap();

        let dirs = staged_repositories(&root).unwrap();
        assert_eq!(dirs.len(), 1);
        assert!(dirs[0].ends_with("a"));
    }

    #[test]
    fn test_index_renders_all_repositories() {
        let temp = TempDir::new().unwrap();
        let staging = temp.path().join("staging");
        let publish = temp.path().join("public");
        let static_dir = temp.path().join("static");
        fs::create_dir_all(staging.join("b")).unwrap();
        fs::create_dir_all(staging.join("a")).unwrap();
        fs::create_dir_all(&publish).unwrap();
        write_static_assets(&static_dir);
        let renderer = MockRendererOperations::new();
        let calls = renderer.index_calls.clone();

        let index_page = execute(&renderer, &toolset(), &staging, &publish, &static_dir).unwrap();

        assert_eq!(index_page, publish.join("index.html"));
        let html = fs::read_to_string(&index_page).unwrap();
        assert!(html.contains("<td>a</td>"));
        assert!(html.contains("<td>b</td>"));
        for asset in ["favicon.png", "logo.png", "style.css"] {
            assert!(publish.join(asset).is_file());
        }

        let calls = calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].len(), 2);
        assert!(calls[0][0].ends_with("a"));
        assert!(calls[0][1].ends_with("b"));
    }

    #[test]
    fn test_index_with_no_repositories() {
        let temp = TempDir::new().unwrap();
        let staging = temp.path().join("staging");
        let publish = temp.path().join("public");
        let static_dir = temp.path().join("static");
        fs::create_dir_all(&staging).unwrap();
        fs::create_dir_all(&publish).unwrap();
        write_static_assets(&static_dir);
        let renderer = MockRendererOperations::new();
        let calls = renderer.index_calls.clone();

        execute(&renderer, &toolset(), &staging, &publish, &static_dir).unwrap();

        let html = fs::read_to_string(publish.join("index.html")).unwrap();
        assert!(html.contains("<table id=\"index\">"));
        assert!(html.contains("<tbody>\n</tbody>"));
        assert!(html.contains("href=\"style.css\""));
        for asset in ["favicon.png", "logo.png", "style.css"] {
            assert!(publish.join(asset).is_file());
        }
        // The renderer is never asked to render zero repositories.
        assert!(calls.lock().unwrap().is_empty());
    }

    #[test]
    fn test_index_missing_static_dir_fails() {
        let temp = TempDir::new().unwrap();
        let staging = temp.path().join("staging");
        let publish = temp.path().join("public");
        fs::create_dir_all(&staging).unwrap();
        fs::create_dir_all(&publish).unwrap();

        let result = execute(
            &MockRendererOperations::new(),
            &toolset(),
            &staging,
            &publish,
            &temp.path().join("no-static"),
        );

        assert!(matches!(result, Err(Error::StaticAsset { .. })));
    }
}
