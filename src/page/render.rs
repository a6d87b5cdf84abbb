//! Plain-text page rendering
//!
//! Styling goes through `console`, so colors follow
//! `console::set_colors_enabled` and are dropped when stdout is not a TTY.

use crate::page::{DocsPage, ModulePage, Page, ReadmePage, ReleasesPage, SearchPage};
use console::style;
use std::fmt::Write;

/// Render a page as terminal text
pub fn render(page: &Page) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", style(page.title()).cyan().bold());
    let _ = writeln!(out);

    match page {
        Page::Releases(p) => releases(&mut out, p),
        Page::Readme(p) => readme(&mut out, p),
        Page::Docs(p) => docs(&mut out, p),
        Page::Module(p) => module(&mut out, p),
        Page::Search(p) => search(&mut out, p),
    }
    out
}

fn releases(out: &mut String, page: &ReleasesPage) {
    if page.releases.is_empty() {
        let _ = writeln!(out, "  {}", style("No releases published").dim());
        return;
    }

    for release in page.releases.iter().rev() {
        let marker = if page.latest.as_ref() == Some(&release.version) {
            format!("  {}", style("latest").green())
        } else {
            String::new()
        };
        let _ = writeln!(
            out,
            "  {:<10} {}{}",
            release.version.to_string(),
            style(release.published.format("%Y-%m-%d")).dim(),
            marker
        );
    }
}

fn readme(out: &mut String, page: &ReadmePage) {
    if let Some(newer) = &page.newer {
        let _ = writeln!(
            out,
            "{} version {} is available",
            style("[NOTE]").yellow(),
            newer
        );
        let _ = writeln!(out);
    }
    let _ = writeln!(out, "{}", page.readme.trim_end());
}

fn docs(out: &mut String, page: &DocsPage) {
    let width = page.modules.iter().map(|m| m.name.len()).max().unwrap_or(0);
    for m in &page.modules {
        let _ = writeln!(
            out,
            "  {}  {}",
            style(format!("{:<width$}", m.name, width = width)).bold(),
            style(&m.summary).dim()
        );
    }

    if let Some(readme) = &page.readme {
        let _ = writeln!(out);
        let _ = writeln!(out, "{}", style("README").bold());
        let _ = writeln!(out);
        let _ = writeln!(out, "{}", readme.trim_end());
    }
}

fn module(out: &mut String, page: &ModulePage) {
    let comment = strip_docs_lines(&page.module.comment);
    if !comment.is_empty() {
        let _ = writeln!(out, "{}", comment);
        let _ = writeln!(out);
    }

    for block in &page.module.blocks {
        let _ = writeln!(out, "{}", style(&block.signature).bold());
        let comment = block.comment.trim();
        if !comment.is_empty() {
            for line in comment.lines() {
                let _ = writeln!(out, "    {}", line);
            }
        }
        let _ = writeln!(out);
    }
}

fn search(out: &mut String, page: &SearchPage) {
    match page.matches.len() {
        0 => {
            let _ = writeln!(out, "  {}", style("No packages match").dim());
            return;
        }
        1 => {
            let _ = writeln!(out, "1 package");
        }
        n => {
            let _ = writeln!(out, "{} packages", n);
        }
    }

    for pkg in &page.matches {
        let _ = writeln!(
            out,
            "  {} {}  {}",
            style(pkg.name.to_string()).bold(),
            style(&pkg.version).dim(),
            pkg.summary
        );
    }
}

/// Module comments list their exports with `@docs` lines; drop them
fn strip_docs_lines(comment: &str) -> String {
    comment
        .lines()
        .filter(|line| !line.trim_start().starts_with("@docs"))
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::PackageName;
    use crate::page::ModuleSummary;
    use crate::registry::{BlockKind, DocBlock, ModuleDocs, PackageSummary, Release};
    use chrono::DateTime;
    use semver::Version;

    fn plain(page: &Page) -> String {
        console::set_colors_enabled(false);
        render(page)
    }

    fn release(minor: u64, ts: i64) -> Release {
        Release {
            version: Version::new(1, minor, 0),
            published: DateTime::from_timestamp(ts, 0).unwrap(),
        }
    }

    #[test]
    fn releases_newest_first_with_latest_marker() {
        let page = Page::Releases(ReleasesPage {
            package: PackageName::new("elm", "json"),
            releases: vec![release(0, 1534000000), release(1, 1580000000)],
            latest: Some(Version::new(1, 1, 0)),
        });
        let text = plain(&page);

        let newer = text.find("1.1.0").unwrap();
        let older = text.find("1.0.0").unwrap();
        assert!(newer < older);
        assert!(text.contains("latest"));
        assert!(text.contains("2018-08-11"));
    }

    #[test]
    fn readme_shows_newer_notice() {
        let page = Page::Readme(ReadmePage {
            package: PackageName::new("elm", "json"),
            version: Version::new(1, 0, 0),
            readme: "# elm/json\n".to_string(),
            newer: Some(Version::new(1, 1, 0)),
        });
        let text = plain(&page);
        assert!(text.contains("version 1.1.0 is available"));
        assert!(text.ends_with("# elm/json\n"));
    }

    #[test]
    fn docs_lists_modules_then_readme() {
        let page = Page::Docs(DocsPage {
            package: PackageName::new("elm", "json"),
            version: Version::new(1, 1, 0),
            modules: vec![ModuleSummary {
                name: "Json.Decode".to_string(),
                summary: "Turn JSON values into Elm values.".to_string(),
            }],
            readme: Some("# elm/json".to_string()),
        });
        let text = plain(&page);
        assert!(text.contains("Json.Decode  Turn JSON values"));
        assert!(text.find("Json.Decode").unwrap() < text.find("README").unwrap());
    }

    #[test]
    fn module_drops_docs_lines() {
        let page = Page::Module(ModulePage {
            package: PackageName::new("elm", "json"),
            version: Version::new(1, 1, 0),
            module: ModuleDocs {
                name: "Json.Decode".to_string(),
                comment: " Decoders.\n\n@docs int\n".to_string(),
                blocks: vec![DocBlock {
                    kind: BlockKind::Value,
                    name: "int".to_string(),
                    comment: " Decode an int.".to_string(),
                    signature: "int : Decoder Int".to_string(),
                }],
            },
        });
        let text = plain(&page);
        assert!(!text.contains("@docs"));
        assert!(text.contains("int : Decoder Int\n    Decode an int."));
    }

    #[test]
    fn search_counts_matches() {
        let page = Page::Search(SearchPage {
            query: "json".to_string(),
            matches: vec![PackageSummary {
                name: PackageName::new("elm", "json"),
                summary: "Encode and decode JSON values".to_string(),
                license: "BSD-3-Clause".to_string(),
                version: Version::new(1, 1, 3),
            }],
        });
        let text = plain(&page);
        assert!(text.contains("1 package\n"));
        assert!(text.contains("elm/json 1.1.3"));

        let empty = Page::Search(SearchPage {
            query: "zzz".to_string(),
            matches: vec![],
        });
        assert!(plain(&empty).contains("No packages match"));
    }
}
