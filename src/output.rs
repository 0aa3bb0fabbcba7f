//! CLI output formatting.
//!
//! The build summary prints as a content inventory: site identity first,
//! then each locale's written routes as indented context lines, then the
//! top-level files and totals. Format functions are pure (return
//! `Vec<String>`, no I/O) so tests can assert on exact lines; `print_*`
//! wrappers write to stdout.
//!
//! ```text
//! Example (example.com) theme=classic
//! Locales: en (default), fr
//!
//! en
//!     /
//!     /about/
//! fr
//!     /fr/
//!     /fr/about/
//!
//! Files
//!     sitemap.xml
//!     robots.txt
//!     manifest.json
//!
//! Built 4 routes (2 pages, 0 posts) at sites/example.com/public
//! ```

use crate::build::BuildSummary;

/// Indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

pub fn format_build_output(summary: &BuildSummary) -> Vec<String> {
    let mut lines = Vec::new();

    lines.push(format!(
        "{} ({}) theme={}",
        summary.site_name, summary.hostname, summary.theme
    ));
    let locale_list: Vec<String> = summary
        .locales
        .iter()
        .map(|l| {
            if *l == summary.default_locale {
                format!("{l} (default)")
            } else {
                l.clone()
            }
        })
        .collect();
    lines.push(format!("Locales: {}", locale_list.join(", ")));
    lines.push(String::new());

    for (locale, routes) in &summary.locale_routes {
        lines.push(locale.clone());
        for href in routes {
            lines.push(format!("{}{}", indent(1), href));
        }
    }
    lines.push(String::new());

    lines.push("Files".to_string());
    for file in &summary.extra_files {
        lines.push(format!("{}{}", indent(1), file));
    }
    lines.push(String::new());

    let total_routes: usize = summary.locale_routes.iter().map(|(_, r)| r.len()).sum();
    lines.push(format!(
        "Built {} routes ({} pages, {} posts) at {}",
        total_routes,
        summary.page_count,
        summary.post_count,
        summary.output_dir.display()
    ));

    lines
}

pub fn print_build_output(summary: &BuildSummary) {
    for line in format_build_output(summary) {
        println!("{line}");
    }
}

/// Registered themes, one per line.
pub fn format_theme_list(names: &[&str]) -> Vec<String> {
    let mut lines = vec!["Available themes".to_string()];
    for name in names {
        lines.push(format!("{}{}", indent(1), name));
    }
    lines
}
