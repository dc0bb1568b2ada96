#![allow(clippy::expect_used, clippy::unwrap_used, reason = "Fine in tests")]
use std::{fs, path::Path};

use clap::Parser;
use seokit::{
  cli::{Cli, Commands},
  commands,
};
use seokit_config::{Config, MetaSpec, PageSpec, RouteDescriptor, SiteConfig};
use tempfile::TempDir;

const BASE: &str = r#"<!DOCTYPE html>
<html><head>
<title>Old</title>
<meta name="description" content="old desc">
<meta property="og:url" content="https://x.test/">
</head><body><div id="root"></div></body></html>"#;

const PAGE: &str = r#"import React from "react";

export default function Pricing() {
  return (
    <main>
      <h1>Pricing</h1>
      <h1>Plans</h1>
    </main>
  );
}
"#;

fn config_in(dir: &Path) -> Config {
  let mut config = Config {
    site: Some(SiteConfig {
      name:   "All Done Sites".to_string(),
      origin: "https://alldonesites.com/".to_string(),
    }),
    routes: vec![
      RouteDescriptor::new("pricing", "Pricing", "Plans and prices"),
      RouteDescriptor::new("faq", "FAQ", "Questions"),
    ],
    pages: vec![PageSpec::new("src/pages/Pricing.tsx", MetaSpec {
      heading: Some("Simple pricing".to_string()),
      seo_title: Some("Pricing | All Done Sites".to_string()),
      seo_description: Some("Plans and prices".to_string()),
      ..Default::default()
    })],
    ..Default::default()
  };
  let base = dir.join("dist/index.html");
  config
    .apply_overrides(&[
      format!("materialize.base_document={}", base.display()),
      format!("materialize.output_root={}", dir.join("dist").display()),
      format!("rewrite.root={}", dir.display()),
    ])
    .expect("Failed to apply overrides");
  config
}

fn setup() -> (TempDir, Config) {
  let temp_dir = TempDir::new().expect("Failed to create temp dir");
  let root = temp_dir.path();
  fs::create_dir_all(root.join("dist")).unwrap();
  fs::write(root.join("dist/index.html"), BASE).unwrap();
  fs::create_dir_all(root.join("src/pages")).unwrap();
  fs::write(root.join("src/pages/Pricing.tsx"), PAGE).unwrap();
  let config = config_in(root);
  (temp_dir, config)
}

#[test]
fn test_parse_subcommands() {
  let cli = Cli::try_parse_from([
    "seokit",
    "-c",
    "a.toml",
    "-c",
    "b.json",
    "--config",
    "site.name=Example",
    "materialize",
    "--base",
    "build/index.html",
    "--dry-run",
  ])
  .unwrap();

  assert_eq!(cli.config_files.len(), 2);
  assert_eq!(cli.config_overrides, ["site.name=Example"]);
  assert!(matches!(
    cli.command,
    Commands::Materialize {
      base: Some(ref base),
      output_root: None,
      dry_run: true,
    } if base == Path::new("build/index.html")
  ));
}

#[test]
fn test_check_conflicts_with_dry_run() {
  assert!(
    Cli::try_parse_from(["seokit", "rewrite", "--check", "--dry-run"]).is_err()
  );
  assert!(Cli::try_parse_from(["seokit", "-v", "rewrite", "--check"]).is_ok());
}

#[test]
fn test_init_refuses_to_overwrite() {
  let temp_dir = TempDir::new().expect("Failed to create temp dir");
  let output = temp_dir.path().join("conf/seokit.toml");

  commands::init(&output, "toml", false).unwrap();
  let config = Config::load(&[output.clone()], &[]).unwrap();
  assert_eq!(config.routes.len(), 1);
  assert_eq!(config.pages.len(), 1);

  assert!(commands::init(&output, "toml", false).is_err());
  commands::init(&output, "json", true).unwrap();
}

#[test]
fn test_materialize_command() {
  let (temp_dir, config) = setup();
  let dist = temp_dir.path().join("dist");

  let report = commands::materialize(&config, None, None, false).unwrap();

  assert_eq!(report.summary(), "Done. Pages created: 2, failed: 0");
  let faq = fs::read_to_string(dist.join("faq/index.html")).unwrap();
  assert!(faq.contains("<title>FAQ | All Done Sites</title>"));
  assert!(faq.contains("https://alldonesites.com/faq"));
  // The shared base document is left as it was
  assert_eq!(fs::read_to_string(dist.join("index.html")).unwrap(), BASE);
}

#[test]
fn test_materialize_missing_base_is_error() {
  let (temp_dir, config) = setup();
  let missing = temp_dir.path().join("build/index.html");

  let result = commands::materialize(&config, Some(missing), None, false);

  assert!(result.is_err());
  assert!(!temp_dir.path().join("dist/pricing").exists());
}

#[test]
fn test_materialize_output_root_override() {
  let (temp_dir, config) = setup();
  let out = temp_dir.path().join("public");

  commands::materialize(&config, None, Some(out.clone()), false).unwrap();

  assert!(out.join("pricing/index.html").is_file());
  assert!(!temp_dir.path().join("dist/pricing").exists());
}

#[test]
fn test_rewrite_check_then_apply() {
  let (temp_dir, config) = setup();
  let page = temp_dir.path().join("src/pages/Pricing.tsx");

  // Out of date: check fails and writes nothing
  assert!(commands::rewrite(&config, None, false, true).is_err());
  assert_eq!(fs::read_to_string(&page).unwrap(), PAGE);

  let report = commands::rewrite(&config, None, false, false).unwrap();
  assert_eq!(report.tally().changed, 1);

  let rewritten = fs::read_to_string(&page).unwrap();
  assert!(rewritten.contains("<h1>Simple pricing</h1>"));
  assert!(rewritten.contains("<h2>Plans</h2>"));
  assert!(rewritten.contains(r#"import Seo from "@/components/Seo";"#));

  // Up to date: check passes
  let report = commands::rewrite(&config, None, false, true).unwrap();
  assert_eq!(report.tally().unchanged, 1);
}

#[test]
fn test_rewrite_missing_page_is_skipped() {
  let (temp_dir, mut config) = setup();
  config
    .pages
    .push(PageSpec::new("src/pages/Gone.tsx", MetaSpec {
      heading: Some("Gone".to_string()),
      ..Default::default()
    }));

  let report =
    commands::rewrite(&config, Some(temp_dir.path().to_path_buf()), true, false)
      .unwrap();

  let tally = report.tally();
  assert_eq!(tally.changed, 1);
  assert_eq!(tally.skipped, 1);
  assert!(!tally.has_failures());
}
