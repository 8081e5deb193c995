//! Catalog command - lists layers and reports configuration problems.

use std::fmt::Write;
use std::path::PathBuf;

use clap::Args;
use layerlens::catalog::{Catalog, LayerDescriptor};
use layerlens::handler::HandlerRegistry;

use super::common::{load_catalog, load_config};
use crate::error::CliError;

/// Arguments for the catalog command.
#[derive(Debug, Args)]
pub struct CatalogArgs {
    /// Layer catalog JSON file
    #[arg(long)]
    pub catalog: PathBuf,

    /// Configuration file (defaults to ~/.layerlens/config.ini)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Tile API base URL substituted for {api}
    #[arg(long)]
    pub api_url: Option<String>,
}

/// Run the catalog command.
pub fn run(args: CatalogArgs) -> Result<(), CliError> {
    let config = load_config(args.config.as_deref())?;
    let catalog = load_catalog(&args.catalog, args.api_url.as_deref(), &config)?;
    print!("{}", describe(&catalog, &HandlerRegistry::with_builtin()));
    Ok(())
}

/// Render the layer table followed by any problems found.
fn describe(catalog: &Catalog, registry: &HandlerRegistry) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} layers", catalog.len());
    for layer in catalog.iter() {
        let _ = writeln!(out, "  {}", layer_line(layer));
    }

    let mut problems = Vec::new();
    for layer in catalog.iter() {
        if !registry.contains(&layer.layer_type) {
            problems.push(format!(
                "layer '{}' has type '{}' with no registered handler",
                layer.id, layer.layer_type
            ));
        }
    }
    for (declaring, declared) in catalog.asymmetric_exclusions() {
        problems.push(format!(
            "layer '{}' excludes '{}' but not the other way round",
            declaring, declared
        ));
    }

    if problems.is_empty() {
        let _ = writeln!(out, "No problems found");
    } else {
        let _ = writeln!(out, "{} problems:", problems.len());
        for problem in problems {
            let _ = writeln!(out, "  ! {}", problem);
        }
    }
    out
}

fn layer_line(layer: &LayerDescriptor) -> String {
    let mut line = format!("{:<20} {:<18}", layer.id, layer.layer_type);
    if let Some(domain) = layer.domain {
        let _ = write!(line, " {}..{}", domain.start, domain.end);
    }
    if layer.enabled_compare().is_some() {
        line.push_str(" [compare]");
    }
    if layer.enabled {
        line.push_str(" [enabled]");
    }
    line.trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    const CATALOG: &str = r#"[
        {"id": "a", "name": "A", "type": "raster", "source": {"type": "raster", "tiles": []},
         "exclusiveWith": ["b"], "enabled": true},
        {"id": "b", "name": "B", "type": "raster-timeseries", "timeUnit": "day",
         "domain": ["2020-01-01", "2020-02-01"],
         "source": {"type": "raster", "tiles": []},
         "compare": {"enabled": true}},
        {"id": "c", "name": "C", "type": "vector-tiles", "source": {"type": "vector", "tiles": []}}
    ]"#;

    #[test]
    fn test_describe_lists_layers() {
        let catalog = Catalog::from_json(CATALOG, None).unwrap();
        let out = describe(&catalog, &HandlerRegistry::with_builtin());

        assert!(out.starts_with("3 layers\n"));
        assert!(out.contains("2020-01-01..2020-02-01 [compare]"));
        assert!(out.contains("[enabled]"));
    }

    #[test]
    fn test_describe_reports_problems() {
        let catalog = Catalog::from_json(CATALOG, None).unwrap();
        let out = describe(&catalog, &HandlerRegistry::with_builtin());

        assert!(out.contains("2 problems:"));
        assert!(out.contains("type 'vector-tiles' with no registered handler"));
        assert!(out.contains("layer 'a' excludes 'b'"));
    }

    #[test]
    fn test_describe_clean_catalog() {
        let catalog = Catalog::from_json(
            include_str!("../../../layerlens/data/catalog.json"),
            None,
        )
        .unwrap();
        let out = describe(&catalog, &HandlerRegistry::with_builtin());

        assert!(out.contains("4 layers"));
        assert!(out.contains("No problems found"));
    }
}
