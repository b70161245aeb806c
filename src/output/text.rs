//! Human-readable output

use std::io::{self, Write};

use crate::output::RenderOptions;
use crate::query::error::ResolveError;
use crate::query::types::{QueryOutcome, Resolution};
use crate::version::types::PackageInfo;

pub fn write_outcome<W: Write>(
    writer: &mut W,
    outcome: &QueryOutcome,
    options: &RenderOptions,
) -> io::Result<()> {
    let package = &outcome.request.package;

    match &outcome.result {
        Ok(Resolution::Versions(versions)) => {
            writeln!(writer, "Available versions for {}:", package)?;
            for version in versions {
                writeln!(writer, "{}", version)?;
            }
        }
        Ok(Resolution::Latest(version)) => {
            writeln!(writer, "Latest version of {}: {}", package, version)?;
        }
        Ok(Resolution::Dependencies {
            version,
            via_latest,
            requirements,
        }) => {
            if *via_latest {
                writeln!(
                    writer,
                    "Fetching dependencies for package '{}' version '{}' (latest).",
                    package, version
                )?;
            }
            if requirements.is_empty() {
                writeln!(
                    writer,
                    "No dependencies found for package '{}' version '{}'.",
                    package, version
                )?;
            } else {
                writeln!(writer, "Dependencies for {} version {}:", package, version)?;
                for requirement in requirements {
                    writeln!(writer, "  - {}", requirement)?;
                }
                writeln!(writer)?;
            }
        }
        Ok(Resolution::Metadata(info)) => {
            write_metadata(writer, package, info, options.show_description)?;
        }
        Err(e @ ResolveError::NoQualifyingVersions { .. }) => writeln!(writer, "{}", e)?,
        Err(e) => writeln!(writer, "Error: {}", e)?,
    }

    Ok(())
}

fn write_metadata<W: Write>(
    writer: &mut W,
    package: &str,
    info: &PackageInfo,
    show_description: bool,
) -> io::Result<()> {
    writeln!(writer, "Metadata for {}:", package)?;
    writeln!(writer, "  Name: {}", info.name)?;
    writeln!(writer, "  Version: {}", info.version)?;
    writeln!(writer, "  Summary: {}", info.summary)?;
    writeln!(writer, "  Author: {}", info.author)?;
    writeln!(writer, "  Author Email: {}", info.author_email)?;
    writeln!(writer, "  License: {}", info.license)?;
    writeln!(writer, "  Home Page: {}", info.home_page)?;
    writeln!(writer, "  Repository URL: {}", info.project_url)?;
    if show_description {
        writeln!(writer, "  Description: {}", info.description)?;
    }
    writeln!(writer)?;

    if !show_description {
        writeln!(
            writer,
            "To include the description in the output, use the '--description' flag."
        )?;
        writeln!(writer)?;
    }

    Ok(())
}
