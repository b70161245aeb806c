//! JSON output, one document per package

use std::collections::BTreeMap;
use std::io::{self, Write};

use serde::Serialize;

use crate::output::RenderOptions;
use crate::query::types::{QueryKind, QueryOutcome, Resolution};
use crate::version::types::PackageInfo;

#[derive(Serialize)]
struct VersionsDocument<'a> {
    package: &'a str,
    versions: &'a [String],
}

#[derive(Serialize)]
struct LatestDocument<'a> {
    package: &'a str,
    latest: &'a str,
}

#[derive(Serialize)]
struct DependenciesDocument<'a> {
    package: &'a str,
    version: &'a str,
    dependencies: &'a [String],
}

#[derive(Serialize)]
struct ErrorDocument<'a> {
    package: &'a str,
    /// Only `deps` requests name a version
    #[serde(skip_serializing_if = "Option::is_none")]
    version: Option<&'a str>,
    kind: &'static str,
    error: String,
}

pub fn write_outcome<W: Write>(
    writer: &mut W,
    outcome: &QueryOutcome,
    options: &RenderOptions,
) -> io::Result<()> {
    let package = outcome.request.package.as_str();

    match &outcome.result {
        Ok(Resolution::Versions(versions)) => {
            serde_json::to_writer(&mut *writer, &VersionsDocument { package, versions })?;
        }
        Ok(Resolution::Latest(latest)) => {
            serde_json::to_writer(&mut *writer, &LatestDocument { package, latest })?;
        }
        Ok(Resolution::Dependencies {
            version,
            requirements,
            ..
        }) => {
            let document = DependenciesDocument {
                package,
                version,
                dependencies: requirements,
            };
            serde_json::to_writer_pretty(&mut *writer, &document)?;
        }
        Ok(Resolution::Metadata(info)) => {
            let document = metadata_document(info, options.show_description);
            serde_json::to_writer_pretty(&mut *writer, &document)?;
        }
        Err(e) => {
            let document = ErrorDocument {
                package,
                version: (outcome.kind == QueryKind::Dependencies)
                    .then_some(outcome.request.spec.as_str()),
                kind: e.kind(),
                error: e.to_string(),
            };
            serde_json::to_writer(&mut *writer, &document)?;
        }
    }

    writeln!(writer)
}

// Keys mirror the labels of the text output.
fn metadata_document(info: &PackageInfo, show_description: bool) -> BTreeMap<&'static str, &str> {
    let mut document = BTreeMap::from([
        ("Name", info.name.as_str()),
        ("Version", info.version.as_str()),
        ("Summary", info.summary.as_str()),
        ("Author", info.author.as_str()),
        ("Author Email", info.author_email.as_str()),
        ("License", info.license.as_str()),
        ("Home Page", info.home_page.as_str()),
    ]);
    if show_description {
        document.insert("Description", info.description.as_str());
    }
    if !info.project_url.is_empty() {
        document.insert("Repository URL", info.project_url.as_str());
    }
    document
}
