use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use tracing::info;
use zip::ZipArchive;

use super::{parse_kml, Course};

/// Entry inside the KMZ archive holding the course
pub const COURSE_DOCUMENT: &str = "doc.kml";

/// Load the course from a KMZ archive
pub fn load_course(path: &Path) -> Result<Course> {
    info!("Loading course from {}", path.display());

    let file = File::open(path)
        .with_context(|| format!("Failed to open course archive {}", path.display()))?;
    let mut archive = ZipArchive::new(BufReader::new(file))
        .with_context(|| format!("{} is not a zip archive", path.display()))?;

    let mut text = String::new();
    get_zip_file(&mut archive, COURSE_DOCUMENT)
        .with_context(|| format!("Course archive {}", path.display()))?
        .read_to_string(&mut text)
        .context("Failed to read course document")?;

    let course = parse_kml(&text)?;
    info!(
        "Loaded course: {} track points, {} waypoints",
        course.track.len(),
        course.waypoints.len()
    );
    Ok(course)
}

// Adds the entry name in the error message
pub fn get_zip_file<'a, R: Read + Seek>(
    archive: &'a mut ZipArchive<R>,
    name: &str,
) -> Result<zip::read::ZipFile<'a>> {
    archive
        .by_name(name)
        .map_err(|err| anyhow!("{name}: {err}"))
}
