//! Loader for RON content files at startup.

use ron::Options;
use std::collections::hash_map::Entry;
use std::fs;
use std::path::Path;

use super::data::*;
use super::registry::ContentRegistry;

/// Error type for content loading failures.
#[derive(Debug)]
pub struct ContentLoadError {
    pub file: String,
    pub message: String,
}

impl std::fmt::Display for ContentLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Failed to load {}: {}", self.file, self.message)
    }
}

/// Everything read from disk, plus whatever went wrong along the way.
/// Files that fail leave their defaults in place.
#[derive(Debug, Default)]
pub struct LoadedContent {
    pub registry: ContentRegistry,
    pub defaults: GameplayDefaults,
    pub errors: Vec<ContentLoadError>,
}

/// Create RON options with extensions enabled for more flexible parsing.
fn ron_options() -> Options {
    Options::default().with_default_extension(ron::extensions::Extensions::IMPLICIT_SOME)
}

fn read_file(path: &Path) -> Result<String, ContentLoadError> {
    fs::read_to_string(path).map_err(|e| ContentLoadError {
        file: path.display().to_string(),
        message: format!("IO error: {}", e),
    })
}

/// Parse the contents of a RON file containing a DataFile<T> wrapper.
pub fn parse_data_file<T>(contents: &str, file_name: &str) -> Result<Vec<T>, ContentLoadError>
where
    T: for<'de> serde::Deserialize<'de>,
{
    let data: DataFile<T> = ron_options()
        .from_str(contents)
        .map_err(|e| ContentLoadError {
            file: file_name.to_string(),
            message: format!("Parse error: {}", e),
        })?;

    Ok(data.items)
}

/// Parse the contents of a single RON struct (not wrapped in DataFile).
pub fn parse_single_file<T>(contents: &str, file_name: &str) -> Result<T, ContentLoadError>
where
    T: for<'de> serde::Deserialize<'de>,
{
    ron_options()
        .from_str(contents)
        .map_err(|e| ContentLoadError {
            file: file_name.to_string(),
            message: format!("Parse error: {}", e),
        })
}

/// Insert dialogue scripts by id, reporting duplicates instead of overwriting.
pub fn register_dialogues(
    registry: &mut ContentRegistry,
    scripts: Vec<DialogueScript>,
    file_name: &str,
) -> Vec<ContentLoadError> {
    let mut errors = Vec::new();
    for script in scripts {
        match registry.dialogues.entry(script.id.clone()) {
            Entry::Occupied(_) => errors.push(ContentLoadError {
                file: file_name.to_string(),
                message: format!("duplicate dialogue id '{}'", script.id),
            }),
            Entry::Vacant(slot) => {
                slot.insert(script);
            }
        }
    }
    errors
}

/// Load all content from assets/data/*.ron.
pub fn load_all_content(base_path: &Path) -> LoadedContent {
    let mut loaded = LoadedContent::default();

    let dialogues_path = base_path.join("dialogues.ron");
    let dialogues_name = dialogues_path.display().to_string();
    match read_file(&dialogues_path)
        .and_then(|contents| parse_data_file::<DialogueScript>(&contents, &dialogues_name))
    {
        Ok(scripts) => {
            let dupes = register_dialogues(&mut loaded.registry, scripts, &dialogues_name);
            loaded.errors.extend(dupes);
        }
        Err(e) => loaded.errors.push(e),
    }

    let defaults_path = base_path.join("gameplay_defaults.ron");
    let defaults_name = defaults_path.display().to_string();
    match read_file(&defaults_path)
        .and_then(|contents| parse_single_file::<GameplayDefaults>(&contents, &defaults_name))
    {
        Ok(defaults) => loaded.defaults = defaults,
        Err(e) => loaded.errors.push(e),
    }

    loaded
}
