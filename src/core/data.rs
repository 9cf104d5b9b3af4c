//! RON data file loading shared by every tuning file.

use bevy::prelude::*;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};

use super::error::DataLoadError;

/// Directory holding the RON data files.
///
/// Insert before adding [`crate::DreadPlugin`] to point the game at
/// another data set.
#[derive(Resource, Clone, Debug)]
pub struct DataDir(pub PathBuf);

impl Default for DataDir {
    fn default() -> Self {
        Self(PathBuf::from("assets/data"))
    }
}

impl DataDir {
    pub fn file(&self, name: &str) -> PathBuf {
        self.0.join(name)
    }
}

/// Insert a resource built from the data directory, unless one was
/// inserted before the plugin was added.
pub fn insert_loaded<R: Resource>(app: &mut App, load: impl FnOnce(&DataDir) -> R) {
    if app.world().contains_resource::<R>() {
        return;
    }
    let dir = app.world().get_resource::<DataDir>().cloned().unwrap_or_default();
    app.insert_resource(load(&dir));
}

/// Read and parse a RON file.
pub fn read_ron<T: DeserializeOwned>(path: &Path) -> Result<T, DataLoadError> {
    let display = path.display().to_string();

    if !path.exists() {
        return Err(DataLoadError::FileNotFound(display));
    }

    let contents = fs::read_to_string(path).map_err(|e| DataLoadError::ReadError {
        path: display.clone(),
        details: e.to_string(),
    })?;

    ron::from_str(&contents).map_err(|e| DataLoadError::ParseError {
        path: display,
        details: e.to_string(),
    })
}

/// Load a RON file, falling back to defaults when it is missing or broken.
pub fn load_or_default<T, F>(path: &Path, validate: F) -> T
where
    T: DeserializeOwned + Default,
    F: FnOnce(T) -> Result<T, DataLoadError>,
{
    match read_ron::<T>(path).and_then(validate) {
        Ok(value) => {
            info!("Loaded {}", path.display());
            value
        }
        Err(DataLoadError::FileNotFound(p)) => {
            warn!("Could not find {}. Using defaults.", p);
            T::default()
        }
        Err(e) => {
            error!("{}. Using defaults.", e);
            T::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Default, Deserialize, PartialEq)]
    struct Sample {
        value: f32,
    }

    fn temp_file(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("dread-core-{}-{}", std::process::id(), name));
        fs::write(&path, contents).expect("write temp file");
        path
    }

    #[derive(Resource, Debug, PartialEq)]
    struct Loaded(PathBuf);

    #[test]
    fn insert_loaded_respects_preinserted_resources() {
        let mut app = App::new();
        app.insert_resource(DataDir(PathBuf::from("custom")));

        insert_loaded(&mut app, |dir| Loaded(dir.file("a.ron")));
        assert_eq!(
            app.world().resource::<Loaded>(),
            &Loaded(PathBuf::from("custom").join("a.ron"))
        );

        app.insert_resource(Loaded(PathBuf::from("manual")));
        insert_loaded(&mut app, |dir| Loaded(dir.file("b.ron")));
        assert_eq!(app.world().resource::<Loaded>(), &Loaded(PathBuf::from("manual")));
    }

    #[test]
    fn missing_file_reports_not_found() {
        let err = read_ron::<Sample>(Path::new("no/such/file.ron")).unwrap_err();
        assert!(matches!(err, DataLoadError::FileNotFound(_)));
    }

    #[test]
    fn parse_error_carries_path() {
        let path = temp_file("broken.ron", "(value: )");
        let err = read_ron::<Sample>(&path).unwrap_err();
        assert!(matches!(err, DataLoadError::ParseError { .. }));
        let _ = fs::remove_file(path);
    }

    #[test]
    fn failed_validation_falls_back_to_default() {
        let path = temp_file("invalid.ron", "(value: 3.0)");
        let loaded: Sample = load_or_default(&path, |s: Sample| {
            Err(DataLoadError::invalid("invalid.ron", format!("value {} rejected", s.value)))
        });
        assert_eq!(loaded, Sample::default());
        let _ = fs::remove_file(path);
    }

    #[test]
    fn valid_file_is_loaded() {
        let path = temp_file("valid.ron", "(value: 3.0)");
        let loaded: Sample = load_or_default(&path, Ok);
        assert_eq!(loaded.value, 3.0);
        let _ = fs::remove_file(path);
    }
}
