use crate::catalog::{CatalogSnapshot, RawCatalog};
use crate::error::{Result, SchedulerError};
use crate::types::{ClassSection, ElectiveSpec, GaConfig, Room, StaffProfile, SubjectSpec, SubstitutionRules};
use std::fs;
use std::path::Path;

/// Load a catalog snapshot from a directory of flat JSON files, the same
/// layout convention as the rest of the corpus uses for demo/test fixtures.
pub fn load_catalog_from_dir(dir: &Path) -> Result<CatalogSnapshot> {
    let raw = RawCatalog {
        staff: load_staff(&dir.join("staff.json"))?,
        subjects: load_subjects(&dir.join("subjects.json"))?,
        classes: load_classes(&dir.join("classes.json"))?,
        rooms: load_rooms(&dir.join("rooms.json"))?,
        electives: load_electives(&dir.join("electives.json")).unwrap_or_default(),
    };
    CatalogSnapshot::build(raw)
}

pub fn load_staff(path: &Path) -> Result<Vec<StaffProfile>> {
    load_json_file(path)
}

pub fn load_subjects(path: &Path) -> Result<Vec<SubjectSpec>> {
    load_json_file(path)
}

pub fn load_classes(path: &Path) -> Result<Vec<ClassSection>> {
    load_json_file(path)
}

pub fn load_rooms(path: &Path) -> Result<Vec<Room>> {
    load_json_file(path)
}

pub fn load_electives(path: &Path) -> Result<Vec<ElectiveSpec>> {
    load_json_file(path)
}

/// Load GA tunables from a TOML file, or fall back to defaults.
pub fn load_ga_config_or_default(path: &Path) -> GaConfig {
    if path.exists() {
        match fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).unwrap_or_default(),
            Err(_) => GaConfig::default(),
        }
    } else {
        GaConfig::default()
    }
}

pub fn load_substitution_rules_or_default(path: &Path) -> SubstitutionRules {
    if path.exists() {
        match fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).unwrap_or_default(),
            Err(_) => SubstitutionRules::default(),
        }
    } else {
        SubstitutionRules::default()
    }
}

fn load_json_file<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let path_str = path.display().to_string();
    let content = fs::read_to_string(path).map_err(|e| SchedulerError::FileRead {
        path: path_str.clone(),
        source: e,
    })?;

    serde_json::from_str(&content).map_err(|e| {
        SchedulerError::JsonParse {
            file: path_str,
            message: e.to_string(),
        }
        .into()
    })
}
