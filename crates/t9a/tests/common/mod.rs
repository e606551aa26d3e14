//! Fixture workspace for the CLI tests: a `data/` directory with two
//! tournaments, so the default data root resolves without flags.

use std::fs;
use std::path::Path;

use tempfile::TempDir;

pub fn write(root: &Path, rel: &str, body: &str) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, body).unwrap();
}

const SPRING_META: &str = r#"{"type":1,"size":16,"start":"2024-03-02","end":"2024-03-03"}"#;

const SPRING_ONE: &str = r#"{
  "armyOne": "OnG", "armyTwo": "DE",
  "scoreOne": 14, "scoreTwo": 6, "firstTurn": 0,
  "deployment": "Frontline Clash", "primary": "Hold the Ground",
  "armyListOne": {"magicalness": 3, "units": [
    {"name": "Goblin Chief", "category": "Characters", "cost": 300,
     "options": [{"name": "Shamanism", "type": "Path"}]},
    {"name": "Wolf Riders", "category": "Core", "cost": 200, "models": 5,
     "options": [{"name": "Bow", "type": "Weapon"}]},
    {"name": "Wolf Riders", "category": "Core", "cost": 180, "models": 5, "options": []},
    {"name": "Giant", "category": "Special", "cost": 3800, "options": []}
  ]},
  "armyListTwo": {"magicalness": 5, "units": [
    {"name": "Corsairs", "category": "Core", "cost": 4400, "models": 20, "options": []}
  ]}
}"#;

const SPRING_TWO: &str = r#"{
  "armyOne": "VC", "armyTwo": "OnG",
  "scoreOne": 8, "scoreTwo": 12, "firstTurn": 1,
  "deployment": "Counterthrust", "primary": "Breakthrough",
  "armyListOne": {"magicalness": 6, "units": [
    {"name": "Skeletons", "category": "Core", "cost": 4400, "models": 40, "options": []}
  ]},
  "armyListTwo": {"magicalness": 2, "units": [
    {"name": "Wolf Riders", "category": "Core", "cost": 180, "models": 5, "options": []},
    {"name": "Wolf Riders", "category": "Core", "cost": 200, "models": 5,
     "options": [{"name": "Bow", "type": "Weapon"}]},
    {"name": "Giant", "category": "Special", "cost": 4100, "options": []}
  ]}
}"#;

const AUTUMN_META: &str = r#"{"type":0,"size":40,"start":"2024-10-05","end":"2024-10-06"}"#;

const AUTUMN_ONE: &str = r#"{
  "armyOne": "OnG", "armyTwo": "HE",
  "scoreOne": 6, "scoreTwo": 14, "firstTurn": 0,
  "deployment": "Frontline Clash", "primary": "Hold the Ground",
  "armyListOne": {"magicalness": 1, "units": [
    {"name": "Wolf Riders", "category": "Core", "cost": 360, "models": 10, "options": []},
    {"name": "Giant", "category": "Special", "cost": 4100, "options": []}
  ]},
  "armyListTwo": {"magicalness": 4, "units": [
    {"name": "Sea Guard", "category": "Core", "cost": 4450, "models": 30, "options": []}
  ]}
}"#;

/// `<tmp>/data` holds Spring Cup (Singles, 16 players, two games) and
/// Autumn Cup (Teams, 40 players, one game). Orcs and Goblins play in all
/// three games.
pub fn workspace() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let data = tmp.path().join("data");
    write(&data, "spring-cup/00.json", SPRING_META);
    write(&data, "spring-cup/01.json", SPRING_ONE);
    write(&data, "spring-cup/02.json", SPRING_TWO);
    write(&data, "autumn-cup/00.json", AUTUMN_META);
    write(&data, "autumn-cup/01.json", AUTUMN_ONE);
    tmp
}
