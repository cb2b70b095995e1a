//! Immutable exercise catalog.
//!
//! The catalog is loaded once (from the built-in table or a JSON
//! source) and exposed as precomputed id and alias indices. Aliases
//! only affect display-side resolution; aggregation and drafts key
//! strictly on the canonical identifier.

use std::collections::{BTreeMap, HashMap};

use serde::Deserialize;

use crate::ExerciseId;

/// Display language for localized exercise names.
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    serde::Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Language {
    #[default]
    Japanese,
    English,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Deserialize, strum::Display, strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum MuscleGroup {
    Chest,
    Back,
    Shoulders,
    Arms,
    Legs,
    Core,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Deserialize, strum::Display, strum::EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Equipment {
    Barbell,
    Dumbbell,
    Machine,
    Cable,
    Bodyweight,
    ResistanceBand,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Deserialize, strum::Display, strum::EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum MovementPattern {
    HorizontalPush,
    VerticalPush,
    HorizontalPull,
    VerticalPull,
    Squat,
    Hinge,
    Isometric,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntry {
    pub id: String,
    pub name: String,
    pub name_en: String,
    pub muscle_group: MuscleGroup,
    #[serde(default)]
    pub aliases: Vec<String>,
    #[serde(default)]
    pub equipment: Option<Equipment>,
    #[serde(default)]
    pub pattern: Option<MovementPattern>,
}

impl CatalogEntry {
    #[must_use]
    pub fn display_name(&self, language: Language) -> &str {
        match language {
            Language::Japanese => &self.name,
            Language::English => &self.name_en,
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum CatalogError {
    #[error("failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("duplicate exercise id `{0}`")]
    Duplicate(String),
}

/// Loaded-once exercise lookup. Entries are sorted by Japanese name;
/// both indices are built at load time.
pub struct Catalog {
    entries: Vec<CatalogEntry>,
    by_id: BTreeMap<String, usize>,
    by_alias: HashMap<String, usize>,
}

impl Catalog {
    pub fn new(entries: Vec<CatalogEntry>) -> Result<Self, CatalogError> {
        let mut seen: BTreeMap<&str, ()> = BTreeMap::new();
        for entry in &entries {
            if seen.insert(&entry.id, ()).is_some() {
                return Err(CatalogError::Duplicate(entry.id.clone()));
            }
        }
        Ok(Self::from_entries(entries))
    }

    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        Self::new(serde_json::from_str::<Vec<CatalogEntry>>(json)?)
    }

    #[must_use]
    pub fn builtin() -> &'static Catalog {
        static BUILTIN: std::sync::LazyLock<Catalog> =
            std::sync::LazyLock::new(|| Catalog::from_entries(builtin_entries()));
        &BUILTIN
    }

    fn from_entries(mut entries: Vec<CatalogEntry>) -> Self {
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        let by_id = entries
            .iter()
            .enumerate()
            .map(|(index, entry)| (entry.id.clone(), index))
            .collect::<BTreeMap<_, _>>();
        let mut by_alias: HashMap<String, usize> = HashMap::new();
        for (index, entry) in entries.iter().enumerate() {
            for name in [entry.name.as_str(), entry.name_en.as_str()]
                .into_iter()
                .chain(entry.aliases.iter().map(String::as_str))
            {
                by_alias.entry(name.to_lowercase()).or_insert(index);
            }
        }
        Self {
            entries,
            by_id,
            by_alias,
        }
    }

    #[must_use]
    pub fn get(&self, exercise_id: &ExerciseId) -> Option<&CatalogEntry> {
        self.by_id
            .get(exercise_id.as_ref())
            .map(|index| &self.entries[*index])
    }

    /// Localized display name, degrading to the raw identifier for
    /// exercises the catalog does not know.
    #[must_use]
    pub fn display_name(&self, exercise_id: &ExerciseId, language: Language) -> String {
        self.get(exercise_id)
            .map_or_else(|| exercise_id.to_string(), |e| {
                e.display_name(language).to_string()
            })
    }

    /// Resolve a localized name or alias, case-insensitively.
    #[must_use]
    pub fn resolve(&self, name: &str) -> Option<&CatalogEntry> {
        self.by_alias
            .get(&name.trim().to_lowercase())
            .map(|index| &self.entries[*index])
    }

    /// Entries sorted by Japanese name.
    #[must_use]
    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

struct BuiltinExercise {
    id: &'static str,
    name: &'static str,
    name_en: &'static str,
    muscle_group: MuscleGroup,
    aliases: &'static [&'static str],
    equipment: Option<Equipment>,
    pattern: Option<MovementPattern>,
}

fn builtin_entries() -> Vec<CatalogEntry> {
    BUILTIN_EXERCISES
        .iter()
        .map(|e| CatalogEntry {
            id: e.id.to_string(),
            name: e.name.to_string(),
            name_en: e.name_en.to_string(),
            muscle_group: e.muscle_group,
            aliases: e.aliases.iter().map(ToString::to_string).collect(),
            equipment: e.equipment,
            pattern: e.pattern,
        })
        .collect()
}

const BUILTIN_EXERCISES: [BuiltinExercise; 14] = [
    BuiltinExercise {
        id: "bench_press",
        name: "ベンチプレス",
        name_en: "Bench Press",
        muscle_group: MuscleGroup::Chest,
        aliases: &["BP", "バーベルベンチプレス"],
        equipment: Some(Equipment::Barbell),
        pattern: Some(MovementPattern::HorizontalPush),
    },
    BuiltinExercise {
        id: "squat",
        name: "スクワット",
        name_en: "Squat",
        muscle_group: MuscleGroup::Legs,
        aliases: &["バックスクワット"],
        equipment: Some(Equipment::Barbell),
        pattern: Some(MovementPattern::Squat),
    },
    BuiltinExercise {
        id: "deadlift",
        name: "デッドリフト",
        name_en: "Deadlift",
        muscle_group: MuscleGroup::Back,
        aliases: &["DL"],
        equipment: Some(Equipment::Barbell),
        pattern: Some(MovementPattern::Hinge),
    },
    BuiltinExercise {
        id: "overhead_press",
        name: "オーバーヘッドプレス",
        name_en: "Overhead Press",
        muscle_group: MuscleGroup::Shoulders,
        aliases: &["OHP", "ショルダープレス"],
        equipment: Some(Equipment::Barbell),
        pattern: Some(MovementPattern::VerticalPush),
    },
    BuiltinExercise {
        id: "barbell_row",
        name: "ベントオーバーロウ",
        name_en: "Barbell Row",
        muscle_group: MuscleGroup::Back,
        aliases: &["BOR", "バーベルロウ"],
        equipment: Some(Equipment::Barbell),
        pattern: Some(MovementPattern::HorizontalPull),
    },
    BuiltinExercise {
        id: "pull_up",
        name: "懸垂",
        name_en: "Pull-Up",
        muscle_group: MuscleGroup::Back,
        aliases: &["チンニング"],
        equipment: Some(Equipment::Bodyweight),
        pattern: Some(MovementPattern::VerticalPull),
    },
    BuiltinExercise {
        id: "lat_pulldown",
        name: "ラットプルダウン",
        name_en: "Lat Pulldown",
        muscle_group: MuscleGroup::Back,
        aliases: &[],
        equipment: Some(Equipment::Cable),
        pattern: Some(MovementPattern::VerticalPull),
    },
    BuiltinExercise {
        id: "dumbbell_curl",
        name: "ダンベルカール",
        name_en: "Dumbbell Curl",
        muscle_group: MuscleGroup::Arms,
        aliases: &["アームカール"],
        equipment: Some(Equipment::Dumbbell),
        pattern: None,
    },
    BuiltinExercise {
        id: "triceps_pushdown",
        name: "トライセプスプッシュダウン",
        name_en: "Triceps Pushdown",
        muscle_group: MuscleGroup::Arms,
        aliases: &["プレスダウン"],
        equipment: Some(Equipment::Cable),
        pattern: None,
    },
    BuiltinExercise {
        id: "leg_press",
        name: "レッグプレス",
        name_en: "Leg Press",
        muscle_group: MuscleGroup::Legs,
        aliases: &[],
        equipment: Some(Equipment::Machine),
        pattern: Some(MovementPattern::Squat),
    },
    BuiltinExercise {
        id: "hip_thrust",
        name: "ヒップスラスト",
        name_en: "Hip Thrust",
        muscle_group: MuscleGroup::Legs,
        aliases: &[],
        equipment: Some(Equipment::Barbell),
        pattern: Some(MovementPattern::Hinge),
    },
    BuiltinExercise {
        id: "lateral_raise",
        name: "サイドレイズ",
        name_en: "Lateral Raise",
        muscle_group: MuscleGroup::Shoulders,
        aliases: &["ラテラルレイズ"],
        equipment: Some(Equipment::Dumbbell),
        pattern: None,
    },
    BuiltinExercise {
        id: "face_pull",
        name: "フェイスプル",
        name_en: "Face Pull",
        muscle_group: MuscleGroup::Shoulders,
        aliases: &[],
        equipment: Some(Equipment::Cable),
        pattern: Some(MovementPattern::HorizontalPull),
    },
    BuiltinExercise {
        id: "plank",
        name: "プランク",
        name_en: "Plank",
        muscle_group: MuscleGroup::Core,
        aliases: &[],
        equipment: Some(Equipment::Bodyweight),
        pattern: Some(MovementPattern::Isometric),
    },
];
