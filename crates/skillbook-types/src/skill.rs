use serde::{Deserialize, Serialize};

use std::fmt;
use std::str::FromStr;

/// Longest accepted skill name, in characters.
pub const MAX_SKILL_NAME_LEN: usize = 255;

/// Primary key of a skill, assigned by the store on insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SkillId(pub i64);

impl fmt::Display for SkillId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for SkillId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.trim().parse()?))
    }
}

impl From<i64> for SkillId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

/// A persisted skill: a named competence with a self-assessed confidence level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skill {
    pub skill_id: SkillId,
    /// Unique across all skills (exact, case-sensitive match).
    pub skill_name: String,
    pub level_of_confidence: LevelOfConfidence,
}

/// Payload for creating a skill. The id is assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewSkill {
    pub skill_name: String,
    pub level_of_confidence: LevelOfConfidence,
}

impl NewSkill {
    pub fn new(skill_name: impl Into<String>, level_of_confidence: LevelOfConfidence) -> Self {
        Self {
            skill_name: skill_name.into(),
            level_of_confidence,
        }
    }
}

/// Request body for renaming a skill.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenameSkillRequest {
    pub skill_name: String,
}

/// Request body for changing a skill's confidence level.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetLevelRequest {
    pub level_of_confidence: LevelOfConfidence,
}

/// Self-assessed proficiency, ordered from lowest to highest.
///
/// Serialized (JSON and SQL) as the variant name: `LEVEL_1`, `LEVEL_2`, `LEVEL_3`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LevelOfConfidence {
    #[serde(rename = "LEVEL_1")]
    Level1,
    #[serde(rename = "LEVEL_2")]
    Level2,
    #[serde(rename = "LEVEL_3")]
    Level3,
}

impl LevelOfConfidence {
    pub const ALL: [LevelOfConfidence; 3] = [
        LevelOfConfidence::Level1,
        LevelOfConfidence::Level2,
        LevelOfConfidence::Level3,
    ];

    /// Stable string form used on the wire and in the `skills` table.
    pub fn as_str(&self) -> &'static str {
        match self {
            LevelOfConfidence::Level1 => "LEVEL_1",
            LevelOfConfidence::Level2 => "LEVEL_2",
            LevelOfConfidence::Level3 => "LEVEL_3",
        }
    }

    /// Human-readable meaning of the level.
    pub fn description(&self) -> &'static str {
        match self {
            LevelOfConfidence::Level1 => "Should start learning or developing",
            LevelOfConfidence::Level2 => "Learning or developing",
            LevelOfConfidence::Level3 => "Confident",
        }
    }
}

impl fmt::Display for LevelOfConfidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LevelOfConfidence {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "LEVEL_1" | "1" => Ok(LevelOfConfidence::Level1),
            "LEVEL_2" | "2" => Ok(LevelOfConfidence::Level2),
            "LEVEL_3" | "3" => Ok(LevelOfConfidence::Level3),
            other => Err(format!(
                "invalid level of confidence: '{other}' (expected LEVEL_1, LEVEL_2 or LEVEL_3)"
            )),
        }
    }
}

/// Check a skill name against the naming rules.
///
/// Names must contain at least one non-whitespace character and be at most
/// [`MAX_SKILL_NAME_LEN`] characters. The name is stored as given, without trimming.
pub fn validate_skill_name(name: &str) -> Result<(), String> {
    if name.trim().is_empty() {
        return Err("skill name cannot be empty".to_string());
    }
    let len = name.chars().count();
    if len > MAX_SKILL_NAME_LEN {
        return Err(format!(
            "skill name is {len} characters, the limit is {MAX_SKILL_NAME_LEN}"
        ));
    }
    Ok(())
}
