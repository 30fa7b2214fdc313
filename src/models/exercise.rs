use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError, ValidationErrors};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exercise {
    pub name: String,
    pub description: String,
    pub muscle_groups: Vec<String>,
    pub equipment: Vec<String>,
    pub sets: i32,
    pub reps: i32,
}

/// Body of `POST /exercise`. Equipment arrives as one comma-separated string.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateExerciseRequest {
    #[validate(length(min = 1, max = 255, message = "Name must be between 1 and 255 characters"))]
    pub name: String,

    #[serde(default)]
    #[validate(length(max = 255, message = "Description cannot exceed 255 characters"))]
    pub description: String,

    #[serde(default)]
    pub muscle_groups: Vec<String>,

    #[serde(default)]
    pub equipment: String,

    #[validate(range(min = 1, message = "Sets must be a positive number"))]
    pub sets: i32,

    #[validate(range(min = 1, message = "Reps must be a positive number"))]
    pub reps: i32,
}

impl CreateExerciseRequest {
    pub fn into_exercise(self) -> Result<Exercise, ValidationErrors> {
        self.validate()?;

        if self.muscle_groups.iter().any(|group| group.trim().is_empty()) {
            let mut errors = ValidationErrors::new();
            let mut error = ValidationError::new("blank_entry");
            error.message = Some("Muscle groups cannot be blank".into());
            errors.add("muscle_groups", error);
            return Err(errors);
        }

        Ok(Exercise {
            name: self.name,
            description: self.description,
            muscle_groups: self.muscle_groups,
            equipment: parse_equipment(&self.equipment),
            sets: self.sets,
            reps: self.reps,
        })
    }
}

/// Split a comma-separated equipment string, trimming each entry and
/// dropping empty ones. Order is preserved.
pub fn parse_equipment(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}
